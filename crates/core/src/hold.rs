//! Hold slot - one stored piece, usable once per lock

use crate::pieces::Tetromino;
use crate::rng::PieceQueue;
use crate::types::Shape;

/// One-slot hold buffer with its per-placement usage lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldSlot {
    piece: Option<Tetromino>,
    can_hold: bool,
}

impl HoldSlot {
    pub fn new() -> Self {
        Self {
            piece: None,
            can_hold: true,
        }
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn shape(&self) -> Option<Shape> {
        self.piece.map(|p| p.shape())
    }

    /// Swap `active` with the held piece.
    ///
    /// With an empty slot the active piece is stored and the next queued piece
    /// becomes active; otherwise the two trade places. Either way the incoming
    /// piece is in base orientation at the spawn coordinate, the stored one in
    /// base orientation. Returns false without touching anything once the slot
    /// has been used since the last lock.
    pub fn swap(&mut self, active: &mut Tetromino, queue: &mut PieceQueue) -> bool {
        if !self.can_hold {
            return false;
        }

        let stored = Tetromino::new(active.shape());
        *active = match self.piece.replace(stored) {
            Some(held) => Tetromino::spawned(held.shape()),
            None => queue.spawn(),
        };
        self.can_hold = false;

        true
    }

    /// Re-arm after a lock
    pub fn unlock(&mut self) {
        self.can_hold = true;
    }
}

impl Default for HoldSlot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Randomizer;
    use crate::types::Rotation;

    fn queue(shapes: &[Shape]) -> PieceQueue {
        PieceQueue::new(Randomizer::scripted(shapes.iter().copied()).unwrap())
    }

    #[test]
    fn test_first_hold_stores_and_spawns() {
        let mut slot = HoldSlot::new();
        let mut queue = queue(&[Shape::S, Shape::Z, Shape::L]);
        let mut active = Tetromino::spawned(Shape::T).rotate_right().at(2, 7);

        assert!(slot.swap(&mut active, &mut queue));

        assert_eq!(slot.shape(), Some(Shape::T));
        assert_eq!(active.shape(), Shape::S);
        assert_eq!(queue.peek(), [Shape::Z, Shape::L, Shape::S]);
        assert!(!slot.can_hold());
    }

    #[test]
    fn test_second_hold_blocked_until_unlock() {
        let mut slot = HoldSlot::new();
        let mut queue = queue(&[Shape::S]);
        let mut active = Tetromino::spawned(Shape::T);

        assert!(slot.swap(&mut active, &mut queue));
        let before = active;
        assert!(!slot.swap(&mut active, &mut queue));
        assert_eq!(active, before);

        slot.unlock();
        assert!(slot.swap(&mut active, &mut queue));
        assert_eq!(active.shape(), Shape::T);
        assert_eq!(slot.shape(), Some(Shape::S));
    }

    #[test]
    fn test_swapped_in_piece_is_recentered_and_unrotated() {
        let mut slot = HoldSlot::new();
        let mut queue = queue(&[Shape::J]);
        let mut active = Tetromino::spawned(Shape::I);
        slot.swap(&mut active, &mut queue);
        slot.unlock();

        active = active.rotate_left().at(1, 3);
        slot.swap(&mut active, &mut queue);

        assert_eq!(active, Tetromino::spawned(Shape::I));
        assert_eq!(active.rotation(), Rotation::North);
        assert_eq!(slot.piece.map(|p| p.rotation()), Some(Rotation::North));
    }
}
