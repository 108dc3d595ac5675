//! Script runner tests - parsing plus full replays

use tetris_sim::core::{GameConfig, GameState, Randomizer};
use tetris_sim::script::{self, Runner, ScriptError, Step};
use tetris_sim::types::{Command, MachineState, Shape};

const ROW_FILL: &str = "
# two horizontal I pieces and an O fill the bottom row
rotateCw
moveLeft
moveLeft
moveLeft
hardDrop

rotateCw
moveRight
hardDrop

moveRight
moveRight
moveRight
hardDrop
";

fn runner_with(shapes: &[Shape], config: GameConfig) -> Runner {
    let randomizer = Randomizer::scripted(shapes.iter().copied()).unwrap();
    let state = GameState::with_randomizer(config, randomizer).unwrap();
    let mut runner = Runner::new(state);
    runner.apply(Command::Start);
    runner
}

#[test]
fn test_row_fill_script() {
    let steps = script::parse(ROW_FILL).unwrap();
    assert_eq!(steps.len(), 12);
    assert_eq!(steps[0].line, 3);

    let mut runner = runner_with(&[Shape::I, Shape::I, Shape::O], GameConfig::default());
    runner.run(&steps);

    let snapshot = runner.state().snapshot();
    assert_eq!(snapshot.lines, 1);
    assert_eq!(snapshot.score, 100);
    assert_eq!(
        snapshot.board_rows()[19],
        "........oo",
        "bottom row after the clear"
    );
}

#[test]
fn test_unknown_step_reports_line() {
    let err = script::parse("start\n\nhardDrop\nspin\n").unwrap_err();
    assert_eq!(
        err,
        ScriptError::UnknownStep {
            line: 4,
            text: "spin".to_string()
        }
    );
    assert_eq!(err.to_string(), "line 4: unknown step `spin`");
}

#[test]
fn test_every_command_name_parses() {
    let source: String = Command::ALL
        .iter()
        .map(|c| format!("{}\n", c.as_str()))
        .collect();
    let steps = script::parse(&source).unwrap();

    let parsed: Vec<Step> = steps.iter().map(|l| l.step).collect();
    let expected: Vec<Step> = Command::ALL.iter().copied().map(Step::Command).collect();
    assert_eq!(parsed, expected);
}

#[test]
fn test_seeded_replay_is_deterministic() {
    let steps = script::parse(
        "moveLeft\nwait 500\nrotateCw\nhardDrop\nhold\nwait 2000\nsoftDropBegin\nwait 900\nsoftDropEnd\nhardDrop\n",
    )
    .unwrap();

    let play = || {
        let mut runner = Runner::new(GameState::new(99));
        runner.apply(Command::Start);
        runner.run(&steps);
        runner.state().snapshot()
    };

    assert_eq!(play(), play());
}

#[test]
fn test_config_changes_lock_delay() {
    let config: GameConfig = serde_json::from_str(r#"{ "lock_delay_ms": 100 }"#).unwrap();
    let mut runner = runner_with(&[Shape::O, Shape::T], config);

    // 18 rows down, grounding on the next interval, then 100ms + one tick.
    runner.wait(19 * 400 + 120);

    assert_eq!(runner.state().board().filled_count(), 4);
    assert_eq!(runner.state().machine_state(), MachineState::Falling);
}

#[test]
fn test_restart_in_script() {
    let steps = script::parse("hardDrop\nhardDrop\nrestart\nwait 100\n").unwrap();
    let mut runner = runner_with(&[Shape::T], GameConfig::default());
    runner.run(&steps);

    let state = runner.state();
    assert_eq!(state.episode_id(), 1);
    assert_eq!(state.board().filled_count(), 0);
    assert_eq!(state.clock_ms(), 100);
}
