//! Pause / scrub / rewind workflow.

use sentinel_core::{
    command::ScrubCommand,
    config::SimConfig,
    event::SimEvent,
    scenario,
    session::{RunMode, Session},
};
use std::time::Duration;

fn running_session(ticks: u64) -> Session {
    let mut session = Session::new(scenario::drone_demo(), &SimConfig::default())
        .expect("build session");
    session.run_ticks(ticks).expect("run");
    session
}

#[test]
fn rewind_truncates_and_continues_from_cursor() {
    let mut session = running_session(10);
    assert_eq!(session.history().len(), 11);

    assert_eq!(session.pause(), Some(SimEvent::Paused { tick: 10, cursor: 10 }));
    assert_eq!(session.mode(), RunMode::Paused);

    session.step_cursor(-6);
    assert_eq!(session.cursor(), 4);
    assert_eq!(session.mode(), RunMode::PausedRewound);
    assert_eq!(session.displayed().map(|e| e.tick), Some(4));
    // Scrubbing is read-only.
    assert_eq!(session.orchestrator().tick(), 10);
    assert_eq!(session.history().len(), 11);

    assert_eq!(session.resume(), Some(SimEvent::Rewound { tick: 4, discarded: 6 }));
    assert_eq!(session.mode(), RunMode::Running);
    assert_eq!(session.history().len(), 5);
    assert_eq!(session.orchestrator().tick(), 4);

    // The drone demo is a straight line, so the re-simulated tick 5
    // lands on the same reference hash as an uninterrupted run.
    let event = session.tick().expect("tick");
    assert_eq!(event, SimEvent::TickCompleted { tick: 5, hash: 0xe69f_677c_45e3_4c33 });
}

#[test]
fn resume_without_moving_keeps_history() {
    let mut session = running_session(6);
    session.apply(ScrubCommand::TogglePause);
    assert_eq!(session.apply(ScrubCommand::TogglePause), Some(SimEvent::Resumed { tick: 6 }));
    assert_eq!(session.history().len(), 7);
    session.tick().expect("tick");
    assert_eq!(session.orchestrator().tick(), 7);
}

#[test]
fn returning_to_latest_entry_cancels_rewind() {
    let mut session = running_session(5);
    session.pause();
    session.seek(1);
    assert_eq!(session.mode(), RunMode::PausedRewound);
    session.seek(5);
    assert_eq!(session.mode(), RunMode::Paused);

    assert_eq!(session.resume(), Some(SimEvent::Resumed { tick: 5 }));
    assert_eq!(session.history().len(), 6);
}

#[test]
fn cursor_moves_saturate() {
    let mut session = running_session(3);
    session.pause();

    session.apply(ScrubCommand::StepCursor { delta: -1_000 });
    assert_eq!(session.cursor(), 0);
    session.apply(ScrubCommand::StepCursor { delta: i64::MIN });
    assert_eq!(session.cursor(), 0);

    session.apply(ScrubCommand::Seek { index: usize::MAX });
    assert_eq!(session.cursor(), 3);
    assert_eq!(session.apply(ScrubCommand::StepCursor { delta: i64::MAX }), None);
    assert_eq!(session.cursor(), 3);
}

#[test]
fn cursor_input_is_ignored_while_running() {
    let mut session = running_session(3);
    assert_eq!(session.seek(0), None);
    assert_eq!(session.mode(), RunMode::Running);
    assert_eq!(session.resume(), None);
}

#[test]
fn frames_do_not_tick_while_paused() {
    let mut session = running_session(0);
    let events = session.frame(Duration::from_millis(33)).expect("frame");
    assert_eq!(events.len(), 2);

    session.pause();
    assert!(session.frame(Duration::from_secs(5)).expect("frame").is_empty());
    session.resume();
    // Time spent paused is not banked.
    assert!(session.frame(Duration::from_millis(1)).expect("frame").is_empty());
    assert_eq!(session.orchestrator().tick(), 2);
}

#[test]
fn frame_catch_up_is_capped() {
    let mut session = running_session(0);
    let cap = SimConfig::default().max_ticks_per_frame as usize;
    let events = session.frame(Duration::from_secs(10)).expect("frame");
    assert_eq!(events.len(), cap);
    assert!(session.driver().dropped_ticks() > 0);
}

#[test]
fn bounded_session_rewinds_within_its_ring() {
    let config = SimConfig::default_test();
    let mut session = Session::new(scenario::seeded_swarm(3, 2), &config).expect("session");
    session.run_ticks(100).expect("run");
    assert_eq!(session.history().len(), 64);
    assert_eq!(session.history().get(0).map(|e| e.tick), Some(37));

    session.pause();
    session.seek(0);
    assert_eq!(session.resume(), Some(SimEvent::Rewound { tick: 37, discarded: 63 }));
    assert_eq!(session.orchestrator().tick(), 37);
    match session.tick().expect("tick") {
        SimEvent::TickCompleted { tick, .. } => assert_eq!(tick, 38),
        other => panic!("unexpected event: {other:?}"),
    }
    assert_eq!(session.history().len(), 2);
}
