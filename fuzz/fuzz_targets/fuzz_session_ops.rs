#![no_main]

use std::time::Duration;

use algoviz_core::{AlgorithmKind, FlagPatch, VisualFlags};
use algoviz_runtime::{PlaybackMode, PlaybackSession, Speed};
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Play,
    Pause,
    Stop,
    Next,
    Prev,
    Seek(u8),
    Tick(u16),
    Speed(u8),
    Algorithm(u8),
    Swap(u8, u8),
    Flag(u8),
    Save,
    Undo,
    Redo,
    Reset,
    Shuffle,
}

#[derive(Debug, Arbitrary)]
struct Input {
    values: Vec<i8>,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let values: Vec<i64> = input.values.iter().take(24).map(|&v| i64::from(v)).collect();
    let mut session = PlaybackSession::default();
    session.load(&values);

    for op in input.ops.iter().take(256) {
        match *op {
            Op::Play => {
                let _ = session.play();
            }
            Op::Pause => session.pause(),
            Op::Stop => session.stop(),
            Op::Next => {
                let _ = session.next_step();
            }
            Op::Prev => {
                let _ = session.prev_step();
            }
            Op::Seek(n) => {
                let _ = session.go_to_step(usize::from(n));
            }
            Op::Tick(ms) => {
                let _ = session.tick(Duration::from_millis(u64::from(ms)));
            }
            Op::Speed(s) => {
                let _ = session.set_speed(Speed::ALL[usize::from(s) % Speed::ALL.len()]);
            }
            Op::Algorithm(a) => {
                session.set_algorithm(AlgorithmKind::ALL[usize::from(a) % AlgorithmKind::ALL.len()]);
            }
            Op::Swap(i, j) => {
                let _ = session.swap(usize::from(i), usize::from(j));
            }
            Op::Flag(i) => {
                let _ = session
                    .update_element(usize::from(i), FlagPatch::new().set(VisualFlags::HIGHLIGHTED));
            }
            Op::Save => session.save_to_history(),
            Op::Undo => {
                let _ = session.undo();
            }
            Op::Redo => {
                let _ = session.redo();
            }
            Op::Reset => session.reset(),
            Op::Shuffle => session.shuffle(),
        }

        // Post-conditions that must always hold:
        assert_eq!(session.elements().len(), values.len());
        assert_eq!(
            session.controller().active_timer().is_some(),
            session.playback_mode() == PlaybackMode::Playing
        );
        for (position, element) in session.elements().iter().enumerate() {
            assert_eq!(element.index, position);
        }
        if session.step_count() > 0 {
            assert!(session.current_step() < session.step_count());
        }
    }
});
