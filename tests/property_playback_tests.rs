use diagram_rs::core::TAU;
use diagram_rs::playback::{FrameHandle, PlaybackClock, PlaybackStatus, ProgressBound};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Command {
    Play,
    Pause,
    Reset,
    Scrub(f64),
    Fire,
    FireStale,
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::Play),
        Just(Command::Pause),
        Just(Command::Reset),
        (-2.0f64..2.0).prop_map(Command::Scrub),
        Just(Command::Fire),
        Just(Command::FireStale),
    ]
}

fn bound() -> impl Strategy<Value = ProgressBound> {
    prop_oneof![
        Just(ProgressBound::UNIT),
        Just(ProgressBound::FULL_TURN),
        Just(ProgressBound::Unbounded),
    ]
}

fn in_bound(bound: ProgressBound, value: f64) -> bool {
    match bound {
        ProgressBound::Terminal { max } => (0.0..=max).contains(&value),
        ProgressBound::Wrapping { period } => (0.0..period).contains(&value),
        ProgressBound::Unbounded => value >= 0.0,
    }
}

proptest! {
    #[test]
    fn clock_stays_consistent_under_any_command_sequence(
        bound in bound(),
        speed in 0.0f64..50.0,
        commands in proptest::collection::vec(command(), 1..64),
    ) {
        let mut clock = PlaybackClock::new(bound, false);
        clock.set_speed(speed).expect("non-negative speed");
        let mut next_handle = 0u64;

        for command in commands {
            let before = clock.progress();
            match command {
                Command::Play => {
                    if clock.play() {
                        next_handle += 1;
                        clock.arm(FrameHandle::new(next_handle));
                    }
                }
                Command::Pause => {
                    clock.pause();
                    prop_assert!(clock.pending().is_none());
                    prop_assert_ne!(clock.status(), PlaybackStatus::Playing);
                }
                Command::Reset => {
                    clock.reset();
                    prop_assert_eq!(clock.status(), PlaybackStatus::Stopped);
                    prop_assert_eq!(clock.progress(), 0.0);
                    prop_assert!(clock.pending().is_none());
                }
                Command::Scrub(value) => {
                    let status = clock.status();
                    clock.set_progress(value);
                    prop_assert_eq!(clock.status(), status);
                }
                Command::Fire => {
                    if let Some(handle) = clock.pending() {
                        let outcome = clock.fire(handle, 0.01);
                        prop_assert!(outcome.is_some());
                        if clock.is_playing() {
                            next_handle += 1;
                            clock.arm(FrameHandle::new(next_handle));
                        }
                    }
                }
                Command::FireStale => {
                    let status = clock.status();
                    let outcome = clock.fire(FrameHandle::new(u64::MAX), 0.01);
                    prop_assert!(outcome.is_none());
                    prop_assert_eq!(clock.progress(), before);
                    prop_assert_eq!(clock.status(), status);
                }
            }

            prop_assert!(in_bound(bound, clock.progress()));
            // Only a playing clock holds a frame.
            if clock.pending().is_some() {
                prop_assert!(clock.is_playing());
            }
        }
    }

    #[test]
    fn wrapping_progress_matches_modular_arithmetic(ticks in 1usize..200, speed in 0.1f64..20.0) {
        let mut clock = PlaybackClock::new(ProgressBound::FULL_TURN, false);
        clock.set_speed(speed).expect("speed");
        clock.play();
        for tick in 0..ticks {
            let handle = FrameHandle::new(tick as u64 + 1);
            clock.arm(handle);
            let outcome = clock.fire(handle, 0.02).expect("armed frame");
            prop_assert!(!outcome.finished);
        }
        let expected = (ticks as f64 * 0.02 * speed).rem_euclid(TAU);
        let diff = (clock.progress() - expected).abs();
        prop_assert!(diff < 1e-6 || (TAU - diff) < 1e-6);
    }

    #[test]
    fn terminal_clock_finishes_exactly_once(speed in 0.5f64..5.0) {
        let mut clock = PlaybackClock::new(ProgressBound::UNIT, false);
        clock.set_speed(speed).expect("speed");
        clock.play();
        let mut finished = 0;
        for tick in 1..=2_000u64 {
            if !clock.is_playing() {
                break;
            }
            let handle = FrameHandle::new(tick);
            clock.arm(handle);
            if clock.fire(handle, 0.002).expect("armed frame").finished {
                finished += 1;
            }
        }
        prop_assert_eq!(finished, 1);
        prop_assert_eq!(clock.progress(), 1.0);
        prop_assert_eq!(clock.status(), PlaybackStatus::Stopped);
    }

    #[test]
    fn negative_speed_needs_reverse_support(speed in -10.0f64..-0.001) {
        let mut forward_only = PlaybackClock::new(ProgressBound::UNIT, false);
        prop_assert!(forward_only.set_speed(speed).is_err());
        prop_assert_eq!(forward_only.speed(), 1.0);

        let mut reversible = PlaybackClock::new(ProgressBound::FULL_TURN, true);
        prop_assert!(reversible.set_speed(speed).is_ok());
    }
}
