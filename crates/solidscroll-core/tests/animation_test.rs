//! Integration tests for the animation module.

use proptest::prelude::*;
use solidscroll_core::animation::completion::Completion;
use solidscroll_core::animation::*;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(16);

#[test]
fn decay_completes_under_frame_ticks() {
    let mut d = Decay::new(0.0, 600.0, 0.99);
    let mut frames = 0;
    while !d.is_complete() {
        d.tick(FRAME);
        frames += 1;
        assert!(frames < 1000, "decay never settled");
    }
    assert_eq!(d.value(), 600.0);
}

#[test]
fn frame_ticks_match_single_tick() {
    let mut stepped = Decay::new(-50.0, 250.0, 0.998);
    let mut once = stepped;
    for _ in 0..20 {
        stepped.tick(FRAME);
    }
    once.tick(FRAME * 20);
    assert_eq!(stepped.value(), once.value());
}

#[test]
fn bounce_shaped_sequence_returns_to_edge() {
    // Out past the edge at 600 to 640, then back.
    let mut bounce = sequence(Decay::new(600.0, 640.0, 0.99), Decay::new(640.0, 600.0, 0.99));
    let mut peak = f64::MIN;
    while !bounce.is_complete() {
        bounce.tick(FRAME);
        peak = peak.max(bounce.value());
    }
    assert_eq!(bounce.value(), 600.0);
    assert!(peak > 630.0 && peak <= 640.0);
}

#[test]
fn nested_sequence_completes() {
    let inner = sequence(Decay::new(0.0, 10.0, 0.9), Decay::new(10.0, 0.0, 0.9));
    let mut outer = sequence(inner, Decay::new(0.0, 10.0, 0.9));
    outer.tick(Duration::from_secs(1));
    assert!(outer.is_complete());
    assert_eq!(outer.value(), 10.0);
}

#[test]
fn completion_reports_interruption_on_drop() {
    let seen = Rc::new(Cell::new(None));
    let sink = Rc::clone(&seen);
    let pending = Completion::new(move |done| sink.set(Some(done)));
    drop(pending);
    assert_eq!(seen.get(), Some(false));
}

proptest! {
    #[test]
    fn decay_moves_monotonically_towards_target(
        from in -5000.0f64..5000.0,
        to in -5000.0f64..5000.0,
        rate in 0.9f64..0.999,
    ) {
        let mut d = Decay::new(from, to, rate);
        let mut prev_remaining = (to - from).abs();
        for _ in 0..2000 {
            d.tick(FRAME);
            let remaining = (to - d.value()).abs();
            prop_assert!(remaining <= prev_remaining + 1e-9);
            prev_remaining = remaining;
            if d.is_complete() {
                break;
            }
        }
        prop_assert!(d.is_complete());
        prop_assert_eq!(d.value(), to);
    }

    #[test]
    fn decay_never_crosses_target(
        from in -5000.0f64..5000.0,
        to in -5000.0f64..5000.0,
        steps in 1usize..200,
    ) {
        let mut d = Decay::new(from, to, 0.998);
        for _ in 0..steps {
            d.tick(FRAME);
        }
        let lo = from.min(to);
        let hi = from.max(to);
        prop_assert!(d.value() >= lo && d.value() <= hi);
    }
}
