//! Scroll-driven sequencer: throttles wheel input and steps the planet-group
//! rotation and heading offsets through four positions.
//!
//! All state lives in the [`Sequencer`] struct; the handler mutates nothing
//! else. Scene properties are driven through the [`Animate`] capability, so
//! any tween engine with retarget-on-conflict semantics can sit behind it.

use std::f32::consts::FRAC_PI_2;
use std::time::{Duration, Instant};

use orrery_tween::{Animate, Easing, TweenTarget, TweenValue};
use tracing::debug;

/// Highest step the counter reaches before the next event wraps it to zero.
pub const MAX_STEP: u8 = 3;

/// Timing knobs for the sequencer.
#[derive(Debug, Clone, Copy)]
pub struct SequencerTiming {
    /// Minimum interval between processed wheel events.
    pub throttle: Duration,
    /// Duration of a forward/backward step transition, in seconds.
    pub step_secs: f32,
    /// Duration of the wrap-around reset transition, in seconds.
    pub wrap_secs: f32,
}

impl Default for SequencerTiming {
    fn default() -> Self {
        Self {
            throttle: Duration::from_millis(2000),
            step_secs: 1.0,
            wrap_secs: 2.0,
        }
    }
}

/// Scroll direction resolved from the wheel delta sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Scroll down / forward (positive delta).
    Forward,
    /// Scroll up / backward (non-positive delta).
    Backward,
}

/// What a processed wheel event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerEvent {
    /// Counter advanced; carries the new counter value.
    SteppedForward(u8),
    /// Counter retreated; carries the new counter value.
    SteppedBackward(u8),
    /// Counter was at [`MAX_STEP`] and everything snapped back to zero.
    Wrapped,
}

/// Throttled wheel-event state machine.
///
/// The counter stays in `[0, MAX_STEP]`. Once it reaches [`MAX_STEP`], the
/// next processed event resets it regardless of scroll direction — a
/// backward scroll at the top wraps instead of decrementing. Deliberately
/// kept: see the design notes.
pub struct Sequencer {
    last_event: Option<Instant>,
    step: u8,
    timing: SequencerTiming,
}

impl Sequencer {
    /// Create a sequencer at step 0 with the given timing.
    pub fn new(timing: SequencerTiming) -> Self {
        Self {
            last_event: None,
            step: 0,
            timing,
        }
    }

    /// Current step counter, in `[0, MAX_STEP]`.
    pub fn step(&self) -> u8 {
        self.step
    }

    /// Handle a wheel event.
    ///
    /// `delta_y` follows the browser convention: positive means scroll down
    /// (forward). Returns `None` when the event falls inside the throttle
    /// window; otherwise the state change that was applied. Animation
    /// requests are issued through `animator`.
    pub fn on_wheel(
        &mut self,
        delta_y: f32,
        now: Instant,
        animator: &mut impl Animate,
    ) -> Option<SequencerEvent> {
        if let Some(last) = self.last_event
            && now.duration_since(last) < self.timing.throttle
        {
            return None;
        }
        self.last_event = Some(now);

        let direction = if delta_y > 0.0 {
            ScrollDirection::Forward
        } else {
            ScrollDirection::Backward
        };

        // Wrap check happens before the direction is applied.
        let event = if self.step >= MAX_STEP {
            animator.animate(
                TweenTarget::GroupRotationY,
                TweenValue::Absolute(0.0),
                self.timing.wrap_secs,
                Easing::ExpoInOut,
            );
            animator.animate(
                TweenTarget::HeadingOffsets,
                TweenValue::Absolute(0.0),
                self.timing.wrap_secs,
                Easing::Power1InOut,
            );
            self.step = 0;
            SequencerEvent::Wrapped
        } else if direction == ScrollDirection::Forward {
            animator.animate(
                TweenTarget::HeadingOffsets,
                TweenValue::Relative(-100.0),
                self.timing.step_secs,
                Easing::ExpoInOut,
            );
            animator.animate(
                TweenTarget::GroupRotationY,
                TweenValue::Absolute(FRAC_PI_2 + FRAC_PI_2 * self.step as f32),
                self.timing.step_secs,
                Easing::ExpoInOut,
            );
            self.step += 1;
            SequencerEvent::SteppedForward(self.step)
        } else if self.step == 0 {
            // Clamp at the floor: no animation, so the rotation stays a
            // deterministic function of the counter.
            SequencerEvent::SteppedBackward(0)
        } else {
            animator.animate(
                TweenTarget::HeadingOffsets,
                TweenValue::Relative(100.0),
                self.timing.step_secs,
                Easing::ExpoInOut,
            );
            animator.animate(
                TweenTarget::GroupRotationY,
                TweenValue::Relative(-FRAC_PI_2),
                self.timing.step_secs,
                Easing::ExpoInOut,
            );
            self.step -= 1;
            SequencerEvent::SteppedBackward(self.step)
        };

        debug!(?event, step = self.step, "wheel event processed");
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_tween::Timeline;
    use std::f32::consts::PI;

    /// Records animation requests without interpolating anything.
    #[derive(Default)]
    struct RecordingAnimator {
        requests: Vec<(TweenTarget, TweenValue, f32, Easing)>,
    }

    impl Animate for RecordingAnimator {
        fn animate(
            &mut self,
            target: TweenTarget,
            value: TweenValue,
            duration: f32,
            easing: Easing,
        ) {
            self.requests.push((target, value, duration, easing));
        }
    }

    impl RecordingAnimator {
        fn last_rotation_request(&self) -> Option<TweenValue> {
            self.requests
                .iter()
                .rev()
                .find(|(t, ..)| *t == TweenTarget::GroupRotationY)
                .map(|(_, v, ..)| *v)
        }
    }

    fn throttled_times(count: usize) -> Vec<Instant> {
        let t0 = Instant::now();
        (0..count)
            .map(|i| t0 + Duration::from_millis(2100 * i as u64))
            .collect()
    }

    #[test]
    fn test_forward_ladder_counter_and_rotation() {
        let mut seq = Sequencer::new(SequencerTiming::default());
        let mut rec = RecordingAnimator::default();
        let times = throttled_times(3);

        for (k, &t) in times.iter().enumerate() {
            let ev = seq.on_wheel(1.0, t, &mut rec);
            let expected_step = (k + 1) as u8;
            assert_eq!(ev, Some(SequencerEvent::SteppedForward(expected_step)));
            assert_eq!(seq.step(), expected_step);
            let expected_rotation = FRAC_PI_2 + FRAC_PI_2 * k as f32;
            assert_eq!(
                rec.last_rotation_request(),
                Some(TweenValue::Absolute(expected_rotation))
            );
        }
    }

    #[test]
    fn test_throttle_window_swallows_second_event() {
        let mut seq = Sequencer::new(SequencerTiming::default());
        let mut rec = RecordingAnimator::default();
        let t0 = Instant::now();

        assert!(seq.on_wheel(1.0, t0, &mut rec).is_some());
        let before = rec.requests.len();

        // 500 ms later: inside the 2000 ms window, must be a complete no-op.
        let ev = seq.on_wheel(1.0, t0 + Duration::from_millis(500), &mut rec);
        assert_eq!(ev, None);
        assert_eq!(seq.step(), 1);
        assert_eq!(rec.requests.len(), before);
    }

    #[test]
    fn test_first_event_always_passes() {
        let mut seq = Sequencer::new(SequencerTiming::default());
        let mut rec = RecordingAnimator::default();
        assert!(seq.on_wheel(1.0, Instant::now(), &mut rec).is_some());
    }

    #[test]
    fn test_wrap_at_max_for_both_directions() {
        for delta in [1.0_f32, -1.0] {
            let mut seq = Sequencer::new(SequencerTiming::default());
            let mut rec = RecordingAnimator::default();
            let times = throttled_times(4);

            for &t in &times[..3] {
                seq.on_wheel(1.0, t, &mut rec);
            }
            assert_eq!(seq.step(), 3);

            let ev = seq.on_wheel(delta, times[3], &mut rec);
            assert_eq!(ev, Some(SequencerEvent::Wrapped), "delta {delta}");
            assert_eq!(seq.step(), 0);
            assert_eq!(
                rec.last_rotation_request(),
                Some(TweenValue::Absolute(0.0))
            );
            // Heading reset is absolute 0%, over the longer wrap duration.
            let (_, value, duration, easing) = rec
                .requests
                .iter()
                .rev()
                .find(|(t, ..)| *t == TweenTarget::HeadingOffsets)
                .unwrap();
            assert_eq!(*value, TweenValue::Absolute(0.0));
            assert_eq!(*duration, 2.0);
            assert_eq!(*easing, Easing::Power1InOut);
        }
    }

    #[test]
    fn test_backward_from_one_requests_relative_quarter_turn() {
        let mut seq = Sequencer::new(SequencerTiming::default());
        let mut rec = RecordingAnimator::default();
        let times = throttled_times(2);

        seq.on_wheel(1.0, times[0], &mut rec);
        assert_eq!(seq.step(), 1);

        let ev = seq.on_wheel(-1.0, times[1], &mut rec);
        assert_eq!(ev, Some(SequencerEvent::SteppedBackward(0)));
        assert_eq!(
            rec.last_rotation_request(),
            Some(TweenValue::Relative(-FRAC_PI_2))
        );
    }

    #[test]
    fn test_end_to_end_scenario_with_timeline() {
        // Fresh load -> forward at t=0 -> forward at t=500ms (ignored)
        // -> forward at t=2100ms. Matches the scripted scenario.
        let mut seq = Sequencer::new(SequencerTiming::default());
        let mut tl = Timeline::new(4);
        let t0 = Instant::now();

        seq.on_wheel(3.0, t0, &mut tl);
        assert_eq!(seq.step(), 1);
        tl.tick(0.5);

        seq.on_wheel(3.0, t0 + Duration::from_millis(500), &mut tl);
        assert_eq!(seq.step(), 1);

        seq.on_wheel(3.0, t0 + Duration::from_millis(2100), &mut tl);
        assert_eq!(seq.step(), 2);

        // Let all tweens settle: rotation rests at PI, headings at -200%.
        tl.tick(10.0);
        assert!((tl.rotation_y() - PI).abs() < 1e-5);
        for i in 0..4 {
            assert!((tl.heading_offset(i) + 200.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_full_cycle_returns_to_zero() {
        let mut seq = Sequencer::new(SequencerTiming::default());
        let mut tl = Timeline::new(4);
        let times = throttled_times(4);

        for &t in &times {
            seq.on_wheel(1.0, t, &mut tl);
            tl.tick(10.0);
        }
        assert_eq!(seq.step(), 0);
        assert!(tl.rotation_y().abs() < 1e-5);
        assert!(tl.heading_offset(0).abs() < 1e-3);
    }

    #[test]
    fn test_zero_delta_counts_as_backward() {
        let mut seq = Sequencer::new(SequencerTiming::default());
        let mut rec = RecordingAnimator::default();
        let ev = seq.on_wheel(0.0, Instant::now(), &mut rec);
        assert_eq!(ev, Some(SequencerEvent::SteppedBackward(0)));
        assert_eq!(seq.step(), 0);
    }

    #[test]
    fn test_backward_at_floor_animates_nothing() {
        let mut seq = Sequencer::new(SequencerTiming::default());
        let mut rec = RecordingAnimator::default();
        seq.on_wheel(-1.0, Instant::now(), &mut rec);
        assert_eq!(seq.step(), 0);
        assert!(rec.requests.is_empty());
    }

    #[test]
    fn test_custom_throttle_window() {
        let timing = SequencerTiming {
            throttle: Duration::from_millis(100),
            ..SequencerTiming::default()
        };
        let mut seq = Sequencer::new(timing);
        let mut rec = RecordingAnimator::default();
        let t0 = Instant::now();

        seq.on_wheel(1.0, t0, &mut rec);
        assert!(
            seq.on_wheel(1.0, t0 + Duration::from_millis(150), &mut rec)
                .is_some()
        );
    }
}
