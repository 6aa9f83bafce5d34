//! Named animation targets and the [`Animate`] capability.

use crate::channel::Channel;
use crate::easing::Easing;

/// Which property an animation request addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenTarget {
    /// Rotation of the planet group around the Y axis, in radians.
    GroupRotationY,
    /// Vertical offset of every heading element, in percent of one
    /// viewport height (0 = resting position, -100 = one screen up).
    HeadingOffsets,
}

/// Absolute or relative target value for an animation request.
///
/// Relative values resolve against the channel's end value (the pending
/// target if a tween is in flight), so stacked relative steps compose
/// exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenValue {
    /// Animate to this value.
    Absolute(f32),
    /// Animate to the current end value plus this delta.
    Relative(f32),
}

/// Capability for issuing eased, retargetable property transitions.
///
/// Implementations must supersede any in-flight transition on the same
/// target (last-write-wins) without a visual glitch.
pub trait Animate {
    /// Request a transition of `target` to `value` over `duration` seconds.
    fn animate(&mut self, target: TweenTarget, value: TweenValue, duration: f32, easing: Easing);
}

/// Owns the tween channels for the scene's animated properties and advances
/// them each frame.
pub struct Timeline {
    rotation_y: Channel,
    heading_offsets: Vec<Channel>,
}

impl Timeline {
    /// Create a timeline with `heading_count` heading channels, all at rest.
    pub fn new(heading_count: usize) -> Self {
        Self {
            rotation_y: Channel::new(0.0),
            heading_offsets: vec![Channel::new(0.0); heading_count],
        }
    }

    /// Advance all channels by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.rotation_y.tick(dt);
        for ch in &mut self.heading_offsets {
            ch.tick(dt);
        }
    }

    /// Current planet-group rotation around Y, in radians.
    pub fn rotation_y(&self) -> f32 {
        self.rotation_y.value()
    }

    /// Current vertical offset of heading `index`, in percent.
    pub fn heading_offset(&self, index: usize) -> f32 {
        self.heading_offsets.get(index).map_or(0.0, Channel::value)
    }

    /// Number of heading channels.
    pub fn heading_count(&self) -> usize {
        self.heading_offsets.len()
    }

    /// Whether any channel still has a tween in flight.
    pub fn is_animating(&self) -> bool {
        self.rotation_y.is_animating() || self.heading_offsets.iter().any(Channel::is_animating)
    }

    fn resolve(channel: &Channel, value: TweenValue) -> f32 {
        match value {
            TweenValue::Absolute(v) => v,
            TweenValue::Relative(delta) => channel.end_value() + delta,
        }
    }
}

impl Animate for Timeline {
    fn animate(&mut self, target: TweenTarget, value: TweenValue, duration: f32, easing: Easing) {
        match target {
            TweenTarget::GroupRotationY => {
                let to = Self::resolve(&self.rotation_y, value);
                self.rotation_y.go(to, duration, easing);
            }
            TweenTarget::HeadingOffsets => {
                for ch in &mut self.heading_offsets {
                    let to = Self::resolve(ch, value);
                    ch.go(to, duration, easing);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_rotation_request() {
        let mut tl = Timeline::new(4);
        tl.animate(
            TweenTarget::GroupRotationY,
            TweenValue::Absolute(std::f32::consts::FRAC_PI_2),
            1.0,
            Easing::ExpoInOut,
        );
        tl.tick(1.0);
        assert!((tl.rotation_y() - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_relative_offsets_stack() {
        let mut tl = Timeline::new(4);
        for _ in 0..3 {
            tl.animate(
                TweenTarget::HeadingOffsets,
                TweenValue::Relative(-100.0),
                1.0,
                Easing::ExpoInOut,
            );
            tl.tick(1.0);
        }
        for i in 0..4 {
            assert!((tl.heading_offset(i) + 300.0).abs() < 1e-4, "heading {i}");
        }
    }

    #[test]
    fn test_relative_resolves_against_pending_target() {
        let mut tl = Timeline::new(1);
        tl.animate(
            TweenTarget::HeadingOffsets,
            TweenValue::Relative(-100.0),
            1.0,
            Easing::Linear,
        );
        tl.tick(0.25);
        // Retarget while the first tween is still in flight: the relative
        // delta stacks on -100, not on the mid-flight value.
        tl.animate(
            TweenTarget::HeadingOffsets,
            TweenValue::Relative(-100.0),
            1.0,
            Easing::Linear,
        );
        tl.tick(1.0);
        assert!((tl.heading_offset(0) + 200.0).abs() < 1e-4);
    }

    #[test]
    fn test_all_headings_move_together() {
        let mut tl = Timeline::new(4);
        tl.animate(
            TweenTarget::HeadingOffsets,
            TweenValue::Absolute(0.0),
            2.0,
            Easing::Power1InOut,
        );
        tl.animate(
            TweenTarget::HeadingOffsets,
            TweenValue::Relative(-100.0),
            1.0,
            Easing::ExpoInOut,
        );
        tl.tick(1.0);
        let first = tl.heading_offset(0);
        for i in 1..4 {
            assert_eq!(tl.heading_offset(i), first);
        }
    }

    #[test]
    fn test_is_animating_tracks_flight() {
        let mut tl = Timeline::new(2);
        assert!(!tl.is_animating());
        tl.animate(
            TweenTarget::GroupRotationY,
            TweenValue::Absolute(1.0),
            1.0,
            Easing::Linear,
        );
        assert!(tl.is_animating());
        tl.tick(1.0);
        assert!(!tl.is_animating());
    }

    #[test]
    fn test_out_of_range_heading_reads_zero() {
        let tl = Timeline::new(2);
        assert_eq!(tl.heading_offset(7), 0.0);
    }
}
