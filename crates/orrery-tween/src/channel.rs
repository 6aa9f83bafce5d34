//! A single animated scalar property with retarget-on-conflict semantics.

use crate::easing::Easing;

/// An in-flight tween from one value to another over a fixed duration.
#[derive(Debug, Clone, Copy)]
struct ActiveTween {
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
    easing: Easing,
}

/// A scalar property channel holding the current value and at most one
/// in-flight tween.
///
/// Starting a new tween while one is in flight supersedes it: the new tween
/// begins at the current interpolated value, so there is no visual jump.
#[derive(Debug, Clone)]
pub struct Channel {
    value: f32,
    active: Option<ActiveTween>,
}

impl Channel {
    /// Create a channel resting at `initial`.
    pub fn new(initial: f32) -> Self {
        Self {
            value: initial,
            active: None,
        }
    }

    /// Start (or retarget) a tween toward `to` over `duration` seconds.
    ///
    /// A non-positive duration snaps the value immediately.
    pub fn go(&mut self, to: f32, duration: f32, easing: Easing) {
        if duration <= 0.0 {
            self.value = to;
            self.active = None;
            return;
        }
        self.active = Some(ActiveTween {
            from: self.value,
            to,
            elapsed: 0.0,
            duration,
            easing,
        });
    }

    /// Advance the tween by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        let Some(tween) = &mut self.active else {
            return;
        };
        tween.elapsed += dt;
        if tween.elapsed >= tween.duration {
            self.value = tween.to;
            self.active = None;
        } else {
            let t = tween.elapsed / tween.duration;
            self.value = tween.from + (tween.to - tween.from) * tween.easing.apply(t);
        }
    }

    /// The current (possibly mid-tween) value.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// The value this channel will rest at: the in-flight target if a tween
    /// is active, otherwise the current value. Relative retargets resolve
    /// against this so stacked relative steps compose exactly.
    pub fn end_value(&self) -> f32 {
        self.active.map_or(self.value, |t| t.to)
    }

    /// Whether a tween is currently in flight.
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }
}
