//! Time-based property animation: easing curves, retargetable tween channels,
//! and the [`Animate`] capability consumed by the scroll sequencer.
//!
//! A [`Channel`] carries one scalar property and at most one in-flight tween.
//! Retargeting an animating channel supersedes the previous tween without a
//! visual glitch: the new tween starts from the current interpolated value
//! (last-write-wins on the target).

mod channel;
mod easing;
mod timeline;

pub use channel::Channel;
pub use easing::Easing;
pub use timeline::{Animate, Timeline, TweenTarget, TweenValue};
