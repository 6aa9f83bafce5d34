//! Orrery application: window creation, event handling, and the frame loop
//! that ties the scene, sequencer, and renderer together.

pub mod frame;
pub mod overlay;
pub mod window;

pub use window::{AppState, run, run_with_config};
