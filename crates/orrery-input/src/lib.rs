//! Input handling: frame-coherent mouse state and the drag-orbit camera
//! controller.

mod mouse;
mod orbit;

pub use mouse::MouseState;
pub use orbit::OrbitController;
