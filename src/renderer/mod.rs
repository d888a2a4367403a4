//! WebGPU rendering module
//!
//! The simulation hands over a read-only [`crate::sim::Snapshot`]; `scene`
//! turns it into a colored triangle list and `pipeline` draws it.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
