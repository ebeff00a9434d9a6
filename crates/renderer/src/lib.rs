//! Vantage Renderer Interface
//!
//! The rendering side of the camera binding. The simulation publishes a
//! pose each frame; [`camera::FirstPersonCamera`] adopts it and exposes
//! the view and projection matrices the host renderer needs. Mesh upload,
//! materials and the GPU pipeline itself stay with the host application.

pub mod camera;

pub use camera::FirstPersonCamera;
