//! CPU triangle-mesh rasterizer.
//!
//! Meshes live in a half-edge structure that supports Loop subdivision.
//! Scenes are rasterized into a z-buffered framebuffer with flat, Gouraud
//! or Phong shading and written out as PNG.

pub mod app;
pub mod core;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod scene;

pub use crate::core::framebuffer::FrameBuffer;
pub use crate::core::pipeline::ShadingPolicy;
pub use crate::error::{Error, Result};
pub use crate::pipeline::renderer::{RenderSettings, RenderStats, Renderer};
pub use crate::scene::context::RenderContext;
pub use crate::scene::mesh::HalfEdgeMesh;
