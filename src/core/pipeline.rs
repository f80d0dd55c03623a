use crate::core::color::Color;
use crate::scene::material::Material;
use nalgebra::{Point3, Vector3};
use serde::Deserialize;
use std::fmt;

/// How lighting is interpolated across a triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ShadingPolicy {
    /// One color per face, lit at the centroid with the face normal.
    Flat,
    /// Colors lit per vertex and interpolated across the face.
    Gouraud,
    /// Position and normal interpolated per pixel, then lit.
    #[default]
    Phong,
}

impl ShadingPolicy {
    pub const ALL: [ShadingPolicy; 3] = [Self::Flat, Self::Gouraud, Self::Phong];

    pub fn name(self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Gouraud => "gouraud",
            Self::Phong => "phong",
        }
    }
}

impl fmt::Display for ShadingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shading work resolved once per surface before rasterization.
#[derive(Debug, Clone)]
pub enum SurfaceShading {
    /// Indexed by face.
    Flat(Vec<Color>),
    /// Indexed by vertex.
    Gouraud(Vec<Color>),
    Phong,
}

/// What a fragment carries to the shading stage.
#[derive(Debug, Clone, Copy)]
pub enum Shade<'a> {
    /// Already lit.
    Color(Color),
    /// Lit after rasterization from interpolated surface attributes.
    Deferred {
        position: Point3<f32>,
        normal: Vector3<f32>,
        material: &'a Material,
    },
}

/// A surviving sample of one triangle at one pixel.
#[derive(Debug, Clone, Copy)]
pub struct Fragment<'a> {
    /// Image column.
    pub x: usize,
    /// Image row, 0 at the top.
    pub y: usize,
    /// Smaller is nearer.
    pub depth: f32,
    pub shade: Shade<'a>,
}
