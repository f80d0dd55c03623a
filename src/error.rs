use std::io;

/// Shape and index failures of the checked matrix type.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("dimension mismatch in {op}: {left_rows}x{left_cols} vs {right_rows}x{right_cols}")]
    DimensionMismatch {
        op: &'static str,
        left_rows: usize,
        left_cols: usize,
        right_rows: usize,
        right_cols: usize,
    },
    #[error("index ({row}, {col}) out of bounds for a {rows}x{cols} matrix")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("{op} requires a vector, got a {rows}x{cols} matrix")]
    NotAVector {
        op: &'static str,
        rows: usize,
        cols: usize,
    },
    #[error("cannot normalize a zero-length vector")]
    ZeroLength,
}

/// Topology violations detected while building or refining a half-edge mesh.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    #[error("triangle {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },
    #[error("triangle {face} repeats a vertex")]
    DegenerateTriangle { face: usize },
    #[error("directed edge ({start}, {end}) appears twice; the mesh is non-manifold or inconsistently wound")]
    DuplicateHalfEdge { start: usize, end: usize },
    #[error("edge ({start}, {end}) lies on an open boundary")]
    OpenBoundary { start: usize, end: usize },
    #[error("the fan around vertex {vertex} does not close")]
    NonManifoldVertex { vertex: usize },
    #[error("index list of length {len} is not a multiple of 3")]
    MalformedIndices { len: usize },
}

/// Failures of a single render invocation.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("invalid image resolution {width}x{height}")]
    InvalidResolution { width: usize, height: usize },
    #[error("surface {surface} has stale normals; call update_normals() before rendering")]
    StaleNormals { surface: usize },
    #[error(transparent)]
    Math(#[from] MathError),
}

/// Top-level error for loading, rendering and exporting.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("failed to parse TOML scene: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("failed to load OBJ: {0}")]
    Obj(#[from] tobj::LoadError),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("scene parse error at token {token}: {message}")]
    SceneParse { token: usize, message: String },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Mesh(#[from] MeshError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Math(#[from] MathError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
