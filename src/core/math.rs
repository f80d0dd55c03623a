pub mod interpolation;
pub mod matrix;
pub mod transform;
