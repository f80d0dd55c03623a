use crate::error::MathError;
use nalgebra::{DMatrix, Matrix4, Point3, Scalar, Vector3};

/// Dynamically sized, bounds-checked matrix.
///
/// Every shape-dependent operation returns a `Result` instead of panicking, so
/// callers see dimension failures in the signature. Storage is a `DMatrix`,
/// which also makes this the 2D grid type used by the framebuffer planes.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T: Scalar> {
    data: DMatrix<T>,
}

impl<T: Scalar> Matrix<T> {
    /// Creates a `rows x cols` matrix filled with `value`.
    pub fn from_element(rows: usize, cols: usize, value: T) -> Self {
        Self {
            data: DMatrix::from_element(rows, cols, value),
        }
    }

    /// Builds a matrix from values laid out row after row.
    pub fn from_row_slice(rows: usize, cols: usize, values: &[T]) -> Result<Self, MathError> {
        if values.len() != rows * cols {
            return Err(MathError::DimensionMismatch {
                op: "from_row_slice",
                left_rows: rows,
                left_cols: cols,
                right_rows: values.len(),
                right_cols: 1,
            });
        }
        Ok(Self {
            data: DMatrix::from_row_slice(rows, cols, values),
        })
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.data.shape()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// True for row vectors (1 x n) and column vectors (n x 1).
    pub fn is_vector(&self) -> bool {
        self.rows() == 1 || self.cols() == 1
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Result<&T, MathError> {
        let (rows, cols) = self.shape();
        self.data.get((row, col)).ok_or(MathError::IndexOutOfBounds {
            row,
            col,
            rows,
            cols,
        })
    }

    #[inline]
    pub fn get_mut(&mut self, row: usize, col: usize) -> Result<&mut T, MathError> {
        let (rows, cols) = self.shape();
        self.data.get_mut((row, col)).ok_or(MathError::IndexOutOfBounds {
            row,
            col,
            rows,
            cols,
        })
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<(), MathError> {
        *self.get_mut(row, col)? = value;
        Ok(())
    }

    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Changes the shape to `rows x cols` and fills every entry with `value`.
    pub fn reset(&mut self, rows: usize, cols: usize, value: T) {
        if self.shape() == (rows, cols) {
            self.data.fill(value);
        } else {
            self.data = DMatrix::from_element(rows, cols, value);
        }
    }

    /// Copies one row out, left to right.
    pub fn row(&self, row: usize) -> Result<Vec<T>, MathError> {
        if row >= self.rows() {
            return Err(MathError::IndexOutOfBounds {
                row,
                col: 0,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        Ok(self.data.row(row).iter().cloned().collect())
    }

    /// All entries in row-major order.
    pub fn to_row_major(&self) -> Vec<T> {
        self.data.transpose().as_slice().to_vec()
    }

    pub fn transpose(&self) -> Self {
        Self {
            data: self.data.transpose(),
        }
    }

    pub fn map<U: Scalar, F: FnMut(T) -> U>(&self, f: F) -> Matrix<U> {
        Matrix {
            data: self.data.map(f),
        }
    }

    fn check_same_shape(&self, op: &'static str, other: &Self) -> Result<(), MathError> {
        if self.shape() != other.shape() {
            return Err(MathError::DimensionMismatch {
                op,
                left_rows: self.rows(),
                left_cols: self.cols(),
                right_rows: other.rows(),
                right_cols: other.cols(),
            });
        }
        Ok(())
    }

    fn check_vector(&self, op: &'static str) -> Result<(), MathError> {
        if !self.is_vector() {
            return Err(MathError::NotAVector {
                op,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        Ok(())
    }
}

impl Matrix<f32> {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::from_element(rows, cols, 0.0)
    }

    pub fn identity(n: usize) -> Self {
        Self {
            data: DMatrix::identity(n, n),
        }
    }

    pub fn column_vector(values: &[f32]) -> Self {
        Self {
            data: DMatrix::from_column_slice(values.len(), 1, values),
        }
    }

    pub fn try_add(&self, other: &Self) -> Result<Self, MathError> {
        self.check_same_shape("add", other)?;
        Ok(Self {
            data: &self.data + &other.data,
        })
    }

    pub fn try_sub(&self, other: &Self) -> Result<Self, MathError> {
        self.check_same_shape("sub", other)?;
        Ok(Self {
            data: &self.data - &other.data,
        })
    }

    /// Matrix product; requires `self.cols() == other.rows()`.
    pub fn try_mul(&self, other: &Self) -> Result<Self, MathError> {
        if self.cols() != other.rows() {
            return Err(MathError::DimensionMismatch {
                op: "mul",
                left_rows: self.rows(),
                left_cols: self.cols(),
                right_rows: other.rows(),
                right_cols: other.cols(),
            });
        }
        Ok(Self {
            data: &self.data * &other.data,
        })
    }

    pub fn scale(&self, factor: f32) -> Self {
        Self {
            data: &self.data * factor,
        }
    }

    /// Dot product of two vectors of equal length. Row and column vectors mix freely.
    pub fn dot(&self, other: &Self) -> Result<f32, MathError> {
        self.check_vector("dot")?;
        other.check_vector("dot")?;
        if self.len() != other.len() {
            return Err(MathError::DimensionMismatch {
                op: "dot",
                left_rows: self.rows(),
                left_cols: self.cols(),
                right_rows: other.rows(),
                right_cols: other.cols(),
            });
        }
        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a * b)
            .sum())
    }

    pub fn norm(&self) -> Result<f32, MathError> {
        self.check_vector("norm")?;
        Ok(self.data.norm())
    }

    pub fn normalize(&self) -> Result<Self, MathError> {
        let norm = self.norm()?;
        if norm <= f32::EPSILON {
            return Err(MathError::ZeroLength);
        }
        Ok(self.scale(1.0 / norm))
    }

    /// Cross product of two 3-vectors. The result keeps `self`'s orientation.
    pub fn cross(&self, other: &Self) -> Result<Self, MathError> {
        let a = self.to_vector3()?;
        let b = other.to_vector3()?;
        let c = a.cross(&b);
        if self.rows() == 1 {
            Self::from_row_slice(1, 3, c.as_slice())
        } else {
            Ok(Self::column_vector(c.as_slice()))
        }
    }

    pub fn to_vector3(&self) -> Result<Vector3<f32>, MathError> {
        self.check_vector("to_vector3")?;
        if self.len() != 3 {
            return Err(MathError::DimensionMismatch {
                op: "to_vector3",
                left_rows: self.rows(),
                left_cols: self.cols(),
                right_rows: 3,
                right_cols: 1,
            });
        }
        Ok(Vector3::from_iterator(self.data.iter().cloned()))
    }

    pub fn to_matrix4(&self) -> Result<Matrix4<f32>, MathError> {
        if self.shape() != (4, 4) {
            return Err(MathError::DimensionMismatch {
                op: "to_matrix4",
                left_rows: self.rows(),
                left_cols: self.cols(),
                right_rows: 4,
                right_cols: 4,
            });
        }
        Ok(Matrix4::from_iterator(self.data.iter().cloned()))
    }

    /// Reads row `row` of an N x 3 table as a point.
    pub fn row_point3(&self, row: usize) -> Result<Point3<f32>, MathError> {
        if self.cols() != 3 {
            return Err(MathError::DimensionMismatch {
                op: "row_point3",
                left_rows: self.rows(),
                left_cols: self.cols(),
                right_rows: 1,
                right_cols: 3,
            });
        }
        Ok(Point3::new(
            *self.get(row, 0)?,
            *self.get(row, 1)?,
            *self.get(row, 2)?,
        ))
    }

    /// Largest absolute element-wise difference between two same-shaped matrices.
    pub fn max_abs_diff(&self, other: &Self) -> Result<f32, MathError> {
        self.check_same_shape("max_abs_diff", other)?;
        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f32::max))
    }
}

impl From<Matrix4<f32>> for Matrix<f32> {
    fn from(m: Matrix4<f32>) -> Self {
        Self {
            data: DMatrix::from_iterator(4, 4, m.iter().cloned()),
        }
    }
}

impl From<Vector3<f32>> for Matrix<f32> {
    fn from(v: Vector3<f32>) -> Self {
        Self::column_vector(v.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> Matrix<f32> {
        let values: Vec<f32> = (0..rows * cols)
            .map(|_| rng.random_range(-10.0..10.0))
            .collect();
        Matrix::from_row_slice(rows, cols, &values).unwrap()
    }

    #[test]
    fn add_then_sub_restores_original() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let rows = rng.random_range(1..6);
            let cols = rng.random_range(1..6);
            let a = random_matrix(&mut rng, rows, cols);
            let b = random_matrix(&mut rng, rows, cols);
            let back = a.try_add(&b).unwrap().try_sub(&b).unwrap();
            assert!(back.max_abs_diff(&a).unwrap() < 1e-4);
        }
    }

    #[test]
    fn normalize_is_unit_and_idempotent() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let len = rng.random_range(1..8);
            let v = random_matrix(&mut rng, len, 1);
            if v.norm().unwrap() < 1e-3 {
                continue;
            }
            let n = v.normalize().unwrap();
            assert_relative_eq!(n.norm().unwrap(), 1.0, epsilon = 1e-5);
            let nn = n.normalize().unwrap();
            assert!(nn.max_abs_diff(&n).unwrap() < 1e-6);
        }
    }

    #[test]
    fn cross_is_orthogonal_to_both_operands() {
        let mut rng = StdRng::seed_from_u64(29);
        for _ in 0..50 {
            let a = random_matrix(&mut rng, 3, 1);
            let b = random_matrix(&mut rng, 3, 1);
            let c = a.cross(&b).unwrap();
            let scale = a.norm().unwrap() * b.norm().unwrap() * c.norm().unwrap();
            assert!(c.dot(&a).unwrap().abs() <= 1e-5 * scale.max(1.0));
            assert!(c.dot(&b).unwrap().abs() <= 1e-5 * scale.max(1.0));
        }
    }

    #[test]
    fn cross_keeps_row_orientation() {
        let x = Matrix::from_row_slice(1, 3, &[1.0, 0.0, 0.0]).unwrap();
        let y = Matrix::column_vector(&[0.0, 1.0, 0.0]);
        let z = x.cross(&y).unwrap();
        assert_eq!(z.shape(), (1, 3));
        assert_eq!(z.to_row_major(), vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn mul_checks_inner_dimension() {
        let a = Matrix::zeros(2, 3);
        let b = Matrix::zeros(2, 3);
        assert!(matches!(
            a.try_mul(&b),
            Err(MathError::DimensionMismatch { op: "mul", .. })
        ));
        let c = a.try_mul(&b.transpose()).unwrap();
        assert_eq!(c.shape(), (2, 2));
    }

    #[test]
    fn mul_matches_fixed_size_product() {
        let m = Matrix4::new(
            1.0, 2.0, 3.0, 4.0, //
            0.0, 1.0, 0.0, 2.0, //
            5.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        );
        let n = Matrix4::new(
            2.0, 0.0, 0.0, 1.0, //
            0.0, 3.0, 0.0, 0.0, //
            1.0, 0.0, 1.0, 0.0, //
            0.0, 1.0, 0.0, 1.0,
        );
        let product = Matrix::from(m).try_mul(&Matrix::from(n)).unwrap();
        assert_eq!(product.to_matrix4().unwrap(), m * n);
    }

    #[test]
    fn add_rejects_shape_mismatch() {
        let a = Matrix::zeros(2, 2);
        let b = Matrix::zeros(2, 3);
        assert!(a.try_add(&b).is_err());
        assert!(a.try_sub(&b).is_err());
    }

    #[test]
    fn index_access_is_bounds_checked() {
        let mut m = Matrix::from_element(2, 3, 0u8);
        assert!(m.set(1, 2, 7).is_ok());
        assert_eq!(*m.get(1, 2).unwrap(), 7);
        assert_eq!(
            m.get(2, 0),
            Err(MathError::IndexOutOfBounds {
                row: 2,
                col: 0,
                rows: 2,
                cols: 3
            })
        );
        assert!(m.set(0, 3, 1).is_err());
        assert!(m.row(2).is_err());
    }

    #[test]
    fn vector_ops_reject_matrices() {
        let m = Matrix::zeros(2, 2);
        assert!(matches!(m.norm(), Err(MathError::NotAVector { .. })));
        assert!(matches!(
            Matrix::column_vector(&[0.0, 0.0]).normalize(),
            Err(MathError::ZeroLength)
        ));
        let v2 = Matrix::column_vector(&[1.0, 2.0]);
        assert!(v2.cross(&v2).is_err());
        let v3 = Matrix::column_vector(&[1.0, 2.0, 3.0]);
        assert!(v2.dot(&v3).is_err());
    }

    #[test]
    fn from_row_slice_checks_length_and_layout() {
        assert!(Matrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0]).is_err());
        let m = Matrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(m.row(1).unwrap(), vec![4.0, 5.0, 6.0]);
        assert_eq!(m.row_point3(0).unwrap(), Point3::new(1.0, 2.0, 3.0));
        assert_eq!(m.to_row_major(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn reset_changes_shape_and_fills() {
        let mut m = Matrix::from_element(1, 1, 5.0f32);
        m.reset(3, 2, f32::INFINITY);
        assert_eq!(m.shape(), (3, 2));
        assert!(m.to_row_major().iter().all(|d| d.is_infinite()));
    }
}
