use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::error::{NetError, Result};

/// Fixed-size 2-D matrix stored row-major: `data[r * cols + c]`.
///
/// `data.len() == rows * cols` holds for every value of this type; the only
/// way to change the shape is to build a new matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Allocates a `rows x cols` matrix of zeros.
    pub fn new(rows: usize, cols: usize) -> Result<Matrix> {
        let len = rows.checked_mul(cols).ok_or_else(|| {
            NetError::Construction(format!("failed to create new matrix with dimensions {rows}x{cols}"))
        })?;

        Ok(Matrix {
            rows,
            cols,
            data: vec![0.0; len],
        })
    }

    /// Wraps existing row-major data. The length must equal `rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Matrix> {
        match rows.checked_mul(cols) {
            Some(len) if len == data.len() => Ok(Matrix { rows, cols, data }),
            _ => Err(NetError::Construction(format!(
                "cannot shape {} values into a {rows}x{cols} matrix",
                data.len()
            ))),
        }
    }

    /// Builds a matrix from nested rows; every row must have the same length.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Matrix> {
        let cols = rows.first().map_or(0, |r| r.len());
        if let Some(bad) = rows.iter().position(|r| r.len() != cols) {
            return Err(NetError::Construction(format!(
                "row {bad} has {} values, expected {cols}",
                rows[bad].len()
            )));
        }

        Matrix::from_vec(rows.len(), cols, rows.concat())
    }

    /// Glorot (Xavier) uniform initialization: every cell is drawn
    /// independently from U(-limit, limit) with `limit = sqrt(6 / (fan_in + fan_out))`.
    ///
    /// Shape is (rows, cols) = (fan_out, fan_in), matching the way a layer
    /// stores the edges towards its successor.
    pub fn glorot_uniform<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Result<Matrix> {
        let mut res = Matrix::new(rows, cols)?;
        if res.data.is_empty() {
            return Ok(res);
        }

        let limit = (6.0 / (rows + cols) as f64).sqrt();
        for cell in res.data.iter_mut() {
            *cell = rng.gen_range(-limit..limit);
        }

        Ok(res)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Flat row-major view of the cells.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn at(&self, row: usize, col: usize) -> Result<f64> {
        let idx = self.index(row, col)?;
        Ok(self.data[idx])
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        let idx = self.index(row, col)?;
        self.data[idx] = value;
        Ok(())
    }

    /// Copy of row `row`.
    pub fn row_slice(&self, row: usize) -> Result<Vec<f64>> {
        if row >= self.rows {
            return Err(self.out_of_bounds(row, 0));
        }
        let start = row * self.cols;
        Ok(self.data[start..start + self.cols].to_vec())
    }

    /// Copy of column `col`.
    pub fn col_slice(&self, col: usize) -> Result<Vec<f64>> {
        if col >= self.cols {
            return Err(self.out_of_bounds(0, col));
        }
        Ok((0..self.rows).map(|r| self.data[r * self.cols + col]).collect())
    }

    /// Standard matrix product `self * other`.
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols != other.rows {
            return Err(NetError::DimensionMismatch(format!(
                "cannot multiply: dimensions {}x{} and {}x{}",
                self.rows, self.cols, other.rows, other.cols
            )));
        }

        let mut res = Matrix::new(self.rows, other.cols)?;

        for i in 0..self.rows {
            for j in 0..other.cols {
                let mut sum = 0.0;

                for k in 0..self.cols {
                    sum += self.data[i * self.cols + k] * other.data[k * other.cols + j];
                }

                res.data[i * res.cols + j] = sum;
            }
        }

        Ok(res)
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix {
            rows: self.cols,
            cols: self.rows,
            data: vec![0.0; self.data.len()],
        };

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i * res.cols + j] = self.data[j * self.cols + i];
            }
        }

        res
    }

    /// Zero-row matrix with `cols` columns, grown later with `push_row`.
    pub(crate) fn empty(cols: usize) -> Matrix {
        Matrix {
            rows: 0,
            cols,
            data: Vec::new(),
        }
    }

    /// Appends one row at the bottom. Used by the table collaborator, which
    /// grows its backing store row by row.
    pub(crate) fn push_row(&mut self, values: &[f64]) -> Result<()> {
        if values.len() != self.cols {
            return Err(NetError::DimensionMismatch(format!(
                "row has {} values, matrix has {} columns",
                values.len(),
                self.cols
            )));
        }
        self.data.extend_from_slice(values);
        self.rows += 1;
        Ok(())
    }

    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row < self.rows && col < self.cols {
            Ok(row * self.cols + col)
        } else {
            Err(self.out_of_bounds(row, col))
        }
    }

    fn out_of_bounds(&self, row: usize, col: usize) -> NetError {
        NetError::IndexOutOfBounds {
            row,
            col,
            rows: self.rows,
            cols: self.cols,
        }
    }
}
