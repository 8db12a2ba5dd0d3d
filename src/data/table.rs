use crate::error::{NetError, Result};
use crate::math::matrix::Matrix;

/// Named columns over a shared row-major store.
///
/// `matrix().data().len() == rows() * cols()` after every mutation, and
/// `columns().len() == cols()`.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    columns: Vec<String>,
    matrix: Matrix,
}

impl DataTable {
    /// Empty table (zero rows) with the given column names.
    pub fn new<S: Into<String>>(columns: Vec<S>) -> DataTable {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        DataTable {
            matrix: Matrix::empty(columns.len()),
            columns,
        }
    }

    pub fn rows(&self) -> usize {
        self.matrix.rows()
    }

    pub fn cols(&self) -> usize {
        self.matrix.cols()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn add_row(&mut self, values: &[f64]) -> Result<()> {
        if values.len() != self.columns.len() {
            return Err(NetError::Table(format!(
                "row has {} values, table has {} columns",
                values.len(),
                self.columns.len()
            )));
        }

        self.matrix.push_row(values)
    }

    /// Appends a column on the right. `values` holds one entry per row.
    pub fn add_column(&mut self, name: &str, values: &[f64]) -> Result<()> {
        let rows = self.rows();
        if values.len() != rows {
            return Err(NetError::Table(format!(
                "column '{name}' has {} values, table has {rows} rows",
                values.len()
            )));
        }

        let old_cols = self.cols();
        let mut data = Vec::with_capacity(rows * (old_cols + 1));
        for (r, &value) in values.iter().enumerate() {
            data.extend_from_slice(&self.matrix.data()[r * old_cols..(r + 1) * old_cols]);
            data.push(value);
        }

        self.matrix = Matrix::from_vec(rows, old_cols + 1, data)?;
        self.columns.push(name.to_string());
        Ok(())
    }

    /// Removes a column by case-insensitive name; remaining columns keep
    /// their order and every row keeps its position.
    pub fn remove_column(&mut self, name: &str) -> Result<()> {
        let idx = self.column_index(name)?;
        let (rows, cols) = (self.rows(), self.cols());

        let data: Vec<f64> = self
            .matrix
            .data()
            .iter()
            .enumerate()
            .filter(|(i, _)| i % cols != idx)
            .map(|(_, &v)| v)
            .collect();

        self.matrix = Matrix::from_vec(rows, cols - 1, data)?;
        self.columns.remove(idx);
        Ok(())
    }

    /// Position of a column, matched case-insensitively (Unicode lowercase).
    pub fn column_index(&self, name: &str) -> Result<usize> {
        let wanted = name.to_lowercase();
        self.columns
            .iter()
            .position(|c| c.to_lowercase() == wanted)
            .ok_or_else(|| NetError::Table(format!("failed to find column: {name}")))
    }

    pub fn row(&self, row: usize) -> Result<Vec<f64>> {
        self.matrix.row_slice(row)
    }

    pub fn column(&self, name: &str) -> Result<Vec<f64>> {
        self.matrix.col_slice(self.column_index(name)?)
    }

    /// Splits a row into `(features, targets)`: the first `feature_cols`
    /// values and the rest.
    pub fn split_row(&self, row: usize, feature_cols: usize) -> Result<(Vec<f64>, Vec<f64>)> {
        if feature_cols > self.cols() {
            return Err(NetError::Table(format!(
                "cannot take {feature_cols} feature columns from a table with {} columns",
                self.cols()
            )));
        }

        let mut features = self.row(row)?;
        let targets = features.split_off(feature_cols);
        Ok((features, targets))
    }
}
