//! Provides `Matrix`, a small dense matrix of `f64`s with shape-checked
//! arithmetic, a recursive (Laplace) determinant, and a cofactor-based
//! inverse.
//!
//! Both the determinant and the inverse are computed from signed minors only;
//! the cost grows as *O*(*n*!) so these are meant for matrices of a handful
//! to a few dozen dimensions at most.

use std::fmt;
use itertools::iproduct;
use ndarray::{ self as nd, Axis };
use crate::error::{ NumError, NumResult, ensure };

/// Compute the Euclidean norm of a vector.
pub fn norm(x: &nd::Array1<f64>) -> f64 {
    return x.iter().map(|xk| xk * xk).sum::<f64>().sqrt();
}

/// Dense, rectangular, non-empty matrix of `f64`s.
///
/// Every operation leaves its operands untouched and returns a freshly
/// allocated result.
///
/// Equality (`==`) is exact and element-wise; see [`Matrix::approx_eq`] for
/// comparisons between results that went through different sequences of
/// floating-point operations.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    data: nd::Array2<f64>,
}

impl Matrix {
    /// Build a matrix from a list of rows.
    ///
    /// Fails if there are no rows, the rows are empty, or the rows do not all
    /// have the same length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> NumResult<Self> {
        ensure!(!rows.is_empty(), "matrix must have at least one row");
        let ncols: usize = rows[0].len();
        ensure!(ncols > 0, "matrix must have at least one column");
        if let Some((k, row))
            = rows.iter().enumerate().find(|(_, row)| row.len() != ncols)
        {
            return Err(NumError::malformed(format!(
                "row {} has length {} but row 0 has length {}",
                k, row.len(), ncols,
            )));
        }
        let nrows: usize = rows.len();
        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        let data = nd::Array2::from_shape_vec((nrows, ncols), flat)
            .map_err(|err| NumError::malformed(err.to_string()))?;
        return Ok(Self { data });
    }

    /// Wrap an existing array. Fails if either dimension is zero.
    pub fn from_array(data: nd::Array2<f64>) -> NumResult<Self> {
        ensure!(
            data.nrows() > 0 && data.ncols() > 0,
            "matrix must be non-empty but got shape {:?}", data.dim(),
        );
        return Ok(Self { data });
    }

    /// `n`×`n` identity matrix.
    pub fn identity(n: usize) -> NumResult<Self> {
        ensure!(n > 0, "identity matrix must have positive size");
        return Ok(Self { data: nd::Array2::eye(n) });
    }

    /// Lift a vector into an `n`×1 column matrix.
    pub fn column(x: &nd::Array1<f64>) -> NumResult<Self> {
        ensure!(!x.is_empty(), "column vector must be non-empty");
        let data: nd::Array2<f64> = x.clone().insert_axis(Axis(1));
        return Ok(Self { data });
    }

    pub fn nrows(&self) -> usize { self.data.nrows() }

    pub fn ncols(&self) -> usize { self.data.ncols() }

    pub fn shape(&self) -> (usize, usize) { self.data.dim() }

    pub fn is_square(&self) -> bool { self.nrows() == self.ncols() }

    /// Get the `(i, j)`-th element, if it exists.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        return self.data.get((i, j)).copied();
    }

    pub fn as_array(&self) -> &nd::Array2<f64> { &self.data }

    pub fn into_array(self) -> nd::Array2<f64> { self.data }

    /// Copy out the `j`-th column as a plain vector.
    pub fn column_vec(&self, j: usize) -> Option<nd::Array1<f64>> {
        return (j < self.ncols()).then(|| self.data.column(j).to_owned());
    }

    /// Return `true` if both matrices have the same shape and every pair of
    /// elements differs by at most `tol`.
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        return self.shape() == other.shape()
            && self.data.iter().zip(other.data.iter())
                .all(|(a, b)| (a - b).abs() <= tol);
    }

    /// Euclidean (Frobenius) norm over all elements.
    pub fn norm(&self) -> f64 {
        return self.data.iter().map(|x| x * x).sum::<f64>().sqrt();
    }

    pub fn transpose(&self) -> Self {
        return Self { data: self.data.t().to_owned() };
    }

    /// Element-wise sum. Shapes must be identical.
    pub fn add(&self, other: &Self) -> NumResult<Self> {
        ensure!(
            self.shape() == other.shape(),
            "cannot add matrices of shapes {:?} and {:?}",
            self.shape(), other.shape(),
        );
        return Ok(Self { data: &self.data + &other.data });
    }

    /// Matrix product `self * other`. Requires
    /// `self.ncols() == other.nrows()`.
    pub fn mul(&self, other: &Self) -> NumResult<Self> {
        ensure!(
            self.ncols() == other.nrows(),
            "cannot multiply matrices of shapes {:?} and {:?}",
            self.shape(), other.shape(),
        );
        return Ok(Self { data: self.data.dot(&other.data) });
    }

    /// Multiply every element by `a`.
    pub fn scale(&self, a: f64) -> Self {
        return Self { data: &self.data * a };
    }

    /// Copy of `self` with row `row` and column `col` removed.
    ///
    /// Fails if `self` is 1×1 or smaller in either direction, or if the
    /// indices are out of bounds.
    pub fn minor(&self, row: usize, col: usize) -> NumResult<Self> {
        let (n, m): (usize, usize) = self.shape();
        ensure!(
            row < n && col < m,
            "minor ({}, {}) out of bounds for shape {:?}", row, col, (n, m),
        );
        ensure!(n > 1 && m > 1, "matrix of shape {:?} has no minors", (n, m));
        return Ok(Self { data: minor_of(self.data.view(), row, col) });
    }

    /// Determinant by Laplace expansion along the first row.
    ///
    /// Fails if `self` is not square.
    pub fn det(&self) -> NumResult<f64> {
        ensure!(
            self.is_square(),
            "determinant requires a square matrix but got shape {:?}",
            self.shape(),
        );
        return Ok(det_laplace(self.data.view()));
    }

    /// Inverse by the adjugate (cofactor) method.
    ///
    /// Fails with `MalformedInput` if `self` is not square, and with
    /// `SingularMatrix` if its determinant is exactly zero.
    pub fn inverse(&self) -> NumResult<Self> {
        ensure!(
            self.is_square(),
            "inverse requires a square matrix but got shape {:?}",
            self.shape(),
        );
        let det: f64 = det_laplace(self.data.view());
        if det == 0.0 {
            return Err(NumError::SingularMatrix);
        }
        let n: usize = self.nrows();
        if n == 1 {
            return Ok(Self { data: nd::array![[1.0 / self.data[[0, 0]]]] });
        }
        let mut inv: nd::Array2<f64> = nd::Array2::zeros((n, n));
        for (i, j) in iproduct!(0..n, 0..n) {
            let cofactor: f64
                = sign(i + j) * det_laplace(minor_of(self.data.view(), i, j).view());
            // adjugate is the transposed cofactor matrix
            inv[[j, i]] = cofactor / det;
        }
        return Ok(Self { data: inv });
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.data.rows() {
            let items: Vec<String>
                = row.iter().map(|x| format!("{:>12.6e}", x)).collect();
            writeln!(f, "[ {} ]", items.join(" "))?;
        }
        return Ok(());
    }
}

fn sign(k: usize) -> f64 { if k % 2 == 0 { 1.0 } else { -1.0 } }

fn minor_of(a: nd::ArrayView2<f64>, row: usize, col: usize) -> nd::Array2<f64> {
    let rows: Vec<usize> = (0..a.nrows()).filter(|k| *k != row).collect();
    let cols: Vec<usize> = (0..a.ncols()).filter(|k| *k != col).collect();
    return a.select(Axis(0), &rows).select(Axis(1), &cols);
}

// `a` must be square and non-empty.
fn det_laplace(a: nd::ArrayView2<f64>) -> f64 {
    let n: usize = a.nrows();
    if n == 1 {
        return a[[0, 0]];
    }
    if n == 2 {
        return a[[0, 0]] * a[[1, 1]] - a[[0, 1]] * a[[1, 0]];
    }
    let mut det: f64 = 0.0;
    for i in 0..n {
        let sub: f64 = det_laplace(minor_of(a, 0, i).view());
        if i % 2 == 0 {
            det += a[[0, i]] * sub;
        } else {
            det -= a[[0, i]] * sub;
        }
    }
    return det;
}
