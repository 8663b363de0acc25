use rand::Rng;

use crate::error::MatrixError;

pub const MAX_ENTRY: f64 = 10.0;

/// Dense n×n matrix of `f64`, stored flat in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct SquareMatrix {
    side: usize,
    data: Vec<f64>,
}

impl SquareMatrix {
    pub fn zeros(side: usize) -> Self {
        Self {
            side,
            data: vec![0.0; side * side],
        }
    }

    pub fn identity(side: usize) -> Self {
        let mut m = Self::zeros(side);
        for i in 0..side {
            m.data[i * side + i] = 1.0;
        }
        m
    }

    pub fn from_vec(data: Vec<f64>) -> Result<Self, MatrixError> {
        let len = data.len();
        let side = num_integer::sqrt(len);
        if side * side != len {
            return Err(MatrixError::NotSquare { len });
        }
        Ok(Self { side, data })
    }

    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, MatrixError> {
        let side = rows.len();
        let mut data = Vec::with_capacity(side * side);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != side {
                return Err(MatrixError::RaggedRows {
                    row,
                    len: values.len(),
                    expected: side,
                });
            }
            data.extend_from_slice(values);
        }
        Ok(Self { side, data })
    }

    pub fn random<R: Rng>(side: usize, rng: &mut R) -> Self {
        Self {
            side,
            data: (0..side * side).map(|_| rng.gen_range(0.0..MAX_ENTRY)).collect(),
        }
    }

    /// Draws A and B together, one element of each per step.
    pub fn random_pair<R: Rng>(side: usize, rng: &mut R) -> (Self, Self) {
        let mut a = Self::zeros(side);
        let mut b = Self::zeros(side);
        for (x, y) in a.data.iter_mut().zip(b.data.iter_mut()) {
            *x = rng.gen_range(0.0..MAX_ENTRY);
            *y = rng.gen_range(0.0..MAX_ENTRY);
        }
        (a, b)
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn is_empty(&self) -> bool {
        self.side == 0
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.side..(i + 1) * self.side]
    }

    pub fn transpose(&self) -> Self {
        let side = self.side;
        let mut t = Self::zeros(side);
        for i in 0..side {
            for j in 0..side {
                t.data[j * side + i] = self.data[i * side + j];
            }
        }
        t
    }
}
