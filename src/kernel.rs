use std::borrow::Cow;
use std::fmt;

use num_integer::Integer;
use rayon::prelude::*;

use crate::error::MatrixError;
use crate::matrix::SquareMatrix;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Walk a column of `B` directly (strided access).
    RowMajor,
    /// Transpose `B` once up front, then walk a contiguous row of `Bᵀ`.
    Transposed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parallelism {
    Sequential,
    /// Static partition of the rows into one contiguous block per worker.
    Rows,
    /// Fork over rows, then fork again over the columns of each row.
    RowsAndColumns,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel {
    pub layout: Layout,
    pub parallelism: Parallelism,
}

impl Kernel {
    pub const NAIVE_SEQUENTIAL: Kernel = Kernel::new(Layout::RowMajor, Parallelism::Sequential);
    pub const NAIVE_PARALLEL: Kernel = Kernel::new(Layout::RowMajor, Parallelism::Rows);
    pub const TRANSPOSED_SEQUENTIAL: Kernel =
        Kernel::new(Layout::Transposed, Parallelism::Sequential);
    pub const TRANSPOSED_PARALLEL: Kernel =
        Kernel::new(Layout::Transposed, Parallelism::RowsAndColumns);

    pub const fn new(layout: Layout, parallelism: Parallelism) -> Self {
        Self {
            layout,
            parallelism,
        }
    }

    pub fn is_parallel(&self) -> bool {
        self.parallelism != Parallelism::Sequential
    }

    pub fn label(&self) -> &'static str {
        match (self.layout, self.parallelism) {
            (Layout::RowMajor, Parallelism::Sequential) => "Sequential multiplication",
            (Layout::RowMajor, Parallelism::Rows) => "Parallel multiplication",
            (Layout::RowMajor, Parallelism::RowsAndColumns) => {
                "Parallel multiplication (rows and columns)"
            }
            (Layout::Transposed, Parallelism::Sequential) => {
                "Sequential multiplication with transpose"
            }
            (Layout::Transposed, Parallelism::Rows) => "Parallel multiplication with transpose",
            (Layout::Transposed, Parallelism::RowsAndColumns) => {
                "Parallel multiplication with transpose (rows and columns)"
            }
        }
    }

    pub fn multiply(&self, a: &SquareMatrix, b: &SquareMatrix) -> Result<SquareMatrix, MatrixError> {
        if a.side() != b.side() {
            return Err(MatrixError::DimensionMismatch {
                left: a.side(),
                right: b.side(),
            });
        }

        let side = a.side();
        let mut res = SquareMatrix::zeros(side);
        if side == 0 {
            return Ok(res);
        }

        let rhs: Cow<'_, SquareMatrix> = match self.layout {
            Layout::RowMajor => Cow::Borrowed(b),
            Layout::Transposed => Cow::Owned(b.transpose()),
        };
        let rhs = &*rhs;
        let layout = self.layout;
        let out = res.as_mut_slice();

        match self.parallelism {
            Parallelism::Sequential => {
                for (i, res_row) in out.chunks_exact_mut(side).enumerate() {
                    fill_row(a.row(i), rhs, layout, res_row);
                }
            }
            Parallelism::Rows => {
                let rows_per_block = Integer::div_ceil(&side, &rayon::current_num_threads());
                out.par_chunks_mut(rows_per_block * side)
                    .enumerate()
                    .for_each(|(block, res_rows)| {
                        let first = block * rows_per_block;
                        for (offset, res_row) in res_rows.chunks_exact_mut(side).enumerate() {
                            fill_row(a.row(first + offset), rhs, layout, res_row);
                        }
                    });
            }
            Parallelism::RowsAndColumns => {
                out.par_chunks_exact_mut(side)
                    .enumerate()
                    .for_each(|(i, res_row)| {
                        let a_row = a.row(i);
                        res_row
                            .par_iter_mut()
                            .enumerate()
                            .for_each(|(j, r)| *r = cell(a_row, rhs, layout, j));
                    });
            }
        }

        Ok(res)
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn fill_row(a_row: &[f64], rhs: &SquareMatrix, layout: Layout, res_row: &mut [f64]) {
    for (j, r) in res_row.iter_mut().enumerate() {
        *r = cell(a_row, rhs, layout, j);
    }
}

// Accumulates in ascending k from 0.0 for every layout, so all kernels agree bit for bit.
#[inline]
fn cell(a_row: &[f64], rhs: &SquareMatrix, layout: Layout, j: usize) -> f64 {
    match layout {
        Layout::RowMajor => {
            let side = rhs.side();
            let b = rhs.as_slice();
            a_row
                .iter()
                .enumerate()
                .fold(0.0, |acc, (k, &a_val)| acc + a_val * b[k * side + j])
        }
        // rhs is Bᵀ here, so column j of B is row j of rhs
        Layout::Transposed => a_row
            .iter()
            .zip(rhs.row(j))
            .fold(0.0, |acc, (&a_val, &b_val)| acc + a_val * b_val),
    }
}

pub fn multiply_sequential(a: &SquareMatrix, b: &SquareMatrix) -> Result<SquareMatrix, MatrixError> {
    Kernel::NAIVE_SEQUENTIAL.multiply(a, b)
}

pub fn multiply_parallel(a: &SquareMatrix, b: &SquareMatrix) -> Result<SquareMatrix, MatrixError> {
    Kernel::NAIVE_PARALLEL.multiply(a, b)
}

pub fn multiply_transposed_sequential(
    a: &SquareMatrix,
    b: &SquareMatrix,
) -> Result<SquareMatrix, MatrixError> {
    Kernel::TRANSPOSED_SEQUENTIAL.multiply(a, b)
}

pub fn multiply_transposed(a: &SquareMatrix, b: &SquareMatrix) -> Result<SquareMatrix, MatrixError> {
    Kernel::TRANSPOSED_PARALLEL.multiply(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const ALL_KERNELS: [Kernel; 6] = [
        Kernel::NAIVE_SEQUENTIAL,
        Kernel::NAIVE_PARALLEL,
        Kernel::new(Layout::RowMajor, Parallelism::RowsAndColumns),
        Kernel::TRANSPOSED_SEQUENTIAL,
        Kernel::new(Layout::Transposed, Parallelism::Rows),
        Kernel::TRANSPOSED_PARALLEL,
    ];

    fn pool(threads: usize) -> rayon::ThreadPool {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap()
    }

    #[test]
    fn test_2x2_all_kernels() {
        let a = SquareMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let b = SquareMatrix::from_rows(&[vec![5.0, 6.0], vec![7.0, 8.0]]).unwrap();
        for kernel in ALL_KERNELS {
            let c = kernel.multiply(&a, &b).unwrap();
            assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0], "{}", kernel);
        }
    }

    #[test]
    fn test_identity_right_operand() {
        let a = SquareMatrix::from_rows(&[
            vec![1.5, -2.0, 3.25],
            vec![0.0, 7.0, 9.5],
            vec![4.0, 4.0, -1.0],
        ])
        .unwrap();
        let id = SquareMatrix::identity(3);
        for kernel in ALL_KERNELS {
            assert_eq!(kernel.multiply(&a, &id).unwrap(), a, "{}", kernel);
        }
    }

    #[test]
    fn test_empty_product() {
        let empty = SquareMatrix::zeros(0);
        for kernel in ALL_KERNELS {
            assert!(kernel.multiply(&empty, &empty).unwrap().is_empty());
        }
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = SquareMatrix::zeros(2);
        let b = SquareMatrix::zeros(3);
        assert_eq!(
            multiply_parallel(&a, &b),
            Err(MatrixError::DimensionMismatch { left: 2, right: 3 })
        );
    }

    #[test]
    fn test_variants_bit_identical() {
        let mut rng = StdRng::seed_from_u64(1234);
        // 3 threads leaves a short last block for most sizes
        let pool = pool(3);
        for side in [1, 2, 3, 7, 16, 33] {
            let (a, b) = SquareMatrix::random_pair(side, &mut rng);
            let expected = multiply_sequential(&a, &b).unwrap();
            for kernel in ALL_KERNELS {
                let got = pool.install(|| kernel.multiply(&a, &b)).unwrap();
                assert_eq!(got, expected, "{} n={}", kernel, side);
            }
        }
    }

    #[test]
    fn test_more_threads_than_rows() {
        let mut rng = StdRng::seed_from_u64(5);
        let (a, b) = SquareMatrix::random_pair(3, &mut rng);
        let expected = multiply_sequential(&a, &b).unwrap();
        let got = pool(8).install(|| multiply_parallel(&a, &b)).unwrap();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_labels_are_distinct() {
        let mut labels: Vec<_> = ALL_KERNELS.iter().map(Kernel::label).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), ALL_KERNELS.len());
    }

    #[test]
    fn test_is_parallel() {
        assert!(!Kernel::NAIVE_SEQUENTIAL.is_parallel());
        assert!(!Kernel::TRANSPOSED_SEQUENTIAL.is_parallel());
        assert!(Kernel::NAIVE_PARALLEL.is_parallel());
        assert!(Kernel::TRANSPOSED_PARALLEL.is_parallel());
    }
}
