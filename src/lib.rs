//! Dense square matrix multiplication benchmark.
//!
//! Compares a naive triple-loop kernel against row-parallel and
//! transpose-optimized variants, timing each across repeated trials on fresh
//! random operands and reporting mean, population standard deviation, an
//! advisory sample count and the speedup over a baseline kernel.
//!
//! ```
//! use matmul_bench::kernel::{multiply_sequential, multiply_transposed};
//! use matmul_bench::matrix::SquareMatrix;
//!
//! let a = SquareMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
//! let b = SquareMatrix::from_rows(&[vec![5.0, 6.0], vec![7.0, 8.0]]).unwrap();
//!
//! let c = multiply_sequential(&a, &b).unwrap();
//! assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
//! assert_eq!(multiply_transposed(&a, &b).unwrap(), c);
//! ```

pub mod config;
pub mod error;
pub mod harness;
pub mod kernel;
pub mod matrix;
pub mod report;
pub mod stats;

pub use config::BenchConfig;
pub use error::{BenchError, MatrixError};
pub use harness::{Benchmark, SizeReport};
pub use kernel::Kernel;
pub use matrix::SquareMatrix;
