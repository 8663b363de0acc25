use std::path::PathBuf;

use crate::error::{BenchError, Result};
use crate::kernel::Kernel;

// Number of trials averaged for every (kernel, size) pair.
pub const SAMPLE_SIZE: usize = 20;
pub const MIN_SIZE: usize = 200;
pub const SIZE_STEP: usize = 200;
pub const MAX_SIZE: usize = 2000;
pub const NUM_THREADS: usize = 4;
pub const RESULTS_PATH: &str = "results/mat_multi_para_optimized_1.txt";
pub const TITLE: &str = "Parallel matrix multiplication - transpose optimized";

#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub sample_size: usize,
    pub min_size: usize,
    pub size_step: usize,
    pub max_size: usize,
    pub threads: usize,
    /// `None` seeds from OS entropy, so runs are not reproducible.
    pub seed: Option<u64>,
    /// The first kernel is the baseline every other kernel's speedup is
    /// measured against.
    pub kernels: Vec<Kernel>,
    pub results_path: PathBuf,
    pub title: String,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            sample_size: SAMPLE_SIZE,
            min_size: MIN_SIZE,
            size_step: SIZE_STEP,
            max_size: MAX_SIZE,
            threads: NUM_THREADS,
            seed: None,
            kernels: vec![
                Kernel::NAIVE_SEQUENTIAL,
                Kernel::NAIVE_PARALLEL,
                Kernel::TRANSPOSED_SEQUENTIAL,
                Kernel::TRANSPOSED_PARALLEL,
            ],
            results_path: PathBuf::from(RESULTS_PATH),
            title: TITLE.to_string(),
        }
    }
}

impl BenchConfig {
    pub fn sizes(&self) -> impl Iterator<Item = usize> {
        (self.min_size..=self.max_size).step_by(self.size_step.max(1))
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_size == 0 {
            return Err(BenchError::InvalidConfig("sample size must be positive"));
        }
        if self.threads == 0 {
            return Err(BenchError::InvalidConfig("thread count must be positive"));
        }
        if self.size_step == 0 {
            return Err(BenchError::InvalidConfig("size step must be positive"));
        }
        if self.min_size > self.max_size {
            return Err(BenchError::InvalidConfig("min size exceeds max size"));
        }
        if self.kernels.is_empty() {
            return Err(BenchError::InvalidConfig("no kernels to benchmark"));
        }
        Ok(())
    }
}
