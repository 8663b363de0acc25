use std::io::Write;
use std::time::{Duration, Instant};

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::ThreadPool;

use crate::config::BenchConfig;
use crate::error::{MatrixError, Result};
use crate::kernel::Kernel;
use crate::matrix::SquareMatrix;
use crate::report::{self, ResultsWriter};
use crate::stats::{self, Summary};

#[derive(Debug, Clone, PartialEq)]
pub struct KernelResult {
    pub kernel: Kernel,
    pub summary: Summary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SizeReport {
    pub side: usize,
    /// In configuration order; the first entry is the baseline.
    pub results: Vec<KernelResult>,
}

impl SizeReport {
    pub fn baseline(&self) -> Option<&KernelResult> {
        self.results.first()
    }

    pub fn speedups(&self) -> impl Iterator<Item = (Kernel, f64)> + '_ {
        let baseline_mean = self.baseline().map(|r| r.summary.mean).unwrap_or(0.0);
        self.results
            .iter()
            .skip(1)
            .map(move |r| (r.kernel, stats::speedup(baseline_mean, r.summary.mean)))
    }
}

fn measure_time<F>(func: F) -> std::result::Result<Duration, MatrixError>
where
    F: FnOnce() -> std::result::Result<SquareMatrix, MatrixError>,
{
    let start = Instant::now();
    let res = func()?;
    let duration = start.elapsed();
    // keep the product alive until the clock has stopped
    drop(res);
    Ok(duration)
}

pub struct Benchmark {
    config: BenchConfig,
    pool: ThreadPool,
    rng: StdRng,
}

impl Benchmark {
    pub fn new(config: BenchConfig) -> Result<Self> {
        config.validate()?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { config, pool, rng })
    }

    pub fn time_trial(&self, kernel: Kernel, a: &SquareMatrix, b: &SquareMatrix) -> Result<f64> {
        let duration = self
            .pool
            .install(|| measure_time(|| kernel.multiply(a, b)))?;
        Ok(duration.as_secs_f64())
    }

    pub fn run_size(&mut self, side: usize) -> Result<SizeReport> {
        let kernels = self.config.kernels.clone();
        let sample_size = self.config.sample_size;
        let mut samples: Vec<Vec<f64>> = (0..kernels.len())
            .map(|_| Vec::with_capacity(sample_size))
            .collect();

        for trial in 0..sample_size {
            let (a, b) = SquareMatrix::random_pair(side, &mut self.rng);
            for (kernel, times) in kernels.iter().zip(samples.iter_mut()) {
                let secs = self.time_trial(*kernel, &a, &b)?;
                debug!("n={} trial={} {}: {:.6}s", side, trial, kernel, secs);
                times.push(secs);
            }
        }

        let results = kernels
            .into_iter()
            .zip(samples)
            .filter_map(|(kernel, times)| {
                Summary::from_samples(&times).map(|summary| KernelResult { kernel, summary })
            })
            .collect();

        Ok(SizeReport { side, results })
    }

    pub fn run<C, W>(&mut self, console: &mut C, results: &mut ResultsWriter<W>) -> Result<Vec<SizeReport>>
    where
        C: Write,
        W: Write,
    {
        info!(
            "benchmarking {} kernel(s) with {} samples on {} threads",
            self.config.kernels.len(),
            self.config.sample_size,
            self.config.threads
        );
        writeln!(console, "{}", self.config.title)?;

        let sizes: Vec<usize> = self.config.sizes().collect();
        let mut reports = Vec::with_capacity(sizes.len());
        for side in sizes {
            info!("processing a {}x{} matrix", side, side);
            let size_report = self.run_size(side)?;
            report::write_console(console, &size_report)?;
            results.write_size(&size_report)?;
            reports.push(size_report);
        }
        results.flush()?;

        info!("completed {} matrix sizes", reports.len());
        Ok(reports)
    }
}
