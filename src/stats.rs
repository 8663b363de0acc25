pub const Z_95: f64 = 1.96;

pub const RELATIVE_ERROR_PERCENT: f64 = 5.0;

pub fn mean(samples: &[f64]) -> f64 {
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Population standard deviation (divides by `n`, not `n - 1`).
pub fn std_dev(samples: &[f64], mean: f64) -> f64 {
    let sq_sum: f64 = samples.iter().map(|x| (x - mean).powi(2)).sum();
    (sq_sum / samples.len() as f64).sqrt()
}

// advisory only, the harness always runs the configured sample size
pub fn sample_count(mean: f64, sd: f64) -> f64 {
    if sd == 0.0 {
        return 0.0;
    }
    100.0 * Z_95 * sd / (RELATIVE_ERROR_PERCENT * mean)
}

pub fn speedup(baseline_mean: f64, candidate_mean: f64) -> f64 {
    baseline_mean / candidate_mean
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub std_dev: f64,
    pub sample_count: f64,
}

impl Summary {
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let mean = mean(samples);
        let std_dev = std_dev(samples, mean);
        Some(Self {
            mean,
            std_dev,
            sample_count: sample_count(mean, std_dev),
        })
    }
}
