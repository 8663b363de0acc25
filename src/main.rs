use std::io;

use anyhow::Context;
use log::info;
use matmul_bench::report::ResultsWriter;
use matmul_bench::{BenchConfig, Benchmark};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = BenchConfig::default();
    let results_path = config.results_path.clone();

    // opened before any trial so a bad path fails fast
    let mut results = ResultsWriter::create(&results_path, &config.title)
        .context("Unable to open the file")?;

    let mut bench = Benchmark::new(config).context("invalid benchmark setup")?;
    let stdout = io::stdout();
    let mut console = stdout.lock();
    bench
        .run(&mut console, &mut results)
        .context("benchmark run failed")?;

    info!("results written to {}", results_path.display());
    Ok(())
}
