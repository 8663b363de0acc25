use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{BenchError, Result};
use crate::harness::SizeReport;

pub fn write_console<W: Write>(out: &mut W, report: &SizeReport) -> io::Result<()> {
    let n = report.side;
    for r in &report.results {
        writeln!(out, "{}", r.kernel)?;
        writeln!(out, "Average time taken to execute in n-{} : {:.6}", n, r.summary.mean)?;
        writeln!(
            out,
            "Standard deviation for execution in n-{} : {:.6}",
            n, r.summary.std_dev
        )?;
        writeln!(out, "Sample count for n-{} : {:.2}", n, r.summary.sample_count)?;
        writeln!(out)?;
    }
    for (kernel, ratio) in report.speedups() {
        writeln!(out, "{}", kernel)?;
        if kernel.is_parallel() {
            writeln!(out, "Speed up after Parallelizing for n-{} : {:.4}", n, ratio)?;
        } else {
            writeln!(out, "Speed up for n-{} : {:.4}", n, ratio)?;
        }
    }
    if report.results.len() > 1 {
        writeln!(out)?;
    }
    Ok(())
}

pub struct ResultsWriter<W: Write> {
    writer: W,
}

impl ResultsWriter<BufWriter<File>> {
    pub fn create(path: &Path, title: &str) -> Result<Self> {
        let open = || -> io::Result<File> {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            File::create(path)
        };
        let file = open().map_err(|source| BenchError::ResultsFile {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufWriter::new(file), title)?)
    }
}

impl<W: Write> ResultsWriter<W> {
    pub fn new(mut writer: W, title: &str) -> io::Result<Self> {
        writeln!(writer, "{}", title)?;
        Ok(Self { writer })
    }

    pub fn write_size(&mut self, report: &SizeReport) -> io::Result<()> {
        let n = report.side;
        write!(self.writer, "\n--- n : {} ---\n", n)?;
        for r in &report.results {
            writeln!(self.writer, "{}", r.kernel)?;
            write!(
                self.writer,
                "Average time taken to execute in n-{} : {} seconds\n\n",
                n, r.summary.mean
            )?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::KernelResult;
    use crate::kernel::Kernel;
    use crate::stats::Summary;

    fn sample_report() -> SizeReport {
        SizeReport {
            side: 200,
            results: vec![
                KernelResult {
                    kernel: Kernel::TRANSPOSED_SEQUENTIAL,
                    summary: Summary {
                        mean: 0.5,
                        std_dev: 0.05,
                        sample_count: 3.92,
                    },
                },
                KernelResult {
                    kernel: Kernel::TRANSPOSED_PARALLEL,
                    summary: Summary {
                        mean: 0.125,
                        std_dev: 0.0,
                        sample_count: 0.0,
                    },
                },
            ],
        }
    }

    #[test]
    fn test_results_file_format() {
        let mut w = ResultsWriter::new(Vec::new(), "Title").unwrap();
        w.write_size(&sample_report()).unwrap();
        let text = String::from_utf8(w.into_inner()).unwrap();
        assert_eq!(
            text,
            "Title\n\
             \n--- n : 200 ---\n\
             Sequential multiplication with transpose\n\
             Average time taken to execute in n-200 : 0.5 seconds\n\n\
             Parallel multiplication with transpose (rows and columns)\n\
             Average time taken to execute in n-200 : 0.125 seconds\n\n"
        );
    }

    #[test]
    fn test_console_lines() {
        let mut out = Vec::new();
        write_console(&mut out, &sample_report()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Average time taken to execute in n-200 : 0.500000"));
        assert!(text.contains("Standard deviation for execution in n-200 : 0.050000"));
        assert!(text.contains("Sample count for n-200 : 3.92"));
        assert!(text.ends_with(
            "Parallel multiplication with transpose (rows and columns)\n\
             Speed up after Parallelizing for n-200 : 4.0000\n\n"
        ));
    }

    #[test]
    fn test_console_speedup_wording_for_sequential_kernel() {
        let mut report = sample_report();
        report.results[1].kernel = Kernel::TRANSPOSED_SEQUENTIAL;
        report.results[0].kernel = Kernel::NAIVE_SEQUENTIAL;
        let mut out = Vec::new();
        write_console(&mut out, &report).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with(
            "Sequential multiplication with transpose\n\
             Speed up for n-200 : 4.0000\n\n"
        ));
        assert!(!text.contains("Parallelizing"));
    }

    #[test]
    fn test_create_fails_on_directory_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = ResultsWriter::create(dir.path(), "Title").err().unwrap();
        assert!(matches!(err, BenchError::ResultsFile { .. }));
    }
}
