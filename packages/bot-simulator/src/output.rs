//! Output writers for simulation results.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::metrics::{MatchMetrics, RunSummary};

pub struct OutputWriter {
    jsonl: BufWriter<File>,
    jsonl_path: PathBuf,
    summary_path: PathBuf,
}

impl OutputWriter {
    pub fn new(output_dir: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let dir = Path::new(output_dir);
        std::fs::create_dir_all(dir)?;

        let timestamp = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| "unknown".to_string())
            .replace(':', "-");

        let jsonl_path = dir.join(format!("simulation_{timestamp}.jsonl"));
        let summary_path = dir.join(format!("simulation_{timestamp}_summary.json"));
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&jsonl_path)?;

        Ok(Self {
            jsonl: BufWriter::new(file),
            jsonl_path,
            summary_path,
        })
    }

    pub fn write_match(&mut self, metrics: &MatchMetrics) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string(metrics)?;
        writeln!(self.jsonl, "{json}")?;
        Ok(())
    }

    /// Flush the per-match lines and write the summary file.
    pub fn finish(mut self, summary: &RunSummary) -> Result<(), Box<dyn std::error::Error>> {
        self.jsonl.flush()?;
        let file = File::create(&self.summary_path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), summary)?;
        Ok(())
    }

    pub fn output_paths(&self) -> (&Path, &Path) {
        (&self.jsonl_path, &self.summary_path)
    }
}
