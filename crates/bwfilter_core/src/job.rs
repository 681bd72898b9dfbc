//! File Filtering Job
//!
//! Reads a sample file, runs it through the four-filter bank and writes the
//! result table next to the input.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::bank::FilterBank;
use crate::config::DesignConfig;
use crate::error::CoreResult;
use crate::io::{output_path_for, read_sample_file, write_row_file};

/// Summary of a finished job
#[derive(Debug, Clone, PartialEq)]
pub struct JobReport {
    pub output: PathBuf,
    pub samples: usize,
}

/// One input file filtered with one design configuration
#[derive(Debug, Clone)]
pub struct FilterJob {
    input: PathBuf,
    output: PathBuf,
    config: DesignConfig,
}

impl FilterJob {
    /// Job writing to the default `<stem>_filtered.<ext>` path
    pub fn new(input: impl Into<PathBuf>, config: DesignConfig) -> Self {
        let input = input.into();
        let output = output_path_for(&input);
        Self {
            input,
            output,
            config,
        }
    }

    /// Override the output path
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Design, read, filter, write
    ///
    /// The bank is designed before the input is read, so a bad configuration
    /// fails without touching the file system. Nothing is written unless
    /// every sample parsed.
    pub fn run(&self) -> CoreResult<JobReport> {
        let mut bank = FilterBank::new(self.config.clone())?;

        let samples = read_sample_file(&self.input)?;
        let rows = bank.run(&samples)?;
        write_row_file(&self.output, &rows)?;

        info!(
            "Filtered {} samples from {:?} into {:?}",
            rows.len(),
            self.input,
            self.output
        );
        Ok(JobReport {
            output: self.output.clone(),
            samples: rows.len(),
        })
    }
}
