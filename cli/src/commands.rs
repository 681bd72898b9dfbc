//! Command Handlers

use std::path::PathBuf;

use anyhow::{Context, Result};
use bwfilter_core::{DesignConfig, FilterJob, FilterKind, JobReport};
use serde_json::{Map, Value};
use tracing::debug;

/// Run the four-filter bank over `input`
pub fn filter_file(
    input: PathBuf,
    output: Option<PathBuf>,
    config: DesignConfig,
) -> Result<JobReport> {
    let mut job = FilterJob::new(input, config);
    if let Some(output) = output {
        job = job.with_output(output);
    }

    job.run()
        .with_context(|| format!("filtering {:?}", job.input()))
}

/// Coefficients of one or all filters, keyed by filter name
pub fn design_json(config: &DesignConfig, kind: Option<FilterKind>) -> Result<Value> {
    let kinds: Vec<FilterKind> = match kind {
        Some(kind) => vec![kind],
        None => FilterKind::ALL.to_vec(),
    };

    let mut designs = Map::new();
    for kind in kinds {
        let coefficients = config
            .design_for(kind)
            .design()
            .with_context(|| format!("designing {} filter", kind.name()))?;
        debug!(
            "{}: {} sections",
            kind.name(),
            coefficients.section_count()
        );
        designs.insert(kind.name().to_string(), serde_json::to_value(&coefficients)?);
    }

    Ok(Value::Object(designs))
}
