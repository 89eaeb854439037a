//! Pipeline module - the staged normalization pass
//!
//! Normalize headers, check required columns, coerce values, derive the
//! conversion rate, format for display. Stages run strictly in order over a
//! single in-memory table; the row count never changes.

mod coercer;
mod deriver;
mod formatter;
mod normalizer;

pub use normalizer::NormalizerError;

use polars::prelude::*;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Normalizer(#[from] NormalizerError),
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Run the full transform over the table in place. On return the table holds
/// canonical headers, display-formatted metrics and a `Conversion rate`
/// column; on error it is left mid-transform and should be discarded.
pub fn process(df: &mut DataFrame, events_label: &str) -> Result<(), PipelineError> {
    normalizer::normalize_headers(df, events_label)?;
    normalizer::check_required(df)?;
    coercer::coerce_metrics(df)?;
    deriver::derive_conversion_rate(df, events_label)?;
    formatter::format_output(df)?;
    info!(rows = df.height(), cols = df.width(), "table processed");
    Ok(())
}
