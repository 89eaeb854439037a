//! Header Normalizer Module
//! Maps messy export headers onto the canonical schema.

use polars::prelude::*;
use thiserror::Error;
use tracing::debug;

pub const LANDING_PAGE: &str = "Landing page";
pub const SESSIONS: &str = "Sessions";
pub const KEY_EVENTS: &str = "Key events";
pub const TOTAL_REVENUE: &str = "Total revenue";
pub const CONVERSION_RATE: &str = "Conversion rate";

/// Known header variants, matched against trimmed, lowercased input headers.
const HEADER_SYNONYMS: &[(&str, &str)] = &[
    ("landing page", LANDING_PAGE),
    ("landingpage", LANDING_PAGE),
    ("url", LANDING_PAGE),
    ("page", LANDING_PAGE),
    ("sessions", SESSIONS),
    ("session", SESSIONS),
    ("visits", SESSIONS),
    ("traffic", SESSIONS),
    ("key events", KEY_EVENTS),
    ("keyevents", KEY_EVENTS),
    ("events", KEY_EVENTS),
    ("conversions", KEY_EVENTS),
    ("total revenue", TOTAL_REVENUE),
    ("totalrevenue", TOTAL_REVENUE),
    ("revenue", TOTAL_REVENUE),
    ("sales", TOTAL_REVENUE),
];

#[derive(Error, Debug)]
pub enum NormalizerError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// Canonical name for a raw header, if it is a known variant.
fn canonical_name(raw: &str) -> Option<&'static str> {
    let key = raw.trim().to_lowercase();
    HEADER_SYNONYMS
        .iter()
        .find(|(variant, _)| *variant == key)
        .map(|(_, canonical)| *canonical)
}

/// Rewrite the table's headers against the canonical schema, then rename the
/// `Key events` column (if any) to the caller-supplied label.
///
/// Headers are trimmed before matching; unmatched headers keep the trimmed
/// form. When several headers land on the same name, the rightmost wins and
/// earlier claimants are dropped so the table never holds duplicates.
pub fn normalize_headers(df: &mut DataFrame, events_label: &str) -> Result<(), NormalizerError> {
    let raw_names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    let targets: Vec<String> = raw_names
        .iter()
        .map(|name| {
            canonical_name(name)
                .map(str::to_string)
                .unwrap_or_else(|| name.trim().to_string())
        })
        .collect();

    // Drop superseded claimants first so every remaining rename is collision-free.
    for (i, raw) in raw_names.iter().enumerate() {
        if targets[i + 1..].contains(&targets[i]) {
            debug!(column = %raw, "dropping column superseded by a later header");
            df.drop_in_place(raw)?;
        }
    }
    for (i, raw) in raw_names.iter().enumerate() {
        if targets[i + 1..].contains(&targets[i]) || raw == &targets[i] {
            continue;
        }
        df.rename(raw, targets[i].as_str().into())?;
    }

    if events_label != KEY_EVENTS && df.column(KEY_EVENTS).is_ok() {
        if df.column(events_label).is_ok() {
            df.drop_in_place(events_label)?;
        }
        df.rename(KEY_EVENTS, events_label.into())?;
    }
    Ok(())
}

/// Fail with every missing required column named, in canonical order.
pub fn check_required(df: &DataFrame) -> Result<(), NormalizerError> {
    let missing: Vec<String> = [LANDING_PAGE, SESSIONS]
        .iter()
        .filter(|name| df.column(name).is_err())
        .map(|name| name.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(NormalizerError::MissingColumns(missing))
    }
}
