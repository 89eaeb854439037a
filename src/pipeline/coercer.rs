//! Value Coercer Module
//! Total parses for messy metric cells: never raises, falls back to zero.

use polars::prelude::*;

use super::normalizer::{SESSIONS, TOTAL_REVENUE};

/// Parse a count-like cell ("1,200", " 500 ") into a non-negative integer.
/// Thousands separators are stripped, fractional values truncate, garbage
/// and negatives coerce to 0.
pub fn parse_count(raw: &str) -> i64 {
    let cleaned = raw.trim().replace(',', "");
    let value = cleaned
        .parse::<i64>()
        .ok()
        .or_else(|| cleaned.parse::<f64>().ok().map(|v| v.trunc() as i64))
        .unwrap_or(0);
    value.max(0)
}

/// Parse a money-like cell ("$300.00", "£1,234.56") into a float by keeping
/// only digits and decimal points. A cell with no digit at all is 0.
pub fn parse_money(raw: &str) -> f64 {
    if !raw.chars().any(|c| c.is_ascii_digit()) {
        return 0.0;
    }
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse::<f64>().unwrap_or(0.0)
}

/// Coerce `Sessions` to Int64 and, when present, `Total revenue` to Float64.
/// Columns are replaced in place; positions and row count are untouched.
pub fn coerce_metrics(df: &mut DataFrame) -> PolarsResult<()> {
    coerce_count_column(df, SESSIONS)?;
    if df.column(TOTAL_REVENUE).is_ok() {
        let parsed: Vec<f64> = string_cells(df, TOTAL_REVENUE)?
            .iter()
            .map(|cell| parse_money(cell))
            .collect();
        df.with_column(Column::new(TOTAL_REVENUE.into(), parsed))?;
    }
    Ok(())
}

/// Replace a string column with its count-coerced Int64 form.
pub fn coerce_count_column(df: &mut DataFrame, name: &str) -> PolarsResult<()> {
    let parsed: Vec<i64> = string_cells(df, name)?
        .iter()
        .map(|cell| parse_count(cell))
        .collect();
    df.with_column(Column::new(name.into(), parsed))?;
    Ok(())
}

/// Cells of a column as owned strings; nulls read as empty.
pub(crate) fn string_cells(df: &DataFrame, name: &str) -> PolarsResult<Vec<String>> {
    let col = df.column(name)?.cast(&DataType::String)?;
    let ca = col.str()?;
    Ok(ca
        .into_iter()
        .map(|v| v.unwrap_or("").to_string())
        .collect())
}

/// Cells of an integer column; nulls read as 0.
pub(crate) fn int_cells(df: &DataFrame, name: &str) -> PolarsResult<Vec<i64>> {
    let col = df.column(name)?.cast(&DataType::Int64)?;
    Ok(col.i64()?.into_iter().map(|v| v.unwrap_or(0)).collect())
}

/// Cells of a float column; nulls read as 0.
pub(crate) fn float_cells(df: &DataFrame, name: &str) -> PolarsResult<Vec<f64>> {
    let col = df.column(name)?.cast(&DataType::Float64)?;
    Ok(col.f64()?.into_iter().map(|v| v.unwrap_or(0.0)).collect())
}
