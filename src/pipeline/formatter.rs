//! Output Formatter Module
//! Re-stringifies the numeric columns into their display forms.

use polars::prelude::*;

use super::coercer::{float_cells, int_cells};
use super::normalizer::{CONVERSION_RATE, SESSIONS, TOTAL_REVENUE};

const CURRENCY_SYMBOL: char = '£';

/// Group an integer's digits with comma thousands separators.
pub fn group_thousands(value: i64) -> String {
    let raw = value.to_string();
    let (sign, digits) = raw
        .strip_prefix('-')
        .map_or(("", raw.as_str()), |rest| ("-", rest));
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}")
}

pub fn format_currency(value: f64) -> String {
    format!("{CURRENCY_SYMBOL}{value:.2}")
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// Terminal pass: `Sessions` becomes a grouped-digit string, `Total revenue` a
/// currency string, `Conversion rate` a percentage string. Nothing numeric
/// happens to these columns afterwards.
pub fn format_output(df: &mut DataFrame) -> PolarsResult<()> {
    let sessions: Vec<String> = int_cells(df, SESSIONS)?
        .into_iter()
        .map(group_thousands)
        .collect();
    df.with_column(Column::new(SESSIONS.into(), sessions))?;

    let revenue: Vec<String> = float_cells(df, TOTAL_REVENUE)?
        .into_iter()
        .map(format_currency)
        .collect();
    df.with_column(Column::new(TOTAL_REVENUE.into(), revenue))?;

    let rates: Vec<String> = float_cells(df, CONVERSION_RATE)?
        .into_iter()
        .map(format_percent)
        .collect();
    df.with_column(Column::new(CONVERSION_RATE.into(), rates))?;
    Ok(())
}
