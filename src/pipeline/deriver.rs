//! Metric Deriver Module
//! Produces the `Conversion rate` column from whichever signal the export carries.

use polars::prelude::*;
use tracing::debug;

use super::coercer::{coerce_count_column, float_cells, int_cells};
use super::normalizer::{CONVERSION_RATE, SESSIONS, TOTAL_REVENUE};

/// Which optional column drives the conversion-rate formula. Selected once per
/// table, so every row gets the same branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateSource {
    /// Revenue column present: rate is presence-of-revenue over sessions.
    /// Intentionally binary per row, not a revenue/sessions ratio.
    Revenue,
    /// No revenue but an events column: rate is events over sessions.
    Events,
    /// Neither signal: zero placeholders.
    Neither,
}

pub fn select_source(df: &DataFrame, events_label: &str) -> RateSource {
    if df.column(TOTAL_REVENUE).is_ok() {
        RateSource::Revenue
    } else if df.column(events_label).is_ok() {
        RateSource::Events
    } else {
        RateSource::Neither
    }
}

fn round2(value: f64) -> f64 {
    if value.is_finite() {
        (value * 100.0).round() / 100.0
    } else {
        0.0
    }
}

/// Append `Conversion rate` (and a zero `Total revenue` where the input had
/// none) as numeric columns. Zero sessions never error; the rate coerces to 0.
pub fn derive_conversion_rate(df: &mut DataFrame, events_label: &str) -> PolarsResult<()> {
    let source = select_source(df, events_label);
    debug!(?source, rows = df.height(), "deriving conversion rate");

    let rates: Vec<f64> = match source {
        RateSource::Revenue => {
            let sessions = int_cells(df, SESSIONS)?;
            let revenue = float_cells(df, TOTAL_REVENUE)?;
            sessions
                .iter()
                .zip(&revenue)
                .map(|(&s, &r)| {
                    if s == 0 {
                        0.0
                    } else {
                        let converted = if r > 0.0 { 1.0 } else { 0.0 };
                        round2(converted / s as f64 * 100.0)
                    }
                })
                .collect()
        }
        RateSource::Events => {
            // The events column only gets coerced when it actually feeds the rate.
            coerce_count_column(df, events_label)?;
            let sessions = int_cells(df, SESSIONS)?;
            let events = int_cells(df, events_label)?;
            sessions
                .iter()
                .zip(&events)
                .map(|(&s, &e)| {
                    if s == 0 {
                        0.0
                    } else {
                        round2(e as f64 / s as f64 * 100.0)
                    }
                })
                .collect()
        }
        RateSource::Neither => vec![0.0; df.height()],
    };

    if source != RateSource::Revenue {
        let zeros = vec![0.0f64; df.height()];
        df.with_column(Column::new(TOTAL_REVENUE.into(), zeros))?;
    }
    df.with_column(Column::new(CONVERSION_RATE.into(), rates))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: Vec<Column>) -> DataFrame {
        DataFrame::new(columns).unwrap()
    }

    #[test]
    fn source_selection_prefers_revenue() {
        let df = table(vec![
            Column::new(SESSIONS.into(), vec![10i64]),
            Column::new(TOTAL_REVENUE.into(), vec![5.0f64]),
            Column::new("Signups".into(), vec![1i64]),
        ]);
        assert_eq!(select_source(&df, "Signups"), RateSource::Revenue);

        let df = table(vec![
            Column::new(SESSIONS.into(), vec![10i64]),
            Column::new("Signups".into(), vec![1i64]),
        ]);
        assert_eq!(select_source(&df, "Signups"), RateSource::Events);

        let df = table(vec![Column::new(SESSIONS.into(), vec![10i64])]);
        assert_eq!(select_source(&df, "Signups"), RateSource::Neither);
    }

    #[test]
    fn revenue_branch_is_binary_presence_over_sessions() {
        let mut df = table(vec![
            Column::new(SESSIONS.into(), vec![1200i64, 400, 0, 50]),
            Column::new(TOTAL_REVENUE.into(), vec![300.0f64, 0.0, 10.0, 25.0]),
        ]);
        derive_conversion_rate(&mut df, "Key events").unwrap();
        let rates = float_cells(&df, CONVERSION_RATE).unwrap();
        // 100 * 1/1200 rounds to 0.08; zero revenue and zero sessions both give 0
        assert_eq!(rates, vec![0.08, 0.0, 0.0, 2.0]);
    }

    #[test]
    fn events_branch_divides_events_by_sessions() {
        let mut df = table(vec![
            Column::new(SESSIONS.into(), vec![500i64, 0, 300]),
            Column::new("Signups".into(), vec!["25", "4", "oops"]),
        ]);
        derive_conversion_rate(&mut df, "Signups").unwrap();
        let rates = float_cells(&df, CONVERSION_RATE).unwrap();
        assert_eq!(rates, vec![5.0, 0.0, 0.0]);
        // the events column is now numeric and a zero revenue placeholder exists
        assert_eq!(int_cells(&df, "Signups").unwrap(), vec![25, 4, 0]);
        assert_eq!(float_cells(&df, TOTAL_REVENUE).unwrap(), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn neither_branch_synthesizes_zero_placeholders() {
        let mut df = table(vec![
            Column::new("Landing page".into(), vec!["/a", "/b"]),
            Column::new(SESSIONS.into(), vec![10i64, 20]),
        ]);
        derive_conversion_rate(&mut df, "Signups").unwrap();
        assert_eq!(float_cells(&df, TOTAL_REVENUE).unwrap(), vec![0.0, 0.0]);
        assert_eq!(float_cells(&df, CONVERSION_RATE).unwrap(), vec![0.0, 0.0]);
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn rates_round_to_two_decimals() {
        assert_eq!(round2(0.0833333), 0.08);
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(5.0), 5.0);
        assert_eq!(round2(f64::INFINITY), 0.0);
        assert_eq!(round2(f64::NAN), 0.0);
    }
}
