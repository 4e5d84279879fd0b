//! Turns the ledger's encoded `"<month>.<year>"` period field into calendar
//! attributes.

use crate::error::{PeriodError, Result, SalesDashboardError};
use crate::schema::{Dataset, RawRecord, Record};
use crate::utils::{first_day_of_month, pad_month};
use chrono::NaiveDate;
use log::{debug, info};

/// Calendar attributes decoded from a period field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub month: u32,
    pub year: i32,
    pub date: NaiveDate,
}

/// Parses `"<month>.<year>"`.
///
/// The month may be one or two digits (`"3"` and `"03"` are the same month).
/// Everything after the first dot is the year, so `"3.2024.1"` is rejected as an
/// invalid year rather than silently truncated.
pub fn parse_period(raw: &str) -> std::result::Result<Period, PeriodError> {
    let (month_part, year_part) = raw.split_once('.').ok_or(PeriodError::MissingSeparator)?;

    let month = pad_month(month_part)
        .parse::<i64>()
        .ok()
        .filter(|m| (1..=12).contains(m))
        .ok_or(PeriodError::InvalidMonth)? as u32;

    let year = year_part
        .parse::<i32>()
        .ok()
        .filter(|y| *y > 0)
        .ok_or(PeriodError::InvalidYear)?;

    let date = first_day_of_month(year, month).ok_or(PeriodError::InvalidYear)?;

    Ok(Period { month, year, date })
}

/// Normalizes a single raw row.
pub fn normalize(raw: RawRecord) -> Result<Record> {
    let period = parse_period(&raw.period_raw).map_err(|kind| SalesDashboardError::Parse {
        row: None,
        period: raw.period_raw.clone(),
        kind,
    })?;

    Ok(Record {
        period_raw: raw.period_raw,
        product: raw.product,
        customer: raw.customer,
        company: raw.company,
        region: raw.region,
        net_sales: raw.net_sales,
        month: period.month,
        year: period.year,
        date: period.date,
    })
}

/// Normalizes every row in order. The first malformed row aborts the whole load;
/// errors carry the 1-based row number.
pub fn normalize_all<I>(rows: I) -> Result<Dataset>
where
    I: IntoIterator<Item = RawRecord>,
{
    let mut records = Vec::new();

    for (idx, raw) in rows.into_iter().enumerate() {
        let row = idx + 1;

        if !raw.net_sales.is_finite() {
            return Err(SalesDashboardError::InvalidAmount {
                row,
                value: raw.net_sales,
            });
        }

        let record = normalize(raw).map_err(|e| match e {
            SalesDashboardError::Parse { period, kind, .. } => SalesDashboardError::Parse {
                row: Some(row),
                period,
                kind,
            },
            other => other,
        })?;
        records.push(record);
    }

    let dataset = Dataset::new(records);
    info!(
        "Normalized {} ledger rows across {} companies",
        dataset.len(),
        dataset.companies().len()
    );
    if let (Some(first), Some(last)) = (
        dataset.iter().map(|r| r.date).min(),
        dataset.iter().map(|r| r.date).max(),
    ) {
        debug!("Ledger covers {} to {}", first.format("%Y-%m"), last.format("%Y-%m"));
    }

    Ok(dataset)
}
