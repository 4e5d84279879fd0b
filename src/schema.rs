use crate::error::{Result, SalesDashboardError};
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// One ledger row as it arrives from the loader, before period normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RawRecord {
    #[serde(rename = "Period/Year", alias = "period", alias = "period_raw")]
    #[schemars(description = "Encoded period '<month>.<year>', e.g. '3.2024' or '03.2024'")]
    pub period_raw: String,

    #[serde(rename = "Product", alias = "product")]
    pub product: String,

    #[serde(rename = "Customer", alias = "customer")]
    pub customer: String,

    #[serde(rename = "Company", alias = "company")]
    pub company: String,

    #[serde(rename = "Region", alias = "region")]
    pub region: String,

    #[serde(rename = "Net Sales", alias = "net_sales")]
    #[schemars(description = "Signed net sales amount; returns and credit notes are negative")]
    pub net_sales: f64,
}

/// A normalized ledger row. Immutable once built by the normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Record {
    pub period_raw: String,
    pub product: String,
    pub customer: String,
    pub company: String,
    pub region: String,
    pub net_sales: f64,
    /// Calendar month, 1-12
    pub month: u32,
    pub year: i32,
    /// First day of `month`/`year`
    pub date: NaiveDate,
}

/// The normalized ledger. Built once at load time and shared read-only afterwards;
/// cloning only bumps a reference count.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Arc<[Record]>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct company identifiers in first-appearance order.
    pub fn companies(&self) -> Vec<&str> {
        crate::filter::distinct_companies(self)
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// A categorical field records can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub enum Dimension {
    Product,
    Customer,
    Company,
    Region,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Product,
        Dimension::Customer,
        Dimension::Company,
        Dimension::Region,
    ];

    /// Column name in the ledger.
    pub fn field_name(self) -> &'static str {
        match self {
            Dimension::Product => "Product",
            Dimension::Customer => "Customer",
            Dimension::Company => "Company",
            Dimension::Region => "Region",
        }
    }

    pub fn key(self, record: &Record) -> &str {
        match self {
            Dimension::Product => &record.product,
            Dimension::Customer => &record.customer,
            Dimension::Company => &record.company,
            Dimension::Region => &record.region,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

impl FromStr for Dimension {
    type Err = SalesDashboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Product" | "product" => Ok(Dimension::Product),
            "Customer" | "customer" => Ok(Dimension::Customer),
            "Company" | "company" => Ok(Dimension::Company),
            "Region" | "region" => Ok(Dimension::Region),
            other => Err(SalesDashboardError::UnknownField(other.to_string())),
        }
    }
}

/// A numeric field summed within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub enum Metric {
    NetSales,
}

impl Metric {
    pub fn field_name(self) -> &'static str {
        match self {
            Metric::NetSales => "Net Sales",
        }
    }

    pub fn value(self, record: &Record) -> f64 {
        match self {
            Metric::NetSales => record.net_sales,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

impl FromStr for Metric {
    type Err = SalesDashboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Net Sales" | "net_sales" | "NetSales" => Ok(Metric::NetSales),
            other => Err(SalesDashboardError::UnknownField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Largest totals first
    Top,
    /// Smallest totals first
    Bottom,
}

/// Summed metric for one group key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GroupTotal {
    pub key: String,
    pub total: f64,
}

/// One point of the year x region trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SeriesPoint {
    pub year: i32,
    pub region: String,
    pub total: f64,
}

/// One point of the month x region trend, keyed by the first day of the month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MonthlySeriesPoint {
    pub date: NaiveDate,
    pub region: String,
    pub total: f64,
}
