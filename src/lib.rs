//! # Sales Dashboard
//!
//! Aggregation and view-model engine behind an interactive sales dashboard: it
//! loads a sales ledger once, then recomputes rankings and a regional trend every
//! time the user narrows the view to a single company.
//!
//! ## Core Concepts
//!
//! - **Period normalization**: the ledger's `"<month>.<year>"` field (`"3.2024"`,
//!   `"03.2024"`) becomes a month, a year and a first-of-month date. One bad row
//!   fails the whole load.
//! - **Rankings**: top-N / bottom-N groups (products, customers, ...) by summed net
//!   sales, ties kept in first-appearance order.
//! - **Trend**: net sales per (year, region), year ascending, always over the whole
//!   ledger.
//! - **Filter context**: the optional selected company. Only the company panels
//!   react to it.
//! - **View-model bundle**: the nine charts a renderer draws, recomputed from
//!   scratch on every selection change.
//!
//! ## Example
//!
//! ```rust,ignore
//! use sales_dashboard::*;
//!
//! let dashboard = SalesDashboard::from_csv_path("ledger.csv", DashboardConfig::default())?;
//! let mut session = dashboard.session();
//!
//! let initial = session.start();
//! assert!(initial.company_rankings[0].is_placeholder());
//!
//! let drilled = session.select_company(Some("Acme Iberia"));
//! println!("{}", drilled.to_markdown());
//! ```

pub mod aggregation;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod filter;
pub mod ingestion;
pub mod normalizer;
pub mod render;
pub mod schema;
pub mod timeseries;
pub mod utils;

pub use aggregation::{group_totals, rank, rank_by_field};
pub use config::{DashboardConfig, RankingPanelConfig};
pub use dispatcher::{
    compute_bundle, ChartData, DashboardState, ViewModel, ViewModelBundle, ViewModelDispatcher,
};
pub use error::{PeriodError, Result, SalesDashboardError};
pub use filter::{distinct_companies, FilterContext};
pub use ingestion::*;
pub use normalizer::{normalize, normalize_all, parse_period, Period};
pub use schema::*;
pub use timeseries::{
    series_by_month_and_region, series_by_year_and_region, split_by_region, TrendLine,
};

use log::info;
use std::path::Path;
use std::sync::Arc;

/// A loaded ledger plus the dashboard layout, shared read-only by every UI
/// session.
#[derive(Debug, Clone)]
pub struct SalesDashboard {
    dataset: Dataset,
    config: Arc<DashboardConfig>,
}

impl SalesDashboard {
    pub fn new(dataset: Dataset, config: DashboardConfig) -> Result<Self> {
        config.validate()?;

        info!(
            "Sales dashboard ready: {} rows, {} companies, top/bottom {}",
            dataset.len(),
            dataset.companies().len(),
            config.ranking_size
        );

        Ok(Self {
            dataset,
            config: Arc::new(config),
        })
    }

    /// Loads and normalizes the raw rows, then builds the dashboard. Any malformed
    /// row aborts before a single chart is produced.
    pub fn from_rows(rows: Vec<RawRecord>, config: DashboardConfig) -> Result<Self> {
        let dataset = load_dataset(rows)?;
        Self::new(dataset, config)
    }

    pub fn from_csv_path<P: AsRef<Path>>(path: P, config: DashboardConfig) -> Result<Self> {
        let dataset = load_csv_path(path)?;
        Self::new(dataset, config)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn companies(&self) -> Vec<&str> {
        self.dataset.companies()
    }

    /// A new UI session in the unfiltered state.
    pub fn session(&self) -> ViewModelDispatcher {
        ViewModelDispatcher::new(self.dataset.clone(), Arc::clone(&self.config))
    }

    /// Stateless one-shot recomputation for the given selection.
    pub fn bundle_for(&self, company: Option<&str>) -> ViewModelBundle {
        compute_bundle(&self.dataset, &FilterContext::new(company), &self.config)
    }
}

pub fn build_dashboard(
    rows: Vec<RawRecord>,
    config: DashboardConfig,
) -> Result<SalesDashboard> {
    SalesDashboard::from_rows(rows, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(period: &str, company: &str, product: &str, net_sales: f64) -> RawRecord {
        RawRecord {
            period_raw: period.to_string(),
            product: product.to_string(),
            customer: "C1".to_string(),
            company: company.to_string(),
            region: "North".to_string(),
            net_sales,
        }
    }

    #[test]
    fn test_end_to_end_example() {
        let dashboard = build_dashboard(
            vec![raw("3.2024", "A", "X", 100.0), raw("03.2024", "A", "Y", 50.0)],
            DashboardConfig::default(),
        )
        .unwrap();

        for record in dashboard.dataset() {
            assert_eq!(record.month, 3);
            assert_eq!(record.year, 2024);
        }

        let top = rank(
            dashboard.dataset(),
            Dimension::Product,
            Metric::NetSales,
            2,
            Direction::Top,
        );
        assert_eq!(
            top,
            vec![
                GroupTotal { key: "X".to_string(), total: 100.0 },
                GroupTotal { key: "Y".to_string(), total: 50.0 },
            ]
        );

        let bundle = dashboard.bundle_for(Some("B"));
        assert!(bundle.company_rankings[0].bars().is_empty());
        assert!(!bundle.company_rankings[0].is_placeholder());
    }

    #[test]
    fn test_malformed_row_fails_construction() {
        let err = build_dashboard(
            vec![raw("3.2024", "A", "X", 1.0), raw("13.2024", "A", "Y", 1.0)],
            DashboardConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err.period_error(), Some(PeriodError::InvalidMonth));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = DashboardConfig {
            ranking_size: 0,
            ..DashboardConfig::default()
        };
        let err = SalesDashboard::new(Dataset::empty(), config).unwrap_err();
        assert!(matches!(err, SalesDashboardError::InvalidConfig(_)));
    }

    #[test]
    fn test_sessions_share_the_dataset() {
        let dashboard = build_dashboard(
            vec![raw("1.2024", "A", "X", 1.0), raw("1.2024", "B", "Y", 2.0)],
            DashboardConfig::default(),
        )
        .unwrap();

        let mut first = dashboard.session();
        let mut second = dashboard.session();
        assert!(std::ptr::eq(
            first.dataset().records(),
            second.dataset().records()
        ));

        let a = first.select_company(Some("A"));
        let b = second.select_company(Some("B"));
        assert_eq!(a.company_rankings[0].bars()[0].key, "X");
        assert_eq!(b.company_rankings[0].bars()[0].key, "Y");
        assert_eq!(dashboard.companies(), vec!["A", "B"]);
    }

    #[test]
    fn test_dataset_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Dataset>();
        assert_send_sync::<SalesDashboard>();
    }
}
