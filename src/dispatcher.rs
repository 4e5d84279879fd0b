//! Recomputes the dashboard's view models whenever the company selection changes.
//!
//! [`compute_bundle`] is a pure function of the dataset, the filter and the
//! configuration. [`ViewModelDispatcher`] only tracks which of the two states
//! (unfiltered / filtered by one company) a UI session is in and calls
//! [`compute_bundle`] on every transition; nothing is cached between calls.

use crate::aggregation;
use crate::config::{DashboardConfig, RankingPanelConfig};
use crate::filter::FilterContext;
use crate::schema::{Dataset, GroupTotal, Metric, Record, SeriesPoint};
use crate::timeseries::series_by_year_and_region;
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartData {
    /// Ranked (label, value) bars
    Bar { bars: Vec<GroupTotal> },
    /// (year, region, value) points, year ascending
    Line { points: Vec<SeriesPoint> },
    /// Nothing to draw until a company is selected
    Placeholder,
}

/// A rendering-ready chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ViewModel {
    pub id: String,
    pub title: String,
    /// Company the chart was computed for; `None` for whole-ledger charts and
    /// placeholders.
    pub company: Option<String>,
    pub data: ChartData,
    /// User-visible message when the chart could not be computed.
    pub notice: Option<String>,
}

impl ViewModel {
    fn bar(panel: &RankingPanelConfig, bars: Vec<GroupTotal>, company: Option<&str>) -> Self {
        Self {
            id: panel.id.clone(),
            title: panel.title.clone(),
            company: company.map(str::to_string),
            data: ChartData::Bar { bars },
            notice: None,
        }
    }

    fn placeholder(panel: &RankingPanelConfig, title: &str) -> Self {
        Self {
            id: panel.id.clone(),
            title: title.to_string(),
            company: None,
            data: ChartData::Placeholder,
            notice: None,
        }
    }

    /// An empty chart standing in for one whose recomputation failed.
    fn degraded(id: &str, title: &str, company: Option<&str>, data: ChartData, reason: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            company: company.map(str::to_string),
            data,
            notice: Some(format!("This chart could not be computed: {}", reason)),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.data, ChartData::Placeholder)
    }

    /// Bars of a ranking chart; empty for other chart kinds.
    pub fn bars(&self) -> &[GroupTotal] {
        match &self.data {
            ChartData::Bar { bars } => bars,
            _ => &[],
        }
    }

    /// Points of a trend chart; empty for other chart kinds.
    pub fn points(&self) -> &[SeriesPoint] {
        match &self.data {
            ChartData::Line { points } => points,
            _ => &[],
        }
    }
}

/// The nine charts of the dashboard, in display order: four whole-ledger
/// rankings, the regional trend, then four company rankings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ViewModelBundle {
    pub global_rankings: [ViewModel; 4],
    pub sales_evolution: ViewModel,
    pub company_rankings: [ViewModel; 4],
}

impl ViewModelBundle {
    pub const LEN: usize = 9;

    pub fn entries(&self) -> [&ViewModel; Self::LEN] {
        let [g0, g1, g2, g3] = &self.global_rankings;
        let [c0, c1, c2, c3] = &self.company_rankings;
        [g0, g1, g2, g3, &self.sales_evolution, c0, c1, c2, c3]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ViewModel> {
        self.entries().into_iter()
    }

    pub fn get(&self, id: &str) -> Option<&ViewModel> {
        self.iter().find(|vm| vm.id == id)
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(ViewModelBundle)
    }
}

/// Builds every view model for the given filter.
///
/// Whole-ledger rankings and the trend ignore `filter`; the trend is always a
/// cross-company view. Company rankings are placeholders while no company is
/// selected. A company with no rows yields empty rankings, not an error.
///
/// Never fails: a panel that cannot be computed (e.g. its column name no longer
/// exists) comes back empty with a `notice`, and the rest of the bundle is
/// unaffected.
pub fn compute_bundle(
    dataset: &Dataset,
    filter: &FilterContext,
    config: &DashboardConfig,
) -> ViewModelBundle {
    let all: Vec<&Record> = FilterContext::unfiltered().scope(dataset);
    let n = config.ranking_size;

    let global_rankings = config
        .global_panels
        .each_ref()
        .map(|panel| ranking_view(&all, panel, &config.metric, n, None));

    let sales_evolution = trend_view(&all, config);

    let company_rankings = match filter.company() {
        None => config
            .company_panels
            .each_ref()
            .map(|panel| ViewModel::placeholder(panel, &config.placeholder_title)),
        Some(company) => {
            let scoped = filter.scope(dataset);
            debug!("Company '{}' scopes {} of {} rows", company, scoped.len(), all.len());
            config
                .company_panels
                .each_ref()
                .map(|panel| ranking_view(&scoped, panel, &config.metric, n, Some(company)))
        }
    };

    ViewModelBundle {
        global_rankings,
        sales_evolution,
        company_rankings,
    }
}

fn ranking_view(
    records: &[&Record],
    panel: &RankingPanelConfig,
    metric: &str,
    n: usize,
    company: Option<&str>,
) -> ViewModel {
    match aggregation::rank_by_field(
        records.iter().copied(),
        &panel.group_by,
        metric,
        n,
        panel.direction,
    ) {
        Ok(ranking) => {
            debug!("Panel '{}': {} groups", panel.id, ranking.len());
            ViewModel::bar(panel, ranking, company)
        }
        Err(e) => {
            warn!("Panel '{}' degraded to an empty chart: {}", panel.id, e);
            ViewModel::degraded(
                &panel.id,
                &panel.title,
                company,
                ChartData::Bar { bars: Vec::new() },
                &e.to_string(),
            )
        }
    }
}

fn trend_view(records: &[&Record], config: &DashboardConfig) -> ViewModel {
    match config.metric.parse::<Metric>() {
        Ok(metric) => {
            let points = series_by_year_and_region(records.iter().copied(), metric);
            debug!("Trend '{}': {} points", config.trend_id, points.len());
            ViewModel {
                id: config.trend_id.clone(),
                title: config.trend_title.clone(),
                company: None,
                data: ChartData::Line { points },
                notice: None,
            }
        }
        Err(e) => {
            warn!("Trend '{}' degraded to an empty chart: {}", config.trend_id, e);
            ViewModel::degraded(
                &config.trend_id,
                &config.trend_title,
                None,
                ChartData::Line { points: Vec::new() },
                &e.to_string(),
            )
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DashboardState {
    #[default]
    Unfiltered,
    Filtered(String),
}

impl DashboardState {
    pub fn from_filter(filter: &FilterContext) -> Self {
        match filter.company() {
            Some(company) => DashboardState::Filtered(company.to_string()),
            None => DashboardState::Unfiltered,
        }
    }

    pub fn filter(&self) -> FilterContext {
        match self {
            DashboardState::Unfiltered => FilterContext::unfiltered(),
            DashboardState::Filtered(company) => FilterContext::new(Some(company)),
        }
    }
}

/// Drives one UI session: holds the session's state and recomputes the full
/// bundle on every selection event.
///
/// The dataset and configuration are shared read-only handles, so any number of
/// dispatchers can serve concurrent sessions from the same load.
#[derive(Debug, Clone)]
pub struct ViewModelDispatcher {
    dataset: Dataset,
    config: Arc<DashboardConfig>,
    state: DashboardState,
}

impl ViewModelDispatcher {
    pub fn new(dataset: Dataset, config: Arc<DashboardConfig>) -> Self {
        Self {
            dataset,
            config,
            state: DashboardState::Unfiltered,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Companies to offer in the selector.
    pub fn companies(&self) -> Vec<&str> {
        self.dataset.companies()
    }

    /// Enters the initial unfiltered state and emits its bundle.
    pub fn start(&mut self) -> ViewModelBundle {
        self.state = DashboardState::Unfiltered;
        info!("Dashboard session started over {} rows", self.dataset.len());
        self.render()
    }

    /// Handles a selector event. `None` (or an empty selection) clears the filter.
    pub fn select_company(&mut self, company: Option<&str>) -> ViewModelBundle {
        let next = DashboardState::from_filter(&FilterContext::new(company));
        info!("Dashboard state {:?} -> {:?}", self.state, next);
        self.state = next;
        self.render()
    }

    pub fn clear_selection(&mut self) -> ViewModelBundle {
        self.select_company(None)
    }

    /// Recomputes the bundle for the current state.
    pub fn render(&self) -> ViewModelBundle {
        compute_bundle(&self.dataset, &self.state.filter(), &self.config)
    }
}
