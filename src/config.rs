use crate::error::{Result, SalesDashboardError};
use crate::schema::Direction;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RankingPanelConfig {
    #[schemars(description = "Stable identifier of the chart slot, e.g. 'top_10_products'")]
    pub id: String,

    #[schemars(description = "Chart title shown to the user")]
    pub title: String,

    #[schemars(
        description = "Ledger column to group by: 'Product', 'Customer', 'Company' or 'Region'. An unknown column degrades the panel to an empty chart with a notice."
    )]
    pub group_by: String,

    #[schemars(description = "'top' for largest totals first, 'bottom' for smallest first")]
    pub direction: Direction,
}

impl RankingPanelConfig {
    pub fn new(id: &str, title: &str, group_by: &str, direction: Direction) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            group_by: group_by.to_string(),
            direction,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DashboardConfig {
    #[schemars(description = "How many groups each ranking shows (N in top-N / bottom-N). Must be at least 1.")]
    pub ranking_size: usize,

    #[schemars(description = "Ledger column summed by every panel, normally 'Net Sales'")]
    pub metric: String,

    #[schemars(description = "Title of the placeholder chart shown in company panels while no company is selected")]
    pub placeholder_title: String,

    pub trend_id: String,

    pub trend_title: String,

    #[schemars(description = "Exactly four rankings over the whole ledger")]
    pub global_panels: [RankingPanelConfig; 4],

    #[schemars(description = "Exactly four rankings over the selected company's rows")]
    pub company_panels: [RankingPanelConfig; 4],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            ranking_size: 10,
            metric: "Net Sales".to_string(),
            placeholder_title: "Select a Company".to_string(),
            trend_id: "sales_evolution_region".to_string(),
            trend_title: "Sales Evolution by Region".to_string(),
            global_panels: [
                RankingPanelConfig::new("top_10_products", "Top 10 Products", "Product", Direction::Top),
                RankingPanelConfig::new("bottom_10_products", "Bottom 10 Products", "Product", Direction::Bottom),
                RankingPanelConfig::new("top_10_clients", "Top 10 Clients", "Customer", Direction::Top),
                RankingPanelConfig::new("bottom_10_clients", "Bottom 10 Clients", "Customer", Direction::Bottom),
            ],
            company_panels: [
                RankingPanelConfig::new(
                    "top_10_products_company",
                    "Top 10 Products (Company)",
                    "Product",
                    Direction::Top,
                ),
                RankingPanelConfig::new(
                    "bottom_10_products_company",
                    "Bottom 10 Products (Company)",
                    "Product",
                    Direction::Bottom,
                ),
                RankingPanelConfig::new(
                    "top_10_clients_company",
                    "Top 10 Clients (Company)",
                    "Customer",
                    Direction::Top,
                ),
                RankingPanelConfig::new(
                    "bottom_10_clients_company",
                    "Bottom 10 Clients (Company)",
                    "Customer",
                    Direction::Bottom,
                ),
            ],
        }
    }
}

impl DashboardConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Column names are not checked here; a bad one only degrades its own panel
    /// when the dashboard is recomputed.
    pub fn validate(&self) -> Result<()> {
        if self.ranking_size == 0 {
            return Err(SalesDashboardError::InvalidConfig(
                "ranking_size must be at least 1".to_string(),
            ));
        }

        if self.metric.trim().is_empty() {
            return Err(SalesDashboardError::InvalidConfig(
                "metric must name a ledger column".to_string(),
            ));
        }

        Ok(())
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(DashboardConfig)
    }

    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}
