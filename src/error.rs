use thiserror::Error;

/// Why an encoded `"<month>.<year>"` period could not be normalized.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodError {
    #[error("missing separator")]
    MissingSeparator,

    #[error("invalid month")]
    InvalidMonth,

    #[error("invalid year")]
    InvalidYear,
}

#[derive(Error, Debug)]
pub enum SalesDashboardError {
    #[error("{}", describe_parse(.row, .period, .kind))]
    Parse {
        row: Option<usize>,
        period: String,
        kind: PeriodError,
    },

    #[error("Row {row}: net sales must be a finite number, got {value}")]
    InvalidAmount { row: usize, value: f64 },

    #[error("Unknown field '{0}'")]
    UnknownField(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_parse(row: &Option<usize>, period: &str, kind: &PeriodError) -> String {
    match row {
        Some(row) => format!("Row {}: cannot parse period '{}': {}", row, period, kind),
        None => format!("Cannot parse period '{}': {}", period, kind),
    }
}

impl SalesDashboardError {
    /// The period failure kind, if this is a parse error.
    pub fn period_error(&self) -> Option<PeriodError> {
        match self {
            Self::Parse { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SalesDashboardError>;
