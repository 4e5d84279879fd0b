use crate::schema::{Dataset, Record};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The active company selection. `None` means the whole ledger is in view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterContext {
    pub selected_company: Option<String>,
}

impl FilterContext {
    /// Builds a context from a selector value. An empty selection counts as no
    /// selection, as a cleared dropdown reports it.
    pub fn new(selected_company: Option<&str>) -> Self {
        Self {
            selected_company: selected_company
                .filter(|company| !company.is_empty())
                .map(str::to_string),
        }
    }

    pub fn unfiltered() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.selected_company.is_some()
    }

    pub fn company(&self) -> Option<&str> {
        self.selected_company.as_deref()
    }

    /// Records in view under this context, in dataset order.
    ///
    /// Matching is exact (case-sensitive, untrimmed). A company that is absent from
    /// the dataset scopes it to nothing.
    pub fn scope<'a>(&self, dataset: &'a Dataset) -> Vec<&'a Record> {
        match self.company() {
            None => dataset.iter().collect(),
            Some(company) => dataset.iter().filter(|r| r.company == company).collect(),
        }
    }
}

/// Distinct company identifiers in first-appearance order, for populating a
/// selector.
pub fn distinct_companies(dataset: &Dataset) -> Vec<&str> {
    let mut seen = HashSet::new();
    dataset
        .iter()
        .map(|r| r.company.as_str())
        .filter(|company| seen.insert(*company))
        .collect()
}
