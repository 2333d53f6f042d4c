//! Search and filter logic for narrowing the board
//!
//! An assessment stays on the board when it matches the free-text search
//! (name or vendor, case-insensitive substring) and the selected filter
//! value (status, priority or risk level).

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use unicase::UniCase;

use crate::types::Assessment;

/// The filter dropdown selection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectedFilter {
    /// No filtering
    #[default]
    All,
    /// A concrete status, priority or risk-level value
    Value(String),
}

impl SelectedFilter {
    pub fn value(value: impl Into<String>) -> Self {
        SelectedFilter::Value(value.into())
    }

    /// Whether the assessment's status, priority or risk level equals the value
    pub fn matches(&self, assessment: &Assessment) -> bool {
        match self {
            SelectedFilter::All => true,
            SelectedFilter::Value(value) => {
                let wanted = UniCase::new(value.as_str());
                wanted == UniCase::new(assessment.status.as_str())
                    || wanted == UniCase::new(assessment.priority.as_str())
                    || assessment
                        .risk_level
                        .is_some_and(|risk| wanted == UniCase::new(risk.as_str()))
            }
        }
    }
}

impl FromStr for SelectedFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || UniCase::new(s) == UniCase::new("all") {
            Ok(SelectedFilter::All)
        } else {
            Ok(SelectedFilter::Value(s.to_string()))
        }
    }
}

impl From<&str> for SelectedFilter {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(filter) => filter,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for SelectedFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectedFilter::All => f.write_str("all"),
            SelectedFilter::Value(value) => f.write_str(value),
        }
    }
}

/// Whether the assessment name or vendor name contains the search term.
///
/// An empty term matches everything.
pub fn matches_search(assessment: &Assessment, search_term: &str) -> bool {
    if search_term.is_empty() {
        return true;
    }

    let needle = search_term.to_lowercase();
    assessment.assessment_name.to_lowercase().contains(&needle)
        || assessment
            .vendor_name
            .as_deref()
            .is_some_and(|vendor| vendor.to_lowercase().contains(&needle))
}

/// Filter assessments by search term and selected filter, preserving order
pub fn filter_assessments<'a>(
    assessments: &'a [Assessment],
    search_term: &str,
    selected: &SelectedFilter,
) -> Vec<&'a Assessment> {
    if search_term.is_empty() && *selected == SelectedFilter::All {
        return assessments.iter().collect();
    }

    assessments
        .iter()
        .filter(|a| matches_search(a, search_term) && selected.matches(a))
        .collect()
}
