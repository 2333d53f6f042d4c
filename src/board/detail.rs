//! Read-only assessment detail

use std::fmt;

use jiff::civil::Date;
use serde::Serialize;

use super::columns::column_for;
use crate::types::{Assessment, AssessmentId, Priority, RiskLevel};

/// Summary shown when a card is opened
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentDetail {
    pub id: AssessmentId,
    pub assessment_name: String,
    pub vendor_name: Option<String>,
    pub assessment_type: Option<String>,
    /// Column title, or the raw value for an unrecognized status
    pub status: String,
    pub priority: Priority,
    pub risk_level: Option<RiskLevel>,
    pub due_date: Option<Date>,
    pub progress_percentage: u8,
    pub overall_score: Option<f64>,
}

impl From<&Assessment> for AssessmentDetail {
    fn from(assessment: &Assessment) -> Self {
        let status = match assessment.known_status() {
            Some(status) => column_for(status).title.to_string(),
            None => assessment.status.to_string(),
        };
        Self {
            id: assessment.id.clone(),
            assessment_name: assessment.assessment_name.clone(),
            vendor_name: assessment.vendor_name.clone(),
            assessment_type: assessment.assessment_type.clone(),
            status,
            priority: assessment.priority,
            risk_level: assessment.risk_level,
            due_date: assessment.due_date,
            progress_percentage: assessment.progress_percentage,
            overall_score: assessment.overall_score,
        }
    }
}

fn or_dash<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

impl fmt::Display for AssessmentDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.assessment_name, self.id)?;
        writeln!(f, "Vendor:    {}", or_dash(self.vendor_name.as_deref()))?;
        writeln!(f, "Type:      {}", or_dash(self.assessment_type.as_deref()))?;
        writeln!(f, "Status:    {}", self.status)?;
        writeln!(f, "Priority:  {}", self.priority)?;
        writeln!(f, "Risk:      {}", or_dash(self.risk_level))?;
        writeln!(f, "Due date:  {}", or_dash(self.due_date))?;
        writeln!(f, "Progress:  {}%", self.progress_percentage)?;
        match self.overall_score {
            Some(score) => write!(f, "Score:     {score:.1} / 5.0"),
            None => write!(f, "Score:     -"),
        }
    }
}
