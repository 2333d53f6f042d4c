//! Mock data builders for creating test assessments.
//!
//! This module provides builder patterns for creating test data without
//! needing to read from disk.

use jiff::civil::Date;
use vendor_board::types::{
    Assessment, AssessmentId, AssessmentStatus, Priority, RiskLevel, StatusValue,
};

/// Builder for creating test assessments
pub struct AssessmentBuilder {
    assessment: Assessment,
}

impl AssessmentBuilder {
    /// Create a new draft assessment builder with the given ID
    pub fn new(id: &str) -> Self {
        Self {
            assessment: Assessment::new(id, format!("Assessment {id}"), AssessmentStatus::Draft),
        }
    }

    /// Set the assessment name
    pub fn name(mut self, name: &str) -> Self {
        self.assessment.assessment_name = name.to_string();
        self
    }

    /// Set the vendor name
    pub fn vendor(mut self, vendor: &str) -> Self {
        self.assessment.vendor_name = Some(vendor.to_string());
        self
    }

    /// Set the status
    pub fn status(mut self, status: AssessmentStatus) -> Self {
        self.assessment.status = StatusValue::Known(status);
        self
    }

    /// Set a status string that is not one of the lifecycle values
    pub fn raw_status(mut self, status: &str) -> Self {
        self.assessment.status = StatusValue::Unknown(status.to_string());
        self
    }

    /// Set the priority
    pub fn priority(mut self, priority: Priority) -> Self {
        self.assessment.priority = priority;
        self
    }

    /// Set the risk level
    pub fn risk(mut self, risk: RiskLevel) -> Self {
        self.assessment.risk_level = Some(risk);
        self
    }

    /// Set the due date
    pub fn due(mut self, date: Date) -> Self {
        self.assessment.due_date = Some(date);
        self
    }

    /// Set the progress percentage
    pub fn progress(mut self, progress: u8) -> Self {
        self.assessment.progress_percentage = progress;
        self
    }

    /// Build the assessment
    pub fn build(self) -> Assessment {
        self.assessment
    }
}

/// Create a simple assessment with just ID and status
pub fn make_assessment(id: &str, status: AssessmentStatus) -> Assessment {
    AssessmentBuilder::new(id).status(status).build()
}

/// Assessments with the given number of records per status, in board order
pub fn assessments_with_counts(counts: &[(AssessmentStatus, usize)]) -> Vec<Assessment> {
    let mut next = 0;
    let mut records = Vec::new();
    for (status, count) in counts {
        for _ in 0..*count {
            next += 1;
            records.push(make_assessment(&format!("a-{next}"), *status));
        }
    }
    records
}

/// Shorthand for an assessment ID
pub fn id(value: &str) -> AssessmentId {
    AssessmentId::new(value)
}
