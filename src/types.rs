use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::enum_str;
use crate::error::BoardError;

/// Opaque assessment identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssessmentId(String);

impl AssessmentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssessmentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for AssessmentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Lifecycle status of an assessment; each value is one board column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    Draft,
    Sent,
    InProgress,
    Completed,
    Approved,
    Rejected,
    Expired,
}

enum_str!(AssessmentStatus, BoardError::InvalidStatus, {
    Draft => "draft",
    Sent => "sent",
    InProgress => "in_progress",
    Completed => "completed",
    Approved => "approved",
    Rejected => "rejected",
    Expired => "expired",
});

impl AssessmentStatus {
    /// Statuses where the assessment lifecycle has concluded
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AssessmentStatus::Approved | AssessmentStatus::Rejected | AssessmentStatus::Expired
        )
    }
}

pub const VALID_STATUSES: &[&str] = &[
    "draft",
    "sent",
    "in_progress",
    "completed",
    "approved",
    "rejected",
    "expired",
];

/// A status as read from the repository.
///
/// Records with a status outside the seven lifecycle values still load; they
/// are kept as `Unknown` and simply land in no column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatusValue {
    Known(AssessmentStatus),
    Unknown(String),
}

impl StatusValue {
    pub fn known(&self) -> Option<AssessmentStatus> {
        match self {
            StatusValue::Known(status) => Some(*status),
            StatusValue::Unknown(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            StatusValue::Known(status) => status.as_str(),
            StatusValue::Unknown(raw) => raw,
        }
    }
}

impl From<AssessmentStatus> for StatusValue {
    fn from(status: AssessmentStatus) -> Self {
        StatusValue::Known(status)
    }
}

impl From<String> for StatusValue {
    fn from(raw: String) -> Self {
        match raw.parse::<AssessmentStatus>() {
            Ok(status) => StatusValue::Known(status),
            Err(_) => StatusValue::Unknown(raw),
        }
    }
}

impl From<StatusValue> for String {
    fn from(value: StatusValue) -> Self {
        match value {
            StatusValue::Known(status) => status.as_str().to_string(),
            StatusValue::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for StatusValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

enum_str!(Priority, BoardError::InvalidPriority, {
    Low => "low",
    Medium => "medium",
    High => "high",
    Urgent => "urgent",
});

impl Priority {
    /// High and urgent assessments are counted in column stats
    pub fn is_high(&self) -> bool {
        match self {
            Priority::High | Priority::Urgent => true,
            Priority::Low | Priority::Medium => false,
        }
    }
}

pub const VALID_PRIORITIES: &[&str] = &["low", "medium", "high", "urgent"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

enum_str!(RiskLevel, BoardError::InvalidRiskLevel, {
    Low => "low",
    Medium => "medium",
    High => "high",
    Critical => "critical",
});

pub const VALID_RISK_LEVELS: &[&str] = &["low", "medium", "high", "critical"];

/// A vendor risk-evaluation record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: AssessmentId,

    pub assessment_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_name: Option<String>,

    pub status: StatusValue,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Date>,

    #[serde(default)]
    pub progress_percentage: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_score: Option<f64>,
}

impl Assessment {
    /// Create a record with the given id, name and status; other fields default
    pub fn new(
        id: impl Into<AssessmentId>,
        assessment_name: impl Into<String>,
        status: AssessmentStatus,
    ) -> Self {
        Self {
            id: id.into(),
            assessment_name: assessment_name.into(),
            vendor_name: None,
            status: StatusValue::Known(status),
            priority: Priority::default(),
            risk_level: None,
            assessment_type: None,
            due_date: None,
            progress_percentage: 0,
            overall_score: None,
        }
    }

    /// The lifecycle status, if it is one of the seven column values
    pub fn known_status(&self) -> Option<AssessmentStatus> {
        self.status.known()
    }
}

/// Partial update sent to the repository
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AssessmentStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_percentage: Option<u8>,
}

impl AssessmentUpdate {
    pub fn status(status: AssessmentStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.priority.is_none() && self.progress_percentage.is_none()
    }

    /// Apply the present fields onto a record
    pub fn apply_to(&self, assessment: &mut Assessment) {
        if let Some(status) = self.status {
            assessment.status = StatusValue::Known(status);
        }
        if let Some(priority) = self.priority {
            assessment.priority = priority;
        }
        if let Some(progress) = self.progress_percentage {
            assessment.progress_percentage = progress;
        }
    }
}
