//! The seven fixed lifecycle columns and grouping into them

use crate::types::{Assessment, AssessmentStatus};

/// Number of board columns
pub const COLUMN_COUNT: usize = 7;

/// A static column descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Status this column represents
    pub id: AssessmentStatus,
    /// Display name of the column
    pub title: &'static str,
    /// One-line explanation shown under the title
    pub description: &'static str,
}

/// The board columns in lifecycle order
pub static COLUMNS: [Column; COLUMN_COUNT] = [
    Column {
        id: AssessmentStatus::Draft,
        title: "Draft",
        description: "Assessments being prepared",
    },
    Column {
        id: AssessmentStatus::Sent,
        title: "Sent",
        description: "Sent to the vendor, awaiting a response",
    },
    Column {
        id: AssessmentStatus::InProgress,
        title: "In Progress",
        description: "Vendor is completing the questionnaire",
    },
    Column {
        id: AssessmentStatus::Completed,
        title: "Completed",
        description: "Responses submitted, pending review",
    },
    Column {
        id: AssessmentStatus::Approved,
        title: "Approved",
        description: "Review finished, vendor approved",
    },
    Column {
        id: AssessmentStatus::Rejected,
        title: "Rejected",
        description: "Review finished, vendor rejected",
    },
    Column {
        id: AssessmentStatus::Expired,
        title: "Expired",
        description: "Response window lapsed",
    },
];

/// Position of a status's column on the board
pub fn column_index(status: AssessmentStatus) -> usize {
    match status {
        AssessmentStatus::Draft => 0,
        AssessmentStatus::Sent => 1,
        AssessmentStatus::InProgress => 2,
        AssessmentStatus::Completed => 3,
        AssessmentStatus::Approved => 4,
        AssessmentStatus::Rejected => 5,
        AssessmentStatus::Expired => 6,
    }
}

/// Descriptor for a status's column
pub fn column_for(status: AssessmentStatus) -> &'static Column {
    &COLUMNS[column_index(status)]
}

/// Assessments partitioned into the seven columns
#[derive(Debug, Clone)]
pub struct ColumnBuckets<'a> {
    buckets: [Vec<&'a Assessment>; COLUMN_COUNT],
}

impl<'a> ColumnBuckets<'a> {
    /// Contents of one column, in input order
    pub fn get(&self, status: AssessmentStatus) -> &[&'a Assessment] {
        &self.buckets[column_index(status)]
    }

    /// Columns paired with their contents, in board order
    pub fn iter(&self) -> impl Iterator<Item = (&'static Column, &[&'a Assessment])> + '_ {
        COLUMNS
            .iter()
            .zip(self.buckets.iter())
            .map(|(column, bucket)| (column, bucket.as_slice()))
    }

    /// Number of assessments across all columns
    pub fn total(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }
}

/// Group assessments by status column.
///
/// Relative order within a column follows the input. Assessments whose status
/// is not one of the seven lifecycle values are left out.
pub fn group_by_column<'a, I>(assessments: I) -> ColumnBuckets<'a>
where
    I: IntoIterator<Item = &'a Assessment>,
{
    let mut buckets: [Vec<&'a Assessment>; COLUMN_COUNT] = std::array::from_fn(|_| Vec::new());
    for assessment in assessments {
        match assessment.known_status() {
            Some(status) => buckets[column_index(status)].push(assessment),
            None => tracing::debug!(
                "assessment {} has unrecognized status '{}', not placed on the board",
                assessment.id,
                assessment.status
            ),
        }
    }
    ColumnBuckets { buckets }
}
