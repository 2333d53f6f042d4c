//! Per-column statistics for board headers

use jiff::civil::{DateTime, Time};
use serde::Serialize;

use super::columns::{COLUMN_COUNT, COLUMNS, ColumnBuckets, column_index};
use crate::types::{Assessment, AssessmentStatus};

/// Counts shown in a column header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ColumnStats {
    pub total: usize,
    pub high_priority: usize,
    pub overdue: usize,
}

impl ColumnStats {
    /// Compute stats for one column's contents
    pub fn compute<'a, I>(bucket: I, now: DateTime) -> Self
    where
        I: IntoIterator<Item = &'a Assessment>,
    {
        bucket
            .into_iter()
            .fold(ColumnStats::default(), |mut stats, assessment| {
                stats.total += 1;
                if assessment.priority.is_high() {
                    stats.high_priority += 1;
                }
                if is_overdue(assessment, now) {
                    stats.overdue += 1;
                }
                stats
            })
    }
}

/// Whether the due date has passed.
///
/// The due date counts from the start of its day, so an assessment due today
/// is overdue once `now` is past midnight. No due date is never overdue.
pub fn is_overdue(assessment: &Assessment, now: DateTime) -> bool {
    assessment
        .due_date
        .is_some_and(|due| due.to_datetime(Time::midnight()) < now)
}

/// Stats for every column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardStats {
    columns: [ColumnStats; COLUMN_COUNT],
}

impl BoardStats {
    pub fn compute(buckets: &ColumnBuckets<'_>, now: DateTime) -> Self {
        let mut stats = BoardStats::default();
        for (column, bucket) in buckets.iter() {
            stats.columns[column_index(column.id)] =
                ColumnStats::compute(bucket.iter().copied(), now);
        }
        stats
    }

    /// Get stats for a specific status
    pub fn for_status(&self, status: AssessmentStatus) -> ColumnStats {
        self.columns[column_index(status)]
    }

    /// Stats paired with their status, in board order
    pub fn iter(&self) -> impl Iterator<Item = (AssessmentStatus, ColumnStats)> + '_ {
        COLUMNS
            .iter()
            .map(|column| (column.id, self.for_status(column.id)))
    }

    /// Sum of column totals
    pub fn total(&self) -> usize {
        self.columns.iter().map(|s| s.total).sum()
    }

    pub fn high_priority(&self) -> usize {
        self.columns.iter().map(|s| s.high_priority).sum()
    }

    pub fn overdue(&self) -> usize {
        self.columns.iter().map(|s| s.overdue).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::columns::group_by_column;
    use crate::types::Priority;
    use jiff::civil::date;

    fn now() -> DateTime {
        date(2025, 6, 15).at(10, 30, 0, 0)
    }

    fn make(id: &str, priority: Priority, due: Option<jiff::civil::Date>) -> Assessment {
        Assessment {
            priority,
            due_date: due,
            ..Assessment::new(id, id, AssessmentStatus::InProgress)
        }
    }

    #[test]
    fn test_column_stats_counts() {
        let bucket = vec![
            make("a-1", Priority::Urgent, Some(date(2025, 6, 1))),
            make("a-2", Priority::High, None),
            make("a-3", Priority::Low, Some(date(2025, 7, 1))),
            make("a-4", Priority::Medium, Some(date(2025, 6, 14))),
        ];
        let stats = ColumnStats::compute(&bucket, now());
        assert_eq!(
            stats,
            ColumnStats {
                total: 4,
                high_priority: 2,
                overdue: 2,
            }
        );
    }

    #[test]
    fn test_empty_bucket() {
        assert_eq!(ColumnStats::compute(&[], now()), ColumnStats::default());
    }

    #[test]
    fn test_overdue_is_strict() {
        let due_tomorrow = make("a-1", Priority::Low, Some(date(2025, 6, 16)));
        let due_yesterday = make("a-2", Priority::Low, Some(date(2025, 6, 14)));
        let no_due = make("a-3", Priority::Low, None);

        assert!(!is_overdue(&due_tomorrow, now()));
        assert!(is_overdue(&due_yesterday, now()));
        assert!(!is_overdue(&no_due, now()));

        // Exactly at the start of the due day is not yet overdue
        let at_midnight = date(2025, 6, 14).at(0, 0, 0, 0);
        assert!(!is_overdue(&due_yesterday, at_midnight));
    }

    #[test]
    fn test_board_stats_totals() {
        let records = vec![
            Assessment::new("a-1", "One", AssessmentStatus::Draft),
            Assessment::new("a-2", "Two", AssessmentStatus::Draft),
            make("a-3", Priority::High, Some(date(2025, 1, 1))),
        ];
        let buckets = group_by_column(&records);
        let stats = BoardStats::compute(&buckets, now());

        assert_eq!(stats.for_status(AssessmentStatus::Draft).total, 2);
        assert_eq!(stats.for_status(AssessmentStatus::InProgress).overdue, 1);
        assert_eq!(stats.for_status(AssessmentStatus::Expired), ColumnStats::default());
        assert_eq!(stats.total(), 3);
        assert_eq!(stats.high_priority(), 1);
        assert_eq!(stats.overdue(), 1);
        assert_eq!(stats.iter().count(), 7);
    }
}
