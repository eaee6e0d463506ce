//! Progress Aggregation
//!
//! Packed/total tallies per category and overall, always recomputed from the
//! full row set.

use crate::models::{CategoryGroup, ItemRow};
use crate::view_model::find_row;

/// Bootstrap class for a finished group
pub const COMPLETE_CLASS: &str = "bg-success";
/// Bootstrap class for a group still being packed
pub const IN_PROGRESS_CLASS: &str = "bg-primary";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressState {
    Complete,
    InProgress,
}

impl ProgressState {
    /// Class to add
    pub fn class(&self) -> &'static str {
        match self {
            ProgressState::Complete => COMPLETE_CLASS,
            ProgressState::InProgress => IN_PROGRESS_CLASS,
        }
    }

    /// Class to remove
    pub fn opposite_class(&self) -> &'static str {
        match self {
            ProgressState::Complete => IN_PROGRESS_CLASS,
            ProgressState::InProgress => COMPLETE_CLASS,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub packed: usize,
    pub total: usize,
}

impl Tally {
    pub fn count<'a>(rows: impl IntoIterator<Item = &'a ItemRow>) -> Self {
        rows.into_iter().fold(Tally::default(), |mut tally, row| {
            tally.total += 1;
            if row.packed {
                tally.packed += 1;
            }
            tally
        })
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.packed == self.total
    }

    pub fn state(&self) -> ProgressState {
        if self.is_complete() {
            ProgressState::Complete
        } else {
            ProgressState::InProgress
        }
    }

    /// Share of packed rows, 0 for an empty list
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.packed as f64 / self.total as f64 * 100.0
        }
    }

    pub fn label(&self) -> String {
        format!("{}/{}", self.packed, self.total)
    }

    pub fn summary_label(&self) -> String {
        format!("{}/{} items packed", self.packed, self.total)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTally {
    pub category_id: String,
    pub tally: Tally,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressReport {
    pub categories: Vec<CategoryTally>,
    pub overall: Tally,
}

pub fn summarize(rows: &[ItemRow], categories: &[CategoryGroup]) -> ProgressReport {
    let categories = categories
        .iter()
        .map(|group| CategoryTally {
            category_id: group.id.clone(),
            tally: Tally::count(group.members.iter().filter_map(|key| find_row(rows, *key))),
        })
        .collect();

    ProgressReport {
        categories,
        overall: Tally::count(rows),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemKey;

    fn row(item_id: u32, packed: bool) -> ItemRow {
        ItemRow::new(ItemKey::new(7, item_id), packed)
    }

    fn group(id: &str, item_ids: &[u32]) -> CategoryGroup {
        CategoryGroup {
            id: id.to_string(),
            members: item_ids.iter().map(|i| ItemKey::new(7, *i)).collect(),
        }
    }

    #[test]
    fn test_counts_match_checked_boxes() {
        let rows = vec![row(1, true), row(2, false), row(3, true), row(4, true)];
        let categories = vec![group("clothes", &[1, 2]), group("toiletries", &[3, 4])];

        let report = summarize(&rows, &categories);

        assert_eq!(report.overall, Tally { packed: 3, total: 4 });
        assert_eq!(report.categories[0].category_id, "clothes");
        assert_eq!(report.categories[0].tally, Tally { packed: 1, total: 2 });
        assert_eq!(report.categories[0].tally.state(), ProgressState::InProgress);
        assert_eq!(report.categories[1].tally, Tally { packed: 2, total: 2 });
        assert_eq!(report.categories[1].tally.state(), ProgressState::Complete);
    }

    #[test]
    fn test_empty_list() {
        let report = summarize(&[], &[group("empty", &[])]);

        assert_eq!(report.overall, Tally::default());
        assert_eq!(report.overall.percentage(), 0.0);
        assert_eq!(report.overall.state(), ProgressState::InProgress);
        assert_eq!(report.categories[0].tally.state(), ProgressState::InProgress);
        assert_eq!(report.overall.summary_label(), "0/0 items packed");
    }

    #[test]
    fn test_state_classes_are_exclusive() {
        for state in [ProgressState::Complete, ProgressState::InProgress] {
            assert_ne!(state.class(), state.opposite_class());
        }
        assert_eq!(ProgressState::Complete.class(), "bg-success");
        assert_eq!(ProgressState::InProgress.class(), "bg-primary");
    }

    #[test]
    fn test_percentage_and_labels() {
        let tally = Tally { packed: 1, total: 4 };
        assert_eq!(tally.percentage(), 25.0);
        assert_eq!(tally.label(), "1/4");
        assert_eq!(tally.summary_label(), "1/4 items packed");
        assert_eq!(Tally { packed: 4, total: 4 }.percentage(), 100.0);
    }

    #[test]
    fn test_rows_outside_categories_count_overall() {
        let rows = vec![row(1, true), row(2, true)];
        let report = summarize(&rows, &[group("clothes", &[1])]);

        assert_eq!(report.categories[0].tally, Tally { packed: 1, total: 1 });
        assert_eq!(report.overall, Tally { packed: 2, total: 2 });
        assert!(report.overall.is_complete());
    }

    #[test]
    fn test_recompute_after_flip() {
        use crate::view_model::flip_packed;

        let mut rows = vec![row(41, true), row(42, false)];
        let categories = vec![group("gear", &[41, 42])];
        assert_eq!(summarize(&rows, &categories).overall.packed, 1);

        flip_packed(&mut rows, ItemKey::new(7, 42));
        let report = summarize(&rows, &categories);
        assert_eq!(report.overall.summary_label(), "2/2 items packed");
        assert_eq!(report.categories[0].tally.state(), ProgressState::Complete);
    }
}
