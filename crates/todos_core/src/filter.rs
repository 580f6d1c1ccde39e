//! Derives the visible subset of the task list.
//!
//! Everything here is a pure function of its inputs; callers recompute on
//! every read instead of holding on to the result.

use crate::model::{Filter, Task};

/// Tasks matching `filter`, in list order.
pub fn visible(tasks: &[Task], filter: Filter) -> Vec<&Task> {
    tasks.iter().filter(|task| filter.matches(task)).collect()
}

pub fn active_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|task| task.is_active()).count()
}

pub fn completed_count(tasks: &[Task]) -> usize {
    tasks.len() - active_count(tasks)
}

/// Footer text for the number of active tasks, e.g. `1 item left`.
pub fn items_left_label(active: usize) -> String {
    let noun = if active == 1 { "item" } else { "items" };
    format!("{active} {noun} left")
}

#[cfg(test)]
mod tests {
    use super::{active_count, completed_count, items_left_label, visible};
    use crate::model::{Filter, Task};
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn task(id: u64, text: &str, completed: bool) -> Task {
        Task {
            id,
            text: text.to_string(),
            completed,
        }
    }

    fn ids(tasks: &[&Task]) -> Vec<u64> {
        tasks.iter().map(|task| task.id).collect()
    }

    #[test]
    fn visible_keeps_list_order_for_each_filter() {
        let tasks = vec![
            task(1, "a", false),
            task(2, "b", true),
            task(3, "c", false),
            task(4, "d", true),
        ];

        assert_eq!(ids(&visible(&tasks, Filter::All)), vec![1, 2, 3, 4]);
        assert_eq!(ids(&visible(&tasks, Filter::Active)), vec![1, 3]);
        assert_eq!(ids(&visible(&tasks, Filter::Completed)), vec![2, 4]);
    }

    #[test]
    fn visible_is_idempotent() {
        let tasks = vec![task(1, "a", true), task(2, "b", false)];
        let first = ids(&visible(&tasks, Filter::Active));
        let second = ids(&visible(&tasks, Filter::Active));
        assert_eq!(first, second);
    }

    #[test]
    fn visible_on_empty_list_is_empty() {
        for filter in Filter::ALL {
            assert!(visible(&[], filter).is_empty());
        }
    }

    #[test]
    fn counts_split_active_and_completed() {
        let tasks = vec![task(1, "a", false), task(2, "b", true), task(3, "c", true)];
        assert_eq!(active_count(&tasks), 1);
        assert_eq!(completed_count(&tasks), 2);
    }

    #[test]
    fn items_left_label_uses_singular_only_for_one() {
        assert_eq!(items_left_label(0), "0 items left");
        assert_eq!(items_left_label(1), "1 item left");
        assert_eq!(items_left_label(2), "2 items left");
    }

    proptest! {
        #[test]
        fn active_and_completed_partition_all(flags in proptest::collection::vec(any::<bool>(), 0..40)) {
            let tasks: Vec<Task> = flags
                .iter()
                .enumerate()
                .map(|(index, completed)| task(index as u64, "t", *completed))
                .collect();

            let all: HashSet<u64> = ids(&visible(&tasks, Filter::All)).into_iter().collect();
            let active: HashSet<u64> = ids(&visible(&tasks, Filter::Active)).into_iter().collect();
            let completed: HashSet<u64> =
                ids(&visible(&tasks, Filter::Completed)).into_iter().collect();

            prop_assert!(active.is_disjoint(&completed));
            let union: HashSet<u64> = active.union(&completed).copied().collect();
            prop_assert_eq!(union, all);
            prop_assert_eq!(active.len(), active_count(&tasks));
        }
    }
}
