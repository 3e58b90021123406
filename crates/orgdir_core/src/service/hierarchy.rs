//! Activity hierarchy resolution.
//!
//! # Invariants
//! - The start activity is always part of the result.
//! - Traversal stops after `max_levels` levels (start = level 1) and never
//!   revisits an activity, so it ends on over-deep or cyclic data and returns
//!   what it reached.
//! - One `get_children` call per expanded activity; no batching.

use crate::model::activity::{ActivityId, MAX_ACTIVITY_LEVEL};
use crate::repo::activity_repo::ActivityRepository;
use crate::service::error::{DirectoryError, DirectoryResult, EntityKind};
use log::{debug, warn};
use std::collections::BTreeSet;

/// Expansion depth that covers a complete taxonomy branch.
pub const FULL_HIERARCHY_LEVELS: u8 = MAX_ACTIVITY_LEVEL;

/// Returns `root_id` plus all of its descendants.
///
/// # Errors
/// - `NotFound` when `root_id` does not exist.
pub fn resolve_descendants<R: ActivityRepository + ?Sized>(
    repo: &R,
    root_id: ActivityId,
) -> DirectoryResult<BTreeSet<ActivityId>> {
    resolve_descendants_within(repo, root_id, FULL_HIERARCHY_LEVELS)
}

/// Returns `root_id` plus descendants down to `max_levels` levels, counting
/// `root_id` itself as the first level.
///
/// # Errors
/// - `Validation` on `level` when `max_levels` is outside `1..=3`.
/// - `NotFound` when `root_id` does not exist.
pub fn resolve_descendants_within<R: ActivityRepository + ?Sized>(
    repo: &R,
    root_id: ActivityId,
    max_levels: u8,
) -> DirectoryResult<BTreeSet<ActivityId>> {
    if !(1..=MAX_ACTIVITY_LEVEL).contains(&max_levels) {
        return Err(DirectoryError::validation(
            "level",
            format!("level must be within [1, {MAX_ACTIVITY_LEVEL}], got {max_levels}"),
        ));
    }
    repo.get_activity(root_id)?
        .ok_or(DirectoryError::not_found(EntityKind::Activity, root_id))?;

    let mut resolved = BTreeSet::from([root_id]);
    let mut frontier = vec![root_id];
    for _ in 1..max_levels {
        let mut next = Vec::new();
        for parent_id in frontier {
            for child in repo.get_children(parent_id)? {
                if resolved.insert(child.id) {
                    next.push(child.id);
                } else {
                    warn!(
                        "event=activity_cycle_detected module=service status=warn root_id={} parent_id={} child_id={}",
                        root_id, parent_id, child.id
                    );
                }
            }
        }
        if next.is_empty() {
            break;
        }
        frontier = next;
    }

    debug!(
        "event=activity_hierarchy_resolved module=service status=ok root_id={} max_levels={} count={}",
        root_id,
        max_levels,
        resolved.len()
    );
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::{resolve_descendants, resolve_descendants_within};
    use crate::model::activity::{Activity, ActivityId};
    use crate::repo::activity_repo::ActivityRepository;
    use crate::repo::RepoResult;
    use crate::service::error::{DirectoryError, EntityKind};
    use std::cell::{Cell, RefCell};
    use std::collections::{BTreeSet, HashMap};
    use uuid::Uuid;

    /// In-memory store that accepts shapes SQLite would refuse, cycles included.
    #[derive(Default)]
    struct FakeActivities {
        rows: RefCell<HashMap<ActivityId, Activity>>,
        children_calls: Cell<usize>,
    }

    impl FakeActivities {
        fn add(&self, name: &str, parent_id: Option<ActivityId>) -> ActivityId {
            let id = Uuid::new_v4();
            self.rows.borrow_mut().insert(
                id,
                Activity {
                    id,
                    name: name.to_string(),
                    description: None,
                    parent_id,
                    level: 1,
                },
            );
            id
        }

        fn reparent(&self, id: ActivityId, parent_id: ActivityId) {
            if let Some(row) = self.rows.borrow_mut().get_mut(&id) {
                row.parent_id = Some(parent_id);
            }
        }
    }

    impl ActivityRepository for FakeActivities {
        fn create_activity(&self, activity: &Activity) -> RepoResult<()> {
            self.rows
                .borrow_mut()
                .insert(activity.id, activity.clone());
            Ok(())
        }

        fn get_activity(&self, id: ActivityId) -> RepoResult<Option<Activity>> {
            Ok(self.rows.borrow().get(&id).cloned())
        }

        fn get_children(&self, parent_id: ActivityId) -> RepoResult<Vec<Activity>> {
            self.children_calls.set(self.children_calls.get() + 1);
            Ok(self
                .rows
                .borrow()
                .values()
                .filter(|row| row.parent_id == Some(parent_id))
                .cloned()
                .collect())
        }

        fn list_activities(&self) -> RepoResult<Vec<Activity>> {
            Ok(self.rows.borrow().values().cloned().collect())
        }
    }

    #[test]
    fn leaf_resolves_to_itself() {
        let repo = FakeActivities::default();
        let leaf = repo.add("Bakery", None);
        assert_eq!(
            resolve_descendants(&repo, leaf).unwrap(),
            BTreeSet::from([leaf])
        );
    }

    #[test]
    fn full_tree_is_collected_and_result_is_stable() {
        let repo = FakeActivities::default();
        let cars = repo.add("Cars", None);
        let trucks = repo.add("Trucks", Some(cars));
        let passenger = repo.add("Passenger", Some(cars));
        let parts = repo.add("Parts", Some(passenger));
        let accessories = repo.add("Accessories", Some(passenger));
        let unrelated = repo.add("Food", None);

        let first = resolve_descendants(&repo, cars).unwrap();
        assert_eq!(
            first,
            BTreeSet::from([cars, trucks, passenger, parts, accessories])
        );
        assert!(!first.contains(&unrelated));
        assert_eq!(resolve_descendants(&repo, cars).unwrap(), first);
    }

    #[test]
    fn depth_is_capped_on_over_deep_data() {
        let repo = FakeActivities::default();
        let l1 = repo.add("l1", None);
        let l2 = repo.add("l2", Some(l1));
        let l3 = repo.add("l3", Some(l2));
        let l4 = repo.add("l4", Some(l3));
        let _l5 = repo.add("l5", Some(l4));

        assert_eq!(
            resolve_descendants(&repo, l1).unwrap(),
            BTreeSet::from([l1, l2, l3])
        );
    }

    #[test]
    fn max_levels_bounds_expansion() {
        let repo = FakeActivities::default();
        let l1 = repo.add("l1", None);
        let l2 = repo.add("l2", Some(l1));
        let _l3 = repo.add("l3", Some(l2));

        assert_eq!(
            resolve_descendants_within(&repo, l1, 1).unwrap(),
            BTreeSet::from([l1])
        );
        assert_eq!(
            resolve_descendants_within(&repo, l1, 2).unwrap(),
            BTreeSet::from([l1, l2])
        );
    }

    #[test]
    fn out_of_range_max_levels_is_rejected() {
        let repo = FakeActivities::default();
        let root = repo.add("root", None);
        for level in [0, 4] {
            let err = resolve_descendants_within(&repo, root, level).unwrap_err();
            assert!(matches!(err, DirectoryError::Validation(ref v) if v.field == "level"));
        }
    }

    #[test]
    fn cycle_terminates_with_partial_result() {
        let repo = FakeActivities::default();
        let a = repo.add("a", None);
        let b = repo.add("b", Some(a));
        repo.reparent(a, b);

        assert_eq!(resolve_descendants(&repo, a).unwrap(), BTreeSet::from([a, b]));
    }

    #[test]
    fn self_loop_terminates() {
        let repo = FakeActivities::default();
        let a = repo.add("a", None);
        repo.reparent(a, a);

        assert_eq!(resolve_descendants(&repo, a).unwrap(), BTreeSet::from([a]));
        assert!(repo.children_calls.get() <= 2);
    }

    #[test]
    fn missing_root_is_not_found() {
        let repo = FakeActivities::default();
        let missing = Uuid::new_v4();
        let err = resolve_descendants(&repo, missing).unwrap_err();
        assert!(matches!(
            err,
            DirectoryError::NotFound { entity: EntityKind::Activity, id } if id == missing
        ));
    }
}
