//! Activity taxonomy use-case service.
//!
//! # Responsibility
//! - Create activities while enforcing the three-level hierarchy.
//! - Read single activities (with children) and the full list.
//! - Expose hierarchy resolution for callers holding only this service.
//!
//! # Invariants
//! - A parent must exist before a child is created under it.
//! - A child's level is always `parent.level + 1` and never exceeds 3.

use crate::model::activity::{Activity, ActivityId, ActivityNode, NewActivity};
use crate::repo::activity_repo::ActivityRepository;
use crate::service::error::{DirectoryError, DirectoryResult, EntityKind};
use crate::service::hierarchy;
use log::info;
use std::collections::BTreeSet;

/// Activity service facade.
pub struct ActivityService<R: ActivityRepository> {
    repo: R,
}

impl<R: ActivityRepository> ActivityService<R> {
    /// Creates service from repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one activity under an optional parent.
    ///
    /// # Errors
    /// - `Validation` for a blank name, an out-of-range or inconsistent
    ///   `level`, or a parent that already sits at the deepest level.
    /// - `NotFound(ParentActivity)` when `parent_id` does not exist.
    pub fn create_activity(&self, input: NewActivity) -> DirectoryResult<Activity> {
        let input = input.normalize()?;
        let parent = match input.parent_id {
            Some(parent_id) => Some(
                self.repo
                    .get_activity(parent_id)?
                    .ok_or(DirectoryError::not_found(
                        EntityKind::ParentActivity,
                        parent_id,
                    ))?,
            ),
            None => None,
        };

        let activity = input.into_activity(parent.as_ref())?;
        self.repo.create_activity(&activity)?;
        info!(
            "event=activity_created module=service status=ok activity_id={} level={}",
            activity.id, activity.level
        );
        Ok(activity)
    }

    /// Loads one activity.
    pub fn get_activity(&self, id: ActivityId) -> DirectoryResult<Activity> {
        self.repo
            .get_activity(id)?
            .ok_or(DirectoryError::not_found(EntityKind::Activity, id))
    }

    /// Loads one activity together with its direct children.
    pub fn get_activity_node(&self, id: ActivityId) -> DirectoryResult<ActivityNode> {
        let activity = self.get_activity(id)?;
        let children = self.repo.get_children(id)?;
        Ok(ActivityNode { activity, children })
    }

    pub fn list_activities(&self) -> DirectoryResult<Vec<Activity>> {
        self.repo.list_activities().map_err(Into::into)
    }

    /// Returns `id` plus every descendant activity.
    pub fn resolve_descendants(&self, id: ActivityId) -> DirectoryResult<BTreeSet<ActivityId>> {
        hierarchy::resolve_descendants(&self.repo, id)
    }
}
