//! Activity taxonomy model.
//!
//! # Invariants
//! - Roots have level 1; a child has exactly `parent.level + 1`.
//! - No activity has a level above `MAX_ACTIVITY_LEVEL`, so a level-3
//!   activity can never be a parent.

use crate::model::validation::{optional_text, require_text, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ActivityId = Uuid;

/// Deepest level an activity may sit at (roots are level 1).
pub const MAX_ACTIVITY_LEVEL: u8 = 3;

/// One node of the business activity forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub name: String,
    pub description: Option<String>,
    /// `None` for roots.
    pub parent_id: Option<ActivityId>,
    pub level: u8,
}

impl Activity {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn can_have_children(&self) -> bool {
        self.level < MAX_ACTIVITY_LEVEL
    }
}

/// Activity read model with its direct children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityNode {
    #[serde(flatten)]
    pub activity: Activity,
    pub children: Vec<Activity>,
}

/// Create input for an activity.
///
/// `level` is optional: it is always derived from the parent, and a supplied
/// value only has to agree with the derived one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewActivity {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent_id: Option<ActivityId>,
    #[serde(default)]
    pub level: Option<u8>,
}

impl NewActivity {
    /// Trims text fields and checks a supplied level is in range.
    pub fn normalize(self) -> Result<Self, ValidationError> {
        if let Some(level) = self.level {
            if !(1..=MAX_ACTIVITY_LEVEL).contains(&level) {
                return Err(ValidationError::new(
                    "level",
                    format!("level must be within [1, {MAX_ACTIVITY_LEVEL}], got {level}"),
                ));
            }
        }
        Ok(Self {
            name: require_text("name", self.name)?,
            description: optional_text(self.description),
            parent_id: self.parent_id,
            level: self.level,
        })
    }

    /// Builds the record to persist under `parent`.
    ///
    /// `parent` must be the activity named by `parent_id`, already loaded.
    pub fn into_activity(self, parent: Option<&Activity>) -> Result<Activity, ValidationError> {
        let level = match parent {
            None => 1,
            Some(parent) if !parent.can_have_children() => {
                return Err(ValidationError::new(
                    "parent_id",
                    format!(
                        "parent activity {} is at level {}; activities cannot be nested deeper than {MAX_ACTIVITY_LEVEL} levels",
                        parent.id, parent.level
                    ),
                ));
            }
            Some(parent) => parent.level + 1,
        };

        if let Some(requested) = self.level {
            if requested != level {
                return Err(ValidationError::new(
                    "level",
                    format!("level {requested} does not match position in hierarchy (expected {level})"),
                ));
            }
        }

        Ok(Activity {
            id: Uuid::new_v4(),
            name: self.name,
            description: self.description,
            parent_id: parent.map(|parent| parent.id),
            level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Activity, NewActivity, MAX_ACTIVITY_LEVEL};
    use uuid::Uuid;

    fn activity(level: u8) -> Activity {
        Activity {
            id: Uuid::new_v4(),
            name: format!("level {level}"),
            description: None,
            parent_id: None,
            level,
        }
    }

    fn input(level: Option<u8>) -> NewActivity {
        NewActivity {
            name: "Meat".to_string(),
            level,
            ..NewActivity::default()
        }
    }

    #[test]
    fn root_gets_level_one() {
        let created = input(None).into_activity(None).unwrap();
        assert_eq!(created.level, 1);
        assert!(created.is_root());
    }

    #[test]
    fn child_level_is_parent_plus_one() {
        let parent = activity(2);
        let created = input(None).into_activity(Some(&parent)).unwrap();
        assert_eq!(created.level, 3);
        assert_eq!(created.parent_id, Some(parent.id));
    }

    #[test]
    fn level_three_parent_is_rejected() {
        let parent = activity(MAX_ACTIVITY_LEVEL);
        let err = input(None).into_activity(Some(&parent)).unwrap_err();
        assert_eq!(err.field, "parent_id");
    }

    #[test]
    fn mismatching_level_is_rejected() {
        let err = input(Some(2)).into_activity(None).unwrap_err();
        assert_eq!(err.field, "level");
    }

    #[test]
    fn out_of_range_level_is_rejected_on_normalize() {
        assert_eq!(input(Some(4)).normalize().unwrap_err().field, "level");
        assert_eq!(input(Some(0)).normalize().unwrap_err().field, "level");
    }

    #[test]
    fn blank_description_becomes_none() {
        let mut raw = input(None);
        raw.description = Some("   ".to_string());
        assert_eq!(raw.normalize().unwrap().description, None);
    }
}
