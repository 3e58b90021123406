//! Service-level error taxonomy.

use crate::model::validation::ValidationError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Kind of entity a lookup failed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Building,
    Activity,
    ParentActivity,
    Organization,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Building => "building",
            Self::Activity => "activity",
            Self::ParentActivity => "parent activity",
            Self::Organization => "organization",
        }
    }
}

/// Errors from directory service operations.
#[derive(Debug)]
pub enum DirectoryError {
    /// Referenced entity does not exist.
    NotFound { entity: EntityKind, id: Uuid },
    /// Input violates a domain rule.
    Validation(ValidationError),
    /// Repository-level failure.
    Repo(RepoError),
}

impl DirectoryError {
    pub fn not_found(entity: EntityKind, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(ValidationError::new(field, message))
    }
}

impl Display for DirectoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, id } => write!(f, "{} not found: {id}", entity.as_str()),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DirectoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ValidationError> for DirectoryError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for DirectoryError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<crate::db::DbError> for DirectoryError {
    fn from(value: crate::db::DbError) -> Self {
        Self::Repo(RepoError::Db(value))
    }
}

#[cfg(test)]
mod tests {
    use super::{DirectoryError, EntityKind};
    use uuid::Uuid;

    #[test]
    fn not_found_message_names_the_entity() {
        let id = Uuid::nil();
        let err = DirectoryError::not_found(EntityKind::ParentActivity, id);
        assert_eq!(err.to_string(), format!("parent activity not found: {id}"));
    }
}
