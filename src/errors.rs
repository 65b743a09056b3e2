use thiserror::Error;

/// A write rejected by one of the store's constraints.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityViolation {
    #[error("unique constraint failed on {0}")]
    Unique(String),
    #[error("foreign key constraint failed")]
    ForeignKey,
    #[error("required field {0} is missing")]
    NotNull(String),
}

impl IntegrityViolation {
    /// Classifies a SQLite constraint message. Returns `None` for anything that is
    /// not a constraint failure.
    pub fn from_message(message: &str) -> Option<Self> {
        if let Some(columns) = message.strip_prefix("UNIQUE constraint failed: ") {
            Some(Self::Unique(columns.to_string()))
        } else if message.starts_with("FOREIGN KEY constraint failed") {
            Some(Self::ForeignKey)
        } else if let Some(column) = message.strip_prefix("NOT NULL constraint failed: ") {
            Some(Self::NotNull(column.to_string()))
        } else {
            None
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("integrity error: {0}")]
    Integrity(IntegrityViolation),
    #[error("{entity} {key} not found")]
    NotFound { entity: &'static str, key: String },
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl StoreError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn integrity(&self) -> Option<&IntegrityViolation> {
        match self {
            Self::Integrity(violation) => Some(violation),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(value: sqlx::Error) -> Self {
        if let sqlx::Error::Database(error) = &value {
            if let Some(violation) = IntegrityViolation::from_message(error.message()) {
                tracing::warn!(%violation, "write rejected by store");
                return Self::Integrity(violation);
            }
        }
        Self::Database(value)
    }
}

/// Raised when an entity cannot be turned into a transport record.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("{entity}.{field} is absent; the row violates a required-field invariant")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },
    #[error("{0} did not serialize to a flat record")]
    NotARecord(&'static str),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_sqlite_constraint_messages() {
        assert_eq!(
            IntegrityViolation::from_message("UNIQUE constraint failed: users.email"),
            Some(IntegrityViolation::Unique("users.email".to_string()))
        );
        assert_eq!(
            IntegrityViolation::from_message("FOREIGN KEY constraint failed"),
            Some(IntegrityViolation::ForeignKey)
        );
        assert_eq!(
            IntegrityViolation::from_message("NOT NULL constraint failed: articles.title"),
            Some(IntegrityViolation::NotNull("articles.title".to_string()))
        );
        assert_eq!(IntegrityViolation::from_message("database is locked"), None);
    }

    #[test]
    fn non_database_errors_stay_database_errors() {
        let error = StoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(error, StoreError::Database(sqlx::Error::RowNotFound)));
        assert!(error.integrity().is_none());
    }

    #[test]
    fn not_found_names_entity_and_key() {
        let error = StoreError::not_found("article_tag", "(1, 2)");
        assert_eq!(error.to_string(), "article_tag (1, 2) not found");
    }
}
