use sqlx::error::ErrorKind;
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// No row matched the key.
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: String },

    /// A unique, foreign-key, not-null or check constraint rejected the write.
    #[error("constraint violation: {0}")]
    Constraint(String),

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl StoreError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        StoreError::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let is_constraint = matches!(
                db_err.kind(),
                ErrorKind::UniqueViolation
                    | ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation
            );
            if is_constraint {
                return StoreError::Constraint(db_err.message().to_string());
            }
        }
        StoreError::Database(err)
    }
}
