//! Errors surfaced by the LightBnB accessors.

use thiserror::Error;
use tokio_postgres::error::SqlState;

pub type DbResult<T> = Result<T, DbError>;

/// Everything an accessor can fail with.
///
/// Constraint failures reported by the store are classified by SQLSTATE.
#[derive(Debug, Error)]
pub enum DbError {
    /// The connection string could not be parsed or the server was unreachable.
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// A statement that must return a row returned none.
    #[error("Not found: {0}")]
    NotFound(String),

    /// SQLSTATE 23505.
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// SQLSTATE 23503, e.g. a property whose `owner_id` names no user.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// SQLSTATE 23514.
    #[error("Check constraint violation: {0}")]
    CheckViolation(String),

    /// A column was missing or had an unexpected type.
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// A plan's placeholders do not line up with its parameters.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[cfg(feature = "pool")]
    #[error("Pool error: {0}")]
    Pool(String),

    #[cfg(feature = "migrate")]
    #[error("Migration error: {0}")]
    Migration(String),

    #[error("{0}")]
    Other(String),
}

impl DbError {
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Whether the store rejected the row (unique, foreign key or check).
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Self::UniqueViolation(_) | Self::ForeignKeyViolation(_) | Self::CheckViolation(_)
        )
    }

    /// Classify a driver error; anything that is not a constraint failure
    /// stays a [`DbError::Query`].
    pub fn from_db_error(err: tokio_postgres::Error) -> Self {
        let Some(db_err) = err.as_db_error() else {
            return Self::Query(err);
        };
        let detail = format!(
            "{}: {}",
            db_err.constraint().unwrap_or("unknown"),
            db_err.message()
        );
        let code = db_err.code();
        if *code == SqlState::UNIQUE_VIOLATION {
            Self::UniqueViolation(detail)
        } else if *code == SqlState::FOREIGN_KEY_VIOLATION {
            Self::ForeignKeyViolation(detail)
        } else if *code == SqlState::CHECK_VIOLATION {
            Self::CheckViolation(detail)
        } else {
            Self::Query(err)
        }
    }
}

impl From<serde_json::Error> for DbError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(feature = "pool")]
impl From<deadpool_postgres::PoolError> for DbError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}

#[cfg(feature = "migrate")]
impl From<refinery::Error> for DbError {
    fn from(err: refinery::Error) -> Self {
        Self::Migration(err.to_string())
    }
}
