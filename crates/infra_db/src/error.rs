//! Database error types
//!
//! Errors raised by the repositories, with the PostgreSQL error codes the
//! invoice table can produce mapped to specific variants.

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur during database operations
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to establish a database connection
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Entity not found in database
    #[error("Entity not found: {0}")]
    NotFound(String),

    /// Unique constraint violation
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    /// Check constraint violation
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Transaction error
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Migration error
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Pool exhaustion - no available connections
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Generic SQL error
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Creates a duplicate entry error
    ///
    /// # Example
    ///
    /// ```rust
    /// use infra_db::DatabaseError;
    ///
    /// let error = DatabaseError::duplicate("Invoice", "key", "12345678900/3/2024");
    /// assert!(error.is_duplicate());
    /// ```
    pub fn duplicate(entity: &str, field: &str, value: impl std::fmt::Display) -> Self {
        DatabaseError::DuplicateEntry(format!(
            "{} with {} '{}' already exists",
            entity, field, value
        ))
    }

    /// Checks if this error indicates a record was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, DatabaseError::NotFound(_))
    }

    /// Checks if this error is a unique-key violation
    pub fn is_duplicate(&self) -> bool {
        matches!(self, DatabaseError::DuplicateEntry(_))
    }

    /// Checks if this error is a constraint violation
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            DatabaseError::DuplicateEntry(_) | DatabaseError::ConstraintViolation(_)
        )
    }

    /// Checks if this error is a connection-related issue
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            DatabaseError::ConnectionFailed(_) | DatabaseError::PoolExhausted
        )
    }
}

/// Converts SQLx errors to more specific DatabaseError variants
///
/// PostgreSQL error codes:
/// <https://www.postgresql.org/docs/current/errcodes-appendix.html>
impl From<&sqlx::Error> for DatabaseError {
    fn from(error: &sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => {
                DatabaseError::NotFound("Record not found".to_string())
            }
            sqlx::Error::PoolTimedOut => DatabaseError::PoolExhausted,
            sqlx::Error::Io(e) => DatabaseError::ConnectionFailed(e.to_string()),
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                Some("23505") => DatabaseError::DuplicateEntry(db_err.message().to_string()),
                Some("23514") => DatabaseError::ConstraintViolation(db_err.message().to_string()),
                _ => DatabaseError::QueryFailed(db_err.message().to_string()),
            },
            _ => DatabaseError::QueryFailed(error.to_string()),
        }
    }
}

/// Classifies a database failure for the domain
impl From<DatabaseError> for PortError {
    fn from(error: DatabaseError) -> Self {
        if error.is_connection_error() {
            return PortError::Connection {
                message: error.to_string(),
                source: Some(Box::new(error)),
            };
        }

        match error {
            DatabaseError::DuplicateEntry(message) => PortError::conflict(message),
            other => PortError::Internal {
                message: other.to_string(),
                source: Some(Box::new(other)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let error = DatabaseError::from(&sqlx::Error::RowNotFound);
        assert!(error.is_not_found());
    }

    #[test]
    fn test_pool_timeout_is_connection_error() {
        let error = DatabaseError::from(&sqlx::Error::PoolTimedOut);
        assert!(error.is_connection_error());
        assert!(matches!(PortError::from(error), PortError::Connection { .. }));
    }

    #[test]
    fn test_duplicate_becomes_port_conflict() {
        let error = DatabaseError::duplicate("Invoice", "key", "12345678900/3/2024");
        assert!(error.is_duplicate());
        assert!(error.is_constraint_violation());

        let port = PortError::from(error);
        assert!(port.is_conflict());
        assert!(port.to_string().contains("12345678900/3/2024"));
    }

    #[test]
    fn test_other_errors_become_internal() {
        let port = PortError::from(DatabaseError::QueryFailed("syntax error".into()));
        assert!(matches!(port, PortError::Internal { .. }));
    }
}
