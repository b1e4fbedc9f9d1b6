use crate::error::AppError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Converts Diesel errors into `AppError` variants.
///
/// Only serialization failures get a dedicated variant, since services react
/// to them; integrity violations (foreign key, check) stay fatal database
/// errors and are not translated into client errors.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error raised while performing `operation`.
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(DatabaseErrorKind::SerializationFailure, info) => {
                AppError::WriteConflict {
                    operation: operation.to_string(),
                    source: anyhow::Error::msg(info.message().to_string()),
                }
            }
            DieselError::DatabaseError(kind, info) => {
                let message = match info.constraint_name() {
                    Some(constraint) => format!(
                        "{} (constraint {}): {}",
                        Self::describe_kind(&kind),
                        constraint,
                        info.message()
                    ),
                    None => format!("{}: {}", Self::describe_kind(&kind), info.message()),
                };
                AppError::Database {
                    operation: operation.to_string(),
                    source: anyhow::Error::msg(message),
                }
            }
            DieselError::NotFound => AppError::not_found("Resource not found"),
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    /// Returns a closure for `map_err` that tags errors with `operation`.
    pub fn with_operation(operation: &'static str) -> impl Fn(DieselError) -> AppError {
        move |error| Self::convert_diesel_error(error, operation)
    }

    fn describe_kind(kind: &DatabaseErrorKind) -> &'static str {
        match kind {
            DatabaseErrorKind::UniqueViolation => "Unique constraint violation",
            DatabaseErrorKind::ForeignKeyViolation => "Foreign key constraint violation",
            DatabaseErrorKind::NotNullViolation => "Not null constraint violation",
            DatabaseErrorKind::CheckViolation => "Check constraint violation",
            DatabaseErrorKind::ReadOnlyTransaction => "Read-only transaction",
            DatabaseErrorKind::ClosedConnection => "Connection closed",
            _ => "Database error",
        }
    }
}
