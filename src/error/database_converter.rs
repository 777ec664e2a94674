use crate::error::{AppError, ConstraintParser};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// Utility for converting database errors to structured AppError variants.
///
/// Constraint violations caused by the caller's input (a missing referenced
/// row, a negative amount, a null column) become `Validation` errors so they
/// surface as 400 responses. Everything else stays a `Database` error.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an appropriate AppError variant.
    ///
    /// # Arguments
    /// * `error` - The Diesel error to convert
    /// * `operation` - Description of the database operation that failed
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info.as_ref(), operation)
            }
            DieselError::NotFound => AppError::NotFound {
                entity: "resource".to_string(),
                field: "id".to_string(),
                value: "unknown".to_string(),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: &(dyn DatabaseErrorInformation + Send + Sync),
        operation: &str,
    ) -> AppError {
        let message = info.message();
        let constraint_name = info.constraint_name();

        let converted = match kind {
            DatabaseErrorKind::UniqueViolation => {
                ConstraintParser::parse_unique_violation(message, constraint_name).map(
                    |(entity, field, value)| AppError::Duplicate {
                        entity,
                        field,
                        value,
                    },
                )
            }
            DatabaseErrorKind::NotNullViolation => {
                ConstraintParser::parse_not_null_violation(message).map(|(entity, field)| {
                    AppError::Validation {
                        field,
                        reason: format!("Field is required for {}", entity),
                    }
                })
            }
            DatabaseErrorKind::ForeignKeyViolation => {
                ConstraintParser::parse_foreign_key_violation(message, constraint_name).map(
                    |(field, value, referenced)| AppError::Validation {
                        field,
                        reason: format!(
                            "Invalid reference to {} with value '{}'",
                            referenced, value
                        ),
                    },
                )
            }
            DatabaseErrorKind::CheckViolation => {
                ConstraintParser::parse_check_violation(message, constraint_name).map(
                    |(entity, field)| AppError::Validation {
                        field,
                        reason: format!("Check constraint failed for {} field", entity),
                    },
                )
            }
            _ => None,
        };

        converted.unwrap_or_else(|| AppError::Database {
            operation: operation.to_string(),
            source: anyhow::Error::msg(format!("{:?}: {}", kind, message)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    struct MockDatabaseErrorInfo {
        message: String,
        constraint_name: Option<String>,
    }

    impl diesel::result::DatabaseErrorInformation for MockDatabaseErrorInfo {
        fn message(&self) -> &str {
            &self.message
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            None
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint_name.as_deref()
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind, message: &str, constraint: Option<&str>) -> DieselError {
        DieselError::DatabaseError(
            kind,
            Box::new(MockDatabaseErrorInfo {
                message: message.to_string(),
                constraint_name: constraint.map(str::to_string),
            }),
        )
    }

    #[test]
    fn test_convert_not_found_error() {
        let result = DatabaseErrorConverter::convert_diesel_error(DieselError::NotFound, "find product");
        assert!(result.is_not_found());
    }

    #[test]
    fn test_convert_foreign_key_violation_is_validation() {
        let error = database_error(
            DatabaseErrorKind::ForeignKeyViolation,
            "insert or update on table \"shopping_cart\" violates foreign key constraint \"shopping_cart_product_id_fkey\"\nDETAIL: Key (product_id)=(nope) is not present in table \"products\".",
            Some("shopping_cart_product_id_fkey"),
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "insert shopping_cart") {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "product_id");
                assert!(reason.contains("products"));
                assert!(reason.contains("nope"));
            }
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[test]
    fn test_convert_check_violation_is_validation() {
        let error = database_error(
            DatabaseErrorKind::CheckViolation,
            "new row for relation \"delivery_product\" violates check constraint \"delivery_product_product_amount_check\"",
            Some("delivery_product_product_amount_check"),
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "insert delivery_product") {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "product_amount");
                assert!(reason.contains("Check constraint failed"));
            }
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[test]
    fn test_convert_not_null_violation() {
        let error = database_error(
            DatabaseErrorKind::NotNullViolation,
            "null value in column \"user_id\" of relation \"deliveries\" violates not-null constraint",
            None,
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "insert delivery") {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "user_id");
                assert!(reason.contains("required"));
            }
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[test]
    fn test_convert_duplicate_primary_key() {
        let error = database_error(
            DatabaseErrorKind::UniqueViolation,
            "duplicate key value violates unique constraint \"users_pkey\"\nDETAIL: Key (id)=(42) already exists.",
            Some("users_pkey"),
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "insert user") {
            AppError::Duplicate { entity, field, value } => {
                assert_eq!(entity, "users");
                assert_eq!(field, "id");
                assert_eq!(value, "42");
            }
            other => panic!("Expected Duplicate error, got: {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_violation_falls_back_to_database_error() {
        let error = database_error(DatabaseErrorKind::CheckViolation, "something odd", None);

        match DatabaseErrorConverter::convert_diesel_error(error, "update product") {
            AppError::Database { operation, .. } => assert_eq!(operation, "update product"),
            other => panic!("Expected Database error, got: {:?}", other),
        }
    }

    #[test]
    fn test_other_diesel_errors_are_database_errors() {
        let result = DatabaseErrorConverter::convert_diesel_error(
            DieselError::RollbackTransaction,
            "delete payments",
        );
        assert!(matches!(result, AppError::Database { .. }));
    }
}
