//! Carts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::database::is_out_of_range;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("cart already exists")]
    AlreadyExists,

    #[error("cart not found")]
    NotFound,

    #[error("product not found")]
    ProductNotFound,

    #[error("cart item not found")]
    ItemNotFound,

    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        if is_out_of_range(&error) {
            return Self::InvalidData;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::database::amount_to_i64;

    use super::*;

    #[test]
    fn bigint_overflow_is_invalid_data() {
        let error = amount_to_i64(10_000_000_000_000_000_000, "subtotal")
            .map(|_| ())
            .map_err(CartsServiceError::from);

        assert!(
            matches!(error, Err(CartsServiceError::InvalidData)),
            "expected InvalidData, got {error:?}"
        );
    }

    #[test]
    fn missing_row_is_not_found() {
        let error = CartsServiceError::from(Error::RowNotFound);

        assert!(
            matches!(error, CartsServiceError::NotFound),
            "expected NotFound, got {error:?}"
        );
    }
}
