//! Error types for the room guests core

use pyo3::exceptions::{PyKeyError, PyValueError};
use pyo3::PyErr;
use thiserror::Error;

/// Main error type for the room guests core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BookingCoreError {
    #[error("Please select both check-in and check-out dates")]
    MissingDates,

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Check-out date must be after check-in date")]
    CheckOutNotAfterCheckIn,

    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<BookingCoreError> for PyErr {
    fn from(err: BookingCoreError) -> PyErr {
        match err {
            BookingCoreError::UnsupportedCurrency(code) => {
                PyKeyError::new_err(format!("Unsupported currency: {}", code))
            }
            other => PyValueError::new_err(other.to_string()),
        }
    }
}

/// Result type alias for the room guests core
pub type Result<T> = std::result::Result<T, BookingCoreError>;
