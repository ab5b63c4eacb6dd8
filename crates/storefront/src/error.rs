//! Storefront error type.

use thiserror::Error;

use patisserie_core::OrderValidationError;
use patisserie_docstore::DocStoreError;

/// Application-level error type for the storefront.
///
/// Validation errors are recoverable by re-input; backend errors are
/// surfaced once and the operation is abandoned (the user may retry).
/// Nothing here is fatal to the process.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Order form input failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] OrderValidationError),

    /// Document database operation failed.
    #[error("Document store error: {0}")]
    DocStore(#[from] DocStoreError),

    /// A submission is already in flight; the control stays disabled until
    /// it completes.
    #[error("An order submission is already in progress")]
    SubmissionInFlight,

    /// The outbound link could not be constructed.
    #[error("Invalid outbound link: {0}")]
    Link(#[from] url::ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use patisserie_core::PhoneNumberError;

    #[test]
    fn test_display() {
        let err = StorefrontError::Validation(OrderValidationError::EmptyCart);
        assert_eq!(err.to_string(), "Validation error: cart is empty");

        let err = StorefrontError::Validation(OrderValidationError::Phone(
            PhoneNumberError::WrongLength { got: 5 },
        ));
        assert!(err.to_string().contains("exactly 10 digits"));
    }
}
