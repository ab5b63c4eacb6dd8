//! Admin error types.

use thiserror::Error;

use patisserie_docstore::DocStoreError;

use crate::form::FormError;
use crate::images::ImageError;

/// Errors surfaced by admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// The session is not logged in.
    #[error("Not authorized")]
    Unauthorized,

    /// The product form failed validation.
    #[error(transparent)]
    Validation(#[from] FormError),

    /// The document database rejected or failed a request.
    #[error(transparent)]
    DocStore(#[from] DocStoreError),

    /// Image upload failed.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// A save is already running for this session.
    #[error("A save is already in progress")]
    SaveInProgress,

    /// `save` was called with no form open.
    #[error("No product form is open")]
    NoFormOpen,
}
