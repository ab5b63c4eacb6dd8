//! Per-session admin state: login, the open product form, and the save and
//! delete flows against the document database.

use chrono::Utc;
use tracing::{info, instrument, warn};

use patisserie_core::{Product, ProductId, ProductInput};
use patisserie_docstore::DocStoreClient;

use crate::auth::AdminGate;
use crate::error::AdminError;
use crate::form::{ImageSource, ProductForm};
use crate::images::ImageStore;

/// What a successful save produced.
#[derive(Debug, Clone)]
pub enum SaveOutcome {
    /// A new document was created; carries the stored product with its
    /// database-assigned id.
    Created(Product),
    /// An existing document was overwritten.
    Updated(Product),
}

/// One admin's session: authentication state and the form being edited.
///
/// Writes go straight to the database with no version check; concurrent
/// editors race and the last write wins, whole-document.
#[derive(Debug)]
pub struct AdminSession {
    gate: AdminGate,
    client: DocStoreClient,
    images: ImageStore,
    logged_in: bool,
    form: Option<ProductForm>,
    /// True while a save is in flight; blocks a second submit.
    saving: bool,
}

impl AdminSession {
    /// Start a logged-out session.
    #[must_use]
    pub const fn new(gate: AdminGate, client: DocStoreClient, images: ImageStore) -> Self {
        Self {
            gate,
            client,
            images,
            logged_in: false,
            form: None,
            saving: false,
        }
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Attempt to log in. Returns whether the attempt was accepted.
    pub fn login(&mut self, attempt: &str) -> bool {
        self.logged_in = self.gate.check(attempt);
        self.logged_in
    }

    /// Log out and drop any open form.
    pub fn logout(&mut self) {
        self.logged_in = false;
        self.form = None;
    }

    /// Whether the session is authenticated.
    #[must_use]
    pub const fn logged_in(&self) -> bool {
        self.logged_in
    }

    // =========================================================================
    // Form lifecycle
    // =========================================================================

    /// Open a blank form for a new product.
    pub fn open_create_form(&mut self) {
        self.form = Some(ProductForm::create());
    }

    /// Open a form pre-filled from an existing product.
    pub fn open_edit_form(&mut self, product: &Product) {
        self.form = Some(ProductForm::edit(product));
    }

    /// Discard the open form without saving.
    pub fn cancel_form(&mut self) {
        self.form = None;
    }

    /// The open form, if any.
    #[must_use]
    pub const fn form(&self) -> Option<&ProductForm> {
        self.form.as_ref()
    }

    /// Mutable access to the open form for field edits.
    pub const fn form_mut(&mut self) -> Option<&mut ProductForm> {
        self.form.as_mut()
    }

    /// Whether a save is currently in flight.
    #[must_use]
    pub const fn saving(&self) -> bool {
        self.saving
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Save the open form.
    ///
    /// Validates, uploads a newly selected image if there is one, stamps
    /// `updatedAt` with the current time, and creates or overwrites the
    /// document. The form stays open on failure so the admin can correct
    /// and resubmit; it is dropped on success.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Unauthorized`] when logged out,
    /// [`AdminError::NoFormOpen`] without a form,
    /// [`AdminError::SaveInProgress`] while a previous save runs, and
    /// validation, upload, or database errors from the save itself.
    #[instrument(skip(self))]
    pub async fn save(&mut self) -> Result<SaveOutcome, AdminError> {
        if !self.logged_in {
            return Err(AdminError::Unauthorized);
        }
        if self.saving {
            return Err(AdminError::SaveInProgress);
        }
        let Some(form) = self.form.clone() else {
            return Err(AdminError::NoFormOpen);
        };

        // The flag must clear even when the caller drops this future while
        // the upload or write is in flight; a stuck flag would block every
        // later save.
        let result = {
            let _saving = InFlight::set(&mut self.saving);
            save_form(&self.client, &self.images, &form).await
        };

        if result.is_ok() {
            self.form = None;
        }
        result
    }

    /// Delete a product.
    ///
    /// The document deletion must succeed; removal of the hosted image is
    /// best effort afterwards and never fails the operation.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Unauthorized`] when logged out, or a database
    /// error from the deletion.
    #[instrument(skip(self, image_url), fields(id = %id))]
    pub async fn delete(&mut self, id: &ProductId, image_url: &str) -> Result<(), AdminError> {
        if !self.logged_in {
            return Err(AdminError::Unauthorized);
        }

        self.client.delete_product(id).await?;

        if image_url.is_empty() {
            warn!(id = %id, "Deleted product had no image URL");
        } else {
            self.images.remove(image_url).await;
        }

        Ok(())
    }
}

async fn save_form(
    client: &DocStoreClient,
    images: &ImageStore,
    form: &ProductForm,
) -> Result<SaveOutcome, AdminError> {
    let validated = form.validate()?;

    let image = match validated.image {
        ImageSource::Selected(upload) => images.store(upload).await?,
        ImageSource::Existing(url) => url,
    };

    let input = ProductInput {
        name: validated.name,
        price: validated.price,
        category: validated.category,
        description: validated.description,
        image,
        updated_at: Utc::now(),
    };

    match &form.editing {
        Some(id) => {
            let product = client.update_product(id, &input).await?;
            info!(id = %product.id, "Product updated");
            Ok(SaveOutcome::Updated(product))
        }
        None => {
            let product = client.create_product(&input).await?;
            info!(id = %product.id, "Product created");
            Ok(SaveOutcome::Created(product))
        }
    }
}

/// Holds a boolean flag true for a scope, clearing it on drop - including
/// the drop of a cancelled future.
struct InFlight<'a>(&'a mut bool);

impl<'a> InFlight<'a> {
    fn set(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}
