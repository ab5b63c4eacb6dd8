//! Product form draft and validation.

use thiserror::Error;

use patisserie_core::{Category, Price, Product, ProductId};

use crate::images::ImageUpload;

/// Validation failures, one per rejected submit. Messages are shown to the
/// admin as-is.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Please enter a product name")]
    EmptyName,
    #[error("Please enter a price")]
    EmptyPrice,
    #[error("Price must be a whole number of rupees")]
    InvalidPrice,
    #[error("Please choose a category")]
    MissingCategory,
    #[error("Please enter a description")]
    EmptyDescription,
    #[error("Please select an image")]
    MissingImage,
}

/// Where the saved product's image URL comes from.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// A freshly selected image that must be uploaded first.
    Selected(ImageUpload),
    /// The URL already on the product being edited.
    Existing(String),
}

/// The admin's product form, either blank for a new product or pre-filled
/// from an existing one.
///
/// All fields are held as entered; validation happens once, at submit.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    /// `Some` when editing; the id never changes across an edit.
    pub editing: Option<ProductId>,
    pub name: String,
    /// Price as typed. Parsed to whole rupees at submit.
    pub price: String,
    pub category: Option<Category>,
    pub description: String,
    /// Image selected in this form session, if any.
    pub selected_image: Option<ImageUpload>,
    /// The image URL the product already has (edit only).
    pub existing_image: Option<String>,
}

/// A form that passed validation, ready to save.
#[derive(Debug, Clone)]
pub struct ValidatedForm {
    pub name: String,
    pub price: Price,
    pub category: Category,
    pub description: String,
    pub image: ImageSource,
}

impl ProductForm {
    /// A blank form for creating a new product.
    #[must_use]
    pub fn create() -> Self {
        Self::default()
    }

    /// A form pre-filled from an existing product.
    #[must_use]
    pub fn edit(product: &Product) -> Self {
        Self {
            editing: Some(product.id.clone()),
            name: product.name.clone(),
            price: product.price.rupees().to_string(),
            category: Some(product.category),
            description: product.description.clone(),
            selected_image: None,
            existing_image: Some(product.image.clone()),
        }
    }

    /// Attach a newly selected image. Replaces any earlier selection.
    pub fn select_image(&mut self, upload: ImageUpload) {
        self.selected_image = Some(upload);
    }

    /// Validate the form.
    ///
    /// Every field is required. A new product must have an image selected;
    /// an edit without a new selection keeps the product's existing URL.
    ///
    /// # Errors
    ///
    /// Returns the first [`FormError`] encountered, in field order.
    pub fn validate(&self) -> Result<ValidatedForm, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::EmptyName);
        }

        let price_text = self.price.trim();
        if price_text.is_empty() {
            return Err(FormError::EmptyPrice);
        }
        let price = price_text
            .parse::<u64>()
            .map(Price::new)
            .map_err(|_| FormError::InvalidPrice)?;

        let category = self.category.ok_or(FormError::MissingCategory)?;

        let description = self.description.trim();
        if description.is_empty() {
            return Err(FormError::EmptyDescription);
        }

        let image = match (&self.selected_image, &self.existing_image) {
            (Some(upload), _) => ImageSource::Selected(upload.clone()),
            (None, Some(url)) => ImageSource::Existing(url.clone()),
            (None, None) => return Err(FormError::MissingImage),
        };

        Ok(ValidatedForm {
            name: name.to_owned(),
            price,
            category,
            description: description.to_owned(),
            image,
        })
    }
}
