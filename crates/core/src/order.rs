//! Order submission: validation and message serialization.
//!
//! An order is ephemeral. It is derived at submission time from the cart and
//! the current catalog snapshot, serialized into a WhatsApp message body,
//! and forgotten - the shop keeps no order history.

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::types::{PhoneNumber, PhoneNumberError, Price};

/// Errors rejecting an order at submission.
///
/// All of these are recoverable: the shopper fixes the input and submits
/// again. Nothing is sent anywhere until validation passes.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderValidationError {
    /// The customer name field is empty.
    #[error("name is required")]
    EmptyName,
    /// The phone number is missing or malformed.
    #[error("invalid phone number: {0}")]
    Phone(#[from] PhoneNumberError),
    /// The cart has no items.
    #[error("cart is empty")]
    EmptyCart,
}

/// Raw checkout form input, as typed by the shopper.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderDraft {
    pub name: String,
    pub phone: String,
}

/// One line of a submitted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub name: String,
    pub quantity: u32,
    pub line_total: Price,
}

/// A validated order, ready to be serialized into the outbound message.
///
/// Lines and total are computed strictly from the catalog snapshot passed to
/// [`Order::build`]; a cart entry whose product was deleted in the meantime
/// is silently dropped from the order, matching the cart total semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub customer_name: String,
    pub phone: PhoneNumber,
    pub lines: Vec<OrderLine>,
    pub total: Price,
}

impl Order {
    /// Validate the draft and derive the order from the cart and the current
    /// catalog snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`OrderValidationError`] if the name is empty, the phone is
    /// not exactly ten digits, or the cart is empty.
    pub fn build(
        draft: &OrderDraft,
        cart: &Cart,
        catalog: &Catalog,
    ) -> Result<Self, OrderValidationError> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(OrderValidationError::EmptyName);
        }

        let phone = PhoneNumber::parse(&draft.phone)?;

        if cart.is_empty() {
            return Err(OrderValidationError::EmptyCart);
        }

        let lines: Vec<OrderLine> = cart
            .entries()
            .filter_map(|(id, quantity)| {
                catalog.get(id).map(|product| OrderLine {
                    name: product.name.clone(),
                    quantity,
                    line_total: product.price.line_total(quantity),
                })
            })
            .collect();

        let total = lines
            .iter()
            .fold(Price::ZERO, |acc, line| acc.saturating_add(line.line_total));

        Ok(Self {
            customer_name: name.to_owned(),
            phone,
            lines,
            total,
        })
    }

    /// Serialize the order into the plain-text message body.
    ///
    /// The body uses WhatsApp's `*bold*` markup and real newlines;
    /// percent-encoding happens when the outbound link is constructed.
    #[must_use]
    pub fn message_body(&self) -> String {
        let mut body = format!(
            "*New Order*\n\nName: {}\nPhone: {}\n\n*Items:*\n",
            self.customer_name, self.phone
        );
        for line in &self.lines {
            body.push_str(&format!(
                "- {} x{} ({})\n",
                line.name, line.quantity, line.line_total
            ));
        }
        body.push_str(&format!("\n*Total:* {}", self.total));
        body
    }
}
