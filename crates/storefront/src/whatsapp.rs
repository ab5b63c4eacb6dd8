//! Outbound WhatsApp link construction.

use url::Url;

use patisserie_core::Order;

/// Base URL of the WhatsApp click-to-chat service.
const WA_BASE: &str = "https://wa.me";

/// Build the click-to-chat link carrying the serialized order.
///
/// The message body is percent-encoded into the `text` query parameter;
/// the link is opened in a new browsing context by the caller and no
/// response is awaited or parsed.
///
/// # Errors
///
/// Returns `url::ParseError` if the recipient identifier produces an
/// invalid URL.
pub fn order_link(recipient: &str, order: &Order) -> Result<Url, url::ParseError> {
    let body = order.message_body();
    let encoded = urlencoding::encode(&body);
    Url::parse(&format!("{WA_BASE}/{recipient}?text={encoded}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use patisserie_core::{Cart, Catalog, Category, OrderDraft, Price, Product, ProductId};

    fn catalog() -> Catalog {
        let make = |id: &str, name: &str, price: u64| Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            price: Price::new(price),
            category: Category::Cakes,
            description: String::new(),
            image: String::new(),
            updated_at: None,
        };
        Catalog::new(vec![make("a", "A", 100), make("b", "B", 50)])
    }

    fn order() -> Order {
        let mut cart = Cart::new();
        cart.increment(&ProductId::new("a"));
        cart.increment(&ProductId::new("a"));
        cart.increment(&ProductId::new("b"));

        let draft = OrderDraft {
            name: "Asha".to_owned(),
            phone: "1234567890".to_owned(),
        };
        Order::build(&draft, &cart, &catalog()).unwrap()
    }

    #[test]
    fn test_link_shape() {
        let link = order_link("917299731118", &order()).unwrap();
        assert_eq!(link.host_str(), Some("wa.me"));
        assert_eq!(link.path(), "/917299731118");

        let text = link
            .query_pairs()
            .find(|(k, _)| k == "text")
            .map(|(_, v)| v.into_owned())
            .unwrap();
        assert!(text.contains("A x2 (₹200)"));
        assert!(text.contains("B x1 (₹50)"));
        assert!(text.contains("*Total:* ₹250"));
    }

    #[test]
    fn test_message_is_percent_encoded() {
        let link = order_link("917299731118", &order()).unwrap();
        let raw = link.as_str();
        // Newlines and the rupee sign never appear raw in the link.
        assert!(!raw.contains('\n'));
        assert!(!raw.contains('₹'));
        assert!(raw.contains("%0A"));
    }
}
