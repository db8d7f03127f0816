//! Listing types - the property records exchanged with the remote API.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A property listing as returned by the API.
///
/// The id is server-assigned and immutable; the client only ever holds
/// transient, read-only copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: u64,
    pub title: String,
    pub price: f64,
    pub location: String,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// A new listing to be created - all `Listing` fields minus the id.
///
/// An absent image reference serializes as JSON `null`, never as an empty
/// string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingDraft {
    pub title: String,
    pub price: f64,
    pub location: String,
    pub description: String,
    pub image_url: Option<String>,
}

#[derive(Error, Debug, PartialEq)]
pub enum DraftError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("price must be a number, got '{0}'")]
    InvalidPrice(String),
    #[error("price must not be negative")]
    NegativePrice,
}

impl ListingDraft {
    /// Build a draft from raw form input.
    ///
    /// Required fields must be non-blank, the price text is coerced to a
    /// non-negative number, and an empty image field normalizes to `None`.
    pub fn from_input(
        title: &str,
        price: &str,
        location: &str,
        description: &str,
        image_url: &str,
    ) -> Result<Self, DraftError> {
        let title = required("title", title)?;
        let price = parse_price(price)?;
        let location = required("location", location)?;
        let description = required("description", description)?;

        let image_url = match image_url.trim() {
            "" => None,
            url => Some(url.to_string()),
        };

        Ok(Self {
            title,
            price,
            location,
            description,
            image_url,
        })
    }
}

fn required(name: &'static str, value: &str) -> Result<String, DraftError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(DraftError::MissingField(name))
    } else {
        Ok(trimmed.to_string())
    }
}

fn parse_price(text: &str) -> Result<f64, DraftError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DraftError::MissingField("price"));
    }
    let price: f64 = trimmed
        .parse()
        .map_err(|_| DraftError::InvalidPrice(trimmed.to_string()))?;
    if !price.is_finite() {
        return Err(DraftError::InvalidPrice(trimmed.to_string()));
    }
    if price < 0.0 {
        return Err(DraftError::NegativePrice);
    }
    Ok(price)
}

/// A server-generated bullet-point synopsis of a listing's description.
///
/// Fetched on demand, never persisted, discarded on navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub bullets: Vec<String>,
}

impl Summary {
    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty()
    }
}

/// Format a price for display, dropping the cents when they are zero.
pub fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("${}", price as i64)
    } else {
        format!("${:.2}", price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_coerces_price_text_to_number() {
        let draft =
            ListingDraft::from_input("My Listing", "1234", "City", "Nice place", "").unwrap();
        assert_eq!(draft.price, 1234.0);
        assert_eq!(draft.title, "My Listing");
    }

    #[test]
    fn empty_image_field_normalizes_to_absent() {
        let draft = ListingDraft::from_input("T", "1", "L", "D", "   ").unwrap();
        assert_eq!(draft.image_url, None);

        let json = serde_json::to_value(&draft).unwrap();
        assert!(json["image_url"].is_null(), "absent image must be null");
    }

    #[test]
    fn non_empty_image_field_is_kept() {
        let draft =
            ListingDraft::from_input("T", "1", "L", "D", "https://example.com/p.jpg").unwrap();
        assert_eq!(draft.image_url.as_deref(), Some("https://example.com/p.jpg"));
    }

    #[test]
    fn blank_required_fields_are_rejected() {
        let err = ListingDraft::from_input("  ", "1", "L", "D", "").unwrap_err();
        assert_eq!(err, DraftError::MissingField("title"));

        let err = ListingDraft::from_input("T", "1", "", "D", "").unwrap_err();
        assert_eq!(err, DraftError::MissingField("location"));

        let err = ListingDraft::from_input("T", "1", "L", " ", "").unwrap_err();
        assert_eq!(err, DraftError::MissingField("description"));
    }

    #[test]
    fn bad_price_text_is_rejected() {
        let err = ListingDraft::from_input("T", "cheap", "L", "D", "").unwrap_err();
        assert_eq!(err, DraftError::InvalidPrice("cheap".to_string()));

        let err = ListingDraft::from_input("T", "-5", "L", "D", "").unwrap_err();
        assert_eq!(err, DraftError::NegativePrice);

        let err = ListingDraft::from_input("T", "", "L", "D", "").unwrap_err();
        assert_eq!(err, DraftError::MissingField("price"));
    }

    #[test]
    fn zero_price_is_allowed() {
        let draft = ListingDraft::from_input("T", "0", "L", "D", "").unwrap();
        assert_eq!(draft.price, 0.0);
    }

    #[test]
    fn listing_deserializes_with_and_without_image() {
        let listing: Listing = serde_json::from_str(
            r#"{"id":42,"title":"Test Home","price":1234,"location":"Loc","description":"A. B. C."}"#,
        )
        .unwrap();
        assert_eq!(listing.id, 42);
        assert_eq!(listing.title, "Test Home");
        assert_eq!(listing.image_url, None);

        let listing: Listing = serde_json::from_str(
            r#"{"id":1,"title":"T","price":1.0,"location":"L","description":"D","image_url":"u"}"#,
        )
        .unwrap();
        assert_eq!(listing.image_url.as_deref(), Some("u"));
    }

    #[test]
    fn prices_format_for_display() {
        assert_eq!(format_price(1234.0), "$1234");
        assert_eq!(format_price(999.5), "$999.50");
        assert_eq!(format_price(0.0), "$0");
    }
}
