//! Checkout page extraction
//!
//! The booking form carries property id and dates as hidden inputs; guests
//! and rooms are only present as display text.

use crate::error::ExtractionError;
use crate::layout::{Layout, CHECKOUT_CHECK_IN, CHECKOUT_CHECK_OUT, CHECKOUT_PROPERTY_ID};
use crate::snapshot::{ElementQuery, ElementView, PageSnapshot};

use super::{parse_checkout_occupancy, LayoutExtractor, ParsedOccupancy, RawField, RawFieldSet};

pub const CHECKOUT_GUEST_DETAILS: ElementQuery =
    ElementQuery::AttributeEquals("data-selenium", "guest-details");
pub const CHECKOUT_ROOM_BREAKDOWN: ElementQuery =
    ElementQuery::AttributeEquals("data-selenium", "room-price-breakdown");

#[derive(Debug, Clone, Copy, Default)]
pub struct CheckoutExtractor;

fn require_input(
    snapshot: &dyn PageSnapshot,
    query: &ElementQuery,
    name: &'static str,
) -> Result<ElementView, ExtractionError> {
    snapshot
        .find(query)?
        .ok_or(ExtractionError::PageMismatch { missing: name })
}

impl LayoutExtractor for CheckoutExtractor {
    fn layout(&self) -> Layout {
        Layout::Checkout
    }

    fn locate(&self, snapshot: &dyn PageSnapshot) -> Result<RawFieldSet, ExtractionError> {
        let hotel = require_input(snapshot, &CHECKOUT_PROPERTY_ID, "hotel_id")?;
        let check_in = require_input(snapshot, &CHECKOUT_CHECK_IN, "travel_start_date")?;
        let check_out = require_input(snapshot, &CHECKOUT_CHECK_OUT, "travel_end_date")?;

        let guest_text = snapshot
            .find(&CHECKOUT_GUEST_DETAILS)?
            .map(|el| el.text().to_string());
        let room_text = snapshot
            .find(&CHECKOUT_ROOM_BREAKDOWN)?
            .map(|el| el.text().to_string());

        Ok(RawFieldSet {
            property_id: RawField::new("hotel_id", hotel.value()),
            check_in_date: RawField::new("travel_start_date", check_in.value()),
            check_out_date: RawField::new("travel_end_date", check_out.value()),
            occupancy_text: guest_text,
            room_text,
        })
    }

    fn occupancy(&self, raw: &RawFieldSet) -> ParsedOccupancy {
        parse_checkout_occupancy(raw.occupancy_text.as_deref(), raw.room_text.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::HtmlSnapshot;

    #[test]
    fn test_locate_checkout_fields() {
        let html = r#"
        <form>
            <input name="hotel_id" value="123">
            <input name="travel_start_date" value="2024-05-01">
            <input name="travel_end_date" value="05/05/2024">
        </form>
        <p data-selenium="guest-details">
            2 adults,
            1 child
        </p>
        "#;

        let raw = CheckoutExtractor
            .locate(&HtmlSnapshot::parse(html))
            .unwrap();
        assert_eq!(raw.property_id.value.as_deref(), Some("123"));
        assert_eq!(raw.check_out_date.source, "travel_end_date");
        assert_eq!(raw.check_out_date.value.as_deref(), Some("05/05/2024"));
        assert!(raw.occupancy_text.unwrap().starts_with("2 adults,"));
        assert!(raw.room_text.is_none());
    }

    #[test]
    fn test_input_without_value_attribute() {
        let html = r#"
        <input name="hotel_id">
        <input name="travel_start_date" value="2024-05-01">
        <input name="travel_end_date" value="2024-05-05">
        "#;

        let raw = CheckoutExtractor
            .locate(&HtmlSnapshot::parse(html))
            .unwrap();
        assert!(raw.property_id.value.is_none());
    }

    #[test]
    fn test_multiline_guest_text_parses() {
        let raw = RawFieldSet {
            occupancy_text: Some("2 adults,\n            1 child".into()),
            room_text: Some("(1 room x 2 nights)".into()),
            ..RawFieldSet::default()
        };
        let parsed = CheckoutExtractor.occupancy(&raw);
        assert_eq!(parsed.occupancy.adults, 2);
        assert_eq!(parsed.occupancy.children, 1);
        assert_eq!(parsed.occupancy.rooms, 1);
    }
}
