//! Booking field extraction
//!
//! Each layout has its own strategy for locating raw fields. Validation,
//! locale scanning and record assembly are shared.

mod checkout_extractor;
mod locale_extractor;
mod occupancy;
mod property_extractor;

pub use checkout_extractor::*;
pub use locale_extractor::*;
pub use occupancy::*;
pub use property_extractor::*;

use crate::error::ExtractionError;
use crate::layout::Layout;
use crate::record::{BookingRecord, StayDate};
use crate::snapshot::PageSnapshot;

/// One raw value and the page field it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawField {
    pub source: &'static str,
    pub value: Option<String>,
}

impl RawField {
    pub fn new(source: &'static str, value: Option<&str>) -> Self {
        Self {
            source,
            value: value.map(String::from),
        }
    }
}

/// Located but unparsed fields for one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFieldSet {
    pub property_id: RawField,
    pub check_in_date: RawField,
    pub check_out_date: RawField,
    /// Occupancy text; guest details on checkout, the occupancy label on
    /// property pages.
    pub occupancy_text: Option<String>,
    /// Price breakdown text carrying the room count (checkout only).
    pub room_text: Option<String>,
}

struct RequiredFields {
    property_id: String,
    check_in_date: StayDate,
    check_out_date: StayDate,
}

impl RawFieldSet {
    fn required(&self, layout: Layout) -> Result<RequiredFields, ExtractionError> {
        let malformed = |field: &RawField| ExtractionError::MalformedField {
            layout,
            field: field.source,
        };

        let property_id = self
            .property_id
            .value
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| malformed(&self.property_id))?;

        let check_in_date = self
            .check_in_date
            .value
            .as_deref()
            .and_then(StayDate::parse)
            .ok_or_else(|| malformed(&self.check_in_date))?;

        let check_out_date = self
            .check_out_date
            .value
            .as_deref()
            .and_then(StayDate::parse)
            .ok_or_else(|| malformed(&self.check_out_date))?;

        Ok(RequiredFields {
            property_id: property_id.to_string(),
            check_in_date,
            check_out_date,
        })
    }
}

/// Per-layout strategy for locating and interpreting fields.
pub trait LayoutExtractor {
    fn layout(&self) -> Layout;

    /// Locate raw fields. A missing structural element is a `PageMismatch`.
    fn locate(&self, snapshot: &dyn PageSnapshot) -> Result<RawFieldSet, ExtractionError>;

    fn occupancy(&self, raw: &RawFieldSet) -> ParsedOccupancy;
}

static CHECKOUT: CheckoutExtractor = CheckoutExtractor;
static PROPERTY: PropertyExtractor = PropertyExtractor;

pub fn extractor_for(layout: Layout) -> &'static dyn LayoutExtractor {
    match layout {
        Layout::Checkout => &CHECKOUT,
        Layout::Property => &PROPERTY,
    }
}

/// Extract a booking record from a page already classified as `layout`.
pub fn extract_booking(
    snapshot: &dyn PageSnapshot,
    layout: Layout,
) -> Result<BookingRecord, ExtractionError> {
    extract_booking_with(snapshot, layout, &ScriptKeyScanner)
}

/// Like [`extract_booking`], with a caller-supplied locale scanner.
pub fn extract_booking_with(
    snapshot: &dyn PageSnapshot,
    layout: Layout,
    scanner: &dyn LocaleScanner,
) -> Result<BookingRecord, ExtractionError> {
    let extractor = extractor_for(layout);
    let raw = extractor.locate(snapshot)?;
    let required = raw.required(layout).inspect_err(|err| {
        tracing::debug!(%layout, error = %err, "required field rejected");
    })?;

    let parsed = extractor.occupancy(&raw);
    let locale = scanner.scan(&snapshot.inline_scripts());

    tracing::debug!(
        %layout,
        property_id = %required.property_id,
        check_in = %required.check_in_date,
        check_out = %required.check_out_date,
        occupancy_defaulted = parsed.defaulted,
        "booking record extracted"
    );

    Ok(BookingRecord {
        property_id: required.property_id,
        check_in_date: required.check_in_date,
        check_out_date: required.check_out_date,
        adult_count: parsed.occupancy.adults,
        child_count: parsed.occupancy.children,
        room_count: parsed.occupancy.rooms,
        country_origin: locale.country_origin.unwrap_or_default(),
        currency_code: locale.currency_code.unwrap_or_default(),
        occupancy_defaulted: parsed.defaulted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::HtmlSnapshot;

    const CHECKOUT_HTML: &str = r#"
    <html>
    <head>
        <script>window.pageParams = {"countryOrigin":"US","currencyCode":"USD"};</script>
    </head>
    <body>
        <form>
            <input type="hidden" name="hotel_id" value="123">
            <input type="hidden" name="travel_start_date" value="2024-05-01">
            <input type="hidden" name="travel_end_date" value="2024-05-05">
        </form>
        <div data-selenium="guest-details">2 adults, 1 child</div>
        <div data-selenium="room-price-breakdown">(2 rooms x $50)</div>
    </body>
    </html>
    "#;

    #[test]
    fn test_dispatch_matches_layout() {
        assert_eq!(extractor_for(Layout::Checkout).layout(), Layout::Checkout);
        assert_eq!(extractor_for(Layout::Property).layout(), Layout::Property);
    }

    #[test]
    fn test_extract_checkout_record() {
        let snapshot = HtmlSnapshot::parse(CHECKOUT_HTML);
        let record = extract_booking(&snapshot, Layout::Checkout).unwrap();

        assert_eq!(record.property_id, "123");
        assert_eq!(record.check_in_date.as_str(), "2024-05-01");
        assert_eq!(record.check_out_date.as_str(), "2024-05-05");
        assert_eq!((record.adult_count, record.child_count, record.room_count), (2, 1, 2));
        assert_eq!(record.country_origin, "US");
        assert_eq!(record.currency_code, "USD");
        assert!(!record.occupancy_defaulted);
    }

    #[test]
    fn test_forced_checkout_on_property_page_is_mismatch() {
        let snapshot = HtmlSnapshot::parse(r#"<div data-element-property-id="1"></div>"#);
        let err = extract_booking(&snapshot, Layout::Checkout).unwrap_err();
        assert!(matches!(err, ExtractionError::PageMismatch { .. }));
    }

    #[test]
    fn test_blank_property_id_is_malformed() {
        let html = CHECKOUT_HTML.replace(r#"value="123""#, r#"value="  ""#);
        let snapshot = HtmlSnapshot::parse(&html);
        let err = extract_booking(&snapshot, Layout::Checkout).unwrap_err();
        assert_eq!(
            err,
            ExtractionError::MalformedField {
                layout: Layout::Checkout,
                field: "hotel_id",
            }
        );
    }

    struct FixedLocale;

    impl LocaleScanner for FixedLocale {
        fn scan(&self, _scripts: &[String]) -> Locale {
            Locale {
                country_origin: Some("JP".into()),
                currency_code: None,
            }
        }
    }

    #[test]
    fn test_custom_locale_scanner() {
        let snapshot = HtmlSnapshot::parse(CHECKOUT_HTML);
        let record = extract_booking_with(&snapshot, Layout::Checkout, &FixedLocale).unwrap();
        assert_eq!(record.country_origin, "JP");
        assert_eq!(record.currency_code, "");
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let snapshot = HtmlSnapshot::parse(CHECKOUT_HTML);
        let first = extract_booking(&snapshot, Layout::Checkout).unwrap();
        let second = extract_booking(&snapshot, Layout::Checkout).unwrap();
        assert_eq!(first, second);
    }
}
