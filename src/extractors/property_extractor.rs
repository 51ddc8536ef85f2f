//! Property detail page extraction

use crate::error::ExtractionError;
use crate::layout::Layout;
use crate::snapshot::{ElementQuery, PageSnapshot};

use super::{parse_occupancy_label, LayoutExtractor, ParsedOccupancy, RawField, RawFieldSet};

pub const PROPERTY_ID_ATTR: &str = "data-element-property-id";
pub const STAY_DATE_ATTR: &str = "data-date";
pub const OCCUPANCY_LABEL_ATTR: &str = "aria-label";

pub const PROPERTY_ELEMENT: ElementQuery = ElementQuery::HasAttribute(PROPERTY_ID_ATTR);
pub const PROPERTY_CHECK_IN: ElementQuery =
    ElementQuery::AttributeEquals("data-selenium", "checkInBox");
pub const PROPERTY_CHECK_OUT: ElementQuery =
    ElementQuery::AttributeEquals("data-selenium", "checkOutBox");
pub const PROPERTY_OCCUPANCY: ElementQuery =
    ElementQuery::AttributeEquals("data-selenium", "occupancyBox");

#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyExtractor;

impl LayoutExtractor for PropertyExtractor {
    fn layout(&self) -> Layout {
        Layout::Property
    }

    fn locate(&self, snapshot: &dyn PageSnapshot) -> Result<RawFieldSet, ExtractionError> {
        let hotel = snapshot.find(&PROPERTY_ELEMENT)?;
        let check_in = snapshot.find(&PROPERTY_CHECK_IN)?;
        let check_out = snapshot.find(&PROPERTY_CHECK_OUT)?;

        let (hotel, check_in, check_out) = match (hotel, check_in, check_out) {
            (Some(hotel), Some(check_in), Some(check_out)) => (hotel, check_in, check_out),
            (None, _, _) => return Err(ExtractionError::PageMismatch { missing: PROPERTY_ID_ATTR }),
            (_, None, _) => return Err(ExtractionError::PageMismatch { missing: "checkInBox" }),
            (_, _, None) => return Err(ExtractionError::PageMismatch { missing: "checkOutBox" }),
        };

        let occupancy_label = snapshot
            .find(&PROPERTY_OCCUPANCY)?
            .and_then(|el| el.attr(OCCUPANCY_LABEL_ATTR).map(String::from));

        Ok(RawFieldSet {
            property_id: RawField::new(PROPERTY_ID_ATTR, hotel.attr(PROPERTY_ID_ATTR)),
            check_in_date: RawField::new("checkInBox", check_in.attr(STAY_DATE_ATTR)),
            check_out_date: RawField::new("checkOutBox", check_out.attr(STAY_DATE_ATTR)),
            occupancy_text: occupancy_label,
            room_text: None,
        })
    }

    fn occupancy(&self, raw: &RawFieldSet) -> ParsedOccupancy {
        parse_occupancy_label(raw.occupancy_text.as_deref())
    }
}
