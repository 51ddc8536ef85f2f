//! Page layout detection
//!
//! Checkout markers take precedence: a page that carries all three checkout
//! form inputs is a checkout page even if property markers are also present.

use std::fmt;

use serde::Serialize;

use crate::error::ExtractionError;
use crate::snapshot::{ElementQuery, PageSnapshot};

pub const CHECKOUT_PROPERTY_ID: ElementQuery = ElementQuery::InputNamed("hotel_id");
pub const CHECKOUT_CHECK_IN: ElementQuery = ElementQuery::InputNamed("travel_start_date");
pub const CHECKOUT_CHECK_OUT: ElementQuery = ElementQuery::InputNamed("travel_end_date");

const CHECKOUT_MARKERS: [ElementQuery; 3] =
    [CHECKOUT_PROPERTY_ID, CHECKOUT_CHECK_IN, CHECKOUT_CHECK_OUT];

/// One of the two known page structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Booking form with hidden inputs.
    Checkout,
    /// Property detail page with data attributes.
    Property,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checkout => f.write_str("checkout"),
            Self::Property => f.write_str("hotel"),
        }
    }
}

/// Pick the layout for a snapshot. Falls back to `Property` without checking
/// its markers; the property extractor reports them missing.
pub fn detect_layout(snapshot: &dyn PageSnapshot) -> Result<Layout, ExtractionError> {
    for marker in &CHECKOUT_MARKERS {
        if snapshot.find(marker)?.is_none() {
            tracing::debug!(marker = %marker.to_css(), "checkout marker absent, using property layout");
            return Ok(Layout::Property);
        }
    }

    tracing::debug!("all checkout markers present, using checkout layout");
    Ok(Layout::Checkout)
}
