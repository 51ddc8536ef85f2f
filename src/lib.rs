//! Booking Redirect Parser
//!
//! Extracts stay parameters from a travel-booking page snapshot and builds
//! the partner search redirect URL:
//! - Layout detection (checkout form vs property detail page)
//! - Field extraction with occupancy and locale parsing
//! - Redirect URL serialization
//! - FFI interface for a native host

pub mod config;
pub mod error;
pub mod extractors;
pub mod ffi;
pub mod layout;
pub mod page_url;
pub mod record;
pub mod redirect;
pub mod snapshot;

pub use config::ExtractOptions;
pub use error::{ExtractionError, SnapshotError};
pub use extractors::{extract_booking, extract_booking_with, LocaleScanner, ScriptKeyScanner};
pub use layout::{detect_layout, Layout};
pub use page_url::check_page_url;
pub use record::{BookingRecord, Occupancy, StayDate};
pub use redirect::{build_redirect_url, RedirectUrl};
pub use snapshot::{ElementQuery, ElementView, HtmlSnapshot, PageSnapshot};

use serde::Serialize;

/// Successful outcome of one call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Extraction {
    pub layout: Layout,
    pub record: BookingRecord,
    pub redirect_url: RedirectUrl,
}

/// Run the whole pipeline on one snapshot: page gate, layout detection,
/// field extraction, URL building.
pub fn run_extraction(
    snapshot: &dyn PageSnapshot,
    options: &ExtractOptions,
) -> Result<Extraction, ExtractionError> {
    if let Some(page_url) = options.page_url.as_deref() {
        check_page_url(page_url)?;
    }

    let layout = detect_layout(snapshot)?;
    let record = extract_booking(snapshot, layout)?;
    let redirect_url = build_redirect_url(&record);

    Ok(Extraction {
        layout,
        record,
        redirect_url,
    })
}
