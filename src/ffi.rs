//! FFI interface for the native host
//!
//! The host hands over the page HTML and a JSON options object and gets back
//! a JSON outcome. Extraction failures are part of the outcome; `error_ptr`
//! is reserved for faults at the boundary itself.

use std::ffi::{c_char, CStr, CString};
use std::panic::{self, AssertUnwindSafe};
use std::ptr;

use serde::Serialize;

use crate::config::ExtractOptions;
use crate::error::ExtractionError;
use crate::record::BookingRecord;
use crate::redirect::RedirectUrl;
use crate::snapshot::HtmlSnapshot;
use crate::{run_extraction, Layout};

/// Result struct returned to the host
/// Both pointers are owned by Rust and must be freed via free_extraction_result
#[repr(C)]
pub struct ExtractionResultFFI {
    /// JSON-serialized outcome (null-terminated)
    pub json_ptr: *mut c_char,
    /// Boundary error message (null-terminated), or null when json_ptr is set
    pub error_ptr: *mut c_char,
}

/// Outcome of one call as seen by the host.
#[derive(Debug, Serialize)]
#[serde(tag = "status")]
pub enum ExtractionOutcome {
    #[serde(rename = "ok", rename_all = "camelCase")]
    Success {
        layout: Layout,
        record: BookingRecord,
        redirect_url: RedirectUrl,
    },
    #[serde(rename = "error")]
    Failure {
        title: &'static str,
        message: String,
    },
}

impl From<Result<crate::Extraction, ExtractionError>> for ExtractionOutcome {
    fn from(result: Result<crate::Extraction, ExtractionError>) -> Self {
        match result {
            Ok(extraction) => Self::Success {
                layout: extraction.layout,
                record: extraction.record,
                redirect_url: extraction.redirect_url,
            },
            Err(err) => Self::Failure {
                title: err.title(),
                message: err.to_string(),
            },
        }
    }
}

/// Extract booking data from page HTML and build the redirect URL.
///
/// # Arguments
/// * `html_ptr` - Pointer to HTML content (UTF-8, not necessarily null-terminated)
/// * `html_len` - Length of HTML content in bytes
/// * `options_json` - JSON-serialized ExtractOptions (null-terminated), or null for defaults
///
/// # Returns
/// ExtractionResultFFI with either json_ptr set (outcome) or error_ptr set (boundary fault)
///
/// # Safety
/// - `html_ptr` must point to valid memory of at least `html_len` bytes
/// - `options_json` must be null or a valid null-terminated C string
/// - Caller must free the result via `free_extraction_result`
#[no_mangle]
pub unsafe extern "C" fn extract_booking_redirect(
    html_ptr: *const c_char,
    html_len: usize,
    options_json: *const c_char,
) -> ExtractionResultFFI {
    let html = if html_ptr.is_null() || html_len == 0 {
        String::new()
    } else {
        let slice = std::slice::from_raw_parts(html_ptr as *const u8, html_len);
        match std::str::from_utf8(slice) {
            Ok(s) => s.to_string(),
            Err(_) => return make_error_result("Invalid UTF-8 in HTML content"),
        }
    };

    let options = if options_json.is_null() {
        ExtractOptions::default()
    } else {
        let options_str = match CStr::from_ptr(options_json).to_str() {
            Ok(s) => s,
            Err(_) => return make_error_result("Invalid UTF-8 in options JSON"),
        };
        match ExtractOptions::from_json(options_str) {
            Ok(o) => o,
            Err(e) => return make_error_result(&format!("Failed to parse options JSON: {}", e)),
        }
    };

    let outcome = extract_outcome(&html, &options);

    match serde_json::to_string(&outcome) {
        Ok(json) => match CString::new(json) {
            Ok(cstr) => ExtractionResultFFI {
                json_ptr: cstr.into_raw(),
                error_ptr: ptr::null_mut(),
            },
            Err(_) => make_error_result("Result JSON contains null bytes"),
        },
        Err(e) => make_error_result(&format!("Failed to serialize result: {}", e)),
    }
}

/// Free an ExtractionResultFFI returned by extract_booking_redirect
///
/// # Safety
/// - `result` must have been returned by `extract_booking_redirect`
/// - Must only be called once per result
#[no_mangle]
pub unsafe extern "C" fn free_extraction_result(result: ExtractionResultFFI) {
    if !result.json_ptr.is_null() {
        drop(CString::from_raw(result.json_ptr));
    }
    if !result.error_ptr.is_null() {
        drop(CString::from_raw(result.error_ptr));
    }
}

/// Run the pipeline on raw HTML; a panic inside extraction becomes an
/// `UnexpectedFailure` outcome instead of unwinding into the host.
pub fn extract_outcome(html: &str, options: &ExtractOptions) -> ExtractionOutcome {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let snapshot = HtmlSnapshot::parse(html);
        run_extraction(&snapshot, options)
    }))
    .unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "extraction panicked".to_string());
        tracing::debug!(%message, "extraction panicked");
        Err(ExtractionError::UnexpectedFailure(message))
    });

    result.into()
}

// Helper to create error result
fn make_error_result(msg: &str) -> ExtractionResultFFI {
    let error_cstr = CString::new(msg).unwrap_or_else(|_| c"Unknown error".to_owned());
    ExtractionResultFFI {
        json_ptr: ptr::null_mut(),
        error_ptr: error_cstr.into_raw(),
    }
}
