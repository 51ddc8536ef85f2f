//! Page URL gate run before any DOM access.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ExtractionError;

static SUPPORTED_PAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"agoda\.com/(.*/hotel/|book/)").expect("valid regex"));

const UNSUPPORTED_SITE_PAGE: &str =
    "This extension only works on Agoda property pages or checkout pages.";
const OFF_SITE: &str = "This extension only works on Agoda property pages or checkout pages. Please navigate to an Agoda page.";

/// Accept hotel and checkout page URLs; reject everything else with a message
/// suited to whether the user is on the booking site at all.
pub fn check_page_url(page_url: &str) -> Result<(), ExtractionError> {
    if SUPPORTED_PAGE_RE.is_match(page_url) {
        return Ok(());
    }

    let on_site = page_url.contains("agoda.com");
    tracing::debug!(page_url, on_site, "page url rejected");
    Err(ExtractionError::UnsupportedPage {
        message: if on_site { UNSUPPORTED_SITE_PAGE } else { OFF_SITE },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hotel_and_checkout_urls_accepted() {
        assert!(check_page_url("https://www.agoda.com/en-gb/riverside/hotel/bangkok-th.html").is_ok());
        assert!(check_page_url("https://www.agoda.com/book/?hotel=1").is_ok());
        assert!(check_page_url("https://secure.agoda.com/book/payment").is_ok());
    }

    #[test]
    fn test_other_agoda_page_rejected() {
        let err = check_page_url("https://www.agoda.com/en-gb/search?city=9395").unwrap_err();
        assert_eq!(err.to_string(), UNSUPPORTED_SITE_PAGE);
        assert_eq!(err.title(), "Invalid Page");
    }

    #[test]
    fn test_off_site_and_empty_rejected() {
        let err = check_page_url("https://example.com/hotel/").unwrap_err();
        assert_eq!(err.to_string(), OFF_SITE);

        let err = check_page_url("").unwrap_err();
        assert_eq!(err.to_string(), OFF_SITE);
    }
}
