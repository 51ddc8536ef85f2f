//! Affiliate redirect URL construction
//!
//! Parameter names and casing are fixed by the partner search endpoint.

use std::fmt;
use std::sync::LazyLock;

use serde::Serialize;
use url::Url;

use crate::record::BookingRecord;

pub const PARTNER_SEARCH_ENDPOINT: &str = "https://www.agoda.com/partners/partnersearch.aspx";
pub const PARTNER_SITE_ID: &str = "1917614";

static ENDPOINT: LazyLock<Url> =
    LazyLock::new(|| Url::parse(PARTNER_SEARCH_ENDPOINT).expect("valid endpoint"));

/// Fully formed redirect URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RedirectUrl(String);

impl RedirectUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RedirectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Query parameters in wire order. Empty values are kept here and dropped
/// during serialization.
pub fn redirect_params(record: &BookingRecord) -> Vec<(&'static str, String)> {
    let check_in = &record.check_in_date;
    let check_out = &record.check_out_date;

    vec![
        ("site_id", PARTNER_SITE_ID.to_string()),
        ("CkInDay", check_in.day().to_string()),
        ("CkInMonth", check_in.month().to_string()),
        ("CkInYear", check_in.year().to_string()),
        ("CkOutDay", check_out.day().to_string()),
        ("CkOutMonth", check_out.month().to_string()),
        ("CkOutYear", check_out.year().to_string()),
        ("selectedproperty", record.property_id.clone()),
        ("NumberOfAdults", record.adult_count.to_string()),
        ("NumberOfChildren", record.child_count.to_string()),
        ("NumberOfRooms", record.room_count.to_string()),
        ("UserCountry", record.country_origin.clone()),
        ("Currency", record.currency_code.clone()),
    ]
}

pub fn build_redirect_url(record: &BookingRecord) -> RedirectUrl {
    let mut url = ENDPOINT.clone();
    {
        let mut query = url.query_pairs_mut();
        for (name, value) in redirect_params(record) {
            if value.is_empty() {
                tracing::debug!(param = name, "omitting empty redirect parameter");
                continue;
            }
            query.append_pair(name, &value);
        }
    }

    tracing::debug!(url = %url, "redirect url built");
    RedirectUrl(url.into())
}
