//! Occupancy parsing
//!
//! Both layouts describe the party in loose natural language: the checkout
//! page splits guests and rooms across two elements, the property page packs
//! everything into one accessible label. Whatever is parsed, the result is
//! clamped so adults and rooms never drop below one.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::record::Occupancy;

static CHECKOUT_ADULTS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([0-9]+)\s*adult(s)?").expect("valid regex"));
static CHECKOUT_CHILDREN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i),\s*([0-9]+)\s*child(ren)?").expect("valid regex"));
static CHECKOUT_ROOMS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\(([0-9]+)\s*room(s)?\s*x").expect("valid regex"));

// "3 adults 1 room"
static LABEL_WITHOUT_CHILDREN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]+)\s*adults?\s*,?\s*([0-9]+)\s*rooms?").expect("valid regex")
});
// "2 adults, 2 children 1 room"
static LABEL_WITH_CHILDREN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]+)\s*adults?\s*,\s*([0-9]+)\s*child(?:ren)?\s*,?\s*([0-9]+)\s*rooms?")
        .expect("valid regex")
});

/// Outcome of parsing occupancy text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedOccupancy {
    pub occupancy: Occupancy,
    /// Set when a value the page should have carried was substituted.
    pub defaulted: bool,
}

fn capture_count(caps: &Captures<'_>, group: usize) -> Option<u32> {
    caps.get(group)?.as_str().parse().ok()
}

fn first_count(re: &Regex, text: &str) -> Option<u32> {
    re.captures(text).and_then(|caps| capture_count(&caps, 1))
}

/// Replace non-breaking space entities and characters with plain spaces.
pub fn normalize_nbsp(label: &str) -> String {
    label
        .replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&#xa0;", " ")
        .replace("&#xA0;", " ")
        .replace('\u{00a0}', " ")
}

/// Parse the checkout page's guest-details text ("2 adults, 1 child") and
/// price-breakdown text ("(2 rooms x $50)").
pub fn parse_checkout_occupancy(guest_text: Option<&str>, room_text: Option<&str>) -> ParsedOccupancy {
    let guest_text = guest_text.map(normalize_nbsp);
    let room_text = room_text.map(normalize_nbsp);

    let adults = guest_text
        .as_deref()
        .and_then(|text| first_count(&CHECKOUT_ADULTS_RE, text));
    let children = guest_text
        .as_deref()
        .and_then(|text| first_count(&CHECKOUT_CHILDREN_RE, text));
    let rooms = room_text
        .as_deref()
        .and_then(|text| first_count(&CHECKOUT_ROOMS_RE, text));

    match (adults, rooms) {
        (Some(adults), Some(rooms)) => {
            tracing::debug!(adults, ?children, rooms, "checkout occupancy parsed");
        }
        _ => {
            tracing::debug!(
                adults_found = adults.is_some(),
                rooms_found = rooms.is_some(),
                "checkout occupancy incomplete, applying defaults"
            );
        }
    }

    let defaults = Occupancy::default();
    ParsedOccupancy {
        occupancy: Occupancy {
            adults: adults.unwrap_or(defaults.adults),
            children: children.unwrap_or(defaults.children),
            rooms: rooms.unwrap_or(defaults.rooms),
        }
        .clamped(),
        defaulted: adults.is_none() || rooms.is_none(),
    }
}

/// Parse the property page's occupancy label. The children-free form is tried
/// before the form with a children clause; the first match wins.
pub fn parse_occupancy_label(label: Option<&str>) -> ParsedOccupancy {
    let parsed = label.map(normalize_nbsp).and_then(|label| {
        if let Some(caps) = LABEL_WITHOUT_CHILDREN_RE.captures(&label) {
            let occupancy = Occupancy {
                adults: capture_count(&caps, 1)?,
                children: 0,
                rooms: capture_count(&caps, 2)?,
            };
            tracing::debug!(?occupancy, pattern = "adults_rooms", "occupancy label matched");
            return Some(occupancy);
        }

        if let Some(caps) = LABEL_WITH_CHILDREN_RE.captures(&label) {
            let occupancy = Occupancy {
                adults: capture_count(&caps, 1)?,
                children: capture_count(&caps, 2)?,
                rooms: capture_count(&caps, 3)?,
            };
            tracing::debug!(
                ?occupancy,
                pattern = "adults_children_rooms",
                "occupancy label matched"
            );
            return Some(occupancy);
        }

        None
    });

    match parsed {
        Some(occupancy) => ParsedOccupancy {
            occupancy: occupancy.clamped(),
            defaulted: false,
        },
        None => {
            tracing::debug!(?label, "occupancy label unparseable, applying defaults");
            ParsedOccupancy {
                occupancy: Occupancy::default().clamped(),
                defaulted: true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occ(adults: u32, children: u32, rooms: u32) -> Occupancy {
        Occupancy {
            adults,
            children,
            rooms,
        }
    }

    #[test]
    fn test_checkout_full_text() {
        let parsed = parse_checkout_occupancy(Some("2 adults, 1 child"), Some("(2 rooms x $50)"));
        assert_eq!(parsed.occupancy, occ(2, 1, 2));
        assert!(!parsed.defaulted);
    }

    #[test]
    fn test_checkout_without_children() {
        let parsed = parse_checkout_occupancy(Some("1 adult"), Some("(1 room x 3 nights)"));
        assert_eq!(parsed.occupancy, occ(1, 0, 1));
        assert!(!parsed.defaulted);
    }

    #[test]
    fn test_checkout_plural_children() {
        let parsed = parse_checkout_occupancy(Some("2 Adults, 3 children"), Some("(1 room x $80)"));
        assert_eq!(parsed.occupancy, occ(2, 3, 1));
    }

    #[test]
    fn test_checkout_missing_elements_default() {
        let parsed = parse_checkout_occupancy(None, None);
        assert_eq!(parsed.occupancy, occ(1, 0, 1));
        assert!(parsed.defaulted);
    }

    #[test]
    fn test_checkout_unparseable_room_text_defaults_rooms() {
        let parsed = parse_checkout_occupancy(Some("3 adults"), Some("Total price"));
        assert_eq!(parsed.occupancy, occ(3, 0, 1));
        assert!(parsed.defaulted);
    }

    #[test]
    fn test_checkout_zero_adults_clamped() {
        let parsed = parse_checkout_occupancy(Some("0 adults"), Some("(0 rooms x $10)"));
        assert_eq!(parsed.occupancy, occ(1, 0, 1));
        assert!(!parsed.defaulted);
    }

    #[test]
    fn test_label_without_children() {
        let parsed = parse_occupancy_label(Some("3 adults 1 room"));
        assert_eq!(parsed.occupancy, occ(3, 0, 1));
        assert!(!parsed.defaulted);
    }

    #[test]
    fn test_label_with_children() {
        let parsed = parse_occupancy_label(Some("2 adults, 2 children 1 room"));
        assert_eq!(parsed.occupancy, occ(2, 2, 1));
        assert!(!parsed.defaulted);
    }

    #[test]
    fn test_label_with_nbsp_entities() {
        let parsed = parse_occupancy_label(Some("2&nbsp;adults,&nbsp;1&nbsp;child 2&nbsp;rooms"));
        assert_eq!(parsed.occupancy, occ(2, 1, 2));

        let parsed = parse_occupancy_label(Some("4\u{a0}adults 2\u{a0}rooms"));
        assert_eq!(parsed.occupancy, occ(4, 0, 2));
    }

    #[test]
    fn test_label_unparseable_defaults() {
        let parsed = parse_occupancy_label(Some("Select guests"));
        assert_eq!(parsed.occupancy, occ(1, 0, 1));
        assert!(parsed.defaulted);

        let parsed = parse_occupancy_label(None);
        assert!(parsed.defaulted);
    }

    #[test]
    fn test_label_zero_values_clamped() {
        let parsed = parse_occupancy_label(Some("0 adults, 0 children 0 rooms"));
        assert_eq!(parsed.occupancy, occ(1, 0, 1));
        assert!(!parsed.defaulted);
    }

    #[test]
    fn test_label_overflowing_count_defaults() {
        let parsed = parse_occupancy_label(Some("99999999999 adults 1 room"));
        assert_eq!(parsed.occupancy, occ(1, 0, 1));
        assert!(parsed.defaulted);
    }
}
