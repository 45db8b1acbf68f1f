use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::BookingError;

/// Owner and event type named by a booking link, e.g. `/alice/intro-call`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct EventIdentity {
    pub owner_handle: String,
    pub event_slug: String,
}

/// Splits a booking link into its owner handle and event slug.
///
/// Empty path segments are skipped, so leading, trailing and doubled slashes
/// don't matter. Anything after the second segment is ignored.
pub fn parse_booking_url(url: &str) -> Result<EventIdentity, BookingError> {
    let parsed = Url::parse(url).map_err(|e| BookingError::InvalidUrl(e.to_string()))?;
    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|parts| parts.filter(|part| !part.is_empty()).collect())
        .unwrap_or_default();

    match segments.as_slice() {
        [owner, slug, ..] => Ok(EventIdentity {
            owner_handle: owner.to_string(),
            event_slug: slug.to_string(),
        }),
        _ => Err(BookingError::InvalidUrl(format!(
            "expected /<owner>/<event> in path, found {} segment(s)",
            segments.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_empty_segments() {
        let identity = parse_booking_url("https://host//alice///intro-call/").unwrap();
        assert_eq!(identity.owner_handle, "alice");
        assert_eq!(identity.event_slug, "intro-call");
    }

    #[test]
    fn keeps_segments_verbatim() {
        let identity = parse_booking_url("https://host/j%C3%BCrgen/30min#book").unwrap();
        assert_eq!(identity.owner_handle, "j%C3%BCrgen");
        assert_eq!(identity.event_slug, "30min");
    }

    #[test]
    fn root_path_has_no_segments() {
        let err = parse_booking_url("https://host/").unwrap_err();
        assert!(err.to_string().contains("found 0 segment(s)"));
    }

    #[test]
    fn cannot_be_a_base_url_is_rejected() {
        let err = parse_booking_url("mailto:alice@example.com").unwrap_err();
        assert!(matches!(err, BookingError::InvalidUrl(_)));
    }

    #[test]
    fn parse_failure_keeps_parser_message() {
        let err = parse_booking_url("not a url").unwrap_err();
        assert_eq!(
            err,
            BookingError::InvalidUrl("relative URL without a base".to_string())
        );
    }
}
