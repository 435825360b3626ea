// Page-number clamping for paginated TMDB listings
// Author: kelexine (https://github.com/kelexine)

/// Upper bound for recommendation, review and similar-title listings.
pub const LISTING_MAX_PAGE: u32 = 50;

/// Upper bound for search and trending listings.
pub const CATALOG_MAX_PAGE: u32 = 500;

/// Parse a raw `page` query value and clamp it to `[1, max]`.
///
/// Absent or non-numeric values fall back to page 1; numbers too large to
/// parse clamp to `max`. Applied before the value reaches TMDB or a cache
/// key, so the key space stays bounded.
pub fn clamp_page(raw: Option<&str>, max: u32) -> u32 {
    let max = max.max(1);
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return 1;
    };

    match raw.parse::<i64>() {
        Ok(page) => page.clamp(1, i64::from(max)) as u32,
        Err(_) if raw.bytes().all(|b| b.is_ascii_digit()) => max,
        Err(_) => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_defaults_to_first_page() {
        assert_eq!(clamp_page(None, LISTING_MAX_PAGE), 1);
        assert_eq!(clamp_page(Some(""), LISTING_MAX_PAGE), 1);
        assert_eq!(clamp_page(Some("abc"), LISTING_MAX_PAGE), 1);
    }

    #[test]
    fn test_out_of_range_pages() {
        assert_eq!(clamp_page(Some("0"), LISTING_MAX_PAGE), 1);
        assert_eq!(clamp_page(Some("-7"), LISTING_MAX_PAGE), 1);
        assert_eq!(clamp_page(Some("9999"), LISTING_MAX_PAGE), 50);
        assert_eq!(clamp_page(Some("9999"), CATALOG_MAX_PAGE), 500);
        assert_eq!(clamp_page(Some("99999999999999999999999"), CATALOG_MAX_PAGE), 500);
    }

    #[test]
    fn test_in_range_page_kept() {
        assert_eq!(clamp_page(Some("7"), LISTING_MAX_PAGE), 7);
        assert_eq!(clamp_page(Some(" 12 "), LISTING_MAX_PAGE), 12);
    }

    proptest! {
        #[test]
        fn prop_result_always_in_range(raw in any::<i64>(), max in 1u32..1000) {
            let page = clamp_page(Some(raw.to_string().as_str()), max);
            prop_assert!((1..=max).contains(&page));
        }

        #[test]
        fn prop_in_range_is_identity(page in 1u32..=500) {
            prop_assert_eq!(clamp_page(Some(page.to_string().as_str()), CATALOG_MAX_PAGE), page);
        }
    }
}
