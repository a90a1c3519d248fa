//! Text field sanitisation for submitted admin form values.

use std::sync::LazyLock;

use regex::Regex;

#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static SCRIPT_STYLE_ELEMENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style)[^>]*>.*?</(script|style)>")
        .expect("script/style pattern should compile")
});

#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern should compile"));

#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static PERCENT_OCTETS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%[0-9a-fA-F]{2}").expect("percent octet pattern should compile")
});

/// Sanitise a single-line text field.
///
/// Removes `<script>` and `<style>` elements along with their content, then
/// strips the remaining HTML tags and percent-encoded octets, turns control characters
/// (including line breaks and tabs) into spaces, collapses runs of whitespace
/// and trims the result.
pub fn sanitize_text_field(input: &str) -> String {
    let without_elements = SCRIPT_STYLE_ELEMENTS.replace_all(input, "");
    let without_tags = TAGS.replace_all(&without_elements, "");

    // Removing one octet can expose another, e.g. "%%4141".
    let mut filtered = without_tags.into_owned();
    while PERCENT_OCTETS.is_match(&filtered) {
        filtered = PERCENT_OCTETS.replace_all(&filtered, "").into_owned();
    }

    filtered
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_values_are_trimmed() {
        assert_eq!(sanitize_text_field("  4.50 "), "4.50");
        assert_eq!(sanitize_text_field("2-3 days"), "2-3 days");
    }

    #[test]
    fn tags_are_stripped() {
        assert_eq!(
            sanitize_text_field("<b>Express</b> <script>x</script>delivery"),
            "Express delivery"
        );
    }

    #[test]
    fn script_and_style_content_is_removed() {
        assert_eq!(
            sanitize_text_field("Next <STYLE type=\"text/css\">\np { color: red }\n</style>day"),
            "Next day"
        );
        assert_eq!(
            sanitize_text_field("<script>a</script>3 days<script src=\"x.js\"></script>"),
            "3 days"
        );
    }

    #[test]
    fn line_breaks_and_tabs_collapse_to_single_spaces() {
        assert_eq!(sanitize_text_field("5\r\n\tdays"), "5 days");
        assert_eq!(sanitize_text_field("next    week"), "next week");
    }

    #[test]
    fn other_control_characters_are_removed() {
        assert_eq!(sanitize_text_field("\u{7}7 days\u{0}"), "7 days");
    }

    #[test]
    fn percent_encoded_octets_are_removed_repeatedly() {
        assert_eq!(sanitize_text_field("10%20days"), "10days");
        assert_eq!(sanitize_text_field("%%4141"), "");
    }

    #[test]
    fn blank_input_stays_empty() {
        assert_eq!(sanitize_text_field(""), "");
        assert_eq!(sanitize_text_field(" \n "), "");
    }
}
