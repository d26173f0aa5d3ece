//! Magnet link extraction from topic page HTML.

/// Text that marks a line as possibly holding a magnet link.
pub const MAGNET_MARKER: &str = "magnet:?";

const HREF_MARKER: &str = "href=";
const HREF_OPEN: &str = "href=\"";

/// Finds the first magnet link on a page.
///
/// Lines are scanned in order; the first line that mentions both a magnet
/// link and an `href=` attribute and has a quoted `href` value starting with
/// `magnet:` wins. A line with both markers but no quoted magnet `href` is
/// skipped and the search continues. `&amp;` entities in the value are
/// decoded to `&`.
///
/// # Examples
///
/// ```
/// use qbt_core::magnet::extract_magnet;
///
/// let html = r#"<a href="magnet:?xt=urn:btih:abc&amp;tr=udp" class="magnet-link">"#;
/// assert_eq!(
///     extract_magnet(html).as_deref(),
///     Some("magnet:?xt=urn:btih:abc&tr=udp")
/// );
/// ```
#[must_use]
pub fn extract_magnet(html: &str) -> Option<String> {
    html.lines()
        .filter(|line| line.contains(MAGNET_MARKER) && line.contains(HREF_MARKER))
        .find_map(magnet_href_in_line)
}

fn magnet_href_in_line(line: &str) -> Option<String> {
    line.split(HREF_OPEN)
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .find(|value| value.starts_with("magnet:"))
        .map(|value| value.replace("&amp;", "&"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOPIC_PAGE: &str = r#"<html>
<head><title>Topic</title></head>
<body>
<a href="viewtopic.php?t=1">prev</a>
<p>Use magnet:? links when possible</p>
<a href="magnet:?xt=urn:btih:8C212779B4ABDE7C6BC608063A0D008B7E40CE32&amp;tr=http%3A%2F%2Fbt.t-ru.org%2Fann" class="med magnet-link" data-topic_id="6673601">Magnet</a>
<a href="magnet:?xt=urn:btih:second">second</a>
</body>
</html>"#;

    #[test]
    fn test_extracts_first_magnet_and_unescapes_amp() {
        assert_eq!(
            extract_magnet(TOPIC_PAGE).as_deref(),
            Some(
                "magnet:?xt=urn:btih:8C212779B4ABDE7C6BC608063A0D008B7E40CE32&tr=http%3A%2F%2Fbt.t-ru.org%2Fann"
            )
        );
    }

    #[test]
    fn test_skips_non_magnet_href_on_same_line() {
        let html = r#"<a href="/forum/">home</a> <a href="magnet:?xt=urn:btih:abc">m</a>"#;
        assert_eq!(extract_magnet(html).as_deref(), Some("magnet:?xt=urn:btih:abc"));
    }

    #[test]
    fn test_line_with_marker_but_no_magnet_href_is_skipped() {
        let html = "<a href=\"/faq\">what is magnet:?</a>\n<a href=\"magnet:?xt=urn:btih:x\">m</a>";
        assert_eq!(extract_magnet(html).as_deref(), Some("magnet:?xt=urn:btih:x"));
    }

    #[test]
    fn test_no_magnet_returns_none() {
        assert_eq!(extract_magnet("<html><a href=\"/login.php\">Login</a></html>"), None);
        assert_eq!(extract_magnet(""), None);
    }
}
