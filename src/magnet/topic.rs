//! Topic id extraction from raw ids and tracker URLs.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;
use url::{Url, form_urlencoded};

use super::MagnetError;

/// Matches `/t<digits>` path segments such as `/forum/t6673601.html`.
#[allow(clippy::expect_used)]
static TOPIC_PATH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/t(\d+)").expect("topic path regex is valid"));

/// Positive integer identifying a tracker topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TopicId(u64);

impl TopicId {
    /// Wraps `id`, rejecting zero.
    #[must_use]
    pub fn new(id: u64) -> Option<Self> {
        (id > 0).then_some(Self(id))
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TopicId {
    type Err = MagnetError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        parse_topic_id(input)
    }
}

/// Extracts a topic id from user input.
///
/// Accepted forms:
/// - a bare id: `6673601`
/// - a URL with a `t` query parameter: `https://rutracker.org/forum/viewtopic.php?t=6673601`
/// - a URL whose path holds `/t<digits>`: `https://rutracker.org/forum/t6673601.html`
///
/// URLs may omit the scheme, as in `rutracker.org/forum/viewtopic.php?t=6673601`.
///
/// # Errors
///
/// Returns [`MagnetError::InvalidTopic`] for any other shape, for a zero id,
/// and for ids that overflow `u64`.
///
/// # Examples
///
/// ```
/// use qbt_core::magnet::parse_topic_id;
///
/// let id = parse_topic_id("https://rutracker.org/forum/viewtopic.php?t=6673601").unwrap();
/// assert_eq!(id.get(), 6673601);
/// assert!(parse_topic_id("latest").is_err());
/// ```
pub fn parse_topic_id(input: &str) -> Result<TopicId, MagnetError> {
    let trimmed = input.trim();
    if is_all_digits(trimmed) {
        return digits_to_topic(input, trimmed);
    }

    let (path, query) = match Url::parse(trimmed) {
        Ok(url) => (url.path().to_string(), url.query().map(str::to_string)),
        // Pasted links often lack the scheme: `rutracker.org/forum/t123.html`.
        Err(url::ParseError::RelativeUrlWithoutBase) => split_schemeless(trimmed),
        Err(_) => return Err(MagnetError::invalid_topic(input, "not a topic id or a URL")),
    };

    let topic_param = query.as_deref().and_then(|query| {
        form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == "t")
            .map(|(_, value)| value.into_owned())
    });
    if let Some(value) = topic_param {
        debug!(value = %value, "Topic id from query string");
        if !is_all_digits(&value) {
            return Err(MagnetError::invalid_topic(input, "the t parameter is not a number"));
        }
        return digits_to_topic(input, &value);
    }

    if let Some(captures) = TOPIC_PATH_PATTERN.captures_iter(&path).last() {
        let digits = captures.get(1).map_or("", |m| m.as_str());
        debug!(digits, "Topic id from path");
        return digits_to_topic(input, digits);
    }

    Err(MagnetError::invalid_topic(
        input,
        "the URL has neither a t parameter nor a /t<id> path segment",
    ))
}

/// Path and query of a reference without a scheme, fragment dropped.
fn split_schemeless(reference: &str) -> (String, Option<String>) {
    let without_fragment = reference
        .split_once('#')
        .map_or(reference, |(before, _)| before);
    match without_fragment.split_once('?') {
        Some((path, query)) => (path.to_string(), Some(query.to_string())),
        None => (without_fragment.to_string(), None),
    }
}

fn is_all_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

fn digits_to_topic(input: &str, digits: &str) -> Result<TopicId, MagnetError> {
    let id = digits
        .parse::<u64>()
        .map_err(|_| MagnetError::invalid_topic(input, "topic id is too large"))?;
    TopicId::new(id).ok_or_else(|| MagnetError::invalid_topic(input, "topic id must be positive"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_id() {
        assert_eq!(parse_topic_id("6673601").unwrap().get(), 6_673_601);
        assert_eq!(parse_topic_id(" 42 ").unwrap().get(), 42);
    }

    #[test]
    fn test_parse_query_url() {
        let id = parse_topic_id("https://rutracker.org/forum/viewtopic.php?t=6673601").unwrap();
        assert_eq!(id.get(), 6_673_601);
    }

    #[test]
    fn test_parse_query_url_with_other_params() {
        let id =
            parse_topic_id("https://rutracker.org/forum/viewtopic.php?start=30&t=6673601#p1")
                .unwrap();
        assert_eq!(id.get(), 6_673_601);
    }

    #[test]
    fn test_parse_path_url() {
        let id = parse_topic_id("https://rutracker.org/forum/t6673601.html").unwrap();
        assert_eq!(id.get(), 6_673_601);
    }

    #[test]
    fn test_parse_path_url_without_extension() {
        assert_eq!(parse_topic_id("https://example.org/t77").unwrap().get(), 77);
    }

    #[test]
    fn test_all_accepted_forms_agree() {
        let forms = [
            "6673601",
            "https://rutracker.org/forum/viewtopic.php?t=6673601",
            "https://rutracker.org/forum/t6673601.html",
            "rutracker.org/forum/viewtopic.php?t=6673601",
            "rutracker.org/forum/t6673601.html",
            ".../viewtopic.php?t=6673601",
            ".../t6673601.html",
        ];
        for form in forms {
            assert_eq!(parse_topic_id(form).unwrap(), TopicId::new(6_673_601).unwrap());
        }
    }

    #[test]
    fn test_rejects_other_shapes() {
        let rejected = [
            "",
            "abc",
            "-5",
            "12.5",
            "0",
            "99999999999999999999999",
            "https://rutracker.org/forum/index.php",
            "https://rutracker.org/forum/viewtopic.php?t=abc",
            "https://rutracker.org/forum/viewtopic.php?st=5",
            "rutracker.org/forum/index.php",
            "rutracker.org/forum/viewtopic.php?t=12a",
            "t123",
        ];
        for input in rejected {
            let err = parse_topic_id(input).unwrap_err();
            assert!(
                matches!(err, MagnetError::InvalidTopic { .. }),
                "{input:?} should be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn test_schemeless_url_ignores_fragment_and_other_params() {
        let id = parse_topic_id("rutracker.org/forum/viewtopic.php?start=30&t=42#p7").unwrap();
        assert_eq!(id.get(), 42);
    }

    #[test]
    fn test_from_str_matches_parse() {
        let id: TopicId = "123".parse().unwrap();
        assert_eq!(id.to_string(), "123");
    }
}
