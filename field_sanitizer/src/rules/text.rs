use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use super::trim_blank;

static SCRIPT_ELEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script[^>]*?>.*?</script>").unwrap());

static STYLE_ELEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style[^>]*?>.*?</style>").unwrap());

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

static LINE_BREAKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\r\n\t ]+").unwrap());

static PERCENT_OCTET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)%[a-f0-9]{2}").unwrap());

static SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" +").unwrap());

/// Cleans single-line plain text.
///
/// Tags are stripped (`<script>` and `<style>` together with their content), a `<` that does
/// not open a tag is kept as `&lt;`, line breaks and tabs become spaces, runs of whitespace
/// collapse, the ends are trimmed and percent-encoded octets are removed.
///
/// ```rust
/// use field_sanitizer::rules::sanitize_text_field;
///
/// assert_eq!(sanitize_text_field("  Hello <b>world</b>\n!  "), "Hello world !");
/// assert_eq!(sanitize_text_field("1 < 2"), "1 &lt; 2");
/// ```
pub fn sanitize_text_field(value: &str) -> String {
    sanitize_text(value, false)
}

/// Cleans multi-line plain text. Same as [`sanitize_text_field`] but newlines, tabs and
/// repeated spaces inside the text are preserved.
///
/// ```rust
/// use field_sanitizer::rules::sanitize_textarea_field;
///
/// assert_eq!(sanitize_textarea_field("line one\n<i>line</i> two\n"), "line one\nline two");
/// ```
pub fn sanitize_textarea_field(value: &str) -> String {
    sanitize_text(value, true)
}

fn sanitize_text(value: &str, keep_newlines: bool) -> String {
    let mut filtered = if value.contains('<') {
        strip_all_tags(&escape_stray_less_than(value))
    } else {
        value.to_owned()
    };

    if !keep_newlines {
        filtered = LINE_BREAKS.replace_all(&filtered, " ").into_owned();
    }
    filtered = trim_blank(&filtered).to_owned();

    let mut found_octets = false;
    while PERCENT_OCTET.is_match(&filtered) {
        filtered = PERCENT_OCTET.replace_all(&filtered, "").into_owned();
        found_octets = true;
    }
    if found_octets {
        filtered = trim_blank(&SPACES.replace_all(&filtered, " ")).to_owned();
    }

    filtered
}

/// Encodes every `<` that is not closed by a `>` before the next `<`, so that it survives tag
/// stripping as text.
fn escape_stray_less_than(value: &str) -> Cow<'_, str> {
    if !value.contains('<') {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    let mut rest = value;
    while let Some(start) = rest.find('<') {
        escaped.push_str(&rest[..start]);
        let candidate = &rest[start + 1..];
        match candidate.find(['<', '>']) {
            Some(end) if candidate.as_bytes()[end] == b'>' => {
                escaped.push('<');
                escaped.push_str(&candidate[..=end]);
                rest = &candidate[end + 1..];
            }
            Some(end) => {
                escaped.push_str("&lt;");
                escaped.push_str(&candidate[..end]);
                rest = &candidate[end..];
            }
            None => {
                escaped.push_str("&lt;");
                escaped.push_str(candidate);
                rest = "";
            }
        }
    }
    escaped.push_str(rest);
    Cow::Owned(escaped)
}

fn strip_all_tags(value: &str) -> String {
    let without_scripts = SCRIPT_ELEMENT.replace_all(value, "");
    let without_styles = STYLE_ELEMENT.replace_all(&without_scripts, "");
    let stripped = TAG.replace_all(&without_styles, "");
    trim_blank(&stripped).to_owned()
}
