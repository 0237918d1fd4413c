use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Schemes an absolute URL may use.
pub const ALLOWED_PROTOCOLS: [&str; 22] = [
    "http", "https", "ftp", "ftps", "mailto", "news", "irc", "irc6", "ircs", "gopher", "nntp",
    "feed", "telnet", "mms", "rtsp", "sms", "svn", "tel", "fax", "xmpp", "webcal", "urn",
];

static LINE_BREAK_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)%0[ad]").unwrap());

static CHARACTER_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)&#x([0-9a-f]+);?|&#([0-9]+);?|&(colon|tab|newline);").unwrap()
});

static PHP_FILE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^[a-z0-9-]+?\.php").unwrap());

/// Cleans a URL for storage, or returns an empty string if it is unusable.
///
/// Leading whitespace is trimmed, spaces are encoded as `%20` and characters that never appear
/// in a URL are dropped. Encoded line breaks are removed (except for `mailto:` links). Input
/// without a scheme is treated as a host and gets `http://`, unless it is a relative reference
/// starting with `/`, `#` or `?`. An absolute URL must use one of [`ALLOWED_PROTOCOLS`].
///
/// ```rust
/// use field_sanitizer::rules::sanitize_url;
///
/// assert_eq!(sanitize_url("example.com/a b"), "http://example.com/a%20b");
/// assert_eq!(sanitize_url("javascript:alert(1)"), "");
/// ```
pub fn sanitize_url(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    let mut url: String = value
        .trim_start_matches(|c| matches!(c, ' ' | '\t' | '\n' | '\r' | '\0' | '\x0B'))
        .replace(' ', "%20")
        .chars()
        .filter(|&c| is_url_char(c))
        .collect();
    if url.is_empty() {
        return url;
    }

    if !starts_with_ignore_case(&url, "mailto:") {
        while LINE_BREAK_ESCAPE.is_match(&url) {
            url = LINE_BREAK_ESCAPE.replace_all(&url, "").into_owned();
        }
    }

    url = url.replace(";//", "://");

    if !url.contains(':') && !url.starts_with(['/', '#', '?']) && !PHP_FILE.is_match(&url) {
        url.insert_str(0, "http://");
    }

    if url.starts_with('/') || has_allowed_protocol(&url) {
        url
    } else {
        String::new()
    }
}

fn is_url_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "-~+_.?#=!&;,/:%@$|*'()[]".contains(c) || !c.is_ascii()
}

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Returns true if `url` is relative or its scheme is in the allow-list.
///
/// The scheme is judged the way a browser reads the value out of an HTML attribute: character
/// references are decoded and whitespace or control characters inside the scheme are ignored.
/// A prefix containing `/`, `?` or `#` before the first `:` is a path, not a scheme.
fn has_allowed_protocol(url: &str) -> bool {
    let decoded = decode_character_references(url);
    let Some(separator) = decoded.find(':') else {
        return true;
    };
    let scheme: String = decoded[..separator]
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect();
    if scheme.contains(['/', '?', '#']) {
        return true;
    }
    ALLOWED_PROTOCOLS.contains(&scheme.to_ascii_lowercase().as_str())
}

/// Decodes numeric character references and the named ones that can hide a scheme.
/// References that do not name a valid character become U+FFFD.
fn decode_character_references(url: &str) -> Cow<'_, str> {
    CHARACTER_REFERENCE.replace_all(url, |caps: &Captures| {
        let code = match (caps.get(1), caps.get(2), caps.get(3)) {
            (Some(hex), _, _) => u32::from_str_radix(hex.as_str(), 16).ok(),
            (_, Some(decimal), _) => decimal.as_str().parse().ok(),
            (_, _, Some(name)) => match name.as_str().to_ascii_lowercase().as_str() {
                "colon" => Some(u32::from(':')),
                "tab" => Some(u32::from('\t')),
                _ => Some(u32::from('\n')),
            },
            _ => None,
        };
        code.and_then(char::from_u32)
            .unwrap_or(char::REPLACEMENT_CHARACTER)
            .to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_urls_with_allowed_scheme_are_kept() {
        assert_eq!(
            sanitize_url("https://example.com/path?q=1&r=2#top"),
            "https://example.com/path?q=1&r=2#top"
        );
        assert_eq!(sanitize_url("HTTPS://Example.com"), "HTTPS://Example.com");
        assert_eq!(sanitize_url("mailto:ann@example.com"), "mailto:ann@example.com");
    }

    #[test]
    fn disallowed_scheme_is_rejected() {
        assert_eq!(sanitize_url("javascript:alert('x')"), "");
        assert_eq!(sanitize_url("data:text/html;base64,AAAA"), "");
        assert_eq!(sanitize_url("javascript&#58;alert(1)//http://x"), "");
        assert_eq!(sanitize_url("javascript&colon;x:y"), "");
        assert_eq!(sanitize_url("&#106;avascript:alert(1)"), "");
        assert_eq!(sanitize_url("jav&#x09;ascript:alert(1)"), "");
        assert_eq!(sanitize_url("&#x6A;&#x61;vascript:alert(1)"), "");
        assert_eq!(sanitize_url("&#0000106avascript:alert(1)"), "");
        assert_eq!(sanitize_url("java&Tab;script:alert(1)"), "");
        assert_eq!(sanitize_url("vb&NewLine;script:msgbox(1)"), "");
        assert_eq!(sanitize_url("&#100;ata:text/html,x"), "");
    }

    #[test]
    fn references_in_allowed_urls_are_left_alone() {
        assert_eq!(sanitize_url("&#104;ttps://example.com"), "&#104;ttps://example.com");
        assert_eq!(
            sanitize_url("https://example.com/?a=1&#38;b=2"),
            "https://example.com/?a=1&#38;b=2"
        );
    }

    #[test]
    fn encoded_separator_alone_becomes_a_host() {
        assert_eq!(
            sanitize_url("&#x6A;avascript&#x3A;alert(1)"),
            "http://&#x6A;avascript&#x3A;alert(1)"
        );
    }

    #[test]
    fn decoded_path_characters_still_mark_a_path() {
        assert_eq!(sanitize_url("/a&#58;b"), "/a&#58;b");
        assert_eq!(sanitize_url("&#35;javascript:x"), "&#35;javascript:x");
        assert_eq!(sanitize_url("?next=javascript:x"), "?next=javascript:x");
    }

    #[test]
    fn character_references_are_decoded() {
        assert_eq!(decode_character_references("a&#58;b&#x3A;c&colon;d"), "a:b:c:d");
        assert_eq!(decode_character_references("&Tab;&NewLine;"), "\t\n");
        assert_eq!(decode_character_references("&#xD800;&#99999999999;"), "\u{FFFD}\u{FFFD}");
        assert_eq!(decode_character_references("&amp;"), "&amp;");
    }

    #[test]
    fn relative_references_are_kept() {
        assert_eq!(sanitize_url("/about?x=1"), "/about?x=1");
        assert_eq!(sanitize_url("#section"), "#section");
        assert_eq!(sanitize_url("?page=2"), "?page=2");
        assert_eq!(sanitize_url("index.php?p=1"), "index.php?p=1");
    }

    #[test]
    fn bare_host_gets_http() {
        assert_eq!(sanitize_url("  example.com"), "http://example.com");
    }

    #[test]
    fn path_colon_is_not_a_scheme() {
        assert_eq!(sanitize_url("/wiki/Help:Contents"), "/wiki/Help:Contents");
        assert_eq!(sanitize_url("#a:b"), "#a:b");
    }

    #[test]
    fn disallowed_characters_are_dropped() {
        assert_eq!(
            sanitize_url("https://exa\"mple.com/<tag>{x}"),
            "https://example.com/tagx"
        );
        assert_eq!(sanitize_url("https://例え.jp/パス"), "https://例え.jp/パス");
    }

    #[test]
    fn encoded_line_breaks_are_removed() {
        assert_eq!(
            sanitize_url("https://example.com/%0d%0Aset-cookie"),
            "https://example.com/set-cookie"
        );
        assert_eq!(sanitize_url("https://x.com/%0%0dAa"), "https://x.com/a");
        assert_eq!(
            sanitize_url("mailto:ann@example.com?body=a%0Ab"),
            "mailto:ann@example.com?body=a%0Ab"
        );
    }

    #[test]
    fn semicolon_slashes_become_scheme_separator() {
        assert_eq!(sanitize_url("http;//example.com"), "http://example.com");
    }

    #[test]
    fn empty_or_fully_stripped_input_is_empty() {
        assert_eq!(sanitize_url(""), "");
        assert_eq!(sanitize_url("<>\"{}"), "");
    }
}
