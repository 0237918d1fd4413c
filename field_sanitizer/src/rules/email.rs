use std::sync::LazyLock;

use regex::Regex;

static LOCAL_PART_DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9!#$%&'*+/=?^_`{|}~.\-]").unwrap());

static DOT_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.{2,}").unwrap());

static LABEL_DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[^a-z0-9-]+").unwrap());

const MIN_LENGTH: usize = 6;

/// Cleans an email address, or returns an empty string when nothing usable is left.
///
/// Characters that are not allowed in the local part are dropped, runs of dots in the domain
/// are removed and every domain label is reduced to `[A-Za-z0-9-]` without leading or
/// trailing hyphens. The address needs at least six characters, an `@` that is not the first
/// character and a domain of at least two labels.
///
/// ```rust
/// use field_sanitizer::rules::sanitize_email;
///
/// assert_eq!(sanitize_email("jane (doe)@Example.com"), "janedoe@Example.com");
/// assert_eq!(sanitize_email("not-an-email"), "");
/// ```
pub fn sanitize_email(value: &str) -> String {
    try_sanitize_email(value).unwrap_or_default()
}

fn try_sanitize_email(value: &str) -> Option<String> {
    if value.len() < MIN_LENGTH {
        return None;
    }
    let (local, domain) = value.split_once('@')?;

    let local = LOCAL_PART_DISALLOWED.replace_all(local, "");
    if local.is_empty() {
        return None;
    }

    let domain = DOT_RUNS.replace_all(domain, "");
    let domain =
        domain.trim_matches(|c| matches!(c, ' ' | '\t' | '\n' | '\r' | '\0' | '\x0B' | '.'));
    if domain.is_empty() {
        return None;
    }
    if domain.split('.').count() < 2 {
        return None;
    }

    let labels: Vec<String> = domain
        .split('.')
        .map(|label| {
            let label = label
                .trim_matches(|c| matches!(c, ' ' | '\t' | '\n' | '\r' | '\0' | '\x0B' | '-'));
            LABEL_DISALLOWED.replace_all(label, "").into_owned()
        })
        .filter(|label| !label.is_empty())
        .collect();
    if labels.len() < 2 {
        return None;
    }

    Some(format!("{local}@{}", labels.join(".")))
}
