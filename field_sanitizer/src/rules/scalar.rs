/// Keeps the characters of a signed integer: the digits, in order, and at most one sign.
///
/// The sign is kept only if it appears before the first digit; later signs and every other
/// character are dropped. The result can be empty.
///
/// ```rust
/// use field_sanitizer::rules::sanitize_number_int;
///
/// assert_eq!(sanitize_number_int("abc123"), "123");
/// assert_eq!(sanitize_number_int("-1,234.5"), "-12345");
/// assert_eq!(sanitize_number_int("5-3"), "53");
/// ```
pub fn sanitize_number_int(value: &str) -> String {
    let mut number = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '0'..='9' => number.push(c),
            '+' | '-' if number.is_empty() => number.push(c),
            _ => {}
        }
    }
    number
}

/// Coerces a checkbox value to a boolean.
///
/// `""`, `"0"`, `"false"` and `"off"` (surrounding whitespace and letter case ignored) are
/// `false`; everything else, including `"1"`, `"on"` and `"yes"`, is `true`.
pub fn sanitize_checkbox(value: &str) -> bool {
    let value = value.trim();
    !(value.is_empty()
        || value == "0"
        || value.eq_ignore_ascii_case("false")
        || value.eq_ignore_ascii_case("off"))
}

/// Reduces a value to a key: ASCII letters are lowercased and everything outside
/// `[a-z0-9_-]` is removed.
///
/// ```rust
/// use field_sanitizer::rules::sanitize_key;
///
/// assert_eq!(sanitize_key("My Setting_Name-2!"), "mysetting_name-2");
/// ```
pub fn sanitize_key(value: &str) -> String {
    value
        .chars()
        .map(|c| c.to_ascii_lowercase())
        .filter(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '-'))
        .collect()
}
