use crate::SanitizeWith;

/// A raw value exactly as it was submitted by the client.
/// The data contained inside this type is called tainted.
///
/// Every value handed out by a [`RawFieldSource`](crate::RawFieldSource) is wrapped in this
/// type. Whoever submitted the form controls the content, so it must pass through one of the
/// sanitizing rules before it is used.
///
/// Taint can be cleared by using [`SanitizeWith`], which is what
/// [`FieldSanitizer`](crate::FieldSanitizer) does for each rule.
///
/// This type does explicitly not implement `Debug`, `Display` or `Serialize`: a raw submitted
/// value must not end up in logs or responses by accident.
#[repr(transparent)]
pub struct UntrustedValue<Insecure> {
    value: Insecure,
}

impl<Insecure> UntrustedValue<Insecure> {
    /// Returns the raw submitted value without any sanitization.
    ///
    /// Be sure that you carefully handle the returned value since
    /// it is fully controlled by the client.
    #[cfg(feature = "allow_usage_without_sanitization")]
    pub fn use_untrusted_value(self) -> Insecure {
        self.value
    }

    /// Wraps the provided value as [`UntrustedValue`]
    pub fn wrap(value: Insecure) -> Self {
        UntrustedValue { value }
    }

    /// Converts the tainted value without sanitizing it. The result stays tainted.
    ///
    /// Use this only for lossless representation changes (for example `String` to `&str`),
    /// never for cleanup.
    pub fn map<Other, Mapper>(self, mapper: Mapper) -> UntrustedValue<Other>
    where
        Mapper: FnOnce(Insecure) -> Other,
    {
        UntrustedValue {
            value: mapper(self.value),
        }
    }

    /// Returns true if the tainted value equals `other`.
    ///
    /// Comparing does not clear the taint. Radio fields are checked against their allow-list
    /// this way before the value is handed to a sanitizer.
    pub fn is_equal_to<Other>(&self, other: &Other) -> bool
    where
        Insecure: PartialEq<Other>,
        Other: ?Sized,
    {
        self.value == *other
    }
}

/// Taint is cleared by handing the raw value to a sanitizer and keeping only its result.
impl<Insecure, Trusted> SanitizeWith<Insecure, Trusted> for UntrustedValue<Insecure> {
    /// Sanitizes the value using the provided sanitizer.
    ///
    /// The sanitizer may transmute the value to a different type.
    /// If sanitization fails, an error must be returned.
    fn sanitize_with<Sanitizer, Error>(self, sanitizer: Sanitizer) -> Result<Trusted, Error>
    where
        Sanitizer: FnOnce(Insecure) -> Result<Trusted, Error>,
    {
        sanitizer(self.value)
    }
}

impl<Insecure> From<Insecure> for UntrustedValue<Insecure> {
    fn from(value: Insecure) -> Self {
        UntrustedValue::wrap(value)
    }
}

// Cloning or copying keeps the taint on the copy.
#[allow(clippy::expl_impl_clone_on_copy)]
impl<Insecure: Clone> Clone for UntrustedValue<Insecure> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
        }
    }
}

impl<Insecure: Copy> Copy for UntrustedValue<Insecure> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[test]
    fn sanitize_with_hands_raw_value_to_sanitizer() {
        let raw = UntrustedValue::from(" padded ");
        let clean = raw.sanitize_with(|value| Ok::<_, Infallible>(value.trim().to_owned()));
        assert_eq!(clean, Ok("padded".to_owned()));
    }

    #[test]
    fn sanitizer_error_is_propagated() {
        let raw = UntrustedValue::from("abc");
        let result: Result<u32, &str> =
            raw.sanitize_with(|value| value.parse().map_err(|_| "not a number"));
        assert_eq!(result, Err("not a number"));
    }

    #[test]
    fn comparison_keeps_taint() {
        let owned = UntrustedValue::from(String::from("gold"));
        assert!(owned.is_equal_to("gold"));
        assert!(!owned.is_equal_to("Gold"));
        let borrowed = UntrustedValue::from("gold");
        assert!(borrowed.is_equal_to(&"gold"));
    }

    #[cfg(feature = "allow_usage_without_sanitization")]
    #[test]
    fn raw_value_can_be_used_when_allowed() {
        let raw = UntrustedValue::wrap("<b>raw</b>");
        assert_eq!(raw.use_untrusted_value(), "<b>raw</b>");
    }

    #[test]
    fn map_keeps_value_tainted() {
        let raw = UntrustedValue::from(String::from("abc")).map(|s| s.len());
        let length = raw.sanitize_with(Ok::<usize, Infallible>);
        assert_eq!(length, Ok(3));
    }
}
