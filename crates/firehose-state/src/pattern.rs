//! Key patterns over flattened attribute keys
//!
//! A [`KeyPattern`] is written as a dotted template where `*` stands for any
//! positional index and every other segment (including `#`) is literal:
//!
//! ```
//! # use firehose_state::KeyPattern;
//! let pattern = KeyPattern::new("extended_s3_configuration.*.processing_configuration.#")?;
//! assert!(pattern.is_match("extended_s3_configuration.0.processing_configuration.#"));
//! assert_eq!(
//!     pattern.indices("extended_s3_configuration.3.processing_configuration.#"),
//!     Some(vec![3])
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fmt::{self, Display, Formatter};

use regex::Regex;

/// Wildcard segment matching any positional index
pub const INDEX_WILDCARD: &str = "*";

/// Compiled matcher for a family of attribute keys
#[derive(Debug, Clone)]
pub struct KeyPattern {
    template: String,
    regex: Regex,
}

impl KeyPattern {
    /// Compile a dotted template
    ///
    /// `*` matches ASCII digits only.
    ///
    /// # Errors
    /// Returns error if the compiled pattern exceeds the regex size limit
    pub fn new(template: &str) -> Result<Self, regex::Error> {
        let body = template
            .split('.')
            .map(|segment| {
                if segment == INDEX_WILDCARD {
                    "([0-9]+)".to_string()
                } else {
                    regex::escape(segment)
                }
            })
            .collect::<Vec<_>>()
            .join(r"\.");
        let regex = Regex::new(&format!("^{body}$"))?;
        Ok(Self {
            template: template.to_string(),
            regex,
        })
    }

    /// Template this pattern was compiled from
    #[inline]
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Check if a key matches
    #[inline]
    #[must_use]
    pub fn is_match(&self, key: &str) -> bool {
        self.regex.is_match(key)
    }

    /// Positional indices bound by each `*`, in template order
    ///
    /// Returns `None` when the key does not match or an index overflows.
    #[must_use]
    pub fn indices(&self, key: &str) -> Option<Vec<u64>> {
        let captures = self.regex.captures(key)?;
        captures
            .iter()
            .skip(1)
            .map(|group| group.and_then(|m| m.as_str().parse().ok()))
            .collect()
    }
}

impl Display for KeyPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_template_matches_exactly() {
        let pattern = KeyPattern::new("s3_configuration.#").unwrap();
        assert!(pattern.is_match("s3_configuration.#"));
        assert!(!pattern.is_match("s3_configuration.0"));
        assert!(!pattern.is_match("xs3_configuration.#"));
        assert!(!pattern.is_match("s3_configuration.#.extra"));
    }

    #[test]
    fn wildcard_only_matches_digits() {
        let pattern = KeyPattern::new("processors.*.parameters.*.parameter_name").unwrap();
        assert!(pattern.is_match("processors.0.parameters.12.parameter_name"));
        assert!(!pattern.is_match("processors.x.parameters.1.parameter_name"));
        assert!(!pattern.is_match("processors.0.parameters.#.parameter_name"));
    }

    #[test]
    fn wildcard_rejects_non_ascii_digits() {
        let pattern = KeyPattern::new("processors.*.parameters.*.parameter_name").unwrap();
        assert!(!pattern.is_match("processors.\u{0663}.parameters.0.parameter_name"));
        assert!(!pattern.is_match("processors.0.parameters.\u{0663}.parameter_name"));
        assert_eq!(pattern.indices("processors.\u{0663}.parameters.0.parameter_name"), None);
    }

    #[test]
    fn indices_in_template_order() {
        let pattern = KeyPattern::new("a.*.b.*.c.*").unwrap();
        assert_eq!(pattern.indices("a.1.b.22.c.333"), Some(vec![1, 22, 333]));
        assert_eq!(pattern.indices("a.1.b.22.d.333"), None);
    }

    #[test]
    fn dots_in_template_are_not_wildcards() {
        let pattern = KeyPattern::new("a.b").unwrap();
        assert!(!pattern.is_match("aXb"));
    }

    #[test]
    fn display_shows_template() {
        assert_eq!(KeyPattern::new("a.*.#").unwrap().to_string(), "a.*.#");
    }
}
