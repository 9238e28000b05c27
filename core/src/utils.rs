//! Utility functions and types.

use std::fmt::Debug;

/// Hides a secret in `Debug` output.
///
/// Short values (under 12 bytes) are fully masked, longer ones keep their
/// first and last three characters so two different keys or tokens can
/// still be told apart in logs.
pub struct Redact<'a>(&'a str);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        match value {
            None => Redact(""),
            Some(v) => Redact(v),
        }
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = self.0;
        if value.is_empty() {
            return f.write_str("EMPTY");
        }
        let chars = value.chars().count();
        if value.len() < 12 || chars < 7 {
            return f.write_str("***");
        }
        // Slice on char boundaries so multi-byte tokens never panic.
        let head: String = value.chars().take(3).collect();
        let tail: String = value.chars().skip(chars - 3).collect();
        write!(f, "{head}***{tail}")
    }
}
