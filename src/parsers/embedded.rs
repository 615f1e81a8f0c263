//! Script-variable scraping. Site pages inline structured data inside
//! `<script>` regions instead of exposing it as markup; pulling it out with a
//! regex is inherently fragile, so the capability is isolated here with a
//! narrow contract: pattern → raw captured text → decoded JSON value.

use regex::Regex;
use serde_json::Value;

use crate::error::ParseError;

/// A named single-capture pattern for one embedded script variable.
#[derive(Debug)]
pub struct EmbeddedPayload {
    name: &'static str,
    pattern: Regex,
}

impl EmbeddedPayload {
    /// Compile `pattern`, which must contain exactly one capture group for
    /// the payload text.
    pub fn new(name: &'static str, pattern: &str) -> Result<Self, ParseError> {
        let pattern = Regex::new(pattern).map_err(|source| ParseError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { name, pattern })
    }

    /// First capture of the pattern in `body`, untouched.
    pub fn capture<'a>(&self, body: &'a str) -> Result<&'a str, ParseError> {
        self.pattern
            .captures(body)
            .and_then(|captures| captures.get(1))
            .map(|group| group.as_str())
            .ok_or(ParseError::MissingPayload(self.name))
    }

    /// First capture of the pattern, decoded as a generic JSON value.
    pub fn capture_json(&self, body: &str) -> Result<Value, ParseError> {
        let raw = self.capture(body)?;
        serde_json::from_str(raw).map_err(|source| ParseError::PayloadDecode {
            name: self.name,
            source,
        })
    }
}
