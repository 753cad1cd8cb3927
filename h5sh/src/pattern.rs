//! Shell-style wildcards for `ls`.

use crate::error::{H5shError, H5shResult};
use regex::Regex;

/// A compiled single-segment wildcard: `*` matches any run of characters,
/// `?` exactly one, everything else itself. The whole name must match.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Option<Regex>,
}

impl Pattern {
    /// Compiles `pattern`; the empty pattern matches every name.
    pub fn compile(pattern: &str) -> H5shResult<Self> {
        if pattern.is_empty() {
            return Ok(Self {
                source: String::new(),
                regex: None,
            });
        }

        let mut re = String::with_capacity(pattern.len() * 2 + 6);
        re.push_str("(?s)^");
        let mut buf = [0u8; 4];
        for c in pattern.chars() {
            match c {
                '*' => re.push_str(".*"),
                '?' => re.push('.'),
                other => re.push_str(&regex::escape(other.encode_utf8(&mut buf))),
            }
        }
        re.push('$');

        let regex = Regex::new(&re).map_err(|_| H5shError::InvalidPattern(pattern.to_string()))?;
        Ok(Self {
            source: pattern.to_string(),
            regex: Some(regex),
        })
    }

    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.regex.as_ref().map_or(true, |re| re.is_match(name))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}
