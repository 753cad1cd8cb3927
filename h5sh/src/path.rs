//! Path algebra over `/`-delimited container paths.
//!
//! Nothing here touches the store: a resolved path may name an object that
//! does not exist, and callers validate against the store afterwards.

use std::fmt;

/// Canonical absolute position in the hierarchy.
///
/// Always starts with `/` and never ends with one, except for the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location(String);

impl Location {
    #[must_use]
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Canonicalizes an absolute path produced by [`resolve`].
    #[must_use]
    pub fn from_resolved(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            Self::root()
        } else if trimmed.starts_with('/') {
            Self(trimmed.to_string())
        } else {
            Self(format!("/{trimmed}"))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Form used as the base for relative expressions: `/a/b/`, or `/`.
    #[must_use]
    pub fn dir_form(&self) -> String {
        if self.is_root() {
            self.0.clone()
        } else {
            format!("{}/", self.0)
        }
    }

    /// Absolute path of the direct child `name`.
    #[must_use]
    pub fn child(&self, name: &str) -> String {
        if self.is_root() {
            format!("/{name}")
        } else {
            format!("{}/{name}", self.0)
        }
    }

    /// Resolves `expr` relative to this location.
    #[must_use]
    pub fn resolve(&self, expr: &str) -> String {
        resolve(&self.dir_form(), expr)
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolves a raw path expression against `current` into an absolute path.
///
/// `current` is expected in directory form (`/a/b/`). Runs of `/` collapse,
/// `.` segments vanish and `..` ascends one segment, stopping at the root.
/// A trailing separator in the input survives.
#[must_use]
pub fn resolve(current: &str, expr: &str) -> String {
    let mut path = if expr.starts_with('/') {
        expr.to_string()
    } else {
        format!("{current}{expr}")
    };

    if path.ends_with("..") || path.ends_with("/.") {
        path.push('/');
    }

    let mut collapsed = String::with_capacity(path.len());
    for c in path.chars() {
        if c == '/' && collapsed.ends_with('/') {
            continue;
        }
        collapsed.push(c);
    }

    let mut segments: Vec<&str> = collapsed.split('/').collect();
    let mut i = 1;
    while i < segments.len() {
        if segments[i] == "." {
            segments.remove(i);
        } else {
            i += 1;
        }
    }

    while let Some(idx) = segments.iter().position(|s| *s == "..") {
        if idx > 1 {
            segments.drain(idx - 1..=idx);
        } else {
            segments.remove(idx);
        }
    }

    let joined = segments.join("/");
    if joined.is_empty() {
        "/".to_string()
    } else {
        joined
    }
}

/// Splits a resolved path at its last separator into the container path
/// and the trailing name or pattern fragment.
///
/// The container comes back canonical (`/` for the root).
#[must_use]
pub fn split_container(resolved: &str) -> (Location, &str) {
    match resolved.rsplit_once('/') {
        Some((head, tail)) => (Location::from_resolved(head), tail),
        None => (Location::root(), resolved),
    }
}

/// Removes a leading `"` or `'` and, when present, the matching closing
/// quote. An unclosed quote is what completion leaves behind.
#[must_use]
pub fn unquote(arg: &str) -> &str {
    match arg.chars().next() {
        Some(quote @ ('"' | '\'')) => {
            let inner = &arg[1..];
            inner.strip_suffix(quote).unwrap_or(inner)
        }
        _ => arg,
    }
}

/// The opening quote of `arg`, or `""` when it is not quoted.
#[must_use]
pub fn opening_quote(arg: &str) -> &str {
    if arg.starts_with(['"', '\'']) {
        &arg[..1]
    } else {
        ""
    }
}
