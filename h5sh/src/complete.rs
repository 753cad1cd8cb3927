//! Group-name completion for `cd` and `ls` arguments.

use crate::listing::child_groups_with_prefix;
use crate::path::{opening_quote, split_container, unquote, Location};
use h5sh_sdk::StoreProvider;

/// Completion candidates for a partially typed path expression.
///
/// Only groups are offered. Each candidate keeps the directory part the
/// user typed, so `alp` yields `alpha` and `../b` yields `../beta`. A
/// leading quote is kept open: `"my` yields `"my group`. Anything that
/// does not lead into an existing group yields nothing.
pub fn completions<S: StoreProvider + ?Sized>(
    store: &S,
    current: &Location,
    partial: &str,
) -> Vec<String> {
    let quote = opening_quote(partial);
    let body = unquote(partial);
    let resolved = current.resolve(body);
    let (container, name) = split_container(&resolved);
    if !store.is_group(container.as_str()) {
        return Vec::new();
    }

    let prefix = format!("{quote}{}", typed_prefix(body));
    match child_groups_with_prefix(store, &container, name) {
        Ok(names) => names
            .into_iter()
            .map(|name| format!("{prefix}{name}"))
            .collect(),
        Err(e) => {
            tracing::debug!(container = %container, error = %e, "Completion lookup failed");
            Vec::new()
        }
    }
}

/// The directory part of `partial` as typed. A trailing `.` or `..`
/// names a directory, so it is closed with a separator.
fn typed_prefix(partial: &str) -> String {
    let last = partial.rsplit('/').next().unwrap_or(partial);
    if last == "." || last == ".." {
        return format!("{partial}/");
    }
    partial
        .rfind('/')
        .map(|i| partial[..=i].to_string())
        .unwrap_or_default()
}
