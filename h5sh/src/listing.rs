//! Listing engine behind `ls`: enumerate a group's attributes and
//! children, classify each and render one aligned line per entry.

use crate::error::H5shResult;
use crate::path::Location;
use crate::pattern::Pattern;
use crate::theme::Theme;
use h5sh_sdk::{ElementType, ObjectKind, Shape, StoreProvider};

/// Width of the dash-padded name column.
pub const NAME_WIDTH: usize = 40;
/// Width of each centered shape/type column.
pub const FIELD_WIDTH: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Group,
    Dataset,
    NamedDatatype,
    Attribute,
}

impl From<ObjectKind> for EntryKind {
    fn from(kind: ObjectKind) -> Self {
        match kind {
            ObjectKind::Group => Self::Group,
            ObjectKind::Dataset => Self::Dataset,
            ObjectKind::NamedDatatype => Self::NamedDatatype,
        }
    }
}

/// One attribute or child found under a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub kind: EntryKind,
    pub shape: Shape,
    pub element_type: Option<ElementType>,
    /// Only set for single-element attributes.
    pub value: Option<String>,
}

impl Entry {
    fn bare(name: &str, kind: EntryKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            shape: Shape::scalar(),
            element_type: None,
            value: None,
        }
    }

    fn type_tag(&self) -> String {
        self.element_type
            .as_ref()
            .map(ElementType::tag)
            .unwrap_or_default()
    }

    /// Renders the display line. With [`Theme::plain`] the output is
    /// free of escape codes.
    #[must_use]
    pub fn render(&self, theme: &Theme) -> String {
        match self.kind {
            EntryKind::Group => theme.paint(theme.group, &format!("{}/", self.name)),
            EntryKind::NamedDatatype => theme.paint(theme.datatype, &format!("+{}", self.name)),
            EntryKind::Dataset => {
                let name = pad_name(&format!("{} ", self.name));
                let stats = format!(
                    " {:^w$} {:^w$} ",
                    self.shape,
                    self.type_tag(),
                    w = FIELD_WIDTH
                );
                theme.paint(theme.dataset, &name) + &theme.paint(theme.stats, &stats)
            }
            EntryKind::Attribute => {
                let name = pad_name(&format!("@{} ", self.name));
                let stats = match &self.value {
                    Some(value) => format!(
                        " ={:<w$} {:^w$} ",
                        value,
                        self.type_tag(),
                        w = FIELD_WIDTH
                    ),
                    None => format!(
                        " {:^w$} {:^w$} ",
                        self.shape,
                        self.type_tag(),
                        w = FIELD_WIDTH
                    ),
                };
                theme.paint(theme.attribute, &name) + &theme.paint(theme.stats, &stats)
            }
        }
    }
}

fn pad_name(name: &str) -> String {
    format!("{name:-<width$}", width = NAME_WIDTH)
}

/// Classifies `path` by asking, in order, whether it is a group, then a
/// dataset. Anything else is taken to be a named datatype.
pub fn classify<S: StoreProvider + ?Sized>(store: &S, path: &str) -> EntryKind {
    if store.is_group(path) {
        EntryKind::Group
    } else if store.is_dataset(path) {
        EntryKind::Dataset
    } else {
        EntryKind::NamedDatatype
    }
}

/// Entries of `container` whose names match `pattern`: attributes first,
/// then children, each in store order.
pub fn entries<S: StoreProvider + ?Sized>(
    store: &S,
    container: &Location,
    pattern: &Pattern,
) -> H5shResult<Vec<Entry>> {
    let mut found = Vec::new();

    for name in store.list_attributes(container.as_str())? {
        if !pattern.matches(&name) {
            continue;
        }
        let info = store.attribute_info(container.as_str(), &name)?;
        let value = if info.is_scalar() {
            Some(info.value.unwrap_or_default())
        } else {
            None
        };
        found.push(Entry {
            name,
            kind: EntryKind::Attribute,
            shape: info.shape,
            element_type: Some(info.element_type),
            value,
        });
    }

    for name in store.list_children(container.as_str())? {
        if !pattern.matches(&name) {
            continue;
        }
        let path = container.child(&name);
        let entry = match classify(store, &path) {
            EntryKind::Dataset => {
                let info = store.dataset_info(&path)?;
                Entry {
                    name,
                    kind: EntryKind::Dataset,
                    shape: info.shape,
                    element_type: Some(info.element_type),
                    value: None,
                }
            }
            kind => Entry::bare(&name, kind),
        };
        found.push(entry);
    }

    tracing::debug!(
        container = %container,
        pattern = pattern.as_str(),
        count = found.len(),
        "Listed container"
    );
    Ok(found)
}

/// Rendered `ls` output for `container`.
pub fn list<S: StoreProvider + ?Sized>(
    store: &S,
    container: &Location,
    pattern: &Pattern,
    theme: &Theme,
) -> H5shResult<Vec<String>> {
    Ok(entries(store, container, pattern)?
        .iter()
        .map(|entry| entry.render(theme))
        .collect())
}

/// Names of the direct child groups of `container` starting with `prefix`,
/// in store order.
pub fn child_groups_with_prefix<S: StoreProvider + ?Sized>(
    store: &S,
    container: &Location,
    prefix: &str,
) -> H5shResult<Vec<String>> {
    Ok(store
        .list_children(container.as_str())?
        .into_iter()
        .filter(|name| name.starts_with(prefix) && store.is_group(&container.child(name)))
        .collect())
}
