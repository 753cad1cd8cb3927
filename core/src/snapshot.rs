//! Container snapshots: a YAML or JSON description of a container tree
//! that loads into a [`MemoryStore`].
//!
//! ```yaml
//! attributes:
//!   - { name: version, dtype: int64, value: 5 }
//! children:
//!   - kind: group
//!     name: run1
//!     children:
//!       - { kind: dataset, name: temps, shape: [100, 3], dtype: float64 }
//!   - { kind: datatype, name: point }
//! ```

use crate::providers::MemoryStore;
use h5sh_sdk::{
    AttributeInfo, DatasetInfo, ElementType, Shape, StoreError, StoreProvider, StoreResult,
};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Snapshot {
    #[serde(default)]
    pub attributes: Vec<AttributeSpec>,
    #[serde(default)]
    pub children: Vec<NodeSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeSpec {
    Group {
        name: String,
        #[serde(default)]
        attributes: Vec<AttributeSpec>,
        #[serde(default)]
        children: Vec<NodeSpec>,
    },
    Dataset {
        name: String,
        #[serde(default)]
        shape: Shape,
        dtype: String,
        #[serde(default)]
        attributes: Vec<AttributeSpec>,
    },
    Datatype {
        name: String,
        #[serde(default)]
        attributes: Vec<AttributeSpec>,
    },
}

impl NodeSpec {
    fn name(&self) -> &str {
        match self {
            Self::Group { name, .. } | Self::Dataset { name, .. } | Self::Datatype { name, .. } => {
                name
            }
        }
    }

    fn attributes(&self) -> &[AttributeSpec] {
        match self {
            Self::Group { attributes, .. }
            | Self::Dataset { attributes, .. }
            | Self::Datatype { attributes, .. } => attributes,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeSpec {
    pub name: String,
    #[serde(default)]
    pub shape: Shape,
    pub dtype: String,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

impl AttributeSpec {
    fn to_info(&self) -> AttributeInfo {
        AttributeInfo {
            shape: self.shape.clone(),
            element_type: ElementType::parse(&self.dtype),
            value: self.value.as_ref().and_then(render_value),
        }
    }
}

fn render_value(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl Snapshot {
    pub fn from_yaml_str(content: &str) -> StoreResult<Self> {
        serde_yaml::from_str(content).map_err(|e| StoreError::invalid_snapshot(e.to_string()))
    }

    pub fn from_json_str(content: &str) -> StoreResult<Self> {
        serde_json::from_str(content).map_err(|e| StoreError::invalid_snapshot(e.to_string()))
    }

    /// Reads a snapshot file; `.json` files are parsed as JSON, anything
    /// else as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }
}

impl MemoryStore {
    pub fn from_snapshot(snapshot: &Snapshot) -> StoreResult<Self> {
        let mut store = Self::new();
        for attr in &snapshot.attributes {
            store.load_attribute("/", attr)?;
        }
        for node in &snapshot.children {
            store.load_node("", node)?;
        }
        Ok(store)
    }

    pub fn from_snapshot_file(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let store = Self::from_snapshot(&Snapshot::from_file(path)?)?;
        tracing::debug!(path = %path.display(), objects = store.object_count(), "Loaded container snapshot");
        Ok(store)
    }

    fn load_node(&mut self, parent: &str, node: &NodeSpec) -> StoreResult<()> {
        let name = node.name();
        if matches!(name, "" | "." | "..") || name.contains('/') {
            return Err(StoreError::invalid_snapshot(format!(
                "invalid object name '{name}' under '{}'",
                if parent.is_empty() { "/" } else { parent }
            )));
        }
        let path = format!("{parent}/{name}");

        match node {
            NodeSpec::Group { children, .. } => {
                self.add_group(&path)?;
                for child in children {
                    self.load_node(&path, child)?;
                }
            }
            NodeSpec::Dataset { shape, dtype, .. } => {
                self.add_dataset(
                    &path,
                    DatasetInfo {
                        shape: shape.clone(),
                        element_type: ElementType::parse(dtype),
                    },
                )?;
            }
            NodeSpec::Datatype { .. } => self.add_datatype(&path)?,
        }

        for attr in node.attributes() {
            self.load_attribute(&path, attr)?;
        }
        Ok(())
    }

    fn load_attribute(&mut self, path: &str, attr: &AttributeSpec) -> StoreResult<()> {
        if attr.name.is_empty() {
            return Err(StoreError::invalid_snapshot(format!(
                "attribute with empty name on '{path}'"
            )));
        }
        if self.list_attributes(path)?.contains(&attr.name) {
            return Err(StoreError::invalid_snapshot(format!(
                "duplicate attribute '{}' on '{path}'",
                attr.name
            )));
        }
        self.set_attribute(path, &attr.name, attr.to_info())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r"
attributes:
  - { name: version, dtype: int64, value: 5 }
  - { name: title, dtype: '|S12', value: experiment }
  - { name: bounds, dtype: float64, shape: [2, 2] }
children:
  - kind: group
    name: run1
    attributes:
      - { name: operator, dtype: '|S8', value: alice }
    children:
      - { kind: dataset, name: temps, shape: [100, 3], dtype: float64 }
      - { kind: dataset, name: events, shape: [42], dtype: compound }
  - { kind: datatype, name: point }
  - { kind: dataset, name: count, dtype: int32 }
";

    #[test]
    fn yaml_snapshot_loads_in_order() {
        let snapshot = Snapshot::from_yaml_str(SAMPLE).unwrap();
        let store = MemoryStore::from_snapshot(&snapshot).unwrap();

        assert_eq!(
            store.list_attributes("/").unwrap(),
            vec!["version", "title", "bounds"]
        );
        assert_eq!(store.list_children("/").unwrap(), vec!["run1", "point", "count"]);
        assert_eq!(store.list_children("/run1").unwrap(), vec!["temps", "events"]);
        assert!(store.is_named_datatype("/point"));
    }

    #[test]
    fn values_and_types_are_carried() {
        let store = MemoryStore::from_snapshot(&Snapshot::from_yaml_str(SAMPLE).unwrap()).unwrap();

        let version = store.attribute_info("/", "version").unwrap();
        assert!(version.is_scalar());
        assert_eq!(version.value.as_deref(), Some("5"));
        assert_eq!(version.element_type.tag(), "(int64)");

        let bounds = store.attribute_info("/", "bounds").unwrap();
        assert!(!bounds.is_scalar());
        assert_eq!(bounds.shape.to_string(), "2x2");

        let events = store.dataset_info("/run1/events").unwrap();
        assert_eq!(events.element_type, ElementType::Compound);

        let count = store.dataset_info("/count").unwrap();
        assert!(count.shape.is_scalar());
    }

    #[test]
    fn json_snapshot_loads() {
        let json = r#"{
            "attributes": [{"name": "flag", "dtype": "bool", "value": true}],
            "children": [{"kind": "group", "name": "g", "children": []}]
        }"#;
        let store = MemoryStore::from_snapshot(&Snapshot::from_json_str(json).unwrap()).unwrap();
        assert!(store.is_group("/g"));
        assert_eq!(
            store.attribute_info("/", "flag").unwrap().value.as_deref(),
            Some("true")
        );
    }

    #[test]
    fn rejects_bad_names() {
        for name in ["'a/b'", "''", "'.'", "'..'"] {
            let yaml = format!("children:\n  - {{ kind: group, name: {name} }}\n");
            let err =
                MemoryStore::from_snapshot(&Snapshot::from_yaml_str(&yaml).unwrap()).unwrap_err();
            assert!(matches!(err, StoreError::InvalidSnapshot(_)), "accepted {name}");
        }

        let nested = "children:\n  - kind: group\n    name: g\n    children:\n      - { kind: datatype, name: '..' }\n";
        let err = MemoryStore::from_snapshot(&Snapshot::from_yaml_str(nested).unwrap()).unwrap_err();
        assert!(matches!(err, StoreError::InvalidSnapshot(ref m) if m.contains("'/g'")));
    }

    #[test]
    fn rejects_duplicate_attributes() {
        let yaml = "attributes:\n  - { name: a, dtype: int8, value: 1 }\n  - { name: a, dtype: int8, value: 2 }\n";
        let err = MemoryStore::from_snapshot(&Snapshot::from_yaml_str(yaml).unwrap()).unwrap_err();
        assert!(matches!(err, StoreError::InvalidSnapshot(ref m) if m.contains("duplicate attribute 'a'")));

        let nested = "children:\n  - kind: group\n    name: g\n    attributes:\n      - { name: a, dtype: int8 }\n      - { name: a, dtype: int16 }\n";
        assert!(MemoryStore::from_snapshot(&Snapshot::from_yaml_str(nested).unwrap()).is_err());
    }

    #[test]
    fn same_attribute_name_on_different_objects_is_fine() {
        let yaml = "attributes:\n  - { name: a, dtype: int8 }\nchildren:\n  - kind: group\n    name: g\n    attributes:\n      - { name: a, dtype: int8 }\n";
        let store = MemoryStore::from_snapshot(&Snapshot::from_yaml_str(yaml).unwrap()).unwrap();
        assert_eq!(store.list_attributes("/g").unwrap(), vec!["a"]);
    }

    #[test]
    fn rejects_duplicate_children() {
        let yaml = "children:\n  - { kind: group, name: a }\n  - { kind: datatype, name: a }\n";
        let err = MemoryStore::from_snapshot(&Snapshot::from_yaml_str(yaml).unwrap()).unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(ref p) if p == "/a"));
    }

    #[test]
    fn rejects_unknown_kind() {
        let yaml = "children:\n  - { kind: link, name: a }\n";
        assert!(Snapshot::from_yaml_str(yaml).is_err());
    }

    #[test]
    fn loads_from_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("sample.yaml");
        std::fs::File::create(&yaml_path)
            .unwrap()
            .write_all(SAMPLE.as_bytes())
            .unwrap();
        let store = MemoryStore::from_snapshot_file(&yaml_path).unwrap();
        assert!(store.is_dataset("/run1/temps"));

        let json_path = dir.path().join("sample.json");
        std::fs::write(&json_path, r#"{"children": [{"kind": "datatype", "name": "t"}]}"#).unwrap();
        let store = MemoryStore::from_snapshot_file(&json_path).unwrap();
        assert!(store.is_named_datatype("/t"));

        let missing = MemoryStore::from_snapshot_file(dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(missing, StoreError::Io(_)));
    }
}
