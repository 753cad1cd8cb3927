use h5sh_sdk::{
    AttributeInfo, DatasetInfo, ObjectKind, StoreError, StoreProvider, StoreResult,
};
use std::collections::HashMap;

#[derive(Debug, Clone)]
enum MemBody {
    Group { children: Vec<String> },
    Dataset(DatasetInfo),
    Datatype,
}

#[derive(Debug, Clone)]
struct MemObject {
    body: MemBody,
    attributes: Vec<(String, AttributeInfo)>,
}

impl MemObject {
    fn new(body: MemBody) -> Self {
        Self {
            body,
            attributes: Vec::new(),
        }
    }

    fn kind(&self) -> ObjectKind {
        match self.body {
            MemBody::Group { .. } => ObjectKind::Group,
            MemBody::Dataset(_) => ObjectKind::Dataset,
            MemBody::Datatype => ObjectKind::NamedDatatype,
        }
    }
}

/// In-memory container. Children and attributes keep insertion order,
/// which is the order listings report them in.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    objects: HashMap<String, MemObject>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        let mut objects = HashMap::new();
        objects.insert(
            "/".to_string(),
            MemObject::new(MemBody::Group {
                children: Vec::new(),
            }),
        );
        Self { objects }
    }

    pub fn add_group(&mut self, path: &str) -> StoreResult<()> {
        self.insert(
            path,
            MemBody::Group {
                children: Vec::new(),
            },
        )
    }

    pub fn add_dataset(&mut self, path: &str, info: DatasetInfo) -> StoreResult<()> {
        self.insert(path, MemBody::Dataset(info))
    }

    pub fn add_datatype(&mut self, path: &str) -> StoreResult<()> {
        self.insert(path, MemBody::Datatype)
    }

    /// Attaches an attribute to any object, replacing one of the same name
    /// in place.
    pub fn set_attribute(&mut self, path: &str, name: &str, info: AttributeInfo) -> StoreResult<()> {
        let path = Self::normalize_path(path);
        let object = self
            .objects
            .get_mut(&path)
            .ok_or_else(|| StoreError::not_found(&path))?;
        if let Some(slot) = object.attributes.iter_mut().find(|(n, _)| n == name) {
            slot.1 = info;
        } else {
            object.attributes.push((name.to_string(), info));
        }
        Ok(())
    }

    /// Number of objects, the root group included.
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    fn insert(&mut self, path: &str, body: MemBody) -> StoreResult<()> {
        let path = Self::normalize_path(path);
        if self.objects.contains_key(&path) {
            return Err(StoreError::already_exists(&path));
        }
        let (parent, name) = Self::split_parent(&path)
            .ok_or_else(|| StoreError::already_exists("/"))?;

        match self.objects.get_mut(&parent) {
            Some(MemObject {
                body: MemBody::Group { children },
                ..
            }) => children.push(name),
            Some(_) => return Err(StoreError::not_group(&parent)),
            None => return Err(StoreError::not_found(&parent)),
        }

        self.objects.insert(path, MemObject::new(body));
        Ok(())
    }

    pub(crate) fn normalize_path(path: &str) -> String {
        let path = if path.is_empty() { "/" } else { path };
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        if path.len() > 1 && path.ends_with('/') {
            let trimmed = path.trim_end_matches('/');
            if trimmed.is_empty() {
                "/".to_string()
            } else {
                trimmed.to_string()
            }
        } else {
            path
        }
    }

    fn split_parent(path: &str) -> Option<(String, String)> {
        if path == "/" {
            return None;
        }
        let (parent, name) = path.rsplit_once('/')?;
        let parent = if parent.is_empty() { "/" } else { parent };
        Some((parent.to_string(), name.to_string()))
    }

    fn object(&self, path: &str) -> StoreResult<&MemObject> {
        let path = Self::normalize_path(path);
        self.objects
            .get(&path)
            .ok_or_else(|| StoreError::not_found(&path))
    }
}

impl StoreProvider for MemoryStore {
    fn kind(&self, path: &str) -> Option<ObjectKind> {
        self.objects
            .get(&Self::normalize_path(path))
            .map(MemObject::kind)
    }

    fn list_children(&self, path: &str) -> StoreResult<Vec<String>> {
        match &self.object(path)?.body {
            MemBody::Group { children } => Ok(children.clone()),
            _ => Err(StoreError::not_group(Self::normalize_path(path))),
        }
    }

    fn list_attributes(&self, path: &str) -> StoreResult<Vec<String>> {
        Ok(self
            .object(path)?
            .attributes
            .iter()
            .map(|(name, _)| name.clone())
            .collect())
    }

    fn attribute_info(&self, path: &str, name: &str) -> StoreResult<AttributeInfo> {
        self.object(path)?
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, info)| info.clone())
            .ok_or_else(|| StoreError::not_found(format!("{}@{name}", Self::normalize_path(path))))
    }

    fn dataset_info(&self, path: &str) -> StoreResult<DatasetInfo> {
        match &self.object(path)?.body {
            MemBody::Dataset(info) => Ok(info.clone()),
            _ => Err(StoreError::not_dataset(Self::normalize_path(path))),
        }
    }
}
