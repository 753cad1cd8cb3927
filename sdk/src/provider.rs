use crate::error::StoreResult;
use crate::types::{AttributeInfo, DatasetInfo, ObjectKind};

/// Read-only view of a hierarchical data container.
///
/// Paths are absolute and `/`-delimited. Name listings come back in the
/// store's native enumeration order.
pub trait StoreProvider {
    /// Kind of object at `path`, or `None` when nothing lives there.
    fn kind(&self, path: &str) -> Option<ObjectKind>;

    fn list_children(&self, path: &str) -> StoreResult<Vec<String>>;

    fn list_attributes(&self, path: &str) -> StoreResult<Vec<String>>;

    fn attribute_info(&self, path: &str, name: &str) -> StoreResult<AttributeInfo>;

    fn dataset_info(&self, path: &str) -> StoreResult<DatasetInfo>;

    fn is_group(&self, path: &str) -> bool {
        self.kind(path) == Some(ObjectKind::Group)
    }

    fn is_dataset(&self, path: &str) -> bool {
        self.kind(path) == Some(ObjectKind::Dataset)
    }

    fn is_named_datatype(&self, path: &str) -> bool {
        self.kind(path) == Some(ObjectKind::NamedDatatype)
    }
}

impl<P: StoreProvider + ?Sized> StoreProvider for Box<P> {
    fn kind(&self, path: &str) -> Option<ObjectKind> {
        (**self).kind(path)
    }

    fn list_children(&self, path: &str) -> StoreResult<Vec<String>> {
        (**self).list_children(path)
    }

    fn list_attributes(&self, path: &str) -> StoreResult<Vec<String>> {
        (**self).list_attributes(path)
    }

    fn attribute_info(&self, path: &str, name: &str) -> StoreResult<AttributeInfo> {
        (**self).attribute_info(path, name)
    }

    fn dataset_info(&self, path: &str) -> StoreResult<DatasetInfo> {
        (**self).dataset_info(path)
    }
}

impl<P: StoreProvider + ?Sized> StoreProvider for std::sync::Arc<P> {
    fn kind(&self, path: &str) -> Option<ObjectKind> {
        (**self).kind(path)
    }

    fn list_children(&self, path: &str) -> StoreResult<Vec<String>> {
        (**self).list_children(path)
    }

    fn list_attributes(&self, path: &str) -> StoreResult<Vec<String>> {
        (**self).list_attributes(path)
    }

    fn attribute_info(&self, path: &str, name: &str) -> StoreResult<AttributeInfo> {
        (**self).attribute_info(path, name)
    }

    fn dataset_info(&self, path: &str) -> StoreResult<DatasetInfo> {
        (**self).dataset_info(path)
    }
}
