use std::fmt;

/// What a path inside the container refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ObjectKind {
    Group,
    Dataset,
    NamedDatatype,
}

/// Dimension sizes of a dataset or attribute. No dimensions means scalar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Shape(Vec<u64>);

impl Shape {
    #[must_use]
    pub fn new(dims: impl Into<Vec<u64>>) -> Self {
        Self(dims.into())
    }

    #[must_use]
    pub fn scalar() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn is_scalar(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of elements; a scalar holds exactly one.
    #[must_use]
    pub fn element_count(&self) -> u64 {
        self.0.iter().product()
    }
}

impl From<Vec<u64>> for Shape {
    fn from(dims: Vec<u64>) -> Self {
        Self(dims)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.pad("Scalar");
        }
        let joined = self
            .0
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join("x");
        f.pad(&joined)
    }
}

/// Element type of a dataset or attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// A builtin primitive, named by its descriptor (`int64`, `float32`, `|S8`).
    Primitive(String),
    /// Anything that is not a builtin primitive.
    Compound,
}

impl ElementType {
    /// Parses a type descriptor; `compound` in any case is the compound marker.
    #[must_use]
    pub fn parse(descriptor: &str) -> Self {
        let descriptor = descriptor.trim();
        if descriptor.eq_ignore_ascii_case("compound") {
            Self::Compound
        } else {
            Self::Primitive(descriptor.to_string())
        }
    }

    /// Parenthesized tag used in listings: `(int64)` or `(Compound)`.
    #[must_use]
    pub fn tag(&self) -> String {
        match self {
            Self::Primitive(name) => format!("({name})"),
            Self::Compound => "(Compound)".to_string(),
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(name) => f.write_str(name),
            Self::Compound => f.write_str("Compound"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeInfo {
    pub shape: Shape,
    pub element_type: ElementType,
    /// Display form of the value when the attribute holds a single element.
    pub value: Option<String>,
}

impl AttributeInfo {
    #[must_use]
    pub fn scalar(element_type: ElementType, value: impl Into<String>) -> Self {
        Self {
            shape: Shape::scalar(),
            element_type,
            value: Some(value.into()),
        }
    }

    #[must_use]
    pub fn array(shape: Shape, element_type: ElementType) -> Self {
        Self {
            shape,
            element_type,
            value: None,
        }
    }

    /// Single-element attributes are shown with their value, not their shape.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        self.shape.element_count() == 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetInfo {
    pub shape: Shape,
    pub element_type: ElementType,
}
