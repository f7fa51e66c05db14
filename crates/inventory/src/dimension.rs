//! Specification dimensions (the axes a product varies along).

use serde::{Deserialize, Serialize};

use varistock_core::ValueObject;

/// One named axis of variation, e.g. `color: [red, blue]`.
///
/// Values keep their entered order and may contain duplicates or blanks while
/// the user is still typing; blanks never take part in expansion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

impl ValueObject for Dimension {}

impl Dimension {
    pub fn new<N, I, V>(name: N, values: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// A dimension without a usable name contributes nothing to the matrix.
    pub fn is_named(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Values that participate in expansion, in entered order.
    pub fn selectable_values(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str).filter(|v| !v.is_empty())
    }

    pub fn selectable_count(&self) -> usize {
        self.selectable_values().count()
    }

    pub fn contains_value(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

/// Ordered list of dimensions. The order defines key composition order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecificationSet(Vec<Dimension>);

impl SpecificationSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Dimensions that take part in expansion (nameless ones are skipped).
    pub fn named(&self) -> impl Iterator<Item = &Dimension> {
        self.0.iter().filter(|d| d.is_named())
    }

    pub fn get(&self, name: &str) -> Option<&Dimension> {
        self.0.iter().find(|d| d.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Dimension> {
        self.0.iter_mut().find(|d| d.name == name)
    }

    pub fn push(&mut self, dimension: Dimension) {
        self.0.push(dimension);
    }

    /// Remove the first dimension called `name`, returning it.
    pub fn remove(&mut self, name: &str) -> Option<Dimension> {
        let idx = self.0.iter().position(|d| d.name == name)?;
        Some(self.0.remove(idx))
    }
}

impl From<Vec<Dimension>> for SpecificationSet {
    fn from(dimensions: Vec<Dimension>) -> Self {
        Self(dimensions)
    }
}

impl FromIterator<Dimension> for SpecificationSet {
    fn from_iter<T: IntoIterator<Item = Dimension>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
