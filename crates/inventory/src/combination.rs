//! Cartesian expansion of a specification set into variant combinations.

use serde::{Deserialize, Serialize};

use varistock_core::ValueObject;

use crate::dimension::SpecificationSet;

/// One value chosen per dimension, as `(dimension name, value)` pairs in
/// specification order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Combination(Vec<(String, String)>);

impl ValueObject for Combination {}

impl Combination {
    pub fn from_pairs<I, N, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        Self(pairs.into_iter().map(|(n, v)| (n.into(), v.into())).collect())
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value chosen for `dimension`, if the combination covers it.
    pub fn value_of(&self, dimension: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == dimension)
            .map(|(_, v)| v.as_str())
    }
}

/// Expand `specs` into every combination, outer dimension varying slowest.
///
/// Returns an empty list when there are no named dimensions, and also when any
/// named dimension has no selectable values. Callers map both to the default
/// key; an empty result never means "one empty combination".
pub fn generate_combinations(specs: &SpecificationSet) -> Vec<Combination> {
    let axes: Vec<(&str, Vec<&str>)> = specs
        .named()
        .map(|d| (d.name.as_str(), d.selectable_values().collect()))
        .collect();

    if axes.is_empty() || axes.iter().any(|(_, values)| values.is_empty()) {
        return Vec::new();
    }

    let mut out = Vec::new();
    let mut current = Vec::with_capacity(axes.len());
    expand(&axes, &mut current, &mut out);
    out
}

fn expand<'a>(
    axes: &[(&'a str, Vec<&'a str>)],
    current: &mut Vec<(&'a str, &'a str)>,
    out: &mut Vec<Combination>,
) {
    let Some(((name, values), rest)) = axes.split_first() else {
        out.push(Combination::from_pairs(current.iter().copied()));
        return;
    };

    for value in values {
        current.push((*name, *value));
        expand(rest, current, out);
        current.pop();
    }
}
