//! Projective indices and dimension vectors.
//!
//! A dimension vector records, for each declared projective index, the
//! multiplicity of the corresponding simple composition factor. Vectors are
//! stored as ordered maps; a key that is absent counts as a zero component,
//! and equality is defined accordingly.
//!
//! # Citations
//! - Auslander, Reiten & Smalø, "Representation Theory of Artin Algebras", CUP (1995)
//! - Gabriel, "Auslander-Reiten sequences and representation-finite algebras", LNM 831 (1980)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Index naming one declared projective.
///
/// A thin wrapper over the user-supplied key string. Ordered, so every
/// per-index iteration in the crate is deterministic.
#[repr(transparent)]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjIndex(String);

impl ProjIndex {
    /// Creates an index from any string-like value.
    #[inline]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the underlying key.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProjIndex {
    #[inline]
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

impl fmt::Display for ProjIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Integer vector indexed by projective indices.
///
/// Components may be zero (arithmetic leaves explicit zeros in place) and,
/// transiently during translation, negative.
///
/// # Invariant
/// - Equality reads an absent key as a zero component: `{a:1}` equals
///   `{a:1, b:0}`. This is the comparison the knitting matcher relies on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DimVector(BTreeMap<ProjIndex, i64>);

impl DimVector {
    /// Creates the zero vector.
    #[inline]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Creates the unit vector with component 1 at `index`.
    pub fn unit(index: &ProjIndex) -> Self {
        let mut components = BTreeMap::new();
        components.insert(index.clone(), 1);
        Self(components)
    }

    /// Returns the component at `index`, zero when absent.
    #[inline]
    pub fn component(&self, index: &ProjIndex) -> i64 {
        self.0.get(index).copied().unwrap_or(0)
    }

    /// Sets the component at `index`.
    #[inline]
    pub fn set_component(&mut self, index: ProjIndex, value: i64) {
        self.0.insert(index, value);
    }

    /// Adds `scale * other` to this vector over the union of keys.
    pub fn add_scaled(&mut self, other: &DimVector, scale: i64) {
        for (index, value) in &other.0 {
            *self.0.entry(index.clone()).or_insert(0) += scale * value;
        }
    }

    /// Returns the componentwise negation.
    pub fn negated(&self) -> DimVector {
        Self(self.0.iter().map(|(i, v)| (i.clone(), -v)).collect())
    }

    /// Whether any component is negative.
    pub fn has_negative(&self) -> bool {
        self.0.values().any(|&v| v < 0)
    }

    /// Iterates the stored components in index order, zeros included.
    pub fn components(&self) -> impl Iterator<Item = (&ProjIndex, i64)> {
        self.0.iter().map(|(i, &v)| (i, v))
    }
}

impl PartialEq for DimVector {
    /// Absent keys count as zero on either side.
    fn eq(&self, other: &Self) -> bool {
        self.0.iter().all(|(i, &v)| v == 0 || other.component(i) == v)
            && other.0.iter().all(|(i, &v)| v == 0 || self.component(i) == v)
    }
}

impl Eq for DimVector {}

impl FromIterator<(ProjIndex, i64)> for DimVector {
    fn from_iter<T: IntoIterator<Item = (ProjIndex, i64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for DimVector {
    /// Concatenates indices with positive components in index order,
    /// exponent notation past 1: `{a:1, b:2}` renders as `ab^2`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, value) in &self.0 {
            if *value == 1 {
                write!(f, "{index}")?;
            } else if *value > 1 {
                write!(f, "{index}^{value}")?;
            }
        }
        Ok(())
    }
}
