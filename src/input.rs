//! Construction inputs and their validation.
//!
//! A component is built from two user-supplied pieces: the radical
//! description (per projective index, the summands of the radical of its
//! projective cover) and optional seed-position hints. Both are checked
//! synchronously before any vertex is created; nothing here is deferred to
//! knitting time.

use crate::dim::{DimVector, ProjIndex};
use crate::knit::Geometry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Validation failure for construction inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The radical description is malformed.
    #[error("invalid projectives: {0}")]
    InvalidProjectiveData(String),
    /// A position hint is malformed or keyed by an unknown index.
    #[error("invalid positions: {0}")]
    InvalidPositionData(String),
}

/// One radical summand: multiplicity and dimension vector.
///
/// Serializes as a two-element array `[m, {index: component, ...}]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summand(pub i64, pub DimVector);

impl Summand {
    /// Creates a summand from a multiplicity and a dimension vector.
    #[inline]
    pub fn new(multiplicity: i64, dim: DimVector) -> Self {
        Self(multiplicity, dim)
    }

    #[inline]
    pub fn multiplicity(&self) -> i64 {
        self.0
    }

    #[inline]
    pub fn dim(&self) -> &DimVector {
        &self.1
    }
}

/// Radical description keyed by declared projective index.
pub type Radical = BTreeMap<ProjIndex, Vec<Summand>>;

/// Seed-position hint for one projective.
///
/// Either an ordinal choosing one of the default slots, or an explicit
/// coordinate pair in the `"(y|ox)"` syntax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PositionHint {
    Slot(i64),
    Pair(String),
}

/// Position hints keyed by projective index; missing keys fall back to the
/// remaining default slots.
pub type Positions = BTreeMap<ProjIndex, PositionHint>;

/// A resolved seed position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedPosition {
    pub y: i64,
    pub ox: i64,
}

/// Checks the radical description.
///
/// Every summand must carry a multiplicity of at least 1, and its dimension
/// vector may only reference declared indices with components of at least 0.
pub fn validate_radical(radical: &Radical) -> Result<(), InputError> {
    for (index, summands) in radical {
        for summand in summands {
            if summand.multiplicity() < 1 {
                return Err(InputError::InvalidProjectiveData(format!(
                    "summand of {index} has multiplicity {}",
                    summand.multiplicity()
                )));
            }
            for (i, component) in summand.dim().components() {
                if !radical.contains_key(i) {
                    return Err(InputError::InvalidProjectiveData(format!(
                        "summand of {index} references undeclared index {i}"
                    )));
                }
                if component < 0 {
                    return Err(InputError::InvalidProjectiveData(format!(
                        "summand of {index} has negative component at {i}"
                    )));
                }
            }
        }
    }
    Ok(())
}

/// Resolves position hints into concrete seed positions.
///
/// Explicit pairs resolve to `{ y: y + oy, ox }`. An ordinal hint `s`
/// resolves to default slot `s` and, when `s` lies in `0..n`, marks that
/// slot consumed. Projectives without hints take the remaining unconsumed
/// slots in index order. Out-of-range ordinals resolve by the same slot
/// formula and consume nothing.
pub fn resolve_positions(
    radical: &Radical,
    positions: &Positions,
    geometry: &Geometry,
) -> Result<BTreeMap<ProjIndex, SeedPosition>, InputError> {
    let n = radical.len() as i64;
    let mut resolved = BTreeMap::new();
    let mut available: Vec<Option<i64>> = (0..n).map(Some).collect();

    for (index, hint) in positions {
        if !radical.contains_key(index) {
            return Err(InputError::InvalidPositionData(format!(
                "{index} is not a declared projective"
            )));
        }
        let position = match hint {
            PositionHint::Slot(slot) => {
                if (0..n).contains(slot) {
                    available[*slot as usize] = None;
                }
                slot_position(*slot, n, geometry)
            }
            PositionHint::Pair(raw) => {
                let (y, ox) = parse_pair(raw).ok_or_else(|| {
                    InputError::InvalidPositionData(format!("malformed coordinate pair {raw:?}"))
                })?;
                SeedPosition {
                    y: y + geometry.oy,
                    ox,
                }
            }
        };
        resolved.insert(index.clone(), position);
    }

    let mut free = available.into_iter().flatten();
    for index in radical.keys() {
        if !positions.contains_key(index) {
            let slot = free.next().expect("unplaced projectives never outnumber free slots");
            resolved.insert(index.clone(), slot_position(slot, n, geometry));
        }
    }

    Ok(resolved)
}

fn slot_position(slot: i64, n: i64, geometry: &Geometry) -> SeedPosition {
    SeedPosition {
        y: (2 * slot - n + 1) * geometry.dy + geometry.oy,
        ox: 0,
    }
}

/// Parses the `"(y|ox)"` pair syntax: two signed decimal integers.
fn parse_pair(raw: &str) -> Option<(i64, i64)> {
    let inner = raw.strip_prefix('(')?.strip_suffix(')')?;
    let (y, ox) = inner.split_once('|')?;
    Some((parse_signed_int(y)?, parse_signed_int(ox)?))
}

fn parse_signed_int(raw: &str) -> Option<i64> {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
