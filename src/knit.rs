//! The knitting engine.
//!
//! Grows the preprojective component of an Auslander-Reiten quiver from a
//! radical description. Growth is demand-driven: `populate(max_width)` runs
//! worklist rounds until the pending frontier lies beyond a pixel horizon,
//! then returns; a later call resumes where the last one stopped. A
//! component that can no longer make progress is flagged stuck.
//!
//! Each round processes the queue in insertion order. A vertex whose
//! knitting predecessors are not all finalized is deferred unchanged;
//! otherwise it is matched against every remaining radical summand,
//! finalized, and either classified injective or extended by its
//! translate, whose incoming arrows mirror the finalized vertex's outgoing
//! ones.
//!
//! # Citations
//! - Auslander, Reiten & Smalø, "Representation Theory of Artin Algebras", CUP (1995), ch. VII
//! - Ringel, "Tame algebras and integral quadratic forms", LNM 1099 (1984)
//! - Gabriel, "Auslander-Reiten sequences and representation-finite algebras", LNM 831 (1980)
//!
//! # Invariants
//! - Finalized vertices are never modified again by knitting; later
//!   `populate` calls only extend the frontier. Layout coordinates may
//!   still shift through layering pulls and `move_vertex`.
//! - The queue is duplicate-free and processed in insertion order;
//!   deferred vertices keep their position ahead of newly enqueued ones.
//! - `stuck` is sticky and reported through `tracing` at most once.

use crate::dim::{DimVector, ProjIndex};
use crate::input::{self, InputError, Positions, Radical, SeedPosition, Summand};
use crate::quiver::{ArrowId, Quiver, VertexId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::{debug, trace, warn};

/// Layout and horizon configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    /// Horizontal distance between adjacent layers.
    pub dx: i64,
    /// Half the vertical gap between adjacent default seed slots.
    pub dy: i64,
    /// Left margin added to every x coordinate.
    pub ox: i64,
    /// Vertical center of the default seed band.
    pub oy: i64,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            dx: 50,
            dy: 25,
            ox: 20,
            oy: 500,
        }
    }
}

/// Classification of a vertex. Both flags may hold at once: a projective
/// whose translate leaves the component is "projective injective".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VertexClass {
    pub projective: bool,
    pub injective: bool,
}

impl fmt::Display for VertexClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.projective, self.injective) {
            (true, true) => f.write_str("projective injective"),
            (true, false) => f.write_str("projective"),
            (false, true) => f.write_str("injective"),
            (false, false) => Ok(()),
        }
    }
}

/// Vertex payload: the module a vertex stands for, plus its layout state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleData {
    /// Dimension vector of the module.
    pub dim: DimVector,
    /// Index of the projective whose tau-orbit this vertex belongs to.
    pub index: ProjIndex,
    /// Orbit step: the vertex is the r-th inverse translate of its seed.
    pub r: u32,
    pub class: VertexClass,
    /// Whether the translation step has run for this vertex.
    pub translated: bool,
    /// Discrete layer; `x` is derived from it.
    pub x_layer: i64,
    pub x: i64,
    pub y: i64,
    /// Horizontal drag offset; consulted only on projectives.
    pub ox: i64,
}

/// Arrow payload. The multiplicity is meaningful on knitting arrows and
/// carried as 0 on trans arrows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrowData {
    pub multiplicity: i64,
}

/// An incrementally knitted preprojective component.
///
/// Owns the quiver it grows into together with the working radical, the
/// pending queue, and the per-projective successor cones and tau orbits
/// that drive layout.
#[derive(Debug, Clone)]
pub struct PreprojectiveComponent {
    geometry: Geometry,
    /// Horizon slack: number of declared projectives times `dx`.
    ndx: i64,
    quiver: Quiver<ModuleData, ArrowData>,
    /// Seed vertices in index order.
    projectives: Vec<VertexId>,
    /// Working radical; summands are consumed as they are matched.
    radical: BTreeMap<ProjIndex, Vec<Summand>>,
    queue: Vec<VertexId>,
    /// For each projective, the vertices reachable through knitting arrows.
    successors: BTreeMap<VertexId, BTreeSet<VertexId>>,
    /// For each projective, its tau-orbit members.
    tau_orbits: BTreeMap<VertexId, BTreeSet<VertexId>>,
    something_changed: bool,
    stuck: bool,
    stuck_reported: bool,
}

impl PreprojectiveComponent {
    /// Validates the inputs and seeds one projective vertex per declared
    /// index, in index order.
    ///
    /// A seed's dimension vector is the unit vector at its own index plus
    /// every radical summand scaled by its multiplicity. Seeds with an
    /// empty radical entry are ready immediately and enter the queue.
    pub fn new(
        radical: Radical,
        positions: Positions,
        geometry: Geometry,
    ) -> Result<Self, InputError> {
        input::validate_radical(&radical)?;
        let seeds = input::resolve_positions(&radical, &positions, &geometry)?;
        let ndx = radical.len() as i64 * geometry.dx;
        let mut component = Self {
            geometry,
            ndx,
            quiver: Quiver::new(),
            projectives: Vec::new(),
            radical: BTreeMap::new(),
            queue: Vec::new(),
            successors: BTreeMap::new(),
            tau_orbits: BTreeMap::new(),
            something_changed: true,
            stuck: false,
            stuck_reported: false,
        };
        component.seed(radical, &seeds);
        Ok(component)
    }

    fn seed(&mut self, radical: Radical, seeds: &BTreeMap<ProjIndex, SeedPosition>) {
        let indices: Vec<ProjIndex> = radical.keys().cloned().collect();
        for (index, summands) in radical {
            let mut dim: DimVector = indices
                .iter()
                .map(|j| (j.clone(), if *j == index { 1 } else { 0 }))
                .collect();
            for summand in &summands {
                dim.add_scaled(summand.dim(), summand.multiplicity());
            }

            let position = seeds[&index];
            let vertex = self.quiver.add_vertex(ModuleData {
                dim: DimVector::new(),
                index: index.clone(),
                r: 0,
                class: VertexClass {
                    projective: true,
                    injective: false,
                },
                translated: false,
                x_layer: 0,
                x: 0,
                y: position.y,
                ox: position.ox,
            });
            self.projectives.push(vertex);
            if summands.is_empty() {
                self.queue.push(vertex);
            }
            self.successors.insert(vertex, BTreeSet::from([vertex]));
            self.tau_orbits.insert(vertex, BTreeSet::from([vertex]));
            self.set_dim_vector(vertex, dim);
            self.update_position(vertex, 0);
            self.radical.insert(index, summands);
        }
    }

    /// Advances the knitting until the pending frontier lies past
    /// `max_width` plus the horizon slack, no vertex is pending, or no
    /// progress is possible. Resumable: a later call with a wider horizon
    /// picks up exactly where this one stopped.
    pub fn populate(&mut self, max_width: i64) {
        // queued ids go stale when the editing surface removes vertices
        self.queue.retain(|&v| self.quiver.contains_vertex(v));
        debug!(max_width, pending = self.queue.len(), "populate");
        while self.something_changed
            && !self.queue.is_empty()
            && self.frontier_x() < max_width.saturating_add(self.ndx)
        {
            self.something_changed = false;
            let current = std::mem::take(&mut self.queue);
            let mut next: Vec<VertexId> = Vec::new();

            for vertex in current {
                if !self.predecessors_translated(vertex) {
                    enqueue(&mut next, vertex);
                    continue;
                }

                self.match_radical(vertex, &mut next);

                self.pull_predecessors(vertex);
                if let Some(v) = self.quiver.vertex_mut(vertex) {
                    v.data.translated = true;
                }
                self.something_changed = true;

                let translated = self.translated_dim_vector(vertex);
                if translated.has_negative() {
                    if let Some(v) = self.quiver.vertex_mut(vertex) {
                        v.data.class.injective = true;
                    }
                } else {
                    let continuation = self.add_continuation(vertex, translated);
                    enqueue(&mut next, continuation);
                }
            }

            self.queue = next;
            trace!(pending = self.queue.len(), "round complete");
        }

        if !self.queue.is_empty() {
            if !self.something_changed {
                self.mark_stuck();
            }
        } else if self.quiver.vertices().any(|v| !v.data.translated) {
            self.mark_stuck();
        }
        debug!(
            vertices = self.quiver.vertex_count(),
            arrows = self.quiver.arrow_count(),
            stuck = self.stuck,
            "populate done"
        );
    }

    /// Drags a vertex. The move is resolved against the projective at the
    /// end of the vertex's translation chain: vertical offsets shift that
    /// projective's whole tau-orbit while the orbit stays inside the
    /// `[0, 2*oy]` band; horizontal offsets shift its successor cone, with
    /// leftward moves rejected when any projective would come closer than
    /// `dx` to a knitting predecessor outside the moving cone. No-op for
    /// unknown ids.
    pub fn move_vertex(&mut self, id: VertexId, dx: i64, dy: i64) {
        let Some(anchor) = self.quiver.vertex(id).map(|v| v.tau_destination) else {
            return;
        };
        let Some(anchor_y) = self.quiver.vertex(anchor).map(|v| v.data.y) else {
            return;
        };

        if anchor_y + dy >= 0 && anchor_y + dy <= 2 * self.geometry.oy {
            if let Some(orbit) = self.tau_orbits.get(&anchor).cloned() {
                for member in orbit {
                    if let Some(v) = self.quiver.vertex_mut(member) {
                        v.data.y += dy;
                    }
                }
            }
        }

        let Some(anchor_x) = self.quiver.vertex(anchor).map(|v| v.data.x) else {
            return;
        };
        if anchor_x + dx < 0 {
            return;
        }
        if dx < 0 && !self.horizontal_gap_ok(anchor, dx) {
            trace!(vertex = %anchor, dx, "horizontal move rejected");
            return;
        }
        if let Some(v) = self.quiver.vertex_mut(anchor) {
            v.data.ox += dx;
        }
        if let Some(cone) = self.successors.get(&anchor).cloned() {
            for member in cone {
                if let Some(v) = self.quiver.vertex_mut(member) {
                    v.data.x += dx;
                }
            }
        }
    }

    /// Whether knitting can no longer make progress.
    #[inline]
    pub fn stuck(&self) -> bool {
        self.stuck
    }

    #[inline]
    pub fn quiver(&self) -> &Quiver<ModuleData, ArrowData> {
        &self.quiver
    }

    #[inline]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Seed vertices in index order.
    #[inline]
    pub fn projectives(&self) -> &[VertexId] {
        &self.projectives
    }

    /// Queued vertex ids in processing order.
    pub fn pending(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.queue.iter().copied()
    }

    /// Vertices reachable from a projective through knitting arrows.
    pub fn successor_cone(&self, projective: VertexId) -> Option<&BTreeSet<VertexId>> {
        self.successors.get(&projective)
    }

    /// Tau-orbit members of a projective.
    pub fn tau_orbit(&self, projective: VertexId) -> Option<&BTreeSet<VertexId>> {
        self.tau_orbits.get(&projective)
    }

    /// Pass-through vertex insertion for an external editing surface.
    pub fn add_vertex(&mut self, data: ModuleData) -> VertexId {
        self.quiver.add_vertex(data)
    }

    /// Pass-through arrow insertion for an external editing surface.
    pub fn add_arrow(
        &mut self,
        source: VertexId,
        target: VertexId,
        trans: bool,
        data: ArrowData,
    ) -> Option<ArrowId> {
        self.quiver.add_arrow(source, target, trans, data)
    }

    /// Pass-through vertex removal for an external editing surface.
    pub fn remove_vertex(&mut self, id: VertexId) -> bool {
        self.quiver.remove_vertex(id)
    }

    /// Pass-through arrow removal for an external editing surface.
    pub fn remove_arrow(&mut self, id: ArrowId) -> bool {
        self.quiver.remove_arrow(id)
    }

    /// Smallest x among queued vertices.
    fn frontier_x(&self) -> i64 {
        self.queue
            .iter()
            .filter_map(|&v| self.quiver.vertex(v).map(|vertex| vertex.data.x))
            .min()
            .unwrap_or(i64::MAX)
    }

    /// Incoming knitting arrows, insertion order.
    fn knit_in(&self, id: VertexId) -> Vec<ArrowId> {
        let Some(vertex) = self.quiver.vertex(id) else {
            return Vec::new();
        };
        vertex
            .in_arrows
            .iter()
            .copied()
            .filter(|&a| self.quiver.arrow(a).is_some_and(|arrow| !arrow.trans))
            .collect()
    }

    /// Outgoing knitting arrows, insertion order.
    fn knit_out(&self, id: VertexId) -> Vec<ArrowId> {
        let Some(vertex) = self.quiver.vertex(id) else {
            return Vec::new();
        };
        vertex
            .out_arrows
            .iter()
            .copied()
            .filter(|&a| self.quiver.arrow(a).is_some_and(|arrow| !arrow.trans))
            .collect()
    }

    fn predecessors_translated(&self, id: VertexId) -> bool {
        self.knit_in(id).iter().all(|&a| {
            self.quiver
                .arrow(a)
                .and_then(|arrow| self.quiver.vertex(arrow.source))
                .is_some_and(|source| source.data.translated)
        })
    }

    /// Matches `vertex` against every remaining radical summand, in seed
    /// order. Each hit consumes the summand, adds a knitting arrow into the
    /// summand's projective, and re-layers that projective behind `vertex`.
    /// Scanning resumes at the consumed slot, so duplicate summands yield
    /// parallel arrows. A projective whose radical empties here becomes
    /// constructible and enters the next round's queue.
    fn match_radical(&mut self, vertex: VertexId, next: &mut Vec<VertexId>) {
        let Some(dim) = self.quiver.vertex(vertex).map(|v| v.data.dim.clone()) else {
            return;
        };
        for position in 0..self.projectives.len() {
            let projective = self.projectives[position];
            let Some(index) = self
                .quiver
                .vertex(projective)
                .map(|v| v.data.index.clone())
            else {
                continue;
            };
            let mut summands = match self.radical.get_mut(&index) {
                Some(remaining) if !remaining.is_empty() => std::mem::take(remaining),
                _ => continue,
            };

            let mut j = 0;
            while j < summands.len() {
                if summands[j].dim() != &dim {
                    j += 1;
                    continue;
                }
                let multiplicity = summands[j].multiplicity();
                self.add_knit_arrow(vertex, projective, multiplicity);
                let layer = self.quiver.vertex(vertex).map_or(0, |v| v.data.x_layer);
                self.push_to_layer(projective, layer + 1);
                self.pull_predecessors(projective);
                summands.remove(j);
            }

            let emptied = summands.is_empty();
            if let Some(slot) = self.radical.get_mut(&index) {
                *slot = summands;
            }
            if emptied {
                enqueue(next, projective);
            }
        }
    }

    /// The candidate dimension vector of the inverse translate: the
    /// negated vector plus every outgoing knitting arrow's target scaled by
    /// the arrow multiplicity.
    fn translated_dim_vector(&self, id: VertexId) -> DimVector {
        let mut result = match self.quiver.vertex(id) {
            Some(vertex) => vertex.data.dim.negated(),
            None => return DimVector::new(),
        };
        for a in self.knit_out(id) {
            let Some(arrow) = self.quiver.arrow(a) else {
                continue;
            };
            let multiplicity = arrow.data.multiplicity;
            if let Some(target) = self.quiver.vertex(arrow.target) {
                result.add_scaled(&target.data.dim, multiplicity);
            }
        }
        result
    }

    /// Creates the inverse translate of a finalized vertex: trans arrow
    /// into the vertex, mirrored knitting arrows from each of its targets,
    /// dimension vector `dim`, and a layer one past its deepest
    /// predecessor.
    fn add_continuation(&mut self, vertex: VertexId, dim: DimVector) -> VertexId {
        let (index, r) = {
            let v = self.quiver.vertex(vertex).expect("finalized vertex must exist");
            (v.data.index.clone(), v.data.r)
        };
        let continuation = self.quiver.add_vertex(ModuleData {
            dim: DimVector::new(),
            index,
            r: r + 1,
            class: VertexClass::default(),
            translated: false,
            x_layer: 0,
            x: 0,
            y: 0,
            ox: 0,
        });
        self.add_tau_arrow(continuation, vertex);
        for a in self.knit_out(vertex) {
            let Some(arrow) = self.quiver.arrow(a) else {
                continue;
            };
            let (target, multiplicity) = (arrow.target, arrow.data.multiplicity);
            self.add_knit_arrow(target, continuation, multiplicity);
        }
        self.set_dim_vector(continuation, dim);
        let layer = self.max_layer_before(continuation).map_or(0, |l| l + 1);
        self.update_position(continuation, layer);
        continuation
    }

    /// Adds a knitting arrow and lets every successor cone containing the
    /// source absorb the target; a projective target is absorbed with its
    /// entire cone.
    fn add_knit_arrow(&mut self, source: VertexId, target: VertexId, multiplicity: i64) {
        if self
            .quiver
            .add_arrow(source, target, false, ArrowData { multiplicity })
            .is_none()
        {
            return;
        }
        for &p in &self.projectives {
            if let Some(cone) = self.successors.get_mut(&p) {
                if cone.contains(&source) {
                    cone.insert(target);
                }
            }
        }
        let target_is_projective = self
            .quiver
            .vertex(target)
            .is_some_and(|t| t.tau.is_none());
        if target_is_projective {
            if let Some(target_cone) = self.successors.get(&target).cloned() {
                for &p in &self.projectives {
                    if let Some(cone) = self.successors.get_mut(&p) {
                        if cone.contains(&target) {
                            cone.extend(target_cone.iter().copied());
                        }
                    }
                }
            }
        }
    }

    /// Adds the trans arrow of a fresh continuation and registers it in the
    /// orbit of its terminal projective.
    fn add_tau_arrow(&mut self, source: VertexId, target: VertexId) {
        if self
            .quiver
            .add_arrow(source, target, true, ArrowData { multiplicity: 0 })
            .is_none()
        {
            return;
        }
        let destination = self.quiver.vertex(source).map(|s| s.tau_destination);
        if let Some(destination) = destination {
            if let Some(orbit) = self.tau_orbits.get_mut(&destination) {
                orbit.insert(source);
            }
        }
    }

    fn max_layer_before(&self, id: VertexId) -> Option<i64> {
        self.knit_in(id)
            .iter()
            .filter_map(|&a| {
                let arrow = self.quiver.arrow(a)?;
                Some(self.quiver.vertex(arrow.source)?.data.x_layer)
            })
            .max()
    }

    fn min_layer_after(&self, id: VertexId) -> Option<i64> {
        self.knit_out(id)
            .iter()
            .filter_map(|&a| {
                let arrow = self.quiver.arrow(a)?;
                Some(self.quiver.vertex(arrow.target)?.data.x_layer)
            })
            .min()
    }

    /// Sets the layer exactly and recurses over outgoing knitting arrows in
    /// insertion order. Later writes win; the final state depends on
    /// traversal order.
    fn push_to_layer(&mut self, id: VertexId, x_layer: i64) {
        self.update_position(id, x_layer);
        for a in self.knit_out(id) {
            let target = match self.quiver.arrow(a) {
                Some(arrow) => arrow.target,
                None => continue,
            };
            self.push_to_layer(target, x_layer + 1);
        }
    }

    /// Drags predecessors forward until each sits one layer short of its
    /// closest knitting successor.
    fn pull_predecessors(&mut self, id: VertexId) {
        for a in self.knit_in(id) {
            let source = match self.quiver.arrow(a) {
                Some(arrow) => arrow.source,
                None => continue,
            };
            let Some(min_after) = self.min_layer_after(source) else {
                continue;
            };
            let source_layer = self.quiver.vertex(source).map_or(0, |v| v.data.x_layer);
            let gap = min_after - source_layer - 1;
            if gap > 0 {
                self.update_position(source, source_layer + gap);
                self.pull_predecessors(source);
            }
        }
    }

    /// Recomputes layout from a layer assignment: x from the layer, the
    /// margin, and the drag offsets of every cone the vertex belongs to;
    /// y re-synced from the tau target when there is one.
    fn update_position(&mut self, id: VertexId, x_layer: i64) {
        let mut x = x_layer * self.geometry.dx + self.geometry.ox;
        for &p in &self.projectives {
            if self
                .successors
                .get(&p)
                .is_some_and(|cone| cone.contains(&id))
            {
                if let Some(projective) = self.quiver.vertex(p) {
                    x += projective.data.ox;
                }
            }
        }
        let tau_y = self
            .quiver
            .vertex(id)
            .and_then(|v| v.tau)
            .and_then(|t| self.quiver.vertex(t))
            .map(|t| t.data.y);
        if let Some(vertex) = self.quiver.vertex_mut(id) {
            vertex.data.x_layer = x_layer;
            vertex.data.x = x;
            if let Some(y) = tau_y {
                vertex.data.y = y;
            }
        }
    }

    /// Assigns the dimension vector and the name rendered from it; seeds
    /// keep the `P_<index> = ` prefix.
    fn set_dim_vector(&mut self, id: VertexId, dim: DimVector) {
        let Some(vertex) = self.quiver.vertex_mut(id) else {
            return;
        };
        let mut name = dim.to_string();
        if vertex.tau.is_none() {
            name = format!("P_{} = {}", vertex.data.index, name);
        }
        vertex.data.dim = dim;
        vertex.name = name;
    }

    fn horizontal_gap_ok(&self, anchor: VertexId, dx: i64) -> bool {
        let Some(cone) = self.successors.get(&anchor) else {
            return false;
        };
        self.projectives.iter().all(|&q| {
            let shift = if cone.contains(&q) { dx } else { 0 };
            let Some(q_x) = self.quiver.vertex(q).map(|v| v.data.x) else {
                return true;
            };
            self.knit_in(q).iter().all(|&a| {
                let Some(arrow) = self.quiver.arrow(a) else {
                    return true;
                };
                if cone.contains(&arrow.source) {
                    return true;
                }
                let Some(source_x) = self.quiver.vertex(arrow.source).map(|v| v.data.x) else {
                    return true;
                };
                q_x + shift >= source_x + self.geometry.dx
            })
        })
    }

    fn mark_stuck(&mut self) {
        self.stuck = true;
        if !self.stuck_reported {
            self.stuck_reported = true;
            warn!(pending = self.queue.len(), "unfinished knitting");
        }
    }
}

fn enqueue(queue: &mut Vec<VertexId>, vertex: VertexId) {
    if !queue.contains(&vertex) {
        queue.push(vertex);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(radical: &str) -> PreprojectiveComponent {
        PreprojectiveComponent::new(
            serde_json::from_str(radical).unwrap(),
            Positions::new(),
            Geometry::default(),
        )
        .unwrap()
    }

    fn dim_of(c: &PreprojectiveComponent, id: VertexId) -> DimVector {
        c.quiver().vertex(id).unwrap().data.dim.clone()
    }

    fn dv(pairs: &[(&str, i64)]) -> DimVector {
        pairs
            .iter()
            .map(|&(i, v)| (ProjIndex::from(i), v))
            .collect()
    }

    #[test]
    fn seeds_follow_the_radical() {
        let c = component(r#"{"a": [], "b": [[2, {"a": 3}]]}"#);
        let q = c.quiver();
        assert_eq!(q.vertex_count(), 2);
        let [a, b] = [c.projectives()[0], c.projectives()[1]];

        let va = q.vertex(a).unwrap();
        assert_eq!(va.data.dim, dv(&[("a", 1)]));
        assert_eq!(va.name, "P_a = a");
        assert!(va.data.class.projective);
        assert_eq!(va.data.r, 0);
        assert_eq!((va.data.x, va.data.y), (20, 475));

        let vb = q.vertex(b).unwrap();
        assert_eq!(vb.data.dim, dv(&[("a", 6), ("b", 1)]));
        assert_eq!(vb.name, "P_b = a^6b");
        assert_eq!(vb.data.y, 525);

        // only the empty-radical seed is ready
        assert_eq!(c.pending().collect::<Vec<_>>(), vec![a]);
    }

    #[test]
    fn duplicate_summands_knit_parallel_arrows() {
        let mut c = component(r#"{"a": [], "b": [[1, {"a": 1}], [1, {"a": 1}]]}"#);
        c.populate(200);
        let [a, b] = [c.projectives()[0], c.projectives()[1]];

        assert_eq!(c.quiver().arrow_count_between(a, b), 2);
        let m_ids: Vec<u32> = c
            .quiver()
            .arrows()
            .filter(|arrow| arrow.source == a && arrow.target == b)
            .map(|arrow| arrow.m_id)
            .collect();
        assert_eq!(m_ids, vec![0, 1]);

        // the mirrors of both arrows are parallel as well
        let continuation = c.quiver().vertex(a).unwrap().in_arrows.iter().find_map(|&id| {
            let arrow = c.quiver().arrow(id).unwrap();
            arrow.trans.then_some(arrow.source)
        });
        let continuation = continuation.unwrap();
        assert_eq!(c.quiver().arrow_count_between(b, continuation), 2);
    }

    #[test]
    fn unmatched_radical_gets_stuck_with_pending_frontier() {
        let mut c = component(r#"{"a": [], "b": [[1, {"a": 1}], [1, {"a": 9}]]}"#);
        c.populate(10_000);
        let b = c.projectives()[1];

        assert!(c.stuck());
        assert_eq!(c.pending().count(), 1);
        assert!(!c.quiver().vertex(b).unwrap().data.translated);

        // sticky: a wider horizon changes nothing
        let vertices = c.quiver().vertex_count();
        let arrows = c.quiver().arrow_count();
        c.populate(100_000);
        assert!(c.stuck());
        assert_eq!(c.quiver().vertex_count(), vertices);
        assert_eq!(c.quiver().arrow_count(), arrows);
    }

    #[test]
    fn never_ready_seeds_trip_stuck_on_an_empty_queue() {
        // the only seed cites itself, so nothing is ever ready to knit
        let mut c = component(r#"{"a": [[1, {"a": 1}]]}"#);
        c.populate(10_000);
        let a = c.projectives()[0];

        assert!(c.stuck());
        assert_eq!(c.pending().count(), 0);
        assert_eq!(c.quiver().vertex_count(), 1);
        assert!(!c.quiver().vertex(a).unwrap().data.translated);
        assert_eq!(dim_of(&c, a), dv(&[("a", 2)]));
    }

    #[test]
    fn horizon_bounds_growth_and_populate_resumes() {
        // two-summand Kronecker radical: the component is infinite
        let mut c = component(r#"{"a": [], "b": [[2, {"a": 1}]]}"#);
        c.populate(300);
        assert!(!c.stuck());
        let after_narrow = c.quiver().vertex_count();
        assert!(after_narrow > 2);

        c.populate(300);
        assert_eq!(c.quiver().vertex_count(), after_narrow);

        c.populate(900);
        assert!(c.quiver().vertex_count() > after_narrow);
        assert!(!c.stuck());
    }

    #[test]
    fn maximal_horizons_knit_finite_components() {
        let mut c = component(r#"{"a": [], "b": [[1, {"a": 1}]]}"#);
        c.populate(i64::MAX);

        assert!(!c.stuck());
        assert_eq!(c.quiver().vertex_count(), 3);
        assert_eq!(c.pending().count(), 0);
    }

    #[test]
    fn frontier_vertices_defer_until_predecessors_translate() {
        let mut c = component(r#"{"a": [], "b": [[1, {"a": 1}], [1, {"a": 9}]]}"#);
        c.populate(10_000);

        // the continuation of the first seed waits on the unfinished
        // projective forever
        let pending: Vec<VertexId> = c.pending().collect();
        assert_eq!(pending.len(), 1);
        let waiting = c.quiver().vertex(pending[0]).unwrap();
        assert_eq!(waiting.data.r, 1);
        assert!(!waiting.data.translated);
    }

    #[test]
    fn kronecker_dims_grow_linearly() {
        let mut c = component(r#"{"a": [], "b": [[2, {"a": 1}]]}"#);
        c.populate(400);
        let q = c.quiver();

        for vertex in q.vertices() {
            let d = &vertex.data.dim;
            let (a, b) = (
                d.component(&ProjIndex::from("a")),
                d.component(&ProjIndex::from("b")),
            );
            assert_eq!(a - b, 1, "preprojective Kronecker vector {d}");
        }
    }

    #[test]
    fn layers_translate_to_pixel_columns() {
        let mut c = component(r#"{"a": [], "b": [[1, {"a": 1}]]}"#);
        c.populate(1_000);
        let q = c.quiver();
        let [a, b] = [c.projectives()[0], c.projectives()[1]];
        let a1 = c
            .tau_orbit(a)
            .unwrap()
            .iter()
            .copied()
            .find(|&v| v != a)
            .unwrap();

        assert_eq!(q.vertex(a).unwrap().data.x_layer, 0);
        assert_eq!(q.vertex(b).unwrap().data.x_layer, 1);
        assert_eq!(q.vertex(a1).unwrap().data.x_layer, 2);
        assert_eq!(q.vertex(a).unwrap().data.x, 20);
        assert_eq!(q.vertex(b).unwrap().data.x, 70);
        assert_eq!(q.vertex(a1).unwrap().data.x, 120);

        // the continuation inherits its y from the tau target
        assert_eq!(q.vertex(a1).unwrap().data.y, q.vertex(a).unwrap().data.y);
    }

    #[test]
    fn vertical_moves_shift_whole_orbits_inside_the_band() {
        let mut c = component(r#"{"a": [], "b": [[1, {"a": 1}]]}"#);
        c.populate(1_000);
        let [a, b] = [c.projectives()[0], c.projectives()[1]];
        let orbit: Vec<VertexId> = c.tau_orbit(a).unwrap().iter().copied().collect();
        let before_b = c.quiver().vertex(b).unwrap().data.y;

        c.move_vertex(a, 0, 10);
        for &member in &orbit {
            assert_eq!(c.quiver().vertex(member).unwrap().data.y, 485);
        }
        assert_eq!(c.quiver().vertex(b).unwrap().data.y, before_b);

        // leaving the band is ignored
        c.move_vertex(a, 0, 10_000);
        assert_eq!(c.quiver().vertex(a).unwrap().data.y, 485);
    }

    #[test]
    fn horizontal_moves_shift_the_successor_cone() {
        let mut c = component(r#"{"a": [], "b": [[1, {"a": 1}]]}"#);
        c.populate(1_000);
        let [a, b] = [c.projectives()[0], c.projectives()[1]];
        let a1 = c
            .tau_orbit(a)
            .unwrap()
            .iter()
            .copied()
            .find(|&v| v != a)
            .unwrap();

        // the cone of the first projective covers everything here
        c.move_vertex(a, 30, 0);
        assert_eq!(c.quiver().vertex(a).unwrap().data.x, 50);
        assert_eq!(c.quiver().vertex(b).unwrap().data.x, 100);
        assert_eq!(c.quiver().vertex(a1).unwrap().data.x, 150);
        assert_eq!(c.quiver().vertex(a).unwrap().data.ox, 30);
        assert_eq!(c.quiver().vertex(b).unwrap().data.ox, 0);

        // dragging a continuation moves its whole orbit anchor
        c.move_vertex(a1, -30, 0);
        assert_eq!(c.quiver().vertex(a).unwrap().data.x, 20);
        assert_eq!(c.quiver().vertex(b).unwrap().data.x, 70);
    }

    #[test]
    fn leftward_moves_respect_the_layer_gap() {
        let mut c = component(r#"{"a": [], "b": [[1, {"a": 1}]]}"#);
        c.populate(1_000);
        let [a, b] = [c.projectives()[0], c.projectives()[1]];

        // the second projective sits exactly dx past the first; pulling it
        // left would close the gap against a predecessor outside its cone
        let before: Vec<i64> = c
            .quiver()
            .vertices()
            .map(|vertex| vertex.data.x)
            .collect();
        c.move_vertex(b, -10, 0);
        let after: Vec<i64> = c
            .quiver()
            .vertices()
            .map(|vertex| vertex.data.x)
            .collect();
        assert_eq!(before, after);

        // moving the cone that contains the predecessor is fine
        c.move_vertex(a, -10, 0);
        assert_eq!(c.quiver().vertex(a).unwrap().data.x, 10);
        assert_eq!(c.quiver().vertex(b).unwrap().data.x, 60);
    }

    #[test]
    fn moves_never_push_the_anchor_negative() {
        let mut c = component(r#"{"a": []}"#);
        c.populate(100);
        let a = c.projectives()[0];
        c.move_vertex(a, -100, 0);
        assert_eq!(c.quiver().vertex(a).unwrap().data.x, 20);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut c = component(r#"{"a": []}"#);
        c.populate(100);
        let before = c.quiver().vertex(c.projectives()[0]).unwrap().data.clone();
        c.move_vertex(VertexId::new(99), 10, 10);
        assert_eq!(
            c.quiver().vertex(c.projectives()[0]).unwrap().data,
            before
        );
    }

    #[test]
    fn removed_queued_vertices_are_dropped_on_resume() {
        let mut c = component(r#"{"a": [], "b": [[2, {"a": 1}]]}"#);
        c.populate(300);
        let pending: Vec<VertexId> = c.pending().collect();
        assert!(!pending.is_empty());

        assert!(c.remove_vertex(pending[0]));
        c.populate(900);

        assert!(c.quiver().vertex(pending[0]).is_none());
        assert_eq!(c.pending().count(), 0);
        assert!(!c.stuck());
    }

    #[test]
    fn empty_radical_is_a_quiet_no_op() {
        let mut c = component("{}");
        c.populate(1_000);
        assert!(c.quiver().is_empty());
        assert!(!c.stuck());
    }

    #[test]
    fn successor_cones_absorb_projective_cones_transitively() {
        let mut c = component(r#"{"a": [], "b": [[1, {"a": 1}]], "c": [[1, {"a": 1, "b": 1}]]}"#);
        c.populate(2_000);
        let [a, b, x] = [c.projectives()[0], c.projectives()[1], c.projectives()[2]];

        let cone_a = c.successor_cone(a).unwrap();
        assert!(cone_a.contains(&b));
        assert!(cone_a.contains(&x));
        // everything the third projective reaches is reached by the first
        for v in c.successor_cone(x).unwrap() {
            assert!(cone_a.contains(v));
        }
        assert_eq!(dim_of(&c, x), dv(&[("a", 1), ("b", 1), ("c", 1)]));
    }
}
