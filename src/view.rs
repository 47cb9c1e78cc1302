//! Read-only snapshots for rendering and export collaborators.
//!
//! Renderers, exporters, and similar embedders consume these instead of
//! reaching into the engine; everything here is serializable and carries no
//! references back into the component.

use crate::dim::DimVector;
use crate::knit::{PreprojectiveComponent, VertexClass};
use crate::quiver::{ArrowId, VertexId};
use serde::Serialize;

/// Snapshot of one vertex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VertexView {
    pub id: VertexId,
    pub name: String,
    pub dim: DimVector,
    pub x: i64,
    pub y: i64,
    pub class: VertexClass,
}

/// Snapshot of one arrow. The multiplicity is meaningful when `trans` is
/// false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArrowView {
    pub id: ArrowId,
    pub source: VertexId,
    pub target: VertexId,
    pub multiplicity: i64,
    pub trans: bool,
}

/// Axis-aligned bounding box over vertex centers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BoundingBox {
    pub x_min: i64,
    pub y_min: i64,
    pub w: i64,
    pub h: i64,
}

impl PreprojectiveComponent {
    /// Vertex snapshots in ascending id order.
    pub fn vertex_views(&self) -> Vec<VertexView> {
        self.quiver()
            .vertices()
            .map(|vertex| VertexView {
                id: vertex.id,
                name: vertex.name.clone(),
                dim: vertex.data.dim.clone(),
                x: vertex.data.x,
                y: vertex.data.y,
                class: vertex.data.class,
            })
            .collect()
    }

    /// Arrow snapshots in ascending id order.
    pub fn arrow_views(&self) -> Vec<ArrowView> {
        self.quiver()
            .arrows()
            .map(|arrow| ArrowView {
                id: arrow.id,
                source: arrow.source,
                target: arrow.target,
                multiplicity: arrow.data.multiplicity,
                trans: arrow.trans,
            })
            .collect()
    }

    /// Bounding box over the given vertices; all zeros for an empty
    /// selection. Unknown ids are skipped.
    pub fn bounding_box<I>(&self, ids: I) -> BoundingBox
    where
        I: IntoIterator<Item = VertexId>,
    {
        let mut bounds: Option<(i64, i64, i64, i64)> = None;
        for id in ids {
            let Some(vertex) = self.quiver().vertex(id) else {
                continue;
            };
            let (x, y) = (vertex.data.x, vertex.data.y);
            bounds = Some(match bounds {
                None => (x, x, y, y),
                Some((x_min, x_max, y_min, y_max)) => {
                    (x_min.min(x), x_max.max(x), y_min.min(y), y_max.max(y))
                }
            });
        }
        match bounds {
            Some((x_min, x_max, y_min, y_max)) => BoundingBox {
                x_min,
                y_min,
                w: x_max - x_min,
                h: y_max - y_min,
            },
            None => BoundingBox::default(),
        }
    }
}
