//! arknit: incremental knitting of preprojective Auslander-Reiten quiver
//! components.
//!
//! This crate implements the knitting construction for preprojective
//! components, providing:
//! - a payload-generic directed multigraph container with parallel-arrow
//!   numbering and translation links,
//! - a bounded, resumable knitting engine driven by a pixel horizon,
//! - validation of the radical and seed-position inputs.
//!
//! # Mathematical Background
//!
//! Starting from the projective covers described by a radical, knitting
//! builds one Auslander-Reiten mesh at a time: a finalized vertex either
//! admits an inverse translate, whose incoming arrows mirror the vertex's
//! outgoing ones, or is recognized as injective when the candidate
//! dimension vector turns negative. For representation-finite cases the
//! process terminates by itself; otherwise it grows on demand as callers
//! widen the horizon.
//!
//! # References
//!
//! - Auslander, Reiten, Smalø. "Representation Theory of Artin Algebras" (1995), ch. VII
//! - Gabriel. "Auslander-Reiten sequences and representation-finite algebras" (1980)
//! - Ringel. "Tame algebras and integral quadratic forms" (1984)
//!
//! # Example
//!
//! ```
//! use arknit::prelude::*;
//!
//! let mut radical = Radical::new();
//! radical.insert(ProjIndex::from("a"), vec![]);
//! radical.insert(
//!     ProjIndex::from("b"),
//!     vec![Summand::new(1, DimVector::unit(&ProjIndex::from("a")))],
//! );
//!
//! let mut component =
//!     PreprojectiveComponent::new(radical, Positions::new(), Geometry::default()).unwrap();
//! component.populate(1_000);
//!
//! assert_eq!(component.quiver().vertex_count(), 3);
//! assert!(!component.stuck());
//! ```

pub mod dim;
pub mod input;
pub mod knit;
pub mod quiver;
pub mod view;

pub use dim::{DimVector, ProjIndex};
pub use input::{
    resolve_positions, validate_radical, InputError, PositionHint, Positions, Radical,
    SeedPosition, Summand,
};
pub use knit::{ArrowData, Geometry, ModuleData, PreprojectiveComponent, VertexClass};
pub use quiver::{Arrow, ArrowId, Quiver, Vertex, VertexId};
pub use view::{ArrowView, BoundingBox, VertexView};

/// Prelude for convenient usage.
pub mod prelude {
    pub use crate::dim::{DimVector, ProjIndex};
    pub use crate::input::{
        resolve_positions, validate_radical, InputError, PositionHint, Positions, Radical,
        SeedPosition, Summand,
    };
    pub use crate::knit::{ArrowData, Geometry, ModuleData, PreprojectiveComponent, VertexClass};
    pub use crate::quiver::{Arrow, ArrowId, Quiver, Vertex, VertexId};
    pub use crate::view::{ArrowView, BoundingBox, VertexView};
}
