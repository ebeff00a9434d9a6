//! Collision detection against static triangle geometry.
//!
//! The world is a triangle soup handed over once after loading. It is
//! organised into an immutable bounding-volume tree ([`TriangleIndex`]),
//! queried every physics sub-step with the player's [`Capsule`] through
//! [`intersect_capsule`], which reports the deepest penetration as a
//! [`Contact`].
//!
//! # Key Types
//!
//! - [`TriangleIndex`]: broad-phase spatial index, built once, immutable
//! - [`Capsule`]: the player's swept-sphere collision volume
//! - [`Contact`]: normal + depth of a single penetration

mod aabb;
mod capsule;
mod contact;
mod index;
mod triangle;

pub use aabb::Aabb;
pub use capsule::Capsule;
pub use contact::{intersect_capsule, Contact};
pub use index::TriangleIndex;
pub use triangle::Triangle;
