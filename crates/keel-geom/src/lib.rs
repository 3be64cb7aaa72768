// SPDX-License-Identifier: Apache-2.0
//! Geometric query kernel for Keel.
//!
//! This crate provides:
//! - Bounding volumes: axis-aligned boxes ([`Box3`]) and spheres ([`Sphere`]).
//! - Query primitives: [`Ray`], [`Plane`], [`Triangle`], [`Frustum`].
//! - Their pairwise intersection tests (slab-method ray/box, separating-axis
//!   box/triangle, plane-distance frustum culling).
//!
//! Design notes:
//! - Intersection routines exist for spatial queries (culling, picking), not
//!   for dynamics or collision response.
//! - Every miss is `None` and every degenerate input has a defined recovery;
//!   nothing in this crate panics on geometric data.

mod box3;
mod frustum;
mod plane;
mod ray;
mod sphere;
mod triangle;

pub use box3::Box3;
pub use frustum::Frustum;
pub use plane::Plane;
pub use ray::Ray;
pub use sphere::Sphere;
pub use triangle::Triangle;
