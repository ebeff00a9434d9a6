//! Capsule-vs-world contact resolution.
//!
//! Broad-phase: query the triangle index with the capsule's bounding box.
//! Narrow-phase: exact closest-point distance between the capsule's core
//! segment and each candidate triangle. Of all penetrating triangles the
//! single deepest contact is returned; remaining overlaps are picked up by
//! the integrator's next sub-step, which keeps per-call work small and
//! converges for the step sizes the integrator uses.

use glam::Vec3;

use super::capsule::Capsule;
use super::index::TriangleIndex;
use super::triangle::Triangle;

/// Distances below this are treated as a direct plane crossing, where the
/// separation vector no longer defines a usable normal.
const DISTANCE_EPSILON: f32 = 1e-5;

/// A single penetration contact between the capsule and world geometry.
///
/// Transient: produced by [`intersect_capsule`], consumed immediately by
/// the integrator, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from the surface toward the capsule.
    pub normal: Vec3,
    /// Penetration depth along `normal`; always positive.
    pub depth: f32,
}

impl Contact {
    /// Whether this contact counts as standing surface rather than a wall
    /// or ceiling: the normal must be within the configured slope limit of
    /// straight up.
    pub fn is_floor(&self, min_floor_normal_y: f32) -> bool {
        self.normal.y >= min_floor_normal_y
    }
}

/// Find the deepest contact between `capsule` and the indexed geometry.
///
/// Pure function of its inputs: the same capsule and index always produce
/// the same result. Returns `None` when nothing penetrates. Zero-area
/// triangles are skipped rather than failing the pass.
pub fn intersect_capsule(capsule: &Capsule, index: &TriangleIndex) -> Option<Contact> {
    let region = capsule.aabb();
    let mut best: Option<Contact> = None;

    for id in index.query_region(&region) {
        let tri = index.triangle(id);
        if tri.is_degenerate() {
            continue;
        }

        let (on_segment, on_triangle) = segment_triangle_closest(capsule.start, capsule.end, tri);
        let separation = on_segment - on_triangle;
        let dist_sq = separation.length_squared();
        if dist_sq >= capsule.radius * capsule.radius {
            continue;
        }

        let contact = if dist_sq > DISTANCE_EPSILON * DISTANCE_EPSILON {
            let dist = dist_sq.sqrt();
            Contact {
                normal: separation / dist,
                depth: capsule.radius - dist,
            }
        } else {
            // The segment pierces the triangle itself. Push out along the
            // face normal, toward the side the capsule's midpoint is on.
            let midpoint = (capsule.start + capsule.end) * 0.5;
            let mut normal = tri.normal();
            if normal.dot(midpoint - on_triangle) < 0.0 {
                normal = -normal;
            }
            Contact {
                normal,
                depth: capsule.radius,
            }
        };

        if best.map_or(true, |b| contact.depth > b.depth) {
            best = Some(contact);
        }
    }

    best
}

/// Closest pair of points between the segment `p..q` and `tri`.
///
/// Returns `(point_on_segment, point_on_triangle)`. If the segment crosses
/// the triangle's interior the two points coincide on the crossing.
fn segment_triangle_closest(p: Vec3, q: Vec3, tri: &Triangle) -> (Vec3, Vec3) {
    let normal = tri.normal();

    // Direct crossing: the segment straddles the plane and the crossing
    // point lies inside the triangle.
    let dp = (p - tri.a).dot(normal);
    let dq = (q - tri.a).dot(normal);
    if dp * dq < 0.0 {
        let t = dp / (dp - dq);
        let crossing = p + (q - p) * t;
        if tri.contains_planar_point(crossing) {
            return (crossing, crossing);
        }
    }

    // Otherwise the minimum is attained on the boundary of one feature
    // pair: segment vs each triangle edge, or a segment endpoint vs the
    // triangle face.
    let mut best = (p, tri.closest_point(p));
    let mut best_dist_sq = (best.0 - best.1).length_squared();

    let mut consider = |on_segment: Vec3, on_triangle: Vec3| {
        let d = (on_segment - on_triangle).length_squared();
        if d < best_dist_sq {
            best = (on_segment, on_triangle);
            best_dist_sq = d;
        }
    };

    consider(q, tri.closest_point(q));
    for (e0, e1) in [(tri.a, tri.b), (tri.b, tri.c), (tri.c, tri.a)] {
        let (s, t) = segment_segment_closest(p, q, e0, e1);
        consider(s, t);
    }

    best
}

/// Closest pair of points between segments `p1..q1` and `p2..q2`.
fn segment_segment_closest(p1: Vec3, q1: Vec3, p2: Vec3, q2: Vec3) -> (Vec3, Vec3) {
    let d1 = q1 - p1;
    let d2 = q2 - p2;
    let r = p1 - p2;

    let a = d1.length_squared();
    let e = d2.length_squared();
    let f = d2.dot(r);

    let (mut s, mut t);
    if a <= f32::EPSILON && e <= f32::EPSILON {
        // Both segments are points.
        return (p1, p2);
    }
    if a <= f32::EPSILON {
        s = 0.0;
        t = (f / e).clamp(0.0, 1.0);
    } else {
        let c = d1.dot(r);
        if e <= f32::EPSILON {
            t = 0.0;
            s = (-c / a).clamp(0.0, 1.0);
        } else {
            let b = d1.dot(d2);
            let denom = a * e - b * b;

            s = if denom > f32::EPSILON {
                ((b * f - c * e) / denom).clamp(0.0, 1.0)
            } else {
                // Parallel segments: any s works, pick the start.
                0.0
            };

            t = (b * s + f) / e;
            if t < 0.0 {
                t = 0.0;
                s = (-c / a).clamp(0.0, 1.0);
            } else if t > 1.0 {
                t = 1.0;
                s = ((b - c) / a).clamp(0.0, 1.0);
            }
        }
    }

    (p1 + d1 * s, p2 + d2 * t)
}
