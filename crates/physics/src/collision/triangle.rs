//! Triangle geometry used by the spatial index and the contact resolver.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;

/// Triangles whose squared normal length falls below this are treated as
/// having zero area and never produce contacts.
const DEGENERATE_AREA_SQ: f32 = 1e-12;

/// A single triangle of static world geometry.
///
/// Triangles are read-only after the index is built; position data only,
/// no material or texture information.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    /// First vertex.
    pub a: Vec3,
    /// Second vertex.
    pub b: Vec3,
    /// Third vertex.
    pub c: Vec3,
}

impl Triangle {
    /// Create a triangle from three vertices.
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { a, b, c }
    }

    /// Bounding box of the three vertices.
    pub fn aabb(&self) -> Aabb {
        Aabb::from_points(&[self.a, self.b, self.c])
    }

    /// Centroid of the triangle.
    pub fn centroid(&self) -> Vec3 {
        (self.a + self.b + self.c) / 3.0
    }

    /// Unit face normal, following the winding `a -> b -> c`.
    ///
    /// Returns `Vec3::ZERO` for a degenerate triangle.
    pub fn normal(&self) -> Vec3 {
        (self.b - self.a).cross(self.c - self.a).normalize_or_zero()
    }

    /// True when the triangle has (numerically) zero area.
    pub fn is_degenerate(&self) -> bool {
        (self.b - self.a).cross(self.c - self.a).length_squared() < DEGENERATE_AREA_SQ
    }

    /// Closest point on the triangle to `p`.
    ///
    /// Standard barycentric region test: classify `p` against the vertex,
    /// edge and face Voronoi regions and project accordingly.
    pub fn closest_point(&self, p: Vec3) -> Vec3 {
        let ab = self.b - self.a;
        let ac = self.c - self.a;
        let ap = p - self.a;

        let d1 = ab.dot(ap);
        let d2 = ac.dot(ap);
        if d1 <= 0.0 && d2 <= 0.0 {
            return self.a;
        }

        let bp = p - self.b;
        let d3 = ab.dot(bp);
        let d4 = ac.dot(bp);
        if d3 >= 0.0 && d4 <= d3 {
            return self.b;
        }

        let vc = d1 * d4 - d3 * d2;
        if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
            let v = d1 / (d1 - d3);
            return self.a + ab * v;
        }

        let cp = p - self.c;
        let d5 = ab.dot(cp);
        let d6 = ac.dot(cp);
        if d6 >= 0.0 && d5 <= d6 {
            return self.c;
        }

        let vb = d5 * d2 - d1 * d6;
        if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
            let w = d2 / (d2 - d6);
            return self.a + ac * w;
        }

        let va = d3 * d6 - d5 * d4;
        if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
            let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
            return self.b + (self.c - self.b) * w;
        }

        // Inside the face region: project onto the triangle plane.
        let denom = 1.0 / (va + vb + vc);
        let v = vb * denom;
        let w = vc * denom;
        self.a + ab * v + ac * w
    }

    /// True when `p`, already known to lie on the triangle's plane, falls
    /// inside the triangle (boundary included).
    pub fn contains_planar_point(&self, p: Vec3) -> bool {
        let n = (self.b - self.a).cross(self.c - self.a);
        let c0 = (self.b - self.a).cross(p - self.a).dot(n);
        let c1 = (self.c - self.b).cross(p - self.b).dot(n);
        let c2 = (self.a - self.c).cross(p - self.c).dot(n);
        c0 >= 0.0 && c1 >= 0.0 && c2 >= 0.0
    }
}
