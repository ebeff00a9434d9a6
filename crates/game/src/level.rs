//! Level geometry: triangle-soup construction and the loading handoff.
//!
//! The external scene pipeline produces plain triangles (positions only).
//! [`LevelGeometry`] is the one-shot transition from "still loading" to a
//! built collision index; the simulation polls it each frame instead of
//! registering ready callbacks.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use vantage_physics::{Triangle, TriangleIndex};

/// A spawn point for the player.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpawnPoint {
    /// Feet position in world space.
    pub position: Vec3,
    /// Initial facing (yaw, radians).
    pub facing: f32,
}

/// A loaded level: collision triangles plus spawn points.
#[derive(Debug, Clone)]
pub struct Level {
    /// Level identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Collision triangle soup, position data only.
    pub triangles: Vec<Triangle>,

    /// Player spawn points.
    pub spawn_points: Vec<SpawnPoint>,
}

impl Level {
    /// Create an empty level.
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            triangles: Vec::new(),
            spawn_points: Vec::new(),
        }
    }

    /// Append a horizontal quad spanning `min..max` at `height`, facing up.
    pub fn add_floor(&mut self, min: (f32, f32), max: (f32, f32), height: f32) {
        let a = Vec3::new(min.0, height, min.1);
        let b = Vec3::new(max.0, height, min.1);
        let c = Vec3::new(max.0, height, max.1);
        let d = Vec3::new(min.0, height, max.1);
        self.triangles.push(Triangle::new(a, c, b));
        self.triangles.push(Triangle::new(a, d, c));
    }

    /// Append the twelve triangles of an axis-aligned box.
    pub fn add_box(&mut self, center: Vec3, half_extents: Vec3) {
        let h = half_extents;
        // The eight corners, bit i selecting min/max per axis.
        let corner = |x: bool, y: bool, z: bool| {
            center
                + Vec3::new(
                    if x { h.x } else { -h.x },
                    if y { h.y } else { -h.y },
                    if z { h.z } else { -h.z },
                )
        };
        let quads = [
            // -X / +X faces
            [corner(false, false, false), corner(false, false, true), corner(false, true, true), corner(false, true, false)],
            [corner(true, false, true), corner(true, false, false), corner(true, true, false), corner(true, true, true)],
            // -Y / +Y faces
            [corner(false, false, false), corner(true, false, false), corner(true, false, true), corner(false, false, true)],
            [corner(false, true, true), corner(true, true, true), corner(true, true, false), corner(false, true, false)],
            // -Z / +Z faces
            [corner(true, false, false), corner(false, false, false), corner(false, true, false), corner(true, true, false)],
            [corner(false, false, true), corner(true, false, true), corner(true, true, true), corner(false, true, true)],
        ];
        for [a, b, c, d] in quads {
            self.triangles.push(Triangle::new(a, b, c));
            self.triangles.push(Triangle::new(a, c, d));
        }
    }

    /// Append a ramp: a quad rising from the `low` edge to the `high` edge.
    pub fn add_ramp(&mut self, low_a: Vec3, low_b: Vec3, high_a: Vec3, high_b: Vec3) {
        self.triangles.push(Triangle::new(low_a, low_b, high_b));
        self.triangles.push(Triangle::new(low_a, high_b, high_a));
    }

    /// A small walled arena for development and tests: flat floor,
    /// perimeter walls, a central pillar and a ramp onto it.
    pub fn test_arena() -> Self {
        let mut level = Self::new("test_arena", "Test Arena");
        let size = 30.0;
        let wall_height = 4.0;

        level.add_floor((-size, -size), (size, size), 0.0);

        // Perimeter walls
        level.add_box(
            Vec3::new(0.0, wall_height / 2.0, -size),
            Vec3::new(size, wall_height / 2.0, 0.25),
        );
        level.add_box(
            Vec3::new(0.0, wall_height / 2.0, size),
            Vec3::new(size, wall_height / 2.0, 0.25),
        );
        level.add_box(
            Vec3::new(-size, wall_height / 2.0, 0.0),
            Vec3::new(0.25, wall_height / 2.0, size),
        );
        level.add_box(
            Vec3::new(size, wall_height / 2.0, 0.0),
            Vec3::new(0.25, wall_height / 2.0, size),
        );

        // Central pillar with a ramp up its south side
        level.add_box(Vec3::new(0.0, 1.0, 0.0), Vec3::new(2.0, 1.0, 2.0));
        level.add_ramp(
            Vec3::new(-2.0, 0.0, 8.0),
            Vec3::new(2.0, 0.0, 8.0),
            Vec3::new(-2.0, 2.0, 2.0),
            Vec3::new(2.0, 2.0, 2.0),
        );

        level.spawn_points.push(SpawnPoint {
            position: Vec3::new(-10.0, 0.0, 10.0),
            facing: 0.0,
        });
        level.spawn_points.push(SpawnPoint {
            position: Vec3::new(10.0, 0.0, -10.0),
            facing: std::f32::consts::PI,
        });

        level
    }

    /// First spawn point, if the level defines any.
    pub fn player_spawn(&self) -> Option<&SpawnPoint> {
        self.spawn_points.first()
    }
}

/// One-shot readiness state for the collision geometry.
///
/// Scene loading is asynchronous from the physics loop's point of view:
/// until the triangle set arrives the simulation runs against no geometry
/// (free-fall), and once `finish` is called the built index is picked up
/// transparently on the next frame.
#[derive(Debug, Default)]
pub enum LevelGeometry {
    /// Geometry has not been delivered yet.
    #[default]
    Loading,
    /// The index is built and immutable for the rest of the session.
    Ready(TriangleIndex),
}

impl LevelGeometry {
    /// The built index, once ready.
    pub fn index(&self) -> Option<&TriangleIndex> {
        match self {
            LevelGeometry::Loading => None,
            LevelGeometry::Ready(index) => Some(index),
        }
    }

    /// True once geometry has been delivered.
    pub fn is_ready(&self) -> bool {
        matches!(self, LevelGeometry::Ready(_))
    }

    /// Deliver the final triangle set and build the index.
    ///
    /// Loading completes exactly once; a second delivery is ignored so a
    /// stale loader cannot swap geometry out from under the simulation.
    pub fn finish(&mut self, triangles: Vec<Triangle>) {
        if self.is_ready() {
            log::warn!("collision geometry already delivered, ignoring {} triangles", triangles.len());
            return;
        }
        log::info!("collision geometry ready: {} triangles", triangles.len());
        *self = LevelGeometry::Ready(TriangleIndex::build(triangles));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage_physics::{intersect_capsule, Capsule};

    #[test]
    fn test_box_triangle_count() {
        let mut level = Level::new("t", "t");
        level.add_box(Vec3::ZERO, Vec3::ONE);
        assert_eq!(level.triangles.len(), 12);
    }

    #[test]
    fn test_floor_faces_up() {
        let mut level = Level::new("t", "t");
        level.add_floor((-1.0, -1.0), (1.0, 1.0), 0.0);
        for tri in &level.triangles {
            assert!(tri.normal().y > 0.99, "floor normal {:?}", tri.normal());
        }
    }

    #[test]
    fn test_box_faces_point_outward() {
        let mut level = Level::new("t", "t");
        level.add_box(Vec3::ZERO, Vec3::ONE);
        for tri in &level.triangles {
            let outward = tri.centroid().normalize();
            assert!(
                tri.normal().dot(outward) > 0.0,
                "face normal {:?} should point away from the box center",
                tri.normal()
            );
        }
    }

    #[test]
    fn test_arena_floor_is_solid() {
        let level = Level::test_arena();
        let mut geometry = LevelGeometry::default();
        geometry.finish(level.triangles);

        let capsule = Capsule::new(
            Vec3::new(-10.0, 0.2, 10.0),
            Vec3::new(-10.0, 0.85, 10.0),
            0.35,
        )
        .unwrap();
        let contact = intersect_capsule(&capsule, geometry.index().unwrap());
        assert!(contact.is_some(), "spawn area should have a floor underfoot");
    }

    #[test]
    fn test_geometry_transition_is_one_shot() {
        let mut geometry = LevelGeometry::default();
        assert!(!geometry.is_ready());
        assert!(geometry.index().is_none());

        geometry.finish(Level::test_arena().triangles);
        assert!(geometry.is_ready());
        let count = geometry.index().unwrap().len();

        // A second delivery must not replace the index.
        geometry.finish(Vec::new());
        assert_eq!(geometry.index().unwrap().len(), count);
    }
}
