//! The player's collision volume: a sphere-swept segment.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::error::ConfigError;

/// A capsule: the set of points within `radius` of the segment
/// `start`..`end`.
///
/// `start` is the lower (foot) end of the segment and `end` the upper
/// (eye) end; the physical bottom of the volume sits at
/// `start.y - radius`. Coincident endpoints are legal and degrade to a
/// sphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Capsule {
    /// Lower end of the core segment.
    pub start: Vec3,
    /// Upper end of the core segment.
    pub end: Vec3,
    /// Swept-sphere radius. Always positive.
    pub radius: f32,
}

impl Capsule {
    /// Create a capsule, rejecting a non-positive or non-finite radius.
    pub fn new(start: Vec3, end: Vec3, radius: f32) -> Result<Self, ConfigError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ConfigError::InvalidRadius(radius));
        }
        Ok(Self { start, end, radius })
    }

    /// Shift both endpoints by `delta`.
    pub fn translate(&mut self, delta: Vec3) {
        self.start += delta;
        self.end += delta;
    }

    /// Closest point on the core segment to `point`.
    pub fn closest_point_on_segment(&self, point: Vec3) -> Vec3 {
        let axis = self.end - self.start;
        let len_sq = axis.length_squared();
        if len_sq < f32::EPSILON {
            return self.start;
        }
        let t = ((point - self.start).dot(axis) / len_sq).clamp(0.0, 1.0);
        self.start + axis * t
    }

    /// Bounding box of the whole swept volume.
    pub fn aabb(&self) -> Aabb {
        Aabb {
            min: self.start.min(self.end) - Vec3::splat(self.radius),
            max: self.start.max(self.end) + Vec3::splat(self.radius),
        }
    }
}
