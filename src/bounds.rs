//! Axis-aligned bounds of a layout, for hosts fitting a camera to it

use glam::Vec3;
use serde::Serialize;

/// 3D bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::empty()
    }
}

impl Bounds {
    /// Create an empty bounding box
    pub fn empty() -> Self {
        Self {
            min: Vec3::INFINITY,
            max: Vec3::NEG_INFINITY,
        }
    }

    /// Check if bounding box is empty
    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    /// Include a point in the bounding box
    pub fn include_point(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Include a sphere in the bounding box
    pub fn include_sphere(&mut self, center: Vec3, radius: f32) {
        self.include_point(center - Vec3::splat(radius));
        self.include_point(center + Vec3::splat(radius));
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) / 2.0
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

impl FromIterator<Vec3> for Bounds {
    fn from_iter<I: IntoIterator<Item = Vec3>>(iter: I) -> Self {
        let mut bounds = Self::empty();
        for point in iter {
            bounds.include_point(point);
        }
        bounds
    }
}
