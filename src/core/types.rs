use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle given by its min (top-left) and max (bottom-right) corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    /// Per-axis overlap with `other`; a component ≤ 0 means the spans are disjoint on that axis.
    pub fn overlap(&self, other: &Bounds) -> Vec2 {
        self.max.min(other.max) - self.min.max(other.min)
    }

    /// Point containment, edges inclusive.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

/// Material coefficients that affect block interactions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockMaterial {
    /// Mass per unit area, used when sizing a block from a material.
    pub density: f32,
    pub friction: f32,
    pub bounciness: f32,
}

impl Default for BlockMaterial {
    fn default() -> Self {
        Self::wood()
    }
}

impl BlockMaterial {
    pub fn wood() -> Self {
        Self {
            density: 1.0,
            friction: 0.5,
            bounciness: 0.2,
        }
    }

    pub fn stone() -> Self {
        Self {
            density: 2.5,
            friction: 0.7,
            bounciness: 0.05,
        }
    }

    /// Slippery: friction sits below the slippery threshold.
    pub fn ice() -> Self {
        Self {
            density: 0.9,
            friction: 0.05,
            bounciness: 0.1,
        }
    }

    pub fn rubber() -> Self {
        Self {
            density: 1.4,
            friction: 0.9,
            bounciness: 0.8,
        }
    }

    pub fn steel() -> Self {
        Self {
            density: 7.8,
            friction: 0.4,
            bounciness: 0.3,
        }
    }

    /// Mass of a `width × height` block made of this material.
    pub fn mass_for(&self, width: f32, height: f32) -> f32 {
        self.density * width * height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_is_negative_for_disjoint_spans() {
        let a = Bounds::from_origin_size(Vec2::ZERO, Vec2::splat(1.0));
        let b = Bounds::from_origin_size(Vec2::new(2.0, 0.5), Vec2::splat(1.0));
        let overlap = a.overlap(&b);
        assert!(overlap.x < 0.0);
        assert!((overlap.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn contains_includes_edges() {
        let bounds = Bounds::from_origin_size(Vec2::new(1.0, 1.0), Vec2::new(2.0, 1.0));
        assert!(bounds.contains(Vec2::new(3.0, 2.0)));
        assert!(!bounds.contains(Vec2::new(3.01, 2.0)));
    }

    #[test]
    fn material_mass_scales_with_area() {
        let stone = BlockMaterial::stone();
        assert!((stone.mass_for(2.0, 0.5) - 2.5).abs() < 1e-6);
    }
}
