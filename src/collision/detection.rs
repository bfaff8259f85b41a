use glam::Vec2;

use crate::{core::block::Block, utils::math::sign_or_positive};

/// Collision axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn unit(self) -> Vec2 {
        match self {
            Axis::X => Vec2::X,
            Axis::Y => Vec2::Y,
        }
    }

    pub fn perpendicular(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// Overlap between two blocks, resolved along the minimum-penetration axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Per-axis overlap amounts, both positive.
    pub overlap: Vec2,
    /// Per-axis sign of the vector from block A's center to block B's center.
    pub direction: Vec2,
    /// Axis with the smaller overlap; separation and impulse act on it only.
    pub axis: Axis,
}

impl Contact {
    /// Unit normal pointing from A to B along the separation axis.
    pub fn normal(&self) -> Vec2 {
        match self.axis {
            Axis::X => Vec2::new(self.direction.x, 0.0),
            Axis::Y => Vec2::new(0.0, self.direction.y),
        }
    }

    /// Penetration along the separation axis.
    pub fn depth(&self) -> f32 {
        match self.axis {
            Axis::X => self.overlap.x,
            Axis::Y => self.overlap.y,
        }
    }

    /// Unit vector along which friction acts.
    pub fn tangent(&self) -> Vec2 {
        self.axis.perpendicular().unit()
    }
}

/// Returns the contact between `a` and `b`, or `None` when their rectangles do
/// not overlap on both axes. Touching edges do not count as overlap.
pub fn detect(a: &Block, b: &Block) -> Option<Contact> {
    let overlap = a.bounds().overlap(&b.bounds());
    if overlap.x <= 0.0 || overlap.y <= 0.0 {
        return None;
    }

    let delta = b.center() - a.center();
    let direction = Vec2::new(sign_or_positive(delta.x), sign_or_positive(delta.y));
    // Ties go to Y so square landings resolve vertically.
    let axis = if overlap.x < overlap.y { Axis::X } else { Axis::Y };

    Some(Contact {
        overlap,
        direction,
        axis,
    })
}
