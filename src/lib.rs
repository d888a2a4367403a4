//! Storm Survivor - A single-screen arena shooter inside a shrinking storm
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, collisions, economy)
//! - `renderer`: WebGPU rendering of simulation snapshots
//! - `tuning`: Data-driven game balance
//! - `settings`: Display and debug preferences

pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default play-field size (pixels)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Storm starts at this fraction of the smaller field dimension
    pub const STORM_START_FRACTION: f32 = 0.8;

    /// Default circle tessellation for rendering
    pub const CIRCLE_SEGMENTS: u32 = 32;

    /// Heading used when a direction is requested between identical points
    pub const DEFAULT_HEADING: f32 = 0.0;
}

/// An axis-aligned rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Angle (radians) of the direction from `from` toward `to`.
///
/// Identical points yield [`consts::DEFAULT_HEADING`] so callers never see NaN.
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    if delta == Vec2::ZERO {
        consts::DEFAULT_HEADING
    } else {
        delta.y.atan2(delta.x)
    }
}

/// Unit vector for an angle
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Strict point-in-rectangle test (points on the edge are outside)
#[inline]
pub fn point_in_rect(point: Vec2, rect: &Rect) -> bool {
    let max = rect.max();
    point.x > rect.min.x && point.x < max.x && point.y > rect.min.y && point.y < max.y
}
