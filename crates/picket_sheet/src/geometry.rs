//! Sheet geometry: primitives and the presented-size resolution.
//!
//! Extent resolution per axis runs in a fixed order. Percent values are
//! clamped into [-1, 1] and then `abs()`-ed, so negatives and over-100%
//! fractions become their absolute value instead of being rejected. Percent
//! mode beats a fixed extent unless an option disabled it; a fixed extent
//! must be positive to count; otherwise the full container extent is used.
//! Bounds apply last: the upper bound first, then the lower bound, so a
//! minimum above a maximum wins.

use serde::{Deserialize, Serialize};

use crate::options::{AxisExtent, SheetConfig};

// =============================================================================
// Primitives
// =============================================================================

/// 2D point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 2D size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// 2D rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.x <= self.origin.x + self.size.width
            && point.y >= self.origin.y
            && point.y <= self.origin.y + self.size.height
    }
}

// =============================================================================
// Extent Resolution
// =============================================================================

impl AxisExtent {
    pub(crate) fn resolve(&self, container: f32) -> f32 {
        let value = if self.use_percent {
            container * self.percent.clamp(-1.0, 1.0).abs()
        } else if self.fixed > 0.0 {
            self.fixed
        } else {
            container
        };
        // Upper bound first, then lower bound.
        value.min(self.max).max(self.min)
    }
}

impl SheetConfig {
    /// The size the sheet takes over a container of `container` size.
    pub fn presented_size(&self, container: Size) -> Size {
        Size::new(
            self.width.resolve(container.width),
            self.height.resolve(container.height),
        )
    }

    /// The sheet's frame: anchored to the container's bottom-left edge.
    pub fn presented_frame(&self, container: Size) -> Rect {
        let size = self.presented_size(container);
        Rect::from_origin_size(Point::new(0.0, container.height - size.height), size)
    }

    /// Whether a backdrop tap at `point` should dismiss the sheet.
    ///
    /// True only when tap dismissal is configured and the tap landed outside
    /// the presented frame.
    pub fn backdrop_should_dismiss(&self, point: Point, presented: Rect) -> bool {
        self.dismiss_on_backdrop_tap() && !presented.contains(point)
    }
}
