//! Logical screen geometry.
//!
//! Every coordinate in the workspace is expressed against the reference
//! resolution of the game client (1920x1080). The real viewport may be any
//! 16:9 size between two thirds and twice the reference; the ratio between
//! the two is the zoom ratio, applied once by the input driver.

use serde::{Deserialize, Serialize};

use crate::error::RpaError;

/// Reference viewport width.
pub const STD_WIDTH: u32 = 1920;
/// Reference viewport height.
pub const STD_HEIGHT: u32 = 1080;
/// Smallest supported viewport width.
pub const MIN_WIDTH: u32 = STD_WIDTH * 2 / 3;
/// Smallest supported viewport height.
pub const MIN_HEIGHT: u32 = STD_HEIGHT * 2 / 3;
/// Largest supported viewport width.
pub const MAX_WIDTH: u32 = STD_WIDTH * 2;
/// Largest supported viewport height.
pub const MAX_HEIGHT: u32 = STD_HEIGHT * 2;

const ASPECT_NUMERATOR: u64 = 16;
const ASPECT_DENOMINATOR: u64 = 9;

/// Check a viewport size against the supported bounds and the 16:9 ratio.
///
/// Bounds are inclusive. The ratio is compared exactly, as integers.
pub fn validate_viewport(width: u32, height: u32) -> bool {
    if width < MIN_WIDTH || height < MIN_HEIGHT {
        return false;
    }
    if width > MAX_WIDTH || height > MAX_HEIGHT {
        return false;
    }
    u64::from(width) * ASPECT_DENOMINATOR == u64::from(height) * ASPECT_NUMERATOR
}

/// Scale factor from logical to device coordinates.
pub fn zoom_ratio(width: u32) -> f64 {
    f64::from(width) / f64::from(STD_WIDTH)
}

/// A validated 16:9 viewport size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportConfig {
    width: u32,
    height: u32,
}

impl ViewportConfig {
    /// Create a viewport, rejecting unsupported sizes.
    pub fn new(width: u32, height: u32) -> Result<Self, RpaError> {
        if !validate_viewport(width, height) {
            return Err(RpaError::InvalidParameter(format!(
                "Supported viewport sizes are from {MIN_WIDTH} x {MIN_HEIGHT} \
                 to {MAX_WIDTH} x {MAX_HEIGHT} and 16:9 aspect ratio, got {width} x {height}"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn zoom_ratio(&self) -> f64 {
        zoom_ratio(self.width)
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: STD_WIDTH,
            height: STD_HEIGHT,
        }
    }
}

/// A rectangle in logical coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Whether the region is non-degenerate and lies fully inside the logical viewport.
    pub fn is_inside_reference(&self) -> bool {
        let (w, h) = (STD_WIDTH as i32, STD_HEIGHT as i32);
        if self.left < 0 || self.top < 0 {
            return false;
        }
        if self.width <= 0 || self.height <= 0 {
            return false;
        }
        if self.left >= w || self.top >= h {
            return false;
        }
        self.width <= w - self.left && self.height <= h - self.top
    }

    /// Fail with [`RpaError::InvalidRegion`] unless [`Region::is_inside_reference`] holds.
    pub fn validate(&self) -> Result<(), RpaError> {
        if self.is_inside_reference() {
            Ok(())
        } else {
            Err(RpaError::InvalidRegion {
                left: self.left,
                top: self.top,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Center point of the region.
    pub fn center(&self) -> (f64, f64) {
        (
            f64::from(self.left) + f64::from(self.width) / 2.0,
            f64::from(self.top) + f64::from(self.height) / 2.0,
        )
    }

    /// Region shifted horizontally by `dx`.
    pub const fn offset_x(&self, dx: i32) -> Self {
        Self::new(self.left + dx, self.top, self.width, self.height)
    }
}

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod tests;
