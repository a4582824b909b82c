//! Sampled layout geometry.
//!
//! Both values are measured once when the session starts and are never
//! re-measured: the body size used for collision and the size used for
//! render clamping must come from the same sample.

/// The walled region objects live in, in CSS pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Container {
    pub width: f32,
    pub height: f32,
}

impl Container {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Bounding box size of one object element
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementSize {
    pub width: f32,
    pub height: f32,
}

impl ElementSize {
    /// Smallest side a body may have, in px
    pub const MIN_EXTENT: f32 = 1.0;

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Both sides raised to at least `MIN_EXTENT`. NaN becomes `MIN_EXTENT`.
    pub fn body_extent(self) -> Self {
        Self {
            width: self.width.max(Self::MIN_EXTENT),
            height: self.height.max(Self::MIN_EXTENT),
        }
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width >= Self::MIN_EXTENT && self.height >= Self::MIN_EXTENT)
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.width * 0.5
    }

    #[inline]
    pub fn half_height(&self) -> f32 {
        self.height * 0.5
    }
}
