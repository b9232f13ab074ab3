use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Shrinks the rectangle by `amount` on every side. Never produces a negative size.
    pub fn inset(&self, amount: f32) -> Rect {
        Rect {
            x: self.x + amount,
            y: self.y + amount,
            width: (self.width - 2.0 * amount).max(0.0),
            height: (self.height - 2.0 * amount).max(0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }
}

/// Fixed page dimensions and the vertical band that body content may occupy.
///
/// Coordinates are measured from the top-left corner of the page, y growing downwards.
/// `content_top` leaves room for the running header and `content_bottom` for the footer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub content_top: f32,
    pub content_bottom: f32,
}

impl PageGeometry {
    pub fn new(
        page_width: f32,
        page_height: f32,
        margin: f32,
        content_top: f32,
        content_bottom: f32,
    ) -> Self {
        Self {
            page_width,
            page_height,
            margin,
            content_top,
            content_bottom,
        }
    }

    /// US Letter with the default report margins.
    pub fn letter() -> Self {
        Self::new(612.0, 792.0, 54.0, 72.0, 792.0 - 46.0)
    }

    pub fn page_size(&self) -> Size {
        Size::new(self.page_width, self.page_height)
    }

    pub fn content_width(&self) -> f32 {
        (self.page_width - 2.0 * self.margin).max(0.0)
    }

    pub fn content_height(&self) -> f32 {
        (self.content_bottom - self.content_top).max(0.0)
    }

    pub fn content_rect(&self) -> Rect {
        Rect::new(self.margin, self.content_top, self.content_width(), self.content_height())
    }

    /// True when the header and footer bands fit inside the page.
    pub fn is_valid(&self) -> bool {
        self.content_top > 0.0
            && self.content_bottom < self.page_height
            && self.content_top < self.content_bottom
            && self.content_width() > 0.0
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::letter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_geometry_is_valid() {
        let geometry = PageGeometry::letter();
        assert!(geometry.is_valid());
        assert_eq!(geometry.content_width(), 504.0);
        assert_eq!(geometry.content_height(), 674.0);
    }

    #[test]
    fn inverted_bands_are_rejected() {
        let geometry = PageGeometry::new(612.0, 792.0, 54.0, 700.0, 600.0);
        assert!(!geometry.is_valid());
    }

    #[test]
    fn inset_clamps_to_zero() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0).inset(8.0);
        assert_eq!(rect.width, 0.0);
        assert_eq!(rect.x, 8.0);
    }
}
