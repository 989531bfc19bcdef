/// An axis-aligned rectangle in PDF points.
///
/// The origin is the top-left corner of the page and `y` grows downward; the
/// renderer flips it when emitting PDF operators.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Splits the rectangle along the horizontal axis.
    ///
    /// `fraction` is the share of the width given to the left part; it is
    /// clamped to `[0, 1]`.
    pub fn split_horizontal(&self, fraction: f32) -> (Rect, Rect) {
        let left_width = self.width * fraction.clamp(0.0, 1.0);
        let left = Rect::new(self.x, self.y, left_width, self.height);
        let right = Rect::new(
            self.x + left_width,
            self.y,
            self.width - left_width,
            self.height,
        );
        (left, right)
    }

    /// Shrinks the rectangle by `amount` on every side, never below zero size.
    pub fn inset(&self, amount: f32) -> Rect {
        let dx = amount.min(self.width / 2.0);
        let dy = amount.min(self.height / 2.0);
        Rect::new(
            self.x + dx,
            self.y + dy,
            self.width - 2.0 * dx,
            self.height - 2.0 * dy,
        )
    }

    /// The largest square centred inside this rectangle.
    pub fn centered_square(&self) -> Rect {
        let side = self.width.min(self.height);
        Rect::new(
            self.x + (self.width - side) / 2.0,
            self.y + (self.height - side) / 2.0,
            side,
            side,
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
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

    /// True when `other` fits inside `self`, allowing for rounding in the
    /// unit conversion.
    pub fn contains(&self, other: Size) -> bool {
        const EPSILON: f32 = 0.01;
        other.width <= self.width + EPSILON && other.height <= self.height + EPSILON
    }
}
