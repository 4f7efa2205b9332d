//! Containment test the host supplies for outside-pointer detection.

/// The control's rendered bounding region, as the host knows it.
pub trait HitRegion: Send + Sync {
    fn contains(&self, x: u16, y: u16) -> bool;
}

impl<F> HitRegion for F
where
    F: Fn(u16, u16) -> bool + Send + Sync,
{
    fn contains(&self, x: u16, y: u16) -> bool {
        self(x, y)
    }
}

/// Axis-aligned cell rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Smallest rectangle covering both. Empty rectangles are ignored.
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }
}

impl HitRegion for Rect {
    fn contains(&self, x: u16, y: u16) -> bool {
        Rect::contains(self, x, y)
    }
}
