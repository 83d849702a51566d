/// Axis-aligned bounding boxes and the overlap test every collision pass uses.

/// A world-space rectangle: top-left corner plus size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }
}

/// Anything that occupies a box in world space.
pub trait Collider {
    fn rect(&self) -> Rect;
}

impl Collider for Rect {
    fn rect(&self) -> Rect {
        *self
    }
}

/// True if the two boxes overlap.  Intervals are closed, so boxes that only
/// share an edge (`a.right() == b.x`) count as touching.
pub fn intersects(a: &impl Collider, b: &impl Collider) -> bool {
    let a = a.rect();
    let b = b.rect();
    !(a.x > b.right() || b.x > a.right() || a.y > b.bottom() || b.y > a.bottom())
}
