//! Paint payloads handed to the render collaborator.
//!
//! A `Visual` is a snapshot of what a drawable looks like right now: its
//! anchor, its size and a tagged kind. The registry keeps one per shown
//! drawable, the renderer dispatches on the kind, and hit-testing uses the
//! same geometry the renderer would fill.

use serde::{Deserialize, Serialize};

use super::color::Color;

/// What kind of thing to paint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisualKind {
    /// Filled rectangle; anchor is the top-left corner.
    Rect { color: Color },
    /// Filled circle inscribed in a square of side `width`; anchor is the
    /// top-left corner of that square.
    Circle { color: Color },
    /// Filled isosceles triangle; anchor is the apex, the base is `width`
    /// wide and `height` below it.
    Triangle { color: Color },
    /// A line of text; anchor is the start of the baseline.
    Text { text: String, size: i32, color: Color },
    /// A bitmap resolved by asset name; anchor is the top-left corner.
    Image { asset: String },
}

/// A positioned paint payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visual {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub kind: VisualKind,
}

impl Visual {
    /// Check whether a canvas point falls inside the painted area.
    #[must_use]
    pub fn contains(&self, px: i32, py: i32) -> bool {
        match &self.kind {
            VisualKind::Rect { .. } | VisualKind::Image { .. } => {
                px >= self.x
                    && px < self.x + self.width
                    && py >= self.y
                    && py < self.y + self.height
            }
            VisualKind::Circle { .. } => {
                let (px, py) = (i64::from(px), i64::from(py));
                let diameter = i64::from(self.width);
                let dx = px - (i64::from(self.x) + diameter / 2);
                let dy = py - (i64::from(self.y) + diameter / 2);
                dx * dx + dy * dy <= diameter * diameter / 4
            }
            VisualKind::Triangle { .. } => {
                let [a, b, c] = self.triangle_points();
                let p = (i64::from(px), i64::from(py));
                let whole = twice_area(a, b, c);
                whole == twice_area(p, b, c) + twice_area(a, p, c) + twice_area(a, b, p)
            }
            VisualKind::Text { size, .. } => {
                // Ascent sits above the baseline, descent below it.
                let top = self.y - size * 4 / 5;
                px >= self.x && px < self.x + self.width && py >= top && py < top + self.height
            }
        }
    }

    /// Apex, bottom-right and bottom-left corners of a triangle payload.
    #[must_use]
    pub fn triangle_points(&self) -> [(i64, i64); 3] {
        let (x, y) = (i64::from(self.x), i64::from(self.y));
        let (half, h) = (i64::from(self.width / 2), i64::from(self.height));
        [(x, y), (x + half, y + h), (x - half, y + h)]
    }
}

/// Twice the unsigned area of a triangle; exact in integers.
fn twice_area(a: (i64, i64), b: (i64, i64), c: (i64, i64)) -> i64 {
    (a.0 * (b.1 - c.1) + b.0 * (c.1 - a.1) + c.0 * (a.1 - b.1)).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visual(kind: VisualKind, x: i32, y: i32, width: i32, height: i32) -> Visual {
        Visual { x, y, width, height, kind }
    }

    #[test]
    fn test_rect_contains_edges() {
        let rect = visual(VisualKind::Rect { color: Color::RED }, 10, 20, 30, 40);
        assert!(rect.contains(10, 20));
        assert!(rect.contains(39, 59));
        assert!(!rect.contains(40, 59));
        assert!(!rect.contains(39, 60));
        assert!(!rect.contains(9, 30));
    }

    #[test]
    fn test_adjacent_images_share_no_column() {
        let asset = || VisualKind::Image { asset: "cards/back.png".to_string() };
        let left = visual(asset(), 0, 0, 120, 175);
        let right = visual(asset(), 120, 0, 120, 175);
        assert!(!left.contains(120, 50));
        assert!(right.contains(120, 50));
    }

    #[test]
    fn test_circle_contains() {
        let circle = visual(VisualKind::Circle { color: Color::BLUE }, 0, 0, 20, 20);
        assert!(circle.contains(10, 10));
        assert!(circle.contains(20, 10));
        // Corner of the bounding square is outside the circle
        assert!(!circle.contains(1, 1));
    }

    #[test]
    fn test_triangle_contains() {
        let tri = visual(VisualKind::Triangle { color: Color::GREEN }, 50, 0, 40, 40);
        assert!(tri.contains(50, 0));
        assert!(tri.contains(50, 30));
        assert!(tri.contains(31, 40));
        assert!(!tri.contains(31, 10));
        assert!(!tri.contains(50, 41));
    }

    #[test]
    fn test_text_contains_around_baseline() {
        let text = visual(
            VisualKind::Text { text: "hi".into(), size: 20, color: Color::BLACK },
            100,
            50,
            24,
            20,
        );
        // Ascent is above the baseline
        assert!(text.contains(101, 40));
        assert!(text.contains(101, 53));
        assert!(!text.contains(101, 25));
        assert!(!text.contains(124, 45));
    }
}
