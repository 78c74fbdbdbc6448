//! Classroom shapes: rectangles, circles, triangles, text and images.
//!
//! One `Shape` type covers every kind; the kind lives in its `VisualKind`
//! payload and the renderer dispatches on it.

use super::color::Color;
use super::drawable::{Drawable, DrawableId};
use super::registry::Scene;
use super::renderer::Renderer;
use super::visual::{Visual, VisualKind};

/// Pixels moved by `move_left`/`move_right`/`move_up`/`move_down`.
pub const NUDGE: i32 = 20;

/// A drawable shape with its own registry handle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shape {
    id: DrawableId,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    kind: VisualKind,
    shown: bool,
}

impl Shape {
    fn build<R: Renderer>(
        scene: &mut Scene<R>,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        kind: VisualKind,
    ) -> Self {
        Self {
            id: scene.alloc_id(),
            x,
            y,
            width,
            height,
            kind,
            shown: false,
        }
    }

    /// Rectangle with its top-left corner at `(x, y)`.
    pub fn rect<R: Renderer>(scene: &mut Scene<R>, x: i32, y: i32, width: i32, height: i32, color: Color) -> Self {
        Self::build(scene, x, y, width, height, VisualKind::Rect { color })
    }

    /// Circle inscribed in the square at `(x, y)`.
    pub fn circle<R: Renderer>(scene: &mut Scene<R>, x: i32, y: i32, diameter: i32, color: Color) -> Self {
        Self::build(scene, x, y, diameter, diameter, VisualKind::Circle { color })
    }

    /// Triangle with its apex at `(x, y)`.
    pub fn triangle<R: Renderer>(scene: &mut Scene<R>, x: i32, y: i32, width: i32, height: i32, color: Color) -> Self {
        Self::build(scene, x, y, width, height, VisualKind::Triangle { color })
    }

    /// Text whose baseline starts at `(x, y)`.
    ///
    /// Width and height are estimated from the font size; exact metrics belong
    /// to the rendering backend.
    pub fn text<R: Renderer>(
        scene: &mut Scene<R>,
        text: impl Into<String>,
        x: i32,
        y: i32,
        size: i32,
        color: Color,
    ) -> Self {
        let text = text.into();
        let (width, height) = text_extent(&text, size);
        Self::build(scene, x, y, width, height, VisualKind::Text { text, size, color })
    }

    /// Image resolved from `asset`, scaled to `width` x `height`.
    pub fn image<R: Renderer>(
        scene: &mut Scene<R>,
        asset: impl Into<String>,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> Self {
        Self::build(scene, x, y, width, height, VisualKind::Image { asset: asset.into() })
    }

    /// Registry handle of this shape.
    #[must_use]
    pub fn id(&self) -> DrawableId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> &VisualKind {
        &self.kind
    }

    /// Current paint payload.
    #[must_use]
    pub fn visual(&self) -> Visual {
        Visual {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            kind: self.kind.clone(),
        }
    }

    pub fn move_horizontal<R: Renderer>(&mut self, scene: &mut Scene<R>, distance: i32) {
        self.set_position(scene, self.x + distance, self.y);
    }

    pub fn move_vertical<R: Renderer>(&mut self, scene: &mut Scene<R>, distance: i32) {
        self.set_position(scene, self.x, self.y + distance);
    }

    pub fn move_right<R: Renderer>(&mut self, scene: &mut Scene<R>) {
        self.move_horizontal(scene, NUDGE);
    }

    pub fn move_left<R: Renderer>(&mut self, scene: &mut Scene<R>) {
        self.move_horizontal(scene, -NUDGE);
    }

    pub fn move_up<R: Renderer>(&mut self, scene: &mut Scene<R>) {
        self.move_vertical(scene, -NUDGE);
    }

    pub fn move_down<R: Renderer>(&mut self, scene: &mut Scene<R>) {
        self.move_vertical(scene, NUDGE);
    }

    /// Resize. Circles stay round and take `width` as their diameter.
    pub fn change_size<R: Renderer>(&mut self, scene: &mut Scene<R>, width: i32, height: i32) {
        self.width = width.max(0);
        self.height = match self.kind {
            VisualKind::Circle { .. } => self.width,
            _ => height.max(0),
        };
        self.refresh(scene);
    }

    /// Recolour. Returns `false` for images, which have no fill colour.
    pub fn change_color<R: Renderer>(&mut self, scene: &mut Scene<R>, new_color: Color) -> bool {
        match &mut self.kind {
            VisualKind::Rect { color }
            | VisualKind::Circle { color }
            | VisualKind::Triangle { color }
            | VisualKind::Text { color, .. } => *color = new_color,
            VisualKind::Image { .. } => return false,
        }
        self.refresh(scene);
        true
    }

    /// Replace the string of a text shape. Returns `false` for other kinds.
    pub fn set_text<R: Renderer>(&mut self, scene: &mut Scene<R>, new_text: impl Into<String>) -> bool {
        let VisualKind::Text { text, size, .. } = &mut self.kind else {
            return false;
        };
        *text = new_text.into();
        let (width, height) = text_extent(text, *size);
        self.width = width;
        self.height = height;
        self.refresh(scene);
        true
    }

    /// Raise a shown shape to the top of the paint order.
    pub fn bring_to_front<R: Renderer>(&self, scene: &mut Scene<R>) {
        if self.shown {
            scene.bring_to_front(self.id);
        }
    }

    /// Put `other` in this shape's paint slot as one registry change.
    ///
    /// Afterwards `other` is shown and `self` is hidden. If `self` is not
    /// shown, `other` is simply shown on top.
    pub(crate) fn swap_into<R: Renderer>(&mut self, other: &mut Shape, scene: &mut Scene<R>) {
        if other.shown {
            self.hide(scene);
            return;
        }
        if self.shown && scene.replace(self.id, other.id, other.visual()) {
            self.shown = false;
            other.shown = true;
        } else {
            other.show(scene);
        }
    }

    fn refresh<R: Renderer>(&self, scene: &mut Scene<R>) {
        if self.shown {
            scene.update(self.id, self.visual());
        }
    }
}

impl Drawable for Shape {
    fn show<R: Renderer>(&mut self, scene: &mut Scene<R>) {
        if !self.shown {
            self.shown = true;
            scene.register(self.id, self.visual());
        }
    }

    fn hide<R: Renderer>(&mut self, scene: &mut Scene<R>) {
        if self.shown {
            scene.unregister(self.id);
            self.shown = false;
        }
    }

    fn is_shown(&self) -> bool {
        self.shown
    }

    fn set_position<R: Renderer>(&mut self, scene: &mut Scene<R>, x: i32, y: i32) {
        self.x = x;
        self.y = y;
        self.refresh(scene);
    }

    fn x(&self) -> i32 {
        self.x
    }

    fn y(&self) -> i32 {
        self.y
    }

    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn contains_point(&self, x: i32, y: i32) -> bool {
        self.visual().contains(x, y)
    }
}

/// Rough proportional-font extent: 0.6 em per character, 1 em tall.
fn text_extent(text: &str, size: i32) -> (i32, i32) {
    let chars = i32::try_from(text.chars().count()).unwrap_or(i32::MAX);
    (chars.saturating_mul(size).saturating_mul(3) / 5, size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::renderer::RecordingRenderer;

    fn scene() -> Scene<RecordingRenderer> {
        Scene::new(RecordingRenderer::new())
    }

    #[test]
    fn test_show_is_idempotent() {
        let mut scene = scene();
        let mut rect = Shape::rect(&mut scene, 0, 0, 60, 60, Color::RED);

        rect.show(&mut scene);
        rect.show(&mut scene);

        assert!(rect.is_shown());
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.frames_painted(), 1);
    }

    #[test]
    fn test_hide() {
        let mut scene = scene();
        let mut circle = Shape::circle(&mut scene, 0, 0, 30, Color::BLUE);

        circle.hide(&mut scene);
        assert_eq!(scene.frames_painted(), 0);

        circle.show(&mut scene);
        circle.hide(&mut scene);
        assert!(!circle.is_shown());
        assert!(scene.is_empty());
    }

    #[test]
    fn test_move_updates_registered_payload() {
        let mut scene = scene();
        let mut tri = Shape::triangle(&mut scene, 100, 100, 40, 30, Color::GREEN);
        tri.show(&mut scene);

        tri.move_right(&mut scene);
        tri.move_down(&mut scene);

        assert_eq!((tri.x(), tri.y()), (120, 120));
        assert_eq!(scene.visual(tri.id()).unwrap().x, 120);
    }

    #[test]
    fn test_move_hidden_shape_touches_nothing() {
        let mut scene = scene();
        let mut rect = Shape::rect(&mut scene, 0, 0, 10, 10, Color::RED);
        rect.move_left(&mut scene);
        assert_eq!(rect.x(), -20);
        assert_eq!(scene.frames_painted(), 0);
    }

    #[test]
    fn test_change_color() {
        let mut scene = scene();
        let mut rect = Shape::rect(&mut scene, 0, 0, 10, 10, Color::RED);
        rect.show(&mut scene);

        assert!(rect.change_color(&mut scene, Color::CYAN));
        assert_eq!(
            scene.visual(rect.id()).unwrap().kind,
            VisualKind::Rect { color: Color::CYAN }
        );

        let mut image = Shape::image(&mut scene, "cards/back.png", 0, 0, 120, 175);
        assert!(!image.change_color(&mut scene, Color::CYAN));
    }

    #[test]
    fn test_circle_resize_stays_round() {
        let mut scene = scene();
        let mut circle = Shape::circle(&mut scene, 0, 0, 30, Color::BLUE);
        circle.change_size(&mut scene, 50, 10);
        assert_eq!((circle.width(), circle.height()), (50, 50));
    }

    #[test]
    fn test_text_extent_follows_string() {
        let mut scene = scene();
        let mut label = Shape::text(&mut scene, "wins", 0, 0, 20, Color::GREEN);
        assert_eq!((label.width(), label.height()), (48, 20));

        assert!(label.set_text(&mut scene, "WAR!!"));
        assert_eq!(label.width(), 60);

        let mut rect = Shape::rect(&mut scene, 0, 0, 1, 1, Color::RED);
        assert!(!rect.set_text(&mut scene, "nope"));
    }

    #[test]
    fn test_text_extent_saturates() {
        let (width, height) = text_extent("huge", i32::MAX);
        assert_eq!(width, i32::MAX / 5);
        assert_eq!(height, i32::MAX);
    }

    #[test]
    fn test_contains_point() {
        let mut scene = scene();
        let rect = Shape::rect(&mut scene, 10, 10, 20, 20, Color::RED);
        assert!(rect.contains_point(15, 15));
        assert!(!rect.contains_point(5, 15));
    }

    #[test]
    fn test_swap_into_keeps_slot() {
        let mut scene = scene();
        let mut below = Shape::rect(&mut scene, 0, 0, 10, 10, Color::RED);
        let mut back = Shape::image(&mut scene, "cards/back.png", 0, 0, 10, 10);
        let mut face = Shape::image(&mut scene, "cards/ah.png", 0, 0, 10, 10);
        let mut above = Shape::rect(&mut scene, 0, 0, 10, 10, Color::RED);
        below.show(&mut scene);
        back.show(&mut scene);
        above.show(&mut scene);

        back.swap_into(&mut face, &mut scene);

        assert!(face.is_shown());
        assert!(!back.is_shown());
        assert_eq!(scene.paint_order(), &[below.id(), face.id(), above.id()]);
    }

    #[test]
    fn test_swap_into_from_hidden_shows_other() {
        let mut scene = scene();
        let mut back = Shape::image(&mut scene, "cards/back.png", 0, 0, 10, 10);
        let mut face = Shape::image(&mut scene, "cards/ah.png", 0, 0, 10, 10);

        back.swap_into(&mut face, &mut scene);
        assert!(face.is_shown());
        assert!(!back.is_shown());
        assert_eq!(scene.len(), 1);
    }
}
