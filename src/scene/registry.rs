//! Scene registry: which drawables are shown, and in what order.
//!
//! The `Scene` owns the paint list for one canvas. It supports:
//! - Idempotent register/unregister with insertion-ordered painting
//!   (later registrations paint on top)
//! - In-place payload updates and slot-preserving replacement
//! - Nest-safe pause/resume so a batch of changes shows up as one frame
//! - Hit-testing from the top of the paint order down
//!
//! ## Usage
//!
//! ```
//! use canvas_war::scene::{Color, RecordingRenderer, Scene, Visual, VisualKind};
//!
//! let mut scene = Scene::new(RecordingRenderer::new());
//! let a = scene.alloc_id();
//! let b = scene.alloc_id();
//! let square = |x| Visual { x, y: 0, width: 10, height: 10, kind: VisualKind::Rect { color: Color::RED } };
//!
//! scene.pause();
//! scene.register(a, square(0));
//! scene.register(b, square(5));
//! scene.resume();
//!
//! // One frame for the whole batch, and the later square wins the overlap
//! assert_eq!(scene.renderer().frames().len(), 1);
//! assert_eq!(scene.hit_test(7, 5), Some(b));
//! ```

use rustc_hash::FxHashMap;
use tracing::{trace, warn};

use super::color::Color;
use super::drawable::DrawableId;
use super::renderer::Renderer;
use super::visual::Visual;

/// Ordered registry of shown drawables bound to one render collaborator.
#[derive(Debug)]
pub struct Scene<R: Renderer> {
    renderer: R,
    /// Current payload of every registered drawable.
    visuals: FxHashMap<DrawableId, Visual>,
    /// Paint order, bottom first. Each id appears at most once.
    order: Vec<DrawableId>,
    background: Color,
    pause_depth: u32,
    /// Something changed since the last painted frame.
    dirty: bool,
    next_id: u64,
    frames_painted: u64,
}

impl<R: Renderer> Scene<R> {
    /// Create an empty scene with a white background.
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            visuals: FxHashMap::default(),
            order: Vec::new(),
            background: Color::WHITE,
            pause_depth: 0,
            dirty: false,
            next_id: 0,
            frames_painted: 0,
        }
    }

    /// Allocate a fresh drawable handle. Does not register it.
    pub fn alloc_id(&mut self) -> DrawableId {
        let id = DrawableId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Register a drawable on top of the paint order.
    ///
    /// Returns `false` (and changes nothing) if it is already registered.
    pub fn register(&mut self, id: DrawableId, visual: Visual) -> bool {
        if self.visuals.contains_key(&id) {
            return false;
        }
        self.visuals.insert(id, visual);
        self.order.push(id);
        self.changed();
        true
    }

    /// Remove a drawable from the paint order.
    ///
    /// Returns `false` if it was not registered.
    pub fn unregister(&mut self, id: DrawableId) -> bool {
        if self.visuals.remove(&id).is_none() {
            return false;
        }
        self.order.retain(|&e| e != id);
        self.changed();
        true
    }

    /// Refresh a registered drawable's payload without moving its paint slot.
    ///
    /// Returns `false` if it is not registered.
    pub fn update(&mut self, id: DrawableId, visual: Visual) -> bool {
        let Some(slot) = self.visuals.get_mut(&id) else {
            return false;
        };
        if *slot != visual {
            *slot = visual;
            self.changed();
        }
        true
    }

    /// Swap `old` for `new` in the same paint slot, as one change.
    ///
    /// Returns `false` (and changes nothing) if `old` is not registered.
    pub fn replace(&mut self, old: DrawableId, new: DrawableId, visual: Visual) -> bool {
        if old == new {
            return self.update(old, visual);
        }
        let Some(pos) = self.order.iter().position(|&e| e == old) else {
            return false;
        };

        self.visuals.remove(&old);
        let mut pos = pos;
        if self.visuals.insert(new, visual).is_some() {
            // `new` leaves its previous slot and takes over `old`'s
            if let Some(prev) = self.order.iter().position(|&e| e == new) {
                self.order.remove(prev);
                if prev < pos {
                    pos -= 1;
                }
            }
        }
        self.order[pos] = new;
        self.changed();
        true
    }

    /// Move a registered drawable to the top of the paint order.
    ///
    /// Returns `false` if it is not registered.
    pub fn bring_to_front(&mut self, id: DrawableId) -> bool {
        let Some(pos) = self.order.iter().position(|&e| e == id) else {
            return false;
        };
        if pos + 1 != self.order.len() {
            self.order.remove(pos);
            self.order.push(id);
            self.changed();
        }
        true
    }

    /// Unregister everything.
    pub fn clear(&mut self) {
        if self.order.is_empty() {
            return;
        }
        self.order.clear();
        self.visuals.clear();
        self.changed();
    }

    /// Change the colour frames are cleared to.
    pub fn set_background(&mut self, color: Color) {
        if self.background != color {
            self.background = color;
            self.changed();
        }
    }

    #[must_use]
    pub fn background(&self) -> Color {
        self.background
    }

    /// Suspend painting until the matching `resume`. Nests.
    pub fn pause(&mut self) {
        self.pause_depth += 1;
    }

    /// Undo one `pause`. The outermost resume paints one frame if anything
    /// changed while paused.
    pub fn resume(&mut self) {
        if self.pause_depth == 0 {
            trace!("resume without matching pause ignored");
            return;
        }
        self.pause_depth -= 1;
        if self.pause_depth == 0 && self.dirty {
            self.repaint();
        }
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.pause_depth > 0
    }

    /// Run `f` with painting paused, then resume.
    pub fn batch<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.pause();
        let out = f(self);
        self.resume();
        out
    }

    /// Paint one frame now, paused or not.
    pub fn redraw(&mut self) {
        self.repaint();
    }

    /// Topmost registered drawable whose painted area contains the point.
    #[must_use]
    pub fn hit_test(&self, x: i32, y: i32) -> Option<DrawableId> {
        self.order
            .iter()
            .rev()
            .find(|id| self.visuals.get(id).is_some_and(|v| v.contains(x, y)))
            .copied()
    }

    #[must_use]
    pub fn contains(&self, id: DrawableId) -> bool {
        self.visuals.contains_key(&id)
    }

    /// Current payload of a registered drawable.
    #[must_use]
    pub fn visual(&self, id: DrawableId) -> Option<&Visual> {
        self.visuals.get(&id)
    }

    /// Registered drawables, bottom first.
    #[must_use]
    pub fn paint_order(&self) -> &[DrawableId] {
        &self.order
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of frames handed to the renderer so far.
    #[must_use]
    pub fn frames_painted(&self) -> u64 {
        self.frames_painted
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    fn changed(&mut self) {
        self.dirty = true;
        if self.pause_depth == 0 {
            self.repaint();
        }
    }

    fn repaint(&mut self) {
        self.renderer.begin_frame(self.background);
        for id in &self.order {
            let Some(visual) = self.visuals.get(id) else {
                continue;
            };
            if let Err(warning) = self.renderer.paint(*id, visual) {
                warn!(%warning, "drawable painted without its payload");
            }
        }
        self.renderer.end_frame();
        self.frames_painted += 1;
        self.dirty = false;
        trace!(frame = self.frames_painted, drawables = self.order.len(), "frame painted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::renderer::RecordingRenderer;
    use crate::scene::visual::VisualKind;

    fn rect(x: i32, y: i32) -> Visual {
        Visual {
            x,
            y,
            width: 10,
            height: 10,
            kind: VisualKind::Rect { color: Color::RED },
        }
    }

    fn scene() -> Scene<RecordingRenderer> {
        Scene::new(RecordingRenderer::new())
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut scene = scene();
        let id = scene.alloc_id();

        assert!(scene.register(id, rect(0, 0)));
        assert!(!scene.register(id, rect(0, 0)));

        assert_eq!(scene.len(), 1);
        assert_eq!(scene.frames_painted(), 1);
    }

    #[test]
    fn test_unregister_absent_is_noop() {
        let mut scene = scene();
        let id = scene.alloc_id();

        assert!(!scene.unregister(id));
        assert_eq!(scene.frames_painted(), 0);
    }

    #[test]
    fn test_paint_order_is_registration_order() {
        let mut scene = scene();
        let ids: Vec<_> = (0..3).map(|_| scene.alloc_id()).collect();
        for &id in &ids {
            scene.register(id, rect(0, 0));
        }

        assert_eq!(scene.paint_order(), ids.as_slice());
        assert_eq!(scene.renderer().last_frame().unwrap().painted, ids);
    }

    #[test]
    fn test_pause_batches_into_one_frame() {
        let mut scene = scene();
        let ids: Vec<_> = (0..3).map(|_| scene.alloc_id()).collect();

        scene.pause();
        for &id in &ids {
            scene.register(id, rect(0, 0));
        }
        assert_eq!(scene.frames_painted(), 0);
        scene.resume();

        let frames = scene.renderer().frames();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].painted, ids);
    }

    #[test]
    fn test_nested_pause_paints_on_outermost_resume() {
        let mut scene = scene();
        let a = scene.alloc_id();
        let b = scene.alloc_id();

        scene.pause();
        scene.register(a, rect(0, 0));
        scene.pause();
        scene.register(b, rect(0, 0));
        scene.resume();
        assert_eq!(scene.frames_painted(), 0);
        assert!(scene.is_paused());
        scene.resume();

        assert_eq!(scene.frames_painted(), 1);
        assert!(!scene.is_paused());
    }

    #[test]
    fn test_resume_without_changes_paints_nothing() {
        let mut scene = scene();
        scene.pause();
        scene.resume();
        scene.resume(); // unbalanced, ignored
        assert_eq!(scene.frames_painted(), 0);
    }

    #[test]
    fn test_redraw_forces_frame() {
        let mut scene = scene();
        scene.pause();
        scene.redraw();
        assert_eq!(scene.frames_painted(), 1);
        scene.resume();
        assert_eq!(scene.frames_painted(), 1);
    }

    #[test]
    fn test_hit_test_prefers_top() {
        let mut scene = scene();
        let bottom = scene.alloc_id();
        let top = scene.alloc_id();
        scene.register(bottom, rect(0, 0));
        scene.register(top, rect(5, 5));

        assert_eq!(scene.hit_test(7, 7), Some(top));
        assert_eq!(scene.hit_test(2, 2), Some(bottom));
        assert_eq!(scene.hit_test(50, 50), None);

        scene.bring_to_front(bottom);
        assert_eq!(scene.hit_test(7, 7), Some(bottom));
    }

    #[test]
    fn test_update_keeps_slot() {
        let mut scene = scene();
        let a = scene.alloc_id();
        let b = scene.alloc_id();
        scene.register(a, rect(0, 0));
        scene.register(b, rect(0, 0));

        assert!(scene.update(a, rect(40, 40)));
        assert_eq!(scene.paint_order(), &[a, b]);
        assert_eq!(scene.visual(a).unwrap().x, 40);

        // Unchanged payload does not repaint
        let frames = scene.frames_painted();
        scene.update(a, rect(40, 40));
        assert_eq!(scene.frames_painted(), frames);

        let ghost = scene.alloc_id();
        assert!(!scene.update(ghost, rect(0, 0)));
    }

    #[test]
    fn test_replace_is_single_frame_in_same_slot() {
        let mut scene = scene();
        let below = scene.alloc_id();
        let old = scene.alloc_id();
        let above = scene.alloc_id();
        let new = scene.alloc_id();
        scene.register(below, rect(0, 0));
        scene.register(old, rect(0, 0));
        scene.register(above, rect(0, 0));

        let frames = scene.frames_painted();
        assert!(scene.replace(old, new, rect(0, 0)));

        assert_eq!(scene.frames_painted(), frames + 1);
        assert_eq!(scene.paint_order(), &[below, new, above]);
        assert!(!scene.contains(old));
        // Neither both nor none were ever painted
        for frame in scene.renderer().frames() {
            let has_old = frame.painted.contains(&old);
            let has_new = frame.painted.contains(&new);
            assert!(!(has_old && has_new));
        }
    }

    #[test]
    fn test_replace_missing_old_is_noop() {
        let mut scene = scene();
        let old = scene.alloc_id();
        let new = scene.alloc_id();
        assert!(!scene.replace(old, new, rect(0, 0)));
        assert!(scene.is_empty());
    }

    #[test]
    fn test_replace_with_already_registered_new() {
        let mut scene = scene();
        let old = scene.alloc_id();
        let new = scene.alloc_id();
        scene.register(old, rect(0, 0));
        scene.register(new, rect(0, 0));

        assert!(scene.replace(old, new, rect(1, 1)));
        assert_eq!(scene.paint_order(), &[new]);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_replace_moves_lower_new_into_old_slot() {
        let mut scene = scene();
        let new = scene.alloc_id();
        let mid = scene.alloc_id();
        let old = scene.alloc_id();
        scene.register(new, rect(0, 0));
        scene.register(mid, rect(0, 0));
        scene.register(old, rect(0, 0));

        assert!(scene.replace(old, new, rect(2, 2)));
        assert_eq!(scene.paint_order(), &[mid, new]);
        assert_eq!(scene.visual(new).map(|v| v.x), Some(2));
    }

    #[test]
    fn test_replace_moves_higher_new_into_old_slot() {
        let mut scene = scene();
        let old = scene.alloc_id();
        let mid = scene.alloc_id();
        let new = scene.alloc_id();
        scene.register(old, rect(0, 0));
        scene.register(mid, rect(0, 0));
        scene.register(new, rect(0, 0));

        assert!(scene.replace(old, new, rect(0, 0)));
        assert_eq!(scene.paint_order(), &[new, mid]);
    }

    #[test]
    fn test_missing_asset_keeps_drawable_registered() {
        let mut scene = Scene::new(RecordingRenderer::new().with_missing_asset("cards/ah.png"));
        let id = scene.alloc_id();
        let image = Visual {
            x: 0,
            y: 0,
            width: 10,
            height: 10,
            kind: VisualKind::Image { asset: "cards/ah.png".to_string() },
        };

        assert!(scene.register(id, image));
        assert!(scene.contains(id));
        assert_eq!(scene.frames_painted(), 1);
        assert!(scene.renderer().last_frame().unwrap().painted.is_empty());
    }

    #[test]
    fn test_background_change_repaints() {
        let mut scene = scene();
        scene.set_background(Color::RED);
        assert_eq!(scene.renderer().last_frame().unwrap().background, Color::RED);

        scene.set_background(Color::RED);
        assert_eq!(scene.frames_painted(), 1);
    }

    #[test]
    fn test_clear() {
        let mut scene = scene();
        let a = scene.alloc_id();
        scene.register(a, rect(0, 0));
        scene.clear();
        assert!(scene.is_empty());
        assert!(!scene.contains(a));
        assert_eq!(scene.frames_painted(), 2);
    }
}
