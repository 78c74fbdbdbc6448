//! The capability contract every visual entity implements.

use serde::{Deserialize, Serialize};

use super::registry::Scene;
use super::renderer::Renderer;

/// Registry handle for one paintable payload.
///
/// Allocated by `Scene::alloc_id`; unique within that scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DrawableId(pub u64);

impl std::fmt::Display for DrawableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Drawable({})", self.0)
    }
}

/// A visual entity that can be shown on, hidden from and moved within a
/// scene.
///
/// A drawable tracks its own `shown` flag but holds no reference to the
/// registry; the scene is passed to every call that has to touch it.
///
/// ## Implementation Notes
///
/// - `show`/`hide` must be idempotent
/// - `set_position` on a shown drawable must refresh its payload in place,
///   keeping its paint slot
pub trait Drawable {
    /// Register with the scene. No-op if already shown.
    fn show<R: Renderer>(&mut self, scene: &mut Scene<R>);

    /// Unregister from the scene. No-op if already hidden.
    fn hide<R: Renderer>(&mut self, scene: &mut Scene<R>);

    fn is_shown(&self) -> bool;

    /// Move the anchor point.
    fn set_position<R: Renderer>(&mut self, scene: &mut Scene<R>, x: i32, y: i32);

    fn x(&self) -> i32;

    fn y(&self) -> i32;

    fn width(&self) -> i32;

    fn height(&self) -> i32;

    /// Hit-test a canvas point against the painted area.
    fn contains_point(&self, x: i32, y: i32) -> bool;
}
