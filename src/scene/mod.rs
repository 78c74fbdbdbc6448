//! Scene registry, drawables and the render collaborator seam.
//!
//! ## Design Philosophy
//!
//! Each session owns one `Scene`; there is no process-wide canvas. Drawables
//! carry a `DrawableId` and register a `Visual` payload with the scene when
//! shown. The scene decides paint order and when frames are painted; the
//! `Renderer` only turns payloads into pixels.

mod color;
mod drawable;
mod registry;
mod renderer;
mod shape;
mod visual;

pub use color::{Color, ColorError};
pub use drawable::{Drawable, DrawableId};
pub use registry::Scene;
pub use renderer::{Frame, NullRenderer, RecordingRenderer, RenderWarning, Renderer};
pub use shape::{Shape, NUDGE};
pub use visual::{Visual, VisualKind};
