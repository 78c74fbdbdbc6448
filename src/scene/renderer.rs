//! The render collaborator seam.
//!
//! The registry never draws pixels itself. On every repaint it opens a frame,
//! hands each registered payload to the `Renderer` in paint order, and closes
//! the frame. Concrete windowing backends implement this trait; the crate
//! ships two headless ones.

use rustc_hash::FxHashSet;

use super::color::Color;
use super::drawable::DrawableId;
use super::visual::{Visual, VisualKind};

/// Non-fatal problem painting a single drawable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderWarning {
    #[error("asset unavailable for {id}: {asset}")]
    AssetUnavailable { id: DrawableId, asset: String },
}

/// Paints registered drawables into a target surface.
pub trait Renderer {
    /// Start a new frame cleared to `background`.
    fn begin_frame(&mut self, background: Color);

    /// Paint one drawable on top of everything painted so far this frame.
    ///
    /// A failure is reported back as a warning; the frame continues.
    fn paint(&mut self, id: DrawableId, visual: &Visual) -> Result<(), RenderWarning>;

    /// Present the finished frame.
    fn end_frame(&mut self);
}

/// Renderer that draws nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn begin_frame(&mut self, _background: Color) {}

    fn paint(&mut self, _id: DrawableId, _visual: &Visual) -> Result<(), RenderWarning> {
        Ok(())
    }

    fn end_frame(&mut self) {}
}

/// One presented frame as seen by a `RecordingRenderer`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub background: Color,
    /// Drawables painted, bottom first.
    pub painted: Vec<DrawableId>,
}

/// Headless renderer that records every frame's paint order.
///
/// Image assets listed with `with_missing_asset` fail to paint, which is how
/// a backend reports an image that could not be loaded.
#[derive(Clone, Debug, Default)]
pub struct RecordingRenderer {
    frames: Vec<Frame>,
    current: Option<Frame>,
    missing_assets: FxHashSet<String>,
}

impl RecordingRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat an asset name as failing to load.
    #[must_use]
    pub fn with_missing_asset(mut self, asset: impl Into<String>) -> Self {
        self.missing_assets.insert(asset.into());
        self
    }

    /// All presented frames, oldest first.
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Forget recorded frames.
    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl Renderer for RecordingRenderer {
    fn begin_frame(&mut self, background: Color) {
        self.current = Some(Frame {
            background,
            painted: Vec::new(),
        });
    }

    fn paint(&mut self, id: DrawableId, visual: &Visual) -> Result<(), RenderWarning> {
        if let VisualKind::Image { asset } = &visual.kind {
            if self.missing_assets.contains(asset) {
                return Err(RenderWarning::AssetUnavailable {
                    id,
                    asset: asset.clone(),
                });
            }
        }
        if let Some(frame) = self.current.as_mut() {
            frame.painted.push(id);
        }
        Ok(())
    }

    fn end_frame(&mut self) {
        if let Some(frame) = self.current.take() {
            self.frames.push(frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(asset: &str) -> Visual {
        Visual {
            x: 0,
            y: 0,
            width: 10,
            height: 10,
            kind: VisualKind::Image { asset: asset.to_string() },
        }
    }

    #[test]
    fn test_recording_frame() {
        let mut renderer = RecordingRenderer::new();
        renderer.begin_frame(Color::WHITE);
        renderer.paint(DrawableId(1), &image("a.png")).unwrap();
        renderer.paint(DrawableId(2), &image("b.png")).unwrap();
        renderer.end_frame();

        assert_eq!(renderer.frames().len(), 1);
        let frame = renderer.last_frame().unwrap();
        assert_eq!(frame.background, Color::WHITE);
        assert_eq!(frame.painted, vec![DrawableId(1), DrawableId(2)]);
    }

    #[test]
    fn test_missing_asset_warns() {
        let mut renderer = RecordingRenderer::new().with_missing_asset("gone.png");
        renderer.begin_frame(Color::WHITE);

        let result = renderer.paint(DrawableId(3), &image("gone.png"));
        assert_eq!(
            result,
            Err(RenderWarning::AssetUnavailable {
                id: DrawableId(3),
                asset: "gone.png".to_string(),
            })
        );
        renderer.end_frame();
        assert!(renderer.last_frame().unwrap().painted.is_empty());
    }
}
