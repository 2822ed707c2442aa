use std::sync::Arc;

use kurbo::Rect;

use crate::{
    component::{Component, ComponentBase},
    providers::{DrawCommand, DrawSource, DrawTarget, FontProvider},
};

/// Text label component: the fallback when no image or video asset exists
/// for an item, and the building block of text-only layouts. Metrics come
/// from the font provider; rasterization happens in the renderer.
pub struct TextComponent {
    base: ComponentBase,
    text: String,
    font: Arc<dyn FontProvider>,
    allocated: bool,
}

impl TextComponent {
    pub fn new(text: impl Into<String>, font: Arc<dyn FontProvider>, monitor: usize) -> Self {
        let mut base = ComponentBase::default();
        base.view.monitor = monitor as f64;
        Self {
            base,
            text: text.into(),
            font,
            allocated: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Laid-out text extent at the view's font size, bounded by the view's
    /// max dimensions when set. Characters the font has no glyph for are
    /// skipped, not fatal.
    fn text_rect(&self) -> Rect {
        let view = &self.base.view;
        let text: String = self
            .text
            .chars()
            .filter(|&c| self.font.has_glyph(c))
            .collect();
        let native_height = self.font.height(&text);
        let scale = if view.font_size > 0.0 && native_height > 0.0 {
            view.font_size / native_height
        } else {
            1.0
        };
        let mut w = self.font.width(&text) * scale;
        let mut h = native_height * scale;
        if view.max_size.x > 0.0 {
            w = w.min(view.max_size.x);
        }
        if view.max_size.y > 0.0 {
            h = h.min(view.max_size.y);
        }
        let x0 = view.pos.x + view.offset.x;
        let y0 = view.pos.y + view.offset.y;
        Rect::new(x0, y0, x0 + w, y0 + h)
    }
}

impl Component for TextComponent {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn allocate_graphics_memory(&mut self) {
        self.allocated = true;
    }

    fn free_graphics_memory(&mut self) {
        self.allocated = false;
    }

    fn draw(&mut self, target: &mut dyn DrawTarget) {
        debug_assert!(self.allocated, "drawn while freed");
        if !self.allocated || self.text.is_empty() {
            return;
        }
        let view = &self.base.view;
        target.submit(DrawCommand {
            source: DrawSource::Text(self.text.clone()),
            rect: self.text_rect(),
            angle: view.angle,
            alpha: view.alpha,
            layer: view.layer_index(),
            monitor: view.monitor_index(),
            additive: false,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::view::ViewState;
    use kurbo::Vec2;

    struct FixedFont;

    impl FontProvider for FixedFont {
        fn width(&self, text: &str) -> f64 {
            text.chars().count() as f64 * 8.0
        }

        fn height(&self, _text: &str) -> f64 {
            16.0
        }

        fn ascent(&self, _text: &str) -> f64 {
            12.0
        }
    }

    #[test]
    fn text_rect_scales_to_font_size_and_respects_max() {
        let mut c = TextComponent::new("abcd", Arc::new(FixedFont), 0);
        c.base.view = ViewState {
            font_size: 32.0,
            max_size: Vec2::new(48.0, 0.0),
            ..ViewState::default()
        };
        let rect = c.text_rect();
        // 4 chars * 8px * (32/16) = 64, clamped to 48.
        assert_eq!(rect.width(), 48.0);
        assert_eq!(rect.height(), 32.0);
    }

    #[test]
    fn draw_submits_nothing_while_freed() {
        let mut c = TextComponent::new("abcd", Arc::new(FixedFont), 0);
        let mut commands: Vec<DrawCommand> = Vec::new();
        c.allocate_graphics_memory();
        c.free_graphics_memory();
        // Guarded in release builds; the debug_assert covers debug builds.
        if !cfg!(debug_assertions) {
            c.draw(&mut commands);
            assert!(commands.is_empty());
        }
    }
}
