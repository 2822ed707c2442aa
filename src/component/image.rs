use std::path::PathBuf;

use kurbo::Vec2;

use crate::{
    component::{Component, ComponentBase},
    providers::{DrawCommand, DrawSource, DrawTarget},
};

/// Texture-backed component. The file stays on disk until
/// `allocate_graphics_memory`, which probes its dimensions; upload happens in
/// the renderer when the draw command is consumed.
#[derive(Debug)]
pub struct ImageComponent {
    base: ComponentBase,
    path: PathBuf,
    additive: bool,
    cached: bool,
    natural_size: Option<Vec2>,
    allocated: bool,
}

impl ImageComponent {
    pub fn new(path: PathBuf, monitor: usize, additive: bool, cached: bool) -> Self {
        let mut base = ComponentBase::default();
        base.view.monitor = monitor as f64;
        Self {
            base,
            path,
            additive,
            cached,
            natural_size: None,
            allocated: false,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    pub fn is_additive(&self) -> bool {
        self.additive
    }
}

impl Component for ImageComponent {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn allocate_graphics_memory(&mut self) {
        if self.allocated && self.cached {
            return;
        }
        match image::image_dimensions(&self.path) {
            Ok((w, h)) => {
                let natural = Vec2::new(f64::from(w), f64::from(h));
                self.natural_size = Some(natural);
                if self.base.view.size == Vec2::ZERO {
                    self.base.view.size = natural;
                }
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "image probe failed");
                self.natural_size = None;
            }
        }
        self.allocated = true;
    }

    fn free_graphics_memory(&mut self) {
        self.allocated = false;
        if !self.cached {
            self.natural_size = None;
        }
    }

    fn draw(&mut self, target: &mut dyn DrawTarget) {
        debug_assert!(self.allocated, "drawn while freed");
        if !self.allocated || self.natural_size.is_none() {
            return;
        }
        let view = &self.base.view;
        target.submit(DrawCommand {
            source: DrawSource::Texture(self.path.clone()),
            rect: view.draw_rect(),
            angle: view.angle,
            alpha: view.alpha,
            layer: view.layer_index(),
            monitor: view.monitor_index(),
            additive: self.additive,
        });
    }
}
