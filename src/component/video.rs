use std::path::PathBuf;

use kurbo::Vec2;

use crate::{
    component::{Component, ComponentBase},
    providers::{DrawCommand, DrawSource, DrawTarget},
};

/// Playback backend for one video stream. Decoding and frame upload live
/// beyond this seam; the component only steers playback state and volume.
pub trait VideoPlayer: Send {
    fn play(&mut self);
    fn stop(&mut self);
    fn is_playing(&self) -> bool;
    fn set_volume(&mut self, volume: f64);
    fn update(&mut self, dt: f64);
    fn natural_size(&self) -> Vec2;
}

/// Video-backed component. Playback starts on allocate and stops on free;
/// volume follows the tweened view volume every frame.
pub struct VideoComponent {
    base: ComponentBase,
    path: PathBuf,
    player: Box<dyn VideoPlayer>,
    allocated: bool,
}

impl VideoComponent {
    pub fn new(path: PathBuf, monitor: usize, player: Box<dyn VideoPlayer>) -> Self {
        let mut base = ComponentBase::default();
        base.view.monitor = monitor as f64;
        Self {
            base,
            path,
            player,
            allocated: false,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Component for VideoComponent {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn allocate_graphics_memory(&mut self) {
        if self.base.view.size == Vec2::ZERO {
            self.base.view.size = self.player.natural_size();
        }
        self.player.play();
        self.allocated = true;
    }

    fn free_graphics_memory(&mut self) {
        self.player.stop();
        self.allocated = false;
    }

    fn update(&mut self, dt: f64) -> bool {
        let idle = self.base.advance(dt);
        self.player.set_volume(self.base.view.volume.clamp(0.0, 1.0));
        self.player.update(dt);
        idle
    }

    fn draw(&mut self, target: &mut dyn DrawTarget) {
        debug_assert!(self.allocated, "drawn while freed");
        if !self.allocated {
            return;
        }
        let view = &self.base.view;
        target.submit(DrawCommand {
            source: DrawSource::Video(self.path.clone()),
            rect: view.draw_rect(),
            angle: view.angle,
            alpha: view.alpha,
            layer: view.layer_index(),
            monitor: view.monitor_index(),
            additive: false,
        });
    }
}
