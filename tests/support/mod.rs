#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use kurbo::Vec2;
use marquee::component::video::{VideoComponent, VideoPlayer};
use marquee::{
    AnimationEvents, AssetProvider, Component, FontProvider, Item, ScrollingList,
    ScrollingListOptions, ViewState,
};

pub fn init_tracing() {
    tracing_subscriber::fmt().with_test_writer().try_init().ok();
}

pub fn temp_dir(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "marquee_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

pub fn items(names: &[&str]) -> Vec<Arc<Item>> {
    names.iter().map(|n| Arc::new(Item::new(*n))).collect()
}

/// Asset provider that never resolves anything; lists fall back to text.
pub struct NoAssets;

impl AssetProvider for NoAssets {
    fn create_image(
        &self,
        _dir: &Path,
        _name: &str,
        _monitor: usize,
        _additive: bool,
        _cached: bool,
    ) -> Option<Box<dyn Component>> {
        None
    }

    fn create_video(&self, _dir: &Path, _name: &str, _monitor: usize) -> Option<Box<dyn Component>> {
        None
    }
}

/// Fixed-metrics font: 8px advance per char, 16px line height.
pub struct FixedFont;

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

/// Inert playback backend for video-component tests.
pub struct StubPlayer {
    playing: bool,
}

impl StubPlayer {
    pub fn new() -> Self {
        Self { playing: false }
    }
}

impl VideoPlayer for StubPlayer {
    fn play(&mut self) {
        self.playing = true;
    }

    fn stop(&mut self) {
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn set_volume(&mut self, _volume: f64) {}

    fn update(&mut self, _dt: f64) {}

    fn natural_size(&self) -> Vec2 {
        Vec2::new(320.0, 240.0)
    }
}

/// Provider that answers video requests for the given names and declines
/// everything else; used to check video-over-image priority.
pub struct VideoAssets {
    pub video_names: Vec<String>,
}

impl AssetProvider for VideoAssets {
    fn create_image(
        &self,
        dir: &Path,
        name: &str,
        monitor: usize,
        _additive: bool,
        _cached: bool,
    ) -> Option<Box<dyn Component>> {
        // Every image request "succeeds" so video priority is observable.
        let _ = dir;
        Some(Box::new(marquee::component::text::TextComponent::new(
            format!("image:{name}"),
            Arc::new(FixedFont),
            monitor,
        )))
    }

    fn create_video(&self, dir: &Path, name: &str, monitor: usize) -> Option<Box<dyn Component>> {
        let _ = dir;
        if self.video_names.iter().any(|n| n == name) {
            Some(Box::new(VideoComponent::new(
                std::path::PathBuf::from(format!("{name}.mp4")),
                monitor,
                Box::new(StubPlayer::new()),
            )))
        } else {
            None
        }
    }
}

/// Sound stub counting `play` calls.
pub struct CountingSound {
    pub plays: Arc<std::sync::atomic::AtomicUsize>,
}

impl marquee::SoundEffect for CountingSound {
    fn play(&mut self) {
        self.plays.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
    }

    fn is_playing(&self) -> bool {
        false
    }

    fn allocate(&mut self) {}

    fn free(&mut self) {}
}

/// Text-fallback scrolling list with `window` identical scroll points.
pub fn text_list(window: usize, opts: ScrollingListOptions) -> ScrollingList {
    let mut list = ScrollingList::new(
        ScrollingListOptions {
            text_fallback: true,
            ..opts
        },
        Arc::new(NoAssets),
        Arc::new(FixedFont),
    );
    list.set_points(
        vec![ViewState::default(); window],
        vec![Arc::new(AnimationEvents::new()); window],
    );
    list
}
