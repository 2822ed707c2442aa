//! Collaborator seams. Everything the engine consumes from the outside world
//! (textures, video players, font metrics, configuration, sound) comes
//! through these traits, and everything it produces for the renderer goes
//! out through [`DrawTarget`]. Creation failure is always a `None`, never a
//! panic; the navigation hot path recovers through its fallback chain.

pub mod fs;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use kurbo::Rect;

use crate::component::Component;
use crate::foundation::error::{MarqueeError, MarqueeResult};

/// Creates drawable components from resolved asset paths. Path and name
/// resolution (search order, variants) is the scrolling list's job; the
/// provider only turns one candidate into a component, or declines.
pub trait AssetProvider: Send + Sync {
    fn create_image(
        &self,
        dir: &Path,
        name: &str,
        monitor: usize,
        additive: bool,
        cached: bool,
    ) -> Option<Box<dyn Component>>;

    fn create_video(&self, dir: &Path, name: &str, monitor: usize) -> Option<Box<dyn Component>>;
}

/// Pixel metrics for laid-out text. Rasterization and glyph atlases live
/// behind this seam; a missing glyph is skippable, not fatal.
pub trait FontProvider: Send + Sync {
    fn width(&self, text: &str) -> f64;
    fn height(&self, text: &str) -> f64;
    fn ascent(&self, text: &str) -> f64;

    fn has_glyph(&self, _ch: char) -> bool {
        true
    }
}

/// Fire-and-forget sound chunk. The core never consults a return value.
pub trait SoundEffect: Send {
    fn play(&mut self);
    fn is_playing(&self) -> bool;
    fn allocate(&mut self);
    fn free(&mut self);
}

/// Where a draw command's pixels come from; upload/decoding happens beyond
/// the seam.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawSource {
    Texture(PathBuf),
    Video(PathBuf),
    Text(String),
}

/// One quad submitted to the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawCommand {
    pub source: DrawSource,
    pub rect: Rect,
    pub angle: f64,
    pub alpha: f64,
    pub layer: usize,
    pub monitor: usize,
    /// Additive blending instead of alpha blending.
    pub additive: bool,
}

/// Draw-list sink. The page walks layers bottom-to-top and submits in strict
/// z-order; the backend may batch however it likes.
pub trait DrawTarget {
    fn submit(&mut self, command: DrawCommand);
}

impl DrawTarget for Vec<DrawCommand> {
    fn submit(&mut self, command: DrawCommand) {
        self.push(command);
    }
}

/// Key/value behavior flags and tuning knobs.
pub trait ConfigProvider {
    fn property(&self, key: &str) -> Option<&serde_json::Value>;

    fn get_str(&self, key: &str) -> Option<&str> {
        self.property(key)?.as_str()
    }

    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.property(key).and_then(|v| v.as_bool()).unwrap_or(default)
    }

    fn get_f64(&self, key: &str, default: f64) -> f64 {
        self.property(key).and_then(|v| v.as_f64()).unwrap_or(default)
    }

    fn get_usize(&self, key: &str, default: usize) -> usize {
        self.property(key)
            .and_then(|v| v.as_u64())
            .map(|v| v as usize)
            .unwrap_or(default)
    }
}

/// JSON-backed [`ConfigProvider`].
#[derive(Clone, Debug, Default)]
pub struct Settings {
    values: BTreeMap<String, serde_json::Value>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> MarqueeResult<Self> {
        let values: BTreeMap<String, serde_json::Value> = serde_json::from_str(json)
            .map_err(|e| MarqueeError::config(format!("settings must be a JSON object: {e}")))?;
        Ok(Self { values })
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.values.insert(key.into(), value.into());
    }
}

impl ConfigProvider for Settings {
    fn property(&self, key: &str) -> Option<&serde_json::Value> {
        self.values.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_round_trip_json() {
        let s = Settings::from_json(r#"{"scrollPeriodStart": 0.5, "textFallback": true}"#).unwrap();
        assert_eq!(s.get_f64("scrollPeriodStart", 0.0), 0.5);
        assert!(s.get_bool("textFallback", false));
        assert!(!s.get_bool("absent", false));
    }

    #[test]
    fn settings_rejects_non_object() {
        assert!(Settings::from_json("[1,2]").is_err());
    }

    #[test]
    fn typed_helpers_fall_back_on_type_mismatch() {
        let mut s = Settings::new();
        s.set("layout", "arcade");
        assert_eq!(s.get_str("layout"), Some("arcade"));
        assert_eq!(s.get_f64("layout", 2.0), 2.0);
    }
}
