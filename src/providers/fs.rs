use std::path::Path;

use crate::component::Component;
use crate::component::image::ImageComponent;
use crate::providers::AssetProvider;

/// Filesystem-backed asset provider used by tests and demos. Images resolve
/// by probing `<dir>/<name>.<ext>` across the configured extensions; videos
/// always decline, since constructing a playback backend is the embedding
/// layer's job.
#[derive(Clone, Debug)]
pub struct FsAssetProvider {
    extensions: Vec<String>,
}

impl Default for FsAssetProvider {
    fn default() -> Self {
        Self {
            extensions: ["png", "jpg"].map(String::from).to_vec(),
        }
    }
}

impl FsAssetProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extensions(extensions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }
}

impl AssetProvider for FsAssetProvider {
    fn create_image(
        &self,
        dir: &Path,
        name: &str,
        monitor: usize,
        additive: bool,
        cached: bool,
    ) -> Option<Box<dyn Component>> {
        for ext in &self.extensions {
            let path = dir.join(format!("{name}.{ext}"));
            if path.is_file() {
                return Some(Box::new(ImageComponent::new(path, monitor, additive, cached)));
            }
        }
        None
    }

    fn create_video(&self, _dir: &Path, _name: &str, _monitor: usize) -> Option<Box<dyn Component>> {
        None
    }
}
