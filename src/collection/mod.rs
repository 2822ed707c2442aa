//! Logical item collections and playlists.
//!
//! Collections own their items; the window, pages and in-flight animations
//! hold `Arc` handles, so backing storage stays alive until the last holder
//! drops it (the deferred-deletion model). Parsing of on-disk collection and
//! playlist formats happens upstream; this module is the runtime shape only.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Display metadata for one logical entry in a collection.
#[derive(Debug, Default)]
pub struct Item {
    pub name: String,
    pub title: String,
    pub full_title: String,
    pub year: String,
    pub manufacturer: String,
    pub developer: String,
    pub genre: String,
    pub rating: String,
    /// Name of the item this one is a clone of, empty when not a clone.
    pub clone_of: String,
    /// Owning sub-collection name.
    pub collection_name: String,
    pub file_path: PathBuf,
    /// Leaf items launch; non-leaf items descend into a sub-collection.
    pub leaf: bool,
    favorite: AtomicBool,
}

impl Clone for Item {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            title: self.title.clone(),
            full_title: self.full_title.clone(),
            year: self.year.clone(),
            manufacturer: self.manufacturer.clone(),
            developer: self.developer.clone(),
            genre: self.genre.clone(),
            rating: self.rating.clone(),
            clone_of: self.clone_of.clone(),
            collection_name: self.collection_name.clone(),
            file_path: self.file_path.clone(),
            leaf: self.leaf,
            favorite: AtomicBool::new(self.favorite.load(Ordering::Relaxed)),
        }
    }
}

impl Item {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            title: name.clone(),
            full_title: name.clone(),
            name,
            leaf: true,
            ..Self::default()
        }
    }

    pub fn is_favorite(&self) -> bool {
        self.favorite.load(Ordering::Relaxed)
    }

    pub fn set_favorite(&self, favorite: bool) {
        self.favorite.store(favorite, Ordering::Relaxed);
    }

    /// Case-folded first-letter grouping key; anything that does not start
    /// with an ASCII letter groups under `#`.
    pub fn letter_key(&self) -> char {
        match self.title.chars().next() {
            Some(c) if c.is_ascii_alphabetic() => c.to_ascii_uppercase(),
            _ => '#',
        }
    }

    /// Named metadata attribute used by metadata jumps; unknown attributes
    /// resolve to the empty string so every item lands in one group.
    pub fn meta_value(&self, attribute: &str) -> &str {
        match attribute {
            "year" => &self.year,
            "manufacturer" => &self.manufacturer,
            "developer" => &self.developer,
            "genre" => &self.genre,
            "rating" => &self.rating,
            _ => "",
        }
    }
}

/// Named ordered subset of a collection's items.
#[derive(Clone, Debug)]
pub struct Playlist {
    pub name: String,
    pub items: Vec<Arc<Item>>,
}

impl Playlist {
    pub fn new(name: impl Into<String>, items: Vec<Arc<Item>>) -> Self {
        Self {
            name: name.into(),
            items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub const ALL_PLAYLIST: &str = "all";
pub const FAVORITES_PLAYLIST: &str = "favorites";

/// Named, ordered collection of items plus its playlists. Playlist cycle
/// order is list order; the implicit `all` playlist always comes first.
#[derive(Clone, Debug)]
pub struct Collection {
    pub name: String,
    pub items: Vec<Arc<Item>>,
    pub playlists: Vec<Playlist>,
    /// One pseudo-item per playlist, bound by playlist-type menus.
    pub playlist_items: Vec<Arc<Item>>,
}

impl Collection {
    pub fn new(name: impl Into<String>, items: Vec<Arc<Item>>) -> Self {
        let name = name.into();
        let mut collection = Self {
            playlists: vec![Playlist::new(ALL_PLAYLIST, items.clone())],
            playlist_items: Vec::new(),
            name,
            items,
        };
        collection.rebuild_playlist_items();
        collection
    }

    pub fn add_playlist(&mut self, playlist: Playlist) {
        match self.playlist_position(&playlist.name) {
            Some(i) => self.playlists[i] = playlist,
            None => self.playlists.push(playlist),
        }
        self.rebuild_playlist_items();
    }

    pub fn playlist(&self, name: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.name == name)
    }

    pub fn playlist_position(&self, name: &str) -> Option<usize> {
        self.playlists.iter().position(|p| p.name == name)
    }

    /// Rebuild the `favorites` playlist from the items' favorite flags.
    pub fn rebuild_favorites(&mut self) {
        let favorites = self
            .items
            .iter()
            .filter(|item| item.is_favorite())
            .cloned()
            .collect();
        self.add_playlist(Playlist::new(FAVORITES_PLAYLIST, favorites));
    }

    fn rebuild_playlist_items(&mut self) {
        self.playlist_items = self
            .playlists
            .iter()
            .map(|p| {
                let mut item = Item::new(p.name.clone());
                item.collection_name = self.name.clone();
                item.leaf = false;
                Arc::new(item)
            })
            .collect();
    }
}
