//! Artwork search-path resolution for menu items.
//!
//! The search order is a strict priority list, never a merge: candidate
//! display names outermost, candidate directories within a name, and within
//! one (name, directory) pair a video beats an image and a `… selected`
//! variant beats the plain one when the item is the current selection. The
//! first provider hit wins.

use std::path::{Path, PathBuf};

use crate::collection::Item;
use crate::component::Component;
use crate::providers::AssetProvider;

pub(crate) struct AssetQuery<'a> {
    pub item: &'a Item,
    pub selected: bool,
    pub base_dir: &'a Path,
    pub layout: &'a str,
    /// Active collection name, used for the per-collection tiers.
    pub collection: &'a str,
    pub monitor: usize,
}

/// Display names to try, most specific first: item name, full title, clone
/// target, then type-specific metadata fields.
pub(crate) fn candidate_names(item: &Item) -> Vec<&str> {
    let mut names = vec![item.name.as_str()];
    for extra in [
        item.full_title.as_str(),
        item.clone_of.as_str(),
        item.year.as_str(),
        item.genre.as_str(),
        item.rating.as_str(),
        item.manufacturer.as_str(),
        item.developer.as_str(),
    ] {
        if !extra.is_empty() && !names.contains(&extra) {
            names.push(extra);
        }
    }
    names
}

/// Directories to search, most specific first: layout-specific, layout
/// common, the item's own sub-collection, the active collection, the
/// system-wide pool, then the item's own directory.
pub(crate) fn candidate_dirs(query: &AssetQuery) -> Vec<PathBuf> {
    let layout_images = query
        .base_dir
        .join("layouts")
        .join(query.layout)
        .join("images");

    let mut dirs = vec![
        layout_images.join(query.collection),
        layout_images.join("common"),
    ];

    let sub = &query.item.collection_name;
    if !sub.is_empty() && sub != query.collection {
        dirs.push(query.base_dir.join("collections").join(sub).join("images"));
    }
    dirs.push(
        query
            .base_dir
            .join("collections")
            .join(query.collection)
            .join("images"),
    );
    dirs.push(query.base_dir.join("images"));

    if let Some(parent) = query.item.file_path.parent()
        && !parent.as_os_str().is_empty()
    {
        dirs.push(parent.to_path_buf());
    }
    dirs
}

pub(crate) fn resolve(
    assets: &dyn AssetProvider,
    query: &AssetQuery<'_>,
) -> Option<Box<dyn Component>> {
    let dirs = candidate_dirs(query);
    for name in candidate_names(query.item) {
        let selected_name = query.selected.then(|| format!("{name} selected"));
        for dir in &dirs {
            let mut variants = Vec::with_capacity(2);
            if let Some(sel) = &selected_name {
                variants.push(sel.as_str());
            }
            variants.push(name);

            for variant in &variants {
                if let Some(c) = assets.create_video(dir, variant, query.monitor) {
                    return Some(c);
                }
            }
            for variant in &variants {
                if let Some(c) = assets.create_image(dir, variant, query.monitor, false, true) {
                    return Some(c);
                }
            }
        }
    }
    None
}
