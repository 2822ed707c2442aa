//! Page orchestration: depth-indexed groups of scrolling lists plus free
//! layered components composed into one navigable screen, over a stack of
//! active collections.
//!
//! Draw walks the fixed layers bottom-to-top and, within a layer, free
//! components then layer-matching slot components from every list, keeping
//! strict global z-order across independently owned groups. Update optionally forks
//! menu and layer-component work into a two-task join (see
//! [`PageOptions::threaded_update`]).

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{
    collection::{Collection, FAVORITES_PLAYLIST, Item},
    component::Component,
    foundation::math::{loop_decrement, loop_increment},
    menu::{Direction, ScrollingList},
    providers::{ConfigProvider, DrawTarget, SoundEffect},
};

/// Fixed number of draw layers.
pub const LAYER_COUNT: usize = 20;

/// Added to the depth index when an event targets the controller at the
/// current depth, so layouts can tell the active menu from background ones.
pub const MENU_INDEX_HIGH: usize = 16;

/// One entry of the collection stack: the bound collection, its playlist
/// cursor, and the per-playlist selection offsets remembered for restores.
struct CollectionFrame {
    collection: Arc<Collection>,
    playlist_index: usize,
    remembered: BTreeMap<String, usize>,
}

impl CollectionFrame {
    fn playlist_name(&self) -> Option<&str> {
        self.collection
            .playlists
            .get(self.playlist_index)
            .map(|p| p.name.as_str())
    }
}

#[derive(Clone, Copy, Debug)]
pub struct PageOptions {
    /// Run menu and layer-component updates as a two-task fork-join. Only
    /// enabled when the graphics backend tolerates a second thread touching
    /// per-frame state; the embedding layer makes that call.
    pub threaded_update: bool,
    /// Declared depth slots; collection pushes beyond this fail.
    pub max_depth: usize,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            threaded_update: false,
            max_depth: 8,
        }
    }
}

impl PageOptions {
    pub fn from_config(cfg: &dyn ConfigProvider, backend_threadsafe: bool) -> Self {
        let defaults = Self::default();
        Self {
            threaded_update: backend_threadsafe && cfg.get_bool("threadedUpdate", false),
            max_depth: cfg.get_usize("menuDepth", defaults.max_depth),
        }
    }
}

pub struct Page {
    options: PageOptions,
    menus: Vec<Vec<ScrollingList>>,
    menu_depth: usize,
    layer_components: Vec<Box<dyn Component>>,
    frames: Vec<CollectionFrame>,
    deleted: Vec<CollectionFrame>,
    selected: Option<Arc<Item>>,
    select_sound: Option<Box<dyn SoundEffect>>,
    highlight_sound: Option<Box<dyn SoundEffect>>,
}

impl Page {
    pub fn new(options: PageOptions) -> Self {
        Self {
            options,
            menus: Vec::new(),
            menu_depth: 0,
            layer_components: Vec::new(),
            frames: Vec::new(),
            deleted: Vec::new(),
            selected: None,
            select_sound: None,
            highlight_sound: None,
        }
    }

    /// Register a scrolling list at a depth slot. Missing intermediate depth
    /// slots are created empty.
    pub fn add_menu(&mut self, depth: usize, list: ScrollingList) {
        while self.menus.len() <= depth {
            self.menus.push(Vec::new());
        }
        self.menus[depth].push(list);
    }

    /// Register a free layered component; its layer comes from its view.
    pub fn add_layer_component(&mut self, component: Box<dyn Component>) {
        self.layer_components.push(component);
    }

    pub fn set_select_sound(&mut self, sound: Box<dyn SoundEffect>) {
        self.select_sound = Some(sound);
    }

    pub fn set_highlight_sound(&mut self, sound: Box<dyn SoundEffect>) {
        self.highlight_sound = Some(sound);
    }

    pub fn depth(&self) -> usize {
        self.menu_depth
    }

    pub fn menu_at(&self, depth: usize, position: usize) -> Option<&ScrollingList> {
        self.menus.get(depth)?.get(position)
    }

    pub fn selected_item(&self) -> Option<Arc<Item>> {
        self.selected.clone()
    }

    /// Name of the active collection's current playlist.
    pub fn current_playlist(&self) -> Option<&str> {
        self.frames.last().and_then(CollectionFrame::playlist_name)
    }

    /// Frames waiting in the deferred-deletion queue.
    pub fn pending_deletion(&self) -> usize {
        self.deleted.len()
    }

    fn active_depth(&self) -> Option<usize> {
        self.menu_depth.checked_sub(1)
    }

    fn active_selected_index(&self) -> Option<usize> {
        let group = self.menus.get(self.active_depth()?)?;
        group
            .iter()
            .find(|l| !l.is_playlist_menu())
            .or_else(|| group.first())
            .map(ScrollingList::selected_index)
    }

    fn refresh_selected(&mut self) {
        self.selected = self.active_depth().and_then(|depth| {
            let group = self.menus.get(depth)?;
            group
                .iter()
                .find(|l| !l.is_playlist_menu())
                .or_else(|| group.first())
                .and_then(ScrollingList::selected_item)
        });
    }

    /// Push a collection onto the stack and bind it at the next depth.
    /// Returns `false` (and leaves state untouched) at the declared depth
    /// bound.
    #[tracing::instrument(skip_all, fields(collection = %collection.name))]
    pub fn push_collection(&mut self, collection: Arc<Collection>) -> bool {
        if self.menu_depth >= self.options.max_depth {
            tracing::warn!(depth = self.menu_depth, "push at depth bound; ignored");
            return false;
        }

        self.remember_active_selection();

        let depth = self.menu_depth;
        if depth >= self.menus.len() && !self.menus.is_empty() {
            // Deeper than declared: clone the prior depth's templates.
            let templates = self
                .menus
                .last()
                .map(|group| group.iter().map(ScrollingList::clone_template).collect())
                .unwrap_or_default();
            self.menus.push(templates);
        }

        self.bind_depth(depth, &collection, 0, None);
        self.frames.push(CollectionFrame {
            collection,
            playlist_index: 0,
            remembered: BTreeMap::new(),
        });
        self.menu_depth += 1;
        self.refresh_selected();
        tracing::debug!(depth = self.menu_depth, "collection pushed");
        true
    }

    /// Pop the top collection frame into the deferred-deletion queue and
    /// restore the prior frame's playlist binding and remembered selection.
    /// A no-op returning `false` when fewer than two frames remain.
    pub fn pop_collection(&mut self) -> bool {
        if self.frames.len() < 2 {
            return false;
        }
        let Some(frame) = self.frames.pop() else {
            return false;
        };
        // The popped frame may still be referenced by in-flight animations
        // and draw state this frame; it is released on the next cleanup.
        self.deleted.push(frame);
        self.menu_depth = self.menu_depth.saturating_sub(1);

        // The popped depth's window no longer shows anything.
        if let Some(group) = self.menus.get_mut(self.menu_depth) {
            for list in group {
                list.deallocate_sprites();
            }
        }

        let Some((collection, playlist_index, restore)) = self.frames.last().map(|prior| {
            let restore = prior
                .playlist_name()
                .and_then(|name| prior.remembered.get(name).copied());
            (prior.collection.clone(), prior.playlist_index, restore)
        }) else {
            return false;
        };

        if let Some(depth) = self.active_depth() {
            self.bind_depth(depth, &collection, playlist_index, restore);
        }
        self.refresh_selected();
        tracing::debug!(depth = self.menu_depth, "collection popped");
        true
    }

    fn remember_active_selection(&mut self) {
        let Some(index) = self.active_selected_index() else {
            return;
        };
        if let Some(frame) = self.frames.last_mut()
            && let Some(name) = frame
                .collection
                .playlists
                .get(frame.playlist_index)
                .map(|p| p.name.clone())
        {
            frame.remembered.insert(name, index);
        }
    }

    fn bind_depth(
        &mut self,
        depth: usize,
        collection: &Arc<Collection>,
        playlist_index: usize,
        restore: Option<usize>,
    ) {
        let Some(group) = self.menus.get_mut(depth) else {
            return;
        };
        let playlist = collection.playlists.get(playlist_index);
        for list in group {
            list.set_collection_context(collection.name.clone());
            if list.is_playlist_menu() {
                list.set_items(&collection.playlist_items);
                list.set_selected_index(playlist_index);
            } else {
                match playlist {
                    // Non-playlist lists take the playlist's items; when the
                    // target does not apply they keep the full item list.
                    Some(p) if !p.is_empty() => list.set_items(&p.items),
                    _ => list.set_items(&collection.items),
                }
                if let Some(index) = restore {
                    list.set_selected_index(index);
                }
            }
        }
    }

    /// Advance the playlist cursor circularly, skipping empty playlists.
    pub fn next_playlist(&mut self) {
        self.change_playlist(Direction::Forward);
    }

    pub fn prev_playlist(&mut self) {
        self.change_playlist(Direction::Backward);
    }

    fn change_playlist(&mut self, direction: Direction) {
        let Some(frame) = self.frames.last() else {
            return;
        };
        let count = frame.collection.playlists.len();
        if count == 0 {
            return;
        }
        let mut index = frame.playlist_index;
        let mut target = None;
        for _ in 1..=count {
            index = match direction {
                Direction::Forward => loop_increment(index, 1, count),
                Direction::Backward => loop_decrement(index, 1, count),
            };
            if index == frame.playlist_index {
                break;
            }
            if frame
                .collection
                .playlists
                .get(index)
                .is_some_and(|p| !p.is_empty())
            {
                target = Some(index);
                break;
            }
        }
        if let Some(index) = target {
            self.apply_playlist(index);
        }
    }

    /// Jump straight to a named playlist; absent or empty targets no-op.
    pub fn select_playlist(&mut self, name: &str) {
        let Some(frame) = self.frames.last() else {
            return;
        };
        let Some(index) = frame.collection.playlist_position(name) else {
            return;
        };
        if frame.collection.playlists[index].is_empty() {
            return;
        }
        if index != frame.playlist_index {
            self.apply_playlist(index);
        }
    }

    /// Advance among a configured playlist cycle, skipping names that do not
    /// resolve to a non-empty playlist.
    pub fn cycle_playlist(&mut self, cycle: &[String], direction: Direction) {
        let Some(frame) = self.frames.last() else {
            return;
        };
        if cycle.is_empty() {
            return;
        }
        let current = frame.playlist_name().unwrap_or_default().to_owned();
        let start = cycle.iter().position(|n| *n == current).unwrap_or(0);
        let mut position = start;
        let mut chosen = None;
        for _ in 1..=cycle.len() {
            position = match direction {
                Direction::Forward => loop_increment(position, 1, cycle.len()),
                Direction::Backward => loop_decrement(position, 1, cycle.len()),
            };
            let name = &cycle[position];
            if *name != current
                && frame
                    .collection
                    .playlist(name)
                    .is_some_and(|p| !p.is_empty())
            {
                chosen = Some(name.clone());
                break;
            }
        }
        if let Some(name) = chosen {
            self.select_playlist(&name);
        }
    }

    fn apply_playlist(&mut self, target: usize) {
        self.remember_active_selection();
        let Some((collection, restore)) = self.frames.last_mut().map(|frame| {
            frame.playlist_index = target;
            let restore = frame
                .collection
                .playlists
                .get(target)
                .and_then(|p| frame.remembered.get(&p.name).copied());
            (frame.collection.clone(), restore)
        }) else {
            return;
        };
        if let Some(depth) = self.active_depth() {
            self.bind_depth(depth, &collection, target, restore);
        }
        self.on_new_item_selected();
    }

    /// Toggle the selected item's favorite flag and rebuild the collection's
    /// favorites playlist; rebinds when the favorites playlist is active.
    pub fn favorite_item(&mut self) {
        let Some(selected) = self.selected.clone() else {
            return;
        };
        selected.set_favorite(!selected.is_favorite());
        let Some(frame) = self.frames.last_mut() else {
            return;
        };
        Arc::make_mut(&mut frame.collection).rebuild_favorites();
        let on_favorites = frame.playlist_name() == Some(FAVORITES_PLAYLIST);
        let index = frame.playlist_index;
        if on_favorites {
            self.apply_playlist(index);
        }
    }

    /// Broadcast a named event to every controller at every depth and every
    /// layered component. The active depth's controllers get their index
    /// tagged with [`MENU_INDEX_HIGH`].
    pub fn trigger_event_on_all_menus(&mut self, event: &str) {
        let active = self.active_depth();
        for (depth, group) in self.menus.iter_mut().enumerate() {
            let index = if Some(depth) == active {
                depth + MENU_INDEX_HIGH
            } else {
                depth
            };
            for list in group {
                Component::trigger_event(list, event, index);
            }
        }
        let index = active.unwrap_or(0);
        for component in &mut self.layer_components {
            component.trigger_event(event, index);
        }
    }

    fn for_active_menus(&mut self, mut f: impl FnMut(&mut ScrollingList)) {
        if let Some(depth) = self.active_depth()
            && let Some(group) = self.menus.get_mut(depth)
        {
            for list in group {
                f(list);
            }
        }
    }

    pub fn scroll(&mut self, direction: Direction) {
        self.for_active_menus(|list| list.scroll(direction));
        self.on_new_item_selected();
    }

    pub fn page_up(&mut self) {
        self.for_active_menus(ScrollingList::page_up);
        self.on_new_item_selected();
    }

    pub fn page_down(&mut self) {
        self.for_active_menus(ScrollingList::page_down);
        self.on_new_item_selected();
    }

    pub fn letter_change(&mut self, direction: Direction) {
        self.for_active_menus(|list| list.letter_change(direction));
        self.on_new_item_selected();
    }

    pub fn meta_change(&mut self, direction: Direction, attribute: &str) {
        self.for_active_menus(|list| list.meta_change(direction, attribute));
        self.on_new_item_selected();
    }

    pub fn sub_change(&mut self, direction: Direction) {
        self.for_active_menus(|list| list.sub_change(direction));
        self.on_new_item_selected();
    }

    pub fn random_item(&mut self, seed: u64) {
        self.for_active_menus(|list| list.random(seed));
        self.on_new_item_selected();
    }

    /// Scrolling input released.
    pub fn halt_scroll(&mut self) {
        self.for_active_menus(ScrollingList::halt);
    }

    fn on_new_item_selected(&mut self) {
        self.refresh_selected();
        if let Some(sound) = &mut self.highlight_sound {
            sound.play();
        }
    }

    /// Confirm the current selection; fire-and-forget select sound.
    pub fn select(&mut self) -> Option<Arc<Item>> {
        if let Some(sound) = &mut self.select_sound {
            sound.play();
        }
        self.selected.clone()
    }

    /// Attract mode: broadcast the attract event and random-jump the active
    /// menus.
    pub fn attract(&mut self, seed: u64) {
        self.trigger_event_on_all_menus("attract");
        self.for_active_menus(|list| list.random(seed));
        self.refresh_selected();
    }

    /// Allocate all graphics resources and announce the page.
    pub fn start(&mut self) {
        for component in &mut self.layer_components {
            component.allocate_graphics_memory();
        }
        for group in &mut self.menus {
            for list in group {
                list.allocate_sprites();
            }
        }
        for sound in [&mut self.select_sound, &mut self.highlight_sound]
            .into_iter()
            .flatten()
        {
            sound.allocate();
        }
        self.trigger_event_on_all_menus("enter");
    }

    /// Announce teardown; graphics stay allocated until
    /// [`Page::free_graphics_memory`] so exit animations can finish drawing.
    pub fn stop(&mut self) {
        self.trigger_event_on_all_menus("exit");
    }

    pub fn free_graphics_memory(&mut self) {
        for component in &mut self.layer_components {
            component.free_graphics_memory();
        }
        for group in &mut self.menus {
            for list in group {
                list.deallocate_sprites();
            }
        }
        for sound in [&mut self.select_sound, &mut self.highlight_sound]
            .into_iter()
            .flatten()
        {
            sound.free();
        }
    }

    /// Per-frame logic update. With threaded update enabled, menu updates
    /// and layer-component updates run as a two-task fork-join; both
    /// partitions are disjoint and joined before this returns, so draw never
    /// overlaps an update. Returns the page's idle state.
    pub fn update(&mut self, dt: f64) -> bool {
        let threaded = self.options.threaded_update;
        let menus = &mut self.menus;
        let layers = &mut self.layer_components;

        let update_menus = |menus: &mut Vec<Vec<ScrollingList>>| {
            let mut idle = true;
            for group in menus.iter_mut() {
                for list in group {
                    idle &= Component::update(list, dt);
                }
            }
            idle
        };
        let update_layers = |layers: &mut Vec<Box<dyn Component>>| {
            let mut idle = true;
            for component in layers.iter_mut() {
                idle &= component.update(dt);
            }
            idle
        };

        let (menus_idle, layers_idle) = if threaded {
            rayon::join(|| update_menus(menus), || update_layers(layers))
        } else {
            (update_menus(menus), update_layers(layers))
        };

        self.cleanup();
        menus_idle && layers_idle
    }

    /// Release frames marked for deferred deletion. Idempotent; safe to call
    /// every frame.
    pub fn cleanup(&mut self) {
        if self.deleted.is_empty() {
            return;
        }
        tracing::debug!(count = self.deleted.len(), "released deferred frames");
        self.deleted.clear();
    }

    /// Draw layers bottom-to-top; within a layer, free components first,
    /// then layer-matching slot components from every list.
    pub fn draw(&mut self, target: &mut dyn DrawTarget) {
        for layer in 0..LAYER_COUNT {
            for component in &mut self.layer_components {
                if component.base().view.layer_index() == layer {
                    component.draw(target);
                }
            }
            for group in &mut self.menus {
                for list in group {
                    list.draw_layer(layer, target);
                }
            }
        }
    }

    pub fn is_idle(&self) -> bool {
        self.menus
            .iter()
            .flatten()
            .all(|l| Component::is_idle(l))
            && self.layer_components.iter().all(|c| c.is_idle())
    }

    pub fn is_attract_idle(&self) -> bool {
        self.menus
            .iter()
            .flatten()
            .all(|l| Component::is_attract_idle(l))
            && self.layer_components.iter().all(|c| c.is_attract_idle())
    }
}
