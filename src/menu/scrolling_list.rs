use std::path::PathBuf;
use std::sync::Arc;

use crate::{
    animation::ease::Ease,
    animation::tween::{Animation, AnimationEvents, retween},
    animation::view::ViewState,
    collection::Item,
    component::text::TextComponent,
    component::{Component, ComponentBase},
    foundation::math::{loop_decrement, loop_increment, stable_hash64},
    menu::asset_resolve::{self, AssetQuery},
    providers::{AssetProvider, ConfigProvider, DrawTarget, FontProvider},
};

/// Scroll direction. `Forward` moves deeper into the list (visually, items
/// flow toward the front of the window).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Behavior flags and tuning for one scrolling list, resolved from the
/// configuration provider once at construction.
#[derive(Clone, Debug)]
pub struct ScrollingListOptions {
    pub scroll_period_start: f64,
    pub scroll_period_min: f64,
    pub scroll_acceleration: f64,
    pub scroll_ease: Ease,
    /// `previousLetterSubToCurrent`: decrement jumps refine to the start of
    /// the landing group.
    pub jump_to_group_start: bool,
    pub text_fallback: bool,
    /// Slot holding the current selection.
    pub selected_offset: usize,
    /// Playlist-type lists bind playlists directly instead of item lists.
    pub playlist_menu: bool,
    pub monitor: usize,
    pub layout: String,
    pub base_dir: PathBuf,
}

impl Default for ScrollingListOptions {
    fn default() -> Self {
        Self {
            scroll_period_start: 0.5,
            scroll_period_min: 0.1,
            scroll_acceleration: 0.1,
            scroll_ease: Ease::Linear,
            jump_to_group_start: false,
            text_fallback: false,
            selected_offset: 0,
            playlist_menu: false,
            monitor: 0,
            layout: "default".into(),
            base_dir: PathBuf::new(),
        }
    }
}

impl ScrollingListOptions {
    pub fn from_config(cfg: &dyn ConfigProvider) -> Self {
        let mut opts = Self::default();
        opts.scroll_period_start = cfg.get_f64("scrollPeriodStart", opts.scroll_period_start);
        opts.scroll_period_min = cfg.get_f64("scrollPeriodMin", opts.scroll_period_min);
        opts.scroll_acceleration = cfg.get_f64("scrollAcceleration", opts.scroll_acceleration);
        opts.jump_to_group_start = cfg.get_bool("previousLetterSubToCurrent", false);
        opts.text_fallback = cfg.get_bool("textFallback", false);
        if let Some(layout) = cfg.get_str("layout") {
            opts.layout = layout.to_owned();
        }
        if let Some(dir) = cfg.get_str("baseDir") {
            opts.base_dir = PathBuf::from(dir);
        }
        opts
    }
}

/// Scrolling list controller: owns the circular item window and drives every
/// selection/navigation algorithm over it.
///
/// The window is a fixed array of slots, one per configured scroll point;
/// slot `i` always shows the item at `(item_index + i) mod items.len()`, and
/// slot `selected_offset` is the current selection.
pub struct ScrollingList {
    base: ComponentBase,
    opts: ScrollingListOptions,
    assets: Arc<dyn AssetProvider>,
    fonts: Arc<dyn FontProvider>,
    items: Vec<Arc<Item>>,
    components: Vec<Option<Box<dyn Component>>>,
    scroll_points: Arc<Vec<ViewState>>,
    tween_points: Arc<Vec<Arc<AnimationEvents>>>,
    /// Logical index of slot 0's item.
    item_index: usize,
    scroll_period: f64,
    last_direction: Option<Direction>,
    collection_context: String,
}

impl ScrollingList {
    pub fn new(
        opts: ScrollingListOptions,
        assets: Arc<dyn AssetProvider>,
        fonts: Arc<dyn FontProvider>,
    ) -> Self {
        let scroll_period = opts.scroll_period_start;
        Self {
            base: ComponentBase::default(),
            opts,
            assets,
            fonts,
            items: Vec::new(),
            components: Vec::new(),
            scroll_points: Arc::new(Vec::new()),
            tween_points: Arc::new(Vec::new()),
            item_index: 0,
            scroll_period,
            last_direction: None,
            collection_context: String::new(),
        }
    }

    /// Fresh controller with this one's configuration and points but no
    /// bound items. Used when a page pushes deeper than its declared menus.
    pub fn clone_template(&self) -> Self {
        Self {
            base: ComponentBase::new(self.base.view),
            opts: self.opts.clone(),
            assets: self.assets.clone(),
            fonts: self.fonts.clone(),
            items: Vec::new(),
            components: (0..self.window_size()).map(|_| None).collect(),
            scroll_points: self.scroll_points.clone(),
            tween_points: self.tween_points.clone(),
            item_index: 0,
            scroll_period: self.opts.scroll_period_start,
            last_direction: None,
            collection_context: String::new(),
        }
    }

    pub fn options(&self) -> &ScrollingListOptions {
        &self.opts
    }

    pub fn is_playlist_menu(&self) -> bool {
        self.opts.playlist_menu
    }

    pub fn window_size(&self) -> usize {
        self.scroll_points.len()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Name of the collection whose artwork tiers apply to this list.
    pub fn set_collection_context(&mut self, name: impl Into<String>) {
        self.collection_context = name.into();
    }

    fn selected_offset(&self) -> usize {
        let w = self.window_size();
        if w == 0 { 0 } else { self.opts.selected_offset % w }
    }

    pub fn selected_index(&self) -> usize {
        loop_increment(self.item_index, self.selected_offset(), self.items.len())
    }

    pub fn selected_item(&self) -> Option<Arc<Item>> {
        self.items.get(self.selected_index()).cloned()
    }

    /// Bind a backing ordered item list. The selected-offset slot realigns
    /// with whatever item was selected before (matched by name), so playlist
    /// rebinds keep the cursor stable. Empty lists are a silent no-op.
    pub fn set_items(&mut self, items: &[Arc<Item>]) {
        if items.is_empty() {
            return;
        }
        let previous = self.selected_item();
        let keep = previous
            .and_then(|p| items.iter().position(|i| i.name == p.name))
            .unwrap_or(0);
        self.items = items.to_vec();
        self.item_index = loop_decrement(keep, self.selected_offset(), self.items.len());
        self.deallocate_sprites();
        self.allocate_sprites();
    }

    /// Re-point the selected slot at the given logical index and repopulate.
    pub fn set_selected_index(&mut self, index: usize) {
        let n = self.items.len();
        if n == 0 {
            return;
        }
        self.item_index = loop_decrement(index % n, self.selected_offset(), n);
        self.deallocate_sprites();
        self.allocate_sprites();
    }

    /// (Re)size the window to the scroll points, discarding previous slot
    /// contents, then repopulate from the current logical index. Point and
    /// tween lists must pair up; a mismatch is logged and abandoned.
    pub fn set_points(
        &mut self,
        view_points: Vec<ViewState>,
        tween_points: Vec<Arc<AnimationEvents>>,
    ) {
        if view_points.len() != tween_points.len() {
            tracing::warn!(
                views = view_points.len(),
                tweens = tween_points.len(),
                "scroll point count mismatch; points ignored"
            );
            return;
        }
        self.deallocate_sprites();
        self.components = (0..view_points.len()).map(|_| None).collect();
        self.scroll_points = Arc::new(view_points);
        self.tween_points = Arc::new(tween_points);
        self.allocate_sprites();
    }

    /// Populate every slot from the current logical index.
    pub fn allocate_sprites(&mut self) {
        let n = self.items.len();
        let w = self.window_size();
        if n == 0 || w == 0 {
            return;
        }
        for slot in 0..w {
            if self.components[slot].is_some() {
                continue;
            }
            let item = self.items[loop_increment(self.item_index, slot, n)].clone();
            let selected = slot == self.selected_offset();
            let component = self.make_component(&item, slot, selected);
            self.components[slot] = component;
        }
    }

    /// Free every slot's graphics resources and clear the window.
    pub fn deallocate_sprites(&mut self) {
        for slot in &mut self.components {
            if let Some(mut component) = slot.take() {
                component.free_graphics_memory();
            }
        }
    }

    /// The slot's configured view, routed to this list's monitor.
    fn point_view(&self, slot: usize) -> ViewState {
        let mut view = self.scroll_points[slot];
        view.monitor = self.opts.monitor as f64;
        view
    }

    fn make_component(
        &self,
        item: &Arc<Item>,
        slot: usize,
        selected: bool,
    ) -> Option<Box<dyn Component>> {
        let mut component = self.allocate_texture(item, selected)?;
        component.base_mut().view = self.point_view(slot);
        component
            .base_mut()
            .set_tweens(Some(self.tween_points[slot].clone()));
        component.allocate_graphics_memory();
        Some(component)
    }

    /// Resolve an item's artwork through the strict search-path priority
    /// list, falling back to a text label when enabled.
    fn allocate_texture(&self, item: &Arc<Item>, selected: bool) -> Option<Box<dyn Component>> {
        let query = AssetQuery {
            item,
            selected,
            base_dir: &self.opts.base_dir,
            layout: &self.opts.layout,
            collection: &self.collection_context,
            monitor: self.opts.monitor,
        };
        if let Some(component) = asset_resolve::resolve(self.assets.as_ref(), &query) {
            return Some(component);
        }
        if self.opts.text_fallback {
            return Some(Box::new(TextComponent::new(
                item.title.clone(),
                self.fonts.clone(),
                self.opts.monitor,
            )));
        }
        None
    }

    /// Scroll by one item. The outgoing slot's component is freed and
    /// replaced with the newly revealed item's; every slot starts a
    /// `menuScroll` animation toward its direction-dependent neighbor point;
    /// finally the slot array itself rotates so slot 0 stays the
    /// logically-first visible item.
    pub fn scroll(&mut self, direction: Direction) {
        let n = self.items.len();
        let w = self.window_size();
        if n == 0 || w == 0 {
            return;
        }

        if self.last_direction != Some(direction) {
            self.scroll_period = self.opts.scroll_period_start;
            self.last_direction = Some(direction);
        }
        let period = self.scroll_period;
        // Accelerate the next same-direction scroll, floored at the minimum.
        self.scroll_period = (self.scroll_period - self.opts.scroll_acceleration)
            .max(self.opts.scroll_period_min);

        let (wrap_slot, post_slot) = match direction {
            Direction::Forward => (0, w - 1),
            Direction::Backward => (w - 1, 0),
        };
        let incoming_index = match direction {
            Direction::Forward => loop_increment(self.item_index, w, n),
            Direction::Backward => loop_decrement(self.item_index, 1, n),
        };

        if let Some(mut outgoing) = self.components[wrap_slot].take() {
            outgoing.free_graphics_memory();
        }
        self.item_index = match direction {
            Direction::Forward => loop_increment(self.item_index, 1, n),
            Direction::Backward => loop_decrement(self.item_index, 1, n),
        };

        let incoming = self.items[incoming_index].clone();
        let selected = post_slot == self.selected_offset();
        let component = self.make_component(&incoming, wrap_slot, selected);
        self.components[wrap_slot] = component;

        for slot in 0..w {
            let target = match direction {
                Direction::Forward => loop_decrement(slot, 1, w),
                Direction::Backward => loop_increment(slot, 1, w),
            };
            let target_view = self.point_view(target);
            let Some(component) = self.components[slot].as_mut() else {
                continue;
            };
            let set = retween(
                &component.base().view,
                &target_view,
                period,
                self.opts.scroll_ease,
            );
            component
                .base_mut()
                .start_animation(Arc::new(Animation::single(set)), "menuScroll");
            component
                .base_mut()
                .set_tweens(Some(self.tween_points[target].clone()));
        }

        match direction {
            Direction::Forward => self.components.rotate_left(1),
            Direction::Backward => self.components.rotate_right(1),
        }
    }

    /// Jump by one full window of items; slots repopulate without scroll
    /// animation.
    pub fn page_down(&mut self) {
        self.page_jump(Direction::Forward);
    }

    pub fn page_up(&mut self) {
        self.page_jump(Direction::Backward);
    }

    fn page_jump(&mut self, direction: Direction) {
        let n = self.items.len();
        let w = self.window_size();
        if n == 0 || w == 0 {
            return;
        }
        self.deallocate_sprites();
        self.item_index = match direction {
            Direction::Forward => loop_increment(self.item_index, w, n),
            Direction::Backward => loop_decrement(self.item_index, w, n),
        };
        self.allocate_sprites();
    }

    /// Scrolling halted: the scroll period resets to its start value.
    pub fn halt(&mut self) {
        self.scroll_period = self.opts.scroll_period_start;
        self.last_direction = None;
    }

    /// True exactly once acceleration has driven the period to its floor.
    pub fn is_fast_scrolling(&self) -> bool {
        self.last_direction.is_some() && self.scroll_period <= self.opts.scroll_period_min
    }

    pub fn scroll_period(&self) -> f64 {
        self.scroll_period
    }

    /// Jump to the next/previous first-letter group.
    pub fn letter_change(&mut self, direction: Direction) {
        self.group_jump(direction, |item| item.letter_key().to_string());
    }

    pub fn letter_down(&mut self) {
        self.letter_change(Direction::Forward);
    }

    pub fn letter_up(&mut self) {
        self.letter_change(Direction::Backward);
    }

    /// Jump to the next/previous group under a metadata attribute.
    pub fn meta_change(&mut self, direction: Direction, attribute: &str) {
        self.group_jump(direction, |item| item.meta_value(attribute).to_lowercase());
    }

    /// Jump to the next/previous sub-collection group.
    pub fn sub_change(&mut self, direction: Direction) {
        self.group_jump(direction, |item| item.collection_name.to_lowercase());
    }

    /// Scan from the current selection for the first position whose key
    /// differs. The decrement direction optionally refines to the start of
    /// the landing group; with no group boundary at all, wrap exactly one
    /// slot.
    fn group_jump(&mut self, direction: Direction, key: impl Fn(&Item) -> String) {
        let n = self.items.len();
        if n == 0 {
            return;
        }
        let start = self.selected_index();
        let start_key = key(&self.items[start]);

        let mut boundary = None;
        for k in 1..n {
            let idx = match direction {
                Direction::Forward => loop_increment(start, k, n),
                Direction::Backward => loop_decrement(start, k, n),
            };
            if key(&self.items[idx]) != start_key {
                boundary = Some(idx);
                break;
            }
        }

        let landing = match boundary {
            Some(idx) if direction == Direction::Backward && self.opts.jump_to_group_start => {
                // Second scan: walk back to the first item of the landing
                // group. The increment path intentionally never does this.
                let group_key = key(&self.items[idx]);
                let mut first = idx;
                for k in 1..n {
                    let j = loop_decrement(idx, k, n);
                    if key(&self.items[j]) == group_key {
                        first = j;
                    } else {
                        break;
                    }
                }
                first
            }
            Some(idx) => idx,
            None => match direction {
                Direction::Forward => loop_increment(start, 1, n),
                Direction::Backward => loop_decrement(start, 1, n),
            },
        };
        self.set_selected_index(landing);
    }

    /// Deterministic random jump.
    pub fn random(&mut self, seed: u64) {
        let n = self.items.len();
        if n == 0 {
            return;
        }
        let hash = stable_hash64(seed ^ self.item_index as u64, &self.collection_context);
        self.set_selected_index((hash % n as u64) as usize);
    }

    /// Items currently visible, slot order.
    pub fn visible_items(&self) -> Vec<Arc<Item>> {
        let n = self.items.len();
        (0..self.window_size())
            .filter_map(|slot| self.items.get(loop_increment(self.item_index, slot, n)))
            .cloned()
            .collect()
    }

    /// Draw only the slot components configured on `layer`. The page calls
    /// this once per layer to keep strict global z-order.
    pub fn draw_layer(&mut self, layer: usize, target: &mut dyn DrawTarget) {
        for component in self.components.iter_mut().flatten() {
            if component.base().view.layer_index() == layer {
                component.draw(target);
            }
        }
    }
}

impl Component for ScrollingList {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn allocate_graphics_memory(&mut self) {
        self.allocate_sprites();
    }

    fn free_graphics_memory(&mut self) {
        self.deallocate_sprites();
    }

    fn update(&mut self, dt: f64) -> bool {
        let mut idle = self.base.advance(dt);
        for component in self.components.iter_mut().flatten() {
            idle &= component.update(dt);
        }
        idle
    }

    fn draw(&mut self, target: &mut dyn DrawTarget) {
        for component in self.components.iter_mut().flatten() {
            component.draw(target);
        }
    }

    fn trigger_event(&mut self, event: &str, index: usize) {
        self.base.trigger_event(event, index);
        for component in self.components.iter_mut().flatten() {
            component.trigger_event(event, index);
        }
    }

    fn is_idle(&self) -> bool {
        self.base.is_idle()
            && self
                .components
                .iter()
                .flatten()
                .all(|c| c.is_idle())
    }

    fn is_attract_idle(&self) -> bool {
        self.base.is_attract_idle()
            && self
                .components
                .iter()
                .flatten()
                .all(|c| c.is_attract_idle())
    }
}
