//! Marquee is the scrolling-menu and paged-navigation engine of a
//! media-browsing front-end.
//!
//! The moving parts, leaf first:
//!
//! - a circular item window mapping fixed visual slots onto a rotating
//!   subset of a larger collection
//! - a tween/animation engine driving visual properties through named,
//!   event-triggered sequences
//! - a polymorphic visual component (image, video, text, list) with a
//!   strict allocate/update/draw/free lifecycle
//! - the [`menu::ScrollingList`] controller that owns the window and every
//!   navigation algorithm over it
//! - the [`page::Page`] orchestrator composing lists and layered components
//!   into one navigable screen over a stack of collections
//!
//! Rendering, font rasterization, audio and configuration parsing are
//! consumed through the narrow seams in [`providers`].
#![forbid(unsafe_code)]

pub mod animation;
pub mod collection;
pub mod component;
pub mod foundation;
pub mod menu;
pub mod page;
pub mod providers;

pub use animation::ease::Ease;
pub use animation::tween::{Animation, AnimationEvents, AnimationPlayer, Tween, TweenSet, retween};
pub use animation::view::{TweenProperty, ViewState};
pub use collection::{Collection, Item, Playlist};
pub use component::{Component, ComponentBase};
pub use foundation::error::{MarqueeError, MarqueeResult};
pub use foundation::math::{loop_decrement, loop_increment};
pub use menu::{Direction, ScrollingList, ScrollingListOptions};
pub use page::{LAYER_COUNT, MENU_INDEX_HIGH, Page, PageOptions};
pub use providers::{
    AssetProvider, ConfigProvider, DrawCommand, DrawSource, DrawTarget, FontProvider, Settings,
    SoundEffect,
};
