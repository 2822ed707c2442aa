//! Polymorphic drawable unit: image, video, text, and the scrolling list
//! itself all satisfy [`Component`]. Shared state (view, named event
//! animations, the running player) lives in [`ComponentBase`]; variants embed
//! it and implement only their resource lifecycle and draw.

pub mod image;
pub mod text;
pub mod video;

use std::sync::Arc;

use crate::{
    animation::tween::{Animation, AnimationEvents, AnimationPlayer},
    animation::view::ViewState,
    providers::DrawTarget,
};

/// Capability set shared by every drawable unit.
///
/// Lifecycle is strictly `allocate_graphics_memory` → `[update/draw]*` →
/// `free_graphics_memory`; a component is never drawn while freed. `update`
/// returns `true` only when the component has no running, non-looping
/// animation. Components are `Send` so page update can fork across threads.
pub trait Component: Send {
    fn base(&self) -> &ComponentBase;

    fn base_mut(&mut self) -> &mut ComponentBase;

    fn allocate_graphics_memory(&mut self);

    fn free_graphics_memory(&mut self);

    fn draw(&mut self, target: &mut dyn DrawTarget);

    fn update(&mut self, dt: f64) -> bool {
        self.base_mut().advance(dt)
    }

    fn trigger_event(&mut self, event: &str, index: usize) {
        self.base_mut().trigger_event(event, index);
    }

    fn is_idle(&self) -> bool {
        self.base().is_idle()
    }

    fn is_attract_idle(&self) -> bool {
        self.base().is_attract_idle()
    }

    fn view(&self) -> &ViewState {
        &self.base().view
    }

    fn view_mut(&mut self) -> &mut ViewState {
        &mut self.base_mut().view
    }
}

/// Shared component state: current view, the slot's named event animations,
/// and the animation currently playing.
#[derive(Clone, Debug, Default)]
pub struct ComponentBase {
    pub view: ViewState,
    /// Index passed with the last triggered event; pages tag the active
    /// menu's index with a high marker.
    pub menu_index: usize,
    tweens: Option<Arc<AnimationEvents>>,
    active: Option<AnimationPlayer>,
    active_event: Option<String>,
}

impl ComponentBase {
    pub fn new(view: ViewState) -> Self {
        Self {
            view,
            ..Self::default()
        }
    }

    /// Install this slot's named event-animation bundle.
    pub fn set_tweens(&mut self, tweens: Option<Arc<AnimationEvents>>) {
        self.tweens = tweens;
    }

    /// Start the animation registered for `event`, if any. Unknown events
    /// are ignored so layouts can define only the events they care about.
    pub fn trigger_event(&mut self, event: &str, index: usize) {
        self.menu_index = index;
        let Some(animation) = self.tweens.as_ref().and_then(|t| t.get(event)) else {
            return;
        };
        self.active = Some(AnimationPlayer::new(animation.clone()));
        self.active_event = Some(event.to_owned());
    }

    /// Start an animation directly, bypassing the event map. Used by the
    /// scrolling list's re-tweening on navigation.
    pub fn start_animation(&mut self, animation: Arc<Animation>, event: &str) {
        self.active = Some(AnimationPlayer::new(animation));
        self.active_event = Some(event.to_owned());
    }

    /// Advance the running animation and write its sampled values into the
    /// view. Returns the idle state after advancing.
    pub fn advance(&mut self, dt: f64) -> bool {
        if let Some(player) = &mut self.active {
            let done = player.advance(dt);
            player.apply(&mut self.view);
            if done {
                self.active = None;
                self.active_event = None;
            }
        }
        self.is_idle()
    }

    /// Idle when nothing is running, or only a looping animation is.
    pub fn is_idle(&self) -> bool {
        match &self.active {
            None => true,
            Some(player) => player.is_looping(),
        }
    }

    /// Attract-idle additionally tolerates a running attract animation, so
    /// attract mode can chain transitions without waiting on itself.
    pub fn is_attract_idle(&self) -> bool {
        self.is_idle()
            || self
                .active_event
                .as_deref()
                .is_some_and(|e| e.starts_with("attract"))
    }

    pub fn active_event(&self) -> Option<&str> {
        self.active_event.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::ease::Ease;
    use crate::animation::tween::{Tween, TweenSet};
    use crate::animation::view::TweenProperty;
    use std::collections::BTreeMap;

    fn fade_out(duration: f64) -> Arc<Animation> {
        let set: TweenSet = [Tween::new(TweenProperty::Alpha, Ease::Linear, 1.0, 0.0, duration)]
            .into_iter()
            .collect();
        Arc::new(Animation::single(set))
    }

    #[test]
    fn trigger_event_starts_only_known_events() {
        let mut events: AnimationEvents = BTreeMap::new();
        events.insert("exit".into(), fade_out(1.0));

        let mut base = ComponentBase::new(ViewState::default());
        base.set_tweens(Some(Arc::new(events)));

        base.trigger_event("enter", 0);
        assert!(base.is_idle());

        base.trigger_event("exit", 3);
        assert!(!base.is_idle());
        assert_eq!(base.menu_index, 3);
        assert_eq!(base.active_event(), Some("exit"));
    }

    #[test]
    fn advance_applies_and_clears_on_done() {
        let mut base = ComponentBase::new(ViewState::default());
        base.start_animation(fade_out(1.0), "menuScroll");

        assert!(!base.advance(0.5));
        assert_eq!(base.view.alpha, 0.5);

        assert!(base.advance(0.5));
        assert_eq!(base.view.alpha, 0.0);
        assert!(base.is_idle());
        assert_eq!(base.active_event(), None);
    }

    #[test]
    fn attract_event_counts_as_attract_idle() {
        let mut base = ComponentBase::new(ViewState::default());
        base.start_animation(fade_out(5.0), "attractScroll");
        assert!(!base.is_idle());
        assert!(base.is_attract_idle());
    }
}
