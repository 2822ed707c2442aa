use std::collections::BTreeMap;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::{
    animation::ease::Ease,
    animation::view::{TweenProperty, ViewState},
    foundation::error::{MarqueeError, MarqueeResult},
};

/// Interpolator for one numeric property: pure function of elapsed time.
///
/// At `elapsed = 0` the sample is `start`; at `elapsed >= duration` it is
/// `end`. A zero duration snaps to `end` immediately.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tween {
    pub property: TweenProperty,
    pub ease: Ease,
    pub start: f64,
    pub end: f64,
    /// Seconds.
    pub duration: f64,
}

impl Tween {
    pub fn new(property: TweenProperty, ease: Ease, start: f64, end: f64, duration: f64) -> Self {
        Self {
            property,
            ease,
            start,
            end,
            duration,
        }
    }

    pub fn sample(&self, elapsed: f64) -> f64 {
        if self.duration <= 0.0 || elapsed >= self.duration {
            return self.end;
        }
        let t = (elapsed / self.duration).clamp(0.0, 1.0);
        self.start + (self.end - self.start) * self.ease.apply(t)
    }

    pub fn is_complete(&self, elapsed: f64) -> bool {
        self.duration <= 0.0 || elapsed >= self.duration
    }
}

/// Unordered bag of tweens sharing one start time. The set is complete when
/// its longest member is.
#[derive(Clone, Debug, Default)]
pub struct TweenSet {
    pub tweens: SmallVec<[Tween; 8]>,
}

impl TweenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tween: Tween) {
        self.tweens.push(tween);
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn duration(&self) -> f64 {
        self.tweens
            .iter()
            .map(|t| t.duration.max(0.0))
            .fold(0.0, f64::max)
    }
}

impl FromIterator<Tween> for TweenSet {
    fn from_iter<I: IntoIterator<Item = Tween>>(iter: I) -> Self {
        Self {
            tweens: iter.into_iter().collect(),
        }
    }
}

/// Ordered sequence of tween sets played FIFO, each set fully completing
/// before the next starts. An animation with no sets is immediately done.
#[derive(Clone, Debug, Default)]
pub struct Animation {
    pub sets: Vec<TweenSet>,
    /// A looping animation restarts from the first set and never reports done.
    pub looping: bool,
}

impl Animation {
    pub fn new(sets: Vec<TweenSet>) -> Self {
        Self {
            sets,
            looping: false,
        }
    }

    pub fn single(set: TweenSet) -> Self {
        Self::new(vec![set])
    }

    pub fn looping(sets: Vec<TweenSet>) -> Self {
        Self {
            sets,
            looping: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn duration(&self) -> f64 {
        self.sets.iter().map(TweenSet::duration).sum()
    }

    pub fn validate(&self) -> MarqueeResult<()> {
        for set in &self.sets {
            for tween in &set.tweens {
                if !tween.duration.is_finite() || tween.duration < 0.0 {
                    return Err(MarqueeError::animation(
                        "tween duration must be finite and >= 0",
                    ));
                }
                if !tween.start.is_finite() || !tween.end.is_finite() {
                    return Err(MarqueeError::animation("tween endpoints must be finite"));
                }
            }
        }
        Ok(())
    }
}

/// Per-slot bundle of named animation-event definitions, e.g. `enter`,
/// `exit`, `menuScroll`, `highlightEnter`.
pub type AnimationEvents = BTreeMap<String, Arc<Animation>>;

/// Runtime cursor over an [`Animation`]: the active set's index and clock.
#[derive(Clone, Debug)]
pub struct AnimationPlayer {
    animation: Arc<Animation>,
    set_index: usize,
    elapsed: f64,
}

impl AnimationPlayer {
    pub fn new(animation: Arc<Animation>) -> Self {
        Self {
            animation,
            set_index: 0,
            elapsed: 0.0,
        }
    }

    pub fn is_looping(&self) -> bool {
        self.animation.looping
    }

    pub fn is_done(&self) -> bool {
        !self.animation.looping && self.set_index >= self.animation.sets.len()
    }

    /// Advance the active set's clock by `dt` seconds. Completed sets are
    /// dequeued and the clock carries the remainder into the next set.
    /// Returns `true` once the final set has completed (never for looping
    /// animations).
    pub fn advance(&mut self, dt: f64) -> bool {
        if self.animation.sets.is_empty() {
            return !self.animation.looping;
        }
        if self.is_done() {
            return true;
        }

        self.elapsed += dt.max(0.0);
        while self.set_index < self.animation.sets.len() {
            let duration = self.animation.sets[self.set_index].duration();
            if self.elapsed < duration {
                return false;
            }
            self.elapsed -= duration;
            self.set_index += 1;
            if self.set_index >= self.animation.sets.len() && self.animation.looping {
                self.set_index = 0;
                if self.animation.duration() <= 0.0 {
                    // Nothing to play per cycle; hold at the start.
                    self.elapsed = 0.0;
                    return false;
                }
            }
        }
        true
    }

    /// Write the animation's sampled values into `view`: completed sets land
    /// on their end values, the active set samples at its current clock.
    pub fn apply(&self, view: &mut ViewState) {
        for (i, set) in self.animation.sets.iter().enumerate() {
            if i < self.set_index || self.is_done() {
                for tween in &set.tweens {
                    tween.property.set(view, tween.end);
                }
            } else if i == self.set_index {
                for tween in &set.tweens {
                    tween.property.set(view, tween.sample(self.elapsed));
                }
                break;
            } else {
                break;
            }
        }
    }
}

/// Snapshot re-tween used on navigation: the moving component's current view
/// becomes every tween's start state, the destination slot's configured view
/// the end state, one tween per interpolatable property.
pub fn retween(current: &ViewState, dest: &ViewState, duration: f64, ease: Ease) -> TweenSet {
    TweenProperty::ALL
        .into_iter()
        .map(|prop| Tween::new(prop, ease, prop.get(current), prop.get(dest), duration))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(tweens: Vec<Tween>) -> TweenSet {
        tweens.into_iter().collect()
    }

    #[test]
    fn tween_endpoints() {
        let tw = Tween::new(TweenProperty::X, Ease::Linear, 0.0, 10.0, 2.0);
        assert_eq!(tw.sample(0.0), 0.0);
        assert_eq!(tw.sample(1.0), 5.0);
        assert_eq!(tw.sample(2.0), 10.0);
        assert_eq!(tw.sample(99.0), 10.0);
    }

    #[test]
    fn zero_duration_snaps_to_end() {
        let tw = Tween::new(TweenProperty::Alpha, Ease::OutCubic, 0.0, 1.0, 0.0);
        assert_eq!(tw.sample(0.0), 1.0);
        assert!(tw.is_complete(0.0));
    }

    #[test]
    fn empty_animation_is_immediately_done() {
        let mut player = AnimationPlayer::new(Arc::new(Animation::new(vec![])));
        assert!(player.advance(0.016));
        assert!(player.is_done());
    }

    #[test]
    fn sets_play_in_order_with_carryover() {
        let anim = Animation::new(vec![
            set_of(vec![Tween::new(TweenProperty::X, Ease::Linear, 0.0, 10.0, 1.0)]),
            set_of(vec![Tween::new(TweenProperty::Y, Ease::Linear, 0.0, 4.0, 2.0)]),
        ]);
        let mut player = AnimationPlayer::new(Arc::new(anim));
        let mut view = ViewState::default();

        assert!(!player.advance(0.5));
        player.apply(&mut view);
        assert_eq!(view.pos.x, 5.0);
        assert_eq!(view.pos.y, 0.0);

        // 1.0s consumed total; 0.5s carries into the second set.
        assert!(!player.advance(1.0));
        player.apply(&mut view);
        assert_eq!(view.pos.x, 10.0);
        assert_eq!(view.pos.y, 1.0);

        assert!(player.advance(1.5));
        player.apply(&mut view);
        assert_eq!(view.pos.y, 4.0);
        assert!(player.is_done());
    }

    #[test]
    fn looping_animation_never_reports_done() {
        let anim = Animation::looping(vec![set_of(vec![Tween::new(
            TweenProperty::Alpha,
            Ease::Linear,
            0.0,
            1.0,
            1.0,
        )])]);
        let mut player = AnimationPlayer::new(Arc::new(anim));
        for _ in 0..10 {
            assert!(!player.advance(0.4));
        }
        assert!(!player.is_done());
    }

    #[test]
    fn retween_covers_every_property_and_zero_duration_snaps() {
        let current = ViewState::default();
        let mut dest = ViewState::default();
        dest.pos = kurbo::Vec2::new(3.0, 4.0);
        dest.alpha = 0.25;
        dest.font_size = 32.0;

        let set = retween(&current, &dest, 0.0, Ease::Linear);
        assert_eq!(set.tweens.len(), TweenProperty::ALL.len());

        let mut player = AnimationPlayer::new(Arc::new(Animation::single(set)));
        let mut view = current;
        assert!(player.advance(0.0));
        player.apply(&mut view);
        assert_eq!(view, dest);
    }

    #[test]
    fn validate_rejects_non_finite() {
        let anim = Animation::single(set_of(vec![Tween::new(
            TweenProperty::X,
            Ease::Linear,
            0.0,
            f64::NAN,
            1.0,
        )]));
        assert!(anim.validate().is_err());
    }
}
