use kurbo::{Rect, Vec2};

/// A named scroll slot's target visual transform, and the live visual state
/// of every component. Every field is numerically interpolatable; `layer` and
/// `monitor` are tweened as floats and rounded only when drawn.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewState {
    pub pos: Vec2,
    pub size: Vec2,
    pub offset: Vec2,
    /// Rotation in degrees around the draw rect's center.
    pub angle: f64,
    pub alpha: f64,
    pub background_alpha: f64,
    pub font_size: f64,
    /// Upper bound on the draw rect; `0` means unbounded.
    pub max_size: Vec2,
    pub layer: f64,
    pub volume: f64,
    pub monitor: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            size: Vec2::ZERO,
            offset: Vec2::ZERO,
            angle: 0.0,
            alpha: 1.0,
            background_alpha: 0.0,
            font_size: 0.0,
            max_size: Vec2::ZERO,
            layer: 0.0,
            volume: 1.0,
            monitor: 0.0,
        }
    }
}

impl ViewState {
    /// Layer index used for draw ordering.
    pub fn layer_index(&self) -> usize {
        self.layer.round().max(0.0) as usize
    }

    /// Monitor index used for draw routing.
    pub fn monitor_index(&self) -> usize {
        self.monitor.round().max(0.0) as usize
    }

    /// Screen-space draw rect: position plus offsets, clamped to `max_size`
    /// where a max dimension is set.
    pub fn draw_rect(&self) -> Rect {
        let mut w = self.size.x;
        let mut h = self.size.y;
        if self.max_size.x > 0.0 {
            w = w.min(self.max_size.x);
        }
        if self.max_size.y > 0.0 {
            h = h.min(self.max_size.y);
        }
        let x0 = self.pos.x + self.offset.x;
        let y0 = self.pos.y + self.offset.y;
        Rect::new(x0, y0, x0 + w, y0 + h)
    }
}

/// One interpolatable property of a [`ViewState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TweenProperty {
    X,
    Y,
    Width,
    Height,
    XOffset,
    YOffset,
    Angle,
    Alpha,
    BackgroundAlpha,
    FontSize,
    MaxWidth,
    MaxHeight,
    Layer,
    Volume,
    Monitor,
}

impl TweenProperty {
    pub const ALL: [TweenProperty; 15] = [
        Self::X,
        Self::Y,
        Self::Width,
        Self::Height,
        Self::XOffset,
        Self::YOffset,
        Self::Angle,
        Self::Alpha,
        Self::BackgroundAlpha,
        Self::FontSize,
        Self::MaxWidth,
        Self::MaxHeight,
        Self::Layer,
        Self::Volume,
        Self::Monitor,
    ];

    pub fn get(self, view: &ViewState) -> f64 {
        match self {
            Self::X => view.pos.x,
            Self::Y => view.pos.y,
            Self::Width => view.size.x,
            Self::Height => view.size.y,
            Self::XOffset => view.offset.x,
            Self::YOffset => view.offset.y,
            Self::Angle => view.angle,
            Self::Alpha => view.alpha,
            Self::BackgroundAlpha => view.background_alpha,
            Self::FontSize => view.font_size,
            Self::MaxWidth => view.max_size.x,
            Self::MaxHeight => view.max_size.y,
            Self::Layer => view.layer,
            Self::Volume => view.volume,
            Self::Monitor => view.monitor,
        }
    }

    pub fn set(self, view: &mut ViewState, value: f64) {
        match self {
            Self::X => view.pos.x = value,
            Self::Y => view.pos.y = value,
            Self::Width => view.size.x = value,
            Self::Height => view.size.y = value,
            Self::XOffset => view.offset.x = value,
            Self::YOffset => view.offset.y = value,
            Self::Angle => view.angle = value,
            Self::Alpha => view.alpha = value,
            Self::BackgroundAlpha => view.background_alpha = value,
            Self::FontSize => view.font_size = value,
            Self::MaxWidth => view.max_size.x = value,
            Self::MaxHeight => view.max_size.y = value,
            Self::Layer => view.layer = value,
            Self::Volume => view.volume = value,
            Self::Monitor => view.monitor = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_set_round_trips_every_property() {
        let mut view = ViewState::default();
        for (i, prop) in TweenProperty::ALL.into_iter().enumerate() {
            let value = 1.5 + i as f64;
            prop.set(&mut view, value);
            assert_eq!(prop.get(&view), value, "{prop:?}");
        }
    }

    #[test]
    fn draw_rect_applies_offset_and_max_size() {
        let view = ViewState {
            pos: Vec2::new(10.0, 20.0),
            size: Vec2::new(100.0, 50.0),
            offset: Vec2::new(5.0, -5.0),
            max_size: Vec2::new(60.0, 0.0),
            ..ViewState::default()
        };
        let rect = view.draw_rect();
        assert_eq!(rect.x0, 15.0);
        assert_eq!(rect.y0, 15.0);
        assert_eq!(rect.width(), 60.0);
        assert_eq!(rect.height(), 50.0);
    }

    #[test]
    fn layer_index_rounds_and_clamps() {
        let mut view = ViewState::default();
        view.layer = 2.6;
        assert_eq!(view.layer_index(), 3);
        view.layer = -1.2;
        assert_eq!(view.layer_index(), 0);
    }
}
