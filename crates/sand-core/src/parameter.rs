use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

use crate::error::{Error, Result};

/// Resolution of the parameter sliders. Positions run from 0 (top) to
/// `SLIDER_RANGE` (bottom).
pub const SLIDER_RANGE: i32 = 2000;

/// Slider movement per line step, in positions.
pub const SLIDER_LINE_STEP: i32 = 5;

/// Scale of the ratio slider's arctangent curve. Slightly below pi/2 so the
/// top of the slider stays finite.
const RATIO_CURVE: f64 = 1.55;

/// Drag value at the top of the drag slider.
const DRAG_SLIDER_MAX: f64 = 0.5;

pub const DEFAULT_PERIOD_X: f64 = 500.0;
pub const DEFAULT_PERIOD_RATIO: f64 = 1.02;
pub const DEFAULT_DRAG: f64 = 0.125;

/// Physical inputs of the pendulum integrator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    /// Period along Y divided by the period along X.
    pub period_ratio: f64,
    /// Fraction of velocity lost per `period_x` ticks.
    pub drag: f64,
    /// X-axis period parameter in simulation ticks.
    pub period_x: f64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            period_ratio: DEFAULT_PERIOD_RATIO,
            drag: DEFAULT_DRAG,
            period_x: DEFAULT_PERIOD_X,
        }
    }
}

impl SimulationParameters {
    /// Restoring-force scale factors `(xf, yf)` for each axis.
    pub fn axis_factors(&self) -> (f64, f64) {
        let four_pi_sq = 4.0 * PI * PI;
        (
            self.period_x / four_pi_sq,
            self.period_x * self.period_ratio / four_pi_sq,
        )
    }

    /// Velocity retained per step.
    pub fn damping(&self) -> f64 {
        1.0 - self.drag / self.period_x
    }

    /// Number of integrator steps in one undamped swing along X and Y.
    pub fn steps_per_cycle(&self) -> (f64, f64) {
        let (xf, yf) = self.axis_factors();
        (2.0 * PI * xf, 2.0 * PI * yf)
    }
}

/// The two user-adjustable parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterKind {
    PeriodRatio,
    Drag,
}

impl ParameterKind {
    pub const ALL: [ParameterKind; 2] = [ParameterKind::PeriodRatio, ParameterKind::Drag];

    pub fn name(&self) -> &'static str {
        match self {
            ParameterKind::PeriodRatio => "Ratio",
            ParameterKind::Drag => "Drag",
        }
    }

    /// Inclusive range accepted from text entry.
    pub fn range(&self) -> (f64, f64) {
        match self {
            ParameterKind::PeriodRatio => (1.0, 50.0),
            ParameterKind::Drag => (0.0, DRAG_SLIDER_MAX),
        }
    }

    /// Slider movement per page step.
    pub fn page_step(&self) -> i32 {
        match self {
            ParameterKind::PeriodRatio => SLIDER_RANGE / 16,
            ParameterKind::Drag => SLIDER_RANGE / 10,
        }
    }

    /// Convert a slider position to a parameter value.
    pub fn from_slider(&self, position: i32) -> f64 {
        let range = f64::from(SLIDER_RANGE);
        let inverted = f64::from(SLIDER_RANGE - position.clamp(0, SLIDER_RANGE));
        match self {
            ParameterKind::PeriodRatio => (inverted * RATIO_CURVE / range).tan() + 1.0,
            ParameterKind::Drag => inverted * DRAG_SLIDER_MAX / range,
        }
    }

    /// Convert a parameter value to the nearest slider position.
    pub fn to_slider(&self, value: f64) -> i32 {
        let range = f64::from(SLIDER_RANGE);
        let offset = match self {
            ParameterKind::PeriodRatio => (range * (value - 1.0).atan() / RATIO_CURVE).round(),
            ParameterKind::Drag => (value * range / DRAG_SLIDER_MAX).round(),
        };
        (SLIDER_RANGE - offset as i32).clamp(0, SLIDER_RANGE)
    }

    /// Text shown in the entry field next to the slider.
    pub fn format(&self, value: f64) -> String {
        match self {
            ParameterKind::PeriodRatio => format!("{value:.4}"),
            ParameterKind::Drag => format!("{value:.5}"),
        }
    }

    /// Parse and range-check typed text.
    pub fn parse(&self, text: &str) -> Result<f64> {
        let invalid = || Error::InvalidParameterInput {
            kind: *self,
            input: text.to_string(),
        };
        let value: f64 = text.trim().parse().map_err(|_| invalid())?;
        let (min, max) = self.range();
        if !(min..=max).contains(&value) {
            return Err(invalid());
        }
        Ok(value)
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterKind::PeriodRatio => f.write_str("period ratio"),
            ParameterKind::Drag => f.write_str("drag"),
        }
    }
}

/// A scroll request against one slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderAction {
    LineUp,
    LineDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
    /// Thumb dragged to an absolute position.
    Track(i32),
}

/// An integer slider bound to one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slider {
    pub kind: ParameterKind,
    position: i32,
}

impl Slider {
    pub fn new(kind: ParameterKind, position: i32) -> Self {
        Self {
            kind,
            position: position.clamp(0, SLIDER_RANGE),
        }
    }

    pub fn for_value(kind: ParameterKind, value: f64) -> Self {
        Self::new(kind, kind.to_slider(value))
    }

    pub fn position(&self) -> i32 {
        self.position
    }

    pub fn value(&self) -> f64 {
        self.kind.from_slider(self.position)
    }

    /// Move the thumb and return the clamped new position.
    pub fn scroll(&mut self, action: SliderAction) -> i32 {
        let target = match action {
            SliderAction::LineUp => self.position - SLIDER_LINE_STEP,
            SliderAction::LineDown => self.position + SLIDER_LINE_STEP,
            SliderAction::PageUp => self.position - self.kind.page_step(),
            SliderAction::PageDown => self.position + self.kind.page_step(),
            SliderAction::Top => 0,
            SliderAction::Bottom => SLIDER_RANGE,
            SliderAction::Track(pos) => pos,
        };
        self.position = target.clamp(0, SLIDER_RANGE);
        self.position
    }

    pub fn set_position(&mut self, position: i32) {
        self.position = position.clamp(0, SLIDER_RANGE);
    }
}

/// Live parameters together with the slider and text state that edits them.
///
/// Slider moves always produce a value. Typed text either applies, moving
/// the slider to match, or is rejected with nothing changed.
#[derive(Debug, Clone)]
pub struct ParameterControls {
    params: SimulationParameters,
    ratio: Slider,
    drag: Slider,
}

impl ParameterControls {
    pub fn new(params: SimulationParameters) -> Self {
        Self {
            ratio: Slider::for_value(ParameterKind::PeriodRatio, params.period_ratio),
            drag: Slider::for_value(ParameterKind::Drag, params.drag),
            params,
        }
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    pub fn slider(&self, kind: ParameterKind) -> &Slider {
        match kind {
            ParameterKind::PeriodRatio => &self.ratio,
            ParameterKind::Drag => &self.drag,
        }
    }

    pub fn value(&self, kind: ParameterKind) -> f64 {
        match kind {
            ParameterKind::PeriodRatio => self.params.period_ratio,
            ParameterKind::Drag => self.params.drag,
        }
    }

    pub fn text(&self, kind: ParameterKind) -> String {
        kind.format(self.value(kind))
    }

    /// Apply a slider movement; the value follows the new position.
    pub fn scroll(&mut self, kind: ParameterKind, action: SliderAction) -> f64 {
        let slider = match kind {
            ParameterKind::PeriodRatio => &mut self.ratio,
            ParameterKind::Drag => &mut self.drag,
        };
        slider.scroll(action);
        let value = slider.value();
        self.store(kind, value);
        value
    }

    /// Apply typed text. On error the previous value and slider position stay.
    pub fn enter_text(&mut self, kind: ParameterKind, text: &str) -> Result<f64> {
        let value = kind.parse(text)?;
        self.store(kind, value);
        match kind {
            ParameterKind::PeriodRatio => self.ratio.set_position(kind.to_slider(value)),
            ParameterKind::Drag => self.drag.set_position(kind.to_slider(value)),
        }
        Ok(value)
    }

    fn store(&mut self, kind: ParameterKind, value: f64) {
        match kind {
            ParameterKind::PeriodRatio => self.params.period_ratio = value,
            ParameterKind::Drag => self.params.drag = value,
        }
    }
}

impl Default for ParameterControls {
    fn default() -> Self {
        Self::new(SimulationParameters::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters() {
        let p = SimulationParameters::default();
        assert_eq!(p.period_ratio, 1.02);
        assert_eq!(p.drag, 0.125);
        assert_eq!(p.period_x, 500.0);
    }

    #[test]
    fn test_slider_endpoints() {
        let ratio = ParameterKind::PeriodRatio;
        assert!((ratio.from_slider(SLIDER_RANGE) - 1.0).abs() < 1e-12);
        assert!((ratio.from_slider(0) - (1.55f64.tan() + 1.0)).abs() < 1e-9);
        let drag = ParameterKind::Drag;
        assert_eq!(drag.from_slider(SLIDER_RANGE), 0.0);
        assert_eq!(drag.from_slider(0), 0.5);
    }

    #[test]
    fn test_default_slider_positions() {
        assert_eq!(ParameterKind::Drag.to_slider(0.125), 1500);
        // atan(0.02) * 2000 / 1.55 = 25.8 -> 26
        assert_eq!(ParameterKind::PeriodRatio.to_slider(1.02), 1974);
    }

    #[test]
    fn test_to_slider_clamps() {
        assert_eq!(ParameterKind::PeriodRatio.to_slider(50.0), 0);
        assert_eq!(ParameterKind::Drag.to_slider(-1.0), SLIDER_RANGE);
    }

    #[test]
    fn test_format() {
        assert_eq!(ParameterKind::PeriodRatio.format(1.02), "1.0200");
        assert_eq!(ParameterKind::Drag.format(0.125), "0.12500");
    }

    #[test]
    fn test_parse_accepts_whitespace() {
        assert_eq!(ParameterKind::Drag.parse(" 0.25 ").unwrap(), 0.25);
        assert_eq!(ParameterKind::PeriodRatio.parse("50").unwrap(), 50.0);
    }

    #[test]
    fn test_parse_rejects() {
        for text in ["", "abc", "1.5x", "0.9", "50.01", "nan"] {
            assert!(ParameterKind::PeriodRatio.parse(text).is_err(), "{text:?} accepted");
        }
        assert!(ParameterKind::Drag.parse("0.51").is_err());
        assert!(ParameterKind::Drag.parse("-0.01").is_err());
    }

    #[test]
    fn test_slider_scroll_steps_and_clamps() {
        let mut s = Slider::new(ParameterKind::PeriodRatio, 10);
        assert_eq!(s.scroll(SliderAction::LineUp), 5);
        assert_eq!(s.scroll(SliderAction::PageUp), 0);
        assert_eq!(s.scroll(SliderAction::PageDown), 125);
        assert_eq!(s.scroll(SliderAction::Bottom), SLIDER_RANGE);
        assert_eq!(s.scroll(SliderAction::LineDown), SLIDER_RANGE);
        assert_eq!(s.scroll(SliderAction::Track(-40)), 0);
        assert_eq!(s.scroll(SliderAction::Top), 0);

        let mut d = Slider::new(ParameterKind::Drag, 1000);
        assert_eq!(d.scroll(SliderAction::PageDown), 1200);
    }

    #[test]
    fn test_controls_scroll_updates_value() {
        let mut c = ParameterControls::default();
        let v = c.scroll(ParameterKind::Drag, SliderAction::Bottom);
        assert_eq!(v, 0.0);
        assert_eq!(c.params().drag, 0.0);
        assert_eq!(c.text(ParameterKind::Drag), "0.00000");
    }

    #[test]
    fn test_controls_rejected_text_keeps_state() {
        let mut c = ParameterControls::default();
        let before = c.slider(ParameterKind::PeriodRatio).position();
        let err = c.enter_text(ParameterKind::PeriodRatio, "75").unwrap_err();
        assert!(matches!(err, Error::InvalidParameterInput { kind: ParameterKind::PeriodRatio, .. }));
        assert_eq!(c.params().period_ratio, 1.02);
        assert_eq!(c.slider(ParameterKind::PeriodRatio).position(), before);
    }

    #[test]
    fn test_controls_text_moves_slider() {
        let mut c = ParameterControls::default();
        c.enter_text(ParameterKind::Drag, "0.5").unwrap();
        assert_eq!(c.params().drag, 0.5);
        assert_eq!(c.slider(ParameterKind::Drag).position(), 0);
    }

    #[test]
    fn test_steps_per_cycle() {
        let p = SimulationParameters::default();
        let (x, y) = p.steps_per_cycle();
        assert!((x - 500.0 / (2.0 * PI)).abs() < 1e-9);
        assert!(y > x);
    }
}
