//! Incremental painting of the trajectory.
//!
//! Each segment is drawn twice: first a one-pixel shadow in the background
//! (or paper) colour, shifted off the true line, then the real line in ink
//! on top. Over tens of thousands of nearly coincident segments the shadows
//! thin out earlier strokes, so the drawing builds up into nested bands
//! instead of a solid smear.

use glam::{IVec2, UVec2};
use sand_core::{Point, Trajectory};

use crate::settings::RenderSettings;
use crate::surface::{Colour, DrawSurface, Pen};
use crate::viewport::ViewportMapping;

/// Which mapping a paint call uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Screen,
    Print,
}

/// Colour of the shadow stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InkMode {
    /// Shadow in the screen background colour.
    Screen,
    /// Shadow in the paper colour.
    Paper,
}

/// Which side of the true line the shadow falls on.
///
/// Mostly horizontal segments shift vertically, mostly vertical ones shift
/// horizontally. The direction depends on the sign of the segment's end
/// point on the *other* axis, always pointing towards that axis. This is a
/// tuned look, not a derived one; changing it changes the pattern.
pub fn shadow_offset(start: Point, end: Point) -> IVec2 {
    let toward = |v: f64| if v >= 0.0 { -1 } else { 1 };
    if (end.x - start.x).abs() > (end.y - start.y).abs() {
        IVec2::new(0, toward(end.y))
    } else {
        IVec2::new(toward(end.x), 0)
    }
}

/// Paints trajectory segments onto screen or print surfaces.
#[derive(Debug, Clone, Default)]
pub struct IncrementalRenderer {
    screen: ViewportMapping,
    print: ViewportMapping,
    settings: RenderSettings,
}

impl IncrementalRenderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            screen: ViewportMapping::default(),
            print: ViewportMapping::default(),
            settings,
        }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn mapping(&self, target: Target) -> ViewportMapping {
        match target {
            Target::Screen => self.screen,
            Target::Print => self.print,
        }
    }

    /// Recompute the screen mapping after the client area changed.
    pub fn set_screen_size(&mut self, size: UVec2) {
        self.screen = ViewportMapping::for_client(size);
    }

    /// Recompute the print mapping for a page of `size` device pixels.
    pub fn set_page_size(&mut self, size: UVec2) {
        self.print = ViewportMapping::for_page(size);
    }

    fn shadow_colour(&self, ink: InkMode) -> Colour {
        match ink {
            InkMode::Screen => self.settings.background,
            InkMode::Paper => self.settings.paper,
        }
    }

    /// Paint the segment ending at `index`. Returns `false` without drawing
    /// when `index` is not in `1..trajectory.len()`.
    pub fn paint_segment<S: DrawSurface + ?Sized>(
        &self,
        surface: &mut S,
        trajectory: &Trajectory,
        index: usize,
        target: Target,
        ink: InkMode,
    ) -> bool {
        let Some((from, to)) = trajectory.segment(index) else {
            return false;
        };
        let mapping = self.mapping(target);
        let start = mapping.to_pixel(from);
        let stop = mapping.to_pixel(to);
        let offset = shadow_offset(from, to);

        surface.select_pen(Pen::new(self.shadow_colour(ink), self.settings.shadow_width));
        surface.move_to(start + offset);
        surface.line_to(stop + offset);

        surface.select_pen(Pen::new(self.settings.ink, self.settings.ink_width));
        surface.move_to(start);
        surface.line_to(stop);
        true
    }

    /// Paint every segment in order. Returns the number painted.
    pub fn paint_full_history<S: DrawSurface + ?Sized>(
        &self,
        surface: &mut S,
        trajectory: &Trajectory,
        target: Target,
        ink: InkMode,
    ) -> usize {
        self.paint_history_until(surface, trajectory, target, ink, usize::MAX, || false)
    }

    /// Like `paint_full_history`, but every `check_every` segments asks
    /// `interrupted` whether to give up early.
    pub fn paint_history_until<S, F>(
        &self,
        surface: &mut S,
        trajectory: &Trajectory,
        target: Target,
        ink: InkMode,
        check_every: usize,
        mut interrupted: F,
    ) -> usize
    where
        S: DrawSurface + ?Sized,
        F: FnMut() -> bool,
    {
        let check_every = check_every.max(1);
        let mut painted = 0;
        for index in 1..trajectory.len() {
            self.paint_segment(surface, trajectory, index, target, ink);
            painted += 1;
            if index % check_every == 0 && interrupted() {
                log::debug!("repaint abandoned after {painted} segments");
                break;
            }
        }
        painted
    }

    /// Clear the screen surface to the background and repaint everything.
    pub fn repaint_screen<S, F>(
        &self,
        surface: &mut S,
        trajectory: &Trajectory,
        check_every: usize,
        interrupted: F,
    ) -> usize
    where
        S: DrawSurface + ?Sized,
        F: FnMut() -> bool,
    {
        surface.fill(self.settings.background);
        self.paint_history_until(
            surface,
            trajectory,
            Target::Screen,
            InkMode::Screen,
            check_every,
            interrupted,
        )
    }
}
