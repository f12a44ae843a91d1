//! Auto-fit — binary-search font sizing against a height budget, plus
//! the one-vs-two-column decisions for fixed pages and for the screen.
//!
//! Measurement is a capability: anything that can answer "how tall is
//! the content at this font size?" can drive the fit. A browser host
//! implements it against live layout geometry; [`EstimatedMeasure`]
//! provides an offline text-metrics fallback. A measurement never
//! retries — an unavailable primitive yields the minimum font size,
//! since a readable-but-suboptimal render beats a crash mid-performance.

use crate::model::{Line, SizingState, TextDirection};
use crate::parser::parse_chordpro;
use crate::transpose::transpose_all_chords;

use super::columns::split_for_two_columns;
use super::constants::*;

/// Height measurement capability for one render target.
pub trait MeasureHeight {
    /// Content height in px when laid out at `font_px`, or None when
    /// the measurement primitive is unavailable.
    fn measure(&mut self, font_px: u32) -> Option<f64>;
}

/// Adapter turning a closure into a [`MeasureHeight`] implementation,
/// e.g. one wrapping a live DOM `scrollHeight` probe.
pub struct MeasureFn<F>(pub F);

impl<F> MeasureHeight for MeasureFn<F>
where
    F: FnMut(u32) -> Option<f64>,
{
    fn measure(&mut self, font_px: u32) -> Option<f64> {
        (self.0)(font_px)
    }
}

/// Largest integer font size in `[MIN_FIT_FONT_PX, MAX_FIT_FONT_PX]`
/// whose measured height stays within `max_height_px`.
pub fn fit_font_size(measure: &mut dyn MeasureHeight, max_height_px: f64) -> u32 {
    fit_font_size_bounded(measure, max_height_px, MIN_FIT_FONT_PX, MAX_FIT_FONT_PX)
}

/// Binary search over integer font sizes with a fixed iteration budget
/// (each probe forces a synchronous re-measurement, so the cost must be
/// bounded up front rather than run to convergence). Returns `min_px`
/// when nothing fits or when measurement is unavailable.
pub fn fit_font_size_bounded(
    measure: &mut dyn MeasureHeight,
    max_height_px: f64,
    min_px: u32,
    max_px: u32,
) -> u32 {
    let mut lo = min_px;
    let mut hi = max_px;
    let mut best = min_px;

    for _ in 0..FIT_ITERATIONS {
        if lo > hi {
            break;
        }
        let mid = lo + (hi - lo) / 2;
        match measure.measure(mid) {
            Some(height) if height <= max_height_px => {
                best = mid;
                lo = mid + 1;
            }
            Some(_) => {
                if mid == 0 {
                    break;
                }
                hi = mid - 1;
            }
            None => return min_px,
        }
    }
    best
}

/// Outcome of fitting a song into a fixed page box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFit {
    OneColumn { font_px: u32 },
    /// Each column is fit independently and may end at its own size.
    TwoColumns { left_font_px: u32, right_font_px: u32 },
}

/// Fit a song into a fixed page: try a single column first, and when
/// even the fitted size drops below the usability threshold, abandon
/// it and fit each of the two split halves independently instead of
/// accepting a too-small render.
pub fn fit_page(
    single: &mut dyn MeasureHeight,
    left: &mut dyn MeasureHeight,
    right: &mut dyn MeasureHeight,
    max_height_px: f64,
) -> PageFit {
    let font_px = fit_font_size(single, max_height_px);
    if font_px >= MIN_READABLE_FONT_PX {
        return PageFit::OneColumn { font_px };
    }
    PageFit::TwoColumns {
        left_font_px: fit_font_size(left, max_height_px),
        right_font_px: fit_font_size(right, max_height_px),
    }
}

/// Column count for *screen* display: two columns when single-column
/// content at the hinted font would overflow the viewport (minus the
/// space reserved for header and controls) and force scrolling.
/// Re-run whenever the viewport resizes.
pub fn columns_for_screen(
    measure: &mut dyn MeasureHeight,
    font_px: u32,
    viewport_height_px: f64,
) -> u32 {
    let budget = viewport_height_px - SCREEN_RESERVED_PX;
    match measure.measure(font_px) {
        Some(height) if height > budget => 2,
        _ => 1,
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Offline text-metrics measurement
// ═══════════════════════════════════════════════════════════════════════

/// Width and kind of one rendered line, precomputed at parse time.
#[derive(Debug, Clone, Copy)]
struct LineExtent {
    chars: usize,
    has_chords: bool,
}

/// [`MeasureHeight`] implementation for targets without a live layout
/// engine: average glyph width × wrapped line count, with per-script
/// width factors and chord lines counted double-height (the chord row
/// sits above its lyrics).
#[derive(Debug, Clone)]
pub struct EstimatedMeasure {
    extents: Vec<LineExtent>,
    direction: TextDirection,
    container_width_px: f64,
}

impl EstimatedMeasure {
    pub fn new(content: &str, container_width_px: f64) -> Self {
        let direction = TextDirection::detect(content);
        let extents = parse_chordpro(content)
            .iter()
            .filter_map(line_extent)
            .collect();
        Self {
            extents,
            direction,
            container_width_px,
        }
    }

    /// Track a container resize without re-parsing the content.
    pub fn set_container_width(&mut self, container_width_px: f64) {
        self.container_width_px = container_width_px;
    }
}

fn line_extent(line: &Line) -> Option<LineExtent> {
    match line {
        Line::ChordLine { lyrics, .. } => Some(LineExtent {
            chars: lyrics.chars().count(),
            has_chords: true,
        }),
        Line::Lyrics { text } => Some(LineExtent {
            chars: text.chars().count(),
            has_chords: false,
        }),
        Line::SectionStart { name } | Line::SectionLabel { name } => Some(LineExtent {
            chars: name.chars().count(),
            has_chords: false,
        }),
        Line::Empty => Some(LineExtent {
            chars: 0,
            has_chords: false,
        }),
        Line::SectionEnd => None,
    }
}

impl MeasureHeight for EstimatedMeasure {
    fn measure(&mut self, font_px: u32) -> Option<f64> {
        let font = font_px as f64;
        let factor = match self.direction {
            TextDirection::Rtl => HEBREW_CHAR_WIDTH_FACTOR,
            TextDirection::Ltr => LATIN_CHAR_WIDTH_FACTOR,
        };
        let char_width = font * factor;
        let line_height = font * LINE_HEIGHT_FACTOR;
        let container = self.container_width_px.max(char_width);

        let mut total = 0.0;
        for extent in &self.extents {
            let width = extent.chars as f64 * char_width;
            let rows = (width / container).ceil().max(1.0);
            let multiplier = if extent.has_chords { 2.0 } else { 1.0 };
            total += rows * line_height * multiplier;
        }
        Some(total)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Recompute entry point
// ═══════════════════════════════════════════════════════════════════════

/// External event that invalidates the current sizing. The host owns the
/// event sources (content edits, resize observers) and is responsible
/// for debouncing before calling [`FitController::recompute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecomputeTrigger {
    ContentChanged,
    TranspositionChanged,
    ViewportResized,
}

/// Owns the screen sizing decision for one render target. Synchronous
/// and single-threaded: every recompute runs to completion, and no state
/// is shared between targets (the two columns of a split layout each get
/// their own controller).
#[derive(Debug, Clone)]
pub struct FitController {
    content: String,
    semitones: i32,
    font_hint_px: u32,
    viewport_width_px: f64,
    viewport_height_px: f64,
    measure: EstimatedMeasure,
    sizing: SizingState,
}

impl FitController {
    pub fn new(
        content: &str,
        font_hint_px: u32,
        viewport_width_px: f64,
        viewport_height_px: f64,
    ) -> Self {
        let mut controller = Self {
            content: content.to_string(),
            semitones: 0,
            font_hint_px,
            viewport_width_px,
            viewport_height_px,
            measure: EstimatedMeasure::new(content, viewport_width_px),
            sizing: SizingState {
                font_size_px: font_hint_px,
                column_count: 1,
            },
        };
        controller.recompute(RecomputeTrigger::ContentChanged);
        controller
    }

    pub fn sizing(&self) -> SizingState {
        self.sizing
    }

    pub fn set_content(&mut self, content: &str) {
        self.content = content.to_string();
    }

    pub fn set_transpose(&mut self, semitones: i32) {
        self.semitones = semitones;
    }

    pub fn set_viewport(&mut self, width_px: f64, height_px: f64) {
        self.viewport_width_px = width_px;
        self.viewport_height_px = height_px;
    }

    /// Re-run the sizing decision synchronously. Content and
    /// transposition changes re-derive the measured extents; a resize
    /// reuses them against the new container width.
    pub fn recompute(&mut self, trigger: RecomputeTrigger) -> SizingState {
        match trigger {
            RecomputeTrigger::ContentChanged | RecomputeTrigger::TranspositionChanged => {
                let markup = transpose_all_chords(&self.content, self.semitones);
                self.measure = EstimatedMeasure::new(&markup, self.viewport_width_px);
            }
            RecomputeTrigger::ViewportResized => {
                self.measure.set_container_width(self.viewport_width_px);
            }
        }
        let columns = columns_for_screen(
            &mut self.measure,
            self.font_hint_px,
            self.viewport_height_px,
        );
        self.sizing = SizingState {
            font_size_px: self.font_hint_px,
            column_count: columns,
        };
        self.sizing
    }

    /// Fit the song into a fixed page box instead of the live viewport,
    /// e.g. for an A4 export: single column at the largest readable
    /// size, else two independently fitted columns.
    pub fn fit_for_page(&self, max_height_px: f64) -> PageFit {
        let markup = transpose_all_chords(&self.content, self.semitones);
        let (first, second) = split_for_two_columns(&markup);
        let column_width = self.viewport_width_px / 2.0;
        let mut single = EstimatedMeasure::new(&markup, self.viewport_width_px);
        let mut left = EstimatedMeasure::new(&first, column_width);
        let mut right = EstimatedMeasure::new(&second, column_width);
        fit_page(&mut single, &mut left, &mut right, max_height_px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_uses_the_iteration_budget_not_a_closed_form() {
        // Height shrinks as the font grows; everything in range fits.
        let result = fit_font_size(
            &mut MeasureFn(|px: u32| Some(1000.0 - 40.0 * px as f64)),
            650.0,
        );
        assert_eq!(result, 18);
    }

    #[test]
    fn finds_the_largest_fitting_size() {
        let result = fit_font_size(&mut MeasureFn(|px: u32| Some(40.0 * px as f64)), 650.0);
        assert_eq!(result, 16, "largest px with 40*px <= 650");
    }

    #[test]
    fn returns_minimum_when_nothing_fits() {
        assert_eq!(fit_font_size(&mut MeasureFn(|_: u32| Some(1.0e6)), 650.0), 8);
    }

    #[test]
    fn returns_minimum_when_measurement_is_unavailable() {
        assert_eq!(fit_font_size(&mut MeasureFn(|_: u32| None), 650.0), 8);
    }

    #[test]
    fn custom_bounds_are_respected() {
        let result =
            fit_font_size_bounded(&mut MeasureFn(|px: u32| Some(10.0 * px as f64)), 1000.0, 20, 40);
        assert_eq!(result, 40);
    }
}
