//! Shared constants for lead-sheet rendering and auto-fit (all in CSS px).

// ── Glyph-width estimates ───────────────────────────────────────────
/// Font size the per-character estimates below are calibrated at.
pub(super) const REFERENCE_FONT_PX: f64 = 16.0;
/// Estimated advance of one bold chord glyph at the reference size.
pub(super) const CHORD_CHAR_WIDTH: f64 = 10.0;
/// Estimated advance of one lyric glyph at the reference size.
pub(super) const LYRIC_CHAR_WIDTH: f64 = 8.0;
/// Estimated advance of one padding hyphen at the reference size.
pub(super) const HYPHEN_WIDTH: f64 = 6.0;

// ── Hyphen padding ──────────────────────────────────────────────────
pub(super) const MIN_PAD_HYPHENS: usize = 2;
pub(super) const MAX_PAD_HYPHENS: usize = 8;

// ── Auto-fit ────────────────────────────────────────────────────────
/// Fixed binary-search budget; bounds worst-case cost since every
/// iteration forces a synchronous re-measurement.
pub(super) const FIT_ITERATIONS: u32 = 15;
pub const MIN_FIT_FONT_PX: u32 = 8;
pub const MAX_FIT_FONT_PX: u32 = 18;
/// Below this size a single-column page layout is abandoned in favor
/// of two columns.
pub(super) const MIN_READABLE_FONT_PX: u32 = 15;
/// Vertical space reserved for header and controls on screen.
pub(super) const SCREEN_RESERVED_PX: f64 = 150.0;

// ── Offline text metrics ────────────────────────────────────────────
pub(super) const LATIN_CHAR_WIDTH_FACTOR: f64 = 0.55;
pub(super) const HEBREW_CHAR_WIDTH_FACTOR: f64 = 0.48;
pub(super) const LINE_HEIGHT_FACTOR: f64 = 1.5;
