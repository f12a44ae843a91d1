//! Data model for representing a parsed ChordPro song.
//!
//! These structures capture the essential information needed for
//! rendering a lead sheet: typed lines, chord positions, reflow-safe
//! inline segments, and the sizing state chosen by the auto-fit.

use serde::{Deserialize, Serialize};

/// Reading direction of a document, derived once from script sniffing
/// of the raw content and threaded through rendering and auto-fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    /// Sniff the direction of a piece of text: RTL if it contains any
    /// character from the Hebrew block, LTR otherwise.
    pub fn detect(text: &str) -> Self {
        if contains_hebrew(text) {
            TextDirection::Rtl
        } else {
            TextDirection::Ltr
        }
    }
}

/// True if the text contains any character in the Hebrew Unicode block
/// (U+0590–U+05FF). Used for direction sniffing and for deciding whether
/// a section name needs translation.
pub fn contains_hebrew(text: &str) -> bool {
    text.chars().any(|c| ('\u{0590}'..='\u{05FF}').contains(&c))
}

/// A chord occurrence inside a chord line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordEvent {
    /// Chord symbol as written, e.g. "Am7" or "C/G"
    pub chord: String,
    /// Character offset into the line's lyric text *after* chord-bracket
    /// removal. Always in `0..=lyrics.chars().count()`.
    pub offset: usize,
}

/// One parsed line of ChordPro markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Line {
    /// Start of a named section, e.g. `{soc: Verse 1}`
    SectionStart { name: String },
    /// End of the current section, e.g. `{eoc}`
    SectionEnd,
    /// A one-off inline label from a comment directive, e.g. `{c: Slowly}`
    SectionLabel { name: String },
    /// A lyric line with embedded chords
    ChordLine {
        chords: Vec<ChordEvent>,
        lyrics: String,
    },
    /// A plain lyric line with no chords
    Lyrics { text: String },
    /// A blank line
    Empty,
}

/// How a chord segment joins the segment that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Connector {
    /// Whitespace boundary; the renderer may wrap here.
    None,
    /// A word is split across the chord boundary: the renderer must emit
    /// a zero-width word joiner (U+2060) and never break the line here.
    WordJoiner,
    /// Word joiner plus a run of hyphens padding the gap left when the
    /// chord glyph is wider than its attached syllable.
    Hyphens(usize),
}

/// The atomic renderable unit produced from a chord line.
///
/// Invariant: concatenating the `text`/`content` of all segments of a
/// line (ignoring chords, joiners and hyphens) reproduces the original
/// lyric string exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Segment {
    /// Plain lyric text with no chord above it
    Text { content: String },
    /// A chord glyph with the lyric fragment it is attached to
    ChordText {
        chord: String,
        text: String,
        connector: Connector,
        /// Render with extra horizontal spacing instead of hyphen
        /// padding — set when the attached text is empty or pure
        /// punctuation.
        wide_spacing: bool,
    },
    /// A forced break before a trailing run of bare chords
    LineBreak,
}

impl Segment {
    /// The lyric text this segment contributes to the line.
    pub fn lyric_text(&self) -> &str {
        match self {
            Segment::Text { content } => content,
            Segment::ChordText { text, .. } => text,
            Segment::LineBreak => "",
        }
    }
}

/// One line of the presentation tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RenderedLine {
    ChordLine { segments: Vec<Segment> },
    Lyrics { text: String },
    Label { name: String },
    Empty,
}

/// A top-level node of the presentation tree: either a labeled section
/// or a loose line outside any section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Block {
    Section {
        name: String,
        lines: Vec<RenderedLine>,
    },
    Line { line: RenderedLine },
}

/// A fully rendered song, ready for a presentation surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongDocument {
    /// Reading direction derived from the raw content
    pub direction: TextDirection,
    /// Displayed key after transposition and display spelling, when the
    /// caller supplied one or the markup carried a `{key: ...}` directive
    pub key: Option<String>,
    /// Sections and loose lines, in source order
    pub blocks: Vec<Block>,
}

impl SongDocument {
    /// True when the document renders nothing at all.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Total number of rendered lines across all blocks.
    pub fn line_count(&self) -> usize {
        self.blocks
            .iter()
            .map(|b| match b {
                Block::Section { lines, .. } => lines.len(),
                Block::Line { .. } => 1,
            })
            .sum()
    }
}

/// Font size and column count chosen for one render target.
///
/// Recomputed synchronously after every content, transposition or
/// viewport change; never persisted. Each render target (a full page or
/// a single column) owns its own state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizingState {
    pub font_size_px: u32,
    /// 1 or 2
    pub column_count: u32,
}
