//! Lead-sheet renderer — converts ChordPro markup into a presentation
//! tree: sections of lines, each chord line broken into reflow-safe
//! inline segments, with transposition and locale-aware section names
//! applied on the way through.

mod autofit;
mod columns;
mod constants;
mod segments;

pub use autofit::{
    columns_for_screen, fit_font_size, fit_font_size_bounded, fit_page, EstimatedMeasure,
    FitController, MeasureFn, MeasureHeight, PageFit, RecomputeTrigger,
};
pub use columns::{split_for_two_columns, split_lines};
pub use constants::{MAX_FIT_FONT_PX, MIN_FIT_FONT_PX};
pub use segments::build_segments;

use crate::model::{Block, Line, RenderedLine, SongDocument, TextDirection};
use crate::parser::{key_directive, parse_chordpro};
use crate::sections::translate_section_name;
use crate::transpose::Transposer;

/// Hints from the host rendering surface. The font size feeds the
/// segment builder's glyph-width estimates; the column count is the
/// caller's current layout (splitting itself goes through
/// [`split_for_two_columns`], with each half rendered separately).
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub font_size_px: u32,
    pub column_count: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            font_size_px: 16,
            column_count: 1,
        }
    }
}

/// Render ChordPro markup into a [`SongDocument`].
///
/// Transposition is applied to the markup first (chords and any
/// `{key: ...}` directive), then the lines are parsed and grouped into
/// sections. Lines outside any section stay at the top level in source
/// order; a section left open at end-of-input is flushed closed, never
/// dropped. A degenerate empty input produces an empty document.
pub fn render_song(
    content: &str,
    transpose_semitones: i32,
    song_key: Option<&str>,
    options: RenderOptions,
) -> SongDocument {
    let transposer = Transposer::default();
    let direction = TextDirection::detect(content);
    let target_hebrew = direction == TextDirection::Rtl;

    let markup = if transpose_semitones != 0 {
        let shifted = transposer.transpose_all_chords(content, transpose_semitones);
        transposer.transpose_key_directive(&shifted, transpose_semitones)
    } else {
        content.to_string()
    };

    // The displayed key label: caller-supplied, else the first {key: ...}
    // directive, shifted with the song and respelled for display.
    let key = song_key
        .map(str::to_string)
        .or_else(|| key_directive(content))
        .map(|k| {
            transposer
                .preferred_display_spelling(&transposer.transpose_chord(&k, transpose_semitones))
        });

    let mut blocks: Vec<Block> = Vec::new();
    let mut open_section: Option<(String, Vec<RenderedLine>)> = None;

    for line in parse_chordpro(&markup) {
        match line {
            Line::SectionStart { name } => {
                // A new start while a section is open closes the old one.
                if let Some((name, lines)) = open_section.take() {
                    blocks.push(Block::Section { name, lines });
                }
                open_section = Some((translate_section_name(&name, target_hebrew), Vec::new()));
            }
            Line::SectionEnd => {
                // A stray end outside any section is ignored.
                if let Some((name, lines)) = open_section.take() {
                    blocks.push(Block::Section { name, lines });
                }
            }
            other => {
                let rendered = render_line(other, options.font_size_px, target_hebrew);
                match open_section {
                    Some((_, ref mut lines)) => lines.push(rendered),
                    None => blocks.push(Block::Line { line: rendered }),
                }
            }
        }
    }
    if let Some((name, lines)) = open_section {
        blocks.push(Block::Section { name, lines });
    }

    SongDocument {
        direction,
        key,
        blocks,
    }
}

fn render_line(line: Line, font_px: u32, target_hebrew: bool) -> RenderedLine {
    match line {
        Line::ChordLine { chords, lyrics } => RenderedLine::ChordLine {
            segments: build_segments(&chords, &lyrics, font_px),
        },
        Line::Lyrics { text } => RenderedLine::Lyrics { text },
        Line::SectionLabel { name } => RenderedLine::Label {
            name: translate_section_name(&name, target_hebrew),
        },
        Line::Empty => RenderedLine::Empty,
        // Section markers are consumed by the grouping pass above.
        Line::SectionStart { .. } | Line::SectionEnd => RenderedLine::Empty,
    }
}
