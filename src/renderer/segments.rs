//! Segment builder — converts one chord line into reflow-safe inline
//! segments that keep each chord glyph visually attached to the syllable
//! it precedes, even when the rendering surface wraps the line.

use crate::model::{ChordEvent, Connector, Segment};

use super::constants::*;

/// Build the segment sequence for one chord line.
///
/// Chords are processed in offset order; each owns the lyric span up to
/// the next chord (or end of line). Lyric text before the first chord
/// becomes a plain text segment, and a line with no chords at all yields
/// a single text segment. `font_px` scales the glyph-width estimates
/// used for hyphen padding.
pub fn build_segments(chords: &[ChordEvent], lyrics: &str, font_px: u32) -> Vec<Segment> {
    if chords.is_empty() {
        if lyrics.is_empty() {
            return Vec::new();
        }
        return vec![Segment::Text {
            content: lyrics.to_string(),
        }];
    }

    let mut sorted: Vec<&ChordEvent> = chords.iter().collect();
    sorted.sort_by_key(|c| c.offset);

    let chars: Vec<char> = lyrics.chars().collect();
    let total = chars.len();
    let mut segments: Vec<Segment> = Vec::new();

    let first_offset = sorted[0].offset.min(total);
    if first_offset > 0 {
        segments.push(Segment::Text {
            content: chars[..first_offset].iter().collect(),
        });
    }

    for (i, event) in sorted.iter().enumerate() {
        let start = event.offset.min(total);
        let end = sorted
            .get(i + 1)
            .map_or(total, |next| next.offset.min(total))
            .max(start);
        segments.push(Segment::ChordText {
            chord: event.chord.clone(),
            text: chars[start..end].iter().collect(),
            connector: Connector::None,
            wide_spacing: false,
        });
    }

    apply_word_safety(&mut segments, font_px);
    apply_trailing_break(&mut segments);
    segments
}

/// For every pair of adjacent chord segments whose boundary splits a
/// word (no whitespace on either side): join them with a word joiner so
/// the renderer never wraps there, then either hyphen-pad the left
/// segment when its chord glyph overhangs the attached syllable, or mark
/// bare/punctuation-only members for wide spacing instead.
fn apply_word_safety(segments: &mut [Segment], font_px: u32) {
    let scale = font_px as f64 / REFERENCE_FONT_PX;

    for i in 0..segments.len().saturating_sub(1) {
        let (left_chord, left_text) = match &segments[i] {
            Segment::ChordText { chord, text, .. } => (chord.clone(), text.clone()),
            _ => continue,
        };
        let right_text = match &segments[i + 1] {
            Segment::ChordText { text, .. } => text.clone(),
            _ => continue,
        };

        let ws_left = left_text.chars().last().is_some_and(char::is_whitespace);
        let ws_right = right_text.chars().next().is_some_and(char::is_whitespace);
        if ws_left || ws_right {
            continue;
        }

        let left_bare = is_spacer_text(&left_text);
        let connector = if left_bare {
            Connector::WordJoiner
        } else {
            let chord_width = left_chord.chars().count() as f64 * CHORD_CHAR_WIDTH * scale;
            let text_width = visual_char_count(&left_text) as f64 * LYRIC_CHAR_WIDTH * scale;
            if chord_width > text_width {
                let run = ((chord_width - text_width) / (HYPHEN_WIDTH * scale)).ceil() as usize;
                Connector::Hyphens(run.clamp(MIN_PAD_HYPHENS, MAX_PAD_HYPHENS))
            } else {
                Connector::WordJoiner
            }
        };

        if let Segment::ChordText {
            connector: c,
            wide_spacing,
            ..
        } = &mut segments[i]
        {
            *c = connector;
            if left_bare {
                *wide_spacing = true;
            }
        }
        if is_spacer_text(&right_text) {
            if let Segment::ChordText { wide_spacing, .. } = &mut segments[i + 1] {
                *wide_spacing = true;
            }
        }
    }
}

/// A trailing run of two or more bare-chord segments gets a forced break
/// in front of it; a single trailing bare chord does not.
fn apply_trailing_break(segments: &mut Vec<Segment>) {
    let run = segments
        .iter()
        .rev()
        .take_while(|seg| matches!(seg, Segment::ChordText { text, .. } if is_spacer_text(text)))
        .count();
    if run >= 2 && run < segments.len() {
        segments.insert(segments.len() - run, Segment::LineBreak);
    }
}

/// Empty, or nothing but punctuation/whitespace.
fn is_spacer_text(text: &str) -> bool {
    text.chars().all(|c| !c.is_alphanumeric())
}

/// Character count as rendered: Hebrew diacritical marks (U+0591–U+05C7)
/// stack on their base letter and add no width.
fn visual_char_count(text: &str) -> usize {
    text.chars()
        .filter(|c| !('\u{0591}'..='\u{05C7}').contains(c))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chord(symbol: &str, offset: usize) -> ChordEvent {
        ChordEvent {
            chord: symbol.to_string(),
            offset,
        }
    }

    #[test]
    fn spacer_text_detection() {
        assert!(is_spacer_text(""));
        assert!(is_spacer_text("  "));
        assert!(is_spacer_text("-!,"));
        assert!(!is_spacer_text("a"));
        assert!(!is_spacer_text("שלום"));
    }

    #[test]
    fn diacritics_do_not_count_toward_visual_width() {
        // bet + qamats + dagesh + alef: four chars, two rendered glyphs
        assert_eq!(visual_char_count("בָּא"), 2);
        assert_eq!(visual_char_count("abc"), 3);
    }

    #[test]
    fn out_of_range_offsets_are_clamped() {
        let segments = build_segments(&[chord("C", 99)], "hey", 16);
        let rebuilt: String = segments.iter().map(|s| s.lyric_text()).collect();
        assert_eq!(rebuilt, "hey");
    }
}
