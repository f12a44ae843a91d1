//! ChordPro parser — converts line-oriented markup into the Line sequence.
//!
//! A single forward pass, line by line. Only section markers, comment
//! directives and bracketed chords are interpreted; every other `{...}`
//! directive is dropped silently. Parsing is total: no input string may
//! produce an error or a panic.

use crate::model::{ChordEvent, Line};

/// Start-of-chorus directive names (an optional `: Name` may follow).
const SECTION_START_NAMES: &[&str] = &["soc", "start_of_chorus", "start-of-chorus"];
/// End-of-chorus directive names.
const SECTION_END_NAMES: &[&str] = &["eoc", "end_of_chorus", "end-of-chorus"];
/// Comment directive names, producing an inline label.
const LABEL_NAMES: &[&str] = &["c", "comment"];

/// Section name used when a start marker carries none.
const DEFAULT_SECTION_NAME: &str = "Chorus";

/// Parse ChordPro markup into an ordered sequence of typed lines.
pub fn parse_chordpro(markup: &str) -> Vec<Line> {
    markup.lines().filter_map(parse_line).collect()
}

/// Parse one raw line. Returns None for inert directives.
fn parse_line(raw: &str) -> Option<Line> {
    let trimmed = raw.trim();

    if let Some(body) = directive_body(trimmed) {
        // Comment/label directives win over everything else.
        if let Some(label) = directive_value(body, LABEL_NAMES) {
            return Some(Line::SectionLabel {
                name: label.to_string(),
            });
        }
        if let Some(name) = directive_value(body, SECTION_START_NAMES) {
            let name = if name.is_empty() {
                DEFAULT_SECTION_NAME.to_string()
            } else {
                name.to_string()
            };
            return Some(Line::SectionStart { name });
        }
        if directive_value(body, SECTION_END_NAMES).is_some() {
            return Some(Line::SectionEnd);
        }
        // Any other directive is inert.
        return None;
    }

    if trimmed.is_empty() {
        return Some(Line::Empty);
    }
    if raw.contains('[') {
        return Some(parse_chord_line(raw));
    }
    Some(Line::Lyrics {
        text: raw.to_string(),
    })
}

/// The inner text of a `{...}` line, or None if this line is not a
/// whole-line directive.
fn directive_body(trimmed: &str) -> Option<&str> {
    let body = trimmed.strip_prefix('{')?.strip_suffix('}')?;
    Some(body.trim())
}

/// Match a directive body against a set of names, ASCII-case-insensitively.
/// `"soc: Verse 1"` matched against `["soc", ...]` yields `Some("Verse 1")`;
/// a bare `"soc"` yields `Some("")`. Returns None on no match.
fn directive_value<'a>(body: &'a str, names: &[&str]) -> Option<&'a str> {
    let (name, value) = match body.split_once(':') {
        Some((name, value)) => (name.trim(), value.trim()),
        None => (body, ""),
    };
    names
        .iter()
        .any(|n| name.eq_ignore_ascii_case(n))
        .then_some(value)
}

/// Extract `[chord]` tokens from a lyric line.
///
/// Each chord's offset is recorded as a character index into the lyric
/// text *being built* — i.e. the original position minus the cumulative
/// length of previously removed tokens (bracket text plus the two
/// delimiters). An unmatched `[` is kept as literal lyric text.
fn parse_chord_line(raw: &str) -> Line {
    let mut chords: Vec<ChordEvent> = Vec::new();
    let mut lyrics = String::with_capacity(raw.len());
    let mut lyric_chars = 0usize;
    let mut rest = raw;

    loop {
        match rest.find('[') {
            None => {
                lyrics.push_str(rest);
                break;
            }
            Some(open) => {
                let before = &rest[..open];
                lyric_chars += before.chars().count();
                lyrics.push_str(before);
                rest = &rest[open + 1..];
                match rest.find(']') {
                    Some(close) => {
                        let token = &rest[..close];
                        if !token.is_empty() {
                            chords.push(ChordEvent {
                                chord: normalize_chord(token),
                                offset: lyric_chars,
                            });
                        }
                        rest = &rest[close + 1..];
                    }
                    None => {
                        lyrics.push('[');
                        lyric_chars += 1;
                    }
                }
            }
        }
    }

    Line::ChordLine { chords, lyrics }
}

/// Normalize minor-chord notation: an uppercase `M` immediately after
/// the root that is not the start of `Maj` becomes lowercase, so `AM7`
/// reads `Am7` while `FMaj7` is left alone.
fn normalize_chord(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let mut i = 0;
    if matches!(chars.first(), Some(c) if ('A'..='G').contains(c)) {
        i += 1;
        if matches!(chars.get(i), Some('#') | Some('b')) {
            i += 1;
        }
        if chars.get(i) == Some(&'M') {
            let follows_aj = chars.get(i + 1) == Some(&'a') && chars.get(i + 2) == Some(&'j');
            if !follows_aj {
                let mut normalized: String = chars[..i].iter().collect();
                normalized.push('m');
                normalized.extend(&chars[i + 1..]);
                return normalized;
            }
        }
    }
    token.to_string()
}

/// Remove only `[...]` chord tokens from the markup, leaving all other
/// text — directive lines included — untouched. Used by search/indexing
/// collaborators that want plain lyrics.
pub fn strip_chords(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut rest = markup;
    while let Some(open) = rest.find('[') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find(']') {
            // Same matching rule as the parser: a token closes on its line.
            Some(close) if !after[..close].contains('\n') => {
                rest = &after[close + 1..];
            }
            _ => {
                out.push('[');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// The value of the first `{key: X}` directive in the markup, if any.
pub fn key_directive(markup: &str) -> Option<String> {
    markup
        .lines()
        .find_map(crate::transpose::key_directive_value)
        .map(str::to_string)
}
