//! Chromatic transposition engine with enharmonic spelling policies.
//!
//! Two spelling policies live here and must stay distinct:
//! - per-transposition spelling follows the *input's* notation (a chord
//!   written with a flat stays flat-spelled after shifting);
//! - display spelling follows a fixed preference table (four pitch
//!   classes are conventionally shown flat) and is applied only to the
//!   key/chord label currently on screen, never to the transposition
//!   math itself.
//!
//! Malformed chord symbols are passed through unchanged at every entry
//! point — degrading gracefully mid-performance beats erroring.

/// Semitone shifts are clamped to [-11, 11] before application.
pub const MAX_SEMITONE_SHIFT: i32 = 11;

/// Immutable note-spelling tables. Injectable so alternate spelling
/// policies can be tested without touching module state.
#[derive(Debug, Clone)]
pub struct NoteTables {
    /// The 12 chromatic pitch names starting at C, sharp-spelled.
    pub chromatic: [&'static str; 12],
    /// Flat-spelled roots normalized to their sharp equivalents.
    pub flat_to_sharp: &'static [(&'static str, &'static str)],
    /// Sharp-spelled roots and their flat equivalents.
    pub sharp_to_flat: &'static [(&'static str, &'static str)],
    /// Pitch classes (by sharp spelling) conventionally displayed flat.
    pub display_flats: &'static [&'static str],
}

impl Default for NoteTables {
    fn default() -> Self {
        Self {
            chromatic: [
                "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
            ],
            flat_to_sharp: &[
                ("Db", "C#"),
                ("Eb", "D#"),
                ("Gb", "F#"),
                ("Ab", "G#"),
                ("Bb", "A#"),
            ],
            sharp_to_flat: &[
                ("C#", "Db"),
                ("D#", "Eb"),
                ("F#", "Gb"),
                ("G#", "Ab"),
                ("A#", "Bb"),
            ],
            display_flats: &["C#", "D#", "G#", "A#"],
        }
    }
}

/// The transposition engine. Stateless apart from its spelling tables;
/// cheap to construct and safe to share.
#[derive(Debug, Clone, Default)]
pub struct Transposer {
    tables: NoteTables,
}

impl Transposer {
    pub fn new(tables: NoteTables) -> Self {
        Self { tables }
    }

    /// Shift a single chord symbol by `semitones` (clamped to [-11, 11]).
    ///
    /// Slash chords transpose root and bass independently under the same
    /// spelling policy. Unresolvable roots are returned unchanged.
    pub fn transpose_chord(&self, chord: &str, semitones: i32) -> String {
        let semitones = clamp_semitones(semitones);
        if semitones == 0 {
            return chord.to_string();
        }
        // Spelling follows the input's notation: flat iff the symbol is
        // written with a flat and no sharp.
        let prefer_flat = chord.contains('b') && !chord.contains('#');
        match chord.split_once('/') {
            Some((root, bass)) => format!(
                "{}/{}",
                self.transpose_symbol(root, semitones, prefer_flat),
                self.transpose_symbol(bass, semitones, prefer_flat)
            ),
            None => self.transpose_symbol(chord, semitones, prefer_flat),
        }
    }

    /// Rewrite every bracketed `[chord]` token in the markup.
    /// Lyric text, directives and unmatched brackets are left untouched.
    pub fn transpose_all_chords(&self, markup: &str, semitones: i32) -> String {
        let semitones = clamp_semitones(semitones);
        if semitones == 0 {
            return markup.to_string();
        }
        let mut out = String::with_capacity(markup.len() + 16);
        let mut rest = markup;
        while let Some(open) = rest.find('[') {
            out.push_str(&rest[..=open]);
            rest = &rest[open + 1..];
            match rest.find(']') {
                // A token only closes on the same line.
                Some(close) if !rest[..close].contains('\n') => {
                    out.push_str(&self.transpose_chord(&rest[..close], semitones));
                    out.push(']');
                    rest = &rest[close + 1..];
                }
                _ => {}
            }
        }
        out.push_str(rest);
        out
    }

    /// Rewrite the value of any whole-line `{key: X}` directive.
    pub fn transpose_key_directive(&self, markup: &str, semitones: i32) -> String {
        let semitones = clamp_semitones(semitones);
        if semitones == 0 {
            return markup.to_string();
        }
        let rewritten: Vec<String> = markup
            .split('\n')
            .map(|line| match key_directive_value(line) {
                Some(value) => {
                    let eol = if line.ends_with('\r') { "\r" } else { "" };
                    format!(
                        "{{key: {}}}{eol}",
                        self.transpose_chord(value, semitones)
                    )
                }
                None => line.to_string(),
            })
            .collect();
        rewritten.join("\n")
    }

    /// Signed pitch-class distance from `from` to `to`, normalized into
    /// [-6, 6] (the shorter rotation direction). Returns 0 when either
    /// key is unresolvable. This is a pure lookup, not an inverse of
    /// `transpose_chord`: no spelling round-trip is guaranteed.
    pub fn semitones_between_keys(&self, from: &str, to: &str) -> i32 {
        let (from_idx, to_idx) =
            match (self.pitch_class(from), self.pitch_class(to)) {
                (Some(f), Some(t)) => (f, t),
                _ => return 0,
            };
        let distance = (to_idx - from_idx).rem_euclid(12);
        if distance > 6 {
            distance - 12
        } else {
            distance
        }
    }

    /// Apply the fixed display-preference table to a key/chord label:
    /// the four pitch classes in `display_flats` are respelled flat.
    /// Affects only what is shown, never how transposition computes.
    pub fn preferred_display_spelling(&self, symbol: &str) -> String {
        match symbol.split_once('/') {
            Some((root, bass)) => format!(
                "{}/{}",
                self.display_symbol(root),
                self.display_symbol(bass)
            ),
            None => self.display_symbol(symbol),
        }
    }

    // ─── Internals ───────────────────────────────────────────────────

    /// Transpose one root+suffix symbol (no slash). Unresolvable roots
    /// come back unchanged.
    fn transpose_symbol(&self, symbol: &str, semitones: i32, prefer_flat: bool) -> String {
        let (root, suffix) = match split_root(symbol) {
            Some(parts) => parts,
            None => return symbol.to_string(),
        };
        let index = match self.root_index(root) {
            Some(i) => i,
            None => return symbol.to_string(),
        };
        let shifted = (index + semitones).rem_euclid(12) as usize;
        let mut name = self.tables.chromatic[shifted];
        if prefer_flat {
            if let Some(&(_, flat)) = self
                .tables
                .sharp_to_flat
                .iter()
                .find(|&&(sharp, _)| sharp == name)
            {
                name = flat;
            }
        }
        format!("{name}{suffix}")
    }

    fn display_symbol(&self, symbol: &str) -> String {
        let (root, suffix) = match split_root(symbol) {
            Some(parts) => parts,
            None => return symbol.to_string(),
        };
        let index = match self.root_index(root) {
            Some(i) => i,
            None => return symbol.to_string(),
        };
        let sharp_name = self.tables.chromatic[index as usize];
        if !self.tables.display_flats.contains(&sharp_name) {
            return symbol.to_string();
        }
        let flat = self
            .tables
            .sharp_to_flat
            .iter()
            .find(|&&(sharp, _)| sharp == sharp_name)
            .map(|&(_, flat)| flat)
            .unwrap_or(sharp_name);
        format!("{flat}{suffix}")
    }

    /// Chromatic index of a root name, normalizing flat spellings first.
    fn root_index(&self, root: &str) -> Option<i32> {
        let normalized = self
            .tables
            .flat_to_sharp
            .iter()
            .find(|&&(flat, _)| flat == root)
            .map(|&(_, sharp)| sharp)
            .unwrap_or(root);
        self.tables
            .chromatic
            .iter()
            .position(|&n| n == normalized)
            .map(|i| i as i32)
    }

    /// Pitch class of a key symbol ("Bb", "F#m", "C") — the root alone.
    fn pitch_class(&self, key: &str) -> Option<i32> {
        let (root, _) = split_root(key.trim())?;
        self.root_index(root)
    }
}

/// Split a symbol into its root name (letter plus optional accidental)
/// and the remaining quality suffix. None if it doesn't start with A–G.
fn split_root(symbol: &str) -> Option<(&str, &str)> {
    let first = symbol.chars().next()?;
    if !('A'..='G').contains(&first) {
        return None;
    }
    let root_len = match symbol[1..].chars().next() {
        Some('#') | Some('b') => 2,
        _ => 1,
    };
    Some((&symbol[..root_len], &symbol[root_len..]))
}

fn clamp_semitones(semitones: i32) -> i32 {
    semitones.clamp(-MAX_SEMITONE_SHIFT, MAX_SEMITONE_SHIFT)
}

/// The value of a whole-line `{key: X}` directive, if this line is one.
/// The match is ASCII-case-insensitive on the directive name.
pub(crate) fn key_directive_value(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    let body = trimmed.strip_prefix('{')?.strip_suffix('}')?.trim();
    let (name, value) = body.split_once(':')?;
    if name.trim().eq_ignore_ascii_case("key") {
        Some(value.trim())
    } else {
        None
    }
}

// ─── Convenience free functions (default tables) ─────────────────────

/// Shift one chord symbol. See [`Transposer::transpose_chord`].
pub fn transpose_chord(chord: &str, semitones: i32) -> String {
    Transposer::default().transpose_chord(chord, semitones)
}

/// Rewrite every bracketed chord in the markup.
pub fn transpose_all_chords(markup: &str, semitones: i32) -> String {
    Transposer::default().transpose_all_chords(markup, semitones)
}

/// Rewrite any `{key: X}` directive in the markup.
pub fn transpose_key_directive(markup: &str, semitones: i32) -> String {
    Transposer::default().transpose_key_directive(markup, semitones)
}

/// Signed shortest pitch-class distance between two keys, in [-6, 6].
pub fn semitones_between_keys(from: &str, to: &str) -> i32 {
    Transposer::default().semitones_between_keys(from, to)
}

/// Respell a displayed key/chord label per the display-preference table.
pub fn preferred_display_spelling(symbol: &str) -> String {
    Transposer::default().preferred_display_spelling(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_downward_through_the_octave() {
        assert_eq!(transpose_chord("C", -1), "B");
        assert_eq!(transpose_chord("C#", -2), "B");
        assert_eq!(transpose_chord("D", -11), "D#");
    }

    #[test]
    fn spelling_follows_the_input_notation() {
        // Flat in, flat out
        assert_eq!(transpose_chord("Db", 2), "Eb");
        assert_eq!(transpose_chord("Bb", 1), "B");
        // Sharp in, sharp out
        assert_eq!(transpose_chord("C#", 2), "D#");
        assert_eq!(transpose_chord("F#", 1), "G");
    }

    #[test]
    fn slash_chord_parts_transpose_independently() {
        assert_eq!(transpose_chord("C/E", 2), "D/F#");
        assert_eq!(transpose_chord("Ab/Eb", 2), "Bb/F");
    }

    #[test]
    fn unresolvable_roots_pass_through() {
        assert_eq!(transpose_chord("H7", 3), "H7");
        assert_eq!(transpose_chord("?", 3), "?");
        assert_eq!(transpose_chord("", 3), "");
        // Bass resolves even when the root does not
        assert_eq!(transpose_chord("N.C./E", 2), "N.C./F#");
    }

    #[test]
    fn key_directive_value_matches_whole_line_only() {
        assert_eq!(key_directive_value("{key: Bb}"), Some("Bb"));
        assert_eq!(key_directive_value("  {KEY:Am}  "), Some("Am"));
        assert_eq!(key_directive_value("{c: key of Bb}"), None);
        assert_eq!(key_directive_value("la la {key: C}"), None);
    }

    #[test]
    fn alternate_tables_are_injectable() {
        let tables = NoteTables {
            display_flats: &["C#", "D#", "F#", "G#", "A#"],
            ..NoteTables::default()
        };
        let transposer = Transposer::new(tables);
        assert_eq!(transposer.preferred_display_spelling("F#"), "Gb");
        // The default table leaves F# alone
        assert_eq!(preferred_display_spelling("F#"), "F#");
    }
}
