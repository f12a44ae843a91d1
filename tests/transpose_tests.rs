//! Integration tests for the transposition engine: chord shifting,
//! markup rewriting, key distances, and the two spelling policies.

use chartlib::{
    preferred_display_spelling, semitones_between_keys, strip_chords, transpose_all_chords,
    transpose_chord, transpose_key_directive,
};

const ALL_KEYS: &[&str] = &[
    "C", "C#", "Db", "D", "D#", "Eb", "E", "F", "F#", "Gb", "G", "G#", "Ab", "A", "A#", "Bb", "B",
];

// ─── Single chords ──────────────────────────────────────────────────

#[test]
fn transposes_the_documented_examples() {
    assert_eq!(transpose_chord("Bb", 2), "C");
    assert_eq!(transpose_chord("C#", -1), "C");
    assert_eq!(transpose_chord("Am7/E", 3), "Cm7/G");
}

#[test]
fn zero_semitones_is_the_identity() {
    for symbol in ["C", "Bb", "F#m7", "Am7/E", "H7", "", "not a chord"] {
        assert_eq!(transpose_chord(symbol, 0), symbol);
    }
}

#[test]
fn round_trip_preserves_the_pitch_class() {
    for key in ALL_KEYS {
        for n in -11..=11 {
            let there_and_back = transpose_chord(&transpose_chord(key, n), -n);
            assert_eq!(
                semitones_between_keys(key, &there_and_back),
                0,
                "{key} shifted by {n} and back landed on {there_and_back}"
            );
        }
    }
}

#[test]
fn quality_suffix_rides_along_unchanged() {
    assert_eq!(transpose_chord("Csus4", 2), "Dsus4");
    assert_eq!(transpose_chord("F#m7b5", 1), "Gm7b5");
    assert_eq!(transpose_chord("Gadd9", -2), "Fadd9");
}

#[test]
fn shifts_outside_the_range_are_clamped() {
    assert_eq!(transpose_chord("C", 23), transpose_chord("C", 11));
    assert_eq!(transpose_chord("C", 23), "B");
    assert_eq!(transpose_chord("C", -23), "C#");
}

#[test]
fn malformed_chords_pass_through_unchanged() {
    for symbol in ["H7", "do", "?", "123", "b", "#"] {
        assert_eq!(transpose_chord(symbol, 5), symbol);
    }
}

// ─── Markup rewriting ───────────────────────────────────────────────

#[test]
fn rewrites_every_bracketed_chord() {
    assert_eq!(transpose_all_chords("[C]He[G]y", 2), "[D]He[A]y");
    assert_eq!(
        transpose_all_chords("[Am]שלום [G]עולם", 2),
        "[Bm]שלום [A]עולם"
    );
}

#[test]
fn transposition_never_changes_the_lyrics() {
    let markup = "{key: G}\n[G]Swing [D/F#]low, sweet [Em]chari[Bm]ot\nplain line\n[C]comin' for to carry me [G]home";
    for n in [-11, -5, 0, 3, 7, 11] {
        assert_eq!(
            strip_chords(&transpose_all_chords(markup, n)),
            strip_chords(markup),
            "lyrics drifted at {n} semitones"
        );
    }
}

#[test]
fn key_directive_is_rewritten_in_place() {
    assert_eq!(
        transpose_key_directive("{key: C}\nHello", 2),
        "{key: D}\nHello"
    );
    assert_eq!(
        transpose_key_directive("intro\n  {Key: Am}  \noutro", 2),
        "intro\n{key: Bm}\noutro"
    );
    // Lines that merely mention a key are not directives
    assert_eq!(
        transpose_key_directive("the key: C is nice", 2),
        "the key: C is nice"
    );
}

// ─── Key distances ──────────────────────────────────────────────────

#[test]
fn distance_from_a_key_to_itself_is_zero() {
    for key in ALL_KEYS {
        assert_eq!(semitones_between_keys(key, key), 0);
    }
}

#[test]
fn distance_takes_the_shorter_rotation() {
    assert_eq!(semitones_between_keys("C", "D"), 2);
    assert_eq!(semitones_between_keys("C", "G"), -5);
    assert_eq!(semitones_between_keys("G", "C"), 5);
    assert_eq!(semitones_between_keys("C", "F#"), 6);
    assert_eq!(semitones_between_keys("Bb", "A#"), 0);
}

#[test]
fn unknown_keys_yield_zero_distance() {
    assert_eq!(semitones_between_keys("X", "C"), 0);
    assert_eq!(semitones_between_keys("C", ""), 0);
}

// ─── Display spelling ───────────────────────────────────────────────

#[test]
fn four_pitch_classes_are_displayed_flat() {
    assert_eq!(preferred_display_spelling("C#"), "Db");
    assert_eq!(preferred_display_spelling("D#m"), "Ebm");
    assert_eq!(preferred_display_spelling("G#7"), "Ab7");
    assert_eq!(preferred_display_spelling("A#"), "Bb");
    // F# is not in the preference table
    assert_eq!(preferred_display_spelling("F#"), "F#");
    assert_eq!(preferred_display_spelling("D"), "D");
}

#[test]
fn display_spelling_covers_slash_chords_and_malformed_input() {
    assert_eq!(preferred_display_spelling("C#/G#"), "Db/Ab");
    assert_eq!(preferred_display_spelling("nonsense"), "nonsense");
}

#[test]
fn display_spelling_is_independent_of_transposition_spelling() {
    // Transposing a sharp-written chord keeps sharps even when the
    // display table would prefer the flat name for that pitch class.
    assert_eq!(transpose_chord("C#", 2), "D#");
    assert_eq!(preferred_display_spelling(&transpose_chord("C#", 2)), "Eb");
}
