//! chartlib — ChordPro parser, transposition, and lead-sheet layout
//! library for SongLeader.
//!
//! Takes line-oriented ChordPro markup (bracketed chords inline with
//! lyrics, `{...}` directives) and produces a renderable presentation
//! tree, with chromatic transposition, Hebrew/Latin bidirectional text
//! support, and an auto-fit that picks the largest font size — and,
//! failing that, a second column — keeping a song inside a fixed
//! height budget.
//!
//! # Example
//! ```
//! use chartlib::{render_song, RenderOptions};
//!
//! let markup = "{soc: Verse 1}\n[C]Hello [G]world\n{eoc}";
//! let doc = render_song(markup, 2, None, RenderOptions::default());
//! println!("Direction: {:?}", doc.direction);
//! println!("Blocks: {}", doc.blocks.len());
//! ```

pub mod model;
pub mod parser;
pub mod renderer;
pub mod sections;
pub mod transpose;

#[cfg(target_os = "android")]
pub mod android;

pub use model::*;
pub use parser::{parse_chordpro, strip_chords};
pub use renderer::{
    build_segments, columns_for_screen, fit_font_size, fit_font_size_bounded, fit_page,
    render_song, split_for_two_columns, split_lines, EstimatedMeasure, FitController, MeasureFn,
    MeasureHeight, PageFit, RecomputeTrigger, RenderOptions, MAX_FIT_FONT_PX, MIN_FIT_FONT_PX,
};
pub use sections::translate_section_name;
pub use transpose::{
    preferred_display_spelling, semitones_between_keys, transpose_all_chords, transpose_chord,
    transpose_key_directive, NoteTables, Transposer,
};

/// Convert a rendered document to a JSON string.
/// Useful for passing data across FFI boundaries.
pub fn document_to_json(document: &SongDocument) -> Result<String, String> {
    serde_json::to_string_pretty(document).map_err(|e| format!("JSON serialization error: {e}"))
}

/// Render ChordPro markup and serialize the presentation tree to JSON.
/// Convenience function combining rendering and serialization for the
/// app shells.
pub fn render_song_to_json(
    content: &str,
    transpose_semitones: i32,
    song_key: Option<&str>,
) -> Result<String, String> {
    let document = render_song(
        content,
        transpose_semitones,
        song_key,
        RenderOptions::default(),
    );
    document_to_json(&document)
}

// ═══════════════════════════════════════════════════════════════════════
// C FFI — for iOS (static library) and Android (JNI)
// ═══════════════════════════════════════════════════════════════════════

use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};

/// Render ChordPro markup and return the presentation tree as a JSON
/// C string. The caller must free the returned string with
/// `chartlib_free_string`.
///
/// # Safety
/// `content` must be a valid null-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn chartlib_render_song(
    content: *const c_char,
    transpose_semitones: c_int,
) -> *mut c_char {
    if content.is_null() {
        return std::ptr::null_mut();
    }
    let c_str = unsafe { CStr::from_ptr(content) };
    let markup = match c_str.to_str() {
        Ok(s) => s,
        Err(_) => return std::ptr::null_mut(),
    };

    match render_song_to_json(markup, transpose_semitones, None) {
        Ok(json) => CString::new(json).unwrap_or_default().into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Transpose a single chord symbol and return it as a C string.
/// The caller must free the returned string with `chartlib_free_string`.
///
/// # Safety
/// `chord` must be a valid null-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn chartlib_transpose_chord(
    chord: *const c_char,
    semitones: c_int,
) -> *mut c_char {
    if chord.is_null() {
        return std::ptr::null_mut();
    }
    let c_str = unsafe { CStr::from_ptr(chord) };
    let symbol = match c_str.to_str() {
        Ok(s) => s,
        Err(_) => return std::ptr::null_mut(),
    };

    let transposed = transpose_chord(symbol, semitones);
    CString::new(transposed).unwrap_or_default().into_raw()
}

/// Free a string previously returned by chartlib functions.
///
/// # Safety
/// `ptr` must be a string previously returned by a chartlib function,
/// or null.
#[no_mangle]
pub unsafe extern "C" fn chartlib_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    }
}
