//! JNI bindings for Android.
//!
//! These functions are called from Kotlin via the JNI bridge.

use jni::objects::{JClass, JString};
use jni::sys::{jint, jstring};
use jni::JNIEnv;

use crate::{render_song_to_json, transpose_chord};

/// Render ChordPro markup to a presentation-tree JSON string.
///
/// Called from Kotlin as:
///   external fun renderSong(content: String, transposeSemitones: Int): String?
#[no_mangle]
pub extern "system" fn Java_com_songleader_app_ChartLib_renderSong(
    mut env: JNIEnv,
    _class: JClass,
    content: JString,
    transpose_semitones: jint,
) -> jstring {
    let markup: String = match env.get_string(&content) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };

    match render_song_to_json(&markup, transpose_semitones, None) {
        Ok(json) => match env.new_string(&json) {
            Ok(js) => js.into_raw(),
            Err(_) => std::ptr::null_mut(),
        },
        Err(_) => std::ptr::null_mut(),
    }
}

/// Transpose a single chord symbol.
///
/// Called from Kotlin as:
///   external fun transposeChord(chord: String, semitones: Int): String?
#[no_mangle]
pub extern "system" fn Java_com_songleader_app_ChartLib_transposeChord(
    mut env: JNIEnv,
    _class: JClass,
    chord: JString,
    semitones: jint,
) -> jstring {
    let symbol: String = match env.get_string(&chord) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };

    let transposed = transpose_chord(&symbol, semitones);
    match env.new_string(&transposed) {
        Ok(js) => js.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}
