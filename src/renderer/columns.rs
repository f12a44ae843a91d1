//! Column splitting — halves a song by raw line count for two-column
//! layout. A deliberate simplicity trade-off: the split point ignores
//! rendered height and section boundaries, so columns can come out
//! uneven when sections vary in density. Each half is parsed, rendered
//! and auto-fit independently; there is no cross-column balancing pass.

use crate::model::Line;

/// Split raw markup into two halves at `ceil(line_count / 2)`.
pub fn split_for_two_columns(content: &str) -> (String, String) {
    let lines: Vec<&str> = content.lines().collect();
    let mid = (lines.len() + 1) / 2;
    (lines[..mid].join("\n"), lines[mid..].join("\n"))
}

/// Split an already-parsed line sequence the same way.
pub fn split_lines(lines: &[Line]) -> (Vec<Line>, Vec<Line>) {
    let mid = (lines.len() + 1) / 2;
    (lines[..mid].to_vec(), lines[mid..].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_counts_put_the_extra_line_in_the_first_half() {
        let (first, second) = split_for_two_columns("a\nb\nc\nd\ne");
        assert_eq!(first, "a\nb\nc");
        assert_eq!(second, "d\ne");
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(split_for_two_columns(""), (String::new(), String::new()));
        let (first, second) = split_for_two_columns("only");
        assert_eq!(first, "only");
        assert_eq!(second, "");
    }
}
