//! Field selection on delimited lines
//!
//! Picks one 1-based field out of a line before it is parsed as a number.
//! Every case where extraction does not apply falls back to the whole line.

/// Return field `field_index` (1-based) of `line` split on `delimiter`.
///
/// The line is returned unchanged when the index is disabled (`<= 0`), the
/// line is empty, the delimiter does not occur in the line, or the index is
/// past the last field. An empty delimiter makes every character a field.
/// The selected piece is not trimmed.
pub fn extract_field<'a>(line: &'a str, delimiter: &str, field_index: i64) -> &'a str {
    if field_index <= 0 || line.is_empty() {
        return line;
    }

    let n = usize::try_from(field_index - 1).unwrap_or(0);
    if delimiter.is_empty() {
        return nth_char(line, n);
    }
    if !line.contains(delimiter) {
        return line;
    }

    line.split(delimiter).nth(n).unwrap_or(line)
}

fn nth_char(line: &str, n: usize) -> &str {
    // A single character is one field, same as a missing delimiter
    if line.chars().nth(1).is_none() {
        return line;
    }
    match line.char_indices().nth(n) {
        Some((start, c)) => &line[start..start + c.len_utf8()],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_first_field() {
        assert_eq!(extract_field("id,name,note", ",", 1), "id");
        assert_eq!(extract_field("id,name,note", ",", 2), "name");
        assert_eq!(extract_field("id,name,note", ",", 3), "note");
    }

    #[test]
    fn test_out_of_range_passes_through() {
        assert_eq!(extract_field("id,name,note", ",", 4), "id,name,note");
        assert_eq!(extract_field("id,name,note", ",", 100), "id,name,note");
    }

    #[test]
    fn test_missing_delimiter_passes_through() {
        assert_eq!(extract_field("id,name,note", "\t", 1), "id,name,note");
        assert_eq!(extract_field("42", ",", 2), "42");
    }

    #[test]
    fn test_empty_line() {
        assert_eq!(extract_field("", ",", 2), "");
    }

    #[test]
    fn test_disabled_index() {
        assert_eq!(extract_field("1,2,3", ",", 0), "1,2,3");
        assert_eq!(extract_field("1,2,3", ",", -3), "1,2,3");
    }

    #[test]
    fn test_no_trimming_of_piece() {
        assert_eq!(extract_field("a, 2 ,c", ",", 2), " 2 ");
    }

    #[test]
    fn test_multi_character_delimiter() {
        assert_eq!(extract_field("1::2::3", "::", 3), "3");
    }

    #[test]
    fn test_empty_delimiter_splits_characters() {
        assert_eq!(extract_field("123", "", 1), "1");
        assert_eq!(extract_field("123", "", 2), "2");
        assert_eq!(extract_field("123", "", 3), "3");
        assert_eq!(extract_field("héllo", "", 2), "é");
    }

    #[test]
    fn test_empty_delimiter_passes_through() {
        assert_eq!(extract_field("123", "", 4), "123");
        assert_eq!(extract_field("7", "", 1), "7");
        assert_eq!(extract_field("123", "", 0), "123");
    }

    #[test]
    fn test_empty_pieces_are_kept() {
        assert_eq!(extract_field("1,,3", ",", 2), "");
        assert_eq!(extract_field("1,2,", ",", 3), "");
    }
}
