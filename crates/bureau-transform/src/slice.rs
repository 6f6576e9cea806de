//! Character-position slicing of packed strings.
//!
//! Offsets count Unicode scalar values, so accented names in a debt record
//! never split a multi-byte sequence.

use bureau_model::FieldSpan;

/// Characters in `[start, end)`, truncated to the end of `value`.
///
/// ```
/// use bureau_transform::slice_chars;
///
/// assert_eq!(slice_chars("2ABCDEF", 1, 4), "ABC");
/// assert_eq!(slice_chars("2AB", 1, 10), "AB");
/// assert_eq!(slice_chars("2AB", 5, 10), "");
/// ```
pub fn slice_chars(value: &str, start: usize, end: usize) -> &str {
    if start >= end {
        return "";
    }
    let mut indices = value.char_indices().map(|(idx, _)| idx);
    let Some(from) = indices.nth(start) else {
        return "";
    };
    let to = indices.nth(end - start - 1).unwrap_or(value.len());
    &value[from..to]
}

/// Character at `index`, if `value` is long enough.
pub fn char_at(value: &str, index: usize) -> Option<&str> {
    let (from, ch) = value.char_indices().nth(index)?;
    Some(&value[from..from + ch.len_utf8()])
}

/// Decode one span. Ranges truncate; single positions past the end are absent.
pub fn extract_span(value: &str, span: FieldSpan) -> Option<&str> {
    match span {
        FieldSpan::Range { start, end } => Some(slice_chars(value, start, end)),
        FieldSpan::Single { index } => char_at(value, index),
    }
}
