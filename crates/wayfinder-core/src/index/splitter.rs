//! Passage splitting for embedding
//!
//! Splits document text into overlapping passages, preferring paragraph,
//! then line, then sentence, then word boundaries before hard cuts.

/// Splitting configuration
pub const PASSAGE_SIZE_CHARS: usize = 500;
pub const PASSAGE_OVERLAP_CHARS: usize = 50;

/// Boundary preference, coarse to fine
const SEPARATORS: [&str; 4] = ["\n\n", "\n", ". ", " "];

/// Split text into passages using the default size and overlap
pub fn split_passages(text: &str) -> Vec<String> {
    split_with(text, PASSAGE_SIZE_CHARS, PASSAGE_OVERLAP_CHARS)
}

/// Split text into passages of at most `size` bytes with `overlap` bytes
/// carried between consecutive passages
pub fn split_with(text: &str, size: usize, overlap: usize) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    if text.len() <= size {
        return vec![text.trim().to_string()];
    }

    let mut fragments = Vec::new();
    split_recursive(text, size, &SEPARATORS, &mut fragments);
    merge_fragments(&fragments, size, overlap)
}

/// Break text into fragments no longer than `size`, splitting on the
/// coarsest separator that appears before descending to finer ones
fn split_recursive<'a>(
    text: &'a str,
    size: usize,
    separators: &[&str],
    out: &mut Vec<&'a str>,
) {
    if text.len() <= size {
        if !text.trim().is_empty() {
            out.push(text);
        }
        return;
    }

    let Some((sep, finer)) = separators.split_first() else {
        hard_cut(text, size, out);
        return;
    };

    if !text.contains(sep) {
        split_recursive(text, size, finer, out);
        return;
    }

    let mut start = 0;
    for (pos, _) in text.match_indices(sep) {
        let end = pos + sep.len();
        if end <= start {
            continue;
        }
        emit(&text[start..end], size, finer, out);
        start = end;
    }
    if start < text.len() {
        emit(&text[start..], size, finer, out);
    }
}

fn emit<'a>(part: &'a str, size: usize, finer: &[&str], out: &mut Vec<&'a str>) {
    if part.len() <= size {
        if !part.trim().is_empty() {
            out.push(part);
        }
    } else {
        split_recursive(part, size, finer, out);
    }
}

/// Last resort: cut at byte offsets snapped to char boundaries
fn hard_cut<'a>(text: &'a str, size: usize, out: &mut Vec<&'a str>) {
    let mut start = 0;
    while start < text.len() {
        let mut end = floor_char_boundary(text, (start + size).min(text.len()));
        if end <= start {
            end = ceil_char_boundary(text, start + 1);
        }
        out.push(&text[start..end]);
        start = end;
    }
}

/// Greedily pack fragments into passages, keeping up to `overlap` bytes of
/// trailing fragments as the start of the next passage
fn merge_fragments(fragments: &[&str], size: usize, overlap: usize) -> Vec<String> {
    let mut passages = Vec::new();
    let mut window: std::collections::VecDeque<&str> = std::collections::VecDeque::new();
    let mut window_len = 0usize;

    for &fragment in fragments {
        if !window.is_empty() && window_len + fragment.len() > size {
            push_passage(&window, &mut passages);
            while !window.is_empty()
                && (window_len > overlap || window_len + fragment.len() > size)
            {
                let front = window.pop_front().unwrap();
                window_len -= front.len();
            }
        }
        window.push_back(fragment);
        window_len += fragment.len();
    }

    if window_len > 0 {
        push_passage(&window, &mut passages);
    }

    passages
}

fn push_passage(window: &std::collections::VecDeque<&str>, passages: &mut Vec<String>) {
    let text: String = window.iter().copied().collect();
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        passages.push(trimmed.to_string());
    }
}

/// Find a valid char boundary at or before the given byte index
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Find a valid char boundary at or after the given byte index
fn ceil_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}
