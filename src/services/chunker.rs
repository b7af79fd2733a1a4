//! Heading-aware markdown chunking with word-boundary overlap.

use crate::models::Chunk;

/// Split markdown content into heading-aware paragraph chunks.
///
/// Paragraphs (blank-line separated) are accumulated up to `max_size`
/// characters per chunk, with the trailing `overlap` characters of each
/// flushed chunk carried into the next one. The nearest preceding heading is
/// prepended to every chunk that does not already start with it, so chunks
/// stay self-describing when retrieved out of document order.
///
/// A single paragraph larger than `max_size` is never split; it becomes its
/// own oversized chunk.
pub fn chunk_markdown(content: &str, source: &str, max_size: usize, overlap: usize) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut current_heading = String::new();
    let mut buf = String::new();
    let mut buf_chars = 0usize;
    let mut index: i64 = 0;

    for para in split_paragraphs(content) {
        let para = para.trim();
        if para.is_empty() {
            continue;
        }

        if para.starts_with('#') {
            current_heading = para.to_string();
        }

        let para_chars = para.chars().count();

        // If adding this paragraph would exceed max_size, flush and start a
        // new chunk seeded with the tail of the previous buffer.
        if !buf.is_empty() && buf_chars + para_chars + 2 > max_size {
            flush(&buf, &current_heading, source, &mut index, &mut chunks);

            let seed = overlap_seed(&buf, overlap);
            buf.clear();
            buf.push_str(&seed);
            buf_chars = seed.chars().count();
        }

        if !buf.is_empty() {
            buf.push_str("\n\n");
            buf_chars += 2;
        }
        buf.push_str(para);
        buf_chars += para_chars;
    }

    flush(&buf, &current_heading, source, &mut index, &mut chunks);
    chunks
}

/// Emit the buffer as a chunk, prepending the current heading when the text
/// does not already start with it. Empty buffers produce nothing.
fn flush(buf: &str, heading: &str, source: &str, index: &mut i64, chunks: &mut Vec<Chunk>) {
    let text = buf.trim();
    if text.is_empty() {
        return;
    }

    let content = if !heading.is_empty() && !text.starts_with(heading) {
        format!("{heading}\n\n{text}")
    } else {
        text.to_string()
    };

    chunks.push(Chunk {
        content,
        source: source.to_string(),
        chunk_index: *index,
    });
    *index += 1;
}

/// Take the last `overlap` characters of the flushed buffer and advance past
/// the first space so the seed starts at a word boundary. The window is used
/// as-is when it contains no space; no seed when the buffer fits entirely
/// within the overlap window.
fn overlap_seed(prev: &str, overlap: usize) -> String {
    if overlap == 0 {
        return String::new();
    }
    let total = prev.chars().count();
    if total <= overlap {
        return String::new();
    }

    let tail: String = prev.chars().skip(total - overlap).collect();
    match tail.find(' ') {
        Some(pos) => tail[pos + 1..].to_string(),
        None => tail,
    }
}

/// Split on blank lines: a whitespace run containing two or more consecutive
/// newlines separates paragraphs.
fn split_paragraphs(content: &str) -> Vec<&str> {
    let mut paragraphs = Vec::new();
    let mut para_start = 0;
    let mut run_start: Option<usize> = None;
    let mut consecutive = 0;
    let mut has_break = false;

    for (i, c) in content.char_indices() {
        if c.is_whitespace() {
            if run_start.is_none() {
                run_start = Some(i);
                consecutive = 0;
                has_break = false;
            }
            if c == '\n' {
                consecutive += 1;
                if consecutive >= 2 {
                    has_break = true;
                }
            } else {
                consecutive = 0;
            }
        } else if let Some(start) = run_start.take()
            && has_break
        {
            paragraphs.push(&content[para_start..start]);
            para_start = i;
        }
    }
    paragraphs.push(&content[para_start..]);
    paragraphs
}
