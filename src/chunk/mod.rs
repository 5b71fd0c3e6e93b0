//! Text chunking
//!
//! Splits normalized document text into bounded, overlapping segments while:
//! - Preferring paragraph, then sentence, then word boundaries over hard cuts
//! - Carrying overlap between consecutive chunks to preserve continuity
//! - Producing stable, deterministic boundaries

mod boundaries;

pub use boundaries::*;

/// Split text into chunks of at most `max_size` characters, with consecutive
/// chunks sharing roughly `overlap` characters of context.
///
/// Text shorter than `max_size` yields exactly one chunk equal to the (trimmed)
/// input. Empty or whitespace-only input yields an empty vector; the caller is
/// responsible for treating that as an ingestion failure.
pub fn split(text: &str, max_size: usize, overlap: usize) -> Vec<String> {
    if max_size == 0 {
        return Vec::new();
    }
    let overlap = overlap.min(max_size - 1);

    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    if text.len() <= max_size {
        return vec![text.to_string()];
    }

    let break_points = find_break_points(text);

    let mut chunks = Vec::new();
    let mut start = 0;

    while start < text.len() {
        start = ensure_char_boundary(text, start);
        if start >= text.len() {
            break;
        }

        let target = start + max_size;
        let end = if target >= text.len() {
            text.len()
        } else {
            find_best_break(text, start, max_size, &break_points)
        };
        let end = ensure_char_boundary(text, end);
        if end <= start {
            break;
        }

        let piece = text[start..end].trim();
        if !piece.is_empty() {
            chunks.push(piece.to_string());
        }

        if end >= text.len() {
            break;
        }

        let mut next = if end > overlap {
            ensure_char_boundary(text, end - overlap)
        } else {
            end
        };
        // Overlap must never stall the walk
        if next <= start {
            next = end;
        }
        start = next;
    }

    chunks
}

/// Ensure a position is on a valid UTF-8 character boundary
fn ensure_char_boundary(text: &str, pos: usize) -> usize {
    if pos >= text.len() {
        return text.len();
    }
    let mut adjusted = pos;
    while adjusted > 0 && !text.is_char_boundary(adjusted) {
        adjusted -= 1;
    }
    adjusted
}

/// Find the best break point for a chunk starting at `start`.
///
/// Searches the window between 80% and 100% of `max_size` for the
/// highest-priority catalogued break point, preferring the latest position at
/// equal priority. Falls back to the nearest word boundary, then to a hard
/// character cut at `max_size`.
fn find_best_break(
    text: &str,
    start: usize,
    max_size: usize,
    break_points: &[BreakPoint],
) -> usize {
    let target = ensure_char_boundary(text, std::cmp::min(start + max_size, text.len()));
    let min_pos = ensure_char_boundary(text, start + (max_size * 4 / 5));

    let best = break_points
        .iter()
        .filter(|p| p.position > min_pos && p.position <= target)
        .max_by_key(|p| (p.priority, p.position));

    if let Some(point) = best {
        return point.position;
    }

    // Fall back to the last word boundary in the window
    if min_pos < target {
        let window = &text[min_pos..target];
        if let Some((i, _)) = window.rmatch_indices(' ').next() {
            let pos = min_pos + i + 1;
            if pos > start && text.is_char_boundary(pos) {
                return pos;
            }
        }
    }

    target
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_single_chunk() {
        let chunks = split("This is a short document.", 1000, 200);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], "This is a short document.");
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(split("", 1000, 200).is_empty());
        assert!(split("   \n\t  ", 1000, 200).is_empty());
    }

    #[test]
    fn test_text_exactly_max_size() {
        let text = "a".repeat(1000);
        let chunks = split(&text, 1000, 200);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], text);
    }

    #[test]
    fn test_long_text_respects_max_size() {
        let text: String = (0..200)
            .map(|i| format!("Sentence number {} has some words. ", i))
            .collect();
        let chunks = split(&text, 1000, 200);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.len() <= 1000, "chunk too long: {}", chunk.len());
        }
    }

    #[test]
    fn test_consecutive_chunks_overlap() {
        let text: String = (0..200)
            .map(|i| format!("Sentence number {} has some words. ", i))
            .collect();
        let chunks = split(&text, 1000, 200);

        for pair in chunks.windows(2) {
            // The head of each chunk repeats context from the tail of the
            // previous one (boundary snapping may shave a few characters).
            let head: String = pair[1].chars().take(80).collect();
            assert!(
                pair[0].contains(head.trim()),
                "no shared context between consecutive chunks"
            );
        }
    }

    #[test]
    fn test_chunks_cover_original_in_order() {
        let text: String = (0..200)
            .map(|i| format!("Sentence number {} has some words. ", i))
            .collect();
        let text = text.trim().to_string();
        let chunks = split(&text, 1000, 200);

        let mut prev_end = 0;
        let mut search_from = 0;
        for chunk in &chunks {
            let pos = text[search_from..]
                .find(chunk.as_str())
                .map(|p| p + search_from)
                .expect("every chunk is a substring of the input");
            // Each chunk starts at or before the previous chunk's end,
            // leaving no uncovered gap.
            assert!(pos <= prev_end, "gap between chunks at byte {}", pos);
            prev_end = pos + chunk.len();
            search_from = pos + 1;
        }
        assert_eq!(prev_end, text.len());
    }

    #[test]
    fn test_prefers_paragraph_boundaries() {
        let para = format!("{}\n\n{}", "alpha beta gamma. ".repeat(10), "x".repeat(500));
        let chunks = split(&para, 200, 20);

        // First break lands on a paragraph or sentence edge, not mid-word
        assert!(chunks[0].ends_with('.') || chunks[0].ends_with("gamma"));
    }

    #[test]
    fn test_deterministic() {
        let text = "Lorem ipsum dolor sit amet. ".repeat(100);
        assert_eq!(split(&text, 500, 50), split(&text, 500, 50));
    }

    #[test]
    fn test_multibyte_input_stays_on_char_boundaries() {
        let text = "héllo wörld déjà vu. ".repeat(100);
        let chunks = split(&text, 300, 50);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(text.contains(chunk.as_str()));
        }
    }

    #[test]
    fn test_overlap_clamped_below_max_size() {
        // overlap >= max_size would stall; the splitter clamps it
        let text = "word ".repeat(100);
        let chunks = split(&text, 50, 50);
        assert!(chunks.len() > 1);
    }

    #[test]
    fn test_three_thousand_chars_yield_three_to_four_chunks() {
        let body = "Revenue grew twelve percent this quarter. ".repeat(72);
        let text = format!("Description: Quarterly report\n\n{}", body);
        assert!(text.len() > 3000);

        let chunks = split(&text[..3000], 1000, 200);
        assert!(
            (3..=4).contains(&chunks.len()),
            "expected 3-4 chunks, got {}",
            chunks.len()
        );
    }
}
