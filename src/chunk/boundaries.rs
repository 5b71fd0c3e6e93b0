//! Break point detection for chunking

/// Priority levels for break points
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BreakPriority {
    /// Word boundary (lowest)
    Word = 1,
    /// Sentence boundary
    Sentence = 2,
    /// Paragraph boundary (highest)
    Paragraph = 3,
}

/// A potential break point in text
#[derive(Debug, Clone)]
pub struct BreakPoint {
    /// Byte position
    pub position: usize,
    /// Priority of this break point
    pub priority: BreakPriority,
}

impl BreakPoint {
    pub fn new(position: usize, priority: BreakPriority) -> Self {
        Self { position, priority }
    }
}

/// Find potential break points in the text, sorted by position.
///
/// Paragraph breaks (blank lines) rank above sentence enders. Word
/// boundaries are not catalogued here; they are searched on demand as a
/// fallback near the target split position.
pub fn find_break_points(text: &str) -> Vec<BreakPoint> {
    let mut points = Vec::new();

    for (i, _) in text.match_indices("\n\n") {
        let pos = i + 2;
        if text.is_char_boundary(pos) {
            points.push(BreakPoint::new(pos, BreakPriority::Paragraph));
        }
    }

    for pattern in [". ", ".\n", "? ", "?\n", "! ", "!\n"] {
        for (i, _) in text.match_indices(pattern) {
            let pos = i + 2;
            if text.is_char_boundary(pos) {
                points.push(BreakPoint::new(pos, BreakPriority::Sentence));
            }
        }
    }

    points.sort_by_key(|p| p.position);
    points.dedup_by(|a, b| {
        // Keep the higher-priority point when positions collide
        if a.position == b.position {
            if a.priority > b.priority {
                b.priority = a.priority;
            }
            true
        } else {
            false
        }
    });

    points
}
