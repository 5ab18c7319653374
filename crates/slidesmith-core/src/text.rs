//! Bullet-range translation for content slides.
//!
//! A content block uses leading tab characters to signal nesting depth.
//! The remote API addresses text by character offset, and applying a
//! bullet edit with a nesting level consumes the line's leading tabs, so
//! the running cursor advances by the visible line length only. Blank
//! lines stay in the inserted text untouched and advance the cursor by
//! their raw length.

use serde::Serialize;

/// One `createParagraphBullets` edit: a fixed character range plus the
/// nesting level derived from leading tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BulletRange {
    pub start: usize,
    pub end: usize,
    pub level: usize,
}

/// Translate a content block into per-line bullet ranges, in line order.
///
/// Blank lines (after trimming) emit no range. Emitted ranges never
/// overlap and are monotonically non-decreasing in `start`.
pub fn compute_bullet_ranges(text: &str) -> Vec<BulletRange> {
    let mut ranges = Vec::new();
    let mut cursor = 0usize;

    for line in text.split('\n') {
        if line.trim().is_empty() {
            cursor += line.chars().count() + 1;
            continue;
        }

        let level = line.chars().take_while(|c| *c == '\t').count();
        let visible = line.trim_start_matches('\t').trim_end();
        let length = visible.chars().count();

        ranges.push(BulletRange {
            start: cursor,
            end: cursor + length,
            level,
        });

        cursor += length + 1;
    }

    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_spans_trimmed_length() {
        let ranges = compute_bullet_ranges("hello world  ");
        assert_eq!(
            ranges,
            vec![BulletRange {
                start: 0,
                end: 11,
                level: 0
            }]
        );
    }

    #[test]
    fn nested_line_keeps_cursor_aligned() {
        let ranges = compute_bullet_ranges("a\n\tb\nc");
        assert_eq!(
            ranges,
            vec![
                BulletRange {
                    start: 0,
                    end: 1,
                    level: 0
                },
                BulletRange {
                    start: 2,
                    end: 3,
                    level: 1
                },
                BulletRange {
                    start: 4,
                    end: 5,
                    level: 0
                },
            ]
        );
    }

    #[test]
    fn blank_lines_advance_without_emitting() {
        let ranges = compute_bullet_ranges("first\n\n  \nsecond");
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].start, 0);
        assert_eq!(ranges[0].end, 5);
        // 6 for "first\n", 1 for the empty line, 3 for "  \n"
        assert_eq!(ranges[1].start, 10);
        assert_eq!(ranges[1].end, 16);
        assert_eq!(ranges[1].level, 0);
    }

    #[test]
    fn whitespace_only_input_yields_nothing() {
        assert!(compute_bullet_ranges("").is_empty());
        assert!(compute_bullet_ranges("\n\n   \n\t\n").is_empty());
    }
}
