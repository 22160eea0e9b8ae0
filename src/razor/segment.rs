/*!
 * Segmentation of classified view lines.
 *
 * Consecutive lines of one kind form a segment; the localizer rewrites or
 * passes through a whole segment at a time.
 */

use super::line::{classify_lines, Line, LineKind};

/// A maximal run of consecutive lines sharing one classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    lines: Vec<Line>,
}

impl Segment {
    fn start(line: Line) -> Self {
        Self { lines: vec![line] }
    }

    /// Classification shared by every line of the segment
    pub fn kind(&self) -> LineKind {
        self.lines[0].kind
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// The first line, trimmed at the start
    pub fn first_line_trimmed(&self) -> &str {
        self.lines[0].raw.trim_start()
    }

    /// Lines joined with `\n`, without carriage returns or a trailing terminator
    pub fn joined(&self) -> String {
        self.lines
            .iter()
            .map(Line::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Terminator of the segment's last line
    pub fn line_ending(&self) -> &'static str {
        match self.lines.last() {
            Some(line) if line.ends_with_crlf() => "\r\n",
            _ => "\n",
        }
    }
}

/// Group classified lines into segments, preserving order
pub fn segment_lines(lines: Vec<Line>) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();

    for line in lines {
        match segments.last_mut() {
            Some(current) if current.kind() == line.kind => current.lines.push(line),
            _ => segments.push(Segment::start(line)),
        }
    }

    segments
}

/// Classify a view and group its lines into segments
pub fn classify_and_segment(content: &str) -> Vec<Segment> {
    segment_lines(classify_lines(content))
}
