/*!
 * Content shredding for whole-file translation.
 *
 * Fenced code blocks are cut out as static chunks. The prose around them is
 * split on blank-line paragraph separators and greedily packed into
 * translatable chunks that stay within a length budget. Concatenating the
 * chunks in order always reproduces the input exactly.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Default chunk budget, in characters
pub const DEFAULT_MAX_LENGTH: usize = 1000;

/// Triple-backtick fence with an optional language tag
static CODE_BLOCK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```[a-zA-Z0-9#+]*\n?.*?\n?```").unwrap()
});

static PARAGRAPH_SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n\s*\n|\r\n\s*\r\n").unwrap()
});

/// Whether a chunk goes to the translator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind {
    Translatable,
    Static,
}

/// A contiguous span of the shredded content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownChunk {
    pub content: String,
    pub kind: ChunkKind,
}

impl MarkdownChunk {
    pub fn translatable(content: impl Into<String>) -> Self {
        Self { content: content.into(), kind: ChunkKind::Translatable }
    }

    pub fn fixed(content: impl Into<String>) -> Self {
        Self { content: content.into(), kind: ChunkKind::Static }
    }

    pub fn is_translatable(&self) -> bool {
        self.kind == ChunkKind::Translatable
    }
}

impl fmt::Display for MarkdownChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}]: {}", self.kind, self.content.replace('\n', "\\n"))
    }
}

/// Splits content into translatable and static chunks
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownShredder;

impl MarkdownShredder {
    pub fn new() -> Self {
        Self
    }

    /// Shred content into chunks of at most `max_length` characters
    ///
    /// A single paragraph longer than the budget becomes its own chunk; it is
    /// never split.
    pub fn shred(&self, content: &str, max_length: usize) -> Vec<MarkdownChunk> {
        let mut chunks = Vec::new();
        let mut cursor = 0;

        for code_block in CODE_BLOCK_REGEX.find_iter(content) {
            shred_prose(&content[cursor..code_block.start()], max_length, &mut chunks);
            chunks.push(MarkdownChunk::fixed(code_block.as_str()));
            cursor = code_block.end();
        }
        shred_prose(&content[cursor..], max_length, &mut chunks);

        chunks
    }
}

fn shred_prose(prose: &str, max_length: usize, chunks: &mut Vec<MarkdownChunk>) {
    if prose.is_empty() {
        return;
    }

    let mut packer = ChunkPacker::new(max_length, chunks);
    let mut cursor = 0;

    for separator in PARAGRAPH_SEPARATOR_REGEX.find_iter(prose) {
        packer.push_paragraph(&prose[cursor..separator.start()]);
        packer.push_separator(separator.as_str());
        cursor = separator.end();
    }
    packer.push_paragraph(&prose[cursor..]);
    packer.flush();
}

/// Greedy accumulator for paragraphs and separators
struct ChunkPacker<'a> {
    max_length: usize,
    buffer: String,
    buffer_length: usize,
    chunks: &'a mut Vec<MarkdownChunk>,
}

impl<'a> ChunkPacker<'a> {
    fn new(max_length: usize, chunks: &'a mut Vec<MarkdownChunk>) -> Self {
        Self {
            max_length,
            buffer: String::new(),
            buffer_length: 0,
            chunks,
        }
    }

    fn push_paragraph(&mut self, paragraph: &str) {
        if paragraph.is_empty() {
            return;
        }

        let length = paragraph.chars().count();
        self.flush_if_overflowing(length);

        if length > self.max_length {
            self.chunks.push(MarkdownChunk::translatable(paragraph));
        } else {
            self.append(paragraph, length);
        }
    }

    fn push_separator(&mut self, separator: &str) {
        let length = separator.chars().count();
        self.flush_if_overflowing(length);
        self.append(separator, length);
    }

    fn flush_if_overflowing(&mut self, incoming: usize) {
        if self.buffer_length > 0 && self.buffer_length + incoming > self.max_length {
            self.flush();
        }
    }

    fn append(&mut self, text: &str, length: usize) {
        self.buffer.push_str(text);
        self.buffer_length += length;
    }

    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        self.chunks.push(MarkdownChunk::translatable(std::mem::take(&mut self.buffer)));
        self.buffer_length = 0;
    }
}
