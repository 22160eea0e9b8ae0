/*!
 * Tests for content chunking
 */

use viewlingo::shredder::{ChunkKind, MarkdownShredder, DEFAULT_MAX_LENGTH};

/// Every translatable chunk stays within budget unless it is a single paragraph
#[test]
fn test_shred_withManyParagraphs_shouldRespectBudget() {
    let content = (1..=40)
        .map(|index| format!("Paragraph number {} with some prose.", index))
        .collect::<Vec<_>>()
        .join("\n\n");

    let chunks = MarkdownShredder::new().shred(&content, 120);

    assert!(chunks.len() > 1);
    for chunk in &chunks {
        assert_eq!(chunk.kind, ChunkKind::Translatable);
        assert!(chunk.content.chars().count() <= 120, "chunk too long: {:?}", chunk.content);
    }
    let rebuilt: String = chunks.iter().map(|chunk| chunk.content.as_str()).collect();
    assert_eq!(rebuilt, content);
}

#[test]
fn test_shred_withSeveralCodeBlocks_shouldMarkEachStatic() {
    let content = "Intro\n\n```rust\nfn main() {}\n```\n\nMiddle\n\n```\nplain\n```";

    let chunks = MarkdownShredder::new().shred(content, DEFAULT_MAX_LENGTH);
    let kinds: Vec<ChunkKind> = chunks.iter().map(|chunk| chunk.kind).collect();

    assert_eq!(
        kinds,
        vec![
            ChunkKind::Translatable,
            ChunkKind::Static,
            ChunkKind::Translatable,
            ChunkKind::Static,
        ]
    );
    assert_eq!(chunks[1].content, "```rust\nfn main() {}\n```");
    assert_eq!(chunks[3].content, "```\nplain\n```");
}

#[test]
fn test_shred_withUnclosedFence_shouldTreatItAsProse() {
    let content = "Text\n\n```\nnever closed";
    let chunks = MarkdownShredder::new().shred(content, DEFAULT_MAX_LENGTH);

    assert_eq!(chunks.len(), 1);
    assert!(chunks[0].is_translatable());
    assert_eq!(chunks[0].content, content);
}

#[test]
fn test_shred_withHtmlContent_shouldKeepBlankLineSeparators() {
    let content = "<h1>Title</h1>\n\n<p>Body</p>\n";
    let chunks = MarkdownShredder::new().shred(content, 16);

    let rebuilt: String = chunks.iter().map(|chunk| chunk.content.as_str()).collect();
    assert_eq!(rebuilt, content);
    assert_eq!(chunks[0].content, "<h1>Title</h1>\n\n");
}
