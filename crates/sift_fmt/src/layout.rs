//! One-shot newline inference.
//!
//! Programmatically assembled streams usually carry no layout at all. This
//! pass scans for structural boundary tags and inserts the `Newline` tokens
//! a readable rendering needs, exactly once per stream: the stream's layout
//! latch makes re-invocation a no-op, regardless of edits made in between.
//! Edits performed after the pass must insert their own newlines — that is
//! a documented responsibility boundary, not a bug.
//!
//! Boundary classification is purely by token tag, independent of
//! provenance, so rebuilt and hand-edited documents format identically.

use rustc_hash::FxHashSet;
use sift_ir::{TokenId, TokenStream, TokenTag};

/// The boundary-tag table driving section detection.
///
/// `newline_before` tags start a new line (section keywords, closing
/// brace); `newline_after` tags end one (braces). The default covers the
/// rule grammar's structural shape; callers with a different dialect can
/// pass their own table to [`infer_newlines`].
#[derive(Clone, Debug)]
pub struct LayoutConfig {
    pub newline_before: Vec<TokenTag>,
    pub newline_after: Vec<TokenTag>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            newline_before: vec![
                TokenTag::KwRule,
                TokenTag::KwMeta,
                TokenTag::KwStrings,
                TokenTag::KwCondition,
                TokenTag::RBrace,
            ],
            newline_after: vec![TokenTag::LBrace, TokenTag::RBrace],
        }
    }
}

/// Run the layout pass: insert the newlines missing around boundary tags.
///
/// Idempotent via the stream's layout latch; a boundary already carrying an
/// adjacent newline is never duplicated. Every externally held handle stays
/// valid — insertion is the only mutation.
pub fn infer_newlines(stream: &mut TokenStream, config: &LayoutConfig) {
    if stream.layout_done() {
        tracing::trace!("layout latch already set, skipping");
        return;
    }

    let before: FxHashSet<TokenTag> = config.newline_before.iter().copied().collect();
    let after: FxHashSet<TokenTag> = config.newline_after.iter().copied().collect();

    // Collect boundaries first, then edit. Adjacency is re-checked at
    // application time: a newline inserted before one boundary may already
    // satisfy the preceding boundary's trailing side.
    let boundaries: Vec<TokenId> = stream
        .iter()
        .filter(|(_, token)| before.contains(&token.tag()) || after.contains(&token.tag()))
        .map(|(id, _)| id)
        .collect();

    let mut inserted = 0usize;
    for id in &boundaries {
        let id = *id;
        if before.contains(&stream.get(id).tag()) && needs_newline_before(stream, id) {
            stream.insert_before(id, TokenTag::Newline, sift_ir::Literal::str("\n"));
            inserted += 1;
        }
    }
    for id in &boundaries {
        let id = *id;
        if !after.contains(&stream.get(id).tag()) || !needs_newline_after(stream, id) {
            continue;
        }
        match stream.successor(id) {
            Some(next) => {
                stream.insert_before(next, TokenTag::Newline, sift_ir::Literal::str("\n"));
            }
            None => {
                stream.append_tag(TokenTag::Newline);
            }
        }
        inserted += 1;
    }

    tracing::debug!(inserted, "layout pass complete");
    stream.mark_layout_done();
}

fn needs_newline_before(stream: &TokenStream, id: TokenId) -> bool {
    match stream.predecessor(id) {
        // A boundary at the very start needs no leading blank line.
        None => false,
        Some(prev) => stream.get(prev).tag() != TokenTag::Newline,
    }
}

fn needs_newline_after(stream: &TokenStream, id: TokenId) -> bool {
    match stream.successor(id) {
        None => true,
        Some(next) => {
            let tag = stream.get(next).tag();
            // A trailing comment stays glued to its line; its own newline
            // follows it.
            tag != TokenTag::Newline && !tag.is_comment()
        }
    }
}
