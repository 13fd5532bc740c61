//! Declarative inter-token spacing.
//!
//! The renderer separates adjacent tokens on a line with a single space
//! unless the pair matches one of the suppression rules below. The table is
//! the single source of truth for spacing decisions; the renderer itself
//! never special-cases token pairs.

use sift_ir::TokenTag;

/// Tags that never take a space after them.
const NO_SPACE_AFTER: &[TokenTag] = &[
    TokenTag::LParen,
    TokenTag::LBracket,
    TokenTag::Dot,
    TokenTag::DotDot,
    TokenTag::Tilde,
];

/// Tags that never take a space before them.
const NO_SPACE_BEFORE: &[TokenTag] = &[
    TokenTag::RParen,
    TokenTag::RBracket,
    TokenTag::Comma,
    TokenTag::Colon,
    TokenTag::Dot,
    TokenTag::DotDot,
    TokenTag::LBracket,
];

/// Decide whether a single space separates `left` and `right`.
pub(crate) fn space_between(left: TokenTag, right: TokenTag) -> bool {
    if NO_SPACE_AFTER.contains(&left) || NO_SPACE_BEFORE.contains(&right) {
        return false;
    }
    // Call syntax: `uint32(0)`, `sandbox.network.http_get(/re/)`.
    if left == TokenTag::Identifier && right == TokenTag::LParen {
        return false;
    }
    true
}
