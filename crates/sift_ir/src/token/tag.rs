//! Token categories for sift rules.

use std::fmt;

/// Closed enumeration of lexical kinds.
///
/// The tag is the only thing the layout pass and the find operations look
/// at; values live in the token's [`Literal`](crate::Literal).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenTag {
    // Section keywords
    KwRule,
    KwMeta,
    KwStrings,
    KwCondition,

    // Other keywords
    KwImport,
    KwGlobal,
    KwPrivate,
    KwAnd,
    KwOr,
    KwNot,
    KwAll,
    KwAny,
    KwThem,
    KwOf,
    KwFor,
    KwIn,
    KwAt,
    KwFilesize,
    KwEntrypoint,
    KwContains,
    KwMatches,
    KwDefined,

    /// Module or rule identifier: `pe`, `silent_banker`
    Identifier,
    /// String identifier: `$a`
    StringId,

    // Literals (values carried in the Literal)
    StrLiteral,
    Regexp,
    IntLiteral,
    FloatLiteral,
    BoolLiteral,

    // Punctuation
    LBrace,   // {
    RBrace,   // }
    LParen,   // (
    RParen,   // )
    LBracket, // [
    RBracket, // ]
    Colon,    // :
    Comma,    // ,
    Dot,      // .
    DotDot,   // ..
    Assign,   // =

    // Operators
    EqEq,    // ==
    NotEq,   // !=
    Lt,      // <
    LtEq,    // <=
    Gt,      // >
    GtEq,    // >=
    Plus,    // +
    Minus,   // -
    Star,    // *
    Slash,   // /
    Percent, // %
    Amp,     // &
    Pipe,    // |
    Caret,   // ^
    Shl,     // <<
    Shr,     // >>
    Tilde,   // ~

    /// Line comment, text stored verbatim including `//`.
    Comment,
    /// Block comment, text stored verbatim including `/*` and `*/`.
    BlockComment,
    /// Explicit newline marker.
    Newline,
    /// Include directive: one token for the whole `include "path"` statement,
    /// optionally carrying the included document as a sub-stream.
    Include,
}

impl TokenTag {
    /// The fixed spelling of this tag, or `None` when the spelling comes
    /// from the token's literal (identifiers, literals, comments, includes).
    pub const fn spelling(self) -> Option<&'static str> {
        match self {
            TokenTag::KwRule => Some("rule"),
            TokenTag::KwMeta => Some("meta"),
            TokenTag::KwStrings => Some("strings"),
            TokenTag::KwCondition => Some("condition"),
            TokenTag::KwImport => Some("import"),
            TokenTag::KwGlobal => Some("global"),
            TokenTag::KwPrivate => Some("private"),
            TokenTag::KwAnd => Some("and"),
            TokenTag::KwOr => Some("or"),
            TokenTag::KwNot => Some("not"),
            TokenTag::KwAll => Some("all"),
            TokenTag::KwAny => Some("any"),
            TokenTag::KwThem => Some("them"),
            TokenTag::KwOf => Some("of"),
            TokenTag::KwFor => Some("for"),
            TokenTag::KwIn => Some("in"),
            TokenTag::KwAt => Some("at"),
            TokenTag::KwFilesize => Some("filesize"),
            TokenTag::KwEntrypoint => Some("entrypoint"),
            TokenTag::KwContains => Some("contains"),
            TokenTag::KwMatches => Some("matches"),
            TokenTag::KwDefined => Some("defined"),
            TokenTag::LBrace => Some("{"),
            TokenTag::RBrace => Some("}"),
            TokenTag::LParen => Some("("),
            TokenTag::RParen => Some(")"),
            TokenTag::LBracket => Some("["),
            TokenTag::RBracket => Some("]"),
            TokenTag::Colon => Some(":"),
            TokenTag::Comma => Some(","),
            TokenTag::Dot => Some("."),
            TokenTag::DotDot => Some(".."),
            TokenTag::Assign => Some("="),
            TokenTag::EqEq => Some("=="),
            TokenTag::NotEq => Some("!="),
            TokenTag::Lt => Some("<"),
            TokenTag::LtEq => Some("<="),
            TokenTag::Gt => Some(">"),
            TokenTag::GtEq => Some(">="),
            TokenTag::Plus => Some("+"),
            TokenTag::Minus => Some("-"),
            TokenTag::Star => Some("*"),
            TokenTag::Slash => Some("/"),
            TokenTag::Percent => Some("%"),
            TokenTag::Amp => Some("&"),
            TokenTag::Pipe => Some("|"),
            TokenTag::Caret => Some("^"),
            TokenTag::Shl => Some("<<"),
            TokenTag::Shr => Some(">>"),
            TokenTag::Tilde => Some("~"),
            TokenTag::Newline => Some("\n"),
            TokenTag::Identifier
            | TokenTag::StringId
            | TokenTag::StrLiteral
            | TokenTag::Regexp
            | TokenTag::IntLiteral
            | TokenTag::FloatLiteral
            | TokenTag::BoolLiteral
            | TokenTag::Comment
            | TokenTag::BlockComment
            | TokenTag::Include => None,
        }
    }

    /// Check if this tag is a comment of either flavour.
    #[inline]
    pub fn is_comment(self) -> bool {
        matches!(self, TokenTag::Comment | TokenTag::BlockComment)
    }

    /// Check if this tag introduces a rule body section.
    #[inline]
    pub fn is_section_keyword(self) -> bool {
        matches!(
            self,
            TokenTag::KwMeta | TokenTag::KwStrings | TokenTag::KwCondition
        )
    }
}

impl fmt::Display for TokenTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.spelling() {
            Some("\n") => f.write_str("newline"),
            Some(s) => f.write_str(s),
            None => write!(f, "{self:?}"),
        }
    }
}
