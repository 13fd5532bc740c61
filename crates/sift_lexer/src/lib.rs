//! Lexer for the rule language, producing [`sift_ir::TokenStream`]s.
//!
//! Whitespace other than newlines is dropped; newlines and comments are kept
//! as tokens so the stream can reproduce the source's vertical structure.
//! `include "path"` is folded into a single [`TokenTag::Include`] token whose
//! literal is the unquoted path.

use logos::Logos;
use sift_ir::{Literal, LiteralValue, TokenStream, TokenTag};
use thiserror::Error;

/// Lexing failure, reported with the byte offset of the offending input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unrecognized input at byte {offset}")]
    Unrecognized { offset: usize },
    #[error("include directive at byte {offset} is not followed by a quoted path")]
    IncludeWithoutPath { offset: usize },
    #[error("numeric literal at byte {offset} is out of range")]
    NumberOutOfRange { offset: usize },
}

#[derive(Logos, Debug, PartialEq)]
#[logos(skip r"[ \t\r]+")]
enum RawToken {
    #[token("rule")]
    KwRule,
    #[token("meta")]
    KwMeta,
    #[token("strings")]
    KwStrings,
    #[token("condition")]
    KwCondition,
    #[token("import")]
    KwImport,
    #[token("include")]
    KwInclude,
    #[token("global")]
    KwGlobal,
    #[token("private")]
    KwPrivate,
    #[token("and")]
    KwAnd,
    #[token("or")]
    KwOr,
    #[token("not")]
    KwNot,
    #[token("all")]
    KwAll,
    #[token("any")]
    KwAny,
    #[token("them")]
    KwThem,
    #[token("of")]
    KwOf,
    #[token("for")]
    KwFor,
    #[token("in")]
    KwIn,
    #[token("at")]
    KwAt,
    #[token("filesize")]
    KwFilesize,
    #[token("entrypoint")]
    KwEntrypoint,
    #[token("contains")]
    KwContains,
    #[token("matches")]
    KwMatches,
    #[token("defined")]
    KwDefined,

    #[token("true", |_| true)]
    #[token("false", |_| false)]
    Bool(bool),

    #[regex(r"[A-Za-z_][A-Za-z0-9_.]*", |lex| lex.slice().to_owned())]
    Identifier(String),
    #[regex(r"\$[A-Za-z0-9_]*\*?", |lex| lex.slice().to_owned())]
    StringId(String),

    #[regex(r#""(?:[^"\\\n]|\\.)*""#, |lex| lex.slice().to_owned())]
    Str(String),
    #[regex(r"0x[0-9A-Fa-f]+", |lex| lex.slice().to_owned())]
    Hex(String),
    #[regex(r"[0-9]+(?:KB|MB)?", |lex| lex.slice().to_owned())]
    Int(String),
    #[regex(r"[0-9]+\.[0-9]+", |lex| lex.slice().to_owned())]
    Float(String),

    #[regex(r"//[^\n]*", |lex| lex.slice().to_owned())]
    LineComment(String),
    #[regex(r"/\*[^*]*\*+(?:[^/*][^*]*\*+)*/", |lex| lex.slice().to_owned())]
    BlockComment(String),

    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token("..")]
    DotDot,
    #[token(".")]
    Dot,
    #[token("=")]
    Assign,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("~")]
    Tilde,

    #[token("\n")]
    Newline,
}

/// Lex `source` into a token stream.
///
/// A `/` lexes as the division operator everywhere except immediately after
/// `=` or `matches`, the two positions the grammar allows a regexp; there a
/// well-formed single-line `/pattern/mods` is assembled into one token.
///
/// Dotted module references (`net.http_request`) lex as one identifier
/// token; the renderer reproduces them without interior spacing either way.
pub fn tokenize(source: &str) -> Result<TokenStream, LexError> {
    let mut stream = TokenStream::new();
    let mut raw = RawToken::lexer(source);
    while let Some(item) = raw.next() {
        let offset = raw.span().start;
        let token = item.map_err(|()| LexError::Unrecognized { offset })?;
        match token {
            RawToken::Slash => {
                let anchored = matches!(
                    stream.last().map(|id| stream.get(id).tag()),
                    Some(TokenTag::Assign | TokenTag::KwMatches)
                );
                match anchored.then(|| regexp_extent(raw.remainder())).flatten() {
                    Some(len) => {
                        let text = format!("/{}", &raw.remainder()[..len]);
                        raw.bump(len);
                        stream.append(TokenTag::Regexp, Literal::str(text));
                    }
                    None => {
                        stream.append_tag(TokenTag::Slash);
                    }
                }
            }
            RawToken::KwInclude => {
                let path = match raw.next() {
                    Some(Ok(RawToken::Str(slice))) => unquote(&slice).0,
                    _ => return Err(LexError::IncludeWithoutPath { offset }),
                };
                stream.append(TokenTag::Include, Literal::str(path));
            }
            RawToken::Bool(value) => {
                stream.append(TokenTag::BoolLiteral, Literal::bool(value));
            }
            RawToken::Identifier(name) => {
                stream.append(TokenTag::Identifier, Literal::str(name));
            }
            RawToken::StringId(name) => {
                stream.append(TokenTag::StringId, Literal::str(name));
            }
            RawToken::Str(slice) => {
                let (value, exotic) = unquote(&slice);
                let literal = if exotic {
                    // Escapes the renderer would not regenerate; keep the
                    // source spelling.
                    Literal::with_formatted(LiteralValue::Str(value), slice)
                } else {
                    Literal::str(value)
                };
                stream.append(TokenTag::StrLiteral, literal);
            }
            RawToken::Hex(slice) => {
                let value = i64::from_str_radix(&slice[2..], 16)
                    .map_err(|_| LexError::NumberOutOfRange { offset })?;
                stream.append(
                    TokenTag::IntLiteral,
                    Literal::with_formatted(LiteralValue::Int(value), slice),
                );
            }
            RawToken::Int(slice) => {
                stream.append(TokenTag::IntLiteral, int_literal(&slice, offset)?);
            }
            RawToken::Float(slice) => {
                let value: f64 = slice
                    .parse()
                    .map_err(|_| LexError::NumberOutOfRange { offset })?;
                stream.append(TokenTag::FloatLiteral, Literal::float(value));
            }
            RawToken::LineComment(text) => {
                stream.append(TokenTag::Comment, Literal::str(text));
            }
            RawToken::BlockComment(text) => {
                stream.append(TokenTag::BlockComment, Literal::str(text));
            }
            other => {
                stream.append_tag(punct_tag(&other));
            }
        }
    }
    Ok(stream)
}

/// Decimal integer, optionally with a `KB`/`MB` size suffix. Suffixed forms
/// keep the source spelling.
fn int_literal(slice: &str, offset: usize) -> Result<Literal, LexError> {
    let (digits, multiplier) = if let Some(d) = slice.strip_suffix("KB") {
        (d, 1024)
    } else if let Some(d) = slice.strip_suffix("MB") {
        (d, 1024 * 1024)
    } else {
        (slice, 1)
    };
    let value = digits
        .parse::<i64>()
        .ok()
        .and_then(|v| v.checked_mul(multiplier))
        .ok_or(LexError::NumberOutOfRange { offset })?;
    if multiplier == 1 {
        Ok(Literal::int(value))
    } else {
        Ok(Literal::with_formatted(LiteralValue::Int(value), slice))
    }
}

/// Length of a regexp body starting right after an opening `/`: a non-empty
/// escaped run up to the closing `/` on the same line, plus any modifier
/// letters. `None` means the `/` was a division operator after all.
fn regexp_extent(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => return None,
            b'\\' => i += 2,
            b'/' => {
                if i == 0 {
                    return None;
                }
                let mut end = i + 1;
                while end < bytes.len() && bytes[end].is_ascii_lowercase() {
                    end += 1;
                }
                return Some(end);
            }
            _ => i += 1,
        }
    }
    None
}

/// Strip quotes and resolve escapes. The second component is true when the
/// literal used escapes beyond `\" \\ \n \t`, which the quoter cannot
/// reproduce.
fn unquote(slice: &str) -> (String, bool) {
    let inner = &slice[1..slice.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut exotic = false;
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => {
                exotic = true;
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    (out, exotic)
}

fn punct_tag(raw: &RawToken) -> TokenTag {
    match raw {
        RawToken::KwRule => TokenTag::KwRule,
        RawToken::KwMeta => TokenTag::KwMeta,
        RawToken::KwStrings => TokenTag::KwStrings,
        RawToken::KwCondition => TokenTag::KwCondition,
        RawToken::KwImport => TokenTag::KwImport,
        RawToken::KwGlobal => TokenTag::KwGlobal,
        RawToken::KwPrivate => TokenTag::KwPrivate,
        RawToken::KwAnd => TokenTag::KwAnd,
        RawToken::KwOr => TokenTag::KwOr,
        RawToken::KwNot => TokenTag::KwNot,
        RawToken::KwAll => TokenTag::KwAll,
        RawToken::KwAny => TokenTag::KwAny,
        RawToken::KwThem => TokenTag::KwThem,
        RawToken::KwOf => TokenTag::KwOf,
        RawToken::KwFor => TokenTag::KwFor,
        RawToken::KwIn => TokenTag::KwIn,
        RawToken::KwAt => TokenTag::KwAt,
        RawToken::KwFilesize => TokenTag::KwFilesize,
        RawToken::KwEntrypoint => TokenTag::KwEntrypoint,
        RawToken::KwContains => TokenTag::KwContains,
        RawToken::KwMatches => TokenTag::KwMatches,
        RawToken::KwDefined => TokenTag::KwDefined,
        RawToken::LBrace => TokenTag::LBrace,
        RawToken::RBrace => TokenTag::RBrace,
        RawToken::LParen => TokenTag::LParen,
        RawToken::RParen => TokenTag::RParen,
        RawToken::LBracket => TokenTag::LBracket,
        RawToken::RBracket => TokenTag::RBracket,
        RawToken::Colon => TokenTag::Colon,
        RawToken::Comma => TokenTag::Comma,
        RawToken::DotDot => TokenTag::DotDot,
        RawToken::Dot => TokenTag::Dot,
        RawToken::Assign => TokenTag::Assign,
        RawToken::EqEq => TokenTag::EqEq,
        RawToken::NotEq => TokenTag::NotEq,
        RawToken::Lt => TokenTag::Lt,
        RawToken::LtEq => TokenTag::LtEq,
        RawToken::Gt => TokenTag::Gt,
        RawToken::GtEq => TokenTag::GtEq,
        RawToken::Plus => TokenTag::Plus,
        RawToken::Minus => TokenTag::Minus,
        RawToken::Star => TokenTag::Star,
        RawToken::Slash => TokenTag::Slash,
        RawToken::Percent => TokenTag::Percent,
        RawToken::Amp => TokenTag::Amp,
        RawToken::Pipe => TokenTag::Pipe,
        RawToken::Caret => TokenTag::Caret,
        RawToken::Shl => TokenTag::Shl,
        RawToken::Shr => TokenTag::Shr,
        RawToken::Tilde => TokenTag::Tilde,
        RawToken::Newline => TokenTag::Newline,
        // Variants with payloads are handled before dispatch reaches here.
        _ => unreachable!("token {raw:?} carries a payload"),
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
