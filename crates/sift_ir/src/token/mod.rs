//! Token types for sift rules.

mod tag;

pub use tag::TokenTag;

use std::fmt;

use crate::literal::quote;
use crate::{Literal, TokenStream};

/// A token: a category plus a literal value.
///
/// Identity is positional — two tokens may be content-identical yet
/// distinct. Tokens are created only through [`TokenStream`] insertion
/// operations (or moved in whole via `push_back`/`splice`), never attached
/// to more than one stream.
///
/// `Include` tokens may carry the included document as an owned sub-stream;
/// for every other tag the sub-stream is absent.
pub struct Token {
    tag: TokenTag,
    literal: Literal,
    include: Option<Box<TokenStream>>,
}

impl Token {
    #[inline]
    pub fn new(tag: TokenTag, literal: Literal) -> Self {
        Token {
            tag,
            literal,
            include: None,
        }
    }

    #[inline]
    pub fn tag(&self) -> TokenTag {
        self.tag
    }

    #[inline]
    pub fn literal(&self) -> &Literal {
        &self.literal
    }

    /// Attach the included document to an `Include` token.
    ///
    /// # Panics
    ///
    /// Panics if this token is not an include directive.
    pub fn attach_include(&mut self, document: TokenStream) {
        assert!(
            self.tag == TokenTag::Include,
            "cannot attach a sub-stream to a {:?} token",
            self.tag
        );
        self.include = Some(Box::new(document));
    }

    /// The included document, if one is attached.
    #[inline]
    pub fn include(&self) -> Option<&TokenStream> {
        self.include.as_deref()
    }

    /// Mutable access to the included document.
    #[inline]
    pub fn include_mut(&mut self) -> Option<&mut TokenStream> {
        self.include.as_deref_mut()
    }

    /// The token's individual textual form, ignoring layout.
    ///
    /// Fixed-spelling tags render their spelling; string literals render
    /// quoted and escaped unless an original spelling was preserved; include
    /// directives render verbatim (`include "path"`), never their contents.
    pub fn text(&self) -> String {
        match self.tag {
            TokenTag::StrLiteral => match self.literal.formatted() {
                Some(formatted) => formatted.to_string(),
                None => match self.literal.value() {
                    crate::LiteralValue::Str(raw) => quote(raw),
                    other => {
                        // Malformed producer input renders as-is, not as an error.
                        Literal::new(other.clone()).text()
                    }
                },
            },
            TokenTag::Include => format!("include {}", quote(&self.literal.text())),
            _ => match self.tag.spelling() {
                Some(spelling) => spelling.to_string(),
                None => self.literal.text(),
            },
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tag.spelling().is_some() {
            write!(f, "{:?}", self.tag)
        } else {
            write!(f, "{:?}({:?})", self.tag, self.literal)
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
