//! sift IR — the editable intermediate representation for sift rules.
//!
//! This crate contains the data structures shared by the sift toolchain:
//! - `TokenTag` and `Literal` as the leaf value types
//! - `Token` pairing the two (plus the include sub-stream)
//! - `TokenStream`, the mutable handle-addressable document
//! - static per-module attribute catalogs
//!
//! # Design Philosophy
//!
//! - **Handles, not indices**: a `TokenId` is a node identity; edits
//!   anywhere else in the document never invalidate it.
//! - **Trust the producer**: no grammar-level sequencing checks; malformed
//!   sequences render as malformed text, not as errors.
//! - **Single owner, single thread**: a stream exclusively owns its tokens;
//!   concurrent construction uses independent streams combined via splice.

mod literal;
pub mod modules;
mod stream;
mod token;

pub use literal::{quote, Literal, LiteralValue};
pub use stream::{Iter, TokenId, TokenStream};
pub use token::{Token, TokenTag};
