//! Layout inference and text generation for rule token streams.
//!
//! [`infer_newlines`] runs the one-shot structural layout pass over a
//! [`sift_ir::TokenStream`]; [`render`] composes the stream into rule-language
//! text, aligning trailing comments and optionally expanding include
//! directives in place.

mod layout;
mod render;
mod spacing;

pub use layout::{infer_newlines, LayoutConfig};
pub use render::{render, RenderOptions};
