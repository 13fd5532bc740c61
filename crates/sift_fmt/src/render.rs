//! Text generation with comment alignment.
//!
//! A single pass over the stream produces the composed document view. The
//! layout pass runs first (once, latch-guarded) if it has not yet executed;
//! rendering is otherwise a pure read of the stream.
//!
//! Trailing comments are withheld in a pool while a contiguous run of
//! commented lines lasts; when the run ends (a line without a trailing
//! comment, or stream end) the pool is flushed with every comment padded to
//! the maximal natural column seen in the run.

use sift_ir::{Token, TokenStream, TokenTag};

use crate::layout::{infer_newlines, LayoutConfig};
use crate::spacing::space_between;

/// Rendering configuration: two independent flags.
#[derive(Copy, Clone, Debug)]
pub struct RenderOptions {
    /// Substitute each include directive with the referenced document's own
    /// rendered text instead of emitting the directive verbatim.
    pub expand_includes: bool,
    /// Column-align trailing comments instead of natural placement.
    pub align_comments: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            expand_includes: false,
            align_comments: true,
        }
    }
}

/// Render the stream to rule-language text.
///
/// Invokes the layout pass (on the stream and, when expanding, on include
/// sub-streams) if it has not run yet; that is the only mutation.
pub fn render(stream: &mut TokenStream, options: RenderOptions) -> String {
    tracing::trace!(
        expand = options.expand_includes,
        align = options.align_comments,
        tokens = stream.len(),
        "rendering stream"
    );
    ensure_layout(stream, &LayoutConfig::default(), options.expand_includes);
    render_prepared(stream, options)
}

/// Latch-guarded layout, recursing into include sub-streams when they will
/// be expanded.
fn ensure_layout(stream: &mut TokenStream, config: &LayoutConfig, recurse: bool) {
    infer_newlines(stream, config);
    if !recurse {
        return;
    }
    let ids: Vec<_> = stream.iter().map(|(id, _)| id).collect();
    for id in ids {
        if let Some(sub) = stream.get_mut(id).include_mut() {
            ensure_layout(sub, config, recurse);
        }
    }
}

fn render_prepared(stream: &TokenStream, options: RenderOptions) -> String {
    let mut printer = Printer::new(options);
    printer.walk(stream);
    printer.finish()
}

/// A comment withheld from output, waiting for its run to end.
struct PendingComment {
    /// Index of the line it belongs to (`lines.len()` = the current line).
    line: usize,
    /// Natural 0-based column at which it was encountered.
    column: usize,
    text: String,
}

/// Per-render text generation state.
struct Printer {
    options: RenderOptions,
    /// Completed lines; the line counter is their count.
    lines: Vec<String>,
    /// The line under construction; the column counter is its width.
    current: String,
    /// Brace nesting, drives line-start indentation.
    depth: usize,
    /// Tag of the previous token on the current line.
    prev: Option<TokenTag>,
    comment_on_line: bool,
    pool: Vec<PendingComment>,
    max_comment_column: usize,
}

impl Printer {
    fn new(options: RenderOptions) -> Self {
        Printer {
            options,
            lines: Vec::new(),
            current: String::new(),
            depth: 0,
            prev: None,
            comment_on_line: false,
            pool: Vec::new(),
            max_comment_column: 0,
        }
    }

    fn walk(&mut self, stream: &TokenStream) {
        let mut tokens = stream.iter().peekable();
        while let Some((_, token)) = tokens.next() {
            let trailing = match tokens.peek() {
                None => true,
                Some((_, next)) => next.tag() == TokenTag::Newline,
            };
            match token.tag() {
                TokenTag::Newline => self.end_line(),
                tag if tag.is_comment() => self.comment(token, trailing),
                TokenTag::Include => match token.include() {
                    Some(sub) if self.options.expand_includes => {
                        self.expand_include(sub);
                    }
                    _ => self.token(token),
                },
                _ => self.token(token),
            }
        }
    }

    /// Ordinary token: indentation or separator, then its textual form.
    fn token(&mut self, token: &Token) {
        let tag = token.tag();
        if tag == TokenTag::RBrace {
            self.depth = self.depth.saturating_sub(1);
        }
        self.separate(tag);
        self.current.push_str(&token.text());
        if tag == TokenTag::LBrace {
            self.depth += 1;
        }
        self.prev = Some(tag);
    }

    fn separate(&mut self, tag: TokenTag) {
        if self.current.is_empty() {
            for _ in 0..self.depth {
                self.current.push('\t');
            }
        } else if let Some(prev) = self.prev {
            if space_between(prev, tag) {
                self.current.push(' ');
            }
        }
    }

    /// Comment token: pooled when alignment is on and it ends a line of
    /// content, emitted at its natural column otherwise. A comment in the
    /// middle of a line is document content and is never reordered.
    fn comment(&mut self, token: &Token, trailing: bool) {
        if self.options.align_comments && trailing && !self.current.is_empty() {
            let column = self.current.len() + 1;
            self.max_comment_column = self.max_comment_column.max(column);
            self.pool.push(PendingComment {
                line: self.lines.len(),
                column,
                text: token.text(),
            });
            self.comment_on_line = true;
        } else {
            self.separate(token.tag());
            self.current.push_str(&token.text());
            self.prev = Some(token.tag());
        }
    }

    /// Substitute the included document's rendered text in place.
    fn expand_include(&mut self, sub: &TokenStream) {
        let text = render_prepared(sub, self.options);
        let trimmed = text.strip_suffix('\n').unwrap_or(&text);
        for (i, part) in trimmed.split('\n').enumerate() {
            if i > 0 {
                self.end_line();
            }
            self.current.push_str(part);
        }
        self.prev = Some(TokenTag::Include);
    }

    /// Explicit newline: complete the line, reset the column, and close the
    /// comment run if this line carried no trailing comment.
    fn end_line(&mut self) {
        let line = std::mem::take(&mut self.current);
        self.lines.push(line);
        if !self.comment_on_line {
            self.flush_pool();
        }
        self.comment_on_line = false;
        self.prev = None;
    }

    /// Emit every pooled comment, padded to start at the maximal recorded
    /// column.
    fn flush_pool(&mut self) {
        for pending in self.pool.drain(..) {
            let target = if pending.line == self.lines.len() {
                &mut self.current
            } else {
                &mut self.lines[pending.line]
            };
            let pad = self.max_comment_column.saturating_sub(pending.column - 1);
            for _ in 0..pad {
                target.push(' ');
            }
            target.push_str(&pending.text);
        }
        self.max_comment_column = 0;
    }

    fn finish(mut self) -> String {
        self.flush_pool();
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&self.current);
        out
    }
}
