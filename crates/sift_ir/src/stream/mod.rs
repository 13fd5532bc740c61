//! The editable token stream.
//!
//! [`TokenStream`] is the logical document: an ordered sequence of tokens
//! over a free-list slab of doubly linked nodes. Externally held
//! [`TokenId`] handles are node identities, never positional indices, so no
//! insertion or removal elsewhere in the stream ever invalidates them.
//! Splicing moves a donor's nodes into the receiver's slab and re-registers
//! the donor's ids there, which is what keeps fragment-local handles valid
//! after assembly.
//!
//! Absence of a match in the find family is an ordinary `None`, never an
//! error. Passing a stale or foreign handle is a caller precondition
//! violation and panics.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use rustc_hash::FxHashMap;

use crate::{Literal, Token, TokenTag};

/// Stable reference to one live token inside one specific [`TokenStream`].
///
/// Remains valid across insertion or removal of any *other* token; it is
/// invalidated only when the token it denotes is itself removed. After a
/// splice, ids issued by the donor denote the same tokens inside the
/// receiver.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct TokenId(u64);

impl TokenId {
    /// Mint a fresh, process-wide unique id.
    fn mint() -> TokenId {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        TokenId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Debug for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

struct Node {
    id: TokenId,
    token: Token,
    prev: Option<u32>,
    next: Option<u32>,
}

enum Slot {
    Occupied(Node),
    Vacant { next_free: Option<u32> },
}

/// Ordered sequence of tokens; the logical document.
///
/// Exclusively owns its tokens. Only relative order is semantically
/// meaningful. Deliberately not `Clone`: handles are meaningful only
/// relative to their originating instance.
#[derive(Default)]
pub struct TokenStream {
    slots: Vec<Slot>,
    free_head: Option<u32>,
    index: FxHashMap<TokenId, u32>,
    head: Option<u32>,
    tail: Option<u32>,
    len: usize,
    layout_done: bool,
}

impl TokenStream {
    /// Create an empty stream.
    pub fn new() -> Self {
        TokenStream::default()
    }

    // -- Capacity --

    /// Number of tokens, tracked incrementally (the structure is not
    /// random-access).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // -- Insertion --

    /// Append a token at the end; returns its handle.
    pub fn append(&mut self, tag: TokenTag, literal: Literal) -> TokenId {
        self.insert_node(Token::new(tag, literal), None)
    }

    /// Append a fixed-spelling token (keywords, punctuation, newline).
    ///
    /// # Panics
    ///
    /// Panics if `tag` carries its value in the literal instead of having a
    /// fixed spelling.
    pub fn append_tag(&mut self, tag: TokenTag) -> TokenId {
        let spelling = tag
            .spelling()
            .unwrap_or_else(|| panic!("token tag {tag:?} has no fixed spelling"));
        self.append(tag, Literal::str(spelling))
    }

    /// Insert a new token immediately before `before`; every existing
    /// handle stays valid. Returns the new token's handle.
    ///
    /// # Panics
    ///
    /// Panics if `before` is stale or foreign.
    pub fn insert_before(&mut self, before: TokenId, tag: TokenTag, literal: Literal) -> TokenId {
        let anchor = self.resolve(before);
        self.insert_node(Token::new(tag, literal), Some(anchor))
    }

    /// Append a fully formed token by ownership transfer.
    pub fn push_back(&mut self, token: Token) -> TokenId {
        self.insert_node(token, None)
    }

    // -- Removal --

    /// Delete one token, invalidating only its handle. Returns the handle
    /// of the token that now follows, or `None` at the end.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale or foreign.
    pub fn remove(&mut self, id: TokenId) -> Option<TokenId> {
        let slot = self.resolve(id);
        let next = self.remove_at(slot);
        next.map(|s| self.node(s).id)
    }

    /// Delete the half-open range `[first, last)`; `None` for `last` means
    /// to the end. Returns `last`. `remove_range(it, Some(it))` is a no-op
    /// returning `Some(it)`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale or foreign, or if `last` is not
    /// reachable by forward traversal from `first`.
    pub fn remove_range(&mut self, first: TokenId, last: Option<TokenId>) -> Option<TokenId> {
        if last == Some(first) {
            return last;
        }
        let stop = last.map(|id| self.resolve(id));
        let mut cur = Some(self.resolve(first));
        while cur != stop {
            let slot = cur
                .unwrap_or_else(|| panic!("range end {last:?} is not reachable from {first:?}"));
            cur = self.remove_at(slot);
        }
        last
    }

    /// Drop every token. Issued handles become stale; the layout latch is
    /// reset.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.index.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
        self.layout_done = false;
    }

    // -- Splicing --

    /// Move every token from `donor` to the end of this stream. `donor`
    /// becomes empty; no token is copied, and handles issued by the donor
    /// now denote the same tokens inside this stream.
    pub fn splice(&mut self, donor: &mut TokenStream) {
        self.splice_nodes(donor, None);
    }

    /// Like [`splice`](Self::splice), placing the donor's tokens
    /// immediately before `before`.
    ///
    /// # Panics
    ///
    /// Panics if `before` is stale or foreign.
    pub fn splice_before(&mut self, donor: &mut TokenStream, before: TokenId) {
        let anchor = self.resolve(before);
        self.splice_nodes(donor, Some(anchor));
    }

    // -- Lookaround --

    /// First token with the given tag, scanning forward from the start.
    pub fn find(&self, tag: TokenTag) -> Option<TokenId> {
        self.scan_forward(tag, self.head, None)
    }

    /// First token with the given tag at or after `from`.
    pub fn find_from(&self, tag: TokenTag, from: TokenId) -> Option<TokenId> {
        self.scan_forward(tag, Some(self.resolve(from)), None)
    }

    /// First token with the given tag in the half-open range `[from, to)`.
    pub fn find_between(&self, tag: TokenTag, from: TokenId, to: TokenId) -> Option<TokenId> {
        self.scan_forward(tag, Some(self.resolve(from)), Some(self.resolve(to)))
    }

    /// Last token with the given tag, scanning backward from the end.
    pub fn rfind(&self, tag: TokenTag) -> Option<TokenId> {
        self.scan_backward(tag, self.tail, None)
    }

    /// Last token with the given tag strictly after `to`.
    pub fn rfind_until(&self, tag: TokenTag, to: TokenId) -> Option<TokenId> {
        self.scan_backward(tag, self.tail, Some(self.resolve(to)))
    }

    /// Last token with the given tag in `(to, from]` — backward from `from`
    /// inclusive, excluding `to` and everything before it.
    pub fn rfind_between(&self, tag: TokenTag, from: TokenId, to: TokenId) -> Option<TokenId> {
        self.scan_backward(tag, Some(self.resolve(from)), Some(self.resolve(to)))
    }

    /// The handle immediately preceding `id`, or `None` if it is first.
    pub fn predecessor(&self, id: TokenId) -> Option<TokenId> {
        let slot = self.resolve(id);
        self.node(slot).prev.map(|s| self.node(s).id)
    }

    /// The handle immediately following `id`, or `None` if it is last.
    pub fn successor(&self, id: TokenId) -> Option<TokenId> {
        let slot = self.resolve(id);
        self.node(slot).next.map(|s| self.node(s).id)
    }

    /// Handle of the first token, if any.
    pub fn first(&self) -> Option<TokenId> {
        self.head.map(|s| self.node(s).id)
    }

    /// Handle of the last token, if any.
    pub fn last(&self) -> Option<TokenId> {
        self.tail.map(|s| self.node(s).id)
    }

    // -- Access --

    /// Check whether `id` is a live handle into this stream.
    #[inline]
    pub fn contains(&self, id: TokenId) -> bool {
        self.index.contains_key(&id)
    }

    /// The token `id` denotes.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale or foreign.
    pub fn get(&self, id: TokenId) -> &Token {
        &self.node(self.resolve(id)).token
    }

    /// Mutable access to the token `id` denotes.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale or foreign.
    pub fn get_mut(&mut self, id: TokenId) -> &mut Token {
        let slot = self.resolve(id);
        &mut self.node_mut(slot).token
    }

    /// Iterate start→end, yielding each token with its handle.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            stream: self,
            cur: self.head,
        }
    }

    /// Per-token textual dump in order, with no layout applied.
    pub fn token_texts(&self) -> Vec<String> {
        self.iter().map(|(_, token)| token.text()).collect()
    }

    // -- Layout latch --

    /// Whether the one-shot layout pass has already run on this stream.
    #[inline]
    pub fn layout_done(&self) -> bool {
        self.layout_done
    }

    /// Latch the layout pass. Subsequent passes are no-ops regardless of
    /// edits made in between; such edits must insert their own newlines.
    #[inline]
    pub fn mark_layout_done(&mut self) {
        self.layout_done = true;
    }

    // -- Internals --

    fn node(&self, slot: u32) -> &Node {
        match &self.slots[slot as usize] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("internal: vacant slot {slot} dereferenced"),
        }
    }

    fn node_mut(&mut self, slot: u32) -> &mut Node {
        match &mut self.slots[slot as usize] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("internal: vacant slot {slot} dereferenced"),
        }
    }

    fn resolve(&self, id: TokenId) -> u32 {
        match self.index.get(&id) {
            Some(slot) => *slot,
            None => panic!("token handle {id:?} is stale or foreign to this stream"),
        }
    }

    fn alloc(&mut self, node: Node) -> u32 {
        match self.free_head {
            Some(slot) => {
                self.free_head = match self.slots[slot as usize] {
                    Slot::Vacant { next_free } => next_free,
                    Slot::Occupied(_) => panic!("internal: free list points at occupied slot"),
                };
                self.slots[slot as usize] = Slot::Occupied(node);
                slot
            }
            None => {
                let slot = u32::try_from(self.slots.len())
                    .unwrap_or_else(|_| panic!("token stream exceeds u32 slots"));
                self.slots.push(Slot::Occupied(node));
                slot
            }
        }
    }

    /// Link an already-allocated node before `before` (`None` = at the end).
    fn link_before(&mut self, slot: u32, before: Option<u32>) {
        let prev = match before {
            Some(b) => self.node(b).prev,
            None => self.tail,
        };
        {
            let node = self.node_mut(slot);
            node.prev = prev;
            node.next = before;
        }
        match prev {
            Some(p) => self.node_mut(p).next = Some(slot),
            None => self.head = Some(slot),
        }
        match before {
            Some(b) => self.node_mut(b).prev = Some(slot),
            None => self.tail = Some(slot),
        }
    }

    fn insert_node(&mut self, token: Token, before: Option<u32>) -> TokenId {
        let id = TokenId::mint();
        let slot = self.alloc(Node {
            id,
            token,
            prev: None,
            next: None,
        });
        self.link_before(slot, before);
        self.index.insert(id, slot);
        self.len += 1;
        id
    }

    /// Fully remove the node at `slot`, returning the slot that follows.
    fn remove_at(&mut self, slot: u32) -> Option<u32> {
        let (id, prev, next) = {
            let node = self.node(slot);
            (node.id, node.prev, node.next)
        };
        match prev {
            Some(p) => self.node_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.node_mut(n).prev = prev,
            None => self.tail = prev,
        }
        self.index.remove(&id);
        self.slots[slot as usize] = Slot::Vacant {
            next_free: self.free_head,
        };
        self.free_head = Some(slot);
        self.len -= 1;
        next
    }

    fn splice_nodes(&mut self, donor: &mut TokenStream, before: Option<u32>) {
        let mut cur = donor.head;
        while let Some(slot) = cur {
            let taken = std::mem::replace(
                &mut donor.slots[slot as usize],
                Slot::Vacant { next_free: None },
            );
            let node = match taken {
                Slot::Occupied(node) => node,
                Slot::Vacant { .. } => panic!("internal: donor chain hit a vacant slot"),
            };
            cur = node.next;
            let id = node.id;
            let new_slot = self.alloc(Node {
                id,
                token: node.token,
                prev: None,
                next: None,
            });
            self.link_before(new_slot, before);
            self.index.insert(id, new_slot);
            self.len += 1;
        }
        donor.clear();
    }

    fn scan_forward(&self, tag: TokenTag, start: Option<u32>, stop: Option<u32>) -> Option<TokenId> {
        let mut cur = start;
        while cur != stop {
            let node = self.node(cur?);
            if node.token.tag() == tag {
                return Some(node.id);
            }
            cur = node.next;
        }
        None
    }

    fn scan_backward(
        &self,
        tag: TokenTag,
        start: Option<u32>,
        stop: Option<u32>,
    ) -> Option<TokenId> {
        let mut cur = start;
        while cur != stop {
            let node = self.node(cur?);
            if node.token.tag() == tag {
                return Some(node.id);
            }
            cur = node.prev;
        }
        None
    }
}

impl fmt::Debug for TokenStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenStream({} tokens)", self.len)
    }
}

/// Iterator over `(TokenId, &Token)` in document order.
pub struct Iter<'a> {
    stream: &'a TokenStream,
    cur: Option<u32>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (TokenId, &'a Token);

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.cur?;
        let node = self.stream.node(slot);
        self.cur = node.next;
        Some((node.id, &node.token))
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = (TokenId, &'a Token);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
