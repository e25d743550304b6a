//! Recency ordering for cache entries
//!
//! Index-based doubly-linked list with two permanent sentinel slots. Slot 0
//! is the head (just before the least-recently-used entry) and slot 1 is the
//! tail (just after the most-recently-used entry), so unlinking and appending
//! never branch on list ends.

use std::ops::Index;

/// Arena slot of the head sentinel
const HEAD: usize = 0;

/// Arena slot of the tail sentinel
const TAIL: usize = 1;

/// Upper bound on slots reserved up front; the arena grows past it on demand
const MAX_PREALLOCATED: usize = 1024;

/// Stable handle to an entry in a [`RecencyList`]
///
/// A handle is valid until its entry is released (see
/// [`RecencyList::release`], [`RecencyList::pop_front`] and
/// [`RecencyList::clear`]). Each slot carries a generation that is bumped on
/// release, so using a stale handle panics even after its slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId {
    index: usize,
    generation: u32,
}

/// Node in the recency list
struct Node<T> {
    /// `None` for sentinels and freed slots
    payload: Option<T>,
    prev: usize,
    next: usize,
    /// Whether the node is currently part of the chain
    linked: bool,
    /// Bumped every time the slot is released
    generation: u32,
}

impl<T> Node<T> {
    fn sentinel() -> Self {
        Self {
            payload: None,
            prev: HEAD,
            next: TAIL,
            linked: false,
            generation: 0,
        }
    }
}

/// Doubly-linked ordering from least- to most-recently used
pub struct RecencyList<T> {
    nodes: Vec<Node<T>>,
    free_list: Vec<usize>,
    len: usize,
}

impl<T> RecencyList<T> {
    /// Create an empty list
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty list, reserving room for up to `capacity` entries.
    ///
    /// The reservation is capped, so huge capacities do not allocate up front.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.min(MAX_PREALLOCATED).saturating_add(2));
        nodes.push(Node::sentinel());
        nodes.push(Node::sentinel());

        Self {
            nodes,
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Number of linked entries
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the list has no linked entries
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Arena slot for `id`, asserting it is a data entry of the right generation
    fn slot(&self, id: EntryId, op: &str) -> usize {
        assert!(id.index > TAIL, "sentinel passed to {}", op);
        assert!(
            self.nodes.get(id.index).map(|node| node.generation) == Some(id.generation),
            "stale EntryId passed to {}",
            op
        );
        id.index
    }

    /// Detach `id` from the chain.
    ///
    /// The entry keeps its payload and can be re-linked with
    /// [`append_entry`](Self::append_entry) or freed with
    /// [`release`](Self::release).
    ///
    /// # Panics
    /// If `id` is a sentinel, stale, or not currently linked.
    pub fn remove_entry(&mut self, id: EntryId) {
        let idx = self.slot(id, "remove_entry");

        let (prev, next) = {
            let node = &mut self.nodes[idx];
            assert!(node.linked, "remove_entry on an unlinked entry");
            node.linked = false;
            (node.prev, node.next)
        };

        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        self.len -= 1;
    }

    /// Link a detached entry as the most-recently-used.
    ///
    /// # Panics
    /// If `id` is a sentinel, stale, a freed slot, or already linked.
    pub fn append_entry(&mut self, id: EntryId) {
        let idx = self.slot(id, "append_entry");

        let before = self.nodes[TAIL].prev;
        {
            let node = &mut self.nodes[idx];
            assert!(node.payload.is_some(), "append_entry on a released entry");
            assert!(!node.linked, "append_entry on an already linked entry");
            node.prev = before;
            node.next = TAIL;
            node.linked = true;
        }

        self.nodes[before].next = idx;
        self.nodes[TAIL].prev = idx;
        self.len += 1;
    }

    /// Allocate an entry holding `payload`, append it as the
    /// most-recently-used and return its handle.
    pub fn append_value(&mut self, payload: T) -> EntryId {
        let id = self.alloc_node(payload);
        self.append_entry(id);
        id
    }

    /// Move a linked entry to the most-recently-used end
    pub fn promote(&mut self, id: EntryId) {
        let idx = self.slot(id, "promote");
        if self.nodes[TAIL].prev == idx {
            return; // Already most recent
        }

        self.remove_entry(id);
        self.append_entry(id);
    }

    /// Unlink the least-recently-used entry and return its payload.
    ///
    /// Returns `None` when the list is empty.
    pub fn pop_front(&mut self) -> Option<T> {
        let front = self.nodes[HEAD].next;
        if front == TAIL {
            return None;
        }

        let id = EntryId {
            index: front,
            generation: self.nodes[front].generation,
        };
        self.remove_entry(id);
        Some(self.release(id))
    }

    /// Free a detached entry's slot and return its payload.
    ///
    /// # Panics
    /// If `id` is a sentinel, stale, still linked, or already released.
    pub fn release(&mut self, id: EntryId) -> T {
        let idx = self.slot(id, "release");

        let node = &mut self.nodes[idx];
        assert!(!node.linked, "release on a linked entry");
        match node.payload.take() {
            Some(payload) => {
                node.generation = node.generation.wrapping_add(1);
                self.free_list.push(idx);
                payload
            }
            None => panic!("release on an already released entry"),
        }
    }

    /// Payload of a live entry; `None` for sentinels and stale handles
    pub fn payload(&self, id: EntryId) -> Option<&T> {
        if id.index <= TAIL {
            return None;
        }
        self.nodes
            .get(id.index)
            .filter(|node| node.generation == id.generation)
            .and_then(|node| node.payload.as_ref())
    }

    /// Payload of the least-recently-used entry
    pub fn front(&self) -> Option<&T> {
        self.nodes[self.nodes[HEAD].next].payload.as_ref()
    }

    /// Payload of the most-recently-used entry
    pub fn back(&self) -> Option<&T> {
        self.nodes[self.nodes[TAIL].prev].payload.as_ref()
    }

    /// Drop every entry; outstanding handles become stale
    pub fn clear(&mut self) {
        self.nodes[HEAD] = Node::sentinel();
        self.nodes[TAIL] = Node::sentinel();
        self.free_list.clear();

        for (idx, node) in self.nodes.iter_mut().enumerate().skip(2) {
            node.payload = None;
            node.linked = false;
            node.generation = node.generation.wrapping_add(1);
            self.free_list.push(idx);
        }
        self.len = 0;
    }

    /// Iterate payloads from least- to most-recently used
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.nodes[HEAD].next,
            remaining: self.len,
        }
    }

    fn alloc_node(&mut self, payload: T) -> EntryId {
        if let Some(idx) = self.free_list.pop() {
            let node = &mut self.nodes[idx];
            node.payload = Some(payload);
            node.prev = HEAD;
            node.next = TAIL;
            node.linked = false;
            EntryId {
                index: idx,
                generation: node.generation,
            }
        } else {
            let idx = self.nodes.len();
            self.nodes.push(Node {
                payload: Some(payload),
                prev: HEAD,
                next: TAIL,
                linked: false,
                generation: 0,
            });
            EntryId {
                index: idx,
                generation: 0,
            }
        }
    }
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<EntryId> for RecencyList<T> {
    type Output = T;

    /// # Panics
    /// If `id` is a sentinel or a released entry.
    fn index(&self, id: EntryId) -> &T {
        match self.payload(id) {
            Some(payload) => payload,
            None => panic!("index with a stale or sentinel EntryId"),
        }
    }
}

/// Iterator over a [`RecencyList`] in recency order
pub struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    cursor: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let list = self.list;
        if self.cursor == TAIL {
            return None;
        }

        let node = &list.nodes[self.cursor];
        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        node.payload.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> IntoIterator for &'a RecencyList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
