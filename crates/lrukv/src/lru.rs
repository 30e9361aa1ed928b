//! LRU (Least Recently Used) ordering structure
//!
//! Nodes live in a `Vec` arena and link to each other by slot index, so
//! move-to-front, unlink and eviction are all O(1) without reference cycles.
//! Freed slots are recycled through a free list before the arena grows.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use ahash::RandomState;

/// Upper bound on slots reserved up front; the bound itself can be huge
const PREALLOC_LIMIT: usize = 1024;

/// Node in the LRU doubly-linked list
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Outcome of [`LruList::put`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Put<K, V> {
    /// Key was new and the list stayed within capacity
    Inserted,

    /// Key was new; the returned least recently used entry was evicted
    Evicted(K, V),

    /// Key was already present; value replaced and entry moved to the front
    Updated,
}

impl<K, V> Put<K, V> {
    /// Whether the put added a key that was not present before
    pub fn is_new(&self) -> bool {
        !matches!(self, Put::Updated)
    }
}

/// Recency-ordered map with an optional entry bound
///
/// The head is the most recently used entry, the tail the next eviction
/// candidate. A capacity of 0 means unbounded.
pub struct LruList<K, V> {
    map: HashMap<K, usize, RandomState>,
    nodes: Vec<Option<Node<K, V>>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
    capacity: usize,
}

impl<K, V> LruList<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create an empty list bounded to `capacity` entries (0 = unbounded)
    pub fn new(capacity: usize) -> Self {
        let reserve = capacity.min(PREALLOC_LIMIT);
        Self {
            map: HashMap::with_capacity_and_hasher(reserve, RandomState::new()),
            nodes: Vec::with_capacity(reserve),
            head: None,
            tail: None,
            free_list: Vec::new(),
            capacity,
        }
    }

    /// Get a value and mark it most recently used
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.map.get(key)?;
        self.move_to_front(idx);
        self.nodes[idx].as_ref().map(|node| &node.value)
    }

    /// Get a value without touching its recency
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.map.get(key)?;
        self.nodes[idx].as_ref().map(|node| &node.value)
    }

    /// Check whether a key is present without touching its recency
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Insert or update a key-value pair at the front of the list
    ///
    /// A new key that pushes the list past its capacity evicts exactly one
    /// entry, the current tail, before returning.
    pub fn put(&mut self, key: K, value: V) -> Put<K, V> {
        if let Some(&idx) = self.map.get(&key) {
            if let Some(node) = &mut self.nodes[idx] {
                node.value = value;
            }
            self.move_to_front(idx);
            return Put::Updated;
        }

        let idx = self.alloc_node();
        self.nodes[idx] = Some(Node {
            key: key.clone(),
            value,
            prev: None,
            next: None,
        });
        self.push_front(idx);
        self.map.insert(key, idx);

        if self.capacity > 0 && self.map.len() > self.capacity {
            if let Some((key, value)) = self.pop_back() {
                return Put::Evicted(key, value);
            }
        }

        Put::Inserted
    }

    /// Remove a key, returning its value if it was present
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.map.remove(key)?;
        self.unlink(idx);
        self.free_node(idx);
        self.nodes[idx].take().map(|node| node.value)
    }

    /// Get the current number of entries
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Entry bound this list was created with (0 = unbounded)
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.map.clear();
        self.nodes.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
    }

    /// Iterate entries from most to least recently used
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.nodes,
            next: self.head,
            remaining: self.map.len(),
        }
    }

    /// Remove every entry, returning them most recently used first
    pub fn drain(&mut self) -> Vec<(K, V)> {
        let mut entries = Vec::with_capacity(self.map.len());
        while let Some((key, value)) = self.pop_front() {
            entries.push((key, value));
        }
        self.clear();
        entries
    }

    fn pop_front(&mut self) -> Option<(K, V)> {
        let idx = self.head?;
        self.take_node(idx)
    }

    fn pop_back(&mut self) -> Option<(K, V)> {
        let idx = self.tail?;
        self.take_node(idx)
    }

    fn take_node(&mut self, idx: usize) -> Option<(K, V)> {
        // Unlink while the node is still in its slot; unlink reads its links.
        self.unlink(idx);
        let node = self.nodes[idx].take()?;
        self.map.remove(&node.key);
        self.free_node(idx);
        Some((node.key, node.value))
    }

    fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return; // Already at front
        }

        self.unlink(idx);
        self.push_front(idx);
    }

    fn push_front(&mut self, idx: usize) {
        if let Some(node) = &mut self.nodes[idx] {
            node.prev = None;
            node.next = self.head;
        }

        if let Some(head_idx) = self.head {
            if let Some(head) = &mut self.nodes[head_idx] {
                head.prev = Some(idx);
            }
        }

        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = if let Some(node) = &mut self.nodes[idx] {
            (node.prev.take(), node.next.take())
        } else {
            return;
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = &mut self.nodes[prev_idx] {
                    prev_node.next = next;
                }
            }
            None => {
                self.head = next;
            }
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = &mut self.nodes[next_idx] {
                    next_node.prev = prev;
                }
            }
            None => {
                self.tail = prev;
            }
        }
    }

    fn alloc_node(&mut self) -> usize {
        if let Some(idx) = self.free_list.pop() {
            idx
        } else {
            let idx = self.nodes.len();
            self.nodes.push(None);
            idx
        }
    }

    fn free_node(&mut self, idx: usize) {
        self.free_list.push(idx);
    }

    /// Walk the list and panic if index and ordering disagree
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        let mut seen = 0;
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            let node = self.nodes[idx].as_ref().expect("linked slot is empty");
            assert_eq!(node.prev, prev, "broken back link at slot {idx}");
            assert_eq!(self.map.get(&node.key), Some(&idx), "index points elsewhere");
            seen += 1;
            assert!(seen <= self.map.len(), "list longer than index");
            prev = Some(idx);
            cursor = node.next;
        }
        assert_eq!(self.tail, prev, "tail is not the last linked slot");
        assert_eq!(seen, self.map.len(), "index holds unlinked keys");
        if self.capacity > 0 {
            assert!(self.map.len() <= self.capacity, "over capacity");
        }
        let live = self.nodes.iter().filter(|slot| slot.is_some()).count();
        assert_eq!(live + self.free_list.len(), self.nodes.len(), "leaked slot");
    }
}

/// Iterator over [`LruList`] entries, most recently used first
pub struct Iter<'a, K, V> {
    nodes: &'a [Option<Node<K, V>>],
    next: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes[self.next?].as_ref()?;
        self.next = node.next;
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
