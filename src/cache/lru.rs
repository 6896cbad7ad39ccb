//! Recency List Module
//!
//! Arena-backed doubly linked list ordering cache entries by last access.

// == Node ==
/// A single slot in the arena, linked to its neighbours by index.
#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    /// Towards the most recently used end
    prev: Option<usize>,
    /// Towards the least recently used end
    next: Option<usize>,
}

// == Recency List ==
/// Tracks access order for LRU eviction.
///
/// Entries live in a slot arena; `head` is the most recently used slot and
/// `tail` the least recently used. Every operation is O(1), and slots freed
/// by eviction are reused by the next insert.
#[derive(Debug)]
pub struct RecencyList<K, V> {
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<K, V> Default for RecencyList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> RecencyList<K, V> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Creates an empty list with room for `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    fn node(&self, idx: usize) -> &Node<K, V> {
        match self.slots.get(idx) {
            Some(Some(node)) => node,
            _ => unreachable!("slot {idx} is not linked into the recency list"),
        }
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node<K, V> {
        match self.slots.get_mut(idx) {
            Some(Some(node)) => node,
            _ => unreachable!("slot {idx} is not linked into the recency list"),
        }
    }

    // == Detach ==
    /// Unlinks a slot from its neighbours without freeing it.
    fn detach(&mut self, idx: usize) {
        let (prev, next) = {
            let node = self.node(idx);
            (node.prev, node.next)
        };

        match prev {
            Some(p) => self.node_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.node_mut(n).prev = prev,
            None => self.tail = prev,
        }

        let node = self.node_mut(idx);
        node.prev = None;
        node.next = None;
    }

    // == Attach Head ==
    /// Links a detached slot in as the most recently used.
    fn attach_head(&mut self, idx: usize) {
        let old_head = self.head;
        {
            let node = self.node_mut(idx);
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(h) => self.node_mut(h).prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    // == Push Front ==
    /// Inserts a new entry as the most recently used and returns its slot.
    pub fn push_front(&mut self, key: K, value: V) -> usize {
        let node = Node {
            key,
            value,
            prev: None,
            next: None,
        };

        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };

        self.attach_head(idx);
        self.len += 1;
        idx
    }

    // == Move To Front ==
    /// Marks a slot as most recently used.
    pub fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return;
        }
        self.detach(idx);
        self.attach_head(idx);
    }

    // == Pop Back ==
    /// Removes and returns the least recently used entry.
    ///
    /// Returns None if the list is empty.
    pub fn pop_back(&mut self) -> Option<(K, V)> {
        let idx = self.tail?;
        self.detach(idx);
        let node = self.slots[idx].take()?;
        self.free.push(idx);
        self.len -= 1;
        Some((node.key, node.value))
    }

    // == Accessors ==
    /// Returns the value stored in a slot.
    pub fn value(&self, idx: usize) -> &V {
        &self.node(idx).value
    }

    /// Replaces the value stored in a slot.
    pub fn set_value(&mut self, idx: usize, value: V) {
        self.node_mut(idx).value = value;
    }

    /// Returns the least recently used key without removing it.
    pub fn peek_back(&self) -> Option<&K> {
        self.tail.map(|idx| &self.node(idx).key)
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            list: self,
            cursor: self.head,
        }
    }

    // == Length ==
    /// Returns the number of linked entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Iterator over keys in recency order, most recent first.
pub struct Keys<'a, K, V> {
    list: &'a RecencyList<K, V>,
    cursor: Option<usize>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let list = self.list;
        let node = list.node(idx);
        self.cursor = node.next;
        Some(&node.key)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn keys_of(list: &RecencyList<&'static str, u16>) -> Vec<&'static str> {
        list.keys().copied().collect()
    }

    #[test]
    fn test_list_new() {
        let list: RecencyList<&str, u16> = RecencyList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.peek_back(), None);
    }

    #[test]
    fn test_push_front_orders_newest_first() {
        let mut list = RecencyList::new();

        list.push_front("key1", 1);
        list.push_front("key2", 2);
        list.push_front("key3", 3);

        assert_eq!(list.len(), 3);
        assert_eq!(keys_of(&list), vec!["key3", "key2", "key1"]);
        // key1 is oldest (added first)
        assert_eq!(list.peek_back(), Some(&"key1"));
    }

    #[test]
    fn test_move_to_front() {
        let mut list = RecencyList::new();

        let a = list.push_front("a", 1);
        list.push_front("b", 2);
        list.push_front("c", 3);

        list.move_to_front(a);

        assert_eq!(keys_of(&list), vec!["a", "c", "b"]);
        assert_eq!(list.peek_back(), Some(&"b"));
    }

    #[test]
    fn test_move_head_to_front_is_noop() {
        let mut list = RecencyList::new();

        list.push_front("a", 1);
        let b = list.push_front("b", 2);
        list.move_to_front(b);

        assert_eq!(keys_of(&list), vec!["b", "a"]);
    }

    #[test]
    fn test_move_middle_to_front() {
        let mut list = RecencyList::new();

        list.push_front("a", 1);
        let b = list.push_front("b", 2);
        list.push_front("c", 3);

        list.move_to_front(b);

        assert_eq!(keys_of(&list), vec!["b", "c", "a"]);
        assert_eq!(list.peek_back(), Some(&"a"));
    }

    #[test]
    fn test_pop_back() {
        let mut list = RecencyList::new();

        list.push_front("key1", 1);
        list.push_front("key2", 2);
        list.push_front("key3", 3);

        assert_eq!(list.pop_back(), Some(("key1", 1)));
        assert_eq!(list.len(), 2);

        assert_eq!(list.pop_back(), Some(("key2", 2)));
        assert_eq!(list.len(), 1);

        assert_eq!(list.pop_back(), Some(("key3", 3)));
        assert!(list.is_empty());
        assert_eq!(list.pop_back(), None);
    }

    #[test]
    fn test_freed_slot_is_reused() {
        let mut list = RecencyList::with_capacity(2);

        let first = list.push_front("a", 1);
        list.push_front("b", 2);
        list.pop_back();

        let reused = list.push_front("c", 3);
        assert_eq!(reused, first);
        assert_eq!(*list.value(reused), 3);
        assert_eq!(keys_of(&list), vec!["c", "b"]);
    }

    #[test]
    fn test_set_value_keeps_position() {
        let mut list = RecencyList::new();

        let a = list.push_front("a", 1);
        list.push_front("b", 2);
        list.set_value(a, 10);

        assert_eq!(*list.value(a), 10);
        assert_eq!(list.peek_back(), Some(&"a"));
    }

    #[test]
    fn test_order_after_multiple_touches() {
        let mut list = RecencyList::new();

        let a = list.push_front("a", 1);
        let b = list.push_front("b", 2);
        let c = list.push_front("c", 3);

        list.move_to_front(a);
        list.move_to_front(c);
        list.move_to_front(b);

        // front=[b, c, a]=back
        assert_eq!(list.pop_back().map(|(k, _)| k), Some("a"));
        assert_eq!(list.pop_back().map(|(k, _)| k), Some("c"));
        assert_eq!(list.pop_back().map(|(k, _)| k), Some("b"));
    }
}
