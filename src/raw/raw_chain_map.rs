use core::borrow::Borrow;
use core::cmp::Ordering;
use core::mem;

use super::arena::Arena;
use super::link::Link;
use super::node::Node;

/// The sorted singly-linked chain backing `ChainMap`.
pub(crate) struct RawChainMap<K, V> {
    /// Arena owning every node of the chain.
    nodes: Arena<Node<K, V>>,
    /// First (smallest) node, if the chain is non-empty.
    head: Option<Link>,
    /// Number of nodes reachable from `head`.
    len: usize,
}

impl<K, V> RawChainMap<K, V> {
    /// Creates a new, empty chain.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            head: None,
            len: 0,
        }
    }

    /// Creates a new chain with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            head: None,
            len: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) const fn head(&self) -> Option<Link> {
        self.head
    }

    /// Returns the node behind a link.
    pub(crate) fn node(&self, link: Link) -> &Node<K, V> {
        self.nodes.get(link)
    }

    /// Returns the last node by walking the chain.
    pub(crate) fn tail(&self) -> Option<&Node<K, V>> {
        let mut node = self.nodes.get(self.head?);
        while let Some(next) = node.next() {
            node = self.nodes.get(next);
        }
        Some(node)
    }

    /// Releases every node, reading each `next` link before the node is dropped.
    ///
    /// The chain is emptied before the first node is released, so a panicking drop still
    /// leaves an empty, consistent map.
    pub(crate) fn clear(&mut self) {
        let released = mem::take(&mut self.len);
        let mut current = self.head.take();

        let mut nodes = DropGuard(&mut self.nodes);
        while let Some(link) = current {
            current = nodes.0.take(link).next();
        }
        debug_assert!(nodes.0.is_empty(), "`RawChainMap::clear()` - unlinked nodes left in the arena");
        drop(nodes);

        tracing::trace!(released, "chain cleared");
    }

    /// Links a new node between `prev` (or the head) and `next`, and returns its link.
    fn splice(&mut self, prev: Option<Link>, key: K, value: V, next: Option<Link>) -> Link {
        let link = self.nodes.alloc(Node::new(key, value, next));
        match prev {
            Some(prev) => self.nodes.get_mut(prev).set_next(Some(link)),
            None => self.head = Some(link),
        }
        self.len += 1;
        link
    }

    /// Unlinks the head node and returns its pair.
    pub(crate) fn pop_head(&mut self) -> Option<(K, V)> {
        let node = self.nodes.take(self.head?);
        self.head = node.next();
        self.len -= 1;
        Some(node.into_key_value())
    }
}

impl<K: Ord, V> RawChainMap<K, V> {
    /// Walks the chain for `key`, stopping early at the first greater key.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<Link>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.head;
        while let Some(link) = current {
            let node = self.nodes.get(link);
            match key.cmp(node.key().borrow()) {
                Ordering::Greater => current = node.next(),
                Ordering::Equal => return Some(link),
                Ordering::Less => return None,
            }
        }
        None
    }

    /// Returns the node holding `key`.
    pub(crate) fn find<Q>(&self, key: &Q) -> Option<&Node<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).map(|link| self.nodes.get(link))
    }

    /// Returns the node holding `key` mutably. Only the value may be changed through it.
    pub(crate) fn find_mut<Q>(&mut self, key: &Q) -> Option<&mut Node<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let link = self.search(key)?;
        Some(self.nodes.get_mut(link))
    }

    /// Inserts `key` at its ordered position, or overwrites the value of an equal key.
    ///
    /// Returns the previous value on overwrite. A node is only allocated for a new key.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        // `prev` trails `current`; the new node goes between them.
        let mut prev: Option<Link> = None;
        let mut current = self.head;

        while let Some(link) = current {
            let node = self.nodes.get(link);
            match key.cmp(node.key()) {
                Ordering::Greater => {
                    prev = current;
                    current = node.next();
                }
                Ordering::Equal => return Some(self.nodes.get_mut(link).replace_value(value)),
                Ordering::Less => break,
            }
        }

        self.splice(prev, key, value, current);
        None
    }
}

impl<K: Clone, V: Clone> RawChainMap<K, V> {
    /// Appends a copy of every pair of `source` to this empty chain.
    ///
    /// `source` is already in ascending order, so each copy goes after the previous one
    /// without comparing keys.
    fn append_copy_of(&mut self, source: &Self) {
        debug_assert!(self.is_empty(), "`RawChainMap::append_copy_of()` - target is not empty");

        let mut tail = None;
        let mut current = source.head;
        while let Some(link) = current {
            let node = source.nodes.get(link);
            tail = Some(self.splice(tail, node.key().clone(), node.value().clone(), None));
            current = node.next();
        }
        tracing::trace!(copied = self.len, "chain copied");
    }
}

impl<K: Clone, V: Clone> Clone for RawChainMap<K, V> {
    fn clone(&self) -> Self {
        let mut copy = Self::with_capacity(self.len);
        copy.append_copy_of(self);
        copy
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.append_copy_of(source);
    }
}

/// Empties the arena when dropped, releasing whatever a panicking drop left behind.
struct DropGuard<'a, T>(&'a mut Arena<T>);

impl<T> Drop for DropGuard<'_, T> {
    fn drop(&mut self) {
        self.0.clear();
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
mod tests {
    extern crate std;

    use super::*;
    use alloc::collections::BTreeMap;
    use alloc::format;
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::cell::Cell;
    use proptest::prelude::*;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    impl<K: Ord, V> RawChainMap<K, V> {
        /// Walks the chain and panics with every broken invariant found.
        pub(crate) fn validate_invariants(&self) {
            let mut errors: Vec<String> = Vec::new();

            if self.head.is_none() != (self.len == 0) {
                errors.push(format!("head is {:?} but len is {}", self.head, self.len));
            }

            let mut count = 0usize;
            let mut previous: Option<&K> = None;
            let mut current = self.head;
            while let Some(link) = current {
                let node = self.nodes.get(link);
                if let Some(previous) = previous
                    && previous >= node.key()
                {
                    errors.push(format!("keys not strictly ascending at position {count}"));
                }
                previous = Some(node.key());
                count += 1;
                if count > self.nodes.len() {
                    errors.push(String::from("chain is longer than the arena (cycle)"));
                    break;
                }
                current = node.next();
            }

            if count != self.len {
                errors.push(format!("len mismatch: self.len={}, reachable={count}", self.len));
            }
            if self.nodes.len() != self.len {
                errors.push(format!("orphaned nodes: arena holds {}, len={}", self.nodes.len(), self.len));
            }

            assert!(errors.is_empty(), "Chain invariant violations:\n{}", errors.join("\n"));
        }

        fn keys(&self) -> Vec<&K> {
            let mut keys = Vec::with_capacity(self.len);
            let mut current = self.head;
            while let Some(link) = current {
                let node = self.nodes.get(link);
                keys.push(node.key());
                current = node.next();
            }
            keys
        }
    }

    #[test]
    fn empty_chain() {
        let chain: RawChainMap<i32, i32> = RawChainMap::new();
        chain.validate_invariants();
        assert!(chain.is_empty());
        assert!(chain.head().is_none());
        assert!(chain.tail().is_none());
        assert!(chain.search(&0).is_none());
    }

    #[test]
    fn insert_covers_every_splice_position() {
        let mut chain = RawChainMap::new();

        // empty chain
        assert_eq!(chain.insert(20, "b"), None);
        // before head
        assert_eq!(chain.insert(10, "a"), None);
        // at tail
        assert_eq!(chain.insert(40, "d"), None);
        // interior
        assert_eq!(chain.insert(30, "c"), None);
        chain.validate_invariants();
        assert_eq!(chain.keys(), [&10, &20, &30, &40]);

        // equal to head
        assert_eq!(chain.insert(10, "A"), Some("a"));
        // equal to interior
        assert_eq!(chain.insert(30, "C"), Some("c"));
        // equal to tail
        assert_eq!(chain.insert(40, "D"), Some("d"));
        chain.validate_invariants();
        assert_eq!(chain.len(), 4);
        assert_eq!(chain.find(&10).map(Node::value), Some(&"A"));
        assert_eq!(chain.tail().map(Node::key_value), Some((&40, &"D")));
    }

    #[test]
    fn overwrite_does_not_allocate() {
        let mut chain = RawChainMap::new();
        chain.insert("x", 1);
        chain.insert("x", 5);
        assert_eq!(chain.nodes.len(), 1);
        assert_eq!(chain.find("x").map(Node::value), Some(&5));
    }

    #[test]
    fn search_stops_before_greater_key() {
        let mut chain = RawChainMap::new();
        for key in [2, 4, 6] {
            chain.insert(key, ());
        }
        assert!(chain.search(&1).is_none());
        assert!(chain.search(&5).is_none());
        assert!(chain.search(&7).is_none());
        assert!(chain.search(&4).is_some());
    }

    #[test]
    fn clear_is_idempotent() {
        let mut chain = RawChainMap::new();
        for key in 0..10 {
            chain.insert(key, key);
        }
        chain.clear();
        chain.validate_invariants();
        chain.clear();
        chain.validate_invariants();
        assert!(chain.is_empty());

        chain.insert(1, 1);
        chain.validate_invariants();
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn pop_head_drains_in_order() {
        let mut chain = RawChainMap::new();
        for key in [3, 1, 2] {
            chain.insert(key, key * 10);
        }
        assert_eq!(chain.pop_head(), Some((1, 10)));
        chain.validate_invariants();
        assert_eq!(chain.pop_head(), Some((2, 20)));
        assert_eq!(chain.pop_head(), Some((3, 30)));
        assert_eq!(chain.pop_head(), None);
        chain.validate_invariants();
    }

    #[test]
    fn find_mut_changes_value_only() {
        let mut chain = RawChainMap::new();
        chain.insert('a', 1);
        chain.insert('b', 2);
        if let Some(node) = chain.find_mut(&'b') {
            node.set_value(20);
        }
        chain.validate_invariants();
        assert_eq!(chain.find(&'b').map(Node::value), Some(&20));
        assert!(chain.find_mut(&'c').is_none());
    }

    #[test]
    fn clone_from_replaces_contents() {
        let mut source = RawChainMap::new();
        for key in [5, 1, 3] {
            source.insert(key, key);
        }
        let mut target = RawChainMap::new();
        for key in [9, 8] {
            target.insert(key, key);
        }

        target.clone_from(&source);
        target.validate_invariants();
        assert_eq!(target.keys(), source.keys());

        target.insert(2, 2);
        assert_eq!(source.len(), 3);
        assert!(source.search(&2).is_none());
    }

    /// A key that counts how often it is compared.
    #[derive(Clone, Debug)]
    struct CountedKey<'a> {
        key: u32,
        comparisons: &'a Cell<usize>,
    }

    impl PartialEq for CountedKey<'_> {
        fn eq(&self, other: &Self) -> bool {
            self.cmp(other) == Ordering::Equal
        }
    }

    impl Eq for CountedKey<'_> {}

    impl PartialOrd for CountedKey<'_> {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            Some(self.cmp(other))
        }
    }

    impl Ord for CountedKey<'_> {
        fn cmp(&self, other: &Self) -> Ordering {
            self.comparisons.set(self.comparisons.get() + 1);
            self.key.cmp(&other.key)
        }
    }

    #[test]
    fn copies_append_without_comparing_keys() {
        let comparisons = Cell::new(0);
        let mut source = RawChainMap::new();
        for key in (0..100).rev() {
            source.insert(CountedKey { key, comparisons: &comparisons }, key);
        }

        comparisons.set(0);
        let copy = source.clone();
        assert_eq!(comparisons.get(), 0);
        assert!(copy.capacity() >= source.len());

        let mut target = RawChainMap::new();
        target.insert(CountedKey { key: 500, comparisons: &comparisons }, 500);
        comparisons.set(0);
        target.clone_from(&source);
        assert_eq!(comparisons.get(), 0);

        for chain in [&copy, &target] {
            chain.validate_invariants();
            let keys: Vec<u32> = chain.keys().into_iter().map(|counted| counted.key).collect();
            assert_eq!(keys, (0..100).collect::<Vec<_>>());
        }
    }

    /// A value whose drop panics when `armed`.
    struct Tripwire<'a> {
        armed: bool,
        drops: &'a Cell<usize>,
    }

    impl Drop for Tripwire<'_> {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
            if self.armed {
                panic!("tripwire dropped");
            }
        }
    }

    #[test]
    fn clear_survives_panicking_drop() {
        let drops = Cell::new(0);
        let mut chain = RawChainMap::new();
        for key in 1..=3 {
            chain.insert(key, Tripwire { armed: key == 2, drops: &drops });
        }

        assert!(catch_unwind(AssertUnwindSafe(|| chain.clear())).is_err());
        assert_eq!(drops.get(), 3);
        assert!(chain.is_empty());
        assert!(chain.head().is_none());
        chain.validate_invariants();

        chain.insert(4, Tripwire { armed: false, drops: &drops });
        chain.validate_invariants();
        assert_eq!(chain.keys(), [&4]);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Insert(i32),
        Clear,
        Clone,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            30 => (0i32..1000).prop_map(Op::Insert),
            1 => Just(Op::Clear),
            1 => Just(Op::Clone),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn chain_invariants_maintained_after_operations(ops in prop::collection::vec(op_strategy(), 0..500)) {
            let mut chain: RawChainMap<i32, i32> = RawChainMap::new();
            let mut model: BTreeMap<i32, i32> = BTreeMap::new();

            for op in ops {
                match op {
                    Op::Insert(key) => {
                        prop_assert_eq!(chain.insert(key, key * 2), model.insert(key, key * 2));
                    }
                    Op::Clear => {
                        chain.clear();
                        model.clear();
                    }
                    Op::Clone => {
                        chain = chain.clone();
                    }
                }
                chain.validate_invariants();
                prop_assert_eq!(chain.len(), model.len());
            }

            let keys: Vec<i32> = chain.keys().into_iter().copied().collect();
            let expected: Vec<i32> = model.keys().copied().collect();
            prop_assert_eq!(keys, expected);
        }

        #[test]
        fn sorted_after_any_insertion_order(keys in prop::collection::vec(any::<i16>(), 0..300)) {
            let mut chain = RawChainMap::new();
            for &key in &keys {
                chain.insert(key, ());
            }
            chain.validate_invariants();

            let mut expected = keys.clone();
            expected.sort_unstable();
            expected.dedup();
            let actual: Vec<i16> = chain.keys().into_iter().copied().collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
