use core::fmt;
use core::mem;

use super::link::Link;

/// A single stored entry of a [`ChainMap`](crate::ChainMap).
///
/// Nodes are only ever created and linked by the map; callers see them
/// read-only through [`ChainMap::at`](crate::ChainMap::at).
///
/// # Examples
///
/// ```
/// use chain_map::ChainMap;
///
/// let mut map = ChainMap::new();
/// map.insert("gold", 3);
///
/// let node = map.at("gold").unwrap();
/// assert_eq!(node.key(), &"gold");
/// assert_eq!(node.value(), &3);
/// assert_eq!(node.to_string(), "gold:3");
/// ```
pub struct Node<K, V> {
    key: K,
    value: V,
    next: Option<Link>,
}

impl<K, V> Node<K, V> {
    pub(crate) const fn new(key: K, value: V, next: Option<Link>) -> Self {
        Self { key, value, next }
    }

    /// Returns the key stored in this node.
    #[must_use]
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// Returns the value stored in this node.
    #[must_use]
    pub const fn value(&self) -> &V {
        &self.value
    }

    pub(crate) const fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    pub(crate) const fn key_value(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }

    /// The following node, or `None` at the tail.
    pub(crate) const fn next(&self) -> Option<Link> {
        self.next
    }

    pub(crate) fn set_value(&mut self, value: V) {
        self.value = value;
    }

    /// Overwrites the value in place and hands back the old one.
    pub(crate) const fn replace_value(&mut self, value: V) -> V {
        mem::replace(&mut self.value, value)
    }

    /// Rewires the outgoing link. The caller keeps the chain sorted and acyclic.
    pub(crate) const fn set_next(&mut self, next: Option<Link>) {
        self.next = next;
    }

    pub(crate) fn into_key_value(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for Node<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key, self.value)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Node<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node").field("key", &self.key).field("value", &self.value).finish()
    }
}
