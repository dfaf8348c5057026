use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::ops::Index;

use crate::error::{Error, Result};
use crate::raw::{Link, Node, RawChainMap};

mod capacity;
mod display;

pub use display::Display;

/// An ordered map stored as a sorted, singly-linked chain of nodes.
///
/// Given a key type with a [total order], the map keeps its entries in ascending key
/// order at all times, so iteration and rendering never need a separate sort. Every key
/// is unique: inserting an existing key overwrites its value in place.
///
/// Lookups and insertions walk the chain from the smallest key and take O(n) time. This
/// is a deliberately simple structure for small maps; use `BTreeMap` when logarithmic
/// bounds matter.
///
/// Nodes live in an index-based arena owned by the map, with each link owned by exactly
/// one predecessor (or by the map, for the first node). Dropping the map releases the
/// arena in one pass, so even very long chains are torn down without recursion.
///
/// It is a logic error for a key to be modified in such a way that the key's ordering
/// relative to any other key, as determined by the [`Ord`] trait, changes while it is in
/// the map. The behavior resulting from such a logic error is not specified, but will be
/// encapsulated to the `ChainMap` that observed it and not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use chain_map::{ChainMap, Error};
///
/// let mut inventory = ChainMap::new();
/// inventory.insert("rope", 1);
/// inventory.insert("lantern", 2);
/// inventory.insert("bread", 4);
///
/// // entries are kept in key order
/// assert_eq!(inventory.to_string(), "bread:4\nlantern:2\nrope:1\n");
///
/// // re-inserting a key overwrites its value
/// inventory.insert("rope", 3);
/// assert_eq!(inventory.len(), 3);
/// assert_eq!(inventory.value_at("rope"), Ok(&3));
///
/// // read, compute, write back
/// let bread = *inventory.value_at("bread")?;
/// inventory.update("bread", bread - 1)?;
/// assert_eq!(inventory["bread"], 3);
///
/// // absent keys are reported, not defaulted
/// assert_eq!(inventory.value_at("map"), Err(Error::NotFound));
/// # Ok::<(), Error>(())
/// ```
///
/// A `ChainMap` with a known list of items can be initialized from an array:
///
/// ```
/// use chain_map::ChainMap;
///
/// let exits = ChainMap::from([('N', 2), ('E', -1), ('S', 5), ('W', -1)]);
/// assert_eq!(exits.keys().collect::<String>(), "ENSW");
/// ```
///
/// [total order]: https://en.wikipedia.org/wiki/Total_order
pub struct ChainMap<K, V> {
    raw: RawChainMap<K, V>,
}

/// An iterator over the entries of a `ChainMap`, in ascending key order.
///
/// This `struct` is created by the [`iter`] method on [`ChainMap`].
///
/// [`iter`]: ChainMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    raw: Option<&'a RawChainMap<K, V>>,
    next: Option<Link>,
    remaining: usize,
}

/// An owning iterator over the entries of a `ChainMap`, in ascending key order.
///
/// This `struct` is created by the [`into_iter`] method on [`ChainMap`]
/// (provided by the [`IntoIterator`] trait). Each node is released as it is yielded.
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    raw: RawChainMap<K, V>,
}

/// An iterator over the keys of a `ChainMap`.
///
/// This `struct` is created by the [`keys`] method on [`ChainMap`].
///
/// [`keys`]: ChainMap::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over the values of a `ChainMap`.
///
/// This `struct` is created by the [`values`] method on [`ChainMap`].
///
/// [`values`]: ChainMap::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<K, V> ChainMap<K, V> {
    /// Makes a new, empty `ChainMap`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_map::ChainMap;
    ///
    /// let mut satchel: ChainMap<&str, u32> = ChainMap::new();
    /// assert!(satchel.is_empty());
    /// satchel.insert("flint", 1);
    /// ```
    #[must_use]
    pub const fn new() -> ChainMap<K, V> {
        ChainMap {
            raw: RawChainMap::new(),
        }
    }

    /// Clears the map, releasing every node.
    ///
    /// Calling `clear` on an empty map does nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_map::ChainMap;
    ///
    /// let mut chest = ChainMap::from([("gold", 30), ("ruby", 1)]);
    /// chest.clear();
    /// assert!(chest.is_empty());
    /// chest.clear();
    /// assert_eq!(chest.len(), 0);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns a reference to the value corresponding to the key, or `None`.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_map::ChainMap;
    ///
    /// let mut stock = ChainMap::new();
    /// stock.insert("arrow", 20);
    /// assert_eq!(stock.get("arrow"), Some(&20));
    /// assert_eq!(stock.get("bolt"), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.find(key).map(Node::value)
    }

    /// Returns the stored key and value corresponding to the supplied key.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_map::ChainMap;
    ///
    /// let mut stock = ChainMap::new();
    /// stock.insert(String::from("torch"), 2);
    /// assert_eq!(stock.get_key_value("torch"), Some((&String::from("torch"), &2)));
    /// assert_eq!(stock.get_key_value("axe"), None);
    /// ```
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.find(key).map(Node::key_value)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_map::ChainMap;
    ///
    /// let mut stock = ChainMap::new();
    /// stock.insert("arrow", 20);
    /// if let Some(count) = stock.get_mut("arrow") {
    ///     *count -= 3;
    /// }
    /// assert_eq!(stock["arrow"], 17);
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.find_mut(key).map(Node::value_mut)
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_map::ChainMap;
    ///
    /// let mut stock = ChainMap::new();
    /// stock.insert("herb", 4);
    /// assert!(stock.contains_key("herb"));
    /// assert!(!stock.contains_key("ore"));
    /// ```
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.search(key).is_some()
    }

    /// Returns the node stored for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_map::{ChainMap, Error};
    ///
    /// let mut stock = ChainMap::new();
    /// stock.insert("shield", 1);
    ///
    /// let node = stock.at("shield")?;
    /// assert_eq!((node.key(), node.value()), (&"shield", &1));
    /// assert_eq!(node.to_string(), "shield:1");
    /// assert!(matches!(stock.at("helm"), Err(Error::NotFound)));
    /// # Ok::<(), Error>(())
    /// ```
    pub fn at<Q>(&self, key: &Q) -> Result<&Node<K, V>>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.find(key).ok_or(Error::NotFound)
    }

    /// Returns the value stored for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_map::{ChainMap, Error};
    ///
    /// let mut stock = ChainMap::new();
    /// stock.insert("potion", 1);
    /// stock.insert("potion", 5);
    /// assert_eq!(stock.value_at("potion"), Ok(&5));
    /// assert_eq!(stock.value_at("elixir"), Err(Error::NotFound));
    /// ```
    pub fn value_at<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.at(key).map(Node::value)
    }

    /// Overwrites the value of an existing key in place.
    ///
    /// Unlike [`insert`](Self::insert), this never adds an entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] and leaves the map untouched if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_map::{ChainMap, Error};
    ///
    /// let mut stock = ChainMap::new();
    /// stock.insert("coin", 10);
    /// let coins = *stock.value_at("coin")?;
    /// stock.update("coin", coins + 5)?;
    /// assert_eq!(stock["coin"], 15);
    ///
    /// assert_eq!(stock.update("gem", 2), Err(Error::NotFound));
    /// assert_eq!(stock.len(), 1);
    /// # Ok::<(), Error>(())
    /// ```
    pub fn update<Q>(&mut self, key: &Q, value: V) -> Result<()>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        let node = self.raw.find_mut(key).ok_or(Error::NotFound)?;
        node.set_value(value);
        Ok(())
    }

    /// Inserts a key-value pair into the map at its ordered position.
    ///
    /// If the map did not have this key present, a new entry is linked in and `None` is
    /// returned.
    ///
    /// If the map did have this key present, the value is overwritten in place and the old
    /// value is returned. The key is not updated, and no entry is added.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_map::ChainMap;
    ///
    /// let mut stock = ChainMap::new();
    /// assert_eq!(stock.insert("wood", 3), None);
    /// assert_eq!(stock.insert("iron", 1), None);
    /// assert_eq!(stock.insert("wood", 7), Some(3));
    /// assert_eq!(stock["wood"], 7);
    /// assert_eq!(stock.len(), 2);
    /// assert_eq!(stock.to_string(), "iron:1\nwood:7\n");
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        K: Ord,
    {
        self.raw.insert(key, value)
    }

    /// Returns the first key-value pair in the map, the one with the smallest key.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_map::ChainMap;
    ///
    /// let mut stock = ChainMap::new();
    /// assert_eq!(stock.first_key_value(), None);
    /// stock.insert("rope", 1);
    /// stock.insert("bread", 4);
    /// assert_eq!(stock.first_key_value(), Some((&"bread", &4)));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.raw.head().map(|link| self.raw.node(link).key_value())
    }

    /// Returns the last key-value pair in the map, the one with the largest key.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_map::ChainMap;
    ///
    /// let mut stock = ChainMap::new();
    /// stock.insert("rope", 1);
    /// stock.insert("bread", 4);
    /// assert_eq!(stock.last_key_value(), Some((&"rope", &1)));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.raw.tail().map(Node::key_value)
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_map::ChainMap;
    ///
    /// let stock = ChainMap::from([("salt", 2), ("fish", 6), ("net", 1)]);
    ///
    /// for (item, count) in stock.iter() {
    ///     println!("{item}: {count}");
    /// }
    ///
    /// let total: u32 = stock.iter().map(|(_, count)| count).sum();
    /// assert_eq!(total, 9);
    /// assert_eq!(stock.iter().next(), Some((&"fish", &6)));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            raw: Some(&self.raw),
            next: self.raw.head(),
            remaining: self.raw.len(),
        }
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_map::ChainMap;
    ///
    /// let stock = ChainMap::from([("salt", 2), ("fish", 6)]);
    /// let items: Vec<_> = stock.keys().copied().collect();
    /// assert_eq!(items, ["fish", "salt"]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the map, in order by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_map::ChainMap;
    ///
    /// let stock = ChainMap::from([("salt", 2), ("fish", 6)]);
    /// let counts: Vec<u32> = stock.values().copied().collect();
    /// assert_eq!(counts, [6, 2]);
    /// ```
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_map::ChainMap;
    ///
    /// let mut stock = ChainMap::new();
    /// assert_eq!(stock.len(), 0);
    /// stock.insert("apple", 3);
    /// stock.insert("apple", 4);
    /// assert_eq!(stock.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_map::ChainMap;
    ///
    /// let mut stock = ChainMap::new();
    /// assert!(stock.is_empty());
    /// stock.insert("apple", 3);
    /// assert!(!stock.is_empty());
    /// ```
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

impl<K: Clone, V: Clone> Clone for ChainMap<K, V> {
    /// Builds an independent copy, appending every entry in order to a new map.
    fn clone(&self) -> Self {
        ChainMap { raw: self.raw.clone() }
    }

    /// Releases this map's entries, then appends a copy of every entry of `source`.
    fn clone_from(&mut self, source: &Self) {
        self.raw.clone_from(&source.raw);
    }
}

impl<K: Hash, V: Hash> Hash for ChainMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (k, v) in self {
            k.hash(state);
            v.hash(state);
        }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for ChainMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Eq, V: Eq> Eq for ChainMap<K, V> {}

impl<K: PartialOrd, V: PartialOrd> PartialOrd for ChainMap<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K: Ord, V: Ord> Ord for ChainMap<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for ChainMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Default for ChainMap<K, V> {
    fn default() -> Self {
        ChainMap::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for ChainMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = ChainMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for ChainMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K: Ord + Copy, V: Copy> Extend<(&'a K, &'a V)> for ChainMap<K, V> {
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        for (&k, &v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a ChainMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V> IntoIterator for ChainMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_map::ChainMap;
    ///
    /// let stock = ChainMap::from([("rope", 1), ("bread", 4)]);
    /// let mut iter = stock.into_iter();
    /// assert_eq!(iter.next(), Some(("bread", 4)));
    /// assert_eq!(iter.next(), Some(("rope", 1)));
    /// assert_eq!(iter.next(), None);
    /// ```
    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter { raw: self.raw }
    }
}

impl<K, Q, V> Index<&Q> for ChainMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the `ChainMap`.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for ChainMap<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K: 'a, V: 'a> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let raw = self.raw?;
        let node = raw.node(self.next?);
        self.next = node.next();
        self.remaining -= 1;
        Some(node.key_value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("remaining", &self.remaining).finish()
    }
}

impl<K, V> Default for Iter<'_, K, V> {
    /// Creates an empty `chain_map::Iter`.
    ///
    /// ```
    /// let iter: chain_map::chain_map::Iter<'_, u8, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        Iter {
            raw: None,
            next: None,
            remaining: 0,
        }
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            raw: self.raw,
            next: self.next,
            remaining: self.remaining,
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.raw.pop_head()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.raw.len(), Some(self.raw.len()))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.raw.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter").field("remaining", &self.raw.len()).finish()
    }
}

impl<K, V> Default for IntoIter<K, V> {
    /// Creates an empty `chain_map::IntoIter`.
    ///
    /// ```
    /// let iter: chain_map::chain_map::IntoIter<u8, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        IntoIter { raw: RawChainMap::new() }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K, V> Default for Keys<'_, K, V> {
    fn default() -> Self {
        Keys { inner: Iter::default() }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K, V> Default for Values<'_, K, V> {
    fn default() -> Self {
        Values { inner: Iter::default() }
    }
}
