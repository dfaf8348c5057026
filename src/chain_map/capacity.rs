use super::ChainMap;
use crate::raw::RawChainMap;

impl<K, V> ChainMap<K, V> {
    /// Creates an empty map with room for at least `capacity` entries before the node
    /// arena reallocates.
    ///
    /// This is an extension and is not part of the standard `BTreeMap` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_map::ChainMap;
    ///
    /// let pack: ChainMap<&str, u32> = ChainMap::with_capacity(32);
    /// assert!(pack.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        ChainMap {
            raw: RawChainMap::with_capacity(capacity),
        }
    }

    /// Returns the number of entries the map can hold without reallocating.
    ///
    /// Clearing the map keeps its capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_map::ChainMap;
    ///
    /// let mut pack: ChainMap<&str, u32> = ChainMap::with_capacity(32);
    /// pack.insert("rations", 3);
    /// pack.clear();
    /// assert!(pack.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
