use core::fmt;

use super::ChainMap;

/// Renders a [`ChainMap`] as one `key:value` line per entry, in ascending key order.
///
/// This `struct` is created by the [`display`](ChainMap::display) method. The map's own
/// [`fmt::Display`] implementation writes the same lines.
#[must_use = "this does nothing unless formatted"]
pub struct Display<'a, K, V> {
    map: &'a ChainMap<K, V>,
}

impl<K, V> ChainMap<K, V> {
    /// Returns an object that implements [`fmt::Display`] for dumping the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_map::ChainMap;
    ///
    /// let mut pack = ChainMap::new();
    /// pack.insert("torch", 1);
    /// pack.insert("apple", 2);
    /// pack.insert("water", 3);
    ///
    /// assert_eq!(pack.display().to_string(), "apple:2\ntorch:1\nwater:3\n");
    /// ```
    pub fn display(&self) -> Display<'_, K, V> {
        Display { map: self }
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for Display<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.map, f)
    }
}

impl<K, V> fmt::Debug for Display<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Display").field("len", &self.map.len()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for ChainMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut current = self.raw.head();
        while let Some(link) = current {
            let node = self.raw.node(link);
            writeln!(f, "{node}")?;
            current = node.next();
        }
        Ok(())
    }
}
