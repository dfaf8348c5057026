/// Errors returned by [`ChainMap`](crate::ChainMap) lookups that require the key to exist.
///
/// # Examples
///
/// ```
/// use chain_map::{ChainMap, Error};
///
/// let mut potions: ChainMap<&str, u32> = ChainMap::new();
/// assert_eq!(potions.update("healing", 1), Err(Error::NotFound));
///
/// // "insert if absent"
/// if let Err(Error::NotFound) = potions.value_at("healing") {
///     potions.insert("healing", 1);
/// }
/// assert_eq!(potions.value_at("healing"), Ok(&1));
/// ```
#[derive(thiserror::Error, Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// The key is not present in the map.
    #[error("key not found")]
    NotFound,

    /// A required identity (such as a name used as a key) was empty.
    ///
    /// Never produced by `ChainMap` itself; it is the error kind for layers
    /// that validate keys before storing them.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

/// Shorthand for results carrying an [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages() {
        assert_eq!(Error::NotFound.to_string(), "key not found");
        assert_eq!(Error::InvalidArgument("name is empty").to_string(), "invalid argument: name is empty");
    }

    #[test]
    fn is_core_error() {
        fn assert_error<E: core::error::Error>(_: &E) {}
        assert_error(&Error::NotFound);
    }
}
