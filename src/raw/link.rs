use core::fmt;
use core::num::NonZero;

#[cfg(test)]
type Raw = u16;
#[cfg(not(test))]
type Raw = u32;

/// Names the arena slot of a chain node.
///
/// Every chain position (the map's head or a node's `next`) holds at most one link, and
/// `None` ends the chain. The slot is stored plus one so `Option<Link>` costs no tag.
#[derive(Clone, Copy, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Link(NonZero<Raw>);

impl Link {
    /// Number of slots a link can name.
    pub(crate) const SLOTS: usize = Raw::MAX as usize;

    /// Returns the link naming `slot`, or `None` when `slot` is out of reach.
    #[inline]
    pub(crate) fn new(slot: usize) -> Option<Self> {
        let raw = Raw::try_from(slot.checked_add(1)?).ok()?;
        NonZero::new(raw).map(Self)
    }

    #[inline]
    pub(crate) const fn slot(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl fmt::Debug for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Link({})", self.slot())
    }
}
