use alloc::vec::Vec;
use core::mem;

use super::link::Link;

/// A node slot. Vacant slots form the free list, each naming the next vacant slot.
enum Slot<T> {
    Occupied(T),
    Vacant { next_free: Option<Link> },
}

/// Node storage for one chain.
///
/// Released slots are pushed onto a free list threaded through the slots themselves, so
/// reuse needs no side allocation. The most recently released slot is reused first.
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Option<Link>,
    occupied: usize,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: None,
            occupied: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: None,
            occupied: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Number of occupied slots.
    pub(crate) const fn len(&self) -> usize {
        self.occupied
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    /// Stores `element`, preferring the head of the free list over growing.
    pub(crate) fn alloc(&mut self, element: T) -> Link {
        let link = match self.free {
            Some(link) => {
                match mem::replace(&mut self.slots[link.slot()], Slot::Occupied(element)) {
                    Slot::Vacant { next_free } => self.free = next_free,
                    Slot::Occupied(_) => unreachable!("`Arena::alloc()` - free list reached an occupied slot"),
                }
                link
            }
            None => {
                let Some(link) = Link::new(self.slots.len()) else {
                    panic!("`Arena::alloc()` - arena is full ({} slots)", Link::SLOTS);
                };
                self.slots.push(Slot::Occupied(element));
                link
            }
        };
        self.occupied += 1;
        link
    }

    #[inline]
    pub(crate) fn get(&self, link: Link) -> &T {
        match &self.slots[link.slot()] {
            Slot::Occupied(element) => element,
            Slot::Vacant { .. } => panic!("`Arena::get()` - `link` is invalid!"),
        }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, link: Link) -> &mut T {
        match &mut self.slots[link.slot()] {
            Slot::Occupied(element) => element,
            Slot::Vacant { .. } => panic!("`Arena::get_mut()` - `link` is invalid!"),
        }
    }

    /// Moves the element out of its slot and pushes the slot onto the free list.
    pub(crate) fn take(&mut self, link: Link) -> T {
        let slot = &mut self.slots[link.slot()];
        assert!(matches!(slot, Slot::Occupied(_)), "`Arena::take()` - `link` is invalid!");

        let Slot::Occupied(element) = mem::replace(slot, Slot::Vacant { next_free: self.free }) else {
            unreachable!()
        };
        self.free = Some(link);
        self.occupied -= 1;
        element
    }

    /// Drops every element and forgets the free list, keeping the allocation.
    pub(crate) fn clear(&mut self) {
        self.free = None;
        self.occupied = 0;
        self.slots.clear();
    }
}
