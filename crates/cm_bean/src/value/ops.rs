use alloc::boxed::Box;

use crate::value::Value;

// -----------------------------------------------------------------------------
// Collection

/// A sequence or set of values.
pub trait Collection: Value {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates the elements in the collection's own order.
    fn iter_values(&self) -> Box<dyn Iterator<Item = &dyn Value> + '_>;
}

// -----------------------------------------------------------------------------
// Map

/// A key/value container.
pub trait Map: Value {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates the entries in the map's own order.
    fn iter_entries(&self) -> Box<dyn Iterator<Item = (&dyn Value, &dyn Value)> + '_>;
}

// -----------------------------------------------------------------------------
// Shared

/// A value behind a lock, reachable from several owners.
///
/// The identity of a shared value is the address of the lock, which stays
/// stable while any owner keeps it alive.
pub trait Shared: Value {
    /// Runs `f` with the locked value under a read guard.
    fn read_with(&self, f: &mut dyn FnMut(&dyn Value));

    /// Runs `f` with the locked value under a write guard.
    fn write_with(&self, f: &mut dyn FnMut(&mut dyn Value));
}
