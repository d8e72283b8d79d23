//! Single-threaded shared cells.
//!
//! `Shared<T>` wraps `Rc<RefCell<T>>` so every shared allocation in the
//! crate (environment frames, variable cells) goes through one factory and
//! identity comparison has one spelling (`Shared::ptr_eq`).
//!
//! Not thread-safe: a loading session and everything reachable from its
//! environment belong to one thread.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

#[repr(transparent)]
pub struct Shared<T>(Rc<RefCell<T>>);

impl<T> Shared<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        Shared(Rc::new(RefCell::new(value)))
    }

    /// Borrow the inner value immutably.
    ///
    /// Panics if the cell is currently mutably borrowed.
    #[inline]
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    /// Borrow the inner value mutably.
    ///
    /// Panics if the cell is currently borrowed.
    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Snapshot of the inner value.
    #[inline]
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.borrow().clone()
    }

    /// Whether both handles point at the same cell.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl<T> Clone for Shared<T> {
    #[inline]
    fn clone(&self) -> Self {
        Shared(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Shared").field(&self.0).finish()
    }
}

impl<T: Default> Default for Shared<T> {
    fn default() -> Self {
        Shared::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_clone_aliases_cell() {
        let a = Shared::new(1);
        let b = a.clone();
        *a.borrow_mut() = 7;
        assert_eq!(b.get(), 7);
        assert!(Shared::ptr_eq(&a, &b));
    }

    #[test]
    fn test_shared_new_cells_are_distinct() {
        let a = Shared::new(1);
        let b = Shared::new(1);
        assert!(!Shared::ptr_eq(&a, &b));
    }

    #[test]
    fn test_shared_default() {
        let cell: Shared<Vec<u8>> = Shared::default();
        cell.borrow_mut().push(3);
        assert_eq!(*cell.borrow(), vec![3]);
    }
}
