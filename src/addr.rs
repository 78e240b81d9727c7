use std::rc::{Rc, Weak};

/// Identity of a heap allocation, usable as a hash key.
///
/// An `Addr` is only unique while something keeps the allocation around,
/// so every table keyed by it also stores an `Rc` or a `Weak` to the same
/// value.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct Addr(usize);

impl Addr {
	pub fn of<T>(value: &T) -> Self {
		Addr(value as *const T as usize)
	}

	pub fn of_rc<T>(ptr: &Rc<T>) -> Self {
		Addr(Rc::as_ptr(ptr) as usize)
	}

	pub fn of_weak<T>(ptr: &Weak<T>) -> Self {
		Addr(Weak::as_ptr(ptr) as usize)
	}
}
