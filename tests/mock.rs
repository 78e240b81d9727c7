use std::cell::{RefCell, RefMut};
use std::rc::Rc;

use mockall::predicate::eq;
use mockall::*;

#[automock]
pub trait Observer {
	fn observed(&self, value: i64);
}

/// A mock shared between a test body and the effects it registers.
#[derive(Clone)]
pub struct SharedObserver(Rc<RefCell<MockObserver>>);

impl SharedObserver {
	pub fn new() -> SharedObserver {
		SharedObserver(Rc::new(RefCell::new(MockObserver::new())))
	}

	pub fn get(&self) -> RefMut<'_, MockObserver> {
		self.0.borrow_mut()
	}

	/// Expects `value` to be observed exactly `times` times.
	pub fn expect(&self, value: i64, times: usize) {
		self.get()
			.expect_observed()
			.with(eq(value))
			.times(times)
			.return_const(());
	}

	pub fn checkpoint(&self) {
		self.get().checkpoint();
	}
}
