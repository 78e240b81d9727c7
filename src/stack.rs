use std::cell::RefCell;

use smallvec::SmallVec;

use crate::effect::Effect;

thread_local! {
	static RUNNING: RefCell<SmallVec<[Effect; 8]>> = const { RefCell::new(SmallVec::new_const()) };
}

pub(crate) fn begin_run(effect: Effect) {
	RUNNING.with(|running| running.borrow_mut().push(effect));
}

pub(crate) fn end_run() {
	// The popped handle may be the last one, drop it outside the borrow.
	let top = RUNNING.with(|running| running.borrow_mut().pop());
	drop(top);
}

/// The innermost effect that is currently running, if any.
pub fn current() -> Option<Effect> {
	RUNNING.with(|running| running.borrow().last().cloned())
}

/// Returns `true` while any effect is running on this thread.
pub fn is_tracking() -> bool {
	RUNNING.with(|running| !running.borrow().is_empty())
}

pub fn depth() -> usize {
	RUNNING.with(|running| running.borrow().len())
}

/// Keeps an effect on the stack for as long as it lives. Popping happens
/// in `Drop`, so a panicking callback still leaves the stack balanced.
pub(crate) struct RunGuard {
	_private: (),
}

impl RunGuard {
	pub(crate) fn enter(effect: Effect) -> Self {
		begin_run(effect);
		RunGuard { _private: () }
	}
}

impl Drop for RunGuard {
	fn drop(&mut self) {
		end_run();
	}
}
