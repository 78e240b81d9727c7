use std::cell::RefCell;
use std::rc::Weak;

use fxhash::FxHashMap;

use crate::addr::Addr;
use crate::reactive::{Reactive, ReactiveBody};
use crate::value::{Object, ObjectBody};

/// One raw object and its wrapper. Both sides are weak: the caller owns the
/// raw object and the wrapper handles own the wrapper.
#[derive(Clone)]
struct Registration {
	raw: Weak<ObjectBody>,
	wrapper: Weak<ReactiveBody>,
}

thread_local! {
	static WRAPPERS: RefCell<FxHashMap<Addr, Registration>> = RefCell::new(FxHashMap::default());
	static TARGETS: RefCell<FxHashMap<Addr, Registration>> = RefCell::new(FxHashMap::default());
}

/// Looks up the live wrapper of `raw`.
pub(crate) fn wrapper_of(raw: &Object) -> Option<Reactive> {
	WRAPPERS
		.with(|wrappers| {
			wrappers
				.borrow()
				.get(&raw.addr())
				.and_then(|registration| registration.wrapper.upgrade())
		})
		.map(Reactive::from_body)
}

/// Looks up the raw object behind a registered wrapper.
pub(crate) fn target_of(wrapper: &Reactive) -> Option<Object> {
	TARGETS
		.with(|targets| {
			targets
				.borrow()
				.get(&wrapper.addr())
				.and_then(|registration| registration.raw.upgrade())
		})
		.map(Object::from_body)
}

pub(crate) fn is_registered(wrapper: &Reactive) -> bool {
	TARGETS.with(|targets| targets.borrow().contains_key(&wrapper.addr()))
}

pub(crate) fn register(raw: &Object, wrapper: &Reactive) {
	let registration = Registration {
		raw: raw.downgrade(),
		wrapper: wrapper.downgrade(),
	};

	WRAPPERS.with(|wrappers| {
		wrappers
			.borrow_mut()
			.insert(raw.addr(), registration.clone())
	});
	TARGETS.with(|targets| targets.borrow_mut().insert(wrapper.addr(), registration));
}

/// Called from the wrapper's destructor. The raw→wrapper entry is only
/// removed while it still points at the dying wrapper.
pub(crate) fn unregister(wrapper: Addr, raw: Addr) {
	let _ = TARGETS.try_with(|targets| {
		if let Ok(mut targets) = targets.try_borrow_mut() {
			targets.remove(&wrapper);
		}
	});

	let _ = WRAPPERS.try_with(|wrappers| {
		if let Ok(mut wrappers) = wrappers.try_borrow_mut() {
			let owned = wrappers
				.get(&raw)
				.map_or(false, |registration| {
					Addr::of_weak(&registration.wrapper) == wrapper
				});

			if owned {
				wrappers.remove(&raw);
			}
		}
	});
}

/// Number of wrappers currently alive on this thread.
pub fn registered_wrappers() -> usize {
	TARGETS.with(|targets| targets.borrow().len())
}
