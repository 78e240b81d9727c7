use std::fmt::Debug;
use std::rc::{Rc, Weak};

use crate::addr::Addr;
use crate::dependencies::{self, Mutation};
use crate::registry;
use crate::value::{Key, Object, ObjectBody, Value};

/// Observable facade over exactly one raw [`Object`].
///
/// Reads made while an effect is running are recorded against that effect.
/// Writes that add a key or change its value re-run every effect that read
/// the key, before the write returns. Deleting a key notifies nobody.
///
/// The wrapper does not own its raw object: the caller keeps it alive.
/// Once the raw object is gone, reads return `None` and writes are ignored.
pub struct Reactive {
	body: Rc<ReactiveBody>,
}

pub struct ReactiveBody {
	target: Weak<ObjectBody>,
}

impl Drop for ReactiveBody {
	fn drop(&mut self) {
		registry::unregister(Addr::of(self), Addr::of_weak(&self.target));
	}
}

impl Clone for Reactive {
	fn clone(&self) -> Self {
		Self {
			body: self.body.clone(),
		}
	}
}

/// Wraps structured values, returns everything else unchanged.
///
/// Wrapping is idempotent: the same raw object always yields the same live
/// wrapper, and wrapping a wrapper returns it as is.
pub fn reactive(value: impl Into<Value>) -> Value {
	match value.into() {
		Value::Object(raw) => Value::Reactive(Reactive::new(&raw)),
		other => other,
	}
}

/// Returns `true` for a value that is a registered wrapper.
pub fn is_reactive(value: &Value) -> bool {
	match value {
		Value::Reactive(wrapper) => registry::is_registered(wrapper),
		_ => false,
	}
}

/// Unwraps a wrapper to its raw object, returns everything else unchanged.
pub fn to_raw(value: impl Into<Value>) -> Value {
	match value.into() {
		Value::Reactive(wrapper) => match registry::target_of(&wrapper) {
			Some(raw) => Value::Object(raw),
			None => Value::Reactive(wrapper),
		},
		other => other,
	}
}

impl Reactive {
	pub fn new(raw: &Object) -> Self {
		if let Some(existing) = registry::wrapper_of(raw) {
			return existing;
		}

		let wrapper = Reactive {
			body: Rc::new(ReactiveBody {
				target: raw.downgrade(),
			}),
		};

		registry::register(raw, &wrapper);
		wrapper
	}

	pub(crate) fn from_body(body: Rc<ReactiveBody>) -> Self {
		Reactive { body }
	}

	pub(crate) fn addr(&self) -> Addr {
		Addr::of_rc(&self.body)
	}

	pub(crate) fn downgrade(&self) -> Weak<ReactiveBody> {
		Rc::downgrade(&self.body)
	}

	fn target(&self) -> Option<Object> {
		self.body.target.upgrade().map(Object::from_body)
	}

	/// Reads `key`, recording the read against the running effect.
	/// Records are wrapped on the way out.
	pub fn get(&self, key: &str) -> Option<Value> {
		let target = self.target()?;
		let result = target.get(key);
		dependencies::record(&target, key);
		result.map(reactive)
	}

	pub fn get_untracked(&self, key: &str) -> Option<Value> {
		self.target()?.get(key).map(reactive)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.target()
			.map_or(false, |target| target.contains_key(key))
	}

	pub fn set(&self, key: impl Into<Key>, value: impl Into<Value>) {
		let _ = self.replace(key, value);
	}

	/// Writes `key` and returns the previous value.
	///
	/// Adding a key always replays its dependents. Overwriting replays them
	/// only when the new value is not identical to the old one.
	pub fn replace(&self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
		let key = key.into();
		let Some(target) = self.target() else {
			tracing::trace!(key = &*key, "write to a released object ignored");
			return None;
		};

		let value = to_raw(value);
		let old = target.insert(key.clone(), value.clone()).map(to_raw);
		let mutation = match &old {
			None => Some(Mutation::Add),
			Some(old) if !old.is_identical(&value) => Some(Mutation::Set),
			Some(_) => None,
		};

		if let Some(mutation) = mutation {
			dependencies::replay(&target, &key, mutation);
		}

		old.map(reactive)
	}

	/// Read-modify-write of `key`. The closure sees the value the way `get`
	/// returns it, records wrapped. A missing key starts out as
	/// `Value::Null` and the write counts as an addition.
	pub fn update(&self, key: impl Into<Key>, func: impl FnOnce(&mut Value)) {
		let key = key.into();
		let Some(current) = self.target().map(|target| target.get(&key)) else {
			return;
		};

		let mut value = current.map(reactive).unwrap_or_default();
		func(&mut value);
		self.set(key, value);
	}

	/// Removes `key` without notifying its dependents.
	pub fn delete(&self, key: &str) -> Option<Value> {
		let removed = self.target()?.remove(key);
		if removed.is_some() {
			tracing::trace!(key, "deleted without replay");
		}
		removed.map(reactive)
	}

	/// The raw object, if the caller still holds it.
	pub fn to_raw(&self) -> Option<Object> {
		self.target()
	}

	/// Number of effects that have read `key` through any wrapper of this
	/// object.
	pub fn dependents(&self, key: &str) -> usize {
		self.target()
			.map_or(0, |target| dependencies::dependents(&target, key))
	}

	pub fn ptr_eq(&self, other: &Reactive) -> bool {
		Rc::ptr_eq(&self.body, &other.body)
	}
}

impl From<&Object> for Reactive {
	fn from(raw: &Object) -> Self {
		Reactive::new(raw)
	}
}

impl TryFrom<Value> for Reactive {
	type Error = Value;
	fn try_from(value: Value) -> Result<Self, Self::Error> {
		match value {
			Value::Reactive(wrapper) => Ok(wrapper),
			Value::Object(raw) => Ok(Reactive::new(&raw)),
			other => Err(other),
		}
	}
}

impl PartialEq for Reactive {
	fn eq(&self, other: &Self) -> bool {
		self.ptr_eq(other)
	}
}

impl Eq for Reactive {}

impl Debug for Reactive {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.target() {
			Some(target) => f.debug_tuple("Reactive").field(&target).finish(),
			None => f.write_str("Reactive(<released>)"),
		}
	}
}
