use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::{Rc, Weak};

use fxhash::FxHashMap;

use crate::addr::Addr;
use crate::dependencies;
use crate::reactive::{self, Reactive};

pub type Key = Rc<str>;

/// A record field value.
///
/// `Object` and `Reactive` are structured values, everything else is a
/// scalar and is never wrapped.
#[derive(Clone, Debug, Default)]
pub enum Value {
	#[default]
	Null,
	Bool(bool),
	Int(i64),
	Float(f64),
	Str(Rc<str>),
	Object(Object),
	Reactive(Reactive),
}

impl Value {
	pub fn is_structured(&self) -> bool {
		matches!(self, Value::Object(_) | Value::Reactive(_))
	}

	/// Strict equality: scalars compare by value, records by identity.
	pub fn is_identical(&self, other: &Value) -> bool {
		match (self, other) {
			(Value::Null, Value::Null) => true,
			(Value::Bool(a), Value::Bool(b)) => a == b,
			(Value::Int(a), Value::Int(b)) => a == b,
			(Value::Float(a), Value::Float(b)) => a == b,
			(Value::Str(a), Value::Str(b)) => a == b,
			(Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
			(Value::Reactive(a), Value::Reactive(b)) => a.ptr_eq(b),
			_ => false,
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Value::Bool(value) => Some(*value),
			_ => None,
		}
	}

	pub fn as_int(&self) -> Option<i64> {
		match self {
			Value::Int(value) => Some(*value),
			_ => None,
		}
	}

	pub fn as_float(&self) -> Option<f64> {
		match self {
			Value::Float(value) => Some(*value),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::Str(value) => Some(value),
			_ => None,
		}
	}

	pub fn as_object(&self) -> Option<&Object> {
		match self {
			Value::Object(object) => Some(object),
			_ => None,
		}
	}

	pub fn as_reactive(&self) -> Option<&Reactive> {
		match self {
			Value::Reactive(reactive) => Some(reactive),
			_ => None,
		}
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		self.is_identical(other)
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Bool(value)
	}
}

impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Value::Int(value.into())
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Value::Int(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Value::Float(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::Str(value.into())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::Str(value.into())
	}
}

impl From<Rc<str>> for Value {
	fn from(value: Rc<str>) -> Self {
		Value::Str(value)
	}
}

impl From<Object> for Value {
	fn from(object: Object) -> Self {
		Value::Object(object)
	}
}

impl From<&Object> for Value {
	fn from(object: &Object) -> Self {
		Value::Object(object.clone())
	}
}

impl From<Reactive> for Value {
	fn from(reactive: Reactive) -> Self {
		Value::Reactive(reactive)
	}
}

impl<T> From<Option<T>> for Value
where
	T: Into<Value>,
{
	fn from(value: Option<T>) -> Self {
		value.map_or(Value::Null, Into::into)
	}
}

/// A plain, untracked record.
///
/// Cloning an `Object` shares the same record. Access through the handle
/// itself never records or replays dependencies, only a [`Reactive`]
/// wrapper does.
pub struct Object {
	body: Rc<ObjectBody>,
}

pub struct ObjectBody {
	fields: RefCell<FxHashMap<Key, Value>>,
}

impl Drop for ObjectBody {
	fn drop(&mut self) {
		dependencies::forget(Addr::of(self));
	}
}

impl Clone for Object {
	fn clone(&self) -> Self {
		Self {
			body: self.body.clone(),
		}
	}
}

impl Default for Object {
	fn default() -> Self {
		Object::new()
	}
}

impl Object {
	pub fn new() -> Self {
		Object {
			body: Rc::new(ObjectBody {
				fields: RefCell::new(FxHashMap::default()),
			}),
		}
	}

	pub(crate) fn from_body(body: Rc<ObjectBody>) -> Self {
		Object { body }
	}

	pub(crate) fn addr(&self) -> Addr {
		Addr::of_rc(&self.body)
	}

	pub(crate) fn downgrade(&self) -> Weak<ObjectBody> {
		Rc::downgrade(&self.body)
	}

	pub fn get(&self, key: &str) -> Option<Value> {
		self.body.fields.borrow().get(key).cloned()
	}

	/// Stores `value` under `key`. A wrapper is stored as its raw object, so
	/// records never contain wrappers.
	pub fn insert(&self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
		let value = reactive::to_raw(value);
		self.body.fields.borrow_mut().insert(key.into(), value)
	}

	pub fn remove(&self, key: &str) -> Option<Value> {
		self.body.fields.borrow_mut().remove(key)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.body.fields.borrow().contains_key(key)
	}

	pub fn keys(&self) -> Vec<Key> {
		self.body.fields.borrow().keys().cloned().collect()
	}

	pub fn len(&self) -> usize {
		self.body.fields.borrow().len()
	}

	pub fn is_empty(&self) -> bool {
		self.body.fields.borrow().is_empty()
	}

	pub fn ptr_eq(&self, other: &Object) -> bool {
		Rc::ptr_eq(&self.body, &other.body)
	}
}

impl<K, V> FromIterator<(K, V)> for Object
where
	K: Into<Key>,
	V: Into<Value>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let object = Object::new();
		for (key, value) in iter {
			object.insert(key, value);
		}
		object
	}
}

impl Debug for Object {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_map()
			.entries(self.body.fields.borrow().iter())
			.finish()
	}
}
