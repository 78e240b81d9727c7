use std::cell::Cell;
use std::rc::Rc;

use reactivity::{effect, is_reactive, object, reactive, to_raw, Object, Reactive, Value};

#[test]
fn wrapping_is_idempotent() {
	let raw = object! { "a" => 1 };

	let first = reactive(&raw);
	let second = reactive(&raw);
	assert!(is_reactive(&first));
	assert_eq!(first, second);

	let again = reactive(first.clone());
	assert_eq!(again, first);

	assert_eq!(Reactive::new(&raw), Reactive::try_from(first).unwrap());
	assert_eq!(reactivity::registered_wrappers(), 1);
}

#[test]
fn scalars_are_not_wrapped() {
	assert_eq!(reactive(1), Value::Int(1));
	assert_eq!(reactive("text"), Value::from("text"));
	assert_eq!(reactive(Value::Null), Value::Null);
	assert!(!is_reactive(&reactive(true)));

	assert_eq!(Reactive::try_from(Value::Int(3)), Err(Value::Int(3)));
	assert_eq!(reactivity::registered_wrappers(), 0);
}

#[test]
fn raw_and_wrapper_see_the_same_data() {
	let raw = object! { "a" => 1, "s" => "x" };
	let state = Reactive::new(&raw);

	assert_eq!(state.get("a"), raw.get("a"));
	assert_eq!(state.get("s"), raw.get("s"));
	assert_eq!(state.get("missing"), None);

	state.set("b", 2);
	assert_eq!(raw.get("b"), Some(Value::Int(2)));

	raw.insert("c", 3.5);
	assert_eq!(state.get("c"), Some(Value::Float(3.5)));

	assert!(state.to_raw().unwrap().ptr_eq(&raw));
	assert_eq!(to_raw(state.clone()), Value::Object(raw.clone()));
	assert_eq!(to_raw(5), Value::Int(5));
}

#[test]
fn raw_writes_are_untracked() {
	let raw = object! { "a" => 1 };
	let state = Reactive::new(&raw);
	let runs = Rc::new(Cell::new(0));

	let _effect = effect({
		let state = state.clone();
		let runs = runs.clone();
		move || {
			state.get("a");
			runs.set(runs.get() + 1);
		}
	});

	raw.insert("a", 2);
	assert_eq!(runs.get(), 1);
	assert_eq!(state.get_untracked("a"), Some(Value::Int(2)));
}

#[test]
fn nested_records_keep_their_wrapper() {
	let inner = object! { "x" => 1 };
	let raw = object! { "nested" => &inner };
	let state = Reactive::new(&raw);

	let first = state.get("nested").unwrap();
	let second = state.get("nested").unwrap();

	assert!(is_reactive(&first));
	assert_eq!(first, second);
	assert_eq!(first, reactive(&inner));

	// the raw record still holds the raw nested object
	let stored = raw.get("nested").unwrap();
	assert!(stored.as_object().unwrap().ptr_eq(&inner));
}

#[test]
fn wrappers_are_released_with_their_handles() {
	let raw = Object::new();

	let wrapper = Reactive::new(&raw);
	assert_eq!(reactivity::registered_wrappers(), 1);

	drop(wrapper);
	assert_eq!(reactivity::registered_wrappers(), 0);

	let _wrapper = Reactive::new(&raw);
	assert_eq!(reactivity::registered_wrappers(), 1);
}

#[test]
fn dependencies_are_released_with_the_object() {
	let raw = object! { "a" => 1 };
	let state = Reactive::new(&raw);

	effect({
		let state = state.clone();
		move || {
			state.get("a");
		}
	});

	assert_eq!(reactivity::tracked_objects(), 1);
	assert_eq!(state.dependents("a"), 1);

	drop(raw);

	assert_eq!(reactivity::tracked_objects(), 0);
	assert_eq!(state.dependents("a"), 0);
	assert_eq!(format!("{:?}", state), "Reactive(<released>)");

	drop(state);
	assert_eq!(reactivity::registered_wrappers(), 0);
}

#[test]
fn raw_object_accessors() {
	let raw = object! { "f" => 1.5, "s" => "x" };

	assert_eq!(raw.len(), 2);
	assert!(!raw.is_empty());
	assert!(Object::new().is_empty());

	let mut keys: Vec<String> = raw.keys().iter().map(|key| key.to_string()).collect();
	keys.sort();
	assert_eq!(keys, vec!["f", "s"]);

	assert_eq!(raw.get("f").and_then(|v| v.as_float()), Some(1.5));
	assert_eq!(raw.get("s").unwrap().as_float(), None);
	assert_eq!(raw.get("s").unwrap().as_str(), Some("x"));

	let wrapped = reactive(&raw);
	assert!(wrapped.as_reactive().unwrap().to_raw().unwrap().ptr_eq(&raw));
	assert!(Value::Int(1).as_reactive().is_none());

	assert_eq!(raw.remove("s"), Some(Value::from("x")));
	assert_eq!(raw.len(), 1);
}

#[test]
fn debug_output_shows_fields() {
	let raw = object! { "a" => 1 };
	let state = Reactive::new(&raw);
	assert_eq!(format!("{:?}", state), "Reactive({\"a\": Int(1)})");
}
