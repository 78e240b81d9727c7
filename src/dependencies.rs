use std::cell::RefCell;
use std::rc::Weak;

use fxhash::FxHashMap;
use smallvec::SmallVec;

use crate::addr::Addr;
use crate::effect::Effect;
use crate::stack;
use crate::value::{Key, Object, ObjectBody};

/// Effects that read one key. The map owns them, so an effect lives for as
/// long as any object it has read.
type Dependents = FxHashMap<Addr, Effect>;

/// What kind of write caused a replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mutation {
	Add,
	Set,
}

struct Dependencies {
	/// Pins the address of the raw object while it is used as a key.
	#[allow(unused)]
	target: Weak<ObjectBody>,
	keys: FxHashMap<Key, Dependents>,
}

thread_local! {
	static GRAPH: RefCell<FxHashMap<Addr, Dependencies>> = RefCell::new(FxHashMap::default());
}

/// Attributes a read of `target[key]` to the running effect.
pub(crate) fn record(target: &Object, key: &str) {
	let Some(effect) = stack::current() else {
		return;
	};

	GRAPH.with(|graph| {
		let mut graph = graph.borrow_mut();
		let entry = graph
			.entry(target.addr())
			.or_insert_with(|| Dependencies {
				target: target.downgrade(),
				keys: FxHashMap::default(),
			});

		if !entry.keys.contains_key(key) {
			entry.keys.insert(Key::from(key), Dependents::default());
		}

		if let Some(dependents) = entry.keys.get_mut(key) {
			if !dependents.contains_key(&effect.addr()) {
				tracing::trace!(key, effect = effect.name(), "recorded dependency");
				dependents.insert(effect.addr(), effect.clone());
			}
		}
	});
}

/// Re-runs every effect that has read `target[key]`.
///
/// The set is snapshotted first: effects that start depending on the key
/// during this replay are not run by it.
pub(crate) fn replay(target: &Object, key: &str, mutation: Mutation) {
	let snapshot: SmallVec<[Effect; 4]> = GRAPH.with(|graph| {
		graph
			.borrow()
			.get(&target.addr())
			.and_then(|entry| entry.keys.get(key))
			.map(|dependents| dependents.values().cloned().collect())
			.unwrap_or_default()
	});

	if snapshot.is_empty() {
		return;
	}

	tracing::debug!(key, ?mutation, dependents = snapshot.len(), "replaying");

	for effect in &snapshot {
		effect.run();
	}
}

/// Releases everything recorded for a raw object that is being dropped,
/// including the effects nothing else holds.
pub(crate) fn forget(target: Addr) {
	let removed = GRAPH.try_with(|graph| {
		graph
			.try_borrow_mut()
			.ok()
			.and_then(|mut graph| graph.remove(&target))
	});
	// Dropping effects runs arbitrary destructors, keep it outside the borrow.
	drop(removed);
}

/// Number of effects depending on `target[key]`.
pub(crate) fn dependents(target: &Object, key: &str) -> usize {
	GRAPH.with(|graph| {
		graph
			.borrow()
			.get(&target.addr())
			.and_then(|entry| entry.keys.get(key))
			.map_or(0, |dependents| dependents.len())
	})
}

/// Number of raw objects that have at least one recorded read.
pub fn tracked_objects() -> usize {
	GRAPH.with(|graph| graph.borrow().len())
}
