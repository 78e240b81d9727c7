use std::rc::Rc;

use crate::addr::Addr;
use crate::stack::RunGuard;

/// A callback that re-runs whenever a property it has read is written.
///
/// Once it has read a property the effect is owned by the dependency graph,
/// so the returned handle may be dropped. It lives until every object it
/// has read is dropped.
#[derive(Clone)]
pub struct Effect {
	body: Rc<EffectBody>,
}

struct EffectBody {
	name: &'static str,
	func: Box<dyn Fn()>,
}

/// Registers `func` and runs it once right away.
pub fn effect(func: impl Fn() + 'static) -> Effect {
	effect_with_name("<unnamed>", func)
}

pub fn effect_with_name(name: &'static str, func: impl Fn() + 'static) -> Effect {
	let effect = Effect::new_with_name(name, Box::new(func));
	effect.run();
	effect
}

impl Effect {
	/// Wraps `func` without running it. Nothing is tracked until the
	/// first [`Effect::run`].
	#[must_use]
	pub fn new(func: Box<dyn Fn()>) -> Self {
		Self::new_with_name("<unnamed>", func)
	}

	#[must_use]
	pub fn new_with_name(name: &'static str, func: Box<dyn Fn()>) -> Self {
		Effect {
			body: Rc::new(EffectBody { name, func }),
		}
	}

	pub(crate) fn addr(&self) -> Addr {
		Addr::of_rc(&self.body)
	}

	pub fn name(&self) -> &'static str {
		self.body.name
	}

	/// Runs the callback as the current effect, so every read it makes is
	/// recorded against this effect.
	pub fn run(&self) {
		let span = tracing::trace_span!("effect", name = self.body.name);
		let _enter = span.enter();

		let _guard = RunGuard::enter(self.clone());
		(self.body.func)();
	}

	pub fn ptr_eq(&self, other: &Effect) -> bool {
		Rc::ptr_eq(&self.body, &other.body)
	}
}

impl PartialEq for Effect {
	fn eq(&self, other: &Self) -> bool {
		self.ptr_eq(other)
	}
}

impl Eq for Effect {}

impl std::fmt::Debug for Effect {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Effect").field("name", &self.body.name).finish()
	}
}
