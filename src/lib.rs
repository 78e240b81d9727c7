pub mod macros;

mod addr;
mod dependencies;
mod effect;
mod reactive;
mod registry;
mod stack;
mod value;

pub use dependencies::tracked_objects;
pub use effect::{effect, effect_with_name, Effect};
pub use reactive::{is_reactive, reactive, to_raw, Reactive};
pub use registry::registered_wrappers;
pub use stack::{current, depth, is_tracking};
pub use value::{Key, Object, Value};
