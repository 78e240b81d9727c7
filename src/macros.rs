pub use enclose::*;

/// Builds an [`Object`](crate::Object) from `key => value` pairs.
#[macro_export]
macro_rules! object {
    () => {
        $crate::Object::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let object = $crate::Object::new();
        $( object.insert($key, $value); )+
        object
    }};
}

/// Registers an effect, cloning the listed captures into it first.
#[macro_export]
macro_rules! effect {
    (( $($d_tt:tt)* ) => $($b:tt)*) => {
        $crate::effect($crate::macros::enclose!(($( $d_tt )*) move || { $($b)* }))
    };
    ($($b:tt)*) => {
        $crate::effect(move || { $($b)* })
    };
}
