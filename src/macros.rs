/// Builds a [`ZoonValue`](crate::ZoonValue) from a JSON-like literal.
///
/// Object values may span several tokens (`"n": -5`, `"sum": a + b`).
/// Array elements are single token trees, so wrap compound expressions in
/// parentheses: `zoon!([1, (-2)])`. Any other expression is converted with
/// [`to_value`](crate::to_value), falling back to null when that fails.
///
/// # Examples
///
/// ```rust
/// use serde_zoon::{zoon, ZoonValue};
///
/// let port = 8080;
/// let config = zoon!({
///     "host": "localhost",
///     "port": port,
///     "offset": -1,
///     "tls": { "enabled": true, "cert": null },
///     "tags": ["a", "b"],
/// });
///
/// assert_eq!(config.pointer("tls.enabled"), Some(&ZoonValue::Bool(true)));
/// assert_eq!(config.pointer("offset").and_then(ZoonValue::as_i64), Some(-1));
/// ```
#[macro_export]
macro_rules! zoon {
    (null) => {
        $crate::ZoonValue::Null
    };

    (true) => {
        $crate::ZoonValue::Bool(true)
    };

    (false) => {
        $crate::ZoonValue::Bool(false)
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::ZoonValue::Array(vec![$($crate::zoon!($elem)),*])
    };

    ({ $($body:tt)* }) => {{
        #[allow(unused_mut)]
        let mut object = $crate::ZoonMap::new();
        $crate::zoon!(@entries object () $($body)*);
        $crate::ZoonValue::Object(object)
    }};

    (@entries $object:ident ()) => {};

    (@entries $object:ident () $key:literal : $($rest:tt)*) => {
        $crate::zoon!(@value $object $key () $($rest)*);
    };

    // A comma closes the value collected so far.
    (@value $object:ident $key:literal ($($value:tt)+) , $($rest:tt)*) => {
        $object.insert($key.to_string(), $crate::zoon!($($value)+));
        $crate::zoon!(@entries $object () $($rest)*);
    };

    (@value $object:ident $key:literal ($($value:tt)+)) => {
        $object.insert($key.to_string(), $crate::zoon!($($value)+));
    };

    (@value $object:ident $key:literal ($($value:tt)*) $next:tt $($rest:tt)*) => {
        $crate::zoon!(@value $object $key ($($value)* $next) $($rest)*);
    };

    ($other:expr) => {
        $crate::to_value(&$other).unwrap_or($crate::ZoonValue::Null)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Number, ZoonMap, ZoonValue};

    #[test]
    fn test_zoon_macro_primitives() {
        assert_eq!(zoon!(null), ZoonValue::Null);
        assert_eq!(zoon!(true), ZoonValue::Bool(true));
        assert_eq!(zoon!(42), ZoonValue::Number(Number::Integer(42)));
        assert_eq!(zoon!(-7), ZoonValue::Number(Number::Integer(-7)));
        assert_eq!(zoon!("hello"), ZoonValue::String("hello".to_string()));
    }

    #[test]
    fn test_zoon_macro_multi_token_values() {
        let base = 40;
        let value = zoon!({ "sum": base + 2, "neg": -3, });
        let map = value.as_object().unwrap();
        assert_eq!(map.get("sum"), Some(&ZoonValue::from(42)));
        assert_eq!(map.get("neg"), Some(&ZoonValue::from(-3)));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["sum", "neg"]);
    }

    #[test]
    fn test_zoon_macro_empty_containers() {
        assert_eq!(zoon!({}), ZoonValue::Object(ZoonMap::new()));
        assert_eq!(zoon!([]), ZoonValue::Array(vec![]));
        assert_eq!(
            zoon!([1, (-2)]),
            ZoonValue::Array(vec![ZoonValue::from(1), ZoonValue::from(-2)])
        );
    }
}
