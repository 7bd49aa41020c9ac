//! Macros for ergonomic record construction.

/// Build a [`Record`](crate::core::Record) literal.
///
/// Values are expressions serialized with `serde_json::json!`, so anything
/// implementing `Serialize` works. Requires `serde_json` as a dependency of
/// the calling crate.
///
/// # Example
///
/// ```
/// use trackstate::record;
///
/// let friend = record! {
///     "name": "Jonathan",
///     "reason": "helped me move",
/// };
///
/// assert_eq!(friend["name"], "Jonathan");
/// assert!(record! {}.is_empty());
/// ```
#[macro_export]
macro_rules! record {
    ($($key:tt : $value:expr),* $(,)?) => {
        match serde_json::json!({ $($key: $value),* }) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    };
}
