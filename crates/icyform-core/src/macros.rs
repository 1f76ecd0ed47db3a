/// Return a contract error when `$cond` fails and contract checks are enabled.
///
/// With checks disabled the condition is not evaluated and the caller falls
/// through to its total fallback path.
macro_rules! ensure_contract {
    ($cond:expr, $context:expr, $($arg:tt)+) => {
        if $crate::config::CONTRACT_CHECKS && !($cond) {
            return Err($crate::error::SchemaError::contract(
                $context,
                format!($($arg)+),
            ));
        }
    };
}
