/// Print to stderr before the tracing subscriber is up.
#[macro_export]
macro_rules! bootstrap {
    ($x:expr $( , $xs:expr )* $(,)?) => {
        eprintln!(concat!("[bootstrap] ", $x) $( , $xs )*)
    };
}

/// Log the error of a `Result` and evaluate to its `Ok` value as an `Option`.
#[macro_export]
macro_rules! trace_catch {
    ($val:expr, $($rest:tt)*) => {
        match $val {
            Ok(v) => Some(v),
            Err(ref e) => {
                ::tracing::error!(error = %e, $($rest)*);
                None
            },
        }
    };
}
