/// Logs a swallowed failure together with the call site.
///
/// Usage: `log_err!(err, "loading flyers")` or
/// `log_err!(err, "deleting store", id = %id)`.
#[macro_export]
macro_rules! log_err {
    ($err:expr, $context:expr) => {{
        ::tracing::error!(
            location = concat!(file!(), ":", line!()),
            error = %$err,
            "{}",
            $context
        );
    }};
    ($err:expr, $context:expr, $($field:tt)+) => {{
        ::tracing::error!(
            location = concat!(file!(), ":", line!()),
            error = %$err,
            $($field)+,
            "{}",
            $context
        );
    }};
}
