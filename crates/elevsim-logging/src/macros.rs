//! ---
//! elevsim_section: "03-logging"
//! elevsim_subsection: "module"
//! elevsim_type: "source"
//! elevsim_scope: "code"
//! elevsim_description: "Logging macros enriching events with launch context."
//! elevsim_version: "v0.1.0"
//! elevsim_owner: "tbd"
//! ---

#[doc(hidden)]
#[macro_export]
macro_rules! __launch_event {
    ($level:expr, $ctx:expr, $($arg:tt)+) => {{
        let ctx = &$ctx;
        tracing::event!(
            $level,
            platform = ctx.platform.unwrap_or(""),
            class = ctx.class.unwrap_or(""),
            node = ctx.node,
            port = ctx.port,
            message = %format_args!($($arg)+)
        );
    }};
}

/// Emit an informational log enriched with launch context.
#[macro_export]
macro_rules! launch_info {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__launch_event!(tracing::Level::INFO, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__launch_event!(tracing::Level::INFO, $crate::LaunchContext::default(), $($arg)+)
    };
}

/// Emit a debug log enriched with launch context.
#[macro_export]
macro_rules! launch_debug {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__launch_event!(tracing::Level::DEBUG, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__launch_event!(tracing::Level::DEBUG, $crate::LaunchContext::default(), $($arg)+)
    };
}

/// Emit a warning enriched with launch context.
#[macro_export]
macro_rules! launch_warn {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__launch_event!(tracing::Level::WARN, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__launch_event!(tracing::Level::WARN, $crate::LaunchContext::default(), $($arg)+)
    };
}
