//! ---
//! elevsim_section: "03-logging"
//! elevsim_subsection: "module"
//! elevsim_type: "source"
//! elevsim_scope: "code"
//! elevsim_description: "Structured logging adapters for the launch harness."
//! elevsim_version: "v0.1.0"
//! elevsim_owner: "tbd"
//! ---
#![warn(missing_docs)]

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{fmt as subscriber_fmt, prelude::*, EnvFilter, Layer, Registry};

pub mod macros;

/// Environment variable consulted first for the log filter directive.
pub const LOG_ENV: &str = "ELEVSIM_LOG";

const DEFAULT_FILTER: &str = "info";

/// Errors raised while installing the tracing subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The configured filter directive could not be parsed.
    #[error("invalid log filter directive `{directive}`: {reason}")]
    InvalidFilter {
        /// Directive as supplied by the configuration.
        directive: String,
        /// Parser diagnostic.
        reason: String,
    },
}

/// Output formats supported by the launcher.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LogFormat {
    /// Human readable, single line per event.
    #[default]
    Pretty,
    /// One JSON object per event.
    StructuredJson,
}

/// Logging section of the launcher configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Output format for stdout.
    #[serde(default)]
    pub format: LogFormat,
    /// Filter directive used when neither `ELEVSIM_LOG` nor `RUST_LOG` is set.
    #[serde(default)]
    pub filter: Option<String>,
}

/// Install the global subscriber.
///
/// * `ELEVSIM_LOG` overrides the filter (e.g. `debug`, `elevsim_harness=trace`).
/// * Otherwise `RUST_LOG` is honoured, then `config.filter`, finally `info`.
///
/// Installing twice is a no-op so tests may call this freely.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = resolve_filter(config)?;

    let fmt_layer = match config.format {
        LogFormat::Pretty => subscriber_fmt::layer().with_target(false).boxed(),
        LogFormat::StructuredJson => subscriber_fmt::layer()
            .with_target(true)
            .json()
            .boxed(),
    };

    let _ = Registry::default().with(filter).with(fmt_layer).try_init();
    Ok(())
}

fn resolve_filter(config: &LoggingConfig) -> Result<EnvFilter, LoggingError> {
    let directive = pick_directive(
        std::env::var(LOG_ENV).ok(),
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
        config.filter.clone(),
    );

    EnvFilter::try_new(&directive).map_err(|err| LoggingError::InvalidFilter {
        directive,
        reason: err.to_string(),
    })
}

/// First non-blank directive in precedence order; blank values count as unset.
fn pick_directive(
    elevsim_log: Option<String>,
    rust_log: Option<String>,
    configured: Option<String>,
) -> String {
    [elevsim_log, rust_log, configured]
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_owned())
}

/// Structured context attached to launch events by the convenience macros.
#[derive(Debug, Default, Clone)]
pub struct LaunchContext<'a> {
    /// Platform the launch plan was selected for.
    pub platform: Option<&'a str>,
    /// Process class (server or client).
    pub class: Option<&'a str>,
    /// Node identifier, clients only.
    pub node: Option<u32>,
    /// Port the process binds or attaches to.
    pub port: Option<u16>,
}

impl<'a> LaunchContext<'a> {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a platform label.
    pub fn with_platform(mut self, platform: &'a str) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Attach a process class label.
    pub fn with_class(mut self, class: &'a str) -> Self {
        self.class = Some(class);
        self
    }

    /// Attach a node identifier.
    pub fn with_node(mut self, node: u32) -> Self {
        self.node = Some(node);
        self
    }

    /// Attach a port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }
}

/// Outcome recorded on lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchEventOutcome {
    /// The step completed.
    Success,
    /// The step was abandoned.
    Fault,
}

impl LaunchEventOutcome {
    fn as_str(&self) -> &'static str {
        match self {
            LaunchEventOutcome::Success => "success",
            LaunchEventOutcome::Fault => "fault",
        }
    }
}

/// Emit a standardized lifecycle event with a success/fault outcome.
pub fn log_launch_event(
    context: Option<&LaunchContext>,
    event: &str,
    message: &str,
    outcome: LaunchEventOutcome,
) {
    let ctx = context.cloned().unwrap_or_default();
    match outcome {
        LaunchEventOutcome::Success => tracing::event!(
            Level::INFO,
            event,
            outcome = outcome.as_str(),
            platform = ctx.platform.unwrap_or(""),
            class = ctx.class.unwrap_or(""),
            node = ctx.node,
            port = ctx.port,
            message = %message
        ),
        LaunchEventOutcome::Fault => tracing::event!(
            Level::ERROR,
            event,
            outcome = outcome.as_str(),
            platform = ctx.platform.unwrap_or(""),
            class = ctx.class.unwrap_or(""),
            node = ctx.node,
            port = ctx.port,
            message = %message
        ),
    }
}
