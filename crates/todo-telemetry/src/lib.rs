use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Configuration for the telemetry subsystem.
#[derive(Clone, Debug)]
pub struct TelemetryConfig {
    /// Default log level. Overridden by RUST_LOG env var.
    pub log_level: Level,
    /// Per-module level overrides (e.g. "todo_store" => DEBUG).
    pub module_levels: Vec<(String, Level)>,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: Level::INFO,
            module_levels: Vec::new(),
            json: false,
        }
    }
}

impl TelemetryConfig {
    /// Filter directives built from the config, e.g. `info,todo_store=debug`.
    pub fn directives(&self) -> String {
        let mut filter = self.log_level.to_string().to_lowercase();
        for (module, level) in &self.module_levels {
            filter.push_str(&format!(",{}={}", module, level.to_string().to_lowercase()));
        }
        filter
    }
}

/// Returned by [`init_telemetry`].
#[derive(Debug)]
pub struct TelemetryGuard {
    installed: bool,
    directives: String,
}

impl TelemetryGuard {
    /// `false` when another global subscriber was already set.
    pub fn installed(&self) -> bool {
        self.installed
    }

    /// Directives used when `RUST_LOG` is unset.
    pub fn directives(&self) -> &str {
        &self.directives
    }
}

/// Install the global subscriber. Safe to call more than once; only the
/// first call takes effect.
pub fn init_telemetry(config: &TelemetryConfig) -> TelemetryGuard {
    let directives = config.directives();
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directives));

    let (json_layer, text_layer) = if config.json {
        let layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_span_list(true);
        (Some(layer), None)
    } else {
        let layer = tracing_subscriber::fmt::layer().with_target(true);
        (None, Some(layer))
    };

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(filter = %directives, json = config.json, "telemetry initialized");
    }

    TelemetryGuard {
        installed,
        directives,
    }
}
