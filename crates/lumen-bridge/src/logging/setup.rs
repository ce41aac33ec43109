use std::io::Write;
use std::sync::Once;

use env_logger::fmt::TimestampPrecision;

/// Filter applied when neither the config nor `RUST_LOG` names one.
///
/// GPU backends are chatty at `info`.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "lumen_bridge=trace,wgpu=warn") and takes precedence over `RUST_LOG`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    /// Prefix records with the emitting thread's name. The bridge logs from
    /// the UI thread, `lumen-frame-clock` and `lumen-render`.
    pub thread_names: bool,
    pub timestamps: Option<TimestampPrecision>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            thread_names: true,
            timestamps: Some(TimestampPrecision::Millis),
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.env_filter.or_else(|| std::env::var("RUST_LOG").ok()) {
            Some(filter) => builder.parse_filters(&filter),
            None => builder.parse_filters(DEFAULT_FILTER),
        };

        builder.write_style(config.write_style);
        builder.format_timestamp(config.timestamps);

        if config.thread_names {
            let timestamps = config.timestamps.is_some();
            builder.format(move |buf, record| {
                let thread = std::thread::current();
                let name = thread.name().unwrap_or("?");
                let level = buf.default_level_style(record.level());
                if timestamps {
                    write!(buf, "[{} ", buf.timestamp_millis())?;
                } else {
                    write!(buf, "[")?;
                }
                writeln!(
                    buf,
                    "{level}{:<5}{level:#} {name} {}] {}",
                    record.level(),
                    record.target(),
                    record.args()
                )
            });
        }

        if builder.try_init().is_err() {
            // Another logger got there first; keep it.
            return;
        }

        log::debug!("logging initialized");
    });
}
