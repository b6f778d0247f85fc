use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Environment variable holding a `tracing` filter directive, for example
/// `COMPDOC_LOG=compdoc_core=trace`.
pub const LOG_ENV_VAR: &str = "COMPDOC_LOG";

/// Install the stderr subscriber. `verbose` raises the default level from
/// `warn` to `debug`; an explicit `COMPDOC_LOG` always wins.
pub fn init(verbose: bool, use_color: bool) {
	let level = if verbose {
		LevelFilter::DEBUG
	} else {
		LevelFilter::WARN
	};

	let filter = EnvFilter::builder()
		.with_env_var(LOG_ENV_VAR)
		.with_default_directive(level.into())
		.from_env_lossy();

	let layer = fmt::layer()
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.with_filter(filter);

	// A subscriber may already be installed when embedded.
	tracing_subscriber::registry().with(layer).try_init().ok();
}
