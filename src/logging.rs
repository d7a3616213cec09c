//! Logging initialization

/// Install `env_logger` with a default filter of `info`.
///
/// Override with the `RUST_LOG` environment variable. Calling this more than
/// once is harmless; later calls are ignored.
pub fn init() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
