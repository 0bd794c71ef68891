//! Tracing subscriber setup shared by binaries built on the dialogs runtime.

/// Default filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_DIRECTIVES: &str = "error,material_dialogs=info,material_dialogs_ui=info";

/// Installs a global `tracing` subscriber once.
///
/// Honors `RUST_LOG`; falls back to `default_directives`, then to `error`.
/// Later calls are ignored.
pub fn init_tracing(default_directives: &str) {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new(default_directives) {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
