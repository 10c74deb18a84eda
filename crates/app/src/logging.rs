/// Sends `tracing` output to `path`, filtered by `RUST_LOG` (default `info`).
///
/// # Errors
///
/// Fails if the log file cannot be opened for appending.
pub fn init(path: &std::path::Path) -> anyhow::Result<()> {
    use anyhow::Context;

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file '{}'", path.display()))?;
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
        .context("invalid log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .init();

    Ok(())
}
