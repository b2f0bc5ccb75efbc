//! Shared setup for the cohort query demos

use std::path::Path;

/// Install a `tracing` subscriber honouring `RUST_LOG`.
///
/// `log` records from the library crates are bridged into the subscriber.
pub fn init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cohort_builder=debug,cohort_schema=info,cohort_core=info".into()),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}

/// Read a file under `demos/`
pub fn read_demo_file(relative: impl AsRef<Path>) -> anyhow::Result<String> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos").join(relative);
    std::fs::read_to_string(&path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))
}
