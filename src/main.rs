use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Logging goes to stderr; stdout is reserved for the progress summary.
    // Set RUST_LOG=lspgen=debug to see per-file emission events.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let command_line_interface = lspgen::cli::CommandLineInterface::load();
    command_line_interface.run()
}
