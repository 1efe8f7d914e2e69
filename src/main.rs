use api_typer::cli::CommandLineInterface;

fn main() {
    let command_line_interface = CommandLineInterface::load();

    let level = if command_line_interface.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(level.into()),
        )
        .init();

    if let Err(error) = command_line_interface.run() {
        eprintln!("Error: {error:#}");
        std::process::exit(1);
    }
}
