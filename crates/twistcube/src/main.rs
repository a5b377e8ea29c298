//! Command-line front end for the twistcube puzzle engine.

mod cli;

fn main() -> eyre::Result<()> {
    use clap::Parser;

    // Initialize logging. Use `RUST_LOG` to control verbosity.
    env_logger::builder().init();
    color_eyre::install()?;

    let args = cli::Args::parse();
    cli::exec(args)
}
