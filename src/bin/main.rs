use std::error::Error;

use tracing_subscriber::EnvFilter;

use prodserver::{
    cli::{Cli, Commands, parse_args},
    config::load_config,
    dispatch,
    error::ProdServerError,
};

fn main() -> Result<(), Box<dyn Error>> {
    let args = parse_args();
    init_logging(&args);

    match run(args.command) {
        Ok(()) => Ok(()),
        Err(err) if err.is_configuration() => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
        // Delegation failures propagate with their native trace.
        Err(err) => Err(err.into()),
    }
}

fn run(command: Commands) -> Result<(), ProdServerError> {
    match command {
        Commands::Start { config, name, list } => {
            let config = load_config(Some(&config))?;
            if list {
                dispatch::list_servers(&config);
                return Ok(());
            }
            dispatch::dispatch(&config, name.as_deref())
        }
    }
}

fn init_logging(args: &Cli) {
    let filter = if let Some(level) = args.log_level {
        EnvFilter::new(level.as_str())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
