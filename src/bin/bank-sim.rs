use bank_sim::config::{self, Command, FormatArg};
use bank_sim::engine;
use bank_sim::error::Result;
use bank_sim::output::{self, Formatter, HumanFormatter, JsonFormatter, SummaryFormatter};
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = config::parse_args()?;
    match cli.command {
        Some(Command::Run(args)) => run_simulation(args),
        Some(Command::ShowConfig(args)) => {
            let (config, _) = config::build_config(args)?;
            print!("{}", output::format_config(&config));
            Ok(())
        }
        None => run_simulation(cli.run),
    }
}

fn run_simulation(args: config::RunArgs) -> Result<()> {
    let (config, format) = config::build_config(args)?;
    let store_snapshots = format != FormatArg::Summary;
    let result = engine::run_simulation_with_options(&config, store_snapshots)?;

    let formatter = formatter_for(&format);
    let output = formatter.write(&result)?;
    print!("{}", output);

    Ok(())
}

fn formatter_for(format: &FormatArg) -> Box<dyn Formatter> {
    match format {
        FormatArg::Human => Box::new(HumanFormatter),
        FormatArg::Summary => Box::new(SummaryFormatter),
        FormatArg::Json => Box::new(JsonFormatter),
    }
}
