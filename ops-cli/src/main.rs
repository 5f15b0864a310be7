use billing_service::{BillingError, BillingService};
use clap::Parser;
use error_common::{log_error, ConsoleError};
use logger_redacted::init_logging;
use ops_cli::{run, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    // Logging settings come from the configuration, so loading happens
    // before any subscriber exists.
    let config = cli.load_config()?;
    init_logging(&config.logging)?;

    let settings = cli.settings(&config);
    tracing::info!(
        command = cli.command.name(),
        config_file = ?cli.config,
        parse_policy = ?settings.policy,
        currency = %config.billing.currency_symbol,
        decimals = config.billing.decimals,
        "bedcare starting"
    );

    let service = BillingService::new(settings);
    match run(&cli, &service).await {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(err) => match err.downcast::<BillingError>() {
            Ok(billing) => {
                let console = ConsoleError::from(billing);
                log_error("bedcare", &console);
                eprintln!("error[{}]: {console}", console.code());
                std::process::exit(2);
            }
            Err(other) => Err(other),
        },
    }
}
