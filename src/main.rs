//! Employee Gateway - command line front end for the upstream employee service.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use employee_gateway as app;
use serde::Serialize;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use app::config::{AppConfig, ConfigLoadResult, LoggingConfig};
use app::models::CreateEmployeeRequest;
use app::{EmployeeGateway, GatewayError};

/// Simplified employee management over the upstream employee service.
#[derive(Parser)]
#[command(name = "employee-gateway")]
struct Cli {
    /// Config file path (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all employees
    List,
    /// Show one employee
    Get { id: String },
    /// Find employees whose name contains the given text
    Search { term: String },
    /// Print the highest salary
    HighestSalary,
    /// Print the names of the ten best paid employees
    TopTen,
    /// Create an employee
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        salary: i32,
        #[arg(long)]
        age: i32,
        #[arg(long)]
        title: String,
    },
    /// Delete an employee and print its name
    Delete { id: String },
    /// Write a config file with default values
    InitConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::default_path);

    if matches!(cli.command, Command::InitConfig) {
        return match AppConfig::default().save(&config_path) {
            Ok(()) => {
                println!("Config written to {}", config_path.display());
                ExitCode::SUCCESS
            }
            Err(e) => report(&anyhow::Error::new(e)),
        };
    }

    let config = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => config,
        ConfigLoadResult::Missing => AppConfig::default(),
        ConfigLoadResult::Invalid(e) => {
            return report(&anyhow::Error::new(e).context(format!("Invalid config {}", config_path.display())));
        }
    };

    let _guard = init_logging(&config.logging);
    tracing::info!("Config path: {:?}", config_path);
    tracing::info!("Upstream: {}", config.upstream.base_url);

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => return report(&anyhow::Error::new(e).context("Failed to create tokio runtime")),
    };

    match runtime.block_on(run(cli.command, &config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}

/// Initialize console logging, plus a daily log file when configured.
fn init_logging(logging: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let (file_layer, guard) = match logging.directory() {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "employee-gateway.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    guard
}

async fn run(command: Command, config: &AppConfig) -> anyhow::Result<()> {
    let gateway = EmployeeGateway::new(&config.upstream, config.retry.policy())?;

    match command {
        Command::List => print_json(&gateway.fetch_all().await?),
        Command::Get { id } => print_json(&gateway.fetch_by_id(&id).await?),
        Command::Search { term } => print_json(&gateway.search(&term).await?),
        Command::HighestSalary => print_json(&gateway.highest_salary().await?),
        Command::TopTen => print_json(&gateway.top_ten_names().await?),
        Command::Create {
            name,
            salary,
            age,
            title,
        } => {
            let request = CreateEmployeeRequest {
                name,
                salary,
                age,
                title,
            };
            request.validate().context("Invalid employee")?;
            print_json(&gateway.create(&request).await?)
        }
        Command::Delete { id } => print_json(&gateway.delete_by_id(&id).await?),
        Command::InitConfig => Ok(()),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print the error as `{"message": ...}` and pick the exit code.
///
/// Absence exits with 2, everything else with 1.
fn report(err: &anyhow::Error) -> ExitCode {
    let body = serde_json::json!({ "message": format!("{err:#}") });
    eprintln!("{body}");

    let not_found = err
        .downcast_ref::<GatewayError>()
        .is_some_and(GatewayError::is_not_found);
    if not_found { ExitCode::from(2) } else { ExitCode::FAILURE }
}
