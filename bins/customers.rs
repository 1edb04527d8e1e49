use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use configs::{AppConfig, LogFormat};
use dotenvy::dotenv;
use serde::Serialize;
use service::customer::{
    repo::seaorm::SeaOrmCustomerRepository, Customer, CustomerError, CustomerService,
};
use tracing::{error, info};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "customers", version, about = "Manage customer records")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List customers
    List {
        /// Only customers that are not soft-deleted
        #[arg(long)]
        active: bool,
    },
    /// Show one customer by id
    Get { customer_id: String },
    /// Show the first customer with exactly this name
    FindByName { name: String },
    /// Add a new customer, stamping the added time
    Add(CustomerArgs),
    /// Replace name, email, contact and address of an existing customer
    Update(CustomerArgs),
    /// Soft-delete a customer
    Delete { customer_id: String },
}

#[derive(Args, Debug)]
struct CustomerArgs {
    customer_id: String,
    name: String,
    email: String,
    contact: String,
    address: String,
}

impl From<CustomerArgs> for Customer {
    fn from(a: CustomerArgs) -> Self {
        Customer::new(a.customer_id, a.name, a.email, a.contact, a.address)
    }
}

fn init_logging(format: LogFormat) {
    match format {
        LogFormat::Compact => common::utils::logging::init_logging_default(),
        LogFormat::Json => common::utils::logging::init_logging_json(),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cfg: AppConfig, command: Command) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.auto_create_schema {
        models::db::create_tables(&db).await?;
    }
    let svc = CustomerService::new(Arc::new(SeaOrmCustomerRepository::new(db)));

    match command {
        Command::List { active: true } => print_json(&svc.find_customers_by_active().await?),
        Command::List { active: false } => print_json(&svc.get_all_customers().await?),
        Command::Get { customer_id } => print_json(&svc.get_customer_by_id(&customer_id).await?),
        Command::FindByName { name } => print_json(&svc.get_customer_by_name(&name).await?),
        Command::Add(args) => print_json(&svc.add_new_customer(args.into()).await?),
        Command::Update(args) => print_json(&svc.update_customer(args.into()).await?),
        Command::Delete { customer_id } => {
            svc.delete_customer(&customer_id).await?;
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    dotenv().ok();
    let cli = Cli::parse();

    let cfg = match AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            common::utils::logging::init_logging_default();
            error!(service = "customers", event = "config_invalid", error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };
    init_logging(cfg.logging.format);

    let run_id = Uuid::new_v4();
    std::panic::set_hook(Box::new(move |info| {
        error!(service = "customers", event = "panic", %run_id, message = %info, "unhandled panic occurred");
    }));

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "customers", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(service = "customers", event = "start", %run_id, command = ?cli.command, "customers command starting");
    match rt.block_on(run(cfg, cli.command)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<CustomerError>() {
                Some(ce @ CustomerError::NotFound(_)) => {
                    error!(service = "customers", event = "not_found", code = ce.code(), error = %ce, "customer not found");
                }
                _ => error!(service = "customers", event = "run_failed", error = %e, "command failed"),
            }
            ExitCode::FAILURE
        }
    }
}
