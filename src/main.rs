use clap::{Parser, Subcommand};
use rental_scout::aggregator::service::DEFAULT_CITY;
use rental_scout::{server, Config, GarentaClient, RentalService};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rental-scout", version, about = "City-wide rental car availability search")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the JSON API
    Serve {
        /// Address to listen on (overrides BIND_ADDR)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Search every branch of a city once and print the offers
    Search {
        #[arg(long, default_value = DEFAULT_CITY)]
        city: String,
        /// Pickup time, e.g. 2025-06-01T10:00
        #[arg(long)]
        pickup: String,
        /// Dropoff time, e.g. 2025-06-04T10:00
        #[arg(long)]
        dropoff: String,
        /// Print the raw JSON outcome instead of a listing
        #[arg(long)]
        json: bool,
    },
    /// List the cities that have branches
    Cities {
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    let client = GarentaClient::with_config(&config.upstream)?;
    let service = RentalService::new(Arc::new(client), config.search.clone());

    match cli.command {
        Commands::Serve { bind } => {
            let bind_addr = bind.unwrap_or(config.bind_addr);
            server::serve(service, &bind_addr).await?;
        }
        Commands::Search {
            city,
            pickup,
            dropoff,
            json,
        } => {
            let outcome = service.get_available_vehicles(&city, &pickup, &dropoff).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
                return Ok(());
            }

            info!(
                "✅ Found {} vehicles across {}/{} branches\n",
                outcome.vehicles.len(),
                outcome.branches_searched,
                outcome.branches_total
            );

            for (i, vehicle) in outcome.vehicles.iter().enumerate() {
                println!("{}. {} ({})", i + 1, vehicle.brand_model, vehicle.price_pay_now_str);
                println!("   {} · {} · {}", vehicle.segment_name, vehicle.fuel, vehicle.gear);
                println!("   Pay at office: {}", vehicle.price_pay_office_str);
                println!("   Daily: {}", vehicle.daily_price_str);
                println!("   Branch: {}", vehicle.branch_name);
                println!();
            }
        }
        Commands::Cities { json } => {
            let cities = service.list_cities().await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&cities)?);
            } else {
                for city in &cities {
                    println!("{:<16} {}", city.slug, city.name);
                }
            }
        }
    }

    Ok(())
}
