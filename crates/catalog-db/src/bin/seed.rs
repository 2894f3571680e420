//! # Seed Data Generator
//!
//! Populates the catalog with demo products for development.
//!
//! ## Usage
//! ```bash
//! # Generate 200 products (default) into CATALOG_DB_PATH or ./catalog.db
//! cargo run -p catalog-db --bin seed
//!
//! # Generate custom amount into a specific file
//! cargo run -p catalog-db --bin seed -- --count 1000 --db ./data/catalog.db
//! ```
//!
//! Every payload goes through `catalog_core::validation` before
//! `create_product`, the same way an HTTP handler would call the repository.

use std::env;
use std::time::Instant;

use catalog_core::validation::validate_create_payload;
use catalog_core::CreateProductPayload;
use catalog_db::{Database, DbConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Base items for demo data: (name, base price, image stem)
const ITEMS: &[(&str, f64, &str)] = &[
    ("Mug", 9.99, "mug"),
    ("Travel Mug", 14.5, "travel-mug"),
    ("Teapot", 24.0, "teapot"),
    ("Espresso Cup", 6.25, "espresso-cup"),
    ("Cereal Bowl", 7.75, "cereal-bowl"),
    ("Dinner Plate", 11.0, "dinner-plate"),
    ("Water Glass", 4.99, "water-glass"),
    ("Wine Glass", 8.49, "wine-glass"),
    ("Carafe", 19.99, "carafe"),
    ("Butter Dish", 12.3, "butter-dish"),
];

/// Colour variants appended to each item name
const COLOURS: &[&str] = &["White", "Black", "Sage", "Terracotta", "Navy"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut count: usize = 200;
    let mut config = DbConfig::from_env()?;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(200);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    config.database_path = args[i + 1].clone().into();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Catalog Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 200)");
                println!("  -d, --db <PATH>    Database file path (default: $CATALOG_DB_PATH or ./catalog.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    info!(path = %config.database_path.display(), count, "Seeding catalog");

    let db = Database::new(config).await?;
    let repo = db.products();

    let existing = repo.count().await?;
    if existing > 0 {
        warn!(existing, "Catalog already has products, skipping seed");
        println!("Database already has {} products. Delete the file to regenerate.", existing);
        return Ok(());
    }

    let start = Instant::now();
    let mut created = Vec::with_capacity(count);

    for seed in 0..count {
        let payload = generate_payload(seed);

        if let Err(e) = validate_create_payload(&payload) {
            warn!(name = %payload.name, error = %e, "Skipping invalid payload");
            continue;
        }

        match repo.create_product(&payload).await {
            Ok(id) => created.push(id),
            Err(e) => {
                eprintln!("Failed to insert {}: {}", payload.name, e);
                continue;
            }
        }

        if created.len() % 50 == 0 {
            info!(created = created.len(), "Seeding in progress");
        }
    }

    let elapsed = start.elapsed();
    println!("Generated {} products in {:?}", created.len(), elapsed);

    // Read back a sample through the multi-id lookup
    let sample: Vec<i64> = created.iter().copied().step_by(10).collect();
    let found = repo.get_products_by_id(&sample).await?;
    println!("Verified {} of {} sampled products", found.len(), sample.len());

    db.close().await;
    Ok(())
}

/// Builds one deterministic demo payload.
fn generate_payload(seed: usize) -> CreateProductPayload {
    let (name, base_price, image) = ITEMS[seed % ITEMS.len()];
    let colour = COLOURS[(seed / ITEMS.len()) % COLOURS.len()];
    let batch = seed / (ITEMS.len() * COLOURS.len());

    // Colour variants cost a little more, in 50 cent steps
    let price = base_price + 0.5 * ((seed / ITEMS.len()) % COLOURS.len()) as f64;

    let full_name = if batch == 0 {
        format!("{} ({})", name, colour)
    } else {
        format!("{} ({}) #{}", name, colour, batch + 1)
    };

    CreateProductPayload {
        name: full_name,
        price,
        image: format!("images/{}-{}.png", image, colour.to_lowercase()),
        description: format!("{} {} from the demo catalog", colour, name.to_lowercase()),
        quantity: ((seed * 7) % 101) as i64,
    }
}

/// Initializes the tracing subscriber.
///
/// Honors `RUST_LOG`, defaulting to `info,catalog=debug,sqlx=warn`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,catalog=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
