//! # Seed
//!
//! Creates (or migrates) a database file and writes the default catalog.
//!
//! ## Usage
//! ```bash
//! cargo run -p bazaar-db --bin seed
//! cargo run -p bazaar-db --bin seed -- --db ./data/bazaar.db
//! ```

use std::env;

use bazaar_db::{seed_default_catalog, Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./bazaar.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Bazaar catalog seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./bazaar.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Database: {}", db_path);

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected, migrations applied");

    let inserted = seed_default_catalog(&db).await?;
    if inserted == 0 {
        let existing = db.products().count().await?;
        println!("⚠ Database already has {} products, nothing to do", existing);
    } else {
        println!("✓ Inserted {} products", inserted);
    }

    for product in db.products().list_all().await? {
        println!(
            "  {:>2}  {:<20} {:>10}  stock {}",
            product.id.0,
            product.name,
            product.price.to_string(),
            product.stock
        );
    }

    db.close().await;
    Ok(())
}
