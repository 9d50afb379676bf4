use cashew_tracker::infra::config::Config;
use cashew_tracker::DatabaseService;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--create-schema]\n\
         \n\
         Requires env vars:\n\
           DATABASE_URL\n\
         or all of:\n\
           DB_USERNAME, DB_PASSWORD, DB_HOST, DB_NAME (optional DB_PORT, USE_SSL)\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let create_schema = args.iter().any(|a| a == "--create-schema");

    let config = Config::from_env()?;
    println!("> Preflight:");
    println!("  database={}", config.database.redacted());
    println!("  listen={}", config.listen_addr());
    println!("  max_connections={}", config.max_connections);

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(config.database.connect_options()?)
        .await
        .map_err(|e| anyhow::anyhow!("Database is not reachable: {}", e))?;
    let db_service = DatabaseService::from_pool(pool);
    db_service.ping().await?;
    println!("  Database reachable.");

    let missing = db_service.missing_tables().await?;
    if missing.is_empty() {
        println!("  All tables present.");
    } else if create_schema {
        println!("  Missing tables {:?} -> creating...", missing);
        db_service.ensure_schema().await?;
        let still_missing = db_service.missing_tables().await?;
        if !still_missing.is_empty() {
            return Err(anyhow::anyhow!("Tables still missing after create: {:?}", still_missing));
        }
        println!("  Schema created successfully.");
    } else {
        return Err(anyhow::anyhow!(
            "Missing tables {:?}. Re-run with --create-schema",
            missing
        ));
    }

    println!("> Preflight OK.");
    Ok(())
}
