use anyhow::{anyhow, Result};
use credit_reminder_bot::config::Config;
use credit_reminder_bot::database::connection::{sqlite_file_path, DatabaseManager};
use credit_reminder_bot::database::models::{Credit, User};
use std::env;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    // sqlx reports its statements through the `log` facade
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("migrate");

    match command {
        "migrate" | "up" => run_migrations().await,
        "check" => check_database().await,
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {command}");
            print_help();
            std::process::exit(1);
        }
    }
}

async fn connect() -> Result<DatabaseManager> {
    dotenvy::dotenv().ok();
    let database_url = Config::database_url_from_env();
    println!("📊 Database URL: {}", mask_url(&database_url));

    DatabaseManager::new(&database_url)
        .await
        .map_err(|e| anyhow!("Failed to connect to database: {}", e))
}

async fn run_migrations() -> Result<()> {
    println!("🔧 Credit Reminder Bot - Database Migration Tool");
    println!("================================================");

    let db_manager = connect().await?;

    println!("🚀 Creating tables...");
    match db_manager.run_migrations().await {
        Ok(_) => println!("✅ Schema is up to date!"),
        Err(e) => {
            eprintln!("❌ Migration failed: {e}");
            std::process::exit(1);
        }
    }

    Ok(())
}

async fn check_database() -> Result<()> {
    println!("🔍 Checking database connection and schema...");

    let db_manager = connect().await?;

    let users = User::count(&db_manager.pool).await;
    let credits = Credit::count(&db_manager.pool).await;
    match (users, credits) {
        (Ok(users), Ok(credits)) => {
            println!("✅ Database connection successful!");
            println!("  • users:   {users}");
            println!("  • credits: {credits}");
        }
        (Err(e), _) | (_, Err(e)) => {
            println!("⚠️  Database check failed: {e}");
            println!("💡 Try running 'migrate up' to create the schema");
        }
    }

    Ok(())
}

fn mask_url(url: &str) -> String {
    // Don't print full paths
    match sqlite_file_path(url).and_then(|p| Path::new(p).file_name()) {
        Some(filename) => format!("sqlite:.../{}", filename.to_string_lossy()),
        None => url.to_string(),
    }
}

fn print_help() {
    println!("💶 Credit Reminder Bot - Database Migration Tool");
    println!();
    println!("USAGE:");
    println!("    migrate [COMMAND]");
    println!();
    println!("COMMANDS:");
    println!("    migrate, up    Create the users and credits tables (default)");
    println!("    check          Check database connection and row counts");
    println!("    help           Show this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("    DATABASE_URL   Database connection string (default: sqlite:./data/credits.db)");
    println!("    DB_NAME        Plain SQLite file path, used when DATABASE_URL is unset");
    println!();
}
