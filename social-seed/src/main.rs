mod corpus;
mod seeder;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use social_store::password::hash_password;
use social_store::{Database, Settings, Storage};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use seeder::{seed, SeedCounts};

/// Social Database Seeder
///
/// Fills the database with synthetic users, posts and comments. Any failed
/// insert stops the run immediately.
#[derive(Parser, Debug)]
#[command(name = "social-seed")]
#[command(about = "Seed the social database with synthetic data", long_about = None)]
struct Args {
    /// Path to the SQLite database file (defaults to DB_ADDR or settings.toml)
    #[arg(short, long)]
    database: Option<String>,

    /// Number of users to create
    #[arg(long, default_value_t = SeedCounts::default().users)]
    users: usize,

    /// Number of posts to create
    #[arg(long, default_value_t = SeedCounts::default().posts)]
    posts: usize,

    /// Number of comments to create
    #[arg(long, default_value_t = SeedCounts::default().comments)]
    comments: usize,

    /// Seed for the random generator; omit for a fresh random run
    #[arg(long, env = "SEED")]
    seed: Option<u64>,

    /// Plain-text password shared by every generated user
    #[arg(long, default_value = "123123")]
    password: String,
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "social_seed=info,social_store=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut settings = Settings::new().context("Failed to load settings")?.database;
    if let Some(path) = args.database {
        settings.path = path;
    }
    tracing::info!(path = %settings.path, "Connecting to database");

    let db = Database::open(&settings).context("Failed to open database connection")?;
    db.initialize().context("Failed to initialize database schema")?;
    let storage = Storage::new(db);

    let password_hash = hash_password(&args.password).context("Failed to hash seed password")?;
    let mut rng = match args.seed {
        Some(value) => StdRng::seed_from_u64(value),
        None => StdRng::from_entropy(),
    };

    let counts = SeedCounts {
        users: args.users,
        posts: args.posts,
        comments: args.comments,
    };

    match seed(&storage, &counts, &password_hash, &mut rng) {
        Ok(report) => {
            tracing::info!(
                users = report.users,
                posts = report.posts,
                comments = report.comments,
                "Seeding successful"
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Seeding aborted: {:#}", e);
            Err(e)
        }
    }
}
