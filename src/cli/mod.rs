use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

use crate::config::{DEFAULT_DATABASE_URL, Settings};
use commands::{create_user, init_database, migrate_and_serve, serve};

#[derive(Parser)]
#[command(name = "schooldash")]
#[command(about = "Academic comparison dashboard with CLI tools and web server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Flags overriding the layered settings for the server commands
#[derive(Args, Debug)]
pub struct ServerArgs {
    /// Database URL of the user store
    ///
    /// Examples:
    ///   SQLite: sqlite://users.db?mode=rwc
    ///   SQLite: sqlite:///absolute/path/to/users.db
    #[arg(short, long)]
    pub database_url: Option<String>,

    /// Bind address for the web server
    ///
    /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
    #[arg(short, long)]
    pub bind_address: Option<String>,

    /// Directory holding academic_data_k8.csv
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

impl ServerArgs {
    fn settings(self) -> Result<Settings> {
        Ok(Settings::load()?.with_overrides(self.database_url, self.bind_address, self.data_dir))
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve(ServerArgs),
    /// Initialize the user database using migrations
    InitDb {
        /// Database URL
        ///
        /// For SQLite databases the file is created when `?mode=rwc` is given.
        #[arg(short, long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
        database_url: String,
    },
    /// Apply pending migrations, then start the web server
    MigrateAndServe(ServerArgs),
    /// Add a dashboard user with a hashed password
    CreateUser {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,

        /// Database URL
        #[arg(short, long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
        database_url: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve(args) => {
                serve(&args.settings()?).await?;
            }
            Commands::InitDb { database_url } => {
                init_database(&database_url).await?;
            }
            Commands::MigrateAndServe(args) => {
                migrate_and_serve(&args.settings()?).await?;
            }
            Commands::CreateUser {
                username,
                password,
                database_url,
            } => {
                create_user(&database_url, &username, &password).await?;
            }
        }
        Ok(())
    }
}
