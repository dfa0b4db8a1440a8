use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use companies_core::models::{KNOWN_ROLES, NewUser};
use companies_core::{JwtAuth, JwtConfig, JwtSettings, password};
use companies_db::{Database, DatabaseConfig};
use companies_server::dto::CompanyDto;

#[derive(Parser)]
#[command(name = "companies", version, about = "CompanyEmployees API administration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,

    /// Register a user that can log in through the API
    CreateUser {
        #[arg(short, long)]
        user_name: String,

        /// Password (reads from COMPANIES_USER_PASSWORD if not provided)
        #[arg(short, long, env = "COMPANIES_USER_PASSWORD", hide_env_values = true)]
        password: String,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        /// Role to grant; repeat for several roles
        #[arg(short, long = "role")]
        roles: Vec<String>,
    },

    /// Mint a bearer token for local testing
    Token {
        #[arg(short, long)]
        user_name: String,

        #[arg(short, long = "role")]
        roles: Vec<String>,

        /// JSON settings file with a JwtSettings section
        #[arg(long, env = "APPSETTINGS_PATH", default_value = "appsettings.json")]
        settings: PathBuf,
    },

    /// Print all companies
    Companies {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("companies=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate => {
            connect_db().await?;
            tracing::info!("Migrations applied");
        }
        Commands::CreateUser {
            user_name,
            password,
            first_name,
            last_name,
            email,
            roles,
        } => {
            let db = connect_db().await?;
            cmd_create_user(&db, user_name, &password, first_name, last_name, email, roles)
                .await?;
        }
        Commands::Token {
            user_name,
            roles,
            settings,
        } => cmd_token(&user_name, &roles, &settings)?,
        Commands::Companies { format } => {
            let db = connect_db().await?;
            cmd_companies(&db, format).await?;
        }
    }

    Ok(())
}

/// Connect to PostgreSQL using DATABASE_URL and bring the schema up to date.
async fn connect_db() -> Result<Database> {
    let config = DatabaseConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;
    let db = Database::connect(&config)
        .await
        .context("Failed to connect to database")?;
    db.migrate().await.map_err(|e| anyhow::anyhow!(e))?;
    Ok(db)
}

async fn cmd_create_user(
    db: &Database,
    user_name: String,
    password: &str,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    roles: Vec<String>,
) -> Result<()> {
    if let Some(role) = roles.iter().find(|r| !KNOWN_ROLES.contains(&r.as_str())) {
        anyhow::bail!("Unknown role '{role}' (known: {})", KNOWN_ROLES.join(", "));
    }

    let password_hash = password::hash(password).map_err(|e| anyhow::anyhow!(e))?;
    let user = db
        .users()
        .create(&NewUser {
            first_name,
            last_name,
            user_name,
            email,
            phone_number: None,
            password_hash,
            roles,
        })
        .await
        .map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(user = %user.user_name, roles = ?user.roles, "User created");
    Ok(())
}

fn cmd_token(user_name: &str, roles: &[String], settings: &Path) -> Result<()> {
    let settings = JwtSettings::from_file(settings).map_err(|e| anyhow::anyhow!(e))?;
    let config = JwtConfig::from_env(settings).map_err(|e| anyhow::anyhow!(e))?;
    let auth = JwtAuth::new(&config);

    let token = auth
        .issue(user_name, roles)
        .map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!(
        user = user_name,
        expires_in = auth.lifetime_secs(),
        "Token issued"
    );
    println!("{token}");
    Ok(())
}

async fn cmd_companies(db: &Database, format: OutputFormat) -> Result<()> {
    let companies = db
        .companies()
        .get_all()
        .await
        .map_err(|e| anyhow::anyhow!(e))?;
    let dtos: Vec<CompanyDto> = companies.iter().map(Into::into).collect();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&dtos)?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            for dto in &dtos {
                writer.serialize(dto)?;
            }
            writer.flush()?;
        }
    }

    tracing::info!(count = dtos.len(), "Companies listed");
    Ok(())
}
