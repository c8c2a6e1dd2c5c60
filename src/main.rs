//! Command-line front end: runs a member search or prints team statistics.

use std::env;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use config::Config;
use dotenvy::dotenv;

use member_search::db::establish_connection_pool;
use member_search::domain::search::SortOrder;
use member_search::forms::search::SearchForm;
use member_search::models::config::AppConfig;
use member_search::repository::DieselRepository;
use member_search::services::search::{load_team_stats, search_members_page};

#[derive(Debug, Parser)]
#[command(name = "member-search", about = "Search members and their teams")]
struct Cli {
    /// Database URL; overrides the configured one.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search members with optional filters and print one page as JSON.
    Search {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        team_name: Option<String>,
        /// Minimum age, inclusive.
        #[arg(long)]
        age_goe: Option<i32>,
        /// Maximum age, inclusive.
        #[arg(long)]
        age_loe: Option<i32>,
        /// Zero-based page index.
        #[arg(long, default_value_t = 0)]
        page: i64,
        #[arg(long)]
        size: Option<i64>,
        /// Sort key, repeatable: `id`, `username`, `age` or `team_name`,
        /// optionally suffixed with `:asc` or `:desc`.
        #[arg(long = "sort")]
        sort: Vec<SortOrder>,
    },
    /// Print per-team age statistics as JSON.
    Teams,
}

fn load_config() -> Result<AppConfig, config::ConfigError> {
    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    Config::builder()
        // Add `./config/default.yaml`
        .add_source(config::File::with_name("config/default"))
        // Add environment-specific overrides
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        // Add settings from the environment (with a prefix of APP)
        .add_source(config::Environment::with_prefix("APP"))
        .build()?
        .try_deserialize::<AppConfig>()
}

fn main() -> ExitCode {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();

    let app_config = match load_config() {
        Ok(app_config) => app_config,
        Err(err) => {
            log::error!("Error loading config: {err}");
            return ExitCode::FAILURE;
        }
    };

    let database_url = cli
        .database_url
        .unwrap_or_else(|| app_config.database_url.clone());

    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(err) => {
            log::error!("Failed to establish database connection: {err}");
            return ExitCode::FAILURE;
        }
    };
    let repo = DieselRepository::new(pool);

    let output = match cli.command {
        Command::Search {
            username,
            team_name,
            age_goe,
            age_loe,
            page,
            size,
            sort,
        } => {
            let form = SearchForm {
                username,
                team_name,
                age_goe,
                age_loe,
                page,
                size: size.unwrap_or(app_config.default_page_size as i64),
                sort,
            };
            search_members_page(&repo, form).map(|page| {
                serde_json::json!({
                    "content": page.content,
                    "page": page.index,
                    "size": page.size,
                    "total_elements": page.total_elements,
                    "total_pages": page.total_pages(),
                    "has_next": page.has_next(),
                    "links": page.page_links(),
                })
            })
        }
        Command::Teams => load_team_stats(&repo).map(|stats| {
            let rows: Vec<_> = stats
                .iter()
                .map(|team| {
                    serde_json::json!({
                        "team_name": team.team_name,
                        "member_count": team.member_count,
                        "min_age": team.min_age,
                        "max_age": team.max_age,
                        "average_age": team.average_age(),
                    })
                })
                .collect();
            serde_json::Value::from(rows)
        }),
    };

    match output {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(rendered) => {
                println!("{rendered}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                log::error!("Failed to render output: {err}");
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
