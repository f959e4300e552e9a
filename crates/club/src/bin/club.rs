use anyhow::Context;
use clap::{Parser, Subcommand};
use club::{ClubError, PersonController, SportController, config::Config};
use serde::Serialize;
use serde_json::Value;
use storage::{Database, models::PersonKind};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "club")]
#[command(about = "Sports club manager: members, coaches and sports", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Members, coaches and other people
    #[command(subcommand)]
    People(PeopleCommand),

    /// Sports practiced at the club
    #[command(subcommand)]
    Sports(SportsCommand),
}

#[derive(Subcommand)]
enum PeopleCommand {
    List {
        #[arg(long = "type")]
        kind: Option<PersonKind>,
    },
    Show {
        id: String,

        #[arg(long = "type")]
        kind: Option<PersonKind>,
    },
    /// Create from a JSON record, e.g. '{"firstname":"Han","lastname":"Solo","email":"han.solo@star.com"}'
    Create {
        #[arg(long = "type")]
        kind: Option<PersonKind>,

        #[arg(long)]
        data: String,
    },
    Update {
        id: String,

        #[arg(long)]
        data: String,
    },
    Delete {
        id: String,
    },
    Search {
        firstname: String,
        lastname: String,

        #[arg(long = "type")]
        kind: Option<PersonKind>,
    },
    AddSport {
        person_id: String,
        sport_id: String,
        level: String,
    },
    RemoveSport {
        person_id: String,
        sport_id: String,
    },
}

#[derive(Subcommand)]
enum SportsCommand {
    List,
    Show {
        id: String,
    },
    /// Create from a JSON record, e.g. '{"name":"basket","description":""}'
    Create {
        #[arg(long)]
        data: String,
    },
    Update {
        id: String,

        #[arg(long)]
        data: String,
    },
    Delete {
        id: String,
    },
    Search {
        name: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("club={},storage={}", log_level, log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(error) = run(cli).await {
        let code = match error.downcast_ref::<ClubError>() {
            Some(ClubError::InvalidData(_)) => 2,
            Some(ClubError::ResourceNotFound(_)) => 3,
            Some(ClubError::Conflict(_)) => 4,
            Some(ClubError::Storage(_)) | None => {
                tracing::error!("{:?}", error);
                1
            }
        };
        eprintln!("Error: {:#}", error);
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(database_url) = cli.database_url {
        config.database_url = database_url;
    }

    tracing::debug!("Opening database at: {}", config.redacted_database_url());
    let db = Database::new(&config.database_url, config.max_connections)
        .await
        .context("Failed to open database")?;
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;

    match cli.command {
        Commands::People(command) => handle_people(PersonController::new(db), command).await,
        Commands::Sports(command) => handle_sports(SportController::new(db), command).await,
    }
}

async fn handle_people(controller: PersonController, command: PeopleCommand) -> anyhow::Result<()> {
    match command {
        PeopleCommand::List { kind } => print_json(&controller.list_people(kind).await?),
        PeopleCommand::Show { id, kind } => print_json(&controller.get_person(&id, kind).await?),
        PeopleCommand::Create { kind, data } => {
            let data = parse_record(&data)?;
            print_json(&controller.create_person(&data, kind).await?)
        }
        PeopleCommand::Update { id, data } => {
            let data = parse_record(&data)?;
            print_json(&controller.update_person(&id, &data).await?)
        }
        PeopleCommand::Delete { id } => print_json(&controller.delete_person(&id).await?),
        PeopleCommand::Search {
            firstname,
            lastname,
            kind,
        } => print_json(
            &controller
                .search_person(&firstname, &lastname, kind)
                .await?,
        ),
        PeopleCommand::AddSport {
            person_id,
            sport_id,
            level,
        } => print_json(
            &controller
                .add_sport_person(&person_id, &sport_id, &level)
                .await?,
        ),
        PeopleCommand::RemoveSport {
            person_id,
            sport_id,
        } => print_json(&controller.delete_sport_person(&person_id, &sport_id).await?),
    }
}

async fn handle_sports(controller: SportController, command: SportsCommand) -> anyhow::Result<()> {
    match command {
        SportsCommand::List => print_json(&controller.list_sports().await?),
        SportsCommand::Show { id } => print_json(&controller.get_sport(&id).await?),
        SportsCommand::Create { data } => {
            let data = parse_record(&data)?;
            print_json(&controller.create_sport(&data).await?)
        }
        SportsCommand::Update { id, data } => {
            let data = parse_record(&data)?;
            print_json(&controller.update_sport(&id, &data).await?)
        }
        SportsCommand::Delete { id } => print_json(&controller.delete_sport(&id).await?),
        SportsCommand::Search { name } => print_json(&controller.search_sport(&name).await?),
    }
}

/// Records are passed as JSON objects on the command line
fn parse_record(data: &str) -> Result<Value, ClubError> {
    match serde_json::from_str::<Value>(data)? {
        record @ Value::Object(_) => Ok(record),
        _ => Err(ClubError::InvalidData(
            "expected a JSON object, e.g. '{\"name\": \"basket\"}'".to_string(),
        )),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
