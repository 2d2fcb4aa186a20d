use clap::{Parser, ValueEnum};
use league::{connect_db, DbOwner, DbProfile};
use migration::MigrationCommand;
use tracing::{error, info};

#[derive(Clone, Copy, ValueEnum)]
enum Command {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

impl From<Command> for MigrationCommand {
    fn from(c: Command) -> Self {
        match c {
            Command::Up => MigrationCommand::Up,
            Command::Down => MigrationCommand::Down,
            Command::Fresh => MigrationCommand::Fresh,
            Command::Reset => MigrationCommand::Reset,
            Command::Refresh => MigrationCommand::Refresh,
            Command::Status => MigrationCommand::Status,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Env {
    Prod,
    Test,
}

#[derive(Clone, Copy, ValueEnum)]
enum Db {
    Postgres,
    SqliteFile,
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "League database migration tool")]
struct Args {
    /// Migration command to run
    #[arg(value_enum)]
    command: Command,

    /// Runtime environment (selects PROD_DB or TEST_DB for postgres)
    #[arg(short, long, value_enum, default_value = "test")]
    env: Env,

    /// Database type; in-memory SQLite is not offered because it would not outlive the command
    #[arg(short, long, value_enum, default_value = "postgres")]
    db: Db,

    /// SQLite file (defaults to LEAGUE_SQLITE_FILE, then league.sqlite)
    #[arg(long)]
    file: Option<String>,

    /// Emit the service's JSON log lines instead of plain text
    #[arg(long)]
    json_logs: bool,
}

fn profile(args: &Args) -> DbProfile {
    match (args.db, args.env) {
        (Db::SqliteFile, _) => DbProfile::SqliteFile {
            file: args.file.clone(),
        },
        (Db::Postgres, Env::Prod) => DbProfile::Prod,
        (Db::Postgres, Env::Test) => DbProfile::Test,
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if args.json_logs {
        league::telemetry::init_tracing();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stdout)
            .without_time()
            .with_target(false)
            .with_env_filter(league::telemetry::league_filter())
            .init();
    }

    let profile = profile(&args);

    let conn = match connect_db(profile, DbOwner::Owner).await {
        Ok(conn) => conn,
        Err(e) => {
            error!(error = %e, "Could not connect");
            std::process::exit(1);
        }
    };

    if let Err(e) = migration::migrate(&conn, args.command.into()).await {
        error!(error = %e, "Migration failed");
        std::process::exit(1);
    }
    info!("Migration finished");
}
