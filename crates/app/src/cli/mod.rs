use agora_app::database::{self, DEFAULT_MAX_CONNECTIONS, Db};
use clap::{Args, Parser, Subcommand};

mod client;
mod db;
mod product;
mod store;
mod token;
mod user;

#[derive(Debug, Parser)]
#[command(name = "agora-app", about = "Agora marketplace administration", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    User(user::UserCommand),
    Client(client::ClientCommand),
    Store(store::StoreCommand),
    Product(product::ProductCommand),
    Token(token::TokenCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::User(command) => user::run(command).await,
            Commands::Client(command) => client::run(command).await,
            Commands::Store(command) => store::run(command).await,
            Commands::Product(command) => product::run(command).await,
            Commands::Token(command) => token::run(command).await,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

impl DatabaseArgs {
    pub(crate) async fn connect(&self) -> Result<Db, String> {
        database::connect_with_max_connections(&self.database_url, DEFAULT_MAX_CONNECTIONS)
            .await
            .map(Db::new)
            .map_err(|error| format!("failed to connect to database: {error}"))
    }
}
