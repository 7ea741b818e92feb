use agora_app::auth::PgAuthService;
use clap::{Args, Subcommand};

use crate::cli::DatabaseArgs;

mod create;
mod list;
mod revoke;

#[derive(Debug, Args)]
pub(crate) struct TokenCommand {
    #[command(subcommand)]
    command: TokenSubcommand,
}

#[derive(Debug, Subcommand)]
enum TokenSubcommand {
    Create(create::CreateTokenArgs),
    List(list::ListTokensArgs),
    Revoke(revoke::RevokeTokenArgs),
}

pub(crate) async fn run(command: TokenCommand) -> Result<(), String> {
    match command.command {
        TokenSubcommand::Create(args) => create::run(args).await,
        TokenSubcommand::List(args) => list::run(args).await,
        TokenSubcommand::Revoke(args) => revoke::run(args).await,
    }
}

#[derive(Debug, Args)]
pub(crate) struct AuthArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Server-side pepper mixed into every token hash
    #[arg(long, env = "AUTH_TOKEN_PEPPER", hide_env_values = true)]
    token_pepper: String,
}

impl AuthArgs {
    pub(crate) async fn service(self) -> Result<PgAuthService, String> {
        if self.token_pepper.trim().is_empty() {
            return Err("token pepper cannot be empty".to_string());
        }

        Ok(PgAuthService::new(
            self.database.connect().await?,
            self.token_pepper,
        ))
    }
}
