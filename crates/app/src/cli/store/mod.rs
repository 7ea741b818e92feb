use agora_app::domain::{
    stores::{PgStoresService, StoresService, data::NewStore, records::StoreUuid},
    users::records::UserUuid,
};
use clap::{Args, Subcommand};
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct StoreCommand {
    #[command(subcommand)]
    command: StoreSubcommand,
}

#[derive(Debug, Subcommand)]
enum StoreSubcommand {
    Create(CreateStoreArgs),
}

#[derive(Debug, Args)]
pub(crate) struct CreateStoreArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// User that owns the store
    #[arg(long)]
    owner_user_uuid: Uuid,

    #[arg(long)]
    name: String,

    #[arg(long)]
    description: Option<String>,
}

pub(crate) async fn run(command: StoreCommand) -> Result<(), String> {
    match command.command {
        StoreSubcommand::Create(args) => create(args).await,
    }
}

async fn create(args: CreateStoreArgs) -> Result<(), String> {
    let service = PgStoresService::new(args.database.connect().await?);

    let store = service
        .create_store(NewStore {
            uuid: StoreUuid::new(),
            owner_user_uuid: UserUuid::from_uuid(args.owner_user_uuid),
            name: args.name,
            description: args.description,
        })
        .await
        .map_err(|error| format!("failed to create store: {error}"))?;

    println!("store_uuid: {}", store.uuid);
    println!("store_name: {}", store.name);

    Ok(())
}
