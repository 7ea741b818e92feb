use agora_app::domain::{
    clients::{ClientsService, PgClientsService, data::NewClientProfile, records::ClientProfileUuid},
    users::records::UserUuid,
};
use clap::Args;
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateClientArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// User that owns the profile
    #[arg(long)]
    user_uuid: Uuid,

    /// Optional CPF
    #[arg(long)]
    cpf: Option<String>,
}

pub(crate) async fn run(args: CreateClientArgs) -> Result<(), String> {
    let service = PgClientsService::new(args.database.connect().await?);

    let client = service
        .create_client_profile(NewClientProfile {
            uuid: ClientProfileUuid::new(),
            user_uuid: UserUuid::from_uuid(args.user_uuid),
            cpf: args.cpf,
        })
        .await
        .map_err(|error| format!("failed to create client profile: {error}"))?;

    println!("client_profile_uuid: {}", client.uuid);
    println!("user_uuid: {}", client.user_uuid);

    Ok(())
}
