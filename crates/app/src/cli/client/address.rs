use agora_app::domain::clients::{
    ClientsService, PgClientsService,
    data::NewAddress,
    records::{AddressUuid, ClientProfileUuid},
};
use clap::Args;
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct SetAddressArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    #[arg(long)]
    client_profile_uuid: Uuid,

    #[arg(long)]
    street: String,

    #[arg(long)]
    number: String,

    #[arg(long)]
    complement: Option<String>,

    #[arg(long)]
    city: String,

    #[arg(long)]
    state: String,

    #[arg(long)]
    postal_code: String,
}

pub(crate) async fn run(args: SetAddressArgs) -> Result<(), String> {
    let service = PgClientsService::new(args.database.connect().await?);

    let address = service
        .set_address(
            ClientProfileUuid::from_uuid(args.client_profile_uuid),
            NewAddress {
                uuid: AddressUuid::new(),
                street: args.street,
                number: args.number,
                complement: args.complement,
                city: args.city,
                state: args.state,
                postal_code: args.postal_code,
            },
        )
        .await
        .map_err(|error| format!("failed to set address: {error}"))?;

    println!("address_uuid: {}", address.uuid);

    Ok(())
}
