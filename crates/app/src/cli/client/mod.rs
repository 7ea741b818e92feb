use clap::{Args, Subcommand};

mod address;
mod create;

#[derive(Debug, Args)]
pub(crate) struct ClientCommand {
    #[command(subcommand)]
    command: ClientSubcommand,
}

#[derive(Debug, Subcommand)]
enum ClientSubcommand {
    /// Give a user a client profile
    Create(create::CreateClientArgs),

    /// Record the delivery address of a client profile
    SetAddress(address::SetAddressArgs),
}

pub(crate) async fn run(command: ClientCommand) -> Result<(), String> {
    match command.command {
        ClientSubcommand::Create(args) => create::run(args).await,
        ClientSubcommand::SetAddress(args) => address::run(args).await,
    }
}
