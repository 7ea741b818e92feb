use agora_app::domain::{
    products::{PgProductsService, ProductsService, data::NewProduct, records::ProductUuid},
    stores::records::StoreUuid,
};
use clap::{Args, Subcommand};
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ProductCommand {
    #[command(subcommand)]
    command: ProductSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductSubcommand {
    Create(CreateProductArgs),
}

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    #[arg(long)]
    store_uuid: Uuid,

    #[arg(long)]
    name: String,

    #[arg(long)]
    description: Option<String>,

    /// Price in cents
    #[arg(long)]
    price: u64,
}

pub(crate) async fn run(command: ProductCommand) -> Result<(), String> {
    match command.command {
        ProductSubcommand::Create(args) => create(args).await,
    }
}

async fn create(args: CreateProductArgs) -> Result<(), String> {
    let service = PgProductsService::new(args.database.connect().await?);

    let product = service
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            store_uuid: StoreUuid::from_uuid(args.store_uuid),
            name: args.name,
            description: args.description,
            price: args.price,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_uuid: {}", product.uuid);
    println!("price: {}", product.price);

    Ok(())
}
