//! Test Helpers

use testresult::TestResult;

use crate::{
    domain::{
        carts::{CartsService, CartsServiceError, data::NewCartItem, records::CartRecord},
        clients::{
            ClientsService,
            data::{NewAddress, NewClientProfile},
            records::{AddressUuid, ClientProfileRecord, ClientProfileUuid},
        },
        products::{
            ProductsService,
            data::NewProduct,
            records::{ProductRecord, ProductUuid},
        },
        stores::{
            StoresService,
            data::NewStore,
            records::{StoreRecord, StoreUuid},
        },
        users::{
            UsersService,
            data::NewUser,
            records::{UserRecord, UserUuid},
        },
    },
    test::TestContext,
};

pub(crate) async fn create_user(ctx: &TestContext, email: &str) -> TestResult<UserRecord> {
    let user = ctx
        .users
        .create_user(NewUser {
            uuid: UserUuid::new(),
            name: email.split('@').next().unwrap_or(email).to_string(),
            email: email.to_string(),
        })
        .await?;

    Ok(user)
}

pub(crate) async fn create_client(
    ctx: &TestContext,
    email: &str,
) -> TestResult<ClientProfileRecord> {
    let user = create_user(ctx, email).await?;

    let client = ctx
        .clients
        .create_client_profile(NewClientProfile {
            uuid: ClientProfileUuid::new(),
            user_uuid: user.uuid,
            cpf: None,
        })
        .await?;

    Ok(client)
}

pub(crate) fn new_address() -> NewAddress {
    NewAddress {
        uuid: AddressUuid::new(),
        street: "Rua das Flores".to_string(),
        number: "42".to_string(),
        complement: None,
        city: "Florianópolis".to_string(),
        state: "SC".to_string(),
        postal_code: "88010-000".to_string(),
    }
}

pub(crate) async fn create_client_with_address(
    ctx: &TestContext,
    email: &str,
) -> TestResult<ClientProfileRecord> {
    let client = create_client(ctx, email).await?;

    ctx.clients.set_address(client.uuid, new_address()).await?;

    Ok(client)
}

/// Create a store with a fresh owner.
pub(crate) async fn create_store(ctx: &TestContext, name: &str) -> TestResult<StoreRecord> {
    let owner = create_user(ctx, &format!("{}@stores.example.com", UserUuid::new())).await?;

    let store = ctx
        .stores
        .create_store(NewStore {
            uuid: StoreUuid::new(),
            owner_user_uuid: owner.uuid,
            name: name.to_string(),
            description: None,
        })
        .await?;

    Ok(store)
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    store: StoreUuid,
    name: &str,
    price: u64,
) -> TestResult<ProductRecord> {
    let product = ctx
        .products
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            store_uuid: store,
            name: name.to_string(),
            description: Some(format!("Fresh {name}")),
            price,
        })
        .await?;

    Ok(product)
}

pub(crate) async fn add_item(
    ctx: &TestContext,
    client: ClientProfileUuid,
    product: ProductUuid,
    quantity: u32,
) -> Result<CartRecord, CartsServiceError> {
    ctx.carts
        .add_item(
            client,
            NewCartItem {
                product_uuid: product,
                quantity,
            },
        )
        .await
}
