//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use agora_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            records::{CartItemRecord, CartItemUuid, CartRecord, CartUuid},
        },
        clients::{
            ClientsServiceError, MockClientsService,
            records::{AddressUuid, ClientProfileRecord, ClientProfileUuid},
        },
        orders::{
            MockOrdersService, OrderStatus,
            records::{
                OrderClient, OrderDeliveryAddress, OrderItemRecord, OrderItemUuid, OrderRecord,
                OrderStore, OrderUuid,
            },
        },
        products::{MockProductsService, records::ProductUuid},
        stores::{
            MockStoresService,
            records::{StoreRecord, StoreUuid},
        },
        users::{MockUsersService, records::UserUuid},
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());
pub(crate) const TEST_CLIENT_UUID: ClientProfileUuid =
    ClientProfileUuid::from_uuid(Uuid::from_u128(1));
pub(crate) const TEST_STORE_UUID: StoreUuid = StoreUuid::from_uuid(Uuid::from_u128(2));

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_uuid(TEST_USER_UUID);
    ctrl.call_next(req, depot, res).await;
}

fn strict_users_mock() -> MockUsersService {
    let mut users = MockUsersService::new();

    users.expect_create_user().never();
    users.expect_get_user().never();

    users
}

fn strict_clients_mock() -> MockClientsService {
    let mut clients = MockClientsService::new();

    clients.expect_create_client_profile().never();
    clients.expect_get_client_profile_for_user().never();
    clients.expect_set_address().never();
    clients.expect_get_address().never();

    clients
}

fn strict_stores_mock() -> MockStoresService {
    let mut stores = MockStoresService::new();

    stores.expect_create_store().never();
    stores.expect_get_store().never();
    stores.expect_get_store_for_owner().never();

    stores
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_create_product().never();
    products.expect_get_product().never();
    products.expect_list_store_products().never();

    products
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_get_cart().never();
    carts.expect_add_item().never();
    carts.expect_update_item().never();
    carts.expect_remove_item().never();
    carts.expect_clear_cart().never();

    carts
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_create_order().never();
    orders.expect_get_order().never();
    orders.expect_list_client_orders().never();
    orders.expect_list_store_orders().never();
    orders.expect_update_status().never();
    orders.expect_cancel_order().never();
    orders.expect_delete_order().never();

    orders
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

/// Every service is a mock that fails the test when called.
pub(crate) fn strict_context() -> AppContext {
    AppContext {
        users: Arc::new(strict_users_mock()),
        clients: Arc::new(strict_clients_mock()),
        stores: Arc::new(strict_stores_mock()),
        products: Arc::new(strict_products_mock()),
        carts: Arc::new(strict_carts_mock()),
        orders: Arc::new(strict_orders_mock()),
        auth: Arc::new(strict_auth_mock()),
    }
}

/// Resolves [`TEST_USER_UUID`] to [`TEST_CLIENT_UUID`].
pub(crate) fn resolving_clients() -> MockClientsService {
    let mut clients = MockClientsService::new();

    clients
        .expect_get_client_profile_for_user()
        .withf(|user| *user == TEST_USER_UUID)
        .returning(|user| {
            Ok(ClientProfileRecord {
                uuid: TEST_CLIENT_UUID,
                user_uuid: user,
                cpf: None,
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            })
        });

    clients
}

/// The authenticated user has no client profile.
pub(crate) fn missing_clients() -> MockClientsService {
    let mut clients = MockClientsService::new();

    clients
        .expect_get_client_profile_for_user()
        .returning(|_| Err(ClientsServiceError::NotFound));

    clients
}

/// Resolves [`TEST_USER_UUID`] to the store [`TEST_STORE_UUID`].
pub(crate) fn resolving_stores() -> MockStoresService {
    let mut stores = MockStoresService::new();

    stores
        .expect_get_store_for_owner()
        .withf(|user| *user == TEST_USER_UUID)
        .returning(|user| {
            Ok(StoreRecord {
                uuid: TEST_STORE_UUID,
                owner_user_uuid: user,
                name: "Corner Grocer".to_string(),
                description: None,
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            })
        });

    stores
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    let mut app = strict_context();

    app.auth = Arc::new(auth);

    State::from_app_context(app)
}

/// Serve `route` as [`TEST_USER_UUID`] over `app`.
pub(crate) fn app_service(app: AppContext, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(State::from_app_context(app)))
            .hoop(inject_user)
            .push(route),
    )
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    let mut app = strict_context();

    app.clients = Arc::new(resolving_clients());
    app.carts = Arc::new(carts);

    app_service(app, route)
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    let mut app = strict_context();

    app.clients = Arc::new(resolving_clients());
    app.stores = Arc::new(resolving_stores());
    app.orders = Arc::new(orders);

    app_service(app, route)
}

pub(crate) fn make_cart(lines: &[(u32, u64)]) -> CartRecord {
    let cart = CartUuid::new();

    let items: Vec<CartItemRecord> = lines
        .iter()
        .map(|&(quantity, unit_price)| CartItemRecord {
            uuid: CartItemUuid::new(),
            cart_uuid: cart,
            product_uuid: ProductUuid::new(),
            quantity,
            unit_price,
            total_price: u64::from(quantity) * unit_price,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        })
        .collect();

    let subtotal: u64 = items.iter().map(|item| item.total_price).sum();
    let delivery_fee = if subtotal == 0 || subtotal >= 50_00 {
        0
    } else {
        5_00
    };

    CartRecord {
        uuid: cart,
        client_profile_uuid: TEST_CLIENT_UUID,
        subtotal,
        delivery_fee,
        total: subtotal + delivery_fee,
        items,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// An order placed by `client_user` with a store owned by `store_owner`.
pub(crate) fn make_order(
    client_user: UserUuid,
    store_owner: UserUuid,
    status: OrderStatus,
) -> OrderRecord {
    let order = OrderUuid::new();

    OrderRecord {
        uuid: order,
        client: OrderClient {
            uuid: ClientProfileUuid::new(),
            user_uuid: client_user,
        },
        store: OrderStore {
            uuid: StoreUuid::new(),
            name: "Corner Grocer".to_string(),
            owner_user_uuid: store_owner,
        },
        delivery_address: OrderDeliveryAddress {
            uuid: AddressUuid::new(),
            street: "Rua das Flores".to_string(),
            number: "42".to_string(),
            complement: None,
            city: "Recife".to_string(),
            state: "PE".to_string(),
            postal_code: "50000-000".to_string(),
        },
        subtotal: 60_00,
        delivery_fee: 0,
        total: 60_00,
        status,
        payment_method: "PENDING".to_string(),
        payment_status: "PENDING".to_string(),
        payment_date: None,
        delivery_date_time: None,
        items: vec![OrderItemRecord {
            uuid: OrderItemUuid::new(),
            order_uuid: order,
            product_uuid: ProductUuid::new(),
            product_name: "Apples".to_string(),
            product_description: Some("Fresh Apples".to_string()),
            quantity: 6,
            unit_price: 10_00,
            total_price: 60_00,
            created_at: Timestamp::UNIX_EPOCH,
        }],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// A user other than [`TEST_USER_UUID`].
pub(crate) fn other_user() -> UserUuid {
    UserUuid::from_uuid(Uuid::now_v7())
}
