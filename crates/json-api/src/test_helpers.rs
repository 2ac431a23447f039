//! Test helpers.

use std::{path::PathBuf, sync::Arc};

use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use jiff::Timestamp;

use globalshop_app::{
    context::AppContext,
    domain::{
        accounts::{
            MockAccountsService,
            models::{SessionUuid, User, UserUuid},
        },
        carts::MockCartsService,
        catalog::{
            MockCatalogService,
            export::ExportPaths,
            models::{CategoryUuid, Product, ProductUuid},
        },
        orders::{MockCheckoutService, MockOrdersService},
    },
    identity::ShopperIdentity,
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());
pub(crate) const TEST_SESSION_UUID: SessionUuid = SessionUuid::from_uuid(Uuid::max());

/// One mock per service the state carries. Unused mocks panic on any
/// unexpected call, so each test only configures what it exercises.
pub(crate) struct MockApp {
    pub(crate) accounts: MockAccountsService,
    pub(crate) carts: MockCartsService,
    pub(crate) catalog: MockCatalogService,
    pub(crate) checkout: MockCheckoutService,
    pub(crate) orders: MockOrdersService,
    pub(crate) export_paths: ExportPaths,
}

impl Default for MockApp {
    fn default() -> Self {
        Self {
            accounts: MockAccountsService::new(),
            carts: MockCartsService::new(),
            catalog: MockCatalogService::new(),
            checkout: MockCheckoutService::new(),
            orders: MockOrdersService::new(),
            export_paths: ExportPaths {
                primary: PathBuf::from("/nonexistent/products.json"),
                fallbacks: Vec::new(),
            },
        }
    }
}

impl MockApp {
    pub(crate) fn into_state(self) -> Arc<State> {
        let app = AppContext {
            accounts: Arc::new(self.accounts),
            carts: Arc::new(self.carts),
            catalog: Arc::new(self.catalog),
            checkout: Arc::new(self.checkout),
            orders: Arc::new(self.orders),
            export_paths: self.export_paths,
        };

        Arc::new(State::new(app))
    }
}

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_session(TEST_SESSION_UUID);
    depot.insert_identity(ShopperIdentity::User(TEST_USER_UUID));
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn inject_guest(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_session(TEST_SESSION_UUID);
    depot.insert_identity(ShopperIdentity::Session(TEST_SESSION_UUID));
    ctrl.call_next(req, depot, res).await;
}

/// Mount a route behind the given middleware with mocked services.
pub(crate) fn service_with<H: Handler>(app: MockApp, middleware: H, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(app.into_state()))
            .hoop(middleware)
            .push(route),
    )
}

/// Mount a route as an authenticated user.
pub(crate) fn user_service(app: MockApp, route: Router) -> Service {
    service_with(app, inject_user, route)
}

/// Mount a route as an anonymous session.
pub(crate) fn guest_service(app: MockApp, route: Router) -> Service {
    service_with(app, inject_guest, route)
}

pub(crate) fn make_user(uuid: UserUuid, phone_number: &str) -> User {
    User {
        uuid,
        phone_number: phone_number.to_string(),
        first_name: String::new(),
        last_name: String::new(),
        email: String::new(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(uuid: ProductUuid, title: &str, price: u64) -> Product {
    Product {
        uuid,
        title: title.to_string(),
        description: None,
        slug: None,
        price,
        discount: rust_decimal::Decimal::ZERO,
        quantity: 10,
        category_uuid: CategoryUuid::generate(),
        subcategory_uuid: None,
        is_bestseller: false,
        is_promo: false,
        images: Vec::new(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
