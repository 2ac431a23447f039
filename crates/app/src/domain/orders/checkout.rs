//! Checkout orchestration.
//!
//! Turns a populated cart into an order, the acting account, and a
//! shipping address, all inside one transaction. Any failure rolls the
//! whole placement back.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::accounts::{
        models::{User, UserUuid},
        password,
        repositories::{PgSessionsRepository, PgUsersRepository},
    },
    domain::carts::{
        models::{Cart, CartItem},
        repositories::{PgCartItemsRepository, PgCartsRepository},
    },
    domain::catalog::repository::PgCatalogRepository,
    domain::orders::{
        errors::CheckoutError,
        models::{Address, CheckoutForm, CheckoutOutcome, NewAddress, Order},
        repositories::{PgAddressesRepository, PgOrdersRepository},
    },
    identity::ShopperIdentity,
};

#[derive(Debug, Clone)]
pub struct PgCheckoutService {
    db: Db,
    carts: PgCartsRepository,
    items: PgCartItemsRepository,
    catalog: PgCatalogRepository,
    users: PgUsersRepository,
    sessions: PgSessionsRepository,
    addresses: PgAddressesRepository,
    orders: PgOrdersRepository,
}

impl PgCheckoutService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts: PgCartsRepository::new(),
            items: PgCartItemsRepository::new(),
            catalog: PgCatalogRepository::new(),
            users: PgUsersRepository::new(),
            sessions: PgSessionsRepository::new(),
            addresses: PgAddressesRepository::new(),
            orders: PgOrdersRepository::new(),
        }
    }

    /// Validate the guest password pair and hash it, before any account
    /// or order writes.
    fn guest_password_hash(form: &CheckoutForm) -> Result<String, CheckoutError> {
        let (Some(password), Some(password2)) = (&form.password, &form.password2) else {
            return Err(CheckoutError::CredentialMismatch);
        };

        if password.is_empty() || password != password2 {
            return Err(CheckoutError::CredentialMismatch);
        }

        password::hash_password(password)
            .map_err(|error| CheckoutError::PasswordHash(error.to_string()))
    }

    async fn resolve_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        identity: &ShopperIdentity,
    ) -> Result<Cart, sqlx::Error> {
        match identity {
            ShopperIdentity::User(user) => self.carts.resolve_for_user(tx, *user).await,
            ShopperIdentity::Session(session) => {
                self.carts.resolve_for_session(tx, *session).await
            }
        }
    }

    async fn resolve_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        address: &NewAddress,
    ) -> Result<Address, sqlx::Error> {
        match self.addresses.find_matching(tx, user, address).await? {
            Some(existing) => Ok(existing),
            None => self.addresses.create(tx, user, address).await,
        }
    }

    async fn update_profile_from_form(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: &User,
        form: &CheckoutForm,
    ) -> Result<(), sqlx::Error> {
        let changed = |submitted: &str, current: &str| {
            let submitted = submitted.trim();
            (!submitted.is_empty() && submitted != current).then(|| submitted.to_string())
        };

        let first_name = changed(&form.first_name, &user.first_name);
        let last_name = changed(&form.last_name, &user.last_name);
        let email = changed(&form.email, &user.email);

        if first_name.is_none() && last_name.is_none() && email.is_none() {
            return Ok(());
        }

        self.users
            .update_profile(
                tx,
                user.uuid,
                first_name.as_deref(),
                last_name.as_deref(),
                email.as_deref(),
            )
            .await?;

        Ok(())
    }

    async fn place_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &Order,
        items: &[CartItem],
    ) -> Result<(), CheckoutError> {
        for item in items {
            self.orders
                .create_order_item(tx, order.uuid, item.product_uuid, item.quantity)
                .await?;

            let rows_affected = self
                .catalog
                .decrement_stock(tx, item.product_uuid, item.quantity)
                .await?;

            if rows_affected == 0 {
                return Err(CheckoutError::StockExhausted);
            }
        }

        Ok(())
    }
}

#[async_trait]
impl CheckoutService for PgCheckoutService {
    async fn checkout(
        &self,
        identity: &ShopperIdentity,
        form: CheckoutForm,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        let mut tx = self.db.begin().await?;

        // An empty cart is reported before the form is even looked at.
        let cart = self.resolve_cart(&mut tx, identity).await?;
        let items = self.items.list_items(&mut tx, cart.uuid).await?;

        if items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let address = form.address.normalized();

        if let Some(field) = address.missing_field() {
            return Err(CheckoutError::Validation(field));
        }

        let phone_number = form.phone_number.trim();

        // Guest credentials are validated and hashed before any account,
        // address, order, or stock write, so a mismatch leaves no trace.
        let guest_hash = match identity {
            ShopperIdentity::User(_) => None,
            ShopperIdentity::Session(_) => {
                if phone_number.is_empty() {
                    return Err(CheckoutError::Validation("phone_number"));
                }

                Some(Self::guest_password_hash(&form)?)
            }
        };

        let (user, created_account) = match (identity, guest_hash) {
            (ShopperIdentity::User(user), _) => {
                (self.users.get_user(&mut tx, *user).await?, false)
            }
            (ShopperIdentity::Session(session), Some(hash)) => {
                let user = self
                    .users
                    .create_user(&mut tx, UserUuid::generate(), phone_number, &hash)
                    .await?;

                // Re-own the cart and authenticate the session.
                self.carts.assign_user(&mut tx, cart.uuid, user.uuid).await?;
                self.sessions.resolve(&mut tx, *session).await?;
                self.sessions.attach_user(&mut tx, *session, user.uuid).await?;

                (user, true)
            }
            (ShopperIdentity::Session(_), None) => {
                return Err(CheckoutError::CredentialMismatch);
            }
        };

        let shipping = self.resolve_address(&mut tx, user.uuid, &address).await?;

        let order = self
            .orders
            .create_order(&mut tx, user.uuid, shipping.uuid, form.payment_method)
            .await?;

        self.place_order_items(&mut tx, &order, &items).await?;
        self.update_profile_from_form(&mut tx, &user, &form).await?;
        self.items.clear_items(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(CheckoutOutcome {
            order,
            user_uuid: user.uuid,
            created_account,
        })
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Place an order from the identity's cart.
    ///
    /// Guests must submit a matching password pair; a new account is
    /// created from the phone number and the session is authenticated
    /// as it.
    async fn checkout(
        &self,
        identity: &ShopperIdentity,
        form: CheckoutForm,
    ) -> Result<CheckoutOutcome, CheckoutError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::accounts::{AccountsService, models::SessionUuid},
        domain::carts::CartsService,
        domain::catalog::CatalogService,
        domain::orders::models::PaymentMethod,
        domain::orders::service::OrdersService,
        test::{TestContext, helpers},
    };

    use super::*;

    fn form_with_passwords(password: &str, password2: &str) -> CheckoutForm {
        CheckoutForm {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone_number: "+15550007777".to_string(),
            password: Some(password.to_string()),
            password2: Some(password2.to_string()),
            address: NewAddress {
                city: "Springfield".to_string(),
                street: "Evergreen Terrace".to_string(),
                house: "742".to_string(),
                building: String::new(),
                apartment: "1".to_string(),
                postal_code: "49007".to_string(),
            },
            payment_method: PaymentMethod::Cash,
        }
    }

    #[tokio::test]
    async fn empty_cart_checkout_creates_nothing() -> TestResult {
        let ctx = TestContext::new().await;

        let user = helpers::create_user(&ctx, "+15550008888").await?;
        let identity = ShopperIdentity::User(user.uuid);

        let result = ctx
            .checkout
            .checkout(&identity, form_with_passwords("", ""))
            .await;

        assert!(
            matches!(result, Err(CheckoutError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );
        assert!(ctx.orders.list_orders(user.uuid).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn empty_cart_reported_before_form_validation() -> TestResult {
        let ctx = TestContext::new().await;

        // Bad form all around: no address, mismatched passwords.
        let mut form = form_with_passwords("one", "two");
        form.address.city = String::new();
        form.phone_number = String::new();

        let result = ctx.checkout.checkout(&helpers::guest_identity(), form).await;

        assert!(
            matches!(result, Err(CheckoutError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn guest_checkout_signs_the_session_in() -> TestResult {
        let ctx = TestContext::new().await;

        let category = helpers::create_category(&ctx, "Phones").await?;
        let product = helpers::create_product(&ctx, category.uuid, "Charger", 15_00, 10).await?;

        let session = SessionUuid::generate();
        let identity = ShopperIdentity::Session(session);

        ctx.carts.add_item(&identity, product.uuid).await?;

        let outcome = ctx
            .checkout
            .checkout(&identity, form_with_passwords("secret", "secret"))
            .await?;

        assert!(outcome.created_account);

        // The new account owns the session, so the next request with the
        // same token is already signed in.
        let state = ctx.accounts.lookup_session(session).await?;

        assert_eq!(state.user_uuid, Some(outcome.user_uuid));

        Ok(())
    }

    #[tokio::test]
    async fn guest_password_mismatch_fails_before_any_write() -> TestResult {
        let ctx = TestContext::new().await;

        let category = helpers::create_category(&ctx, "Phones").await?;
        let product = helpers::create_product(&ctx, category.uuid, "Handset", 10_00, 10).await?;
        let identity = helpers::guest_identity();

        ctx.carts.add_item(&identity, product.uuid).await?;

        let result = ctx
            .checkout
            .checkout(&identity, form_with_passwords("one", "two"))
            .await;

        assert!(
            matches!(result, Err(CheckoutError::CredentialMismatch)),
            "expected CredentialMismatch, got {result:?}"
        );

        // Nothing was mutated, so the retry succeeds cleanly.
        assert_eq!(ctx.catalog.get_product(product.uuid).await?.quantity, 10);

        let outcome = ctx
            .checkout
            .checkout(&identity, form_with_passwords("secret", "secret"))
            .await?;

        assert!(outcome.created_account);
        assert_eq!(ctx.catalog.get_product(product.uuid).await?.quantity, 9);

        Ok(())
    }

    #[tokio::test]
    async fn successful_checkout_decrements_stock_and_clears_cart() -> TestResult {
        let ctx = TestContext::new().await;

        let user = helpers::create_user(&ctx, "+15550001212").await?;
        let identity = ShopperIdentity::User(user.uuid);

        let category = helpers::create_category(&ctx, "Audio").await?;
        let product = helpers::create_product(&ctx, category.uuid, "Speaker", 50_00, 10).await?;

        ctx.carts.add_item(&identity, product.uuid).await?;
        ctx.carts.add_item(&identity, product.uuid).await?;

        let outcome = ctx
            .checkout
            .checkout(&identity, form_with_passwords("", ""))
            .await?;

        assert!(!outcome.created_account);
        assert_eq!(outcome.user_uuid, user.uuid);

        assert_eq!(ctx.catalog.get_product(product.uuid).await?.quantity, 8);
        assert!(ctx.carts.view(&identity).await?.items.is_empty());

        let detail = ctx.orders.get_order(user.uuid, outcome.order.uuid).await?;

        assert_eq!(detail.lines.len(), 1);
        assert_eq!(detail.lines[0].quantity, 2);
        assert_eq!(detail.total_cost(), 100_00);

        Ok(())
    }

    #[tokio::test]
    async fn identical_addresses_reuse_one_row() -> TestResult {
        let ctx = TestContext::new().await;

        let user = helpers::create_user(&ctx, "+15550003434").await?;
        let identity = ShopperIdentity::User(user.uuid);

        let category = helpers::create_category(&ctx, "Audio").await?;
        let product = helpers::create_product(&ctx, category.uuid, "Cable", 5_00, 10).await?;

        ctx.carts.add_item(&identity, product.uuid).await?;
        let first = ctx
            .checkout
            .checkout(&identity, form_with_passwords("", ""))
            .await?;

        // Same address typed differently normalizes to the same row.
        let mut form = form_with_passwords("", "");
        form.address.city = "  springfield ".to_string();
        form.address.street = "EVERGREEN terrace".to_string();

        ctx.carts.add_item(&identity, product.uuid).await?;
        let second = ctx.checkout.checkout(&identity, form).await?;

        assert_eq!(first.order.address_uuid, second.order.address_uuid);

        Ok(())
    }

    #[tokio::test]
    async fn stock_raced_away_rolls_the_order_back() -> TestResult {
        let ctx = TestContext::new().await;

        let user = helpers::create_user(&ctx, "+15550005656").await?;
        let identity = ShopperIdentity::User(user.uuid);

        let category = helpers::create_category(&ctx, "Audio").await?;
        let product = helpers::create_product(&ctx, category.uuid, "Amp", 200_00, 2).await?;

        ctx.carts.add_item(&identity, product.uuid).await?;
        ctx.carts.add_item(&identity, product.uuid).await?;

        // Another shopper got there first.
        helpers::set_product_quantity(&ctx, &product, 1).await?;

        let result = ctx
            .checkout
            .checkout(&identity, form_with_passwords("", ""))
            .await;

        assert!(
            matches!(result, Err(CheckoutError::StockExhausted)),
            "expected StockExhausted, got {result:?}"
        );

        assert!(ctx.orders.list_orders(user.uuid).await?.is_empty());
        assert_eq!(ctx.catalog.get_product(product.uuid).await?.quantity, 1);
        assert_eq!(ctx.carts.view(&identity).await?.items.len(), 1);

        Ok(())
    }
}
