//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::carts::{
        errors::CartsServiceError,
        models::{Cart, CartItemUuid, CartSummary, CartView},
        repositories::{PgCartItemsRepository, PgCartsRepository},
    },
    domain::catalog::{models::ProductUuid, repository::PgCatalogRepository},
    identity::ShopperIdentity,
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts: PgCartsRepository,
    items: PgCartItemsRepository,
    catalog: PgCatalogRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts: PgCartsRepository::new(),
            items: PgCartItemsRepository::new(),
            catalog: PgCatalogRepository::new(),
        }
    }

    async fn resolve(
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
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn resolve_cart(&self, identity: &ShopperIdentity) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.resolve(&mut tx, identity).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn view(&self, identity: &ShopperIdentity) -> Result<CartView, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.resolve(&mut tx, identity).await?;
        let items = self.items.list_items(&mut tx, cart.uuid).await?;
        let summary = self.items.totals(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(CartView {
            cart,
            items,
            summary,
        })
    }

    async fn add_item(
        &self,
        identity: &ShopperIdentity,
        product: ProductUuid,
    ) -> Result<CartSummary, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.catalog.get_product(&mut tx, product).await?;

        if product.out_of_stock() {
            return Err(CartsServiceError::StockExhausted);
        }

        let cart = self.resolve(&mut tx, identity).await?;
        let price = product.sell_price();

        match self
            .items
            .find_item_by_product(&mut tx, cart.uuid, product.uuid)
            .await?
        {
            Some(existing) => {
                let quantity = existing.quantity + 1;

                if quantity > product.quantity {
                    return Err(CartsServiceError::StockExhausted);
                }

                self.items
                    .update_item(&mut tx, cart.uuid, existing.uuid, quantity, price)
                    .await?;
            }
            None => {
                self.items
                    .insert_item(&mut tx, cart.uuid, product.uuid, 1, price)
                    .await?;
            }
        }

        let summary = self.items.totals(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(summary)
    }

    async fn update_quantity(
        &self,
        identity: &ShopperIdentity,
        item: CartItemUuid,
        delta: i64,
    ) -> Result<CartSummary, CartsServiceError> {
        if delta == 0 {
            return Err(CartsServiceError::InvalidQuantityDelta);
        }

        let mut tx = self.db.begin().await?;

        let cart = self.resolve(&mut tx, identity).await?;

        let Some(existing) = self.items.find_item(&mut tx, cart.uuid, item).await? else {
            return Err(CartsServiceError::NotFound);
        };

        let quantity = i64::try_from(existing.quantity).unwrap_or(i64::MAX) + delta;

        if quantity <= 0 {
            self.items.delete_item(&mut tx, cart.uuid, item).await?;
        } else {
            let product = self
                .catalog
                .get_product(&mut tx, existing.product_uuid)
                .await?;
            let quantity = quantity.unsigned_abs();

            if quantity > product.quantity {
                return Err(CartsServiceError::StockExhausted);
            }

            self.items
                .update_item(&mut tx, cart.uuid, item, quantity, product.sell_price())
                .await?;
        }

        let summary = self.items.totals(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(summary)
    }

    async fn remove_item(
        &self,
        identity: &ShopperIdentity,
        item: CartItemUuid,
    ) -> Result<CartSummary, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.resolve(&mut tx, identity).await?;

        let rows_affected = self.items.delete_item(&mut tx, cart.uuid, item).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        let summary = self.items.totals(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(summary)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Get-or-create the cart owned by the given identity.
    async fn resolve_cart(&self, identity: &ShopperIdentity) -> Result<Cart, CartsServiceError>;

    /// The cart with its line items and totals.
    async fn view(&self, identity: &ShopperIdentity) -> Result<CartView, CartsServiceError>;

    /// Add one unit of a product, merging into an existing line.
    ///
    /// Rejected with [`CartsServiceError::StockExhausted`] once the line
    /// would exceed the product's available stock.
    async fn add_item(
        &self,
        identity: &ShopperIdentity,
        product: ProductUuid,
    ) -> Result<CartSummary, CartsServiceError>;

    /// Apply a signed quantity change to a line.
    ///
    /// A change that brings the quantity to zero or below removes the
    /// line. The line's price snapshot is refreshed from the product.
    async fn update_quantity(
        &self,
        identity: &ShopperIdentity,
        item: CartItemUuid,
        delta: i64,
    ) -> Result<CartSummary, CartsServiceError>;

    /// Remove a line outright.
    async fn remove_item(
        &self,
        identity: &ShopperIdentity,
        item: CartItemUuid,
    ) -> Result<CartSummary, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{TestContext, helpers};

    use super::*;

    #[tokio::test]
    async fn adds_cap_at_available_stock() -> TestResult {
        let ctx = TestContext::new().await;

        let category = helpers::create_category(&ctx, "Phones").await?;
        let product = helpers::create_product(&ctx, category.uuid, "Handset", 10_00, 5).await?;
        let identity = helpers::guest_identity();

        for _ in 0..5 {
            ctx.carts.add_item(&identity, product.uuid).await?;
        }

        let result = ctx.carts.add_item(&identity, product.uuid).await;

        assert!(
            matches!(result, Err(CartsServiceError::StockExhausted)),
            "expected StockExhausted, got {result:?}"
        );

        let view = ctx.carts.view(&identity).await?;

        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].quantity, 5);

        Ok(())
    }

    #[tokio::test]
    async fn totals_sum_quantity_times_price() -> TestResult {
        let ctx = TestContext::new().await;

        let category = helpers::create_category(&ctx, "Audio").await?;
        let speaker = helpers::create_product(&ctx, category.uuid, "Speaker", 10_00, 10).await?;
        let cable = helpers::create_product(&ctx, category.uuid, "Cable", 5_00, 10).await?;
        let identity = helpers::guest_identity();

        let empty = ctx.carts.view(&identity).await?;
        assert_eq!(empty.summary, CartSummary::default());

        ctx.carts.add_item(&identity, speaker.uuid).await?;
        ctx.carts.add_item(&identity, speaker.uuid).await?;
        let summary = ctx.carts.add_item(&identity, cable.uuid).await?;

        assert_eq!(summary.total_price, 25_00);
        assert_eq!(summary.total_quantity, 3);

        Ok(())
    }

    #[tokio::test]
    async fn decrement_to_zero_removes_the_line() -> TestResult {
        let ctx = TestContext::new().await;

        let category = helpers::create_category(&ctx, "Audio").await?;
        let product = helpers::create_product(&ctx, category.uuid, "Earbuds", 19_99, 3).await?;
        let identity = helpers::guest_identity();

        ctx.carts.add_item(&identity, product.uuid).await?;

        let view = ctx.carts.view(&identity).await?;
        let item = view.items[0].uuid;

        let summary = ctx.carts.update_quantity(&identity, item, -1).await?;

        assert_eq!(summary, CartSummary::default());
        assert!(ctx.carts.view(&identity).await?.items.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn zero_delta_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        let identity = helpers::guest_identity();
        let result = ctx
            .carts
            .update_quantity(&identity, CartItemUuid::generate(), 0)
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidQuantityDelta)),
            "expected InvalidQuantityDelta, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn user_and_session_carts_are_distinct() -> TestResult {
        let ctx = TestContext::new().await;

        let user = helpers::create_user(&ctx, "+15550006666").await?;
        let user_identity = ShopperIdentity::User(user.uuid);
        let guest_identity = helpers::guest_identity();

        let user_cart = ctx.carts.resolve_cart(&user_identity).await?;
        let guest_cart = ctx.carts.resolve_cart(&guest_identity).await?;

        assert_ne!(user_cart.uuid, guest_cart.uuid);

        // Resolving again yields the same cart, not a new one.
        assert_eq!(
            ctx.carts.resolve_cart(&user_identity).await?.uuid,
            user_cart.uuid
        );

        Ok(())
    }

    #[tokio::test]
    async fn out_of_stock_product_cannot_be_added() -> TestResult {
        let ctx = TestContext::new().await;

        let category = helpers::create_category(&ctx, "Audio").await?;
        let product = helpers::create_product(&ctx, category.uuid, "Amp", 99_00, 0).await?;
        let identity = helpers::guest_identity();

        let result = ctx.carts.add_item(&identity, product.uuid).await;

        assert!(
            matches!(result, Err(CartsServiceError::StockExhausted)),
            "expected StockExhausted, got {result:?}"
        );

        Ok(())
    }
}
