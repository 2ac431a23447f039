//! Orders service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::accounts::models::UserUuid,
    domain::orders::{
        errors::OrdersServiceError,
        models::{Address, Order, OrderDetail, OrderUuid},
        repositories::{PgAddressesRepository, PgOrdersRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders: PgOrdersRepository,
    addresses: PgAddressesRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders: PgOrdersRepository::new(),
            addresses: PgAddressesRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn list_orders(&self, user: UserUuid) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.orders.list_orders(&mut tx, user).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderDetail, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.orders.get_order(&mut tx, order).await?;

        if order.user_uuid != user {
            return Err(OrdersServiceError::AccessDenied);
        }

        let lines = self.orders.list_order_lines(&mut tx, order.uuid).await?;

        let address = match order.address_uuid {
            Some(address) => Some(self.addresses.get(&mut tx, address).await?),
            None => None,
        };

        tx.commit().await?;

        Ok(OrderDetail {
            order,
            lines,
            address,
        })
    }

    async fn latest_address(
        &self,
        user: UserUuid,
    ) -> Result<Option<Address>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let address = self.addresses.latest(&mut tx, user).await?;

        tx.commit().await?;

        Ok(address)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// The user's orders, newest first.
    async fn list_orders(&self, user: UserUuid) -> Result<Vec<Order>, OrdersServiceError>;

    /// An order with its lines and address.
    ///
    /// Rejected with [`OrdersServiceError::AccessDenied`] when the order
    /// belongs to someone else.
    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderDetail, OrdersServiceError>;

    /// The most recently created address, for checkout prefill.
    async fn latest_address(&self, user: UserUuid)
    -> Result<Option<Address>, OrdersServiceError>;
}
