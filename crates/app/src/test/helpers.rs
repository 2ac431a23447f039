//! Test Helpers

use rust_decimal::Decimal;

use crate::{
    domain::accounts::{
        AccountsService, AccountsServiceError,
        models::{NewUser, SessionUuid, User},
    },
    domain::catalog::{
        CatalogService, CatalogServiceError,
        models::{Category, CategoryUuid, NewCategory, NewProduct, Product, ProductUpdate, ProductUuid},
    },
    identity::ShopperIdentity,
    test::TestContext,
};

pub(crate) fn guest_identity() -> ShopperIdentity {
    ShopperIdentity::Session(SessionUuid::generate())
}

pub(crate) async fn create_user(
    ctx: &TestContext,
    phone_number: &str,
) -> Result<User, AccountsServiceError> {
    ctx.accounts
        .register(NewUser {
            phone_number: phone_number.to_string(),
            password: "test-password".to_string(),
        })
        .await
}

pub(crate) async fn create_category(
    ctx: &TestContext,
    title: &str,
) -> Result<Category, CatalogServiceError> {
    ctx.catalog
        .create_category(NewCategory {
            uuid: CategoryUuid::generate(),
            title: title.to_string(),
            slug: None,
        })
        .await
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    category: CategoryUuid,
    title: &str,
    price: u64,
    quantity: u64,
) -> Result<Product, CatalogServiceError> {
    ctx.catalog
        .create_product(NewProduct {
            uuid: ProductUuid::generate(),
            title: title.to_string(),
            description: None,
            slug: None,
            price,
            discount: Decimal::ZERO,
            quantity,
            category_uuid: category,
            subcategory_uuid: None,
            is_bestseller: false,
            is_promo: false,
        })
        .await
}

pub(crate) async fn set_product_quantity(
    ctx: &TestContext,
    product: &Product,
    quantity: u64,
) -> Result<Product, CatalogServiceError> {
    ctx.catalog
        .update_product(
            product.uuid,
            ProductUpdate {
                title: product.title.clone(),
                description: product.description.clone(),
                slug: product.slug.clone(),
                price: product.price,
                discount: product.discount,
                quantity,
                category_uuid: product.category_uuid,
                subcategory_uuid: product.subcategory_uuid,
                is_bestseller: product.is_bestseller,
                is_promo: product.is_promo,
            },
        )
        .await
}
