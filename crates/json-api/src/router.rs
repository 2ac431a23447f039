//! App Router

use salvo::Router;

use crate::{accounts, carts, catalog, orders, session};

pub fn app_router() -> Router {
    Router::new()
        .hoop(session::handler)
        .push(Router::with_path("products.json").get(catalog::export::handler))
        .push(
            Router::with_path("products")
                .get(catalog::list_products::handler)
                .post(catalog::create_product::handler)
                .push(
                    Router::with_path("{product}")
                        .get(catalog::get_product::handler)
                        .put(catalog::update_product::handler)
                        .delete(catalog::delete_product::handler)
                        .push(
                            Router::with_path("images")
                                .post(catalog::create_image::handler)
                                .push(
                                    Router::with_path("{image}")
                                        .delete(catalog::delete_image::handler),
                                ),
                        )
                        .push(
                            Router::with_path("favorite").post(catalog::toggle_favorite::handler),
                        ),
                ),
        )
        .push(Router::with_path("favorites").get(catalog::list_favorites::handler))
        .push(
            Router::with_path("categories")
                .get(catalog::list_categories::handler)
                .post(catalog::create_category::handler),
        )
        .push(
            Router::with_path("subcategories")
                .get(catalog::list_subcategories::handler)
                .post(catalog::create_subcategory::handler),
        )
        .push(
            Router::with_path("cart").get(carts::view::handler).push(
                Router::with_path("items")
                    .post(carts::add_item::handler)
                    .push(
                        Router::with_path("{item}")
                            .post(carts::update_item::handler)
                            .delete(carts::remove_item::handler),
                    ),
            ),
        )
        .push(
            Router::with_path("checkout")
                .get(orders::prefill::handler)
                .post(orders::checkout::handler),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .push(Router::with_path("{order}").get(orders::get::handler)),
        )
        .push(
            Router::with_path("accounts")
                .push(Router::with_path("register").post(accounts::register::handler))
                .push(Router::with_path("login").post(accounts::login::handler))
                .push(Router::with_path("logout").post(accounts::logout::handler))
                .push(
                    Router::with_path("profile")
                        .get(accounts::profile::handler)
                        .put(accounts::update_profile::handler),
                ),
        )
}
