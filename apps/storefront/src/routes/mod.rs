//! Route configuration.
//!
//! ```text
//! /health                              GET      liveness
//! /api/catalog?category=&expanded=     GET      public grid
//! /api/products/{id}                   GET      public detail
//! /api/hero                            GET      banner
//! /api/admin/login                     POST     {password} → {token}
//! ─────────────── Bearer token required below ───────────────
//! /api/admin/logout                    POST
//! /api/admin/products                  GET POST
//! /api/admin/products/{id}             GET PATCH DELETE
//! /api/admin/products/{id}/toggle      POST
//! /api/admin/hero/mode                 PUT
//! /api/admin/hero/images               POST PUT(reorder)
//! /api/admin/hero/images/{id}          PATCH DELETE
//! ```

pub mod admin;
pub mod catalog;
pub mod hero;

use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, patch, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_admin;
use crate::state::AppState;

/// Create the application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let admin_routes = Router::new()
        .route("/logout", post(admin::logout))
        .route(
            "/products",
            get(admin::list_products).post(admin::create_product),
        )
        .route(
            "/products/{id}",
            get(admin::get_product)
                .patch(admin::update_product)
                .delete(admin::delete_product),
        )
        .route("/products/{id}/toggle", post(admin::toggle_product))
        .route("/hero/mode", put(hero::set_mode))
        .route("/hero/images", post(hero::add_image).put(hero::reorder))
        .route(
            "/hero/images/{id}",
            patch(hero::update_image).delete(hero::delete_image),
        )
        // Everything above needs a session; login below does not
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
        .route("/login", post(admin::login));

    Router::new()
        .route("/health", get(catalog::health))
        .route("/api/catalog", get(catalog::get_catalog))
        .route("/api/products/{id}", get(catalog::get_product))
        .route("/api/hero", get(catalog::get_hero))
        .nest("/api/admin", admin_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
