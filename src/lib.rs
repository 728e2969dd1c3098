//! Encore: a booking-site backend for venues, artists, and shows.
//!
//! List/search/detail pages are read models assembled in [`services`];
//! create/edit/delete run validate → persist → commit with rollback on any
//! failure, and flash feedback rides in the response envelope.

use sqlx::PgPool;

pub mod config;
pub mod forms;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

/// Shared application state handed to every handler. The pool replaces the
/// old global session: each request borrows a connection and every mutation
/// is one scoped transaction.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}
