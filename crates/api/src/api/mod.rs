//! HTTP surface: routes, handlers and the server

pub mod handlers;
pub mod routes;
pub mod server;

pub use server::ApiServer;
