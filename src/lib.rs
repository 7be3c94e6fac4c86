//! Procura backend: RFQ evaluation and lifecycle engine for a B2B
//! procurement marketplace, exposed over HTTP.

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod store;
