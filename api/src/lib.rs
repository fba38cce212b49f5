// Library exports for the binary and the integration tests

pub mod app;
pub mod bootstrap;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
