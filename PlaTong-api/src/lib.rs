// PlaTong-api lib.rs
//
// HTTP layer for the PlaTong site: routes, handlers, session registry and
// OpenAPI docs over the domain crate.

// Public modules
pub mod api;
pub mod config;
pub mod entities;
pub mod openapi;
pub mod sessions;
pub mod state;
