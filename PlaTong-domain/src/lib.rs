// PlaTong Domain
// This crate contains the business logic for the PlaTong site

// Services that implement business logic
pub mod services;

// Domain entities
pub mod entities;

// Health checks and system status
pub mod health;

// Re-export the content and stats layer for convenience
pub use pla_tong_data as data;

// Testing utilities - only available in tests or with the mock feature
#[cfg(any(test, feature = "mock"))]
pub mod testing;
