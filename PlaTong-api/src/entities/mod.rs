// Public entities for the PlaTong API
// Request and response bodies that only exist at the HTTP boundary

// Blood pressure interpretation requests
pub mod blood_pressure;

// Common entities for error handling
pub mod common;

// Page payloads built from the site content
pub mod content;

// Guide session requests and responses
pub mod tutorial;
