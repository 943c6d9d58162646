#![doc = "The `taskvault` library crate."]
#![doc = ""]
#![doc = "This crate contains the domain models, validation rules, credential"]
#![doc = "handling, owner-scoped data access, use-case orchestration, and routing"]
#![doc = "configuration for the TaskVault application. It is used by the main"]
#![doc = "binary (`main.rs`) to construct and run the application."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod service;
pub mod store;
