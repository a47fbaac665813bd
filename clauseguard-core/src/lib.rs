// src/lib.rs

pub mod auth;
pub mod crypto;
pub mod db;
pub mod http;
pub mod repositories;
pub mod services;

pub use clauseguard_common::error::Error;
pub use db::Database;
pub use services::contract_actions::{BoundActions, ContractActions};
