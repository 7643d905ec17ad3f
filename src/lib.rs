pub mod error;
pub mod validation;
pub mod config;
pub mod logging;
pub mod model;
pub mod vcard;
pub mod db;
pub mod queries;
pub mod ops;
pub mod cli;
