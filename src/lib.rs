// Crate root library declaration and module exports.
pub mod cli;
pub mod config;
pub mod context;
pub mod controller;
pub mod error;
pub mod logging;
pub mod messages;
pub mod model;
pub mod repl;
pub mod storage;
pub mod store;
