pub mod auth;
pub mod cpf;
pub mod db;
pub mod directory;
pub mod error;
pub mod ipc;
pub mod ledger;
pub mod stats;
pub mod subjects;
