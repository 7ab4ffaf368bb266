//! Domain types and rules shared by the Akira backend crates.
//!
//! Nothing in here touches the network or the database: the `db`, `api`
//! and client crates build on these definitions.

pub mod chapter;
pub mod error;
pub mod manga;
pub mod settings;
pub mod types;
