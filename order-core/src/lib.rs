//! Order pricing and checkout core
//!
//! The engines behind the storefront: cart store, bundle-promotion pricing,
//! the four-step checkout state machine, and the order assembler with its
//! notification/persistence dispatch. Catalog retrieval, message transport
//! and storage backends stay behind the collaborator traits in
//! [`orders::dispatch`].

pub mod cart;
pub mod checkout;
pub mod clock;
pub mod config;
pub mod logger;
pub mod money;
pub mod orders;
pub mod pricing;
pub mod session;

pub use session::OrderSession;
