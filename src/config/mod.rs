//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! NetLabConfig::default()  (fixed lab constants, no file is read)
//!     → validation.rs (semantic checks)
//!     → passed by value into each component that needs it
//! ```
//!
//! # Design Decisions
//! - There is no config file and no reload: the lab constants live in the
//!   `Default` impls and tests override fields directly
//! - Components receive their config slice explicitly at construction;
//!   nothing reads process-wide state
//! - Validation separates syntactic (serde) from semantic checks

pub mod schema;
pub mod validation;

pub use schema::DatagramConfig;
pub use schema::EchoConfig;
pub use schema::NetLabConfig;
pub use validation::{validate, ValidationError};
