//! `shopdesk-core` — catalog domain building blocks.
//!
//! Pure domain primitives shared by the catalog crates (no IO, no UI).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{CategoryId, ProductId, SessionId};
pub use value_object::ValueObject;
