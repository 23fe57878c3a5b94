//! # Domain Layer
//!
//! The domain layer contains the restaurant's business entities and the
//! data access contracts the application layer is written against.
//!
//! ## Structure
//!
//! - **entities**: Dish, Customer and Address with their repository traits
//! - **unit_of_work**: Sessions grouping repository calls into transactions
//!
//! No dependencies on infrastructure or presentation layers.

pub mod entities;
pub mod unit_of_work;

// Re-export commonly used types
pub use entities::*;
pub use unit_of_work::{Session, UnitOfWork};
