//! # Domain Entities
//!
//! Core domain entities of the restaurant backend. All entities map
//! directly to their corresponding database tables.
//!
//! - **Dish**: A menu item
//! - **Customer**: A customer with embedded account details
//! - **Address**: A delivery address owned by a customer
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access
//! operations. These traits are implemented in the infrastructure layer.

mod address;
mod customer;
mod dish;

pub use address::{Address, AddressRepository};
pub use customer::{Account, Customer, CustomerRepository};
pub use dish::{Dish, DishRepository};
