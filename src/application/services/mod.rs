//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **DishService**: Batch create/update/delete of menu dishes
//! - **CustomerService**: Customer accounts and profiles
//! - **AddressService**: Customer delivery addresses

pub mod address_service;
pub mod customer_service;
pub mod dish_service;

pub use address_service::{AddressError, AddressService, AddressServiceImpl};
pub use customer_service::{CustomerError, CustomerService, CustomerServiceImpl};
pub use dish_service::{DishError, DishService, DishServiceImpl};
