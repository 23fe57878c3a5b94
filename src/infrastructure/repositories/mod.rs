//! Repository Implementations
//!
//! PostgreSQL implementations of the domain repository traits. Every
//! repository is implemented on [`PgSession`](crate::infrastructure::database::PgSession),
//! so queries run on whichever connection or transaction the session holds.
//!
//! - **DishRepository** - `dishes` table
//! - **CustomerRepository** - `customers` table, unique usernames
//! - **AddressRepository** - `addresses` table, cascades with its customer

mod address_repository;
mod customer_repository;
mod dish_repository;
