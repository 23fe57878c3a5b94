//! REST API Tests

mod address_tests;
mod customer_tests;
mod dish_tests;
mod health_tests;
