//! Data Transfer Objects
//!
//! DTOs for API request/response serialization. Field names are camelCase
//! on the wire.

pub mod address;
pub mod customer;
pub mod dish;

pub use address::{
    AddressCreateRequest, AddressCreateResponse, AddressDeleteResponse, AddressResponse,
    AddressUpdateRequest, AddressUpdateResponse,
};
pub use customer::{
    AccountCreateRequest, AccountUpdateRequest, CustomerCreateRequest, CustomerCreateResponse,
    CustomerDeleteResponse, CustomerResponse, CustomerUpdateRequest, CustomerUpdateResponse,
};
pub use dish::{
    DishCreateRequest, DishCreateResponse, DishDeleteResponse, DishQueryParams, DishResponse,
    DishUpdateRequest, DishUpdateResponse,
};
