//! In-Memory Storage
//!
//! A process-local implementation of the domain repositories, used by the
//! test suite and by the `memory` database backend for local runs.
//!
//! Autocommit sessions write straight into the shared tables. A
//! transactional session works on a snapshot taken at `begin` and copies
//! the rows it touched back into the shared tables on commit; dropping it
//! discards the snapshot. Username uniqueness and address ownership are
//! checked again at commit against the latest committed rows.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::entities::{
    Address, AddressRepository, Customer, CustomerRepository, Dish, DishRepository,
};
use crate::domain::unit_of_work::{Session, UnitOfWork};
use crate::shared::error::AppError;

#[derive(Debug, Clone, Default)]
struct Tables {
    dishes: BTreeMap<i64, Dish>,
    customers: BTreeMap<i64, Customer>,
    addresses: BTreeMap<i64, Address>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum RowKey {
    Dish(i64),
    Customer(i64),
    Address(i64),
}

impl Tables {
    fn apply(&mut self, from: &Tables, key: RowKey) {
        match key {
            RowKey::Dish(id) => match from.dishes.get(&id) {
                Some(row) => {
                    self.dishes.insert(id, row.clone());
                }
                None => {
                    self.dishes.remove(&id);
                }
            },
            RowKey::Customer(id) => match from.customers.get(&id) {
                Some(row) => {
                    self.customers.insert(id, row.clone());
                }
                None => {
                    self.customers.remove(&id);
                }
            },
            RowKey::Address(id) => match from.addresses.get(&id) {
                Some(row) => {
                    self.addresses.insert(id, row.clone());
                }
                None => {
                    self.addresses.remove(&id);
                }
            },
        }
    }

    /// Re-check cross-row constraints for rows a transaction touched, after
    /// its writes were merged with everything committed since it began.
    /// Deleted customers take their addresses with them.
    fn enforce_constraints(&mut self, touched: &BTreeSet<RowKey>) -> Result<(), AppError> {
        for key in touched {
            match *key {
                RowKey::Dish(_) => {}
                RowKey::Customer(id) => match self.customers.get(&id) {
                    Some(customer) => {
                        let username = &customer.account.username;
                        if self
                            .customers
                            .values()
                            .any(|c| c.id != id && &c.account.username == username)
                        {
                            return Err(AppError::Conflict(format!(
                                "Customer with username {} already exists",
                                username
                            )));
                        }
                    }
                    None => self.addresses.retain(|_, a| a.customer_id != id),
                },
                RowKey::Address(id) => {
                    if let Some(address) = self.addresses.get(&id) {
                        if !self.customers.contains_key(&address.customer_id) {
                            return Err(AppError::NotFound(format!(
                                "Customer with id {} does not exist",
                                address.customer_id
                            )));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

struct Snapshot {
    tables: Tables,
    touched: BTreeSet<RowKey>,
}

/// Shared in-memory database.
#[derive(Debug, Clone, Default)]
pub struct MemoryUnitOfWork {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryUnitOfWork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed dishes.
    pub fn dish_count(&self) -> usize {
        self.tables.lock().dishes.len()
    }

    /// Number of committed addresses.
    pub fn address_count(&self) -> usize {
        self.tables.lock().addresses.len()
    }
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    async fn begin(&self) -> Result<Box<dyn Session>, AppError> {
        let tables = self.tables.lock().clone();
        Ok(Box::new(MemorySession {
            shared: Arc::clone(&self.tables),
            snapshot: Some(Snapshot {
                tables,
                touched: BTreeSet::new(),
            }),
            committed: false,
        }))
    }

    async fn acquire(&self) -> Result<Box<dyn Session>, AppError> {
        Ok(Box::new(MemorySession {
            shared: Arc::clone(&self.tables),
            snapshot: None,
            committed: false,
        }))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Session over [`MemoryUnitOfWork`].
pub struct MemorySession {
    shared: Arc<Mutex<Tables>>,
    snapshot: Option<Snapshot>,
    committed: bool,
}

impl MemorySession {
    fn read<R>(&self, f: impl FnOnce(&Tables) -> R) -> Result<R, AppError> {
        self.check_open()?;
        Ok(match &self.snapshot {
            Some(snapshot) => f(&snapshot.tables),
            None => f(&*self.shared.lock()),
        })
    }

    /// Run a write against the session's view, recording the touched rows.
    fn write<R>(
        &mut self,
        f: impl FnOnce(&mut Tables) -> Result<(R, Vec<RowKey>), AppError>,
    ) -> Result<R, AppError> {
        self.check_open()?;
        match &mut self.snapshot {
            Some(snapshot) => {
                let (result, keys) = f(&mut snapshot.tables)?;
                snapshot.touched.extend(keys);
                Ok(result)
            }
            None => f(&mut *self.shared.lock()).map(|(result, _)| result),
        }
    }

    fn check_open(&self) -> Result<(), AppError> {
        if self.committed && self.snapshot.is_some() {
            return Err(AppError::Internal("session used after commit".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl Session for MemorySession {
    fn dishes(&mut self) -> &mut dyn DishRepository {
        self
    }

    fn customers(&mut self) -> &mut dyn CustomerRepository {
        self
    }

    fn addresses(&mut self) -> &mut dyn AddressRepository {
        self
    }

    async fn commit(&mut self) -> Result<(), AppError> {
        self.check_open()?;
        if let Some(snapshot) = &self.snapshot {
            let mut shared = self.shared.lock();
            let mut merged = shared.clone();
            for key in &snapshot.touched {
                merged.apply(&snapshot.tables, *key);
            }
            // Nothing is applied when a constraint fails
            merged.enforce_constraints(&snapshot.touched)?;
            *shared = merged;
        }
        self.committed = true;
        Ok(())
    }
}

#[async_trait]
impl DishRepository for MemorySession {
    async fn find_by_id(&mut self, id: i64) -> Result<Option<Dish>, AppError> {
        self.read(|t| t.dishes.get(&id).cloned())
    }

    async fn save(&mut self, dish: &Dish) -> Result<Dish, AppError> {
        self.write(|t| {
            t.dishes.insert(dish.id, dish.clone());
            Ok((dish.clone(), vec![RowKey::Dish(dish.id)]))
        })
    }

    async fn delete(&mut self, dish: &Dish) -> Result<(), AppError> {
        self.write(|t| match t.dishes.remove(&dish.id) {
            Some(_) => Ok(((), vec![RowKey::Dish(dish.id)])),
            None => Err(AppError::NotFound(format!(
                "Dish with id {} does not exist",
                dish.id
            ))),
        })
    }
}

#[async_trait]
impl CustomerRepository for MemorySession {
    async fn find_by_id(&mut self, id: i64) -> Result<Option<Customer>, AppError> {
        self.read(|t| t.customers.get(&id).cloned())
    }

    async fn find_by_username(&mut self, username: &str) -> Result<Option<Customer>, AppError> {
        self.read(|t| {
            t.customers
                .values()
                .find(|c| c.account.username == username)
                .cloned()
        })
    }

    async fn save(&mut self, customer: &Customer) -> Result<Customer, AppError> {
        self.write(|t| {
            let taken = t
                .customers
                .values()
                .any(|c| c.id != customer.id && c.account.username == customer.account.username);
            if taken {
                return Err(AppError::Conflict(format!(
                    "Customer with username {} already exists",
                    customer.account.username
                )));
            }
            t.customers.insert(customer.id, customer.clone());
            Ok((customer.clone(), vec![RowKey::Customer(customer.id)]))
        })
    }

    async fn delete(&mut self, customer: &Customer) -> Result<(), AppError> {
        self.write(|t| {
            if t.customers.remove(&customer.id).is_none() {
                return Err(AppError::NotFound(format!(
                    "Customer with id {} does not exist",
                    customer.id
                )));
            }

            let owned: Vec<i64> = t
                .addresses
                .values()
                .filter(|a| a.customer_id == customer.id)
                .map(|a| a.id)
                .collect();
            let mut keys = vec![RowKey::Customer(customer.id)];
            for id in owned {
                t.addresses.remove(&id);
                keys.push(RowKey::Address(id));
            }
            Ok(((), keys))
        })
    }
}

#[async_trait]
impl AddressRepository for MemorySession {
    async fn find_by_id(&mut self, id: i64) -> Result<Option<Address>, AppError> {
        self.read(|t| t.addresses.get(&id).cloned())
    }

    async fn find_by_customer_id(&mut self, customer_id: i64) -> Result<Vec<Address>, AppError> {
        self.read(|t| {
            t.addresses
                .values()
                .filter(|a| a.customer_id == customer_id)
                .cloned()
                .collect()
        })
    }

    async fn save(&mut self, address: &Address) -> Result<Address, AppError> {
        self.write(|t| {
            if !t.customers.contains_key(&address.customer_id) {
                return Err(AppError::NotFound(format!(
                    "Customer with id {} does not exist",
                    address.customer_id
                )));
            }
            t.addresses.insert(address.id, address.clone());
            Ok((address.clone(), vec![RowKey::Address(address.id)]))
        })
    }

    async fn delete(&mut self, address: &Address) -> Result<(), AppError> {
        self.write(|t| match t.addresses.remove(&address.id) {
            Some(_) => Ok(((), vec![RowKey::Address(address.id)])),
            None => Err(AppError::NotFound(format!(
                "Address with id {} does not exist",
                address.id
            ))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Account;
    use chrono::Utc;

    #[tokio::test]
    async fn test_uncommitted_transaction_is_discarded() {
        let db = MemoryUnitOfWork::new();
        {
            let mut session = db.begin().await.unwrap();
            session
                .dishes()
                .save(&Dish::new(1, "Pasta", "Tomato"))
                .await
                .unwrap();
        }
        assert_eq!(db.dish_count(), 0);
    }

    #[tokio::test]
    async fn test_committed_transaction_is_visible() {
        let db = MemoryUnitOfWork::new();
        let mut session = db.begin().await.unwrap();
        session
            .dishes()
            .save(&Dish::new(1, "Pasta", "Tomato"))
            .await
            .unwrap();
        assert_eq!(db.dish_count(), 0);

        session.commit().await.unwrap();
        assert_eq!(db.dish_count(), 1);
    }

    #[tokio::test]
    async fn test_autocommit_writes_immediately() {
        let db = MemoryUnitOfWork::new();
        let mut session = db.acquire().await.unwrap();
        session
            .dishes()
            .save(&Dish::new(1, "Pasta", "Tomato"))
            .await
            .unwrap();
        assert_eq!(db.dish_count(), 1);
    }

    #[tokio::test]
    async fn test_commit_only_applies_touched_rows() {
        let db = MemoryUnitOfWork::new();
        let mut tx = db.begin().await.unwrap();
        tx.dishes()
            .save(&Dish::new(1, "Pasta", "Tomato"))
            .await
            .unwrap();

        // Written by someone else while the transaction is open
        let mut other = db.acquire().await.unwrap();
        other
            .dishes()
            .save(&Dish::new(2, "Soup", "Onion"))
            .await
            .unwrap();

        tx.commit().await.unwrap();
        assert_eq!(db.dish_count(), 2);
    }

    fn customer(id: i64, username: &str) -> Customer {
        Customer {
            id,
            account: Account {
                username: username.into(),
                email: format!("{}@example.com", username),
                contact_number: None,
            },
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            created: Utc::now(),
            updated: None,
        }
    }

    fn address(id: i64, customer_id: i64) -> Address {
        Address {
            id,
            customer_id,
            province: "Western".into(),
            city: "Colombo".into(),
            street_name: "Galle Road".into(),
            building_number: "7".into(),
            created: Utc::now(),
            updated: None,
        }
    }

    #[tokio::test]
    async fn test_concurrent_transactions_cannot_share_username() {
        let db = MemoryUnitOfWork::new();
        let mut first = db.begin().await.unwrap();
        let mut second = db.begin().await.unwrap();
        first.customers().save(&customer(1, "dup")).await.unwrap();
        second.customers().save(&customer(2, "dup")).await.unwrap();

        first.commit().await.unwrap();
        let result = second.commit().await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
        let mut reader = db.acquire().await.unwrap();
        assert!(reader.customers().find_by_id(2).await.unwrap().is_none());
        assert_eq!(
            reader.customers().find_by_username("dup").await.unwrap().map(|c| c.id),
            Some(1)
        );
    }

    #[tokio::test]
    async fn test_address_commit_fails_after_customer_deleted() {
        let db = MemoryUnitOfWork::new();
        db.acquire()
            .await
            .unwrap()
            .customers()
            .save(&customer(1, "owner"))
            .await
            .unwrap();

        let mut adding = db.begin().await.unwrap();
        adding.addresses().save(&address(10, 1)).await.unwrap();

        let mut deleting = db.begin().await.unwrap();
        deleting.customers().delete(&customer(1, "owner")).await.unwrap();
        deleting.commit().await.unwrap();

        let result = adding.commit().await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(db.address_count(), 0);
    }

    #[tokio::test]
    async fn test_customer_delete_cascades_to_later_committed_addresses() {
        let db = MemoryUnitOfWork::new();
        db.acquire()
            .await
            .unwrap()
            .customers()
            .save(&customer(1, "owner"))
            .await
            .unwrap();

        let mut deleting = db.begin().await.unwrap();
        deleting.customers().delete(&customer(1, "owner")).await.unwrap();

        let mut adding = db.begin().await.unwrap();
        adding.addresses().save(&address(10, 1)).await.unwrap();
        adding.commit().await.unwrap();
        assert_eq!(db.address_count(), 1);

        deleting.commit().await.unwrap();
        assert_eq!(db.address_count(), 0);
    }

    #[tokio::test]
    async fn test_session_rejects_use_after_commit() {
        let db = MemoryUnitOfWork::new();
        let mut tx = db.begin().await.unwrap();
        tx.commit().await.unwrap();

        let result = tx.dishes().find_by_id(1).await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
