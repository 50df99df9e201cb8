//! In-memory implementations of the repository interfaces.
//!
//! These back the pipeline tests and local development without a database.
//! Ids are assigned from an atomic counter starting at 1 and `created_at`
//! is stamped at insert. Every adding repository carries a `reject_adds`
//! switch so tests can exercise insert failures. Like the Postgres
//! implementations they never deduplicate on legacy id: re-inserting the
//! same legacy record creates a second row.
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use legacy_migration_shared::types::{
    ClothingItem, Customer, Employee, Encounter, Event, FileId, NewClothingItem, NewCustomer,
    NewEmployee, NewEncounter, NewEvent, NewPayment, NewTip, Payment, Tip,
};

use crate::errors::{FileStoreError, RepositoryError};
use crate::interfaces::{
    ClothingRepository, CustomerRepository, EmployeeRepository, EncounterRepository,
    EventRepository, FileStore, PaymentRepository, StoredFile, TipRepository,
};

/// In-memory file store.
#[derive(Default)]
pub struct MemoryFileStore {
    files: RwLock<HashMap<FileId, StoredFile>>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files currently stored.
    pub fn len(&self) -> usize {
        self.files.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.read().unwrap().is_empty()
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn store(&self, filename: &str, data: Vec<u8>) -> Result<FileId, FileStoreError> {
        let id = Uuid::new_v4();
        self.files.write().unwrap().insert(
            id,
            StoredFile {
                id,
                filename: filename.to_string(),
                data,
            },
        );
        Ok(id)
    }

    async fn retrieve(&self, id: FileId) -> Result<Option<StoredFile>, FileStoreError> {
        Ok(self.files.read().unwrap().get(&id).cloned())
    }

    async fn delete(&self, id: FileId) -> Result<(), FileStoreError> {
        self.files.write().unwrap().remove(&id);
        Ok(())
    }
}

/// In-memory employee repository.
pub struct MemoryEmployeeRepository {
    rows: RwLock<Vec<Employee>>,
    next_id: AtomicI32,
    rejecting: AtomicBool,
    files: Arc<dyn FileStore>,
}

impl MemoryEmployeeRepository {
    pub fn new(files: Arc<dyn FileStore>) -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            next_id: AtomicI32::new(1),
            rejecting: AtomicBool::new(false),
            files,
        }
    }

    /// Make every following `add` fail, or stop doing so.
    pub fn reject_adds(&self, reject: bool) {
        self.rejecting.store(reject, Ordering::SeqCst);
    }
}

#[async_trait]
impl EmployeeRepository for MemoryEmployeeRepository {
    async fn find_all(&self) -> Result<Vec<Employee>, RepositoryError> {
        Ok(self.rows.read().unwrap().clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Employee>, RepositoryError> {
        Ok(self.rows.read().unwrap().iter().find(|e| e.id == id).cloned())
    }

    async fn find_by_legacy_id(
        &self,
        legacy_id: i32,
    ) -> Result<Option<Employee>, RepositoryError> {
        Ok(self
            .rows
            .read()
            .unwrap()
            .iter()
            .find(|e| e.legacy_id == Some(legacy_id))
            .cloned())
    }

    async fn add(&self, employee: &NewEmployee) -> Result<Employee, RepositoryError> {
        if self.rejecting.load(Ordering::SeqCst) {
            return Err(RepositoryError::unavailable("employee store rejects inserts"));
        }
        let row = Employee {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            legacy_id: employee.legacy_id,
            email: employee.email.clone(),
            name: employee.name.clone(),
            surname: employee.surname.clone(),
            birth_date: employee.birth_date.clone(),
            gender: employee.gender.clone(),
            work: employee.work.clone(),
            image_id: None,
            created_at: Utc::now(),
        };
        self.rows.write().unwrap().push(row.clone());
        Ok(row)
    }

    async fn attach_image(
        &self,
        id: i32,
        data: Vec<u8>,
        filename: &str,
    ) -> Result<FileId, RepositoryError> {
        let file_id = self.files.store(filename, data).await?;
        let mut rows = self.rows.write().unwrap();
        if let Some(row) = rows.iter_mut().find(|e| e.id == id) {
            row.image_id = Some(file_id);
        }
        Ok(file_id)
    }
}

/// In-memory customer repository.
pub struct MemoryCustomerRepository {
    rows: RwLock<Vec<Customer>>,
    next_id: AtomicI32,
    rejecting: AtomicBool,
    files: Arc<dyn FileStore>,
}

impl MemoryCustomerRepository {
    pub fn new(files: Arc<dyn FileStore>) -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            next_id: AtomicI32::new(1),
            rejecting: AtomicBool::new(false),
            files,
        }
    }

    /// Make every following `add` fail, or stop doing so.
    pub fn reject_adds(&self, reject: bool) {
        self.rejecting.store(reject, Ordering::SeqCst);
    }
}

#[async_trait]
impl CustomerRepository for MemoryCustomerRepository {
    async fn find_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        Ok(self.rows.read().unwrap().clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, RepositoryError> {
        Ok(self.rows.read().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_legacy_id(
        &self,
        legacy_id: i32,
    ) -> Result<Option<Customer>, RepositoryError> {
        Ok(self
            .rows
            .read()
            .unwrap()
            .iter()
            .find(|c| c.legacy_id == Some(legacy_id))
            .cloned())
    }

    async fn add(&self, customer: &NewCustomer) -> Result<Customer, RepositoryError> {
        if self.rejecting.load(Ordering::SeqCst) {
            return Err(RepositoryError::unavailable("customer store rejects inserts"));
        }
        let row = Customer {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            legacy_id: customer.legacy_id,
            email: customer.email.clone(),
            name: customer.name.clone(),
            surname: customer.surname.clone(),
            birth_date: customer.birth_date.clone(),
            gender: customer.gender.clone(),
            description: customer.description.clone(),
            astrological_sign: customer.astrological_sign.clone(),
            phone_number: customer.phone_number.clone(),
            address: customer.address.clone(),
            image_id: None,
            created_at: Utc::now(),
            employee_id: customer.employee_id,
        };
        self.rows.write().unwrap().push(row.clone());
        Ok(row)
    }

    async fn attach_image(
        &self,
        id: i32,
        data: Vec<u8>,
        filename: &str,
    ) -> Result<FileId, RepositoryError> {
        let file_id = self.files.store(filename, data).await?;
        let mut rows = self.rows.write().unwrap();
        if let Some(row) = rows.iter_mut().find(|c| c.id == id) {
            row.image_id = Some(file_id);
        }
        Ok(file_id)
    }
}

/// In-memory clothing item repository.
pub struct MemoryClothingRepository {
    rows: RwLock<Vec<ClothingItem>>,
    next_id: AtomicI32,
    rejecting: AtomicBool,
    files: Arc<dyn FileStore>,
}

impl MemoryClothingRepository {
    pub fn new(files: Arc<dyn FileStore>) -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            next_id: AtomicI32::new(1),
            rejecting: AtomicBool::new(false),
            files,
        }
    }

    /// Make every following `add` fail, or stop doing so.
    pub fn reject_adds(&self, reject: bool) {
        self.rejecting.store(reject, Ordering::SeqCst);
    }
}

#[async_trait]
impl ClothingRepository for MemoryClothingRepository {
    async fn find_all(&self) -> Result<Vec<ClothingItem>, RepositoryError> {
        Ok(self.rows.read().unwrap().clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ClothingItem>, RepositoryError> {
        Ok(self.rows.read().unwrap().iter().find(|i| i.id == id).cloned())
    }

    async fn add(&self, item: &NewClothingItem) -> Result<ClothingItem, RepositoryError> {
        if self.rejecting.load(Ordering::SeqCst) {
            return Err(RepositoryError::unavailable("clothing store rejects inserts"));
        }
        let row = ClothingItem {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            legacy_id: item.legacy_id,
            kind: item.kind.clone(),
            image_id: None,
            created_at: Utc::now(),
            customer_id: item.customer_id,
        };
        self.rows.write().unwrap().push(row.clone());
        Ok(row)
    }

    async fn attach_image(
        &self,
        id: i32,
        data: Vec<u8>,
        filename: &str,
    ) -> Result<FileId, RepositoryError> {
        let file_id = self.files.store(filename, data).await?;
        let mut rows = self.rows.write().unwrap();
        if let Some(row) = rows.iter_mut().find(|i| i.id == id) {
            row.image_id = Some(file_id);
        }
        Ok(file_id)
    }
}

/// In-memory payment repository.
pub struct MemoryPaymentRepository {
    rows: RwLock<Vec<Payment>>,
    next_id: AtomicI32,
    rejecting: AtomicBool,
}

impl MemoryPaymentRepository {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            next_id: AtomicI32::new(1),
            rejecting: AtomicBool::new(false),
        }
    }

    /// Make every following `add` fail, or stop doing so.
    pub fn reject_adds(&self, reject: bool) {
        self.rejecting.store(reject, Ordering::SeqCst);
    }
}

impl Default for MemoryPaymentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentRepository for MemoryPaymentRepository {
    async fn find_all(&self) -> Result<Vec<Payment>, RepositoryError> {
        Ok(self.rows.read().unwrap().clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Payment>, RepositoryError> {
        Ok(self.rows.read().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn add(&self, payment: &NewPayment) -> Result<Payment, RepositoryError> {
        if self.rejecting.load(Ordering::SeqCst) {
            return Err(RepositoryError::unavailable("payment store rejects inserts"));
        }
        let row = Payment {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            legacy_id: payment.legacy_id,
            date: payment.date.clone(),
            payment_method: payment.payment_method.clone(),
            amount: payment.amount,
            comment: payment.comment.clone(),
            created_at: Utc::now(),
            customer_id: payment.customer_id,
        };
        self.rows.write().unwrap().push(row.clone());
        Ok(row)
    }
}

/// In-memory encounter repository.
pub struct MemoryEncounterRepository {
    rows: RwLock<Vec<Encounter>>,
    next_id: AtomicI32,
    rejecting: AtomicBool,
}

impl MemoryEncounterRepository {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            next_id: AtomicI32::new(1),
            rejecting: AtomicBool::new(false),
        }
    }

    /// Make every following `add` fail, or stop doing so.
    pub fn reject_adds(&self, reject: bool) {
        self.rejecting.store(reject, Ordering::SeqCst);
    }
}

impl Default for MemoryEncounterRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EncounterRepository for MemoryEncounterRepository {
    async fn find_all(&self) -> Result<Vec<Encounter>, RepositoryError> {
        Ok(self.rows.read().unwrap().clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Encounter>, RepositoryError> {
        Ok(self.rows.read().unwrap().iter().find(|e| e.id == id).cloned())
    }

    async fn add(&self, encounter: &NewEncounter) -> Result<Encounter, RepositoryError> {
        if self.rejecting.load(Ordering::SeqCst) {
            return Err(RepositoryError::unavailable("encounter store rejects inserts"));
        }
        let row = Encounter {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            date: encounter.date.clone(),
            rating: encounter.rating,
            comment: encounter.comment.clone(),
            source: encounter.source.clone(),
            created_at: Utc::now(),
            customer_id: encounter.customer_id,
        };
        self.rows.write().unwrap().push(row.clone());
        Ok(row)
    }
}

/// In-memory event repository.
pub struct MemoryEventRepository {
    rows: RwLock<Vec<Event>>,
    next_id: AtomicI32,
    rejecting: AtomicBool,
}

impl MemoryEventRepository {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            next_id: AtomicI32::new(1),
            rejecting: AtomicBool::new(false),
        }
    }

    /// Make every following `add` fail, or stop doing so.
    pub fn reject_adds(&self, reject: bool) {
        self.rejecting.store(reject, Ordering::SeqCst);
    }
}

impl Default for MemoryEventRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventRepository for MemoryEventRepository {
    async fn find_all(&self) -> Result<Vec<Event>, RepositoryError> {
        Ok(self.rows.read().unwrap().clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Event>, RepositoryError> {
        Ok(self.rows.read().unwrap().iter().find(|e| e.id == id).cloned())
    }

    async fn add(&self, event: &NewEvent) -> Result<Event, RepositoryError> {
        if self.rejecting.load(Ordering::SeqCst) {
            return Err(RepositoryError::unavailable("event store rejects inserts"));
        }
        let row = Event {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: event.name.clone(),
            date: event.date.clone(),
            max_participants: event.max_participants,
            location_x: event.location_x.clone(),
            location_y: event.location_y.clone(),
            kind: event.kind.clone(),
            created_at: Utc::now(),
            employee_id: event.employee_id,
        };
        self.rows.write().unwrap().push(row.clone());
        Ok(row)
    }
}

/// In-memory tip repository.
pub struct MemoryTipRepository {
    rows: RwLock<Vec<Tip>>,
    next_id: AtomicI32,
    rejecting: AtomicBool,
}

impl MemoryTipRepository {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            next_id: AtomicI32::new(1),
            rejecting: AtomicBool::new(false),
        }
    }

    /// Make every following `add` fail, or stop doing so.
    pub fn reject_adds(&self, reject: bool) {
        self.rejecting.store(reject, Ordering::SeqCst);
    }
}

impl Default for MemoryTipRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TipRepository for MemoryTipRepository {
    async fn find_all(&self) -> Result<Vec<Tip>, RepositoryError> {
        Ok(self.rows.read().unwrap().clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Tip>, RepositoryError> {
        Ok(self.rows.read().unwrap().iter().find(|t| t.id == id).cloned())
    }

    async fn add(&self, tip: &NewTip) -> Result<Tip, RepositoryError> {
        if self.rejecting.load(Ordering::SeqCst) {
            return Err(RepositoryError::unavailable("tip store rejects inserts"));
        }
        let row = Tip {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            title: tip.title.clone(),
            tip: tip.tip.clone(),
            created_at: Utc::now(),
        };
        self.rows.write().unwrap().push(row.clone());
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_employee(legacy_id: i32) -> NewEmployee {
        NewEmployee {
            legacy_id: Some(legacy_id),
            email: format!("employee{legacy_id}@example.com"),
            name: "Test".to_string(),
            surname: "Employee".to_string(),
            birth_date: "1985-05-05".to_string(),
            gender: "Male".to_string(),
            work: "Coach".to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_assigns_sequential_ids() {
        let files = Arc::new(MemoryFileStore::new());
        let repo = MemoryEmployeeRepository::new(files);

        let first = repo.add(&new_employee(10)).await.unwrap();
        let second = repo.add(&new_employee(11)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_find_by_legacy_id() {
        let files = Arc::new(MemoryFileStore::new());
        let repo = MemoryEmployeeRepository::new(files);
        repo.add(&new_employee(10)).await.unwrap();

        let found = repo.find_by_legacy_id(10).await.unwrap();
        assert_eq!(found.map(|e| e.id), Some(1));

        let missing = repo.find_by_legacy_id(99).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_legacy_ids_create_separate_rows() {
        let files = Arc::new(MemoryFileStore::new());
        let repo = MemoryEmployeeRepository::new(files);

        repo.add(&new_employee(10)).await.unwrap();
        repo.add(&new_employee(10)).await.unwrap();

        let rows = repo.find_all().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_ne!(rows[0].id, rows[1].id);
        assert_eq!(rows[0].legacy_id, rows[1].legacy_id);
    }

    #[tokio::test]
    async fn test_attach_image_stores_file_and_links_row() {
        let files = Arc::new(MemoryFileStore::new());
        let repo = MemoryEmployeeRepository::new(files.clone());
        let stored = repo.add(&new_employee(10)).await.unwrap();

        let file_id = repo
            .attach_image(stored.id, vec![0xFF, 0xD8], "employee_1")
            .await
            .unwrap();

        let row = repo.find_by_id(stored.id).await.unwrap().unwrap();
        assert_eq!(row.image_id, Some(file_id));

        let file = files.retrieve(file_id).await.unwrap().unwrap();
        assert_eq!(file.filename, "employee_1");
        assert_eq!(file.data, vec![0xFF, 0xD8]);
    }

    #[tokio::test]
    async fn test_reject_adds_fails_inserts() {
        let files = Arc::new(MemoryFileStore::new());
        let repo = MemoryEmployeeRepository::new(files);
        repo.reject_adds(true);

        let result = repo.add(&new_employee(10)).await;
        assert!(matches!(result, Err(RepositoryError::Unavailable(_))));

        repo.reject_adds(false);
        assert!(repo.add(&new_employee(10)).await.is_ok());
    }

    #[tokio::test]
    async fn test_file_store_delete_removes_file() {
        let store = MemoryFileStore::new();
        let id = store.store("customer_1", vec![1, 2, 3]).await.unwrap();
        assert_eq!(store.len(), 1);

        store.delete(id).await.unwrap();
        assert!(store.is_empty());
        assert!(store.retrieve(id).await.unwrap().is_none());
    }
}
