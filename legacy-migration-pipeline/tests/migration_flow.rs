//! End to end migration tests.
//!
//! These tests run the real orchestrator and migrators against the
//! in-memory store and a mock legacy API, covering the failure tiers:
//! authentication failures abort the cycle, entity failures cost one pass,
//! record failures cost one record, image failures cost one asset.

use std::sync::Arc;
use std::time::Duration;

use legacy_api::MockLegacyApi;
use legacy_api::records::{
    LegacyClothingItem, LegacyCustomer, LegacyEmployee, LegacyEncounter, LegacyEvent,
    LegacyPayment, LegacyTip,
};
use legacy_migration_pipeline::errors::OrchestratorError;
use legacy_migration_pipeline::migrators::{
    CustomersMigrator, EmployeesMigrator, EncountersMigrator, EntityKind, EntityMigrator,
    EventsMigrator, MigrationSummary, TipsMigrator,
};
use legacy_migration_pipeline::orchestrator::{CycleReport, Orchestrator, OrchestratorConfig};
use legacy_migration_pipeline::progress::RecordingProgress;
use legacy_migration_repository::memory::{
    MemoryClothingRepository, MemoryCustomerRepository, MemoryEmployeeRepository,
    MemoryEncounterRepository, MemoryEventRepository, MemoryFileStore, MemoryPaymentRepository,
    MemoryTipRepository,
};
use legacy_migration_repository::{
    ClothingRepository, CustomerRepository, EmployeeRepository, EncounterRepository,
    EventRepository, FileStore, PaymentRepository, TipRepository,
};

// Mock API plus in-memory stores wired the way the binary wires them.
struct Fixture {
    api: Arc<MockLegacyApi>,
    files: Arc<MemoryFileStore>,
    employees: Arc<MemoryEmployeeRepository>,
    customers: Arc<MemoryCustomerRepository>,
    clothing: Arc<MemoryClothingRepository>,
    payments: Arc<MemoryPaymentRepository>,
    encounters: Arc<MemoryEncounterRepository>,
    events: Arc<MemoryEventRepository>,
    tips: Arc<MemoryTipRepository>,
    progress: Arc<RecordingProgress>,
}

impl Fixture {
    fn new() -> Self {
        let files = Arc::new(MemoryFileStore::new());
        Self {
            api: Arc::new(MockLegacyApi::new()),
            employees: Arc::new(MemoryEmployeeRepository::new(files.clone())),
            customers: Arc::new(MemoryCustomerRepository::new(files.clone())),
            clothing: Arc::new(MemoryClothingRepository::new(files.clone())),
            payments: Arc::new(MemoryPaymentRepository::new()),
            encounters: Arc::new(MemoryEncounterRepository::new()),
            events: Arc::new(MemoryEventRepository::new()),
            tips: Arc::new(MemoryTipRepository::new()),
            progress: Arc::new(RecordingProgress::new()),
            files,
        }
    }

    /// Builds the production plan: employees, customers, encounters, tips,
    /// events. Pacing is zeroed so tests run instantly.
    fn orchestrator(&self) -> Orchestrator {
        let migrators: Vec<Box<dyn EntityMigrator>> = vec![
            Box::new(EmployeesMigrator::new(
                self.api.clone(),
                self.employees.clone(),
                self.progress.clone(),
            )),
            Box::new(CustomersMigrator::new(
                self.api.clone(),
                self.customers.clone(),
                self.clothing.clone(),
                self.payments.clone(),
                self.progress.clone(),
            )),
            Box::new(EncountersMigrator::new(
                self.api.clone(),
                self.encounters.clone(),
                self.customers.clone(),
                self.progress.clone(),
            )),
            Box::new(TipsMigrator::new(
                self.api.clone(),
                self.tips.clone(),
                self.progress.clone(),
            )),
            Box::new(EventsMigrator::new(
                self.api.clone(),
                self.events.clone(),
                self.employees.clone(),
                self.progress.clone(),
            )),
        ];

        Orchestrator::with_config(
            self.api.clone(),
            migrators,
            OrchestratorConfig {
                pacing: Duration::ZERO,
            },
        )
    }
}

fn employee(id: i32) -> LegacyEmployee {
    LegacyEmployee {
        id,
        email: format!("employee{id}@soul-connection.fr"),
        name: "Jean".to_string(),
        surname: format!("Employee{id}"),
        birth_date: "1990-03-01".to_string(),
        gender: "Male".to_string(),
        work: "Coach".to_string(),
    }
}

fn customer(id: i32) -> LegacyCustomer {
    LegacyCustomer {
        id,
        email: format!("customer{id}@example.com"),
        name: "Alice".to_string(),
        surname: format!("Customer{id}"),
        birth_date: "1993-11-20".to_string(),
        gender: "Female".to_string(),
        description: "Looking for someone who shares her love of hiking".to_string(),
        astrological_sign: "Scorpio".to_string(),
        phone_number: "+33 6 12 34 56 78".to_string(),
        address: "12 rue de la Paix, Paris".to_string(),
    }
}

fn clothing(id: i32, kind: &str) -> LegacyClothingItem {
    LegacyClothingItem {
        id,
        kind: kind.to_string(),
    }
}

fn payment(id: i32) -> LegacyPayment {
    LegacyPayment {
        id,
        date: "2024-06-01".to_string(),
        payment_method: "Credit Card".to_string(),
        amount: 34.99,
        comment: "monthly subscription".to_string(),
    }
}

fn encounter(customer_id: i32) -> LegacyEncounter {
    LegacyEncounter {
        date: "2024-06-03".to_string(),
        rating: 4,
        comment: "went well".to_string(),
        source: "dating app".to_string(),
        customer_id,
    }
}

fn event(employee_id: i32) -> LegacyEvent {
    LegacyEvent {
        name: "Speed dating night".to_string(),
        date: "2024-07-14".to_string(),
        max_participants: 20,
        location_x: "48.8566".to_string(),
        location_y: "2.3522".to_string(),
        kind: "speed dating".to_string(),
        employee_id,
    }
}

fn tip(title: &str) -> LegacyTip {
    LegacyTip {
        title: title.to_string(),
        tip: "Listen more than you talk.".to_string(),
    }
}

fn summary_for(report: &CycleReport, entity: EntityKind) -> MigrationSummary {
    report
        .outcomes
        .iter()
        .find(|outcome| outcome.entity == entity)
        .and_then(|outcome| outcome.result.as_ref().ok().copied())
        .expect("pass should have completed")
}

#[tokio::test]
async fn test_full_cycle_migrates_every_family() {
    let fixture = Fixture::new();
    fixture.api.register_employee(employee(10));
    fixture.api.register_employee_image(10, vec![0xFF, 0xD8, 0x01]);
    fixture.api.register_customer(customer(7));
    fixture.api.register_customer_image(7, vec![0xFF, 0xD8, 0x02]);
    fixture.api.register_clothing(7, clothing(3, "space suit"));
    fixture.api.register_clothing_image(3, vec![0xFF, 0xD8, 0x03]);
    fixture.api.register_payment(7, payment(21));
    fixture.api.register_encounter(5, encounter(7));
    fixture.api.register_event(8, event(10));
    fixture.api.register_tip(tip("Be curious"));

    let report = fixture.orchestrator().run_cycle().await.unwrap();

    assert!(report.all_completed());
    assert_eq!(report.migrated(), 5);

    let employees = fixture.employees.find_all().await.unwrap();
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].legacy_id, Some(10));
    assert!(employees[0].image_id.is_some());

    let customers = fixture.customers.find_all().await.unwrap();
    assert_eq!(customers.len(), 1);
    let stored_customer = &customers[0];
    assert_eq!(stored_customer.legacy_id, Some(7));
    assert!(stored_customer.image_id.is_some());

    let clothes = fixture.clothing.find_all().await.unwrap();
    assert_eq!(clothes.len(), 1);
    assert_eq!(clothes[0].customer_id, stored_customer.id);
    assert_eq!(clothes[0].kind, "space suit");
    assert!(clothes[0].image_id.is_some());

    let payments = fixture.payments.find_all().await.unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].customer_id, stored_customer.id);
    assert_eq!(payments[0].amount, 34.99);

    let encounters = fixture.encounters.find_all().await.unwrap();
    assert_eq!(encounters.len(), 1);
    assert_eq!(encounters[0].customer_id, stored_customer.id);

    let events = fixture.events.find_all().await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].employee_id, employees[0].id);

    assert_eq!(fixture.tips.find_all().await.unwrap().len(), 1);
    assert_eq!(fixture.files.len(), 3);
}

#[tokio::test]
async fn test_nested_records_follow_the_new_customer_id() {
    let fixture = Fixture::new();
    fixture.api.register_customer(customer(7));
    fixture.api.register_customer_image(7, vec![0x01]);
    fixture.api.register_clothing(7, clothing(3, "combat boots"));
    fixture.api.register_payment(7, payment(21));

    let report = fixture.orchestrator().run_cycle().await.unwrap();
    assert!(report.all_completed());

    let stored = fixture
        .customers
        .find_by_legacy_id(7)
        .await
        .unwrap()
        .unwrap();
    assert_ne!(stored.id, 7);

    // fetched under the legacy id, stored under the new one
    assert_eq!(fixture.api.requests_to("customers/7/image"), 1);
    assert_eq!(fixture.api.requests_to("customers/7/clothes"), 1);
    assert_eq!(fixture.api.requests_to("customers/7/payments_history"), 1);

    let clothes = fixture.clothing.find_all().await.unwrap();
    assert_eq!(clothes[0].customer_id, stored.id);
    let payments = fixture.payments.find_all().await.unwrap();
    assert_eq!(payments[0].customer_id, stored.id);

    let file = fixture
        .files
        .retrieve(stored.image_id.unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(file.filename, format!("customer_{}", stored.id));
}

#[tokio::test]
async fn test_authentication_failure_stops_the_cycle() {
    let fixture = Fixture::new();
    fixture.api.register_employee(employee(10));
    fixture.api.reject_login("wrong group token");

    let error = fixture.orchestrator().run_cycle().await.unwrap_err();

    assert!(matches!(error, OrchestratorError::Authentication(_)));
    assert_eq!(fixture.api.requests(), vec!["employees/login".to_string()]);
    assert!(fixture.employees.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_entity_failure_does_not_stop_later_passes() {
    let fixture = Fixture::new();
    fixture.api.fail_endpoint("employees");
    fixture.api.register_customer(customer(7));
    fixture.api.register_tip(tip("Ask questions"));

    let report = fixture.orchestrator().run_cycle().await.unwrap();

    assert!(!report.all_completed());
    let employees_outcome = report
        .outcomes
        .iter()
        .find(|outcome| outcome.entity == EntityKind::Employees)
        .unwrap();
    assert!(employees_outcome.result.is_err());

    assert_eq!(summary_for(&report, EntityKind::Customers).migrated, 1);
    assert_eq!(summary_for(&report, EntityKind::Tips).migrated, 1);
    assert_eq!(fixture.customers.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_record_failure_skips_only_that_record() {
    let fixture = Fixture::new();
    fixture.api.register_employee(employee(10));
    fixture.api.register_employee(employee(11));
    fixture.api.register_employee(employee(12));
    fixture.api.fail_endpoint("employees/11");

    let report = fixture.orchestrator().run_cycle().await.unwrap();

    assert!(report.all_completed());
    assert_eq!(
        summary_for(&report, EntityKind::Employees),
        MigrationSummary {
            total: 3,
            migrated: 2,
            skipped: 1,
        }
    );

    let rows = fixture.employees.find_all().await.unwrap();
    let legacy_ids: Vec<Option<i32>> = rows.iter().map(|row| row.legacy_id).collect();
    assert_eq!(legacy_ids, vec![Some(10), Some(12)]);
}

#[tokio::test]
async fn test_encounter_with_unknown_customer_is_skipped() {
    let fixture = Fixture::new();
    fixture.api.register_customer(customer(7));
    fixture.api.register_encounter(5, encounter(7));
    fixture.api.register_encounter(6, encounter(999));

    let report = fixture.orchestrator().run_cycle().await.unwrap();

    assert!(report.all_completed());
    assert_eq!(
        summary_for(&report, EntityKind::Encounters),
        MigrationSummary {
            total: 2,
            migrated: 1,
            skipped: 1,
        }
    );
    assert_eq!(fixture.encounters.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_event_with_unknown_host_is_skipped() {
    let fixture = Fixture::new();
    fixture.api.register_event(8, event(999));

    let report = fixture.orchestrator().run_cycle().await.unwrap();

    assert!(report.all_completed());
    assert_eq!(
        summary_for(&report, EntityKind::Events),
        MigrationSummary {
            total: 1,
            migrated: 0,
            skipped: 1,
        }
    );
    assert!(fixture.events.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_image_keeps_the_record() {
    let fixture = Fixture::new();
    fixture.api.register_employee(employee(10));

    let report = fixture.orchestrator().run_cycle().await.unwrap();

    assert_eq!(summary_for(&report, EntityKind::Employees).migrated, 1);
    let rows = fixture.employees.find_all().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].image_id.is_none());
    assert!(fixture.files.is_empty());
}

#[tokio::test]
async fn test_wardrobe_failure_keeps_the_customer() {
    let fixture = Fixture::new();
    fixture.api.register_customer(customer(7));
    fixture.api.register_payment(7, payment(21));
    fixture.api.fail_endpoint("customers/7/clothes");

    let report = fixture.orchestrator().run_cycle().await.unwrap();

    assert!(report.all_completed());
    assert_eq!(summary_for(&report, EntityKind::Customers).migrated, 1);
    assert_eq!(fixture.customers.find_all().await.unwrap().len(), 1);
    assert!(fixture.clothing.find_all().await.unwrap().is_empty());
    // payments still migrate after the wardrobe failed
    assert_eq!(fixture.payments.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_insert_failure_skips_records() {
    let fixture = Fixture::new();
    fixture.api.register_employee(employee(10));
    fixture.employees.reject_adds(true);

    let report = fixture.orchestrator().run_cycle().await.unwrap();

    assert!(report.all_completed());
    assert_eq!(
        summary_for(&report, EntityKind::Employees),
        MigrationSummary {
            total: 1,
            migrated: 0,
            skipped: 1,
        }
    );
    assert!(fixture.employees.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_rerunning_a_cycle_duplicates_rows() {
    let fixture = Fixture::new();
    fixture.api.register_employee(employee(10));
    let orchestrator = fixture.orchestrator();

    orchestrator.run_cycle().await.unwrap();
    orchestrator.run_cycle().await.unwrap();

    let rows = fixture.employees.find_all().await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_ne!(rows[0].id, rows[1].id);
    assert_eq!(rows[0].legacy_id, rows[1].legacy_id);
}

#[tokio::test]
async fn test_progress_is_reported_in_plan_order() {
    let fixture = Fixture::new();
    fixture.api.register_employee(employee(10));
    fixture.api.register_customer(customer(7));
    fixture.api.register_tip(tip("Smile"));

    fixture.orchestrator().run_cycle().await.unwrap();

    assert_eq!(
        fixture.progress.started_passes(),
        vec![
            "employees".to_string(),
            "customers".to_string(),
            "encounters".to_string(),
            "tips".to_string(),
            "events".to_string(),
        ]
    );
    assert_eq!(fixture.progress.increments_for("employees"), 1);
    assert_eq!(fixture.progress.increments_for("customers"), 1);
    assert_eq!(fixture.progress.increments_for("tips"), 1);
    assert_eq!(fixture.progress.increments_for("encounters"), 0);
}
