//! Integration tests for the queue flow.
//!
//! These tests wire the full application stack (handlers, in-memory
//! ledger/allocator/directory, and the in-process event bus) and verify
//! the system's observable properties:
//! 1. Positions are unique per queue even under concurrent enqueues
//! 2. Reads return serving order; the current position tracks the smallest
//!    waiting entry
//! 3. The pending flag never reverts
//! 4. Deletion is idempotent and never renumbers survivors
//! 5. Mutations on one queue never leak into another
//! 6. Failed mutations broadcast nothing

use std::sync::Arc;

use clinic_queue::adapters::memory::{
    InMemoryPositionAllocator, InMemoryQueueLedger, InMemoryTicketDirectory,
};
use clinic_queue::adapters::InProcessEventBus;
use clinic_queue::application::handlers::queue::{
    CurrentPositionHandler, CurrentPositionQuery, EnqueuePatientCommand, EnqueuePatientHandler,
    ListQueueHandler, ListQueueQuery, MarkPendingCommand, MarkPendingHandler, QueueTotalHandler,
    QueueTotalQuery, RemoveEntryCommand, RemoveEntryHandler,
};
use clinic_queue::domain::foundation::{CommandMetadata, TicketId};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestApp {
    ledger: Arc<InMemoryQueueLedger>,
    tickets: Arc<InMemoryTicketDirectory>,
    bus: Arc<InProcessEventBus>,
    enqueue: EnqueuePatientHandler,
    list: ListQueueHandler,
    position: CurrentPositionHandler,
    total: QueueTotalHandler,
    remove: RemoveEntryHandler,
    call: MarkPendingHandler,
}

impl TestApp {
    fn new() -> Self {
        let ledger = Arc::new(InMemoryQueueLedger::new());
        let allocator = Arc::new(InMemoryPositionAllocator::new());
        let tickets = Arc::new(InMemoryTicketDirectory::new());
        let bus = Arc::new(InProcessEventBus::new());

        Self {
            enqueue: EnqueuePatientHandler::new(
                ledger.clone(),
                allocator,
                tickets.clone(),
                bus.clone(),
            ),
            list: ListQueueHandler::new(ledger.clone(), tickets.clone()),
            position: CurrentPositionHandler::new(ledger.clone()),
            total: QueueTotalHandler::new(ledger.clone()),
            remove: RemoveEntryHandler::new(ledger.clone(), bus.clone()),
            call: MarkPendingHandler::new(ledger.clone(), bus.clone()),
            ledger,
            tickets,
            bus,
        }
    }

    async fn enqueue_named(&self, patient: &str, doctor_id: i64) -> u32 {
        let ticket_id = self.tickets.issue(patient);
        self.enqueue_ticket(ticket_id, doctor_id).await
    }

    async fn enqueue_ticket(&self, ticket_id: TicketId, doctor_id: i64) -> u32 {
        self.enqueue
            .handle(
                EnqueuePatientCommand {
                    doctor_id,
                    appointment_date: "2024-10-10".to_string(),
                    hospital_id: "H1".to_string(),
                    ticket_id,
                },
                CommandMetadata::new(),
            )
            .await
            .unwrap()
            .entry
            .position()
            .as_u32()
    }

    async fn list(&self, doctor_id: i64) -> Vec<(u32, bool)> {
        self.list
            .handle(ListQueueQuery {
                doctor_id,
                appointment_date: "2024-10-10".to_string(),
                hospital_id: "H1".to_string(),
            })
            .await
            .unwrap()
            .into_iter()
            .map(|v| (v.position.as_u32(), v.pending))
            .collect()
    }

    async fn current_position(&self, doctor_id: i64) -> Option<u32> {
        self.position
            .handle(CurrentPositionQuery {
                doctor_id,
                appointment_date: "2024-10-10".to_string(),
                hospital_id: "H1".to_string(),
            })
            .await
            .unwrap()
            .map(|p| p.as_u32())
    }

    async fn total(&self, doctor_id: i64) -> u64 {
        self.total
            .handle(QueueTotalQuery {
                doctor_id,
                appointment_date: "2024-10-10".to_string(),
                hospital_id: "H1".to_string(),
            })
            .await
            .unwrap()
    }

    async fn remove(&self, doctor_id: i64, position: u32) -> bool {
        self.remove
            .handle(
                RemoveEntryCommand {
                    doctor_id,
                    appointment_date: "2024-10-10".to_string(),
                    hospital_id: "H1".to_string(),
                    position,
                },
                CommandMetadata::new(),
            )
            .await
            .unwrap()
            .removed
    }

    async fn call(&self, doctor_id: i64, position: u32) -> bool {
        self.call
            .handle(
                MarkPendingCommand {
                    doctor_id,
                    appointment_date: "2024-10-10".to_string(),
                    hospital_id: "H1".to_string(),
                    position,
                },
                CommandMetadata::new(),
            )
            .await
            .unwrap()
            .called
    }
}

// =============================================================================
// Scenario walkthrough
// =============================================================================

#[tokio::test]
async fn three_patients_queue_in_arrival_order() {
    let app = TestApp::new();

    assert_eq!(app.enqueue_named("A", 5).await, 0);
    assert_eq!(app.enqueue_named("B", 5).await, 1);
    assert_eq!(app.enqueue_named("C", 5).await, 2);

    assert_eq!(app.list(5).await, vec![(0, false), (1, false), (2, false)]);
    assert_eq!(app.total(5).await, 3);
}

#[tokio::test]
async fn calling_the_front_advances_current_position() {
    let app = TestApp::new();
    app.enqueue_named("A", 5).await;
    app.enqueue_named("B", 5).await;

    assert_eq!(app.current_position(5).await, Some(0));

    assert!(app.call(5, 0).await);

    assert_eq!(app.current_position(5).await, Some(1));
}

#[tokio::test]
async fn deletion_leaves_a_gap_without_renumbering() {
    let app = TestApp::new();
    app.enqueue_named("A", 5).await;
    app.enqueue_named("B", 5).await;
    app.enqueue_named("C", 5).await;
    app.call(5, 0).await;

    assert!(app.remove(5, 1).await);

    assert_eq!(app.list(5).await, vec![(0, true), (2, false)]);
    assert_eq!(app.total(5).await, 2);
}

#[tokio::test]
async fn list_joins_ticket_data() {
    let app = TestApp::new();
    app.enqueue_named("A. Patient", 5).await;

    let views = app
        .list
        .handle(ListQueueQuery {
            doctor_id: 5,
            appointment_date: "2024-10-10".to_string(),
            hospital_id: "H1".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(
        views[0].ticket.as_ref().map(|t| t.patient_name.as_str()),
        Some("A. Patient")
    );
}

// =============================================================================
// P1: position uniqueness under concurrency
// =============================================================================

#[tokio::test]
async fn concurrent_enqueues_get_distinct_positions() {
    let app = Arc::new(TestApp::new());

    let mut tasks = Vec::new();
    for i in 0..40 {
        let app = app.clone();
        tasks.push(tokio::spawn(async move {
            let patient = format!("patient-{}", i);
            app.enqueue_named(&patient, 5).await
        }));
    }

    let mut positions = Vec::new();
    for task in tasks {
        positions.push(task.await.unwrap());
    }

    positions.sort_unstable();
    positions.dedup();
    assert_eq!(positions.len(), 40, "positions must be unique per key");
    assert_eq!(app.total(5).await, 40);
}

// =============================================================================
// P3: pending is monotonic
// =============================================================================

#[tokio::test]
async fn pending_never_reverts() {
    let app = TestApp::new();
    app.enqueue_named("A", 5).await;

    assert!(app.call(5, 0).await);
    // Repeat calls and unrelated mutations leave the flag set
    app.call(5, 0).await;
    app.enqueue_named("B", 5).await;
    app.remove(5, 1).await;

    assert_eq!(app.list(5).await, vec![(0, true)]);
}

// =============================================================================
// P4: idempotent deletion
// =============================================================================

#[tokio::test]
async fn double_remove_equals_single_remove() {
    let app = TestApp::new();
    app.enqueue_named("A", 5).await;

    assert!(app.remove(5, 0).await);
    assert!(!app.remove(5, 0).await);

    assert_eq!(app.total(5).await, 0);
}

#[tokio::test]
async fn removing_a_never_assigned_position_is_a_no_op() {
    let app = TestApp::new();
    app.enqueue_named("A", 5).await;

    assert!(!app.remove(5, 17).await);
    assert_eq!(app.total(5).await, 1);
}

// =============================================================================
// P5: isolation across keys
// =============================================================================

#[tokio::test]
async fn mutations_on_one_key_never_touch_another() {
    let app = TestApp::new();
    app.enqueue_named("A", 5).await;
    app.enqueue_named("B", 5).await;
    app.enqueue_named("X", 6).await;
    app.enqueue_named("Y", 6).await;

    app.call(5, 0).await;
    app.remove(5, 1).await;

    // Doctor 6's queue is untouched in length, positions, and flags
    assert_eq!(app.list(6).await, vec![(0, false), (1, false)]);
    assert_eq!(app.current_position(6).await, Some(0));

    // And each doctor's sequence started at 0 independently
    assert_eq!(app.list(5).await, vec![(0, true)]);
}

// =============================================================================
// P6: broadcast on success only
// =============================================================================

#[tokio::test]
async fn successful_mutations_broadcast_and_no_ops_do_not() {
    let app = TestApp::new();

    app.enqueue_named("A", 5).await;
    assert!(app.bus.has_event("queue.patient_queued"));
    assert!(app.bus.has_event("queue.ticket_issued"));

    app.bus.clear();
    app.call(5, 0).await;
    assert_eq!(app.bus.events_of_type("queue.entry_called").len(), 1);

    app.bus.clear();
    app.remove(5, 0).await;
    assert_eq!(app.bus.events_of_type("queue.entry_removed").len(), 1);

    // Idempotent misses change nothing and broadcast nothing
    app.bus.clear();
    app.remove(5, 0).await;
    app.call(5, 0).await;
    assert_eq!(app.bus.event_count(), 0);
}

#[tokio::test]
async fn failed_enqueue_broadcasts_nothing() {
    let app = TestApp::new();

    // Invalid key fails validation before any write
    let result = app
        .enqueue
        .handle(
            EnqueuePatientCommand {
                doctor_id: -1,
                appointment_date: "2024-10-10".to_string(),
                hospital_id: "H1".to_string(),
                ticket_id: TicketId::new(),
            },
            CommandMetadata::new(),
        )
        .await;

    assert!(result.is_err());
    assert_eq!(app.bus.event_count(), 0);
    assert!(app.ledger.all_entries().is_empty());
}
