//! Request processing against external collaborators.
//!
//! The processor drives one [`SimulationRequest`] through its status
//! lifecycle. Persistence and inventory live behind traits; the processor
//! only sequences the calls.
//!
//! # Flow
//!
//! 1. `pending → processing`
//! 2. Resolve the [`EnginePlan`] and run it
//! 3. Store every candidate (failures logged, tolerated)
//! 4. On total failure: `processing → failed`, return the error
//! 5. Adjust inventory by `max(1, patients_served)` of the winner when the
//!    request type is recognised (failures logged, tolerated)
//! 6. `processing → completed`

use tracing::{info, warn};

use super::{EnginePlan, Orchestrator};
use crate::error::{CollaboratorError, OrchestrationError, Result};
use crate::models::{Candidate, RequestStatus, RequestType, SimulationRequest};
use crate::selection::SelectionResult;

/// Persistence of request status and per-engine results.
pub trait ResultSink {
    /// Records a status change.
    fn update_status(
        &self,
        request_id: &str,
        status: RequestStatus,
    ) -> std::result::Result<(), CollaboratorError>;

    /// Stores one engine's candidate.
    fn store_result(
        &self,
        request_id: &str,
        candidate: &Candidate,
    ) -> std::result::Result<(), CollaboratorError>;
}

/// Stock adjustment after a successful run.
pub trait InventoryHook {
    /// Consumes `quantity` units of the stock tied to `request_type`.
    fn adjust(
        &self,
        request_id: &str,
        request_type: RequestType,
        quantity: u64,
    ) -> std::result::Result<(), CollaboratorError>;
}

/// Inventory hook that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInventory;

impl InventoryHook for NoInventory {
    fn adjust(
        &self,
        _request_id: &str,
        _request_type: RequestType,
        _quantity: u64,
    ) -> std::result::Result<(), CollaboratorError> {
        Ok(())
    }
}

/// Runs requests end to end.
#[derive(Debug, Clone)]
pub struct RequestProcessor<S, I = NoInventory> {
    orchestrator: Orchestrator,
    sink: S,
    inventory: I,
}

impl<S: ResultSink> RequestProcessor<S, NoInventory> {
    /// Processor with the default orchestrator and no inventory hook.
    pub fn new(sink: S) -> Self {
        Self {
            orchestrator: Orchestrator::new(),
            sink,
            inventory: NoInventory,
        }
    }
}

impl<S: ResultSink, I: InventoryHook> RequestProcessor<S, I> {
    /// Replaces the orchestrator.
    pub fn with_orchestrator(mut self, orchestrator: Orchestrator) -> Self {
        self.orchestrator = orchestrator;
        self
    }

    /// Attaches an inventory hook.
    pub fn with_inventory<J: InventoryHook>(self, inventory: J) -> RequestProcessor<S, J> {
        RequestProcessor {
            orchestrator: self.orchestrator,
            sink: self.sink,
            inventory,
        }
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn inventory(&self) -> &I {
        &self.inventory
    }

    /// Processes a pending request.
    ///
    /// `request.status` is updated in place.
    ///
    /// # Errors
    /// - [`OrchestrationError::InvalidTransition`] if the request is not pending
    /// - [`OrchestrationError::Collaborator`] if a status update fails
    /// - [`OrchestrationError::NoEngineProducedResult`] on total failure
    pub fn process(&self, request: &mut SimulationRequest) -> Result<SelectionResult> {
        self.transition(request, RequestStatus::Processing)?;

        let plan = EnginePlan::resolve(request, self.orchestrator.registry());
        let outcome = self.orchestrator.run_plan(&plan, &request.parameters);

        let result = match outcome {
            Ok(result) => result,
            Err(e) => {
                warn!(request_id = %request.id, error = %e, "request failed");
                self.transition(request, RequestStatus::Failed)?;
                return Err(e);
            }
        };

        for candidate in &result.all_results {
            if let Err(e) = self.sink.store_result(&request.id, candidate) {
                warn!(
                    request_id = %request.id,
                    engine = %candidate.key,
                    error = %e,
                    "failed to store engine result"
                );
            }
        }

        if let Some(request_type) = request.parsed_type() {
            let quantity = result.summary.patients_served.max(1);
            if let Err(e) = self.inventory.adjust(&request.id, request_type, quantity) {
                warn!(
                    request_id = %request.id,
                    request_type = %request_type,
                    quantity,
                    error = %e,
                    "inventory adjustment failed"
                );
            }
        }

        self.transition(request, RequestStatus::Completed)?;
        info!(
            request_id = %request.id,
            best = %result.best_engine_key,
            "request completed"
        );
        Ok(result)
    }

    fn transition(&self, request: &mut SimulationRequest, next: RequestStatus) -> Result<()> {
        if !request.status.can_transition_to(next) {
            return Err(OrchestrationError::InvalidTransition {
                request_id: request.id.clone(),
                from: request.status,
                to: next,
            });
        }
        self.sink.update_status(&request.id, next)?;
        request.status = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EngineKey, SimulationParameters};
    use serde_json::json;
    use std::cell::RefCell;

    #[derive(Debug, Default)]
    struct MemorySink {
        statuses: RefCell<Vec<RequestStatus>>,
        stored: RefCell<Vec<EngineKey>>,
        reject_results: bool,
    }

    impl ResultSink for MemorySink {
        fn update_status(
            &self,
            _request_id: &str,
            status: RequestStatus,
        ) -> std::result::Result<(), CollaboratorError> {
            self.statuses.borrow_mut().push(status);
            Ok(())
        }

        fn store_result(
            &self,
            _request_id: &str,
            candidate: &Candidate,
        ) -> std::result::Result<(), CollaboratorError> {
            if self.reject_results {
                return Err(CollaboratorError::new("storage", "table unavailable"));
            }
            self.stored.borrow_mut().push(candidate.key);
            Ok(())
        }
    }

    #[derive(Debug, Default)]
    struct MemoryInventory {
        adjustments: RefCell<Vec<(RequestType, u64)>>,
        fail: bool,
    }

    impl InventoryHook for MemoryInventory {
        fn adjust(
            &self,
            _request_id: &str,
            request_type: RequestType,
            quantity: u64,
        ) -> std::result::Result<(), CollaboratorError> {
            if self.fail {
                return Err(CollaboratorError::new("inventory", "out of stock"));
            }
            self.adjustments.borrow_mut().push((request_type, quantity));
            Ok(())
        }
    }

    fn clinic_request(id: &str) -> SimulationRequest {
        SimulationRequest::new(id).with_type("clinic").with_parameters(
            SimulationParameters::new()
                .with("clinicPatientsPerHour", 6)
                .with("avgServiceMinutes", 15)
                .with("doctors", 3)
                .with("beds", 10)
                .with("durationHours", 4),
        )
    }

    #[test]
    fn test_successful_request() {
        let processor =
            RequestProcessor::new(MemorySink::default()).with_inventory(MemoryInventory::default());
        let mut request = clinic_request("r1");

        let result = processor.process(&mut request).unwrap();

        assert_eq!(result.best_engine_key, EngineKey::Queueing);
        assert_eq!(request.status, RequestStatus::Completed);
        assert_eq!(
            *processor.sink().statuses.borrow(),
            vec![RequestStatus::Processing, RequestStatus::Completed]
        );
        assert_eq!(*processor.sink().stored.borrow(), vec![EngineKey::Queueing]);
        assert_eq!(
            *processor.inventory().adjustments.borrow(),
            vec![(RequestType::Clinic, 24)]
        );
    }

    #[test]
    fn test_untyped_request_runs_all_engines_without_inventory() {
        let processor =
            RequestProcessor::new(MemorySink::default()).with_inventory(MemoryInventory::default());
        let mut request = SimulationRequest::new("r2");

        let result = processor.process(&mut request).unwrap();

        assert_eq!(result.all_results.len(), 3);
        assert_eq!(processor.sink().stored.borrow().len(), 3);
        assert!(processor.inventory().adjustments.borrow().is_empty());
    }

    #[test]
    fn test_inventory_quantity_at_least_one() {
        let processor =
            RequestProcessor::new(MemorySink::default()).with_inventory(MemoryInventory::default());
        let mut request = SimulationRequest::new("r3").with_type("bed");

        let result = processor.process(&mut request).unwrap();

        assert_eq!(result.summary.patients_served, 0);
        assert_eq!(
            *processor.inventory().adjustments.borrow(),
            vec![(RequestType::Bed, 1)]
        );
    }

    #[test]
    fn test_total_failure_marks_failed() {
        let processor = RequestProcessor::new(MemorySink::default());
        let mut request = SimulationRequest::new("r4")
            .with_parameters(SimulationParameters::from_value(json!([1, 2])));

        let err = processor.process(&mut request).unwrap_err();

        assert!(matches!(
            err,
            OrchestrationError::NoEngineProducedResult { attempted: 3, .. }
        ));
        assert_eq!(request.status, RequestStatus::Failed);
        assert_eq!(
            *processor.sink().statuses.borrow(),
            vec![RequestStatus::Processing, RequestStatus::Failed]
        );
        assert!(processor.sink().stored.borrow().is_empty());
    }

    #[test]
    fn test_collaborator_failures_are_tolerated() {
        let sink = MemorySink {
            reject_results: true,
            ..Default::default()
        };
        let inventory = MemoryInventory {
            fail: true,
            ..Default::default()
        };
        let processor = RequestProcessor::new(sink).with_inventory(inventory);
        let mut request = clinic_request("r5");

        assert!(processor.process(&mut request).is_ok());
        assert_eq!(request.status, RequestStatus::Completed);
    }

    #[test]
    fn test_rejects_non_pending_request() {
        let processor = RequestProcessor::new(MemorySink::default());
        let mut request = clinic_request("r6");
        processor.process(&mut request).unwrap();

        let err = processor.process(&mut request).unwrap_err();
        assert!(matches!(
            err,
            OrchestrationError::InvalidTransition {
                from: RequestStatus::Completed,
                to: RequestStatus::Processing,
                ..
            }
        ));
    }

    #[test]
    fn test_parallel_orchestrator() {
        let processor = RequestProcessor::new(MemorySink::default())
            .with_orchestrator(Orchestrator::new().with_threads(2));
        let mut request = SimulationRequest::new("r7").with_type("unknown");
        let result = processor.process(&mut request).unwrap();
        assert_eq!(result.all_results.len(), 3);
    }
}
