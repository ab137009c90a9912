//! Simulation requests, request types and their status lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{EngineKey, SimulationParameters};

/// Kind of hospital request an operator submits.
///
/// Each type maps to exactly one engine.
///
/// | Type | Engine |
/// |------|--------|
/// | `clinic`, `emergency`, `routine` | Queueing (A) |
/// | `bed` | Priority bed allocator (B) |
/// | `or`, `surgery` | OR scheduling (C) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestType {
    Clinic,
    Emergency,
    Routine,
    Bed,
    Or,
    Surgery,
}

impl RequestType {
    /// Engine that answers this request type.
    pub fn engine(&self) -> EngineKey {
        match self {
            RequestType::Clinic | RequestType::Emergency | RequestType::Routine => {
                EngineKey::Queueing
            }
            RequestType::Bed => EngineKey::PriorityBeds,
            RequestType::Or | RequestType::Surgery => EngineKey::OrScheduling,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::Clinic => "clinic",
            RequestType::Emergency => "emergency",
            RequestType::Routine => "routine",
            RequestType::Bed => "bed",
            RequestType::Or => "or",
            RequestType::Surgery => "surgery",
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a request type string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRequestType(pub String);

impl fmt::Display for UnknownRequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown request type '{}'", self.0)
    }
}

impl std::error::Error for UnknownRequestType {}

impl FromStr for RequestType {
    type Err = UnknownRequestType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clinic" => Ok(RequestType::Clinic),
            "emergency" => Ok(RequestType::Emergency),
            "routine" => Ok(RequestType::Routine),
            "bed" => Ok(RequestType::Bed),
            "or" => Ok(RequestType::Or),
            "surgery" => Ok(RequestType::Surgery),
            _ => Err(UnknownRequestType(s.to_string())),
        }
    }
}

/// Processing status of a request.
///
/// `Pending → Processing → Completed | Failed`. Completed and failed are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl RequestStatus {
    /// Whether moving from `self` to `next` is a legal transition.
    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        matches!(
            (self, next),
            (RequestStatus::Pending, RequestStatus::Processing)
                | (RequestStatus::Processing, RequestStatus::Completed)
                | (RequestStatus::Processing, RequestStatus::Failed)
        )
    }

    /// Whether no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestStatus::Completed | RequestStatus::Failed)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Processing => "processing",
            RequestStatus::Completed => "completed",
            RequestStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// A request handed to the [`RequestProcessor`](crate::orchestrator::RequestProcessor).
///
/// `request_type` and `engine` are kept as raw strings: an unknown request
/// type falls back to running every engine, an unknown engine key fails
/// that engine only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    /// Caller-assigned identifier.
    pub id: String,
    /// Request type (`clinic`, `bed`, `or`, ...).
    #[serde(rename = "type", default)]
    pub request_type: Option<String>,
    /// Explicit engine override.
    #[serde(default)]
    pub engine: Option<String>,
    /// Current status.
    #[serde(default = "pending")]
    pub status: RequestStatus,
    /// Parameter record.
    #[serde(default)]
    pub parameters: SimulationParameters,
}

fn pending() -> RequestStatus {
    RequestStatus::Pending
}

impl SimulationRequest {
    /// Creates a pending request with empty parameters.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            request_type: None,
            engine: None,
            status: RequestStatus::Pending,
            parameters: SimulationParameters::new(),
        }
    }

    /// Sets the request type.
    pub fn with_type(mut self, request_type: impl Into<String>) -> Self {
        self.request_type = Some(request_type.into());
        self
    }

    /// Sets an explicit engine override.
    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = Some(engine.into());
        self
    }

    /// Sets the parameter record.
    pub fn with_parameters(mut self, parameters: SimulationParameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Parsed request type, if recognised.
    pub fn parsed_type(&self) -> Option<RequestType> {
        self.request_type.as_deref().and_then(|t| t.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_type_engine_mapping() {
        assert_eq!(RequestType::Clinic.engine(), EngineKey::Queueing);
        assert_eq!(RequestType::Emergency.engine(), EngineKey::Queueing);
        assert_eq!(RequestType::Routine.engine(), EngineKey::Queueing);
        assert_eq!(RequestType::Bed.engine(), EngineKey::PriorityBeds);
        assert_eq!(RequestType::Or.engine(), EngineKey::OrScheduling);
        assert_eq!(RequestType::Surgery.engine(), EngineKey::OrScheduling);
    }

    #[test]
    fn test_request_type_parse() {
        assert_eq!("OR".parse::<RequestType>().unwrap(), RequestType::Or);
        assert_eq!(" bed ".parse::<RequestType>().unwrap(), RequestType::Bed);
        assert!("pharmacy".parse::<RequestType>().is_err());
    }

    #[test]
    fn test_status_transitions() {
        use RequestStatus::*;
        assert!(Pending.can_transition_to(Processing));
        assert!(Processing.can_transition_to(Completed));
        assert!(Processing.can_transition_to(Failed));
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(Processing));
        assert!(!Failed.can_transition_to(Processing));
        assert!(Completed.is_terminal());
        assert!(!Processing.is_terminal());
    }

    #[test]
    fn test_request_deserialize_defaults() {
        let request: SimulationRequest = serde_json::from_value(json!({
            "id": "req-1",
            "type": "clinic",
            "parameters": {"doctors": 2}
        }))
        .unwrap();

        assert_eq!(request.status, RequestStatus::Pending);
        assert_eq!(request.parsed_type(), Some(RequestType::Clinic));
        assert_eq!(request.engine, None);
        assert_eq!(request.parameters.number("doctors"), Some(2.0));
    }
}
