//! Network messages - communication between App and Network layers

use crate::models::{RequestDescriptor, ResponseOutcome};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Execute a composed request
    Execute { id: u64, request: RequestDescriptor },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// The request ran to completion or transport failure
    Completed { id: u64, outcome: ResponseOutcome },
}
