//! InitiateCallHandler - asks the provider to dial a caller.

use std::sync::Arc;

use crate::domain::call::CallError;
use crate::domain::foundation::PhoneNumber;
use crate::ports::{OutboundCallResult, VoiceGateway};

/// Command to place an outbound call.
#[derive(Debug, Clone)]
pub struct InitiateCallCommand {
    /// Number to dial, with its international prefix.
    pub caller_number: String,
}

pub struct InitiateCallHandler {
    gateway: Arc<dyn VoiceGateway>,
}

impl InitiateCallHandler {
    pub fn new(gateway: Arc<dyn VoiceGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(&self, cmd: InitiateCallCommand) -> Result<OutboundCallResult, CallError> {
        let number = PhoneNumber::international(cmd.caller_number)?;

        let result = self.gateway.place_call(&number).await.map_err(|e| {
            tracing::error!(to = %number.masked(), error = %e, "Outbound call failed");
            CallError::telephony(e.to_string())
        })?;

        tracing::info!(to = %number.masked(), entries = result.entries.len(), "Outbound call requested");
        Ok(result)
    }
}
