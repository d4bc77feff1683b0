use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

use crate::{Result, RouterError};

/// Router counters. Malformed input is tolerated but never invisible.
#[derive(Clone)]
pub struct RouterMetrics {
    pub registry: Registry,
    pub ignored_messages: IntCounter,
    pub dispatched_commands: IntCounter,
}

impl RouterMetrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        let ignored_messages = IntCounter::new(
            "router_ignored_messages",
            "Command messages ignored as malformed or out of range",
        )
        .map_err(|e| RouterError::Metrics(e.to_string()))?;
        let dispatched_commands = IntCounter::new(
            "router_dispatched_commands",
            "Commands forwarded to the execution boundary",
        )
        .map_err(|e| RouterError::Metrics(e.to_string()))?;
        let _ = registry.register(Box::new(ignored_messages.clone()));
        let _ = registry.register(Box::new(dispatched_commands.clone()));
        Ok(Self {
            registry,
            ignored_messages,
            dispatched_commands,
        })
    }

    pub fn encode_text(&self) -> String {
        let mut buf = Vec::new();
        let encoder = TextEncoder::new();
        if let Err(e) = encoder.encode(&self.registry.gather(), &mut buf) {
            return format!("error encoding metrics: {e}");
        }
        String::from_utf8(buf).unwrap_or_default()
    }
}
