//! command-router: validated hand-off between classified intents and the
//! robot execution boundary
//!
//! Accepts either a serialized `"<index>[,<number>]"` text message or a
//! classifier result directly; both terminate in the same validated
//! `CommandRequest`. Malformed messages are ignored permissively but counted,
//! never silently lost to observation.

mod types;
pub use types::CommandRequest;

mod error;
pub use error::{Result, RouterError};

mod mailbox;
pub use mailbox::Mailbox;

mod sink;
pub use sink::{CommandSink, LogSink};

mod metrics;
pub use metrics::RouterMetrics;

mod router;
pub use router::CommandRouter;
