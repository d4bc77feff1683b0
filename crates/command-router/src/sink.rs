use tracing::info;

use crate::CommandRequest;

/// Outbound execution boundary. Dispatch is fire-and-forget; success and
/// failure reporting is the executor's own concern, outside this core.
pub trait CommandSink {
    fn accept(&mut self, request: CommandRequest);
}

impl<T: CommandSink + ?Sized> CommandSink for Box<T> {
    fn accept(&mut self, request: CommandRequest) {
        (**self).accept(request)
    }
}

/// Sink that logs each dispatched command, for binaries running without a
/// robot attached.
#[derive(Debug, Default)]
pub struct LogSink;

impl CommandSink for LogSink {
    fn accept(&mut self, request: CommandRequest) {
        match request.parameter {
            Some(parameter) => info!(
                "execute {:?} (id {}) with parameter {parameter}",
                request.command,
                request.command.index()
            ),
            None => info!(
                "execute {:?} (id {})",
                request.command,
                request.command.index()
            ),
        }
    }
}
