use tracing::{debug, info};

use intent_classifier::{Classification, RobotCommand};

use crate::{CommandRequest, CommandSink, Mailbox, Result, RouterError, RouterMetrics};

/// Parses serialized command messages, holds at most one pending command, and
/// forwards validated requests to the execution boundary.
pub struct CommandRouter {
    pending: Mailbox<CommandRequest>,
    metrics: RouterMetrics,
}

impl CommandRouter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pending: Mailbox::new(),
            metrics: RouterMetrics::new()?,
        })
    }

    pub fn metrics(&self) -> &RouterMetrics {
        &self.metrics
    }

    /// Parse one `"<index>"` or `"<index>,<number-or-empty>"` message.
    ///
    /// `Ok(None)` is the permissive "malformed message, do nothing" outcome:
    /// wrong field count, or an index that does not parse or is out of the
    /// vocabulary range. A non-empty second field that is not an integer is an
    /// error for that message and is propagated.
    pub fn parse(&self, message: &str) -> Result<Option<CommandRequest>> {
        let fields: Vec<&str> = message.split(',').collect();
        if fields.len() > 2 {
            self.metrics.ignored_messages.inc();
            debug!("ignoring command message with {} fields", fields.len());
            return Ok(None);
        }
        let parameter = match fields.get(1) {
            Some(raw) if !raw.is_empty() => Some(
                raw.parse::<i64>()
                    .map_err(|_| RouterError::InvalidParameter((*raw).to_string()))?,
            ),
            _ => None,
        };
        let command = fields[0]
            .parse::<usize>()
            .ok()
            .and_then(RobotCommand::from_index);
        match command {
            Some(command) => Ok(Some(CommandRequest { command, parameter })),
            None => {
                self.metrics.ignored_messages.inc();
                debug!("ignoring command message with bad index {:?}", fields[0]);
                Ok(None)
            }
        }
    }

    /// Parse a message and hold the result as the pending command.
    pub fn deliver(&self, message: &str) -> Result<()> {
        if let Some(request) = self.parse(message)? {
            info!(
                "command {:?} pending (parameter {:?})",
                request.command, request.parameter
            );
            self.pending.post(request);
        }
        Ok(())
    }

    /// Forward the pending command, if any, to the sink. The slot is cleared
    /// first so a replayed forward dispatches nothing.
    pub fn forward(&self, sink: &mut dyn CommandSink) -> Option<CommandRequest> {
        let request = self.pending.take()?;
        sink.accept(request);
        self.metrics.dispatched_commands.inc();
        Some(request)
    }

    /// Classifier-result form: the command id is already validated, no
    /// re-validation needed.
    pub fn dispatch(
        &self,
        classification: Classification,
        parameter: Option<i64>,
        sink: &mut dyn CommandSink,
    ) -> CommandRequest {
        let request = CommandRequest::new(classification.command, parameter);
        sink.accept(request);
        self.metrics.dispatched_commands.inc();
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        accepted: Vec<CommandRequest>,
    }

    impl CommandSink for RecordingSink {
        fn accept(&mut self, request: CommandRequest) {
            self.accepted.push(request);
        }
    }

    #[test]
    fn parses_index_only() {
        let router = CommandRouter::new().unwrap();
        let request = router.parse("5").unwrap().unwrap();
        assert_eq!(request.command, RobotCommand::MoveUp);
        assert_eq!(request.parameter, None);
    }

    #[test]
    fn parses_index_with_parameter() {
        let router = CommandRouter::new().unwrap();
        let request = router.parse("5,3").unwrap().unwrap();
        assert_eq!(request.command, RobotCommand::MoveUp);
        assert_eq!(request.parameter, Some(3));
    }

    #[test]
    fn empty_parameter_field_means_none() {
        let router = CommandRouter::new().unwrap();
        let request = router.parse("5,").unwrap().unwrap();
        assert_eq!(request.command, RobotCommand::MoveUp);
        assert_eq!(request.parameter, None);
    }

    #[test]
    fn wrong_field_count_is_ignored() {
        let router = CommandRouter::new().unwrap();
        assert_eq!(router.parse("5,3,1").unwrap(), None);
        assert_eq!(router.metrics().ignored_messages.get(), 1);
    }

    #[test]
    fn out_of_range_index_is_ignored() {
        let router = CommandRouter::new().unwrap();
        assert_eq!(router.parse("99,3").unwrap(), None);
        assert_eq!(router.parse("39").unwrap(), None);
        assert_eq!(router.parse("-1").unwrap(), None);
        assert_eq!(router.parse("abc").unwrap(), None);
        assert_eq!(router.metrics().ignored_messages.get(), 4);
    }

    #[test]
    fn non_integer_parameter_is_an_error() {
        let router = CommandRouter::new().unwrap();
        let err = router.parse("5,fast").err().unwrap();
        assert!(matches!(err, RouterError::InvalidParameter(p) if p == "fast"));
    }

    #[test]
    fn forward_dispatches_exactly_once() {
        let router = CommandRouter::new().unwrap();
        let mut sink = RecordingSink::default();
        router.deliver("13").unwrap();
        assert!(router.forward(&mut sink).is_some());
        // Replay against the cleared slot dispatches nothing.
        assert!(router.forward(&mut sink).is_none());
        assert_eq!(sink.accepted.len(), 1);
        assert_eq!(sink.accepted[0].command, RobotCommand::OpenTool);
        assert_eq!(router.metrics().dispatched_commands.get(), 1);
    }

    #[test]
    fn ignored_messages_leave_no_pending_command() {
        let router = CommandRouter::new().unwrap();
        let mut sink = RecordingSink::default();
        router.deliver("1,2,3").unwrap();
        assert!(router.forward(&mut sink).is_none());
        assert!(sink.accepted.is_empty());
    }

    #[test]
    fn dispatch_passes_classifier_results_through() {
        let router = CommandRouter::new().unwrap();
        let mut sink = RecordingSink::default();
        let classification = Classification {
            command: RobotCommand::StepSize,
            score: 0.92,
        };
        let request = router.dispatch(classification, Some(50), &mut sink);
        assert_eq!(request.command, RobotCommand::StepSize);
        assert_eq!(request.parameter, Some(50));
        assert_eq!(sink.accepted, vec![request]);
    }
}
