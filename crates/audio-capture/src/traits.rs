use crate::Result;

/// A source of fixed-size audio chunks feeding the shared queue.
///
/// After `stop` returns, no further chunks will be enqueued. Chunks already
/// buffered at that point are the consumer's to discard.
pub trait CaptureSource {
    /// Begin continuous capture.
    fn start(&mut self) -> Result<()>;

    /// Halt capture. Must be safe to call more than once.
    fn stop(&mut self) -> Result<()>;
}

impl<T: CaptureSource + ?Sized> CaptureSource for Box<T> {
    fn start(&mut self) -> Result<()> {
        (**self).start()
    }

    fn stop(&mut self) -> Result<()> {
        (**self).stop()
    }
}
