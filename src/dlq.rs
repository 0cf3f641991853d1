use crate::domain::{DeadLetterQueue, Error};

/// Dead letters go to the log; stdout is reserved for the report.
#[derive(Default, Debug)]
pub struct LogDLQ {}

impl DeadLetterQueue for LogDLQ {
    fn report(&self, error: &Error) {
        tracing::error!(%error, "DLQ report");
    }
}
