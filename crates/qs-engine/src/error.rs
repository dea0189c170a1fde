use qs_core::{ProcessId, StorageId};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    /// Capacity 0 would make every `put` block with no possible `get` to
    /// unblock it — rejected at construction, not discovered mid-run.
    #[error("storage capacity must be at least 1")]
    ZeroCapacityStorage,

    #[error("unknown storage {0}")]
    UnknownStorage(StorageId),

    #[error("unknown process {0}")]
    UnknownProcess(ProcessId),

    #[error("process {0} has already been started")]
    AlreadyStarted(ProcessId),

    #[error("process {id} requested an invalid delay of {hours} h")]
    InvalidDelay { id: ProcessId, hours: f64 },
}

pub type EngineResult<T> = Result<T, EngineError>;
