pub mod clock;
pub mod error;
pub mod instance;
pub mod outcome;
pub mod session_log;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Severity, TaskError};
pub use instance::{FilterTerm, InstanceRef, InstanceState};
pub use outcome::BatchOutcome;
pub use session_log::{SessionLog, IDLE_DESTINATION};

pub mod telemetry;
