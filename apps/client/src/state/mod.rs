pub mod session_state;

pub use session_state::{PlayerId, SessionOutcome, SessionPhase, SessionState};
