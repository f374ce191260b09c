pub mod dispatcher;
pub mod protocol;
pub mod session;
pub mod transport;

pub use dispatcher::{Heartbeat, SessionEvent};
pub use protocol::{InboundMsg, OutboundMsg, Step, StepErrorKind, StepKind};
pub use session::{run_session, UserCommand};
pub use transport::{InboundFrame, Transport, WsTransport};
