//! Data backends for Dexter.
//!
//! [`DataBackend`] is the single capability every caller programs against.
//! [`MockBackend`] serves the seed dataset with simulated latency and
//! injected faults; [`HttpBackend`] forwards to the REST API. Which one runs
//! is decided once by [`backend_from_config`].

pub mod backend;
pub mod board;
pub mod endpoint;
pub mod http;
pub mod mock;
pub mod session;
pub mod transport;

pub use backend::DataBackend;
pub use board::{AlertBoard, ReportShelf};
pub use endpoint::Endpoint;
pub use http::{HttpBackend, HttpSetupError};
pub use mock::{MockBackend, MOCK_TOKEN};
pub use session::{SessionContext, SessionError};
pub use transport::{backend_from_config, BackendError};
