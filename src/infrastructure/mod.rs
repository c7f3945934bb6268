pub mod error;
pub mod logging;
pub mod network;

pub use error::{ExportError, Result};
pub use logging::{setup_logging, LoggingConfig};
pub use network::{build_client, NetworkConfig};
