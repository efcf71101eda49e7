//! Process lifecycle.
//!
//! ```text
//! 1. Configuration loading (ServerConfig)
//!    ↓
//! 2. Container creation + module registration
//!    ↓
//! 3. Router construction (controllers injected)
//!    ↓
//! [Serving...]
//!    ↓
//! 4. Shutdown signal (SIGTERM/SIGINT) → in-flight requests drain
//! ```

mod shutdown;

pub use shutdown::shutdown_signal;
