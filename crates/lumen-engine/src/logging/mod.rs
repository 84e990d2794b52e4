//! Logger setup for hosts embedding the engine.
//!
//! The engine itself only talks to the `log` facade: registry construction logs
//! at `debug`, interpreter divergence at `trace`. Binaries call
//! [`init_logging`] once near the top of `main`.

mod init;

pub use init::{LoggingConfig, init_logging};
