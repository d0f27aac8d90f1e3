//! Network reachability checks.

mod probe;

pub use probe::{DEFAULT_PROBE_ADDR, DEFAULT_PROBE_TIMEOUT, Probe, TcpProbe};
