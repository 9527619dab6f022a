//! Static configuration for the decoder and its host harness.
//!
//! Everything here is process-wide and read-only. The CLI reads the
//! environment variables listed in [`env_vars`]; the decoder itself never
//! consults the environment.

/// Device descriptor of the gateway model this decoder is written for.
pub mod device {
    /// Display name reported for every decoded message.
    pub const NAME: &str = "英飞拓智能网关";
    /// Gateway model identifier.
    pub const TYPE: &str = "V2831";
}

/// Topic patterns in evaluation order. Each has exactly one capture group
/// holding the device serial number.
pub mod topics {
    pub const ENVIRONMENT: &str = "data/(.+)/environment";
    pub const LOCK_STATUS: &str = "status/(.+)/lock";
    pub const POWER_USAGE: &str = "data/(.+)/power";
    pub const POWER_ALARM: &str = "alarm/(.+)/power";
    pub const SCREEN_ALARM: &str = "alarm/(.+)/screen";
}

/// Metadata keys supplied by the host platform.
pub mod metadata {
    /// Routing key the message was published on.
    pub const TOPIC_NAME: &str = "topicName";
}

/// Environment variable names.
pub mod env_vars {
    pub const LOG_JSON: &str = "UPLINK_LOG_JSON";
    pub const REPLAY_ITERATIONS: &str = "UPLINK_REPLAY_ITERATIONS";
    pub const REPLAY_WORKERS: &str = "UPLINK_REPLAY_WORKERS";
}

/// Replay harness defaults.
pub mod replay {
    /// Default number of passes over the message file.
    pub const DEFAULT_ITERATIONS: usize = 1;
    /// Default number of concurrent decode workers.
    pub const DEFAULT_WORKERS: usize = 4;
    /// Upper bound on workers, whatever the caller asks for.
    pub const MAX_WORKERS: usize = 64;
}

/// Replay settings overridable from the environment.
pub mod replay_env_vars {
    use super::{env_vars, replay};

    /// Iterations from the environment, or the default.
    pub fn iterations() -> usize {
        std::env::var(env_vars::REPLAY_ITERATIONS)
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|n: &usize| *n > 0)
            .unwrap_or(replay::DEFAULT_ITERATIONS)
    }

    /// Worker count from the environment, or the default.
    pub fn workers() -> usize {
        std::env::var(env_vars::REPLAY_WORKERS)
            .ok()
            .and_then(|s| s.parse().ok())
            .map(clamp_workers)
            .unwrap_or(replay::DEFAULT_WORKERS)
    }

    /// Clamp a requested worker count into `1..=MAX_WORKERS`.
    pub fn clamp_workers(requested: usize) -> usize {
        requested.clamp(1, replay::MAX_WORKERS)
    }
}

/// Whether JSON log output was requested.
pub fn log_json() -> bool {
    std::env::var(env_vars::LOG_JSON)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false)
}
