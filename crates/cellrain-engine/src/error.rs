//! Error types for the Cellrain binary.

/// Top-level error for the Cellrain binary.
///
/// Wraps each subsystem error so `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading or validation failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: cellrain_core::config::ConfigError,
    },

    /// The automaton could not be built or a frame could not be sent.
    #[error("automaton error: {source}")]
    Automaton {
        /// The underlying automaton error.
        #[from]
        source: cellrain_core::AutomatonError,
    },

    /// The display could not be reached.
    #[error("display error: {source}")]
    Display {
        /// The underlying display error.
        #[from]
        source: cellrain_display::DisplayError,
    },
}
