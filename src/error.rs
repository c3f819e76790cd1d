//! Error types for the zodiac clock.

/// Errors raised by the clock core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    /// A submitted override did not match the strict `HH:MM:SS` grammar.
    #[error("invalid time format: {input:?} (expected HH:MM:SS)")]
    InvalidTimeFormat {
        /// The rejected input, verbatim.
        input: String,
    },

    /// A timezone name is not one of the selectable zones.
    #[error("unknown timezone: {name}")]
    UnknownTimezone {
        /// The requested IANA name.
        name: String,
    },
}

/// Errors that end the windowed application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("event loop failure: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("pixel surface failure: {0}")]
    Surface(#[from] pixels::Error),

    #[error(transparent)]
    Clock(#[from] ClockError),
}
