//! Common error types used across the workspace.
//!
//! Each failure class gets its own typed error; [`HomeGraphError`] folds them
//! together via `#[from]` so engine entry points return a single error type
//! while callers can still match on the class. Message wording is part of the
//! public contract — callers surface these strings verbatim.

/// Top-level error returned by every engine entry point.
#[derive(Debug, thiserror::Error)]
pub enum HomeGraphError {
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Unsupported(#[from] UnsupportedCommandError),

    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Serialization of a response payload failed.
    #[error("failed to serialize response payload")]
    Serialization(#[from] serde_json::Error),
}

/// A referenced world-model object does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotFoundError {
    #[error("Device '{0}' not found.")]
    Device(String),

    #[error("Structure '{0}' not found.")]
    Structure(String),

    #[error("Room '{room}' in structure '{structure}' not found.")]
    Room { structure: String, room: String },
}

/// The device's traits do not include any trait supporting the command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Device '{device_id}' does not support command '{command}'.")]
pub struct UnsupportedCommandError {
    pub device_id: String,
    pub command: String,
}

/// Malformed request input: unknown command names, arity violations,
/// unparsable delay/duration strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInputError {
    #[error("Command '{0}' is not recognized.")]
    UnknownCommand(String),

    #[error("Invalid input: Command '{0}' requires values.")]
    RequiresValues(String),

    #[error("Invalid input: Command '{0}' does not support values.")]
    DoesNotSupportValues(String),

    #[error("Invalid input: {command} requires two values: {first} and {second}.")]
    RequiresTwoValues {
        command: String,
        first: &'static str,
        second: &'static str,
    },

    #[error("Invalid duration format: {0}")]
    InvalidDuration(String),

    #[error("At least one device id must be provided.")]
    NoDevices,
}

/// An operation-specific value constraint was violated, or a world-model
/// object failed its invariants.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Value for {command} must be between {min:.1} and {max:.1}")]
    FloatOutOfRange {
        command: &'static str,
        min: f64,
        max: f64,
    },

    #[error("Value for {command} must be between {min} and {max}")]
    IntOutOfRange {
        command: &'static str,
        min: i64,
        max: i64,
    },

    #[error("could not convert string to float: '{0}'")]
    FloatParse(String),

    #[error("could not convert string to int: '{0}'")]
    IntParse(String),

    #[error("Value for broadcast must be at least 1 character long.")]
    EmptyBroadcast,

    #[error(
        "Invalid light effect. Must be one of: sleep, wake, colorLoop, pulse. \
         Use 'set_mode' for other effects."
    )]
    UnknownLightEffect,

    #[error("Invalid input: duration must be a positive integer (seconds).")]
    NonPositiveDuration,

    #[error("Invalid temperature unit '{0}'. Must be 'C' or 'F'.")]
    UnknownTemperatureUnit(String),

    #[error("Invalid fan speed '{0}'. Must be low, medium, high, or an integer.")]
    UnknownFanSpeed(String),

    #[error("Invalid mode '{id}'. Must be one of {valid:?}.")]
    UnknownMode { id: String, valid: Vec<String> },

    #[error("Invalid setting '{id}' for mode '{mode}'. Must be one of {valid:?}.")]
    UnknownModeSetting {
        mode: String,
        id: String,
        valid: Vec<String>,
    },

    #[error("Invalid toggle '{id}'. Must be one of {valid:?}.")]
    UnknownToggle { id: String, valid: Vec<String> },

    #[error("Device id must not be empty.")]
    EmptyDeviceId,

    #[error("Device must have at least one name.")]
    EmptyDeviceNames,

    #[error("Device must have at least one type.")]
    EmptyDeviceTypes,

    #[error("Duplicate state entry '{0}'.")]
    DuplicateStateName(String),

    #[error("Device with ID '{0}' already exists.")]
    DuplicateDeviceId(String),

    #[error("Structure '{0}' already exists.")]
    DuplicateStructure(String),

    #[error("Room '{room}' already exists in structure '{structure}'.")]
    DuplicateRoom { structure: String, room: String },
}
