//! Bring-up error types

/// Why [`crate::Gamepad`] did not start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    /// `initialize()` was already called successfully. Calling it twice
    /// would start a second sampling task.
    AlreadyInitialized,
    /// I2C driver could not be installed
    Bus,
    /// A direct button pin could not be configured as input
    Pin,
    /// The sampling task could not be created
    Task,
}

impl InitError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::AlreadyInitialized => "gamepad already initialized",
            Self::Bus => "I2C bus bring-up failed",
            Self::Pin => "button pin configuration failed",
            Self::Task => "sampling task creation failed",
        }
    }
}

impl core::fmt::Display for InitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

/// A [`crate::TaskSpawner`] could not create the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnError;

impl core::fmt::Display for SpawnError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("task spawn failed")
    }
}

impl From<SpawnError> for InitError {
    fn from(_: SpawnError) -> Self {
        InitError::Task
    }
}
