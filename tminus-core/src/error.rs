//! Failures that end in the error hold

use core::fmt;

use tminus_protocol::{FrameError, JoinFailure};

use crate::config::ConfigError;
use crate::state::ErrorKind;
use crate::traits::{DisplayError, TimeSourceError};

/// Errors joining the network and time service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AssociationError {
    /// Configured network not in range
    NetworkNotFound,
    /// Network rejected the passphrase
    BadPassphrase,
    /// Time service rejected the account credentials
    ServiceRejected,
    /// Join failed for another reason
    Rejected,
    /// No answer within the join timeout
    Timeout,
    /// Link to the bridge carried a bad frame
    Link(FrameError),
    /// Link to the bridge failed to read or write
    Io,
}

impl From<JoinFailure> for AssociationError {
    fn from(reason: JoinFailure) -> Self {
        match reason {
            JoinFailure::NetworkNotFound => AssociationError::NetworkNotFound,
            JoinFailure::BadPassphrase => AssociationError::BadPassphrase,
            JoinFailure::ServiceRejected => AssociationError::ServiceRejected,
            JoinFailure::Other => AssociationError::Rejected,
        }
    }
}

impl From<FrameError> for AssociationError {
    fn from(e: FrameError) -> Self {
        AssociationError::Link(e)
    }
}

/// Any failure that sends the device into its error hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fault {
    TimeSource(TimeSourceError),
    Display(DisplayError),
    Config(ConfigError),
    Association(AssociationError),
}

impl Fault {
    /// Failure class for the render state machine
    pub fn kind(&self) -> ErrorKind {
        match self {
            Fault::TimeSource(_) => ErrorKind::TimeSource,
            Fault::Display(_) => ErrorKind::Display,
            Fault::Config(_) => ErrorKind::Config,
            Fault::Association(_) => ErrorKind::Association,
        }
    }
}

impl From<TimeSourceError> for Fault {
    fn from(e: TimeSourceError) -> Self {
        Fault::TimeSource(e)
    }
}

impl From<DisplayError> for Fault {
    fn from(e: DisplayError) -> Self {
        Fault::Display(e)
    }
}

impl From<ConfigError> for Fault {
    fn from(e: ConfigError) -> Self {
        Fault::Config(e)
    }
}

impl From<AssociationError> for Fault {
    fn from(e: AssociationError) -> Self {
        Fault::Association(e)
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::TimeSource(e) => write!(f, "time fetch failed: {:?}", e),
            Fault::Display(e) => write!(f, "display write failed: {:?}", e),
            Fault::Config(e) => write!(f, "bad settings: {}", e),
            Fault::Association(e) => write!(f, "join failed: {:?}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SettingKey;

    #[test]
    fn test_fault_kinds() {
        assert_eq!(
            Fault::from(TimeSourceError::Timeout).kind(),
            ErrorKind::TimeSource
        );
        assert_eq!(
            Fault::from(DisplayError::Disconnected).kind(),
            ErrorKind::Display
        );
        assert_eq!(
            Fault::from(ConfigError::Missing(SettingKey::AioKey)).kind(),
            ErrorKind::Config
        );
        assert_eq!(
            Fault::from(AssociationError::Timeout).kind(),
            ErrorKind::Association
        );
    }

    #[test]
    fn test_join_failure_mapping() {
        assert_eq!(
            AssociationError::from(JoinFailure::BadPassphrase),
            AssociationError::BadPassphrase
        );
        assert_eq!(
            AssociationError::from(JoinFailure::Other),
            AssociationError::Rejected
        );
    }
}
