//! Failure reasons reported by the bridge

/// Why the bridge could not join the network or the time service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JoinFailure {
    /// No access point with the configured SSID answered
    NetworkNotFound,
    /// Access point rejected the passphrase
    BadPassphrase,
    /// Cloud time service rejected the account credentials
    ServiceRejected,
    /// Anything else the bridge could not classify
    Other,
}

// Wire format values
const JOIN_NETWORK_NOT_FOUND: u8 = 0x01;
const JOIN_BAD_PASSPHRASE: u8 = 0x02;
const JOIN_SERVICE_REJECTED: u8 = 0x03;
const JOIN_OTHER: u8 = 0xFF;

impl JoinFailure {
    /// Decode a wire byte; unknown values map to [`JoinFailure::Other`]
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            JOIN_NETWORK_NOT_FOUND => JoinFailure::NetworkNotFound,
            JOIN_BAD_PASSPHRASE => JoinFailure::BadPassphrase,
            JOIN_SERVICE_REJECTED => JoinFailure::ServiceRejected,
            _ => JoinFailure::Other,
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            JoinFailure::NetworkNotFound => JOIN_NETWORK_NOT_FOUND,
            JoinFailure::BadPassphrase => JOIN_BAD_PASSPHRASE,
            JoinFailure::ServiceRejected => JOIN_SERVICE_REJECTED,
            JoinFailure::Other => JOIN_OTHER,
        }
    }
}

/// Why the bridge could not answer a time request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeFault {
    /// Bridge lost (or never had) its network association
    NotConnected,
    /// HTTP request failed or timed out on the bridge side
    RequestFailed,
    /// Service answered with an error status or an unreadable body
    ServiceError,
    /// Service throttled the account
    RateLimited,
}

const TIME_NOT_CONNECTED: u8 = 0x01;
const TIME_REQUEST_FAILED: u8 = 0x02;
const TIME_SERVICE_ERROR: u8 = 0x03;
const TIME_RATE_LIMITED: u8 = 0x04;

impl TimeFault {
    /// Decode a wire byte; unknown values map to [`TimeFault::ServiceError`]
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            TIME_NOT_CONNECTED => TimeFault::NotConnected,
            TIME_REQUEST_FAILED => TimeFault::RequestFailed,
            TIME_RATE_LIMITED => TimeFault::RateLimited,
            _ => TimeFault::ServiceError,
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            TimeFault::NotConnected => TIME_NOT_CONNECTED,
            TimeFault::RequestFailed => TIME_REQUEST_FAILED,
            TimeFault::ServiceError => TIME_SERVICE_ERROR,
            TimeFault::RateLimited => TIME_RATE_LIMITED,
        }
    }

    /// Whether the bridge itself has no working network
    pub fn is_link_down(&self) -> bool {
        matches!(self, TimeFault::NotConnected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_failure_wire_values() {
        for reason in [
            JoinFailure::NetworkNotFound,
            JoinFailure::BadPassphrase,
            JoinFailure::ServiceRejected,
            JoinFailure::Other,
        ] {
            assert_eq!(JoinFailure::from_byte(reason.to_byte()), reason);
        }
    }

    #[test]
    fn test_unknown_join_byte_is_other() {
        assert_eq!(JoinFailure::from_byte(0x42), JoinFailure::Other);
    }

    #[test]
    fn test_unknown_time_byte_is_service_error() {
        assert_eq!(TimeFault::from_byte(0x00), TimeFault::ServiceError);
        assert_eq!(TimeFault::from_byte(0x04), TimeFault::RateLimited);
    }

    #[test]
    fn test_link_down() {
        assert!(TimeFault::NotConnected.is_link_down());
        assert!(!TimeFault::RateLimited.is_link_down());
    }
}
