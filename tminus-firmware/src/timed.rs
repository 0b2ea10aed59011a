//! Timeouts around the bridge link

use defmt::*;
use embassy_time::{with_timeout, Duration};
use embedded_io_async::{Read, Write};

use tminus_core::config::Credentials;
use tminus_core::time::Instant;
use tminus_core::traits::{TimeSource, TimeSourceError};
use tminus_core::AssociationError;
use tminus_drivers::link::BridgeLink;

/// Network join plus service authentication
pub const JOIN_TIMEOUT: Duration = Duration::from_secs(30);

/// One time fetch
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Bridge link whose calls give up after a fixed time
pub struct TimedLink<U> {
    link: BridgeLink<U>,
}

impl<U> TimedLink<U>
where
    U: Read + Write,
{
    pub fn new(link: BridgeLink<U>) -> Self {
        Self { link }
    }

    /// Join within [`JOIN_TIMEOUT`]
    pub async fn join(&mut self, credentials: &Credentials) -> Result<(), AssociationError> {
        match with_timeout(JOIN_TIMEOUT, self.link.join(credentials)).await {
            Ok(result) => result,
            Err(_) => Err(AssociationError::Timeout),
        }
    }
}

impl<U> TimeSource for TimedLink<U>
where
    U: Read + Write,
{
    async fn now(&mut self) -> Result<Instant, TimeSourceError> {
        match with_timeout(FETCH_TIMEOUT, self.link.now()).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Time request {} unanswered", self.link.last_seq());
                Err(TimeSourceError::Timeout)
            }
        }
    }
}
