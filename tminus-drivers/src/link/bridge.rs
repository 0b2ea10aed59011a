//! Wi-Fi bridge client
//!
//! Talks to the bridge coprocessor over a byte stream (UART). The bridge
//! owns the network association and the cloud time service; this side
//! only asks it to join and then polls for the current time.
//!
//! Every time request carries a fresh sequence number. Answers with any
//! other sequence number belong to requests the caller already gave up on
//! and are dropped.

use embedded_io_async::{Read, Write};

use tminus_core::config::Credentials;
use tminus_core::time::Instant;
use tminus_core::traits::{TimeSource, TimeSourceError};
use tminus_core::AssociationError;
use tminus_protocol::frame::MAX_FRAME_SIZE;
use tminus_protocol::{BridgeMessage, ControllerMessage, FrameError, FrameParser, WallTime};

/// Errors on the link itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// Read or write failed, or the stream ended
    Io,
    /// Corrupt or undecodable frame
    Frame(FrameError),
}

impl From<FrameError> for LinkError {
    fn from(e: FrameError) -> Self {
        LinkError::Frame(e)
    }
}

impl From<LinkError> for TimeSourceError {
    fn from(e: LinkError) -> Self {
        match e {
            LinkError::Io => TimeSourceError::Io,
            LinkError::Frame(e) => TimeSourceError::Link(e),
        }
    }
}

impl From<LinkError> for AssociationError {
    fn from(e: LinkError) -> Self {
        match e {
            LinkError::Io => AssociationError::Io,
            LinkError::Frame(e) => AssociationError::Link(e),
        }
    }
}

/// Convert reported wall time to an instant, dropping the sub-second part
pub fn to_instant(time: &WallTime) -> Result<Instant, TimeSourceError> {
    let instant = Instant::new(
        time.year,
        time.month,
        time.day,
        time.hour,
        time.minute,
        time.second,
    )?;
    Ok(instant)
}

/// Client end of the bridge link
pub struct BridgeLink<U> {
    uart: U,
    parser: FrameParser,
    seq: u8,
    tx: [u8; MAX_FRAME_SIZE],
}

impl<U> BridgeLink<U>
where
    U: Read + Write,
{
    pub fn new(uart: U) -> Self {
        Self {
            uart,
            parser: FrameParser::new(),
            seq: 0,
            tx: [0; MAX_FRAME_SIZE],
        }
    }

    /// Release the stream
    pub fn release(self) -> U {
        self.uart
    }

    /// Sequence number of the latest time request
    pub fn last_seq(&self) -> u8 {
        self.seq
    }

    /// Ask the bridge to join the network and the time service
    ///
    /// Waits for the outcome; stale time answers arriving meanwhile are
    /// dropped.
    pub async fn join(&mut self, credentials: &Credentials) -> Result<(), AssociationError> {
        let request = ControllerMessage::Join {
            ssid: &credentials.ssid,
            passphrase: &credentials.passphrase,
            username: &credentials.username,
            key: &credentials.key,
        };
        self.send(&request).await?;

        loop {
            match self.receive().await? {
                BridgeMessage::Joined => return Ok(()),
                BridgeMessage::JoinFailed(reason) => return Err(reason.into()),
                BridgeMessage::Time { .. } | BridgeMessage::TimeUnavailable { .. } => continue,
            }
        }
    }

    async fn send(&mut self, message: &ControllerMessage<'_>) -> Result<(), LinkError> {
        let frame = message.to_frame()?;
        let len = frame.encode(&mut self.tx)?;
        self.uart
            .write_all(&self.tx[..len])
            .await
            .map_err(|_| LinkError::Io)?;
        self.uart.flush().await.map_err(|_| LinkError::Io)
    }

    /// Read until one bridge message decodes
    ///
    /// Frames of unknown kind are skipped.
    async fn receive(&mut self) -> Result<BridgeMessage, LinkError> {
        let mut byte = [0u8; 1];
        loop {
            let n = self.uart.read(&mut byte).await.map_err(|_| LinkError::Io)?;
            if n == 0 {
                return Err(LinkError::Io);
            }

            let Some(frame) = self.parser.push(byte[0])? else {
                continue;
            };
            match BridgeMessage::from_frame(&frame) {
                Ok(message) => return Ok(message),
                Err(FrameError::UnknownKind(_)) => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl<U> TimeSource for BridgeLink<U>
where
    U: Read + Write,
{
    async fn now(&mut self) -> Result<Instant, TimeSourceError> {
        self.seq = self.seq.wrapping_add(1);
        let seq = self.seq;
        self.send(&ControllerMessage::TimeRequest { seq }).await?;

        loop {
            let message = self.receive().await?;
            if message.seq() != Some(seq) {
                continue;
            }
            match message {
                BridgeMessage::Time { time, .. } => return to_instant(&time),
                BridgeMessage::TimeUnavailable { fault, .. } => return Err(fault.into()),
                BridgeMessage::Joined | BridgeMessage::JoinFailed(_) => continue,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embedded_io_async::{ErrorKind, ErrorType};
    use std::collections::VecDeque;
    use std::vec::Vec;
    use tminus_protocol::{Frame, JoinFailure, TimeFault};

    #[derive(Default)]
    struct MockUart {
        incoming: VecDeque<u8>,
        outgoing: Vec<u8>,
    }

    impl MockUart {
        fn queue(&mut self, message: BridgeMessage) {
            self.queue_frame(&message.to_frame().unwrap());
        }

        fn queue_frame(&mut self, frame: &Frame) {
            let mut buf = [0u8; MAX_FRAME_SIZE];
            let len = frame.encode(&mut buf).unwrap();
            self.incoming.extend(&buf[..len]);
        }

        /// Decode everything the controller sent
        fn sent(&self) -> Vec<Frame> {
            let mut parser = FrameParser::new();
            self.outgoing
                .iter()
                .filter_map(|&b| parser.push(b).unwrap())
                .collect()
        }
    }

    impl ErrorType for MockUart {
        type Error = ErrorKind;
    }

    impl Read for MockUart {
        async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            match self.incoming.pop_front() {
                Some(byte) if !buf.is_empty() => {
                    buf[0] = byte;
                    Ok(1)
                }
                _ => Ok(0),
            }
        }
    }

    impl Write for MockUart {
        async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            self.outgoing.extend_from_slice(buf);
            Ok(buf.len())
        }
    }

    fn wall(second: u8, millis: u16) -> WallTime {
        WallTime {
            year: 2026,
            month: 5,
            day: 24,
            hour: 8,
            minute: 0,
            second,
            millis,
        }
    }

    fn credentials() -> Credentials {
        Credentials {
            ssid: "home".try_into().unwrap(),
            passphrase: "hunter2".try_into().unwrap(),
            username: "someone".try_into().unwrap(),
            key: "aio_key".try_into().unwrap(),
        }
    }

    #[test]
    fn test_time_request_and_answer() {
        let mut uart = MockUart::default();
        uart.queue(BridgeMessage::Time {
            seq: 1,
            time: wall(30, 999),
        });
        let mut link = BridgeLink::new(uart);

        let now = block_on(link.now()).unwrap();
        assert_eq!(now, Instant::new(2026, 5, 24, 8, 0, 30).unwrap());

        let uart = link.release();
        let sent = uart.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            ControllerMessage::from_frame(&sent[0]).unwrap(),
            ControllerMessage::TimeRequest { seq: 1 }
        );
    }

    #[test]
    fn test_stale_answers_are_dropped() {
        let mut uart = MockUart::default();
        uart.queue(BridgeMessage::Time {
            seq: 0,
            time: wall(1, 0),
        });
        uart.queue(BridgeMessage::TimeUnavailable {
            seq: 7,
            fault: TimeFault::RateLimited,
        });
        uart.queue(BridgeMessage::Time {
            seq: 1,
            time: wall(2, 0),
        });
        let mut link = BridgeLink::new(uart);

        let now = block_on(link.now()).unwrap();
        assert_eq!(now.second(), 2);
        assert_eq!(link.last_seq(), 1);
    }

    #[test]
    fn test_time_unavailable() {
        let mut uart = MockUart::default();
        uart.queue(BridgeMessage::TimeUnavailable {
            seq: 1,
            fault: TimeFault::ServiceError,
        });
        let mut link = BridgeLink::new(uart);

        assert_eq!(
            block_on(link.now()),
            Err(TimeSourceError::Unavailable(TimeFault::ServiceError))
        );
    }

    #[test]
    fn test_impossible_date_is_rejected() {
        let mut uart = MockUart::default();
        let mut time = wall(0, 0);
        time.month = 2;
        time.day = 30;
        uart.queue(BridgeMessage::Time { seq: 1, time });
        let mut link = BridgeLink::new(uart);

        assert!(matches!(
            block_on(link.now()),
            Err(TimeSourceError::InvalidTime(_))
        ));
    }

    #[test]
    fn test_silent_bridge_is_io_error() {
        let mut link = BridgeLink::new(MockUart::default());
        assert_eq!(block_on(link.now()), Err(TimeSourceError::Io));
    }

    #[test]
    fn test_unknown_frames_are_skipped() {
        let mut uart = MockUart::default();
        uart.queue_frame(&Frame::new(0x7F, &[1, 2, 3]).unwrap());
        uart.queue(BridgeMessage::Joined);
        let mut link = BridgeLink::new(uart);

        assert_eq!(block_on(link.join(&credentials())), Ok(()));
    }

    #[test]
    fn test_join_sends_credentials() {
        let mut uart = MockUart::default();
        uart.queue(BridgeMessage::Joined);
        let mut link = BridgeLink::new(uart);

        block_on(link.join(&credentials())).unwrap();

        let uart = link.release();
        let sent = uart.sent();
        assert_eq!(
            ControllerMessage::from_frame(&sent[0]).unwrap(),
            ControllerMessage::Join {
                ssid: "home",
                passphrase: "hunter2",
                username: "someone",
                key: "aio_key",
            }
        );
    }

    #[test]
    fn test_join_failure_reasons() {
        let cases = [
            (JoinFailure::NetworkNotFound, AssociationError::NetworkNotFound),
            (JoinFailure::BadPassphrase, AssociationError::BadPassphrase),
            (JoinFailure::ServiceRejected, AssociationError::ServiceRejected),
            (JoinFailure::Other, AssociationError::Rejected),
        ];
        for (reason, expected) in cases {
            let mut uart = MockUart::default();
            // A late time answer from before a restart comes first
            uart.queue(BridgeMessage::Time {
                seq: 9,
                time: wall(0, 0),
            });
            uart.queue(BridgeMessage::JoinFailed(reason));
            let mut link = BridgeLink::new(uart);
            assert_eq!(block_on(link.join(&credentials())), Err(expected));
        }
    }

    #[test]
    fn test_corrupt_frame_is_reported() {
        let mut uart = MockUart::default();
        let mut buf = [0u8; MAX_FRAME_SIZE];
        let frame = BridgeMessage::Joined.to_frame().unwrap();
        let len = frame.encode(&mut buf).unwrap();
        buf[len - 1] ^= 0xFF;
        uart.incoming.extend(&buf[..len]);
        let mut link = BridgeLink::new(uart);

        assert_eq!(
            block_on(link.join(&credentials())),
            Err(AssociationError::Link(FrameError::BadChecksum))
        );
    }
}
