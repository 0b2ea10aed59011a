//! Message types for the bridge link
//!
//! - Controller → Bridge: join request, time requests
//! - Bridge → Controller: join outcome, time answers

use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};
use crate::reasons::{JoinFailure, TimeFault};
use heapless::Vec;

// Message kinds: Bridge → Controller
pub const MSG_JOINED: u8 = 0x01;
pub const MSG_JOIN_FAILED: u8 = 0x02;
pub const MSG_TIME: u8 = 0x03;
pub const MSG_TIME_UNAVAILABLE: u8 = 0x04;

// Message kinds: Controller → Bridge
pub const MSG_JOIN: u8 = 0x20;
pub const MSG_TIME_REQUEST: u8 = 0x21;

/// Credential field limits (bytes)
pub const MAX_SSID_LEN: usize = 32;
pub const MAX_PASSPHRASE_LEN: usize = 63;
pub const MAX_USERNAME_LEN: usize = 32;
pub const MAX_KEY_LEN: usize = 64;

/// Size of the TIME payload
const TIME_PAYLOAD_LEN: usize = 10;

/// Calendar time as reported by the cloud time service
///
/// No timezone is attached: the fields are whatever local time the
/// account is configured for, which is the same frame the countdown
/// target is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Sub-second part, 0-999
    pub millis: u16,
}

/// Messages from the controller to the bridge
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerMessage<'a> {
    /// Associate with the access point, then authenticate with the time service
    Join {
        ssid: &'a str,
        passphrase: &'a str,
        username: &'a str,
        key: &'a str,
    },
    /// Ask for the current time
    TimeRequest { seq: u8 },
}

impl<'a> ControllerMessage<'a> {
    /// Encode this message into a frame
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            ControllerMessage::Join {
                ssid,
                passphrase,
                username,
                key,
            } => {
                // Payload: four [len][bytes...] fields
                let mut payload = Vec::<u8, MAX_PAYLOAD_SIZE>::new();
                push_field(&mut payload, ssid, MAX_SSID_LEN)?;
                push_field(&mut payload, passphrase, MAX_PASSPHRASE_LEN)?;
                push_field(&mut payload, username, MAX_USERNAME_LEN)?;
                push_field(&mut payload, key, MAX_KEY_LEN)?;
                Frame::new(MSG_JOIN, &payload)
            }
            ControllerMessage::TimeRequest { seq } => Frame::new(MSG_TIME_REQUEST, &[*seq]),
        }
    }

    /// Parse a controller frame (bridge side and tests)
    pub fn from_frame(frame: &'a Frame) -> Result<Self, FrameError> {
        match frame.kind {
            MSG_JOIN => {
                let mut rest = &frame.payload[..];
                let ssid = take_field(&mut rest)?;
                let passphrase = take_field(&mut rest)?;
                let username = take_field(&mut rest)?;
                let key = take_field(&mut rest)?;
                if !rest.is_empty() {
                    return Err(FrameError::Malformed);
                }
                Ok(ControllerMessage::Join {
                    ssid,
                    passphrase,
                    username,
                    key,
                })
            }
            MSG_TIME_REQUEST => match &frame.payload[..] {
                [seq] => Ok(ControllerMessage::TimeRequest { seq: *seq }),
                _ => Err(FrameError::Malformed),
            },
            other => Err(FrameError::UnknownKind(other)),
        }
    }
}

fn push_field(
    payload: &mut Vec<u8, MAX_PAYLOAD_SIZE>,
    value: &str,
    limit: usize,
) -> Result<(), FrameError> {
    let bytes = value.as_bytes();
    if bytes.len() > limit {
        return Err(FrameError::PayloadTooLarge);
    }
    payload
        .push(bytes.len() as u8)
        .map_err(|_| FrameError::PayloadTooLarge)?;
    payload
        .extend_from_slice(bytes)
        .map_err(|_| FrameError::PayloadTooLarge)
}

fn take_field<'a>(rest: &mut &'a [u8]) -> Result<&'a str, FrameError> {
    let (&len, tail) = rest.split_first().ok_or(FrameError::Malformed)?;
    let len = len as usize;
    if tail.len() < len {
        return Err(FrameError::Malformed);
    }
    let (field, tail) = tail.split_at(len);
    *rest = tail;
    core::str::from_utf8(field).map_err(|_| FrameError::Malformed)
}

/// Messages from the bridge to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeMessage {
    /// Network joined and time service credentials accepted
    Joined,
    /// Join did not succeed
    JoinFailed(JoinFailure),
    /// Answer to a time request
    Time { seq: u8, time: WallTime },
    /// Time request could not be served
    TimeUnavailable { seq: u8, fault: TimeFault },
}

impl BridgeMessage {
    /// Parse a bridge frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        let p = &frame.payload[..];
        match frame.kind {
            MSG_JOINED => Ok(BridgeMessage::Joined),
            MSG_JOIN_FAILED => match p {
                [reason] => Ok(BridgeMessage::JoinFailed(JoinFailure::from_byte(*reason))),
                _ => Err(FrameError::Malformed),
            },
            MSG_TIME => {
                if p.len() != TIME_PAYLOAD_LEN {
                    return Err(FrameError::Malformed);
                }
                // Payload: [seq][year lo][year hi][mon][day][h][m][s][ms lo][ms hi]
                Ok(BridgeMessage::Time {
                    seq: p[0],
                    time: WallTime {
                        year: u16::from_le_bytes([p[1], p[2]]),
                        month: p[3],
                        day: p[4],
                        hour: p[5],
                        minute: p[6],
                        second: p[7],
                        millis: u16::from_le_bytes([p[8], p[9]]),
                    },
                })
            }
            MSG_TIME_UNAVAILABLE => match p {
                [seq, reason] => Ok(BridgeMessage::TimeUnavailable {
                    seq: *seq,
                    fault: TimeFault::from_byte(*reason),
                }),
                _ => Err(FrameError::Malformed),
            },
            other => Err(FrameError::UnknownKind(other)),
        }
    }

    /// Encode this message (bridge side and tests)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            BridgeMessage::Joined => Ok(Frame::bare(MSG_JOINED)),
            BridgeMessage::JoinFailed(reason) => Frame::new(MSG_JOIN_FAILED, &[reason.to_byte()]),
            BridgeMessage::Time { seq, time } => {
                let [y0, y1] = time.year.to_le_bytes();
                let [m0, m1] = time.millis.to_le_bytes();
                Frame::new(
                    MSG_TIME,
                    &[
                        *seq,
                        y0,
                        y1,
                        time.month,
                        time.day,
                        time.hour,
                        time.minute,
                        time.second,
                        m0,
                        m1,
                    ],
                )
            }
            BridgeMessage::TimeUnavailable { seq, fault } => {
                Frame::new(MSG_TIME_UNAVAILABLE, &[*seq, fault.to_byte()])
            }
        }
    }

    /// Sequence number this message answers, if it answers a time request
    pub fn seq(&self) -> Option<u8> {
        match self {
            BridgeMessage::Time { seq, .. } | BridgeMessage::TimeUnavailable { seq, .. } => {
                Some(*seq)
            }
            _ => None,
        }
    }
}
