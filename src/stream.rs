//! Byte-by-byte decoding of raw, undelimited MIDI streams, such as the bytes coming out of a
//! UART connected to a 5-pin DIN MIDI input.
//!
//! Handles all of the quirks specific to MIDI streams: running status, System Realtime messages
//! embedded in the middle of another message, undefined status bytes and stray data bytes.

use crate::{
    event::MidiMessage,
    live::{LiveEvent, MessageType, MtcQuarterFrameMessage, SystemCommon, SystemRealtime},
    prelude::*,
};

/// A streaming raw MIDI decoder.
/// This decoder takes raw MIDI bytes, *not* `.mid` files!
///
/// Bytes are fed one at a time through [`feed_byte`](#method.feed_byte), which returns a
/// [`LiveEvent`](enum.LiveEvent.html) as soon as the byte completes a message.
/// The decoder never buffers more than one message and never fails: bytes that do not fit
/// anywhere are silently dropped.
///
/// ```rust
/// use midiwire::{LiveEvent, MidiMessage, MidiStream};
///
/// let mut stream = MidiStream::new();
/// // Note on, channel 2, with running status and a timing clock in the middle
/// let mut events = Vec::new();
/// stream.feed(&[0x92, 60, 100, 62, 0xF8, 90], |ev| events.push(ev));
/// assert_eq!(events.len(), 3);
/// assert!(matches!(
///     events[2],
///     LiveEvent::Midi { message: MidiMessage::NoteOn { .. }, .. }
/// ));
/// ```
///
/// # Channel filter
///
/// A stream can be restricted to a single channel through
/// [`set_active_channel`](#method.set_active_channel).
/// Channel messages on any other channel are then decoded as usual (running status is still
/// tracked) but are not returned.
/// System messages always go through.
///
/// # Concurrency
///
/// A `MidiStream` is plain data with no internal synchronization.
/// Use one stream per MIDI input, fed from whichever thread or task owns that input.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct MidiStream {
    /// The status byte of the message being assembled, if any.
    running: Option<u8>,
    data: [u7; 2],
    len: u8,
    active_channel: Option<u4>,
}
impl MidiStream {
    /// Create a fresh decoder, with no running status and no channel filter.
    #[inline]
    pub fn new() -> MidiStream {
        MidiStream::default()
    }

    /// Bring the decoder back to the state of a fresh `MidiStream::new()`.
    ///
    /// This also clears the channel filter.
    /// Use [`reset`](#method.reset) to keep it.
    pub fn init(&mut self) {
        log::debug!("reinitializing midi stream");
        *self = MidiStream::new();
    }

    /// Abandon any message in progress and clear running status.
    ///
    /// Useful after a transport error, when the next bytes are not known to continue the
    /// previous message.
    /// The channel filter is kept.
    pub fn reset(&mut self) {
        log::debug!("resetting midi stream");
        *self = MidiStream {
            active_channel: self.active_channel,
            ..MidiStream::new()
        };
    }

    /// Only return channel messages on the given channel, or on all channels if `None` (omni
    /// mode).
    #[inline]
    pub fn set_active_channel(&mut self, channel: Option<u4>) {
        self.active_channel = channel;
    }

    /// The channel messages are restricted to, or `None` in omni mode.
    #[inline]
    pub fn active_channel(&self) -> Option<u4> {
        self.active_channel
    }

    /// The message type that data bytes are currently being collected for.
    ///
    /// This is the running status: after a channel message completes, it stays active so that
    /// the next data bytes start another message of the same type.
    /// Control Change statuses are reported as `MessageType::ControlChange`.
    #[inline]
    pub fn running_status(&self) -> Option<MessageType> {
        self.running.and_then(MessageType::from_status)
    }

    /// The channel of the running status, if it is a channel message.
    #[inline]
    pub fn channel(&self) -> Option<u4> {
        match self.running {
            Some(status @ 0x80..=0xEF) => Some(u4::from(status)),
            _ => None,
        }
    }

    /// How many data bytes of the current message have been received so far (0 to 2).
    #[inline]
    pub fn pending_len(&self) -> usize {
        self.len as usize
    }

    /// Feed a single byte to the decoder.
    ///
    /// Returns the decoded message if this byte completes one, and `None` otherwise.
    pub fn feed_byte(&mut self, byte: u8) -> Option<LiveEvent> {
        let ev = self.decode(byte)?;
        match (self.active_channel, ev.channel()) {
            (Some(active), Some(channel)) if active != channel => {
                log::trace!("dropping {:?} on channel {}", ev.message_type(), channel);
                None
            }
            _ => Some(ev),
        }
    }

    /// Feeds a slice of bytes to the stream, calling the `handle_ev` closure whenever a complete
    /// event is read.
    ///
    /// Calling `feed` with many small slices is equivalent to calling `feed` with one large
    /// concatenation of them all.
    pub fn feed(&mut self, bytes: &[u8], mut handle_ev: impl FnMut(LiveEvent)) {
        for &byte in bytes {
            if let Some(ev) = self.feed_byte(byte) {
                handle_ev(ev);
            }
        }
    }

    fn decode(&mut self, byte: u8) -> Option<LiveEvent> {
        if byte & 0x80 != 0 {
            self.status_byte(byte)
        } else {
            self.data_byte(byte)
        }
    }

    fn status_byte(&mut self, status: u8) -> Option<LiveEvent> {
        match status {
            0x80..=0xEF | 0xF0..=0xF3 | 0xF6 | 0xF7 => {
                //A new message starts, whatever was in progress is dropped
                //0xF7 closes an open sysex block instead of cutting it off
                if self.len > 0 || (self.running == Some(0xF0) && status != 0xF7) {
                    log::debug!(
                        "abandoning incomplete {:?} message",
                        self.running_status()
                    );
                }
                self.len = 0;
                match status {
                    0xF0 => {
                        self.running = Some(status);
                        Some(LiveEvent::Common(SystemCommon::SysExStart))
                    }
                    0xF6 => {
                        self.running = None;
                        Some(LiveEvent::Common(SystemCommon::TuneRequest))
                    }
                    0xF7 => {
                        self.running = None;
                        Some(LiveEvent::Common(SystemCommon::SysExEnd))
                    }
                    _ => {
                        //Channel message or system common with data bytes to follow
                        self.running = Some(status);
                        None
                    }
                }
            }
            _ => match SystemRealtime::new(status) {
                //These single-byte events are intended to transmit quick time-sensitive events,
                //and they should be invisible to other messages (that means, they don't alter any
                //decoder state).
                Some(realtime) => Some(LiveEvent::Realtime(realtime)),
                None => {
                    //Undefined status bytes (0xF4, 0xF5, 0xF9, 0xFD) are just as invisible
                    log::trace!("ignoring undefined status byte {:#04x}", status);
                    None
                }
            },
        }
    }

    fn data_byte(&mut self, byte: u8) -> Option<LiveEvent> {
        let byte = u7::try_from(byte)?;
        if self.len as usize >= self.data.len() {
            log::debug!("midi data buffer overflow, dropping partial message");
            self.len = 0;
            return None;
        }
        let status = match self.running {
            Some(status) => status,
            None => {
                log::trace!("ignoring stray data byte {:#04x}", byte.as_int());
                return None;
            }
        };
        match status {
            0x80..=0xEF => {
                let data = self.push(byte, MidiMessage::msg_length(status))?;
                //Running status stays active for the next message
                let (channel, message) = MidiMessage::read(status, data)?;
                Some(LiveEvent::Midi { channel, message })
            }
            //System exclusive data is not decoded
            0xF0 => None,
            0xF1 => {
                self.running = None;
                Some(LiveEvent::Common(SystemCommon::MtcQuarterFrame(
                    MtcQuarterFrameMessage::from_code(byte.as_int() >> 4),
                    u4::from(byte.as_int()),
                )))
            }
            0xF2 => {
                let [lsb, msb] = self.push(byte, 2)?;
                self.running = None;
                Some(LiveEvent::Common(SystemCommon::SongPosition(
                    u14::from_u7_pair(lsb, msb),
                )))
            }
            0xF3 => {
                self.running = None;
                Some(LiveEvent::Common(SystemCommon::SongSelect(byte)))
            }
            _ => None,
        }
    }

    /// Collect a data byte for a message of `len` data bytes.
    ///
    /// Returns the data once all of it has arrived, leaving the buffer empty for the next
    /// message.
    fn push(&mut self, byte: u7, len: usize) -> Option<[u7; 2]> {
        self.data[self.len as usize] = byte;
        self.len += 1;
        if (self.len as usize) < len {
            return None;
        }
        self.len = 0;
        Some(self.data)
    }
}
