//! Provides the messages produced by the MIDI decoder, as they travel on a live MIDI connection.
//!
//! [`LiveEvent`](enum.LiveEvent.html) is the decoded form of one complete MIDI message.
//! Live events are usually produced byte by byte by a [`MidiStream`](../struct.MidiStream.html)
//! fed from a serial line, but already-delimited packets (such as those produced by OS MIDI
//! APIs) can be decoded directly through [`LiveEvent::parse`](enum.LiveEvent.html#method.parse).
//!
//! Live events can be turned back into wire bytes through
//! [`write`](enum.LiveEvent.html#method.write) and
//! [`write_with_running_status`](enum.LiveEvent.html#method.write_with_running_status).

use crate::{
    event::{ChannelMode, MidiMessage},
    prelude::*,
    stream::MidiStream,
};

/// A complete MIDI message, as decoded from a live MIDI connection.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum LiveEvent {
    /// A MIDI message associated with a channel, carrying musical data.
    ///
    /// Status byte in the range `0x80 ..= 0xEF`.
    Midi {
        /// The MIDI channel that this message is associated with.
        channel: u4,
        /// The MIDI message type and associated data.
        message: MidiMessage,
    },
    /// A System Common message, including the boundaries of System Exclusive blocks.
    ///
    /// Status byte in the range `0xF0 ..= 0xF7`.
    Common(SystemCommon),
    /// A one-byte System Realtime message.
    ///
    /// Status byte in the range `0xF8 ..= 0xFF`.
    Realtime(SystemRealtime),
}
impl LiveEvent {
    /// Decode a complete MIDI message from its raw bytes.
    ///
    /// This method can be used to decode MIDI packets coming from an OS API (ie. a status byte
    /// in the range `0x80 ..= 0xFF` followed by data bytes in the range `0x00 ..= 0x7F`).
    ///
    /// System Exclusive payloads are opaque: a packet starting with `0xF0` always decodes as
    /// `SystemCommon::SysExStart`, whatever follows.
    ///
    /// Data bytes left over after the message is complete are ignored, unless the `strict`
    /// feature is enabled, in which case they are an `ErrorKind::Malformed` error.
    pub fn parse(raw: &[u8]) -> Result<LiveEvent> {
        let (&status, data) = raw
            .split_first()
            .ok_or_else(|| err_invalid!("no status byte"))?;
        ensure!(
            status >= 0x80,
            err_invalid!("packet does not start with a status byte")
        );
        let mut stream = MidiStream::new();
        let mut event = stream.feed_byte(status);
        if status == 0xF0 {
            return event.ok_or_else(|| err_invalid!("incomplete midi message").into());
        }
        for &byte in data {
            ensure!(byte < 0x80, err_invalid!("status byte inside packet"));
            if event.is_some() {
                if cfg!(feature = "strict") {
                    bail!(err_malformed!("trailing data bytes after message"));
                }
                break;
            }
            event = stream.feed_byte(byte);
        }
        event.ok_or_else(|| err_invalid!("incomplete midi message").into())
    }

    /// The kind of message this event carries.
    pub fn message_type(&self) -> MessageType {
        match self {
            LiveEvent::Midi { message, .. } => message.message_type(),
            LiveEvent::Common(common) => common.message_type(),
            LiveEvent::Realtime(realtime) => realtime.message_type(),
        }
    }

    /// The channel this event is associated with, or `None` for system messages.
    #[inline]
    pub fn channel(&self) -> Option<u4> {
        match self {
            LiveEvent::Midi { channel, .. } => Some(*channel),
            _ => None,
        }
    }

    /// Write a standalone message to the given output.
    #[inline]
    pub fn write<W: Write>(&self, out: &mut W) -> WriteResult<W> {
        self.write_with_running_status(&mut None, out)
    }

    /// Write a message, skipping the status if it shares the status with the previous message.
    ///
    /// `running_status` should be shared between consecutive calls, and should initially be
    /// `None`.
    pub fn write_with_running_status<W: Write>(
        &self,
        running_status: &mut Option<u8>,
        out: &mut W,
    ) -> WriteResult<W> {
        match self {
            LiveEvent::Midi { channel, message } => {
                let status = message.status_nibble() << 4 | channel.as_int();
                if Some(status) != *running_status {
                    *running_status = Some(status);
                    out.write(&[status])?;
                }
                message.write(out)?;
            }
            LiveEvent::Common(common) => {
                *running_status = None;
                common.write(out)?;
            }
            LiveEvent::Realtime(realtime) => {
                //Realtime messages are invisible to running status
                out.write(&[realtime.encode()])?;
            }
        }
        Ok(())
    }

    /// Write a standalone message to the given `std::io::Write` output.
    ///
    /// This method is only available with the `std` feature enabled.
    #[cfg(feature = "std")]
    #[inline]
    pub fn write_std<W: io::Write>(&self, out: W) -> io::Result<()> {
        self.write(&mut IoWrap(out))
    }
}

/// A "system common message", as defined by the MIDI standard.
///
/// System Exclusive blocks are not decoded: only their start (`0xF0`) and end (`0xF7`) markers
/// are reported, and the data bytes in between are dropped.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum SystemCommon {
    /// The start of a System Exclusive block.
    SysExStart,
    /// A MIDI Time Code Quarter Frame message, carrying a tag type and a 4-bit tag value.
    MtcQuarterFrame(MtcQuarterFrameMessage, u4),
    /// The number of MIDI beats (6 x MIDI clocks) that have elapsed since the start of the
    /// sequence.
    SongPosition(u14),
    /// Select a given song index.
    SongSelect(u7),
    /// Request the device to tune itself.
    TuneRequest,
    /// The end of a System Exclusive block.
    ///
    /// This is reported whenever an `0xF7` byte arrives, even if no System Exclusive block was
    /// open.
    SysExEnd,
}
impl SystemCommon {
    fn write<W: Write>(&self, out: &mut W) -> WriteResult<W> {
        match self {
            SystemCommon::SysExStart => out.write(&[0xF0]),
            SystemCommon::MtcQuarterFrame(msgtype, data) => {
                out.write(&[0xF1, msgtype.as_code() << 4 | data.as_int()])
            }
            SystemCommon::SongPosition(pos) => {
                let (lsb, msb) = pos.split_u7();
                out.write(&[0xF2, lsb.as_int(), msb.as_int()])
            }
            SystemCommon::SongSelect(song) => out.write(&[0xF3, song.as_int()]),
            SystemCommon::TuneRequest => out.write(&[0xF6]),
            SystemCommon::SysExEnd => out.write(&[0xF7]),
        }
    }

    fn message_type(&self) -> MessageType {
        match self {
            SystemCommon::SysExStart => MessageType::SysExStart,
            SystemCommon::MtcQuarterFrame(..) => MessageType::MtcQuarterFrame,
            SystemCommon::SongPosition(_) => MessageType::SongPosition,
            SystemCommon::SongSelect(_) => MessageType::SongSelect,
            SystemCommon::TuneRequest => MessageType::TuneRequest,
            SystemCommon::SysExEnd => MessageType::SysExEnd,
        }
    }
}

/// The different kinds of info a Midi Time Code Quarter Frame message can carry.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum MtcQuarterFrameMessage {
    /// The low nibble of the frame count.
    FramesLow,
    /// The high nibble of the frame count.
    FramesHigh,
    /// The low nibble of the second count.
    SecondsLow,
    /// The high nibble of the second count.
    SecondsHigh,
    /// The low nibble of the minute count.
    MinutesLow,
    /// The high nibble of the minute count.
    MinutesHigh,
    /// The low nibble of the hour count.
    HoursLow,
    /// The high nibble of the hour count.
    HoursHigh,
}
impl MtcQuarterFrameMessage {
    /// The 3-bit code of this message type, as sent in the top nibble of the data byte.
    pub fn as_code(self) -> u8 {
        use MtcQuarterFrameMessage::*;
        match self {
            FramesLow => 0,
            FramesHigh => 1,
            SecondsLow => 2,
            SecondsHigh => 3,
            MinutesLow => 4,
            MinutesHigh => 5,
            HoursLow => 6,
            HoursHigh => 7,
        }
    }

    /// Get the message type from its 3-bit code. Extra bits are ignored.
    pub fn from_code(code: u8) -> MtcQuarterFrameMessage {
        use MtcQuarterFrameMessage::*;
        match code & 0x07 {
            0 => FramesLow,
            1 => FramesHigh,
            2 => SecondsLow,
            3 => SecondsHigh,
            4 => MinutesLow,
            5 => MinutesHigh,
            6 => HoursLow,
            _ => HoursHigh,
        }
    }
}

/// System Realtime messages are one-byte messages that only occur within live MIDI streams.
/// They are usually time-sensitive, get top priority and can even be transmitted in between other
/// messages.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum SystemRealtime {
    /// If sent, they should be sent 24 times per quarter note.
    TimingClock,
    /// Request the device to start playing at position 0.
    Start,
    /// Request the device to continue playing without resetting the position.
    Continue,
    /// Request the device to stop playing, but keep track of the position where it stopped.
    Stop,
    /// Once one of these messages is transmitted, a message should arrive every 300ms or else the
    /// connection is considered broken.
    ActiveSensing,
    /// Request the device to reset itself, usually to the same state as it was after turning on.
    Reset,
}
impl SystemRealtime {
    /// Create a system realtime message from its status byte.
    ///
    /// Returns `None` for the undefined realtime bytes `0xF9` and `0xFD`, and for anything
    /// outside of `0xF8..=0xFF`.
    #[inline]
    pub fn new(status: u8) -> Option<SystemRealtime> {
        use SystemRealtime::*;
        Some(match status {
            0xF8 => TimingClock,
            0xFA => Start,
            0xFB => Continue,
            0xFC => Stop,
            0xFE => ActiveSensing,
            0xFF => Reset,
            _ => return None,
        })
    }

    /// Get the status byte for this system realtime message.
    #[inline]
    pub fn encode(self) -> u8 {
        use SystemRealtime::*;
        match self {
            TimingClock => 0xF8,
            Start => 0xFA,
            Continue => 0xFB,
            Stop => 0xFC,
            ActiveSensing => 0xFE,
            Reset => 0xFF,
        }
    }

    fn message_type(self) -> MessageType {
        use SystemRealtime::*;
        match self {
            TimingClock => MessageType::TimingClock,
            Start => MessageType::Start,
            Continue => MessageType::Continue,
            Stop => MessageType::Stop,
            ActiveSensing => MessageType::ActiveSensing,
            Reset => MessageType::Reset,
        }
    }
}

/// A flat classification of every message the decoder can produce.
///
/// Useful to dispatch on the kind of a [`LiveEvent`](enum.LiveEvent.html) without
/// destructuring it, and to inspect which message a [`MidiStream`](../struct.MidiStream.html)
/// is in the middle of.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum MessageType {
    /// `MidiMessage::NoteOff`, including Note Ons with a velocity of 0.
    NoteOff,
    /// `MidiMessage::NoteOn`.
    NoteOn,
    /// `MidiMessage::KeyPressure`.
    KeyPressure,
    /// A Control Change on any controller other than the Channel Mode ones.
    ControlChange,
    /// A Control Change on one of the reserved controllers `120..=127`.
    ChannelMode(ChannelMode),
    /// `MidiMessage::ProgramChange`.
    ProgramChange,
    /// `MidiMessage::ChannelPressure`.
    ChannelPressure,
    /// `MidiMessage::PitchBend`.
    PitchBend,
    /// `SystemCommon::SysExStart`.
    SysExStart,
    /// `SystemCommon::MtcQuarterFrame`.
    MtcQuarterFrame,
    /// `SystemCommon::SongPosition`.
    SongPosition,
    /// `SystemCommon::SongSelect`.
    SongSelect,
    /// `SystemCommon::TuneRequest`.
    TuneRequest,
    /// `SystemCommon::SysExEnd`.
    SysExEnd,
    /// `SystemRealtime::TimingClock`.
    TimingClock,
    /// `SystemRealtime::Start`.
    Start,
    /// `SystemRealtime::Continue`.
    Continue,
    /// `SystemRealtime::Stop`.
    Stop,
    /// `SystemRealtime::ActiveSensing`.
    ActiveSensing,
    /// `SystemRealtime::Reset`.
    Reset,
}
impl MessageType {
    /// Classify a status byte.
    ///
    /// Channel statuses (`0x80..=0xEF`) map to the message type of their top nibble; Control
    /// Change statuses always map to `ControlChange`, since the controller number is not known
    /// yet.
    /// Returns `None` for data bytes and undefined status bytes.
    pub fn from_status(status: u8) -> Option<MessageType> {
        use MessageType::*;
        Some(match status {
            0x80..=0x8F => NoteOff,
            0x90..=0x9F => NoteOn,
            0xA0..=0xAF => KeyPressure,
            0xB0..=0xBF => ControlChange,
            0xC0..=0xCF => ProgramChange,
            0xD0..=0xDF => ChannelPressure,
            0xE0..=0xEF => PitchBend,
            0xF0 => SysExStart,
            0xF1 => MtcQuarterFrame,
            0xF2 => SongPosition,
            0xF3 => SongSelect,
            0xF6 => TuneRequest,
            0xF7 => SysExEnd,
            0xF8 => TimingClock,
            0xFA => Start,
            0xFB => Continue,
            0xFC => Stop,
            0xFE => ActiveSensing,
            0xFF => Reset,
            _ => return None,
        })
    }

    /// Whether messages of this type carry a channel.
    pub fn is_channel(self) -> bool {
        use MessageType::*;
        matches!(
            self,
            NoteOff
                | NoteOn
                | KeyPressure
                | ControlChange
                | ChannelMode(_)
                | ProgramChange
                | ChannelPressure
                | PitchBend
        )
    }

    /// Whether this is a System Realtime message type, which may interrupt any other message.
    pub fn is_realtime(self) -> bool {
        use MessageType::*;
        matches!(
            self,
            TimingClock | Start | Continue | Stop | ActiveSensing | Reset
        )
    }
}
