//! # Overview
//!
//! `midiwire` is a decoder for raw MIDI 1.0 byte streams, the kind that comes out of a serial
//! port wired to a 5-pin MIDI input.
//! It takes one byte at a time and hands back a complete message as soon as the byte that
//! completes it arrives.
//!
//! Usage is as simple as:
//!
//! ```rust
//! use midiwire::{LiveEvent, MidiStream};
//!
//! let mut stream = MidiStream::new();
//! for &byte in &[0x90, 60, 100, 0xF8, 0x80, 60, 0] {
//!     if let Some(event) = stream.feed_byte(byte) {
//!         println!("{:?} on channel {:?}", event.message_type(), event.channel());
//!     }
//! }
//! ```
//!
//! The [`MidiStream`](struct.MidiStream.html) struct is the main type in the crate.
//! It holds only a handful of bytes of state: the running status, up to two data bytes of the
//! message being assembled and an optional channel filter.
//!
//! # Stream semantics
//!
//! - Channel messages use running status: once a status byte has been received, any number of
//!   messages of the same kind can follow by sending only their data bytes.
//! - System Realtime messages (`0xF8..=0xFF`) are returned immediately and never disturb a
//!   message in progress, even between its data bytes.
//!   Undefined status bytes (`0xF4`, `0xF5`, `0xF9`, `0xFD`) are dropped in the same
//!   non-disturbing way.
//! - A `NoteOn` with velocity 0 is returned as a `NoteOff`.
//! - Control Changes on controllers `120..=127` are returned as
//!   [`MidiMessage::ChannelMode`](enum.MidiMessage.html#variant.ChannelMode).
//! - System Exclusive blocks are reported as a `SysExStart` when `0xF0` arrives and a
//!   `SysExEnd` when `0xF7` arrives. The bytes in between are dropped.
//! - A new status byte arriving before the current message is complete silently abandons it.
//!
//! # Writing MIDI
//!
//! Decoded messages can be turned back into MIDI bytes:
//!
//! ```rust
//! use midiwire::{io::Cursor, num::{u4, u7}, LiveEvent, MidiMessage};
//!
//! let ev = LiveEvent::Midi {
//!     channel: u4::new(3),
//!     message: MidiMessage::ProgramChange { program: u7::new(42) },
//! };
//! let mut buf = [0; 3];
//! let mut cursor = Cursor::new(&mut buf);
//! ev.write(&mut cursor).unwrap();
//! assert_eq!(cursor.written(), &[0xC3, 42]);
//! ```
//!
//! # About features
//!
//! - The `std` feature
//!
//!   Implements `std::error::Error` for the error type and allows writing messages straight
//!   into a `std::io::Write`.
//!   Enabled by default.
//!   Disabling it with `default-features = false` makes the crate `no_std`.
//!
//! - The `alloc` feature
//!
//!   Allows writing messages into a `Vec<u8>`.
//!   Enabled by default, implied by `std`.
//!
//! - The `strict` feature
//!
//!   By default [`LiveEvent::parse`](enum.LiveEvent.html#method.parse) ignores leftover data
//!   bytes after a complete message.
//!   With `strict`, these raise an `ErrorKind::Malformed` error instead.
//!
//! # Logging
//!
//! Dropped bytes and abandoned messages are reported through the [`log`](https://docs.rs/log)
//! facade, at the `trace` and `debug` levels.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

macro_rules! bail {
    ($err:expr) => {{
        return Err($err.into());
    }};
}
macro_rules! ensure {
    ($cond:expr, $err:expr) => {{
        if !$cond {
            bail!($err)
        }
    }};
}

/// All of the errors this crate produces.
#[macro_use]
mod error;

mod prelude {
    pub(crate) use crate::{
        error::{ErrorKind, Result, StdResult},
        io::{Write, WriteResult},
        primitive::{u14, u4, u7},
    };
    #[cfg(feature = "alloc")]
    pub(crate) use alloc::vec::Vec;
    pub(crate) use core::fmt;
    #[cfg(feature = "std")]
    pub(crate) use crate::io::IoWrap;
    #[cfg(feature = "std")]
    pub(crate) use std::io;
}

mod event;
pub mod io;
mod live;
mod primitive;
mod stream;

pub use crate::{
    error::{Error, ErrorKind, Result},
    event::{ChannelMode, Controller, MidiMessage, PitchBend},
    live::{LiveEvent, MessageType, MtcQuarterFrameMessage, SystemCommon, SystemRealtime},
    stream::MidiStream,
};

/// Exotically-sized integers used by the MIDI standard.
pub mod num {
    pub use crate::primitive::{u14, u4, u7};
}
