//! Channel Voice and Channel Mode messages, the bulk of any MIDI stream.

use crate::{live::MessageType, prelude::*};

/// Represents a MIDI message associated to a MIDI channel.
///
/// The channel itself is carried by [`LiveEvent::Midi`](enum.LiveEvent.html#variant.Midi).
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum MidiMessage {
    /// Stop playing a note.
    ///
    /// A `NoteOn` with a velocity of 0 is decoded as a `NoteOff` with a velocity of 0.
    NoteOff {
        /// The MIDI note to stop playing.
        note: u7,
        /// The velocity with which to stop playing it.
        velocity: u7,
    },
    /// Start playing a note.
    NoteOn {
        /// The note to start playing.
        note: u7,
        /// The velocity (strength) with which to press it. Never 0 when decoded.
        velocity: u7,
    },
    /// Polyphonic key pressure: modify the pressure of a note after it has been played.
    KeyPressure {
        /// The note for which to modify its pressure.
        key: u7,
        /// The new pressure for the key.
        pressure: u7,
    },
    /// Modify the value of a MIDI controller.
    ///
    /// Controllers `120..=127` are never decoded into this variant, see `ChannelMode`.
    Controller {
        /// The controller to modify.
        controller: Controller,
        /// The value to set it to.
        value: u7,
    },
    /// A Channel Mode message, sent on the wire as a Control Change to one of the reserved
    /// controllers `120..=127`.
    ChannelMode {
        /// Which mode message was sent.
        mode: ChannelMode,
        /// The controller value, meaningful only for some modes (eg. `LocalControl` and
        /// `MonoOn`).
        value: u7,
    },
    /// Change the program (also known as instrument) for a channel.
    ProgramChange {
        /// The new program (instrument) to use for the channel.
        program: u7,
    },
    /// Change the pressure of a whole channel at once, without starting new notes.
    ChannelPressure {
        /// The new pressure for all notes currently playing in the channel.
        pressure: u7,
    },
    /// Set the pitch bend value for the entire channel.
    PitchBend {
        /// The new pitch-bend value.
        bend: PitchBend,
    },
}
impl MidiMessage {
    /// The amount of data bytes that follow a channel status byte.
    pub(crate) fn msg_length(status: u8) -> usize {
        const LENGTH_BY_STATUS: [u8; 16] = [0, 0, 0, 0, 0, 0, 0, 0, 2, 2, 2, 2, 1, 1, 2, 0];
        LENGTH_BY_STATUS[(status >> 4) as usize] as usize
    }

    /// Receives status byte and midi args separately.
    ///
    /// Unused data bytes (for one-byte messages) are ignored.
    /// Returns `None` if the `status` is not a MIDI channel status (`0x80..=0xEF`).
    pub(crate) fn read(status: u8, data: [u7; 2]) -> Option<(u4, MidiMessage)> {
        let channel = u4::from(status);
        let msg = match status >> 4 {
            0x8 => MidiMessage::NoteOff {
                note: data[0],
                velocity: data[1],
            },
            0x9 if data[1].as_int() == 0 => MidiMessage::NoteOff {
                note: data[0],
                velocity: data[1],
            },
            0x9 => MidiMessage::NoteOn {
                note: data[0],
                velocity: data[1],
            },
            0xA => MidiMessage::KeyPressure {
                key: data[0],
                pressure: data[1],
            },
            0xB => match ChannelMode::from_controller(Controller(data[0])) {
                Some(mode) => MidiMessage::ChannelMode {
                    mode,
                    value: data[1],
                },
                None => MidiMessage::Controller {
                    controller: Controller(data[0]),
                    value: data[1],
                },
            },
            0xC => MidiMessage::ProgramChange { program: data[0] },
            0xD => MidiMessage::ChannelPressure { pressure: data[0] },
            0xE => {
                //Note the little-endian order
                MidiMessage::PitchBend {
                    bend: PitchBend(u14::from_u7_pair(data[0], data[1])),
                }
            }
            _ => return None,
        };
        Some((channel, msg))
    }

    /// Get the raw status nibble for this MIDI message type.
    pub(crate) fn status_nibble(&self) -> u8 {
        match self {
            MidiMessage::NoteOff { .. } => 0x8,
            MidiMessage::NoteOn { .. } => 0x9,
            MidiMessage::KeyPressure { .. } => 0xA,
            MidiMessage::Controller { .. } | MidiMessage::ChannelMode { .. } => 0xB,
            MidiMessage::ProgramChange { .. } => 0xC,
            MidiMessage::ChannelPressure { .. } => 0xD,
            MidiMessage::PitchBend { .. } => 0xE,
        }
    }

    /// Write the data part of this message, not including the status.
    pub(crate) fn write<W: Write>(&self, out: &mut W) -> WriteResult<W> {
        match self {
            MidiMessage::NoteOff { note, velocity } | MidiMessage::NoteOn { note, velocity } => {
                out.write(&[note.as_int(), velocity.as_int()])
            }
            MidiMessage::KeyPressure { key, pressure } => {
                out.write(&[key.as_int(), pressure.as_int()])
            }
            MidiMessage::Controller { controller, value } => {
                out.write(&[controller.0.as_int(), value.as_int()])
            }
            MidiMessage::ChannelMode { mode, value } => {
                out.write(&[mode.controller().0.as_int(), value.as_int()])
            }
            MidiMessage::ProgramChange { program } => out.write(&[program.as_int()]),
            MidiMessage::ChannelPressure { pressure } => out.write(&[pressure.as_int()]),
            MidiMessage::PitchBend { bend } => {
                let (lsb, msb) = bend.0.split_u7();
                out.write(&[lsb.as_int(), msb.as_int()])
            }
        }
    }

    /// The kind of this message, as reported by
    /// [`LiveEvent::message_type`](enum.LiveEvent.html#method.message_type).
    pub fn message_type(&self) -> MessageType {
        match self {
            MidiMessage::NoteOff { .. } => MessageType::NoteOff,
            MidiMessage::NoteOn { .. } => MessageType::NoteOn,
            MidiMessage::KeyPressure { .. } => MessageType::KeyPressure,
            MidiMessage::Controller { .. } => MessageType::ControlChange,
            MidiMessage::ChannelMode { mode, .. } => MessageType::ChannelMode(*mode),
            MidiMessage::ProgramChange { .. } => MessageType::ProgramChange,
            MidiMessage::ChannelPressure { .. } => MessageType::ChannelPressure,
            MidiMessage::PitchBend { .. } => MessageType::PitchBend,
        }
    }

    /// The controller number of a `Controller` or `ChannelMode` message.
    pub fn controller(&self) -> Option<Controller> {
        match self {
            MidiMessage::Controller { controller, .. } => Some(*controller),
            MidiMessage::ChannelMode { mode, .. } => Some(mode.controller()),
            _ => None,
        }
    }

    /// The controller value of a `Controller` or `ChannelMode` message.
    pub fn control_value(&self) -> Option<u7> {
        match self {
            MidiMessage::Controller { value, .. } | MidiMessage::ChannelMode { value, .. } => {
                Some(*value)
            }
            _ => None,
        }
    }
}

/// The value of a pitch bend, represented as 14 bits.
///
/// A value of `0x0000` indicates full bend downwards.
/// A value of `0x2000` indicates no bend.
/// A value of `0x3FFF` indicates full bend upwards.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct PitchBend(pub u14);
impl PitchBend {
    /// The middle value of `0x2000`, indicating no bend.
    #[inline]
    pub const fn mid_raw_value() -> PitchBend {
        PitchBend(u14::new(0x2000))
    }

    /// Create a `PitchBend` value from an int in the range `[-0x2000, 0x1FFF]`.
    ///
    /// Integers outside this range will be clamped.
    #[inline]
    pub fn from_int(int: i16) -> PitchBend {
        PitchBend(u14::new((int.max(-0x2000).min(0x1FFF) + 0x2000) as u16))
    }

    /// Returns an int in the range `[-0x2000, 0x1FFF]`.
    #[inline]
    pub fn as_int(self) -> i16 {
        self.0.as_int() as i16 - 0x2000
    }

    /// Returns an `f32` in the range `[-1.0, 1.0)`.
    #[inline]
    pub fn as_f32(self) -> f32 {
        self.as_int() as f32 * (1.0 / 0x2000 as f32)
    }
}

/// A MIDI controller number, as carried by Control Change messages.
///
/// Any 7-bit number is a valid controller; the associated constants name the ones the
/// MIDI 1.0 standard assigns a meaning to.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct Controller(pub u7);

macro_rules! named_controllers {
    {$( $(#[$attr:meta])* $name:ident = $num:expr; )*} => {
        impl Controller {
            $(
                $(#[$attr])*
                pub const $name: Controller = Controller(u7::new($num));
            )*
        }
    };
}
named_controllers! {
    BANK_SELECT = 0x00;
    MOD_WHEEL = 0x01;
    BREATH_CONTROLLER = 0x02;
    FOOT_CONTROLLER = 0x04;
    PORTAMENTO_TIME = 0x05;
    DATA_ENTRY_MSB = 0x06;
    CHANNEL_VOLUME = 0x07;
    BALANCE = 0x08;
    PAN = 0x0A;
    EXPRESSION_CONTROLLER = 0x0B;
    EFFECT_CONTROL_1 = 0x0C;
    EFFECT_CONTROL_2 = 0x0D;
    GENERAL_PURPOSE_1 = 0x10;
    GENERAL_PURPOSE_2 = 0x11;
    GENERAL_PURPOSE_3 = 0x12;
    GENERAL_PURPOSE_4 = 0x13;
    /// Controllers `0x20..=0x3F` are the least significant bytes of controllers `0x00..=0x1F`.
    BANK_SELECT_LSB = 0x20;
    MOD_WHEEL_LSB = 0x21;
    BREATH_CONTROLLER_LSB = 0x22;
    FOOT_CONTROLLER_LSB = 0x24;
    PORTAMENTO_TIME_LSB = 0x25;
    DATA_ENTRY_LSB = 0x26;
    CHANNEL_VOLUME_LSB = 0x27;
    BALANCE_LSB = 0x28;
    PAN_LSB = 0x2A;
    EXPRESSION_CONTROLLER_LSB = 0x2B;
    EFFECT_CONTROL_1_LSB = 0x2C;
    EFFECT_CONTROL_2_LSB = 0x2D;
    GENERAL_PURPOSE_1_LSB = 0x30;
    GENERAL_PURPOSE_2_LSB = 0x31;
    GENERAL_PURPOSE_3_LSB = 0x32;
    GENERAL_PURPOSE_4_LSB = 0x33;
    /// Damper pedal. Values `<= 63` are off, `>= 64` are on.
    SUSTAIN_PEDAL = 0x40;
    PORTAMENTO_ON_OFF = 0x41;
    SOSTENUTO = 0x42;
    SOFT_PEDAL = 0x43;
    LEGATO_FOOTSWITCH = 0x44;
    HOLD_2 = 0x45;
    SOUND_CONTROLLER_1 = 0x46;
    SOUND_CONTROLLER_2 = 0x47;
    SOUND_CONTROLLER_3 = 0x48;
    SOUND_CONTROLLER_4 = 0x49;
    SOUND_CONTROLLER_5 = 0x4A;
    SOUND_CONTROLLER_6 = 0x4B;
    SOUND_CONTROLLER_7 = 0x4C;
    SOUND_CONTROLLER_8 = 0x4D;
    SOUND_CONTROLLER_9 = 0x4E;
    SOUND_CONTROLLER_10 = 0x4F;
    GENERAL_PURPOSE_5 = 0x50;
    GENERAL_PURPOSE_6 = 0x51;
    GENERAL_PURPOSE_7 = 0x52;
    GENERAL_PURPOSE_8 = 0x53;
    PORTAMENTO_CONTROL = 0x54;
    EFFECT_1_DEPTH = 0x5B;
    EFFECT_2_DEPTH = 0x5C;
    EFFECT_3_DEPTH = 0x5D;
    EFFECT_4_DEPTH = 0x5E;
    EFFECT_5_DEPTH = 0x5F;
    DATA_INCREMENT = 0x60;
    DATA_DECREMENT = 0x61;
    NRPN_LSB = 0x62;
    NRPN_MSB = 0x63;
    RPN_LSB = 0x64;
    RPN_MSB = 0x65;
    ALL_SOUND_OFF = 0x78;
    RESET_ALL_CONTROLLERS = 0x79;
    LOCAL_CONTROL = 0x7A;
    ALL_NOTES_OFF = 0x7B;
    OMNI_OFF = 0x7C;
    OMNI_ON = 0x7D;
    MONO_ON = 0x7E;
    POLY_ON = 0x7F;
}
impl From<u7> for Controller {
    #[inline]
    fn from(num: u7) -> Controller {
        Controller(num)
    }
}

/// The Channel Mode messages, Control Change messages on the reserved controllers `120..=127`.
///
/// All of these except `ResetAllControllers` and `LocalControl` also function as an All Notes
/// Off.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum ChannelMode {
    /// Controller 120.
    AllSoundOff,
    /// Controller 121.
    ResetAllControllers,
    /// Controller 122. A value of 0 turns local control off, 127 turns it on.
    LocalControl,
    /// Controller 123.
    AllNotesOff,
    /// Controller 124.
    OmniOff,
    /// Controller 125.
    OmniOn,
    /// Controller 126. The value is the amount of channels to use, or 0 for as many as there
    /// are voices.
    MonoOn,
    /// Controller 127.
    PolyOn,
}
impl ChannelMode {
    /// Get the Channel Mode message for the given controller, if it is one of the reserved
    /// controllers.
    pub fn from_controller(controller: Controller) -> Option<ChannelMode> {
        use ChannelMode::*;
        Some(match controller.0.as_int() {
            120 => AllSoundOff,
            121 => ResetAllControllers,
            122 => LocalControl,
            123 => AllNotesOff,
            124 => OmniOff,
            125 => OmniOn,
            126 => MonoOn,
            127 => PolyOn,
            _ => return None,
        })
    }

    /// The reserved controller this mode message is sent on.
    pub fn controller(self) -> Controller {
        use ChannelMode::*;
        match self {
            AllSoundOff => Controller::ALL_SOUND_OFF,
            ResetAllControllers => Controller::RESET_ALL_CONTROLLERS,
            LocalControl => Controller::LOCAL_CONTROL,
            AllNotesOff => Controller::ALL_NOTES_OFF,
            OmniOff => Controller::OMNI_OFF,
            OmniOn => Controller::OMNI_ON,
            MonoOn => Controller::MONO_ON,
            PolyOn => Controller::POLY_ON,
        }
    }
}
