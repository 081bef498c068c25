//! Exotically-sized integers used throughout the MIDI wire format.
//!
//! Every MIDI data byte carries 7 bits, channels are 4 bits wide and the two-byte values
//! (pitch bend, song position) are 14 bits.

use crate::prelude::*;

/// Slightly restricted integers.
macro_rules! restricted_int {
    {$(#[$attr:meta])* $name:ident : $inner:tt => $bits:expr} => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Default)]
        #[repr(transparent)]
        #[allow(non_camel_case_types)]
        pub struct $name($inner);
        impl From<$inner> for $name {
            /// Lossy conversion, loses top bits.
            #[inline]
            fn from(raw: $inner) -> $name {
                $name::from_int_lossy(raw)
            }
        }
        impl From<$name> for $inner {
            #[inline]
            fn from(restricted: $name) -> $inner {restricted.0}
        }
        impl fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
        impl $name {
            const MASK: $inner = (1 << $bits) - 1;

            /// The maximum value that this restricted integer can hold.
            #[inline]
            pub const fn max_value() -> $name {
                $name (Self::MASK)
            }

            /// Creates a restricted int from its non-restricted counterpart by masking off the
            /// extra bits.
            #[inline]
            pub const fn new(raw: $inner) -> $name {
                $name (raw & Self::MASK)
            }

            /// Creates a restricted int from its non-restricted counterpart by masking off the
            /// extra bits.
            #[inline]
            pub const fn from_int_lossy(raw: $inner) -> $name {
                $name (raw & Self::MASK)
            }

            /// Returns `Some` if the raw integer is within range of the restricted integer, and
            /// `None` otherwise.
            #[inline]
            pub fn try_from(raw: $inner) -> Option<$name> {
                if raw <= Self::MASK {
                    Some($name(raw))
                } else {
                    None
                }
            }

            /// Get the inner integer out of the wrapper.
            /// The inner integer is guaranteed to be in range of the restricted wrapper.
            #[inline]
            pub const fn as_int(self) -> $inner {
                self.0
            }
        }
        impl PartialEq<$inner> for $name {
            fn eq(&self, rhs: &$inner) -> bool {
                self.as_int() == *rhs
            }
        }
        impl PartialOrd<$inner> for $name {
            fn partial_cmp(&self, rhs: &$inner) -> Option<core::cmp::Ordering> {
                Some(self.as_int().cmp(rhs))
            }
        }
        impl PartialEq<$name> for $inner {
            fn eq(&self, rhs: &$name) -> bool {
                *self == rhs.as_int()
            }
        }
        impl PartialOrd<$name> for $inner {
            fn partial_cmp(&self, rhs: &$name) -> Option<core::cmp::Ordering> {
                Some(self.cmp(&rhs.as_int()))
            }
        }
    };
}
restricted_int! {
    /// A 4-bit integer, used for MIDI channels (`0..=15`) and MTC quarter frame values.
    u4: u8 => 4
}
restricted_int! {
    /// A 7-bit integer, the payload of a single MIDI data byte.
    u7: u8 => 7
}
restricted_int! {
    /// A 14-bit integer, assembled from two MIDI data bytes.
    u14: u16 => 14
}

impl u14 {
    /// Combine two data bytes, least significant byte first, as they appear on the wire in
    /// Pitch Bend and Song Position Pointer messages.
    #[inline]
    pub fn from_u7_pair(lsb: u7, msb: u7) -> u14 {
        u14::new((msb.as_int() as u16) << 7 | lsb.as_int() as u16)
    }

    /// Split into `(lsb, msb)` data bytes, the reverse of `from_u7_pair`.
    #[inline]
    pub fn split_u7(self) -> (u7, u7) {
        (
            u7::from_int_lossy(self.0 as u8),
            u7::from_int_lossy((self.0 >> 7) as u8),
        )
    }
}
