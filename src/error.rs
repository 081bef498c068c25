use core::fmt;

/// Represents an error while decoding a MIDI packet.
///
/// This type is a thin pointer to a static `ErrorKind`.
///
/// If the `std` feature is enabled, this type implements `std::error::Error`.
/// Otherwise, only `Display` and `Debug` are implemented.
///
/// Note that the byte-wise [`MidiStream`](struct.MidiStream.html) decoder never produces errors:
/// bytes it cannot make sense of are silently absorbed.
/// Errors only come up when decoding whole packets through
/// [`LiveEvent::parse`](enum.LiveEvent.html#method.parse).
#[derive(Copy, Clone)]
pub struct Error {
    inner: &'static ErrorKind,
}
impl Error {
    /// Create a new error with the given `ErrorKind`.
    #[inline]
    pub fn new(kind: &'static ErrorKind) -> Error {
        Error { inner: kind }
    }

    /// More information about the error itself.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        *self.inner
    }
}
impl From<&'static ErrorKind> for Error {
    #[inline]
    fn from(inner: &'static ErrorKind) -> Error {
        Error { inner }
    }
}
impl PartialEq for Error {
    fn eq(&self, rhs: &Error) -> bool {
        self.kind() == rhs.kind()
    }
}
impl fmt::Display for Error {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self.inner, f)
    }
}
impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}
#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// The type of error that occurred while decoding.
///
/// Errors are broadly categorized into 2 classes, and specific error info is provided as a
/// non-normative string literal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The bytes do not form a MIDI message.
    ///
    /// Nothing could be rescued from the input.
    Invalid(&'static str),

    /// A message could be decoded, but the input does not comply with the MIDI standard.
    ///
    /// This kind of error is not emitted by default, only if the `strict` crate feature is
    /// enabled.
    Malformed(&'static str),
}
impl ErrorKind {
    /// Get the informative message on what exact part of the MIDI standard was not respected.
    #[inline]
    pub fn message(&self) -> &'static str {
        match *self {
            ErrorKind::Invalid(msg) => msg,
            ErrorKind::Malformed(msg) => msg,
        }
    }
}
impl fmt::Display for ErrorKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::Invalid(msg) => write!(f, "invalid midi: {}", msg),
            ErrorKind::Malformed(msg) => write!(f, "malformed midi: {}", msg),
        }
    }
}

macro_rules! err_invalid {
    ($msg:expr) => {{
        const ERR_KIND: &'static ErrorKind = &ErrorKind::Invalid($msg);
        ERR_KIND
    }};
}
macro_rules! err_malformed {
    ($msg:expr) => {{
        const ERR_KIND: &'static ErrorKind = &ErrorKind::Malformed($msg);
        ERR_KIND
    }};
}

/// The result type used by the MIDI decoder.
pub type Result<T> = StdResult<T, Error>;
pub(crate) use core::result::Result as StdResult;
