use heapless::Vec;

use super::{parse_command, ActionCode, Command, Error, START_MARKER, TERMINATOR};
use crate::config::FRAME_CAPACITY;

/// Length of an action code in bytes.
const ACTION_LEN: usize = 2;

/// A complete frame, ready for dispatch.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Frame {
    /// Command to dispatch. A malformed argument reads as zero.
    pub command: Command,
    /// Anything that went wrong while decoding, for logging.
    pub error: Option<Error>,
}

/// Byte-at-a-time frame decoder.
///
/// The decoder owns the buffer for the frame in progress, so that bytes
/// can be fed as they trickle in from the serial port.
pub struct Decoder {
    buffer: Vec<u8, FRAME_CAPACITY>,
    in_frame: bool,
    overflowed: bool,
}
impl Decoder {
    /// Creates a new decoder, waiting for the start of a frame.
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            in_frame: false,
            overflowed: false,
        }
    }

    /// Feeds one byte to the decoder.
    ///
    /// A start marker discards any partial frame and begins a new one.
    /// Bytes outside a frame are ignored.
    ///
    /// # Returns
    ///
    /// - `Some(frame)`: when `byte` terminated a frame.
    /// - `None`: otherwise.
    pub fn feed(&mut self, byte: u8) -> Option<Frame> {
        match byte {
            START_MARKER => {
                self.buffer.clear();
                self.in_frame = true;
                self.overflowed = false;
                None
            }
            TERMINATOR if self.in_frame => {
                self.in_frame = false;
                Some(self.finish())
            }
            _ if self.in_frame => {
                self.push(byte);
                None
            }
            _ => None,
        }
    }

    /// Buffers one payload byte.
    ///
    /// Leading zeros of the argument are collapsed as they arrive, so a
    /// zero-padded argument of any length takes no more room than its
    /// significant digits.
    fn push(&mut self, byte: u8) {
        if byte.is_ascii_hexdigit() && self.argument_digits() == b"0" {
            if let Some(last) = self.buffer.last_mut() {
                *last = byte;
            }
            return;
        }
        if self.buffer.push(byte).is_err() {
            self.overflowed = true;
        }
    }

    /// Digits of the argument buffered so far, after the action code and
    /// any sign.
    fn argument_digits(&self) -> &[u8] {
        let argument = self.buffer.get(ACTION_LEN..).unwrap_or(&[]);
        match argument.first() {
            Some(b'+') | Some(b'-') => &argument[1..],
            _ => argument,
        }
    }

    /// Parses the buffered frame.
    fn finish(&mut self) -> Frame {
        let parsed = match core::str::from_utf8(&self.buffer) {
            Ok(payload) => parse_command(payload),
            Err(_) => Ok(Command::new(ActionCode::Unrecognized, 0)),
        };
        let (mut command, mut error) = match parsed {
            Ok(command) => (command, None),
            Err(error @ Error::MalformedArgument(action)) => {
                (Command::new(action, 0), Some(error))
            }
            Err(error) => {
                (Command::new(ActionCode::Unrecognized, 0), Some(error))
            }
        };
        if self.overflowed {
            error = Some(Error::FrameOverflow);
            // The tail of the argument is lost, so a setter would act on a
            // wrong value. Drop it instead.
            if command.action.takes_argument() {
                command = Command::new(ActionCode::Unrecognized, 0);
            }
        }
        self.buffer.clear();
        Frame { command, error }
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}
