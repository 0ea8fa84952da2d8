//! Serial focuser protocol.
//!
//! Commands arrive as frames like `:SN0064#`: a start marker `:`, a
//! two-character action code, an optional hexadecimal argument, and a
//! terminator `#`. Responses are a payload followed by `#`.

mod action;
mod decoder;
mod parse_command;
mod response;

pub use action::ActionCode;
pub use decoder::{Decoder, Frame};
pub use parse_command::{parse_command, Command};
pub use response::{respond, respond_hex2, respond_hex4};

use ufmt_macros::uDebug;

/// Start of a command frame.
pub const START_MARKER: u8 = b':';
/// End of a command frame, and of every response.
pub const TERMINATOR: u8 = b'#';

/// Problems found while decoding a frame.
///
/// None of these stop a command from being dispatched.
#[derive(Debug, uDebug, PartialEq, Clone, Copy)]
pub enum Error {
    /// The argument of a command was not a hexadecimal `i32`.
    MalformedArgument(ActionCode),
    /// The frame was longer than the decoder buffer; the tail was dropped.
    FrameOverflow,
}
