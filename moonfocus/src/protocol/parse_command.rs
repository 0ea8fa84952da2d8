use ufmt_macros::uDebug;
use winnow::ascii::hex_digit1;
use winnow::combinator::opt;
use winnow::token::one_of;
use winnow::{Parser, Result};

use super::{ActionCode, Error};

/// A decoded command.
#[derive(Debug, uDebug, PartialEq, Clone, Copy)]
pub struct Command {
    pub action: ActionCode,
    pub value: i32,
}
impl Command {
    /// Creates a new `Command`.
    pub fn new(action: ActionCode, value: i32) -> Self {
        Self { action, value }
    }
}

/// Parses the payload of a frame (the text between `:` and `#`).
///
/// The action is the first two characters of the payload, or the only
/// character if there is just one. For codes that take an argument, the
/// rest of the payload must be a signed hexadecimal `i32`; an empty
/// argument reads as zero. Trailing characters after any other code are
/// ignored.
///
/// # Returns
///
/// - `Ok(command)`: if the payload was well formed.
/// - `Err(Error::MalformedArgument(action))`: if the argument could not be
///   parsed.
pub fn parse_command(payload: &str) -> core::result::Result<Command, Error> {
    let (code, argument) = split_action(payload);
    let action = ActionCode::from_code(code);
    if !action.takes_argument() || argument.is_empty() {
        return Ok(Command::new(action, 0));
    }
    parse_hex_i32
        .parse(argument)
        .map(|value| Command::new(action, value))
        .map_err(|_| Error::MalformedArgument(action))
}

/// Splits a payload into its action code and the remainder.
fn split_action(payload: &str) -> (&str, &str) {
    match payload.char_indices().nth(2) {
        Some((index, _)) => payload.split_at(index),
        None => (payload, ""),
    }
}

/// Parse an optionally signed hexadecimal number as an `i32`.
fn parse_hex_i32(input: &mut &str) -> Result<i32> {
    (opt(one_of(['+', '-'])), hex_digit1)
        .try_map(|(sign, digits): (Option<char>, &str)| {
            let magnitude = i64::from_str_radix(digits, 16)
                .map_err(|_| "too many hex digits")?;
            let value = match sign {
                Some('-') => -magnitude,
                _ => magnitude,
            };
            i32::try_from(value).map_err(|_| "hex value out of range")
        })
        .parse_next(input)
}
