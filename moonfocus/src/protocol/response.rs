use ufmt::uWrite;

use super::TERMINATOR;

/// Writes a text response, followed by the terminator.
pub fn respond<W>(out: &mut W, text: &str) -> Result<(), W::Error>
where
    W: uWrite + ?Sized,
{
    out.write_str(text)?;
    out.write_char(TERMINATOR as char)
}

/// Writes a value as four uppercase hex digits, followed by the terminator.
///
/// Only the low 16 bits are shown, so negative values appear in two's
/// complement (`-10` is `FFF6`).
pub fn respond_hex4<W>(out: &mut W, value: i32) -> Result<(), W::Error>
where
    W: uWrite + ?Sized,
{
    write_hex_digits::<W, 4>(out, value as u32)?;
    out.write_char(TERMINATOR as char)
}

/// Writes a value as two uppercase hex digits, followed by the terminator.
///
/// Only the low 8 bits are shown.
pub fn respond_hex2<W>(out: &mut W, value: i32) -> Result<(), W::Error>
where
    W: uWrite + ?Sized,
{
    write_hex_digits::<W, 2>(out, value as u32)?;
    out.write_char(TERMINATOR as char)
}

/// Writes the low `N` nibbles of `value`, most significant first.
fn write_hex_digits<W, const N: usize>(
    out: &mut W,
    value: u32,
) -> Result<(), W::Error>
where
    W: uWrite + ?Sized,
{
    const DIGITS: &[u8; 16] = b"0123456789ABCDEF";
    for nibble in (0..N).rev() {
        let digit = (value >> (nibble * 4)) & 0xF;
        out.write_char(DIGITS[digit as usize] as char)?;
    }
    Ok(())
}
