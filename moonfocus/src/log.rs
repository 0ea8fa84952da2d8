//! Diagnostic logging on the serial line.

/// Write a diagnostic line, but only while debugging is switched on.
///
/// The line goes out on the same writer as protocol responses, so nothing
/// is written unless the host asked for it with the `DB` command.
macro_rules! debug {
    ($state:expr, $out:expr, $($arg:tt)*) => {{
        if $state.debug_enabled {
            ufmt::uwriteln!(&mut *$out, $($arg)*).ok();
        }
    }};
}

pub(crate) use debug;
