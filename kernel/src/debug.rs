// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Support for in-kernel debugging.
//!
//! For printing, this module provides `debug!`, which works like `println!`
//! and sends the formatted line to whatever [`IoWrite`] sink the board
//! registered with [`set_debug_writer`]. A board that never registers a sink
//! silently drops debug output, so drivers can call `debug!` freely.
//!
//! ```rust,ignore
//! use kernel::debug;
//!
//! debug!("pcc: slot {} not present", slot);
//! ```

use core::fmt::{write, Arguments, Result, Write};
use core::ptr::addr_of_mut;

/// Implementation of `std::io::Write` for `no_std`.
///
/// Boards implement this for their console (usually a UART in polling mode).
pub trait IoWrite {
    /// Write `buf` to the output, returning how many bytes were consumed.
    fn write(&mut self, buf: &[u8]) -> usize;
}

static mut DEBUG_WRITER: Option<&'static mut dyn IoWrite> = None;

/// Register the sink used by `debug!`.
///
/// # Safety
///
/// Must be called once during board setup, before any other context can
/// print. The kernel is single-threaded, so no further synchronisation is
/// done.
pub unsafe fn set_debug_writer(writer: &'static mut dyn IoWrite) {
    unsafe {
        *addr_of_mut!(DEBUG_WRITER) = Some(writer);
    }
}

fn try_get_debug_writer() -> Option<&'static mut dyn IoWrite> {
    // Safety: the kernel runs on a single thread and only `set_debug_writer`
    // mutates the static.
    unsafe { (*addr_of_mut!(DEBUG_WRITER)).as_deref_mut() }
}

struct WriteAdapter<'a>(&'a mut dyn IoWrite);

impl Write for WriteAdapter<'_> {
    fn write_str(&mut self, s: &str) -> Result {
        let mut bytes = s.as_bytes();
        while !bytes.is_empty() {
            let written = self.0.write(bytes);
            if written == 0 {
                return Err(core::fmt::Error);
            }
            bytes = &bytes[written.min(bytes.len())..];
        }
        Ok(())
    }
}

/// Format one debug line (message plus `\r\n`) into `writer`.
pub fn write_debug_line(writer: &mut dyn IoWrite, args: Arguments) {
    let mut adapter = WriteAdapter(writer);
    let _ = write(&mut adapter, args);
    let _ = adapter.write_str("\r\n");
}

/// Backend of the `debug!` macro.
pub fn debug_println(args: Arguments) {
    if let Some(writer) = try_get_debug_writer() {
        write_debug_line(writer, args);
    }
}

/// In-kernel `println()` debugging.
#[macro_export]
macro_rules! debug {
    () => ({
        // Allow an empty debug!() to print an empty line
        $crate::debug!("")
    });
    ($msg:expr $(,)?) => ({
        $crate::debug::debug_println(format_args!($msg));
    });
    ($fmt:expr, $($arg:tt)+) => ({
        $crate::debug::debug_println(format_args!($fmt, $($arg)+));
    });
}
