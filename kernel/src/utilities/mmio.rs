// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Word-sized access to memory-mapped peripheral registers.
//!
//! Chip drivers whose register blocks are addressed by computed offsets
//! (`base + 4 * index`) rather than by a fixed `register_structs!` layout go
//! through [`RegisterAccess`]. Production code uses [`Mmio`]; unit tests
//! substitute an in-memory register file.

/// Raw 32-bit register reads and writes.
///
/// Implementations perform exactly one bus access per call and never cache
/// values, so every read observes live hardware state.
pub trait RegisterAccess {
    fn read32(&self, address: usize) -> u32;
    fn write32(&self, address: usize, value: u32);
}

/// Volatile accesses to physical addresses.
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// Create an accessor for the physical address space.
    ///
    /// # Safety
    ///
    /// Every address later passed to `read32` / `write32` must be a valid,
    /// 4-byte aligned MMIO register that is safe to access from this
    /// context.
    pub const unsafe fn new() -> Mmio {
        Mmio { _private: () }
    }
}

impl RegisterAccess for Mmio {
    fn read32(&self, address: usize) -> u32 {
        // Safety: the creator of `Mmio` guaranteed the address is valid.
        unsafe { core::ptr::read_volatile(address as *const u32) }
    }

    fn write32(&self, address: usize, value: u32) {
        // Safety: the creator of `Mmio` guaranteed the address is valid.
        unsafe { core::ptr::write_volatile(address as *mut u32, value) }
    }
}

#[cfg(test)]
mod tests {
    use super::{Mmio, RegisterAccess};

    #[test]
    fn volatile_round_trip() {
        let mut words = [0u32; 4];
        let base = words.as_mut_ptr() as usize;
        let mmio = unsafe { Mmio::new() };

        mmio.write32(base + 4, 0xC000_0007);
        assert_eq!(mmio.read32(base + 4), 0xC000_0007);
        assert_eq!(mmio.read32(base), 0);
        assert_eq!(words[1], 0xC000_0007);
    }
}
