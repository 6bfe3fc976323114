// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Data structure for storing compile-time configuration options.
//!
//! Configuration lives in a `const` object rather than behind `#[cfg]`
//! attributes so that every code path is type-checked by the compiler, even
//! the ones a given build disables. After type-checking, the compiler folds
//! the constants and removes the dead branches, so a disabled option has no
//! cost in the resulting binary.
//!
//! The values are set from Cargo features of the `kernel` crate. This is the
//! only location in the workspace where `#[cfg(feature = ...)]` is used to
//! configure code.

/// Data structure holding compile-time configuration options.
pub struct Config {
    /// Whether chip drivers should trace every write to a peripheral clock
    /// controller (PCC) slot to the debug output.
    ///
    /// If enabled, each read-modify-write prints the slot, the previous
    /// control word and the new one. Useful when bringing up a board whose
    /// peripherals do not come out of reset.
    pub trace_pcc: bool,

    /// Whether NAND drivers should report unusual ECC status to the debug
    /// output.
    ///
    /// If enabled, a status byte that matches no known ECC band, and every
    /// page that failed with an uncorrectable error, is printed together
    /// with the raw status value.
    pub debug_ecc_status: bool,
}

/// A unique instance of `Config` where compile-time configuration options are
/// defined.
pub const CONFIG: Config = Config {
    trace_pcc: cfg!(feature = "trace_pcc"),
    debug_ecc_status: cfg!(feature = "debug_ecc_status"),
};
