// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2023.

//! SPI NAND chip support.
//!
//! `device` holds the chip descriptors, the manufacturer registry and the
//! [`device::SpiNand`] handle a NAND driver builds once the chip has been
//! identified. Vendor modules (`esmt`) provide the descriptor tables, the
//! ECC status decoders and the spare-area layouts of their parts.

#![no_std]

// This is used to run the tests on a host
#[cfg(test)]
#[macro_use]
extern crate std;

pub mod device;
pub mod esmt;
