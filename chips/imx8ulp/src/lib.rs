// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Peripheral drivers for the NXP i.MX8ULP.
//!
//! Only the peripheral clock controllers (PCC1, PCC3, PCC4 and PCC5) are
//! modeled. Each controller gates, muxes, divides and resets the peripherals
//! attached to one of its slots.

#![no_std]

// This is used to run the tests on a host
#[cfg(test)]
#[macro_use]
extern crate std;

pub mod cgc;
pub mod pcc;
pub mod pcc_slots;
