// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Core kernel crate.
//!
//! Holds the shared code that chips and capsules use: the standard
//! [`ErrorCode`], the `debug!` output path, compile-time configuration, the
//! Hardware Interface Layer (HIL) definitions for SPI NAND, and the register
//! access utilities chip drivers build on.
//!
//! Most `unsafe` code is in this crate.

#![warn(unreachable_pub)]
#![no_std]

// This is used to run the tests on a host
#[cfg(test)]
#[macro_use]
extern crate std;

pub mod config;
pub mod debug;
pub mod errorcode;
pub mod hil;
pub mod platform;
pub mod utilities;

pub use crate::errorcode::ErrorCode;
