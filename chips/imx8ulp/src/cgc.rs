// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Clock Generation Controller outputs.
//!
//! The CGC produces the clocks the PCC multiplexers select from. Only the
//! names of those clocks live here; programming the CGC and computing its
//! output frequencies is done elsewhere and reached through [`CgcRate`].

/// A CGC output that can feed a PCC slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CgcClock {
    /// Unconnected mux input.
    Dummy0,
    /// Unconnected mux input.
    Dummy1,
    /// Low power oscillator
    Lposc,
    SoscDiv1,
    SoscDiv2,
    /// Fast internal reference oscillator, divider 1
    FroDiv1,
    FroDiv2,
    /// Crossbar bus clock after its divider
    XbarDivBus,
    /// LPAV domain bus clock
    LpavBusClk,
    Pll3VcoDiv,
    Pll3Pfd0Div1,
    Pll3Pfd0Div2,
    Pll3Pfd1Div1,
    Pll3Pfd1Div2,
    Pll3Pfd2Div1,
    Pll3Pfd3Div1,
    Pll4VcoDiv,
    Pll4Pfd0Div1,
    Pll4Pfd1Div1,
    Pll4Pfd2Div1,
    Pll4Pfd3Div1,
}

impl CgcClock {
    /// Whether this is a placeholder for an unconnected mux input.
    pub fn is_dummy(self) -> bool {
        matches!(self, CgcClock::Dummy0 | CgcClock::Dummy1)
    }
}

/// Provider of the current CGC output frequencies.
pub trait CgcRate {
    /// Frequency of `clock` in Hz, or `None` when it is off or unknown.
    fn rate(&self, clock: CgcClock) -> Option<u32>;
}
