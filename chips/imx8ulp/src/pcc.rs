// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Peripheral Clock Controller (PCC).
//!
//! Each PCC bank holds one 32-bit control word per peripheral slot, at
//! `base + 4 * slot`. The word gates the peripheral clock, selects its source
//! from the CGC outputs, divides it, and drives the peripheral's reset line.
//!
//! Not every slot implements every field. Which fields exist is part of the
//! slot definition (see [`crate::pcc_slots`]); touching a field a slot lacks
//! returns `ErrorCode::NOSUPPORT` instead of writing bits the hardware leaves
//! undefined.
//!
//! Every operation is a fresh read-modify-write of the live register. Nothing
//! is cached, and the read-only `PR` and `INUSE` status bits are written back
//! unchanged. The read-modify-write is not atomic: if more than one context
//! can reach the same bank, the caller must serialize access to it.
//!
//! Usage
//! -----
//!
//! ```rust,ignore
//! use imx8ulp::cgc::CgcClock;
//! use imx8ulp::pcc::Pcc;
//! use imx8ulp::pcc_slots::pcc3;
//! use kernel::utilities::mmio::Mmio;
//!
//! let mmio = unsafe { Mmio::new() };
//! let pcc = Pcc::new(&mmio);
//!
//! pcc.set_enable(pcc3::LPUART5, false)?;
//! pcc.select_source(pcc3::LPUART5, CgcClock::SoscDiv2)?;
//! pcc.configure_divider(pcc3::LPUART5, false, 1)?;
//! pcc.assert_reset(pcc3::LPUART5, false)?;
//! pcc.set_enable(pcc3::LPUART5, true)?;
//! ```

use core::fmt;

use kernel::config::CONFIG;
use kernel::debug;
use kernel::platform::chip::ClockInterface;
use kernel::utilities::mmio::RegisterAccess;
use kernel::utilities::registers::{register_bitfields, FieldValue, LocalRegisterCopy};
use kernel::ErrorCode;

use crate::cgc::{CgcClock, CgcRate};

register_bitfields![u32,
    pub PCC [
        /// Peripheral present (read-only)
        PR OFFSET(31) NUMBITS(1) [],
        /// Clock gate control
        CGC OFFSET(30) NUMBITS(1) [],
        /// Peripheral in use by another domain (read-only)
        INUSE OFFSET(29) NUMBITS(1) [],
        /// Peripheral software reset, active low
        SWRST OFFSET(28) NUMBITS(1) [
            Asserted = 0,
            Released = 1
        ],
        /// Peripheral clock source select. Index into the slot's mux table.
        PCS OFFSET(24) NUMBITS(3) [
            Off = 0
        ],
        /// Fractional divider: the divided clock is doubled
        FRAC OFFSET(3) NUMBITS(1) [],
        /// Peripheral clock divider value, divide by PCD + 1
        PCD OFFSET(0) NUMBITS(3) []
    ]
];

/// Number of control words in one PCC bank.
pub const PCC_SLOTS: usize = 128;

/// Largest division factor the 3-bit PCD field encodes.
pub const PCC_MAX_DIVIDER: u8 = 8;

/// One of the peripheral clock controllers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PccBank {
    Pcc1,
    Pcc3,
    Pcc4,
    Pcc5,
}

impl PccBank {
    /// Physical address of the bank's first control word.
    pub const fn base(self) -> usize {
        match self {
            PccBank::Pcc1 => 0x2809_1000,
            PccBank::Pcc3 => 0x292D_0000,
            PccBank::Pcc4 => 0x2980_0000,
            PccBank::Pcc5 => 0x2DA7_0000,
        }
    }

    /// CGC outputs wired to the PCS mux of the bank's `clksrc` slots.
    ///
    /// Entry `i` is selected by `PCS = i`. Entry 0 is always a placeholder
    /// since `PCS = 0` turns the clock off.
    fn mux(self, clksrc: ClockSourceType) -> Option<&'static [CgcClock; 8]> {
        match (self, clksrc) {
            (_, ClockSourceType::NoPcs) => None,
            (PccBank::Pcc1, _) | (PccBank::Pcc3, _) => Some(&PCC3_MUX),
            (PccBank::Pcc4, ClockSourceType::PerPlat) => Some(&PCC4_PLAT_MUX),
            (PccBank::Pcc4, ClockSourceType::PerBus) => Some(&PCC4_BUS_MUX),
            (PccBank::Pcc5, ClockSourceType::PerPlat) => Some(&PCC5_PLAT_MUX),
            (PccBank::Pcc5, ClockSourceType::PerBus) => Some(&PCC5_BUS_MUX),
        }
    }
}

// PCC1 and PCC3 slots share one mux whatever their source type.
const PCC3_MUX: [CgcClock; 8] = [
    CgcClock::Dummy0,
    CgcClock::Lposc,
    CgcClock::SoscDiv2,
    CgcClock::FroDiv2,
    CgcClock::XbarDivBus,
    CgcClock::Pll3Pfd1Div2,
    CgcClock::Pll3Pfd0Div2,
    CgcClock::Pll3VcoDiv,
];

const PCC4_PLAT_MUX: [CgcClock; 8] = [
    CgcClock::Dummy0,
    CgcClock::Dummy1,
    CgcClock::Lposc,
    CgcClock::SoscDiv1,
    CgcClock::FroDiv1,
    CgcClock::Pll3Pfd3Div1,
    CgcClock::Pll3Pfd2Div1,
    CgcClock::Pll3Pfd1Div1,
];

const PCC4_BUS_MUX: [CgcClock; 8] = [
    CgcClock::Dummy0,
    CgcClock::Dummy1,
    CgcClock::Lposc,
    CgcClock::SoscDiv2,
    CgcClock::FroDiv2,
    CgcClock::XbarDivBus,
    CgcClock::Pll3VcoDiv,
    CgcClock::Pll3Pfd0Div1,
];

const PCC5_PLAT_MUX: [CgcClock; 8] = [
    CgcClock::Dummy0,
    CgcClock::Dummy1,
    CgcClock::Lposc,
    CgcClock::SoscDiv1,
    CgcClock::FroDiv1,
    CgcClock::Pll4Pfd3Div1,
    CgcClock::Pll4Pfd2Div1,
    CgcClock::Pll4Pfd1Div1,
];

const PCC5_BUS_MUX: [CgcClock; 8] = [
    CgcClock::Dummy0,
    CgcClock::Dummy1,
    CgcClock::Lposc,
    CgcClock::SoscDiv2,
    CgcClock::FroDiv2,
    CgcClock::LpavBusClk,
    CgcClock::Pll4VcoDiv,
    CgcClock::Pll4Pfd0Div1,
];

/// Which clock mux feeds a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockSourceType {
    /// Platform clock mux
    PerPlat,
    /// Bus clock mux
    PerBus,
    /// Fixed clock, the PCS field is not implemented
    NoPcs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DividerType {
    HasDiv,
    NoDiv,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetType {
    HasRstB,
    NoRstB,
}

/// A peripheral slot of a PCC bank, with the fields its control word
/// implements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PccSlot {
    bank: PccBank,
    slot: u8,
    clksrc: ClockSourceType,
    div: DividerType,
    rst: ResetType,
}

impl PccSlot {
    pub(crate) const fn new(
        bank: PccBank,
        slot: u8,
        clksrc: ClockSourceType,
        div: DividerType,
        rst: ResetType,
    ) -> PccSlot {
        PccSlot {
            bank,
            slot,
            clksrc,
            div,
            rst,
        }
    }

    pub fn bank(&self) -> PccBank {
        self.bank
    }

    pub fn slot(&self) -> u8 {
        self.slot
    }

    pub fn clksrc(&self) -> ClockSourceType {
        self.clksrc
    }

    pub fn div(&self) -> DividerType {
        self.div
    }

    pub fn rst(&self) -> ResetType {
        self.rst
    }

    /// Address of the slot's control word.
    pub fn address(&self) -> usize {
        self.bank.base() + 4 * self.slot as usize
    }

    /// The CGC outputs this slot can select, or `None` for `NoPcs` slots.
    pub fn sources(&self) -> Option<&'static [CgcClock; 8]> {
        self.bank.mux(self.clksrc)
    }
}

/// A snapshot of one PCC control word.
#[derive(Clone, Copy)]
pub struct PccValue(LocalRegisterCopy<u32, PCC::Register>);

impl PccValue {
    pub fn new(value: u32) -> PccValue {
        PccValue(LocalRegisterCopy::new(value))
    }

    pub fn get(&self) -> u32 {
        self.0.get()
    }

    /// Bit 31: the peripheral exists on this part.
    pub fn is_present(&self) -> bool {
        self.0.is_set(PCC::PR)
    }

    /// Bit 30: the peripheral clock is ungated.
    pub fn is_clock_enabled(&self) -> bool {
        self.0.is_set(PCC::CGC)
    }

    /// Bit 29: another domain has claimed the peripheral.
    pub fn is_in_use(&self) -> bool {
        self.0.is_set(PCC::INUSE)
    }

    /// Bit 28: the peripheral is held in reset.
    pub fn is_reset_asserted(&self) -> bool {
        !self.0.is_set(PCC::SWRST)
    }

    /// Bits 26:24: raw mux selection.
    pub fn pcs(&self) -> u8 {
        self.0.read(PCC::PCS) as u8
    }

    /// Bit 3: fractional divider enabled.
    pub fn frac(&self) -> bool {
        self.0.is_set(PCC::FRAC)
    }

    /// Bits 2:0: raw divider field.
    pub fn pcd(&self) -> u8 {
        self.0.read(PCC::PCD) as u8
    }

    fn modify(&mut self, field: FieldValue<u32, PCC::Register>) {
        self.0.modify(field);
    }
}

impl PartialEq for PccValue {
    fn eq(&self, other: &PccValue) -> bool {
        self.get() == other.get()
    }
}

impl Eq for PccValue {}

impl fmt::Debug for PccValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PccValue({:#010x})", self.get())
    }
}

/// Driver for the PCC banks, over a raw register accessor.
pub struct Pcc<'a, A: RegisterAccess> {
    registers: &'a A,
}

impl<'a, A: RegisterAccess> Pcc<'a, A> {
    pub const fn new(registers: &'a A) -> Pcc<'a, A> {
        Pcc { registers }
    }

    /// Read the current control word of `slot`.
    pub fn value(&self, slot: PccSlot) -> PccValue {
        PccValue::new(self.registers.read32(slot.address()))
    }

    /// Single read-modify-write of the control word of `slot`.
    ///
    /// Slots whose peripheral is not present are left alone.
    fn modify(
        &self,
        slot: PccSlot,
        field: FieldValue<u32, PCC::Register>,
    ) -> Result<(), ErrorCode> {
        let address = slot.address();
        let old = PccValue::new(self.registers.read32(address));
        if !old.is_present() {
            return Err(ErrorCode::NODEVICE);
        }
        let mut new = old;
        new.modify(field);
        self.registers.write32(address, new.get());
        if CONFIG.trace_pcc {
            debug!(
                "pcc: {:?} slot {}: {:#010x} -> {:#010x}",
                slot.bank(),
                slot.slot(),
                old.get(),
                new.get()
            );
        }
        Ok(())
    }

    pub fn is_present(&self, slot: PccSlot) -> bool {
        self.value(slot).is_present()
    }

    pub fn is_in_use(&self, slot: PccSlot) -> bool {
        self.value(slot).is_in_use()
    }

    /// Gate or ungate the peripheral clock. Only the CGC bit changes.
    pub fn set_enable(&self, slot: PccSlot, enable: bool) -> Result<(), ErrorCode> {
        let field = if enable {
            PCC::CGC::SET
        } else {
            PCC::CGC::CLEAR
        };
        self.modify(slot, field)
    }

    pub fn is_enabled(&self, slot: PccSlot) -> bool {
        self.value(slot).is_clock_enabled()
    }

    /// Route `source` to the peripheral.
    ///
    /// Fails with `NOSUPPORT` if the slot has no source mux, and with `INVAL`
    /// if `source` is not one of the mux inputs.
    pub fn select_source(&self, slot: PccSlot, source: CgcClock) -> Result<(), ErrorCode> {
        let sources = slot.sources().ok_or(ErrorCode::NOSUPPORT)?;
        if source.is_dummy() {
            return Err(ErrorCode::INVAL);
        }
        let pcs = sources
            .iter()
            .position(|&input| input == source)
            .ok_or(ErrorCode::INVAL)?;
        self.modify(slot, PCC::PCS.val(pcs as u32))
    }

    /// The CGC output currently routed to the peripheral.
    ///
    /// Fails with `NOSUPPORT` if the slot has no source mux, and with `INVAL`
    /// if the mux is off or points at an unconnected input.
    pub fn current_source(&self, slot: PccSlot) -> Result<CgcClock, ErrorCode> {
        let sources = slot.sources().ok_or(ErrorCode::NOSUPPORT)?;
        let source = sources[self.value(slot).pcs() as usize];
        if source.is_dummy() {
            return Err(ErrorCode::INVAL);
        }
        Ok(source)
    }

    /// Program the divider: the output is `input * (frac + 1) / divider`.
    ///
    /// `divider` is the division factor, 1 to 8. A fractional divide by 1
    /// would double the input and is rejected. FRAC and PCD are written in
    /// the same access.
    pub fn configure_divider(
        &self,
        slot: PccSlot,
        frac: bool,
        divider: u8,
    ) -> Result<(), ErrorCode> {
        if slot.div() == DividerType::NoDiv {
            return Err(ErrorCode::NOSUPPORT);
        }
        if divider == 0 || divider > PCC_MAX_DIVIDER || (frac && divider == 1) {
            return Err(ErrorCode::INVAL);
        }
        self.modify(
            slot,
            PCC::FRAC.val(frac as u32) + PCC::PCD.val((divider - 1) as u32),
        )
    }

    /// The programmed `(frac, divider)` pair, `divider` being 1 to 8.
    pub fn divider(&self, slot: PccSlot) -> Result<(bool, u8), ErrorCode> {
        if slot.div() == DividerType::NoDiv {
            return Err(ErrorCode::NOSUPPORT);
        }
        let value = self.value(slot);
        Ok((value.frac(), value.pcd() + 1))
    }

    /// Hold (`true`) or release (`false`) the peripheral reset line.
    pub fn assert_reset(&self, slot: PccSlot, reset: bool) -> Result<(), ErrorCode> {
        if slot.rst() == ResetType::NoRstB {
            return Err(ErrorCode::NOSUPPORT);
        }
        let field = if reset {
            PCC::SWRST::Asserted
        } else {
            PCC::SWRST::Released
        };
        self.modify(slot, field)
    }

    /// Frequency of the clock delivered to the peripheral, in Hz.
    ///
    /// Returns 0 when the slot has no source mux, the mux is off, or
    /// `upstream` cannot tell the rate of the selected CGC output. A result
    /// that does not fit in `u32` (FRAC doubling a fast input) is also 0.
    pub fn effective_rate(&self, slot: PccSlot, upstream: &dyn CgcRate) -> u32 {
        let rate = match self.current_source(slot).map(|source| upstream.rate(source)) {
            Ok(Some(rate)) => rate,
            _ => return 0,
        };
        if slot.div() == DividerType::NoDiv {
            return rate;
        }
        let value = self.value(slot);
        let multiplier = if value.frac() { 2 } else { 1 };
        let divider = value.pcd() as u64 + 1;
        u32::try_from(rate as u64 * multiplier / divider).unwrap_or(0)
    }
}

/// A single PCC clock gate.
///
/// `PeripheralClock` lets peripheral drivers that take a `ClockInterface`
/// control their own PCC slot.
pub struct PeripheralClock<'a, A: RegisterAccess> {
    pcc: &'a Pcc<'a, A>,
    slot: PccSlot,
}

impl<'a, A: RegisterAccess> PeripheralClock<'a, A> {
    pub const fn new(pcc: &'a Pcc<'a, A>, slot: PccSlot) -> Self {
        PeripheralClock { pcc, slot }
    }
}

impl<A: RegisterAccess> ClockInterface for PeripheralClock<'_, A> {
    fn is_enabled(&self) -> bool {
        self.pcc.is_enabled(self.slot)
    }

    fn enable(&self) {
        if self.pcc.set_enable(self.slot, true).is_err() {
            debug!(
                "pcc: cannot enable {:?} slot {}",
                self.slot.bank(),
                self.slot.slot()
            );
        }
    }

    fn disable(&self) {
        if self.pcc.set_enable(self.slot, false).is_err() {
            debug!(
                "pcc: cannot disable {:?} slot {}",
                self.slot.bank(),
                self.slot.slot()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pcc_slots::{pcc1, pcc3, pcc4, pcc5};
    use core::cell::{Cell, RefCell};
    use std::collections::BTreeMap;

    const PR: u32 = 1 << 31;
    const CGC: u32 = 1 << 30;
    const INUSE: u32 = 1 << 29;
    const SWRST: u32 = 1 << 28;
    const READ_ONLY: u32 = PR | INUSE;

    /// Register file answering for every PCC bank. Untouched words read as a
    /// present peripheral out of reset, and writes never change the
    /// read-only status bits, as on hardware.
    struct FakePcc {
        words: RefCell<BTreeMap<usize, u32>>,
        writes: Cell<usize>,
    }

    impl FakePcc {
        fn new() -> FakePcc {
            FakePcc {
                words: RefCell::new(BTreeMap::new()),
                writes: Cell::new(0),
            }
        }

        fn preset(&self, slot: PccSlot, value: u32) {
            self.words.borrow_mut().insert(slot.address(), value);
        }

        fn word(&self, slot: PccSlot) -> u32 {
            self.read32(slot.address())
        }
    }

    impl RegisterAccess for FakePcc {
        fn read32(&self, address: usize) -> u32 {
            assert_eq!(address % 4, 0);
            *self.words.borrow().get(&address).unwrap_or(&(PR | SWRST))
        }

        fn write32(&self, address: usize, value: u32) {
            let old = self.read32(address);
            let value = (value & !READ_ONLY) | (old & READ_ONLY);
            self.words.borrow_mut().insert(address, value);
            self.writes.set(self.writes.get() + 1);
        }
    }

    struct Rates;

    impl CgcRate for Rates {
        fn rate(&self, clock: CgcClock) -> Option<u32> {
            match clock {
                CgcClock::SoscDiv2 => Some(24_000_000),
                CgcClock::FroDiv2 => Some(96_000_000),
                CgcClock::Pll3Pfd2Div1 => Some(392_000_000),
                _ => None,
            }
        }
    }

    fn all_slots() -> impl Iterator<Item = PccSlot> {
        pcc1::ALL
            .iter()
            .chain(pcc3::ALL)
            .chain(pcc4::ALL)
            .chain(pcc5::ALL)
            .copied()
    }

    #[test]
    fn slot_addresses() {
        assert_eq!(pcc3::LPUART5.address(), 0x292D_00E8);
        assert_eq!(pcc5::DMA2_MP.address(), 0x2DA7_0000);
        assert_eq!(pcc4::SDHC0.address(), 0x2980_0034);
        assert_eq!(pcc1::ADC1.address(), 0x2809_1088);
    }

    #[test]
    fn value_fields() {
        let value = PccValue::new(PR | INUSE | (5 << 24) | (1 << 3) | 6);
        assert!(value.is_present());
        assert!(value.is_in_use());
        assert!(!value.is_clock_enabled());
        assert!(value.is_reset_asserted());
        assert_eq!(value.pcs(), 5);
        assert!(value.frac());
        assert_eq!(value.pcd(), 6);
        assert_eq!(format!("{:?}", value), "PccValue(0xa500000e)");
    }

    #[test]
    fn source_round_trip() {
        let fake = FakePcc::new();
        let pcc = Pcc::new(&fake);
        for slot in all_slots() {
            let Some(sources) = slot.sources() else {
                continue;
            };
            for &source in sources.iter().filter(|s| !s.is_dummy()) {
                assert_eq!(pcc.select_source(slot, source), Ok(()));
                assert_eq!(pcc.current_source(slot), Ok(source), "{:?}", slot);
            }
        }
    }

    #[test]
    fn no_source_slots_reject_mux_access() {
        let fake = FakePcc::new();
        let pcc = Pcc::new(&fake);
        let mut checked = 0;
        for slot in all_slots().filter(|s| s.clksrc() == ClockSourceType::NoPcs) {
            assert_eq!(
                pcc.select_source(slot, CgcClock::Lposc),
                Err(ErrorCode::NOSUPPORT)
            );
            assert_eq!(pcc.current_source(slot), Err(ErrorCode::NOSUPPORT));
            checked += 1;
        }
        assert!(checked > 0);
        assert_eq!(fake.writes.get(), 0);
    }

    #[test]
    fn unknown_source_is_invalid() {
        let fake = FakePcc::new();
        let pcc = Pcc::new(&fake);
        // LPAV bus clock only reaches PCC5.
        assert_eq!(
            pcc.select_source(pcc3::LPUART4, CgcClock::LpavBusClk),
            Err(ErrorCode::INVAL)
        );
        assert_eq!(
            pcc.select_source(pcc3::LPUART4, CgcClock::Dummy0),
            Err(ErrorCode::INVAL)
        );
        // Fresh slots have the mux off.
        assert_eq!(pcc.current_source(pcc3::LPUART4), Err(ErrorCode::INVAL));
        assert_eq!(fake.writes.get(), 0);
    }

    #[test]
    fn enable_pair_only_touches_gate() {
        let fake = FakePcc::new();
        let pcc = Pcc::new(&fake);
        let slot = pcc3::LPSPI4;
        let before = PR | INUSE | SWRST | (3 << 24) | (1 << 3) | 5;
        fake.preset(slot, before);

        pcc.set_enable(slot, true).unwrap();
        assert_eq!(fake.word(slot), before | CGC);
        assert!(pcc.is_enabled(slot));

        pcc.set_enable(slot, false).unwrap();
        assert_eq!(fake.word(slot), before);
        assert!(!pcc.is_enabled(slot));
    }

    #[test]
    fn writes_leave_neighbours_alone() {
        let fake = FakePcc::new();
        let pcc = Pcc::new(&fake);
        pcc.set_enable(pcc3::LPUART5, true).unwrap();
        assert!(!pcc.is_enabled(pcc3::LPUART4));
        assert!(!pcc.is_enabled(pcc3::LPSPI4));
        assert!(!pcc.is_enabled(pcc5::TPM8));
    }

    #[test]
    fn absent_peripheral() {
        let fake = FakePcc::new();
        let pcc = Pcc::new(&fake);
        fake.preset(pcc4::ENET, 0);
        assert!(!pcc.is_present(pcc4::ENET));
        assert_eq!(pcc.set_enable(pcc4::ENET, true), Err(ErrorCode::NODEVICE));
        assert_eq!(pcc.assert_reset(pcc4::ENET, true), Err(ErrorCode::NODEVICE));
        assert_eq!(fake.word(pcc4::ENET), 0);
    }

    #[test]
    fn divider() {
        let fake = FakePcc::new();
        let pcc = Pcc::new(&fake);
        let slot = pcc4::LPUART6;
        fake.preset(slot, PR | SWRST | CGC | (2 << 24));

        pcc.configure_divider(slot, true, 4).unwrap();
        assert_eq!(fake.word(slot), PR | SWRST | CGC | (2 << 24) | (1 << 3) | 3);
        assert_eq!(pcc.divider(slot), Ok((true, 4)));

        pcc.configure_divider(slot, false, 8).unwrap();
        assert_eq!(fake.word(slot), PR | SWRST | CGC | (2 << 24) | 7);
        assert_eq!(pcc.divider(slot), Ok((false, 8)));

        assert_eq!(pcc.configure_divider(slot, false, 0), Err(ErrorCode::INVAL));
        assert_eq!(pcc.configure_divider(slot, false, 9), Err(ErrorCode::INVAL));
        assert_eq!(pcc.configure_divider(slot, true, 1), Err(ErrorCode::INVAL));
        assert_eq!(pcc.divider(slot), Ok((false, 8)));
    }

    #[test]
    fn divider_unsupported() {
        let fake = FakePcc::new();
        let pcc = Pcc::new(&fake);
        assert_eq!(
            pcc.configure_divider(pcc3::DMA1_CH3, false, 2),
            Err(ErrorCode::NOSUPPORT)
        );
        assert_eq!(pcc.divider(pcc4::USB0), Err(ErrorCode::NOSUPPORT));
        assert_eq!(fake.writes.get(), 0);
    }

    #[test]
    fn reset_line() {
        let fake = FakePcc::new();
        let pcc = Pcc::new(&fake);
        let slot = pcc4::SDHC1;

        pcc.assert_reset(slot, true).unwrap();
        assert_eq!(fake.word(slot), PR);
        assert!(pcc.value(slot).is_reset_asserted());

        pcc.assert_reset(slot, false).unwrap();
        assert_eq!(fake.word(slot), PR | SWRST);

        assert_eq!(
            pcc.assert_reset(pcc3::WDOG3, true),
            Err(ErrorCode::NOSUPPORT)
        );
        assert_eq!(
            pcc.assert_reset(pcc3::DMA1_CH0, true),
            Err(ErrorCode::NOSUPPORT)
        );
    }

    #[test]
    fn effective_rate() {
        let fake = FakePcc::new();
        let pcc = Pcc::new(&fake);
        let slot = pcc3::LPUART5;

        // Mux off.
        assert_eq!(pcc.effective_rate(slot, &Rates), 0);

        pcc.select_source(slot, CgcClock::SoscDiv2).unwrap();
        assert_eq!(pcc.effective_rate(slot, &Rates), 24_000_000);

        pcc.configure_divider(slot, false, 4).unwrap();
        assert_eq!(pcc.effective_rate(slot, &Rates), 6_000_000);

        pcc.configure_divider(slot, true, 4).unwrap();
        assert_eq!(pcc.effective_rate(slot, &Rates), 12_000_000);

        pcc.configure_divider(slot, true, 3).unwrap();
        assert_eq!(pcc.effective_rate(slot, &Rates), 16_000_000);

        // Provider does not know this output.
        pcc.select_source(slot, CgcClock::Lposc).unwrap();
        assert_eq!(pcc.effective_rate(slot, &Rates), 0);
    }

    #[test]
    fn effective_rate_without_divider_or_mux() {
        let fake = FakePcc::new();
        let pcc = Pcc::new(&fake);
        assert_eq!(pcc.effective_rate(pcc5::DMA2_CH4, &Rates), 0);

        pcc.select_source(pcc4::SDHC0, CgcClock::Pll3Pfd2Div1).unwrap();
        pcc.configure_divider(pcc4::SDHC0, false, 2).unwrap();
        assert_eq!(pcc.effective_rate(pcc4::SDHC0, &Rates), 196_000_000);
    }

    /// A single upstream output at a fixed rate.
    struct Fixed(u32);

    impl CgcRate for Fixed {
        fn rate(&self, clock: CgcClock) -> Option<u32> {
            (clock == CgcClock::SoscDiv2).then_some(self.0)
        }
    }

    #[test]
    fn effective_rate_overflow() {
        let fake = FakePcc::new();
        let pcc = Pcc::new(&fake);
        let slot = pcc3::LPUART5;
        // SoscDiv2 selected, FRAC = 1, PCD = 0.
        fake.preset(slot, PR | SWRST | (2 << 24) | (1 << 3));
        assert_eq!(pcc.current_source(slot), Ok(CgcClock::SoscDiv2));

        assert_eq!(pcc.effective_rate(slot, &Fixed(1_000_000_000)), 2_000_000_000);
        assert_eq!(pcc.effective_rate(slot, &Fixed(3_000_000_000)), 0);
    }

    #[test]
    fn clock_interface() {
        let fake = FakePcc::new();
        let pcc = Pcc::new(&fake);
        let clock = PeripheralClock::new(&pcc, pcc5::GPU2D);

        assert!(!clock.is_enabled());
        clock.enable();
        assert!(clock.is_enabled());
        assert!(pcc.is_enabled(pcc5::GPU2D));
        clock.disable();
        assert!(!clock.is_enabled());
    }
}
