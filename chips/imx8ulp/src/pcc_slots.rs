// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Peripheral slots of the i.MX8ULP clock controllers.
//!
//! Every peripheral a PCC can gate is a `const` [`PccSlot`] in the module of
//! its controller, together with what its control word supports: a
//! selectable clock source, a divider, and a reset line. Slots cannot be
//! built outside this crate, so a driver can only address peripherals that
//! exist.
//!
//! ```rust,ignore
//! use imx8ulp::pcc_slots::pcc3;
//!
//! pcc.set_enable(pcc3::LPUART5, true)?;
//! ```

use crate::pcc::{ClockSourceType, DividerType, PccBank, PccSlot, ResetType};

macro_rules! pcc_slots {
    ($bank:expr; $($name:ident = $slot:literal, $clksrc:ident, $div:ident, $rst:ident;)+) => {
        $(
            pub const $name: PccSlot = PccSlot::new(
                $bank,
                $slot,
                ClockSourceType::$clksrc,
                DividerType::$div,
                ResetType::$rst,
            );
        )+

        /// Every slot of this controller, in slot order.
        pub const ALL: &[PccSlot] = &[$($name),+];
    };
}

/// Slots of PCC1, real-time domain.
pub mod pcc1 {
    use super::*;

    pcc_slots! {
        PccBank::Pcc1;

        ADC1 = 34, PerBus, HasDiv, HasRstB;
    }
}

/// Slots of PCC3, application domain peripherals on the crossbar.
pub mod pcc3 {
    use super::*;

    pcc_slots! {
        PccBank::Pcc3;

        DMA1_MP = 1, NoPcs, NoDiv, NoRstB;
        DMA1_CH0 = 2, NoPcs, NoDiv, NoRstB;
        DMA1_CH1 = 3, NoPcs, NoDiv, NoRstB;
        DMA1_CH2 = 4, NoPcs, NoDiv, NoRstB;
        DMA1_CH3 = 5, NoPcs, NoDiv, NoRstB;
        DMA1_CH4 = 6, NoPcs, NoDiv, NoRstB;
        DMA1_CH5 = 7, NoPcs, NoDiv, NoRstB;
        DMA1_CH6 = 8, NoPcs, NoDiv, NoRstB;
        DMA1_CH7 = 9, NoPcs, NoDiv, NoRstB;
        DMA1_CH8 = 10, NoPcs, NoDiv, NoRstB;
        DMA1_CH9 = 11, NoPcs, NoDiv, NoRstB;
        DMA1_CH10 = 12, NoPcs, NoDiv, NoRstB;
        DMA1_CH11 = 13, NoPcs, NoDiv, NoRstB;
        DMA1_CH12 = 14, NoPcs, NoDiv, NoRstB;
        DMA1_CH13 = 15, NoPcs, NoDiv, NoRstB;
        DMA1_CH14 = 16, NoPcs, NoDiv, NoRstB;
        DMA1_CH15 = 17, NoPcs, NoDiv, NoRstB;
        DMA1_CH16 = 18, NoPcs, NoDiv, NoRstB;
        DMA1_CH17 = 19, NoPcs, NoDiv, NoRstB;
        DMA1_CH18 = 20, NoPcs, NoDiv, NoRstB;
        DMA1_CH19 = 21, NoPcs, NoDiv, NoRstB;
        DMA1_CH20 = 22, NoPcs, NoDiv, NoRstB;
        DMA1_CH21 = 23, NoPcs, NoDiv, NoRstB;
        DMA1_CH22 = 24, NoPcs, NoDiv, NoRstB;
        DMA1_CH23 = 25, NoPcs, NoDiv, NoRstB;
        DMA1_CH24 = 26, NoPcs, NoDiv, NoRstB;
        DMA1_CH25 = 27, NoPcs, NoDiv, NoRstB;
        DMA1_CH26 = 28, NoPcs, NoDiv, NoRstB;
        DMA1_CH27 = 29, NoPcs, NoDiv, NoRstB;
        DMA1_CH28 = 30, NoPcs, NoDiv, NoRstB;
        DMA1_CH29 = 31, NoPcs, NoDiv, NoRstB;
        DMA1_CH30 = 32, NoPcs, NoDiv, NoRstB;
        DMA1_CH31 = 33, NoPcs, NoDiv, NoRstB;
        MU0_B = 34, NoPcs, NoDiv, HasRstB;
        MU3_A = 35, NoPcs, NoDiv, HasRstB;
        LLWU1 = 38, NoPcs, NoDiv, HasRstB;
        UPOWER = 40, NoPcs, NoDiv, HasRstB;
        WDOG3 = 42, PerBus, HasDiv, NoRstB;
        WDOG4 = 43, PerBus, HasDiv, NoRstB;
        XRDC_MGR = 47, NoPcs, NoDiv, HasRstB;
        SEMA42_1 = 48, NoPcs, NoDiv, HasRstB;
        ROMCP1 = 49, NoPcs, NoDiv, NoRstB;
        LPIT1 = 50, PerBus, HasDiv, HasRstB;
        TPM4 = 51, PerBus, HasDiv, HasRstB;
        TPM5 = 52, PerBus, HasDiv, HasRstB;
        FLEXIO1 = 53, PerBus, HasDiv, HasRstB;
        I3C2 = 54, PerBus, HasDiv, HasRstB;
        LPI2C4 = 55, PerBus, HasDiv, HasRstB;
        LPI2C5 = 56, PerBus, HasDiv, HasRstB;
        LPUART4 = 57, PerBus, HasDiv, HasRstB;
        LPUART5 = 58, PerBus, HasDiv, HasRstB;
        LPSPI4 = 59, PerBus, HasDiv, HasRstB;
        LPSPI5 = 60, PerBus, HasDiv, HasRstB;
    }
}

/// Slots of PCC4, application domain high speed peripherals.
pub mod pcc4 {
    use super::*;

    pcc_slots! {
        PccBank::Pcc4;

        FLEXSPI2 = 1, PerPlat, HasDiv, HasRstB;
        TPM6 = 2, PerBus, HasDiv, HasRstB;
        TPM7 = 3, PerBus, HasDiv, HasRstB;
        LPI2C6 = 4, PerBus, HasDiv, HasRstB;
        LPI2C7 = 5, PerBus, HasDiv, HasRstB;
        LPUART6 = 6, PerBus, HasDiv, HasRstB;
        LPUART7 = 7, PerBus, HasDiv, HasRstB;
        SAI4 = 8, PerPlat, HasDiv, HasRstB;
        SAI5 = 9, PerPlat, HasDiv, HasRstB;
        PCTLE = 10, NoPcs, NoDiv, NoRstB;
        PCTLF = 11, NoPcs, NoDiv, NoRstB;
        SDHC0 = 13, PerPlat, HasDiv, HasRstB;
        SDHC1 = 14, PerPlat, HasDiv, HasRstB;
        SDHC2 = 15, PerPlat, HasDiv, HasRstB;
        USB0 = 16, NoPcs, NoDiv, HasRstB;
        USBPHY = 17, NoPcs, NoDiv, HasRstB;
        USB1 = 18, NoPcs, NoDiv, HasRstB;
        USB1PHY = 19, NoPcs, NoDiv, HasRstB;
        USB_XBAR = 20, NoPcs, NoDiv, HasRstB;
        ENET = 21, NoPcs, NoDiv, HasRstB;
        SFA1 = 22, NoPcs, NoDiv, NoRstB;
        RGPIOE = 30, NoPcs, NoDiv, NoRstB;
        RGPIOF = 31, NoPcs, NoDiv, NoRstB;
    }
}

/// Slots of PCC5, LPAV (audio/video) domain.
pub mod pcc5 {
    use super::*;

    pcc_slots! {
        PccBank::Pcc5;

        DMA2_MP = 0, NoPcs, NoDiv, NoRstB;
        DMA2_CH0 = 1, NoPcs, NoDiv, NoRstB;
        DMA2_CH1 = 2, NoPcs, NoDiv, NoRstB;
        DMA2_CH2 = 3, NoPcs, NoDiv, NoRstB;
        DMA2_CH3 = 4, NoPcs, NoDiv, NoRstB;
        DMA2_CH4 = 5, NoPcs, NoDiv, NoRstB;
        DMA2_CH5 = 6, NoPcs, NoDiv, NoRstB;
        DMA2_CH6 = 7, NoPcs, NoDiv, NoRstB;
        DMA2_CH7 = 8, NoPcs, NoDiv, NoRstB;
        DMA2_CH8 = 9, NoPcs, NoDiv, NoRstB;
        DMA2_CH9 = 10, NoPcs, NoDiv, NoRstB;
        DMA2_CH10 = 11, NoPcs, NoDiv, NoRstB;
        DMA2_CH11 = 12, NoPcs, NoDiv, NoRstB;
        DMA2_CH12 = 13, NoPcs, NoDiv, NoRstB;
        DMA2_CH13 = 14, NoPcs, NoDiv, NoRstB;
        DMA2_CH14 = 15, NoPcs, NoDiv, NoRstB;
        DMA2_CH15 = 16, NoPcs, NoDiv, NoRstB;
        DMA2_CH16 = 17, NoPcs, NoDiv, NoRstB;
        DMA2_CH17 = 18, NoPcs, NoDiv, NoRstB;
        DMA2_CH18 = 19, NoPcs, NoDiv, NoRstB;
        DMA2_CH19 = 20, NoPcs, NoDiv, NoRstB;
        DMA2_CH20 = 21, NoPcs, NoDiv, NoRstB;
        DMA2_CH21 = 22, NoPcs, NoDiv, NoRstB;
        DMA2_CH22 = 23, NoPcs, NoDiv, NoRstB;
        DMA2_CH23 = 24, NoPcs, NoDiv, NoRstB;
        DMA2_CH24 = 25, NoPcs, NoDiv, NoRstB;
        DMA2_CH25 = 26, NoPcs, NoDiv, NoRstB;
        DMA2_CH26 = 27, NoPcs, NoDiv, NoRstB;
        DMA2_CH27 = 28, NoPcs, NoDiv, NoRstB;
        DMA2_CH28 = 29, NoPcs, NoDiv, NoRstB;
        DMA2_CH29 = 30, NoPcs, NoDiv, NoRstB;
        DMA2_CH30 = 31, NoPcs, NoDiv, NoRstB;
        DMA2_CH31 = 32, NoPcs, NoDiv, NoRstB;
        MU2_B = 33, NoPcs, NoDiv, HasRstB;
        MU3_B = 34, NoPcs, NoDiv, HasRstB;
        SEMA42_2 = 35, NoPcs, NoDiv, HasRstB;
        CMC2 = 36, NoPcs, NoDiv, NoRstB;
        AVD_SIM = 37, NoPcs, NoDiv, NoRstB;
        LPAV_CGC = 38, NoPcs, NoDiv, NoRstB;
        PCC5 = 39, NoPcs, NoDiv, NoRstB;
        TPM8 = 40, PerBus, HasDiv, HasRstB;
        SAI6 = 41, PerPlat, HasDiv, HasRstB;
        SAI7 = 42, PerPlat, HasDiv, HasRstB;
        SPDIF = 43, PerPlat, HasDiv, HasRstB;
        ISI = 44, NoPcs, NoDiv, HasRstB;
        CSI_REGS = 45, NoPcs, NoDiv, HasRstB;
        CSI = 47, PerPlat, HasDiv, HasRstB;
        DSI = 48, PerPlat, HasDiv, HasRstB;
        WDOG5 = 50, PerBus, HasDiv, NoRstB;
        EPDC = 51, PerPlat, HasDiv, HasRstB;
        PXP = 52, NoPcs, NoDiv, HasRstB;
        SFA2 = 53, NoPcs, NoDiv, NoRstB;
        GPU2D = 60, PerPlat, HasDiv, HasRstB;
        GPU3D = 61, PerPlat, HasDiv, HasRstB;
        DCNANO = 62, PerPlat, HasDiv, HasRstB;
        LPDDR4 = 66, NoPcs, NoDiv, HasRstB;
        CSI_CLK_UI = 67, PerPlat, HasDiv, NoRstB;
        CSI_CLK_ESC = 68, PerPlat, HasDiv, NoRstB;
        RGPIOD = 69, NoPcs, NoDiv, NoRstB;
    }
}

#[cfg(test)]
mod tests {
    use super::{pcc1, pcc3, pcc4, pcc5};
    use crate::pcc::{ClockSourceType, DividerType, PccSlot, ResetType, PCC_SLOTS};

    fn banks() -> [&'static [PccSlot]; 4] {
        [pcc1::ALL, pcc3::ALL, pcc4::ALL, pcc5::ALL]
    }

    #[test]
    fn slots_are_unique_and_ordered() {
        for all in banks() {
            let bank = all[0].bank();
            for pair in all.windows(2) {
                assert!(pair[0].slot() < pair[1].slot(), "{:?}", pair);
            }
            for slot in all {
                assert_eq!(slot.bank(), bank);
                assert!((slot.slot() as usize) < PCC_SLOTS);
            }
        }
    }

    #[test]
    fn header_numbering() {
        assert_eq!(pcc1::ADC1.slot(), 34);
        assert_eq!(pcc3::DMA1_CH7.slot(), 9);
        assert_eq!(pcc3::LPSPI5.slot(), 60);
        assert_eq!(pcc4::FLEXSPI2.slot(), 1);
        assert_eq!(pcc4::RGPIOF.slot(), 31);
        assert_eq!(pcc5::DMA2_MP.slot(), 0);
        assert_eq!(pcc5::RGPIOD.slot(), 69);
        assert_eq!(pcc3::ALL.len(), 53);
        assert_eq!(pcc5::ALL.len(), 59);
    }

    #[test]
    fn capabilities() {
        assert_eq!(pcc3::DMA1_CH0.clksrc(), ClockSourceType::NoPcs);
        assert_eq!(pcc3::DMA1_CH0.div(), DividerType::NoDiv);
        assert_eq!(pcc3::LPUART4.clksrc(), ClockSourceType::PerBus);
        assert_eq!(pcc3::LPUART4.rst(), ResetType::HasRstB);
        assert_eq!(pcc4::SDHC0.clksrc(), ClockSourceType::PerPlat);
        assert_eq!(pcc3::WDOG3.rst(), ResetType::NoRstB);
        assert_eq!(pcc4::USB0.clksrc(), ClockSourceType::NoPcs);
        assert_eq!(pcc4::USB0.rst(), ResetType::HasRstB);
    }
}
