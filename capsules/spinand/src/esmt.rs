// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2023.

//! ESMT SPI NAND parts.
//!
//! ESMT ships SPI NAND under two JEDEC manufacturer IDs, `0xC8` and `0x2C`,
//! and the two families disagree on how the ECC result is encoded in the
//! status register and on how the spare area is split. Each chip entry picks
//! its [`EccDecoder`] and [`OobLayoutKind`]; both are fixed for the device,
//! and the layout is sized from the device's spare area.

use kernel::config::CONFIG;
use kernel::debug;
use kernel::hil::nand::{
    EccRequirements, EccStatus, FeatureAccess, MemoryOrganization, OobLayout, OobRegion, REG_CFG,
};
use kernel::ErrorCode;

use crate::device::{
    self, CacheOp, EccInfo, Manufacturer, OpVariants, ReadIdMethod, SpiNandFlags, SpiNandInfo,
};

pub const SPINAND_MFR_ESMT_C8: u8 = 0xC8;
pub const SPINAND_MFR_ESMT_2C: u8 = 0x2C;

const C8_STATUS_ECC_MASK: u8 = 0b111 << 4;
const C8_STATUS_ECC_NO_BITFLIPS: u8 = 0 << 4;
const C8_STATUS_ECC_1_3_BITFLIPS: u8 = 1 << 4;
const C8_STATUS_ECC_UNCOR_ERROR: u8 = 2 << 4;
const C8_STATUS_ECC_4_6_BITFLIPS: u8 = 3 << 4;
const C8_STATUS_ECC_7_8_BITFLIPS: u8 = 5 << 4;

const TWO_C_STATUS_ECC_MASK: u8 = 0b1111 << 4;
const TWO_C_STATUS_ECC_1_3_BITFLIPS: u8 = 1 << 4;
const TWO_C_STATUS_ECC_4_6_BITFLIPS: u8 = 3 << 4;
const TWO_C_STATUS_ECC_7_8_BITFLIPS: u8 = 5 << 4;

/// Continuous Read enable, bit 0 of the configuration register.
const TWO_C_CFG_CR: u8 = 1 << 0;

/// Interpretation of the ECC bits of the status register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EccDecoder {
    /// ESMT `0xC8` parts: three-bit field, bits 6:4.
    C8,
    /// ESMT `0x2C` parts: four-bit field, bits 7:4.
    TwoC,
    /// Parts without a vendor encoding. Corrected reads are reported at the
    /// full `strength` of the ECC engine since the actual count is unknown.
    Generic { strength: u8 },
}

impl EccDecoder {
    /// Decode the status register value `status`. Bits outside the ECC
    /// field are ignored.
    pub fn decode(self, status: u8) -> EccStatus {
        let result = match self {
            EccDecoder::C8 => match status & C8_STATUS_ECC_MASK {
                C8_STATUS_ECC_NO_BITFLIPS => EccStatus::Clean,
                C8_STATUS_ECC_1_3_BITFLIPS => EccStatus::Corrected(3),
                C8_STATUS_ECC_UNCOR_ERROR => EccStatus::Uncorrectable,
                C8_STATUS_ECC_4_6_BITFLIPS => EccStatus::Corrected(6),
                C8_STATUS_ECC_7_8_BITFLIPS => EccStatus::Corrected(8),
                _ => EccStatus::Unrecognized,
            },
            EccDecoder::TwoC => match status & TWO_C_STATUS_ECC_MASK {
                device::STATUS_ECC_NO_BITFLIPS => EccStatus::Clean,
                device::STATUS_ECC_UNCOR_ERROR => EccStatus::Uncorrectable,
                TWO_C_STATUS_ECC_1_3_BITFLIPS => EccStatus::Corrected(3),
                TWO_C_STATUS_ECC_4_6_BITFLIPS => EccStatus::Corrected(6),
                TWO_C_STATUS_ECC_7_8_BITFLIPS => EccStatus::Corrected(8),
                _ => EccStatus::Unrecognized,
            },
            EccDecoder::Generic { strength } => match status & device::STATUS_ECC_MASK {
                device::STATUS_ECC_NO_BITFLIPS => EccStatus::Clean,
                device::STATUS_ECC_HAS_BITFLIPS => EccStatus::Corrected(strength),
                device::STATUS_ECC_UNCOR_ERROR => EccStatus::Uncorrectable,
                _ => EccStatus::Unrecognized,
            },
        };
        if CONFIG.debug_ecc_status {
            match result {
                EccStatus::Unrecognized => {
                    debug!("esmt: unrecognized ECC status {:#04x}", status)
                }
                EccStatus::Uncorrectable => {
                    debug!("esmt: uncorrectable page, status {:#04x}", status)
                }
                _ => {}
            }
        }
        result
    }
}

/// Spare-area layouts of the ESMT parts.
///
/// The proportional layout depends on the size of the spare area, so a kind
/// becomes an [`OobLayout`] through [`OobLayoutKind::for_oobsize`] once the
/// device geometry is known.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OobLayoutKind {
    /// Four 16-byte sections. Bytes 0-1 of each are reserved, 2-7 are free
    /// and 8-15 hold parity.
    C8FourRegion,
    /// One section: byte 0 is the bad block marker, 1-63 are free and the
    /// upper 64 bytes hold parity.
    C8SingleSplit,
    /// One section: the upper half of the spare area holds parity, the lower
    /// half minus the two bad block marker bytes is free.
    TwoCProportional,
}

impl OobLayoutKind {
    /// The layout of a device whose spare area is `oobsize` bytes.
    pub const fn for_oobsize(self, oobsize: usize) -> SpareLayout {
        SpareLayout {
            kind: self,
            oobsize,
        }
    }
}

/// An [`OobLayoutKind`] applied to a spare area of a given size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpareLayout {
    kind: OobLayoutKind,
    oobsize: usize,
}

impl SpareLayout {
    pub fn kind(&self) -> OobLayoutKind {
        self.kind
    }

    pub fn oobsize(&self) -> usize {
        self.oobsize
    }
}

impl OobLayout for SpareLayout {
    fn sections(&self) -> usize {
        match self.kind {
            OobLayoutKind::C8FourRegion => 4,
            OobLayoutKind::C8SingleSplit | OobLayoutKind::TwoCProportional => 1,
        }
    }

    fn ecc(&self, section: usize) -> Result<OobRegion, ErrorCode> {
        if section >= self.sections() {
            return Err(ErrorCode::RANGE);
        }
        Ok(match self.kind {
            OobLayoutKind::C8FourRegion => OobRegion::new(16 * section + 8, 8),
            OobLayoutKind::C8SingleSplit => OobRegion::new(64, 64),
            OobLayoutKind::TwoCProportional => {
                OobRegion::new(self.oobsize / 2, self.oobsize / 2)
            }
        })
    }

    fn free(&self, section: usize) -> Result<OobRegion, ErrorCode> {
        if section >= self.sections() {
            return Err(ErrorCode::RANGE);
        }
        Ok(match self.kind {
            OobLayoutKind::C8FourRegion => OobRegion::new(16 * section + 2, 6),
            OobLayoutKind::C8SingleSplit => OobRegion::new(1, 63),
            OobLayoutKind::TwoCProportional => {
                OobRegion::new(2, (self.oobsize / 2).saturating_sub(2))
            }
        })
    }
}

const READ_CACHE_VARIANTS: [CacheOp; 6] = [
    device::READ_FROM_CACHE_QUADIO,
    device::READ_FROM_CACHE_X4,
    device::READ_FROM_CACHE_DUALIO,
    device::READ_FROM_CACHE_X2,
    device::READ_FROM_CACHE_FAST,
    device::READ_FROM_CACHE,
];

const WRITE_CACHE_VARIANTS: [CacheOp; 2] = [device::PROG_LOAD_X4, device::PROG_LOAD];

const UPDATE_CACHE_VARIANTS: [CacheOp; 2] =
    [device::PROG_LOAD_RANDOM_X4, device::PROG_LOAD_RANDOM];

const OP_VARIANTS: OpVariants = OpVariants {
    read_cache: &READ_CACHE_VARIANTS,
    write_cache: &WRITE_CACHE_VARIANTS,
    update_cache: &UPDATE_CACHE_VARIANTS,
};

const ECC_8_PER_512: EccRequirements = EccRequirements::new(8, 512);

static ESMT_C8_CHIPS: [SpiNandInfo; 2] = [
    // 2Gb 3.3V
    SpiNandInfo {
        model: "F50L2G41KA(2V)",
        devid: 0x41,
        read_id_method: ReadIdMethod::OpcodeAddr,
        memorg: MemoryOrganization::new(1, 2048, 128, 64, 2048, 40, 1),
        eccreq: ECC_8_PER_512,
        op_variants: OP_VARIANTS,
        flags: SpiNandFlags::NONE,
        ecc: EccInfo {
            layout: OobLayoutKind::C8SingleSplit,
            decoder: EccDecoder::C8,
        },
    },
    // 1Gb 3.3V
    SpiNandInfo {
        model: "F50L2G41LB(2M)",
        devid: 0x01,
        read_id_method: ReadIdMethod::OpcodeAddr,
        memorg: MemoryOrganization::new(1, 2048, 64, 64, 1024, 20, 1),
        eccreq: ECC_8_PER_512,
        op_variants: OP_VARIANTS,
        flags: SpiNandFlags::NONE,
        ecc: EccInfo {
            layout: OobLayoutKind::C8FourRegion,
            decoder: EccDecoder::Generic {
                strength: ECC_8_PER_512.strength,
            },
        },
    },
];

static ESMT_2C_CHIPS: [SpiNandInfo; 2] = [
    // 2Gb 3.3V
    SpiNandInfo {
        model: "F50L2G41XA(2B)",
        devid: 0x24,
        read_id_method: ReadIdMethod::OpcodeDummy,
        memorg: MemoryOrganization::new(1, 2048, 128, 64, 2048, 40, 2),
        eccreq: ECC_8_PER_512,
        op_variants: OP_VARIANTS,
        flags: SpiNandFlags::NONE,
        ecc: EccInfo {
            layout: OobLayoutKind::TwoCProportional,
            decoder: EccDecoder::TwoC,
        },
    },
    // 4Gb 3.3V
    SpiNandInfo {
        model: "F50L2G41XB(2X)",
        devid: 0x34,
        read_id_method: ReadIdMethod::OpcodeDummy,
        memorg: MemoryOrganization::new(1, 4096, 256, 64, 2048, 40, 1),
        eccreq: ECC_8_PER_512,
        op_variants: OP_VARIANTS,
        flags: SpiNandFlags::HAS_CR_FEAT_BIT,
        ecc: EccInfo {
            layout: OobLayoutKind::TwoCProportional,
            decoder: EccDecoder::TwoC,
        },
    },
];

fn esmt_c8_init(_features: &dyn FeatureAccess, _info: &SpiNandInfo) -> Result<(), ErrorCode> {
    Ok(())
}

/// Parts with a Continuous Read bit power up with it set. The page read
/// path does not support continuous reads, so turn it off.
fn esmt_2c_init(features: &dyn FeatureAccess, info: &SpiNandInfo) -> Result<(), ErrorCode> {
    if info.flags.contains(SpiNandFlags::HAS_CR_FEAT_BIT) {
        return features.update_feature(REG_CFG, TWO_C_CFG_CR, 0);
    }
    Ok(())
}

pub static ESMT_C8: Manufacturer = Manufacturer {
    id: SPINAND_MFR_ESMT_C8,
    name: "ESMT_C8",
    chips: &ESMT_C8_CHIPS,
    init: esmt_c8_init,
};

pub static ESMT_2C: Manufacturer = Manufacturer {
    id: SPINAND_MFR_ESMT_2C,
    name: "ESMT_2C",
    chips: &ESMT_2C_CHIPS,
    init: esmt_2c_init,
};
