// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2023.

//! SPI NAND chip descriptors and identification.
//!
//! A chip is described once, as `const` data: its READ ID answer, geometry,
//! ECC requirements, the cache read/program commands it accepts, and how its
//! spare area and ECC status register are laid out. Chips are grouped by
//! manufacturer ID in [`MANUFACTURERS`].
//!
//! Usage
//! -----
//!
//! ```rust,ignore
//! use capsules_spinand::device::SpiNand;
//!
//! // `mfr` and `devid` come from the READ ID command.
//! let nand = SpiNand::identify(&spi_executor, mfr, devid)?;
//! nand.init()?;
//!
//! let bitflips = nand.ecc_status()?.bitflips()?;
//! let bbm_free = nand.oob_free_region(0)?;
//! ```

use kernel::hil::nand::{
    EccRequirements, EccStatus, FeatureAccess, MemoryOrganization, OobLayout, OobRegion,
    REG_STATUS,
};
use kernel::ErrorCode;

use crate::esmt::{self, EccDecoder, OobLayoutKind, SpareLayout};

/// ECC field of the status register, as most SPI NAND parts encode it.
pub const STATUS_ECC_MASK: u8 = 0b11 << 4;
pub const STATUS_ECC_NO_BITFLIPS: u8 = 0 << 4;
pub const STATUS_ECC_HAS_BITFLIPS: u8 = 1 << 4;
pub const STATUS_ECC_UNCOR_ERROR: u8 = 2 << 4;

/// How the chip answers READ ID (0x9F).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadIdMethod {
    /// Opcode followed by an address byte of 0.
    OpcodeAddr,
    /// Opcode followed by a dummy byte.
    OpcodeDummy,
}

/// One way of transferring data between the host and the chip's cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheOp {
    pub opcode: u8,
    /// Number of lines carrying the column address.
    pub addr_buswidth: u8,
    /// Number of lines carrying data.
    pub data_buswidth: u8,
    pub dummy_bytes: u8,
}

impl CacheOp {
    const fn new(opcode: u8, addr_buswidth: u8, data_buswidth: u8, dummy_bytes: u8) -> CacheOp {
        CacheOp {
            opcode,
            addr_buswidth,
            data_buswidth,
            dummy_bytes,
        }
    }
}

pub const READ_FROM_CACHE_QUADIO: CacheOp = CacheOp::new(0xEB, 4, 4, 2);
pub const READ_FROM_CACHE_X4: CacheOp = CacheOp::new(0x6B, 1, 4, 1);
pub const READ_FROM_CACHE_DUALIO: CacheOp = CacheOp::new(0xBB, 2, 2, 1);
pub const READ_FROM_CACHE_X2: CacheOp = CacheOp::new(0x3B, 1, 2, 1);
pub const READ_FROM_CACHE_FAST: CacheOp = CacheOp::new(0x0B, 1, 1, 1);
pub const READ_FROM_CACHE: CacheOp = CacheOp::new(0x03, 1, 1, 1);

/// PROGRAM LOAD: clears the rest of the cache before loading.
pub const PROG_LOAD_X4: CacheOp = CacheOp::new(0x32, 1, 4, 0);
pub const PROG_LOAD: CacheOp = CacheOp::new(0x02, 1, 1, 0);

/// PROGRAM LOAD RANDOM DATA: keeps the rest of the cache.
pub const PROG_LOAD_RANDOM_X4: CacheOp = CacheOp::new(0x34, 1, 4, 0);
pub const PROG_LOAD_RANDOM: CacheOp = CacheOp::new(0x84, 1, 1, 0);

/// Cache commands a chip accepts, fastest first. The driver picks the first
/// one its SPI controller can issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpVariants {
    pub read_cache: &'static [CacheOp],
    pub write_cache: &'static [CacheOp],
    pub update_cache: &'static [CacheOp],
}

/// Optional chip features.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpiNandFlags(u32);

impl SpiNandFlags {
    pub const NONE: SpiNandFlags = SpiNandFlags(0);
    /// The chip exposes a Continuous Read enable bit in its configuration
    /// register.
    pub const HAS_CR_FEAT_BIT: SpiNandFlags = SpiNandFlags(1 << 1);

    pub const fn contains(self, other: SpiNandFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

/// Spare-area layout and ECC status decoder of a chip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EccInfo {
    pub layout: OobLayoutKind,
    pub decoder: EccDecoder,
}

/// Description of one SPI NAND part.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpiNandInfo {
    pub model: &'static str,
    pub devid: u8,
    pub read_id_method: ReadIdMethod,
    pub memorg: MemoryOrganization,
    pub eccreq: EccRequirements,
    pub op_variants: OpVariants,
    pub flags: SpiNandFlags,
    pub ecc: EccInfo,
}

/// Chips sharing a manufacturer ID, and the setup they need after reset.
pub struct Manufacturer {
    pub id: u8,
    pub name: &'static str,
    pub chips: &'static [SpiNandInfo],
    pub init: fn(&dyn FeatureAccess, &SpiNandInfo) -> Result<(), ErrorCode>,
}

impl Manufacturer {
    pub fn find(&self, devid: u8) -> Option<&'static SpiNandInfo> {
        self.chips.iter().find(|chip| chip.devid == devid)
    }
}

/// Every manufacturer this crate has tables for.
pub static MANUFACTURERS: &[&Manufacturer] = &[&esmt::ESMT_C8, &esmt::ESMT_2C];

pub fn find_manufacturer(mfr_id: u8) -> Option<&'static Manufacturer> {
    MANUFACTURERS.iter().copied().find(|mfr| mfr.id == mfr_id)
}

/// Look up a chip by the manufacturer and device IDs it returned.
pub fn find_chip(mfr_id: u8, devid: u8) -> Option<&'static SpiNandInfo> {
    find_manufacturer(mfr_id).and_then(|mfr| mfr.find(devid))
}

/// An identified SPI NAND chip.
///
/// The ECC decoder and spare-area layout are fixed when the handle is built
/// and never change for the device's lifetime. The layout is sized from the
/// spare area of the chip's memory organization.
pub struct SpiNand<'a, F: FeatureAccess> {
    features: &'a F,
    manufacturer: &'static Manufacturer,
    info: &'static SpiNandInfo,
    layout: SpareLayout,
}

impl<'a, F: FeatureAccess> SpiNand<'a, F> {
    pub fn new(
        features: &'a F,
        manufacturer: &'static Manufacturer,
        info: &'static SpiNandInfo,
    ) -> SpiNand<'a, F> {
        SpiNand {
            features,
            manufacturer,
            info,
            layout: info.ecc.layout.for_oobsize(info.memorg.oobsize),
        }
    }

    /// Build the handle for the chip that answered READ ID with `mfr_id`
    /// and `devid`. Unknown chips are `NODEVICE`.
    pub fn identify(
        features: &'a F,
        mfr_id: u8,
        devid: u8,
    ) -> Result<SpiNand<'a, F>, ErrorCode> {
        let manufacturer = find_manufacturer(mfr_id).ok_or(ErrorCode::NODEVICE)?;
        let info = manufacturer.find(devid).ok_or(ErrorCode::NODEVICE)?;
        Ok(SpiNand::new(features, manufacturer, info))
    }

    /// Run the manufacturer's post-reset setup.
    pub fn init(&self) -> Result<(), ErrorCode> {
        (self.manufacturer.init)(self.features, self.info)
    }

    pub fn info(&self) -> &'static SpiNandInfo {
        self.info
    }

    pub fn manufacturer(&self) -> &'static Manufacturer {
        self.manufacturer
    }

    pub fn memorg(&self) -> &'static MemoryOrganization {
        &self.info.memorg
    }

    pub fn eccreq(&self) -> &'static EccRequirements {
        &self.info.eccreq
    }

    pub fn layout(&self) -> &SpareLayout {
        &self.layout
    }

    /// Decode a status register value read after a page read.
    pub fn decode_ecc_status(&self, status: u8) -> EccStatus {
        self.info.ecc.decoder.decode(status)
    }

    /// Read the status register and decode its ECC field.
    pub fn ecc_status(&self) -> Result<EccStatus, ErrorCode> {
        let status = self.features.get_feature(REG_STATUS)?;
        Ok(self.decode_ecc_status(status))
    }

    pub fn oob_ecc_region(&self, section: usize) -> Result<OobRegion, ErrorCode> {
        self.layout.ecc(section)
    }

    pub fn oob_free_region(&self, section: usize) -> Result<OobRegion, ErrorCode> {
        self.layout.free(section)
    }
}
