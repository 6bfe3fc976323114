// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Interfaces for SPI NAND flash chips.
//!
//! These traits sit between a NAND page read/write assembler and the
//! per-vendor chip descriptions:
//!
//! - [`OobLayout`] maps a section index of the spare (out-of-band) area to the
//!   bytes holding ECC parity and the bytes free for user metadata.
//! - [`EccStatus`] is the normalized result of decoding the chip's status
//!   register after a page read.
//! - [`FeatureAccess`] is the part of the SPI transaction executor vendor
//!   code needs: GET FEATURE / SET FEATURE on a feature register.
//!
//! Issuing the SPI commands themselves is not part of this interface.

use core::ops::Range;

use crate::ErrorCode;

/// Configuration feature register.
pub const REG_CFG: u8 = 0xB0;
/// Status feature register.
pub const REG_STATUS: u8 = 0xC0;

/// Decoded ECC engine result for one page read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EccStatus {
    /// No bit was corrected.
    Clean,
    /// Bit errors were corrected. The value is the upper bound of the band
    /// the chip reported, so callers never under-estimate wear.
    Corrected(u8),
    /// The chip detected more errors than it can correct.
    Uncorrectable,
    /// The status byte matches no pattern the chip documents. Either the
    /// hardware misbehaved or the chip table is wrong; in both cases the
    /// data must not be trusted.
    Unrecognized,
}

impl EccStatus {
    /// Number of corrected bitflips, in the form page readers consume.
    ///
    /// `Uncorrectable` becomes `BADMSG`, `Unrecognized` becomes `INVAL`.
    pub fn bitflips(self) -> Result<u8, ErrorCode> {
        match self {
            EccStatus::Clean => Ok(0),
            EccStatus::Corrected(n) => Ok(n),
            EccStatus::Uncorrectable => Err(ErrorCode::BADMSG),
            EccStatus::Unrecognized => Err(ErrorCode::INVAL),
        }
    }

    /// Whether the page data must be treated as lost.
    pub fn is_uncorrectable(self) -> bool {
        matches!(self, EccStatus::Uncorrectable | EccStatus::Unrecognized)
    }
}

/// A contiguous run of bytes in the spare area of a page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OobRegion {
    pub offset: usize,
    pub length: usize,
}

impl OobRegion {
    pub const fn new(offset: usize, length: usize) -> OobRegion {
        OobRegion { offset, length }
    }

    /// One past the last byte of the region.
    pub const fn end(&self) -> usize {
        self.offset + self.length
    }

    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }

    /// Whether the two regions share at least one byte.
    pub fn overlaps(&self, other: &OobRegion) -> bool {
        self.offset < other.end() && other.offset < self.end()
    }
}

/// Which half of an [`OobLayout`] a walk visits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionKind {
    Ecc,
    Free,
}

/// Layout of the spare area of one page.
///
/// Sections are numbered from 0. A section index at or beyond
/// [`OobLayout::sections`] is reported as `ErrorCode::RANGE`, which is how
/// callers know to stop iterating.
pub trait OobLayout {
    /// Number of sections this layout declares.
    fn sections(&self) -> usize;

    /// Bytes holding ECC parity for `section`.
    fn ecc(&self, section: usize) -> Result<OobRegion, ErrorCode>;

    /// Bytes free for user metadata in `section`.
    fn free(&self, section: usize) -> Result<OobRegion, ErrorCode>;

    fn region(&self, kind: RegionKind, section: usize) -> Result<OobRegion, ErrorCode> {
        match kind {
            RegionKind::Ecc => self.ecc(section),
            RegionKind::Free => self.free(section),
        }
    }

    /// Iterate over the ECC regions, stopping at the first `RANGE`.
    fn ecc_regions(&self) -> Regions<'_, Self> {
        Regions::new(self, RegionKind::Ecc)
    }

    /// Iterate over the free regions, stopping at the first `RANGE`.
    fn free_regions(&self) -> Regions<'_, Self> {
        Regions::new(self, RegionKind::Free)
    }

    /// Total number of ECC bytes in the spare area.
    fn ecc_bytes(&self) -> usize {
        self.ecc_regions().map(|r| r.length).sum()
    }

    /// Total number of free bytes in the spare area.
    fn free_bytes(&self) -> usize {
        self.free_regions().map(|r| r.length).sum()
    }

    /// Find the section holding the `index`-th byte of the `kind` area.
    ///
    /// Returns the section, its region, and the position of the byte inside
    /// that region.
    fn locate(
        &self,
        kind: RegionKind,
        index: usize,
    ) -> Result<(usize, OobRegion, usize), ErrorCode> {
        let mut skipped = 0;
        let mut section = 0;
        loop {
            let region = self.region(kind, section)?;
            if index < skipped + region.length {
                return Ok((section, region, index - skipped));
            }
            skipped += region.length;
            section += 1;
        }
    }

    /// Copy `buf.len()` bytes of the `kind` area, starting at its `start`-th
    /// byte, out of the spare area `oob`.
    fn read_bytes(
        &self,
        kind: RegionKind,
        oob: &[u8],
        start: usize,
        buf: &mut [u8],
    ) -> Result<(), ErrorCode> {
        if buf.is_empty() {
            return Ok(());
        }
        let (mut section, mut region, mut pos) = self.locate(kind, start)?;
        let mut copied = 0;
        loop {
            let count = (region.length - pos).min(buf.len() - copied);
            let from = region.offset + pos;
            let src = oob.get(from..from + count).ok_or(ErrorCode::INVAL)?;
            buf[copied..copied + count].copy_from_slice(src);
            copied += count;
            if copied == buf.len() {
                return Ok(());
            }
            section += 1;
            region = self.region(kind, section)?;
            pos = 0;
        }
    }

    /// Copy `data` into the `kind` area of the spare area `oob`, starting at
    /// its `start`-th byte. Bytes outside the visited regions are untouched.
    fn write_bytes(
        &self,
        kind: RegionKind,
        oob: &mut [u8],
        start: usize,
        data: &[u8],
    ) -> Result<(), ErrorCode> {
        if data.is_empty() {
            return Ok(());
        }
        let (mut section, mut region, mut pos) = self.locate(kind, start)?;
        let mut copied = 0;
        loop {
            let count = (region.length - pos).min(data.len() - copied);
            let to = region.offset + pos;
            let dst = oob.get_mut(to..to + count).ok_or(ErrorCode::INVAL)?;
            dst.copy_from_slice(&data[copied..copied + count]);
            copied += count;
            if copied == data.len() {
                return Ok(());
            }
            section += 1;
            region = self.region(kind, section)?;
            pos = 0;
        }
    }
}

/// Iterator over the regions of an [`OobLayout`].
pub struct Regions<'a, L: OobLayout + ?Sized> {
    layout: &'a L,
    kind: RegionKind,
    section: usize,
    done: bool,
}

impl<'a, L: OobLayout + ?Sized> Regions<'a, L> {
    pub fn new(layout: &'a L, kind: RegionKind) -> Regions<'a, L> {
        Regions {
            layout,
            kind,
            section: 0,
            done: false,
        }
    }
}

impl<L: OobLayout + ?Sized> Iterator for Regions<'_, L> {
    type Item = OobRegion;

    fn next(&mut self) -> Option<OobRegion> {
        if self.done {
            return None;
        }
        match self.layout.region(self.kind, self.section) {
            Ok(region) => {
                self.section += 1;
                Some(region)
            }
            Err(_) => {
                self.done = true;
                None
            }
        }
    }
}

/// Geometry of a NAND device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryOrganization {
    pub bits_per_cell: u8,
    pub pagesize: usize,
    pub oobsize: usize,
    pub pages_per_eraseblock: usize,
    pub eraseblocks_per_lun: usize,
    pub max_bad_eraseblocks_per_lun: usize,
    pub planes_per_lun: usize,
    pub luns_per_target: usize,
    pub ntargets: usize,
}

impl MemoryOrganization {
    /// Geometry of a device with one target and one LUN.
    pub const fn new(
        bits_per_cell: u8,
        pagesize: usize,
        oobsize: usize,
        pages_per_eraseblock: usize,
        eraseblocks_per_lun: usize,
        max_bad_eraseblocks_per_lun: usize,
        planes_per_lun: usize,
    ) -> MemoryOrganization {
        MemoryOrganization {
            bits_per_cell,
            pagesize,
            oobsize,
            pages_per_eraseblock,
            eraseblocks_per_lun,
            max_bad_eraseblocks_per_lun,
            planes_per_lun,
            luns_per_target: 1,
            ntargets: 1,
        }
    }

    pub const fn eraseblock_size(&self) -> usize {
        self.pagesize * self.pages_per_eraseblock
    }

    pub const fn eraseblocks(&self) -> usize {
        self.eraseblocks_per_lun * self.luns_per_target * self.ntargets
    }

    pub const fn pages(&self) -> usize {
        self.eraseblocks() * self.pages_per_eraseblock
    }

    /// Main-area capacity in bytes, spare areas excluded.
    pub const fn size(&self) -> u64 {
        self.eraseblocks() as u64 * self.eraseblock_size() as u64
    }
}

/// Minimum ECC capability the chip needs: `strength` bits per `step_size`
/// bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EccRequirements {
    pub strength: u8,
    pub step_size: usize,
}

impl EccRequirements {
    pub const fn new(strength: u8, step_size: usize) -> EccRequirements {
        EccRequirements {
            strength,
            step_size,
        }
    }

    /// Number of ECC steps covering one page.
    pub const fn steps(&self, pagesize: usize) -> usize {
        pagesize / self.step_size
    }
}

/// Feature-register access provided by the SPI transaction executor.
pub trait FeatureAccess {
    /// GET FEATURE on `register`.
    fn get_feature(&self, register: u8) -> Result<u8, ErrorCode>;

    /// SET FEATURE on `register`.
    fn set_feature(&self, register: u8, value: u8) -> Result<(), ErrorCode>;

    /// Replace the bits selected by `mask` in `register` with `value`.
    ///
    /// The register is only written back when its content changes.
    fn update_feature(&self, register: u8, mask: u8, value: u8) -> Result<(), ErrorCode> {
        let current = self.get_feature(register)?;
        let updated = (current & !mask) | (value & mask);
        if updated == current {
            return Ok(());
        }
        self.set_feature(register, updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    /// Three sections of `[8i + 1, 8i + 4)` free and `[8i + 4, 8i + 8)` ECC.
    struct Striped;

    impl OobLayout for Striped {
        fn sections(&self) -> usize {
            3
        }

        fn ecc(&self, section: usize) -> Result<OobRegion, ErrorCode> {
            if section >= 3 {
                return Err(ErrorCode::RANGE);
            }
            Ok(OobRegion::new(8 * section + 4, 4))
        }

        fn free(&self, section: usize) -> Result<OobRegion, ErrorCode> {
            if section >= 3 {
                return Err(ErrorCode::RANGE);
            }
            Ok(OobRegion::new(8 * section + 1, 3))
        }
    }

    #[test]
    fn ecc_status_bitflips() {
        assert_eq!(EccStatus::Clean.bitflips(), Ok(0));
        assert_eq!(EccStatus::Corrected(6).bitflips(), Ok(6));
        assert_eq!(EccStatus::Uncorrectable.bitflips(), Err(ErrorCode::BADMSG));
        assert_eq!(EccStatus::Unrecognized.bitflips(), Err(ErrorCode::INVAL));
        assert!(EccStatus::Unrecognized.is_uncorrectable());
        assert!(!EccStatus::Corrected(8).is_uncorrectable());
    }

    #[test]
    fn region_overlap() {
        let a = OobRegion::new(2, 6);
        assert_eq!(a.range(), 2..8);
        assert!(!a.overlaps(&OobRegion::new(8, 8)));
        assert!(a.overlaps(&OobRegion::new(7, 1)));
        assert!(OobRegion::new(0, 64).overlaps(&a));
    }

    #[test]
    fn iteration_stops_at_range() {
        let free: Vec<_> = Striped.free_regions().collect();
        assert_eq!(free.len(), 3);
        assert_eq!(free[2], OobRegion::new(17, 3));
        assert_eq!(Striped.ecc_bytes(), 12);
        assert_eq!(Striped.free_bytes(), 9);
    }

    #[test]
    fn locate_bytes() {
        assert_eq!(
            Striped.locate(RegionKind::Free, 4),
            Ok((1, OobRegion::new(9, 3), 1))
        );
        assert_eq!(Striped.locate(RegionKind::Free, 9), Err(ErrorCode::RANGE));
    }

    #[test]
    fn free_bytes_span_sections() {
        let mut oob = [0xFFu8; 24];
        Striped
            .write_bytes(RegionKind::Free, &mut oob, 2, &[0xA0, 0xA1, 0xA2, 0xA3])
            .unwrap();
        assert_eq!(&oob[3..4], &[0xA0]);
        assert_eq!(&oob[9..12], &[0xA1, 0xA2, 0xA3]);
        // ECC bytes and the marker bytes are untouched.
        assert_eq!(&oob[4..9], &[0xFF; 5]);

        let mut buf = [0u8; 4];
        Striped
            .read_bytes(RegionKind::Free, &oob, 2, &mut buf)
            .unwrap();
        assert_eq!(buf, [0xA0, 0xA1, 0xA2, 0xA3]);
    }

    #[test]
    fn free_bytes_past_the_end() {
        let oob = [0u8; 24];
        let mut buf = [0u8; 4];
        assert_eq!(
            Striped.read_bytes(RegionKind::Free, &oob, 7, &mut buf),
            Err(ErrorCode::RANGE)
        );
    }

    #[test]
    fn short_spare_buffer() {
        let oob = [0u8; 10];
        let mut buf = [0u8; 6];
        assert_eq!(
            Striped.read_bytes(RegionKind::Free, &oob, 0, &mut buf),
            Err(ErrorCode::INVAL)
        );
    }

    #[test]
    fn geometry() {
        let memorg = MemoryOrganization::new(1, 2048, 128, 64, 2048, 40, 1);
        assert_eq!(memorg.eraseblock_size(), 128 * 1024);
        assert_eq!(memorg.pages(), 131072);
        assert_eq!(memorg.size(), 256 * 1024 * 1024);
        assert_eq!(EccRequirements::new(8, 512).steps(memorg.pagesize), 4);
    }

    struct Features(core::cell::Cell<u8>, core::cell::Cell<usize>);

    impl FeatureAccess for Features {
        fn get_feature(&self, register: u8) -> Result<u8, ErrorCode> {
            assert_eq!(register, REG_CFG);
            Ok(self.0.get())
        }

        fn set_feature(&self, register: u8, value: u8) -> Result<(), ErrorCode> {
            assert_eq!(register, REG_CFG);
            self.0.set(value);
            self.1.set(self.1.get() + 1);
            Ok(())
        }
    }

    #[test]
    fn update_feature_skips_noop_writes() {
        let f = Features(core::cell::Cell::new(0x11), core::cell::Cell::new(0));
        f.update_feature(REG_CFG, 0x01, 0).unwrap();
        assert_eq!(f.0.get(), 0x10);
        assert_eq!(f.1.get(), 1);
        f.update_feature(REG_CFG, 0x01, 0).unwrap();
        assert_eq!(f.1.get(), 1);
    }
}
