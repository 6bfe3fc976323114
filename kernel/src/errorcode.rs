// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Standard error enum for invoking operations

/// Standard errors.
///
/// Every fallible operation in the clock-gate model, the NAND ECC decoders
/// and the OOB layouts reports one of these. None of them are retried
/// internally; the caller decides what to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(usize)]
pub enum ErrorCode {
    // Reserved value, for when "no error" / "success" should be encoded in
    // the same numeric representation as ErrorCode
    //
    // Ok(()) = 0,
    /// Generic failure condition
    FAIL = 1,
    /// Underlying system is busy; retry
    BUSY = 2,
    /// An invalid parameter was passed, or hardware reported a value that
    /// matches no known encoding
    INVAL = 6,
    /// Operation or command is unsupported by this peripheral slot
    NOSUPPORT = 10,
    /// Device does not exist
    NODEVICE = 11,
    /// Index is beyond the number of regions the layout declares
    RANGE = 14,
    /// Data could not be recovered: uncorrectable ECC error
    BADMSG = 15,
}

impl From<ErrorCode> for usize {
    fn from(err: ErrorCode) -> usize {
        err as usize
    }
}

impl TryFrom<usize> for ErrorCode {
    type Error = ();

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ErrorCode::FAIL),
            2 => Ok(ErrorCode::BUSY),
            6 => Ok(ErrorCode::INVAL),
            10 => Ok(ErrorCode::NOSUPPORT),
            11 => Ok(ErrorCode::NODEVICE),
            14 => Ok(ErrorCode::RANGE),
            15 => Ok(ErrorCode::BADMSG),
            _ => Err(()),
        }
    }
}

/// Convert a `Result<(), ErrorCode>` to a `usize`, with `Ok(())` as 0.
pub fn into_statuscode(r: Result<(), ErrorCode>) -> usize {
    match r {
        Ok(()) => 0,
        Err(e) => e as usize,
    }
}
