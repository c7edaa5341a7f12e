// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

/// Numeric identifier of a placed block.
///
/// Ids are assigned by the engine: the first block on a diagram gets `0`,
/// every later block gets `max(existing) + 1`. Freed ids are not reused
/// within the lifetime of a diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(u32);

impl BlockId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for BlockId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Raised when wire-format ids (signed, `-1` reserved for the root
/// sentinel) cannot be mapped onto a [`BlockId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockIdError {
    Negative(i64),
    OutOfRange(i64),
}

impl fmt::Display for BlockIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negative(raw) => write!(f, "block id must not be negative (got {raw})"),
            Self::OutOfRange(raw) => write!(f, "block id out of range (got {raw})"),
        }
    }
}

impl std::error::Error for BlockIdError {}

impl TryFrom<i64> for BlockId {
    type Error = BlockIdError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        if raw < 0 {
            return Err(BlockIdError::Negative(raw));
        }
        u32::try_from(raw).map(Self).map_err(|_| BlockIdError::OutOfRange(raw))
    }
}

/// Opaque handle of a palette template owned by the host.
///
/// The engine never inspects the template beyond asking the host to measure
/// it; the value is whatever key the host uses to resolve its prototypes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateId(String);

impl TemplateId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TemplateId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

#[cfg(test)]
mod tests {
    use super::{BlockId, BlockIdError};

    #[test]
    fn block_id_rejects_negative_wire_values() {
        assert_eq!(BlockId::try_from(-1i64), Err(BlockIdError::Negative(-1)));
        assert_eq!(BlockId::try_from(-7i64), Err(BlockIdError::Negative(-7)));
    }

    #[test]
    fn block_id_accepts_wire_range() {
        assert_eq!(BlockId::try_from(0i64), Ok(BlockId::new(0)));
        assert_eq!(BlockId::try_from(41i64), Ok(BlockId::new(41)));
        assert_eq!(
            BlockId::try_from(i64::from(u32::MAX) + 1),
            Err(BlockIdError::OutOfRange(i64::from(u32::MAX) + 1))
        );
    }
}
