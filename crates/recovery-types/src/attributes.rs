//! Method attribute flags.
//!
//! Values follow the ECMA-335 `MethodAttributes` layout so that flags read
//! straight out of a module's metadata tables can be used unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitOr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MethodAttributes(pub u16);

impl MethodAttributes {
    pub const MEMBER_ACCESS_MASK: Self = Self(0x0007);
    pub const PRIVATE_SCOPE: Self = Self(0x0000);
    pub const PRIVATE: Self = Self(0x0001);
    pub const FAM_AND_ASSEM: Self = Self(0x0002);
    pub const ASSEMBLY: Self = Self(0x0003);
    pub const FAMILY: Self = Self(0x0004);
    pub const FAM_OR_ASSEM: Self = Self(0x0005);
    pub const PUBLIC: Self = Self(0x0006);

    pub const STATIC: Self = Self(0x0010);
    pub const FINAL: Self = Self(0x0020);
    pub const VIRTUAL: Self = Self(0x0040);
    pub const HIDE_BY_SIG: Self = Self(0x0080);
    pub const NEW_SLOT: Self = Self(0x0100);
    pub const ABSTRACT: Self = Self(0x0400);
    pub const SPECIAL_NAME: Self = Self(0x0800);
    pub const RT_SPECIAL_NAME: Self = Self(0x1000);

    /// True when every bit of `other` is set. Access levels are not bit
    /// flags; compare them through [`MethodAttributes::access`].
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn access(self) -> Self {
        Self(self.0 & Self::MEMBER_ACCESS_MASK.0)
    }

    /// Drops the member-access bits. Two overloads that differ only in
    /// accessibility compare equal after this.
    pub const fn ignore_visibility(self) -> Self {
        Self(self.0 & !Self::MEMBER_ACCESS_MASK.0)
    }
}

impl BitOr for MethodAttributes {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Display for MethodAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}
