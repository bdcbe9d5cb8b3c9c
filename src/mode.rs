use num_bigint::BigInt;

use crate::error::{Error, Result};
use crate::mem::{self, Memory};

/// A parameter addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Positional,
    Immediate,
    Relative,
}

impl Mode {
    pub fn from_value(v: i64) -> Option<Mode> {
        Some(match v {
            0 => Self::Positional,
            1 => Self::Immediate,
            2 => Self::Relative,
            _ => return None,
        })
    }

    /// Resolves a raw operand to the value it refers to.
    pub(crate) fn load(&self, mem: &Memory, base: &BigInt, raw: &BigInt) -> Result<BigInt> {
        match self {
            Self::Positional => Ok(mem.read(mem::addr(raw)?)),
            Self::Immediate => Ok(raw.clone()),
            Self::Relative => Ok(mem.read(mem::addr(&(base + raw))?)),
        }
    }

    /// Resolves a raw operand to the address it writes to. Immediate
    /// parameters have no address.
    pub(crate) fn store(&self, base: &BigInt, raw: &BigInt) -> Result<usize> {
        match self {
            Self::Positional => mem::addr(raw),
            Self::Immediate => Err(Error::WriteToImmediate),
            Self::Relative => mem::addr(&(base + raw)),
        }
    }
}
