use indexmap::IndexMap;
use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};

use crate::error::{Error, Result};

/// Converts a value to a memory address.
///
/// Negative values and values too large to index with are not valid
/// addresses.
pub(crate) fn addr(value: &BigInt) -> Result<usize> {
    value.to_usize().ok_or_else(|| Error::AddressOutOfRange {
        addr: value.clone(),
    })
}

/// A program's working memory.
///
/// The original program extent is stored densely and everything beyond it
/// sparsely, defaulting to zero. The parsed program itself is kept around as
/// the baseline that [`reset`][Memory::reset] restores.
#[derive(Debug, Clone)]
pub struct Memory {
    original: Vec<BigInt>,
    dense: Vec<BigInt>,
    sparse: IndexMap<usize, BigInt>,
}

impl Memory {
    pub fn new(program: Vec<BigInt>) -> Self {
        Self {
            dense: program.clone(),
            original: program,
            sparse: IndexMap::new(),
        }
    }

    /// The length of the original program.
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// Returns the value at the given address, zero if it was never written.
    pub fn read(&self, addr: usize) -> BigInt {
        match self.dense.get(addr) {
            Some(value) => value.clone(),
            None => self.sparse.get(&addr).cloned().unwrap_or_else(BigInt::zero),
        }
    }

    /// Stores a value at the given address, growing the sparse extent if
    /// necessary. Writing zero beyond the program extent is a no-op on the
    /// representation.
    pub fn write(&mut self, addr: usize, value: BigInt) {
        if let Some(slot) = self.dense.get_mut(addr) {
            *slot = value;
        } else if value.is_zero() {
            self.sparse.shift_remove(&addr);
        } else {
            self.sparse.insert(addr, value);
        }
    }

    /// Restores the memory to the original program.
    pub fn reset(&mut self) {
        self.dense.clone_from(&self.original);
        self.sparse.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory(program: &[i64]) -> Memory {
        Memory::new(program.iter().copied().map(BigInt::from).collect())
    }

    #[test]
    fn read_beyond_extent_is_zero() {
        let mem = memory(&[1, 2, 3]);
        assert_eq!(mem.read(2), BigInt::from(3));
        assert_eq!(mem.read(3), BigInt::zero());
        assert_eq!(mem.read(1_000_000), BigInt::zero());
    }

    #[test]
    fn write_then_read_round_trips() {
        let mut mem = memory(&[1, 2, 3]);
        mem.write(1, BigInt::from(-7));
        assert_eq!(mem.read(1), BigInt::from(-7));

        let big: BigInt = "123456789012345678901234567890".parse().unwrap();
        mem.write(500, big.clone());
        assert_eq!(mem.read(500), big);
    }

    #[test]
    fn write_zero_beyond_extent_does_not_grow() {
        let mut mem = memory(&[99]);
        mem.write(100, BigInt::zero());
        assert!(mem.sparse.is_empty());

        mem.write(100, BigInt::from(5));
        mem.write(100, BigInt::zero());
        assert!(mem.sparse.is_empty());
        assert_eq!(mem.read(100), BigInt::zero());
    }

    #[test]
    fn reset_restores_original() {
        let mut mem = memory(&[1, 0, 0, 0, 99]);
        mem.write(0, BigInt::from(2));
        mem.write(50, BigInt::from(7));
        mem.reset();
        assert_eq!(mem.read(0), BigInt::from(1));
        assert_eq!(mem.read(50), BigInt::zero());
        assert!(mem.sparse.is_empty());
    }

    #[test]
    fn negative_address_is_invalid() {
        assert!(matches!(
            addr(&BigInt::from(-1)),
            Err(Error::AddressOutOfRange { .. })
        ));
        assert_eq!(addr(&BigInt::from(42)).unwrap(), 42);
    }
}
