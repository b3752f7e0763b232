use std::fmt;

/// Bit per attribute, set when the attribute has a committed change that has
/// not yet been shipped to a remote observer
#[derive(Clone, PartialEq, Eq)]
pub struct DiffMask {
    mask: Vec<u8>,
}

impl DiffMask {
    /// Create a new DiffMask with a given number of bytes
    pub fn new(bytes: u8) -> Self {
        Self {
            mask: vec![0; bytes as usize],
        }
    }

    /// Number of bytes needed to give every attribute of a set its own bit
    pub fn byte_length_for(attribute_count: usize) -> u8 {
        attribute_count.div_ceil(8).min(u8::MAX as usize) as u8
    }

    pub fn bit(&self, index: u8) -> Option<bool> {
        let byte = self.mask.get((index / 8) as usize)?;
        Some(byte & (1u8 << (index % 8)) != 0)
    }

    /// Sets the bit at `index`. Returns false if the index lies beyond the mask.
    pub fn set_bit(&mut self, index: u8, value: bool) -> bool {
        let Some(byte) = self.mask.get_mut((index / 8) as usize) else {
            return false;
        };
        let adjusted = 1u8 << (index % 8);
        if value {
            *byte |= adjusted;
        } else {
            *byte &= !adjusted;
        }
        true
    }

    pub fn clear(&mut self) {
        self.mask.iter_mut().for_each(|byte| *byte = 0);
    }

    pub fn is_clear(&self) -> bool {
        self.mask.iter().all(|byte| *byte == 0)
    }

    /// Indices of every set bit, ascending
    pub fn iter_set(&self) -> impl Iterator<Item = u8> + '_ {
        self.mask.iter().enumerate().flat_map(|(byte_index, byte)| {
            (0..8u8)
                .filter(move |bit| byte & (1u8 << *bit) != 0)
                .map(move |bit| (byte_index as u8) * 8 + bit)
        })
    }
}

impl fmt::Debug for DiffMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DiffMask(")?;
        for byte in &self.mask {
            write!(f, "{:08b}", byte)?;
        }
        write!(f, ")")
    }
}
