//! 256-entry lookup tables for 8-bit sample remapping.

use crate::image::ChannelPlane;

/// Number of entries in a [`Lut1D`]: one per 8-bit input value.
pub const LUT_SIZE: usize = 256;

/// A 1D lookup table mapping every 8-bit input value to an 8-bit output.
///
/// Tables are built fresh for each pipeline run and never cached across
/// calls. Applying a table is a single indexed load per sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lut1D {
    table: [u8; LUT_SIZE],
}

impl Lut1D {
    /// The identity table (`out[i] = i`).
    pub fn identity() -> Self {
        Self::from_fn(|i| i)
    }

    /// Build a table by evaluating `f` for every input value.
    pub fn from_fn(f: impl Fn(u8) -> u8) -> Self {
        let mut table = [0u8; LUT_SIZE];
        for (i, entry) in table.iter_mut().enumerate() {
            *entry = f(i as u8);
        }
        Self { table }
    }

    /// Wrap an explicit table.
    pub fn from_table(table: [u8; LUT_SIZE]) -> Self {
        Self { table }
    }

    /// Output for `input`.
    #[inline]
    pub fn lookup(&self, input: u8) -> u8 {
        self.table[input as usize]
    }

    /// The raw table.
    pub fn as_array(&self) -> &[u8; LUT_SIZE] {
        &self.table
    }

    /// Whether every entry maps to itself.
    pub fn is_identity(&self) -> bool {
        self.table.iter().enumerate().all(|(i, &v)| v as usize == i)
    }

    /// Whether the table never decreases.
    pub fn is_monotonic(&self) -> bool {
        self.table.windows(2).all(|w| w[0] <= w[1])
    }

    /// Remap every sample of `plane` through this table.
    pub fn apply(&self, plane: &ChannelPlane) -> ChannelPlane {
        plane.map(|v| self.lookup(v))
    }
}

impl Default for Lut1D {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_lut_is_identity() {
        let lut = Lut1D::identity();
        assert!(lut.is_identity());
        assert!(lut.is_monotonic());
        assert_eq!(lut.lookup(0), 0);
        assert_eq!(lut.lookup(255), 255);
    }

    #[test]
    fn test_apply_remaps_every_sample() {
        let lut = Lut1D::from_fn(|v| 255 - v);
        assert!(!lut.is_monotonic());
        let plane = ChannelPlane::from_fn(4, 2, |x, y| (x * 10 + y) as u8).unwrap();
        let out = lut.apply(&plane);
        assert_eq!(out.get(3, 1), Some(255 - 31));
        assert_eq!(out.dimensions(), plane.dimensions());
    }
}
