use std::fmt;
use std::str::FromStr;
use lattice_core::LatticeParams;
use crate::error::LpsError;

/// Named parameter sets.
///
/// Each modulus clears `10·n·(ln n)²` and each block size is a whole
/// number of bytes so a block can carry text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterSet {
    /// n = 8, one byte per block. Only useful for demonstrations
    Toy,
    /// n = 32, 8 bytes per block
    Small,
    /// n = 64, 16 bytes per block
    Medium,
    /// n = 128, 32 bytes per block
    Large,
}

impl ParameterSet {
    /// All presets, smallest first
    pub const ALL: [ParameterSet; 4] = [
        ParameterSet::Toy,
        ParameterSet::Small,
        ParameterSet::Medium,
        ParameterSet::Large,
    ];

    /// Returns the lattice dimension n
    pub fn n(&self) -> usize {
        match self {
            ParameterSet::Toy => 8,
            ParameterSet::Small => 32,
            ParameterSet::Medium => 64,
            ParameterSet::Large => 128,
        }
    }

    /// Returns the modulus q
    pub fn q(&self) -> i64 {
        match self {
            ParameterSet::Toy => 347,
            ParameterSet::Small => 4001,
            ParameterSet::Medium => 12289,
            ParameterSet::Large => 40961,
        }
    }

    /// Returns the block size k in bits
    pub fn k(&self) -> usize {
        match self {
            ParameterSet::Toy => 8,
            ParameterSet::Small => 64,
            ParameterSet::Medium => 128,
            ParameterSet::Large => 256,
        }
    }

    /// Returns the parameter triple
    pub fn lattice_params(&self) -> LatticeParams {
        LatticeParams {
            n: self.n(),
            q: self.q(),
            k: self.k(),
        }
    }

    /// Lower-case name used on the command line
    pub fn name(&self) -> &'static str {
        match self {
            ParameterSet::Toy => "toy",
            ParameterSet::Small => "small",
            ParameterSet::Medium => "medium",
            ParameterSet::Large => "large",
        }
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (n = {}, q = {}, k = {})", self.name(), self.n(), self.q(), self.k())
    }
}

impl FromStr for ParameterSet {
    type Err = LpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParameterSet::ALL
            .iter()
            .copied()
            .find(|set| set.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| LpsError::InvalidParameters(format!(
                "unknown parameter set '{}', expected one of toy, small, medium, large",
                s
            )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_pass_validation() {
        for set in ParameterSet::ALL {
            let params = set.lattice_params();
            let validated = LatticeParams::new(params.n, params.q, params.k)
                .unwrap_or_else(|e| panic!("{} rejected: {}", set, e));
            assert_eq!(validated, params);
            assert_eq!(params.k % 8, 0);
        }
    }

    #[test]
    fn test_preset_values() {
        let toy = ParameterSet::Toy.lattice_params();
        assert_eq!((toy.n, toy.q, toy.k), (8, 347, 8));
        assert_eq!(toy.block_bytes(), 1);

        let large = ParameterSet::Large.lattice_params();
        assert_eq!(large.ciphertext_len(), 384);
        assert_eq!(large.block_bytes(), 32);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("toy".parse::<ParameterSet>().unwrap(), ParameterSet::Toy);
        assert_eq!("Medium".parse::<ParameterSet>().unwrap(), ParameterSet::Medium);
        assert!(matches!(
            "huge".parse::<ParameterSet>(),
            Err(LpsError::InvalidParameters(_))
        ));
    }
}
