//! PDB-style residue annotations carried by atoms read from macromolecular structures.

use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardResidue {
    ALA,
    ARG,
    ASN,
    ASP,
    CYS,
    GLN,
    GLU,
    GLY,
    HIS,
    ILE,
    LEU,
    LYS,
    MET,
    PHE,
    PRO,
    SER,
    THR,
    TRP,
    TYR,
    VAL,
    A,
    C,
    G,
    U,
    I,
    DA,
    DC,
    DG,
    DT,
    DI,
    HOH,
}

impl StandardResidue {
    pub fn category(&self) -> ResidueCategory {
        match self {
            StandardResidue::HOH => ResidueCategory::Hetero,
            _ => ResidueCategory::Standard,
        }
    }
}

impl FromStr for StandardResidue {
    type Err = ();

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        use StandardResidue::*;
        let residue = match name.trim() {
            "ALA" => ALA,
            "ARG" => ARG,
            "ASN" => ASN,
            "ASP" => ASP,
            "CYS" => CYS,
            "GLN" => GLN,
            "GLU" => GLU,
            "GLY" => GLY,
            "HIS" => HIS,
            "ILE" => ILE,
            "LEU" => LEU,
            "LYS" => LYS,
            "MET" => MET,
            "PHE" => PHE,
            "PRO" => PRO,
            "SER" => SER,
            "THR" => THR,
            "TRP" => TRP,
            "TYR" => TYR,
            "VAL" => VAL,
            "A" => A,
            "C" => C,
            "G" => G,
            "U" => U,
            "I" => I,
            "DA" => DA,
            "DC" => DC,
            "DG" => DG,
            "DT" => DT,
            "DI" => DI,
            "HOH" | "WAT" => HOH,
            _ => return Err(()),
        };
        Ok(residue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResidueCategory {
    Standard,
    Hetero,
    Ion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResiduePosition {
    #[default]
    None,
    Internal,
    NTerminal,
    CTerminal,
    FivePrime,
    ThreePrime,
}

/// One ATOM/HETATM record's worth of residue context.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomResidueInfo {
    pub atom_name: String,
    pub residue_name: String,
    pub residue_id: i32,
    pub chain_id: char,
    pub insertion_code: char,
    pub alt_loc: Option<char>,
    pub serial: Option<u32>,
    pub segment_id: Option<String>,
    pub occupancy: Option<f64>,
    pub temp_factor: Option<f64>,
    /// Whether the atom is the terminal OXT oxygen of a chain.
    pub oxt: bool,
    pub standard_name: Option<StandardResidue>,
    pub category: ResidueCategory,
    pub position: ResiduePosition,
}

impl AtomResidueInfo {
    /// A record for a standard or hetero residue; the standard name and
    /// category are derived from `residue_name`.
    pub fn new(
        atom_name: impl Into<String>,
        residue_name: impl Into<String>,
        residue_id: i32,
        chain_id: char,
    ) -> Self {
        let residue_name = residue_name.into();
        let standard_name = residue_name.parse::<StandardResidue>().ok();
        Self {
            atom_name: atom_name.into(),
            residue_name,
            residue_id,
            chain_id,
            insertion_code: ' ',
            alt_loc: None,
            serial: None,
            segment_id: None,
            occupancy: None,
            temp_factor: None,
            oxt: false,
            standard_name,
            category: standard_name.map_or(ResidueCategory::Hetero, |r| r.category()),
            position: ResiduePosition::None,
        }
    }

    /// `true` for HETATM records.
    pub fn is_hetero(&self) -> bool {
        self.category != ResidueCategory::Standard
    }

    pub fn record_name(&self) -> &'static str {
        if self.is_hetero() {
            "HETATM"
        } else {
            "ATOM"
        }
    }
}
