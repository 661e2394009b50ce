use phf::{Map, phf_map};

/// The twenty standard amino acids in one letter code, in alphabetical order.
pub const AMINO_ACIDS: &str = "ACDEFGHIKLMNPQRSTVWY";

/// One letter code used for residues without a standard mapping.
pub const UNKNOWN_RESIDUE: char = 'X';

static THREE_TO_ONE: Map<&'static str, char> = phf_map! {
    "ALA" => 'A', "ARG" => 'R', "ASN" => 'N', "ASP" => 'D', "CYS" => 'C',
    "GLN" => 'Q', "GLU" => 'E', "GLY" => 'G', "HIS" => 'H', "ILE" => 'I',
    "LEU" => 'L', "LYS" => 'K', "MET" => 'M', "PHE" => 'F', "PRO" => 'P',
    "SER" => 'S', "THR" => 'T', "TRP" => 'W', "TYR" => 'Y', "VAL" => 'V',
    "SEC" => 'U', "PYL" => 'O', "ASX" => 'B', "GLX" => 'Z', "XLE" => 'J',
};

/// Converts a three letter residue name to its one letter code, `X` when unknown.
pub fn one_letter_code(residue_name: &str) -> char {
    THREE_TO_ONE
        .get(residue_name.trim().to_ascii_uppercase().as_str())
        .copied()
        .unwrap_or(UNKNOWN_RESIDUE)
}
