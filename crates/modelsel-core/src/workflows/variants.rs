use crate::core::io::pdb::PdbFile;
use crate::core::io::traits::StructureFile;
use crate::core::models::region::{ProteinRegion, RegionParseError};
use crate::core::models::residue::Residue;
use crate::core::utils::residues::{AMINO_ACIDS, one_letter_code};
use crate::engine::error::EngineError;
use serde::Deserialize;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, instrument};

#[derive(Debug, Error)]
pub enum SectionsError {
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid section: {0}")]
    Region(#[from] RegionParseError),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SectionsFile {
    sections: Vec<SectionSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SectionSpec {
    chain: String,
    positions: Option<String>,
    #[serde(rename = "accept-hetero", default)]
    accept_hetero: bool,
}

/// The parts of a structure substitutions should be generated for.
#[derive(Debug, Clone, PartialEq)]
pub struct Sections {
    regions: Vec<ProteinRegion>,
}

impl Sections {
    pub fn new(regions: Vec<ProteinRegion>) -> Self {
        Self { regions }
    }

    /// Parses a TOML document of `[[sections]]` tables with `chain`, optional `positions` and
    /// optional `accept-hetero` keys.
    pub fn from_toml_str(content: &str) -> Result<Self, SectionsError> {
        let file: SectionsFile = toml::from_str(content)?;
        let regions = file
            .sections
            .into_iter()
            .map(|s| ProteinRegion::new(s.chain, s.positions.as_deref(), s.accept_hetero))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { regions })
    }

    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|source| EngineError::Sections {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn regions(&self) -> &[ProteinRegion] {
        &self.regions
    }

    fn covers_chain(&self, chain: &str) -> bool {
        self.regions.iter().any(|r| r.chain() == chain)
    }

    fn contains(&self, residue: &Residue) -> bool {
        self.regions.iter().any(|r| r.contains(residue))
    }
}

/// Every single amino acid substitution of one residue, as `<wt><chain><position><mut>`.
pub fn residue_substitutions(residue: &Residue) -> impl Iterator<Item = String> + '_ {
    let wild_type = one_letter_code(&residue.name);
    AMINO_ACIDS
        .chars()
        .filter(move |&aa| aa != wild_type)
        .map(move |aa| format!("{}{}{}{}", wild_type, residue.chain, residue.position, aa))
}

/// Substitutions for all residues, or only those inside `sections` when given.
///
/// With sections, chains that no section mentions are skipped entirely.
pub fn substitutions(residues: &[Residue], sections: Option<&Sections>) -> Vec<String> {
    residues
        .iter()
        .filter(|residue| match sections {
            Some(sections) => sections.covers_chain(&residue.chain) && sections.contains(residue),
            None => true,
        })
        .flat_map(residue_substitutions)
        .collect()
}

/// Writes one substitution per line, each terminated by `;`.
pub fn write_substitutions<W: Write>(writer: &mut W, substitutions: &[String]) -> io::Result<()> {
    for substitution in substitutions {
        writeln!(writer, "{};", substitution)?;
    }
    Ok(())
}

#[instrument(skip_all, name = "variants_workflow")]
pub fn run(structure: &Path, sections: Option<&Path>) -> Result<Vec<String>, EngineError> {
    let residues = PdbFile::read_from_path(structure).map_err(|e| EngineError::Structure {
        path: structure.to_path_buf(),
        source: e,
    })?;
    debug!("Read {} residues from {:?}", residues.len(), structure);

    let sections = sections.map(Sections::load).transpose()?;
    let result = substitutions(&residues, sections.as_ref());
    info!(
        "Generated {} substitutions from {:?}",
        result.len(),
        structure
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn residues() -> Vec<Residue> {
        vec![
            Residue::new("A", 1, "SER", false),
            Residue::new("A", 2, "GLY", false),
            Residue::new("B", 1, "MET", false),
            Residue::new("A", 401, "HOH", true),
        ]
    }

    #[test]
    fn each_residue_yields_nineteen_substitutions() {
        let subs: Vec<String> = residue_substitutions(&Residue::new("A", 5, "ALA", false)).collect();
        assert_eq!(subs.len(), 19);
        assert_eq!(subs[0], "AA5C");
        assert!(!subs.contains(&"AA5A".to_string()));
    }

    #[test]
    fn unknown_residue_yields_all_twenty() {
        let subs: Vec<String> = residue_substitutions(&Residue::new("A", 401, "HOH", true)).collect();
        assert_eq!(subs.len(), 20);
        assert_eq!(subs[0], "XA401A");
    }

    #[test]
    fn without_sections_every_residue_is_used() {
        assert_eq!(substitutions(&residues(), None).len(), 19 * 3 + 20);
    }

    #[test]
    fn sections_restrict_chains_and_positions() {
        let sections = Sections::from_toml_str(
            r#"
            [[sections]]
            chain = "A"
            positions = "2:10"
            "#,
        )
        .unwrap();
        let subs = substitutions(&residues(), Some(&sections));
        assert_eq!(subs.len(), 19);
        assert!(subs.iter().all(|s| s.starts_with("GA2")));
    }

    #[test]
    fn section_without_positions_covers_standard_residues_of_chain() {
        let sections = Sections::from_toml_str(
            r#"
            [[sections]]
            chain = "A"
            "#,
        )
        .unwrap();
        let subs = substitutions(&residues(), Some(&sections));
        assert_eq!(subs.len(), 38);
    }

    #[test]
    fn hetero_residues_need_explicit_acceptance() {
        let sections = Sections::from_toml_str(
            r#"
            [[sections]]
            chain = "A"
            positions = "401"
            accept-hetero = true
            "#,
        )
        .unwrap();
        let subs = substitutions(&residues(), Some(&sections));
        assert_eq!(subs.len(), 20);
    }

    #[test]
    fn invalid_sections_are_rejected() {
        assert!(matches!(
            Sections::from_toml_str("[[sections]]\nchain = \"A\"\npositions = \"5:1\""),
            Err(SectionsError::Region(RegionParseError::ReversedRange { .. }))
        ));
        assert!(matches!(
            Sections::from_toml_str("[[sections]]\nchain = \"A\"\ncolour = \"red\""),
            Err(SectionsError::Toml(_))
        ));
        assert!(matches!(
            Sections::from_toml_str("not toml at all"),
            Err(SectionsError::Toml(_))
        ));
    }

    #[test]
    fn load_names_the_invalid_sections_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sections.toml");
        fs::write(&path, "[[sections]]\nchain = \"A\"\npositions = \"1:x\"\n").unwrap();

        let err = Sections::load(&path).unwrap_err();
        assert!(matches!(
            &err,
            EngineError::Sections {
                source: SectionsError::Region(RegionParseError::InvalidToken { .. }),
                ..
            }
        ));
        assert!(err.to_string().contains("sections.toml"));
    }

    #[test]
    fn output_terminates_each_substitution() {
        let mut buffer = Vec::new();
        write_substitutions(&mut buffer, &["SA1A".to_string(), "SA1C".to_string()]).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "SA1A;\nSA1C;\n");
    }

    #[test]
    fn run_reads_structure_and_sections_from_disk() {
        let dir = tempdir().unwrap();
        let pdb = dir.path().join("model.pdb");
        fs::write(
            &pdb,
            "ATOM      1  N   SER A   1      -2.474  -9.853  13.744  1.00 30.00           N\n\
             ATOM      2  N   GLY A   2      -0.913  -6.629  13.879  1.00 30.00           N\n",
        )
        .unwrap();
        let sections = dir.path().join("sections.toml");
        fs::write(&sections, "[[sections]]\nchain = \"A\"\npositions = \"1\"\n").unwrap();

        let subs = run(&pdb, Some(&sections)).unwrap();
        assert_eq!(subs.len(), 19);
        assert_eq!(subs[0], "SA1A");
    }

    #[test]
    fn run_reports_unreadable_structure() {
        let dir = tempdir().unwrap();
        let result = run(&dir.path().join("missing.pdb"), None);
        assert!(matches!(result, Err(EngineError::Structure { .. })));
    }
}
