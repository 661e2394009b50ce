use crate::core::io::traits::StructureFile;
use crate::core::models::residue::Residue;
use std::collections::HashSet;
use std::io::{self, BufRead};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: PdbParseErrorKind },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: String },
    #[error("Line is too short for ATOM/HETATM record (must be at least 27 chars)")]
    LineTooShort,
}

const MIN_ATOM_LINE_LEN: usize = 27;

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

/// Reads PDB files down to residue level.
///
/// Only the first model is read; everything after the first `ENDMDL` record is ignored.
pub struct PdbFile;

impl PdbFile {
    fn parse_residue(line: &str, hetero: bool) -> Result<Residue, PdbParseErrorKind> {
        if line.len() < MIN_ATOM_LINE_LEN {
            return Err(PdbParseErrorKind::LineTooShort);
        }

        let res_name = slice_and_trim(line, 17, 20);
        let chain = line.get(21..22).unwrap_or(" ");
        let res_seq = slice_and_trim(line, 22, 26);
        let insertion_code = line.get(26..27).and_then(|s| s.chars().next()).unwrap_or(' ');

        if res_seq.is_empty() {
            return Err(PdbParseErrorKind::MissingRequiredField {
                columns: "23-26".into(),
            });
        }
        let position: isize = res_seq.parse().map_err(|_| PdbParseErrorKind::InvalidInt {
            columns: "23-26".into(),
            value: res_seq.to_string(),
        })?;

        Ok(Residue::new(chain, position, res_name, hetero).with_insertion_code(insertion_code))
    }
}

impl StructureFile for PdbFile {
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<Vec<Residue>, Self::Error> {
        let mut residues = Vec::new();
        let mut seen: HashSet<(String, isize, char, bool)> = HashSet::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            let hetero = match slice_and_trim(&line, 0, 6) {
                "ATOM" => false,
                "HETATM" => true,
                "ENDMDL" => break,
                _ => continue,
            };

            let residue = Self::parse_residue(&line, hetero).map_err(|kind| PdbError::Parse {
                line: line_num,
                kind,
            })?;

            let key = (
                residue.chain.clone(),
                residue.position,
                residue.insertion_code,
                residue.hetero,
            );
            if seen.insert(key) {
                residues.push(residue);
            }
        }

        Ok(residues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    const PDB: &str = "\
HEADER    VIRAL PROTEIN
ATOM      1  N   SER A   1      -2.474  -9.853  13.744  1.00 30.00           N
ATOM      2  CA  SER A   1      -2.024  -8.548  13.285  1.00 30.00           C
ATOM      3  N   GLY A   2      -0.913  -6.629  13.879  1.00 30.00           N
ATOM      4  N   GLY A   2A     -0.913  -6.629  13.879  1.00 30.00           N
ATOM      5  N   PHE B  -3       1.111   2.222   3.333  1.00 30.00           N
HETATM    6  O   HOH A 401       5.000   5.000   5.000  1.00 30.00           O
ENDMDL
ATOM      7  N   LYS A   9       0.000   0.000   0.000  1.00 30.00           N
";

    fn read(content: &str) -> Result<Vec<Residue>, PdbError> {
        PdbFile::read_from(&mut Cursor::new(content))
    }

    #[test]
    fn reads_residues_of_first_model_in_file_order() {
        let residues = read(PDB).unwrap();
        let summary: Vec<(&str, isize, char, &str, bool)> = residues
            .iter()
            .map(|r| {
                (
                    r.chain.as_str(),
                    r.position,
                    r.insertion_code,
                    r.name.as_str(),
                    r.hetero,
                )
            })
            .collect();
        assert_eq!(
            summary,
            vec![
                ("A", 1, ' ', "SER", false),
                ("A", 2, ' ', "GLY", false),
                ("A", 2, 'A', "GLY", false),
                ("B", -3, ' ', "PHE", false),
                ("A", 401, ' ', "HOH", true),
            ]
        );
    }

    #[test]
    fn short_atom_line_is_an_error() {
        let result = read("ATOM      1  N   SER A\n");
        assert!(matches!(
            result,
            Err(PdbError::Parse {
                line: 1,
                kind: PdbParseErrorKind::LineTooShort
            })
        ));
    }

    #[test]
    fn non_numeric_residue_number_is_an_error() {
        let result = read("ATOM      1  N   SER A  x1      -2.474  -9.853  13.744\n");
        match result {
            Err(PdbError::Parse { line, kind }) => {
                assert_eq!(line, 1);
                assert_eq!(
                    kind,
                    PdbParseErrorKind::InvalidInt {
                        columns: "23-26".into(),
                        value: "x1".into()
                    }
                );
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn read_from_path_propagates_missing_file() {
        let dir = tempdir().unwrap();
        let result = PdbFile::read_from_path(dir.path().join("missing.pdb"));
        assert!(matches!(result, Err(PdbError::Io(_))));
    }

    #[test]
    fn read_from_path_reads_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.pdb");
        fs::write(&path, PDB).unwrap();
        assert_eq!(PdbFile::read_from_path(&path).unwrap().len(), 5);
    }
}
