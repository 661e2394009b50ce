use serde_json::Value;

/// The identifying triple of a residue, as far as region membership is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResidueKey<'a> {
    pub chain: &'a str,
    pub position: isize,
    pub hetero: bool,
}

impl<'a> ResidueKey<'a> {
    pub fn new(chain: &'a str, position: isize, hetero: bool) -> Self {
        Self {
            chain,
            position,
            hetero,
        }
    }
}

/// Anything that can be tested for membership in a
/// [`ProteinRegion`](crate::core::models::region::ProteinRegion).
///
/// Records that cannot describe themselves return `None`, which makes the membership test
/// fail with a warning instead of an error.
pub trait ResidueRecord {
    fn residue_key(&self) -> Option<ResidueKey<'_>>;
}

impl ResidueRecord for ResidueKey<'_> {
    fn residue_key(&self) -> Option<ResidueKey<'_>> {
        Some(*self)
    }
}

impl<T: ResidueRecord + ?Sized> ResidueRecord for &T {
    fn residue_key(&self) -> Option<ResidueKey<'_>> {
        (**self).residue_key()
    }
}

/// JSON objects of the form `{"chain": "A", "position": 12, "hetero": false}`.
/// `hetero` may be omitted and defaults to `false`.
impl ResidueRecord for Value {
    fn residue_key(&self) -> Option<ResidueKey<'_>> {
        let object = self.as_object()?;
        let chain = object.get("chain")?.as_str()?;
        let position = isize::try_from(object.get("position")?.as_i64()?).ok()?;
        let hetero = match object.get("hetero") {
            Some(value) => value.as_bool()?,
            None => false,
        };
        Some(ResidueKey::new(chain, position, hetero))
    }
}

/// A residue read from a structure file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub chain: String,            // Chain identifier
    pub position: isize,          // Residue sequence number from source file
    pub insertion_code: char,     // PDB insertion code, ' ' when absent
    pub name: String,             // Three letter residue name (e.g. "ALA")
    pub hetero: bool,             // Read from HETATM records
}

impl Residue {
    pub fn new(chain: &str, position: isize, name: &str, hetero: bool) -> Self {
        Self {
            chain: chain.to_string(),
            position,
            insertion_code: ' ',
            name: name.to_string(),
            hetero,
        }
    }

    pub fn with_insertion_code(mut self, code: char) -> Self {
        self.insertion_code = code;
        self
    }
}

impl ResidueRecord for Residue {
    fn residue_key(&self) -> Option<ResidueKey<'_>> {
        Some(ResidueKey::new(&self.chain, self.position, self.hetero))
    }
}
