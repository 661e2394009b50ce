use super::residue::ResidueRecord;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegionParseError {
    #[error("Invalid position token '{token}' in region '{spec}'")]
    InvalidToken { spec: String, token: String },

    #[error("Range '{start}:{end}' in region '{spec}' has its start after its end")]
    ReversedRange {
        spec: String,
        start: isize,
        end: isize,
    },
}

/// The positions a region accepts on its chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Positions {
    /// Every position on the chain.
    All,
    /// Explicitly listed positions, in the order they were given. Duplicates are kept.
    Listed(Vec<isize>),
}

impl Positions {
    /// Parses a comma separated list of positions and inclusive `start:end` ranges.
    pub fn parse(spec: &str) -> Result<Self, RegionParseError> {
        let mut positions = Vec::new();
        for token in spec.split(',') {
            let token = token.trim();
            let invalid = || RegionParseError::InvalidToken {
                spec: spec.to_string(),
                token: token.to_string(),
            };

            match token.split_once(':') {
                Some((start, end)) => {
                    let start = isize::from_str(start.trim()).map_err(|_| invalid())?;
                    let end = isize::from_str(end.trim()).map_err(|_| invalid())?;
                    if start > end {
                        return Err(RegionParseError::ReversedRange {
                            spec: spec.to_string(),
                            start,
                            end,
                        });
                    }
                    positions.extend(start..=end);
                }
                None => positions.push(isize::from_str(token).map_err(|_| invalid())?),
            }
        }
        Ok(Positions::Listed(positions))
    }

    pub fn contains(&self, position: isize) -> bool {
        match self {
            Positions::All => true,
            Positions::Listed(list) => list.contains(&position),
        }
    }
}

/// A set of sequence positions on a named chain.
///
/// Regions are written as a comma separated list of single positions and inclusive `X:Y`
/// ranges, e.g. `"1:10,15,20:25"`. A region without a position list covers the whole chain.
/// Heteroatom residues are only members when the region explicitly accepts them.
#[derive(Debug, Clone)]
pub struct ProteinRegion {
    chain: String,
    positions: Positions,
    positions_str: Option<String>,
    accept_hetero: bool,
}

impl ProteinRegion {
    pub fn new(
        chain: impl Into<String>,
        positions: Option<&str>,
        accept_hetero: bool,
    ) -> Result<Self, RegionParseError> {
        let parsed = match positions {
            Some(spec) => Positions::parse(spec)?,
            None => Positions::All,
        };
        Ok(Self {
            chain: chain.into(),
            positions: parsed,
            positions_str: positions.map(str::to_string),
            accept_hetero,
        })
    }

    /// Builds a region from inclusive `(start, end)` ranges.
    ///
    /// An empty range list gives a region with no positions at all, not a whole-chain region.
    pub fn from_ranges(
        chain: impl Into<String>,
        ranges: &[(isize, isize)],
    ) -> Result<Self, RegionParseError> {
        let spec = ranges
            .iter()
            .map(|(start, end)| format!("{}:{}", start, end))
            .collect::<Vec<_>>()
            .join(",");

        if ranges.is_empty() {
            return Ok(Self {
                chain: chain.into(),
                positions: Positions::Listed(Vec::new()),
                positions_str: Some(spec),
                accept_hetero: false,
            });
        }
        Self::new(chain, Some(&spec), false)
    }

    /// A region covering every standard residue of `chain`.
    pub fn whole_chain(chain: impl Into<String>) -> Self {
        Self {
            chain: chain.into(),
            positions: Positions::All,
            positions_str: None,
            accept_hetero: false,
        }
    }

    pub fn chain(&self) -> &str {
        &self.chain
    }

    pub fn positions(&self) -> &Positions {
        &self.positions
    }

    pub fn positions_str(&self) -> Option<&str> {
        self.positions_str.as_deref()
    }

    pub fn accepts_hetero(&self) -> bool {
        self.accept_hetero
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self.positions, Positions::All)
    }

    /// The distinct listed positions, or `None` for a whole-chain region.
    pub fn position_set(&self) -> Option<BTreeSet<isize>> {
        match &self.positions {
            Positions::All => None,
            Positions::Listed(list) => Some(list.iter().copied().collect()),
        }
    }

    /// Tests whether a residue record lies in this region.
    ///
    /// Records that cannot report a chain, position and hetero flag are never members.
    pub fn contains<R: ResidueRecord + ?Sized>(&self, record: &R) -> bool {
        let Some(key) = record.residue_key() else {
            warn!(
                "Tried to check membership of an unrecognised residue record in {}",
                self
            );
            return false;
        };

        self.chain == key.chain
            && self.positions.contains(key.position)
            && (!key.hetero || self.accept_hetero)
    }
}

impl PartialEq for ProteinRegion {
    fn eq(&self, other: &Self) -> bool {
        self.chain == other.chain
            && self.positions_str == other.positions_str
            && self.accept_hetero == other.accept_hetero
    }
}

impl Eq for ProteinRegion {}

impl fmt::Display for ProteinRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ProteinRegion({}, {}, accept_hetero={})",
            self.chain,
            self.positions_str.as_deref().unwrap_or("all"),
            self.accept_hetero
        )
    }
}
