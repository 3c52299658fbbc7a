//src/types.rs

use std::fmt;

/// One of the two subgenome references a read can be assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Reference {
    A,
    B,
}

impl Reference {
    /// Suffix used for this reference's list file, e.g. `sample.chrA.list`.
    pub fn list_suffix(self) -> &'static str {
        match self {
            Reference::A => "chrA.list",
            Reference::B => "chrB.list",
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reference::A => f.write_str("chrA"),
            Reference::B => f.write_str("chrB"),
        }
    }
}

/// Confidence of an assignment: `REF` is confident, `UNK` is ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Ref,
    Unk,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Ref => f.write_str("REF"),
            Label::Unk => f.write_str("UNK"),
        }
    }
}

/// A read's scores in one report.
///
/// `position` is `refName\tcoord`, kept as text. `denominator` is the log-sum of
/// all hypothesis components, so it is never below `numerator`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRecord {
    pub position: String,
    pub numerator: f64,
    pub denominator: f64,
}

impl ScoreRecord {
    /// Log-odds that the read belongs to the reference it was scored against.
    pub fn log_odds(&self) -> f64 {
        self.numerator - self.denominator
    }
}

/// One row of a `.list` output file.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationRecord {
    pub read_name: String,
    pub reference: Reference,
    pub label: Label,
    pub position: String,
    pub numerator: f64,
    pub denominator: f64,
    pub discriminator: String,
}

/// Identifies a read within a report: the read name plus the discriminator
/// column that separates multiple alignment records of the same read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReadKey {
    pub read_name: String,
    pub discriminator: String,
}

impl ReadKey {
    pub fn new(read_name: impl Into<String>, discriminator: impl Into<String>) -> Self {
        Self {
            read_name: read_name.into(),
            discriminator: discriminator.into(),
        }
    }
}

impl fmt::Display for ReadKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.read_name, self.discriminator)
    }
}
