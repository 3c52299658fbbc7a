//src/summary.rs

use std::fmt;

use crate::consensus::ClassificationLists;
use crate::types::{Label, Reference};

/// REF/UNK row counts for one output list.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LabelCounts {
    pub ref_reads: usize,
    pub unk_reads: usize,
}

impl LabelCounts {
    pub fn total(&self) -> usize {
        self.ref_reads + self.unk_reads
    }
}

/// Per-reference tallies of a finished classification.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationSummary {
    pub chr_a: LabelCounts,
    pub chr_b: LabelCounts,
}

impl ClassificationSummary {
    pub fn from_lists(lists: &ClassificationLists) -> Self {
        let count = |reference| {
            lists
                .list(reference)
                .iter()
                .fold(LabelCounts::default(), |mut acc, rec| {
                    match rec.label {
                        Label::Ref => acc.ref_reads += 1,
                        Label::Unk => acc.unk_reads += 1,
                    }
                    acc
                })
        };
        Self {
            chr_a: count(Reference::A),
            chr_b: count(Reference::B),
        }
    }

    pub fn counts(&self, reference: Reference) -> LabelCounts {
        match reference {
            Reference::A => self.chr_a,
            Reference::B => self.chr_b,
        }
    }

    pub fn log(&self) {
        for reference in [Reference::A, Reference::B] {
            let c = self.counts(reference);
            log::info!("{}: REF={} UNK={}", reference, c.ref_reads, c.unk_reads);
        }
    }
}

impl fmt::Display for ClassificationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "chrA: REF={} UNK={}; chrB: REF={} UNK={}",
            self.chr_a.ref_reads, self.chr_a.unk_reads, self.chr_b.ref_reads, self.chr_b.unk_reads
        )
    }
}
