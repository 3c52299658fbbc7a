//src/consensus.rs

use crate::report::ScoreTable;
use crate::types::{ClassificationRecord, Label, ReadKey, Reference, ScoreRecord};

/// Minimum log-odds of the winning reference for a confident (`REF`) call: ln(0.95).
pub const REF_SCORE_THRESHOLD: f64 = -0.05129329438755058;

/// Minimum log-odds lead of the winner over the loser for a `REF` call: ln(0.01).
pub const REF_MARGIN_THRESHOLD: f64 = -4.605170185988091;

/// Reads assigned to each reference, in output order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ClassificationLists {
    pub chr_a: Vec<ClassificationRecord>,
    pub chr_b: Vec<ClassificationRecord>,
}

impl ClassificationLists {
    pub fn list(&self, reference: Reference) -> &[ClassificationRecord] {
        match reference {
            Reference::A => &self.chr_a,
            Reference::B => &self.chr_b,
        }
    }

    fn push(&mut self, record: ClassificationRecord) {
        match record.reference {
            Reference::A => self.chr_a.push(record),
            Reference::B => self.chr_b.push(record),
        }
    }
}

/// Picks the reference with the higher log-odds and labels the call.
///
/// Ties go to A. The call is `REF` only when the winner's own log-odds and its
/// lead over the loser both clear their thresholds (inclusive).
pub fn resolve_pair(rec_a: &ScoreRecord, rec_b: &ScoreRecord) -> (Reference, Label) {
    let score_a = rec_a.log_odds();
    let score_b = rec_b.log_odds();

    let (best, best_score, other_score) = if score_b > score_a {
        (Reference::B, score_b, score_a)
    } else {
        (Reference::A, score_a, score_b)
    };
    let margin = best_score - other_score;

    let label = if best_score >= REF_SCORE_THRESHOLD && margin >= REF_MARGIN_THRESHOLD {
        Label::Ref
    } else {
        Label::Unk
    };
    (best, label)
}

/// Labels a read that only one reference scored. There is no competitor, so
/// only the absolute threshold applies.
pub fn resolve_single(record: &ScoreRecord) -> Label {
    if record.log_odds() >= REF_SCORE_THRESHOLD {
        Label::Ref
    } else {
        Label::Unk
    }
}

fn to_record(
    key: &ReadKey,
    reference: Reference,
    label: Label,
    score: &ScoreRecord,
) -> ClassificationRecord {
    ClassificationRecord {
        read_name: key.read_name.clone(),
        reference,
        label,
        position: score.position.clone(),
        numerator: score.numerator,
        denominator: score.denominator,
        discriminator: key.discriminator.clone(),
    }
}

/// Merges the two reports into per-reference lists.
///
/// Keys scored by both references are resolved first, in table A order. With
/// `include_unique`, keys present only in A and then keys present only in B
/// are appended to their own reference's list.
pub fn classify(
    table_a: &ScoreTable,
    table_b: &ScoreTable,
    include_unique: bool,
) -> ClassificationLists {
    let mut lists = ClassificationLists::default();

    for (key, rec_a) in table_a.iter() {
        let Some(rec_b) = table_b.get(key) else {
            continue;
        };
        let (best, label) = resolve_pair(rec_a, rec_b);
        let winner = match best {
            Reference::A => rec_a,
            Reference::B => rec_b,
        };
        lists.push(to_record(key, best, label, winner));
    }

    if include_unique {
        for (reference, own, other) in [
            (Reference::A, table_a, table_b),
            (Reference::B, table_b, table_a),
        ] {
            for (key, rec) in own.iter() {
                if other.contains_key(key) {
                    continue;
                }
                lists.push(to_record(key, reference, resolve_single(rec), rec));
            }
        }
    }

    log::debug!(
        "classified {} reads to chrA, {} reads to chrB",
        lists.chr_a.len(),
        lists.chr_b.len()
    );
    lists
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    fn rec(position: &str, numerator: f64, denominator: f64) -> ScoreRecord {
        ScoreRecord {
            position: position.to_string(),
            numerator,
            denominator,
        }
    }

    fn table(rows: &[(&str, &str, ScoreRecord)]) -> ScoreTable {
        rows.iter()
            .map(|(name, disc, r)| (ReadKey::new(*name, *disc), r.clone()))
            .collect()
    }

    #[test]
    fn test_thresholds_match_probabilities() {
        assert_float_eq!(REF_SCORE_THRESHOLD, 0.95f64.ln(), ulps <= 1);
        assert_float_eq!(REF_MARGIN_THRESHOLD, 0.01f64.ln(), ulps <= 1);
    }

    #[test]
    fn test_shared_read_unk_in_list_a() {
        let a = table(&[("read1", "99", rec("chr1\t100", -1.0, -0.9))]);
        let b = table(&[("read1", "99", rec("chr2\t55", -5.0, -0.95))]);
        let lists = classify(&a, &b, false);

        assert!(lists.chr_b.is_empty());
        assert_eq!(lists.chr_a.len(), 1);
        let row = &lists.chr_a[0];
        assert_eq!(row.read_name, "read1");
        assert_eq!(row.discriminator, "99");
        assert_eq!(row.reference, Reference::A);
        assert_eq!(row.label, Label::Unk);
        assert_eq!(row.position, "chr1\t100");
        assert_eq!(row.numerator, -1.0);
        assert_eq!(row.denominator, -0.9);
    }

    #[test]
    fn test_shared_read_ref_in_list_b() {
        let a = table(&[("r", "0", rec("chr1\t1", -9.0, -0.5))]);
        let b = table(&[("r", "0", rec("chr2\t2", -0.51, -0.5))]);
        let lists = classify(&a, &b, false);

        assert!(lists.chr_a.is_empty());
        assert_eq!(lists.chr_b[0].label, Label::Ref);
        assert_eq!(lists.chr_b[0].position, "chr2\t2");
        assert_eq!(lists.chr_b[0].numerator, -0.51);
    }

    #[test]
    fn test_tie_goes_to_a() {
        let a = table(&[("r", "0", rec("chr1\t1", -1.0, -0.5))]);
        let b = table(&[("r", "0", rec("chr2\t2", -2.0, -1.5))]);
        let lists = classify(&a, &b, false);
        assert_eq!(lists.chr_a.len(), 1);
        assert!(lists.chr_b.is_empty());
    }

    #[test]
    fn test_threshold_boundaries_inclusive() {
        let at_score = rec("c\t1", REF_SCORE_THRESHOLD, 0.0);
        let loser = rec("c\t2", REF_SCORE_THRESHOLD + REF_MARGIN_THRESHOLD, 0.0);
        assert_eq!(resolve_pair(&at_score, &loser), (Reference::A, Label::Ref));
        assert_eq!(resolve_pair(&loser, &at_score), (Reference::B, Label::Ref));

        let below = rec("c\t1", REF_SCORE_THRESHOLD - 1e-9, 0.0);
        assert_eq!(resolve_pair(&below, &loser), (Reference::A, Label::Unk));

        assert_eq!(resolve_single(&at_score), Label::Ref);
        assert_eq!(resolve_single(&below), Label::Unk);
    }

    #[test]
    fn test_nearly_tied_confident_reads_are_ref() {
        // margin is never negative, so any pair above the score bound passes
        let a = rec("c\t1", -0.01, 0.0);
        let b = rec("c\t2", -0.02, 0.0);
        assert_eq!(resolve_pair(&a, &b), (Reference::A, Label::Ref));
    }

    #[test]
    fn test_partition_of_shared_reads() {
        let a = table(&[
            ("r1", "0", rec("a\t1", -0.01, 0.0)),
            ("r2", "0", rec("a\t2", -3.0, 0.0)),
            ("r3", "0", rec("a\t3", -1.0, 0.0)),
            ("onlyA", "0", rec("a\t4", -0.01, 0.0)),
        ]);
        let b = table(&[
            ("r3", "0", rec("b\t3", -1.0, 0.0)),
            ("r2", "0", rec("b\t2", -0.02, 0.0)),
            ("r1", "0", rec("b\t1", -4.0, 0.0)),
            ("onlyB", "0", rec("b\t4", -0.02, 0.0)),
        ]);
        let lists = classify(&a, &b, false);

        let names_a: Vec<&str> = lists.chr_a.iter().map(|r| r.read_name.as_str()).collect();
        let names_b: Vec<&str> = lists.chr_b.iter().map(|r| r.read_name.as_str()).collect();
        assert_eq!(names_a, vec!["r1", "r3"]);
        assert_eq!(names_b, vec!["r2"]);
    }

    #[test]
    fn test_discriminator_separates_keys() {
        let a = table(&[("r", "99", rec("a\t1", -0.01, 0.0))]);
        let b = table(&[("r", "147", rec("b\t1", -0.01, 0.0))]);
        assert_eq!(classify(&a, &b, false), ClassificationLists::default());

        let lists = classify(&a, &b, true);
        assert_eq!(lists.chr_a.len(), 1);
        assert_eq!(lists.chr_b.len(), 1);
    }

    #[test]
    fn test_unique_reads_gated_by_flag() {
        let a = table(&[("shared", "0", rec("a\t1", -0.5, 0.0))]);
        let b = table(&[
            ("shared", "0", rec("b\t1", -3.0, 0.0)),
            ("uniqB", "0", rec("b\t9", -0.02, 0.0)),
        ]);

        let off = classify(&a, &b, false);
        assert!(off.chr_b.is_empty());
        assert_eq!(off.chr_a.len(), 1);

        let on = classify(&a, &b, true);
        assert_eq!(on.chr_a.len(), 1);
        assert_eq!(on.chr_b.len(), 1);
        assert_eq!(on.chr_b[0].read_name, "uniqB");
        assert_eq!(on.chr_b[0].label, Label::Ref);
        assert_eq!(on.list(Reference::B)[0].position, "b\t9");
    }

    #[test]
    fn test_unique_read_below_threshold_is_unk() {
        let a = table(&[("uniqA", "1", rec("a\t1", -2.0, -0.1))]);
        let b = ScoreTable::new();
        let lists = classify(&a, &b, true);
        assert_eq!(lists.chr_a[0].label, Label::Unk);
        assert!(lists.chr_b.is_empty());
    }

    #[test]
    fn test_classify_is_repeatable() {
        let a = table(&[
            ("r1", "0", rec("a\t1", -0.01, 0.0)),
            ("r2", "1", rec("a\t2", -3.0, 0.0)),
            ("u", "1", rec("a\t3", -0.2, 0.0)),
        ]);
        let b = table(&[
            ("r2", "1", rec("b\t2", -0.02, 0.0)),
            ("r1", "0", rec("b\t1", -4.0, 0.0)),
        ]);
        assert_eq!(classify(&a, &b, true), classify(&a, &b, true));
    }
}
