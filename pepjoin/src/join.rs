use super::*;

/// Inner join a list of tables on their peptide key, left to right.
///
/// Only peptides present in every table survive. The surviving peptide set
/// does not depend on the order of `tables`, but the row and column layout of
/// the result follows it: rows in the order of the first table, columns in
/// table order.
///
/// # Example
///
/// ```rust,ignore
/// # use pepjoin::*;
/// let int = read_intensity_table("int.tab", &groups, "peptide")?;
/// let tax = read_taxonomy_table("tax.tab", "peptide", "lca")?;
/// let joined = join_on_peptide(vec![int, tax])?;
/// ```
pub fn join_on_peptide(tables: Vec<PeptideTable>) -> Result<PeptideTable> {
    let mut iter = tables.into_iter();
    let mut joined = iter.next().ok_or(Error::EmptyJoin)?;
    for other in iter {
        joined = joined.inner_join(&other)?;
    }
    if joined.is_empty() {
        warn!("no peptides are shared by all joined tables");
    }
    Ok(joined)
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn table(column: &str, keys: &[&str]) -> PeptideTable {
        let mut frame = Frame::new();
        frame
            .push_column(
                column,
                Column::Text(keys.iter().map(|k| Some(k.to_lowercase())).collect()),
            )
            .unwrap();
        PeptideTable::new("peptide", keys.iter().map(|&k| k.into()).collect(), frame).unwrap()
    }

    #[test]
    fn intersection() {
        let int = table("int", &["P1", "P2", "P3"]);
        let tax = table("tax", &["P2", "P3", "P4"]);
        let joined = join_on_peptide(vec![int, tax]).unwrap();
        assert_eq!(joined.keys(), &["P2", "P3"]);
        assert_eq!(joined.frame().names(), &["int", "tax"]);
        assert_eq!(joined.text("P3", "tax"), Some(Some("p3")));
    }

    #[test]
    fn single_table_passes_through() {
        let int = table("int", &["P1", "P2"]);
        let joined = join_on_peptide(vec![int.clone()]).unwrap();
        assert_eq!(joined, int);
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(join_on_peptide(Vec::new()), Err(Error::EmptyJoin)));
    }

    #[test]
    fn column_collision() {
        let a = table("x", &["P1"]);
        let b = table("x", &["P1"]);
        assert!(matches!(
            join_on_peptide(vec![a, b]),
            Err(Error::ColumnCollision { .. })
        ));
    }

    fn key_sets() -> impl Strategy<Value = Vec<BTreeSet<String>>> {
        prop::collection::vec(
            prop::collection::btree_set("[A-F]{1,2}", 0..12),
            1..5,
        )
    }

    proptest! {
        #[test]
        fn permutation_invariant(sets in key_sets(), seed in any::<u64>()) {
            let build = |order: &[usize]| {
                order
                    .iter()
                    .map(|&i| {
                        let keys = sets[i].iter().map(String::as_str).collect::<Vec<_>>();
                        table(&format!("c{}", i), &keys)
                    })
                    .collect::<Vec<_>>()
            };

            let forward = (0..sets.len()).collect::<Vec<_>>();
            // a deterministic shuffle driven by `seed`
            let mut shuffled = forward.clone();
            let mut state = seed;
            for i in (1..shuffled.len()).rev() {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                shuffled.swap(i, (state >> 33) as usize % (i + 1));
            }

            let expected = sets
                .iter()
                .skip(1)
                .fold(sets[0].clone(), |acc, s| acc.intersection(s).cloned().collect());

            for order in &[forward, shuffled] {
                let joined = join_on_peptide(build(order.as_slice())).unwrap();
                let got = joined.keys().iter().cloned().collect::<BTreeSet<_>>();
                prop_assert_eq!(&got, &expected);
                prop_assert_eq!(joined.frame().width(), sets.len());
            }
        }
    }
}
