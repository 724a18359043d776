use fasttext_query::math::{cosine_similarity, dot_product, norm};
use fasttext_query::ordering::{compare_scores, sort_neighbors};
use fasttext_query::{ErrorKind, Neighbor};
use proptest::prelude::*;

fn coords(len: usize) -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-100.0f32..100.0, len)
}

fn pair() -> impl Strategy<Value = (Vec<f32>, Vec<f32>)> {
    (0usize..64).prop_flat_map(|len| (coords(len), coords(len)))
}

proptest! {
    #[test]
    fn dot_product_commutes((a, b) in pair()) {
        prop_assert_eq!(dot_product(&a, &b).unwrap(), dot_product(&b, &a).unwrap());
    }

    #[test]
    fn dot_product_rejects_unequal_lengths(a in coords(5), b in prop::collection::vec(-1.0f32..1.0, 0..5)) {
        let err = dot_product(&a, &b).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
    }

    #[test]
    fn norm_is_non_negative(v in prop::collection::vec(-100.0f32..100.0, 0..64)) {
        let n = norm(&v);
        prop_assert!(n >= 0.0);
        prop_assert_eq!(n == 0.0, v.iter().all(|x| *x == 0.0));
    }

    #[test]
    fn self_similarity_is_one(v in prop::collection::vec(0.5f32..100.0, 1..64)) {
        let sim = cosine_similarity(&v, &v).unwrap();
        prop_assert!((sim - 1.0).abs() < 1e-5);
    }

    #[test]
    fn similarity_is_bounded((a, b) in pair()) {
        if let Ok(sim) = cosine_similarity(&a, &b) {
            prop_assert!((-1.0 - 1e-5..=1.0 + 1e-5).contains(&sim));
        }
    }

    #[test]
    fn sort_ranks_descending_nan_last(
        scores in prop::collection::vec(prop_oneof![3 => -1.0f32..1.0, 1 => Just(f32::NAN)], 0..32)
    ) {
        let mut neighbors: Vec<Neighbor> = scores
            .iter()
            .enumerate()
            .map(|(index, &probability)| Neighbor { index, name: format!("w{}", index), probability })
            .collect();
        sort_neighbors(&mut neighbors);

        for pair in neighbors.windows(2) {
            prop_assert_ne!(
                compare_scores(pair[0].probability, pair[1].probability),
                std::cmp::Ordering::Greater
            );
            // equal ranks keep their original relative order
            if compare_scores(pair[0].probability, pair[1].probability) == std::cmp::Ordering::Equal {
                prop_assert!(pair[0].index < pair[1].index);
            }
        }
        let first_nan = neighbors.iter().position(|n| n.probability.is_nan()).unwrap_or(neighbors.len());
        prop_assert!(neighbors[first_nan..].iter().all(|n| n.probability.is_nan()));
    }
}

#[test]
fn test_sort_mixed_nan_scores() {
    let mut neighbors: Vec<Neighbor> = [0.2, f32::NAN, 0.9, f32::NAN, 0.5]
        .iter()
        .enumerate()
        .map(|(index, &probability)| Neighbor {
            index,
            name: format!("w{}", index),
            probability,
        })
        .collect();
    sort_neighbors(&mut neighbors);

    let order: Vec<usize> = neighbors.iter().map(|n| n.index).collect();
    assert_eq!(order, vec![2, 4, 0, 1, 3]);
}
