//! Property-based tests for effect sizes and their interpretation bands

use proptest::prelude::*;
use survey_effect::*;

proptest! {
    // Cramér's V stays within [0, 1] for any table shape and statistic
    #[test]
    fn prop_cramers_v_in_unit_interval(
        chi2 in 0.0..1.0e6,
        n in 1.0..1.0e5,
        rows in 1usize..10,
        cols in 1usize..10,
    ) {
        let v = cramers_v(chi2, n, rows, cols);
        prop_assert!((0.0..=1.0).contains(&v));
    }

    // Eta-squared is a proportion
    #[test]
    fn prop_eta_squared_in_unit_interval(
        a in prop::collection::vec(-100.0..100.0, 1..20),
        b in prop::collection::vec(-100.0..100.0, 1..20),
        c in prop::collection::vec(-100.0..100.0, 0..20),
    ) {
        let effect = EtaSquared::new()
            .compute_groups(&[a.as_slice(), b.as_slice(), c.as_slice()])
            .unwrap();
        prop_assert!(effect.magnitude >= 0.0);
        prop_assert!(effect.magnitude <= 1.0 + 1e-12);
    }

    // Swapping the groups flips the sign of Cohen's d
    #[test]
    fn prop_cohens_d_antisymmetric(
        a in prop::collection::vec(-50.0..50.0, 2..30),
        b in prop::collection::vec(-50.0..50.0, 2..30),
    ) {
        let ab = CohenD::new().compute(&a, &b).unwrap().magnitude;
        let ba = CohenD::new().compute(&b, &a).unwrap().magnitude;
        prop_assert!((ab + ba).abs() < 1e-9);
    }

    // Bands only look at the absolute value and never move down as it grows
    #[test]
    fn prop_bands_monotone_and_symmetric(x in 0.0..2.0f64, dx in 0.0..1.0f64) {
        for kind in [
            EffectSizeType::CramersV,
            EffectSizeType::CohensD,
            EffectSizeType::EtaSquared,
            EffectSizeType::Correlation,
        ] {
            let low = EffectSizeInterpretation::from_magnitude(x, kind);
            let high = EffectSizeInterpretation::from_magnitude(x + dx, kind);
            prop_assert!(low <= high);
            prop_assert_eq!(low, EffectSizeInterpretation::from_magnitude(-x, kind));
        }
    }
}
