//! Property-based tests for the SINAD pipeline.
//!
//! Tests amplitude invariance, result finiteness, and band aggregation
//! bounds using proptest for randomized input generation.

use proptest::prelude::*;
use sinad_analysis::{
    Signal, SinadAnalyzer, SpectrumBuilder, TestTone, band_power, compute_sinad,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Multiplying every sample by a nonzero constant leaves SINAD unchanged.
    #[test]
    fn sinad_is_scale_invariant(
        scale in prop_oneof![-1000.0f64..-1e-3, 1e-3f64..1000.0],
        target in 0.0f64..40.0,
        seed in any::<u64>(),
    ) {
        let samples = TestTone::new(8000, 500.0, 0.5)
            .with_target_sinad(target)
            .render_seeded(seed);
        let scaled: Vec<f64> = samples.iter().map(|s| s * scale).collect();

        let a = compute_sinad(&samples, 8000, 5, 3).unwrap().sinad_db;
        let b = compute_sinad(&scaled, 8000, 5, 3).unwrap().sinad_db;
        prop_assert!((a - b).abs() < 1e-6, "{} vs {} at scale {}", a, b, scale);
    }

    /// Any non-silent finite buffer yields a finite SINAD and positive powers.
    #[test]
    fn result_is_always_finite(
        input in prop::collection::vec(-1.0f64..=1.0, 2..512),
        harmonics in 1usize..10,
        half_width in 0usize..8,
    ) {
        prop_assume!(input.iter().any(|&s| s != 0.0));

        let result = SinadAnalyzer::new()
            .with_harmonics(harmonics)
            .with_bin_half_width(half_width)
            .analyze(&input, 48000)
            .unwrap();

        prop_assert!(result.sinad_db.is_finite());
        prop_assert!(result.signal_power > 0.0);
        prop_assert!(result.noise_power > 0.0);
        prop_assert!(result.harmonic_power >= 0.0);
        prop_assert!(result.fundamental.bin_index < input.len() / 2);
        prop_assert!(result.harmonics.len() < harmonics.max(1));
    }

    /// Band power never decreases as the band widens and never exceeds the total.
    #[test]
    fn band_power_grows_with_half_width(
        input in prop::collection::vec(-1.0f64..=1.0, 16..256),
        center in 0usize..200,
        half_width in 0usize..16,
    ) {
        prop_assume!(input.iter().any(|&s| s != 0.0));

        let signal = Signal::new(&input, 48000).unwrap();
        let spectrum = SpectrumBuilder::new().build(&signal).unwrap();

        let narrow = band_power(&spectrum, center, half_width);
        let wide = band_power(&spectrum, center, half_width + 1);
        prop_assert!(narrow >= 0.0);
        prop_assert!(wide >= narrow);
        prop_assert!(wide <= spectrum.total_power() * (1.0 + 1e-12));
    }
}
