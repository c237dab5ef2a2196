//! Integration tests for SSIZ
//!
//! These tests verify the end-to-end behavior of the sample-size analysis.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ssiz::{
    CancellationToken, FireHistoryReader, InMemoryReader, ResamplingMode, Segment, SsizConfig,
    SsizError, SsizRunner, ThresholdFilter, Weibull, fires_by_year, resample,
};

/// Ten-year pool from the worked example: series A scars at index 5,
/// series B at 5 and 7, series C never.
fn example_reader() -> InMemoryReader {
    InMemoryReader::from_codes(
        1991,
        &[
            vec![0, 0, 0, 0, 0, 1, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0, 1, 0, 1, 0, 0],
            vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        ],
    )
    .unwrap()
}

#[test]
fn test_fires_by_year_worked_example() {
    let reader = example_reader();
    let counts = fires_by_year(
        &reader.event_data(Default::default()),
        ThresholdFilter::None,
        &reader.filter_arrays(Default::default()),
        &reader.year_array(),
        Segment::new(1991, 2000).unwrap(),
    )
    .unwrap();

    assert_eq!(counts.fires.len(), 10);
    for (index, &count) in counts.fires.iter().enumerate() {
        let expected = match index {
            5 => 2,
            7 => 1,
            _ => 0,
        };
        assert_eq!(count, expected, "index {index}");
    }
}

#[test]
fn test_full_run_shape_and_rates() {
    let config = SsizConfig {
        simulations: 100,
        seed: 1000,
        ..SsizConfig::default()
    };
    let run = SsizRunner::new(config)
        .run(&example_reader(), &[], &CancellationToken::new())
        .unwrap();

    // Pool of three, one auto segment: records for n = 1, 2, 3.
    assert_eq!(run.results.len(), 3);

    // The segment spans ten years, so each simulation's rate is a
    // multiple of 10 fires/century; two fire years at most.
    for record in &run.results {
        assert!(record.mean >= 0.0 && record.mean <= 20.0);
        assert!(record.ci95_upper <= 20.0);
        assert!(record.std_dev >= 0.0);
    }

    // More samples can only discover more fire years on average.
    assert!(run.results[0].mean <= run.results[2].mean + 1e-9);
}

#[test]
fn test_determinism_is_bit_for_bit() {
    let config = SsizConfig {
        simulations: 60,
        seed: 42,
        ..SsizConfig::default()
    };
    let segments = vec![
        Segment::new(1991, 1996).unwrap(),
        Segment::new(1995, 2000).unwrap(),
    ];

    let first = SsizRunner::new(config.clone())
        .run(&example_reader(), &segments, &CancellationToken::new())
        .unwrap();
    let second = SsizRunner::new(config)
        .run(&example_reader(), &segments, &CancellationToken::new())
        .unwrap();

    assert_eq!(first.results, second.results);

    // And the records survive a serialization round trip unchanged.
    let json = serde_json::to_string(&first.results).unwrap();
    let back: Vec<ssiz::AnalysisResults> = serde_json::from_str(&json).unwrap();
    assert_eq!(first.results, back);
}

#[test]
fn test_different_seeds_diverge() {
    let base = SsizConfig {
        simulations: 60,
        seed: 1,
        ..SsizConfig::default()
    };
    let other = SsizConfig {
        seed: 2,
        ..base.clone()
    };

    let first = SsizRunner::new(base)
        .run(&example_reader(), &[], &CancellationToken::new())
        .unwrap();
    let second = SsizRunner::new(other)
        .run(&example_reader(), &[], &CancellationToken::new())
        .unwrap();

    assert_ne!(first.results, second.results);
}

#[test]
fn test_resampling_contracts() {
    let pool = example_reader().event_data(Default::default());
    let mut rng = StdRng::seed_from_u64(5);

    // With replacement: any count, even past the pool size.
    let oversized = resample(&pool, 10, ResamplingMode::WithReplacement, &mut rng).unwrap();
    assert_eq!(oversized.len(), 10);

    // Without replacement: a count past the pool size fails.
    let err = resample(&pool, 4, ResamplingMode::WithoutReplacement, &mut rng).unwrap_err();
    assert!(matches!(err, SsizError::SampleSizeExceedsPool { .. }));
}

#[test]
fn test_weibull_round_trip_on_synthetic_data() {
    // Draw from Weibull(shape = 2, scale = 5) by inverse CDF.
    let mut rng = StdRng::seed_from_u64(2025);
    let sample: Vec<f64> = (0..5000)
        .map(|_| {
            let u: f64 = rng.gen();
            5.0 * (-(1.0 - u).ln()).powf(0.5)
        })
        .collect();

    let w = Weibull::fit(&sample).unwrap();
    assert!((w.shape() - 2.0).abs() / 2.0 < 0.1, "shape = {}", w.shape());
    assert!((w.scale() - 5.0).abs() / 5.0 < 0.1, "scale = {}", w.scale());

    // Derived moments stay close to the true values too: the mean of
    // Weibull(2, 5) is 5·Γ(1.5) ≈ 4.431.
    assert!((w.mean() - 4.431).abs() / 4.431 < 0.1);
}

#[test]
fn test_century_multiplier_scaling_between_segments() {
    // The same pool analyzed over a half-length segment doubles the rate
    // scale: a century segment rates one fire year as 1, a 50-year segment
    // as 2.
    let full = Segment::new(1901, 2000).unwrap();
    let half = Segment::new(1901, 1950).unwrap();
    assert!((full.century_multiplier() - 1.0).abs() < f64::EPSILON);
    assert!((half.century_multiplier() - 2.0).abs() < f64::EPSILON);
}

#[test]
fn test_common_years_restriction_through_the_runner() {
    // Series ranges [1900, 1950] and [1920, 1990]; restricting to common
    // years leaves [1920, 1950], which the auto segment then covers.
    let width = 91;
    let mut a = vec![-1; width];
    let mut b = vec![-1; width];
    for cell in a.iter_mut().take(51) {
        *cell = 0;
    }
    a[25] = 1;
    for cell in b.iter_mut().skip(20) {
        *cell = 0;
    }
    b[45] = 1;
    let reader = InMemoryReader::from_codes(1900, &[a, b]).unwrap();

    let config = SsizConfig {
        simulations: 20,
        common_years_only: true,
        ..SsizConfig::default()
    };
    let run = SsizRunner::new(config)
        .run(&reader, &[], &CancellationToken::new())
        .unwrap();

    assert_eq!(run.meta.segments.len(), 1);
    assert_eq!(run.meta.segments[0].first_year, 1920);
    assert_eq!(run.meta.segments[0].last_year, 1950);
}

#[test]
fn test_events_only_restriction_shrinks_the_sweep() {
    let config = SsizConfig {
        simulations: 20,
        events_only: true,
        ..SsizConfig::default()
    };
    let run = SsizRunner::new(config)
        .run(&example_reader(), &[], &CancellationToken::new())
        .unwrap();

    // Series C never records an event, so the sweep covers n = 1 and 2.
    assert_eq!(run.results.len(), 2);
}

#[test]
fn test_threshold_filtering_lowers_rates() {
    let unfiltered = SsizConfig {
        simulations: 80,
        seed: 7,
        ..SsizConfig::default()
    };
    let filtered = SsizConfig {
        threshold: ThresholdFilter::NumberOfEvents(2.0),
        ..unfiltered.clone()
    };

    let base = SsizRunner::new(unfiltered)
        .run(&example_reader(), &[], &CancellationToken::new())
        .unwrap();
    let thresholded = SsizRunner::new(filtered)
        .run(&example_reader(), &[], &CancellationToken::new())
        .unwrap();

    // The single-fire year at index 7 is filtered out, so no record's mean
    // may exceed its unfiltered counterpart.
    for (a, b) in thresholded.results.iter().zip(&base.results) {
        assert!(a.mean <= b.mean + 1e-9);
    }
}
