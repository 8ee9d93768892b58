//! Property tests for the seeded generator and the seeded placements built on it.

use proptest::prelude::*;
use verso::blocks::{BlockParams, GridParams};
use verso::model::CanvasSize;
use verso::random::{shuffle, Srg};
use verso::style::Theme;
use verso::texture::{LineTextureParams, LineTier};

// ===== Strategies =====

fn arb_float_bounds() -> impl Strategy<Value = (f64, f64)> {
    (-1000.0f64..1000.0, 0.001f64..500.0).prop_map(|(min, span)| (min, min + span))
}

fn arb_int_bounds() -> impl Strategy<Value = (i64, i64)> {
    (-500i64..500, 1i64..200).prop_map(|(min, span)| (min, min + span))
}

// ===== Generator ranges =====

proptest! {
    #[test]
    fn next_float_stays_in_range(seed in any::<i64>(), (min, max) in arb_float_bounds()) {
        let mut rng = Srg::new(seed);
        for _ in 0..1000 {
            let v = rng.next_float(min, max);
            prop_assert!(v >= min && v < max, "{} outside [{}, {})", v, min, max);
        }
    }

    #[test]
    fn next_int_stays_in_range(seed in any::<i64>(), (min, max) in arb_int_bounds()) {
        let mut rng = Srg::new(seed);
        for _ in 0..1000 {
            let v = rng.next_int(min, max);
            prop_assert!(v >= min && v < max, "{} outside [{}, {})", v, min, max);
        }
    }

    #[test]
    fn choice_returns_a_member(seed in any::<i64>(), set in prop::collection::vec(any::<u16>(), 1..20)) {
        let mut rng = Srg::new(seed);
        for _ in 0..1000 {
            let picked = rng.choice(&set);
            prop_assert!(picked.is_some_and(|p| set.contains(p)));
        }
    }

    #[test]
    fn chance_extremes_are_fixed(seed in any::<i64>()) {
        let mut rng = Srg::new(seed);
        for _ in 0..1000 {
            prop_assert!(!rng.chance(0.0));
            prop_assert!(rng.chance(1.0));
        }
    }

    #[test]
    fn every_operation_consumes_one_draw(seed in any::<i64>()) {
        let mut rng = Srg::new(seed);
        rng.next_float(0.0, 1.0);
        rng.next_int(3, 3);
        rng.chance(0.5);
        rng.choice(&[1, 2, 3]);
        prop_assert_eq!(rng.draws(), 4);
    }

    // ===== Shuffle =====

    #[test]
    fn shuffle_is_a_repeatable_permutation(seed in any::<i64>(), len in 0usize..60) {
        let original: Vec<usize> = (0..len).collect();

        let mut a = original.clone();
        shuffle(&mut a, &mut Srg::new(seed));
        let mut b = original.clone();
        shuffle(&mut b, &mut Srg::new(seed));
        prop_assert_eq!(&a, &b);

        let mut sorted = a;
        sorted.sort_unstable();
        prop_assert_eq!(sorted, original);
    }

    // ===== Seeded placements =====

    #[test]
    fn verse_styles_respect_theme_ranges(seed in any::<i64>()) {
        let params = Theme::blueprint().verse;
        let mut rng = Srg::new(seed);
        for _ in 0..200 {
            let style = params.generate(&mut rng);
            prop_assert!(params.letter_spacing.contains(style.letter_spacing));
            prop_assert!(params.rotation.contains(style.rotation_degrees));
            prop_assert!(style.color < params.palette.len());
        }
        prop_assert_eq!(rng.draws(), 1000);
    }

    #[test]
    fn block_placement_terminates_within_limits(
        seed in any::<i64>(),
        target in 0usize..40,
        attempts in 0usize..60,
    ) {
        let params = BlockParams {
            target_count: target,
            max_attempts: attempts,
            ..BlockParams::default()
        };
        let canvas = CanvasSize { width: 3200.0, height: 2400.0 };
        let blocks = params.place(canvas, &mut Srg::new(seed));

        prop_assert!(blocks.len() <= target.min(attempts));
        for block in &blocks {
            prop_assert!(params.width.contains(block.width));
            prop_assert!(params.height.contains(block.height));
            prop_assert!((block.y + block.height - (canvas.height - params.baseline_offset)).abs() < 1e-9);
            prop_assert!(block.texture.len() <= 6);
        }
    }
}

// ===== Texture ranges =====

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn grid_layers_respect_their_ranges(seed in any::<i64>()) {
        let params = GridParams::default();
        let mut rng = Srg::new(seed);
        let mut layers = 0;
        while layers < 1000 {
            let texture = params.synthesize(&mut rng);
            let sets = texture.len() as i64 / 2;
            prop_assert!(params.set_count.contains(sets), "{} grid sets", sets);
            for layer in &texture {
                prop_assert!(params.spacing.contains(layer.spacing));
                prop_assert!(params.opacity.contains(layer.opacity));
                prop_assert!(params.stroke_width.contains(layer.stroke_width));
                prop_assert!(params.palette.contains(&layer.color));
            }
            layers += texture.len();
        }
    }

    #[test]
    fn line_counts_respect_each_range(seed in any::<i64>()) {
        let params = LineTextureParams::default();
        let canvas = CanvasSize { width: 400.0, height: 300.0 };
        let mut rng = Srg::new(seed);
        for _ in 0..1000 {
            let lines = params.generate(canvas, &mut rng);
            let structural = lines.iter().filter(|l| l.tier == LineTier::Structural);
            let vertical = structural.clone().filter(|l| l.x1 == l.x2).count() as i64;
            let horizontal = structural.filter(|l| l.y1 == l.y2).count() as i64;
            let accents = lines.iter().filter(|l| l.tier == LineTier::Accent).count() as i64;
            prop_assert!(params.vertical_count.contains(vertical), "{} vertical", vertical);
            prop_assert!(params.horizontal_count.contains(horizontal), "{} horizontal", horizontal);
            prop_assert!(params.accent_count.contains(accents), "{} accents", accents);
        }
    }
}
