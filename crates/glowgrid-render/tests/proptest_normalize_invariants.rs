//! Property-based invariant tests for the render → normalize pipeline.
//!
//! 1. Normalized channels never exceed 255 and brightness stays in [0, 1]
//! 2. Rasters already in range are only truncated
//! 3. Rendering is deterministic for both PSF modes
//! 4. Culled spots carry no visible weight

use glowgrid_core::{PsfMode, Raster, Rgb, Spot};
use glowgrid_render::{is_culled, normalize, render, weight};
use proptest::prelude::*;

fn arb_rgb() -> impl Strategy<Value = Rgb> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Rgb(r, g, b))
}

fn arb_spot() -> impl Strategy<Value = Spot> {
    (-12.0f64..20.0, -12.0f64..20.0, 0.05f64..6.0, arb_rgb())
        .prop_map(|(x, y, sigma, color)| Spot::new(x, y, sigma, color).unwrap())
}

fn arb_psf() -> impl Strategy<Value = PsfMode> {
    prop_oneof![Just(PsfMode::ExactGaussian), Just(PsfMode::PixelIntegral)]
}

proptest! {
    #![proptest_config(ProptestConfig {
        max_global_rejects: 65536,
        ..ProptestConfig::default()
    })]

    #[test]
    fn normalized_frames_stay_in_hardware_range(
        spots in prop::collection::vec(arb_spot(), 0..40),
        background in arb_rgb(),
        psf in arb_psf(),
        target in 0.0f64..1000.0,
    ) {
        let raster = render(&spots, 8, 8, background, psf).unwrap();
        let frame = normalize(&raster, target).unwrap();
        prop_assert!((0.0..=1.0).contains(&frame.brightness()));
        prop_assert_eq!(frame.pixels().len(), 64);
        if frame.max_channel_sum() == 0 {
            prop_assert_eq!(frame.brightness(), 0.0);
        }
    }

    #[test]
    fn in_range_rasters_are_only_truncated(
        values in prop::collection::vec((0.0f64..255.0, 0.0f64..255.0, 0.0f64..255.0), 16),
    ) {
        let mut raster = Raster::filled(4, 4, Rgb::BLACK);
        for (i, &(r, g, b)) in values.iter().enumerate() {
            raster.accumulate(i % 4, i / 4, r / 255.0, Rgb(255, 0, 0));
            raster.accumulate(i % 4, i / 4, g / 255.0, Rgb(0, 255, 0));
            raster.accumulate(i % 4, i / 4, b / 255.0, Rgb(0, 0, 255));
        }
        let frame = normalize(&raster, 80.0).unwrap();
        for (i, px) in raster.pixels().iter().enumerate() {
            let got = frame.pixels()[i].channels();
            for c in 0..3 {
                prop_assert_eq!(got[c], px[c].trunc() as u8);
            }
        }
    }

    #[test]
    fn rendering_is_deterministic(
        spots in prop::collection::vec(arb_spot(), 0..20),
        psf in arb_psf(),
    ) {
        let a = render(&spots, 8, 8, Rgb::BLACK, psf).unwrap();
        let b = render(&spots, 8, 8, Rgb::BLACK, psf).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn culled_spots_have_negligible_weight(spot in arb_spot(), psf in arb_psf()) {
        prop_assume!(is_culled(&spot, 8, 8));
        for py in 0..8 {
            for px in 0..8 {
                prop_assert!(weight(psf, px, py, &spot) < 1e-7);
            }
        }
    }
}
