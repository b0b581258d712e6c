//! Raw and integral layouts must answer every query identically.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use headpose_channels::{Channel, ChannelError, ChannelLayout, Point, Rect};

fn random_channel(width: usize, height: usize, seed: u64) -> Channel {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let pixels: Vec<u8> = (0..width * height).map(|_| rng.r#gen::<u8>()).collect();
    Channel::from_u8(width, height, &pixels).unwrap()
}

// ---------------------------------------------------------------------------
// a) every_rect_sums_equal
// ---------------------------------------------------------------------------

#[test]
fn every_rect_sums_equal() {
    let raw = random_channel(9, 7, 42);
    let integral = raw.to_integral();
    assert_eq!(integral.layout(), ChannelLayout::Integral);
    assert_eq!((integral.width(), integral.height()), (9, 7));

    for y in 0..7 {
        for x in 0..9 {
            for h in 1..=7 - y {
                for w in 1..=9 - x {
                    let rect = Rect::new(x, y, w, h);
                    assert_eq!(raw.rect_sum(rect), integral.rect_sum(rect), "{rect}");
                    assert_eq!(raw.rect_mean(rect), integral.rect_mean(rect), "{rect}");
                }
            }
            let p = Point::new(x, y);
            assert_eq!(raw.value(p), integral.value(p), "{p}");
        }
    }
}

// ---------------------------------------------------------------------------
// b) nested_views_match_direct_reads
// ---------------------------------------------------------------------------

#[test]
fn nested_views_match_direct_reads() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for layout in [ChannelLayout::Raw, ChannelLayout::Integral] {
        let channel = random_channel(40, 30, 3).into_layout(layout);
        for _ in 0..200 {
            let outer = Rect::new(rng.gen_range(0..20), rng.gen_range(0..15), 20, 15);
            let inner = Rect::new(rng.gen_range(0..10), rng.gen_range(0..8), 10, 7);
            let query = Rect::new(rng.gen_range(0..5), rng.gen_range(0..4), 5, 3);

            let view = channel.view(outer).unwrap().crop(inner).unwrap();
            assert_eq!(view.layout(), layout);
            let absolute = query
                .checked_offset_by(inner)
                .and_then(|r| r.checked_offset_by(outer))
                .unwrap();
            assert_eq!(view.rect_sum(query).unwrap(), channel.rect_sum(absolute).unwrap());
        }
    }
}

// ---------------------------------------------------------------------------
// c) out_of_window_reads_fail
// ---------------------------------------------------------------------------

#[test]
fn out_of_window_reads_fail() {
    for layout in [ChannelLayout::Raw, ChannelLayout::Integral] {
        let channel = random_channel(10, 10, 1).into_layout(layout);
        let view = channel.view(Rect::new(2, 2, 4, 4)).unwrap();

        // Inside the parent channel but outside the window.
        let err = view.rect_sum(Rect::new(2, 2, 3, 3)).unwrap_err();
        assert!(matches!(err, ChannelError::OutOfBounds { width: 4, height: 4, .. }));
        assert!(view.value(Point::new(4, 0)).is_err());
        assert!(matches!(
            channel.view(Rect::new(8, 8, 3, 3)),
            Err(ChannelError::OutOfBounds { .. })
        ));
        assert!(matches!(
            view.rect_mean(Rect::new(0, 0, 0, 2)),
            Err(ChannelError::DegenerateRect { .. })
        ));
    }
}

// ---------------------------------------------------------------------------
// d) fractional_channels_truncate_alike
// ---------------------------------------------------------------------------

/// Decimal-valued channels: truncated point reads and rectangle means match
/// between layouts even where prefix-sum differences land an ulp below an
/// integer.
#[test]
fn fractional_channels_truncate_alike() {
    for seed in 0..50 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let values: Vec<f64> = (0..16 * 16)
            .map(|_| f64::from(rng.gen_range(0u8..30)) * 0.1 + 0.3)
            .collect();
        let raw = Channel::new(16, 16, values).unwrap();
        let integral = raw.to_integral();

        for y in 0..16 {
            for x in 0..16 {
                let p = Point::new(x, y);
                assert_eq!(
                    raw.value(p).unwrap() as i64,
                    integral.value(p).unwrap() as i64,
                    "seed {seed} at {p}"
                );
                for h in 1..8usize.min(17 - y) {
                    for w in 1..8usize.min(17 - x) {
                        let rect = Rect::new(x, y, w, h);
                        assert_eq!(
                            raw.rect_mean(rect).unwrap() as i64,
                            integral.rect_mean(rect).unwrap() as i64,
                            "seed {seed} on {rect}"
                        );
                    }
                }
            }
        }
    }
}
