use nccmatch::{
    find_slider_offset, DecodedImage, MaskBuffer, NccMatchError, PixelBuffer,
    SliderTemplateStrategy,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn locates_the_slider_target_left_of_the_parked_piece() {
    let width = 64;
    let height = 20;
    let mut rng = StdRng::seed_from_u64(5);
    let mut gray: Vec<u8> = (0..width * height).map(|_| rng.random_range(0..=255)).collect();

    // The piece is parked inside the right-quarter band (columns 48..64)
    // at band-relative x 4..12, rows 4..12. The same pixels also appear at
    // the slider target, whose window position is x = 10.
    for y in 4..12 {
        for x in 0..8 {
            gray[y * width + 14 + x] = gray[y * width + 52 + x];
        }
    }
    let mut alpha = vec![0.0f32; width * height];
    for y in 4..12 {
        for x in 52..60 {
            alpha[y * width + x] = 1.0;
        }
    }

    let image = DecodedImage::new(
        PixelBuffer::new(gray, width, height).unwrap(),
        Some(MaskBuffer::new(alpha, width, height).unwrap()),
    )
    .unwrap();

    let offset = find_slider_offset(&image).unwrap();
    // The parked position itself also scores a perfect match, but the
    // target sits earlier in scan order and wins the tie.
    assert_eq!(offset.x, 10);
    assert!(offset.confident);
    assert!(offset.score > 0.99, "score {}", offset.score);
}

#[test]
fn featureless_background_reports_the_sentinel_offset() {
    let width = 40;
    let height = 12;
    let mut rng = StdRng::seed_from_u64(17);
    let gray: Vec<u8> = (0..width * height).map(|_| rng.random_range(0..=255)).collect();
    // Nothing opaque in the right quarter: the derived mask is empty and
    // every placement scores the neutral 0.0.
    let alpha = vec![0.0f32; width * height];

    let image = DecodedImage::new(
        PixelBuffer::new(gray, width, height).unwrap(),
        Some(MaskBuffer::new(alpha, width, height).unwrap()),
    )
    .unwrap();

    let offset = find_slider_offset(&image).unwrap();
    assert_eq!(offset.x, 0);
    assert!(!offset.confident);
    assert!(offset.score < 0.3, "score {}", offset.score);
}

#[test]
fn opaque_band_matches_its_own_source_position() {
    // Without transparency data the band mask is all-ones, so the band
    // matches itself at the right edge. Documented layout assumption of
    // the heuristic: callers feed images whose piece is parked there.
    let width = 32;
    let height = 8;
    let mut rng = StdRng::seed_from_u64(31);
    let gray: Vec<u8> = (0..width * height).map(|_| rng.random_range(0..=255)).collect();

    let image = DecodedImage::new(PixelBuffer::new(gray, width, height).unwrap(), None).unwrap();

    let offset = find_slider_offset(&image).unwrap();
    assert_eq!(offset.x, 24);
    assert!(offset.confident);
    assert!(offset.score > 0.999, "score {}", offset.score);
}

#[test]
fn narrow_image_cannot_derive_a_band() {
    let image = DecodedImage::new(PixelBuffer::new(vec![0u8; 9], 3, 3).unwrap(), None).unwrap();
    assert_eq!(
        find_slider_offset(&image).err(),
        Some(NccMatchError::EmptyTemplate)
    );
}

#[test]
fn strategy_seam_accepts_custom_layouts() {
    // A strategy that takes the leftmost column pair, to show the engine
    // is independent of the right-edge assumption.
    struct LeftBand;
    impl SliderTemplateStrategy for LeftBand {
        fn derive(
            &self,
            image: &DecodedImage,
        ) -> nccmatch::NccMatchResult<nccmatch::Template> {
            let width = image.width();
            let height = image.height();
            let gray = image.gray().data();
            let mut pixels = Vec::with_capacity(2 * height);
            for y in 0..height {
                pixels.extend_from_slice(&gray[y * width..y * width + 2]);
            }
            nccmatch::Template::new(
                PixelBuffer::new(pixels, 2, height).unwrap(),
                MaskBuffer::ones(2, height).unwrap(),
                0,
            )
        }
    }

    let mut rng = StdRng::seed_from_u64(8);
    let width = 16;
    let height = 6;
    let gray: Vec<u8> = (0..width * height).map(|_| rng.random_range(0..=255)).collect();
    let image = DecodedImage::new(PixelBuffer::new(gray, width, height).unwrap(), None).unwrap();

    let offset = nccmatch::find_slider_offset_with(&image, &LeftBand).unwrap();
    assert_eq!(offset.x, 0);
    assert!(offset.confident);
}
