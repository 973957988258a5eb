use nccmatch::{DecodedImage, MaskBuffer, NccMatchError, PixelBuffer, Template};

fn image_with_alpha(
    width: usize,
    height: usize,
    gray: Vec<u8>,
    alpha: Vec<f32>,
) -> DecodedImage {
    let gray = PixelBuffer::new(gray, width, height).unwrap();
    let alpha = MaskBuffer::new(alpha, width, height).unwrap();
    DecodedImage::new(gray, Some(alpha)).unwrap()
}

#[test]
fn extracts_tight_bounding_box_of_opaque_region() {
    let width = 7;
    let height = 6;
    let gray: Vec<u8> = (0..width * height).map(|i| i as u8).collect();
    let mut alpha = vec![0.0f32; width * height];
    // Opaque rectangle spanning x in [2, 4], y in [1, 3].
    for y in 1..=3 {
        for x in 2..=4 {
            alpha[y * width + x] = 1.0;
        }
    }
    let image = image_with_alpha(width, height, gray, alpha);

    let template = Template::extract(&image).unwrap();
    assert_eq!(template.width(), 3);
    assert_eq!(template.height(), 3);
    assert_eq!(template.origin_y(), 1);
    assert_eq!(
        template.pixels().data(),
        &[9, 10, 11, 16, 17, 18, 23, 24, 25]
    );
    assert_eq!(template.mask().weights(), &[1.0; 9]);
}

#[test]
fn partially_transparent_pixels_stretch_the_box() {
    let width = 5;
    let height = 5;
    let gray = vec![100u8; width * height];
    let mut alpha = vec![0.0f32; width * height];
    alpha[2 * width + 2] = 1.0;
    // A faint pixel still counts as non-transparent.
    alpha[4 * width] = 0.2;
    let image = image_with_alpha(width, height, gray, alpha);

    let template = Template::extract(&image).unwrap();
    assert_eq!(template.origin_y(), 2);
    assert_eq!(template.width(), 3);
    assert_eq!(template.height(), 3);
    // Alpha weights survive the crop unbinned.
    assert_eq!(template.mask().get(2, 0), Some(1.0));
    assert_eq!(template.mask().get(0, 2), Some(0.2));
    assert_eq!(template.mask().get(1, 1), Some(0.0));
}

#[test]
fn single_opaque_pixel_yields_one_by_one_template() {
    let width = 4;
    let height = 3;
    let mut gray = vec![0u8; width * height];
    gray[width + 2] = 77;
    let mut alpha = vec![0.0f32; width * height];
    alpha[width + 2] = 1.0;
    let image = image_with_alpha(width, height, gray, alpha);

    let template = Template::extract(&image).unwrap();
    assert_eq!(template.width(), 1);
    assert_eq!(template.height(), 1);
    assert_eq!(template.origin_y(), 1);
    assert_eq!(template.pixels().data(), &[77]);
}

#[test]
fn missing_alpha_channel_is_reported() {
    let gray = PixelBuffer::new(vec![0u8; 12], 4, 3).unwrap();
    let image = DecodedImage::new(gray, None).unwrap();

    assert_eq!(
        Template::extract(&image).err(),
        Some(NccMatchError::MissingAlphaChannel)
    );
}

#[test]
fn fully_transparent_image_is_reported_empty() {
    let image = image_with_alpha(4, 3, vec![9u8; 12], vec![0.0; 12]);

    assert_eq!(
        Template::extract(&image).err(),
        Some(NccMatchError::EmptyTemplate)
    );
}
