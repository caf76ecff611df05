use std::io::Cursor;

use super::*;

fn encode_png(width: u32, height: u32, rgba: Vec<u8>) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(width, height, rgba).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_bitmap_png_dimensions_and_premul() {
    let buf = encode_png(1, 1, vec![100u8, 50u8, 200u8, 128u8]);

    let bitmap = decode_bitmap(&buf).unwrap();
    assert_eq!(bitmap.width, 1);
    assert_eq!(bitmap.height, 1);
    assert_eq!(
        bitmap.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_bitmap_zeroes_fully_transparent_pixels() {
    let buf = encode_png(1, 1, vec![90u8, 90u8, 90u8, 0u8]);

    let bitmap = decode_bitmap(&buf).unwrap();
    assert_eq!(bitmap.rgba8_premul.as_slice(), &[0, 0, 0, 0]);
}

#[test]
fn decode_bitmap_rejects_garbage() {
    assert!(decode_bitmap(b"not an image").is_err());
}
