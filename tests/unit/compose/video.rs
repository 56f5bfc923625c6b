use std::io::Cursor;

use super::*;

#[test]
fn solid_frames_repeat_their_color() {
    let f = VideoFrame::solid(3, 2, Rgba8::new(1, 2, 3, 4)).unwrap();
    assert_eq!(f.data().len(), 3 * 2 * 4);
    assert!(f.data().chunks_exact(4).all(|px| px == [1, 2, 3, 4]));
    assert_eq!(f.canvas().unwrap(), Canvas::new(3, 2).unwrap());
}

#[test]
fn buffer_length_is_validated() {
    let err = VideoFrame::from_rgba(2, 2, vec![0; 15]).unwrap_err();
    assert!(matches!(err, TryOnError::Validation(_)));
    assert!(VideoFrame::from_rgba(0, 2, Vec::new()).is_err());
}

#[test]
fn key_tracks_content() {
    let a = VideoFrame::solid(2, 2, Rgba8::BLACK).unwrap();
    let b = VideoFrame::solid(2, 2, Rgba8::BLACK).unwrap();
    let c = VideoFrame::solid(2, 2, Rgba8::WHITE).unwrap();
    let d = VideoFrame::solid(4, 1, Rgba8::BLACK).unwrap();
    assert_eq!(a.key(), b.key());
    assert_ne!(a.key(), c.key());
    assert_ne!(a.key(), d.key());
    assert_eq!(a.as_image().key, a.key());
}

#[test]
fn decodes_png_bytes() {
    let img = image::RgbaImage::from_raw(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 255]).unwrap();
    let mut buf = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut buf, image::ImageFormat::Png)
        .unwrap();
    let f = VideoFrame::from_encoded(buf.get_ref()).unwrap();
    assert_eq!((f.width(), f.height()), (2, 1));
    assert_eq!(&f.data()[4..8], &[0, 0, 255, 255]);
}

#[test]
fn garbage_bytes_are_an_error() {
    assert!(matches!(
        VideoFrame::from_encoded(b"not an image"),
        Err(TryOnError::Other(_))
    ));
}
