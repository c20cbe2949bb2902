#![allow(dead_code)]

use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_polygon_mut};
use imageproc::point::Point;
use imageproc::rect::Rect;
use std::io::Cursor;

const WALL: Rgb<u8> = Rgb([200, 200, 190]);
const FLOOR: Rgb<u8> = Rgb([60, 45, 40]);

/// Light frame with a dark floor trapezoid whose sides run
/// `(50,400)-(200,300)` and `(450,300)-(600,400)`.
///
/// Both sides have slope magnitude 2/3; the top and bottom edges are
/// horizontal.
pub fn floor_frame(width: u32, height: u32) -> RgbImage {
    assert!(width >= 640 && height >= 480, "scene needs at least 640x480");
    let mut img = RgbImage::from_pixel(width, height, WALL);
    let floor = [
        Point::new(50, 400),
        Point::new(200, 300),
        Point::new(450, 300),
        Point::new(600, 400),
    ];
    draw_polygon_mut(&mut img, &floor, FLOOR);
    img
}

/// Light frame with dark vertical bars only.
pub fn bars_frame(width: u32, height: u32, bars: u32) -> RgbImage {
    assert!(bars > 0, "need at least one bar");
    let mut img = RgbImage::from_pixel(width, height, WALL);
    let pitch = width / (bars + 1);
    for i in 1..=bars {
        let x = (i * pitch) as i32;
        draw_filled_rect_mut(
            &mut img,
            Rect::at(x - 6, 0).of_size(12, height),
            FLOOR,
        );
    }
    img
}

pub fn encode_png(img: &RgbImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("png encoding");
    bytes
}
