use super::*;

fn backend(w: u32, h: u32) -> CpuBackend {
    CpuBackend::new(Canvas::new(w, h).unwrap(), RenderSettings::default())
}

fn render(b: &mut CpuBackend, list: &DrawList) -> FrameRGBA {
    b.begin_frame();
    b.draw_list(list).unwrap();
    b.finish_frame().unwrap()
}

#[test]
fn empty_frame_is_transparent() {
    let mut b = backend(4, 3);
    let f = render(&mut b, &DrawList::new());
    assert_eq!((f.width, f.height), (4, 3));
    assert_eq!(f.data.len(), 4 * 3 * 4);
    assert!(f.premultiplied);
    assert!(f.data.iter().all(|&v| v == 0));
}

#[test]
fn clear_color_fills_the_surface() {
    let mut b = CpuBackend::new(
        Canvas::new(4, 4).unwrap(),
        RenderSettings {
            clear_rgba: Some([0, 0, 255, 255]),
        },
    );
    let f = render(&mut b, &DrawList::new());
    assert_eq!(f.pixel(2, 2), Some([0, 0, 255, 255]));
}

#[test]
fn solid_rect_and_group_opacity() {
    let mut b = backend(8, 8);
    let mut list = DrawList::new();
    list.fill_rect(
        Rect::new(0.0, 0.0, 4.0, 8.0),
        Brush::Solid(Rgba8::new(255, 0, 0, 255)),
        1.0,
    );
    list.fill_rect(
        Rect::new(4.0, 0.0, 8.0, 8.0),
        Brush::Solid(Rgba8::new(255, 0, 0, 255)),
        0.5,
    );
    let f = render(&mut b, &list);
    assert_eq!(f.pixel(1, 4), Some([255, 0, 0, 255]));
    let half = f.pixel(6, 4).unwrap();
    assert!((120..=135).contains(&half[3]), "{half:?}");
    assert!(half[0].abs_diff(half[3]) <= 1, "{half:?}");
}

#[test]
fn zero_opacity_draws_nothing() {
    let mut b = backend(4, 4);
    let mut list = DrawList::new();
    list.fill_rect(
        Rect::new(0.0, 0.0, 4.0, 4.0),
        Brush::Solid(Rgba8::WHITE),
        0.0,
    );
    assert!(render(&mut b, &list).data.iter().all(|&v| v == 0));
}

#[test]
fn linear_gradient_runs_from_start_to_end() {
    let mut b = backend(32, 4);
    let mut list = DrawList::new();
    list.fill_rect(
        Rect::new(0.0, 0.0, 32.0, 4.0),
        Brush::Linear {
            start: Point::new(0.0, 0.0),
            end: Point::new(32.0, 0.0),
            stops: vec![
                GradientStop::new(0.0, Rgba8::BLACK),
                GradientStop::new(1.0, Rgba8::WHITE),
            ],
        },
        1.0,
    );
    let f = render(&mut b, &list);
    let left = f.pixel(1, 2).unwrap();
    let right = f.pixel(30, 2).unwrap();
    assert_eq!(left[3], 255);
    assert!(left[0] < 40 && right[0] > 215, "{left:?} {right:?}");
}

#[test]
fn radial_gradient_is_brightest_at_its_center() {
    let mut b = backend(32, 32);
    let mut list = DrawList::new();
    list.fill_rect(
        Rect::new(0.0, 0.0, 32.0, 32.0),
        Brush::Radial {
            center: Point::new(16.0, 16.0),
            radius: 16.0,
            stops: vec![
                GradientStop::new(0.0, Rgba8::WHITE),
                GradientStop::new(1.0, Rgba8::BLACK),
            ],
        },
        1.0,
    );
    let f = render(&mut b, &list);
    assert!(f.pixel(16, 16).unwrap()[0] > f.pixel(2, 16).unwrap()[0]);
}

#[test]
fn strokes_cover_their_line() {
    let mut b = backend(16, 16);
    let mut list = DrawList::new();
    list.stroke_line(
        Point::new(0.0, 8.0),
        Point::new(16.0, 8.0),
        Rgba8::new(0, 255, 0, 255),
        4.0,
        1.0,
    );
    let f = render(&mut b, &list);
    assert_eq!(f.pixel(8, 8), Some([0, 255, 0, 255]));
    assert_eq!(f.pixel(8, 1), Some([0, 0, 0, 0]));
}

#[test]
fn images_are_stretched_over_the_surface() {
    let mut b = backend(8, 6);
    let px = [10u8, 20, 30, 255, 10, 20, 30, 255, 10, 20, 30, 255, 10, 20, 30, 255];
    b.begin_frame();
    b.draw_image(ImageRef {
        key: 1,
        width: 2,
        height: 2,
        rgba8: &px,
    })
    .unwrap();
    let f = b.finish_frame().unwrap();
    for (x, y) in [(0, 0), (7, 5), (4, 3)] {
        let got = f.pixel(x, y).unwrap();
        let want = [10u8, 20, 30, 255];
        assert!(
            got.iter().zip(want).all(|(g, w)| g.abs_diff(w) <= 1),
            "({x}, {y}): {got:?}"
        );
    }
}

#[test]
fn image_size_mismatch_is_a_render_error() {
    let mut b = backend(4, 4);
    b.begin_frame();
    let err = b
        .draw_image(ImageRef {
            key: 2,
            width: 2,
            height: 2,
            rgba8: &[0; 4],
        })
        .unwrap_err();
    assert!(matches!(err, TryOnError::Render(_)));
}

#[test]
fn frames_do_not_leak_into_each_other() {
    let mut b = backend(4, 4);
    let mut list = DrawList::new();
    list.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Brush::Solid(Rgba8::WHITE), 1.0);
    assert_eq!(render(&mut b, &list).pixel(0, 0), Some([255; 4]));
    assert_eq!(render(&mut b, &DrawList::new()).pixel(0, 0), Some([0; 4]));
}

#[test]
fn solid_opacity_matches_color_alpha() {
    let mut b = backend(16, 8);
    let mut list = DrawList::new();
    list.fill_circle(Point::new(4.0, 4.0), 3.0, Rgba8::new(200, 40, 90, 255), 0.4);
    list.fill_circle(Point::new(12.0, 4.0), 3.0, Rgba8::new(200, 40, 90, 102), 1.0);
    list.stroke_line(
        Point::new(0.0, 7.0),
        Point::new(8.0, 7.0),
        Rgba8::new(0, 0, 255, 255),
        2.0,
        0.5,
    );
    let f = render(&mut b, &list);
    let faded = f.pixel(4, 4).unwrap();
    let direct = f.pixel(12, 4).unwrap();
    assert!(
        faded.iter().zip(direct).all(|(a, b)| a.abs_diff(b) <= 1),
        "{faded:?} vs {direct:?}"
    );
    let line = f.pixel(4, 7).unwrap();
    assert!((120..=135).contains(&line[3]), "{line:?}");
}

#[test]
fn gradient_fills_keep_layer_opacity() {
    let mut b = backend(8, 8);
    let mut list = DrawList::new();
    list.fill_rect(
        Rect::new(0.0, 0.0, 8.0, 8.0),
        Brush::Linear {
            start: Point::new(0.0, 0.0),
            end: Point::new(8.0, 0.0),
            stops: vec![
                GradientStop::new(0.0, Rgba8::WHITE),
                GradientStop::new(1.0, Rgba8::WHITE),
            ],
        },
        0.5,
    );
    let px = render(&mut b, &list).pixel(4, 4).unwrap();
    assert!((120..=135).contains(&px[3]), "{px:?}");
}
