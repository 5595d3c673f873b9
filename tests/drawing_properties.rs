//! Behavioural properties of the drawing surface

use flagdraw::drawing::{DrawingSurface, PaletteColor, Point, Segment};
use flagdraw::page::Page;

fn drawing_page() -> Page {
    let mut page = Page::default();
    assert!(page.activate_selector());
    page
}

fn stroke(surface: &mut DrawingSurface, points: &[(f64, f64)]) -> Vec<Segment> {
    surface.pointer_down();
    let segs = points
        .iter()
        .filter_map(|&p| surface.pointer_move(p.into()))
        .collect();
    surface.pointer_up();
    segs
}

#[test]
fn next_segment_uses_last_activated_color() {
    let mut page = drawing_page();
    let s = page.surface_mut().unwrap();
    for picks in [
        vec![PaletteColor::Red],
        vec![PaletteColor::Blue, PaletteColor::White, PaletteColor::Orange],
        vec![PaletteColor::Green, PaletteColor::Green],
    ] {
        for c in &picks {
            s.select_color(*c);
        }
        let segs = stroke(s, &[(1.0, 1.0), (9.0, 9.0)]);
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].color, *picks.last().unwrap());
    }
}

#[test]
fn width_change_applies_only_to_later_segments() {
    let mut page = drawing_page();
    let s = page.surface_mut().unwrap();
    let before = stroke(s, &[(20.0, 20.0), (60.0, 20.0)]);
    for v in 1..=20u32 {
        s.set_brush_size(&v.to_string()).unwrap();
        let segs = stroke(s, &[(20.0, 100.0), (60.0, 100.0)]);
        assert_eq!(segs[0].width, v);
    }
    assert_eq!(before[0].width, 5);
    // the early thick line is still there: 2px above its centre is painted
    assert_eq!(s.raster().pixel(40, 18), Some(PaletteColor::Black.rgba()));
}

#[test]
fn clear_always_yields_blank_raster() {
    let mut page = drawing_page();
    let s = page.surface_mut().unwrap();
    for (i, color) in PaletteColor::ALL.iter().enumerate() {
        s.select_color(*color);
        s.set_brush_size(&(i * 3).to_string()).unwrap();
        let off = i as f64 * 30.0;
        stroke(s, &[(off, 0.0), (off + 40.0, 250.0), (480.0, off)]);
    }
    assert!(!s.raster().is_blank());
    s.clear();
    assert!(s.raster().is_blank());
    assert_eq!(s.raster().painted_pixels(), 0);
}

#[test]
fn strokes_are_connected() {
    let mut page = drawing_page();
    let s = page.surface_mut().unwrap();
    let path: Vec<(f64, f64)> = (0..50)
        .map(|i| {
            let t = i as f64;
            (10.0 + t * 8.0, 150.0 + (t / 3.0).sin() * 60.0)
        })
        .collect();
    let segs = stroke(s, &path);
    assert_eq!(segs.len(), path.len() - 1);
    for pair in segs.windows(2) {
        assert_eq!(pair[0].to, pair[1].from);
    }
    assert_eq!(segs[0].from, Point::from(path[0]));
}

#[test]
fn moving_after_release_draws_nothing() {
    let mut page = drawing_page();
    let s = page.surface_mut().unwrap();

    s.pointer_down();
    s.pointer_move(Point::new(10.0, 10.0));
    s.pointer_up();
    assert!(s.pointer_move(Point::new(200.0, 200.0)).is_none());

    s.pointer_down();
    s.pointer_move(Point::new(10.0, 10.0));
    s.pointer_leave();
    assert!(s.pointer_move(Point::new(200.0, 200.0)).is_none());

    assert!(s.raster().is_blank());
}

#[test]
fn new_stroke_does_not_connect_to_old_endpoint() {
    let mut page = drawing_page();
    let s = page.surface_mut().unwrap();
    stroke(s, &[(10.0, 10.0), (50.0, 10.0)]);
    let second = stroke(s, &[(10.0, 200.0), (50.0, 200.0)]);
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].from, Point::new(10.0, 200.0));
    // nothing was painted on the gap between the two strokes
    assert_eq!(s.raster().pixel(50, 100), Some([0, 0, 0, 0]));
}

#[test]
fn blue_twelve_diagonal_scenario() {
    let mut page = drawing_page();
    let s = page.surface_mut().unwrap();
    s.select_color_named("blue").unwrap();
    s.set_brush_size("12").unwrap();
    let segs = stroke(s, &[(10.0, 10.0), (50.0, 50.0)]);
    assert_eq!(segs.len(), 1);
    assert_eq!(segs[0].width, 12);

    let raster = s.raster();
    let blue = PaletteColor::Blue.rgba();
    // along the line
    for t in [10u32, 20, 30, 40, 49] {
        assert_eq!(raster.pixel(t, t), Some(blue), "({t},{t})");
    }
    // ~5px perpendicular offset is inside the 12-wide line, 9px is not
    assert_eq!(raster.pixel(33, 26), Some(blue));
    assert_eq!(raster.pixel(36, 23), Some([0, 0, 0, 0]));
    // everything painted is blue and stays near the segment
    for (x, y, p) in raster.as_image().enumerate_pixels() {
        if p.0 != [0, 0, 0, 0] {
            assert_eq!(p.0, blue);
            assert!(segs[0].distance_to(Point::new(x as f64 + 0.5, y as f64 + 0.5)) <= 6.0);
        }
    }
    assert_eq!(raster.pixel(200, 200), Some([0, 0, 0, 0]));
}

#[test]
fn off_surface_points_pass_through() {
    let mut page = drawing_page();
    let s = page.surface_mut().unwrap();
    let segs = stroke(s, &[(-30.0, 150.0), (30.0, 150.0)]);
    assert_eq!(segs[0].from, Point::new(-30.0, 150.0));
    assert_eq!(s.raster().pixel(0, 150), Some(PaletteColor::Black.rgba()));
}
