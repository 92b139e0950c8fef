use digit_pad::client::{GenerationParams, PlaceholderGenerator};
use digit_pad::render::GRIDLINE;
use digit_pad::{
    CanvasBounds, DeviceBrushes, GenerationOutcome, Grid, InputEvent, PointerSample, Renderer,
    StrokeState, Surface,
};

const N: usize = 32;
const CELL: u32 = 12;

fn pad_at(left: f32, top: f32) -> Surface {
    let mut s = Surface::new(N, CELL, DeviceBrushes::standard().unwrap()).unwrap();
    s.set_bounds(CanvasBounds::new(left, top));
    s
}

fn inked(grid: &Grid) -> Vec<(usize, usize)> {
    (0..grid.size())
        .flat_map(|r| (0..grid.size()).map(move |c| (r, c)))
        .filter(|&(r, c)| grid.get(r, c) == 1.0)
        .collect()
}

#[test]
fn offset_canvas_down_then_clear() {
    let mut pad = pad_at(50.0, 50.0);
    assert!(pad.handle(&InputEvent::PointerDown(PointerSample::new(100.0, 100.0))));

    let mut expected = Vec::new();
    for r in 3..=5 {
        for c in 3..=5 {
            expected.push((r, c));
        }
    }
    assert_eq!(inked(pad.grid()), expected);

    pad.clear();
    assert!(pad.grid().is_blank());
    for (r, c) in expected {
        assert_eq!(pad.grid().get(r, c), 0.0);
    }
}

#[test]
fn touch_at_the_corner_is_clipped() {
    let mut pad = pad_at(0.0, 0.0);
    pad.handle(&InputEvent::TouchStart(vec![PointerSample::new(0.0, 0.0)]));
    assert_eq!(inked(pad.grid()), vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
}

#[test]
fn samples_off_the_canvas_are_clipped_not_errors() {
    let mut pad = pad_at(50.0, 50.0);
    // just above-left of the canvas: cell (-1, -1), so only (0, 0) is in reach
    assert!(pad.handle(&InputEvent::PointerDown(PointerSample::new(45.0, 45.0))));
    assert_eq!(inked(pad.grid()), vec![(0, 0)]);

    // far away: nothing to paint, nothing to redraw
    let redraws = pad.redraws();
    assert!(!pad.handle(&InputEvent::PointerMove(PointerSample::new(-900.0, 4000.0))));
    assert_eq!(pad.redraws(), redraws);
    assert_eq!(pad.session().state(), StrokeState::Active);
}

#[test]
fn stray_events_after_release_do_nothing() {
    let mut pad = pad_at(0.0, 0.0);
    pad.handle(&InputEvent::PointerDown(PointerSample::new(30.0, 30.0)));
    pad.handle(&InputEvent::PointerUp);
    let before = pad.grid().clone();
    let redraws = pad.redraws();

    for x in [60.0, 120.0, 240.0] {
        pad.handle(&InputEvent::PointerMove(PointerSample::new(x, x)));
        pad.handle(&InputEvent::TouchMove(vec![PointerSample::new(x, 10.0)]));
    }
    pad.handle(&InputEvent::PointerUp);
    pad.handle(&InputEvent::TouchEnd);

    assert_eq!(pad.grid(), &before);
    assert_eq!(pad.redraws(), redraws);
}

#[test]
fn fast_strokes_leave_gaps() {
    let mut pad = pad_at(0.0, 0.0);
    pad.handle(&InputEvent::PointerDown(PointerSample::new(6.0, 6.0)));
    pad.handle(&InputEvent::PointerMove(PointerSample::new(150.0, 6.0)));
    // cells (0, 0..=1) and (0, 11..=13) are inked; nothing is interpolated between
    assert_eq!(pad.grid().get(0, 6), 0.0);
    assert_eq!(pad.grid().get(0, 12), 1.0);
}

#[test]
fn surface_raster_matches_a_fresh_render() {
    let mut pad = pad_at(0.0, 0.0);
    pad.handle(&InputEvent::PointerDown(PointerSample::new(200.0, 200.0)));
    pad.handle(&InputEvent::PointerMove(PointerSample::new(210.0, 260.0)));

    let fresh = Renderer::new(CELL).render(pad.grid());
    assert_eq!(pad.raster().as_raw(), fresh.as_raw());

    // the painted cell under (200, 200) is black, its top-left pixel is a gridline
    assert_eq!(pad.raster().get_pixel(16 * CELL + 3, 16 * CELL + 3).0, [0, 0, 0]);
    assert_eq!(*pad.raster().get_pixel(16 * CELL, 16 * CELL + 3), GRIDLINE);
}

#[test]
fn generated_grid_is_rendered_once_and_stays_in_range() {
    let mut pad = pad_at(0.0, 0.0);
    let redraws = pad.redraws();
    let params = GenerationParams { digit: Some(8), ..Default::default() };
    let outcome = pad.generate(&mut PlaceholderGenerator::new(N, 99), &params).unwrap();

    assert_eq!(outcome, GenerationOutcome::Generated);
    assert_eq!(pad.redraws(), redraws + 1);
    assert!(pad.grid().cells().iter().all(|v| (0.0..=1.0).contains(v)));
    assert_eq!(pad.raster().as_raw(), Renderer::new(CELL).render(pad.grid()).as_raw());
}
