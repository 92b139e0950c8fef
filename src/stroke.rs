// Stroke state machine: Idle --down--> Active --move*--> Active --up/leave--> Idle.
// Down paints once at the press location, every move while Active paints once
// at its sample, and up/leave only resets. Samples are independent: there is
// no interpolation between them, so very fast motion may leave gaps.

use crate::brush;
use crate::error::PadResult;
use crate::grid::Grid;
use crate::mapper;
use crate::types::{BrushSpec, CanvasBounds, PointerSample};

/// Host input, already translated from the windowing layer.
/// Touch events carry every contact; only the first one is used.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown(PointerSample),
    PointerMove(PointerSample),
    PointerUp,
    PointerLeave,
    TouchStart(Vec<PointerSample>),
    TouchMove(Vec<PointerSample>),
    TouchEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeState {
    #[default]
    Idle,
    Active,
}

/// Brushes per device and phase. Touch gets a bigger brush to make up for
/// imprecise contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceBrushes {
    pub pointer_down: BrushSpec,
    pub pointer_move: BrushSpec,
    pub touch_down: BrushSpec,
    pub touch_move: BrushSpec,
}

impl DeviceBrushes {
    pub fn standard() -> PadResult<Self> {
        let pointer = BrushSpec::ink(2)?;
        let touch = BrushSpec::ink(3)?;
        Ok(Self {
            pointer_down: pointer,
            pointer_move: pointer,
            touch_down: touch,
            touch_move: touch,
        })
    }
}

#[derive(Debug, Clone)]
pub struct StrokeSession {
    state: StrokeState,
    brushes: DeviceBrushes,
}

impl StrokeSession {
    pub fn new(brushes: DeviceBrushes) -> Self {
        Self { state: StrokeState::Idle, brushes }
    }

    pub fn state(&self) -> StrokeState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == StrokeState::Active
    }

    /// Feed one event. Returns true when the grid changed and needs a redraw.
    pub fn handle(
        &mut self,
        event: &InputEvent,
        grid: &mut Grid,
        bounds: CanvasBounds,
        cell_px: u32,
    ) -> bool {
        match event {
            InputEvent::PointerDown(sample) => {
                self.begin();
                dab(grid, *sample, bounds, cell_px, self.brushes.pointer_down)
            }
            InputEvent::TouchStart(contacts) => {
                self.begin();
                contacts
                    .first()
                    .is_some_and(|&s| dab(grid, s, bounds, cell_px, self.brushes.touch_down))
            }
            InputEvent::PointerMove(sample) if self.is_active() => {
                dab(grid, *sample, bounds, cell_px, self.brushes.pointer_move)
            }
            InputEvent::TouchMove(contacts) if self.is_active() => contacts
                .first()
                .is_some_and(|&s| dab(grid, s, bounds, cell_px, self.brushes.touch_move)),
            InputEvent::PointerMove(_) | InputEvent::TouchMove(_) => false, // stray, no stroke
            InputEvent::PointerUp | InputEvent::PointerLeave | InputEvent::TouchEnd => {
                if self.is_active() {
                    tracing::debug!("stroke ended");
                }
                self.state = StrokeState::Idle;
                false
            }
        }
    }

    fn begin(&mut self) {
        if !self.is_active() {
            tracing::debug!("stroke started");
        }
        self.state = StrokeState::Active;
    }
}

fn dab(
    grid: &mut Grid,
    sample: PointerSample,
    bounds: CanvasBounds,
    cell_px: u32,
    spec: BrushSpec,
) -> bool {
    let center = mapper::map(sample, bounds, cell_px);
    brush::paint(grid, center, spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CELL: u32 = 12;

    fn session() -> StrokeSession {
        StrokeSession::new(DeviceBrushes::standard().unwrap())
    }

    fn at(x: f32, y: f32) -> PointerSample {
        PointerSample::new(x, y)
    }

    #[test]
    fn move_while_idle_is_ignored() {
        let mut s = session();
        let mut g = Grid::new(32);
        let b = CanvasBounds::default();
        assert!(!s.handle(&InputEvent::PointerMove(at(50.0, 50.0)), &mut g, b, CELL));
        assert!(!s.handle(&InputEvent::TouchMove(vec![at(50.0, 50.0)]), &mut g, b, CELL));
        assert!(g.is_blank());
        assert_eq!(s.state(), StrokeState::Idle);
    }

    #[test]
    fn down_move_up_cycle() {
        let mut s = session();
        let mut g = Grid::new(32);
        let b = CanvasBounds::default();

        assert!(s.handle(&InputEvent::PointerDown(at(50.0, 50.0)), &mut g, b, CELL));
        assert!(s.is_active());
        assert!(s.handle(&InputEvent::PointerMove(at(150.0, 50.0)), &mut g, b, CELL));
        assert_eq!(g.get(4, 12), 1.0);

        assert!(!s.handle(&InputEvent::PointerUp, &mut g, b, CELL));
        assert_eq!(s.state(), StrokeState::Idle);

        let before = g.clone();
        assert!(!s.handle(&InputEvent::PointerMove(at(300.0, 300.0)), &mut g, b, CELL));
        assert_eq!(g, before);
    }

    #[test]
    fn leave_ends_the_stroke() {
        let mut s = session();
        let mut g = Grid::new(32);
        let b = CanvasBounds::default();
        s.handle(&InputEvent::PointerDown(at(5.0, 5.0)), &mut g, b, CELL);
        s.handle(&InputEvent::PointerLeave, &mut g, b, CELL);
        assert!(!s.is_active());
    }

    #[test]
    fn touch_uses_first_contact_and_larger_brush() {
        let mut s = session();
        let mut g = Grid::new(32);
        let b = CanvasBounds::default();
        let contacts = vec![at(60.0, 60.0), at(300.0, 300.0)];
        assert!(s.handle(&InputEvent::TouchStart(contacts), &mut g, b, CELL));
        // radius 3 -> 3x3 around (5, 5); second contact ignored
        assert_eq!(g.cells().iter().filter(|&&v| v == 1.0).count(), 9);
        assert_eq!(g.get(25, 25), 0.0);

        assert!(!s.handle(&InputEvent::TouchEnd, &mut g, b, CELL));
        assert!(!s.is_active());
    }

    #[test]
    fn touch_without_contacts_paints_nothing_but_starts() {
        let mut s = session();
        let mut g = Grid::new(32);
        assert!(!s.handle(&InputEvent::TouchStart(vec![]), &mut g, CanvasBounds::default(), CELL));
        assert!(s.is_active());
        assert!(g.is_blank());
    }

    #[test]
    fn session_is_reusable_across_strokes() {
        let mut s = session();
        let mut g = Grid::new(32);
        let b = CanvasBounds::default();
        for i in 0..5 {
            let x = 30.0 + 60.0 * i as f32;
            assert!(s.handle(&InputEvent::PointerDown(at(x, 30.0)), &mut g, b, CELL));
            s.handle(&InputEvent::PointerUp, &mut g, b, CELL);
        }
        assert_eq!(g.cells().iter().filter(|&&v| v == 1.0).count(), 5 * 9);
    }

    #[test]
    fn repainting_the_same_spot_reports_no_change() {
        let mut s = session();
        let mut g = Grid::new(32);
        let b = CanvasBounds::default();
        assert!(s.handle(&InputEvent::PointerDown(at(40.0, 40.0)), &mut g, b, CELL));
        assert!(!s.handle(&InputEvent::PointerMove(at(41.0, 41.0)), &mut g, b, CELL));
    }
}
