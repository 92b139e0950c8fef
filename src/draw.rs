// Window + software drawing utilities.
// 1) A minifb window that shows the canvas raster inside a dark frame.
// 2) A pointer tracker that turns polled mouse state into stroke events.
// 3) A crosshair that follows the mouse and a tiny 5x7 bitmap font for the HUD.

use crate::error::{PadError, PadResult};
use crate::stroke::InputEvent;
use crate::types::{CanvasBounds, FrameBuffer, PointerSample};
use image::RgbImage;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

pub const BACKGROUND: u32 = 0x00_20_20_20;
pub const HUD_TEXT: u32 = 0x00_FF_FF_FF;
pub const CROSSHAIR: u32 = 0x00_FF_CC_33;

const MARGIN: usize = 16;
const HUD_LINE: usize = 12; // 7px glyph + shadow + spacing

/// Where things go inside the window: the canvas at a fixed margin, two HUD
/// lines underneath.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub width: usize,
    pub height: usize,
    pub canvas_x: usize,
    pub canvas_y: usize,
    pub canvas_side: usize,
}

impl Layout {
    pub fn new(canvas_side: usize) -> Self {
        Self {
            width: canvas_side + 2 * MARGIN,
            height: canvas_side + 2 * MARGIN + 2 * HUD_LINE,
            canvas_x: MARGIN,
            canvas_y: MARGIN,
            canvas_side,
        }
    }

    /// Canvas top-left in window coordinates, which is what minifb reports
    /// the mouse in.
    pub fn canvas_bounds(&self) -> CanvasBounds {
        CanvasBounds::new(self.canvas_x as f32, self.canvas_y as f32)
    }

    /// Paint the whole frame: background, canvas raster, HUD lines.
    pub fn compose(&self, screen: &mut FrameBuffer, raster: &RgbImage, hud: &[&str]) {
        screen.fill(BACKGROUND);
        screen.blit_rgb(raster, self.canvas_x, self.canvas_y);
        let mut y = self.canvas_y + self.canvas_side + MARGIN / 2;
        for line in hud {
            draw_text_5x7(screen, self.canvas_x as i32, y as i32, line, HUD_TEXT);
            y += HUD_LINE;
        }
    }
}

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a window of the given size.
    pub fn new(title: &str, width: usize, height: usize) -> PadResult<Self> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| PadError::window(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> PadResult<()> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| PadError::window(e.to_string()))
    }

    /// Pump window events without touching the displayed pixels.
    pub fn poll(&mut self) {
        self.window.update();
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (we'll exit when this is pressed).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Mouse position in window pixels, or None while the cursor is outside.
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Discard)
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    /// True on the frame a key goes down, no auto-repeat.
    pub fn pressed_once(&self, key: Key) -> bool {
        self.window.is_key_pressed(key, KeyRepeat::No)
    }

    /// First digit key pressed this frame, if any.
    pub fn digit_pressed_once(&self) -> Option<u8> {
        const DIGITS: [Key; 10] = [
            Key::Key0,
            Key::Key1,
            Key::Key2,
            Key::Key3,
            Key::Key4,
            Key::Key5,
            Key::Key6,
            Key::Key7,
            Key::Key8,
            Key::Key9,
        ];
        DIGITS.iter().position(|&k| self.pressed_once(k)).map(|d| d as u8)
    }
}

/* ---------- Polled mouse state -> stroke events ---------- */

/// minifb only reports "button is down" and "cursor is here" each frame, so
/// edges are found by diffing against the previous frame.
#[derive(Debug, Default)]
pub struct PointerTracker {
    was_down: bool,
    last: Option<(f32, f32)>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events for this frame, in the order a browser would deliver them.
    pub fn update(&mut self, down: bool, pos: Option<(f32, f32)>) -> Vec<InputEvent> {
        let mut events = Vec::new();
        match pos {
            None => {
                if self.last.is_some() {
                    events.push(InputEvent::PointerLeave);
                }
            }
            Some((x, y)) => {
                let sample = PointerSample::new(x, y);
                if down && !self.was_down {
                    events.push(InputEvent::PointerDown(sample));
                } else if self.last != pos {
                    events.push(InputEvent::PointerMove(sample));
                }
                if !down && self.was_down {
                    events.push(InputEvent::PointerUp);
                }
            }
        }
        self.was_down = down;
        self.last = pos;
        events
    }
}

/* ---------- Software drawing: pixels, crosshair, tiny bitmap font ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Draw a thin line between (x0,y0) and (x1,y1) using Bresenham.
fn draw_line(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let (mut x0, mut y0) = (x0, y0);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(fb, x0, y0, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Small "+" (with a gap at the center) at (cx,cy).
pub fn draw_crosshair(fb: &mut FrameBuffer, cx: i32, cy: i32, size: i32, color: u32) {
    draw_line(fb, cx - size, cy, cx - 2, cy, color);
    draw_line(fb, cx + 2, cy, cx + size, cy, color);
    draw_line(fb, cx, cy - size, cx, cy - 2, color);
    draw_line(fb, cx, cy + 2, cx, cy + size, color);
    put_pixel(fb, cx, cy, color);
}

/* ---------- 5x7 bitmap font (digits, A-Z, a little punctuation) ---------- */

/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
/// Lowercase letters share the uppercase glyphs.
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '/' => g!(0b00001,0b00010,0b00010,0b00100,0b01000,0b01000,0b10000),

        _ => None,
    }
}

/// One glyph at (x,y), with a 1-pixel black shadow for contrast.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        for (offset, shade) in [(1, 0x00000000), (0, color)] {
            for (ry, rowbits) in rows.iter().enumerate() {
                for rx in 0..5 {
                    if (rowbits & (1 << (4 - rx))) != 0 {
                        put_pixel(fb, x + rx + offset, y + ry as i32 + offset, shade);
                    }
                }
            }
        }
    }
}

/// Text in 5x7 glyphs, 6 pixels per character. Unknown characters leave a gap.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
}
