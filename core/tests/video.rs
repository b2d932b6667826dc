//! Pixel pipeline behaviour, observed through the framebuffer.

use dotmatrix_core::hw::ppu::SHADES;
use dotmatrix_core::{GameBoy, DOTS_PER_FRAME, LCD_HEIGHT, LCD_WIDTH};

mod common;

/// Runs the PPU for `dots` T-cycles.
fn run(emu: &mut GameBoy, dots: u32) {
    for _ in 0..dots / 4 {
        emu.bus.cycle();
    }
}

/// One tile of background renders through BGP on the first scanline.
#[test]
fn background_first_scanline() {
    let mut emu = GameBoy::new(&common::rom(&[])).unwrap();
    // Tile 1, row 0: low plane all ones, high plane zero -> color 1.
    emu.bus.write(0x8010, 0xff);
    emu.bus.write(0x8011, 0x00);
    // Map (0, 0) selects tile 1; the rest stays tile 0 (all zeros).
    emu.bus.write(0x9800, 0x01);
    // BGP = $E4: identity mapping of color indices to shades.
    emu.bus.write(0xff47, 0xe4);

    run(&mut emu, 456);

    let frame = emu.bus.ppu.screen();
    for px in 0..LCD_WIDTH {
        let expected = if px < 8 { SHADES[1] } else { SHADES[0] };
        assert_eq!(frame[px], expected, "wrong shade at x={px}");
    }
}

/// Every pixel of the visible frame is written each frame.
#[test]
fn full_frame_renders() {
    let mut emu = GameBoy::new(&common::rom(&[])).unwrap();
    // BGP mapping every color to the darkest shade distinguishes "drawn"
    // from the framebuffer's white power-on state.
    emu.bus.write(0xff47, 0xff);

    run(&mut emu, DOTS_PER_FRAME);

    let frame = emu.bus.ppu.screen();
    for (idx, &px) in frame.iter().enumerate() {
        assert_eq!(px, SHADES[3], "pixel not drawn at index {idx}");
    }
    assert_eq!(frame.len(), LCD_WIDTH * LCD_HEIGHT);
}

/// Fine scroll discards SCX % 8 pixels at the start of each scanline.
#[test]
fn fine_scroll_shifts_background() {
    let mut emu = GameBoy::new(&common::rom(&[])).unwrap();
    // Tile 1, row 0: only the leftmost pixel is color 1.
    emu.bus.write(0x8010, 0x80);
    emu.bus.write(0x8011, 0x00);
    emu.bus.write(0x9800, 0x01);
    emu.bus.write(0xff47, 0xe4);
    // Scroll three pixels left.
    emu.bus.write(0xff43, 0x03);

    run(&mut emu, 456);

    let frame = emu.bus.ppu.screen();
    // The colored pixel moved from x=0 off toward the left... but with
    // SCX=3 the visible line starts three pixels into the tile, so the
    // marker is discarded entirely and the row is blank from tile 0.
    assert!(frame[..LCD_WIDTH].iter().all(|&px| px == SHADES[0]));

    // Marker on tile pixel 3: with SCX=3 it lands on screen x=0.
    emu.bus.write(0x8010, 0x10);
    run(&mut emu, DOTS_PER_FRAME);
    let frame = emu.bus.ppu.screen();
    assert_eq!(frame[0], SHADES[1]);
    assert_eq!(frame[1], SHADES[0]);
}

/// A sprite at the top-left corner renders over the background.
#[test]
fn sprite_overlays_background() {
    let mut emu = GameBoy::new(&common::rom(&[])).unwrap();
    // LCD off while OAM is prepared; the PPU blocks access otherwise.
    emu.bus.write(0xff40, 0x00);
    // Tile 2: solid color 3.
    for off in 0..16u16 {
        emu.bus.write(0x8020 + off, 0xff);
    }
    // OAM entry 0: top-left corner, tile 2.
    emu.bus.write(0xfe00, 16); // y
    emu.bus.write(0xfe01, 8); // x
    emu.bus.write(0xfe02, 2); // tile
    emu.bus.write(0xfe03, 0); // attributes
    // Palettes: identity.
    emu.bus.write(0xff47, 0xe4);
    emu.bus.write(0xff48, 0xe4);
    // LCD on with sprites enabled.
    emu.bus.write(0xff40, 0x93);

    run(&mut emu, 456);

    let frame = emu.bus.ppu.screen();
    for px in 0..LCD_WIDTH {
        let expected = if px < 8 { SHADES[3] } else { SHADES[0] };
        assert_eq!(frame[px], expected, "wrong shade at x={px}");
    }
}

/// Sprites defer to non-zero background when their priority bit is set.
#[test]
fn sprite_priority_defers_to_background() {
    let mut emu = GameBoy::new(&common::rom(&[])).unwrap();
    emu.bus.write(0xff40, 0x00);
    // Tile 1: solid color 1 (background); tile 2: solid color 3 (sprite).
    for row in 0..8u16 {
        emu.bus.write(0x8010 + 2 * row, 0xff);
        emu.bus.write(0x8020 + 2 * row, 0xff);
        emu.bus.write(0x8021 + 2 * row, 0xff);
    }
    emu.bus.write(0x9800, 0x01);
    // OAM entry 0 over the colored tile, entry 1 over blank background;
    // both carry behind-background priority.
    emu.bus.write(0xfe00, 16);
    emu.bus.write(0xfe01, 8);
    emu.bus.write(0xfe02, 2);
    emu.bus.write(0xfe03, 0x80);
    emu.bus.write(0xfe04, 16);
    emu.bus.write(0xfe05, 16);
    emu.bus.write(0xfe06, 2);
    emu.bus.write(0xfe07, 0x80);
    emu.bus.write(0xff47, 0xe4);
    emu.bus.write(0xff48, 0xe4);
    emu.bus.write(0xff40, 0x93);

    run(&mut emu, 456);

    let frame = emu.bus.ppu.screen();
    // Non-zero background wins over a deprioritized sprite...
    assert_eq!(frame[0], SHADES[1]);
    // ... but background color 0 never does.
    assert_eq!(frame[8], SHADES[3]);
}

/// The window overlays the background from its configured origin.
#[test]
fn window_overlays_from_origin() {
    let mut emu = GameBoy::new(&common::rom(&[])).unwrap();
    // Window map at $9C00: entry 0 selects tile 1, whose first row is
    // color 1.
    emu.bus.write(0x8010, 0xff);
    emu.bus.write(0x8011, 0x00);
    emu.bus.write(0x9c00, 0x01);
    emu.bus.write(0xff47, 0xe4);
    // WY=0, WX=7: window covers the whole screen.
    emu.bus.write(0xff4a, 0x00);
    emu.bus.write(0xff4b, 0x07);
    // Enable the window (map at $9C00).
    emu.bus.write(0xff40, 0xf1);

    run(&mut emu, 2 * 456);

    let frame = emu.bus.ppu.screen();
    // First window line: tile 1 row 0.
    for px in 0..LCD_WIDTH {
        let expected = if px < 8 { SHADES[1] } else { SHADES[0] };
        assert_eq!(frame[px], expected, "wrong shade at x={px}");
    }
    // Second window line: tile 1 row 1, all zeros.
    assert!(frame[LCD_WIDTH..2 * LCD_WIDTH]
        .iter()
        .all(|&px| px == SHADES[0]));
}
