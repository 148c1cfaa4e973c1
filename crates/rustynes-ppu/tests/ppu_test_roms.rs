//! PPU integration tests driven through [`PpuBus`] rather than real test ROMs.
//!
//! Blargg's `ppu_vbl_nmi` and `sprite_hit_tests` suites are the usual way to
//! validate a PPU against hardware, but this core deliberately does not model
//! sprite evaluation or cycle-exact scrolling (see the crate-level docs), so
//! those ROMs would fail for reasons outside this core's scope. These tests
//! instead exercise the documented register/timing contract directly.

use rustynes_mappers::Mirroring;
use rustynes_ppu::{DOTS_PER_SCANLINE, Ppu, PpuBus, SCANLINES_PER_FRAME};

/// A minimal CHR-backed bus: flat CHR RAM, no cartridge mirroring logic
/// (that lives in the PPU itself and is exercised separately).
struct ChrBus {
    chr: Vec<u8>,
}

impl ChrBus {
    fn new(chr: Vec<u8>) -> Self {
        Self { chr }
    }
}

impl PpuBus for ChrBus {
    fn read(&mut self, addr: u16) -> u8 {
        self.chr[addr as usize & 0x1FFF]
    }
    fn write(&mut self, addr: u16, value: u8) {
        self.chr[addr as usize & 0x1FFF] = value;
    }
}

fn solid_tile_chr(tile: u8, pattern: u8) -> Vec<u8> {
    let mut chr = vec![0u8; 0x2000];
    let base = usize::from(tile) * 16;
    for row in 0..8 {
        chr[base + row] = pattern;
        chr[base + row + 8] = 0;
    }
    chr
}

#[test]
fn one_full_frame_advances_exactly_89342_ticks() {
    let mut ppu = Ppu::new();
    let mut bus = ChrBus::new(vec![0u8; 0x2000]);

    let mut ticks = 0u32;
    loop {
        ppu.step(&mut bus);
        ticks += 1;
        if ppu.frame_complete() {
            break;
        }
    }

    assert_eq!(
        ticks,
        u32::from(DOTS_PER_SCANLINE) * u32::from(SCANLINES_PER_FRAME)
    );
}

#[test]
fn nmi_fires_exactly_once_per_frame_when_enabled() {
    let mut ppu = Ppu::new();
    let mut bus = ChrBus::new(vec![0u8; 0x2000]);
    ppu.write_register(0x2000, 0x80, &mut bus);

    let mut nmi_count = 0;
    let total_ticks = u32::from(DOTS_PER_SCANLINE) * u32::from(SCANLINES_PER_FRAME);
    for _ in 0..total_ticks {
        if ppu.step(&mut bus) {
            nmi_count += 1;
        }
    }

    assert_eq!(nmi_count, 1);
}

#[test]
fn vram_writes_and_reads_round_trip_through_ppudata() {
    let mut ppu = Ppu::new();
    let mut bus = ChrBus::new(vec![0u8; 0x2000]);

    // Point PPUADDR at nametable 0, write a byte, then re-point and prime
    // the read buffer with one throwaway read before checking the value.
    ppu.write_register(0x2006, 0x20, &mut bus);
    ppu.write_register(0x2006, 0x10, &mut bus);
    ppu.write_register(0x2007, 0xAB, &mut bus);

    ppu.write_register(0x2006, 0x20, &mut bus);
    ppu.write_register(0x2006, 0x10, &mut bus);
    let _ = ppu.read_register(0x2007, &mut bus); // discard stale buffer
    let value = ppu.read_register(0x2007, &mut bus);
    assert_eq!(value, 0xAB);
}

#[test]
fn background_framebuffer_reflects_nametable_tile() {
    let mut ppu = Ppu::new();
    ppu.set_mirroring(Mirroring::Horizontal);
    let mut bus = ChrBus::new(solid_tile_chr(0x24, 0xFF));

    // Point the first nametable entry at tile 0x24 and enable NMI so the
    // test can stop as soon as the background has been decoded.
    ppu.write_register(0x2006, 0x20, &mut bus);
    ppu.write_register(0x2006, 0x00, &mut bus);
    ppu.write_register(0x2007, 0x24, &mut bus);
    ppu.write_register(0x2000, 0x80, &mut bus);

    loop {
        if ppu.step(&mut bus) {
            break;
        }
    }

    let framebuffer = ppu.framebuffer();
    // Every pixel of the solid 0xFF pattern's first row should resolve to a
    // non-backdrop color (tile 0x24 is plane-0 = 1 for every column).
    let (r0, g0, b0) = (framebuffer[0], framebuffer[1], framebuffer[2]);
    let (r7, g7, b7) = (framebuffer[7 * 3], framebuffer[7 * 3 + 1], framebuffer[7 * 3 + 2]);
    assert_eq!((r0, g0, b0), (r7, g7, b7));
}
