//! # Display control
//!
//! The LCD register block at `$4000000`. The life counter runs entirely in
//! mode 3: a single 240×160 16-bit bitmap on BG2, no tiles, no sprites.
//!
//! ## DisplayControl (`DISPCNT`, `$4000000`)
//!
//! | Flag          | Effect                                      |
//! |---------------|---------------------------------------------|
//! | `MODE3`       | 240×160 15bpp bitmap mode                   |
//! | `BG2`         | enable BG2 (the only layer bitmap modes use)|
//! | `FORCE_BLANK` | blank the screen (white), fast VRAM access  |
//!
//! ## DisplayStatus (`DISPSTAT`, `$4000004`)
//!
//! Vblank/hblank flags and the matching interrupt enables. The frame loop
//! needs `VBLANK_IRQ` set so the BIOS wait call has something to wake on.

use bit_field::BitField;
use bitflags::bitflags;
use volatile_register::{RO, RW};

/// Mode-3 framebuffer width in pixels.
pub const SCREEN_WIDTH: i32 = 240;
/// Mode-3 framebuffer height in pixels.
pub const SCREEN_HEIGHT: i32 = 160;

bitflags! {
    /// `DISPCNT` bits.
    #[derive(Copy, Clone, PartialEq, Eq)]
    pub struct DisplayControl: u16 {
        const MODE3       = 0b011;
        const PAGE_SELECT = 1 << 4;
        const FORCE_BLANK = 1 << 7;
        const BG0         = 1 << 8;
        const BG1         = 1 << 9;
        const BG2         = 1 << 10;
        const BG3         = 1 << 11;
        const OBJ         = 1 << 12;
    }

    /// `DISPSTAT` bits.
    #[derive(Copy, Clone, PartialEq, Eq)]
    pub struct DisplayStatus: u16 {
        const IN_VBLANK    = 1 << 0;
        const IN_HBLANK    = 1 << 1;
        const VCOUNT_MATCH = 1 << 2;
        const VBLANK_IRQ   = 1 << 3;
        const HBLANK_IRQ   = 1 << 4;
        const VCOUNT_IRQ   = 1 << 5;
    }
}

/// LCD register block at `$4000000`.
#[repr(C)]
pub struct LcdRegs {
    pub dispcnt: RW<u16>,
    /// `$4000002`, undocumented green-swap register. Leave it alone.
    _green_swap: RW<u16>,
    pub dispstat: RW<u16>,
    pub vcount: RO<u16>,
}

impl LcdRegs {
    pub unsafe fn new() -> &'static mut LcdRegs {
        unsafe { &mut *(0x0400_0000 as *mut LcdRegs) }
    }

    /// Put the LCD in mode 3 with BG2 enabled.
    pub fn set_mode3_bitmap(&mut self) {
        unsafe {
            self.dispcnt
                .write((DisplayControl::MODE3 | DisplayControl::BG2).bits());
        }
    }

    /// True while the LCD is in the vertical blanking interval.
    #[inline(always)]
    pub fn in_vblank(&self) -> bool {
        self.dispstat.read().get_bit(0)
    }

    /// Enable the vblank interrupt source on the LCD side.
    ///
    /// The interrupt must also be enabled in `IE`/`IME`, see
    /// [`bios::IrqRegs`](crate::bios::IrqRegs).
    pub fn enable_vblank_irq(&mut self) {
        unsafe {
            self.dispstat
                .modify(|s| s | DisplayStatus::VBLANK_IRQ.bits());
        }
    }
}
