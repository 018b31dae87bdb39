//! # Cartridge SRAM
//!
//! Battery-backed save RAM in the `$0E000000` window. The SRAM chip sits on
//! an 8-bit bus: reads and writes MUST be single bytes, and the code that
//! touches it must not be executed from the same cartridge region (true
//! here, game code runs from ROM). Word-sized access silently corrupts
//! data, hence the byte-only API.

/// Base of the SRAM window.
pub const SRAM_BASE: usize = 0x0E00_0000;
/// Usable SRAM size in bytes.
pub const SRAM_SIZE: usize = 0x8000;

/// Handle to the cartridge SRAM.
///
/// # Safety
///
/// Only one `Sram` may exist; constructing it asserts exclusive ownership
/// of the save region, same as the register-block `new()`s elsewhere in
/// this crate.
pub struct Sram {
    _priv: (),
}

impl Sram {
    pub const unsafe fn new() -> Sram {
        Sram { _priv: () }
    }

    #[inline(always)]
    pub fn read_byte(&self, offset: usize) -> u8 {
        debug_assert!(offset < SRAM_SIZE);
        unsafe { core::ptr::read_volatile((SRAM_BASE + offset) as *const u8) }
    }

    #[inline(always)]
    pub fn write_byte(&mut self, offset: usize, value: u8) {
        debug_assert!(offset < SRAM_SIZE);
        unsafe { core::ptr::write_volatile((SRAM_BASE + offset) as *mut u8, value) }
    }
}
