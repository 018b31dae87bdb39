//! # BIOS calls and interrupt registers
//!
//! The GBA BIOS provides a handful of software-interrupt services; the only
//! one a frame-locked game needs is `VBlankIntrWait` (swi `0x05`), which
//! halts the CPU until the next vblank interrupt. That requires the vblank
//! interrupt to actually fire: `DISPSTAT` bit 3, `IE` bit 0, and `IME` all
//! enabled.

use bitflags::bitflags;
use volatile_register::RW;

bitflags! {
    /// Interrupt sources in `IE`/`IF` bit order.
    #[derive(Copy, Clone, PartialEq, Eq)]
    pub struct IrqFlags: u16 {
        const VBLANK = 1 << 0;
        const HBLANK = 1 << 1;
        const VCOUNT = 1 << 2;
        const TIMER0 = 1 << 3;
        const TIMER1 = 1 << 4;
        const TIMER2 = 1 << 5;
        const TIMER3 = 1 << 6;
        const SERIAL = 1 << 7;
        const DMA0   = 1 << 8;
        const DMA1   = 1 << 9;
        const DMA2   = 1 << 10;
        const DMA3   = 1 << 11;
        const KEYPAD = 1 << 12;
        const CART   = 1 << 13;
    }
}

/// Interrupt/waitstate register block at `$4000200`.
#[repr(C)]
pub struct IrqRegs {
    /// Interrupt enable.
    pub ie: RW<u16>,
    /// Interrupt request / acknowledge.
    pub irf: RW<u16>,
    /// Waitstate control. Bits 0-1 set the SRAM access time; leave at the
    /// cartridge default unless the save chip says otherwise.
    pub waitcnt: RW<u16>,
    _pad: RW<u16>,
    /// Interrupt master enable. Only bit 0 matters.
    pub ime: RW<u16>,
}

impl IrqRegs {
    pub unsafe fn new() -> &'static mut IrqRegs {
        unsafe { &mut *(0x0400_0200 as *mut IrqRegs) }
    }

    /// Enable an interrupt source and the master switch.
    pub fn enable(&mut self, which: IrqFlags) {
        unsafe {
            self.ie.modify(|ie| ie | which.bits());
            self.ime.write(1);
        }
    }
}

/// Halt until the next vblank interrupt (`VBlankIntrWait`, swi `0x05`).
///
/// On anything but the console this is a no-op, which keeps host-side test
/// builds linking; nothing off-console has a vblank to wait for.
#[inline(always)]
pub fn vblank_intr_wait() {
    #[cfg(target_arch = "arm")]
    unsafe {
        core::arch::asm!(
            "swi #5",
            out("r0") _,
            out("r1") _,
            out("r3") _,
            options(nostack)
        );
    }
}
