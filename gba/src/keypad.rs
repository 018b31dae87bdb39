//! # Keypad
//!
//! `KEYINPUT` (`$4000130`) holds the ten button bits, active-low. [`Keypad`]
//! samples it once per frame and keeps the previous frame's sample around,
//! so pressed/released edges come out of two registers' worth of state and
//! no interrupt handler.
//!
//! ```ignore
//! let mut pad = Keypad::new();
//!
//! loop {
//!     bios::vblank_intr_wait();
//!     pad.scan();
//!
//!     if pad.just_released(Keys::START) {
//!         // act on button-up
//!     }
//! }
//! ```

use bitflags::bitflags;
use volatile_register::{RO, RW};

bitflags! {
    /// Button mask in `KEYINPUT` bit order, after the active-low inversion
    /// (a set bit means "held down").
    #[derive(Copy, Clone, PartialEq, Eq, Debug)]
    pub struct Keys: u16 {
        const A      = 0x0001;
        const B      = 0x0002;
        const SELECT = 0x0004;
        const START  = 0x0008;
        const RIGHT  = 0x0010;
        const LEFT   = 0x0020;
        const UP     = 0x0040;
        const DOWN   = 0x0080;
        const R      = 0x0100;
        const L      = 0x0200;
    }
}

/// Keypad register block at `$4000130`.
#[repr(C)]
pub struct KeypadRegs {
    /// Button state, active-low. Read-only.
    pub keyinput: RO<u16>,
    /// Keypad interrupt control.
    pub keycnt: RW<u16>,
}

impl KeypadRegs {
    pub unsafe fn new() -> &'static mut KeypadRegs {
        unsafe { &mut *(0x0400_0130 as *mut KeypadRegs) }
    }
}

/// Per-frame button sampler.
///
/// Call [`scan`](Keypad::scan) exactly once per frame; the edge queries
/// compare the current sample against the previous one.
pub struct Keypad {
    pub keys: Keys,
    pub keys_last: Keys,
}

impl Keypad {
    pub const fn new() -> Self {
        Self {
            keys: Keys::empty(),
            keys_last: Keys::empty(),
        }
    }

    /// Sample `KEYINPUT` and rotate the previous sample out.
    #[inline(always)]
    pub fn scan(&mut self) {
        let raw = unsafe { KeypadRegs::new().keyinput.read() };
        self.set_from_raw(raw);
    }

    /// Feed a raw `KEYINPUT` value (active-low) into the sampler.
    #[inline]
    pub fn set_from_raw(&mut self, raw: u16) {
        self.keys_last = self.keys;
        self.keys = Keys::from_bits_truncate(!raw);
    }

    /// Buttons currently held down.
    #[inline]
    pub fn held(&self) -> Keys {
        self.keys
    }

    /// Buttons that went down this frame (edge-trigger).
    #[inline]
    pub fn pressed(&self) -> Keys {
        self.keys & !self.keys_last
    }

    /// Buttons that came up this frame (edge-trigger).
    #[inline]
    pub fn released(&self) -> Keys {
        !self.keys & self.keys_last
    }

    /// Returns true only on the frame `key` was first pressed.
    #[inline]
    pub fn just_pressed(&self, key: Keys) -> bool {
        self.pressed().contains(key)
    }

    /// Returns true only on the frame `key` was released.
    #[inline]
    pub fn just_released(&self, key: Keys) -> bool {
        self.released().contains(key)
    }
}
