//! # gba
//!
//! Hardware abstraction layer for the Game Boy Advance.
//!
//! The GBA is a 16.78 MHz ARM7TDMI with a 240×160 15-bit color LCD, ten
//! buttons, and (on battery-backed cartridges) 32 KiB of SRAM. Everything
//! here is memory-mapped I/O in the `$0400_0000` register block, plus the
//! cartridge SRAM window at `$0E00_0000`.
//!
//! | Module    | Hardware                                            |
//! |-----------|-----------------------------------------------------|
//! | [`display`] | `DISPCNT`/`DISPSTAT`/`VCOUNT`, screen geometry    |
//! | [`keypad`]  | `KEYINPUT` sampling and per-frame edge detection  |
//! | [`sram`]    | battery-backed save RAM (8-bit bus!)              |
//! | [`bios`]    | interrupt registers and BIOS wait calls           |

#![cfg_attr(not(test), no_std)]

pub mod bios;
pub mod display;
pub mod keypad;
pub mod sram;
