//! # lifecounter
//!
//! Commander life and counter tracker for the Game Boy Advance.
//!
//! Tracks life totals, per-opponent commander damage, and poison / energy /
//! experience / commander-tax counters for up to eight players, renders
//! them in three display densities on the 240×160 bitmap, and keeps the
//! game restorable across power cycles through two save slots in cartridge
//! SRAM.
//!
//! Everything here is driven by one tick per vblank: sample the keypad,
//! hand the edge masks to the current state's handler, let it mutate the
//! [`GameState`](state::GameState) and emit draw/audio calls through the
//! [`Screen`](screen::Screen) and [`Mixer`](audio::Mixer) facades, then
//! adopt whatever state it returns. The platform side owns the actual
//! rasterizer, mixer, and entry wiring:
//!
//! ```ignore
//! let mut gs = GameState::new();
//! let mut pad = Keypad::new();
//!
//! loop {
//!     bios::vblank_intr_wait();
//!     pad.scan();
//!     let input = InputEvents::new(pad.pressed(), pad.released());
//!     states::tick(&mut gs, input, &mut screen, &mut mixer, &mut sram);
//! }
//! ```
//!
//! Diagnostics go through the `log` facade; without an installed logger
//! (the normal case on hardware) they compile to nothing.

#![cfg_attr(not(test), no_std)]

pub mod audio;
pub mod hud;
pub mod input;
pub mod layout;
pub mod save;
pub mod screen;
pub mod state;
pub mod states;

/// Frames per second, locked to the LCD refresh.
pub const FPS: u32 = 60;

/// How long the transient life-delta indicator stays up.
pub const TIME_CLEAR_LIFE_CHANGED: u32 = FPS * 3;

/// Idle window between the last counter edit and the automatic save.
pub const TIME_AUTO_SAVE: u32 = FPS * 15;
