//! Screen-layout selection. Pure functions from the player configuration
//! to rows and pixel origins; no state.
//!
//! Three densities: the huge centered digits for solo play, one large
//! quadrant per player for 2-4 players, and plain text rows for
//! everything else — or for any table whose life totals outgrow the
//! three-digit glyph sheets. The density choice is global: one player at
//! 1000 life drags the whole table down to the regular rows.

use gba::display::{SCREEN_HEIGHT, SCREEN_WIDTH};

use crate::screen::{LARGE_GLYPH_HEIGHT, LARGE_GLYPH_WIDTH};
use crate::state::{PlayerState, SaveableGameState};

/// Largest life total the large/huge digit sheets can show.
pub const MAX_LIFE_FOR_CUSTOM_PRINT: i32 = 999;
/// Smallest (two digits plus the sign cell).
pub const MIN_LIFE_FOR_CUSTOM_PRINT: i32 = -99;

/// Whether this player's life total forces the regular row layout.
pub fn player_needs_regular(player: &PlayerState) -> bool {
    player.life < MIN_LIFE_FOR_CUSTOM_PRINT || player.life > MAX_LIFE_FOR_CUSTOM_PRINT
}

/// Whether any active player forces the regular row layout.
pub fn needs_regular(saved: &SaveableGameState) -> bool {
    saved.players[..saved.max_players]
        .iter()
        .any(player_needs_regular)
}

/// Text rows and x-offset for a player's damage/counter lines in the
/// large-digit layout.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct CounterRows {
    pub offset_x: i32,
    pub row: i32,
    pub row2: i32,
}

/// Where a player's damage and counter rows go next to their quadrant.
///
/// `max_squares` is the player count; two players share the top half of
/// the screen, four get a quadrant each. Mirrored tables flip the row
/// order so the text reads from the far edge.
pub fn large_counter_rows(player: usize, max_squares: usize, mirrored: bool) -> CounterRows {
    let (offset_x, row, row2) = if max_squares == 2 {
        match player {
            0 => (10, 7, 14),
            1 => (130, 7, 14),
            _ => (0, 0, 0),
        }
    } else if mirrored {
        match player {
            0 => (5, 8, 1),
            1 => (125, 8, 1),
            _ => (0, 0, 0),
        }
    } else {
        match player {
            0 => (5, 1, 8),
            1 => (125, 1, 8),
            2 => (5, 11, 18),
            3 => (125, 11, 18),
            _ => (0, 0, 0),
        }
    };
    CounterRows { offset_x, row, row2 }
}

/// Pixel origin of a player's large digits in their quadrant.
pub fn large_number_origin(square: usize, max_squares: usize, mirrored: bool) -> (i32, i32) {
    if max_squares == 2 {
        let y = 10 + (SCREEN_HEIGHT - LARGE_GLYPH_HEIGHT) / 2;
        match square {
            0 => (0, y),
            1 => (4 * LARGE_GLYPH_WIDTH, y),
            _ => (0, 0),
        }
    } else if mirrored {
        let y = SCREEN_HEIGHT - 10 - LARGE_GLYPH_HEIGHT;
        match square {
            0 => (SCREEN_WIDTH - 3 * LARGE_GLYPH_WIDTH, y),
            1 => (LARGE_GLYPH_WIDTH, y),
            _ => (0, 0),
        }
    } else {
        match square {
            0 => (0, 20),
            1 => (4 * LARGE_GLYPH_WIDTH, 20),
            2 => (0, SCREEN_HEIGHT - LARGE_GLYPH_HEIGHT - 10),
            3 => (4 * LARGE_GLYPH_WIDTH, SCREEN_HEIGHT - LARGE_GLYPH_HEIGHT - 10),
            _ => (0, 0),
        }
    }
}
