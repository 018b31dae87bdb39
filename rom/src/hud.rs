//! Per-player display composition: the commander-damage row, the counter
//! row, the three life layouts, and the transient life-delta indicator.
//!
//! All text is composed into fixed buffers and handed to the [`Screen`]
//! facade. Mirrored lines are built digit-reversed here (the rasterizer
//! flips glyphs, not strings), and every damage/counter entry is prefixed
//! with a `#{ci:N}` color marker so one row can carry all the opponents'
//! colors.

use core::fmt::Write;

use gba::display::SCREEN_WIDTH;

use crate::layout;
use crate::screen::{player_color, Color, Screen, TextBuf, GLYPH_WIDTH};
use crate::state::{
    GameState, COMMANDERTAX_COUNTER, ENERGY_COUNTER, EXPERIENCE_COUNTER, MAX_COMMANDER_DAMAGE,
    MAX_POISON_COUNTERS, POISON_COUNTER,
};

const POISON_COLOR: Color = Color::Lime;
const ENERGY_COLOR: Color = Color::Cream;
const EXPERIENCE_COLOR: Color = Color::Gray;
const COMMANDERTAX_COLOR: Color = Color::White;

/// Which opponent a damage slot belongs to, skipping the player's own
/// index: slot j is opponent j for j < player, opponent j+1 after.
fn opponent_for_slot(player: usize, slot: usize) -> usize {
    if slot >= player {
        slot + 1
    } else {
        slot
    }
}

/// The trailing selection dot, when `id` is this player's selected entry.
fn marker(gs: &GameState, player: usize, id: usize) -> &'static str {
    if gs.selected_player == player && gs.selected_counter == id {
        "."
    } else {
        ""
    }
}

fn reversed(s: &str) -> heapless::String<16> {
    let mut out = heapless::String::new();
    for ch in s.chars().rev() {
        out.push(ch).ok();
    }
    out
}

/// Compose a player's counter summary (`counter_line`) and commander
/// damage list (`damage_line`). Mirrored lines come out in reverse entry
/// order with reversed digit strings, ready for upside-down drawing.
pub fn prepare_counters(
    counter_line: &mut TextBuf,
    damage_line: &mut TextBuf,
    gs: &GameState,
    player: usize,
    mirrored: bool,
) {
    counter_line.clear();
    damage_line.clear();
    let p = &gs.saved.players[player];
    let max_opp = gs.saved.max_opponents;

    if mirrored {
        for j in (0..max_opp).rev() {
            let opponent = opponent_for_slot(player, j);
            let color = if p.commander_damage[j] >= MAX_COMMANDER_DAMAGE {
                Color::Red
            } else {
                player_color(opponent)
            };
            let mut value = heapless::String::<16>::new();
            write!(value, "{}{}", p.commander_damage[j], marker(gs, player, j)).ok();
            if j != max_opp - 1 {
                damage_line.push(' ').ok();
            }
            write!(damage_line, "#{{ci:{}}}{}", color as u8, reversed(&value).as_str()).ok();
        }
    } else {
        for j in 0..max_opp {
            let opponent = opponent_for_slot(player, j);
            let color = if p.commander_damage[j] >= MAX_COMMANDER_DAMAGE {
                Color::Red
            } else {
                player_color(opponent)
            };
            if j != 0 {
                damage_line.push(' ').ok();
            }
            write!(
                damage_line,
                "#{{ci:{}}}{}{}",
                color as u8,
                p.commander_damage[j],
                marker(gs, player, j)
            )
            .ok();
        }
    }

    let mut poison = heapless::String::<16>::new();
    let mut energy = heapless::String::<16>::new();
    let mut experience = heapless::String::<16>::new();
    let mut tax = heapless::String::<16>::new();
    write!(poison, "{}{}", p.poison, marker(gs, player, POISON_COUNTER)).ok();
    write!(energy, "{}{}", p.energy, marker(gs, player, ENERGY_COUNTER)).ok();
    write!(experience, "{}{}", p.experience, marker(gs, player, EXPERIENCE_COUNTER)).ok();
    if max_opp > 0 {
        write!(tax, "{}{}", p.commander_tax, marker(gs, player, COMMANDERTAX_COUNTER)).ok();
    }

    if mirrored {
        if max_opp > 0 {
            write!(
                counter_line,
                "#{{ci:{}}}{}C #{{ci:{}}}{}X #{{ci:{}}}{}E #{{ci:{}}}{}P",
                COMMANDERTAX_COLOR as u8,
                reversed(&tax).as_str(),
                EXPERIENCE_COLOR as u8,
                reversed(&experience).as_str(),
                ENERGY_COLOR as u8,
                reversed(&energy).as_str(),
                POISON_COLOR as u8,
                reversed(&poison).as_str(),
            )
            .ok();
        } else {
            write!(
                counter_line,
                "#{{ci:{}}}{}X #{{ci:{}}}{}E #{{ci:{}}}{}P",
                EXPERIENCE_COLOR as u8,
                reversed(&experience).as_str(),
                ENERGY_COLOR as u8,
                reversed(&energy).as_str(),
                POISON_COLOR as u8,
                reversed(&poison).as_str(),
            )
            .ok();
        }
    } else if max_opp > 0 {
        write!(
            counter_line,
            "#{{ci:{}}}P{} #{{ci:{}}}E{} #{{ci:{}}}X{} #{{ci:{}}}C{}",
            POISON_COLOR as u8,
            poison.as_str(),
            ENERGY_COLOR as u8,
            energy.as_str(),
            EXPERIENCE_COLOR as u8,
            experience.as_str(),
            COMMANDERTAX_COLOR as u8,
            tax.as_str(),
        )
        .ok();
    } else {
        write!(
            counter_line,
            "#{{ci:{}}}P{} #{{ci:{}}}E{} #{{ci:{}}}X{}",
            POISON_COLOR as u8,
            poison.as_str(),
            ENERGY_COLOR as u8,
            energy.as_str(),
            EXPERIENCE_COLOR as u8,
            experience.as_str(),
        )
        .ok();
    }
}

/// Draw a player's damage and counter rows; on a single row they join
/// into one line, damage first.
pub fn print_counters<S: Screen>(
    screen: &mut S,
    row: i32,
    row2: i32,
    offset_x: i32,
    width_x: i32,
    mirrored: bool,
    gs: &GameState,
    player: usize,
) {
    let mut counter_line = TextBuf::new();
    let mut damage_line = TextBuf::new();
    prepare_counters(&mut counter_line, &mut damage_line, gs, player, mirrored);

    if row == row2 {
        damage_line.push(' ').ok();
        damage_line.push_str(counter_line.as_str()).ok();
        screen.print_text(row, offset_x, width_x, mirrored, damage_line.as_str());
    } else {
        screen.print_text(row, offset_x, width_x, mirrored, damage_line.as_str());
        screen.print_text(row2, offset_x, width_x, mirrored, counter_line.as_str());
    }
}

/// One player as two text rows: name, life, and the counter summary on
/// the first; the commander-damage list indented on the second.
pub fn print_life_regular<S: Screen>(screen: &mut S, gs: &GameState, player: usize) {
    let mut counter_line = TextBuf::new();
    let mut damage_line = TextBuf::new();
    prepare_counters(&mut counter_line, &mut damage_line, gs, player, false);

    let p = &gs.saved.players[player];
    let row = 1 + player as i32 * 2;
    let selected = gs.selected_player == player;

    let mut line = TextBuf::new();
    write!(
        line,
        "{}Player {}: {} {}",
        if selected { '*' } else { ' ' },
        player,
        p.life,
        counter_line.as_str(),
    )
    .ok();
    let color = if !selected && (p.life <= 0 || p.poison >= MAX_POISON_COUNTERS) {
        Color::Red
    } else {
        player_color(player)
    };
    screen.print_text_color(row, 10, SCREEN_WIDTH, color, false, line.as_str());

    screen.print_text(row + 1, 10 + GLYPH_WIDTH * 2, SCREEN_WIDTH, false, damage_line.as_str());
}

/// One player as a large-digit quadrant plus text rows for the counters.
pub fn print_life_large<S: Screen>(screen: &mut S, gs: &GameState, player: usize, mirrored: bool) {
    let (x, y) = layout::large_number_origin(player, gs.saved.max_players, mirrored);
    let p = &gs.saved.players[player];

    if gs.selected_player == player {
        screen.print_large_number(x, y, p.life, player_color(player), mirrored, true);
    } else if p.life <= 0 || p.poison >= MAX_POISON_COUNTERS {
        screen.print_large_number(x, y, p.life, Color::Red, mirrored, false);
    } else {
        screen.print_large_number(x, y, p.life, player_color(player), mirrored, false);
    }

    if gs.saved.max_opponents > 0 {
        let rows = layout::large_counter_rows(player, gs.saved.max_players, mirrored);
        print_counters(
            screen,
            rows.row,
            rows.row2,
            rows.offset_x,
            SCREEN_WIDTH / 2,
            mirrored,
            gs,
            player,
        );
    } else {
        // No commander damage to show: every player's counters fit on
        // their quadrant's lower row, never mirrored.
        for j in 0..gs.saved.max_players {
            let rows = layout::large_counter_rows(j, gs.saved.max_players, mirrored);
            print_counters(screen, rows.row2, rows.row2, rows.offset_x, SCREEN_WIDTH / 2, false, gs, j);
        }
    }
}

/// The solo layout: one huge centered number, counters underneath.
pub fn print_life_huge<S: Screen>(screen: &mut S, gs: &GameState, show_counters: bool) {
    screen.print_huge_number(gs.saved.players[0].life);
    if show_counters {
        print_counters(screen, 18, 18, 5, SCREEN_WIDTH, false, gs, 0);
    }
}

/// The transient "+5"/"-3" indicator beside the selected player's total.
/// Position depends on which layout is up; `clear` wipes it.
pub fn print_life_changed<S: Screen>(screen: &mut S, gs: &GameState, clear: bool) {
    let (row, column) = if gs.printed_regular {
        (18, SCREEN_WIDTH - GLYPH_WIDTH * 5)
    } else if gs.saved.max_players == 1 {
        (15, (SCREEN_WIDTH * 4) / 5 - GLYPH_WIDTH * 2)
    } else if gs.saved.max_players > 4 {
        (18, SCREEN_WIDTH - GLYPH_WIDTH * 5)
    } else {
        (9, SCREEN_WIDTH / 2 - GLYPH_WIDTH * 2)
    };
    let color = player_color(gs.selected_player);

    if clear {
        screen.print_text_color(row, column, GLYPH_WIDTH * 5, color, false, "     ");
    } else {
        let mut buf = TextBuf::new();
        if gs.life_changed > 0 {
            write!(buf, "+{}", gs.life_changed).ok();
        } else {
            write!(buf, "{}", gs.life_changed).ok();
        }
        screen.print_text_color(row, column, GLYPH_WIDTH * 5, color, false, buf.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{GameState, FIRST_COUNTER};

    fn commander_4p() -> GameState {
        let mut gs = GameState::new();
        gs.saved.max_players = 4;
        gs.saved.max_opponents = 3;
        gs.init_life_and_counters();
        gs
    }

    #[test]
    fn damage_entries_carry_opponent_colors_and_the_selection_dot() {
        let mut gs = commander_4p();
        gs.selected_player = 0;
        gs.selected_counter = 0;
        let mut counters = TextBuf::new();
        let mut damage = TextBuf::new();
        prepare_counters(&mut counters, &mut damage, &gs, 0, false);
        // Player 0's opponents are slots 1 (orange), 2 (magenta), 3 (green);
        // the first entry is selected.
        assert_eq!(damage.as_str(), "#{ci:7}0. #{ci:5}0 #{ci:1}0");
        assert_eq!(counters.as_str(), "#{ci:10}P0 #{ci:11}E0 #{ci:12}X0 #{ci:0}C0");
    }

    #[test]
    fn lethal_damage_turns_red() {
        let mut gs = commander_4p();
        // Another player holds the cursor, so no dot lands in this row.
        gs.selected_player = 1;
        gs.saved.players[0].commander_damage[1] = 21;
        let mut counters = TextBuf::new();
        let mut damage = TextBuf::new();
        prepare_counters(&mut counters, &mut damage, &gs, 0, false);
        assert_eq!(damage.as_str(), "#{ci:7}0 #{ci:2}21 #{ci:1}0");
    }

    #[test]
    fn mirrored_lines_reverse_entry_order_and_digits() {
        let mut gs = commander_4p();
        gs.selected_player = 0;
        gs.selected_counter = 0;
        gs.saved.players[0].commander_damage[0] = 12;
        let mut counters = TextBuf::new();
        let mut damage = TextBuf::new();
        prepare_counters(&mut counters, &mut damage, &gs, 0, true);
        // Slot 2 first, then 1, then slot 0's "12." reversed to ".21".
        assert_eq!(damage.as_str(), "#{ci:1}0 #{ci:5}0 #{ci:7}.21");
        // Counters run C, X, E, P with the value ahead of the letter.
        assert_eq!(counters.as_str(), "#{ci:0}0C #{ci:12}0X #{ci:11}0E #{ci:10}0P");
    }

    #[test]
    fn one_v_one_has_no_damage_row_and_no_tax() {
        let mut gs = GameState::new();
        gs.saved.max_players = 2;
        gs.saved.max_opponents = 0;
        gs.saved.starting_life = 20;
        gs.selected_counter = FIRST_COUNTER;
        gs.init_life_and_counters();
        let mut counters = TextBuf::new();
        let mut damage = TextBuf::new();
        prepare_counters(&mut counters, &mut damage, &gs, 0, false);
        assert!(damage.is_empty());
        assert_eq!(counters.as_str(), "#{ci:10}P0. #{ci:11}E0 #{ci:12}X0");
    }
}
