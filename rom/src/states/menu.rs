//! The in-game menu: saving, quitting, and the settings that make sense
//! mid-game.

use core::fmt::Write;

use gba::display::SCREEN_WIDTH;
use gba::keypad::Keys;

use crate::audio::{song_name, Mixer};
use crate::input::InputEvents;
use crate::save::{self, SlotStore, MANUAL_SLOT};
use crate::screen::{Color, Screen, TextBuf};
use crate::state::{GameState, State, MAX_BACKGROUND_SONGS};

pub const MENU_ITEM_SAVE: usize = 0;
pub const MENU_ITEM_SAVE_AND_QUIT: usize = 1;
pub const MENU_ITEM_RETURN: usize = 2;
/// Only reachable with 3 or 4 players; the cursor skips it otherwise.
pub const MENU_ITEM_FLIP_TOP_NUMBERS: usize = 3;
pub const MENU_ITEM_SONG: usize = 4;
pub const MENU_ITEM_SFX: usize = 5;
pub const MENU_ITEM_CONTROLS: usize = 6;
pub const MENU_ITEM_QUIT: usize = 7;
pub const MENU_ITEMS: usize = 8;

/// Whether the flip-top-numbers item applies: only the 3- and 4-player
/// tables have anyone sitting across the top edge.
fn flip_applies(gs: &GameState) -> bool {
    gs.saved.max_players > 2 && gs.saved.max_players < 5
}

pub fn handle<S: Screen, M: Mixer, P: SlotStore>(
    gs: &mut GameState,
    input: InputEvents,
    screen: &mut S,
    mixer: &mut M,
    store: &mut P,
) -> State {
    let state_changed = gs.previous_state != Some(gs.state);
    let mut selected_item_changed = state_changed;
    let mut song_changed = state_changed;
    let mut sfx_changed = state_changed;

    if input.released.intersects(Keys::START | Keys::B) {
        screen.clear();
        return State::CountLife;
    }

    if input.released.contains(Keys::A) {
        match gs.selected_menu_item {
            MENU_ITEM_QUIT => {
                screen.clear();
                gs.reset();
                return State::Setup;
            }
            MENU_ITEM_SAVE | MENU_ITEM_SAVE_AND_QUIT => {
                screen.clear();
                save::save(store, MANUAL_SLOT, &gs.saved);
                if gs.selected_menu_item == MENU_ITEM_SAVE_AND_QUIT {
                    gs.reset();
                    return State::Setup;
                }
                return State::CountLife;
            }
            MENU_ITEM_RETURN => {
                screen.clear();
                return State::CountLife;
            }
            MENU_ITEM_FLIP_TOP_NUMBERS => {
                screen.clear();
                gs.saved.upside_down_numbers = !gs.saved.upside_down_numbers;
                return State::CountLife;
            }
            MENU_ITEM_CONTROLS => {
                screen.clear();
                gs.state_to_return_to = Some(State::Menu);
                return State::Controls;
            }
            _ => {}
        }
    }

    if input.released.contains(Keys::UP) && gs.selected_menu_item > 0 {
        if !flip_applies(gs) && gs.selected_menu_item == MENU_ITEM_SONG {
            gs.selected_menu_item -= 1;
        }
        gs.selected_menu_item -= 1;
        selected_item_changed = true;
    }

    if input.released.contains(Keys::DOWN) && gs.selected_menu_item < MENU_ITEMS - 1 {
        if !flip_applies(gs) && gs.selected_menu_item == MENU_ITEM_RETURN {
            gs.selected_menu_item += 1;
        }
        gs.selected_menu_item += 1;
        selected_item_changed = true;
    }

    if input.released.contains(Keys::LEFT) {
        if gs.selected_menu_item == MENU_ITEM_SONG {
            if gs.saved.selected_background_song > 0 {
                gs.saved.selected_background_song -= 1;
                mixer.play_song(gs.saved.selected_background_song);
                song_changed = true;
            }
        } else if gs.selected_menu_item == MENU_ITEM_SFX {
            gs.saved.sfx_enabled = !gs.saved.sfx_enabled;
            sfx_changed = true;
        }
    }

    if input.released.contains(Keys::RIGHT) {
        if gs.selected_menu_item == MENU_ITEM_SONG {
            if gs.saved.selected_background_song < MAX_BACKGROUND_SONGS - 1 {
                gs.saved.selected_background_song += 1;
                mixer.play_song(gs.saved.selected_background_song);
                song_changed = true;
            }
        } else if gs.selected_menu_item == MENU_ITEM_SFX {
            gs.saved.sfx_enabled = !gs.saved.sfx_enabled;
            sfx_changed = true;
        }
    }

    if sfx_changed || selected_item_changed || song_changed {
        let cursor = |item: usize| if gs.selected_menu_item == item { '*' } else { ' ' };
        let w = SCREEN_WIDTH;
        let mut buf = TextBuf::new();
        let mut row = 1;

        screen.print_text_color(row, 0, w, Color::Green, false, " Menu");
        row += 1;

        buf.clear();
        write!(buf, "{}Save.", cursor(MENU_ITEM_SAVE)).ok();
        screen.print_text_color(row, 0, w, Color::White, false, buf.as_str());
        row += 1;

        buf.clear();
        write!(buf, "{}Save and Quit.", cursor(MENU_ITEM_SAVE_AND_QUIT)).ok();
        screen.print_text_color(row, 0, w, Color::White, false, buf.as_str());
        row += 1;

        buf.clear();
        write!(buf, "{}Return to game.", cursor(MENU_ITEM_RETURN)).ok();
        screen.print_text_color(row, 0, w, Color::White, false, buf.as_str());
        row += 1;

        if flip_applies(gs) {
            buf.clear();
            write!(buf, "{}Flip top numbers.", cursor(MENU_ITEM_FLIP_TOP_NUMBERS)).ok();
            screen.print_text_color(row, 0, w, Color::White, false, buf.as_str());
            row += 1;
        }

        buf.clear();
        write!(
            buf,
            "{}Song: {}",
            cursor(MENU_ITEM_SONG),
            song_name(gs.saved.selected_background_song)
        )
        .ok();
        screen.print_text_color(row, 0, w, Color::White, false, buf.as_str());
        row += 1;

        buf.clear();
        write!(
            buf,
            "{}Sound effects: {}",
            cursor(MENU_ITEM_SFX),
            if gs.saved.sfx_enabled { "Yes" } else { "No" }
        )
        .ok();
        screen.print_text_color(row, 0, w, Color::White, false, buf.as_str());
        row += 1;

        buf.clear();
        write!(buf, "{}Show controls.", cursor(MENU_ITEM_CONTROLS)).ok();
        screen.print_text_color(row, 0, w, Color::White, false, buf.as_str());
        row += 1;

        buf.clear();
        write!(buf, "{}Quit.", cursor(MENU_ITEM_QUIT)).ok();
        screen.print_text_color(row, 0, w, Color::White, false, buf.as_str());
    }

    gs.state
}
