//! The setup screen: quick starts, game configuration, loading.

use core::fmt::Write;

use gba::display::SCREEN_WIDTH;
use gba::keypad::Keys;

use crate::audio::{song_name, Mixer};
use crate::input::InputEvents;
use crate::save::{self, SlotStore, AUTOSAVE_SLOT, MANUAL_SLOT};
use crate::screen::{Color, Screen, TextBuf};
use crate::state::{GameState, State, FIRST_COUNTER, MAX_BACKGROUND_SONGS, MAX_PLAYERS};

pub const SETUP_ITEM_QUICK_START_COMMANDER4P: usize = 0;
pub const SETUP_ITEM_QUICK_START_COMMANDER1P: usize = 1;
pub const SETUP_ITEM_QUICK_START_1V1: usize = 2;
pub const SETUP_ITEM_STARTING_LIFE: usize = 3;
pub const SETUP_ITEM_PLAYERS: usize = 4;
/// Only selectable with exactly one player; multiplayer derives the
/// opponent count on Start.
pub const SETUP_ITEM_OPPONENTS: usize = 5;
pub const SETUP_ITEM_SONG: usize = 6;
pub const SETUP_ITEM_SFX: usize = 7;
pub const SETUP_ITEM_START: usize = 8;
pub const SETUP_ITEM_LOAD_SAVE: usize = 9;
pub const SETUP_ITEM_LOAD_AUTOSAVE: usize = 10;
pub const SETUP_ITEM_CONTROLS: usize = 11;
pub const SETUP_ITEMS: usize = 12;

pub fn handle<S: Screen, M: Mixer, P: SlotStore>(
    gs: &mut GameState,
    input: InputEvents,
    screen: &mut S,
    mixer: &mut M,
    store: &mut P,
) -> State {
    let state_changed = gs.previous_state != Some(gs.state);
    let mut selected_item_changed = state_changed;
    let mut max_players_changed = state_changed;

    if input.released.intersects(Keys::START | Keys::A) {
        match gs.selected_setup_item {
            SETUP_ITEM_QUICK_START_COMMANDER4P => {
                screen.clear();
                gs.saved.max_players = 4;
                gs.saved.max_opponents = 3;
                gs.saved.starting_life = 40;
                gs.init_life_and_counters();
                return State::CountLife;
            }
            SETUP_ITEM_QUICK_START_COMMANDER1P => {
                screen.clear();
                gs.saved.max_players = 1;
                gs.saved.max_opponents = 3;
                gs.saved.starting_life = 40;
                gs.init_life_and_counters();
                return State::CountLife;
            }
            SETUP_ITEM_QUICK_START_1V1 => {
                screen.clear();
                gs.saved.max_players = 2;
                gs.saved.max_opponents = 0;
                gs.saved.starting_life = 20;
                // No damage entries to select in a commanderless game.
                gs.selected_counter = FIRST_COUNTER;
                gs.init_life_and_counters();
                return State::CountLife;
            }
            SETUP_ITEM_START => {
                screen.clear();
                if gs.saved.max_players != 1 {
                    gs.saved.max_opponents = gs.saved.max_players - 1;
                }
                gs.init_life_and_counters();
                return State::CountLife;
            }
            SETUP_ITEM_LOAD_SAVE => match save::load_into(store, MANUAL_SLOT, gs) {
                Ok(()) => {
                    screen.clear();
                    mixer.play_song(gs.saved.selected_background_song);
                    return State::CountLife;
                }
                Err(_) => {
                    screen.print_text_color(17, 10, SCREEN_WIDTH, Color::Red, false, "NO SAVE FOUND");
                }
            },
            SETUP_ITEM_LOAD_AUTOSAVE => match save::load_into(store, AUTOSAVE_SLOT, gs) {
                Ok(()) => {
                    screen.clear();
                    mixer.play_song(gs.saved.selected_background_song);
                    return State::CountLife;
                }
                Err(_) => {
                    screen.print_text_color(17, 10, SCREEN_WIDTH, Color::Red, false, "NO SAVE FOUND");
                }
            },
            SETUP_ITEM_CONTROLS => {
                screen.clear();
                gs.state_to_return_to = Some(State::Setup);
                return State::Controls;
            }
            _ => {}
        }
    }

    if input.released.contains(Keys::UP) && gs.selected_setup_item > 0 {
        gs.selected_setup_item -= 1;
        if gs.selected_setup_item == SETUP_ITEM_OPPONENTS && gs.saved.max_players != 1 {
            gs.selected_setup_item -= 1;
        }
        selected_item_changed = true;
    }

    if input.released.contains(Keys::DOWN) && gs.selected_setup_item < SETUP_ITEMS - 1 {
        gs.selected_setup_item += 1;
        if gs.selected_setup_item == SETUP_ITEM_OPPONENTS && gs.saved.max_players != 1 {
            gs.selected_setup_item += 1;
        }
        selected_item_changed = true;
    }

    if gs.selected_setup_item == SETUP_ITEM_STARTING_LIFE {
        if input.released.contains(Keys::LEFT) {
            gs.saved.starting_life -= 5;
            selected_item_changed = true;
        }
        if input.released.contains(Keys::RIGHT) {
            gs.saved.starting_life += 5;
            selected_item_changed = true;
        }
    }

    if gs.selected_setup_item == SETUP_ITEM_SONG {
        let song_before = gs.saved.selected_background_song;
        if input.released.contains(Keys::LEFT) && gs.saved.selected_background_song > 0 {
            gs.saved.selected_background_song -= 1;
            selected_item_changed = true;
        }
        if input.released.contains(Keys::RIGHT)
            && gs.saved.selected_background_song < MAX_BACKGROUND_SONGS - 1
        {
            gs.saved.selected_background_song += 1;
            selected_item_changed = true;
        }
        if gs.saved.selected_background_song != song_before {
            mixer.play_song(gs.saved.selected_background_song);
        }
    }

    if gs.selected_setup_item == SETUP_ITEM_SFX
        && input.released.intersects(Keys::LEFT | Keys::RIGHT)
    {
        gs.saved.sfx_enabled = !gs.saved.sfx_enabled;
    }

    if gs.selected_setup_item == SETUP_ITEM_PLAYERS {
        if input.released.contains(Keys::LEFT) && gs.saved.max_players > 1 {
            gs.saved.max_players -= 1;
            selected_item_changed = true;
            max_players_changed = true;
            if gs.saved.max_players == 1 {
                gs.saved.max_opponents = 3;
            }
        }
        if input.released.contains(Keys::RIGHT) && gs.saved.max_players < MAX_PLAYERS {
            gs.saved.max_players += 1;
            selected_item_changed = true;
            max_players_changed = true;
        }
    }

    if gs.selected_setup_item == SETUP_ITEM_OPPONENTS {
        if input.released.contains(Keys::LEFT) && gs.saved.max_opponents > 0 {
            gs.saved.max_opponents -= 1;
            selected_item_changed = true;
        }
        if input.released.contains(Keys::RIGHT) && gs.saved.max_opponents < MAX_PLAYERS - 1 {
            gs.saved.max_opponents += 1;
            selected_item_changed = true;
        }
    }

    let w = SCREEN_WIDTH;
    if state_changed {
        screen.print_text_color(1, 10, w, Color::Green, false, "Commander Counter!");
    }

    let cursor = |item: usize| if gs.selected_setup_item == item { '*' } else { ' ' };
    let redraw =
        |gs: &GameState, item: usize| state_changed || selected_item_changed || gs.selected_setup_item == item;
    let mut buf = TextBuf::new();

    if redraw(gs, SETUP_ITEM_QUICK_START_COMMANDER4P) {
        buf.clear();
        write!(buf, "{}Commander 4p", cursor(SETUP_ITEM_QUICK_START_COMMANDER4P)).ok();
        screen.print_text_color(2, 10, w, Color::White, false, buf.as_str());
    }
    if redraw(gs, SETUP_ITEM_QUICK_START_COMMANDER1P) {
        buf.clear();
        write!(
            buf,
            "{}Commander 1p (3 opponents)",
            cursor(SETUP_ITEM_QUICK_START_COMMANDER1P)
        )
        .ok();
        screen.print_text_color(3, 10, w, Color::White, false, buf.as_str());
    }
    if redraw(gs, SETUP_ITEM_QUICK_START_1V1) {
        buf.clear();
        write!(buf, "{}1v1", cursor(SETUP_ITEM_QUICK_START_1V1)).ok();
        screen.print_text_color(4, 10, w, Color::White, false, buf.as_str());
    }
    if redraw(gs, SETUP_ITEM_STARTING_LIFE) {
        buf.clear();
        write!(
            buf,
            "{}{} starting life",
            cursor(SETUP_ITEM_STARTING_LIFE),
            gs.saved.starting_life
        )
        .ok();
        screen.print_text_color(6, 10, w, Color::White, false, buf.as_str());
    }
    if redraw(gs, SETUP_ITEM_PLAYERS) {
        buf.clear();
        write!(buf, "{}{} players", cursor(SETUP_ITEM_PLAYERS), gs.saved.max_players).ok();
        screen.print_text_color(7, 10, w, Color::White, false, buf.as_str());
    }
    if redraw(gs, SETUP_ITEM_OPPONENTS) || max_players_changed {
        buf.clear();
        if gs.saved.max_players == 1 {
            write!(
                buf,
                "{}{} opponents (Commander).",
                cursor(SETUP_ITEM_OPPONENTS),
                gs.saved.max_opponents
            )
            .ok();
        }
        screen.print_text_color(8, 10, w, Color::White, false, buf.as_str());
    }
    if redraw(gs, SETUP_ITEM_SONG) {
        buf.clear();
        write!(
            buf,
            "{}Song: {}",
            cursor(SETUP_ITEM_SONG),
            song_name(gs.saved.selected_background_song)
        )
        .ok();
        screen.print_text_color(9, 10, w, Color::White, false, buf.as_str());
    }
    if redraw(gs, SETUP_ITEM_SFX) {
        buf.clear();
        write!(
            buf,
            "{}Sound effects: {}",
            cursor(SETUP_ITEM_SFX),
            if gs.saved.sfx_enabled { "Yes" } else { "No" }
        )
        .ok();
        screen.print_text_color(10, 10, w, Color::White, false, buf.as_str());
    }
    if redraw(gs, SETUP_ITEM_START) {
        buf.clear();
        write!(buf, "{}Start", cursor(SETUP_ITEM_START)).ok();
        screen.print_text_color(11, 10, w, Color::White, false, buf.as_str());
    }
    if redraw(gs, SETUP_ITEM_LOAD_SAVE) {
        buf.clear();
        write!(buf, "{}Load save", cursor(SETUP_ITEM_LOAD_SAVE)).ok();
        screen.print_text_color(13, 10, w, Color::White, false, buf.as_str());
    }
    if redraw(gs, SETUP_ITEM_LOAD_AUTOSAVE) {
        buf.clear();
        write!(buf, "{}Load autosave", cursor(SETUP_ITEM_LOAD_AUTOSAVE)).ok();
        screen.print_text_color(14, 10, w, Color::White, false, buf.as_str());
    }
    if redraw(gs, SETUP_ITEM_CONTROLS) {
        buf.clear();
        write!(buf, "{}Show controls.", cursor(SETUP_ITEM_CONTROLS)).ok();
        screen.print_text_color(16, 10, w, Color::White, false, buf.as_str());
    }

    gs.state
}
