//! The life-counting screen — the state the game lives in.
//!
//! Per frame: apply the selection and counter edits for this frame's
//! button edges, decide which audio cue (if any) the change earns, then
//! redraw as little as the change allows. Two frame-counter timers ride
//! along: the life-delta indicator fade and the autosave countdown.

use core::fmt::Write;
use core::mem;

use bitflags::bitflags;
use gba::display::SCREEN_WIDTH;
use gba::keypad::Keys;

use crate::audio::{Cue, Mixer};
use crate::hud;
use crate::input::InputEvents;
use crate::layout;
use crate::save::{self, SlotStore, AUTOSAVE_SLOT};
use crate::screen::{Color, Screen, TextBuf};
use crate::state::{
    GameState, State, COMMANDERTAX_COUNTER, ENERGY_COUNTER, EXPERIENCE_COUNTER, FIRST_COUNTER,
    MAX_POISON_COUNTERS, POISON_COUNTER,
};
use crate::{FPS, TIME_AUTO_SAVE, TIME_CLEAR_LIFE_CHANGED};

bitflags! {
    /// What this frame touched; drives the cue choice and the redraw set.
    #[derive(Copy, Clone, PartialEq, Eq)]
    struct Changed: u16 {
        const LIFE              = 1 << 0;
        const DAMAGE_OR_COUNTER = 1 << 1;
        const SELECTED_COUNTER  = 1 << 2;
        const SELECTED_PLAYER   = 1 << 3;
        const POISON            = 1 << 4;
        const ENERGY            = 1 << 5;
        const EXPERIENCE        = 1 << 6;
        const TAX               = 1 << 7;
    }
}

impl Changed {
    /// Anything that alters what a counter row shows.
    const COUNTER_ROWS: Changed = Changed::DAMAGE_OR_COUNTER
        .union(Changed::SELECTED_COUNTER)
        .union(Changed::POISON)
        .union(Changed::ENERGY)
        .union(Changed::EXPERIENCE)
        .union(Changed::TAX);
}

pub fn handle<S: Screen, M: Mixer, P: SlotStore>(
    gs: &mut GameState,
    input: InputEvents,
    screen: &mut S,
    mixer: &mut M,
    store: &mut P,
) -> State {
    let state_changed = gs.previous_state != Some(gs.state);
    // The entry frame repaints everything, so it starts with every change
    // bit set; the cue logic gates on !state_changed instead.
    let mut ch = if state_changed { Changed::all() } else { Changed::empty() };
    let mut changed = state_changed;
    let mut skip_life_changed = false;
    let mut poison_before = 0;

    // Default bindings; all six swap while the player's numbers are
    // actually drawn upside-down (never while the magnitude fallback has
    // the regular rows up, those always read normally).
    let mut key_next_selection = Keys::R;
    let mut key_prev_selection = Keys::L;
    let mut key_increase_counter = Keys::RIGHT;
    let mut key_decrease_counter = Keys::LEFT;
    let mut key_increase_life = Keys::UP;
    let mut key_decrease_life = Keys::DOWN;
    if gs.saved.upside_down_numbers
        && gs.selected_player < 2
        && !layout::needs_regular(&gs.saved)
    {
        mem::swap(&mut key_next_selection, &mut key_prev_selection);
        mem::swap(&mut key_increase_counter, &mut key_decrease_counter);
        mem::swap(&mut key_increase_life, &mut key_decrease_life);
    }

    if input.released.contains(Keys::START) {
        screen.clear();
        gs.selected_menu_item = 0;
        return State::Menu;
    }

    let selected_player_before = gs.selected_player;

    gs.keys_down |= input.pressed;
    gs.keys_down &= !input.released;

    if input.released.contains(key_next_selection) && gs.select_next_counter() {
        changed = true;
        ch |= Changed::SELECTED_COUNTER;
    }

    if input.released.contains(key_prev_selection) && gs.select_prev_counter() {
        changed = true;
        ch |= Changed::SELECTED_COUNTER;
    }

    if input.released.contains(Keys::SELECT) {
        gs.selected_player += 1;
        if gs.selected_player >= gs.saved.max_players {
            gs.selected_player = 0;
        }
    }

    let life_before = gs.saved.players[gs.selected_player].life;

    // Held direction buttons step by 5 every quarter second.
    if gs.repeat_increase.tick(gs.keys_down.contains(key_increase_life)) {
        gs.saved.players[gs.selected_player].life += 5;
        gs.life_changed += 5;
        gs.clear_life_changed_in = TIME_CLEAR_LIFE_CHANGED;
        ch |= Changed::LIFE;
    }
    if gs.repeat_decrease.tick(gs.keys_down.contains(key_decrease_life)) {
        gs.saved.players[gs.selected_player].life -= 5;
        gs.life_changed -= 5;
        gs.clear_life_changed_in = TIME_CLEAR_LIFE_CHANGED;
        ch |= Changed::LIFE;
    }

    // Release edges step by 1.
    if input.released.contains(key_increase_life) {
        gs.saved.players[gs.selected_player].life += 1;
        gs.life_changed += 1;
        gs.clear_life_changed_in = TIME_CLEAR_LIFE_CHANGED;
        ch |= Changed::LIFE;
    }
    if input.released.contains(key_decrease_life) {
        gs.saved.players[gs.selected_player].life -= 1;
        gs.life_changed -= 1;
        gs.clear_life_changed_in = TIME_CLEAR_LIFE_CHANGED;
        ch |= Changed::LIFE;
    }

    if gs.selected_counter < FIRST_COUNTER {
        // A commander-damage entry is selected: edits move the damage and
        // the life total in lockstep. The delta indicator stays out of it,
        // a compound life+damage number would be misleading.
        let slot = gs.selected_counter;
        if input.released.contains(key_decrease_counter) {
            let p = &mut gs.saved.players[gs.selected_player];
            if p.commander_damage[slot] > 0 {
                p.commander_damage[slot] -= 1;
                p.life += 1;
                ch |= Changed::DAMAGE_OR_COUNTER;
                changed = true;
            }
        }
        if input.released.contains(key_increase_counter) {
            let p = &mut gs.saved.players[gs.selected_player];
            p.commander_damage[slot] += 1;
            p.life -= 1;
            ch |= Changed::DAMAGE_OR_COUNTER;
            changed = true;
        }
    } else {
        if input.released.contains(key_decrease_counter) {
            let p = &mut gs.saved.players[gs.selected_player];
            match gs.selected_counter {
                POISON_COUNTER => {
                    if p.poison > 0 {
                        poison_before = p.poison;
                        p.poison -= 1;
                        ch |= Changed::POISON;
                    }
                }
                ENERGY_COUNTER => {
                    if p.energy > 0 {
                        p.energy -= 1;
                        ch |= Changed::ENERGY;
                    }
                }
                EXPERIENCE_COUNTER => {
                    if p.experience > 0 {
                        p.experience -= 1;
                        ch |= Changed::EXPERIENCE;
                    }
                }
                COMMANDERTAX_COUNTER => {
                    if p.commander_tax > 0 {
                        p.commander_tax -= 2;
                        ch |= Changed::TAX;
                    }
                }
                // Unreachable while the cursor invariants hold.
                _ => screen.print_text_color(12, 10, SCREEN_WIDTH, Color::Red, false, "UNKNOWN COUNTER"),
            }
            ch |= Changed::DAMAGE_OR_COUNTER;
            changed = true;
        }
        if input.released.contains(key_increase_counter) {
            let p = &mut gs.saved.players[gs.selected_player];
            match gs.selected_counter {
                POISON_COUNTER => {
                    poison_before = p.poison;
                    p.poison += 1;
                    ch |= Changed::POISON;
                }
                ENERGY_COUNTER => {
                    p.energy += 1;
                    ch |= Changed::ENERGY;
                }
                EXPERIENCE_COUNTER => {
                    p.experience += 1;
                    ch |= Changed::EXPERIENCE;
                }
                COMMANDERTAX_COUNTER => {
                    p.commander_tax += 2;
                    ch |= Changed::TAX;
                }
                _ => screen.print_text_color(12, 10, SCREEN_WIDTH, Color::Red, false, "UNKNOWN COUNTER"),
            }
            ch |= Changed::DAMAGE_OR_COUNTER;
            changed = true;
        }
    }

    // One cue per frame, first match wins: life-total cues beat counter
    // cues, and a pure player-selection change makes no sound at all.
    // Commander tax has no cue.
    let life_now = gs.saved.players[gs.selected_player].life;
    if selected_player_before != gs.selected_player {
        changed = true;
        ch |= Changed::SELECTED_PLAYER;
        skip_life_changed = true;
        // Drop the old player's delta right away, no fade.
        gs.clear_life_changed_in = 1;
        gs.life_changed = 0;
    } else if life_before != life_now {
        changed = true;
        if gs.saved.sfx_enabled {
            if life_before > 0 && life_now <= 0 {
                mixer.play_cue(Cue::Death);
            } else if life_before < life_now {
                mixer.play_cue(Cue::Ding);
            } else if life_now > 0 {
                mixer.play_cue(Cue::Hit);
            }
        }
    } else if ch.contains(Changed::POISON) && !state_changed {
        if gs.saved.sfx_enabled {
            let poison_now = gs.saved.players[gs.selected_player].poison;
            if poison_now >= MAX_POISON_COUNTERS && poison_before < MAX_POISON_COUNTERS {
                mixer.play_cue(Cue::Death);
            } else {
                mixer.play_cue(Cue::Poison);
            }
        }
    } else if ch.contains(Changed::ENERGY) && !state_changed {
        if gs.saved.sfx_enabled {
            mixer.play_cue(Cue::Energy);
        }
    } else if ch.contains(Changed::EXPERIENCE) && !state_changed {
        if gs.saved.sfx_enabled {
            mixer.play_cue(Cue::Experience);
        }
    }

    if changed {
        if gs.saved.max_players == 1 {
            if layout::player_needs_regular(&gs.saved.players[0]) {
                if !gs.printed_regular {
                    screen.clear();
                }
                gs.printed_regular = true;
                hud::print_life_regular(screen, gs, 0);
            } else {
                // Coming back from the regular fallback, or from a
                // negative total (the sign cell doesn't self-erase),
                // needs the full wipe.
                let mut screen_cleared = false;
                if gs.printed_regular || (life_before < 0 && gs.saved.players[0].life >= 0) {
                    screen.clear();
                    screen_cleared = true;
                }
                gs.printed_regular = false;
                hud::print_life_huge(screen, gs, screen_cleared || ch.intersects(Changed::COUNTER_ROWS));
            }
        } else if gs.saved.max_players <= 4 {
            let print_regular = layout::needs_regular(&gs.saved);
            let mut screen_cleared = false;
            if gs.printed_regular != print_regular {
                screen.clear();
                screen_cleared = true;
            }
            gs.printed_regular = print_regular;

            for i in 0..gs.saved.max_players {
                // Usually only the selected player moved; repaint just
                // them unless the whole screen is fresh or the selection
                // hopped.
                if !ch.contains(Changed::SELECTED_PLAYER) && !screen_cleared && i != gs.selected_player {
                    continue;
                }
                if print_regular {
                    hud::print_life_regular(screen, gs, i);
                } else {
                    let mirrored = i < 2 && gs.saved.upside_down_numbers;
                    hud::print_life_large(screen, gs, i, mirrored);
                }
            }
        } else {
            if ch.contains(Changed::SELECTED_PLAYER) && !state_changed {
                hud::print_life_regular(screen, gs, selected_player_before);
                hud::print_life_regular(screen, gs, gs.selected_player);
            } else if state_changed {
                for i in 0..gs.saved.max_players {
                    hud::print_life_regular(screen, gs, i);
                }
            } else if ch.intersects(Changed::LIFE | Changed::COUNTER_ROWS) {
                hud::print_life_regular(screen, gs, gs.selected_player);
            }
            gs.printed_regular = true;
        }

        if !skip_life_changed && gs.clear_life_changed_in > 0 {
            hud::print_life_changed(screen, gs, false);
        }

        // Counter edits rearm the autosave; entering the state doesn't.
        if !state_changed && ch.intersects(Changed::LIFE | Changed::DAMAGE_OR_COUNTER) {
            gs.autosave_in = TIME_AUTO_SAVE;
        }
    }

    if gs.clear_life_changed_in > 0 {
        gs.clear_life_changed_in -= 1;
        if gs.clear_life_changed_in == 0 {
            gs.life_changed = 0;
            hud::print_life_changed(screen, gs, true);
        }
    }

    if gs.autosave_in > 0 {
        gs.autosave_in -= 1;
        if gs.autosave_in == 0 {
            save::save(store, AUTOSAVE_SLOT, &gs.saved);
            screen.print_text_color(19, 10, SCREEN_WIDTH, Color::White, false, "Saved!");
        } else if gs.autosave_in % FPS == 0 {
            let mut buf = TextBuf::new();
            write!(buf, "Saving in {} seconds.", gs.autosave_in / FPS + 1).ok();
            screen.print_text_color(19, 10, SCREEN_WIDTH, Color::White, false, buf.as_str());
        }
    }

    gs.state
}
