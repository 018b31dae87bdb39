//! The controls help screen. Draws once on entry, leaves on any button.

use gba::display::SCREEN_WIDTH;

use crate::input::InputEvents;
use crate::screen::{Color, Screen};
use crate::state::{GameState, State};

pub fn handle<S: Screen>(gs: &mut GameState, input: InputEvents, screen: &mut S) -> State {
    let state_changed = gs.previous_state != Some(gs.state);

    // Any button leaves.
    if !input.released.is_empty() {
        screen.clear();
        return gs.state_to_return_to.unwrap_or(State::Setup);
    }

    if state_changed {
        let w = SCREEN_WIDTH;
        screen.print_text_color(1, 10, w, Color::Green, false, "Controls:");
        screen.print_text_color(2, 10, w, Color::White, false, "SELECT to select player.");
        screen.print_text_color(3, 10, w, Color::White, false, "U/D to change life.");
        screen.print_text_color(4, 10, w, Color::White, false, "SL,SR to select counter.");
        screen.print_text_color(5, 10, w, Color::White, false, "L/R to change counter.");
        screen.print_text_color(6, 10, w, Color::White, false, "START to enter menu.");
        screen.print_text_color(8, 10, w, Color::White, false, "Colored numbers near the");
        screen.print_text_color(9, 10, w, Color::White, false, "life total indicate the");
        screen.print_text_color(10, 10, w, Color::White, false, "Commander Damage or:");
        screen.print_text_color(11, 10, w, Color::White, false, "P = Poison");
        screen.print_text_color(12, 10, w, Color::White, false, "E = Energy");
        screen.print_text_color(13, 10, w, Color::White, false, "X = Experience");
        screen.print_text_color(14, 10, w, Color::White, false, "C = Commander Tax");
        screen.print_text_color(15, 10, w, Color::White, false, "A dot(.) indicates the");
        screen.print_text_color(16, 10, w, Color::White, false, "current selection.");
        screen.print_text_color(18, 10, w, Color::White, false, "Press any button to leave");
        screen.print_text_color(19, 10, w, Color::White, false, "this menu.");
    }

    gs.state
}
