//! The per-frame state dispatcher.
//!
//! One handler per UI state, each taking the game state and this frame's
//! input edges and returning the next state. A handler that changes the
//! visible screen clears it before returning; the next state sees the
//! transition through `previous_state` and repaints itself in full on its
//! first frame.

pub mod controls;
pub mod count_life;
pub mod menu;
pub mod setup;

use crate::audio::Mixer;
use crate::input::InputEvents;
use crate::save::SlotStore;
use crate::screen::Screen;
use crate::state::{GameState, State};

/// Run one frame: dispatch to the current state's handler and record the
/// state we were in so the next frame can detect the transition.
pub fn tick<S: Screen, M: Mixer, P: SlotStore>(
    gs: &mut GameState,
    input: InputEvents,
    screen: &mut S,
    mixer: &mut M,
    store: &mut P,
) {
    let previous = gs.state;
    let next = match gs.state {
        State::Setup => setup::handle(gs, input, screen, mixer, store),
        State::CountLife => count_life::handle(gs, input, screen, mixer, store),
        State::Menu => menu::handle(gs, input, screen, mixer, store),
        State::Controls => controls::handle(gs, input, screen),
    };
    if next != previous {
        log::debug!("state {:?} -> {:?}", previous, next);
    }
    gs.state = next;
    gs.previous_state = Some(previous);
}
