//! Game state: the per-player counters, the saveable subset, and the
//! session-only bookkeeping around them.
//!
//! [`GameState`] is the single authoritative instance, owned by the frame
//! loop and handed mutably to exactly one state handler per tick. The
//! persistable part lives in [`SaveableGameState`] so persistence can
//! serialize one named sub-object instead of a byte prefix of the whole
//! thing.

use gba::keypad::Keys;

use crate::input::RepeatTimer;

/// Hard player-slot limit. Eight already makes for a very long game.
pub const MAX_PLAYERS: usize = 8;

/// Commander damage at which an opponent's entry renders red.
pub const MAX_COMMANDER_DAMAGE: i32 = 21;

/// Poison counters at which a player is dead.
pub const MAX_POISON_COUNTERS: i32 = 10;

/// Number of selectable background songs (the last is "no music").
pub const MAX_BACKGROUND_SONGS: usize = 3;

// Counter-selection cursor values. The low range (`0..max_opponents`)
// addresses commander-damage entries, so these ids must sit above every
// possible damage index.
pub const POISON_COUNTER: usize = MAX_PLAYERS + 1;
pub const ENERGY_COUNTER: usize = MAX_PLAYERS + 2;
pub const EXPERIENCE_COUNTER: usize = MAX_PLAYERS + 3;
pub const COMMANDERTAX_COUNTER: usize = MAX_PLAYERS + 4;
pub const FIRST_COUNTER: usize = POISON_COUNTER;
pub const LAST_COUNTER: usize = COMMANDERTAX_COUNTER;
pub const LAST_COUNTER_NO_COMMANDERTAX: usize = EXPERIENCE_COUNTER;

/// The four UI states.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum State {
    Setup,
    CountLife,
    Menu,
    Controls,
}

/// One player slot.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct PlayerState {
    /// Signed and unbounded; at or below zero the player is dead.
    pub life: i32,
    /// Damage received, indexed by opponent slot. Only the first
    /// `max_opponents` entries are meaningful.
    pub commander_damage: [i32; MAX_PLAYERS],
    pub poison: i32,
    pub energy: i32,
    pub experience: i32,
    /// Stored as tax/2; stepped by 2, never below 0.
    pub commander_tax: i32,
}

impl PlayerState {
    pub const fn new() -> Self {
        Self {
            life: 0,
            commander_damage: [0; MAX_PLAYERS],
            poison: 0,
            energy: 0,
            experience: 0,
            commander_tax: 0,
        }
    }

    pub fn reset(&mut self, starting_life: i32) {
        *self = Self::new();
        self.life = starting_life;
    }
}

/// The subset of game state written to cartridge SRAM.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SaveableGameState {
    pub max_players: usize,
    pub max_opponents: usize,
    pub starting_life: i32,
    pub upside_down_numbers: bool,
    pub selected_background_song: usize,
    pub sfx_enabled: bool,
    pub players: [PlayerState; MAX_PLAYERS],
}

/// The whole game state: the saveable subset plus session-only fields.
pub struct GameState {
    pub saved: SaveableGameState,

    pub state: State,
    pub previous_state: Option<State>,
    /// Where the Controls screen goes back to.
    pub state_to_return_to: Option<State>,

    /// Buttons currently held, maintained from the per-frame edge masks.
    pub keys_down: Keys,
    pub repeat_increase: RepeatTimer,
    pub repeat_decrease: RepeatTimer,

    pub selected_player: usize,
    pub selected_menu_item: usize,
    pub selected_setup_item: usize,
    /// Cursor over `0..max_opponents` (commander damage) and
    /// `FIRST_COUNTER..=last_counter` (the auxiliary counters).
    pub selected_counter: usize,
    /// Upper end of the cursor range; drops the commander-tax id when
    /// there are no opponents.
    pub last_counter: usize,

    /// Frames until the autosave fires; 0 means disarmed.
    pub autosave_in: u32,
    /// Whether the last full draw used the regular row layout.
    pub printed_regular: bool,
    /// Accumulated life delta shown next to the total.
    pub life_changed: i32,
    /// Frames until the delta indicator is wiped; 0 means not showing.
    pub clear_life_changed_in: u32,
}

impl GameState {
    /// Fresh boot state: Setup screen, 4 players, 40 life.
    pub fn new() -> Self {
        let mut gs = Self {
            saved: SaveableGameState {
                max_players: 4,
                max_opponents: 1,
                starting_life: 40,
                upside_down_numbers: false,
                selected_background_song: 0,
                sfx_enabled: true,
                players: [PlayerState::new(); MAX_PLAYERS],
            },
            state: State::Setup,
            previous_state: None,
            state_to_return_to: None,
            keys_down: Keys::empty(),
            repeat_increase: RepeatTimer::new(),
            repeat_decrease: RepeatTimer::new(),
            selected_player: 0,
            selected_menu_item: 0,
            selected_setup_item: 0,
            selected_counter: 0,
            last_counter: LAST_COUNTER,
            autosave_in: 0,
            printed_regular: false,
            life_changed: 0,
            clear_life_changed_in: 0,
        };
        gs.init_life_and_counters();
        gs
    }

    /// Full reset (the Quit paths). Keeps the selected background song so
    /// the playing track doesn't restart on the way out.
    pub fn reset(&mut self) {
        let song = self.saved.selected_background_song;
        *self = Self::new();
        self.saved.selected_background_song = song;
    }

    /// Reset every player to the configured starting life with zeroed
    /// counters, and recompute the counter-cursor range.
    pub fn init_life_and_counters(&mut self) {
        let starting_life = self.saved.starting_life;
        for player in self.saved.players.iter_mut() {
            player.reset(starting_life);
        }
        self.last_counter = last_counter_for(self.saved.max_opponents);
    }

    /// Reset the session-only fields after a load: straight into counting,
    /// cursors and timers back to their fresh defaults. The saveable
    /// fields (including the song) are left exactly as loaded.
    pub fn reset_session(&mut self) {
        self.state = State::CountLife;
        self.previous_state = None;
        self.state_to_return_to = None;
        self.keys_down = Keys::empty();
        self.repeat_increase.reset();
        self.repeat_decrease.reset();
        self.selected_player = 0;
        self.selected_menu_item = 0;
        self.selected_setup_item = 0;
        self.last_counter = last_counter_for(self.saved.max_opponents);
        // With no opponents the damage range is empty, the cursor has to
        // start on the counters instead.
        self.selected_counter = if self.saved.max_opponents == 0 {
            FIRST_COUNTER
        } else {
            0
        };
        self.autosave_in = 0;
        self.printed_regular = false;
        self.life_changed = 0;
        self.clear_life_changed_in = 0;
    }

    /// Advance the counter-selection cursor: through the damage entries,
    /// then wrapping into the auxiliary counters, stopping at the top.
    pub fn select_next_counter(&mut self) -> bool {
        let max_opp = self.saved.max_opponents;
        if self.selected_counter + 1 < max_opp {
            self.selected_counter += 1;
            true
        } else if max_opp > 0 && self.selected_counter == max_opp - 1 {
            self.selected_counter = FIRST_COUNTER;
            true
        } else if self.selected_counter < self.last_counter {
            self.selected_counter += 1;
            true
        } else {
            false
        }
    }

    /// The reverse walk: back through the counters, then wrapping onto the
    /// last damage entry, stopping at the first.
    pub fn select_prev_counter(&mut self) -> bool {
        let max_opp = self.saved.max_opponents;
        if self.selected_counter == FIRST_COUNTER && max_opp > 0 {
            self.selected_counter = max_opp - 1;
            true
        } else if self.selected_counter > 0 && self.selected_counter < FIRST_COUNTER {
            self.selected_counter -= 1;
            true
        } else if self.selected_counter > FIRST_COUNTER {
            self.selected_counter -= 1;
            true
        } else {
            false
        }
    }
}

/// Top of the counter-cursor range for a given opponent count. Commander
/// tax only makes sense when commanders are in the game.
pub fn last_counter_for(max_opponents: usize) -> usize {
    if max_opponents == 0 {
        LAST_COUNTER_NO_COMMANDERTAX
    } else {
        LAST_COUNTER
    }
}
