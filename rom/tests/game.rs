//! Whole-frame scenario tests: drive the dispatcher with synthetic button
//! edges and observe the facades.

use gba::keypad::Keys;

use lifecounter::audio::{Cue, Mixer};
use lifecounter::input::InputEvents;
use lifecounter::save::{self, SlotStore, AUTOSAVE_SLOT, MANUAL_SLOT, REGION_SIZE};
use lifecounter::screen::{Color, Screen};
use lifecounter::state::{
    GameState, State, COMMANDERTAX_COUNTER, EXPERIENCE_COUNTER, FIRST_COUNTER, POISON_COUNTER,
};
use lifecounter::states;
use lifecounter::{TIME_AUTO_SAVE, TIME_CLEAR_LIFE_CHANGED};

#[derive(Default)]
struct MockScreen {
    clears: usize,
    texts: Vec<(i32, String)>,
    large: Vec<(i32, i32, i32, bool)>,
    huge: Vec<i32>,
}

impl MockScreen {
    fn contains(&self, needle: &str) -> bool {
        self.texts.iter().any(|(_, t)| t.contains(needle))
    }

    fn forget(&mut self) {
        self.texts.clear();
        self.large.clear();
        self.huge.clear();
    }
}

impl Screen for MockScreen {
    fn print_text(&mut self, row: i32, _column: i32, _fill_width: i32, _mirrored: bool, text: &str) {
        self.texts.push((row, text.to_string()));
    }

    fn print_text_color(
        &mut self,
        row: i32,
        column: i32,
        fill_width: i32,
        _color: Color,
        mirrored: bool,
        text: &str,
    ) {
        self.print_text(row, column, fill_width, mirrored, text);
    }

    fn print_large_number(
        &mut self,
        x: i32,
        y: i32,
        value: i32,
        _color: Color,
        _mirrored: bool,
        with_dot: bool,
    ) {
        self.large.push((x, y, value, with_dot));
    }

    fn print_huge_number(&mut self, value: i32) {
        self.huge.push(value);
    }

    fn clear(&mut self) {
        self.clears += 1;
    }
}

#[derive(Default)]
struct MockMixer {
    cues: Vec<Cue>,
    songs: Vec<usize>,
}

impl Mixer for MockMixer {
    fn play_cue(&mut self, cue: Cue) {
        self.cues.push(cue);
    }

    fn play_song(&mut self, song: usize) {
        self.songs.push(song);
    }
}

struct RamStore([u8; REGION_SIZE]);

impl SlotStore for RamStore {
    fn read_byte(&self, offset: usize) -> u8 {
        self.0[offset]
    }

    fn write_byte(&mut self, offset: usize, value: u8) {
        self.0[offset] = value;
    }
}

struct Rig {
    gs: GameState,
    screen: MockScreen,
    mixer: MockMixer,
    store: RamStore,
}

fn press(keys: Keys) -> InputEvents {
    InputEvents::new(keys, Keys::empty())
}

fn release(keys: Keys) -> InputEvents {
    InputEvents::new(Keys::empty(), keys)
}

impl Rig {
    fn new() -> Self {
        Self {
            gs: GameState::new(),
            screen: MockScreen::default(),
            mixer: MockMixer::default(),
            store: RamStore([0; REGION_SIZE]),
        }
    }

    fn frame(&mut self, input: InputEvents) {
        states::tick(&mut self.gs, input, &mut self.screen, &mut self.mixer, &mut self.store);
    }

    fn idle(&mut self, frames: u32) {
        for _ in 0..frames {
            self.frame(InputEvents::none());
        }
    }

    /// Press one frame, release the next — how a human taps a button.
    fn tap(&mut self, keys: Keys) {
        self.frame(press(keys));
        self.frame(release(keys));
    }

    fn taps(&mut self, keys: Keys, count: usize) {
        for _ in 0..count {
            self.tap(keys);
        }
    }

    /// Confirm the Commander 4p quick start and land in CountLife.
    fn start_commander_4p(&mut self) {
        self.idle(1);
        self.tap(Keys::A);
        assert_eq!(self.gs.state, State::CountLife);
        self.idle(1); // entry frame, full repaint
    }
}

#[test]
fn quick_start_commander_4p() {
    let mut rig = Rig::new();
    rig.start_commander_4p();
    assert_eq!(rig.gs.saved.max_players, 4);
    assert_eq!(rig.gs.saved.max_opponents, 3);
    assert!(rig.gs.saved.players[..4].iter().all(|p| p.life == 40));
    // The transition wiped the setup screen and the entry frame drew all
    // four quadrants.
    assert!(rig.screen.clears >= 1);
    assert_eq!(rig.screen.large.len(), 4);
}

#[test]
fn six_decrements_show_minus_six_then_fade() {
    let mut rig = Rig::new();
    rig.start_commander_4p();
    rig.taps(Keys::DOWN, 6);

    assert_eq!(rig.gs.saved.players[0].life, 34);
    assert_eq!(rig.gs.life_changed, -6);
    assert!(rig.screen.contains("-6"));
    // Life lost but the player lives: six hit cues, nothing else.
    assert_eq!(rig.mixer.cues, vec![Cue::Hit; 6]);

    // The indicator survives until its countdown runs dry, then a blank
    // overwrite takes it out.
    rig.screen.forget();
    rig.idle(TIME_CLEAR_LIFE_CHANGED);
    assert_eq!(rig.gs.life_changed, 0);
    assert_eq!(rig.gs.clear_life_changed_in, 0);
    assert!(rig.screen.contains("     "));
}

#[test]
fn holding_increase_repeats_in_steps_of_five() {
    let mut rig = Rig::new();
    rig.start_commander_4p();

    rig.frame(press(Keys::UP));
    rig.idle(14);
    // A quarter second of hold: one +5, not +1 per frame.
    assert_eq!(rig.gs.saved.players[0].life, 45);
    rig.idle(15);
    assert_eq!(rig.gs.saved.players[0].life, 50);
    // The release edge still counts its +1.
    rig.frame(release(Keys::UP));
    assert_eq!(rig.gs.saved.players[0].life, 51);
    assert_eq!(rig.gs.life_changed, 11);
}

#[test]
fn life_cues_rank_death_over_ding_and_hit() {
    let mut rig = Rig::new();
    rig.start_commander_4p();
    rig.gs.saved.players[0].life = 1;

    rig.tap(Keys::DOWN);
    assert_eq!(rig.gs.saved.players[0].life, 0);
    assert_eq!(rig.mixer.cues.last(), Some(&Cue::Death));

    rig.tap(Keys::DOWN);
    // Already dead: a further decrement is not a death crossing, and with
    // life below zero it isn't a hit either.
    assert_eq!(rig.mixer.cues, vec![Cue::Death]);

    rig.tap(Keys::UP);
    assert_eq!(rig.mixer.cues.last(), Some(&Cue::Ding));
}

#[test]
fn tenth_poison_counter_is_lethal() {
    let mut rig = Rig::new();
    rig.start_commander_4p();
    // Cycle the cursor past the three damage slots onto poison.
    rig.taps(Keys::R, 3);
    assert_eq!(rig.gs.selected_counter, POISON_COUNTER);

    rig.taps(Keys::RIGHT, 10);
    assert_eq!(rig.gs.saved.players[0].poison, 10);
    let poison_cues = rig.mixer.cues.iter().filter(|c| **c == Cue::Poison).count();
    assert_eq!(poison_cues, 9);
    assert_eq!(rig.mixer.cues.last(), Some(&Cue::Death));

    // Counters never go below zero.
    rig.taps(Keys::LEFT, 12);
    assert_eq!(rig.gs.saved.players[0].poison, 0);
}

#[test]
fn commander_tax_steps_by_two_silently_and_stops_at_zero() {
    let mut rig = Rig::new();
    rig.start_commander_4p();
    rig.taps(Keys::R, 6);
    assert_eq!(rig.gs.selected_counter, COMMANDERTAX_COUNTER);

    rig.taps(Keys::RIGHT, 2);
    assert_eq!(rig.gs.saved.players[0].commander_tax, 4);
    // Tax edits never touch life and have no cue assigned.
    assert_eq!(rig.gs.saved.players[0].life, 40);
    assert!(rig.mixer.cues.is_empty());

    rig.taps(Keys::LEFT, 3);
    assert_eq!(rig.gs.saved.players[0].commander_tax, 0);
}

#[test]
fn commander_damage_and_life_move_in_lockstep() {
    let mut rig = Rig::new();
    rig.start_commander_4p();
    assert_eq!(rig.gs.selected_counter, 0);

    rig.taps(Keys::RIGHT, 3);
    assert_eq!(rig.gs.saved.players[0].commander_damage[0], 3);
    assert_eq!(rig.gs.saved.players[0].life, 37);
    // Paired edits leave the delta indicator alone.
    assert_eq!(rig.gs.life_changed, 0);
    assert_eq!(rig.mixer.cues, vec![Cue::Hit; 3]);

    // Backing damage out restores the life, and clamps at zero.
    rig.taps(Keys::LEFT, 4);
    assert_eq!(rig.gs.saved.players[0].commander_damage[0], 0);
    assert_eq!(rig.gs.saved.players[0].life, 40);
}

#[test]
fn autosave_counts_down_then_writes_the_autosave_slot() {
    let mut rig = Rig::new();
    rig.start_commander_4p();
    rig.tap(Keys::DOWN);
    assert_eq!(rig.gs.autosave_in, TIME_AUTO_SAVE - 1);
    assert!(!save::slot_is_valid(&rig.store, AUTOSAVE_SLOT));

    rig.idle(TIME_AUTO_SAVE);
    assert!(rig.screen.contains("Saving in"));
    assert!(rig.screen.contains("Saved!"));
    assert!(save::slot_is_valid(&rig.store, AUTOSAVE_SLOT));
    assert!(!save::slot_is_valid(&rig.store, MANUAL_SLOT));

    let loaded = save::load(&rig.store, AUTOSAVE_SLOT).unwrap();
    assert_eq!(loaded.players[0].life, 39);
}

#[test]
fn save_survives_a_power_cycle_and_slot_1_stays_empty() {
    let mut rig = Rig::new();
    rig.start_commander_4p();
    rig.taps(Keys::DOWN, 2);
    rig.tap(Keys::START);
    assert_eq!(rig.gs.state, State::Menu);
    // Menu cursor rests on Save.
    rig.tap(Keys::A);
    assert_eq!(rig.gs.state, State::CountLife);
    assert!(save::slot_is_valid(&rig.store, MANUAL_SLOT));

    // Power cycle: fresh state, same storage.
    rig.gs = GameState::new();
    rig.idle(1);
    // Walk down to "Load save" (the opponents row is skipped in
    // multiplayer) and confirm.
    rig.taps(Keys::DOWN, 8);
    rig.tap(Keys::A);
    assert_eq!(rig.gs.state, State::CountLife);
    assert_eq!(rig.gs.saved.players[0].life, 38);
    assert_eq!(rig.gs.selected_player, 0);
    // The loaded song starts playing again.
    assert_eq!(rig.mixer.songs.last(), Some(&0));

    // An untouched autosave slot refuses to load.
    rig.gs = GameState::new();
    rig.idle(1);
    rig.taps(Keys::DOWN, 9);
    rig.tap(Keys::A);
    assert_eq!(rig.gs.state, State::Setup);
    assert!(rig.screen.contains("NO SAVE FOUND"));
}

#[test]
fn one_v_one_has_no_commander_tax_stop() {
    let mut rig = Rig::new();
    rig.idle(1);
    rig.taps(Keys::DOWN, 2);
    rig.tap(Keys::A);
    assert_eq!(rig.gs.state, State::CountLife);
    assert_eq!(rig.gs.saved.max_players, 2);
    assert_eq!(rig.gs.saved.max_opponents, 0);
    assert_eq!(rig.gs.saved.players[0].life, 20);
    assert_eq!(rig.gs.selected_counter, FIRST_COUNTER);
    assert_eq!(rig.gs.last_counter, EXPERIENCE_COUNTER);

    // Two steps reach experience; a third finds nothing past it.
    rig.taps(Keys::R, 3);
    assert_eq!(rig.gs.selected_counter, EXPERIENCE_COUNTER);
}

#[test]
fn controls_screen_returns_where_it_came_from() {
    let mut rig = Rig::new();
    rig.idle(1);
    rig.taps(Keys::DOWN, 10);
    rig.tap(Keys::A);
    assert_eq!(rig.gs.state, State::Controls);
    rig.idle(1);
    assert!(rig.screen.contains("Controls:"));
    rig.frame(release(Keys::B));
    assert_eq!(rig.gs.state, State::Setup);

    // Same screen reached from the menu goes back to the menu.
    rig.gs = GameState::new();
    rig.start_commander_4p();
    rig.tap(Keys::START);
    rig.taps(Keys::DOWN, 6);
    rig.tap(Keys::A);
    assert_eq!(rig.gs.state, State::Controls);
    rig.frame(release(Keys::A));
    assert_eq!(rig.gs.state, State::Menu);
}

#[test]
fn menu_skips_flip_outside_three_and_four_players() {
    let mut rig = Rig::new();
    rig.idle(1);
    rig.taps(Keys::DOWN, 2);
    rig.tap(Keys::A); // 1v1: two players
    rig.tap(Keys::START);
    assert_eq!(rig.gs.state, State::Menu);

    rig.taps(Keys::DOWN, 3);
    // Save -> Save and Quit -> Return -> (flip skipped) -> Song.
    assert_eq!(rig.gs.selected_menu_item, 4);
    rig.tap(Keys::UP);
    assert_eq!(rig.gs.selected_menu_item, 2);
}

#[test]
fn flip_swaps_the_top_players_controls_only_while_drawn_large() {
    let mut rig = Rig::new();
    rig.start_commander_4p();
    rig.tap(Keys::START);
    rig.taps(Keys::DOWN, 3);
    rig.tap(Keys::A); // flip top numbers
    assert!(rig.gs.saved.upside_down_numbers);
    assert_eq!(rig.gs.state, State::CountLife);
    rig.idle(1);

    // Player 0 reads upside-down: UP now means "lose life".
    rig.tap(Keys::UP);
    assert_eq!(rig.gs.saved.players[0].life, 39);

    // Once any player's total forces the regular rows, the glyphs are
    // right-side-up and the default bindings come back.
    rig.gs.saved.players[1].life = 2000;
    rig.tap(Keys::UP);
    assert_eq!(rig.gs.saved.players[0].life, 40);
}

#[test]
fn quit_resets_everything_but_the_song() {
    let mut rig = Rig::new();
    rig.idle(1);
    // Pick a different song in setup, then start.
    rig.taps(Keys::DOWN, 5);
    rig.tap(Keys::RIGHT);
    assert_eq!(rig.mixer.songs.last(), Some(&1));
    rig.taps(Keys::UP, 5);
    rig.tap(Keys::A);
    assert_eq!(rig.gs.state, State::CountLife);

    rig.taps(Keys::DOWN, 4);
    rig.tap(Keys::START);
    rig.taps(Keys::DOWN, 7);
    rig.tap(Keys::A); // Quit
    assert_eq!(rig.gs.state, State::Setup);
    assert_eq!(rig.gs.saved.players[0].life, 40);
    assert_eq!(rig.gs.saved.selected_background_song, 1);
}

#[test]
fn huge_layout_falls_back_to_rows_on_big_totals() {
    let mut rig = Rig::new();
    rig.idle(1);
    rig.tap(Keys::DOWN);
    rig.tap(Keys::A); // Commander 1p
    assert_eq!(rig.gs.saved.max_players, 1);
    rig.idle(1);
    assert!(!rig.screen.huge.is_empty());
    assert!(!rig.gs.printed_regular);

    // Push past the three-digit glyphs.
    rig.gs.saved.players[0].life = 999;
    rig.screen.forget();
    rig.tap(Keys::UP);
    assert_eq!(rig.gs.saved.players[0].life, 1000);
    assert!(rig.gs.printed_regular);
    assert!(rig.screen.huge.is_empty());
    assert!(rig.screen.contains("Player 0: 1000"));

    // And back again once it fits.
    rig.tap(Keys::DOWN);
    assert!(!rig.gs.printed_regular);
}
