//! Save-slot persistence.
//!
//! Two fixed slots in non-volatile storage share a 4-byte magic marker;
//! each slot adds a one-byte present-flag and a 440-byte state image.
//! Layout, byte-exact:
//!
//! ```text
//! 0..4        magic "GBAL"
//! 4           slot 0 present-flag ('X')
//! 5..5+S      slot 0 state image
//! 5+S         slot 1 present-flag ('X')
//! 6+S..6+2S   slot 1 state image
//! ```
//!
//! The state image is every saveable field as a little-endian 32-bit word
//! (bools as 0/1), players in slot order. There is no checksum; the
//! magic/flag pair is the whole validity story, and garbage behind a valid
//! pair loads as garbage.
//!
//! Storage is reached one byte at a time through [`SlotStore`] — cartridge
//! SRAM sits on an 8-bit bus, so the byte-wise interface is the honest
//! one. Tests back it with a plain RAM array.

use crate::state::{GameState, PlayerState, SaveableGameState, MAX_PLAYERS};

/// Shared magic marker at the start of the save region.
pub const SAVE_MAGIC: [u8; 4] = *b"GBAL";

/// Value of a slot's flag byte when the slot holds a save.
pub const SLOT_PRESENT: u8 = b'X';

/// Slot written by the Save menu items.
pub const MANUAL_SLOT: usize = 0;

/// Slot written by the autosave countdown.
pub const AUTOSAVE_SLOT: usize = 1;

/// Serialized size of [`SaveableGameState`]: 6 header words plus
/// 13 words per player slot.
pub const STATE_SIZE: usize = 4 * (6 + MAX_PLAYERS * (1 + MAX_PLAYERS + 4));

/// Total bytes of storage the save region occupies.
pub const REGION_SIZE: usize = 6 + 2 * STATE_SIZE;

const fn flag_offset(slot: usize) -> usize {
    4 + slot * (STATE_SIZE + 1)
}

const fn data_offset(slot: usize) -> usize {
    5 + slot * (STATE_SIZE + 1)
}

/// Byte-addressed non-volatile storage.
pub trait SlotStore {
    fn read_byte(&self, offset: usize) -> u8;
    fn write_byte(&mut self, offset: usize, value: u8);
}

impl SlotStore for gba::sram::Sram {
    fn read_byte(&self, offset: usize) -> u8 {
        gba::sram::Sram::read_byte(self, offset)
    }

    fn write_byte(&mut self, offset: usize, value: u8) {
        gba::sram::Sram::write_byte(self, offset, value)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SaveError {
    /// The slot's magic or present-flag didn't check out.
    NoSave,
}

/// True iff the shared magic is present and `slot`'s flag byte is set.
pub fn slot_is_valid<P: SlotStore>(store: &P, slot: usize) -> bool {
    for (i, byte) in SAVE_MAGIC.iter().enumerate() {
        if store.read_byte(i) != *byte {
            return false;
        }
    }
    store.read_byte(flag_offset(slot)) == SLOT_PRESENT
}

/// Write `saved` to `slot`, unconditionally. Whatever was there is gone.
pub fn save<P: SlotStore>(store: &mut P, slot: usize, saved: &SaveableGameState) {
    for (i, byte) in SAVE_MAGIC.iter().enumerate() {
        store.write_byte(i, *byte);
    }
    store.write_byte(flag_offset(slot), SLOT_PRESENT);

    let image = saved.to_bytes();
    let base = data_offset(slot);
    for (i, byte) in image.iter().enumerate() {
        store.write_byte(base + i, *byte);
    }
    log::info!("saved slot {}", slot);
}

/// Read `slot` back, if it holds a save.
pub fn load<P: SlotStore>(store: &P, slot: usize) -> Result<SaveableGameState, SaveError> {
    if !slot_is_valid(store, slot) {
        log::debug!("load: slot {} empty or invalid", slot);
        return Err(SaveError::NoSave);
    }
    let mut image = [0u8; STATE_SIZE];
    let base = data_offset(slot);
    for (i, byte) in image.iter_mut().enumerate() {
        *byte = store.read_byte(base + i);
    }
    log::info!("loaded slot {}", slot);
    Ok(SaveableGameState::from_bytes(&image))
}

/// Load `slot` into the live game state and reset the session fields to
/// their fresh defaults (straight into counting, cursors and timers
/// zeroed). The loaded saveable fields, song included, stay as read.
pub fn load_into<P: SlotStore>(store: &P, slot: usize, gs: &mut GameState) -> Result<(), SaveError> {
    gs.saved = load(store, slot)?;
    gs.reset_session();
    Ok(())
}

struct Writer<'a> {
    buf: &'a mut [u8],
    at: usize,
}

impl Writer<'_> {
    fn put(&mut self, v: i32) {
        self.buf[self.at..self.at + 4].copy_from_slice(&v.to_le_bytes());
        self.at += 4;
    }
}

struct Reader<'a> {
    buf: &'a [u8],
    at: usize,
}

impl Reader<'_> {
    fn get(&mut self) -> i32 {
        let mut word = [0u8; 4];
        word.copy_from_slice(&self.buf[self.at..self.at + 4]);
        self.at += 4;
        i32::from_le_bytes(word)
    }
}

impl SaveableGameState {
    pub fn to_bytes(&self) -> [u8; STATE_SIZE] {
        let mut image = [0u8; STATE_SIZE];
        let mut w = Writer { buf: &mut image, at: 0 };
        w.put(self.max_players as i32);
        w.put(self.max_opponents as i32);
        w.put(self.starting_life);
        w.put(self.upside_down_numbers as i32);
        w.put(self.selected_background_song as i32);
        w.put(self.sfx_enabled as i32);
        for player in &self.players {
            w.put(player.life);
            for damage in &player.commander_damage {
                w.put(*damage);
            }
            w.put(player.poison);
            w.put(player.energy);
            w.put(player.experience);
            w.put(player.commander_tax);
        }
        image
    }

    pub fn from_bytes(image: &[u8; STATE_SIZE]) -> Self {
        let mut r = Reader { buf: image, at: 0 };
        // Clamp the two fields everything else indexes with; a corrupt
        // image then loads as garbage numbers, not out-of-range cursors.
        let max_players = (r.get() as usize).clamp(1, MAX_PLAYERS);
        let max_opponents = (r.get() as usize).min(MAX_PLAYERS - 1);
        let starting_life = r.get();
        let upside_down_numbers = r.get() != 0;
        let selected_background_song = (r.get() as usize).min(crate::state::MAX_BACKGROUND_SONGS - 1);
        let sfx_enabled = r.get() != 0;
        let mut players = [PlayerState::new(); MAX_PLAYERS];
        for player in players.iter_mut() {
            player.life = r.get();
            for damage in player.commander_damage.iter_mut() {
                *damage = r.get();
            }
            player.poison = r.get();
            player.energy = r.get();
            player.experience = r.get();
            player.commander_tax = r.get();
        }
        Self {
            max_players,
            max_opponents,
            starting_life,
            upside_down_numbers,
            selected_background_song,
            sfx_enabled,
            players,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FIRST_COUNTER;

    struct RamStore([u8; REGION_SIZE]);

    impl RamStore {
        fn new() -> Self {
            Self([0; REGION_SIZE])
        }
    }

    impl SlotStore for RamStore {
        fn read_byte(&self, offset: usize) -> u8 {
            self.0[offset]
        }

        fn write_byte(&mut self, offset: usize, value: u8) {
            self.0[offset] = value;
        }
    }

    #[test]
    fn state_image_is_440_bytes() {
        assert_eq!(STATE_SIZE, 440);
    }

    #[test]
    fn region_layout_is_byte_exact() {
        let mut store = RamStore::new();
        let gs = GameState::new();
        save(&mut store, MANUAL_SLOT, &gs.saved);

        assert_eq!(&store.0[0..4], b"GBAL");
        assert_eq!(store.0[4], b'X');
        // max_players = 4, little-endian, right behind the flag.
        assert_eq!(&store.0[5..9], &[4, 0, 0, 0]);
        // Slot 1 flag untouched, one state image further in.
        assert_eq!(store.0[5 + STATE_SIZE], 0);

        save(&mut store, AUTOSAVE_SLOT, &gs.saved);
        assert_eq!(store.0[5 + STATE_SIZE], b'X');
        assert_eq!(&store.0[6 + STATE_SIZE..10 + STATE_SIZE], &[4, 0, 0, 0]);
    }

    #[test]
    fn round_trip_restores_every_field() {
        let mut store = RamStore::new();
        let mut gs = GameState::new();
        gs.saved.max_players = 4;
        gs.saved.max_opponents = 3;
        gs.saved.starting_life = 40;
        gs.saved.upside_down_numbers = true;
        gs.saved.selected_background_song = 1;
        gs.saved.sfx_enabled = false;
        gs.saved.players[0].life = -3;
        gs.saved.players[0].commander_damage[2] = 21;
        gs.saved.players[2].poison = 9;
        gs.saved.players[3].commander_tax = 6;
        let snapshot = gs.saved.clone();

        save(&mut store, MANUAL_SLOT, &gs.saved);

        // Wreck the live copy, then load it back.
        gs.reset();
        assert_ne!(gs.saved, snapshot);
        load_into(&store, MANUAL_SLOT, &mut gs).unwrap();
        assert_eq!(gs.saved, snapshot);
    }

    #[test]
    fn load_resets_session_fields() {
        let mut store = RamStore::new();
        let mut gs = GameState::new();
        save(&mut store, AUTOSAVE_SLOT, &gs.saved);

        gs.selected_player = 2;
        gs.selected_counter = 3;
        gs.autosave_in = 77;
        gs.life_changed = -4;
        gs.clear_life_changed_in = 50;
        load_into(&store, AUTOSAVE_SLOT, &mut gs).unwrap();

        assert_eq!(gs.state, crate::state::State::CountLife);
        assert_eq!(gs.selected_player, 0);
        assert_eq!(gs.selected_counter, 0);
        assert_eq!(gs.autosave_in, 0);
        assert_eq!(gs.life_changed, 0);
        assert_eq!(gs.clear_life_changed_in, 0);
    }

    #[test]
    fn loading_a_no_opponent_save_moves_the_cursor_onto_the_counters() {
        let mut store = RamStore::new();
        let mut gs = GameState::new();
        gs.saved.max_players = 2;
        gs.saved.max_opponents = 0;
        save(&mut store, MANUAL_SLOT, &gs.saved);

        load_into(&store, MANUAL_SLOT, &mut gs).unwrap();
        assert_eq!(gs.selected_counter, FIRST_COUNTER);
        assert_eq!(gs.last_counter, crate::state::EXPERIENCE_COUNTER);
    }

    #[test]
    fn untouched_slots_do_not_load() {
        let store = RamStore::new();
        assert!(!slot_is_valid(&store, MANUAL_SLOT));
        assert_eq!(load(&store, MANUAL_SLOT), Err(SaveError::NoSave));

        // A manual save must not make the autosave slot valid.
        let mut store = RamStore::new();
        let gs = GameState::new();
        save(&mut store, MANUAL_SLOT, &gs.saved);
        assert!(slot_is_valid(&store, MANUAL_SLOT));
        assert!(!slot_is_valid(&store, AUTOSAVE_SLOT));
        assert_eq!(load(&store, AUTOSAVE_SLOT), Err(SaveError::NoSave));
    }

    #[test]
    fn bad_magic_invalidates_both_slots() {
        let mut store = RamStore::new();
        let gs = GameState::new();
        save(&mut store, MANUAL_SLOT, &gs.saved);
        save(&mut store, AUTOSAVE_SLOT, &gs.saved);
        store.0[1] = b'?';
        assert!(!slot_is_valid(&store, MANUAL_SLOT));
        assert!(!slot_is_valid(&store, AUTOSAVE_SLOT));
    }
}
