//! Clickable areas of the client, in 1920x1080 logical coordinates.

use majsoul_rpa_protocols::Region;

// Title screen
pub const LOGIN_BUTTON: Region = Region::new(1206, 613, 389, 100);

// E-mail authentication dialog
pub const EMAIL_INPUT: Region = Region::new(760, 390, 400, 50);
pub const SEND_CODE_BUTTON: Region = Region::new(1180, 390, 150, 50);
pub const AUTH_CODE_INPUT: Region = Region::new(760, 480, 400, 50);
pub const AUTH_LOGIN_BUTTON: Region = Region::new(850, 600, 220, 70);

// Lobby
pub const FRIENDLY_MATCH_BUTTON: Region = Region::new(1390, 510, 380, 100);
pub const CREATE_ROOM_BUTTON: Region = Region::new(1390, 400, 380, 100);
pub const CREATE_ROOM_CONFIRM: Region = Region::new(1200, 870, 240, 70);

// Room
pub const ADD_AI_BUTTON: Region = Region::new(1100, 888, 240, 66);
pub const START_BUTTON: Region = Region::new(1485, 888, 290, 66);
pub const LEAVE_BUTTON: Region = Region::new(76, 50, 150, 50);

/// Seats of a four-player room.
pub const ROOM_SEATS: u32 = 4;

// Hand row
const HAND_LEFT: i32 = 221;
const HAND_TOP: i32 = 929;
const TILE_WIDTH: i32 = 95;
const TILE_HEIGHT: i32 = 130;
/// Space between the hand and the drawn tile.
const ZIMO_GAP: i32 = 30;
/// Tiles touch each other; keep clicks off the seams.
const TILE_INSET: i32 = 4;

/// Region of hand tile `index` when the hand holds `hand_len` tiles.
///
/// `index == hand_len` is the drawn tile, shown right of the hand after a gap.
pub fn hand_tile(index: usize, hand_len: usize) -> Region {
    let slot = index as i32;
    let gap = if index >= hand_len { ZIMO_GAP } else { 0 };
    Region::new(
        HAND_LEFT + slot * TILE_WIDTH + gap + TILE_INSET,
        HAND_TOP + TILE_INSET,
        TILE_WIDTH - 2 * TILE_INSET,
        TILE_HEIGHT - 2 * TILE_INSET,
    )
}

// Operation buttons, filled right to left starting with the skip button.
const BUTTON_ROW_RIGHT: i32 = 1580;
const BUTTON_TOP: i32 = 760;
const BUTTON_WIDTH: i32 = 190;
const BUTTON_HEIGHT: i32 = 80;
const BUTTON_SPACING: i32 = 10;

/// Region of the operation button in `slot`; slot 0 is the skip button.
pub fn operation_button(slot: usize) -> Region {
    let right = BUTTON_ROW_RIGHT - slot as i32 * (BUTTON_WIDTH + BUTTON_SPACING);
    Region::new(right - BUTTON_WIDTH, BUTTON_TOP, BUTTON_WIDTH, BUTTON_HEIGHT)
}

pub fn skip_button() -> Region {
    operation_button(0)
}

// Combination picker, centered above the buttons.
const CHOICE_TOP: i32 = 620;
const CHOICE_WIDTH: i32 = 220;
const CHOICE_HEIGHT: i32 = 90;
const CHOICE_SPACING: i32 = 20;

/// Region of combination `index` out of `count` offered for a call.
pub fn combination(index: usize, count: usize) -> Region {
    let count = count.max(1) as i32;
    let total = count * CHOICE_WIDTH + (count - 1) * CHOICE_SPACING;
    let left = 960 - total / 2 + index as i32 * (CHOICE_WIDTH + CHOICE_SPACING);
    Region::new(left, CHOICE_TOP, CHOICE_WIDTH, CHOICE_HEIGHT)
}
