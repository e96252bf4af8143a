//! Call-flag bitmask carried by every proposal intent.

pub const NONE: u8 = 0x00;
pub const READ_STATES: u8 = 0x01;
pub const WRITE_STATES: u8 = 0x02;
pub const ALLOW_CALL: u8 = 0x04;
pub const ALLOW_NOTIFY: u8 = 0x08;
pub const STATES: u8 = READ_STATES | WRITE_STATES;
pub const READ_ONLY: u8 = READ_STATES | ALLOW_CALL;
pub const ALL: u8 = STATES | ALLOW_CALL | ALLOW_NOTIFY;

pub fn is_valid(flags: u8) -> bool {
    flags != NONE && flags & !ALL == 0
}

pub fn allows_state_changes(flags: u8) -> bool {
    flags & WRITE_STATES != 0
}
