//! Integer rules shared by the governance and treasury contracts.
//!
//! All ratios are whole percentages. Products are computed before any
//! division so no precision is lost to truncation.

pub const PERCENT: u64 = 100;

/// Upper bound of any single phase length, ten years in seconds. Keeps every
/// deadline sum far away from `u64::MAX`.
pub const MAX_PHASE_LENGTH: u64 = 10 * 365 * 24 * 60 * 60;

/// Signing threshold of a group of `count` keys at `ratio` percent, rounded up.
pub fn multisig_threshold(count: u64, ratio: u64) -> u64 {
    (count * ratio).div_ceil(PERCENT)
}

/// `true` when at least `quorum` percent of `member_count` members voted.
pub fn quorum_reached(votes_cast: u64, quorum: u64, member_count: u64) -> bool {
    votes_cast * PERCENT >= quorum * member_count
}

/// `true` when approvals make up at least `acceptance_rate` percent of the
/// approve and reject votes. Abstentions never count here, and a proposal
/// nobody took a position on is not accepted.
pub fn acceptance_reached(approve: u64, reject: u64, acceptance_rate: u64) -> bool {
    let decided = approve + reject;
    decided > 0 && approve * PERCENT >= acceptance_rate * decided
}

pub fn is_percentage(value: u64) -> bool {
    value <= PERCENT
}

pub fn is_threshold_ratio(value: u64) -> bool {
    value > 0 && value <= PERCENT
}

pub fn is_phase_length(value: u64) -> bool {
    value <= MAX_PHASE_LENGTH
}

/// Index window of one page over `total` items.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Page {
    pub start: u64,
    pub end: u64,
    pub pages: u64,
}

/// Splits `total` items into pages of `items_per_page`. There is always at
/// least one (possibly empty) page. Returns `None` when `page` is past the end.
pub fn paginate(total: u64, page: u64, items_per_page: u64) -> Option<Page> {
    if items_per_page == 0 {
        return None;
    }
    let pages = core::cmp::max(total.div_ceil(items_per_page), 1);
    if page >= pages {
        return None;
    }
    let start = page * items_per_page;
    let end = core::cmp::min(start + items_per_page, total);
    Some(Page { start, end, pages })
}
