// ============================================================
// Authorization
// ============================================================

pub const ERR_ONLY_SELF: &str = "only self";
pub const ERR_ONLY_OWNER: &str = "only owner";
pub const ERR_ONLY_GOV_CONTRACT: &str = "only governance contract";
pub const ERR_NOT_AUTHORIZED: &str = "not authorized";
pub const ERR_ONLY_TREASURY: &str = "only treasury";
pub const ERR_ONLY_TREASURY_OR_FUNDER: &str = "only treasury or whitelisted funder";

// ============================================================
// State / phase
// ============================================================

pub const ERR_PAUSED: &str = "contract is paused";
pub const ERR_NOT_PAUSED: &str = "contract is not paused";
pub const ERR_PROPOSAL_MISSING: &str = "proposal doesn't exist";
pub const ERR_LINKED_PROPOSAL_MISSING: &str = "linked proposal doesn't exist";
pub const ERR_PROPOSAL_EXISTS: &str = "proposal already exists";
pub const ERR_ALREADY_ENDORSED: &str = "already endorsed";
pub const ERR_NOT_ENDORSED: &str = "wasn't endorsed yet";
pub const ERR_PROPOSAL_EXPIRED: &str = "proposal expired";
pub const ERR_PROPOSAL_NOT_ACTIVE: &str = "proposal not active";
pub const ERR_NOT_IN_EXECUTION_PHASE: &str = "proposal not in execution phase";
pub const ERR_ALREADY_VOTED: &str = "already voted";
pub const ERR_NOT_HANDLED: &str = "proposal was not handled";
pub const ERR_ALREADY_EXECUTED: &str = "already executed";
pub const ERR_ALREADY_MEMBER: &str = "already a member";
pub const ERR_NOT_MEMBER: &str = "not a member";
pub const ERR_LAST_MEMBER: &str = "cannot remove last member";
pub const ERR_NO_MEMBERS: &str = "no members";
pub const ERR_ALREADY_FUNDER: &str = "already a funder";
pub const ERR_NOT_FUNDER: &str = "not a funder";
pub const ERR_ALREADY_WHITELISTED: &str = "already whitelisted";
pub const ERR_NOT_WHITELISTED: &str = "not whitelisted";
pub const ERR_ZERO_THRESHOLD: &str = "threshold was zero";

// ============================================================
// Validation
// ============================================================

pub const ERR_INVALID_ADDRESS: &str = "invalid address";
pub const ERR_INVALID_TO: &str = "invalid to";
pub const ERR_INVALID_AMOUNT: &str = "invalid amount";
pub const ERR_FEE_EXCEEDS_MAX_FEE: &str = "fee exceeds max fee";
pub const ERR_ABOVE_MAX_FUNDING: &str = "above token's max funding amount";
pub const ERR_UNSUPPORTED_TOKEN: &str = "unsupported token";
pub const ERR_INSUFFICIENT_BALANCE: &str = "insufficient balance";
pub const ERR_INSUFFICIENT_BALANCE_FOR_FEE: &str = "insufficient balance for fee";
pub const ERR_NO_PUBLIC_KEYS: &str = "no public keys";
pub const ERR_INVALID_THRESHOLD_RATIO: &str = "invalid threshold ratio";
pub const ERR_INVALID_ACCEPTANCE_RATE: &str = "invalid acceptance rate";
pub const ERR_INVALID_QUORUM: &str = "invalid quorum";
pub const ERR_UNKNOWN_PARAMETER: &str = "unknown parameter";
pub const ERR_INVALID_PARAMETER_VALUE: &str = "invalid parameter value";
pub const ERR_MISSING_PARAMETER: &str = "missing parameter";
pub const ERR_NO_INTENTS: &str = "no intents";
pub const ERR_INVALID_TARGET: &str = "invalid target contract hash";
pub const ERR_INVALID_METHOD: &str = "invalid intent method";
pub const ERR_METHOD_TOO_LONG: &str = "target method name too long";
pub const ERR_PARAM_TOO_BIG: &str = "intent parameter too big";
pub const ERR_INVALID_CALL_FLAGS: &str = "invalid call flags";
pub const ERR_CALL_FLAGS_FORBID_WRITES: &str = "call flags forbid state changes";
pub const ERR_INVALID_INTENT_PARAMS: &str = "invalid intent parameters";
pub const ERR_UNSUPPORTED_SELF_CALL: &str = "unsupported self call";
pub const ERR_PAGE_OUT_OF_BOUNDS: &str = "page out of bounds";
pub const ERR_INVALID_PAGE_SIZE: &str = "invalid page size";
