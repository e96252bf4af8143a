/// Proof that the current code path runs on behalf of an executing proposal.
///
/// Self-only handlers take a reference to this value instead of re-checking
/// the caller. It can only be created inside this crate: by `execute`, or by a
/// public self-only endpoint after confirming the governance contract is the
/// calling principal.
pub struct ProposalExecution {
    _private: (),
}

impl ProposalExecution {
    pub(crate) fn grant() -> Self {
        ProposalExecution { _private: () }
    }
}
