multiversx_sc::imports!();
multiversx_sc::derive_imports!();

// ============================================================
// Intent: one call an accepted proposal performs
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, ManagedVecItem, Clone, PartialEq, Debug)]
pub struct Intent<M: ManagedTypeApi> {
    pub target: ManagedAddress<M>,
    pub method: ManagedBuffer<M>,
    /// Top-encoded arguments, passed to the target as-is.
    pub params: ManagedVec<M, ManagedBuffer<M>>,
    pub call_flags: u8,
}

// ============================================================
// Vote choice
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, Debug)]
pub enum VoteChoice {
    Approve,
    Reject,
    Abstain,
}

// ============================================================
// Proposal records
// ============================================================

/// Fixed at creation.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct ProposalData<M: ManagedTypeApi> {
    pub proposer: ManagedAddress<M>,
    pub linked_proposal: Option<u64>,
    pub acceptance_rate: u64,
    pub quorum: u64,
    pub intents: ManagedVec<M, Intent<M>>,
    pub offchain_uri: ManagedBuffer<M>,
    pub hash: ManagedByteArray<M, 32>,
    pub created_at: u64,
}

/// Deadlines stamped by the endorsement. All zero until then.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct ProposalTimeline<M: ManagedTypeApi> {
    pub endorser: Option<ManagedAddress<M>>,
    pub review_end: u64,
    pub voting_end: u64,
    pub timelock_end: u64,
    pub expiration_end: u64,
    pub executed: bool,
}

impl<M: ManagedTypeApi> ProposalTimeline<M> {
    pub fn unendorsed() -> Self {
        ProposalTimeline {
            endorser: None,
            review_end: 0,
            voting_end: 0,
            timelock_end: 0,
            expiration_end: 0,
            executed: false,
        }
    }

    pub fn is_endorsed(&self) -> bool {
        self.endorser.is_some()
    }

    /// `endorse_deadline` only matters while nobody has endorsed the proposal.
    pub fn phase(&self, endorse_deadline: u64, now: u64) -> ProposalPhase {
        if self.executed {
            return ProposalPhase::Executed;
        }
        if !self.is_endorsed() {
            return if now < endorse_deadline {
                ProposalPhase::Created
            } else {
                ProposalPhase::Expired
            };
        }
        if now < self.review_end {
            ProposalPhase::Review
        } else if now < self.voting_end {
            ProposalPhase::Voting
        } else if now < self.timelock_end {
            ProposalPhase::Timelock
        } else if now < self.expiration_end {
            ProposalPhase::Executable
        } else {
            ProposalPhase::Expired
        }
    }
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ProposalVotes {
    pub approve: u64,
    pub reject: u64,
    pub abstain: u64,
}

impl ProposalVotes {
    pub fn record(&mut self, choice: VoteChoice) {
        match choice {
            VoteChoice::Approve => self.approve += 1,
            VoteChoice::Reject => self.reject += 1,
            VoteChoice::Abstain => self.abstain += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.approve + self.reject + self.abstain
    }
}

// ============================================================
// Phase, derived from the timeline and never stored
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, Debug)]
pub enum ProposalPhase {
    /// Waiting for a member to endorse it.
    Created,
    Review,
    Voting,
    Timelock,
    /// Anyone may call `execute`.
    Executable,
    Executed,
    Expired,
}

// ============================================================
// Proposal view returned by the read endpoints
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct ProposalView<M: ManagedTypeApi> {
    pub id: u64,
    pub proposer: ManagedAddress<M>,
    pub linked_proposal: Option<u64>,
    pub acceptance_rate: u64,
    pub quorum: u64,
    pub endorser: Option<ManagedAddress<M>>,
    pub review_end: u64,
    pub voting_end: u64,
    pub timelock_end: u64,
    pub expiration_end: u64,
    pub approve: u64,
    pub reject: u64,
    pub abstain: u64,
    pub executed: bool,
    pub phase: ProposalPhase,
    pub intents: ManagedVec<M, Intent<M>>,
    pub offchain_uri: ManagedBuffer<M>,
    pub hash: ManagedByteArray<M, 32>,
    pub created_at: u64,
}

impl<M: ManagedTypeApi> ProposalView<M> {
    pub fn assemble(
        id: u64,
        data: ProposalData<M>,
        timeline: ProposalTimeline<M>,
        votes: ProposalVotes,
        phase: ProposalPhase,
    ) -> Self {
        ProposalView {
            id,
            proposer: data.proposer,
            linked_proposal: data.linked_proposal,
            acceptance_rate: data.acceptance_rate,
            quorum: data.quorum,
            endorser: timeline.endorser,
            review_end: timeline.review_end,
            voting_end: timeline.voting_end,
            timelock_end: timeline.timelock_end,
            expiration_end: timeline.expiration_end,
            approve: votes.approve,
            reject: votes.reject,
            abstain: votes.abstain,
            executed: timeline.executed,
            phase,
            intents: data.intents,
            offchain_uri: data.offchain_uri,
            hash: data.hash,
            created_at: data.created_at,
        }
    }
}
