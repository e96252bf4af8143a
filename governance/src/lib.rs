#![no_std]

multiversx_sc::imports!();

pub mod capability;
pub mod grantshares_gov_proxy;
pub mod guards;
pub mod intents;
pub mod members;
pub mod params;
pub mod types;

use capability::ProposalExecution;
use grantshares_common::{errors::*, rules};
use params::{
    EXPIRATION_LENGTH_KEY, MIN_ACCEPTANCE_RATE_KEY, MIN_QUORUM_KEY, REVIEW_LENGTH_KEY,
    TIMELOCK_LENGTH_KEY, VOTING_LENGTH_KEY,
};
use types::{
    Intent, ProposalData, ProposalPhase, ProposalTimeline, ProposalView, ProposalVotes,
    VoteChoice,
};

// ============================================================
// Contract
// ============================================================

#[multiversx_sc::contract]
pub trait GrantSharesGov:
    guards::GuardsModule
    + params::ParametersModule
    + members::MembersModule
    + intents::IntentsModule
    + grantshares_common::multisig::MultisigModule
{
    // ========================================================
    // Init / Upgrade
    // ========================================================

    #[init]
    fn init(
        &self,
        members: ManagedVec<ManagedAddress>,
        parameters: MultiValueEncoded<MultiValue2<ManagedBuffer, u64>>,
    ) {
        require!(!members.is_empty(), ERR_NO_MEMBERS);
        for member in members.iter() {
            require!(!member.is_zero(), ERR_INVALID_ADDRESS);
            require!(
                self.members().insert(member.clone_value()),
                ERR_ALREADY_MEMBER
            );
        }
        self.init_parameters(parameters);
        self.paused().set(false);
        self.proposal_count().set(0u64);
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: createProposal
    // Anyone can propose. Acceptance rate and quorum come as a
    // pair, default to the current minimums and can only be raised.
    // ========================================================

    #[endpoint(createProposal)]
    fn create_proposal(
        &self,
        intents: ManagedVec<Intent<Self::Api>>,
        offchain_uri: ManagedBuffer,
        linked_proposal: Option<u64>,
        rates: OptionalValue<MultiValue2<u64, u64>>,
    ) -> u64 {
        self.require_not_paused();

        let min_acceptance_rate = self.parameter(MIN_ACCEPTANCE_RATE_KEY);
        let min_quorum = self.parameter(MIN_QUORUM_KEY);
        let (acceptance_rate, quorum) = match rates.into_option() {
            Some(pair) => pair.into_tuple(),
            None => (min_acceptance_rate, min_quorum),
        };
        require!(
            acceptance_rate >= min_acceptance_rate && rules::is_percentage(acceptance_rate),
            ERR_INVALID_ACCEPTANCE_RATE
        );
        require!(
            quorum >= min_quorum && rules::is_percentage(quorum),
            ERR_INVALID_QUORUM
        );

        if let Some(linked_id) = linked_proposal {
            require!(
                !self.proposal_data(linked_id).is_empty(),
                ERR_LINKED_PROPOSAL_MISSING
            );
        }
        require!(!intents.is_empty(), ERR_NO_INTENTS);

        let hash = self.hash_proposal(intents.clone(), self.crypto().sha256(&offchain_uri));
        require!(
            !self.proposal_ids_by_hash().contains_key(&hash),
            ERR_PROPOSAL_EXISTS
        );

        let proposer = self.blockchain().get_caller();
        let proposal_id = self.proposal_count().get();
        let proposal = ProposalData {
            proposer: proposer.clone(),
            linked_proposal,
            acceptance_rate,
            quorum,
            intents,
            offchain_uri,
            hash: hash.clone(),
            created_at: self.blockchain().get_block_timestamp(),
        };

        self.proposal_data(proposal_id).set(&proposal);
        self.proposal_timeline(proposal_id)
            .set(ProposalTimeline::unendorsed());
        self.proposal_votes(proposal_id).set(ProposalVotes::default());
        self.proposal_ids_by_hash().insert(hash, proposal_id);
        self.proposal_count().set(proposal_id + 1);

        self.proposal_created_event(proposal_id, &proposer, acceptance_rate, quorum);

        proposal_id
    }

    // ========================================================
    // ENDPOINT: endorseProposal
    // A member takes the proposal to review. Stamps every
    // deadline from the current parameters.
    // ========================================================

    #[endpoint(endorseProposal)]
    fn endorse_proposal(&self, proposal_id: u64) {
        self.require_not_paused();
        let endorser = self.blockchain().get_caller();
        self.require_member(&endorser);
        let proposal = self.require_proposal(proposal_id);

        let mut timeline = self.proposal_timeline(proposal_id).get();
        require!(!timeline.is_endorsed(), ERR_ALREADY_ENDORSED);

        let now = self.blockchain().get_block_timestamp();
        let expiration_len = self.parameter(EXPIRATION_LENGTH_KEY);
        require!(
            now < proposal.created_at + expiration_len,
            ERR_PROPOSAL_EXPIRED
        );

        timeline.endorser = Some(endorser.clone());
        timeline.review_end = now + self.parameter(REVIEW_LENGTH_KEY);
        timeline.voting_end = timeline.review_end + self.parameter(VOTING_LENGTH_KEY);
        timeline.timelock_end = timeline.voting_end + self.parameter(TIMELOCK_LENGTH_KEY);
        timeline.expiration_end = timeline.timelock_end + expiration_len;
        self.proposal_timeline(proposal_id).set(&timeline);

        self.proposal_endorsed_event(proposal_id, &endorser);
    }

    // ========================================================
    // ENDPOINT: vote
    // One vote per member, only inside the voting window.
    // ========================================================

    #[endpoint(vote)]
    fn vote(&self, proposal_id: u64, choice: VoteChoice) {
        self.require_not_paused();
        let voter = self.blockchain().get_caller();
        self.require_member(&voter);
        self.require_proposal(proposal_id);

        let timeline = self.proposal_timeline(proposal_id).get();
        let now = self.blockchain().get_block_timestamp();
        require!(
            timeline.is_endorsed() && now >= timeline.review_end && now < timeline.voting_end,
            ERR_PROPOSAL_NOT_ACTIVE
        );
        require!(
            !self.voters(proposal_id).contains_key(&voter),
            ERR_ALREADY_VOTED
        );

        self.voters(proposal_id).insert(voter.clone(), choice);
        self.proposal_votes(proposal_id)
            .update(|votes| votes.record(choice));

        self.voted_event(proposal_id, &voter, choice);
    }

    // ========================================================
    // ENDPOINT: execute
    // Anyone can trigger an accepted proposal after its timelock.
    // Marked executed before the intents run.
    // ========================================================

    #[endpoint(execute)]
    fn execute(&self, proposal_id: u64) -> ManagedVec<ManagedBuffer> {
        self.require_not_paused();
        let proposal = self.require_proposal(proposal_id);

        let mut timeline = self.proposal_timeline(proposal_id).get();
        let now = self.blockchain().get_block_timestamp();
        require!(timeline.is_endorsed(), ERR_NOT_ENDORSED);
        require!(now >= timeline.timelock_end, ERR_NOT_IN_EXECUTION_PHASE);
        require!(!timeline.executed, ERR_ALREADY_EXECUTED);
        require!(now < timeline.expiration_end, ERR_PROPOSAL_EXPIRED);

        let votes = self.proposal_votes(proposal_id).get();
        require!(self.is_accepted(&proposal, &votes), ERR_NOT_HANDLED);

        timeline.executed = true;
        self.proposal_timeline(proposal_id).set(&timeline);

        let results = self.execute_intents(&ProposalExecution::grant(), &proposal.intents);
        self.proposal_executed_event(proposal_id, &results);

        results
    }

    // ========================================================
    // ENDPOINT: pause / unpause
    // Only the members' multisig account.
    // ========================================================

    #[endpoint(pause)]
    fn pause(&self) {
        self.require_members_multisig();
        self.paused().set(true);
        self.contract_paused_event();
    }

    #[endpoint(unpause)]
    fn unpause(&self) {
        self.require_members_multisig();
        self.paused().set(false);
        self.contract_unpaused_event();
    }

    // ========================================================
    // INTERNAL
    // ========================================================

    fn require_members_multisig(&self) {
        require!(
            self.blockchain().get_caller() == self.calc_members_multisig_account(),
            ERR_NOT_AUTHORIZED
        );
    }

    fn require_proposal(&self, proposal_id: u64) -> ProposalData<Self::Api> {
        require!(
            !self.proposal_data(proposal_id).is_empty(),
            ERR_PROPOSAL_MISSING
        );
        self.proposal_data(proposal_id).get()
    }

    /// Evaluated against the member count at the time of the call.
    fn is_accepted(&self, proposal: &ProposalData<Self::Api>, votes: &ProposalVotes) -> bool {
        let member_count = self.members().len() as u64;
        rules::quorum_reached(votes.total(), proposal.quorum, member_count)
            && rules::acceptance_reached(votes.approve, votes.reject, proposal.acceptance_rate)
    }

    fn proposal_phase(
        &self,
        proposal: &ProposalData<Self::Api>,
        timeline: &ProposalTimeline<Self::Api>,
    ) -> ProposalPhase {
        let endorse_deadline = proposal.created_at + self.parameter(EXPIRATION_LENGTH_KEY);
        timeline.phase(endorse_deadline, self.blockchain().get_block_timestamp())
    }

    fn proposal_view(&self, proposal_id: u64) -> ProposalView<Self::Api> {
        let proposal = self.proposal_data(proposal_id).get();
        let timeline = self.proposal_timeline(proposal_id).get();
        let phase = self.proposal_phase(&proposal, &timeline);
        let votes = self.proposal_votes(proposal_id).get();
        ProposalView::assemble(proposal_id, proposal, timeline, votes, phase)
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(getProposal)]
    fn get_proposal(&self, proposal_id: u64) -> OptionalValue<ProposalView<Self::Api>> {
        if self.proposal_data(proposal_id).is_empty() {
            return OptionalValue::None;
        }
        OptionalValue::Some(self.proposal_view(proposal_id))
    }

    /// Returns `(page, pages, proposals)`. Zero proposals still make one empty page.
    #[view(getProposals)]
    fn get_proposals(
        &self,
        page: u64,
        items_per_page: u64,
    ) -> MultiValue3<u64, u64, MultiValueEncoded<ProposalView<Self::Api>>> {
        require!(items_per_page > 0, ERR_INVALID_PAGE_SIZE);
        let total = self.proposal_count().get();
        let window = match rules::paginate(total, page, items_per_page) {
            Some(window) => window,
            None => sc_panic!(ERR_PAGE_OUT_OF_BOUNDS),
        };

        let mut result = MultiValueEncoded::new();
        for proposal_id in window.start..window.end {
            result.push(self.proposal_view(proposal_id));
        }
        (page, window.pages, result).into()
    }

    #[view(getProposalCount)]
    fn get_proposal_count(&self) -> u64 {
        self.proposal_count().get()
    }

    #[view(getProposalPhase)]
    fn get_proposal_phase(&self, proposal_id: u64) -> ProposalPhase {
        let proposal = self.require_proposal(proposal_id);
        let timeline = self.proposal_timeline(proposal_id).get();
        self.proposal_phase(&proposal, &timeline)
    }

    #[view(getProposalIdByHash)]
    fn get_proposal_id_by_hash(&self, hash: ManagedByteArray<Self::Api, 32>) -> OptionalValue<u64> {
        self.proposal_ids_by_hash().get(&hash).into()
    }

    #[view(getVoters)]
    fn get_voters(&self, proposal_id: u64) -> MultiValueEncoded<MultiValue2<ManagedAddress, VoteChoice>> {
        let mut result = MultiValueEncoded::new();
        for (voter, choice) in self.voters(proposal_id).iter() {
            result.push((voter, choice).into());
        }
        result
    }

    #[view(getVote)]
    fn get_vote(&self, proposal_id: u64, voter: ManagedAddress) -> OptionalValue<VoteChoice> {
        self.voters(proposal_id).get(&voter).into()
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("proposalCreated")]
    fn proposal_created_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] proposer: &ManagedAddress,
        #[indexed] acceptance_rate: u64,
        quorum: u64,
    );

    #[event("proposalEndorsed")]
    fn proposal_endorsed_event(&self, #[indexed] proposal_id: u64, endorser: &ManagedAddress);

    #[event("voted")]
    fn voted_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] voter: &ManagedAddress,
        choice: VoteChoice,
    );

    #[event("proposalExecuted")]
    fn proposal_executed_event(
        &self,
        #[indexed] proposal_id: u64,
        results: &ManagedVec<ManagedBuffer>,
    );

    #[event("contractPaused")]
    fn contract_paused_event(&self);

    #[event("contractUnpaused")]
    fn contract_unpaused_event(&self);

    // ========================================================
    // STORAGE
    // ========================================================

    #[storage_mapper("proposalCount")]
    fn proposal_count(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("proposalData")]
    fn proposal_data(&self, id: u64) -> SingleValueMapper<ProposalData<Self::Api>>;

    #[storage_mapper("proposalTimeline")]
    fn proposal_timeline(&self, id: u64) -> SingleValueMapper<ProposalTimeline<Self::Api>>;

    #[storage_mapper("proposalVotes")]
    fn proposal_votes(&self, id: u64) -> SingleValueMapper<ProposalVotes>;

    #[storage_mapper("voters")]
    fn voters(&self, id: u64) -> MapMapper<ManagedAddress, VoteChoice>;

    #[storage_mapper("proposalIdsByHash")]
    fn proposal_ids_by_hash(&self) -> MapMapper<ManagedByteArray<Self::Api, 32>, u64>;
}
