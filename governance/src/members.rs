multiversx_sc::imports!();

use grantshares_common::{errors::*, rules};

use crate::{capability::ProposalExecution, params::MULTI_SIG_THRESHOLD_KEY};

/// The committee. Membership changes only through executed proposals.
#[multiversx_sc::module]
pub trait MembersModule:
    crate::guards::GuardsModule
    + crate::params::ParametersModule
    + grantshares_common::multisig::MultisigModule
{
    #[endpoint(addMember)]
    fn add_member(&self, member: ManagedAddress) {
        let execution = self.require_self_call();
        self.apply_add_member(&execution, member);
    }

    #[endpoint(removeMember)]
    fn remove_member(&self, member: ManagedAddress) {
        let execution = self.require_self_call();
        self.apply_remove_member(&execution, member);
    }

    fn apply_add_member(&self, _execution: &ProposalExecution, member: ManagedAddress) {
        self.require_not_paused();
        require!(!member.is_zero(), ERR_INVALID_ADDRESS);
        require!(self.members().insert(member.clone()), ERR_ALREADY_MEMBER);
        self.member_added_event(&member);
    }

    fn apply_remove_member(&self, _execution: &ProposalExecution, member: ManagedAddress) {
        self.require_not_paused();
        self.require_member(&member);
        require!(self.members().len() > 1, ERR_LAST_MEMBER);
        self.members().remove(&member);
        self.member_removed_event(&member);
    }

    fn require_member(&self, address: &ManagedAddress) {
        require!(self.members().contains(address), ERR_NOT_MEMBER);
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(getMembers)]
    fn get_members(&self) -> MultiValueEncoded<ManagedAddress> {
        let mut result = MultiValueEncoded::new();
        for member in self.members().iter() {
            result.push(member);
        }
        result
    }

    #[view(getMembersCount)]
    fn get_members_count(&self) -> u64 {
        self.members().len() as u64
    }

    #[view(calcMembersMultiSigAccountThreshold)]
    fn calc_members_multisig_threshold(&self) -> u64 {
        let threshold = rules::multisig_threshold(
            self.members().len() as u64,
            self.parameter(MULTI_SIG_THRESHOLD_KEY),
        );
        require!(threshold > 0, ERR_ZERO_THRESHOLD);
        threshold
    }

    /// Recomputed on every call, so it follows membership changes.
    #[view(calcMembersMultiSigAccount)]
    fn calc_members_multisig_account(&self) -> ManagedAddress {
        let threshold = self.calc_members_multisig_threshold();
        let mut keys = ManagedVec::new();
        for member in self.members().iter() {
            keys.push(member);
        }
        self.derive_multisig_address(&keys, threshold)
    }

    // ========================================================
    // EVENTS / STORAGE
    // ========================================================

    #[event("memberAdded")]
    fn member_added_event(&self, #[indexed] member: &ManagedAddress);

    #[event("memberRemoved")]
    fn member_removed_event(&self, #[indexed] member: &ManagedAddress);

    #[storage_mapper("members")]
    fn members(&self) -> SetMapper<ManagedAddress>;
}
