use multiversx_sc::proxy_imports::*;

use crate::types::{Intent, ProposalPhase, ProposalView, VoteChoice};

pub struct GrantSharesGovProxy;

impl<Env, From, To, Gas> TxProxyTrait<Env, From, To, Gas> for GrantSharesGovProxy
where
    Env: TxEnv,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    type TxProxyMethods = GrantSharesGovProxyMethods<Env, From, To, Gas>;

    fn proxy_methods(self, tx: Tx<Env, From, To, (), Gas, (), ()>) -> Self::TxProxyMethods {
        GrantSharesGovProxyMethods { wrapped_tx: tx }
    }
}

pub struct GrantSharesGovProxyMethods<Env, From, To, Gas>
where
    Env: TxEnv,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    wrapped_tx: Tx<Env, From, To, (), Gas, (), ()>,
}

impl<Env, From, Gas> GrantSharesGovProxyMethods<Env, From, (), Gas>
where
    Env: TxEnv,
    Env::Api: VMApi,
    From: TxFrom<Env>,
    Gas: TxGas<Env>,
{
    pub fn init<
        Arg0: ProxyArg<ManagedVec<Env::Api, ManagedAddress<Env::Api>>>,
        Arg1: ProxyArg<MultiValueEncoded<Env::Api, MultiValue2<ManagedBuffer<Env::Api>, u64>>>,
    >(
        self,
        members: Arg0,
        parameters: Arg1,
    ) -> TxTypedDeploy<Env, From, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_deploy()
            .argument(&members)
            .argument(&parameters)
            .original_result()
    }
}

impl<Env, From, To, Gas> GrantSharesGovProxyMethods<Env, From, To, Gas>
where
    Env: TxEnv,
    Env::Api: VMApi,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    pub fn upgrade(self) -> TxTypedUpgrade<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_upgrade()
            .original_result()
    }

    // ── Lifecycle ──

    pub fn create_proposal<
        Arg0: ProxyArg<ManagedVec<Env::Api, Intent<Env::Api>>>,
        Arg1: ProxyArg<ManagedBuffer<Env::Api>>,
        Arg2: ProxyArg<Option<u64>>,
        Arg3: ProxyArg<OptionalValue<MultiValue2<u64, u64>>>,
    >(
        self,
        intents: Arg0,
        offchain_uri: Arg1,
        linked_proposal: Arg2,
        rates: Arg3,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, u64> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("createProposal")
            .argument(&intents)
            .argument(&offchain_uri)
            .argument(&linked_proposal)
            .argument(&rates)
            .original_result()
    }

    pub fn endorse_proposal<Arg0: ProxyArg<u64>>(
        self,
        proposal_id: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("endorseProposal")
            .argument(&proposal_id)
            .original_result()
    }

    pub fn vote<Arg0: ProxyArg<u64>, Arg1: ProxyArg<VoteChoice>>(
        self,
        proposal_id: Arg0,
        choice: Arg1,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("vote")
            .argument(&proposal_id)
            .argument(&choice)
            .original_result()
    }

    pub fn execute<Arg0: ProxyArg<u64>>(
        self,
        proposal_id: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ManagedVec<Env::Api, ManagedBuffer<Env::Api>>>
    {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("execute")
            .argument(&proposal_id)
            .original_result()
    }

    pub fn pause(self) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("pause")
            .original_result()
    }

    pub fn unpause(self) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("unpause")
            .original_result()
    }

    // ── Self-only ──

    pub fn change_param<Arg0: ProxyArg<ManagedBuffer<Env::Api>>, Arg1: ProxyArg<u64>>(
        self,
        key: Arg0,
        value: Arg1,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("changeParam")
            .argument(&key)
            .argument(&value)
            .original_result()
    }

    pub fn add_member<Arg0: ProxyArg<ManagedAddress<Env::Api>>>(
        self,
        member: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("addMember")
            .argument(&member)
            .original_result()
    }

    pub fn remove_member<Arg0: ProxyArg<ManagedAddress<Env::Api>>>(
        self,
        member: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("removeMember")
            .argument(&member)
            .original_result()
    }

    // ── Views ──

    pub fn hash_proposal<
        Arg0: ProxyArg<ManagedVec<Env::Api, Intent<Env::Api>>>,
        Arg1: ProxyArg<ManagedByteArray<Env::Api, 32>>,
    >(
        self,
        intents: Arg0,
        offchain_uri_hash: Arg1,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ManagedByteArray<Env::Api, 32>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("hashProposal")
            .argument(&intents)
            .argument(&offchain_uri_hash)
            .original_result()
    }

    pub fn get_proposal<Arg0: ProxyArg<u64>>(
        self,
        proposal_id: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, OptionalValue<ProposalView<Env::Api>>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getProposal")
            .argument(&proposal_id)
            .original_result()
    }

    pub fn get_proposals<Arg0: ProxyArg<u64>, Arg1: ProxyArg<u64>>(
        self,
        page: Arg0,
        items_per_page: Arg1,
    ) -> TxTypedCall<
        Env,
        From,
        To,
        NotPayable,
        Gas,
        MultiValue3<u64, u64, MultiValueEncoded<Env::Api, ProposalView<Env::Api>>>,
    > {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getProposals")
            .argument(&page)
            .argument(&items_per_page)
            .original_result()
    }

    pub fn get_proposal_count(self) -> TxTypedCall<Env, From, To, NotPayable, Gas, u64> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getProposalCount")
            .original_result()
    }

    pub fn get_proposal_phase<Arg0: ProxyArg<u64>>(
        self,
        proposal_id: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ProposalPhase> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getProposalPhase")
            .argument(&proposal_id)
            .original_result()
    }

    pub fn get_proposal_id_by_hash<Arg0: ProxyArg<ManagedByteArray<Env::Api, 32>>>(
        self,
        hash: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, OptionalValue<u64>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getProposalIdByHash")
            .argument(&hash)
            .original_result()
    }

    pub fn get_voters<Arg0: ProxyArg<u64>>(
        self,
        proposal_id: Arg0,
    ) -> TxTypedCall<
        Env,
        From,
        To,
        NotPayable,
        Gas,
        MultiValueEncoded<Env::Api, MultiValue2<ManagedAddress<Env::Api>, VoteChoice>>,
    > {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getVoters")
            .argument(&proposal_id)
            .original_result()
    }

    pub fn get_vote<Arg0: ProxyArg<u64>, Arg1: ProxyArg<ManagedAddress<Env::Api>>>(
        self,
        proposal_id: Arg0,
        voter: Arg1,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, OptionalValue<VoteChoice>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getVote")
            .argument(&proposal_id)
            .argument(&voter)
            .original_result()
    }

    pub fn is_paused(self) -> TxTypedCall<Env, From, To, NotPayable, Gas, bool> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("isPaused")
            .original_result()
    }

    pub fn get_parameter<Arg0: ProxyArg<ManagedBuffer<Env::Api>>>(
        self,
        key: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, u64> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getParameter")
            .argument(&key)
            .original_result()
    }

    pub fn get_parameters(
        self,
    ) -> TxTypedCall<
        Env,
        From,
        To,
        NotPayable,
        Gas,
        MultiValueEncoded<Env::Api, MultiValue2<ManagedBuffer<Env::Api>, u64>>,
    > {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getParameters")
            .original_result()
    }

    pub fn get_members(
        self,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, MultiValueEncoded<Env::Api, ManagedAddress<Env::Api>>>
    {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getMembers")
            .original_result()
    }

    pub fn get_members_count(self) -> TxTypedCall<Env, From, To, NotPayable, Gas, u64> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getMembersCount")
            .original_result()
    }

    pub fn calc_members_multisig_threshold(
        self,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, u64> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("calcMembersMultiSigAccountThreshold")
            .original_result()
    }

    pub fn calc_members_multisig_account(
        self,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ManagedAddress<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("calcMembersMultiSigAccount")
            .original_result()
    }
}
