use multiversx_sc::proxy_imports::*;

use crate::types::Funder;

pub struct GrantSharesTreasuryProxy;

impl<Env, From, To, Gas> TxProxyTrait<Env, From, To, Gas> for GrantSharesTreasuryProxy
where
    Env: TxEnv,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    type TxProxyMethods = GrantSharesTreasuryProxyMethods<Env, From, To, Gas>;

    fn proxy_methods(self, tx: Tx<Env, From, To, (), Gas, (), ()>) -> Self::TxProxyMethods {
        GrantSharesTreasuryProxyMethods { wrapped_tx: tx }
    }
}

pub struct GrantSharesTreasuryProxyMethods<Env, From, To, Gas>
where
    Env: TxEnv,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    wrapped_tx: Tx<Env, From, To, (), Gas, (), ()>,
}

impl<Env, From, Gas> GrantSharesTreasuryProxyMethods<Env, From, (), Gas>
where
    Env: TxEnv,
    Env::Api: VMApi,
    From: TxFrom<Env>,
    Gas: TxGas<Env>,
{
    pub fn init<
        Arg0: ProxyArg<ManagedAddress<Env::Api>>,
        Arg1: ProxyArg<u64>,
        Arg2: ProxyArg<ManagedVec<Env::Api, Funder<Env::Api>>>,
        Arg3: ProxyArg<MultiValueEncoded<Env::Api, MultiValue2<EgldOrEsdtTokenIdentifier<Env::Api>, BigUint<Env::Api>>>>,
    >(
        self,
        owner: Arg0,
        funders_multisig_threshold_ratio: Arg1,
        funders: Arg2,
        whitelisted_tokens: Arg3,
    ) -> TxTypedDeploy<Env, From, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_deploy()
            .argument(&owner)
            .argument(&funders_multisig_threshold_ratio)
            .argument(&funders)
            .argument(&whitelisted_tokens)
            .original_result()
    }
}

impl<Env, From, To, Gas> GrantSharesTreasuryProxyMethods<Env, From, To, Gas>
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

    pub fn on_payment(self) -> TxTypedCall<Env, From, To, (), Gas, ()> {
        self.wrapped_tx.raw_call("onPayment").original_result()
    }

    pub fn release_tokens<
        Arg0: ProxyArg<EgldOrEsdtTokenIdentifier<Env::Api>>,
        Arg1: ProxyArg<ManagedAddress<Env::Api>>,
        Arg2: ProxyArg<BigUint<Env::Api>>,
    >(
        self,
        token: Arg0,
        to: Arg1,
        amount: Arg2,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("releaseTokens")
            .argument(&token)
            .argument(&to)
            .argument(&amount)
            .original_result()
    }

    pub fn drain(self) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("drain")
            .original_result()
    }

    pub fn add_funder<
        Arg0: ProxyArg<ManagedAddress<Env::Api>>,
        Arg1: ProxyArg<ManagedVec<Env::Api, ManagedAddress<Env::Api>>>,
    >(
        self,
        address: Arg0,
        public_keys: Arg1,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("addFunder")
            .argument(&address)
            .argument(&public_keys)
            .original_result()
    }

    pub fn remove_funder<Arg0: ProxyArg<ManagedAddress<Env::Api>>>(
        self,
        address: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("removeFunder")
            .argument(&address)
            .original_result()
    }

    pub fn add_whitelisted_token<
        Arg0: ProxyArg<EgldOrEsdtTokenIdentifier<Env::Api>>,
        Arg1: ProxyArg<BigUint<Env::Api>>,
    >(
        self,
        token: Arg0,
        max_funding_amount: Arg1,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("addWhitelistedToken")
            .argument(&token)
            .argument(&max_funding_amount)
            .original_result()
    }

    pub fn remove_whitelisted_token<Arg0: ProxyArg<EgldOrEsdtTokenIdentifier<Env::Api>>>(
        self,
        token: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("removeWhitelistedToken")
            .argument(&token)
            .original_result()
    }

    pub fn set_funders_multisig_threshold_ratio<Arg0: ProxyArg<u64>>(
        self,
        ratio: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("setFundersMultiSigThresholdRatio")
            .argument(&ratio)
            .original_result()
    }

    pub fn is_paused(self) -> TxTypedCall<Env, From, To, NotPayable, Gas, bool> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("isPaused")
            .original_result()
    }

    pub fn calc_funders_multisig_threshold(self) -> TxTypedCall<Env, From, To, NotPayable, Gas, u64> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("calcFundersMultiSigAddressThreshold")
            .original_result()
    }

    pub fn calc_funders_multisig_address(
        self,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ManagedAddress<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("calcFundersMultiSigAddress")
            .original_result()
    }

    pub fn get_funders(
        self,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, MultiValueEncoded<Env::Api, Funder<Env::Api>>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getFunders")
            .original_result()
    }

    pub fn get_whitelisted_tokens(
        self,
    ) -> TxTypedCall<
        Env,
        From,
        To,
        NotPayable,
        Gas,
        MultiValueEncoded<Env::Api, MultiValue2<EgldOrEsdtTokenIdentifier<Env::Api>, BigUint<Env::Api>>>,
    > {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getWhitelistedTokens")
            .original_result()
    }

    pub fn get_funders_multisig_threshold_ratio(
        self,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, u64> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getFundersMultiSigThresholdRatio")
            .original_result()
    }

    pub fn get_owner(self) -> TxTypedCall<Env, From, To, NotPayable, Gas, ManagedAddress<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getOwner")
            .original_result()
    }
}
