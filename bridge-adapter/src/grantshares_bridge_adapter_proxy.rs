use multiversx_sc::proxy_imports::*;

pub struct GrantSharesBridgeAdapterProxy;

impl<Env, From, To, Gas> TxProxyTrait<Env, From, To, Gas> for GrantSharesBridgeAdapterProxy
where
    Env: TxEnv,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    type TxProxyMethods = GrantSharesBridgeAdapterProxyMethods<Env, From, To, Gas>;

    fn proxy_methods(self, tx: Tx<Env, From, To, (), Gas, (), ()>) -> Self::TxProxyMethods {
        GrantSharesBridgeAdapterProxyMethods { wrapped_tx: tx }
    }
}

pub struct GrantSharesBridgeAdapterProxyMethods<Env, From, To, Gas>
where
    Env: TxEnv,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    wrapped_tx: Tx<Env, From, To, (), Gas, (), ()>,
}

impl<Env, From, Gas> GrantSharesBridgeAdapterProxyMethods<Env, From, (), Gas>
where
    Env: TxEnv,
    Env::Api: VMApi,
    From: TxFrom<Env>,
    Gas: TxGas<Env>,
{
    #[allow(clippy::too_many_arguments)]
    pub fn init<
        Arg0: ProxyArg<ManagedAddress<Env::Api>>,
        Arg1: ProxyArg<ManagedAddress<Env::Api>>,
        Arg2: ProxyArg<ManagedAddress<Env::Api>>,
        Arg3: ProxyArg<ManagedAddress<Env::Api>>,
        Arg4: ProxyArg<BigUint<Env::Api>>,
        Arg5: ProxyArg<ManagedAddress<Env::Api>>,
        Arg6: ProxyArg<ManagedAddress<Env::Api>>,
        Arg7: ProxyArg<TokenIdentifier<Env::Api>>,
    >(
        self,
        owner: Arg0,
        gov_contract: Arg1,
        treasury_contract: Arg2,
        bridge_contract: Arg3,
        max_fee: Arg4,
        backend_account: Arg5,
        whitelisted_funder: Arg6,
        supported_token: Arg7,
    ) -> TxTypedDeploy<Env, From, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_deploy()
            .argument(&owner)
            .argument(&gov_contract)
            .argument(&treasury_contract)
            .argument(&bridge_contract)
            .argument(&max_fee)
            .argument(&backend_account)
            .argument(&whitelisted_funder)
            .argument(&supported_token)
            .original_result()
    }
}

impl<Env, From, To, Gas> GrantSharesBridgeAdapterProxyMethods<Env, From, To, Gas>
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

    pub fn verify(self) -> TxTypedCall<Env, From, To, NotPayable, Gas, bool> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("verify")
            .original_result()
    }

    pub fn bridge<
        Arg0: ProxyArg<EgldOrEsdtTokenIdentifier<Env::Api>>,
        Arg1: ProxyArg<ManagedByteArray<Env::Api, 20>>,
        Arg2: ProxyArg<BigUint<Env::Api>>,
    >(
        self,
        token: Arg0,
        to: Arg1,
        amount: Arg2,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("bridge")
            .argument(&token)
            .argument(&to)
            .argument(&amount)
            .original_result()
    }

    pub fn set_max_fee<Arg0: ProxyArg<BigUint<Env::Api>>>(
        self,
        max_fee: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("setMaxFee")
            .argument(&max_fee)
            .original_result()
    }

    pub fn set_whitelisted_funder<Arg0: ProxyArg<ManagedAddress<Env::Api>>>(
        self,
        funder: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("setWhitelistedFunder")
            .argument(&funder)
            .original_result()
    }

    pub fn set_backend_account<Arg0: ProxyArg<ManagedAddress<Env::Api>>>(
        self,
        account: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("setBackendAccount")
            .argument(&account)
            .original_result()
    }

    pub fn set_owner<Arg0: ProxyArg<ManagedAddress<Env::Api>>>(
        self,
        owner: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("setOwner")
            .argument(&owner)
            .original_result()
    }

    pub fn get_owner(self) -> TxTypedCall<Env, From, To, NotPayable, Gas, ManagedAddress<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getOwner")
            .original_result()
    }

    pub fn get_gov_contract(self) -> TxTypedCall<Env, From, To, NotPayable, Gas, ManagedAddress<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getGovContract")
            .original_result()
    }

    pub fn get_treasury_contract(self) -> TxTypedCall<Env, From, To, NotPayable, Gas, ManagedAddress<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getTreasuryContract")
            .original_result()
    }

    pub fn get_bridge_contract(self) -> TxTypedCall<Env, From, To, NotPayable, Gas, ManagedAddress<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getBridgeContract")
            .original_result()
    }

    pub fn get_max_fee(self) -> TxTypedCall<Env, From, To, NotPayable, Gas, BigUint<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getMaxFee")
            .original_result()
    }

    pub fn get_backend_account(self) -> TxTypedCall<Env, From, To, NotPayable, Gas, ManagedAddress<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getBackendAccount")
            .original_result()
    }

    pub fn get_whitelisted_funder(self) -> TxTypedCall<Env, From, To, NotPayable, Gas, ManagedAddress<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getWhitelistedFunder")
            .original_result()
    }

    pub fn get_supported_token(self) -> TxTypedCall<Env, From, To, NotPayable, Gas, TokenIdentifier<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getSupportedToken")
            .original_result()
    }
}
