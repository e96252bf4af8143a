use multiversx_sc::proxy_imports::*;

/// Deposit interface of the cross-chain bridge.
pub struct BridgeProxy;

impl<Env, From, To, Gas> TxProxyTrait<Env, From, To, Gas> for BridgeProxy
where
    Env: TxEnv,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    type TxProxyMethods = BridgeProxyMethods<Env, From, To, Gas>;

    fn proxy_methods(self, tx: Tx<Env, From, To, (), Gas, (), ()>) -> Self::TxProxyMethods {
        BridgeProxyMethods { wrapped_tx: tx }
    }
}

pub struct BridgeProxyMethods<Env, From, To, Gas>
where
    Env: TxEnv,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    wrapped_tx: Tx<Env, From, To, (), Gas, (), ()>,
}

impl<Env, From, To, Gas> BridgeProxyMethods<Env, From, To, Gas>
where
    Env: TxEnv,
    Env::Api: VMApi,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    pub fn get_fee<Arg0: ProxyArg<EgldOrEsdtTokenIdentifier<Env::Api>>>(
        self,
        token: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, BigUint<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getFee")
            .argument(&token)
            .original_result()
    }

    /// Pays amount plus fee in EGLD.
    pub fn deposit_native<
        Arg0: ProxyArg<ManagedByteArray<Env::Api, 20>>,
        Arg1: ProxyArg<BigUint<Env::Api>>,
    >(
        self,
        to: Arg0,
        max_fee: Arg1,
    ) -> TxTypedCall<Env, From, To, (), Gas, ()> {
        self.wrapped_tx
            .raw_call("depositNative")
            .argument(&to)
            .argument(&max_fee)
            .original_result()
    }

    pub fn deposit_token<
        Arg0: ProxyArg<ManagedByteArray<Env::Api, 20>>,
        Arg1: ProxyArg<BigUint<Env::Api>>,
    >(
        self,
        to: Arg0,
        max_fee: Arg1,
    ) -> TxTypedCall<Env, From, To, (), Gas, ()> {
        self.wrapped_tx
            .raw_call("depositToken")
            .argument(&to)
            .argument(&max_fee)
            .original_result()
    }
}
