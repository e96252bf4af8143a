multiversx_sc::imports!();
multiversx_sc::derive_imports!();

/// One accepted deposit. `amount` excludes the fee.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct Deposit<M: ManagedTypeApi> {
    pub depositor: ManagedAddress<M>,
    pub to: ManagedByteArray<M, 20>,
    pub token: EgldOrEsdtTokenIdentifier<M>,
    pub amount: BigUint<M>,
    pub fee: BigUint<M>,
}
