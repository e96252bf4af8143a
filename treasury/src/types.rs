multiversx_sc::imports!();
multiversx_sc::derive_imports!();

/// A funding account and the keys that sign for it. One key for a plain
/// account, several for a multisig account.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, ManagedVecItem, Clone, PartialEq, Debug)]
pub struct Funder<M: ManagedTypeApi> {
    pub address: ManagedAddress<M>,
    pub public_keys: ManagedVec<M, ManagedAddress<M>>,
}
