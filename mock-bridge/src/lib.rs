#![no_std]

multiversx_sc::imports!();

pub mod mock_bridge_proxy;
pub mod types;

use grantshares_common::errors::*;
use types::Deposit;

// ============================================================
// Contract
// ============================================================

/// Stand-in for the cross-chain bridge. Charges a configurable fee per token
/// and records every deposit instead of relaying it.
#[multiversx_sc::contract]
pub trait MockBridge {
    #[init]
    fn init(&self) {}

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: setFee
    // ========================================================

    #[endpoint(setFee)]
    fn set_fee(&self, token: EgldOrEsdtTokenIdentifier, fee: BigUint) {
        self.fees().insert(token, fee);
    }

    // ========================================================
    // ENDPOINT: depositNative
    // EGLD deposit. The payment carries the amount plus the fee.
    // ========================================================

    #[payable("EGLD")]
    #[endpoint(depositNative)]
    fn deposit_native(&self, to: ManagedByteArray<Self::Api, 20>, max_fee: BigUint) {
        let payment = self.call_value().egld_value().clone_value();
        let token = EgldOrEsdtTokenIdentifier::egld();
        let fee = self.checked_fee(&token, &max_fee);
        require!(payment > fee, ERR_INVALID_AMOUNT);

        let amount = payment - &fee;
        self.record_deposit(to, token, amount, fee);
    }

    // ========================================================
    // ENDPOINT: depositToken
    // ESDT deposit. The fee was paid separately in EGLD.
    // ========================================================

    #[payable("*")]
    #[endpoint(depositToken)]
    fn deposit_token(&self, to: ManagedByteArray<Self::Api, 20>, max_fee: BigUint) {
        let payment = self.call_value().single_esdt();
        let token = EgldOrEsdtTokenIdentifier::esdt(payment.token_identifier.clone());
        let fee = self.checked_fee(&token, &max_fee);
        require!(payment.amount > 0u64, ERR_INVALID_AMOUNT);

        self.record_deposit(to, token, payment.amount.clone(), fee);
    }

    // ========================================================
    // INTERNAL
    // ========================================================

    fn checked_fee(&self, token: &EgldOrEsdtTokenIdentifier, max_fee: &BigUint) -> BigUint {
        let fee = self.get_fee(token.clone());
        require!(&fee <= max_fee, ERR_FEE_EXCEEDS_MAX_FEE);
        fee
    }

    fn record_deposit(
        &self,
        to: ManagedByteArray<Self::Api, 20>,
        token: EgldOrEsdtTokenIdentifier,
        amount: BigUint,
        fee: BigUint,
    ) {
        let depositor = self.blockchain().get_caller();
        self.deposit_event(&depositor, &token, &to, &amount, &fee);
        self.deposits().push(&Deposit {
            depositor,
            to,
            token,
            amount,
            fee,
        });
    }

    // ========================================================
    // VIEWS
    // ========================================================

    /// Zero for tokens without a configured fee.
    #[view(getFee)]
    fn get_fee(&self, token: EgldOrEsdtTokenIdentifier) -> BigUint {
        self.fees().get(&token).unwrap_or_else(BigUint::zero)
    }

    #[view(getDepositCount)]
    fn get_deposit_count(&self) -> usize {
        self.deposits().len()
    }

    /// 1-based.
    #[view(getDeposit)]
    fn get_deposit(&self, index: usize) -> Deposit<Self::Api> {
        self.deposits().get(index)
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("deposit")]
    fn deposit_event(
        &self,
        #[indexed] depositor: &ManagedAddress,
        #[indexed] token: &EgldOrEsdtTokenIdentifier,
        #[indexed] to: &ManagedByteArray<Self::Api, 20>,
        #[indexed] amount: &BigUint,
        fee: &BigUint,
    );

    // ========================================================
    // STORAGE
    // ========================================================

    #[storage_mapper("fees")]
    fn fees(&self) -> MapMapper<EgldOrEsdtTokenIdentifier, BigUint>;

    #[storage_mapper("deposits")]
    fn deposits(&self) -> VecMapper<Deposit<Self::Api>>;
}
