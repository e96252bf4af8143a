#![no_std]

multiversx_sc::imports!();

pub mod governance_proxy;
pub mod grantshares_treasury_proxy;
pub mod types;

use grantshares_common::{errors::*, multisig, rules};
use types::Funder;

// ============================================================
// Contract
// ============================================================

#[multiversx_sc::contract]
pub trait GrantSharesTreasury:
    grantshares_common::multisig::MultisigModule + grantshares_common::payments::PaymentsModule
{
    // ========================================================
    // Init / Upgrade
    // ========================================================

    /// `owner` is the governance contract. Its pause flag also pauses the treasury.
    #[init]
    fn init(
        &self,
        owner: ManagedAddress,
        funders_multisig_threshold_ratio: u64,
        funders: ManagedVec<Funder<Self::Api>>,
        whitelisted_tokens: MultiValueEncoded<MultiValue2<EgldOrEsdtTokenIdentifier, BigUint>>,
    ) {
        require!(!owner.is_zero(), ERR_INVALID_ADDRESS);
        require!(
            rules::is_threshold_ratio(funders_multisig_threshold_ratio),
            ERR_INVALID_THRESHOLD_RATIO
        );
        self.owner().set(&owner);
        self.funders_multisig_threshold_ratio()
            .set(funders_multisig_threshold_ratio);

        for funder in funders.iter() {
            self.insert_funder(funder.address.clone(), funder.public_keys.clone());
        }
        for entry in whitelisted_tokens.into_iter() {
            let (token, max_funding_amount) = entry.into_tuple();
            self.insert_whitelisted_token(token, max_funding_amount);
        }
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: onPayment
    // Deposits from whitelisted funders in whitelisted tokens.
    // ========================================================

    #[payable("*")]
    #[endpoint(onPayment)]
    fn on_payment(&self) {
        self.require_not_paused();
        let payment = self.call_value().egld_or_single_esdt();
        require!(
            self.whitelisted_tokens()
                .contains_key(&payment.token_identifier),
            ERR_NOT_WHITELISTED
        );

        let caller = self.blockchain().get_caller();
        let minted_egld = caller.is_zero() && payment.token_identifier.is_egld();
        if !minted_egld {
            require!(self.funders().contains_key(&caller), ERR_NOT_FUNDER);
        }

        self.tokens_received_event(&caller, &payment.token_identifier, &payment.amount);
    }

    // ========================================================
    // ENDPOINT: releaseTokens
    // Owner pays out a grant. Contract recipients get the
    // funds through their `onPayment` endpoint.
    // ========================================================

    #[endpoint(releaseTokens)]
    fn release_tokens(&self, token: EgldOrEsdtTokenIdentifier, to: ManagedAddress, amount: BigUint) {
        self.require_owner();
        self.require_not_paused();

        let max_funding_amount = match self.whitelisted_tokens().get(&token) {
            Some(max_funding_amount) => max_funding_amount,
            None => sc_panic!(ERR_NOT_WHITELISTED),
        };
        require!(amount > 0u64, ERR_INVALID_AMOUNT);
        require!(amount <= max_funding_amount, ERR_ABOVE_MAX_FUNDING);
        require!(self.own_balance(&token) >= amount, ERR_INSUFFICIENT_BALANCE);

        self.forward_payment(&to, &token, &amount);
        self.tokens_released_event(&token, &to, &amount);
    }

    // ========================================================
    // ENDPOINT: drain
    // Emergency exit while governance is paused. Everything
    // goes to the funders' multisig account.
    // ========================================================

    #[endpoint(drain)]
    fn drain(&self) {
        require!(self.is_paused(), ERR_NOT_PAUSED);
        let funders_multisig = self.calc_funders_multisig_address();
        require!(
            self.blockchain().get_caller() == funders_multisig,
            ERR_NOT_AUTHORIZED
        );

        for token in self.whitelisted_tokens().keys() {
            let balance = self.own_balance(&token);
            if balance > 0u64 {
                self.forward_payment(&funders_multisig, &token, &balance);
            }
        }
        self.drained_event(&funders_multisig);
    }

    // ========================================================
    // ENDPOINT: owner configuration
    // ========================================================

    #[endpoint(addFunder)]
    fn add_funder(&self, address: ManagedAddress, public_keys: ManagedVec<ManagedAddress>) {
        self.require_owner();
        self.require_not_paused();
        self.insert_funder(address, public_keys);
    }

    #[endpoint(removeFunder)]
    fn remove_funder(&self, address: ManagedAddress) {
        self.require_owner();
        self.require_not_paused();
        require!(
            self.funders().remove(&address).is_some(),
            ERR_NOT_FUNDER
        );
        self.funder_removed_event(&address);
    }

    #[endpoint(addWhitelistedToken)]
    fn add_whitelisted_token(&self, token: EgldOrEsdtTokenIdentifier, max_funding_amount: BigUint) {
        self.require_owner();
        self.require_not_paused();
        self.insert_whitelisted_token(token, max_funding_amount);
    }

    #[endpoint(removeWhitelistedToken)]
    fn remove_whitelisted_token(&self, token: EgldOrEsdtTokenIdentifier) {
        self.require_owner();
        self.require_not_paused();
        require!(
            self.whitelisted_tokens().remove(&token).is_some(),
            ERR_NOT_WHITELISTED
        );
        self.whitelisted_token_removed_event(&token);
    }

    #[endpoint(setFundersMultiSigThresholdRatio)]
    fn set_funders_multisig_threshold_ratio(&self, ratio: u64) {
        self.require_owner();
        self.require_not_paused();
        require!(rules::is_threshold_ratio(ratio), ERR_INVALID_THRESHOLD_RATIO);
        self.funders_multisig_threshold_ratio().set(ratio);
        self.threshold_changed_event(ratio);
    }

    // ========================================================
    // INTERNAL
    // ========================================================

    fn insert_funder(&self, address: ManagedAddress, public_keys: ManagedVec<ManagedAddress>) {
        require!(!address.is_zero(), ERR_INVALID_ADDRESS);
        require!(!self.funders().contains_key(&address), ERR_ALREADY_FUNDER);
        require!(!public_keys.is_empty(), ERR_NO_PUBLIC_KEYS);
        for key in public_keys.iter() {
            require!(!key.is_zero(), ERR_INVALID_ADDRESS);
        }
        self.funders().insert(address.clone(), public_keys);
        self.funder_added_event(&address);
    }

    fn insert_whitelisted_token(&self, token: EgldOrEsdtTokenIdentifier, max_funding_amount: BigUint) {
        require!(token.is_valid(), ERR_UNSUPPORTED_TOKEN);
        require!(
            !self.whitelisted_tokens().contains_key(&token),
            ERR_ALREADY_WHITELISTED
        );
        require!(max_funding_amount > 0u64, ERR_INVALID_AMOUNT);
        self.whitelisted_tokens()
            .insert(token.clone(), max_funding_amount.clone());
        self.whitelisted_token_added_event(&token, &max_funding_amount);
    }

    fn require_owner(&self) {
        require!(
            self.blockchain().get_caller() == self.owner().get(),
            ERR_ONLY_OWNER
        );
    }

    fn require_not_paused(&self) {
        require!(!self.is_paused(), ERR_PAUSED);
    }

    /// Every distinct key of every funder, sorted. A key shared by two
    /// funders signs once.
    fn funder_public_keys(&self) -> ManagedVec<ManagedAddress> {
        let mut keys = ManagedVec::new();
        for (_, funder_keys) in self.funders().iter() {
            for key in funder_keys.iter() {
                keys.push(key.clone_value());
            }
        }
        multisig::normalized_keys(&keys)
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(isPaused)]
    fn is_paused(&self) -> bool {
        let governance = self.owner().get();
        self.tx()
            .to(&governance)
            .typed(governance_proxy::GovernanceProxy)
            .is_paused()
            .returns(ReturnsResult)
            .sync_call()
    }

    #[view(calcFundersMultiSigAddressThreshold)]
    fn calc_funders_multisig_threshold(&self) -> u64 {
        let key_count = self.funder_public_keys().len() as u64;
        let threshold = rules::multisig_threshold(
            key_count,
            self.funders_multisig_threshold_ratio().get(),
        );
        require!(threshold > 0, ERR_ZERO_THRESHOLD);
        threshold
    }

    #[view(calcFundersMultiSigAddress)]
    fn calc_funders_multisig_address(&self) -> ManagedAddress {
        let threshold = self.calc_funders_multisig_threshold();
        self.derive_multisig_address(&self.funder_public_keys(), threshold)
    }

    #[view(getFunders)]
    fn get_funders(&self) -> MultiValueEncoded<Funder<Self::Api>> {
        let mut result = MultiValueEncoded::new();
        for (address, public_keys) in self.funders().iter() {
            result.push(Funder {
                address,
                public_keys,
            });
        }
        result
    }

    #[view(getWhitelistedTokens)]
    fn get_whitelisted_tokens(&self) -> MultiValueEncoded<MultiValue2<EgldOrEsdtTokenIdentifier, BigUint>> {
        let mut result = MultiValueEncoded::new();
        for (token, max_funding_amount) in self.whitelisted_tokens().iter() {
            result.push((token, max_funding_amount).into());
        }
        result
    }

    #[view(getFundersMultiSigThresholdRatio)]
    fn get_funders_multisig_threshold_ratio(&self) -> u64 {
        self.funders_multisig_threshold_ratio().get()
    }

    #[view(getOwner)]
    fn get_owner(&self) -> ManagedAddress {
        self.owner().get()
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("tokensReceived")]
    fn tokens_received_event(
        &self,
        #[indexed] from: &ManagedAddress,
        #[indexed] token: &EgldOrEsdtTokenIdentifier,
        amount: &BigUint,
    );

    #[event("tokensReleased")]
    fn tokens_released_event(
        &self,
        #[indexed] token: &EgldOrEsdtTokenIdentifier,
        #[indexed] to: &ManagedAddress,
        amount: &BigUint,
    );

    #[event("drained")]
    fn drained_event(&self, #[indexed] to: &ManagedAddress);

    #[event("funderAdded")]
    fn funder_added_event(&self, #[indexed] funder: &ManagedAddress);

    #[event("funderRemoved")]
    fn funder_removed_event(&self, #[indexed] funder: &ManagedAddress);

    #[event("whitelistedTokenAdded")]
    fn whitelisted_token_added_event(
        &self,
        #[indexed] token: &EgldOrEsdtTokenIdentifier,
        max_funding_amount: &BigUint,
    );

    #[event("whitelistedTokenRemoved")]
    fn whitelisted_token_removed_event(&self, #[indexed] token: &EgldOrEsdtTokenIdentifier);

    #[event("thresholdChanged")]
    fn threshold_changed_event(&self, #[indexed] ratio: u64);

    // ========================================================
    // STORAGE
    // ========================================================

    #[storage_mapper("owner")]
    fn owner(&self) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("funders")]
    fn funders(&self) -> MapMapper<ManagedAddress, ManagedVec<ManagedAddress>>;

    #[storage_mapper("whitelistedTokens")]
    fn whitelisted_tokens(&self) -> MapMapper<EgldOrEsdtTokenIdentifier, BigUint>;

    #[storage_mapper("fundersMultiSigThresholdRatio")]
    fn funders_multisig_threshold_ratio(&self) -> SingleValueMapper<u64>;
}
