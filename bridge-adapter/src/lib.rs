#![no_std]

multiversx_sc::imports!();

pub mod bridge_proxy;
pub mod grantshares_bridge_adapter_proxy;

use bridge_proxy::BridgeProxy;
use grantshares_common::errors::*;

// ============================================================
// Contract
// ============================================================

/// Holds funds released by the treasury and moves them across the bridge
/// when governance asks for it.
#[multiversx_sc::contract]
pub trait GrantSharesBridgeAdapter: grantshares_common::payments::PaymentsModule {
    // ========================================================
    // Init / Upgrade
    // ========================================================

    #[init]
    fn init(
        &self,
        owner: ManagedAddress,
        gov_contract: ManagedAddress,
        treasury_contract: ManagedAddress,
        bridge_contract: ManagedAddress,
        max_fee: BigUint,
        backend_account: ManagedAddress,
        whitelisted_funder: ManagedAddress,
        supported_token: TokenIdentifier,
    ) {
        for address in [
            &owner,
            &gov_contract,
            &treasury_contract,
            &bridge_contract,
            &backend_account,
            &whitelisted_funder,
        ] {
            require!(!address.is_zero(), ERR_INVALID_ADDRESS);
        }
        require!(supported_token.is_valid_esdt_identifier(), ERR_UNSUPPORTED_TOKEN);

        self.owner().set(&owner);
        self.gov_contract().set(&gov_contract);
        self.treasury_contract().set(&treasury_contract);
        self.bridge_contract().set(&bridge_contract);
        self.max_fee().set(&max_fee);
        self.backend_account().set(&backend_account);
        self.whitelisted_funder().set(&whitelisted_funder);
        self.supported_token().set(&supported_token);
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: onPayment
    // EGLD from the treasury or the whitelisted funder, the
    // supported token from the treasury only.
    // ========================================================

    #[payable("*")]
    #[endpoint(onPayment)]
    fn on_payment(&self) {
        let payment = self.call_value().egld_or_single_esdt();
        let caller = self.blockchain().get_caller();

        if payment.token_identifier.is_egld() {
            require!(
                caller.is_zero()
                    || caller == self.treasury_contract().get()
                    || caller == self.whitelisted_funder().get(),
                ERR_ONLY_TREASURY_OR_FUNDER
            );
        } else if payment.token_identifier == self.supported_token_id() {
            require!(caller == self.treasury_contract().get(), ERR_ONLY_TREASURY);
        } else {
            sc_panic!(ERR_UNSUPPORTED_TOKEN);
        }

        self.tokens_received_event(&caller, &payment.token_identifier, &payment.amount);
    }

    // ========================================================
    // ENDPOINT: verify
    // Authorization hook for transactions signed by the backend.
    // ========================================================

    #[endpoint(verify)]
    fn verify(&self) -> bool {
        require!(
            self.blockchain().get_caller() == self.backend_account().get(),
            ERR_NOT_AUTHORIZED
        );
        true
    }

    // ========================================================
    // ENDPOINT: bridge
    // Governance-only. The bridge fee is charged on top of
    // `amount` and always paid in EGLD.
    // ========================================================

    #[endpoint(bridge)]
    fn bridge(&self, token: EgldOrEsdtTokenIdentifier, to: ManagedByteArray<Self::Api, 20>, amount: BigUint) {
        require!(
            self.blockchain().get_caller() == self.gov_contract().get(),
            ERR_ONLY_GOV_CONTRACT
        );
        require!(to.to_byte_array() != [0u8; 20], ERR_INVALID_TO);
        require!(amount > 0u64, ERR_INVALID_AMOUNT);

        let bridge = self.bridge_contract().get();
        let max_fee = self.max_fee().get();
        let fee = self
            .tx()
            .to(&bridge)
            .typed(BridgeProxy)
            .get_fee(&token)
            .returns(ReturnsResult)
            .sync_call();

        if token.is_egld() {
            let total = &amount + &fee;
            require!(self.own_balance(&token) >= total, ERR_INSUFFICIENT_BALANCE);
            self.tx()
                .to(&bridge)
                .typed(BridgeProxy)
                .deposit_native(&to, &max_fee)
                .egld(&total)
                .sync_call();
        } else if token == self.supported_token_id() {
            require!(
                self.own_balance(&EgldOrEsdtTokenIdentifier::egld()) >= fee,
                ERR_INSUFFICIENT_BALANCE_FOR_FEE
            );
            require!(self.own_balance(&token) >= amount, ERR_INSUFFICIENT_BALANCE);
            if fee > 0u64 {
                self.tx().to(&bridge).egld(&fee).transfer();
            }
            self.tx()
                .to(&bridge)
                .typed(BridgeProxy)
                .deposit_token(&to, &max_fee)
                .single_esdt(&self.supported_token().get(), 0, &amount)
                .sync_call();
        } else {
            sc_panic!(ERR_UNSUPPORTED_TOKEN);
        }

        self.bridged_event(&token, &to, &amount, &fee);
    }

    // ========================================================
    // ENDPOINT: owner configuration
    // ========================================================

    #[endpoint(setMaxFee)]
    fn set_max_fee(&self, max_fee: BigUint) {
        self.require_owner();
        self.max_fee().set(&max_fee);
        self.max_fee_changed_event(&max_fee);
    }

    #[endpoint(setWhitelistedFunder)]
    fn set_whitelisted_funder(&self, funder: ManagedAddress) {
        self.require_owner();
        require!(!funder.is_zero(), ERR_INVALID_ADDRESS);
        self.whitelisted_funder().set(&funder);
        self.whitelisted_funder_changed_event(&funder);
    }

    #[endpoint(setBackendAccount)]
    fn set_backend_account(&self, account: ManagedAddress) {
        self.require_owner();
        require!(!account.is_zero(), ERR_INVALID_ADDRESS);
        self.backend_account().set(&account);
        self.backend_account_changed_event(&account);
    }

    #[endpoint(setOwner)]
    fn set_owner(&self, owner: ManagedAddress) {
        self.require_owner();
        require!(!owner.is_zero(), ERR_INVALID_ADDRESS);
        self.owner().set(&owner);
        self.owner_changed_event(&owner);
    }

    // ========================================================
    // INTERNAL
    // ========================================================

    fn require_owner(&self) {
        require!(
            self.blockchain().get_caller() == self.owner().get(),
            ERR_ONLY_OWNER
        );
    }

    fn supported_token_id(&self) -> EgldOrEsdtTokenIdentifier {
        EgldOrEsdtTokenIdentifier::esdt(self.supported_token().get())
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(getOwner)]
    fn get_owner(&self) -> ManagedAddress {
        self.owner().get()
    }

    #[view(getGovContract)]
    fn get_gov_contract(&self) -> ManagedAddress {
        self.gov_contract().get()
    }

    #[view(getTreasuryContract)]
    fn get_treasury_contract(&self) -> ManagedAddress {
        self.treasury_contract().get()
    }

    #[view(getBridgeContract)]
    fn get_bridge_contract(&self) -> ManagedAddress {
        self.bridge_contract().get()
    }

    #[view(getMaxFee)]
    fn get_max_fee(&self) -> BigUint {
        self.max_fee().get()
    }

    #[view(getBackendAccount)]
    fn get_backend_account(&self) -> ManagedAddress {
        self.backend_account().get()
    }

    #[view(getWhitelistedFunder)]
    fn get_whitelisted_funder(&self) -> ManagedAddress {
        self.whitelisted_funder().get()
    }

    #[view(getSupportedToken)]
    fn get_supported_token(&self) -> TokenIdentifier {
        self.supported_token().get()
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

    #[event("bridged")]
    fn bridged_event(
        &self,
        #[indexed] token: &EgldOrEsdtTokenIdentifier,
        #[indexed] to: &ManagedByteArray<Self::Api, 20>,
        #[indexed] amount: &BigUint,
        fee: &BigUint,
    );

    #[event("maxFeeChanged")]
    fn max_fee_changed_event(&self, max_fee: &BigUint);

    #[event("whitelistedFunderChanged")]
    fn whitelisted_funder_changed_event(&self, #[indexed] funder: &ManagedAddress);

    #[event("backendAccountChanged")]
    fn backend_account_changed_event(&self, #[indexed] account: &ManagedAddress);

    #[event("ownerChanged")]
    fn owner_changed_event(&self, #[indexed] owner: &ManagedAddress);

    // ========================================================
    // STORAGE
    // ========================================================

    #[storage_mapper("owner")]
    fn owner(&self) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("govContract")]
    fn gov_contract(&self) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("treasuryContract")]
    fn treasury_contract(&self) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("bridgeContract")]
    fn bridge_contract(&self) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("maxFee")]
    fn max_fee(&self) -> SingleValueMapper<BigUint>;

    #[storage_mapper("backendAccount")]
    fn backend_account(&self) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("whitelistedFunder")]
    fn whitelisted_funder(&self) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("supportedToken")]
    fn supported_token(&self) -> SingleValueMapper<TokenIdentifier>;
}
