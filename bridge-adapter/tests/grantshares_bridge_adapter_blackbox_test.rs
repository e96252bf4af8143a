use multiversx_sc_scenario::imports::*;

use grantshares_bridge_adapter::grantshares_bridge_adapter_proxy::GrantSharesBridgeAdapterProxy;
use grantshares_mock_bridge::{mock_bridge_proxy::MockBridgeProxy, types::Deposit};

const ADAPTER_CODE_PATH: MxscPath = MxscPath::new("output/grantshares-bridge-adapter.mxsc.json");
const BRIDGE_CODE_PATH: MxscPath = MxscPath::new("../mock-bridge/output/grantshares-mock-bridge.mxsc.json");

const ADAPTER_ADDRESS: TestSCAddress = TestSCAddress::new("grantshares-bridge-adapter");
const OTHER_ADAPTER_ADDRESS: TestSCAddress = TestSCAddress::new("other-bridge-adapter");
const FEE_FREE_ADAPTER_ADDRESS: TestSCAddress = TestSCAddress::new("fee-free-bridge-adapter");
const BRIDGE_ADDRESS: TestSCAddress = TestSCAddress::new("mock-bridge");

const DEPLOYER: TestAddress = TestAddress::new("deployer");
const OWNER: TestAddress = TestAddress::new("owner");
const GOV: TestAddress = TestAddress::new("gov");
const TREASURY: TestAddress = TestAddress::new("treasury");
const FUNDER: TestAddress = TestAddress::new("funder");
const BACKEND: TestAddress = TestAddress::new("backend");
const OUTSIDER: TestAddress = TestAddress::new("outsider");

const SUPPORTED_TOKEN: TestTokenIdentifier = TestTokenIdentifier::new("GRANT-123456");
const OTHER_TOKEN: TestTokenIdentifier = TestTokenIdentifier::new("OTHER-123456");

const MAX_FEE: u64 = 20;
const EGLD_FEE: u64 = 10;
const TOKEN_FEE: u64 = 5;

// ============================================================
// Helpers
// ============================================================

fn world() -> ScenarioWorld {
    let mut blockchain = ScenarioWorld::new();
    blockchain.set_current_dir_from_workspace("bridge-adapter");
    blockchain.register_contract(ADAPTER_CODE_PATH, grantshares_bridge_adapter::ContractBuilder);
    blockchain.register_contract(BRIDGE_CODE_PATH, grantshares_mock_bridge::ContractBuilder);
    blockchain
}

fn egld() -> EgldOrEsdtTokenIdentifier<StaticApi> {
    EgldOrEsdtTokenIdentifier::egld()
}

fn esdt(token: TestTokenIdentifier) -> EgldOrEsdtTokenIdentifier<StaticApi> {
    EgldOrEsdtTokenIdentifier::esdt(token.to_token_identifier())
}

fn recipient() -> ManagedByteArray<StaticApi, 20> {
    ManagedByteArray::new_from_bytes(&[7u8; 20])
}

struct AdapterSetup {
    world: ScenarioWorld,
}

impl AdapterSetup {
    fn new() -> Self {
        let mut world = world();
        for account in [DEPLOYER, OWNER, GOV, BACKEND] {
            world.account(account).nonce(1);
        }
        for account in [TREASURY, FUNDER, OUTSIDER] {
            world
                .account(account)
                .nonce(1)
                .balance(10_000)
                .esdt_balance(SUPPORTED_TOKEN, 10_000)
                .esdt_balance(OTHER_TOKEN, 10_000);
        }

        world
            .tx()
            .from(DEPLOYER)
            .typed(MockBridgeProxy)
            .init()
            .code(BRIDGE_CODE_PATH)
            .code_metadata(CodeMetadata::PAYABLE_BY_SC)
            .new_address(BRIDGE_ADDRESS)
            .run();
        for (token, fee) in [(egld(), EGLD_FEE), (esdt(SUPPORTED_TOKEN), TOKEN_FEE)] {
            world
                .tx()
                .from(DEPLOYER)
                .to(BRIDGE_ADDRESS)
                .typed(MockBridgeProxy)
                .set_fee(token, BigUint::from(fee))
                .run();
        }

        world
            .tx()
            .from(DEPLOYER)
            .typed(GrantSharesBridgeAdapterProxy)
            .init(
                OWNER.to_managed_address(),
                GOV.to_managed_address(),
                TREASURY.to_managed_address(),
                BRIDGE_ADDRESS.to_managed_address(),
                BigUint::from(MAX_FEE),
                BACKEND.to_managed_address(),
                FUNDER.to_managed_address(),
                SUPPORTED_TOKEN.to_token_identifier(),
            )
            .code(ADAPTER_CODE_PATH)
            .new_address(ADAPTER_ADDRESS)
            .run();

        AdapterSetup { world }
    }

    fn fund_egld(&mut self, from: TestAddress, amount: u64) {
        self.world
            .tx()
            .from(from)
            .to(ADAPTER_ADDRESS)
            .typed(GrantSharesBridgeAdapterProxy)
            .on_payment()
            .egld(amount)
            .run();
    }

    fn fund_token(&mut self, amount: u64) {
        self.world
            .tx()
            .from(TREASURY)
            .to(ADAPTER_ADDRESS)
            .typed(GrantSharesBridgeAdapterProxy)
            .on_payment()
            .single_esdt(&SUPPORTED_TOKEN.to_token_identifier(), 0, &BigUint::from(amount))
            .run();
    }

    fn bridge(&mut self, token: EgldOrEsdtTokenIdentifier<StaticApi>, amount: u64) {
        self.world
            .tx()
            .from(GOV)
            .to(ADAPTER_ADDRESS)
            .typed(GrantSharesBridgeAdapterProxy)
            .bridge(token, recipient(), BigUint::from(amount))
            .run();
    }

    fn bridge_expect_err(&mut self, token: EgldOrEsdtTokenIdentifier<StaticApi>, amount: u64, message: &str) {
        self.world
            .tx()
            .from(GOV)
            .to(ADAPTER_ADDRESS)
            .typed(GrantSharesBridgeAdapterProxy)
            .bridge(token, recipient(), BigUint::from(amount))
            .returns(ExpectError(4, message))
            .run();
    }

    fn check_deposit(&mut self, index: usize, token: EgldOrEsdtTokenIdentifier<StaticApi>, amount: u64, fee: u64) {
        let deposit = self
            .world
            .query()
            .to(BRIDGE_ADDRESS)
            .typed(MockBridgeProxy)
            .get_deposit(index)
            .returns(ReturnsResult)
            .run();
        assert_eq!(
            deposit,
            Deposit {
                depositor: ADAPTER_ADDRESS.to_managed_address(),
                to: recipient(),
                token,
                amount: BigUint::from(amount),
                fee: BigUint::from(fee),
            }
        );
    }

    fn check_deposit_count(&mut self, count: usize) {
        self.world
            .query()
            .to(BRIDGE_ADDRESS)
            .typed(MockBridgeProxy)
            .get_deposit_count()
            .returns(ExpectValue(count))
            .run();
    }
}

// ============================================================
// Deploy
// ============================================================

#[test]
fn deploy_validates_configuration() {
    let mut setup = AdapterSetup::new();

    setup
        .world
        .tx()
        .from(DEPLOYER)
        .typed(GrantSharesBridgeAdapterProxy)
        .init(
            OWNER.to_managed_address(),
            ManagedAddress::<StaticApi>::zero(),
            TREASURY.to_managed_address(),
            BRIDGE_ADDRESS.to_managed_address(),
            BigUint::from(MAX_FEE),
            BACKEND.to_managed_address(),
            FUNDER.to_managed_address(),
            SUPPORTED_TOKEN.to_token_identifier(),
        )
        .code(ADAPTER_CODE_PATH)
        .new_address(OTHER_ADAPTER_ADDRESS)
        .returns(ExpectError(4, "invalid address"))
        .run();

    setup
        .world
        .tx()
        .from(DEPLOYER)
        .typed(GrantSharesBridgeAdapterProxy)
        .init(
            OWNER.to_managed_address(),
            GOV.to_managed_address(),
            TREASURY.to_managed_address(),
            BRIDGE_ADDRESS.to_managed_address(),
            BigUint::zero(),
            BACKEND.to_managed_address(),
            FUNDER.to_managed_address(),
            SUPPORTED_TOKEN.to_token_identifier(),
        )
        .code(ADAPTER_CODE_PATH)
        .new_address(FEE_FREE_ADAPTER_ADDRESS)
        .run();
    setup
        .world
        .query()
        .to(FEE_FREE_ADAPTER_ADDRESS)
        .typed(GrantSharesBridgeAdapterProxy)
        .get_max_fee()
        .returns(ExpectValue(BigUint::zero()))
        .run();

    setup
        .world
        .query()
        .to(ADAPTER_ADDRESS)
        .typed(GrantSharesBridgeAdapterProxy)
        .get_gov_contract()
        .returns(ExpectValue(GOV.to_managed_address()))
        .run();
    setup
        .world
        .query()
        .to(ADAPTER_ADDRESS)
        .typed(GrantSharesBridgeAdapterProxy)
        .get_treasury_contract()
        .returns(ExpectValue(TREASURY.to_managed_address()))
        .run();
    setup
        .world
        .query()
        .to(ADAPTER_ADDRESS)
        .typed(GrantSharesBridgeAdapterProxy)
        .get_bridge_contract()
        .returns(ExpectValue(BRIDGE_ADDRESS.to_managed_address()))
        .run();
    setup
        .world
        .query()
        .to(ADAPTER_ADDRESS)
        .typed(GrantSharesBridgeAdapterProxy)
        .get_max_fee()
        .returns(ExpectValue(BigUint::from(MAX_FEE)))
        .run();
    setup
        .world
        .query()
        .to(ADAPTER_ADDRESS)
        .typed(GrantSharesBridgeAdapterProxy)
        .get_supported_token()
        .returns(ExpectValue(SUPPORTED_TOKEN.to_token_identifier()))
        .run();
}

// ============================================================
// Payments
// ============================================================

#[test]
fn payments_follow_sender_rules() {
    let mut setup = AdapterSetup::new();

    setup.fund_egld(FUNDER, 100);
    setup.fund_egld(TREASURY, 200);
    setup.fund_token(300);
    setup
        .world
        .check_account(ADAPTER_ADDRESS)
        .balance(300)
        .esdt_balance(SUPPORTED_TOKEN, 300);

    setup
        .world
        .tx()
        .from(OUTSIDER)
        .to(ADAPTER_ADDRESS)
        .typed(GrantSharesBridgeAdapterProxy)
        .on_payment()
        .egld(100)
        .returns(ExpectError(4, "only treasury or whitelisted funder"))
        .run();

    // The funder may only send EGLD.
    setup
        .world
        .tx()
        .from(FUNDER)
        .to(ADAPTER_ADDRESS)
        .typed(GrantSharesBridgeAdapterProxy)
        .on_payment()
        .single_esdt(&SUPPORTED_TOKEN.to_token_identifier(), 0, &BigUint::from(10u64))
        .returns(ExpectError(4, "only treasury"))
        .run();

    setup
        .world
        .tx()
        .from(TREASURY)
        .to(ADAPTER_ADDRESS)
        .typed(GrantSharesBridgeAdapterProxy)
        .on_payment()
        .single_esdt(&OTHER_TOKEN.to_token_identifier(), 0, &BigUint::from(10u64))
        .returns(ExpectError(4, "unsupported token"))
        .run();

    setup
        .world
        .check_account(ADAPTER_ADDRESS)
        .balance(300)
        .esdt_balance(SUPPORTED_TOKEN, 300);
}

#[test]
fn verify_accepts_only_the_backend() {
    let mut setup = AdapterSetup::new();

    setup
        .world
        .tx()
        .from(BACKEND)
        .to(ADAPTER_ADDRESS)
        .typed(GrantSharesBridgeAdapterProxy)
        .verify()
        .returns(ExpectValue(true))
        .run();

    setup
        .world
        .tx()
        .from(OUTSIDER)
        .to(ADAPTER_ADDRESS)
        .typed(GrantSharesBridgeAdapterProxy)
        .verify()
        .returns(ExpectError(4, "not authorized"))
        .run();
}

// ============================================================
// Bridge
// ============================================================

#[test]
fn bridge_validates_caller_and_arguments() {
    let mut setup = AdapterSetup::new();
    setup.fund_egld(FUNDER, 1_000);

    setup
        .world
        .tx()
        .from(OUTSIDER)
        .to(ADAPTER_ADDRESS)
        .typed(GrantSharesBridgeAdapterProxy)
        .bridge(egld(), recipient(), BigUint::from(100u64))
        .returns(ExpectError(4, "only governance contract"))
        .run();

    setup
        .world
        .tx()
        .from(GOV)
        .to(ADAPTER_ADDRESS)
        .typed(GrantSharesBridgeAdapterProxy)
        .bridge(egld(), ManagedByteArray::<StaticApi, 20>::new_from_bytes(&[0u8; 20]), BigUint::from(100u64))
        .returns(ExpectError(4, "invalid to"))
        .run();

    setup.bridge_expect_err(egld(), 0, "invalid amount");
    setup.bridge_expect_err(esdt(OTHER_TOKEN), 100, "unsupported token");
    // Amount plus fee must be covered.
    setup.bridge_expect_err(egld(), 1_000, "insufficient balance");

    setup.check_deposit_count(0);
    setup.world.check_account(ADAPTER_ADDRESS).balance(1_000);
}

#[test]
fn egld_bridge_pays_amount_plus_fee() {
    let mut setup = AdapterSetup::new();
    setup.fund_egld(FUNDER, 1_000);

    setup.bridge(egld(), 990);

    setup.world.check_account(ADAPTER_ADDRESS).balance(0);
    setup.world.check_account(BRIDGE_ADDRESS).balance(1_000);
    setup.check_deposit_count(1);
    setup.check_deposit(1, egld(), 990, EGLD_FEE);
}

#[test]
fn token_bridge_pays_fee_in_egld() {
    let mut setup = AdapterSetup::new();
    setup.fund_token(500);

    setup.bridge_expect_err(esdt(SUPPORTED_TOKEN), 100, "insufficient balance for fee");

    setup.fund_egld(FUNDER, TOKEN_FEE);
    setup.bridge_expect_err(esdt(SUPPORTED_TOKEN), 600, "insufficient balance");

    setup.bridge(esdt(SUPPORTED_TOKEN), 500);

    setup
        .world
        .check_account(ADAPTER_ADDRESS)
        .balance(0)
        .esdt_balance(SUPPORTED_TOKEN, 0);
    setup
        .world
        .check_account(BRIDGE_ADDRESS)
        .balance(TOKEN_FEE)
        .esdt_balance(SUPPORTED_TOKEN, 500);
    setup.check_deposit(1, esdt(SUPPORTED_TOKEN), 500, TOKEN_FEE);
}

#[test]
fn bridge_fee_above_max_fee_reverts() {
    let mut setup = AdapterSetup::new();
    setup.fund_egld(FUNDER, 1_000);

    setup
        .world
        .tx()
        .from(DEPLOYER)
        .to(BRIDGE_ADDRESS)
        .typed(MockBridgeProxy)
        .set_fee(egld(), BigUint::from(MAX_FEE + 1))
        .run();
    setup.bridge_expect_err(egld(), 100, "fee exceeds max fee");
    setup.world.check_account(ADAPTER_ADDRESS).balance(1_000);

    setup
        .world
        .tx()
        .from(OWNER)
        .to(ADAPTER_ADDRESS)
        .typed(GrantSharesBridgeAdapterProxy)
        .set_max_fee(BigUint::from(MAX_FEE + 1))
        .run();
    setup.bridge(egld(), 100);
    setup.check_deposit(1, egld(), 100, MAX_FEE + 1);
    setup.world.check_account(ADAPTER_ADDRESS).balance(1_000 - 100 - (MAX_FEE + 1));
}

#[test]
fn zero_max_fee_allows_only_fee_free_bridging() {
    let mut setup = AdapterSetup::new();
    setup.fund_egld(FUNDER, 1_000);

    setup
        .world
        .tx()
        .from(OWNER)
        .to(ADAPTER_ADDRESS)
        .typed(GrantSharesBridgeAdapterProxy)
        .set_max_fee(BigUint::zero())
        .run();
    setup.bridge_expect_err(egld(), 100, "fee exceeds max fee");
    setup.check_deposit_count(0);

    setup
        .world
        .tx()
        .from(DEPLOYER)
        .to(BRIDGE_ADDRESS)
        .typed(MockBridgeProxy)
        .set_fee(egld(), BigUint::zero())
        .run();
    setup.bridge(egld(), 100);
    setup.check_deposit(1, egld(), 100, 0);
    setup.world.check_account(ADAPTER_ADDRESS).balance(900);
}

// ============================================================
// Owner configuration
// ============================================================

#[test]
fn owner_updates_configuration() {
    let mut setup = AdapterSetup::new();

    setup
        .world
        .tx()
        .from(OUTSIDER)
        .to(ADAPTER_ADDRESS)
        .typed(GrantSharesBridgeAdapterProxy)
        .set_max_fee(BigUint::from(50u64))
        .returns(ExpectError(4, "only owner"))
        .run();
    setup
        .world
        .tx()
        .from(OWNER)
        .to(ADAPTER_ADDRESS)
        .typed(GrantSharesBridgeAdapterProxy)
        .set_max_fee(BigUint::zero())
        .run();
    setup
        .world
        .query()
        .to(ADAPTER_ADDRESS)
        .typed(GrantSharesBridgeAdapterProxy)
        .get_max_fee()
        .returns(ExpectValue(BigUint::zero()))
        .run();
    setup
        .world
        .tx()
        .from(OWNER)
        .to(ADAPTER_ADDRESS)
        .typed(GrantSharesBridgeAdapterProxy)
        .set_whitelisted_funder(ManagedAddress::<StaticApi>::zero())
        .returns(ExpectError(4, "invalid address"))
        .run();

    setup
        .world
        .tx()
        .from(OWNER)
        .to(ADAPTER_ADDRESS)
        .typed(GrantSharesBridgeAdapterProxy)
        .set_whitelisted_funder(OUTSIDER.to_managed_address())
        .run();
    setup.fund_egld(OUTSIDER, 10);
    setup
        .world
        .tx()
        .from(FUNDER)
        .to(ADAPTER_ADDRESS)
        .typed(GrantSharesBridgeAdapterProxy)
        .on_payment()
        .egld(10)
        .returns(ExpectError(4, "only treasury or whitelisted funder"))
        .run();

    setup
        .world
        .tx()
        .from(OWNER)
        .to(ADAPTER_ADDRESS)
        .typed(GrantSharesBridgeAdapterProxy)
        .set_backend_account(OUTSIDER.to_managed_address())
        .run();
    setup
        .world
        .tx()
        .from(BACKEND)
        .to(ADAPTER_ADDRESS)
        .typed(GrantSharesBridgeAdapterProxy)
        .verify()
        .returns(ExpectError(4, "not authorized"))
        .run();
    setup
        .world
        .query()
        .to(ADAPTER_ADDRESS)
        .typed(GrantSharesBridgeAdapterProxy)
        .get_backend_account()
        .returns(ExpectValue(OUTSIDER.to_managed_address()))
        .run();

    setup
        .world
        .tx()
        .from(OWNER)
        .to(ADAPTER_ADDRESS)
        .typed(GrantSharesBridgeAdapterProxy)
        .set_owner(OUTSIDER.to_managed_address())
        .run();
    setup
        .world
        .tx()
        .from(OWNER)
        .to(ADAPTER_ADDRESS)
        .typed(GrantSharesBridgeAdapterProxy)
        .set_max_fee(BigUint::from(50u64))
        .returns(ExpectError(4, "only owner"))
        .run();
    setup
        .world
        .tx()
        .from(OUTSIDER)
        .to(ADAPTER_ADDRESS)
        .typed(GrantSharesBridgeAdapterProxy)
        .set_max_fee(BigUint::from(50u64))
        .run();
    setup
        .world
        .query()
        .to(ADAPTER_ADDRESS)
        .typed(GrantSharesBridgeAdapterProxy)
        .get_owner()
        .returns(ExpectValue(OUTSIDER.to_managed_address()))
        .run();
    setup
        .world
        .query()
        .to(ADAPTER_ADDRESS)
        .typed(GrantSharesBridgeAdapterProxy)
        .get_max_fee()
        .returns(ExpectValue(BigUint::from(50u64)))
        .run();
}
