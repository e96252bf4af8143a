use multiversx_sc::codec::{top_encode_to_vec_u8_or_panic, TopEncode};
use multiversx_sc_scenario::imports::*;

use grantshares_bridge_adapter::grantshares_bridge_adapter_proxy::GrantSharesBridgeAdapterProxy;
use grantshares_common::call_flags;
use grantshares_gov::{
    grantshares_gov_proxy::GrantSharesGovProxy,
    types::{Intent, ProposalPhase, VoteChoice},
};
use grantshares_mock_bridge::{mock_bridge_proxy::MockBridgeProxy, types::Deposit};
use grantshares_treasury::{grantshares_treasury_proxy::GrantSharesTreasuryProxy, types::Funder};

const GOV_CODE_PATH: MxscPath = MxscPath::new("../governance/output/grantshares-gov.mxsc.json");
const TREASURY_CODE_PATH: MxscPath = MxscPath::new("../treasury/output/grantshares-treasury.mxsc.json");
const ADAPTER_CODE_PATH: MxscPath = MxscPath::new("output/grantshares-bridge-adapter.mxsc.json");
const BRIDGE_CODE_PATH: MxscPath = MxscPath::new("../mock-bridge/output/grantshares-mock-bridge.mxsc.json");

const GOV_ADDRESS: TestSCAddress = TestSCAddress::new("grantshares-gov");
const TREASURY_ADDRESS: TestSCAddress = TestSCAddress::new("grantshares-treasury");
const ADAPTER_ADDRESS: TestSCAddress = TestSCAddress::new("grantshares-bridge-adapter");
const BRIDGE_ADDRESS: TestSCAddress = TestSCAddress::new("mock-bridge");

const DEPLOYER: TestAddress = TestAddress::new("deployer");
const ALICE: TestAddress = TestAddress::new("alice");
const BOB: TestAddress = TestAddress::new("bob");
const CAROL: TestAddress = TestAddress::new("carol");
const FUNDER: TestAddress = TestAddress::new("funder");
const FUNDER_KEY: TestAddress = TestAddress::new("funder-key");
const BACKEND: TestAddress = TestAddress::new("backend");
const GRANTEE: TestAddress = TestAddress::new("grantee");
const PROPOSER: TestAddress = TestAddress::new("proposer");

const GRANT_TOKEN: TestTokenIdentifier = TestTokenIdentifier::new("GRANT-123456");

const START: u64 = 1_000;
const REVIEW_LEN: u64 = 100;
const VOTING_LEN: u64 = 100;
const TIMELOCK_LEN: u64 = 100;
const BRIDGE_FEE: u64 = 10;

// ============================================================
// Helpers
// ============================================================

fn world() -> ScenarioWorld {
    let mut blockchain = ScenarioWorld::new();
    blockchain.set_current_dir_from_workspace("bridge-adapter");
    blockchain.register_contract(GOV_CODE_PATH, grantshares_gov::ContractBuilder);
    blockchain.register_contract(TREASURY_CODE_PATH, grantshares_treasury::ContractBuilder);
    blockchain.register_contract(ADAPTER_CODE_PATH, grantshares_bridge_adapter::ContractBuilder);
    blockchain.register_contract(BRIDGE_CODE_PATH, grantshares_mock_bridge::ContractBuilder);
    blockchain
}

fn encoded<T: TopEncode>(value: &T) -> ManagedBuffer<StaticApi> {
    ManagedBuffer::from(top_encode_to_vec_u8_or_panic(value).as_slice())
}

fn egld() -> EgldOrEsdtTokenIdentifier<StaticApi> {
    EgldOrEsdtTokenIdentifier::egld()
}

fn grant_token() -> EgldOrEsdtTokenIdentifier<StaticApi> {
    EgldOrEsdtTokenIdentifier::esdt(GRANT_TOKEN.to_token_identifier())
}

fn recipient() -> ManagedByteArray<StaticApi, 20> {
    ManagedByteArray::new_from_bytes(&[7u8; 20])
}

fn gov_parameters() -> MultiValueEncoded<StaticApi, MultiValue2<ManagedBuffer<StaticApi>, u64>> {
    let mut parameters = MultiValueEncoded::new();
    for (key, value) in [
        ("review_len", REVIEW_LEN),
        ("voting_len", VOTING_LEN),
        ("timelock_len", TIMELOCK_LEN),
        ("expiration_len", 1_000),
        ("min_accept_rate", 50),
        ("min_quorum", 50),
        ("threshold", 50),
    ] {
        parameters.push(MultiValue2::from((ManagedBuffer::from(key), value)));
    }
    parameters
}

fn release_intent(token: EgldOrEsdtTokenIdentifier<StaticApi>, to: ManagedAddress<StaticApi>, amount: u64) -> Intent<StaticApi> {
    Intent {
        target: TREASURY_ADDRESS.to_managed_address(),
        method: ManagedBuffer::from("releaseTokens"),
        params: vec![
            encoded(&token),
            to.as_managed_buffer().clone(),
            encoded(&BigUint::<StaticApi>::from(amount)),
        ]
        .into_iter()
        .collect(),
        call_flags: call_flags::ALL,
    }
}

fn bridge_intent(amount: u64) -> Intent<StaticApi> {
    Intent {
        target: ADAPTER_ADDRESS.to_managed_address(),
        method: ManagedBuffer::from("bridge"),
        params: vec![
            encoded(&egld()),
            encoded(&recipient()),
            encoded(&BigUint::<StaticApi>::from(amount)),
        ]
        .into_iter()
        .collect(),
        call_flags: call_flags::ALL,
    }
}

struct FlowSetup {
    world: ScenarioWorld,
}

impl FlowSetup {
    fn new() -> Self {
        let mut world = world();
        for account in [DEPLOYER, ALICE, BOB, CAROL, FUNDER_KEY, BACKEND, GRANTEE, PROPOSER] {
            world.account(account).nonce(1);
        }
        world
            .account(FUNDER)
            .nonce(1)
            .balance(10_000)
            .esdt_balance(GRANT_TOKEN, 10_000);
        world.current_block().block_timestamp(START);

        let members: ManagedVec<StaticApi, ManagedAddress<StaticApi>> =
            [ALICE, BOB, CAROL].iter().map(|member| member.to_managed_address()).collect();
        world
            .tx()
            .from(DEPLOYER)
            .typed(GrantSharesGovProxy)
            .init(members, gov_parameters())
            .code(GOV_CODE_PATH)
            .new_address(GOV_ADDRESS)
            .run();

        let mut funders = ManagedVec::new();
        funders.push(Funder {
            address: FUNDER.to_managed_address(),
            public_keys: ManagedVec::from_single_item(FUNDER_KEY.to_managed_address()),
        });
        let mut tokens = MultiValueEncoded::new();
        tokens.push(MultiValue2::from((egld(), BigUint::from(1_000u64))));
        tokens.push(MultiValue2::from((grant_token(), BigUint::from(1_000u64))));
        world
            .tx()
            .from(DEPLOYER)
            .typed(GrantSharesTreasuryProxy)
            .init(GOV_ADDRESS.to_managed_address(), 50u64, funders, tokens)
            .code(TREASURY_CODE_PATH)
            .new_address(TREASURY_ADDRESS)
            .run();

        world
            .tx()
            .from(DEPLOYER)
            .typed(MockBridgeProxy)
            .init()
            .code(BRIDGE_CODE_PATH)
            .code_metadata(CodeMetadata::PAYABLE_BY_SC)
            .new_address(BRIDGE_ADDRESS)
            .run();
        world
            .tx()
            .from(DEPLOYER)
            .to(BRIDGE_ADDRESS)
            .typed(MockBridgeProxy)
            .set_fee(egld(), BigUint::from(BRIDGE_FEE))
            .run();

        world
            .tx()
            .from(DEPLOYER)
            .typed(GrantSharesBridgeAdapterProxy)
            .init(
                DEPLOYER.to_managed_address(),
                GOV_ADDRESS.to_managed_address(),
                TREASURY_ADDRESS.to_managed_address(),
                BRIDGE_ADDRESS.to_managed_address(),
                BigUint::from(BRIDGE_FEE),
                BACKEND.to_managed_address(),
                FUNDER.to_managed_address(),
                GRANT_TOKEN.to_token_identifier(),
            )
            .code(ADAPTER_CODE_PATH)
            .new_address(ADAPTER_ADDRESS)
            .run();

        world
            .tx()
            .from(FUNDER)
            .to(TREASURY_ADDRESS)
            .typed(GrantSharesTreasuryProxy)
            .on_payment()
            .egld(2_000)
            .run();
        world
            .tx()
            .from(FUNDER)
            .to(TREASURY_ADDRESS)
            .typed(GrantSharesTreasuryProxy)
            .on_payment()
            .single_esdt(&GRANT_TOKEN.to_token_identifier(), 0, &BigUint::from(2_000u64))
            .run();

        FlowSetup { world }
    }

    /// Creates, endorses, passes and executes a proposal with `intents`.
    fn run_proposal(&mut self, intents: ManagedVec<StaticApi, Intent<StaticApi>>, uri: &str) -> u64 {
        let proposal_id = self
            .world
            .tx()
            .from(PROPOSER)
            .to(GOV_ADDRESS)
            .typed(GrantSharesGovProxy)
            .create_proposal(
                intents,
                ManagedBuffer::from(uri),
                None::<u64>,
                OptionalValue::<MultiValue2<u64, u64>>::None,
            )
            .returns(ReturnsResult)
            .run();

        self.world
            .tx()
            .from(ALICE)
            .to(GOV_ADDRESS)
            .typed(GrantSharesGovProxy)
            .endorse_proposal(proposal_id)
            .run();

        self.world.current_block().block_timestamp(START + REVIEW_LEN);
        for voter in [ALICE, BOB] {
            self.world
                .tx()
                .from(voter)
                .to(GOV_ADDRESS)
                .typed(GrantSharesGovProxy)
                .vote(proposal_id, VoteChoice::Approve)
                .run();
        }

        self.world
            .current_block()
            .block_timestamp(START + REVIEW_LEN + VOTING_LEN + TIMELOCK_LEN);
        self.world
            .tx()
            .from(PROPOSER)
            .to(GOV_ADDRESS)
            .typed(GrantSharesGovProxy)
            .execute(proposal_id)
            .run();

        self.world
            .query()
            .to(GOV_ADDRESS)
            .typed(GrantSharesGovProxy)
            .get_proposal_phase(proposal_id)
            .returns(ExpectValue(ProposalPhase::Executed))
            .run();
        proposal_id
    }
}

// ============================================================
// Flows
// ============================================================

#[test]
fn proposal_releases_grant_to_recipient() {
    let mut setup = FlowSetup::new();

    let intents = ManagedVec::from_single_item(release_intent(
        grant_token(),
        GRANTEE.to_managed_address(),
        750,
    ));
    setup.run_proposal(intents, "https://grantshares.example/proposals/1");

    setup.world.check_account(GRANTEE).esdt_balance(GRANT_TOKEN, 750);
    setup
        .world
        .check_account(TREASURY_ADDRESS)
        .balance(2_000)
        .esdt_balance(GRANT_TOKEN, 1_250);
}

#[test]
fn proposal_releases_funds_to_adapter_and_bridges_them() {
    let mut setup = FlowSetup::new();

    let mut intents = ManagedVec::new();
    intents.push(release_intent(egld(), ADAPTER_ADDRESS.to_managed_address(), 600));
    intents.push(bridge_intent(600 - BRIDGE_FEE));
    setup.run_proposal(intents, "https://grantshares.example/proposals/2");

    setup.world.check_account(TREASURY_ADDRESS).balance(1_400);
    setup.world.check_account(ADAPTER_ADDRESS).balance(0);
    setup.world.check_account(BRIDGE_ADDRESS).balance(600);

    let deposit = setup
        .world
        .query()
        .to(BRIDGE_ADDRESS)
        .typed(MockBridgeProxy)
        .get_deposit(1usize)
        .returns(ReturnsResult)
        .run();
    assert_eq!(
        deposit,
        Deposit {
            depositor: ADAPTER_ADDRESS.to_managed_address(),
            to: recipient(),
            token: egld(),
            amount: BigUint::from(600 - BRIDGE_FEE),
            fee: BigUint::from(BRIDGE_FEE),
        }
    );
}

#[test]
fn adapter_refuses_bridge_calls_outside_governance() {
    let mut setup = FlowSetup::new();

    setup
        .world
        .tx()
        .from(FUNDER)
        .to(ADAPTER_ADDRESS)
        .typed(GrantSharesBridgeAdapterProxy)
        .on_payment()
        .egld(500)
        .run();
    setup
        .world
        .tx()
        .from(ALICE)
        .to(ADAPTER_ADDRESS)
        .typed(GrantSharesBridgeAdapterProxy)
        .bridge(egld(), recipient(), BigUint::from(100u64))
        .returns(ExpectError(4, "only governance contract"))
        .run();

    setup.world.check_account(ADAPTER_ADDRESS).balance(500);
}
