multiversx_sc::imports!();

use grantshares_common::{call_flags, errors::*};

use crate::{capability::ProposalExecution, types::Intent};

pub const MAX_METHOD_LEN: usize = 128;
pub const MAX_SERIALIZED_PARAM_LEN: usize = 1024;

const LENGTH_PREFIX_LEN: usize = 4;
const ADDRESS_LEN: usize = 32;
static ZERO_PADDING: [u8; MAX_SERIALIZED_PARAM_LEN] = [0u8; MAX_SERIALIZED_PARAM_LEN];

const CHANGE_PARAM_METHOD: &[u8] = b"changeParam";
const ADD_MEMBER_METHOD: &[u8] = b"addMember";
const REMOVE_MEMBER_METHOD: &[u8] = b"removeMember";

/// A self-targeted intent, decoded and handled in-process.
pub enum GovernanceCall<M: ManagedTypeApi> {
    ChangeParam { key: ManagedBuffer<M>, value: u64 },
    AddMember(ManagedAddress<M>),
    RemoveMember(ManagedAddress<M>),
}

pub enum IntentCall<M: ManagedTypeApi> {
    Governance(GovernanceCall<M>),
    External,
}

/// `len (u32 BE) ‖ bytes`, the nested encoding of a buffer.
fn length_prefixed<M: ManagedTypeApi>(bytes: &ManagedBuffer<M>) -> ManagedBuffer<M> {
    let mut encoded = ManagedBuffer::new();
    encoded.append_bytes(&(bytes.len() as u32).to_be_bytes());
    encoded.append(bytes);
    encoded
}

/// Caller guarantees `data.len() <= width`.
fn append_zero_padded<M: ManagedTypeApi>(
    dest: &mut ManagedBuffer<M>,
    data: &ManagedBuffer<M>,
    width: usize,
) {
    dest.append(data);
    dest.append_bytes(&ZERO_PADDING[..width - data.len()]);
}

fn is_method<M: ManagedTypeApi>(method: &ManagedBuffer<M>, name: &[u8]) -> bool {
    *method == ManagedBuffer::<M>::new_from_bytes(name)
}

#[multiversx_sc::module]
pub trait IntentsModule:
    crate::guards::GuardsModule
    + crate::params::ParametersModule
    + crate::members::MembersModule
    + grantshares_common::multisig::MultisigModule
{
    // ========================================================
    // Identity hash
    // ========================================================

    /// sha256 over every intent's fixed-width image followed by the
    /// 32-byte hash of the off-chain description.
    #[view(hashProposal)]
    fn hash_proposal(
        &self,
        intents: ManagedVec<Intent<Self::Api>>,
        offchain_uri_hash: ManagedByteArray<Self::Api, 32>,
    ) -> ManagedByteArray<Self::Api, 32> {
        self.require_valid_intents(&intents);

        let mut preimage = ManagedBuffer::new();
        for intent in intents.iter() {
            preimage.append(intent.target.as_managed_buffer());
            append_zero_padded(&mut preimage, &intent.method, MAX_METHOD_LEN);
            for param in intent.params.iter() {
                append_zero_padded(
                    &mut preimage,
                    &length_prefixed(&param),
                    MAX_SERIALIZED_PARAM_LEN,
                );
            }
        }
        preimage.append(offchain_uri_hash.as_managed_buffer());

        self.crypto().sha256(&preimage)
    }

    // ========================================================
    // Validation
    // ========================================================

    fn require_valid_intents(&self, intents: &ManagedVec<Intent<Self::Api>>) {
        for intent in intents.iter() {
            require!(!intent.target.is_zero(), ERR_INVALID_TARGET);
            require!(!intent.method.is_empty(), ERR_INVALID_METHOD);
            require!(intent.method.len() <= MAX_METHOD_LEN, ERR_METHOD_TOO_LONG);
            // Names are zero padded when hashed, so a NUL would alias a shorter name.
            let mut method_bytes = [0u8; MAX_METHOD_LEN];
            require!(
                !intent.method.load_to_byte_array(&mut method_bytes).contains(&0),
                ERR_INVALID_METHOD
            );
            for param in intent.params.iter() {
                require!(
                    LENGTH_PREFIX_LEN + param.len() <= MAX_SERIALIZED_PARAM_LEN,
                    ERR_PARAM_TOO_BIG
                );
            }
            require!(
                call_flags::is_valid(intent.call_flags),
                ERR_INVALID_CALL_FLAGS
            );
        }
    }

    // ========================================================
    // Execution
    // ========================================================

    /// Runs the intents in order. Each entry of the result is the nested
    /// encoding of the raw values the corresponding call returned.
    fn execute_intents(
        &self,
        execution: &ProposalExecution,
        intents: &ManagedVec<Intent<Self::Api>>,
    ) -> ManagedVec<ManagedBuffer> {
        let mut results = ManagedVec::new();
        for intent in intents.iter() {
            let returned = match self.classify_intent(&intent) {
                IntentCall::Governance(call) => {
                    self.apply_governance_call(execution, call);
                    ManagedVec::new()
                },
                IntentCall::External => self.call_external(&intent),
            };

            let mut encoded = ManagedBuffer::new();
            for value in returned.iter() {
                encoded.append(&length_prefixed(&value));
            }
            results.push(encoded);
        }
        results
    }

    fn classify_intent(&self, intent: &Intent<Self::Api>) -> IntentCall<Self::Api> {
        if intent.target != self.blockchain().get_sc_address() {
            return IntentCall::External;
        }
        require!(
            call_flags::allows_state_changes(intent.call_flags),
            ERR_CALL_FLAGS_FORBID_WRITES
        );

        let call = if is_method(&intent.method, CHANGE_PARAM_METHOD) {
            require!(intent.params.len() == 2, ERR_INVALID_INTENT_PARAMS);
            let key = intent.params.get(0).clone_value();
            let value = intent
                .params
                .get(1)
                .parse_as_u64()
                .unwrap_or_else(|| sc_panic!(ERR_INVALID_INTENT_PARAMS));
            GovernanceCall::ChangeParam { key, value }
        } else if is_method(&intent.method, ADD_MEMBER_METHOD) {
            GovernanceCall::AddMember(self.decode_single_address(intent))
        } else if is_method(&intent.method, REMOVE_MEMBER_METHOD) {
            GovernanceCall::RemoveMember(self.decode_single_address(intent))
        } else {
            sc_panic!(ERR_UNSUPPORTED_SELF_CALL)
        };
        IntentCall::Governance(call)
    }

    fn decode_single_address(&self, intent: &Intent<Self::Api>) -> ManagedAddress {
        require!(intent.params.len() == 1, ERR_INVALID_INTENT_PARAMS);
        let raw = intent.params.get(0);
        require!(raw.len() == ADDRESS_LEN, ERR_INVALID_INTENT_PARAMS);

        let mut bytes = [0u8; ADDRESS_LEN];
        if raw.load_slice(0, &mut bytes).is_err() {
            sc_panic!(ERR_INVALID_INTENT_PARAMS);
        }
        ManagedAddress::from(&bytes)
    }

    fn apply_governance_call(&self, execution: &ProposalExecution, call: GovernanceCall<Self::Api>) {
        match call {
            GovernanceCall::ChangeParam { key, value } => {
                self.apply_change_param(execution, key, value)
            },
            GovernanceCall::AddMember(member) => self.apply_add_member(execution, member),
            GovernanceCall::RemoveMember(member) => self.apply_remove_member(execution, member),
        }
    }

    /// Plain synchronous call. Without `WRITE_STATES` the target runs read-only.
    fn call_external(&self, intent: &Intent<Self::Api>) -> ManagedVec<ManagedBuffer> {
        let mut args = ManagedArgBuffer::new();
        for param in intent.params.iter() {
            args.push_arg_raw(param.clone_value());
        }

        let call = self
            .tx()
            .to(&intent.target)
            .raw_call(intent.method.clone())
            .arguments_raw(args)
            .returns(ReturnsRawResult);

        if call_flags::allows_state_changes(intent.call_flags) {
            call.sync_call()
        } else {
            call.sync_call_readonly()
        }
    }
}
