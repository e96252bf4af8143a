multiversx_sc::imports!();

use grantshares_common::{errors::*, rules};

use crate::capability::ProposalExecution;

pub const REVIEW_LENGTH_KEY: &[u8] = b"review_len";
pub const VOTING_LENGTH_KEY: &[u8] = b"voting_len";
pub const TIMELOCK_LENGTH_KEY: &[u8] = b"timelock_len";
pub const EXPIRATION_LENGTH_KEY: &[u8] = b"expiration_len";
pub const MIN_ACCEPTANCE_RATE_KEY: &[u8] = b"min_accept_rate";
pub const MIN_QUORUM_KEY: &[u8] = b"min_quorum";
pub const MULTI_SIG_THRESHOLD_KEY: &[u8] = b"threshold";

#[derive(Clone, Copy)]
enum ParameterKind {
    /// Seconds.
    Length,
    Percentage,
    ThresholdRatio,
}

const KNOWN_PARAMETERS: [(&[u8], ParameterKind); 7] = [
    (REVIEW_LENGTH_KEY, ParameterKind::Length),
    (VOTING_LENGTH_KEY, ParameterKind::Length),
    (TIMELOCK_LENGTH_KEY, ParameterKind::Length),
    (EXPIRATION_LENGTH_KEY, ParameterKind::Length),
    (MIN_ACCEPTANCE_RATE_KEY, ParameterKind::Percentage),
    (MIN_QUORUM_KEY, ParameterKind::Percentage),
    (MULTI_SIG_THRESHOLD_KEY, ParameterKind::ThresholdRatio),
];

/// Named governance parameters. Only a proposal can change them.
#[multiversx_sc::module]
pub trait ParametersModule: crate::guards::GuardsModule {
    #[endpoint(changeParam)]
    fn change_param(&self, key: ManagedBuffer, value: u64) {
        let execution = self.require_self_call();
        self.apply_change_param(&execution, key, value);
    }

    fn apply_change_param(&self, _execution: &ProposalExecution, key: ManagedBuffer, value: u64) {
        self.require_not_paused();
        self.require_valid_parameter(&key, value);
        self.parameters().insert(key.clone(), value);
        self.parameter_changed_event(&key, value);
    }

    /// Writes the deploy-time values. Every known parameter must be present.
    fn init_parameters(&self, parameters: MultiValueEncoded<MultiValue2<ManagedBuffer, u64>>) {
        for parameter in parameters.into_iter() {
            let (key, value) = parameter.into_tuple();
            self.require_valid_parameter(&key, value);
            self.parameters().insert(key, value);
        }
        require!(
            self.parameters().len() == KNOWN_PARAMETERS.len(),
            ERR_MISSING_PARAMETER
        );
    }

    fn require_valid_parameter(&self, key: &ManagedBuffer, value: u64) {
        let kind = KNOWN_PARAMETERS
            .iter()
            .find(|(name, _)| *key == ManagedBuffer::new_from_bytes(name))
            .map(|(_, kind)| *kind);
        let valid = match kind {
            Some(ParameterKind::Length) => rules::is_phase_length(value),
            Some(ParameterKind::Percentage) => rules::is_percentage(value),
            Some(ParameterKind::ThresholdRatio) => rules::is_threshold_ratio(value),
            None => sc_panic!(ERR_UNKNOWN_PARAMETER),
        };
        require!(valid, ERR_INVALID_PARAMETER_VALUE);
    }

    fn parameter(&self, key: &[u8]) -> u64 {
        self.parameters()
            .get(&ManagedBuffer::new_from_bytes(key))
            .unwrap_or_default()
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(getParameter)]
    fn get_parameter(&self, key: ManagedBuffer) -> u64 {
        match self.parameters().get(&key) {
            Some(value) => value,
            None => sc_panic!(ERR_UNKNOWN_PARAMETER),
        }
    }

    #[view(getParameters)]
    fn get_parameters(&self) -> MultiValueEncoded<MultiValue2<ManagedBuffer, u64>> {
        let mut result = MultiValueEncoded::new();
        for (key, value) in self.parameters().iter() {
            result.push((key, value).into());
        }
        result
    }

    // ========================================================
    // EVENTS / STORAGE
    // ========================================================

    #[event("parameterChanged")]
    fn parameter_changed_event(&self, #[indexed] key: &ManagedBuffer, value: u64);

    #[storage_mapper("parameters")]
    fn parameters(&self) -> MapMapper<ManagedBuffer, u64>;
}
