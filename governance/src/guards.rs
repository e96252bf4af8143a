multiversx_sc::imports!();

use grantshares_common::errors::{ERR_ONLY_SELF, ERR_PAUSED};

use crate::capability::ProposalExecution;

#[multiversx_sc::module]
pub trait GuardsModule {
    #[view(isPaused)]
    fn is_paused(&self) -> bool {
        self.paused().get()
    }

    fn require_not_paused(&self) {
        require!(!self.paused().get(), ERR_PAUSED);
    }

    /// Grants the execution capability when the governance contract calls itself.
    fn require_self_call(&self) -> ProposalExecution {
        require!(
            self.blockchain().get_caller() == self.blockchain().get_sc_address(),
            ERR_ONLY_SELF
        );
        ProposalExecution::grant()
    }

    #[storage_mapper("paused")]
    fn paused(&self) -> SingleValueMapper<bool>;
}
