multiversx_sc::imports!();

pub const ON_PAYMENT_ENDPOINT: &str = "onPayment";

#[multiversx_sc::module]
pub trait PaymentsModule {
    /// Sends `amount` of `token` to `to`. Contract recipients are paid through
    /// their `onPayment` endpoint so they can accept or refuse the funds.
    fn forward_payment(
        &self,
        to: &ManagedAddress,
        token: &EgldOrEsdtTokenIdentifier,
        amount: &BigUint,
    ) {
        let payment = EgldOrEsdtTokenPayment::new(token.clone(), 0, amount.clone());
        if self.blockchain().is_smart_contract(to) {
            self.tx()
                .to(to)
                .payment(payment)
                .raw_call(ON_PAYMENT_ENDPOINT)
                .sync_call();
        } else {
            self.tx().to(to).payment(payment).transfer();
        }
    }

    fn own_balance(&self, token: &EgldOrEsdtTokenIdentifier) -> BigUint {
        self.blockchain().get_sc_balance(token, 0)
    }
}
