multiversx_sc::imports!();

const MULTISIG_DOMAIN: &[u8] = b"grantshares-multisig";

/// Sorted by key bytes, duplicates dropped. The same key set always gives
/// the same list, whatever order the keys were stored in.
pub fn normalized_keys<M: ManagedTypeApi>(
    public_keys: &ManagedVec<M, ManagedAddress<M>>,
) -> ManagedVec<M, ManagedAddress<M>> {
    let mut sorted: ManagedVec<M, ManagedAddress<M>> = ManagedVec::new();
    for key in public_keys.iter() {
        let key_bytes = key.to_byte_array();
        let mut position = sorted.len();
        let mut duplicate = false;
        for (index, existing) in sorted.iter().enumerate() {
            let existing_bytes = existing.to_byte_array();
            if existing_bytes == key_bytes {
                duplicate = true;
                break;
            }
            if existing_bytes > key_bytes {
                position = index;
                break;
            }
        }
        if duplicate {
            continue;
        }

        let mut next = ManagedVec::new();
        for (index, existing) in sorted.iter().enumerate() {
            if index == position {
                next.push(key.clone_value());
            }
            next.push(existing.clone_value());
        }
        if position == sorted.len() {
            next.push(key.clone_value());
        }
        sorted = next;
    }
    sorted
}

/// Deterministic account standing for "`threshold` of these keys agreed".
#[multiversx_sc::module]
pub trait MultisigModule {
    fn derive_multisig_address(
        &self,
        public_keys: &ManagedVec<ManagedAddress>,
        threshold: u64,
    ) -> ManagedAddress {
        let mut preimage = ManagedBuffer::new_from_bytes(MULTISIG_DOMAIN);
        preimage.append_bytes(&(threshold as u32).to_be_bytes());
        for key in normalized_keys(public_keys).iter() {
            preimage.append(key.as_managed_buffer());
        }
        ManagedAddress::from(self.crypto().keccak256(&preimage))
    }
}
