fn main() {
    multiversx_sc_meta_lib::cli_main::<grantshares_bridge_adapter::AbiProvider>();
}
