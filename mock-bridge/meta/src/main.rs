fn main() {
    multiversx_sc_meta_lib::cli_main::<grantshares_mock_bridge::AbiProvider>();
}
