use proptest::prelude::*;
use std::sync::Arc;
use xcb_contracts::testing::MockBackend;
use xcb_contracts::{BoundContract, RequestContext};
use xcb_registry_resolution::resolve;
use xcb_types::{Address, Network};

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .expect("runtime")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn any_registered_address_resolves(account in any::<[u8; 20]>(), name in "[A-Z]{3,6}") {
        prop_assume!(account != [0u8; 20]);

        let backend = Arc::new(MockBackend::new(Network::Devin));
        let registry = Address::new(Network::Devin, [0x5e; 20]);
        let caller = Address::new(Network::Devin, [0xca; 20]);
        let target = Address::new(Network::Devin, account);
        backend.register_name(registry, &name, target.to_hex());

        let contract = runtime().block_on(async {
            let ctx = RequestContext::background();
            resolve::<_, BoundContract<MockBackend>>(&ctx, registry, backend, caller, &name).await
        });
        prop_assert_eq!(contract.unwrap().address(), target);
    }
}
