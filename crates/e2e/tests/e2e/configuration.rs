use {
    alloy::{dyn_abi::DynSolValue, primitives::U256},
    contracts::networks,
    e2e::setup::*,
    exchange::{Error, Exchange, MakerIntent},
    model::params::ParamsError,
    std::sync::Arc,
};

#[tokio::test]
async fn fake_ledger_load_configuration() {
    run_test(load_configuration).await;
}

#[tokio::test]
async fn fake_ledger_private_sale() {
    run_test(private_sale).await;
}

async fn load_configuration(market: Marketplace) {
    let path = config_tmp_file(hardhat_config());
    let config = configs::Config::load(&path).await.unwrap();
    assert_eq!(config.chain_id, networks::HARDHAT);
    assert_eq!(config.addresses().unwrap(), hardhat_addresses());
    assert_eq!(config.defaults.min_percentage_to_ask, U256::from(8500));

    let [account] = market.make_accounts(U256::ZERO);
    let exchange = market.exchange(&account);
    assert_eq!(exchange.chain_id(), networks::HARDHAT);
    assert_eq!(exchange.addresses(), market.addresses());
    assert_eq!(exchange.defaults().currency, hardhat_addresses().weth);

    // Test chains have no canonical deployment to fall back to.
    let partial: configs::Config = format!("chain-id = {}", networks::HARDHAT)
        .parse()
        .unwrap();
    assert!(partial.addresses().is_err());
    assert!(Exchange::from_config(&partial, market.shared_ledger(), None).is_err());

    let path = config_tmp_file(format!("{}\nunknown-field = 1\n", hardhat_config()));
    assert!(configs::Config::load(&path).await.is_err());
}

async fn private_sale(market: Marketplace) {
    let [seller, buyer] = market.make_accounts(U256::ZERO);
    let collection = market.deploy_erc721(0xc1, &seller, 1);
    let private = market.addresses().strategy_private_sale;
    let config: configs::Config = format!(
        "{}\n[strategy-params]\n\"{private}\" = [\"address\"]\n",
        hardhat_config()
    )
    .parse()
    .unwrap();
    let exchange = Exchange::from_config(
        &config,
        market.shared_ledger(),
        Some(Arc::new(seller.signer().clone())),
    )
    .unwrap();

    let intent = MakerIntent::new(
        collection,
        eth(1),
        U256::from(1),
        U256::ZERO,
        market.now() + 3600,
    )
    .with_strategy(private);

    let maker = exchange
        .create_maker_ask(intent.clone().with_taker(buyer.address()))
        .await
        .unwrap()
        .maker;
    assert_eq!(
        maker.params.to_vec(),
        DynSolValue::Address(buyer.address()).abi_encode()
    );

    let mismatched = intent.with_params(vec![DynSolValue::Uint(U256::from(1), 256)]);
    assert!(matches!(
        exchange.create_maker_ask(mismatched).await,
        Err(Error::Params(ParamsError::Mismatch { index: 0, .. }))
    ));
}
