use {
    alloy::primitives::{Address, U256},
    e2e::setup::*,
    exchange::MakerIntent,
    model::{order::MakerOrder, validity::ValidityCode},
    std::sync::Arc,
};

#[tokio::test]
async fn fake_ledger_smart_contract_wallet() {
    run_test(smart_contract_wallet).await;
}

async fn smart_contract_wallet(market: Marketplace) {
    let [owner, stranger, seller] = market.make_accounts(U256::ZERO);
    let collection = market.deploy_erc721(0xc1, &seller, 1);
    let weth = market.addresses().weth;

    let wallet = Address::repeat_byte(0x5a);
    market.ledger().deploy_wallet(wallet, owner.address());
    market.ledger().fund(weth, wallet, eth(1));
    let exchange = market.exchange_as(Arc::new(ContractWallet {
        address: wallet,
        owner: owner.clone(),
    }));
    market
        .ledger()
        .dispatch(wallet, &exchange.approve_erc20(weth, None))
        .unwrap();

    let built = exchange
        .create_maker_bid(MakerIntent::new(
            collection,
            eth(1),
            U256::from(1),
            U256::ZERO,
            market.now() + 3600,
        ))
        .await
        .unwrap();
    assert_eq!(built.maker.signer, wallet);
    assert!(built.is_approved);
    let maker = built.maker;
    let signature = exchange.sign_maker_order(&maker).await.unwrap();
    let codes = exchange.verify(&maker, &signature).await.unwrap();
    assert_eq!(codes.as_slice(), [ValidityCode::ExpectedToBeValid]);

    // A stranger claiming the wallet.
    let forged = market
        .exchange_as(Arc::new(ContractWallet {
            address: wallet,
            owner: stranger,
        }))
        .sign_maker_order(&maker)
        .await
        .unwrap();
    let codes = exchange.verify(&maker, &forged).await.unwrap();
    assert_eq!(codes.as_slice(), [ValidityCode::SignatureInvalidEip1271]);

    // Signed by the owner for the owner's own account, not for the wallet.
    let eoa = MakerOrder {
        signer: owner.address(),
        ..maker.clone()
    };
    let signature = market.exchange(&owner).sign_maker_order(&eoa).await.unwrap();
    let codes = exchange.verify(&maker, &signature).await.unwrap();
    assert_eq!(codes.as_slice(), [ValidityCode::SignatureInvalidEip1271]);
}
