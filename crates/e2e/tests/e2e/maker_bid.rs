use {
    alloy::primitives::U256,
    e2e::setup::*,
    exchange::{CollectionKind, MakerIntent, TakerIntent},
    model::validity::ValidityCode,
};

#[tokio::test]
async fn fake_ledger_maker_bid() {
    run_test(maker_bid).await;
}

#[tokio::test]
async fn fake_ledger_maker_bid_above_balance() {
    run_test(maker_bid_above_balance).await;
}

async fn maker_bid(market: Marketplace) {
    let [seller, buyer] = market.make_accounts(eth(10));
    let collection = market.deploy_erc721(0xc1, &seller, 7);
    let weth = market.addresses().weth;
    let exchange = market.exchange(&buyer);

    let built = exchange
        .create_maker_bid(MakerIntent::new(
            collection,
            eth(3),
            U256::from(7),
            U256::ZERO,
            market.now() + 3600,
        ))
        .await
        .unwrap();
    assert!(!built.is_approved);
    let maker = built.maker;
    assert!(!maker.is_order_ask);
    assert_eq!(maker.signer, buyer.address());

    let signature = exchange.sign_maker_order(&maker).await.unwrap();
    let codes = exchange.verify(&maker, &signature).await.unwrap();
    assert_eq!(codes.as_slice(), [ValidityCode::Erc20ApprovalInferiorToPrice]);

    market
        .send(&buyer, &exchange.approve_erc20(weth, Some(eth(3))))
        .unwrap();
    let codes = exchange.verify(&maker, &signature).await.unwrap();
    assert_eq!(codes.as_slice(), [ValidityCode::ExpectedToBeValid]);

    let seller_exchange = market.exchange(&seller);
    let taker = seller_exchange.create_taker(&maker, TakerIntent::new(seller.address()));
    assert!(taker.is_order_ask);
    market
        .send(
            &seller,
            &seller_exchange.approve_all_collection_items(collection, CollectionKind::Erc721),
        )
        .unwrap();
    market
        .send(
            &seller,
            &seller_exchange.execute_order(&maker, &taker, &signature, None),
        )
        .unwrap();

    assert_eq!(
        market.ledger().token_owner(collection, U256::from(7)),
        Some(buyer.address())
    );
    assert_eq!(
        market.ledger().currency_balance(weth, buyer.address()),
        eth(7)
    );
    assert_eq!(
        market.ledger().currency_balance(weth, seller.address()),
        eth(13)
    );

    // The allowance was used up together with the nonce.
    let codes = exchange.verify(&maker, &signature).await.unwrap();
    assert_eq!(
        codes.as_slice(),
        [
            ValidityCode::NonceExecutedOrCancelled,
            ValidityCode::Erc20ApprovalInferiorToPrice
        ]
    );
}

async fn maker_bid_above_balance(market: Marketplace) {
    let [seller, buyer] = market.make_accounts(eth(1));
    let collection = market.deploy_erc721(0xc1, &seller, 7);
    let exchange = market.exchange(&buyer);
    market
        .send(&buyer, &exchange.approve_erc20(market.addresses().weth, None))
        .unwrap();

    let built = exchange
        .create_maker_bid(MakerIntent::new(
            collection,
            eth(2),
            U256::from(7),
            U256::ZERO,
            market.now() + 3600,
        ))
        .await
        .unwrap();
    // Approval only looks at the allowance.
    assert!(built.is_approved);
    let signature = exchange.sign_maker_order(&built.maker).await.unwrap();
    let codes = exchange.verify(&built.maker, &signature).await.unwrap();
    assert_eq!(codes.as_slice(), [ValidityCode::Erc20BalanceInferiorToPrice]);

    market
        .ledger()
        .fund(market.addresses().weth, buyer.address(), eth(1));
    assert!(exchange
        .verify(&built.maker, &signature)
        .await
        .unwrap()
        .is_expected_valid());
}
