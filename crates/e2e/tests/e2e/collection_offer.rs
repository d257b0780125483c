use {
    alloy::primitives::U256,
    e2e::setup::*,
    exchange::{CollectionKind, MakerIntent, TakerIntent, builder::is_collection_offer},
    model::validity::ValidityCode,
};

#[tokio::test]
async fn fake_ledger_collection_offer() {
    run_test(collection_offer).await;
}

async fn collection_offer(market: Marketplace) {
    let [seller, buyer] = market.make_accounts(eth(10));
    let collection = market.deploy_erc721(0xc1, &seller, 42);
    let weth = market.addresses().weth;
    let exchange = market.exchange(&buyer);
    market
        .send(&buyer, &exchange.approve_erc20(weth, None))
        .unwrap();

    let built = exchange
        .create_maker_collection_offer(MakerIntent::collection_offer(
            collection,
            eth(1),
            U256::ZERO,
            market.now() + 3600,
        ))
        .await
        .unwrap();
    assert!(built.is_approved);
    let maker = built.maker;
    assert!(!maker.is_order_ask);
    assert_eq!(maker.token_id, U256::ZERO);
    assert_eq!(maker.strategy, market.addresses().strategy_collection_sale);
    assert!(is_collection_offer(&maker, market.addresses()));

    let signature = exchange.sign_maker_order(&maker).await.unwrap();
    let codes = exchange.verify(&maker, &signature).await.unwrap();
    assert_eq!(codes.as_slice(), [ValidityCode::ExpectedToBeValid]);

    let seller_exchange = market.exchange(&seller);
    let taker = seller_exchange.create_taker_collection_offer(
        &maker,
        U256::from(42),
        TakerIntent::new(seller.address()),
    );
    assert!(taker.is_order_ask);
    assert_eq!(taker.token_id, U256::from(42));
    assert_eq!(taker.price, maker.price);

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
        market.ledger().token_owner(collection, U256::from(42)),
        Some(buyer.address())
    );
    assert_eq!(
        market.ledger().currency_balance(weth, seller.address()),
        eth(11)
    );
}
