use {
    alloy::primitives::{Address, U256},
    e2e::setup::*,
    exchange::{CollectionKind, MakerIntent, TakerIntent},
    model::validity::ValidityCode,
};

#[tokio::test]
async fn fake_ledger_maker_ask() {
    run_test(maker_ask).await;
}

#[tokio::test]
async fn fake_ledger_maker_ask_paid_with_eth() {
    run_test(maker_ask_paid_with_eth).await;
}

#[tokio::test]
async fn fake_ledger_expired_maker_ask() {
    run_test(expired_maker_ask).await;
}

#[tokio::test]
async fn fake_ledger_royalties() {
    run_test(royalties).await;
}

#[tokio::test]
async fn fake_ledger_erc1155_maker_ask() {
    run_test(erc1155_maker_ask).await;
}

#[tokio::test]
async fn fake_ledger_unsupported_collections() {
    run_test(unsupported_collections).await;
}

async fn maker_ask(market: Marketplace) {
    let [seller, buyer] = market.make_accounts(eth(10));
    let collection = market.deploy_erc721(0xc1, &seller, 7);
    let weth = market.addresses().weth;
    let exchange = market.exchange(&seller);

    let intent = MakerIntent::new(
        collection,
        eth(1),
        U256::from(7),
        U256::ZERO,
        market.now() + 3600,
    );
    let built = exchange.create_maker_ask(intent.clone()).await.unwrap();
    assert!(!built.is_approved);
    let maker = built.maker;
    assert!(maker.is_order_ask);
    assert_eq!(maker.signer, seller.address());
    assert_eq!(maker.amount, U256::from(1));
    assert_eq!(maker.strategy, market.addresses().strategy_standard_sale);
    assert_eq!(maker.currency, weth);
    assert_eq!(maker.min_percentage_to_ask, U256::from(8500));

    let signature = exchange.sign_maker_order(&maker).await.unwrap();
    let codes = exchange.verify(&maker, &signature).await.unwrap();
    assert_eq!(
        codes.as_slice(),
        [ValidityCode::Erc721NoApprovalForAllOrTokenId]
    );

    market
        .send(
            &seller,
            &exchange.approve_all_collection_items(collection, CollectionKind::Erc721),
        )
        .unwrap();
    let codes = exchange.verify(&maker, &signature).await.unwrap();
    assert_eq!(codes.as_slice(), [ValidityCode::ExpectedToBeValid]);
    let rebuilt = exchange.create_maker_ask(intent).await.unwrap();
    assert!(rebuilt.is_approved);

    let buyer_exchange = market.exchange(&buyer);
    let taker = buyer_exchange.create_taker(&maker, TakerIntent::new(buyer.address()));
    assert!(!taker.is_order_ask);
    assert_eq!(taker.price, maker.price);
    assert_eq!(taker.token_id, maker.token_id);

    let execution = buyer_exchange.execute_order(&maker, &taker, &signature, None);
    // The buyer did not approve the exchange to spend their currency yet.
    assert!(market.send(&buyer, &execution).is_err());
    market
        .send(&buyer, &buyer_exchange.approve_erc20(weth, None))
        .unwrap();
    market.send(&buyer, &execution).unwrap();

    assert_eq!(
        market.ledger().token_owner(collection, U256::from(7)),
        Some(buyer.address())
    );
    assert_eq!(
        market.ledger().currency_balance(weth, seller.address()),
        eth(11)
    );
    assert_eq!(
        market.ledger().currency_balance(weth, buyer.address()),
        eth(9)
    );

    let codes = buyer_exchange.verify(&maker, &signature).await.unwrap();
    assert!(codes.contains(ValidityCode::NonceExecutedOrCancelled));
    assert!(codes.contains(ValidityCode::Erc721TokenIdNotInBalance));
    assert!(market.send(&buyer, &execution).is_err());
}

async fn maker_ask_paid_with_eth(market: Marketplace) {
    let [seller, buyer] = market.make_accounts(eth(10));
    let collection = market.deploy_erc721(0xc1, &seller, 7);
    let exchange = market.exchange(&seller);
    market
        .send(
            &seller,
            &exchange.approve_all_collection_items(collection, CollectionKind::Erc721),
        )
        .unwrap();

    let maker = exchange
        .create_maker_ask(MakerIntent::new(
            collection,
            eth(2),
            U256::from(7),
            U256::from(1),
            market.now() + 3600,
        ))
        .await
        .unwrap()
        .maker;
    let signature = exchange.sign_maker_order(&maker).await.unwrap();

    let buyer_exchange = market.exchange(&buyer);
    let taker = buyer_exchange.create_taker(&maker, TakerIntent::new(buyer.address()));
    let execution = buyer_exchange.execute_order(&maker, &taker, &signature, Some(eth(2)));
    assert_eq!(execution.value, eth(2));
    // Paying the full price natively needs no currency allowance.
    market.send(&buyer, &execution).unwrap();

    assert_eq!(
        market.ledger().token_owner(collection, U256::from(7)),
        Some(buyer.address())
    );
    assert_eq!(
        market
            .ledger()
            .currency_balance(market.addresses().weth, buyer.address()),
        eth(10)
    );
}

async fn expired_maker_ask(market: Marketplace) {
    let [seller] = market.make_accounts(U256::ZERO);
    let collection = market.deploy_erc721(0xc1, &seller, 1);
    let exchange = market.exchange(&seller);
    market
        .send(
            &seller,
            &exchange.approve_all_collection_items(collection, CollectionKind::Erc721),
        )
        .unwrap();

    let start = market.now() + 100;
    let maker = exchange
        .create_maker_ask(
            MakerIntent::new(collection, eth(1), U256::from(1), U256::ZERO, start + 100)
                .with_start_time(start),
        )
        .await
        .unwrap()
        .maker;
    let signature = exchange.sign_maker_order(&maker).await.unwrap();

    let codes = exchange.verify(&maker, &signature).await.unwrap();
    assert_eq!(codes.as_slice(), [ValidityCode::TooEarlyToExecuteOrder]);

    market.ledger().advance_time(100);
    assert!(exchange
        .verify(&maker, &signature)
        .await
        .unwrap()
        .is_expected_valid());

    market.ledger().advance_time(101);
    let codes = exchange.verify(&maker, &signature).await.unwrap();
    assert_eq!(codes.as_slice(), [ValidityCode::TooLateToExecuteOrder]);
}

async fn royalties(market: Marketplace) {
    let [seller] = market.make_accounts(U256::ZERO);
    let registered = market.deploy_erc721(0xc1, &seller, 1);
    let erc2981 = market.deploy_erc721(0xc2, &seller, 1);
    let receiver = Address::repeat_byte(0xaa);
    market
        .ledger()
        .set_registry_royalty(registered, receiver, 1000);
    market
        .ledger()
        .set_erc2981_royalty(erc2981, receiver, 1000)
        .unwrap();

    let exchange = market.exchange(&seller);
    for collection in [registered, erc2981] {
        market
            .send(
                &seller,
                &exchange.approve_all_collection_items(collection, CollectionKind::Erc721),
            )
            .unwrap();
    }

    // 2% protocol fee and 10% royalty leave 88% to the seller.
    let ask = |collection, min_percentage_to_ask: u64| {
        MakerIntent::new(
            collection,
            eth(1),
            U256::from(1),
            U256::ZERO,
            market.now() + 3600,
        )
        .with_min_percentage_to_ask(U256::from(min_percentage_to_ask))
    };
    for (collection, expected) in [
        (
            registered,
            ValidityCode::MinNetRatioAboveRoyaltyFeeRegistryAndProtocolFee,
        ),
        (
            erc2981,
            ValidityCode::MinNetRatioAboveRoyaltyFeeErc2981AndProtocolFee,
        ),
    ] {
        let maker = exchange
            .create_maker_ask(ask(collection, 8801))
            .await
            .unwrap()
            .maker;
        let signature = exchange.sign_maker_order(&maker).await.unwrap();
        let codes = exchange.verify(&maker, &signature).await.unwrap();
        assert_eq!(codes.as_slice(), [expected]);

        let maker = exchange
            .create_maker_ask(ask(collection, 8800))
            .await
            .unwrap()
            .maker;
        let signature = exchange.sign_maker_order(&maker).await.unwrap();
        assert!(exchange
            .verify(&maker, &signature)
            .await
            .unwrap()
            .is_expected_valid());
    }
}

async fn erc1155_maker_ask(market: Marketplace) {
    let [seller] = market.make_accounts(U256::ZERO);
    let collection = Address::repeat_byte(0xc3);
    market
        .ledger()
        .deploy_collection(collection, Standard::Erc1155);
    market
        .ledger()
        .mint(collection, seller.address(), U256::from(3), U256::from(4))
        .unwrap();
    let exchange = market.exchange(&seller);

    let intent = |amount: u64| {
        MakerIntent::new(
            collection,
            eth(1),
            U256::from(3),
            U256::from(amount),
            market.now() + 3600,
        )
        .with_amount(U256::from(amount))
    };
    let too_many = exchange.create_maker_ask(intent(5)).await.unwrap().maker;
    let signature = exchange.sign_maker_order(&too_many).await.unwrap();
    let codes = exchange.verify(&too_many, &signature).await.unwrap();
    assert_eq!(
        codes.as_slice(),
        [ValidityCode::Erc1155BalanceOfTokenIdInferiorToAmount]
    );

    let built = exchange.create_maker_ask(intent(4)).await.unwrap();
    assert!(!built.is_approved);
    let signature = exchange.sign_maker_order(&built.maker).await.unwrap();
    let codes = exchange.verify(&built.maker, &signature).await.unwrap();
    assert_eq!(codes.as_slice(), [ValidityCode::Erc1155NoApprovalForAll]);

    market
        .send(
            &seller,
            &exchange.approve_all_collection_items(collection, CollectionKind::Erc1155),
        )
        .unwrap();
    assert!(exchange
        .verify(&built.maker, &signature)
        .await
        .unwrap()
        .is_expected_valid());
}

async fn unsupported_collections(market: Marketplace) {
    let [seller] = market.make_accounts(U256::ZERO);
    let exchange = market.exchange(&seller);
    let end = market.now() + 3600;

    let unknown = Address::repeat_byte(0xc4);
    let built = exchange
        .create_maker_ask(MakerIntent::new(unknown, eth(1), U256::from(1), U256::ZERO, end))
        .await
        .unwrap();
    assert!(!built.is_approved);
    let signature = exchange.sign_maker_order(&built.maker).await.unwrap();
    let codes = exchange.verify(&built.maker, &signature).await.unwrap();
    assert_eq!(
        codes.as_slice(),
        [ValidityCode::NoTransferManagerAvailableForCollection]
    );

    let custom = market.deploy_erc721(0xc5, &seller, 1);
    market
        .ledger()
        .set_custom_transfer_manager(custom, Address::repeat_byte(0xcc));
    let maker = exchange
        .create_maker_ask(MakerIntent::new(custom, eth(1), U256::from(1), U256::ONE, end))
        .await
        .unwrap()
        .maker;
    let signature = exchange.sign_maker_order(&maker).await.unwrap();
    let codes = exchange.verify(&maker, &signature).await.unwrap();
    assert_eq!(
        codes.as_slice(),
        [
            ValidityCode::ExpectedToBeValid,
            ValidityCode::CustomTransferManager
        ]
    );
    assert!(codes.is_expected_valid());

    market.ledger().remove_currency(market.addresses().weth);
    let codes = exchange.verify(&maker, &signature).await.unwrap();
    assert_eq!(
        codes.as_slice(),
        [
            ValidityCode::CurrencyNotWhitelisted,
            ValidityCode::CustomTransferManager
        ]
    );
}
