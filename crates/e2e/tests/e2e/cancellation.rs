use {
    alloy::primitives::U256,
    e2e::setup::*,
    exchange::{CollectionKind, Error, MakerIntent},
    model::validity::ValidityCode,
};

#[tokio::test]
async fn fake_ledger_order_cancellation() {
    run_test(order_cancellation).await;
}

async fn order_cancellation(market: Marketplace) {
    let [seller] = market.make_accounts(U256::ZERO);
    let collection = market.deploy_erc721(0xc1, &seller, 1);
    let exchange = market.exchange(&seller);
    market
        .send(
            &seller,
            &exchange.approve_all_collection_items(collection, CollectionKind::Erc721),
        )
        .unwrap();

    let mut orders = Vec::new();
    for nonce in 0..3u64 {
        let maker = exchange
            .create_maker_ask(MakerIntent::new(
                collection,
                eth(1),
                U256::from(1),
                U256::from(nonce),
                market.now() + 3600,
            ))
            .await
            .unwrap()
            .maker;
        let signature = exchange.sign_maker_order(&maker).await.unwrap();
        orders.push((maker, signature));
    }
    let (orders, exchange) = (&orders, &exchange);
    let verify = move |index: usize| {
        let (maker, signature) = &orders[index];
        exchange.verify(maker, signature)
    };
    for index in 0..3 {
        assert!(verify(index).await.unwrap().is_expected_valid());
    }

    market
        .send(
            &seller,
            &exchange
                .cancel_multiple_maker_orders(&[U256::ZERO])
                .unwrap(),
        )
        .unwrap();
    assert_eq!(
        verify(0).await.unwrap().as_slice(),
        [ValidityCode::NonceExecutedOrCancelled]
    );
    assert!(verify(1).await.unwrap().is_expected_valid());

    market
        .send(
            &seller,
            &exchange
                .cancel_all_orders_for_sender(U256::from(2))
                .unwrap(),
        )
        .unwrap();
    assert_eq!(
        verify(0).await.unwrap().as_slice(),
        [ValidityCode::NonceExecutedOrCancelled]
    );
    assert_eq!(
        verify(1).await.unwrap().as_slice(),
        [ValidityCode::NonceBelowMinOrderNonce]
    );
    assert!(verify(2).await.unwrap().is_expected_valid());

    // Nonces below the minimum cannot be cancelled again.
    assert!(
        market
            .send(
                &seller,
                &exchange
                    .cancel_multiple_maker_orders(&[U256::from(1)])
                    .unwrap(),
            )
            .is_err()
    );

    let read_only = market.read_only();
    assert!(matches!(
        read_only.cancel_all_orders_for_sender(U256::from(3)),
        Err(Error::Signer)
    ));
    assert!(matches!(
        read_only.cancel_multiple_maker_orders(&[U256::from(3)]),
        Err(Error::Signer)
    ));
}
