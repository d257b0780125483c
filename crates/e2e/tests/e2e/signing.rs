use {
    alloy::primitives::{B256, U256},
    contracts::networks,
    e2e::setup::*,
    exchange::{CollectionKind, Error, MakerIntent, TimestampError},
    model::{
        signature::{EcdsaSignature, SECP256K1_HALF_ORDER},
        validity::ValidityCode,
    },
};

#[tokio::test]
async fn fake_ledger_signatures() {
    run_test(signatures).await;
}

#[tokio::test]
async fn fake_ledger_invalid_intents() {
    run_test(invalid_intents).await;
}

async fn signatures(market: Marketplace) {
    let [seller, other] = market.make_accounts(U256::ZERO);
    let collection = market.deploy_erc721(0xc1, &seller, 1);
    let exchange = market.exchange(&seller);
    market
        .send(
            &seller,
            &exchange.approve_all_collection_items(collection, CollectionKind::Erc721),
        )
        .unwrap();

    let domain = exchange.typed_data_domain();
    assert_eq!(domain.chain_id, networks::HARDHAT);
    assert_eq!(domain.verifying_contract, market.addresses().exchange);

    let maker = exchange
        .create_maker_ask(MakerIntent::new(
            collection,
            eth(1),
            U256::from(1),
            U256::ZERO,
            market.now() + 3600,
        ))
        .await
        .unwrap()
        .maker;
    let signature = exchange.sign_maker_order(&maker).await.unwrap();
    assert_eq!(
        exchange.recover_signer(&maker, &signature).unwrap(),
        seller.address()
    );
    // Signing is deterministic.
    assert_eq!(exchange.sign_maker_order(&maker).await.unwrap(), signature);

    // Verification does not need a signing identity.
    let read_only = market.read_only();
    assert!(read_only
        .verify(&maker, &signature)
        .await
        .unwrap()
        .is_expected_valid());

    let order_n = SECP256K1_HALF_ORDER * U256::from(2) + U256::from(1);
    let high_s = order_n - U256::from_be_bytes(signature.s.0);
    let tampered = [
        (
            EcdsaSignature {
                v: 55 - signature.v,
                ..signature
            },
            ValidityCode::WrongSignerEoa,
        ),
        (
            EcdsaSignature {
                v: signature.v - 27,
                ..signature
            },
            ValidityCode::InvalidVParameterEoa,
        ),
        (
            EcdsaSignature {
                s: B256::from(high_s.to_be_bytes::<32>()),
                ..signature
            },
            ValidityCode::InvalidSParameterEoa,
        ),
        (
            EcdsaSignature {
                r: B256::ZERO,
                ..signature
            },
            ValidityCode::NullSignerEoa,
        ),
    ];
    for (signature, expected) in tampered {
        let codes = read_only.verify(&maker, &signature).await.unwrap();
        assert_eq!(codes.as_slice(), [expected]);
    }

    // Changing any field after signing invalidates the signature.
    let repriced = model::order::MakerOrder {
        price: eth(2),
        ..maker.clone()
    };
    let codes = read_only.verify(&repriced, &signature).await.unwrap();
    assert_eq!(codes.as_slice(), [ValidityCode::WrongSignerEoa]);

    // Nobody signs orders of somebody else.
    assert!(matches!(
        market.exchange(&other).sign_maker_order(&maker).await,
        Err(Error::SignerMismatch { maker: signer, identity })
            if signer == seller.address() && identity == other.address()
    ));
    let hash = maker.signing_hash(&domain.separator());
    let forged = EcdsaSignature::sign(&hash, other.signer()).unwrap();
    let codes = read_only.verify(&maker, &forged).await.unwrap();
    assert_eq!(codes.as_slice(), [ValidityCode::WrongSignerEoa]);
}

async fn invalid_intents(market: Marketplace) {
    let [seller] = market.make_accounts(U256::ZERO);
    let collection = market.deploy_erc721(0xc1, &seller, 1);
    let exchange = market.exchange(&seller);
    let now = market.now();

    let milliseconds = MakerIntent::new(collection, eth(1), U256::from(1), U256::ZERO, now * 1000);
    assert!(matches!(
        exchange.create_maker_ask(milliseconds).await,
        Err(Error::Timestamp(TimestampError::NotSeconds {
            field: "endTime",
            ..
        }))
    ));

    let inverted = MakerIntent::new(collection, eth(1), U256::from(1), U256::ZERO, now)
        .with_start_time(now + 1);
    assert!(matches!(
        exchange.create_maker_ask(inverted).await,
        Err(Error::Timestamp(TimestampError::StartNotBeforeEnd { .. }))
    ));

    let intent = MakerIntent::new(collection, eth(1), U256::from(1), U256::ZERO, now + 60);
    assert!(matches!(
        market.read_only().create_maker_ask(intent.clone()).await,
        Err(Error::Signer)
    ));
    let maker = exchange.create_maker_ask(intent).await.unwrap().maker;
    assert!(matches!(
        market.read_only().sign_maker_order(&maker).await,
        Err(Error::Signer)
    ));
}
