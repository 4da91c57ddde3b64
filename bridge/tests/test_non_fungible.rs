//! CW721 deposit and withdrawal flows.

mod helpers;

use cosmwasm_std::Addr;
use cw721::Cw721ExecuteMsg;
use cw_multi_test::Executor;

use bridge::msg::{IsCustodiedResponse, QueryMsg, StatsResponse};
use helpers::{deposit_hook, root_error, setup, TestEnv, TestSigner, TOKEN_ID};

fn is_custodied(env: &TestEnv, collection: &Addr, token_id: &str) -> bool {
    let res: IsCustodiedResponse = env.query(&QueryMsg::IsCustodied {
        asset: collection.to_string(),
        token_id: token_id.to_string(),
    });
    res.custodied
}

fn signed_withdraw(
    env: &mut TestEnv,
    collection: &Addr,
    token_id: &str,
    nonce: u64,
    mintable: bool,
) -> anyhow::Result<cw_multi_test::AppResponse> {
    let digest = env.non_fungible_sign_hash(collection, token_id, nonce, mintable);
    let signature = TestSigner::owner().sign(&digest);
    env.withdraw_non_fungible(collection, token_id, nonce, mintable, vec![signature])
}

// ============================================================================
// Native (custody transfer)
// ============================================================================

#[test]
fn test_native_nft_deposit_and_withdraw_round_trip() {
    let mut env = setup();
    let collection = env.create_cw721("NATIVE", false);
    env.mint_nft(&collection, TOKEN_ID);
    env.approve_nft(&collection, TOKEN_ID);

    let user = env.user.clone();
    env.deposit_non_fungible(&user, &collection, TOKEN_ID, false)
        .unwrap();
    assert_eq!(
        env.nft_owner(&collection, TOKEN_ID),
        Some(env.bridge.to_string())
    );
    assert!(is_custodied(&env, &collection, TOKEN_ID));

    signed_withdraw(&mut env, &collection, TOKEN_ID, 0, false).unwrap();
    assert_eq!(
        env.nft_owner(&collection, TOKEN_ID),
        Some(env.recipient.to_string())
    );
    assert!(!is_custodied(&env, &collection, TOKEN_ID));

    let stats: StatsResponse = env.query(&QueryMsg::Stats {});
    assert_eq!(stats.non_fungible_deposits, 1);
    assert_eq!(stats.non_fungible_withdrawals, 1);
}

#[test]
fn test_nft_deposit_by_non_owner_rejected() {
    let mut env = setup();
    let collection = env.create_cw721("NATIVE", false);
    env.mint_nft(&collection, TOKEN_ID);
    env.approve_nft(&collection, TOKEN_ID);

    // The bridge is approved, but the caller is not the token owner
    let relayer = env.relayer.clone();
    let err = root_error(env.deposit_non_fungible(&relayer, &collection, TOKEN_ID, false));
    assert!(err.contains("does not own token 1"), "{err}");
    assert_eq!(
        env.nft_owner(&collection, TOKEN_ID),
        Some(env.user.to_string())
    );
}

#[test]
fn test_nft_deposit_of_missing_token_rejected() {
    let mut env = setup();
    let collection = env.create_cw721("NATIVE", false);

    let user = env.user.clone();
    let err = root_error(env.deposit_non_fungible(&user, &collection, "9999", false));
    assert!(err.contains("Asset state mismatch"), "{err}");
}

#[test]
fn test_native_nft_withdraw_requires_custody() {
    let mut env = setup();
    let collection = env.create_cw721("NATIVE", false);
    env.mint_nft(&collection, TOKEN_ID);

    let err = root_error(signed_withdraw(&mut env, &collection, TOKEN_ID, 0, false));
    assert!(err.contains("Insufficient custody"), "{err}");
    assert_eq!(
        env.nft_owner(&collection, TOKEN_ID),
        Some(env.user.to_string())
    );
}

#[test]
fn test_native_nft_replay_rejected() {
    let mut env = setup();
    let collection = env.create_cw721("NATIVE", false);
    env.mint_nft(&collection, TOKEN_ID);
    env.approve_nft(&collection, TOKEN_ID);
    let user = env.user.clone();
    env.deposit_non_fungible(&user, &collection, TOKEN_ID, false)
        .unwrap();

    signed_withdraw(&mut env, &collection, TOKEN_ID, 0, false).unwrap();
    let err = root_error(signed_withdraw(&mut env, &collection, TOKEN_ID, 0, false));
    assert!(err.contains("Settlement already used"), "{err}");
}

#[test]
fn test_native_nft_deposit_through_send_hook() {
    let mut env = setup();
    let collection = env.create_cw721("NATIVE", false);
    env.mint_nft(&collection, TOKEN_ID);

    env.app
        .execute_contract(
            env.user.clone(),
            collection.clone(),
            &Cw721ExecuteMsg::SendNft {
                contract: env.bridge.to_string(),
                token_id: TOKEN_ID.to_string(),
                msg: deposit_hook(false),
            },
            &[],
        )
        .unwrap();

    assert_eq!(
        env.nft_owner(&collection, TOKEN_ID),
        Some(env.bridge.to_string())
    );
    assert!(is_custodied(&env, &collection, TOKEN_ID));
}

// ============================================================================
// Wrapped (burn / mint)
// ============================================================================

#[test]
fn test_wrapped_nft_withdraw_mints_and_deposit_burns() {
    let mut env = setup();
    let collection = env.create_cw721("WRAPPED", true);

    signed_withdraw(&mut env, &collection, TOKEN_ID, 0, true).unwrap();
    assert_eq!(
        env.nft_owner(&collection, TOKEN_ID),
        Some(env.recipient.to_string())
    );
    assert!(!is_custodied(&env, &collection, TOKEN_ID));

    // The recipient bridges the token back out
    env.app
        .execute_contract(
            env.recipient.clone(),
            collection.clone(),
            &Cw721ExecuteMsg::Approve {
                spender: env.bridge.to_string(),
                token_id: TOKEN_ID.to_string(),
                expires: None,
            },
            &[],
        )
        .unwrap();
    let recipient = env.recipient.clone();
    env.deposit_non_fungible(&recipient, &collection, TOKEN_ID, true)
        .unwrap();
    assert_eq!(env.nft_owner(&collection, TOKEN_ID), None);
}

#[test]
fn test_wrapped_nft_mint_of_existing_token_rejected() {
    let mut env = setup();
    let collection = env.create_cw721("WRAPPED", true);

    signed_withdraw(&mut env, &collection, TOKEN_ID, 0, true).unwrap();

    // A second settlement for the same token id cannot mint it again
    let err = root_error(signed_withdraw(&mut env, &collection, TOKEN_ID, 1, true));
    assert!(err.contains("Asset state mismatch"), "{err}");
    assert!(err.contains("already exists"), "{err}");
}

#[test]
fn test_wrapped_nft_deposit_through_send_hook_burns() {
    let mut env = setup();
    let collection = env.create_cw721("WRAPPED", true);
    signed_withdraw(&mut env, &collection, TOKEN_ID, 0, true).unwrap();

    env.app
        .execute_contract(
            env.recipient.clone(),
            collection.clone(),
            &Cw721ExecuteMsg::SendNft {
                contract: env.bridge.to_string(),
                token_id: TOKEN_ID.to_string(),
                msg: deposit_hook(true),
            },
            &[],
        )
        .unwrap();

    assert_eq!(env.nft_owner(&collection, TOKEN_ID), None);
    assert!(!is_custodied(&env, &collection, TOKEN_ID));
}

#[test]
fn test_nft_signature_binds_token_uri() {
    let mut env = setup();
    let collection = env.create_cw721("WRAPPED", true);

    let digest = env.non_fungible_sign_hash(&collection, TOKEN_ID, 0, true);
    let signature = TestSigner::owner().sign(&digest);
    let res = env.app.execute_contract(
        env.relayer.clone(),
        env.bridge.clone(),
        &bridge::msg::ExecuteMsg::WithdrawNonFungible {
            asset: collection.to_string(),
            token_id: TOKEN_ID.to_string(),
            recipient: env.recipient.to_string(),
            source_tx_hash: cosmwasm_std::Binary::from(helpers::TX_HASH.to_vec()),
            nonce: 0,
            token_uri: "https://attacker.example/".to_string(),
            mintable: true,
            signatures: vec![signature],
        },
        &[],
    );
    assert!(root_error(res).contains("Unknown signer"));
    assert_eq!(env.nft_owner(&collection, TOKEN_ID), None);
}
