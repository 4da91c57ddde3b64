//! Shared setup for the custody bridge integration tests.
//!
//! Signers are secp256k1 keys from the standard local development mnemonic,
//! so their addresses match the ones EVM tooling prints.

#![allow(dead_code)]

use cosmwasm_std::{to_json_binary, Addr, Binary, Empty, Uint128};
use cw20::{BalanceResponse, Cw20Coin, Cw20ExecuteMsg, Cw20QueryMsg, MinterResponse};
use cw721::{Cw721ExecuteMsg, Cw721QueryMsg, OwnerOfResponse};
use cw_multi_test::{App, AppResponse, ContractWrapper, Executor};
use k256::ecdsa::SigningKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;

use bridge::hash::personal_message_hash;
use bridge::msg::{ExecuteMsg, InstantiateMsg, QueryMsg, SignHashResponse};
use bridge::verify::signer_address_from_pubkey;

pub const OWNER_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const SECOND_KEY: &str = "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";
pub const NON_SIGNER_KEY: &str =
    "f214f2b2cd398c806f84e317254e0f0b801d0643303237d97a22a48e01628897";

pub const AMOUNT: u128 = 1_000_000;
pub const LARGE_AMOUNT: u128 = 1_000_000_000;
pub const TOKEN_ID: &str = "1";
pub const TOKEN_URI: &str = "https://test-uri.com/";
pub const NETWORK: &str = "test-network-1";
pub const TX_HASH: [u8; 32] = [0xab; 32];

// ============================================================================
// Signers
// ============================================================================

pub struct TestSigner {
    key: SigningKey,
}

impl TestSigner {
    pub fn from_hex(private_key: &str) -> Self {
        let bytes = hex::decode(private_key).unwrap();
        Self {
            key: SigningKey::from_slice(&bytes).unwrap(),
        }
    }

    pub fn owner() -> Self {
        Self::from_hex(OWNER_KEY)
    }

    pub fn second() -> Self {
        Self::from_hex(SECOND_KEY)
    }

    pub fn non_signer() -> Self {
        Self::from_hex(NON_SIGNER_KEY)
    }

    pub fn address(&self) -> String {
        let point = self.key.verifying_key().to_encoded_point(false);
        signer_address_from_pubkey(point.as_bytes())
            .unwrap()
            .to_hex()
    }

    /// Sign a digest the way validators do, under the personal message prefix.
    pub fn sign(&self, digest: &Binary) -> Binary {
        let digest: [u8; 32] = digest.to_vec().try_into().unwrap();
        self.sign_raw(&personal_message_hash(&digest))
    }

    /// Sign the bare 32 bytes with no prefix.
    pub fn sign_raw(&self, prehash: &[u8; 32]) -> Binary {
        let (signature, recovery_id) = self.key.sign_prehash_recoverable(prehash).unwrap();
        let mut bytes = signature.to_bytes().to_vec();
        bytes.push(27 + recovery_id.to_byte());
        Binary::from(bytes)
    }
}

// ============================================================================
// Contracts
// ============================================================================

fn contract_bridge() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        bridge::contract::execute,
        bridge::contract::instantiate,
        bridge::contract::query,
    )
    .with_migrate(bridge::contract::migrate);
    Box::new(contract)
}

fn contract_cw20() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );
    Box::new(contract)
}

fn contract_cw721() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        cw721_base::entry::execute,
        cw721_base::entry::instantiate,
        cw721_base::entry::query,
    );
    Box::new(contract)
}

pub type NftExecuteMsg = cw721_base::ExecuteMsg<Option<Empty>, Empty>;

pub struct TestEnv {
    pub app: App,
    pub bridge: Addr,
    pub bridge_code_id: u64,
    pub owner: Addr,
    pub user: Addr,
    pub recipient: Addr,
    pub relayer: Addr,
}

/// Bridge with the given signer keys and threshold. The owner account
/// instantiates it and is its contract admin.
pub fn setup_with(signers: &[&TestSigner], threshold: u32) -> TestEnv {
    let mut app = App::default();
    let owner = Addr::unchecked("terra1owner");
    let user = Addr::unchecked("terra1user");
    let recipient = Addr::unchecked("terra1recipient");
    let relayer = Addr::unchecked("terra1relayer");

    let bridge_code_id = app.store_code(contract_bridge());
    let bridge = app
        .instantiate_contract(
            bridge_code_id,
            owner.clone(),
            &InstantiateMsg {
                owner: owner.to_string(),
                signers: signers.iter().map(|s| s.address()).collect(),
                threshold,
            },
            &[],
            "custody-bridge",
            Some(owner.to_string()),
        )
        .unwrap();

    TestEnv {
        app,
        bridge,
        bridge_code_id,
        owner,
        user,
        recipient,
        relayer,
    }
}

/// Bridge with the owner key as the only signer, threshold 1.
pub fn setup() -> TestEnv {
    setup_with(&[&TestSigner::owner()], 1)
}

impl TestEnv {
    // ------------------------------------------------------------------------
    // CW20
    // ------------------------------------------------------------------------

    /// CW20 token with `balance` held by the user. Wrapped tokens are minted
    /// by the bridge.
    pub fn create_cw20(&mut self, symbol: &str, balance: u128, bridge_is_minter: bool) -> Addr {
        let code_id = self.app.store_code(contract_cw20());
        let minter = if bridge_is_minter {
            self.bridge.to_string()
        } else {
            self.owner.to_string()
        };
        self.app
            .instantiate_contract(
                code_id,
                self.owner.clone(),
                &cw20_base::msg::InstantiateMsg {
                    name: format!("{symbol} Token"),
                    symbol: symbol.to_string(),
                    decimals: 6,
                    initial_balances: vec![Cw20Coin {
                        address: self.user.to_string(),
                        amount: Uint128::new(balance),
                    }],
                    mint: Some(MinterResponse { minter, cap: None }),
                    marketing: None,
                },
                &[],
                symbol,
                None,
            )
            .unwrap()
    }

    pub fn approve_cw20(&mut self, token: &Addr, amount: u128) {
        self.app
            .execute_contract(
                self.user.clone(),
                token.clone(),
                &Cw20ExecuteMsg::IncreaseAllowance {
                    spender: self.bridge.to_string(),
                    amount: Uint128::new(amount),
                    expires: None,
                },
                &[],
            )
            .unwrap();
    }

    pub fn cw20_balance(&self, token: &Addr, account: &Addr) -> u128 {
        let res: BalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                token,
                &Cw20QueryMsg::Balance {
                    address: account.to_string(),
                },
            )
            .unwrap();
        res.balance.u128()
    }

    pub fn cw20_supply(&self, token: &Addr) -> u128 {
        let res: cw20::TokenInfoResponse = self
            .app
            .wrap()
            .query_wasm_smart(token, &Cw20QueryMsg::TokenInfo {})
            .unwrap();
        res.total_supply.u128()
    }

    pub fn deposit_fungible(
        &mut self,
        token: &Addr,
        amount: u128,
        mintable: bool,
    ) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            self.user.clone(),
            self.bridge.clone(),
            &ExecuteMsg::DepositFungible {
                asset: token.to_string(),
                amount: Uint128::new(amount),
                recipient: "0x70997970c51812dc3a010c7d01b50e0d17dc79c8".to_string(),
                destination_network: NETWORK.to_string(),
                mintable,
            },
            &[],
        )
    }

    pub fn fungible_sign_hash(
        &self,
        token: &Addr,
        amount: u128,
        nonce: u64,
        mintable: bool,
    ) -> Binary {
        let res: SignHashResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.bridge,
                &QueryMsg::FungibleSignHash {
                    asset: token.to_string(),
                    amount: Uint128::new(amount),
                    recipient: self.recipient.to_string(),
                    source_tx_hash: Binary::from(TX_HASH.to_vec()),
                    nonce,
                    mintable,
                    chain_id: None,
                },
            )
            .unwrap();
        res.hash
    }

    pub fn withdraw_fungible(
        &mut self,
        token: &Addr,
        amount: u128,
        nonce: u64,
        mintable: bool,
        signatures: Vec<Binary>,
    ) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            self.relayer.clone(),
            self.bridge.clone(),
            &ExecuteMsg::WithdrawFungible {
                asset: token.to_string(),
                amount: Uint128::new(amount),
                recipient: self.recipient.to_string(),
                source_tx_hash: Binary::from(TX_HASH.to_vec()),
                nonce,
                mintable,
                signatures,
            },
            &[],
        )
    }

    // ------------------------------------------------------------------------
    // CW721
    // ------------------------------------------------------------------------

    /// CW721 collection. Wrapped collections are minted by the bridge.
    pub fn create_cw721(&mut self, symbol: &str, bridge_is_minter: bool) -> Addr {
        let code_id = self.app.store_code(contract_cw721());
        let minter = if bridge_is_minter {
            self.bridge.to_string()
        } else {
            self.owner.to_string()
        };
        self.app
            .instantiate_contract(
                code_id,
                self.owner.clone(),
                &cw721_base::InstantiateMsg {
                    name: format!("{symbol} Collection"),
                    symbol: symbol.to_string(),
                    minter,
                },
                &[],
                symbol,
                None,
            )
            .unwrap()
    }

    /// Mint `token_id` to the user from the owner-minted collection.
    pub fn mint_nft(&mut self, collection: &Addr, token_id: &str) {
        self.app
            .execute_contract(
                self.owner.clone(),
                collection.clone(),
                &NftExecuteMsg::Mint {
                    token_id: token_id.to_string(),
                    owner: self.user.to_string(),
                    token_uri: Some(TOKEN_URI.to_string()),
                    extension: None,
                },
                &[],
            )
            .unwrap();
    }

    pub fn approve_nft(&mut self, collection: &Addr, token_id: &str) {
        self.app
            .execute_contract(
                self.user.clone(),
                collection.clone(),
                &Cw721ExecuteMsg::Approve {
                    spender: self.bridge.to_string(),
                    token_id: token_id.to_string(),
                    expires: None,
                },
                &[],
            )
            .unwrap();
    }

    /// Owner of `token_id`, or `None` if the token does not exist.
    pub fn nft_owner(&self, collection: &Addr, token_id: &str) -> Option<String> {
        self.app
            .wrap()
            .query_wasm_smart::<OwnerOfResponse>(
                collection,
                &Cw721QueryMsg::OwnerOf {
                    token_id: token_id.to_string(),
                    include_expired: None,
                },
            )
            .ok()
            .map(|res| res.owner)
    }

    pub fn deposit_non_fungible(
        &mut self,
        sender: &Addr,
        collection: &Addr,
        token_id: &str,
        mintable: bool,
    ) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            sender.clone(),
            self.bridge.clone(),
            &ExecuteMsg::DepositNonFungible {
                asset: collection.to_string(),
                token_id: token_id.to_string(),
                recipient: "0x70997970c51812dc3a010c7d01b50e0d17dc79c8".to_string(),
                destination_network: NETWORK.to_string(),
                mintable,
            },
            &[],
        )
    }

    pub fn non_fungible_sign_hash(
        &self,
        collection: &Addr,
        token_id: &str,
        nonce: u64,
        mintable: bool,
    ) -> Binary {
        let res: SignHashResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.bridge,
                &QueryMsg::NonFungibleSignHash {
                    asset: collection.to_string(),
                    token_id: token_id.to_string(),
                    recipient: self.recipient.to_string(),
                    source_tx_hash: Binary::from(TX_HASH.to_vec()),
                    nonce,
                    token_uri: TOKEN_URI.to_string(),
                    mintable,
                    chain_id: None,
                },
            )
            .unwrap();
        res.hash
    }

    pub fn withdraw_non_fungible(
        &mut self,
        collection: &Addr,
        token_id: &str,
        nonce: u64,
        mintable: bool,
        signatures: Vec<Binary>,
    ) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            self.relayer.clone(),
            self.bridge.clone(),
            &ExecuteMsg::WithdrawNonFungible {
                asset: collection.to_string(),
                token_id: token_id.to_string(),
                recipient: self.recipient.to_string(),
                source_tx_hash: Binary::from(TX_HASH.to_vec()),
                nonce,
                token_uri: TOKEN_URI.to_string(),
                mintable,
                signatures,
            },
            &[],
        )
    }

    // ------------------------------------------------------------------------
    // Bridge
    // ------------------------------------------------------------------------

    /// Store another copy of the bridge code, as a stand-in for new code.
    pub fn store_bridge_code(&mut self) -> u64 {
        self.app.store_code(contract_bridge())
    }

    pub fn query<T: serde::de::DeserializeOwned>(&self, msg: &QueryMsg) -> T {
        self.app.wrap().query_wasm_smart(&self.bridge, msg).unwrap()
    }

    pub fn execute_as_owner(&mut self, msg: &ExecuteMsg) -> anyhow::Result<AppResponse> {
        self.app
            .execute_contract(self.owner.clone(), self.bridge.clone(), msg, &[])
    }
}

/// Binary payload for `Receive`/`ReceiveNft` deposits.
pub fn deposit_hook(mintable: bool) -> Binary {
    to_json_binary(&bridge::msg::ReceiveMsg::Deposit {
        recipient: "0x70997970c51812dc3a010c7d01b50e0d17dc79c8".to_string(),
        destination_network: NETWORK.to_string(),
        mintable,
    })
    .unwrap()
}

/// Error text at the bottom of a failed call.
pub fn root_error(res: anyhow::Result<AppResponse>) -> String {
    res.unwrap_err().root_cause().to_string()
}
