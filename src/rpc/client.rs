//! `ChainReader` backed by the JSON-RPC client.

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use log::debug;
use serde_json::json;
use solana_account_decoder::UiAccountEncoding;
use solana_client::{
    nonblocking::rpc_client::RpcClient,
    rpc_config::RpcAccountInfoConfig,
    rpc_request::RpcRequest,
    rpc_response::{Response, RpcKeyedAccount},
};
use solana_program::{program_option::COption, program_pack::Pack};
use solana_sdk::{
    account::Account,
    commitment_config::{CommitmentConfig, CommitmentLevel},
    hash::Hash,
    pubkey::Pubkey,
};
use spl_token::state::{Account as SplAccount, Mint as SplMint};

use super::{ChainReader, MintInfo, TokenAccount};

#[derive(Clone)]
pub struct RpcChainReader {
    rpc: Arc<RpcClient>,
}

impl RpcChainReader {
    pub fn new(rpc: Arc<RpcClient>) -> Self {
        Self { rpc }
    }
}

#[async_trait]
impl ChainReader for RpcChainReader {
    /// Owner-indexed `getTokenAccountsByOwner`, asked for raw base64 data so
    /// accounts can be unpacked locally instead of going through `jsonParsed`.
    async fn token_accounts(
        &self,
        owner: &Pubkey,
        commitment: CommitmentLevel,
    ) -> Result<Vec<TokenAccount>> {
        let config = RpcAccountInfoConfig {
            encoding: Some(UiAccountEncoding::Base64),
            commitment: Some(CommitmentConfig { commitment }),
            ..RpcAccountInfoConfig::default()
        };
        let params = json!([
            owner.to_string(),
            { "programId": spl_token::id().to_string() },
            config,
        ]);

        let response: Response<Vec<RpcKeyedAccount>> = self
            .rpc
            .send(RpcRequest::GetTokenAccountsByOwner, params)
            .await
            .with_context(|| format!("fetching token accounts for {owner}"))?;

        Ok(decode_keyed_accounts(response.value))
    }

    async fn mint(&self, mint: &Pubkey, commitment: CommitmentLevel) -> Result<MintInfo> {
        let account = self
            .rpc
            .get_account_with_commitment(mint, CommitmentConfig { commitment })
            .await
            .with_context(|| format!("fetching mint {mint}"))?
            .value
            .ok_or_else(|| anyhow!("mint account {mint} not found"))?;

        decode_mint(&account.data).with_context(|| format!("decoding mint {mint}"))
    }

    async fn latest_blockhash(&self) -> Result<Hash> {
        let (hash, _last_valid_height) = self
            .rpc
            .get_latest_blockhash_with_commitment(CommitmentConfig::finalized())
            .await
            .context("fetching latest finalized blockhash")?;
        Ok(hash)
    }
}

/// Undecodable entries are logged and dropped; node order is kept.
pub fn decode_keyed_accounts(keyed: Vec<RpcKeyedAccount>) -> Vec<TokenAccount> {
    let mut accounts = Vec::with_capacity(keyed.len());
    for RpcKeyedAccount { pubkey, account } in keyed {
        let decoded = pubkey
            .parse::<Pubkey>()
            .map_err(|e| anyhow!("bad account address: {e}"))
            .and_then(|address| {
                let raw: Account = account
                    .decode()
                    .ok_or_else(|| anyhow!("account data is not base64"))?;
                decode_token_account(address, &raw.data)
            });
        match decoded {
            Ok(acc) => accounts.push(acc),
            Err(e) => debug!("[RPC] ignoring undecodable account {pubkey}: {e}"),
        }
    }
    accounts
}

pub fn decode_token_account(address: Pubkey, data: &[u8]) -> Result<TokenAccount> {
    let acc = SplAccount::unpack(data).map_err(|e| anyhow!("token account unpack: {e}"))?;
    Ok(TokenAccount {
        address,
        mint: acc.mint,
        amount: acc.amount,
    })
}

pub fn decode_mint(data: &[u8]) -> Result<MintInfo> {
    let mint = SplMint::unpack(data).map_err(|e| anyhow!("mint unpack: {e}"))?;
    let freeze_authority = match mint.freeze_authority {
        COption::Some(key) => Some(key),
        COption::None => None,
    };
    Ok(MintInfo {
        decimals: mint.decimals,
        freeze_authority,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_account_decoder::UiAccount;
    use spl_token::state::AccountState;

    fn packed_account(mint: Pubkey, owner: Pubkey, amount: u64) -> Vec<u8> {
        let acc = SplAccount {
            mint,
            owner,
            amount,
            state: AccountState::Initialized,
            ..SplAccount::default()
        };
        let mut buf = vec![0u8; SplAccount::LEN];
        SplAccount::pack(acc, &mut buf).unwrap();
        buf
    }

    fn packed_mint(decimals: u8, freeze_authority: COption<Pubkey>) -> Vec<u8> {
        let mint = SplMint {
            decimals,
            is_initialized: true,
            freeze_authority,
            ..SplMint::default()
        };
        let mut buf = vec![0u8; SplMint::LEN];
        SplMint::pack(mint, &mut buf).unwrap();
        buf
    }

    #[test]
    fn decodes_token_account_fields() {
        let address = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let owner = Pubkey::new_unique();

        let acc = decode_token_account(address, &packed_account(mint, owner, 500)).unwrap();
        assert_eq!(
            acc,
            TokenAccount {
                address,
                mint,
                amount: 500
            }
        );
    }

    fn keyed(address: Pubkey, data: Vec<u8>) -> RpcKeyedAccount {
        let account = Account {
            lamports: 2_039_280,
            data,
            owner: spl_token::id(),
            executable: false,
            rent_epoch: 0,
        };
        RpcKeyedAccount {
            pubkey: address.to_string(),
            account: UiAccount::encode(&address, &account, UiAccountEncoding::Base64, None, None),
        }
    }

    #[test]
    fn decodes_keyed_accounts_in_node_order() {
        let owner = Pubkey::new_unique();
        let (a, b) = (Pubkey::new_unique(), Pubkey::new_unique());
        let (mint_a, mint_b) = (Pubkey::new_unique(), Pubkey::new_unique());

        let accounts = decode_keyed_accounts(vec![
            keyed(a, packed_account(mint_a, owner, 0)),
            keyed(b, packed_account(mint_b, owner, 500)),
        ]);

        assert_eq!(
            accounts,
            vec![
                TokenAccount { address: a, mint: mint_a, amount: 0 },
                TokenAccount { address: b, mint: mint_b, amount: 500 },
            ]
        );
    }

    #[test]
    fn drops_entries_that_do_not_unpack() {
        let good = Pubkey::new_unique();
        let accounts = decode_keyed_accounts(vec![
            keyed(Pubkey::new_unique(), vec![0u8; 12]),
            keyed(good, packed_account(Pubkey::new_unique(), Pubkey::new_unique(), 1)),
        ]);

        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].address, good);
    }

    #[test]
    fn rejects_uninitialized_account() {
        let data = vec![0u8; SplAccount::LEN];
        assert!(decode_token_account(Pubkey::new_unique(), &data).is_err());
    }

    #[test]
    fn decodes_mint_without_freeze_authority() {
        let info = decode_mint(&packed_mint(6, COption::None)).unwrap();
        assert_eq!(info.decimals, 6);
        assert!(!info.is_freezable());
    }

    #[test]
    fn decodes_mint_with_freeze_authority() {
        let authority = Pubkey::new_unique();
        let info = decode_mint(&packed_mint(9, COption::Some(authority))).unwrap();
        assert_eq!(info.freeze_authority, Some(authority));
        assert!(info.is_freezable());
    }

    #[test]
    fn rejects_short_mint_data() {
        assert!(decode_mint(&[0u8; 10]).is_err());
    }
}
