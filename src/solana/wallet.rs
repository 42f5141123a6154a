use anyhow::{anyhow, Result};
use async_trait::async_trait;
use bip39::{Language, Mnemonic};
use ed25519_dalek::{SigningKey, VerifyingKey};
use solana_sdk::transaction::VersionedTransaction;
use solana_sdk::{pubkey::Pubkey, signature::Keypair, signer::Signer};
use std::str::FromStr;

/// Signing capability of a connected wallet
#[async_trait]
pub trait WalletAdapter: Send + Sync {
    fn is_connected(&self) -> bool;

    fn public_key(&self) -> Pubkey;

    /// Sign the transaction and hand it back ready for broadcast
    async fn sign_transaction(&self, transaction: VersionedTransaction)
        -> Result<VersionedTransaction>;
}

/// Wallet backed by a local keypair. Always connected.
pub struct KeypairWallet {
    keypair: Keypair,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }

    pub fn from_base58(keypair_base58: &str) -> Result<Self> {
        Ok(Self::new(keypair_from_base58(keypair_base58)?))
    }

    pub fn from_mnemonic(phrase: &str) -> Result<Self> {
        Ok(Self::new(keypair_from_mnemonic(phrase)?))
    }
}

#[async_trait]
impl WalletAdapter for KeypairWallet {
    fn is_connected(&self) -> bool {
        true
    }

    fn public_key(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    async fn sign_transaction(
        &self,
        transaction: VersionedTransaction,
    ) -> Result<VersionedTransaction> {
        VersionedTransaction::try_new(transaction.message, &[&self.keypair])
            .map_err(|e| anyhow!("Failed to sign transaction: {}", e))
    }
}

/// Restore a keypair from a 12/24-word BIP39 phrase.
///
/// The first 32 bytes of the seed are the Ed25519 secret, matching how the
/// bot's wallets were generated.
pub fn keypair_from_mnemonic(phrase: &str) -> Result<Keypair> {
    let mnemonic = Mnemonic::parse_in(Language::English, phrase.trim())
        .map_err(|e| anyhow!("Invalid mnemonic: {}", e))?;

    let seed = mnemonic.to_seed("");

    let signing_key = SigningKey::try_from(&seed[..32])
        .map_err(|e| anyhow!("Failed to create ed25519 signing key: {}", e))?;
    let verifying_key = VerifyingKey::from(&signing_key);

    // 32 bytes private + 32 bytes public
    let mut ed25519_bytes = [0u8; 64];
    ed25519_bytes[..32].copy_from_slice(&signing_key.to_bytes());
    ed25519_bytes[32..].copy_from_slice(&verifying_key.to_bytes());

    Keypair::from_bytes(&ed25519_bytes)
        .map_err(|e| anyhow!("Failed to create Solana keypair: {}", e))
}

/// Serialize Keypair (64 bytes) to base58.
pub fn keypair_to_base58(keypair: &Keypair) -> String {
    bs58::encode(keypair.to_bytes()).into_string()
}

/// Restore Keypair from base58 string (64 bytes).
pub fn keypair_from_base58(keypair_base58: &str) -> Result<Keypair> {
    let keypair_bytes = bs58::decode(keypair_base58.trim())
        .into_vec()
        .map_err(|e| anyhow!("Failed to decode base58 keypair: {}", e))?;

    if keypair_bytes.len() != 64 {
        return Err(anyhow!("Invalid keypair length: {}", keypair_bytes.len()));
    }

    Keypair::from_bytes(&keypair_bytes)
        .map_err(|e| anyhow!("Failed to create keypair from bytes: {}", e))
}

/// Convert base58 string to Solana `Pubkey`.
pub fn parse_pubkey(address: &str) -> Result<Pubkey> {
    Pubkey::from_str(address).map_err(|e| anyhow!("Invalid Solana address: {}", e))
}
