//! BitGo v2 client. Every path is scoped by a [`Coin`].

use bitgo_core::{
    seed_bytes, ApiVersion, BitGoConfig, BitGoError, Endpoint, Environment, Transport, UserApi,
    WalletDefaults,
};
use serde_json::Value;
use tracing::debug;

use crate::coin::{Coin, IntoCoin};
use crate::types::{AddWalletOptions, FeeOptions, Recipient, SendCoinsOptions, SendManyOptions};

/// HTTP client for the BitGo v2 API.
///
/// The coin argument is validated before anything else; an unknown code
/// fails with [`BitGoError::InvalidCoin`] and no request is sent.
#[derive(Debug, Clone)]
pub struct BitGoV2 {
    transport: Transport,
    defaults: WalletDefaults,
}

impl BitGoV2 {
    /// Create a client from a configuration.
    pub fn new(config: BitGoConfig) -> Self {
        Self {
            transport: Transport::from_config(&config),
            defaults: config.defaults,
        }
    }

    /// Create a client for one of the fixed environments.
    pub fn for_env(environment: Environment) -> Self {
        Self::new(BitGoConfig::for_env(ApiVersion::V2, environment))
    }

    /// Create a client from `BITGO_*` environment variables.
    pub fn from_env() -> Result<Self, BitGoError> {
        Ok(Self::new(BitGoConfig::from_env(ApiVersion::V2)?))
    }

    /// The underlying transport.
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Set the bearer token.
    pub fn set_session_token(&mut self, token: impl Into<String>) {
        self.transport.set_session_token(token);
    }

    /// The current bearer token.
    pub fn session_token(&self) -> Option<&str> {
        self.transport.session_token()
    }

    /// User session endpoints (login, logout, OTP, unlock).
    pub fn user(&self) -> UserApi<'_> {
        UserApi::new(&self.transport)
    }

    async fn call(&self, endpoint: Endpoint) -> Result<Value, BitGoError> {
        self.transport.call_json(endpoint).await
    }

    fn coin_path(coin: impl IntoCoin, suffix: &str) -> Result<String, BitGoError> {
        let coin: Coin = coin.into_coin()?;
        Ok(format!("/{coin}{suffix}"))
    }

    fn wallet_path(
        &self,
        coin: impl IntoCoin,
        wallet_id: Option<&str>,
        suffix: &str,
    ) -> Result<String, BitGoError> {
        let coin = coin.into_coin()?;
        let id = self.defaults.wallet_id(wallet_id)?;
        Ok(format!("/{coin}/wallet/{id}{suffix}"))
    }

    // Keychains

    /// List the user's keychains for `coin`.
    pub async fn list_keychains(&self, coin: impl IntoCoin) -> Result<Value, BitGoError> {
        self.call(Endpoint::get(Self::coin_path(coin, "/keychain")?))
            .await
    }

    /// Create a keychain locally on BitGo Express, optionally from a hex
    /// seed.
    pub async fn create_keychain(
        &self,
        coin: impl IntoCoin,
        seed: Option<&str>,
    ) -> Result<Value, BitGoError> {
        let path = Self::coin_path(coin, "/keychain/local")?;
        let seed = seed.map(seed_bytes).transpose()?;
        self.call(Endpoint::post(path).param_opt("seed", seed)).await
    }

    /// Register a keychain with BitGo.
    pub async fn add_keychain(
        &self,
        coin: impl IntoCoin,
        xpub: &str,
        encrypted_xprv: &str,
    ) -> Result<Value, BitGoError> {
        let endpoint = Endpoint::post(Self::coin_path(coin, "/keychain")?)
            .param("xpub", xpub)
            .param("encrypted_xprv", encrypted_xprv);
        self.call(endpoint).await
    }

    /// Have BitGo create its own keychain.
    pub async fn create_bitgo_keychain(&self, coin: impl IntoCoin) -> Result<Value, BitGoError> {
        self.call(Endpoint::post(Self::coin_path(coin, "/keychain/bitgo")?))
            .await
    }

    // Wallets

    /// List the user's wallets for `coin`.
    pub async fn list_wallets(&self, coin: impl IntoCoin) -> Result<Value, BitGoError> {
        self.call(Endpoint::get(Self::coin_path(coin, "/wallet")?))
            .await
    }

    /// Create a wallet.
    pub async fn add_wallet(
        &self,
        coin: impl IntoCoin,
        options: &AddWalletOptions,
    ) -> Result<Value, BitGoError> {
        let path = Self::coin_path(coin, "/wallet")?;
        self.call(Endpoint::post(path).body(options)?).await
    }

    /// Wallet model including balances and permissions.
    pub async fn get_wallet(
        &self,
        coin: impl IntoCoin,
        wallet_id: Option<&str>,
    ) -> Result<Value, BitGoError> {
        self.call(Endpoint::get(self.wallet_path(coin, wallet_id, "")?))
            .await
    }

    /// Addresses instantiated for a wallet.
    pub async fn list_wallet_addresses(
        &self,
        coin: impl IntoCoin,
        wallet_id: Option<&str>,
    ) -> Result<Value, BitGoError> {
        let path = self.wallet_path(coin, wallet_id, "/addresses")?;
        self.call(Endpoint::get(path)).await
    }

    /// Create a new receive address.
    pub async fn create_address(
        &self,
        coin: impl IntoCoin,
        wallet_id: Option<&str>,
    ) -> Result<Value, BitGoError> {
        let path = self.wallet_path(coin, wallet_id, "/address")?;
        self.call(Endpoint::post(path)).await
    }

    // Transactions

    /// Transactions of a wallet.
    pub async fn list_wallet_transactions(
        &self,
        coin: impl IntoCoin,
        wallet_id: Option<&str>,
    ) -> Result<Value, BitGoError> {
        let path = self.wallet_path(coin, wallet_id, "/tx")?;
        self.call(Endpoint::get(path)).await
    }

    /// One transaction of a wallet.
    pub async fn get_wallet_transaction(
        &self,
        coin: impl IntoCoin,
        wallet_id: Option<&str>,
        txid: &str,
    ) -> Result<Value, BitGoError> {
        let path = self.wallet_path(coin, wallet_id, &format!("/tx/{txid}"))?;
        self.call(Endpoint::get(path)).await
    }

    /// Unspent outputs available to the wallet.
    pub async fn list_unspents(
        &self,
        coin: impl IntoCoin,
        wallet_id: Option<&str>,
    ) -> Result<Value, BitGoError> {
        let path = self.wallet_path(coin, wallet_id, "/unspents")?;
        self.call(Endpoint::get(path)).await
    }

    /// Build an unsigned transaction paying `recipients`.
    pub async fn build_transaction(
        &self,
        coin: impl IntoCoin,
        wallet_id: Option<&str>,
        recipients: &[Recipient],
        fees: &FeeOptions,
    ) -> Result<Value, BitGoError> {
        let path = self.wallet_path(coin, wallet_id, "/tx/build")?;
        if recipients.is_empty() {
            return Err(BitGoError::MissingArgument("recipients"));
        }
        let endpoint = Endpoint::post(path)
            .param("recipients", recipients_value(recipients)?)
            .body(fees)?;
        self.call(endpoint).await
    }

    /// Submit a half-signed transaction for co-signing and broadcast.
    pub async fn send_transaction(
        &self,
        coin: impl IntoCoin,
        wallet_id: Option<&str>,
        tx_hex: &str,
        otp: Option<&str>,
    ) -> Result<Value, BitGoError> {
        let path = self.wallet_path(coin, wallet_id, "/tx/send")?;
        let endpoint = Endpoint::post(path)
            .param("txHex", tx_hex)
            .param_opt("otp", otp);
        self.call(endpoint).await
    }

    /// Build, sign and send a payment to one address.
    pub async fn send_coins(
        &self,
        coin: impl IntoCoin,
        wallet_id: Option<&str>,
        options: &SendCoinsOptions,
    ) -> Result<Value, BitGoError> {
        let coin = coin.into_coin()?;
        let path = self.wallet_path(coin, wallet_id, "/sendcoins")?;
        let passphrase = self
            .defaults
            .wallet_passphrase(options.wallet_passphrase.as_deref())?;
        debug!(%coin, "sending coins");

        let endpoint = Endpoint::post(path)
            .param("address", options.address.as_str())
            .param("amount", options.amount.as_str())
            .param("walletPassphrase", passphrase)
            .body(&options.fees)?;
        self.call(endpoint).await
    }

    /// Build, sign and send a payment to several addresses.
    pub async fn send_many(
        &self,
        coin: impl IntoCoin,
        wallet_id: Option<&str>,
        options: &SendManyOptions,
    ) -> Result<Value, BitGoError> {
        let coin = coin.into_coin()?;
        let path = self.wallet_path(coin, wallet_id, "/sendmany")?;
        if options.recipients.is_empty() {
            return Err(BitGoError::MissingArgument("recipients"));
        }
        let passphrase = self
            .defaults
            .wallet_passphrase(options.wallet_passphrase.as_deref())?;
        debug!(%coin, recipients = options.recipients.len(), "sending to many");

        let endpoint = Endpoint::post(path)
            .param("recipients", recipients_value(&options.recipients)?)
            .param("walletPassphrase", passphrase)
            .body(&options.fees)?;
        self.call(endpoint).await
    }

    // Webhooks

    /// Register a callback on wallet events.
    pub async fn add_webhook(
        &self,
        coin: impl IntoCoin,
        wallet_id: Option<&str>,
        webhook_type: &str,
        url: &str,
        confirmations: Option<u32>,
    ) -> Result<Value, BitGoError> {
        let endpoint = Endpoint::post(self.wallet_path(coin, wallet_id, "/webhooks")?)
            .param("type", webhook_type)
            .param("url", url)
            .param_opt("numConfirmations", confirmations);
        self.call(endpoint).await
    }

    /// Remove a webhook.
    pub async fn remove_webhook(
        &self,
        coin: impl IntoCoin,
        wallet_id: Option<&str>,
        webhook_type: &str,
        url: &str,
    ) -> Result<Value, BitGoError> {
        let endpoint = Endpoint::delete(self.wallet_path(coin, wallet_id, "/webhooks")?)
            .param("type", webhook_type)
            .param("url", url);
        self.call(endpoint).await
    }

    /// Webhooks registered on a wallet.
    pub async fn list_webhooks(
        &self,
        coin: impl IntoCoin,
        wallet_id: Option<&str>,
    ) -> Result<Value, BitGoError> {
        let path = self.wallet_path(coin, wallet_id, "/webhooks")?;
        self.call(Endpoint::get(path)).await
    }
}

fn recipients_value(recipients: &[Recipient]) -> Result<Value, BitGoError> {
    serde_json::to_value(recipients).map_err(BitGoError::Serialization)
}
