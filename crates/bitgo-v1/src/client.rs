//! BitGo v1 client: keychains, labels, wallets, transactions, webhooks and
//! BitGo Express utilities.

use bitgo_core::{
    seed_bytes, ApiVersion, BitGoConfig, BitGoError, Endpoint, Environment, Transport, UserApi,
    WalletDefaults,
};
use serde_json::Value;
use tracing::debug;

use crate::types::{
    AddWalletOptions, BuildTransactionOptions, SendCoinsOptions, SendManyOptions,
    SignTransactionOptions,
};

/// HTTP client for the BitGo v1 API.
///
/// Wallet-scoped methods take `wallet_id: Option<&str>`; `None` uses the
/// wallet id from the client's [`WalletDefaults`].
#[derive(Debug, Clone)]
pub struct BitGoV1 {
    transport: Transport,
    defaults: WalletDefaults,
}

impl BitGoV1 {
    /// Create a client from a configuration.
    pub fn new(config: BitGoConfig) -> Self {
        Self {
            transport: Transport::from_config(&config),
            defaults: config.defaults,
        }
    }

    /// Create a client for one of the fixed environments.
    pub fn for_env(environment: Environment) -> Self {
        Self::new(BitGoConfig::for_env(ApiVersion::V1, environment))
    }

    /// Create a client from `BITGO_*` environment variables.
    pub fn from_env() -> Result<Self, BitGoError> {
        Ok(Self::new(BitGoConfig::from_env(ApiVersion::V1)?))
    }

    /// The underlying transport.
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Set the bearer token, typically the `access_token` returned by
    /// [`UserApi::login`].
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

    fn wallet_path(&self, wallet_id: Option<&str>, suffix: &str) -> Result<String, BitGoError> {
        let id = self.defaults.wallet_id(wallet_id)?;
        Ok(format!("/wallet/{id}{suffix}"))
    }

    // Keychains

    /// List the user's keychains.
    pub async fn list_keychains(&self) -> Result<Value, BitGoError> {
        self.call(Endpoint::get("/keychain")).await
    }

    /// Create a keychain locally on BitGo Express.
    ///
    /// `seed` is a hex string of at least 32 bytes; the same seed yields the
    /// same BIP32 keychain.
    pub async fn create_keychain(&self, seed: Option<&str>) -> Result<Value, BitGoError> {
        let seed = seed.map(seed_bytes).transpose()?;
        self.call(Endpoint::post("/keychain/local").param_opt("seed", seed))
            .await
    }

    /// Register a keychain with BitGo.
    pub async fn add_keychain(&self, xpub: &str, encrypted_xprv: &str) -> Result<Value, BitGoError> {
        let endpoint = Endpoint::post("/keychain")
            .param("xpub", xpub)
            .param("encrypted_xprv", encrypted_xprv);
        self.call(endpoint).await
    }

    /// Have BitGo create its own keychain for a new wallet.
    pub async fn create_bitgo_keychain(&self) -> Result<Value, BitGoError> {
        self.call(Endpoint::post("/keychain/bitgo")).await
    }

    // Labels

    /// List all address labels.
    pub async fn list_labels(&self) -> Result<Value, BitGoError> {
        self.call(Endpoint::get("/labels")).await
    }

    /// List the address labels of one wallet.
    pub async fn list_labels_for_wallet(&self, wallet_id: Option<&str>) -> Result<Value, BitGoError> {
        let id = self.defaults.wallet_id(wallet_id)?;
        self.call(Endpoint::get(format!("/labels/{id}"))).await
    }

    /// Label an address of a wallet.
    pub async fn set_label(
        &self,
        wallet_id: Option<&str>,
        address: &str,
        label: &str,
    ) -> Result<Value, BitGoError> {
        let id = self.defaults.wallet_id(wallet_id)?;
        let endpoint = Endpoint::put(format!("/labels/{id}/{address}")).param("label", label);
        self.call(endpoint).await
    }

    /// Remove the label of an address.
    pub async fn delete_label(&self, wallet_id: Option<&str>, address: &str) -> Result<Value, BitGoError> {
        let id = self.defaults.wallet_id(wallet_id)?;
        self.call(Endpoint::delete(format!("/labels/{id}/{address}")))
            .await
    }

    // Wallets

    /// List the user's wallets.
    pub async fn list_wallets(&self) -> Result<Value, BitGoError> {
        self.call(Endpoint::get("/wallet")).await
    }

    /// Create user, backup and BitGo keychains and a wallet in one call.
    ///
    /// Only served by BitGo Express. The response contains the backup
    /// keychain's `xprv`, which is stored nowhere else.
    pub async fn simple_create_wallet(&self, passphrase: &str, label: &str) -> Result<Value, BitGoError> {
        let endpoint = Endpoint::post("/wallets/simplecreate")
            .param("passphrase", passphrase)
            .param("label", label);
        self.call(endpoint).await
    }

    /// Create a wallet from keychains already registered with BitGo.
    pub async fn add_wallet(&self, options: &AddWalletOptions) -> Result<Value, BitGoError> {
        self.call(Endpoint::post("/wallet").body(options)?).await
    }

    /// Wallet model including balances and permissions.
    pub async fn get_wallet(&self, wallet_id: Option<&str>) -> Result<Value, BitGoError> {
        self.call(Endpoint::get(self.wallet_path(wallet_id, "")?))
            .await
    }

    /// Addresses instantiated for a wallet.
    pub async fn list_wallet_addresses(&self, wallet_id: Option<&str>) -> Result<Value, BitGoError> {
        self.call(Endpoint::get(self.wallet_path(wallet_id, "/addresses")?))
            .await
    }

    /// Create a new address on `chain` (0 for receiving, 1 for change).
    pub async fn create_address(&self, wallet_id: Option<&str>, chain: u32) -> Result<Value, BitGoError> {
        let path = self.wallet_path(wallet_id, &format!("/address/{chain}"))?;
        self.call(Endpoint::post(path)).await
    }

    // Transactions

    /// Transactions of a wallet.
    pub async fn list_wallet_transactions(&self, wallet_id: Option<&str>) -> Result<Value, BitGoError> {
        self.call(Endpoint::get(self.wallet_path(wallet_id, "/tx")?))
            .await
    }

    /// One transaction of a wallet.
    pub async fn get_wallet_transaction(
        &self,
        wallet_id: Option<&str>,
        txid: &str,
    ) -> Result<Value, BitGoError> {
        let path = self.wallet_path(wallet_id, &format!("/tx/{txid}"))?;
        self.call(Endpoint::get(path)).await
    }

    /// Unspent outputs available to the wallet.
    pub async fn list_unspents(&self, wallet_id: Option<&str>) -> Result<Value, BitGoError> {
        self.call(Endpoint::get(self.wallet_path(wallet_id, "/unspents")?))
            .await
    }

    /// Send coins to one address through BitGo Express.
    pub async fn send_coins_to_address(&self, options: &SendCoinsOptions) -> Result<Value, BitGoError> {
        let wallet_id = self.defaults.wallet_id(options.wallet_id.as_deref())?;
        let passphrase = self
            .defaults
            .wallet_passphrase(options.wallet_passphrase.as_deref())?;
        debug!(wallet_id, amount = options.amount, "sending coins");

        let endpoint = Endpoint::post("/sendcoins")
            .param("wallet_id", wallet_id)
            .param("address", options.address.as_str())
            .param("amount", options.amount)
            .param("wallet_passphrase", passphrase)
            .param_opt("min_confirmations", options.min_confirmations)
            .param_opt("fee", options.fee);
        self.call(endpoint).await
    }

    /// Send coins to several addresses in one transaction.
    pub async fn send_coins_to_multiple_addresses(
        &self,
        wallet_id: Option<&str>,
        options: &SendManyOptions,
    ) -> Result<Value, BitGoError> {
        if options.recipients.is_empty() {
            return Err(BitGoError::MissingArgument("recipients"));
        }
        let path = self.wallet_path(wallet_id, "/sendmany")?;
        let passphrase = self
            .defaults
            .wallet_passphrase(options.wallet_passphrase.as_deref())?;

        let recipients = serde_json::to_value(&options.recipients).map_err(BitGoError::Serialization)?;
        let endpoint = Endpoint::post(path)
            .param("recipients", recipients)
            .param("walletPassphrase", passphrase)
            .param_opt("minConfirmations", options.min_confirmations)
            .param_opt("fee", options.fee);
        self.call(endpoint).await
    }

    /// Build an unsigned transaction through BitGo Express.
    pub async fn build_transaction(
        &self,
        wallet_id: Option<&str>,
        options: &BuildTransactionOptions,
    ) -> Result<Value, BitGoError> {
        if options.recipients.is_empty() {
            return Err(BitGoError::MissingArgument("recipients"));
        }
        let path = self.wallet_path(wallet_id, "/createtransaction")?;
        self.call(Endpoint::post(path).body(options)?).await
    }

    /// Sign a built transaction with the user keychain through BitGo Express.
    pub async fn sign_transaction(
        &self,
        wallet_id: Option<&str>,
        options: &SignTransactionOptions,
    ) -> Result<Value, BitGoError> {
        let path = self.wallet_path(wallet_id, "/signtransaction")?;
        self.call(Endpoint::post(path).body(options)?).await
    }

    /// Submit a half-signed transaction for BitGo's co-signature and broadcast.
    pub async fn send_transaction(&self, tx_hex: &str, otp: Option<&str>) -> Result<Value, BitGoError> {
        let endpoint = Endpoint::post("/tx/send")
            .param("tx", tx_hex)
            .param_opt("otp", otp);
        self.call(endpoint).await
    }

    // Webhooks

    /// Register a callback on wallet events. BitGo allows five webhooks of
    /// each type per wallet.
    pub async fn add_webhook(
        &self,
        wallet_id: Option<&str>,
        webhook_type: &str,
        url: &str,
        confirmations: Option<u32>,
    ) -> Result<Value, BitGoError> {
        let endpoint = Endpoint::post(self.wallet_path(wallet_id, "/webhooks")?)
            .param("type", webhook_type)
            .param("url", url)
            .param_opt("numConfirmations", confirmations);
        self.call(endpoint).await
    }

    /// Remove a webhook.
    pub async fn remove_webhook(
        &self,
        wallet_id: Option<&str>,
        webhook_type: &str,
        url: &str,
    ) -> Result<Value, BitGoError> {
        let endpoint = Endpoint::delete(self.wallet_path(wallet_id, "/webhooks")?)
            .param("type", webhook_type)
            .param("url", url);
        self.call(endpoint).await
    }

    /// Webhooks registered on a wallet.
    pub async fn list_webhooks(&self, wallet_id: Option<&str>) -> Result<Value, BitGoError> {
        self.call(Endpoint::get(self.wallet_path(wallet_id, "/webhooks")?))
            .await
    }

    // BitGo Express utilities

    /// Encrypt `input` with `password`.
    pub async fn encrypt(&self, input: &str, password: &str) -> Result<Value, BitGoError> {
        let endpoint = Endpoint::post("/encrypt")
            .param("input", input)
            .param("password", password);
        self.call(endpoint).await
    }

    /// Decrypt `input` with `password`.
    pub async fn decrypt(&self, input: &str, password: &str) -> Result<Value, BitGoError> {
        let endpoint = Endpoint::post("/decrypt")
            .param("input", input)
            .param("password", password);
        self.call(endpoint).await
    }

    /// Check that `address` is a valid Bitcoin address (P2PKH or P2SH).
    pub async fn verify_address(&self, address: &str) -> Result<Value, BitGoError> {
        self.call(Endpoint::post("/verifyaddress").param("address", address))
            .await
    }
}
