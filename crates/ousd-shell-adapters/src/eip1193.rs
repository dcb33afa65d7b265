use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use alloy::primitives::{keccak256, Address, Bytes, B256, U256};
use alloy::sol_types::SolValue;
use async_trait::async_trait;
use serde_json::Value;

use ousd_shell_core::{contracts, ConnectorKind, PortError, ProviderPort, Session, TxRequest};

use crate::ShellConfig;

#[derive(Debug, Clone)]
pub struct Eip1193Adapter {
    mode: ProviderMode,
    state: Arc<Mutex<ProviderState>>,
}

#[derive(Debug, Clone)]
enum ProviderMode {
    Disabled(String),
    Deterministic,
    #[cfg(not(target_arch = "wasm32"))]
    Proxy(ProxyRuntime),
    #[cfg(target_arch = "wasm32")]
    Browser,
}

#[derive(Debug, Clone)]
#[cfg(not(target_arch = "wasm32"))]
struct ProxyRuntime {
    base_url: String,
    client: reqwest::Client,
}

/// Backing state of the deterministic provider.
#[derive(Debug, Clone)]
struct ProviderState {
    accounts: Vec<Address>,
    chain_id: u64,
    code: HashMap<Address, Bytes>,
    call_results: HashMap<Address, Bytes>,
    pending_rejection: Option<PortError>,
    sent: Vec<Value>,
}

impl Default for ProviderState {
    fn default() -> Self {
        Self {
            accounts: vec![alloy::primitives::address!(
                "1000000000000000000000000000000000000001"
            )],
            chain_id: 1,
            code: HashMap::new(),
            call_results: HashMap::new(),
            pending_rejection: None,
            sent: Vec::new(),
        }
    }
}

impl ProviderState {
    /// Answers a never-touched account gets on chain: rebase option unset, no stakes.
    fn fresh_account(config: &ShellConfig) -> Self {
        let mut state = Self::default();
        state
            .call_results
            .insert(config.ousd_address, Bytes::from(U256::ZERO.abi_encode()));
        state.call_results.insert(
            config.staking_address,
            Bytes::from(Vec::<contracts::Stake>::new().abi_encode()),
        );
        state
    }
}

impl Default for Eip1193Adapter {
    fn default() -> Self {
        Self::with_config(ShellConfig::default())
    }
}

impl Eip1193Adapter {
    pub fn with_config(config: ShellConfig) -> Self {
        #[cfg(target_arch = "wasm32")]
        let mode = if browser_provider_available() {
            ProviderMode::Browser
        } else if config.strict_runtime_required() {
            ProviderMode::Disabled(
                "EIP-1193 browser provider not found in production runtime profile".to_owned(),
            )
        } else {
            ProviderMode::Deterministic
        };

        #[cfg(not(target_arch = "wasm32"))]
        let mode = if let Some(ref base_url) = config.eip1193_proxy_url {
            let timeout = std::time::Duration::from_millis(config.request_timeout_ms);
            match reqwest::Client::builder().timeout(timeout).build() {
                Ok(client) => ProviderMode::Proxy(ProxyRuntime {
                    base_url: base_url.clone(),
                    client,
                }),
                Err(e) => {
                    if config.strict_runtime_required() {
                        ProviderMode::Disabled(format!(
                            "failed to initialize EIP-1193 proxy client in production profile: {e}"
                        ))
                    } else {
                        tracing::warn!(error = %e, "proxy client init failed; using deterministic provider");
                        ProviderMode::Deterministic
                    }
                }
            }
        } else if config.strict_runtime_required() {
            ProviderMode::Disabled(
                "EIP-1193 proxy URL not configured in production runtime profile".to_owned(),
            )
        } else {
            ProviderMode::Deterministic
        };

        tracing::info!(connector = ?connector_kind(&mode), "eip1193 provider configured");
        Self {
            mode,
            state: Arc::new(Mutex::new(ProviderState::fresh_account(&config))),
        }
    }

    /// `None` when the provider is disabled by policy.
    pub fn connector_kind(&self) -> Option<ConnectorKind> {
        connector_kind(&self.mode)
    }

    /// Requests accounts and chain, yielding the session the shell renders against.
    pub async fn connect(&self) -> Result<Session, PortError> {
        let connector = self.connector_kind().ok_or_else(|| match &self.mode {
            ProviderMode::Disabled(reason) => PortError::Policy(reason.clone()),
            _ => PortError::NotImplemented("provider connector"),
        })?;
        let account = self
            .request_accounts()
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                PortError::Policy("no provider accounts available; unlock/connect wallet".to_owned())
            })?;
        let chain_id = self.chain_id().await?;
        Ok(Session::connected(connector, account, chain_id))
    }

    fn lock_state(&self) -> Result<MutexGuard<'_, ProviderState>, PortError> {
        self.state
            .lock()
            .map_err(|e| PortError::Transport(format!("provider lock poisoned: {e}")))
    }

    pub fn debug_set_code(&self, address: Address, code: Bytes) -> Result<(), PortError> {
        self.lock_state()?.code.insert(address, code);
        Ok(())
    }

    pub fn debug_set_call_result(&self, to: Address, output: Bytes) -> Result<(), PortError> {
        self.lock_state()?.call_results.insert(to, output);
        Ok(())
    }

    /// The next `eth_sendTransaction` fails with this provider error code.
    pub fn debug_reject_next(&self, code: i64, message: &str) -> Result<(), PortError> {
        self.lock_state()?.pending_rejection = Some(PortError::Rpc {
            code,
            message: message.to_owned(),
        });
        Ok(())
    }

    pub fn debug_sent_transactions(&self) -> Result<Vec<Value>, PortError> {
        Ok(self.lock_state()?.sent.clone())
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value, PortError> {
        match &self.mode {
            ProviderMode::Disabled(reason) => Err(PortError::Policy(reason.clone())),
            ProviderMode::Deterministic => self.deterministic_request(method, &params),
            #[cfg(not(target_arch = "wasm32"))]
            ProviderMode::Proxy(proxy) => proxy_call(proxy, method, params).await,
            #[cfg(target_arch = "wasm32")]
            ProviderMode::Browser => wasm_request(method, params).await,
        }
    }

    fn deterministic_request(&self, method: &str, params: &Value) -> Result<Value, PortError> {
        let mut g = self.lock_state()?;
        match method {
            "eth_requestAccounts" => Ok(serde_json::json!(g
                .accounts
                .iter()
                .map(|a| a.to_string())
                .collect::<Vec<_>>())),
            "eth_chainId" => Ok(Value::String(format!("0x{:x}", g.chain_id))),
            "eth_sendTransaction" => {
                if let Some(err) = g.pending_rejection.take() {
                    return Err(err);
                }
                let tx = params.get(0).cloned().unwrap_or(Value::Null);
                let mut seed = serde_json::to_vec(&tx).map_err(|e| {
                    PortError::Validation(format!("tx payload serialization failed: {e}"))
                })?;
                seed.extend_from_slice(&(g.sent.len() as u64).to_be_bytes());
                g.sent.push(tx);
                Ok(Value::String(keccak256(seed).to_string()))
            }
            "eth_call" => {
                let to = param_address(params, "to")?;
                let output = g.call_results.get(&to).cloned().unwrap_or_default();
                Ok(Value::String(output.to_string()))
            }
            "eth_getCode" => {
                let raw = params.get(0).and_then(Value::as_str).ok_or_else(|| {
                    PortError::Validation("eth_getCode: address expected".to_owned())
                })?;
                let address: Address = raw
                    .parse()
                    .map_err(|e| PortError::Validation(format!("invalid address: {e}")))?;
                let code = g.code.get(&address).cloned().unwrap_or_default();
                Ok(Value::String(code.to_string()))
            }
            _ => Err(PortError::NotImplemented(
                "deterministic provider supports account, chain, send, call and code only",
            )),
        }
    }
}

#[async_trait(?Send)]
impl ProviderPort for Eip1193Adapter {
    async fn request_accounts(&self) -> Result<Vec<Address>, PortError> {
        let result = self
            .request("eth_requestAccounts", serde_json::json!([]))
            .await?;
        let arr = result.as_array().ok_or_else(|| {
            PortError::Transport("eth_requestAccounts: array expected".to_owned())
        })?;
        let mut accounts = Vec::with_capacity(arr.len());
        for item in arr {
            let raw = item.as_str().ok_or_else(|| {
                PortError::Transport("eth_requestAccounts: string expected".to_owned())
            })?;
            let parsed: Address = raw
                .parse()
                .map_err(|e| PortError::Validation(format!("invalid account address: {e}")))?;
            accounts.push(parsed);
        }
        Ok(accounts)
    }

    async fn chain_id(&self) -> Result<u64, PortError> {
        let result = self.request("eth_chainId", serde_json::json!([])).await?;
        json_chain_id_to_u64(&result)
    }

    async fn send_transaction(&self, tx: &TxRequest) -> Result<B256, PortError> {
        let result = self
            .request("eth_sendTransaction", serde_json::json!([tx.to_rpc_value()]))
            .await?;
        let hash = result.as_str().ok_or_else(|| {
            PortError::Transport("eth_sendTransaction must return hash".to_owned())
        })?;
        hash.parse()
            .map_err(|e| PortError::Validation(format!("invalid tx hash: {e}")))
    }

    async fn call(&self, tx: &TxRequest) -> Result<Bytes, PortError> {
        let result = self
            .request("eth_call", serde_json::json!([tx.to_rpc_value(), "latest"]))
            .await?;
        json_bytes(&result, "eth_call")
    }

    async fn get_code(&self, address: Address) -> Result<Bytes, PortError> {
        let result = self
            .request(
                "eth_getCode",
                serde_json::json!([address.to_string(), "latest"]),
            )
            .await?;
        json_bytes(&result, "eth_getCode")
    }
}

fn connector_kind(mode: &ProviderMode) -> Option<ConnectorKind> {
    match mode {
        ProviderMode::Disabled(_) => None,
        ProviderMode::Deterministic => Some(ConnectorKind::Deterministic),
        #[cfg(not(target_arch = "wasm32"))]
        ProviderMode::Proxy(_) => Some(ConnectorKind::Proxy),
        #[cfg(target_arch = "wasm32")]
        ProviderMode::Browser => Some(ConnectorKind::Injected),
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn proxy_call(proxy: &ProxyRuntime, method: &str, params: Value) -> Result<Value, PortError> {
    let payload = serde_json::json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": method,
        "params": params,
    });
    let response = proxy
        .client
        .post(&proxy.base_url)
        .json(&payload)
        .send()
        .await
        .map_err(|e| PortError::Transport(format!("eip1193 proxy request failed: {e}")))?;
    let status = response.status();
    let body: Value = response
        .json()
        .await
        .map_err(|e| PortError::Transport(format!("eip1193 proxy json decode failed: {e}")))?;
    if let Some(err) = body.get("error") {
        return Err(rpc_error(err));
    }
    if !status.is_success() {
        return Err(PortError::Transport(format!(
            "eip1193 proxy status {}: {}",
            status, body
        )));
    }
    body.get("result")
        .cloned()
        .ok_or_else(|| PortError::Transport("eip1193 proxy missing result".to_owned()))
}

/// JSON-RPC error object to a typed provider error; keeps the numeric code.
fn rpc_error(err: &Value) -> PortError {
    let message = err
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_else(|| err.to_string());
    match err.get("code").and_then(Value::as_i64) {
        Some(code) => PortError::Rpc { code, message },
        None => PortError::Transport(format!("eip1193 provider returned error: {message}")),
    }
}

fn param_address(params: &Value, field: &str) -> Result<Address, PortError> {
    params
        .get(0)
        .and_then(|tx| tx.get(field))
        .and_then(Value::as_str)
        .ok_or_else(|| PortError::Validation(format!("missing tx field: {field}")))?
        .parse()
        .map_err(|e| PortError::Validation(format!("invalid {field} address: {e}")))
}

fn json_bytes(value: &Value, method: &str) -> Result<Bytes, PortError> {
    let raw = value
        .as_str()
        .ok_or_else(|| PortError::Transport(format!("{method}: hex string expected")))?;
    raw.parse()
        .map_err(|e| PortError::Validation(format!("{method}: invalid hex: {e}")))
}

fn json_chain_id_to_u64(value: &Value) -> Result<u64, PortError> {
    if let Some(n) = value.as_u64() {
        return Ok(n);
    }
    let s = value
        .as_str()
        .ok_or_else(|| PortError::Validation("chain id must be string or number".to_owned()))?;
    parse_chain_id_str(s)
}

fn parse_chain_id_str(raw: &str) -> Result<u64, PortError> {
    if raw.starts_with("0x") || raw.starts_with("0X") {
        u64::from_str_radix(&raw[2..], 16)
            .map_err(|e| PortError::Validation(format!("invalid hex chain id: {e}")))
    } else {
        raw.parse()
            .map_err(|e| PortError::Validation(format!("invalid chain id: {e}")))
    }
}

#[cfg(target_arch = "wasm32")]
async fn wasm_request(method: &str, params: Value) -> Result<Value, PortError> {
    use wasm_bindgen::JsCast;

    let provider = browser_provider()?;
    let request_fn = get_prop(&provider, "request")
        .ok()
        .and_then(|v| v.dyn_into::<js_sys::Function>().ok())
        .ok_or(PortError::NotImplemented(
            "window.ethereum.request is unavailable",
        ))?;

    let request_js = encode_request(method, params)?;
    let promise_js = request_fn
        .call1(&provider, &request_js)
        .map_err(|e| PortError::Transport(format!("provider request dispatch failed: {e:?}")))?;
    let promise = promise_js
        .dyn_into::<js_sys::Promise>()
        .map_err(|_| PortError::Transport("provider request did not return Promise".to_owned()))?;
    let result_js = wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map_err(js_rpc_error)?;
    serde_wasm_bindgen::from_value(result_js)
        .map_err(|e| PortError::Transport(format!("failed to decode wasm response: {e}")))
}

/// Builds the `{ method, params }` argument as plain JS objects; providers read
/// `args.method`, which a JS `Map` does not expose.
#[cfg(target_arch = "wasm32")]
fn encode_request(method: &str, params: Value) -> Result<wasm_bindgen::JsValue, PortError> {
    use serde::Serialize;

    serde_json::json!({
        "method": method,
        "params": params,
    })
    .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
    .map_err(|e| PortError::Transport(format!("failed to encode wasm request: {e}")))
}

#[cfg(target_arch = "wasm32")]
fn js_rpc_error(err: wasm_bindgen::JsValue) -> PortError {
    let code = get_prop(&err, "code").ok().and_then(|v| v.as_f64());
    let message = get_prop(&err, "message")
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_else(|| format!("{err:?}"));
    match code {
        Some(code) => PortError::Rpc {
            code: code as i64,
            message,
        },
        None => PortError::Transport(format!("provider request rejected: {message}")),
    }
}

#[cfg(target_arch = "wasm32")]
fn browser_provider_available() -> bool {
    browser_provider().is_ok()
}

#[cfg(target_arch = "wasm32")]
fn browser_provider() -> Result<wasm_bindgen::JsValue, PortError> {
    let window =
        web_sys::window().ok_or_else(|| PortError::Transport("missing window".to_owned()))?;
    let provider = get_prop(&window.into(), "ethereum")?;
    if provider.is_null() || provider.is_undefined() {
        return Err(PortError::Precondition("window.ethereum missing".to_owned()));
    }
    Ok(provider)
}

#[cfg(target_arch = "wasm32")]
fn get_prop(target: &wasm_bindgen::JsValue, key: &str) -> Result<wasm_bindgen::JsValue, PortError> {
    js_sys::Reflect::get(target, &wasm_bindgen::JsValue::from_str(key))
        .map_err(|e| PortError::Transport(format!("read provider property {key} failed: {e:?}")))
}
