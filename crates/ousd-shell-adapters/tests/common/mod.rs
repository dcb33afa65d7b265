#![allow(dead_code)]

use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread;

use alloy::primitives::Address;
use serde_json::Value;
use tiny_http::{Response, Server};

use ousd_shell_adapters::{Eip1193Adapter, ShellConfig, ShellStores, TransactionLogAdapter};

pub struct Harness {
    pub provider: Eip1193Adapter,
    pub stores: ShellStores,
    pub tx_log: TransactionLogAdapter,
}

pub fn deterministic_harness() -> Harness {
    let config = ShellConfig::default();
    Harness {
        provider: Eip1193Adapter::with_config(config.clone()),
        stores: ShellStores::from_config(&config),
        tx_log: TransactionLogAdapter::default(),
    }
}

pub fn owner_address() -> Address {
    "0x1000000000000000000000000000000000000001"
        .parse()
        .expect("valid owner address")
}

/// JSON-RPC server answering each call with `respond(method, params)`.
pub fn spawn_rpc_server<F>(
    calls: Arc<Mutex<Vec<String>>>,
    respond: F,
) -> (String, thread::JoinHandle<()>)
where
    F: Fn(&str, &Value) -> Value + Send + 'static,
{
    let server = Server::http("127.0.0.1:0").expect("start server");
    let addr = format!("http://{}", server.server_addr());

    let join = thread::spawn(move || {
        for _ in 0..8 {
            let mut req = match server.recv() {
                Ok(r) => r,
                Err(_) => break,
            };
            let mut body = String::new();
            let _ = req.as_reader().read_to_string(&mut body);
            let payload: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
            let method = payload["method"].as_str().unwrap_or_default().to_owned();
            if let Ok(mut g) = calls.lock() {
                g.push(method.clone());
            }
            let mut reply = respond(&method, &payload["params"]);
            reply["jsonrpc"] = Value::from("2.0");
            reply["id"] = payload["id"].clone();
            let response = Response::from_string(reply.to_string()).with_header(
                "Content-Type: application/json"
                    .parse::<tiny_http::Header>()
                    .expect("header"),
            );
            let _ = req.respond(response);
        }
    });

    (addr, join)
}

pub fn proxy_config(url: String) -> ShellConfig {
    ShellConfig {
        eip1193_proxy_url: Some(url),
        request_timeout_ms: 5_000,
        ..ShellConfig::default()
    }
}
