//! In-memory `RestClient` for connector and bot tests

use crate::core::errors::ExchangeError;
use crate::core::kernel::rest::RestClient;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

type Canned = Result<Value, (u16, String)>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Get {
        endpoint: String,
        query: Vec<(String, String)>,
    },
    SignedPost {
        endpoint: String,
        payload: Map<String, Value>,
    },
}

impl RecordedCall {
    pub fn endpoint(&self) -> &str {
        match self {
            Self::Get { endpoint, .. } | Self::SignedPost { endpoint, .. } => endpoint,
        }
    }
}

#[derive(Default)]
struct MockState {
    // the last queued response for an endpoint is repeated once the rest are consumed
    responses: HashMap<String, VecDeque<Canned>>,
    files: HashMap<String, Vec<u8>>,
    calls: Vec<RecordedCall>,
}

#[derive(Clone, Default)]
pub struct MockRest {
    state: Arc<Mutex<MockState>>,
}

impl MockRest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, endpoint: &str, value: Value) -> Self {
        self.push(endpoint, Ok(value));
        self
    }

    pub fn with_status(self, endpoint: &str, status: u16, body: &str) -> Self {
        self.push(endpoint, Err((status, body.to_string())));
        self
    }

    pub fn with_file(self, endpoint: &str, bytes: &[u8]) -> Self {
        self.state
            .lock()
            .unwrap()
            .files
            .insert(endpoint.to_string(), bytes.to_vec());
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn signed_payloads(&self, endpoint: &str) -> Vec<Map<String, Value>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RecordedCall::SignedPost {
                    endpoint: e,
                    payload,
                } if e == endpoint => Some(payload),
                _ => None,
            })
            .collect()
    }

    fn push(&self, endpoint: &str, canned: Canned) {
        self.state
            .lock()
            .unwrap()
            .responses
            .entry(endpoint.to_string())
            .or_default()
            .push_back(canned);
    }

    fn respond<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ExchangeError> {
        let canned = {
            let mut state = self.state.lock().unwrap();
            let queue = state.responses.get_mut(endpoint);
            match queue {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        match canned {
            Some(Ok(value)) => serde_json::from_value(value)
                .map_err(|e| ExchangeError::DecodeError(e.to_string())),
            Some(Err((status, body))) => Err(ExchangeError::HttpStatusError { status, body }),
            None => Err(ExchangeError::HttpStatusError {
                status: 404,
                body: format!("no canned response for {}", endpoint),
            }),
        }
    }
}

#[async_trait]
impl RestClient for MockRest {
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
    ) -> Result<T, ExchangeError> {
        self.state.lock().unwrap().calls.push(RecordedCall::Get {
            endpoint: endpoint.to_string(),
            query: query_params
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        });
        self.respond(endpoint)
    }

    async fn get_bytes(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
    ) -> Result<Vec<u8>, ExchangeError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RecordedCall::Get {
            endpoint: endpoint.to_string(),
            query: query_params
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        });
        state
            .files
            .get(endpoint)
            .cloned()
            .ok_or_else(|| ExchangeError::HttpStatusError {
                status: 404,
                body: format!("no canned file for {}", endpoint),
            })
    }

    async fn post_signed_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        payload: &Map<String, Value>,
    ) -> Result<T, ExchangeError> {
        self.state.lock().unwrap().calls.push(RecordedCall::SignedPost {
            endpoint: endpoint.to_string(),
            payload: payload.clone(),
        });
        self.respond(endpoint)
    }
}
