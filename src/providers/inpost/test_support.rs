//! Scripted transport for operation tests

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, StreamExt};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::config::InpostParameters;
use crate::providers::http_client::{ApiRequest, ApiResponse, BodyStream, Transport, TransportError};
use super::session::InpostSession;

/// Canned reply for one request
#[derive(Debug, Clone)]
pub enum Reply {
    Ok(&'static str),
    /// 200 with a body that is not UTF-8
    Binary(&'static [u8]),
    Status(u16, &'static str),
    Network(&'static str, i32),
    /// First chunk arrives, then the connection drops
    BrokenStream(&'static str),
}

#[derive(Default)]
pub struct FakeTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Arc<Self> {
        Arc::new(FakeTransport {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests().pop().expect("no request recorded")
    }

    fn next(&self, request: ApiRequest) -> Reply {
        self.requests.lock().unwrap().push(request);
        self.replies.lock().unwrap().pop_front().expect("no scripted reply left")
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        match self.next(request) {
            Reply::Ok(body) | Reply::BrokenStream(body) => Ok(ApiResponse {
                status: 200,
                body: Bytes::from_static(body.as_bytes()),
            }),
            Reply::Binary(body) => Ok(ApiResponse {
                status: 200,
                body: Bytes::from_static(body),
            }),
            Reply::Status(status, body) => Err(TransportError::Status {
                status,
                body: body.to_string(),
            }),
            Reply::Network(message, code) => Err(TransportError::Network {
                message: message.to_string(),
                code,
            }),
        }
    }

    async fn stream(&self, request: ApiRequest) -> Result<BodyStream, TransportError> {
        match self.next(request) {
            Reply::Ok(body) => Ok(chunked(body.as_bytes())),
            Reply::Binary(body) => Ok(chunked(body)),
            Reply::BrokenStream(first) => {
                let chunks = vec![
                    Ok(Bytes::from_static(first.as_bytes())),
                    Err(TransportError::Network {
                        message: "connection reset by peer".to_string(),
                        code: 104,
                    }),
                ];
                Ok(stream::iter(chunks).boxed())
            }
            Reply::Status(status, body) => Err(TransportError::Status {
                status,
                body: body.to_string(),
            }),
            Reply::Network(message, code) => Err(TransportError::Network {
                message: message.to_string(),
                code,
            }),
        }
    }
}

fn chunked(body: &'static [u8]) -> BodyStream {
    let chunks: Vec<Result<Bytes, TransportError>> = body
        .chunks(4)
        .map(|c| Ok(Bytes::copy_from_slice(c)))
        .collect();
    stream::iter(chunks).boxed()
}

pub fn parameters() -> InpostParameters {
    InpostParameters {
        organization_id: Some("1234".to_string()),
        label_type: "A6".to_string(),
        ..Default::default()
    }
}

pub fn session(transport: Arc<FakeTransport>) -> InpostSession {
    InpostSession::new(transport, parameters())
}
