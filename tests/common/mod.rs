#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use ecoleta::app::ports::{
    HttpClientPort, HttpGetResult, LinkOpener, LocationPort, MailDraft, PermissionStatus,
};
use ecoleta::config::{ApiConfig, Config, LocationConfig, RegionsConfig};
use ecoleta::context::AppContext;
use ecoleta::notice::{NoticeReceiver, UserNotice};
use ecoleta::types::Coordinates;

pub const API: &str = "http://api.test";
pub const REGIONS: &str = "http://regions.test";

pub fn url(base: &str, path: &str) -> String {
    format!("{}/{}", base, path)
}

#[derive(Clone, Debug)]
pub enum Reply {
    Json(Value),
    Status(u16),
    Fail(String),
    /// Waits for the gate to be notified before answering
    Gated(Arc<Notify>, Box<Reply>),
}

impl Reply {
    pub fn gated(gate: &Arc<Notify>, reply: Reply) -> Self {
        Reply::Gated(Arc::clone(gate), Box::new(reply))
    }
}

pub type Call = (String, Vec<(String, String)>);

/// Canned responses keyed by full URL. Replies are consumed in order; the last one repeats.
#[derive(Default)]
pub struct FakeHttp {
    routes: Mutex<HashMap<String, VecDeque<Reply>>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeHttp {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn on(&self, url: impl Into<String>, reply: Reply) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .entry(url.into())
            .or_default()
            .push_back(reply);
        self
    }

    pub fn calls_to(&self, url: &str) -> Vec<Vec<(String, String)>> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(u, _)| u == url)
            .map(|(_, q)| q.clone())
            .collect()
    }

    fn next_reply(&self, url: &str) -> Option<Reply> {
        let mut routes = self.routes.lock().unwrap();
        let queue = routes.get_mut(url)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

async fn answer(reply: Reply) -> Result<HttpGetResult, String> {
    let mut reply = reply;
    loop {
        match reply {
            Reply::Gated(gate, inner) => {
                gate.notified().await;
                reply = *inner;
            }
            Reply::Json(value) => {
                return Ok(HttpGetResult {
                    status: 200,
                    bytes: serde_json::to_vec(&value).unwrap(),
                    content_type: "application/json".to_string(),
                })
            }
            Reply::Status(status) => {
                return Ok(HttpGetResult {
                    status,
                    bytes: Vec::new(),
                    content_type: "text/plain".to_string(),
                })
            }
            Reply::Fail(reason) => return Err(reason),
        }
    }
}

#[async_trait]
impl HttpClientPort for FakeHttp {
    async fn get(&self, url: &str, query: &[(String, String)]) -> Result<HttpGetResult, String> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), query.to_vec()));
        let reply = self
            .next_reply(url)
            .unwrap_or_else(|| Reply::Status(404));
        answer(reply).await
    }
}

pub struct FakeLocation {
    permission: PermissionStatus,
    positions: Mutex<VecDeque<Coordinates>>,
    gate: Option<Arc<Notify>>,
    reads: AtomicUsize,
}

impl FakeLocation {
    pub fn granted(positions: Vec<Coordinates>) -> Arc<Self> {
        Arc::new(Self {
            permission: PermissionStatus::Granted,
            positions: Mutex::new(positions.into()),
            gate: None,
            reads: AtomicUsize::new(0),
        })
    }

    pub fn denied() -> Arc<Self> {
        Arc::new(Self {
            permission: PermissionStatus::Denied,
            positions: Mutex::new(VecDeque::new()),
            gate: None,
            reads: AtomicUsize::new(0),
        })
    }

    pub fn gated(gate: &Arc<Notify>, position: Coordinates) -> Arc<Self> {
        Arc::new(Self {
            permission: PermissionStatus::Granted,
            positions: Mutex::new(VecDeque::from(vec![position])),
            gate: Some(Arc::clone(gate)),
            reads: AtomicUsize::new(0),
        })
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocationPort for FakeLocation {
    async fn request_permission(&self) -> PermissionStatus {
        self.permission
    }

    async fn current_position(&self) -> Result<Coordinates, String> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.positions
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| "no fix".to_string())
    }
}

#[derive(Default)]
pub struct RecordingLinks {
    pub urls: Mutex<Vec<String>>,
    pub mails: Mutex<Vec<MailDraft>>,
}

impl RecordingLinks {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl LinkOpener for RecordingLinks {
    async fn open_url(&self, url: &str) -> Result<(), String> {
        self.urls.lock().unwrap().push(url.to_string());
        Ok(())
    }

    async fn compose_mail(&self, draft: &MailDraft) -> Result<(), String> {
        self.mails.lock().unwrap().push(draft.clone());
        Ok(())
    }
}

pub fn here() -> Coordinates {
    Coordinates {
        latitude: -23.5505,
        longitude: -46.6333,
    }
}

pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            base_url: API.to_string(),
            request_timeout_secs: 5,
        },
        regions: RegionsConfig {
            base_url: REGIONS.to_string(),
        },
        location: LocationConfig {
            position_timeout_secs: 5,
            ..LocationConfig::default()
        },
    }
}

pub fn context(
    http: &Arc<FakeHttp>,
    location: &Arc<FakeLocation>,
    links: &Arc<RecordingLinks>,
) -> (AppContext, NoticeReceiver) {
    AppContext::new(
        &test_config(),
        Arc::clone(http) as Arc<dyn HttpClientPort>,
        Arc::clone(location) as Arc<dyn LocationPort>,
        Arc::clone(links) as Arc<dyn LinkOpener>,
    )
}

pub fn drain(notices: &mut NoticeReceiver) -> Vec<UserNotice> {
    let mut out = Vec::new();
    while let Ok(notice) = notices.try_recv() {
        out.push(notice);
    }
    out
}
