//! Mock submitters.
//!
//! `RecordingSubmitter` keeps every plan it is handed and answers with a
//! canned response or error, so action wiring can be checked without a
//! fullnode.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::Arc;

use vault_admin::{CallPlan, ResponseSink, TransactionSubmitter};

/// Canned reply for a successful execution.
pub fn success_response(digest: &str) -> Value {
    json!({
        "digest": digest,
        "effects": {"status": {"status": "success"}},
        "events": [],
        "objectChanges": [],
    })
}

enum Reply {
    Response(Value),
    Error(String),
}

pub struct RecordingSubmitter {
    plans: Mutex<Vec<CallPlan>>,
    replies: Mutex<VecDeque<Reply>>,
}

impl RecordingSubmitter {
    /// Answers every submission with a successful response.
    pub fn new() -> Self {
        Self {
            plans: Mutex::new(Vec::new()),
            replies: Mutex::new(VecDeque::new()),
        }
    }

    /// Queue a response for the next submission.
    pub fn respond_with(self, response: Value) -> Self {
        self.replies.lock().push_back(Reply::Response(response));
        self
    }

    /// Queue an error for the next submission.
    pub fn fail_with(self, message: &str) -> Self {
        self.replies.lock().push_back(Reply::Error(message.to_string()));
        self
    }

    pub fn plans(&self) -> Vec<CallPlan> {
        self.plans.lock().clone()
    }
}

#[async_trait]
impl TransactionSubmitter for RecordingSubmitter {
    async fn submit(&self, plan: &CallPlan) -> Result<Value> {
        let n = {
            let mut plans = self.plans.lock();
            plans.push(plan.clone());
            plans.len()
        };
        match self.replies.lock().pop_front() {
            Some(Reply::Response(v)) => Ok(v),
            Some(Reply::Error(msg)) => Err(anyhow!(msg).context("execute_transaction_block")),
            None => Ok(success_response(&format!("digest-{n}"))),
        }
    }
}

/// In-memory response sink whose contents stay readable after the context
/// takes ownership of a clone.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn sink(&self) -> ResponseSink {
        Box::new(self.clone())
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
