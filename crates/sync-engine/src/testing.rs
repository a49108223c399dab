//! In-memory API and console doubles for unit tests

use async_trait::async_trait;
use groupsync_core::{ApiError, Console, ConsoleError, Policy, PolicyApi, PolicyId};
use std::collections::VecDeque;
use std::sync::Mutex;

pub struct FakeApi {
    policies: Vec<Policy>,
    list_status: Option<u16>,
    create_status: Option<u16>,
    created: Mutex<Vec<Policy>>,
}

impl FakeApi {
    pub fn new(policies: Vec<Policy>) -> Self {
        Self {
            policies,
            list_status: None,
            create_status: None,
            created: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting_list(mut self, status: u16) -> Self {
        self.list_status = Some(status);
        self
    }

    pub fn rejecting_creates(mut self, status: u16) -> Self {
        self.create_status = Some(status);
        self
    }

    pub fn created(&self) -> Vec<Policy> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl PolicyApi for FakeApi {
    async fn fetch_policies(&self) -> Result<Vec<Policy>, ApiError> {
        match self.list_status {
            Some(status) => Err(ApiError::ListFailed { status }),
            None => Ok(self.policies.clone()),
        }
    }

    async fn fetch_policy(&self, policy_id: PolicyId) -> Result<Policy, ApiError> {
        self.policies
            .iter()
            .find(|p| p.id == Some(policy_id))
            .cloned()
            .ok_or(ApiError::FetchFailed {
                policy_id,
                status: 404,
            })
    }

    async fn create_policy(&self, policy: &Policy) -> Result<(), ApiError> {
        if let Some(status) = self.create_status {
            return Err(ApiError::CreateFailed { status });
        }
        self.created.lock().unwrap().push(policy.clone());
        Ok(())
    }
}

/// Console fed from a script of answers, recording everything printed
#[derive(Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    pub prompts: Vec<String>,
    pub output: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn printed(&self, needle: &str) -> bool {
        self.output.iter().any(|line| line.contains(needle))
    }
}

impl Console for ScriptedConsole {
    fn prompt(&mut self, prompt: &str) -> Result<String, ConsoleError> {
        self.prompts.push(prompt.to_string());
        self.answers.pop_front().ok_or_else(|| ConsoleError::Input {
            reason: format!("no scripted answer for '{prompt}'"),
        })
    }

    fn println(&mut self, line: &str) {
        self.output.push(line.to_string());
    }
}
