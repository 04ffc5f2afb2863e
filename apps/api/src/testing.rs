//! In-memory fakes for the completion and catalog capabilities, shared by unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::catalog::{AssessmentDetails, CatalogError, CatalogSource};
use crate::llm_client::{LlmError, TextCompletion};

/// Replies with queued answers in order; the last one repeats. Records every prompt.
pub struct CannedCompletion {
    answers: Mutex<Vec<String>>,
    prompts: Mutex<Vec<String>>,
}

impl CannedCompletion {
    pub fn new(answer: &str) -> Self {
        Self::sequence(&[answer])
    }

    pub fn sequence(answers: &[&str]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().rev().map(|a| a.to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextCompletion for CannedCompletion {
    async fn complete(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let mut answers = self.answers.lock().unwrap();
        let answer = if answers.len() > 1 {
            answers.pop().unwrap_or_default()
        } else {
            answers.last().cloned().unwrap_or_default()
        };
        Ok(answer)
    }
}

pub struct FailingCompletion;

#[async_trait]
impl TextCompletion for FailingCompletion {
    async fn complete(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
        Err(LlmError::Api {
            status: 500,
            message: "upstream unavailable".to_string(),
        })
    }
}

pub fn sample_assessment(slug: &str) -> AssessmentDetails {
    AssessmentDetails {
        url: format!("https://catalog.example.com/view/{slug}/"),
        description: Some(format!("{slug} knowledge test")),
        remote_testing: "Yes".to_string(),
        ..Default::default()
    }
}

/// Serves search results and detail pages from maps. Unknown URLs fail.
#[derive(Default)]
pub struct FakeCatalog {
    pub listings: HashMap<String, Vec<String>>,
    pub details: HashMap<String, AssessmentDetails>,
    searched: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn with_listing(mut self, search_url: &str, slugs: &[&str]) -> Self {
        let urls = slugs
            .iter()
            .map(|slug| {
                let assessment = sample_assessment(slug);
                let url = assessment.url.clone();
                self.details.insert(url.clone(), assessment);
                url
            })
            .collect();
        self.listings.insert(search_url.to_string(), urls);
        self
    }

    pub fn searched(&self) -> Vec<String> {
        self.searched.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    async fn search(&self, url: &str) -> Result<Vec<String>, CatalogError> {
        self.searched.lock().unwrap().push(url.to_string());
        self.listings.get(url).cloned().ok_or(CatalogError::Status {
            status: 404,
            url: url.to_string(),
        })
    }

    async fn details(&self, url: &str) -> Result<AssessmentDetails, CatalogError> {
        self.details.get(url).cloned().ok_or(CatalogError::Status {
            status: 404,
            url: url.to_string(),
        })
    }
}
