//! External authenticity classifier.
//!
//! The model runs out of process. [`ScriptClassifier`] launches it once per
//! article and reads a single JSON object from its standard output.

use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tokio::process::Command;
use tokio::sync::Semaphore;

use crate::domain::prediction::Prediction;
use crate::models::config::ClassifierConfig;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("classifier unavailable: {0}")]
    Unavailable(String),

    #[error("classifier timed out after {0:?}")]
    Timeout(Duration),
}

/// Produces real/fake probabilities for an article URL.
#[async_trait]
pub trait ArticleClassifier: Send + Sync {
    async fn classify(&self, url: &str) -> Result<Prediction, ClassifierError>;
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScriptOutput {
    Prediction(Prediction),
    Error { error: String },
}

/// Runs `program [args..] <url>` and parses its output.
///
/// A [`Semaphore`] limits how many processes run at the same time.
pub struct ScriptClassifier {
    program: String,
    args: Vec<String>,
    timeout: Duration,
    semaphore: Arc<Semaphore>,
}

impl ScriptClassifier {
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        }
    }

    async fn run(&self, url: &str) -> Result<std::process::Output, ClassifierError> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = command.spawn().map_err(|e| {
            ClassifierError::Unavailable(format!("failed to start {}: {e}", self.program))
        })?;

        match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) => Err(ClassifierError::Unavailable(format!(
                "failed to wait for {}: {e}",
                self.program
            ))),
            Err(_) => Err(ClassifierError::Timeout(self.timeout)),
        }
    }
}

#[async_trait]
impl ArticleClassifier for ScriptClassifier {
    async fn classify(&self, url: &str) -> Result<Prediction, ClassifierError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|e| ClassifierError::Unavailable(e.to_string()))?;

        log::info!("Classifying {url}");
        let output = self.run(url).await?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            log::warn!("Classifier stderr for {url}: {}", stderr.trim());
        }

        if !output.status.success() {
            return Err(ClassifierError::Unavailable(format!(
                "classifier exited with {}",
                output.status
            )));
        }

        parse_output(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Takes the last line of `stdout` that parses as a result object; earlier
/// lines are treated as diagnostics.
fn parse_output(stdout: &str) -> Result<Prediction, ClassifierError> {
    let parsed = stdout
        .lines()
        .rev()
        .find_map(|line| serde_json::from_str::<ScriptOutput>(line.trim()).ok());

    match parsed {
        Some(ScriptOutput::Prediction(prediction)) => Ok(prediction),
        Some(ScriptOutput::Error { error }) => Err(ClassifierError::Unavailable(error)),
        None => Err(ClassifierError::Unavailable(
            "classifier produced no result".to_string(),
        )),
    }
}
