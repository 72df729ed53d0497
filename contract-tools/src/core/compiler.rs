// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Client for the remote Solidity compiler.

use alloy::json_abi::JsonAbi;
use reqwest::{multipart, Url};
use serde::Deserialize;

use crate::core::artifact::{ArtifactError, CompiledArtifact};

/// Name the source is uploaded under.
pub const SOURCE_FILE_NAME: &str = "Contract.sol";

#[allow(async_fn_in_trait)]
pub trait Compiler {
    async fn compile(&self, source: &str) -> Result<CompiledArtifact, CompileError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("nothing to compile")]
    NothingToCompile,
    #[error("importing contracts is not supported")]
    ImportsUnsupported,
    #[error("compilation failed: {0}")]
    Compilation(String),
    #[error("unexpected compiler response ({status}): {body}")]
    UnexpectedResponse { status: u16, body: String },

    #[error("{0}")]
    Artifact(#[from] ArtifactError),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Removes markdown code fences that code generators wrap their output in.
pub fn strip_code_fences(source: &str) -> String {
    source
        .trim()
        .replace("```solidity", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Rejects sources the compiler service cannot handle.
pub fn check_source(source: &str) -> Result<(), CompileError> {
    if source.trim().is_empty() {
        return Err(CompileError::NothingToCompile);
    }
    let imports = source
        .lines()
        .map(str::trim_start)
        .any(|line| line.starts_with("import ") || line.starts_with("import\""));
    if imports {
        return Err(CompileError::ImportsUnsupported);
    }
    Ok(())
}

/// Compiler service reached over HTTP.
#[derive(Clone, Debug)]
pub struct RemoteCompiler {
    client: reqwest::Client,
    url: Url,
}

impl RemoteCompiler {
    pub fn new(url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl Compiler for RemoteCompiler {
    async fn compile(&self, source: &str) -> Result<CompiledArtifact, CompileError> {
        let source = strip_code_fences(source);
        check_source(&source)?;

        let part = multipart::Part::text(source)
            .file_name(SOURCE_FILE_NAME)
            .mime_str("text/plain")?;
        let form = multipart::Form::new().part("file", part);
        debug!(@grey, "compiling {SOURCE_FILE_NAME} at {}", self.url);
        let response = self
            .client
            .post(self.url.clone())
            .multipart(form)
            .send()
            .await?;

        // error bodies carry the compiler diagnostics, so parse regardless of status
        let status = response.status().as_u16();
        let body = response.text().await?;
        let parsed: CompileResponse = serde_json::from_str(&body)
            .map_err(|_| CompileError::UnexpectedResponse { status, body })?;
        parsed.into_artifact()
    }
}

#[derive(Debug, Deserialize)]
struct CompileResponse {
    status: Option<String>,
    abi: Option<JsonAbi>,
    bytecode: Option<String>,
    message: Option<String>,
    #[serde(default)]
    errors: Vec<CompilerMessage>,
}

#[derive(Debug, Deserialize)]
struct CompilerMessage {
    message: String,
}

impl CompileResponse {
    fn into_artifact(self) -> Result<CompiledArtifact, CompileError> {
        if let Some(first) = self.errors.into_iter().next() {
            return Err(CompileError::Compilation(first.message));
        }
        match (self.status.as_deref(), self.abi, self.bytecode) {
            (Some("success"), Some(abi), Some(bytecode)) => {
                Ok(CompiledArtifact::from_hex(abi, &bytecode)?)
            }
            (Some("success"), ..) => Err(CompileError::Compilation(
                "compiler response is missing abi or bytecode".to_string(),
            )),
            _ => Err(CompileError::Compilation(
                self.message
                    .unwrap_or_else(|| "compilation failed".to_string()),
            )),
        }
    }
}
