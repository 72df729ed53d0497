// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Compiling Solidity sources through a [`Compiler`].

use std::{fs, path::Path};

use crate::{
    core::{
        artifact::CompiledArtifact,
        compiler::{check_source, strip_code_fences, CompileError, Compiler},
        deployment::DeploymentError,
    },
    error::Result,
};

/// Reads a contract source, dropping any markdown code fences around it.
pub fn read_source(path: impl AsRef<Path>) -> Result<String> {
    let contents = fs::read_to_string(path)?;
    Ok(strip_code_fences(&contents))
}

/// Compiles `source`, failing early on sources the compiler cannot take.
pub async fn compile(compiler: &impl Compiler, source: &str) -> Result<CompiledArtifact> {
    Ok(compile_source(compiler, source).await?)
}

/// Like [`compile`], for a source about to be deployed.
///
/// Failures surface as [`DeploymentError::CompilationError`].
pub async fn compile_for_deployment(
    compiler: &impl Compiler,
    source: &str,
) -> Result<CompiledArtifact, DeploymentError> {
    Ok(compile_source(compiler, source).await?)
}

async fn compile_source(
    compiler: &impl Compiler,
    source: &str,
) -> Result<CompiledArtifact, CompileError> {
    check_source(source)?;
    let artifact = compiler.compile(source).await?;
    info!(@grey, "compiled contract ({} bytes)", artifact.bytecode.len());
    Ok(artifact)
}
