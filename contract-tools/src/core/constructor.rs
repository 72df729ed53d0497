// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Resolution and validation of constructor arguments against a contract ABI.

use alloy::{
    dyn_abi::{DynSolValue, JsonAbiExt, Specifier},
    json_abi::{Constructor, JsonAbi, Param},
};

/// Constructor arguments that passed validation, with their ABI encoding.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolvedArguments {
    values: Vec<DynSolValue>,
    encoded: Vec<u8>,
}

impl ResolvedArguments {
    pub fn values(&self) -> &[DynSolValue] {
        &self.values
    }

    /// ABI-encoded arguments, to be appended to the creation bytecode.
    pub fn encoded(&self) -> &[u8] {
        &self.encoded
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Outcome of inspecting an ABI for its constructor.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    /// No input needed, deployment can proceed with these arguments.
    Ready(ResolvedArguments),
    /// The constructor takes inputs which must be supplied by the caller.
    ArgumentsRequired(Vec<Param>),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("argument {index}: {reason}")]
pub struct ArgumentError {
    pub index: usize,
    pub reason: String,
}

/// Decides whether a deployment needs constructor input.
///
/// Contracts without a constructor, or with one taking no inputs, resolve immediately to an
/// empty argument set.
pub fn resolve(abi: &JsonAbi) -> Resolution {
    match &abi.constructor {
        Some(constructor) if !constructor.inputs.is_empty() => {
            Resolution::ArgumentsRequired(constructor.inputs.clone())
        }
        _ => Resolution::Ready(ResolvedArguments::default()),
    }
}

/// Validates caller-supplied arguments positionally against the constructor inputs.
///
/// Missing arguments are never defaulted.
pub fn validate(
    constructor: Option<&Constructor>,
    args: &[String],
) -> Result<ResolvedArguments, ArgumentError> {
    let inputs = constructor.map(|c| c.inputs.as_slice()).unwrap_or_default();
    if args.len() != inputs.len() {
        return Err(ArgumentError {
            index: args.len().min(inputs.len()),
            reason: format!(
                "mismatch number of constructor arguments (want {} ({}); got {})",
                signature(inputs),
                inputs.len(),
                args.len(),
            ),
        });
    }
    let Some(constructor) = constructor else {
        return Ok(ResolvedArguments::default());
    };

    let mut values = Vec::with_capacity(args.len());
    for (index, (arg, param)) in args.iter().zip(inputs).enumerate() {
        let ty = param.resolve().map_err(|err| ArgumentError {
            index,
            reason: format!("could not resolve constructor input {param}: {err}"),
        })?;
        let value = ty.coerce_str(arg.trim()).map_err(|err| ArgumentError {
            index,
            reason: format!("could not parse {arg:?} as {}: {err}", param.ty),
        })?;
        values.push(value);
    }

    let encoded = constructor
        .abi_encode_input_raw(&values)
        .map_err(|err| ArgumentError {
            index: 0,
            reason: format!("could not encode constructor arguments: {err}"),
        })?;
    Ok(ResolvedArguments { values, encoded })
}

fn signature(inputs: &[Param]) -> String {
    let types: Vec<&str> = inputs.iter().map(|p| p.ty.as_str()).collect();
    format!("({})", types.join(","))
}
