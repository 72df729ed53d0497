// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

/// The default endpoint of the contract compiler service.
pub const DEFAULT_COMPILER_URL: &str = "http://localhost:8080/api/contract/compile";

/// Directory deployment records are kept in unless told otherwise.
pub const DEFAULT_RECORDS_DIR: &str = "deployments";

/// Flare Coston2 testnet.
pub const DEFAULT_CHAIN_ID: u64 = 114;
