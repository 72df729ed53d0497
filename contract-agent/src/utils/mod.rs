// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{
    fmt::Display,
    io::{self, BufRead, Write},
};

use alloy::json_abi::Param;
use anstyle::{AnsiColor, Effects, Style};
use contract_tools::{core::chain::AddChainParams, utils::color::Color};

const BOLD: Style = Style::new().effects(Effects::BOLD);
const ERROR: Style = AnsiColor::Red.on_default().effects(Effects::BOLD);

pub fn print_error(err: impl Display) {
    eprintln!("{ERROR}error{ERROR:#}{BOLD}:{BOLD:#} {err}");
}

/// Reads one trimmed line from stdin, or `None` at end of input.
fn read_line(prompt: &str) -> io::Result<Option<String>> {
    eprint!("{prompt}");
    io::stderr().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Asks for a value per constructor input. `None` means the user gave up.
pub fn prompt_arguments(inputs: &[Param]) -> io::Result<Option<Vec<String>>> {
    eprintln!("{}", "constructor arguments required (empty line cancels)".yellow());
    let mut values = Vec::with_capacity(inputs.len());
    for (index, input) in inputs.iter().enumerate() {
        let name = match input.name.as_str() {
            "" => format!("arg{index}"),
            name => name.to_string(),
        };
        let prompt = format!("  {name} ({}): ", input.ty);
        match read_line(&prompt.grey())? {
            Some(value) if !value.is_empty() => values.push(value),
            _ => return Ok(None),
        }
    }
    Ok(Some(values))
}

/// Asks before letting the wallet learn a new network.
///
/// Runs inside the wallet's async `add_chain`, so the stdin read is moved off the runtime's
/// worker with [`tokio::task::block_in_place`]. Needs the multi-threaded runtime.
pub fn confirm_add_chain(params: &AddChainParams) -> bool {
    ask_add_chain(params, read_line)
}

fn ask_add_chain(
    params: &AddChainParams,
    read: impl FnOnce(&str) -> io::Result<Option<String>>,
) -> bool {
    let rpc = params.rpc_urls.first().map(String::as_str).unwrap_or_default();
    let prompt = format!(
        "add network {} ({}) at {rpc}? [y/N] ",
        params.chain_name, params.chain_id
    );
    let answer = tokio::task::block_in_place(|| read(&prompt.yellow()));
    matches!(
        answer,
        Ok(Some(answer)) if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
    )
}

#[cfg(test)]
mod tests {
    use contract_tools::ChainRegistry;

    use super::*;

    fn params() -> AddChainParams {
        ChainRegistry::with_defaults()
            .lookup(114)
            .unwrap()
            .add_chain_params()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn add_chain_prompt_runs_inside_the_runtime() {
        let yes = |prompt: &str| {
            assert!(prompt.contains("Flare Testnet Coston2 (0x72)"));
            Ok(Some("Yes".to_string()))
        };
        assert!(ask_add_chain(&params(), yes));
        assert!(!ask_add_chain(&params(), |_| Ok(Some("n".to_string()))));
        assert!(!ask_add_chain(&params(), |_| Ok(None)));
    }
}
