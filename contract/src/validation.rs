//! Invocation argument validation.
//!
//! The host passes arguments as an ordered list of strings. These checks
//! run before the contract touches the world state, so a malformed
//! invocation never produces a partial write.

use crate::error::ContractError;

/// Check that `function` received exactly `expected` arguments.
pub fn expect_args<'a>(
    function: &'static str,
    args: &'a [String],
    expected: usize,
) -> Result<&'a [String], ContractError> {
    if args.len() != expected {
        return Err(ContractError::BadArguments {
            function,
            expected,
            got: args.len(),
        });
    }
    Ok(args)
}
