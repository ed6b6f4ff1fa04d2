use std::str::FromStr;

use derive_more::Display;

use crate::tree::{InvalidArgumentSnafu, TreeError};

/// What to do with a folder met during a traversal.
///
/// "Later" folders are entered once every sibling of their level has been
/// handled, in sibling order. Halting stops the whole traversal, including
/// pending siblings and ancestors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum RecursionDecision {
    /// Emit the folder, then recurse into it immediately.
    #[display("yield-then-enter-now")]
    YieldThenEnterNow,
    /// Recurse into the folder immediately, then emit it (post-order).
    #[display("enter-now-then-yield")]
    EnterNowThenYield,
    /// Emit the folder now and recurse into it after its siblings.
    #[display("yield-then-enter-later")]
    YieldThenEnterLater,
    /// Emit the folder, never recurse into it.
    #[display("yield")]
    Yield,
    /// Recurse into the folder immediately without emitting it.
    #[display("enter-now")]
    EnterNow,
    /// Recurse into the folder after its siblings, without emitting it.
    #[display("enter-later")]
    EnterLater,
    #[display("skip")]
    Skip,
    /// Emit the folder, then end the traversal.
    #[display("yield-then-halt")]
    YieldThenHalt,
    #[display("halt")]
    Halt,
}

impl RecursionDecision {
    pub const ALL: [RecursionDecision; 9] = [
        RecursionDecision::YieldThenEnterNow,
        RecursionDecision::EnterNowThenYield,
        RecursionDecision::YieldThenEnterLater,
        RecursionDecision::Yield,
        RecursionDecision::EnterNow,
        RecursionDecision::EnterLater,
        RecursionDecision::Skip,
        RecursionDecision::YieldThenHalt,
        RecursionDecision::Halt,
    ];
}

impl FromStr for RecursionDecision {
    type Err = TreeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|decision| decision.to_string() == value)
            .ok_or_else(|| {
                InvalidArgumentSnafu {
                    reason: format!("'{value}' is not a recursion decision"),
                }
                .build()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("yield-then-enter-now", RecursionDecision::YieldThenEnterNow)]
    #[case("enter-now-then-yield", RecursionDecision::EnterNowThenYield)]
    #[case("yield-then-enter-later", RecursionDecision::YieldThenEnterLater)]
    #[case("yield", RecursionDecision::Yield)]
    #[case("enter-now", RecursionDecision::EnterNow)]
    #[case("enter-later", RecursionDecision::EnterLater)]
    #[case("skip", RecursionDecision::Skip)]
    #[case("yield-then-halt", RecursionDecision::YieldThenHalt)]
    #[case("halt", RecursionDecision::Halt)]
    fn parses_every_decision(#[case] name: &str, #[case] expected: RecursionDecision) {
        assert_eq!(name.parse::<RecursionDecision>().unwrap(), expected);
        assert_eq!(expected.to_string(), name);
    }

    #[rstest]
    #[case("")]
    #[case("YIELD")]
    #[case("enter-immediately")]
    #[case("break")]
    fn rejects_unknown_decisions(#[case] name: &str) {
        assert!(matches!(
            name.parse::<RecursionDecision>(),
            Err(TreeError::InvalidArgumentError { .. })
        ));
    }
}
