use std::fmt;

use serde::Serialize;

/// Contracts whose deployment addresses are tracked. Anything else found in a
/// broadcast log is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DesiredContract {
    Witness,
}

impl DesiredContract {
    pub const ALL: [DesiredContract; 1] = [DesiredContract::Witness];

    pub const fn name(self) -> &'static str {
        match self {
            DesiredContract::Witness => "Witness",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|contract| contract.name() == name)
    }
}

impl fmt::Display for DesiredContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
