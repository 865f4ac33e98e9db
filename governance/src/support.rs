//! Vote direction.

use std::fmt;

use crate::GovernanceError;

/// Direction of a vote, decoded from the governor's raw `uint8` support
/// code (`GovernorCountingSimple` layout).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SupportCode {
    Against = 0,
    For = 1,
    Abstain = 2,
}

impl SupportCode {
    pub const ALL: [SupportCode; 3] = [Self::Against, Self::For, Self::Abstain];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Against => "against",
            Self::For => "for",
            Self::Abstain => "abstain",
        }
    }
}

impl TryFrom<u8> for SupportCode {
    type Error = GovernanceError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Self::Against),
            1 => Ok(Self::For),
            2 => Ok(Self::Abstain),
            other => Err(GovernanceError::UnknownSupport(other)),
        }
    }
}

impl fmt::Display for SupportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_the_three_known_codes() {
        for code in SupportCode::ALL {
            assert_eq!(SupportCode::try_from(code as u8).unwrap(), code);
        }
    }

    #[test]
    fn rejects_other_codes() {
        assert!(matches!(
            SupportCode::try_from(3),
            Err(GovernanceError::UnknownSupport(3))
        ));
        assert!(SupportCode::try_from(255).is_err());
    }
}
