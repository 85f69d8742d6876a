use core::fmt;

/// Location key a battle is bound to (a chat channel, in practice).
///
/// Sessions under different keys never interact.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SessionKey(String);

impl SessionKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SessionKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Chat-platform user id of a controlled combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the two sides of a battle.
///
/// In an encounter the challenger is always the controlled player and the
/// opponent the autonomous entity. Resolution always evaluates the
/// challenger's attack before the opponent's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SideId {
    Challenger,
    Opponent,
}

impl SideId {
    pub const BOTH: [SideId; 2] = [SideId::Challenger, SideId::Opponent];

    pub const fn index(self) -> usize {
        match self {
            SideId::Challenger => 0,
            SideId::Opponent => 1,
        }
    }

    pub const fn opponent(self) -> SideId {
        match self {
            SideId::Challenger => SideId::Opponent,
            SideId::Opponent => SideId::Challenger,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            SideId::Challenger => "challenger",
            SideId::Opponent => "opponent",
        }
    }
}
