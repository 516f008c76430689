use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a simulated unit, unique within one match.
///
/// Units are named `u0, u1, …` in spawn order by the authoritative game, so
/// the same command log produces the same ids on every node.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(pub String);

/// Identifier of a player account, unique process-wide.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

/// Identifier of a building, unique within one match.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildingId(pub String);

/// Identifier of a capture zone, unique within one map.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(pub String);

/// Short join code identifying one session, unique process-wide.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionCode(pub String);

macro_rules! string_id_impls {
    ($($name:ident),+) => {
        $(
            impl $name {
                pub fn new(raw: impl Into<String>) -> Self {
                    Self(raw.into())
                }

                pub fn as_str(&self) -> &str {
                    &self.0
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl From<&str> for $name {
                fn from(raw: &str) -> Self {
                    Self(raw.to_owned())
                }
            }
        )+
    };
}

string_id_impls!(UnitId, PlayerId, BuildingId, ZoneId, SessionCode);
