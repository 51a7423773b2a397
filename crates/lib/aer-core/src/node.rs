use std::fmt;
use std::fmt::Debug;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// A dense, 0-indexed node identifier. Per-node traces are stored in vectors addressed by
/// this id, so it doubles as an arena index.
#[derive(Deserialize, Serialize, Default, Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NodeId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.parse::<u32>()?;
        Ok(Self(id))
    }
}

impl From<u32> for NodeId {
    fn from(f: u32) -> Self {
        Self(f)
    }
}

impl NodeId {
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    pub fn as_u64(&self) -> u64 {
        self.0 as u64
    }

    pub fn as_index(&self) -> usize {
        self.0 as usize
    }
}

/// The energy source of a node. Solar nodes harvest on a diurnal cycle; battery nodes only
/// drain.
#[derive(Deserialize, Serialize, Debug, Hash, Copy, Default, Clone, PartialEq, Eq)]
pub enum NodeClass {
    Solar,
    #[default]
    Battery,
}

impl fmt::Display for NodeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeClass::Solar => write!(f, "Solar"),
            NodeClass::Battery => write!(f, "Battery"),
        }
    }
}

impl NodeClass {
    pub fn is_solar(&self) -> bool {
        matches!(self, NodeClass::Solar)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, TypedBuilder)]
pub struct Node {
    pub id: NodeId,
    pub class: NodeClass,
}
