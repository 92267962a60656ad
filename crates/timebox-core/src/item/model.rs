//! Item shapes: leaf tasks and the two container variants.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of an item, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Basic,
    SubCalendar,
    CheckList,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::SubCalendar => "sub_calendar",
            Self::CheckList => "check_list",
        }
    }

    pub fn is_container(&self) -> bool {
        !matches!(self, Self::Basic)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Back-reference from an item to a container that holds it.
///
/// Carried for the external item table; nothing in the resolvers reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentRef {
    pub parent_id: String,
    pub relationship_id: String,
}

/// An atomic timed task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicItem {
    pub id: String,
    pub name: String,
    /// Wall-clock length in milliseconds.
    pub duration: u64,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub parents: Vec<ParentRef>,
}

/// Child reference inside a [`SubCalendarItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubCalendarChild {
    pub item_id: String,
    /// Offset from the container's own start, not absolute.
    pub start_offset_ms: i64,
    pub relationship_id: String,
}

/// A container whose children sit at offsets on a sub-timeline.
///
/// Storage order of `children` is not significant and offsets may overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubCalendarItem {
    pub id: String,
    pub name: String,
    pub duration: u64,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub parents: Vec<ParentRef>,
    #[serde(default)]
    pub children: Vec<SubCalendarChild>,
}

/// Child reference inside a [`CheckListItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckListChild {
    pub item_id: String,
    #[serde(default)]
    pub complete: bool,
    pub relationship_id: String,
}

/// An ordered list of steps advanced by completion flags, not by the clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckListItem {
    pub id: String,
    pub name: String,
    pub duration: u64,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub parents: Vec<ParentRef>,
    #[serde(default)]
    pub children: Vec<CheckListChild>,
}

/// Any item in the flat item table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Item {
    Basic(BasicItem),
    SubCalendar(SubCalendarItem),
    CheckList(CheckListItem),
}

impl Item {
    pub fn id(&self) -> &str {
        match self {
            Self::Basic(item) => &item.id,
            Self::SubCalendar(item) => &item.id,
            Self::CheckList(item) => &item.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Basic(item) => &item.name,
            Self::SubCalendar(item) => &item.name,
            Self::CheckList(item) => &item.name,
        }
    }

    /// Duration in milliseconds.
    pub fn duration(&self) -> u64 {
        match self {
            Self::Basic(item) => item.duration,
            Self::SubCalendar(item) => item.duration,
            Self::CheckList(item) => item.duration,
        }
    }

    pub fn priority(&self) -> i32 {
        match self {
            Self::Basic(item) => item.priority,
            Self::SubCalendar(item) => item.priority,
            Self::CheckList(item) => item.priority,
        }
    }

    pub fn parents(&self) -> &[ParentRef] {
        match self {
            Self::Basic(item) => &item.parents,
            Self::SubCalendar(item) => &item.parents,
            Self::CheckList(item) => &item.parents,
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Basic(_) => ItemKind::Basic,
            Self::SubCalendar(_) => ItemKind::SubCalendar,
            Self::CheckList(_) => ItemKind::CheckList,
        }
    }

    pub fn is_container(&self) -> bool {
        self.kind().is_container()
    }

    /// Ids of direct children in storage order. Empty for leaves.
    pub fn child_ids(&self) -> Vec<&str> {
        match self {
            Self::Basic(_) => Vec::new(),
            Self::SubCalendar(item) => item.children.iter().map(|c| c.item_id.as_str()).collect(),
            Self::CheckList(item) => item.children.iter().map(|c| c.item_id.as_str()).collect(),
        }
    }
}

impl From<BasicItem> for Item {
    fn from(item: BasicItem) -> Self {
        Self::Basic(item)
    }
}

impl From<SubCalendarItem> for Item {
    fn from(item: SubCalendarItem) -> Self {
        Self::SubCalendar(item)
    }
}

impl From<CheckListItem> for Item {
    fn from(item: CheckListItem) -> Self {
        Self::CheckList(item)
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl BasicItem {
    /// Create a leaf with a generated id.
    pub fn new(name: impl Into<String>, duration: u64) -> Self {
        Self::with_id(new_id(), name, duration)
    }

    pub fn with_id(id: impl Into<String>, name: impl Into<String>, duration: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration,
            priority: 0,
            parents: Vec::new(),
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl SubCalendarItem {
    /// Create an empty timed container with a generated id.
    pub fn new(name: impl Into<String>, duration: u64) -> Self {
        Self::with_id(new_id(), name, duration)
    }

    pub fn with_id(id: impl Into<String>, name: impl Into<String>, duration: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration,
            priority: 0,
            parents: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Append a child reference at `start_offset_ms`.
    pub fn with_child(mut self, item_id: impl Into<String>, start_offset_ms: i64) -> Self {
        self.children.push(SubCalendarChild {
            item_id: item_id.into(),
            start_offset_ms,
            relationship_id: new_id(),
        });
        self
    }
}

impl CheckListItem {
    /// Create an empty checklist with a generated id.
    pub fn new(name: impl Into<String>, duration: u64) -> Self {
        Self::with_id(new_id(), name, duration)
    }

    pub fn with_id(id: impl Into<String>, name: impl Into<String>, duration: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration,
            priority: 0,
            parents: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Append a step.
    pub fn with_child(mut self, item_id: impl Into<String>, complete: bool) -> Self {
        self.children.push(CheckListChild {
            item_id: item_id.into(),
            complete,
            relationship_id: new_id(),
        });
        self
    }
}
