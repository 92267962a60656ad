//! Item model: leaf tasks, timed containers and checklists, plus the flat
//! table they live in.

mod model;
mod table;

pub use model::{
    BasicItem, CheckListChild, CheckListItem, Item, ItemKind, ParentRef, SubCalendarChild,
    SubCalendarItem,
};
pub use table::ItemTable;
