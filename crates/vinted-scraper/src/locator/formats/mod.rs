//! Page-generation specific fragment scanners.

mod flight;
mod react_component;

pub(super) use flight::{find_item_in_push, push_fragments};
pub(super) use react_component::{component_fragments, parse_component};
