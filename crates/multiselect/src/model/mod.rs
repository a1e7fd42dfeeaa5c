//! Option and group entities, and the descriptors they can be built from.

mod data;
mod group;
mod option;

pub use data::{GroupData, OptionData, SelectData};
pub use group::MultiSelectGroup;
pub use option::MultiSelectOption;
