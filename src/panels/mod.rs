mod sidebar;
mod tools_panel;

pub use sidebar::sidebar_panel;
pub use tools_panel::{BoardAction, tools_panel};
