pub mod panel;
pub mod script;
pub mod sink;
pub mod workbench;
