pub mod state;
pub mod theme;
pub mod format;
pub mod panels;
