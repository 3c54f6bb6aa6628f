pub mod columns;
pub mod table;
pub mod tui;
