pub mod components;
pub mod layout;
pub mod line_input;
pub mod plain;
pub mod text;
pub mod theme;
pub mod view;
