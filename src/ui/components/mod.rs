pub mod progress_bar;
pub mod screen_panel;
