pub mod password;
pub mod progress;
