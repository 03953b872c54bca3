mod command_result;
pub mod helper;
pub mod images;
pub mod init;
pub mod locales;

pub use command_result::*;
