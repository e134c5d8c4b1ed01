pub mod config_io;
pub mod data_file;
