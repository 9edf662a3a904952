//! Durable storage adapters for the
//! [`KeyValueStorage`](askline_application::KeyValueStorage) port.

mod json_file;

pub use json_file::JsonFileStorage;
