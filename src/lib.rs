//! Scan a directory tree for images and videos and browse them over HTTP.

pub mod cli;
pub mod config;
pub mod http;
pub mod media;
