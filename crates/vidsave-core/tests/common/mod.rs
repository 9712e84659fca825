#![allow(dead_code)]

pub mod clip_server;
pub mod fake_converter;
