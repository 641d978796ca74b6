#![allow(dead_code)]

pub mod shared_buffer;
