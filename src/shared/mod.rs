// src/shared/mod.rs

pub mod erros;
pub mod shared_structs;
