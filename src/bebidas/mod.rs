// src/bebidas/mod.rs

pub mod bebida_router;
pub mod bebida_structs;
