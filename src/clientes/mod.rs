// src/clientes/mod.rs

pub mod auth_middleware;
pub mod cliente_router;
pub mod cliente_structs;
