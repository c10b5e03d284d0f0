// src/personalizacoes/mod.rs

pub mod personalizacao_router;
pub mod personalizacao_structs;
