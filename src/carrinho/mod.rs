// src/carrinho/mod.rs

pub mod carrinho_router;
pub mod carrinho_structs;
