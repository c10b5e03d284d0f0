// src/dao/mod.rs
//
// Camada de acesso a dados (padrão Repository/DAO): criação do schema,
// seeds de primeiro boot e um repositório por tabela, todos sobre
// consultas sqlx explícitas.

pub mod db;
pub mod repositorios;
