// src/padroes/mod.rs
//
// Padrões de projeto que sustentam a lógica de negócio da cafeteria:
// Decorator (preço de bebidas), Factory Method (bebidas base), State
// (ciclo de vida do pedido), Observer (notificações), Strategy
// (descontos), Command (ações com desfazer) e Business Object
// (orquestração sobre os repositórios).

pub mod business_object;
pub mod command;
pub mod decorator;
pub mod factory;
pub mod observer;
pub mod state;
pub mod strategy;
