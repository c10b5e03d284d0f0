// src/bebidas/bebida_structs.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Tipos de bebida do cardápio, armazenados como TEXT no banco.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TipoBebida {
    Cafe,
    Cha,
    Chocolate,
    Suco,
}

/// Estrutura que representa uma bebida do cardápio no banco de dados.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Bebida {
    pub id: i64,
    pub nome: String,
    pub preco_base: f64,
    pub tipo: TipoBebida,
    pub descricao: Option<String>,
    pub disponivel: bool,
    pub created_at: Option<NaiveDateTime>,
}

/// Estrutura para receber os dados de uma nova bebida na requisição POST.
#[derive(Deserialize)]
pub struct NovaBebida {
    pub nome: String,
    pub preco_base: f64,
    pub tipo: TipoBebida,
    pub descricao: Option<String>,
    #[serde(default = "padrao_disponivel")]
    pub disponivel: bool,
}

fn padrao_disponivel() -> bool {
    true
}

/// Filtros opcionais da listagem do cardápio (query string).
#[derive(Deserialize)]
pub struct FiltroBebidas {
    pub tipo: Option<TipoBebida>,
    pub disponivel: Option<bool>,
}

/// Estrutura para atualização de uma bebida existente.
#[derive(Deserialize)]
pub struct AtualizaBebida {
    pub nome: String,
    pub preco_base: f64,
    pub tipo: TipoBebida,
    pub descricao: Option<String>,
    pub disponivel: bool,
}
