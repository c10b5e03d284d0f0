// src/personalizacoes/personalizacao_structs.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Personalização cadastrada no catálogo: um acréscimo de preço e um
/// fragmento de descrição aplicados a uma bebida via Decorator.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Personalizacao {
    pub id: i64,
    pub nome: String,
    pub preco_adicional: f64,
    pub categoria: Option<String>, // "leite", "adocante", "extra", "tamanho"
    pub bebida_id: Option<i64>,
    pub disponivel: bool,
}

/// Estrutura para cadastro de uma nova personalização.
#[derive(Deserialize)]
pub struct NovaPersonalizacao {
    pub nome: String,
    #[serde(default)]
    pub preco_adicional: f64,
    pub categoria: Option<String>,
    pub bebida_id: Option<i64>,
}

/// Forma resumida usada nas respostas de carrinho e pedido.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PersonalizacaoResumo {
    pub id: i64,
    pub nome: String,
    pub preco_adicional: f64,
}
