// src/carrinho/carrinho_structs.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::bebidas::bebida_structs::TipoBebida;
use crate::personalizacoes::personalizacao_structs::PersonalizacaoResumo;

/// Estrutura para adicionar um item ao carrinho.
#[derive(Deserialize)]
pub struct NovoItemCarrinho {
    pub bebida_id: i64,
    #[serde(default = "quantidade_padrao")]
    pub quantidade: i64,
    #[serde(default)]
    pub personalizacoes: Vec<i64>,
    pub observacoes: Option<String>,
}

fn quantidade_padrao() -> i64 {
    1
}

/// Estrutura para atualizar quantidade e personalizações de um item.
#[derive(Deserialize)]
pub struct AtualizaItemCarrinho {
    pub quantidade: i64,
    #[serde(default)]
    pub personalizacoes: Vec<i64>,
}

/// Linha do carrinho junto com os dados da bebida (JOIN com `bebidas`).
#[derive(Debug, Clone, FromRow)]
pub struct ItemCarrinhoDetalhe {
    pub id: i64,
    pub bebida_id: i64,
    pub bebida_nome: String,
    pub bebida_descricao: Option<String>,
    pub bebida_tipo: TipoBebida,
    pub preco_base: f64,
    pub quantidade: i64,
    pub preco_unitario: f64,
    pub observacoes: Option<String>,
}

/// Item do carrinho na resposta da API, com a descrição composta pelo
/// Decorator e o subtotal calculado.
#[derive(Serialize)]
pub struct ItemCarrinhoResponse {
    pub id: i64,
    pub bebida_id: i64,
    pub bebida_nome: String,
    pub descricao: String,
    pub quantidade: i64,
    pub preco_unitario: f64,
    pub subtotal: f64,
    pub personalizacoes: Vec<PersonalizacaoResumo>,
    pub observacoes: Option<String>,
}

/// Carrinho completo do cliente.
#[derive(Serialize)]
pub struct CarrinhoResponse {
    pub itens: Vec<ItemCarrinhoResponse>,
    pub total_itens: i64,
    pub total_valor: f64,
}
