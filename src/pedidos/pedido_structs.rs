// src/pedidos/pedido_structs.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::padroes::state::StatusPedido;
use crate::padroes::strategy::MetodoPagamento;
use crate::personalizacoes::personalizacao_structs::PersonalizacaoResumo;

/// Estrutura para criação de pedido. O desconto é aplicado
/// automaticamente conforme o método de pagamento.
#[derive(Deserialize)]
pub struct NovoPedido {
    pub metodo_pagamento: MetodoPagamento,
    #[serde(default)]
    pub observacoes: Option<String>,
}

/// Estrutura para alteração explícita de status (rota da cozinha).
#[derive(Deserialize)]
pub struct AlteraStatusPedido {
    pub novo_status: StatusPedido,
}

/// Pedido como consta no banco de dados.
#[derive(Debug, Clone, FromRow)]
pub struct Pedido {
    pub id: i64,
    pub cliente_id: i64,
    pub total: f64,
    pub desconto: f64,
    pub total_final: f64,
    pub status: StatusPedido,
    pub metodo_pagamento: MetodoPagamento,
    pub observacoes: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// Pedido com os dados do cliente (JOIN com `clientes`) e a contagem
/// de itens, pronto para serialização.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PedidoResponse {
    pub id: i64,
    pub cliente_id: i64,
    pub cliente_nome: String,
    pub status: StatusPedido,
    pub total: f64,
    pub desconto: f64,
    pub total_final: f64,
    pub metodo_pagamento: MetodoPagamento,
    pub data_pedido: Option<NaiveDateTime>,
    pub data_atualizacao: Option<NaiveDateTime>,
    pub observacoes: Option<String>,
    pub itens_count: i64,
}

/// Item de um pedido na resposta detalhada.
#[derive(Serialize)]
pub struct ItemPedidoResponse {
    pub id: i64,
    pub bebida_id: i64,
    pub bebida_nome: String,
    pub quantidade: i64,
    pub preco_unitario: f64,
    pub subtotal: f64,
    pub personalizacoes: Vec<PersonalizacaoResumo>,
    pub observacoes: Option<String>,
}

/// Linha de `itens_pedido` junto com o nome da bebida.
#[derive(Debug, Clone, FromRow)]
pub struct ItemPedidoDetalhe {
    pub id: i64,
    pub bebida_id: i64,
    pub bebida_nome: String,
    pub quantidade: i64,
    pub preco_unitario: f64,
    pub subtotal: f64,
    pub observacoes: Option<String>,
}

/// Entrada do histórico de status de um pedido.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct HistoricoPedido {
    pub id: i64,
    pub pedido_id: i64,
    pub status_anterior: Option<StatusPedido>,
    pub status_novo: StatusPedido,
    pub observacao: Option<String>,
    pub timestamp: Option<NaiveDateTime>,
}

/// Resposta detalhada: pedido + itens + histórico completo.
#[derive(Serialize)]
pub struct PedidoDetalheResponse {
    #[serde(flatten)]
    pub pedido: PedidoResponse,
    pub itens: Vec<ItemPedidoResponse>,
    pub historico: Vec<HistoricoPedido>,
}

/// Filtros de listagem de pedidos.
#[derive(Deserialize)]
pub struct FiltroPedidos {
    pub status: Option<StatusPedido>,
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "limite_padrao")]
    pub limit: i64,
}

fn limite_padrao() -> i64 {
    100
}

/// Contadores do painel administrativo.
#[derive(Serialize)]
pub struct Estatisticas {
    pub total_pedidos: i64,
    pub pedidos_hoje: i64,
    pub faturamento_total: f64,
    pub ticket_medio: f64,
    pub pedidos_recebidos: i64,
    pub pedidos_em_preparo: i64,
    pub bebidas_mais_vendidas: Vec<BebidaMaisVendida>,
}

/// Linha do ranking de bebidas mais vendidas do painel.
#[derive(Serialize, FromRow)]
pub struct BebidaMaisVendida {
    pub bebida_id: i64,
    pub nome_bebida: String,
    pub total_vendido: i64,
    pub receita_gerada: f64,
}

/// Resultado de uma transição de estado, devolvido pelas rotas de
/// avanço e cancelamento.
#[derive(Serialize)]
pub struct TransicaoResponse {
    pub pedido_id: i64,
    pub estado_anterior: StatusPedido,
    pub estado_novo: StatusPedido,
}
