// src/dao/repositorios.rs
//
// Repositórios (padrão Repository/DAO): um por tabela, cada um
// encapsulando as consultas sqlx da sua entidade. Os Business Objects
// compõem estes repositórios; as rotas nunca falam SQL diretamente.

use sqlx::{Pool, Sqlite};

use crate::bebidas::bebida_structs::{AtualizaBebida, Bebida, NovaBebida, TipoBebida};
use crate::carrinho::carrinho_structs::ItemCarrinhoDetalhe;
use crate::clientes::cliente_structs::{Cliente, TipoUsuario};
use crate::padroes::state::StatusPedido;
use crate::padroes::strategy::MetodoPagamento;
use crate::pedidos::pedido_structs::{
    BebidaMaisVendida, Estatisticas, HistoricoPedido, ItemPedidoDetalhe, Pedido, PedidoResponse,
};
use crate::personalizacoes::personalizacao_structs::{
    NovaPersonalizacao, Personalizacao, PersonalizacaoResumo,
};
use crate::shared::erros::ErroCafeteria;

// ---------------------------------------------------------------------------
// Clientes
// ---------------------------------------------------------------------------

pub struct ClienteRepositorio<'a> {
    pool: &'a Pool<Sqlite>,
}

impl<'a> ClienteRepositorio<'a> {
    pub fn new(pool: &'a Pool<Sqlite>) -> Self {
        ClienteRepositorio { pool }
    }

    pub async fn buscar_por_id(&self, id: i64) -> Result<Option<Cliente>, ErroCafeteria> {
        let cliente = sqlx::query_as::<_, Cliente>(
            "SELECT id, nome, email, senha_hash, tipo_usuario, pontos_fidelidade, created_at
             FROM clientes WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(cliente)
    }

    pub async fn buscar_por_email(&self, email: &str) -> Result<Option<Cliente>, ErroCafeteria> {
        let cliente = sqlx::query_as::<_, Cliente>(
            "SELECT id, nome, email, senha_hash, tipo_usuario, pontos_fidelidade, created_at
             FROM clientes WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;
        Ok(cliente)
    }

    pub async fn criar(
        &self,
        nome: &str,
        email: &str,
        senha_hash: &str,
        tipo_usuario: TipoUsuario,
    ) -> Result<i64, ErroCafeteria> {
        let resultado = sqlx::query(
            "INSERT INTO clientes (nome, email, senha_hash, tipo_usuario) VALUES (?, ?, ?, ?)",
        )
        .bind(nome)
        .bind(email)
        .bind(senha_hash)
        .bind(tipo_usuario)
        .execute(self.pool)
        .await?;
        Ok(resultado.last_insert_rowid())
    }

    /// Credita pontos de fidelidade ao cliente.
    pub async fn adicionar_pontos(&self, cliente_id: i64, pontos: i64) -> Result<(), ErroCafeteria> {
        sqlx::query("UPDATE clientes SET pontos_fidelidade = pontos_fidelidade + ? WHERE id = ?")
            .bind(pontos)
            .bind(cliente_id)
            .execute(self.pool)
            .await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Bebidas (cardápio)
// ---------------------------------------------------------------------------

pub struct BebidaRepositorio<'a> {
    pool: &'a Pool<Sqlite>,
}

impl<'a> BebidaRepositorio<'a> {
    pub fn new(pool: &'a Pool<Sqlite>) -> Self {
        BebidaRepositorio { pool }
    }

    /// Lista o cardápio com filtros opcionais de tipo e disponibilidade.
    pub async fn listar(
        &self,
        tipo: Option<TipoBebida>,
        disponivel: Option<bool>,
    ) -> Result<Vec<Bebida>, ErroCafeteria> {
        let bebidas = sqlx::query_as::<_, Bebida>(
            "SELECT id, nome, preco_base, tipo, descricao, disponivel, created_at
             FROM bebidas
             WHERE (? IS NULL OR tipo = ?) AND (? IS NULL OR disponivel = ?)
             ORDER BY id",
        )
        .bind(tipo)
        .bind(tipo)
        .bind(disponivel)
        .bind(disponivel)
        .fetch_all(self.pool)
        .await?;
        Ok(bebidas)
    }

    pub async fn buscar_por_id(&self, id: i64) -> Result<Option<Bebida>, ErroCafeteria> {
        let bebida = sqlx::query_as::<_, Bebida>(
            "SELECT id, nome, preco_base, tipo, descricao, disponivel, created_at
             FROM bebidas WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(bebida)
    }

    pub async fn criar(&self, nova: &NovaBebida) -> Result<i64, ErroCafeteria> {
        let resultado = sqlx::query(
            "INSERT INTO bebidas (nome, preco_base, tipo, descricao, disponivel)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&nova.nome)
        .bind(nova.preco_base)
        .bind(nova.tipo)
        .bind(&nova.descricao)
        .bind(nova.disponivel)
        .execute(self.pool)
        .await?;
        Ok(resultado.last_insert_rowid())
    }

    pub async fn atualizar(&self, id: i64, dados: &AtualizaBebida) -> Result<bool, ErroCafeteria> {
        let resultado = sqlx::query(
            "UPDATE bebidas SET nome = ?, preco_base = ?, tipo = ?, descricao = ?, disponivel = ?
             WHERE id = ?",
        )
        .bind(&dados.nome)
        .bind(dados.preco_base)
        .bind(dados.tipo)
        .bind(&dados.descricao)
        .bind(dados.disponivel)
        .bind(id)
        .execute(self.pool)
        .await?;
        Ok(resultado.rows_affected() > 0)
    }

    pub async fn excluir(&self, id: i64) -> Result<bool, ErroCafeteria> {
        let resultado = sqlx::query("DELETE FROM bebidas WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(resultado.rows_affected() > 0)
    }

    /// Bebidas com pedidos associados não podem ser removidas do cardápio.
    pub async fn tem_pedidos(&self, id: i64) -> Result<bool, ErroCafeteria> {
        let quantidade: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM itens_pedido WHERE bebida_id = ?")
                .bind(id)
                .fetch_one(self.pool)
                .await?;
        Ok(quantidade > 0)
    }
}

// ---------------------------------------------------------------------------
// Personalizações
// ---------------------------------------------------------------------------

pub struct PersonalizacaoRepositorio<'a> {
    pool: &'a Pool<Sqlite>,
}

impl<'a> PersonalizacaoRepositorio<'a> {
    pub fn new(pool: &'a Pool<Sqlite>) -> Self {
        PersonalizacaoRepositorio { pool }
    }

    pub async fn listar_disponiveis(&self) -> Result<Vec<Personalizacao>, ErroCafeteria> {
        let personalizacoes = sqlx::query_as::<_, Personalizacao>(
            "SELECT id, nome, preco_adicional, categoria, bebida_id, disponivel
             FROM personalizacoes WHERE disponivel = 1 ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(personalizacoes)
    }

    /// Personalizações válidas para uma bebida: as vinculadas a ela e as
    /// do catálogo geral (sem bebida associada).
    pub async fn listar_por_bebida(
        &self,
        bebida_id: i64,
    ) -> Result<Vec<Personalizacao>, ErroCafeteria> {
        let personalizacoes = sqlx::query_as::<_, Personalizacao>(
            "SELECT id, nome, preco_adicional, categoria, bebida_id, disponivel
             FROM personalizacoes
             WHERE disponivel = 1 AND (bebida_id = ? OR bebida_id IS NULL)
             ORDER BY id",
        )
        .bind(bebida_id)
        .fetch_all(self.pool)
        .await?;
        Ok(personalizacoes)
    }

    pub async fn buscar_por_id(&self, id: i64) -> Result<Option<Personalizacao>, ErroCafeteria> {
        let personalizacao = sqlx::query_as::<_, Personalizacao>(
            "SELECT id, nome, preco_adicional, categoria, bebida_id, disponivel
             FROM personalizacoes WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(personalizacao)
    }

    pub async fn criar(&self, nova: &NovaPersonalizacao) -> Result<i64, ErroCafeteria> {
        let resultado = sqlx::query(
            "INSERT INTO personalizacoes (nome, preco_adicional, categoria, bebida_id)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&nova.nome)
        .bind(nova.preco_adicional)
        .bind(&nova.categoria)
        .bind(nova.bebida_id)
        .execute(self.pool)
        .await?;
        Ok(resultado.last_insert_rowid())
    }
}

// ---------------------------------------------------------------------------
// Carrinho
// ---------------------------------------------------------------------------

pub struct CarrinhoRepositorio<'a> {
    pool: &'a Pool<Sqlite>,
}

impl<'a> CarrinhoRepositorio<'a> {
    pub fn new(pool: &'a Pool<Sqlite>) -> Self {
        CarrinhoRepositorio { pool }
    }

    pub async fn itens_do_cliente(
        &self,
        cliente_id: i64,
    ) -> Result<Vec<ItemCarrinhoDetalhe>, ErroCafeteria> {
        let itens = sqlx::query_as::<_, ItemCarrinhoDetalhe>(
            "SELECT ic.id, ic.bebida_id, b.nome AS bebida_nome, b.descricao AS bebida_descricao,
                    b.tipo AS bebida_tipo, b.preco_base, ic.quantidade, ic.preco_unitario,
                    ic.observacoes
             FROM itens_carrinho ic
             JOIN bebidas b ON b.id = ic.bebida_id
             WHERE ic.cliente_id = ?
             ORDER BY ic.id",
        )
        .bind(cliente_id)
        .fetch_all(self.pool)
        .await?;
        Ok(itens)
    }

    pub async fn personalizacoes_do_item(
        &self,
        item_id: i64,
    ) -> Result<Vec<Personalizacao>, ErroCafeteria> {
        let personalizacoes = sqlx::query_as::<_, Personalizacao>(
            "SELECT p.id, p.nome, p.preco_adicional, p.categoria, p.bebida_id, p.disponivel
             FROM itens_carrinho_personalizacoes icp
             JOIN personalizacoes p ON p.id = icp.personalizacao_id
             WHERE icp.item_carrinho_id = ?
             ORDER BY icp.id",
        )
        .bind(item_id)
        .fetch_all(self.pool)
        .await?;
        Ok(personalizacoes)
    }

    /// Dono de um item do carrinho, para validação de acesso.
    pub async fn dono_do_item(&self, item_id: i64) -> Result<Option<i64>, ErroCafeteria> {
        let dono: Option<(i64,)> =
            sqlx::query_as("SELECT cliente_id FROM itens_carrinho WHERE id = ?")
                .bind(item_id)
                .fetch_optional(self.pool)
                .await?;
        Ok(dono.map(|(cliente_id,)| cliente_id))
    }

    pub async fn inserir_item(
        &self,
        cliente_id: i64,
        bebida_id: i64,
        quantidade: i64,
        preco_unitario: f64,
        observacoes: Option<&str>,
    ) -> Result<i64, ErroCafeteria> {
        let resultado = sqlx::query(
            "INSERT INTO itens_carrinho (cliente_id, bebida_id, quantidade, preco_unitario, observacoes)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(cliente_id)
        .bind(bebida_id)
        .bind(quantidade)
        .bind(preco_unitario)
        .bind(observacoes)
        .execute(self.pool)
        .await?;
        Ok(resultado.last_insert_rowid())
    }

    pub async fn vincular_personalizacao(
        &self,
        item_id: i64,
        personalizacao_id: i64,
    ) -> Result<(), ErroCafeteria> {
        sqlx::query(
            "INSERT INTO itens_carrinho_personalizacoes (item_carrinho_id, personalizacao_id)
             VALUES (?, ?)",
        )
        .bind(item_id)
        .bind(personalizacao_id)
        .execute(self.pool)
        .await?;
        Ok(())
    }

    pub async fn atualizar_item(
        &self,
        item_id: i64,
        quantidade: i64,
        preco_unitario: f64,
    ) -> Result<(), ErroCafeteria> {
        sqlx::query("UPDATE itens_carrinho SET quantidade = ?, preco_unitario = ? WHERE id = ?")
            .bind(quantidade)
            .bind(preco_unitario)
            .bind(item_id)
            .execute(self.pool)
            .await?;
        Ok(())
    }

    pub async fn remover_personalizacoes_do_item(&self, item_id: i64) -> Result<(), ErroCafeteria> {
        sqlx::query("DELETE FROM itens_carrinho_personalizacoes WHERE item_carrinho_id = ?")
            .bind(item_id)
            .execute(self.pool)
            .await?;
        Ok(())
    }

    pub async fn remover_item(&self, item_id: i64) -> Result<(), ErroCafeteria> {
        self.remover_personalizacoes_do_item(item_id).await?;
        sqlx::query("DELETE FROM itens_carrinho WHERE id = ?")
            .bind(item_id)
            .execute(self.pool)
            .await?;
        Ok(())
    }

    pub async fn limpar(&self, cliente_id: i64) -> Result<(), ErroCafeteria> {
        sqlx::query(
            "DELETE FROM itens_carrinho_personalizacoes WHERE item_carrinho_id IN
             (SELECT id FROM itens_carrinho WHERE cliente_id = ?)",
        )
        .bind(cliente_id)
        .execute(self.pool)
        .await?;
        sqlx::query("DELETE FROM itens_carrinho WHERE cliente_id = ?")
            .bind(cliente_id)
            .execute(self.pool)
            .await?;
        Ok(())
    }

    pub async fn total(&self, cliente_id: i64) -> Result<f64, ErroCafeteria> {
        let total: Option<f64> = sqlx::query_scalar(
            "SELECT SUM(preco_unitario * quantidade) FROM itens_carrinho WHERE cliente_id = ?",
        )
        .bind(cliente_id)
        .fetch_one(self.pool)
        .await?;
        Ok(total.unwrap_or(0.0))
    }
}

// ---------------------------------------------------------------------------
// Pedidos
// ---------------------------------------------------------------------------

pub struct PedidoRepositorio<'a> {
    pool: &'a Pool<Sqlite>,
}

const SELECT_PEDIDO_RESPONSE: &str =
    "SELECT p.id, p.cliente_id, c.nome AS cliente_nome, p.status, p.total, p.desconto,
            p.total_final, p.metodo_pagamento, p.created_at AS data_pedido,
            p.updated_at AS data_atualizacao, p.observacoes,
            (SELECT COUNT(*) FROM itens_pedido ip WHERE ip.pedido_id = p.id) AS itens_count
     FROM pedidos p
     JOIN clientes c ON c.id = p.cliente_id";

impl<'a> PedidoRepositorio<'a> {
    pub fn new(pool: &'a Pool<Sqlite>) -> Self {
        PedidoRepositorio { pool }
    }

    pub async fn inserir(
        &self,
        cliente_id: i64,
        total: f64,
        desconto: f64,
        total_final: f64,
        status: StatusPedido,
        metodo_pagamento: MetodoPagamento,
        observacoes: Option<&str>,
    ) -> Result<i64, ErroCafeteria> {
        let resultado = sqlx::query(
            "INSERT INTO pedidos (cliente_id, total, desconto, total_final, status, metodo_pagamento, observacoes)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(cliente_id)
        .bind(total)
        .bind(desconto)
        .bind(total_final)
        .bind(status)
        .bind(metodo_pagamento)
        .bind(observacoes)
        .execute(self.pool)
        .await?;
        Ok(resultado.last_insert_rowid())
    }

    pub async fn inserir_item(
        &self,
        pedido_id: i64,
        bebida_id: i64,
        quantidade: i64,
        preco_unitario: f64,
        subtotal: f64,
        observacoes: Option<&str>,
    ) -> Result<i64, ErroCafeteria> {
        let resultado = sqlx::query(
            "INSERT INTO itens_pedido (pedido_id, bebida_id, quantidade, preco_unitario, subtotal, observacoes)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(pedido_id)
        .bind(bebida_id)
        .bind(quantidade)
        .bind(preco_unitario)
        .bind(subtotal)
        .bind(observacoes)
        .execute(self.pool)
        .await?;
        Ok(resultado.last_insert_rowid())
    }

    pub async fn vincular_personalizacao(
        &self,
        item_pedido_id: i64,
        personalizacao_id: i64,
    ) -> Result<(), ErroCafeteria> {
        sqlx::query(
            "INSERT INTO itens_pedido_personalizacoes (item_pedido_id, personalizacao_id)
             VALUES (?, ?)",
        )
        .bind(item_pedido_id)
        .bind(personalizacao_id)
        .execute(self.pool)
        .await?;
        Ok(())
    }

    pub async fn buscar_por_id(&self, pedido_id: i64) -> Result<Option<Pedido>, ErroCafeteria> {
        let pedido = sqlx::query_as::<_, Pedido>(
            "SELECT id, cliente_id, total, desconto, total_final, status, metodo_pagamento,
                    observacoes, created_at, updated_at
             FROM pedidos WHERE id = ?",
        )
        .bind(pedido_id)
        .fetch_optional(self.pool)
        .await?;
        Ok(pedido)
    }

    pub async fn buscar_response(
        &self,
        pedido_id: i64,
    ) -> Result<Option<PedidoResponse>, ErroCafeteria> {
        let consulta = format!("{} WHERE p.id = ?", SELECT_PEDIDO_RESPONSE);
        let pedido = sqlx::query_as::<_, PedidoResponse>(&consulta)
            .bind(pedido_id)
            .fetch_optional(self.pool)
            .await?;
        Ok(pedido)
    }

    /// Lista pedidos com filtros opcionais de cliente e status,
    /// ordenados do mais recente para o mais antigo.
    pub async fn listar(
        &self,
        cliente_id: Option<i64>,
        status: Option<StatusPedido>,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<PedidoResponse>, ErroCafeteria> {
        let consulta = format!(
            "{} WHERE (? IS NULL OR p.cliente_id = ?) AND (? IS NULL OR p.status = ?)
             ORDER BY p.created_at DESC, p.id DESC LIMIT ? OFFSET ?",
            SELECT_PEDIDO_RESPONSE
        );
        let pedidos = sqlx::query_as::<_, PedidoResponse>(&consulta)
            .bind(cliente_id)
            .bind(cliente_id)
            .bind(status)
            .bind(status)
            .bind(limit)
            .bind(skip)
            .fetch_all(self.pool)
            .await?;
        Ok(pedidos)
    }

    pub async fn atualizar_status(
        &self,
        pedido_id: i64,
        novo_status: StatusPedido,
    ) -> Result<(), ErroCafeteria> {
        sqlx::query("UPDATE pedidos SET status = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?")
            .bind(novo_status)
            .bind(pedido_id)
            .execute(self.pool)
            .await?;
        Ok(())
    }

    /// Remove o pedido e todos os registros dependentes. Usado pelo
    /// desfazer do comando de criação.
    pub async fn excluir(&self, pedido_id: i64) -> Result<(), ErroCafeteria> {
        sqlx::query(
            "DELETE FROM itens_pedido_personalizacoes WHERE item_pedido_id IN
             (SELECT id FROM itens_pedido WHERE pedido_id = ?)",
        )
        .bind(pedido_id)
        .execute(self.pool)
        .await?;
        sqlx::query("DELETE FROM itens_pedido WHERE pedido_id = ?")
            .bind(pedido_id)
            .execute(self.pool)
            .await?;
        sqlx::query("DELETE FROM historico_pedidos WHERE pedido_id = ?")
            .bind(pedido_id)
            .execute(self.pool)
            .await?;
        sqlx::query("DELETE FROM pedidos WHERE id = ?")
            .bind(pedido_id)
            .execute(self.pool)
            .await?;
        Ok(())
    }

    pub async fn itens_do_pedido(
        &self,
        pedido_id: i64,
    ) -> Result<Vec<ItemPedidoDetalhe>, ErroCafeteria> {
        let itens = sqlx::query_as::<_, ItemPedidoDetalhe>(
            "SELECT ip.id, ip.bebida_id, b.nome AS bebida_nome, ip.quantidade,
                    ip.preco_unitario, ip.subtotal, ip.observacoes
             FROM itens_pedido ip
             JOIN bebidas b ON b.id = ip.bebida_id
             WHERE ip.pedido_id = ?
             ORDER BY ip.id",
        )
        .bind(pedido_id)
        .fetch_all(self.pool)
        .await?;
        Ok(itens)
    }

    pub async fn personalizacoes_do_item(
        &self,
        item_pedido_id: i64,
    ) -> Result<Vec<PersonalizacaoResumo>, ErroCafeteria> {
        let personalizacoes = sqlx::query_as::<_, PersonalizacaoResumo>(
            "SELECT p.id, p.nome, p.preco_adicional
             FROM itens_pedido_personalizacoes ipp
             JOIN personalizacoes p ON p.id = ipp.personalizacao_id
             WHERE ipp.item_pedido_id = ?
             ORDER BY ipp.id",
        )
        .bind(item_pedido_id)
        .fetch_all(self.pool)
        .await?;
        Ok(personalizacoes)
    }

    /// Contadores do painel administrativo.
    pub async fn estatisticas(&self) -> Result<Estatisticas, ErroCafeteria> {
        let total_pedidos: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pedidos")
            .fetch_one(self.pool)
            .await?;
        let pedidos_hoje: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM pedidos WHERE created_at >= date('now')")
                .fetch_one(self.pool)
                .await?;
        let faturamento_total: Option<f64> = sqlx::query_scalar(
            "SELECT SUM(total_final) FROM pedidos WHERE status != 'cancelado'",
        )
        .fetch_one(self.pool)
        .await?;
        let pedidos_recebidos: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM pedidos WHERE status = 'recebido'")
                .fetch_one(self.pool)
                .await?;
        let pedidos_em_preparo: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM pedidos WHERE status = 'em_preparo'")
                .fetch_one(self.pool)
                .await?;

        let faturamento_total = faturamento_total.unwrap_or(0.0);
        let ticket_medio = if total_pedidos > 0 {
            faturamento_total / total_pedidos as f64
        } else {
            0.0
        };

        Ok(Estatisticas {
            total_pedidos,
            pedidos_hoje,
            faturamento_total,
            ticket_medio,
            pedidos_recebidos,
            pedidos_em_preparo,
            bebidas_mais_vendidas: self.mais_vendidas(5).await?,
        })
    }

    /// Ranking de bebidas por quantidade vendida, ignorando pedidos
    /// cancelados.
    pub async fn mais_vendidas(
        &self,
        limite: i64,
    ) -> Result<Vec<BebidaMaisVendida>, ErroCafeteria> {
        let ranking = sqlx::query_as::<_, BebidaMaisVendida>(
            "SELECT b.id AS bebida_id, b.nome AS nome_bebida,
                    SUM(ip.quantidade) AS total_vendido,
                    SUM(ip.subtotal) AS receita_gerada
             FROM itens_pedido ip
             JOIN bebidas b ON b.id = ip.bebida_id
             JOIN pedidos p ON p.id = ip.pedido_id
             WHERE p.status != 'cancelado'
             GROUP BY b.id, b.nome
             ORDER BY total_vendido DESC
             LIMIT ?",
        )
        .bind(limite)
        .fetch_all(self.pool)
        .await?;
        Ok(ranking)
    }
}

// ---------------------------------------------------------------------------
// Histórico de pedidos
// ---------------------------------------------------------------------------

pub struct HistoricoRepositorio<'a> {
    pool: &'a Pool<Sqlite>,
}

impl<'a> HistoricoRepositorio<'a> {
    pub fn new(pool: &'a Pool<Sqlite>) -> Self {
        HistoricoRepositorio { pool }
    }

    pub async fn registrar(
        &self,
        pedido_id: i64,
        status_anterior: Option<StatusPedido>,
        status_novo: StatusPedido,
        observacao: Option<&str>,
    ) -> Result<(), ErroCafeteria> {
        sqlx::query(
            "INSERT INTO historico_pedidos (pedido_id, status_anterior, status_novo, observacao)
             VALUES (?, ?, ?, ?)",
        )
        .bind(pedido_id)
        .bind(status_anterior)
        .bind(status_novo)
        .bind(observacao)
        .execute(self.pool)
        .await?;
        Ok(())
    }

    pub async fn listar_por_pedido(
        &self,
        pedido_id: i64,
    ) -> Result<Vec<HistoricoPedido>, ErroCafeteria> {
        let historico = sqlx::query_as::<_, HistoricoPedido>(
            "SELECT id, pedido_id, status_anterior, status_novo, observacao, timestamp
             FROM historico_pedidos WHERE pedido_id = ? ORDER BY id",
        )
        .bind(pedido_id)
        .fetch_all(self.pool)
        .await?;
        Ok(historico)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::db::teste::{inserir_bebida, inserir_cliente, pool_em_memoria};

    #[actix_web::test]
    async fn carrinho_soma_itens_e_limpa() {
        let pool = pool_em_memoria().await;
        let cliente_id = inserir_cliente(&pool, "Maria", "maria@email.com").await;
        let bebida_id = inserir_bebida(&pool, "Espresso", 3.50).await;

        let repo = CarrinhoRepositorio::new(&pool);
        repo.inserir_item(cliente_id, bebida_id, 2, 3.50, None)
            .await
            .unwrap();
        repo.inserir_item(cliente_id, bebida_id, 1, 5.00, Some("sem canudo"))
            .await
            .unwrap();

        let itens = repo.itens_do_cliente(cliente_id).await.unwrap();
        assert_eq!(itens.len(), 2);
        assert_eq!(repo.total(cliente_id).await.unwrap(), 12.00);

        repo.limpar(cliente_id).await.unwrap();
        assert!(repo.itens_do_cliente(cliente_id).await.unwrap().is_empty());
        assert_eq!(repo.total(cliente_id).await.unwrap(), 0.0);
    }

    #[actix_web::test]
    async fn pedido_listado_com_nome_do_cliente_e_contagem() {
        let pool = pool_em_memoria().await;
        let cliente_id = inserir_cliente(&pool, "João", "joao@email.com").await;
        let bebida_id = inserir_bebida(&pool, "Latte", 6.00).await;

        let repo = PedidoRepositorio::new(&pool);
        let pedido_id = repo
            .inserir(
                cliente_id,
                12.00,
                0.60,
                11.40,
                StatusPedido::Recebido,
                MetodoPagamento::Pix,
                None,
            )
            .await
            .unwrap();
        repo.inserir_item(pedido_id, bebida_id, 2, 6.00, 12.00, None)
            .await
            .unwrap();

        let resposta = repo.buscar_response(pedido_id).await.unwrap().unwrap();
        assert_eq!(resposta.cliente_nome, "João");
        assert_eq!(resposta.itens_count, 1);
        assert_eq!(resposta.status, StatusPedido::Recebido);
        assert_eq!(resposta.total_final, 11.40);

        let somente_recebidos = repo
            .listar(Some(cliente_id), Some(StatusPedido::Recebido), 0, 10)
            .await
            .unwrap();
        assert_eq!(somente_recebidos.len(), 1);

        let cancelados = repo
            .listar(Some(cliente_id), Some(StatusPedido::Cancelado), 0, 10)
            .await
            .unwrap();
        assert!(cancelados.is_empty());
    }

    #[actix_web::test]
    async fn excluir_pedido_remove_dependentes() {
        let pool = pool_em_memoria().await;
        let cliente_id = inserir_cliente(&pool, "Ana", "ana@email.com").await;
        let bebida_id = inserir_bebida(&pool, "Mocha", 6.50).await;

        let repo = PedidoRepositorio::new(&pool);
        let historico = HistoricoRepositorio::new(&pool);
        let pedido_id = repo
            .inserir(
                cliente_id,
                6.50,
                0.0,
                6.50,
                StatusPedido::Recebido,
                MetodoPagamento::Dinheiro,
                None,
            )
            .await
            .unwrap();
        repo.inserir_item(pedido_id, bebida_id, 1, 6.50, 6.50, None)
            .await
            .unwrap();
        historico
            .registrar(pedido_id, None, StatusPedido::Recebido, Some("Pedido criado"))
            .await
            .unwrap();

        repo.excluir(pedido_id).await.unwrap();

        assert!(repo.buscar_por_id(pedido_id).await.unwrap().is_none());
        assert!(repo.itens_do_pedido(pedido_id).await.unwrap().is_empty());
        assert!(historico
            .listar_por_pedido(pedido_id)
            .await
            .unwrap()
            .is_empty());
    }

    #[actix_web::test]
    async fn estatisticas_com_ticket_medio_e_ranking_sem_cancelados() {
        let pool = pool_em_memoria().await;
        let cliente_id = inserir_cliente(&pool, "Clara", "clara@email.com").await;
        let latte_id = inserir_bebida(&pool, "Latte", 6.00).await;
        let espresso_id = inserir_bebida(&pool, "Espresso", 1.50).await;

        let repo = PedidoRepositorio::new(&pool);

        // Sem pedidos, o ticket médio não divide por zero.
        let vazio = repo.estatisticas().await.unwrap();
        assert_eq!(vazio.ticket_medio, 0.0);
        assert!(vazio.bebidas_mais_vendidas.is_empty());

        let pedido_a = repo
            .inserir(
                cliente_id,
                12.00,
                0.0,
                12.00,
                StatusPedido::Recebido,
                MetodoPagamento::Dinheiro,
                None,
            )
            .await
            .unwrap();
        repo.inserir_item(pedido_a, latte_id, 2, 6.00, 12.00, None)
            .await
            .unwrap();

        let pedido_b = repo
            .inserir(
                cliente_id,
                6.00,
                0.0,
                6.00,
                StatusPedido::Entregue,
                MetodoPagamento::Dinheiro,
                None,
            )
            .await
            .unwrap();
        repo.inserir_item(pedido_b, espresso_id, 4, 1.50, 6.00, None)
            .await
            .unwrap();

        let cancelado = repo
            .inserir(
                cliente_id,
                54.00,
                0.0,
                54.00,
                StatusPedido::Cancelado,
                MetodoPagamento::Dinheiro,
                None,
            )
            .await
            .unwrap();
        repo.inserir_item(cancelado, latte_id, 9, 6.00, 54.00, None)
            .await
            .unwrap();

        let stats = repo.estatisticas().await.unwrap();
        assert_eq!(stats.total_pedidos, 3);
        assert_eq!(stats.faturamento_total, 18.00);
        assert_eq!(stats.ticket_medio, 6.00);

        // O pedido cancelado fica fora do faturamento e do ranking.
        let ranking = &stats.bebidas_mais_vendidas;
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].bebida_id, espresso_id);
        assert_eq!(ranking[0].total_vendido, 4);
        assert_eq!(ranking[0].receita_gerada, 6.00);
        assert_eq!(ranking[1].nome_bebida, "Latte");
        assert_eq!(ranking[1].total_vendido, 2);
        assert_eq!(ranking[1].receita_gerada, 12.00);
    }
}
