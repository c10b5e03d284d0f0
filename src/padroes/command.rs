// src/padroes/command.rs
//
// Padrão Command para as operações de pedido com desfazer/refazer.
// Cada comando guarda, ao executar, o que precisa para se desfazer
// (id criado ou status anterior). O invocador mantém o histórico com um
// cursor: desfazer volta o cursor, refazer avança re-executando.

use serde::Serialize;
use sqlx::{Pool, Sqlite};

use crate::dao::repositorios::{CarrinhoRepositorio, ClienteRepositorio, HistoricoRepositorio, PedidoRepositorio};
use crate::padroes::business_object::PedidoBO;
use crate::padroes::state::StatusPedido;
use crate::padroes::strategy::MetodoPagamento;
use crate::shared::erros::ErroCafeteria;

/// Comandos de pedido. As variantes carregam os dados de entrada e,
/// após `executar`, o necessário para `desfazer`.
#[derive(Debug, Clone)]
pub enum ComandoPedido {
    CriarPedido {
        cliente_id: i64,
        metodo_pagamento: MetodoPagamento,
        observacoes: Option<String>,
        pedido_id: Option<i64>,
    },
    AvancarEstado {
        pedido_id: i64,
        status_anterior: Option<StatusPedido>,
    },
    CancelarPedido {
        pedido_id: i64,
        status_anterior: Option<StatusPedido>,
    },
}

impl ComandoPedido {
    pub fn criar_pedido(
        cliente_id: i64,
        metodo_pagamento: MetodoPagamento,
        observacoes: Option<String>,
    ) -> Self {
        ComandoPedido::CriarPedido {
            cliente_id,
            metodo_pagamento,
            observacoes,
            pedido_id: None,
        }
    }

    pub fn avancar_estado(pedido_id: i64) -> Self {
        ComandoPedido::AvancarEstado {
            pedido_id,
            status_anterior: None,
        }
    }

    pub fn cancelar_pedido(pedido_id: i64) -> Self {
        ComandoPedido::CancelarPedido {
            pedido_id,
            status_anterior: None,
        }
    }

    pub fn nome(&self) -> &'static str {
        match self {
            ComandoPedido::CriarPedido { .. } => "criar_pedido",
            ComandoPedido::AvancarEstado { .. } => "avancar_estado",
            ComandoPedido::CancelarPedido { .. } => "cancelar_pedido",
        }
    }

    /// Id do pedido alvo, quando conhecido.
    pub fn pedido_id(&self) -> Option<i64> {
        match self {
            ComandoPedido::CriarPedido { pedido_id, .. } => *pedido_id,
            ComandoPedido::AvancarEstado { pedido_id, .. }
            | ComandoPedido::CancelarPedido { pedido_id, .. } => Some(*pedido_id),
        }
    }

    /// Executa o comando, guardando nele o que o desfazer precisa.
    /// Em caso de erro o comando permanece como estava.
    pub async fn executar(&mut self, pool: &Pool<Sqlite>) -> Result<i64, ErroCafeteria> {
        let bo = PedidoBO::new(pool);
        match self {
            ComandoPedido::CriarPedido {
                cliente_id,
                metodo_pagamento,
                observacoes,
                pedido_id,
            } => {
                let id = bo
                    .criar_pedido(*cliente_id, *metodo_pagamento, observacoes.as_deref())
                    .await?;
                *pedido_id = Some(id);
                Ok(id)
            }
            ComandoPedido::AvancarEstado {
                pedido_id,
                status_anterior,
            } => {
                let transicao = bo.avancar_estado(*pedido_id).await?;
                *status_anterior = Some(transicao.estado_anterior);
                Ok(*pedido_id)
            }
            ComandoPedido::CancelarPedido {
                pedido_id,
                status_anterior,
            } => {
                let transicao = bo.cancelar_pedido(*pedido_id).await?;
                *status_anterior = Some(transicao.estado_anterior);
                Ok(*pedido_id)
            }
        }
    }

    /// Reverte o efeito do comando mais recente. Só é seguro sobre o
    /// topo do histórico; o invocador garante a ordem.
    pub async fn desfazer(&self, pool: &Pool<Sqlite>) -> Result<(), ErroCafeteria> {
        match self {
            ComandoPedido::CriarPedido {
                cliente_id,
                pedido_id,
                ..
            } => {
                let pedido_id = pedido_id.ok_or_else(|| {
                    ErroCafeteria::Interno("comando de criação nunca foi executado".into())
                })?;
                desfazer_criacao(pool, *cliente_id, pedido_id).await
            }
            ComandoPedido::AvancarEstado {
                pedido_id,
                status_anterior,
            }
            | ComandoPedido::CancelarPedido {
                pedido_id,
                status_anterior,
            } => {
                let anterior = status_anterior.ok_or_else(|| {
                    ErroCafeteria::Interno("comando de transição nunca foi executado".into())
                })?;
                restaurar_status(pool, *pedido_id, anterior).await
            }
        }
    }
}

/// Desfaz a criação: devolve os itens ao carrinho do cliente e apaga o
/// pedido com todos os registros dependentes.
async fn desfazer_criacao(
    pool: &Pool<Sqlite>,
    cliente_id: i64,
    pedido_id: i64,
) -> Result<(), ErroCafeteria> {
    let pedidos = PedidoRepositorio::new(pool);
    if pedidos.buscar_por_id(pedido_id).await?.is_none() {
        return Err(ErroCafeteria::nao_encontrado("pedido"));
    }

    let carrinho = CarrinhoRepositorio::new(pool);
    for item in pedidos.itens_do_pedido(pedido_id).await? {
        let item_carrinho_id = carrinho
            .inserir_item(
                cliente_id,
                item.bebida_id,
                item.quantidade,
                item.preco_unitario,
                item.observacoes.as_deref(),
            )
            .await?;
        for personalizacao in pedidos.personalizacoes_do_item(item.id).await? {
            carrinho
                .vincular_personalizacao(item_carrinho_id, personalizacao.id)
                .await?;
        }
    }

    pedidos.excluir(pedido_id).await?;
    tracing::info!(
        "criação do pedido {} desfeita; itens devolvidos ao carrinho do cliente {}",
        pedido_id,
        cliente_id
    );
    Ok(())
}

/// Restaura o status gravado antes da transição desfeita. Se a
/// transição havia creditado pontos de fidelidade (entrega), eles são
/// estornados.
async fn restaurar_status(
    pool: &Pool<Sqlite>,
    pedido_id: i64,
    anterior: StatusPedido,
) -> Result<(), ErroCafeteria> {
    let pedidos = PedidoRepositorio::new(pool);
    let pedido = pedidos
        .buscar_por_id(pedido_id)
        .await?
        .ok_or_else(|| ErroCafeteria::nao_encontrado("pedido"))?;

    if pedido.status == StatusPedido::Entregue {
        let pontos = pedido.total_final.floor() as i64;
        if pontos > 0 {
            ClienteRepositorio::new(pool)
                .adicionar_pontos(pedido.cliente_id, -pontos)
                .await?;
        }
    }

    pedidos.atualizar_status(pedido_id, anterior).await?;
    HistoricoRepositorio::new(pool)
        .registrar(
            pedido_id,
            Some(pedido.status),
            anterior,
            Some("Status restaurado (desfazer)"),
        )
        .await?;
    tracing::info!(
        "pedido {} restaurado de '{}' para '{}'",
        pedido_id,
        pedido.status.as_str(),
        anterior.as_str()
    );
    Ok(())
}

/// Entrada do histórico de comandos exposta pela API.
#[derive(Serialize)]
pub struct RegistroComando {
    pub nome: &'static str,
    pub pedido_id: Option<i64>,
    pub executado: bool,
}

/// Invoker do padrão Command: histórico linear com cursor. Desfazer
/// recua o cursor; refazer re-executa o comando seguinte; um novo
/// comando descarta a cauda desfeita.
#[derive(Default)]
pub struct InvocadorComandos {
    historico: Vec<ComandoPedido>,
    // Quantidade de comandos atualmente aplicados (prefixo do histórico).
    aplicados: usize,
}

impl InvocadorComandos {
    pub fn new() -> Self {
        InvocadorComandos::default()
    }

    /// Registra um comando já executado, descartando a cauda desfeita.
    pub fn registrar(&mut self, comando: ComandoPedido) {
        self.historico.truncate(self.aplicados);
        self.historico.push(comando);
        self.aplicados = self.historico.len();
    }

    pub fn pode_desfazer(&self) -> bool {
        self.aplicados > 0
    }

    pub fn pode_refazer(&self) -> bool {
        self.aplicados < self.historico.len()
    }

    /// Comando no topo, a ser desfeito. O cursor só anda em
    /// `confirmar_desfazer`, depois que o desfazer teve efeito no banco.
    pub fn comando_para_desfazer(&self) -> Option<ComandoPedido> {
        self.pode_desfazer()
            .then(|| self.historico[self.aplicados - 1].clone())
    }

    /// Confirma o desfazer. Requisições concorrentes podem espiar o
    /// mesmo topo; a confirmação que chegar tarde encontra o cursor já
    /// recuado e é ignorada, devolvendo `false`.
    pub fn confirmar_desfazer(&mut self) -> bool {
        if !self.pode_desfazer() {
            return false;
        }
        self.aplicados -= 1;
        true
    }

    /// Comando desfeito mais recente, candidato a refazer.
    pub fn comando_para_refazer(&self) -> Option<ComandoPedido> {
        self.pode_refazer()
            .then(|| self.historico[self.aplicados].clone())
    }

    /// Confirma o refazer, guardando o comando re-executado (que pode
    /// carregar um novo id de pedido). Confirmações obsoletas são
    /// ignoradas, como em `confirmar_desfazer`.
    pub fn confirmar_refazer(&mut self, comando: ComandoPedido) -> bool {
        if !self.pode_refazer() {
            return false;
        }
        self.historico[self.aplicados] = comando;
        self.aplicados += 1;
        true
    }

    pub fn registros(&self) -> Vec<RegistroComando> {
        self.historico
            .iter()
            .enumerate()
            .map(|(indice, comando)| RegistroComando {
                nome: comando.nome(),
                pedido_id: comando.pedido_id(),
                executado: indice < self.aplicados,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carrinho::carrinho_structs::NovoItemCarrinho;
    use crate::dao::db::teste::{inserir_bebida, inserir_cliente, pool_em_memoria};

    async fn cliente_com_carrinho(pool: &Pool<Sqlite>) -> i64 {
        let cliente_id = inserir_cliente(pool, "Maria", "maria@email.com").await;
        let bebida_id = inserir_bebida(pool, "Latte", 6.00).await;
        PedidoBO::new(pool)
            .adicionar_ao_carrinho(
                cliente_id,
                &NovoItemCarrinho {
                    bebida_id,
                    quantidade: 2,
                    personalizacoes: vec![],
                    observacoes: None,
                },
            )
            .await
            .unwrap();
        cliente_id
    }

    #[actix_web::test]
    async fn desfazer_criacao_devolve_itens_ao_carrinho() {
        let pool = pool_em_memoria().await;
        let cliente_id = cliente_com_carrinho(&pool).await;
        let bo = PedidoBO::new(&pool);

        let mut comando = ComandoPedido::criar_pedido(cliente_id, MetodoPagamento::Pix, None);
        let pedido_id = comando.executar(&pool).await.unwrap();
        assert!(bo.carrinho(cliente_id).await.unwrap().itens.is_empty());

        comando.desfazer(&pool).await.unwrap();

        assert!(matches!(
            bo.buscar_pedido(pedido_id).await,
            Err(ErroCafeteria::NaoEncontrado(_))
        ));
        let carrinho = bo.carrinho(cliente_id).await.unwrap();
        assert_eq!(carrinho.itens.len(), 1);
        assert_eq!(carrinho.total_itens, 2);
    }

    #[actix_web::test]
    async fn desfazer_transicao_restaura_status() {
        let pool = pool_em_memoria().await;
        let cliente_id = cliente_com_carrinho(&pool).await;
        let bo = PedidoBO::new(&pool);

        let mut criar = ComandoPedido::criar_pedido(cliente_id, MetodoPagamento::Dinheiro, None);
        let pedido_id = criar.executar(&pool).await.unwrap();

        let mut avancar = ComandoPedido::avancar_estado(pedido_id);
        avancar.executar(&pool).await.unwrap();
        assert_eq!(
            bo.buscar_pedido(pedido_id).await.unwrap().status,
            StatusPedido::EmPreparo
        );

        avancar.desfazer(&pool).await.unwrap();
        assert_eq!(
            bo.buscar_pedido(pedido_id).await.unwrap().status,
            StatusPedido::Recebido
        );
    }

    #[actix_web::test]
    async fn invocador_refaz_criacao_com_novo_id() {
        let pool = pool_em_memoria().await;
        let cliente_id = cliente_com_carrinho(&pool).await;
        let bo = PedidoBO::new(&pool);
        let mut invocador = InvocadorComandos::new();

        let mut comando = ComandoPedido::criar_pedido(cliente_id, MetodoPagamento::Pix, None);
        let primeiro_id = comando.executar(&pool).await.unwrap();
        invocador.registrar(comando);

        let para_desfazer = invocador.comando_para_desfazer().unwrap();
        para_desfazer.desfazer(&pool).await.unwrap();
        invocador.confirmar_desfazer();
        assert!(!invocador.pode_desfazer());
        assert!(invocador.pode_refazer());

        let mut para_refazer = invocador.comando_para_refazer().unwrap();
        let novo_id = para_refazer.executar(&pool).await.unwrap();
        invocador.confirmar_refazer(para_refazer);
        assert_ne!(novo_id, primeiro_id);
        assert!(bo.buscar_pedido(novo_id).await.is_ok());

        let registros = invocador.registros();
        assert_eq!(registros.len(), 1);
        assert_eq!(registros[0].nome, "criar_pedido");
        assert_eq!(registros[0].pedido_id, Some(novo_id));
        assert!(registros[0].executado);
    }

    #[test]
    fn confirmacao_duplicada_nao_corrompe_o_cursor() {
        let mut invocador = InvocadorComandos::new();
        invocador.registrar(ComandoPedido::avancar_estado(1));

        // Duas requisições concorrentes podem espiar o mesmo topo antes
        // de qualquer confirmação.
        assert!(invocador.comando_para_desfazer().is_some());
        assert!(invocador.comando_para_desfazer().is_some());

        assert!(invocador.confirmar_desfazer());
        // A confirmação atrasada encontra o cursor já recuado.
        assert!(!invocador.confirmar_desfazer());
        assert!(!invocador.pode_desfazer());

        // O histórico continua utilizável: refazer uma vez, não duas.
        let refeito = invocador.comando_para_refazer().unwrap();
        assert!(invocador.confirmar_refazer(refeito.clone()));
        assert!(!invocador.confirmar_refazer(refeito));

        let registros = invocador.registros();
        assert_eq!(registros.len(), 1);
        assert!(registros[0].executado);
    }

    #[test]
    fn novo_comando_descarta_cauda_desfeita() {
        let mut invocador = InvocadorComandos::new();
        invocador.registrar(ComandoPedido::avancar_estado(1));
        invocador.registrar(ComandoPedido::avancar_estado(2));
        invocador.confirmar_desfazer();
        assert!(invocador.pode_refazer());

        invocador.registrar(ComandoPedido::cancelar_pedido(3));

        let registros = invocador.registros();
        assert_eq!(registros.len(), 2);
        assert_eq!(registros[1].nome, "cancelar_pedido");
        assert!(!invocador.pode_refazer());
        assert!(registros.iter().all(|r| r.executado));
    }
}
