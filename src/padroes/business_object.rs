// src/padroes/business_object.rs
//
// Padrão Business Object: as regras de negócio vivem aqui, compondo os
// repositórios com os demais padrões (Decorator para preço e descrição,
// Strategy para desconto, State para transições, Observer para
// notificações). As rotas só traduzem HTTP <-> chamadas de BO.

use sqlx::{Pool, Sqlite};

use crate::bebidas::bebida_structs::{AtualizaBebida, Bebida, NovaBebida, TipoBebida};
use crate::carrinho::carrinho_structs::{
    AtualizaItemCarrinho, CarrinhoResponse, ItemCarrinhoDetalhe, ItemCarrinhoResponse,
    NovoItemCarrinho,
};
use crate::clientes::cliente_structs::{Cliente, NovoCliente};
use crate::dao::repositorios::{
    BebidaRepositorio, CarrinhoRepositorio, ClienteRepositorio, HistoricoRepositorio,
    PedidoRepositorio, PersonalizacaoRepositorio,
};
use crate::padroes::decorator::aplicar_personalizacoes;
use crate::padroes::factory::bebida_do_cardapio;
use crate::padroes::observer::NotificadorPedido;
use crate::padroes::state::{MaquinaEstadoPedido, StatusPedido};
use crate::padroes::strategy::{arredondar, estrategia_para, MetodoPagamento};
use crate::pedidos::pedido_structs::{
    Estatisticas, FiltroPedidos, ItemPedidoResponse, PedidoDetalheResponse, PedidoResponse,
    TransicaoResponse,
};
use crate::personalizacoes::personalizacao_structs::{
    NovaPersonalizacao, Personalizacao, PersonalizacaoResumo,
};
use crate::shared::erros::ErroCafeteria;

// ---------------------------------------------------------------------------
// ClienteBO
// ---------------------------------------------------------------------------

pub struct ClienteBO<'a> {
    pool: &'a Pool<Sqlite>,
}

impl<'a> ClienteBO<'a> {
    pub fn new(pool: &'a Pool<Sqlite>) -> Self {
        ClienteBO { pool }
    }

    /// Cadastra um novo cliente, recusando e-mails já registrados.
    pub async fn cadastrar(&self, novo: &NovoCliente) -> Result<Cliente, ErroCafeteria> {
        if novo.nome.trim().is_empty() || novo.email.trim().is_empty() {
            return Err(ErroCafeteria::RequisicaoInvalida(
                "nome e email são obrigatórios".into(),
            ));
        }
        if novo.senha.len() < 6 {
            return Err(ErroCafeteria::RequisicaoInvalida(
                "a senha deve ter pelo menos 6 caracteres".into(),
            ));
        }

        let repo = ClienteRepositorio::new(self.pool);
        if repo.buscar_por_email(&novo.email).await?.is_some() {
            return Err(ErroCafeteria::RequisicaoInvalida(
                "email já cadastrado".into(),
            ));
        }

        let senha_hash = bcrypt::hash(&novo.senha, bcrypt::DEFAULT_COST)?;
        let id = repo
            .criar(&novo.nome, &novo.email, &senha_hash, novo.tipo_usuario)
            .await?;
        tracing::info!("cliente cadastrado: {} (id {})", novo.email, id);

        self.buscar(id).await
    }

    /// Confere e-mail e senha; erro genérico para não revelar qual
    /// dos dois está errado.
    pub async fn autenticar(&self, email: &str, senha: &str) -> Result<Cliente, ErroCafeteria> {
        let repo = ClienteRepositorio::new(self.pool);
        let cliente = repo
            .buscar_por_email(email)
            .await?
            .ok_or(ErroCafeteria::CredenciaisInvalidas)?;

        if !bcrypt::verify(senha, &cliente.senha_hash)? {
            return Err(ErroCafeteria::CredenciaisInvalidas);
        }
        Ok(cliente)
    }

    pub async fn buscar(&self, id: i64) -> Result<Cliente, ErroCafeteria> {
        ClienteRepositorio::new(self.pool)
            .buscar_por_id(id)
            .await?
            .ok_or_else(|| ErroCafeteria::nao_encontrado("cliente"))
    }
}

// ---------------------------------------------------------------------------
// ProdutoBO (cardápio e personalizações)
// ---------------------------------------------------------------------------

pub struct ProdutoBO<'a> {
    pool: &'a Pool<Sqlite>,
}

impl<'a> ProdutoBO<'a> {
    pub fn new(pool: &'a Pool<Sqlite>) -> Self {
        ProdutoBO { pool }
    }

    pub async fn listar_cardapio(
        &self,
        tipo: Option<TipoBebida>,
        disponivel: Option<bool>,
    ) -> Result<Vec<Bebida>, ErroCafeteria> {
        BebidaRepositorio::new(self.pool).listar(tipo, disponivel).await
    }

    pub async fn buscar_bebida(&self, id: i64) -> Result<Bebida, ErroCafeteria> {
        BebidaRepositorio::new(self.pool)
            .buscar_por_id(id)
            .await?
            .ok_or_else(|| ErroCafeteria::nao_encontrado("bebida"))
    }

    pub async fn criar_bebida(&self, nova: &NovaBebida) -> Result<Bebida, ErroCafeteria> {
        if nova.preco_base <= 0.0 {
            return Err(ErroCafeteria::RequisicaoInvalida(
                "preço base deve ser positivo".into(),
            ));
        }
        let id = BebidaRepositorio::new(self.pool).criar(nova).await?;
        self.buscar_bebida(id).await
    }

    pub async fn atualizar_bebida(
        &self,
        id: i64,
        dados: &AtualizaBebida,
    ) -> Result<Bebida, ErroCafeteria> {
        if dados.preco_base <= 0.0 {
            return Err(ErroCafeteria::RequisicaoInvalida(
                "preço base deve ser positivo".into(),
            ));
        }
        let atualizou = BebidaRepositorio::new(self.pool).atualizar(id, dados).await?;
        if !atualizou {
            return Err(ErroCafeteria::nao_encontrado("bebida"));
        }
        self.buscar_bebida(id).await
    }

    /// Remove uma bebida do cardápio. Bebidas referenciadas por pedidos
    /// são preservadas para manter o histórico íntegro.
    pub async fn excluir_bebida(&self, id: i64) -> Result<(), ErroCafeteria> {
        let repo = BebidaRepositorio::new(self.pool);
        if repo.buscar_por_id(id).await?.is_none() {
            return Err(ErroCafeteria::nao_encontrado("bebida"));
        }
        if repo.tem_pedidos(id).await? {
            return Err(ErroCafeteria::RequisicaoInvalida(
                "bebida possui pedidos associados e não pode ser removida".into(),
            ));
        }
        repo.excluir(id).await?;
        Ok(())
    }

    pub async fn listar_personalizacoes(&self) -> Result<Vec<Personalizacao>, ErroCafeteria> {
        PersonalizacaoRepositorio::new(self.pool).listar_disponiveis().await
    }

    pub async fn personalizacoes_da_bebida(
        &self,
        bebida_id: i64,
    ) -> Result<Vec<Personalizacao>, ErroCafeteria> {
        self.buscar_bebida(bebida_id).await?;
        PersonalizacaoRepositorio::new(self.pool)
            .listar_por_bebida(bebida_id)
            .await
    }

    pub async fn criar_personalizacao(
        &self,
        nova: &NovaPersonalizacao,
    ) -> Result<Personalizacao, ErroCafeteria> {
        if nova.preco_adicional < 0.0 {
            return Err(ErroCafeteria::RequisicaoInvalida(
                "preço adicional não pode ser negativo".into(),
            ));
        }
        if let Some(bebida_id) = nova.bebida_id {
            self.buscar_bebida(bebida_id).await?;
        }
        let repo = PersonalizacaoRepositorio::new(self.pool);
        let id = repo.criar(nova).await?;
        repo.buscar_por_id(id)
            .await?
            .ok_or_else(|| ErroCafeteria::nao_encontrado("personalização"))
    }
}

// ---------------------------------------------------------------------------
// PedidoBO (carrinho e pedidos)
// ---------------------------------------------------------------------------

pub struct PedidoBO<'a> {
    pool: &'a Pool<Sqlite>,
}

impl<'a> PedidoBO<'a> {
    pub fn new(pool: &'a Pool<Sqlite>) -> Self {
        PedidoBO { pool }
    }

    // --- carrinho ---

    /// Monta a resposta completa do carrinho, com a descrição de cada
    /// item composta pelo Decorator.
    pub async fn carrinho(&self, cliente_id: i64) -> Result<CarrinhoResponse, ErroCafeteria> {
        let repo = CarrinhoRepositorio::new(self.pool);
        let detalhes = repo.itens_do_cliente(cliente_id).await?;

        let mut itens = Vec::with_capacity(detalhes.len());
        let mut total_itens = 0;
        let mut total_valor = 0.0;
        for detalhe in detalhes {
            let personalizacoes = repo.personalizacoes_do_item(detalhe.id).await?;
            total_itens += detalhe.quantidade;
            let item = montar_item_carrinho(detalhe, &personalizacoes);
            total_valor += item.subtotal;
            itens.push(item);
        }

        Ok(CarrinhoResponse {
            itens,
            total_itens,
            total_valor: arredondar(total_valor),
        })
    }

    /// Adiciona um item ao carrinho. O preço unitário é congelado no
    /// momento da adição: bebida base decorada com as personalizações.
    pub async fn adicionar_ao_carrinho(
        &self,
        cliente_id: i64,
        novo: &NovoItemCarrinho,
    ) -> Result<CarrinhoResponse, ErroCafeteria> {
        if novo.quantidade < 1 {
            return Err(ErroCafeteria::RequisicaoInvalida(
                "quantidade deve ser pelo menos 1".into(),
            ));
        }

        let bebida = BebidaRepositorio::new(self.pool)
            .buscar_por_id(novo.bebida_id)
            .await?
            .ok_or_else(|| ErroCafeteria::nao_encontrado("bebida"))?;
        if !bebida.disponivel {
            return Err(ErroCafeteria::RequisicaoInvalida(format!(
                "bebida '{}' indisponível",
                bebida.nome
            )));
        }

        let personalizacoes = self
            .carregar_personalizacoes(&novo.personalizacoes)
            .await?;
        let preco_unitario = preco_decorado(&bebida, &personalizacoes);

        let repo = CarrinhoRepositorio::new(self.pool);
        let item_id = repo
            .inserir_item(
                cliente_id,
                bebida.id,
                novo.quantidade,
                preco_unitario,
                novo.observacoes.as_deref(),
            )
            .await?;
        for personalizacao in &personalizacoes {
            repo.vincular_personalizacao(item_id, personalizacao.id).await?;
        }

        self.carrinho(cliente_id).await
    }

    /// Atualiza quantidade e personalizações de um item do carrinho,
    /// recalculando o preço unitário.
    pub async fn atualizar_item_carrinho(
        &self,
        cliente_id: i64,
        item_id: i64,
        dados: &AtualizaItemCarrinho,
    ) -> Result<CarrinhoResponse, ErroCafeteria> {
        if dados.quantidade < 1 {
            return Err(ErroCafeteria::RequisicaoInvalida(
                "quantidade deve ser pelo menos 1".into(),
            ));
        }

        let repo = CarrinhoRepositorio::new(self.pool);
        self.verificar_dono_do_item(cliente_id, item_id).await?;

        let detalhe = repo
            .itens_do_cliente(cliente_id)
            .await?
            .into_iter()
            .find(|item| item.id == item_id)
            .ok_or_else(|| ErroCafeteria::nao_encontrado("item do carrinho"))?;

        let bebida = BebidaRepositorio::new(self.pool)
            .buscar_por_id(detalhe.bebida_id)
            .await?
            .ok_or_else(|| ErroCafeteria::nao_encontrado("bebida"))?;
        let personalizacoes = self
            .carregar_personalizacoes(&dados.personalizacoes)
            .await?;
        let preco_unitario = preco_decorado(&bebida, &personalizacoes);

        repo.atualizar_item(item_id, dados.quantidade, preco_unitario).await?;
        repo.remover_personalizacoes_do_item(item_id).await?;
        for personalizacao in &personalizacoes {
            repo.vincular_personalizacao(item_id, personalizacao.id).await?;
        }

        self.carrinho(cliente_id).await
    }

    pub async fn remover_item_carrinho(
        &self,
        cliente_id: i64,
        item_id: i64,
    ) -> Result<CarrinhoResponse, ErroCafeteria> {
        self.verificar_dono_do_item(cliente_id, item_id).await?;
        CarrinhoRepositorio::new(self.pool).remover_item(item_id).await?;
        self.carrinho(cliente_id).await
    }

    pub async fn limpar_carrinho(&self, cliente_id: i64) -> Result<(), ErroCafeteria> {
        CarrinhoRepositorio::new(self.pool).limpar(cliente_id).await
    }

    async fn verificar_dono_do_item(
        &self,
        cliente_id: i64,
        item_id: i64,
    ) -> Result<(), ErroCafeteria> {
        let dono = CarrinhoRepositorio::new(self.pool)
            .dono_do_item(item_id)
            .await?
            .ok_or_else(|| ErroCafeteria::nao_encontrado("item do carrinho"))?;
        if dono != cliente_id {
            return Err(ErroCafeteria::AcessoNegado(
                "o item pertence a outro cliente".into(),
            ));
        }
        Ok(())
    }

    /// Resolve os ids de personalização, removendo duplicatas e
    /// rejeitando ids inexistentes ou indisponíveis.
    async fn carregar_personalizacoes(
        &self,
        ids: &[i64],
    ) -> Result<Vec<Personalizacao>, ErroCafeteria> {
        let repo = PersonalizacaoRepositorio::new(self.pool);
        let mut vistos = Vec::new();
        let mut personalizacoes = Vec::new();
        for &id in ids {
            if vistos.contains(&id) {
                continue;
            }
            vistos.push(id);
            let personalizacao = repo
                .buscar_por_id(id)
                .await?
                .filter(|p| p.disponivel)
                .ok_or_else(|| ErroCafeteria::nao_encontrado("personalização"))?;
            personalizacoes.push(personalizacao);
        }
        Ok(personalizacoes)
    }

    // --- pedidos ---

    /// Fecha o carrinho em um pedido: congela itens e personalizações,
    /// aplica a strategy de desconto do método de pagamento, registra o
    /// histórico inicial e notifica os observadores.
    pub async fn criar_pedido(
        &self,
        cliente_id: i64,
        metodo_pagamento: MetodoPagamento,
        observacoes: Option<&str>,
    ) -> Result<i64, ErroCafeteria> {
        let carrinho = CarrinhoRepositorio::new(self.pool);
        let itens = carrinho.itens_do_cliente(cliente_id).await?;
        if itens.is_empty() {
            return Err(ErroCafeteria::CarrinhoVazio);
        }

        let mut total = 0.0;
        for item in &itens {
            total += item.preco_unitario * item.quantidade as f64;
        }
        let total = arredondar(total);

        let estrategia = estrategia_para(metodo_pagamento);
        let desconto = arredondar(estrategia.calcular_desconto(total));
        let total_final = arredondar(total - desconto);

        let pedidos = PedidoRepositorio::new(self.pool);
        let pedido_id = pedidos
            .inserir(
                cliente_id,
                total,
                desconto,
                total_final,
                StatusPedido::Recebido,
                metodo_pagamento,
                observacoes,
            )
            .await?;

        for item in &itens {
            let subtotal = arredondar(item.preco_unitario * item.quantidade as f64);
            let item_pedido_id = pedidos
                .inserir_item(
                    pedido_id,
                    item.bebida_id,
                    item.quantidade,
                    item.preco_unitario,
                    subtotal,
                    item.observacoes.as_deref(),
                )
                .await?;
            for personalizacao in carrinho.personalizacoes_do_item(item.id).await? {
                pedidos
                    .vincular_personalizacao(item_pedido_id, personalizacao.id)
                    .await?;
            }
        }

        HistoricoRepositorio::new(self.pool)
            .registrar(
                pedido_id,
                None,
                StatusPedido::Recebido,
                Some(estrategia.descricao()),
            )
            .await?;
        carrinho.limpar(cliente_id).await?;

        tracing::info!(
            "pedido {} criado para o cliente {} (total final R$ {:.2})",
            pedido_id,
            cliente_id,
            total_final
        );
        NotificadorPedido::padrao().notificar(pedido_id, StatusPedido::Recebido);

        Ok(pedido_id)
    }

    pub async fn buscar_pedido(&self, pedido_id: i64) -> Result<PedidoResponse, ErroCafeteria> {
        PedidoRepositorio::new(self.pool)
            .buscar_response(pedido_id)
            .await?
            .ok_or_else(|| ErroCafeteria::nao_encontrado("pedido"))
    }

    /// Resposta detalhada: pedido, itens com personalizações e o
    /// histórico completo de status.
    pub async fn detalhar_pedido(
        &self,
        pedido_id: i64,
    ) -> Result<PedidoDetalheResponse, ErroCafeteria> {
        let pedido = self.buscar_pedido(pedido_id).await?;

        let repo = PedidoRepositorio::new(self.pool);
        let mut itens = Vec::new();
        for detalhe in repo.itens_do_pedido(pedido_id).await? {
            let personalizacoes = repo.personalizacoes_do_item(detalhe.id).await?;
            itens.push(ItemPedidoResponse {
                id: detalhe.id,
                bebida_id: detalhe.bebida_id,
                bebida_nome: detalhe.bebida_nome,
                quantidade: detalhe.quantidade,
                preco_unitario: detalhe.preco_unitario,
                subtotal: detalhe.subtotal,
                personalizacoes,
                observacoes: detalhe.observacoes,
            });
        }

        let historico = HistoricoRepositorio::new(self.pool)
            .listar_por_pedido(pedido_id)
            .await?;

        Ok(PedidoDetalheResponse {
            pedido,
            itens,
            historico,
        })
    }

    pub async fn listar_pedidos(
        &self,
        cliente_id: Option<i64>,
        filtro: &FiltroPedidos,
    ) -> Result<Vec<PedidoResponse>, ErroCafeteria> {
        PedidoRepositorio::new(self.pool)
            .listar(cliente_id, filtro.status, filtro.skip, filtro.limit)
            .await
    }

    /// Avança o pedido para o próximo estado da sequência feliz.
    pub async fn avancar_estado(
        &self,
        pedido_id: i64,
    ) -> Result<TransicaoResponse, ErroCafeteria> {
        let pedido = self.pedido_do_banco(pedido_id).await?;
        let mut maquina = MaquinaEstadoPedido::new(pedido_id, pedido.status);
        let (anterior, novo) = maquina.avancar()?;
        self.aplicar_transicao(pedido_id, pedido.cliente_id, pedido.total_final, anterior, novo, None)
            .await
    }

    /// Cancela o pedido, se o estado atual permitir.
    pub async fn cancelar_pedido(
        &self,
        pedido_id: i64,
    ) -> Result<TransicaoResponse, ErroCafeteria> {
        let pedido = self.pedido_do_banco(pedido_id).await?;
        let mut maquina = MaquinaEstadoPedido::new(pedido_id, pedido.status);
        let (anterior, novo) = maquina.cancelar()?;
        self.aplicar_transicao(
            pedido_id,
            pedido.cliente_id,
            pedido.total_final,
            anterior,
            novo,
            Some("Pedido cancelado"),
        )
        .await
    }

    /// Transição explícita para um status alvo (rota da cozinha),
    /// validando a aresta no grafo de transições.
    pub async fn alterar_status(
        &self,
        pedido_id: i64,
        novo_status: StatusPedido,
    ) -> Result<TransicaoResponse, ErroCafeteria> {
        let pedido = self.pedido_do_banco(pedido_id).await?;
        let mut maquina = MaquinaEstadoPedido::new(pedido_id, pedido.status);
        let (anterior, novo) = maquina.transicionar_para(novo_status)?;
        self.aplicar_transicao(pedido_id, pedido.cliente_id, pedido.total_final, anterior, novo, None)
            .await
    }

    pub async fn estatisticas(&self) -> Result<Estatisticas, ErroCafeteria> {
        PedidoRepositorio::new(self.pool).estatisticas().await
    }

    async fn pedido_do_banco(
        &self,
        pedido_id: i64,
    ) -> Result<crate::pedidos::pedido_structs::Pedido, ErroCafeteria> {
        PedidoRepositorio::new(self.pool)
            .buscar_por_id(pedido_id)
            .await?
            .ok_or_else(|| ErroCafeteria::nao_encontrado("pedido"))
    }

    /// Persiste a transição, grava o histórico, notifica observadores e
    /// credita pontos de fidelidade na entrega (1 ponto por real).
    async fn aplicar_transicao(
        &self,
        pedido_id: i64,
        cliente_id: i64,
        total_final: f64,
        anterior: StatusPedido,
        novo: StatusPedido,
        observacao: Option<&str>,
    ) -> Result<TransicaoResponse, ErroCafeteria> {
        PedidoRepositorio::new(self.pool)
            .atualizar_status(pedido_id, novo)
            .await?;
        HistoricoRepositorio::new(self.pool)
            .registrar(pedido_id, Some(anterior), novo, observacao)
            .await?;

        if novo == StatusPedido::Entregue {
            let pontos = total_final.floor() as i64;
            if pontos > 0 {
                ClienteRepositorio::new(self.pool)
                    .adicionar_pontos(cliente_id, pontos)
                    .await?;
                tracing::info!(
                    "cliente {} ganhou {} pontos de fidelidade no pedido {}",
                    cliente_id,
                    pontos,
                    pedido_id
                );
            }
        }

        NotificadorPedido::padrao().notificar(pedido_id, novo);

        Ok(TransicaoResponse {
            pedido_id,
            estado_anterior: anterior,
            estado_novo: novo,
        })
    }
}

/// Monta a resposta de um item do carrinho: descrição composta pelo
/// Decorator e subtotal em centavos.
fn montar_item_carrinho(
    detalhe: ItemCarrinhoDetalhe,
    personalizacoes: &[Personalizacao],
) -> ItemCarrinhoResponse {
    let bebida = Bebida {
        id: detalhe.bebida_id,
        nome: detalhe.bebida_nome.clone(),
        preco_base: detalhe.preco_base,
        tipo: detalhe.bebida_tipo,
        descricao: detalhe.bebida_descricao.clone(),
        disponivel: true,
        created_at: None,
    };
    let componente = aplicar_personalizacoes(Box::new(bebida_do_cardapio(&bebida)), personalizacoes);

    ItemCarrinhoResponse {
        id: detalhe.id,
        bebida_id: detalhe.bebida_id,
        bebida_nome: detalhe.bebida_nome,
        descricao: componente.descricao(),
        quantidade: detalhe.quantidade,
        preco_unitario: detalhe.preco_unitario,
        subtotal: arredondar(detalhe.preco_unitario * detalhe.quantidade as f64),
        personalizacoes: personalizacoes
            .iter()
            .map(|p| PersonalizacaoResumo {
                id: p.id,
                nome: p.nome.clone(),
                preco_adicional: p.preco_adicional,
            })
            .collect(),
        observacoes: detalhe.observacoes,
    }
}

/// Preço unitário de uma bebida decorada com as personalizações.
fn preco_decorado(bebida: &Bebida, personalizacoes: &[Personalizacao]) -> f64 {
    let componente =
        aplicar_personalizacoes(Box::new(bebida_do_cardapio(bebida)), personalizacoes);
    arredondar(componente.preco())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carrinho::carrinho_structs::NovoItemCarrinho;
    use crate::dao::db::teste::{
        inserir_bebida, inserir_cliente, inserir_personalizacao, pool_em_memoria,
    };

    async fn carrinho_com_latte(pool: &Pool<Sqlite>) -> (i64, i64, i64) {
        let cliente_id = inserir_cliente(pool, "Maria", "maria@email.com").await;
        let bebida_id = inserir_bebida(pool, "Latte", 6.00).await;
        let pers_id = inserir_personalizacao(pool, "Canela", 0.50).await;
        (cliente_id, bebida_id, pers_id)
    }

    #[actix_web::test]
    async fn adicionar_ao_carrinho_congela_preco_decorado() {
        let pool = pool_em_memoria().await;
        let (cliente_id, bebida_id, pers_id) = carrinho_com_latte(&pool).await;

        let bo = PedidoBO::new(&pool);
        let carrinho = bo
            .adicionar_ao_carrinho(
                cliente_id,
                &NovoItemCarrinho {
                    bebida_id,
                    quantidade: 2,
                    personalizacoes: vec![pers_id, pers_id], // duplicata ignorada
                    observacoes: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(carrinho.itens.len(), 1);
        let item = &carrinho.itens[0];
        assert_eq!(item.preco_unitario, 6.50);
        assert_eq!(item.subtotal, 13.00);
        assert_eq!(item.personalizacoes.len(), 1);
        assert!(item.descricao.contains("com Canela"));
        assert_eq!(carrinho.total_valor, 13.00);
    }

    #[actix_web::test]
    async fn personalizacao_inexistente_rejeitada() {
        let pool = pool_em_memoria().await;
        let (cliente_id, bebida_id, _) = carrinho_com_latte(&pool).await;

        let bo = PedidoBO::new(&pool);
        let resultado = bo
            .adicionar_ao_carrinho(
                cliente_id,
                &NovoItemCarrinho {
                    bebida_id,
                    quantidade: 1,
                    personalizacoes: vec![9999],
                    observacoes: None,
                },
            )
            .await;
        assert!(matches!(resultado, Err(ErroCafeteria::NaoEncontrado(_))));
        assert!(bo.carrinho(cliente_id).await.unwrap().itens.is_empty());
    }

    #[actix_web::test]
    async fn criar_pedido_aplica_desconto_e_esvazia_carrinho() {
        let pool = pool_em_memoria().await;
        let (cliente_id, bebida_id, _) = carrinho_com_latte(&pool).await;

        let bo = PedidoBO::new(&pool);
        bo.adicionar_ao_carrinho(
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

        let pedido_id = bo
            .criar_pedido(cliente_id, MetodoPagamento::Pix, None)
            .await
            .unwrap();

        let detalhe = bo.detalhar_pedido(pedido_id).await.unwrap();
        assert_eq!(detalhe.pedido.total, 12.00);
        assert_eq!(detalhe.pedido.desconto, 0.60);
        assert_eq!(detalhe.pedido.total_final, 11.40);
        assert_eq!(detalhe.pedido.status, StatusPedido::Recebido);
        assert_eq!(detalhe.itens.len(), 1);
        assert_eq!(detalhe.historico.len(), 1);
        assert_eq!(detalhe.historico[0].status_novo, StatusPedido::Recebido);

        assert!(bo.carrinho(cliente_id).await.unwrap().itens.is_empty());
    }

    #[actix_web::test]
    async fn criar_pedido_com_carrinho_vazio_falha() {
        let pool = pool_em_memoria().await;
        let cliente_id = inserir_cliente(&pool, "Ana", "ana@email.com").await;

        let bo = PedidoBO::new(&pool);
        let resultado = bo.criar_pedido(cliente_id, MetodoPagamento::Dinheiro, None).await;
        assert!(matches!(resultado, Err(ErroCafeteria::CarrinhoVazio)));
    }

    #[actix_web::test]
    async fn entrega_credita_pontos_de_fidelidade() {
        let pool = pool_em_memoria().await;
        let (cliente_id, bebida_id, _) = carrinho_com_latte(&pool).await;

        let bo = PedidoBO::new(&pool);
        bo.adicionar_ao_carrinho(
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
        let pedido_id = bo
            .criar_pedido(cliente_id, MetodoPagamento::Cartao, None)
            .await
            .unwrap();

        bo.avancar_estado(pedido_id).await.unwrap(); // em_preparo
        bo.avancar_estado(pedido_id).await.unwrap(); // pronto
        let transicao = bo.avancar_estado(pedido_id).await.unwrap(); // entregue
        assert_eq!(transicao.estado_novo, StatusPedido::Entregue);

        let cliente = ClienteBO::new(&pool).buscar(cliente_id).await.unwrap();
        assert_eq!(cliente.pontos_fidelidade, 12); // R$ 12,00 -> 12 pontos

        // Pedido entregue não avança nem cancela.
        assert!(bo.avancar_estado(pedido_id).await.is_err());
        assert!(bo.cancelar_pedido(pedido_id).await.is_err());
    }

    #[actix_web::test]
    async fn cancelamento_registra_historico() {
        let pool = pool_em_memoria().await;
        let (cliente_id, bebida_id, _) = carrinho_com_latte(&pool).await;

        let bo = PedidoBO::new(&pool);
        bo.adicionar_ao_carrinho(
            cliente_id,
            &NovoItemCarrinho {
                bebida_id,
                quantidade: 1,
                personalizacoes: vec![],
                observacoes: None,
            },
        )
        .await
        .unwrap();
        let pedido_id = bo
            .criar_pedido(cliente_id, MetodoPagamento::Dinheiro, None)
            .await
            .unwrap();

        let transicao = bo.cancelar_pedido(pedido_id).await.unwrap();
        assert_eq!(transicao.estado_anterior, StatusPedido::Recebido);
        assert_eq!(transicao.estado_novo, StatusPedido::Cancelado);

        let detalhe = bo.detalhar_pedido(pedido_id).await.unwrap();
        assert_eq!(detalhe.historico.len(), 2);
        assert_eq!(detalhe.historico[1].status_novo, StatusPedido::Cancelado);
        assert_eq!(
            detalhe.historico[1].status_anterior,
            Some(StatusPedido::Recebido)
        );
    }

    #[actix_web::test]
    async fn item_de_outro_cliente_e_acesso_negado() {
        let pool = pool_em_memoria().await;
        let (cliente_id, bebida_id, _) = carrinho_com_latte(&pool).await;
        let intruso_id = inserir_cliente(&pool, "Intruso", "intruso@email.com").await;

        let bo = PedidoBO::new(&pool);
        let carrinho = bo
            .adicionar_ao_carrinho(
                cliente_id,
                &NovoItemCarrinho {
                    bebida_id,
                    quantidade: 1,
                    personalizacoes: vec![],
                    observacoes: None,
                },
            )
            .await
            .unwrap();
        let item_id = carrinho.itens[0].id;

        let resultado = bo.remover_item_carrinho(intruso_id, item_id).await;
        assert!(matches!(resultado, Err(ErroCafeteria::AcessoNegado(_))));
    }
}
