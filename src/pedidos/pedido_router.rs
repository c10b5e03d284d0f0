// src/pedidos/pedido_router.rs

use std::sync::RwLock;

use actix_web::{get, patch, post, web, HttpResponse};

use super::pedido_structs::{AlteraStatusPedido, FiltroPedidos, NovoPedido};
use crate::bebidas::bebida_structs::TipoBebida;
use crate::clientes::auth_middleware::{Funcionario, UsuarioAutenticado};
use crate::padroes::business_object::PedidoBO;
use crate::padroes::command::{ComandoPedido, InvocadorComandos};
use crate::padroes::decorator::{aplicar_personalizacoes, ComponenteBebida};
use crate::padroes::factory::criar_bebida_padrao;
use crate::padroes::strategy::arredondar;
use crate::personalizacoes::personalizacao_structs::Personalizacao;
use crate::shared::erros::ErroCafeteria;
use crate::shared::shared_structs::GenericResponse;
use crate::AppState;

type Invocador = web::Data<RwLock<InvocadorComandos>>;

/// Fecha o carrinho do cliente em um pedido. A operação passa pelo
/// invocador de comandos para poder ser desfeita.
#[post("/pedidos")]
pub async fn criar_pedido(
    data: web::Data<AppState>,
    invocador: Invocador,
    usuario: UsuarioAutenticado,
    novo_pedido: web::Json<NovoPedido>,
) -> Result<HttpResponse, ErroCafeteria> {
    let mut comando = ComandoPedido::criar_pedido(
        usuario.cliente_id,
        novo_pedido.metodo_pagamento,
        novo_pedido.observacoes.clone(),
    );
    let pedido_id = comando.executar(&data.db_pool).await?;
    invocador.write().unwrap().registrar(comando);

    let detalhe = PedidoBO::new(&data.db_pool).detalhar_pedido(pedido_id).await?;
    Ok(HttpResponse::Created().json(GenericResponse::sucesso(
        "Pedido criado com sucesso!",
        detalhe,
    )))
}

/// Pedidos do cliente autenticado, com filtro opcional de status e
/// paginação (?status=recebido&skip=0&limit=100).
#[get("/pedidos")]
pub async fn listar_meus_pedidos(
    data: web::Data<AppState>,
    usuario: UsuarioAutenticado,
    filtro: web::Query<FiltroPedidos>,
) -> Result<HttpResponse, ErroCafeteria> {
    let pedidos = PedidoBO::new(&data.db_pool)
        .listar_pedidos(Some(usuario.cliente_id), &filtro)
        .await?;
    Ok(HttpResponse::Ok().json(GenericResponse::sucesso(
        format!("{} pedido(s) encontrado(s).", pedidos.len()),
        pedidos,
    )))
}

/// Painel da cozinha: todos os pedidos, de todos os clientes.
#[get("/pedidos/cozinha/todos")]
pub async fn listar_todos_pedidos(
    data: web::Data<AppState>,
    _staff: Funcionario,
    filtro: web::Query<FiltroPedidos>,
) -> Result<HttpResponse, ErroCafeteria> {
    let pedidos = PedidoBO::new(&data.db_pool).listar_pedidos(None, &filtro).await?;
    Ok(HttpResponse::Ok().json(GenericResponse::sucesso(
        format!("{} pedido(s) encontrado(s).", pedidos.len()),
        pedidos,
    )))
}

/// Detalhe de um pedido (itens, personalizações e histórico). O dono do
/// pedido e a equipe podem consultar.
#[get("/pedidos/{id}")]
pub async fn buscar_pedido(
    data: web::Data<AppState>,
    usuario: UsuarioAutenticado,
    caminho: web::Path<i64>,
) -> Result<HttpResponse, ErroCafeteria> {
    let detalhe = PedidoBO::new(&data.db_pool)
        .detalhar_pedido(caminho.into_inner())
        .await?;
    if detalhe.pedido.cliente_id != usuario.cliente_id && !usuario.e_staff() {
        return Err(ErroCafeteria::AcessoNegado(
            "o pedido pertence a outro cliente".into(),
        ));
    }
    Ok(HttpResponse::Ok().json(GenericResponse::sucesso("Detalhes do pedido.", detalhe)))
}

/// Rota da equipe: avança o pedido para o próximo estado da sequência
/// (recebido -> em_preparo -> pronto -> entregue), via comando.
#[post("/pedidos/{id}/avancar-estado")]
pub async fn avancar_estado(
    data: web::Data<AppState>,
    invocador: Invocador,
    _staff: Funcionario,
    caminho: web::Path<i64>,
) -> Result<HttpResponse, ErroCafeteria> {
    let mut comando = ComandoPedido::avancar_estado(caminho.into_inner());
    let pedido_id = comando.executar(&data.db_pool).await?;
    invocador.write().unwrap().registrar(comando);

    let pedido = PedidoBO::new(&data.db_pool).buscar_pedido(pedido_id).await?;
    Ok(HttpResponse::Ok().json(GenericResponse::sucesso(
        format!("Pedido avançou para '{}'.", pedido.status.exibicao()),
        pedido,
    )))
}

/// Rota da equipe: transição explícita de status, validada contra o
/// grafo de transições permitidas.
#[patch("/pedidos/{id}/status")]
pub async fn alterar_status(
    data: web::Data<AppState>,
    _staff: Funcionario,
    caminho: web::Path<i64>,
    dados: web::Json<AlteraStatusPedido>,
) -> Result<HttpResponse, ErroCafeteria> {
    let transicao = PedidoBO::new(&data.db_pool)
        .alterar_status(caminho.into_inner(), dados.novo_status)
        .await?;
    Ok(HttpResponse::Ok().json(GenericResponse::sucesso(
        format!(
            "Status alterado de '{}' para '{}'.",
            transicao.estado_anterior.exibicao(),
            transicao.estado_novo.exibicao()
        ),
        transicao,
    )))
}

/// Cancela um pedido ainda não pronto. O dono do pedido e a equipe
/// podem cancelar; a operação passa pelo invocador de comandos.
#[post("/pedidos/{id}/cancelar")]
pub async fn cancelar_pedido(
    data: web::Data<AppState>,
    invocador: Invocador,
    usuario: UsuarioAutenticado,
    caminho: web::Path<i64>,
) -> Result<HttpResponse, ErroCafeteria> {
    let pedido_id = caminho.into_inner();
    let bo = PedidoBO::new(&data.db_pool);

    let pedido = bo.buscar_pedido(pedido_id).await?;
    if pedido.cliente_id != usuario.cliente_id && !usuario.e_staff() {
        return Err(ErroCafeteria::AcessoNegado(
            "o pedido pertence a outro cliente".into(),
        ));
    }

    let mut comando = ComandoPedido::cancelar_pedido(pedido_id);
    comando.executar(&data.db_pool).await?;
    invocador.write().unwrap().registrar(comando);

    let pedido = bo.buscar_pedido(pedido_id).await?;
    Ok(HttpResponse::Ok().json(GenericResponse::sucesso(
        "Pedido cancelado.",
        pedido,
    )))
}

/// Rota da equipe: desfaz o comando mais recente do histórico.
#[post("/comandos/desfazer")]
pub async fn desfazer_comando(
    data: web::Data<AppState>,
    invocador: Invocador,
    _staff: Funcionario,
) -> Result<HttpResponse, ErroCafeteria> {
    let comando = invocador
        .read()
        .unwrap()
        .comando_para_desfazer()
        .ok_or_else(|| {
            ErroCafeteria::RequisicaoInvalida("não há comandos para desfazer".into())
        })?;

    comando.desfazer(&data.db_pool).await?;
    invocador.write().unwrap().confirmar_desfazer();

    Ok(HttpResponse::Ok().json(GenericResponse::ok(format!(
        "Comando '{}' desfeito.",
        comando.nome()
    ))))
}

/// Rota da equipe: re-executa o comando desfeito mais recente.
#[post("/comandos/refazer")]
pub async fn refazer_comando(
    data: web::Data<AppState>,
    invocador: Invocador,
    _staff: Funcionario,
) -> Result<HttpResponse, ErroCafeteria> {
    let mut comando = invocador
        .read()
        .unwrap()
        .comando_para_refazer()
        .ok_or_else(|| {
            ErroCafeteria::RequisicaoInvalida("não há comandos para refazer".into())
        })?;

    let pedido_id = comando.executar(&data.db_pool).await?;
    let nome = comando.nome();
    invocador.write().unwrap().confirmar_refazer(comando);

    Ok(HttpResponse::Ok().json(GenericResponse::sucesso(
        format!("Comando '{}' refeito.", nome),
        serde_json::json!({ "pedido_id": pedido_id }),
    )))
}

/// Rota da equipe: histórico de comandos, com a posição do cursor.
#[get("/comandos/historico")]
pub async fn historico_comandos(
    invocador: Invocador,
    _staff: Funcionario,
) -> Result<HttpResponse, ErroCafeteria> {
    let registros = invocador.read().unwrap().registros();
    Ok(HttpResponse::Ok().json(GenericResponse::sucesso(
        format!("{} comando(s) no histórico.", registros.len()),
        registros,
    )))
}

/// Rota da equipe: contadores do painel administrativo.
#[get("/stats")]
pub async fn estatisticas(
    data: web::Data<AppState>,
    _staff: Funcionario,
) -> Result<HttpResponse, ErroCafeteria> {
    let stats = PedidoBO::new(&data.db_pool).estatisticas().await?;
    Ok(HttpResponse::Ok().json(GenericResponse::sucesso(
        "Estatísticas da cafeteria.",
        stats,
    )))
}

/// Rota pública de demonstração: monta um cappuccino decorado camada a
/// camada e devolve o preço e a descrição compostos.
#[get("/demo/decorator")]
pub async fn demo_decorator() -> HttpResponse {
    let exemplo = [
        Personalizacao {
            id: 0,
            nome: "Leite de Aveia".to_string(),
            preco_adicional: 1.00,
            categoria: Some("leite".to_string()),
            bebida_id: None,
            disponivel: true,
        },
        Personalizacao {
            id: 0,
            nome: "Canela".to_string(),
            preco_adicional: 0.50,
            categoria: Some("extra".to_string()),
            bebida_id: None,
            disponivel: true,
        },
    ];
    let base = criar_bebida_padrao(TipoBebida::Cafe);
    let preco_base = base.preco();
    let bebida = aplicar_personalizacoes(Box::new(base), &exemplo);

    HttpResponse::Ok().json(GenericResponse::sucesso(
        "Exemplo de bebida montada com o padrão Decorator.",
        serde_json::json!({
            "descricao": bebida.descricao(),
            "preco_base": preco_base,
            "preco_final": arredondar(bebida.preco()),
            "camadas": ["Café", "Leite de Aveia", "Canela"],
        }),
    ))
}

/// Verificação de saúde: responde 200 se o banco estiver acessível.
#[get("/health")]
pub async fn health(data: web::Data<AppState>) -> Result<HttpResponse, ErroCafeteria> {
    sqlx::query("SELECT 1").execute(&data.db_pool).await?;
    Ok(HttpResponse::Ok().json(GenericResponse::ok("Cafeteria operacional.")))
}
