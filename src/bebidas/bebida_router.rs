// src/bebidas/bebida_router.rs

use actix_web::{delete, get, post, put, web, HttpResponse};

use super::bebida_structs::{AtualizaBebida, FiltroBebidas, NovaBebida};
use crate::clientes::auth_middleware::Funcionario;
use crate::padroes::business_object::ProdutoBO;
use crate::shared::erros::ErroCafeteria;
use crate::shared::shared_structs::GenericResponse;
use crate::AppState;

/// Rota pública: lista o cardápio, com filtros opcionais de tipo e
/// disponibilidade (?tipo=cafe&disponivel=true).
#[get("/bebidas")]
pub async fn listar_bebidas(
    data: web::Data<AppState>,
    filtro: web::Query<FiltroBebidas>,
) -> Result<HttpResponse, ErroCafeteria> {
    let bebidas = ProdutoBO::new(&data.db_pool)
        .listar_cardapio(filtro.tipo, filtro.disponivel)
        .await?;
    Ok(HttpResponse::Ok().json(GenericResponse::sucesso(
        format!("{} bebida(s) encontrada(s).", bebidas.len()),
        bebidas,
    )))
}

/// Rota pública: detalhe de uma bebida do cardápio.
#[get("/bebidas/{id}")]
pub async fn buscar_bebida(
    data: web::Data<AppState>,
    caminho: web::Path<i64>,
) -> Result<HttpResponse, ErroCafeteria> {
    let bebida = ProdutoBO::new(&data.db_pool)
        .buscar_bebida(caminho.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(GenericResponse::sucesso("Bebida encontrada.", bebida)))
}

/// Rota da equipe: cadastra uma nova bebida no cardápio.
#[post("/bebidas")]
pub async fn criar_bebida(
    data: web::Data<AppState>,
    _staff: Funcionario,
    nova_bebida: web::Json<NovaBebida>,
) -> Result<HttpResponse, ErroCafeteria> {
    let bebida = ProdutoBO::new(&data.db_pool).criar_bebida(&nova_bebida).await?;
    tracing::info!("bebida '{}' adicionada ao cardápio (id {})", bebida.nome, bebida.id);
    Ok(HttpResponse::Created().json(GenericResponse::sucesso(
        "Bebida cadastrada com sucesso!",
        bebida,
    )))
}

/// Rota da equipe: atualiza uma bebida do cardápio.
#[put("/bebidas/{id}")]
pub async fn atualizar_bebida(
    data: web::Data<AppState>,
    _staff: Funcionario,
    caminho: web::Path<i64>,
    dados: web::Json<AtualizaBebida>,
) -> Result<HttpResponse, ErroCafeteria> {
    let bebida = ProdutoBO::new(&data.db_pool)
        .atualizar_bebida(caminho.into_inner(), &dados)
        .await?;
    Ok(HttpResponse::Ok().json(GenericResponse::sucesso(
        "Bebida atualizada com sucesso!",
        bebida,
    )))
}

/// Rota da equipe: remove uma bebida sem pedidos associados.
#[delete("/bebidas/{id}")]
pub async fn excluir_bebida(
    data: web::Data<AppState>,
    _staff: Funcionario,
    caminho: web::Path<i64>,
) -> Result<HttpResponse, ErroCafeteria> {
    ProdutoBO::new(&data.db_pool)
        .excluir_bebida(caminho.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(GenericResponse::ok("Bebida removida do cardápio.")))
}
