// src/personalizacoes/personalizacao_router.rs

use actix_web::{get, post, web, HttpResponse};

use super::personalizacao_structs::NovaPersonalizacao;
use crate::clientes::auth_middleware::Funcionario;
use crate::padroes::business_object::ProdutoBO;
use crate::shared::erros::ErroCafeteria;
use crate::shared::shared_structs::GenericResponse;
use crate::AppState;

/// Rota pública: lista o catálogo de personalizações disponíveis.
#[get("/personalizacoes")]
pub async fn listar_personalizacoes(
    data: web::Data<AppState>,
) -> Result<HttpResponse, ErroCafeteria> {
    let personalizacoes = ProdutoBO::new(&data.db_pool).listar_personalizacoes().await?;
    Ok(HttpResponse::Ok().json(GenericResponse::sucesso(
        format!("{} personalização(ões) disponível(is).", personalizacoes.len()),
        personalizacoes,
    )))
}

/// Rota pública: personalizações válidas para uma bebida específica.
#[get("/bebidas/{id}/personalizacoes")]
pub async fn personalizacoes_da_bebida(
    data: web::Data<AppState>,
    caminho: web::Path<i64>,
) -> Result<HttpResponse, ErroCafeteria> {
    let personalizacoes = ProdutoBO::new(&data.db_pool)
        .personalizacoes_da_bebida(caminho.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(GenericResponse::sucesso(
        "Personalizações da bebida.",
        personalizacoes,
    )))
}

/// Rota da equipe: cadastra uma nova personalização no catálogo.
#[post("/personalizacoes")]
pub async fn criar_personalizacao(
    data: web::Data<AppState>,
    _staff: Funcionario,
    nova: web::Json<NovaPersonalizacao>,
) -> Result<HttpResponse, ErroCafeteria> {
    let personalizacao = ProdutoBO::new(&data.db_pool).criar_personalizacao(&nova).await?;
    Ok(HttpResponse::Created().json(GenericResponse::sucesso(
        "Personalização cadastrada com sucesso!",
        personalizacao,
    )))
}
