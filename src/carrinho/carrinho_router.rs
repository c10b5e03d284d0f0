// src/carrinho/carrinho_router.rs

use actix_web::{delete, get, post, put, web, HttpResponse};

use super::carrinho_structs::{AtualizaItemCarrinho, NovoItemCarrinho};
use crate::clientes::auth_middleware::UsuarioAutenticado;
use crate::padroes::business_object::PedidoBO;
use crate::shared::erros::ErroCafeteria;
use crate::shared::shared_structs::GenericResponse;
use crate::AppState;

/// Carrinho do cliente autenticado, com descrições compostas e totais.
#[get("/carrinho")]
pub async fn ver_carrinho(
    data: web::Data<AppState>,
    usuario: UsuarioAutenticado,
) -> Result<HttpResponse, ErroCafeteria> {
    let carrinho = PedidoBO::new(&data.db_pool).carrinho(usuario.cliente_id).await?;
    Ok(HttpResponse::Ok().json(GenericResponse::sucesso("Carrinho do cliente.", carrinho)))
}

/// Adiciona uma bebida (com personalizações) ao carrinho.
#[post("/carrinho")]
pub async fn adicionar_item(
    data: web::Data<AppState>,
    usuario: UsuarioAutenticado,
    novo_item: web::Json<NovoItemCarrinho>,
) -> Result<HttpResponse, ErroCafeteria> {
    let carrinho = PedidoBO::new(&data.db_pool)
        .adicionar_ao_carrinho(usuario.cliente_id, &novo_item)
        .await?;
    Ok(HttpResponse::Created().json(GenericResponse::sucesso(
        "Item adicionado ao carrinho!",
        carrinho,
    )))
}

/// Atualiza quantidade e personalizações de um item do carrinho.
#[put("/carrinho/{item_id}")]
pub async fn atualizar_item(
    data: web::Data<AppState>,
    usuario: UsuarioAutenticado,
    caminho: web::Path<i64>,
    dados: web::Json<AtualizaItemCarrinho>,
) -> Result<HttpResponse, ErroCafeteria> {
    let carrinho = PedidoBO::new(&data.db_pool)
        .atualizar_item_carrinho(usuario.cliente_id, caminho.into_inner(), &dados)
        .await?;
    Ok(HttpResponse::Ok().json(GenericResponse::sucesso(
        "Item do carrinho atualizado.",
        carrinho,
    )))
}

/// Remove um item do carrinho.
#[delete("/carrinho/{item_id}")]
pub async fn remover_item(
    data: web::Data<AppState>,
    usuario: UsuarioAutenticado,
    caminho: web::Path<i64>,
) -> Result<HttpResponse, ErroCafeteria> {
    let carrinho = PedidoBO::new(&data.db_pool)
        .remover_item_carrinho(usuario.cliente_id, caminho.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(GenericResponse::sucesso(
        "Item removido do carrinho.",
        carrinho,
    )))
}

/// Esvazia o carrinho do cliente.
#[delete("/carrinho")]
pub async fn limpar_carrinho(
    data: web::Data<AppState>,
    usuario: UsuarioAutenticado,
) -> Result<HttpResponse, ErroCafeteria> {
    PedidoBO::new(&data.db_pool).limpar_carrinho(usuario.cliente_id).await?;
    Ok(HttpResponse::Ok().json(GenericResponse::ok("Carrinho esvaziado.")))
}
