// src/main.rs

use actix_web::{web, App, HttpServer};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::sync::RwLock;
use tracing_subscriber::EnvFilter;

// Importa os módulos da aplicação. O Rust encontrará o arquivo
// `src/<modulo>/mod.rs` e, a partir dele, os submódulos.
mod bebidas;          // Cardápio de bebidas
mod carrinho;         // Carrinho de compras
mod clientes;         // Cadastro, login e autenticação
mod dao;              // Schema, seeds e repositórios
mod padroes;          // Padrões de projeto (Decorator, State, ...)
mod pedidos;          // Pedidos, comandos e painel da cozinha
mod personalizacoes;  // Catálogo de personalizações
mod shared;           // Erros e respostas compartilhadas

use padroes::command::InvocadorComandos;

// Estado compartilhado: pool de conexões SQLite e a chave secreta JWT.
pub struct AppState {
    pub db_pool: Pool<Sqlite>,
    pub jwt_secret: String,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // `mode=rwc` cria o arquivo do banco no primeiro boot.
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://cafeteria.db?mode=rwc".to_string());
    let jwt_secret = std::env::var("JWT_SECRET")
        .unwrap_or_else(|_| "chave_secreta_da_cafeteria_para_testes".to_string());
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Falha ao conectar ao banco SQLite");

    dao::db::init_db(&db_pool)
        .await
        .expect("Falha ao criar o schema do banco");
    dao::db::run_seeds(&db_pool)
        .await
        .expect("Falha ao popular os dados iniciais");

    let app_state = web::Data::new(AppState { db_pool, jwt_secret });

    // Histórico de comandos (desfazer/refazer) em memória, compartilhado
    // entre os workers. RwLock permite múltiplos leitores ou um escritor.
    let invocador_state = web::Data::new(RwLock::new(InvocadorComandos::new()));

    tracing::info!("Iniciando API da Cafeteria em {}...", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(invocador_state.clone())

            // Módulo de Clientes (autenticação)
            .service(clientes::cliente_router::cadastrar)
            .service(clientes::cliente_router::login)
            .service(clientes::cliente_router::perfil)
            .service(clientes::cliente_router::renovar_token)

            // Módulo de Bebidas (cardápio)
            .service(bebidas::bebida_router::listar_bebidas)
            .service(personalizacoes::personalizacao_router::personalizacoes_da_bebida)
            .service(bebidas::bebida_router::buscar_bebida)
            .service(bebidas::bebida_router::criar_bebida)
            .service(bebidas::bebida_router::atualizar_bebida)
            .service(bebidas::bebida_router::excluir_bebida)

            // Módulo de Personalizações
            .service(personalizacoes::personalizacao_router::listar_personalizacoes)
            .service(personalizacoes::personalizacao_router::criar_personalizacao)

            // Módulo de Carrinho
            .service(carrinho::carrinho_router::ver_carrinho)
            .service(carrinho::carrinho_router::adicionar_item)
            .service(carrinho::carrinho_router::atualizar_item)
            .service(carrinho::carrinho_router::remover_item)
            .service(carrinho::carrinho_router::limpar_carrinho)

            // Módulo de Pedidos
            .service(pedidos::pedido_router::criar_pedido)
            .service(pedidos::pedido_router::listar_meus_pedidos)
            .service(pedidos::pedido_router::listar_todos_pedidos)
            .service(pedidos::pedido_router::buscar_pedido)
            .service(pedidos::pedido_router::avancar_estado)
            .service(pedidos::pedido_router::alterar_status)
            .service(pedidos::pedido_router::cancelar_pedido)

            // Comandos (desfazer/refazer)
            .service(pedidos::pedido_router::desfazer_comando)
            .service(pedidos::pedido_router::refazer_comando)
            .service(pedidos::pedido_router::historico_comandos)

            // Administração e utilidades
            .service(pedidos::pedido_router::estatisticas)
            .service(pedidos::pedido_router::demo_decorator)
            .service(pedidos::pedido_router::health)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
