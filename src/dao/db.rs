// src/dao/db.rs
//
// Criação do schema SQLite e seeds de primeiro boot (cardápio,
// catálogo de personalizações e uma conta staff).

use sqlx::{Pool, Sqlite};

use crate::bebidas::bebida_structs::TipoBebida;
use crate::shared::erros::ErroCafeteria;

/// Instruções de criação do schema. Executadas uma a uma porque o
/// driver prepara uma instrução por chamada.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS clientes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        nome TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        senha_hash TEXT NOT NULL,
        tipo_usuario TEXT NOT NULL DEFAULT 'cliente',
        pontos_fidelidade INTEGER NOT NULL DEFAULT 0,
        created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
    )",
    "CREATE TABLE IF NOT EXISTS bebidas (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        nome TEXT NOT NULL,
        preco_base REAL NOT NULL,
        tipo TEXT NOT NULL,
        descricao TEXT,
        disponivel INTEGER NOT NULL DEFAULT 1,
        created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
    )",
    "CREATE TABLE IF NOT EXISTS personalizacoes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        nome TEXT NOT NULL,
        preco_adicional REAL NOT NULL DEFAULT 0,
        categoria TEXT,
        bebida_id INTEGER REFERENCES bebidas(id),
        disponivel INTEGER NOT NULL DEFAULT 1
    )",
    "CREATE TABLE IF NOT EXISTS itens_carrinho (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        cliente_id INTEGER NOT NULL REFERENCES clientes(id),
        bebida_id INTEGER NOT NULL REFERENCES bebidas(id),
        quantidade INTEGER NOT NULL DEFAULT 1,
        preco_unitario REAL NOT NULL,
        observacoes TEXT,
        created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
    )",
    "CREATE TABLE IF NOT EXISTS itens_carrinho_personalizacoes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        item_carrinho_id INTEGER NOT NULL REFERENCES itens_carrinho(id),
        personalizacao_id INTEGER NOT NULL REFERENCES personalizacoes(id)
    )",
    "CREATE TABLE IF NOT EXISTS pedidos (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        cliente_id INTEGER NOT NULL REFERENCES clientes(id),
        total REAL NOT NULL,
        desconto REAL NOT NULL DEFAULT 0,
        total_final REAL NOT NULL,
        status TEXT NOT NULL DEFAULT 'recebido',
        metodo_pagamento TEXT NOT NULL,
        observacoes TEXT,
        created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
    )",
    "CREATE TABLE IF NOT EXISTS itens_pedido (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        pedido_id INTEGER NOT NULL REFERENCES pedidos(id),
        bebida_id INTEGER NOT NULL REFERENCES bebidas(id),
        quantidade INTEGER NOT NULL,
        preco_unitario REAL NOT NULL,
        subtotal REAL NOT NULL,
        observacoes TEXT
    )",
    "CREATE TABLE IF NOT EXISTS itens_pedido_personalizacoes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        item_pedido_id INTEGER NOT NULL REFERENCES itens_pedido(id),
        personalizacao_id INTEGER NOT NULL REFERENCES personalizacoes(id)
    )",
    "CREATE TABLE IF NOT EXISTS historico_pedidos (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        pedido_id INTEGER NOT NULL REFERENCES pedidos(id),
        status_anterior TEXT,
        status_novo TEXT NOT NULL,
        observacao TEXT,
        timestamp DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
    )",
];

/// Cria as tabelas do sistema, se ainda não existirem.
pub async fn init_db(pool: &Pool<Sqlite>) -> Result<(), ErroCafeteria> {
    for instrucao in SCHEMA {
        sqlx::query(instrucao).execute(pool).await?;
    }
    Ok(())
}

/// Cardápio inicial: (nome, preço base, tipo, descrição).
const CARDAPIO_INICIAL: &[(&str, f64, TipoBebida, &str)] = &[
    ("Espresso", 3.50, TipoBebida::Cafe, "Café espresso tradicional"),
    ("Americano", 4.00, TipoBebida::Cafe, "Café americano suave"),
    ("Cappuccino", 5.50, TipoBebida::Cafe, "Cappuccino cremoso"),
    ("Latte", 6.00, TipoBebida::Cafe, "Café latte com leite vaporizado"),
    ("Mocha", 6.50, TipoBebida::Cafe, "Café mocha com chocolate"),
    ("Chá Verde", 3.00, TipoBebida::Cha, "Chá verde antioxidante"),
    ("Chá Preto", 3.00, TipoBebida::Cha, "Chá preto tradicional"),
    ("Chá de Camomila", 3.50, TipoBebida::Cha, "Chá de camomila relaxante"),
    ("Earl Grey", 4.00, TipoBebida::Cha, "Chá Earl Grey com bergamota"),
    ("Chocolate Quente", 5.00, TipoBebida::Chocolate, "Chocolate quente cremoso"),
    ("Suco de Laranja", 4.50, TipoBebida::Suco, "Suco de laranja natural"),
    ("Suco de Maçã", 4.50, TipoBebida::Suco, "Suco de maçã natural"),
    ("Suco Verde", 5.00, TipoBebida::Suco, "Suco verde detox"),
];

/// Catálogo de personalizações: (nome, preço adicional, categoria).
const PERSONALIZACOES_INICIAIS: &[(&str, f64, &str)] = &[
    ("Leite de Aveia", 1.00, "leite"),
    ("Leite de Amêndoa", 1.20, "leite"),
    ("Leite de Soja", 0.80, "leite"),
    ("Leite Desnatado", 0.50, "leite"),
    ("Sem Açúcar", 0.00, "adocante"),
    ("Açúcar Mascavo", 0.30, "adocante"),
    ("Stevia", 0.50, "adocante"),
    ("Xilitol", 0.70, "adocante"),
    ("Canela", 0.50, "extra"),
    ("Chocolate Extra", 1.00, "extra"),
    ("Chantilly", 1.50, "extra"),
    ("Caramelo", 1.00, "extra"),
    ("Baunilha", 0.80, "extra"),
    ("Tamanho Grande", 2.00, "tamanho"),
    ("Dose Extra", 1.50, "extra"),
];

/// Uma personalização só vale para bebidas compatíveis: leites e doses
/// para cafés, canela para cafés e chás, adoçantes e tamanho para todas.
fn compativel(nome: &str, categoria: &str, tipo: TipoBebida) -> bool {
    match categoria {
        "leite" => tipo == TipoBebida::Cafe,
        "adocante" | "tamanho" => true,
        "extra" => match nome {
            "Canela" => matches!(tipo, TipoBebida::Cafe | TipoBebida::Cha),
            "Chocolate Extra" | "Chantilly" | "Dose Extra" => {
                matches!(tipo, TipoBebida::Cafe | TipoBebida::Chocolate)
            }
            "Caramelo" | "Baunilha" => matches!(tipo, TipoBebida::Cafe | TipoBebida::Chocolate),
            _ => true,
        },
        _ => true,
    }
}

/// Popula cardápio, personalizações e a conta staff no primeiro boot.
/// Idempotente: não insere nada se já houver dados.
pub async fn run_seeds(pool: &Pool<Sqlite>) -> Result<(), ErroCafeteria> {
    let bebidas_existentes: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bebidas")
        .fetch_one(pool)
        .await?;

    if bebidas_existentes == 0 {
        tracing::info!("populando cardápio inicial...");
        for (nome, preco, tipo, descricao) in CARDAPIO_INICIAL {
            let bebida_id = sqlx::query(
                "INSERT INTO bebidas (nome, preco_base, tipo, descricao) VALUES (?, ?, ?, ?)",
            )
            .bind(nome)
            .bind(preco)
            .bind(tipo)
            .bind(descricao)
            .execute(pool)
            .await?
            .last_insert_rowid();

            for (pers_nome, preco_adicional, categoria) in PERSONALIZACOES_INICIAIS {
                if compativel(pers_nome, categoria, *tipo) {
                    sqlx::query(
                        "INSERT INTO personalizacoes (nome, preco_adicional, categoria, bebida_id)
                         VALUES (?, ?, ?, ?)",
                    )
                    .bind(pers_nome)
                    .bind(preco_adicional)
                    .bind(categoria)
                    .bind(bebida_id)
                    .execute(pool)
                    .await?;
                }
            }
        }
    }

    let staff_existente: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM clientes WHERE tipo_usuario = 'staff'")
            .fetch_one(pool)
            .await?;

    if staff_existente == 0 {
        tracing::info!("criando conta staff inicial (staff@cafeteria.com)...");
        let senha_hash = bcrypt::hash("123456", bcrypt::DEFAULT_COST)?;
        sqlx::query(
            "INSERT INTO clientes (nome, email, senha_hash, tipo_usuario)
             VALUES ('Atendente', 'staff@cafeteria.com', ?, 'staff')",
        )
        .bind(senha_hash)
        .execute(pool)
        .await?;
    }

    Ok(())
}

#[cfg(test)]
pub mod teste {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    /// Pool em memória com uma única conexão (cada conexão `:memory:`
    /// teria um banco próprio) e schema criado.
    pub async fn pool_em_memoria() -> Pool<Sqlite> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("falha ao abrir sqlite em memória");
        init_db(&pool).await.expect("falha ao criar schema");
        pool
    }

    /// Insere um cliente direto no banco e devolve o id.
    pub async fn inserir_cliente(pool: &Pool<Sqlite>, nome: &str, email: &str) -> i64 {
        sqlx::query(
            "INSERT INTO clientes (nome, email, senha_hash) VALUES (?, ?, 'hash-de-teste')",
        )
        .bind(nome)
        .bind(email)
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid()
    }

    /// Insere uma bebida direto no banco e devolve o id.
    pub async fn inserir_bebida(pool: &Pool<Sqlite>, nome: &str, preco: f64) -> i64 {
        sqlx::query("INSERT INTO bebidas (nome, preco_base, tipo, descricao) VALUES (?, ?, 'cafe', ?)")
            .bind(nome)
            .bind(preco)
            .bind(nome)
            .execute(pool)
            .await
            .unwrap()
            .last_insert_rowid()
    }

    /// Insere uma personalização direto no banco e devolve o id.
    pub async fn inserir_personalizacao(pool: &Pool<Sqlite>, nome: &str, preco: f64) -> i64 {
        sqlx::query("INSERT INTO personalizacoes (nome, preco_adicional, categoria) VALUES (?, ?, 'extra')")
            .bind(nome)
            .bind(preco)
            .execute(pool)
            .await
            .unwrap()
            .last_insert_rowid()
    }
}
