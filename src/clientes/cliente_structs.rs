// src/clientes/cliente_structs.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Papel do usuário: cliente comum ou equipe da cafeteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TipoUsuario {
    Cliente,
    Staff,
}

/// Estrutura que representa um cliente no banco de dados.
/// A senha é armazenada apenas como hash bcrypt.
#[derive(Debug, Clone, FromRow)]
pub struct Cliente {
    pub id: i64,
    pub nome: String,
    pub email: String,
    pub senha_hash: String,
    pub tipo_usuario: TipoUsuario,
    pub pontos_fidelidade: i64,
    pub created_at: Option<NaiveDateTime>,
}

/// Estrutura para receber dados de cadastro.
#[derive(Deserialize)]
pub struct NovoCliente {
    pub nome: String,
    pub email: String,
    pub senha: String, // Senha em texto claro (hashed antes de salvar)
    #[serde(default = "padrao_tipo_usuario")]
    pub tipo_usuario: TipoUsuario,
}

fn padrao_tipo_usuario() -> TipoUsuario {
    TipoUsuario::Cliente
}

/// Estrutura para receber dados de login.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub senha: String,
}

/// Payload do JWT (Claims).
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,              // ID do cliente
    pub nome: String,
    pub email: String,
    pub tipo: TipoUsuario,     // Papel usado no controle de acesso
    pub exp: i64,              // Expiração (timestamp Unix)
}

/// Dados públicos do usuário devolvidos pela API.
#[derive(Serialize)]
pub struct UsuarioResponse {
    pub id: i64,
    pub nome: String,
    pub email: String,
    pub tipo_usuario: TipoUsuario,
    pub pontos_fidelidade: i64,
}

impl From<&Cliente> for UsuarioResponse {
    fn from(cliente: &Cliente) -> Self {
        UsuarioResponse {
            id: cliente.id,
            nome: cliente.nome.clone(),
            email: cliente.email.clone(),
            tipo_usuario: cliente.tipo_usuario,
            pontos_fidelidade: cliente.pontos_fidelidade,
        }
    }
}

/// Resposta de login/cadastro com o token JWT.
#[derive(Serialize)]
pub struct AuthResponse {
    pub status: String,
    pub message: String,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64, // segundos
    pub user: UsuarioResponse,
}
