// src/shared/erros.rs

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use super::shared_structs::GenericResponse;

/// Erros de domínio da cafeteria, mapeados para respostas HTTP.
///
/// Cada variante carrega a mensagem que será devolvida ao cliente no
/// envelope `GenericResponse`. A conversão automática de `sqlx::Error`
/// permite propagar erros de banco com `?` nos repositórios e handlers.
#[derive(Debug, Error)]
pub enum ErroCafeteria {
    #[error("{0} não encontrado(a)")]
    NaoEncontrado(String),

    #[error("Transição de status inválida: '{de}' -> '{para}'")]
    TransicaoInvalida { de: String, para: String },

    #[error("O carrinho está vazio. Adicione itens antes de criar o pedido.")]
    CarrinhoVazio,

    #[error("Credenciais inválidas.")]
    CredenciaisInvalidas,

    #[error("Acesso negado: {0}")]
    AcessoNegado(String),

    #[error("Requisição inválida: {0}")]
    RequisicaoInvalida(String),

    #[error("Erro de banco de dados: {0}")]
    BancoDados(#[from] sqlx::Error),

    #[error("Erro interno: {0}")]
    Interno(String),
}

impl ErroCafeteria {
    /// Atalho para o erro de entidade não encontrada.
    pub fn nao_encontrado(entidade: &str) -> Self {
        ErroCafeteria::NaoEncontrado(entidade.to_string())
    }
}

impl From<bcrypt::BcryptError> for ErroCafeteria {
    fn from(e: bcrypt::BcryptError) -> Self {
        ErroCafeteria::Interno(format!("falha ao processar senha: {}", e))
    }
}

impl ResponseError for ErroCafeteria {
    fn status_code(&self) -> StatusCode {
        match self {
            ErroCafeteria::NaoEncontrado(_) => StatusCode::NOT_FOUND,
            ErroCafeteria::TransicaoInvalida { .. }
            | ErroCafeteria::CarrinhoVazio
            | ErroCafeteria::RequisicaoInvalida(_) => StatusCode::BAD_REQUEST,
            ErroCafeteria::CredenciaisInvalidas => StatusCode::UNAUTHORIZED,
            ErroCafeteria::AcessoNegado(_) => StatusCode::FORBIDDEN,
            ErroCafeteria::BancoDados(_) | ErroCafeteria::Interno(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code() == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("erro interno: {}", self);
        }
        // Erros internos não expõem detalhes do banco ao cliente.
        let mensagem = match self {
            ErroCafeteria::BancoDados(_) => "Erro interno ao acessar o banco de dados.".to_string(),
            outro => outro.to_string(),
        };
        HttpResponse::build(self.status_code()).json(GenericResponse::erro(mensagem))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_http_por_tipo_de_erro() {
        assert_eq!(
            ErroCafeteria::nao_encontrado("Pedido").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ErroCafeteria::TransicaoInvalida {
                de: "entregue".into(),
                para: "recebido".into()
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErroCafeteria::CredenciaisInvalidas.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErroCafeteria::AcessoNegado("apenas staff".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ErroCafeteria::CarrinhoVazio.status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
