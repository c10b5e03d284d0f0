// src/clientes/auth_middleware.rs

use actix_web::{
    dev::Payload,
    error::{ErrorForbidden, ErrorUnauthorized},
    web, FromRequest, HttpRequest,
};

use futures::future::{ready, Ready};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use super::cliente_structs::{Claims, TipoUsuario};
use crate::AppState;

/// Usuário autenticado, extraído das claims do JWT nas rotas protegidas.
#[derive(Debug, Clone)]
pub struct UsuarioAutenticado {
    pub cliente_id: i64,
    pub nome: String,
    pub email: String,
    pub tipo: TipoUsuario,
}

impl UsuarioAutenticado {
    pub fn e_staff(&self) -> bool {
        self.tipo == TipoUsuario::Staff
    }
}

/// Extrator de autenticação: valida o token JWT do cabeçalho
/// Authorization ("Bearer <token>") contra a chave do AppState.
impl FromRequest for UsuarioAutenticado {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let app_state = req.app_data::<web::Data<AppState>>();

        let jwt_secret = match app_state {
            Some(state) => state.jwt_secret.clone(),
            None => {
                tracing::error!("AppState indisponível no extrator de autenticação");
                return ready(Err(ErrorUnauthorized("Erro de configuração do servidor.")));
            }
        };

        let auth_header = req.headers().get("Authorization");

        let token = match auth_header {
            Some(header_value) => {
                let header_str = match header_value.to_str() {
                    Ok(s) => s,
                    Err(_) => {
                        return ready(Err(ErrorUnauthorized("Token de autenticação inválido.")))
                    }
                };

                if header_str.starts_with("Bearer ") {
                    header_str.trim_start_matches("Bearer ").to_string()
                } else {
                    return ready(Err(ErrorUnauthorized(
                        "Formato de token inválido. Esperado 'Bearer <token>'.",
                    )));
                }
            }
            None => {
                return ready(Err(ErrorUnauthorized("Token de autenticação ausente.")));
            }
        };

        let validation = Validation::new(Algorithm::HS256);

        let token_data = match decode::<Claims>(
            &token,
            &DecodingKey::from_secret(jwt_secret.as_ref()),
            &validation,
        ) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("falha ao validar JWT: {:?}", e);
                let mensagem = match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => "Token expirado.",
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        "Assinatura do token inválida."
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => "Token malformado.",
                    _ => "Token de autenticação inválido.",
                };
                return ready(Err(ErrorUnauthorized(mensagem)));
            }
        };

        ready(Ok(UsuarioAutenticado {
            cliente_id: token_data.claims.sub,
            nome: token_data.claims.nome,
            email: token_data.claims.email,
            tipo: token_data.claims.tipo,
        }))
    }
}

/// Extrator para rotas restritas à equipe: autentica e exige o papel
/// staff, respondendo 403 para clientes comuns.
#[derive(Debug, Clone)]
pub struct Funcionario(pub UsuarioAutenticado);

impl FromRequest for Funcionario {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let usuario = UsuarioAutenticado::from_request(req, payload).into_inner();
        ready(match usuario {
            Ok(usuario) if usuario.e_staff() => Ok(Funcionario(usuario)),
            Ok(_) => Err(ErrorForbidden(
                "Acesso restrito à equipe da cafeteria.",
            )),
            Err(e) => Err(e),
        })
    }
}
