// src/clientes/cliente_router.rs

use actix_web::{get, post, web, HttpResponse};
use jsonwebtoken::{encode, EncodingKey, Header};

use super::auth_middleware::UsuarioAutenticado;
use super::cliente_structs::{AuthResponse, Claims, Cliente, LoginRequest, NovoCliente, UsuarioResponse};
use crate::padroes::business_object::ClienteBO;
use crate::shared::erros::ErroCafeteria;
use crate::shared::shared_structs::GenericResponse;
use crate::AppState;

/// Validade do token de acesso, em minutos.
const EXPIRACAO_MINUTOS: i64 = 60;

/// Gera o JWT assinado para o cliente autenticado.
fn gerar_token(cliente: &Cliente, jwt_secret: &str) -> Result<String, ErroCafeteria> {
    let exp = chrono::Utc::now().timestamp() + EXPIRACAO_MINUTOS * 60;
    let claims = Claims {
        sub: cliente.id,
        nome: cliente.nome.clone(),
        email: cliente.email.clone(),
        tipo: cliente.tipo_usuario,
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_ref()),
    )
    .map_err(|e| ErroCafeteria::Interno(format!("falha ao gerar token: {}", e)))
}

fn resposta_autenticada(
    cliente: &Cliente,
    jwt_secret: &str,
    message: &str,
) -> Result<HttpResponse, ErroCafeteria> {
    let access_token = gerar_token(cliente, jwt_secret)?;
    Ok(HttpResponse::Ok().json(AuthResponse {
        status: "success".to_string(),
        message: message.to_string(),
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: EXPIRACAO_MINUTOS * 60,
        user: UsuarioResponse::from(cliente),
    }))
}

/// Rota para cadastrar um novo cliente. Devolve o token de acesso para
/// a sessão já iniciada.
#[post("/auth/cadastro")]
pub async fn cadastrar(
    data: web::Data<AppState>,
    novo_cliente: web::Json<NovoCliente>,
) -> Result<HttpResponse, ErroCafeteria> {
    let cliente = ClienteBO::new(&data.db_pool).cadastrar(&novo_cliente).await?;
    resposta_autenticada(&cliente, &data.jwt_secret, "Cadastro realizado com sucesso!")
}

/// Rota para login de cliente.
#[post("/auth/login")]
pub async fn login(
    data: web::Data<AppState>,
    login_request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ErroCafeteria> {
    let cliente = ClienteBO::new(&data.db_pool)
        .autenticar(&login_request.email, &login_request.senha)
        .await?;
    resposta_autenticada(&cliente, &data.jwt_secret, "Login bem-sucedido!")
}

/// Dados do cliente autenticado, incluindo os pontos de fidelidade
/// atuais (lidos do banco, não do token).
#[get("/auth/me")]
pub async fn perfil(
    data: web::Data<AppState>,
    usuario: UsuarioAutenticado,
) -> Result<HttpResponse, ErroCafeteria> {
    let cliente = ClienteBO::new(&data.db_pool).buscar(usuario.cliente_id).await?;
    Ok(HttpResponse::Ok().json(GenericResponse::sucesso(
        "Perfil do cliente autenticado.".to_string(),
        UsuarioResponse::from(&cliente),
    )))
}

/// Emite um novo token para o usuário autenticado, renovando a sessão.
#[post("/auth/refresh")]
pub async fn renovar_token(
    data: web::Data<AppState>,
    usuario: UsuarioAutenticado,
) -> Result<HttpResponse, ErroCafeteria> {
    let cliente = ClienteBO::new(&data.db_pool).buscar(usuario.cliente_id).await?;
    resposta_autenticada(&cliente, &data.jwt_secret, "Token renovado com sucesso!")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clientes::cliente_structs::TipoUsuario;

    fn cliente_de_teste() -> Cliente {
        Cliente {
            id: 7,
            nome: "Maria".to_string(),
            email: "maria@email.com".to_string(),
            senha_hash: "hash".to_string(),
            tipo_usuario: TipoUsuario::Cliente,
            pontos_fidelidade: 0,
            created_at: None,
        }
    }

    #[test]
    fn token_gerado_e_valido_para_o_extrator() {
        use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

        let cliente = cliente_de_teste();
        let token = gerar_token(&cliente, "segredo-de-teste").unwrap();

        let dados = decode::<Claims>(
            &token,
            &DecodingKey::from_secret("segredo-de-teste".as_ref()),
            &Validation::new(Algorithm::HS256),
        )
        .unwrap();
        assert_eq!(dados.claims.sub, 7);
        assert_eq!(dados.claims.tipo, TipoUsuario::Cliente);
        assert!(dados.claims.exp > chrono::Utc::now().timestamp());
    }

    #[test]
    fn token_rejeitado_com_outra_chave() {
        use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

        let token = gerar_token(&cliente_de_teste(), "chave-a").unwrap();
        let resultado = decode::<Claims>(
            &token,
            &DecodingKey::from_secret("chave-b".as_ref()),
            &Validation::new(Algorithm::HS256),
        );
        assert!(resultado.is_err());
    }
}
