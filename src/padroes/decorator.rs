// src/padroes/decorator.rs
//
// Padrão Decorator: uma bebida base é envolvida por zero ou mais
// personalizações. Cada camada soma um acréscimo fixo ao preço e
// concatena um fragmento à descrição, mantendo o mesmo contrato
// (`ComponenteBebida`) da bebida nua.

use crate::bebidas::bebida_structs::TipoBebida;
use crate::personalizacoes::personalizacao_structs::Personalizacao;

/// Contrato comum entre a bebida base e qualquer camada de personalização.
pub trait ComponenteBebida {
    fn descricao(&self) -> String;
    fn preco(&self) -> f64;
    fn tipo(&self) -> TipoBebida;
}

/// Componente concreto: a bebida como consta no cardápio.
pub struct BebidaBase {
    nome: String,
    preco: f64,
    tipo: TipoBebida,
    descricao: String,
}

impl BebidaBase {
    pub fn new(nome: &str, preco: f64, tipo: TipoBebida, descricao: Option<&str>) -> Self {
        BebidaBase {
            nome: nome.to_string(),
            preco,
            tipo,
            // Sem descrição cadastrada, o nome serve de descrição.
            descricao: descricao.filter(|d| !d.is_empty()).unwrap_or(nome).to_string(),
        }
    }

    pub fn nome(&self) -> &str {
        &self.nome
    }
}

impl ComponenteBebida for BebidaBase {
    fn descricao(&self) -> String {
        self.descricao.clone()
    }

    fn preco(&self) -> f64 {
        self.preco
    }

    fn tipo(&self) -> TipoBebida {
        self.tipo
    }
}

/// Decorator genérico: envolve qualquer `ComponenteBebida` com uma
/// personalização cadastrada no banco (nome + acréscimo de preço).
pub struct BebidaPersonalizada {
    interna: Box<dyn ComponenteBebida>,
    personalizacao: String,
    preco_adicional: f64,
}

impl BebidaPersonalizada {
    pub fn envolver(
        interna: Box<dyn ComponenteBebida>,
        personalizacao: &str,
        preco_adicional: f64,
    ) -> Self {
        BebidaPersonalizada {
            interna,
            personalizacao: personalizacao.to_string(),
            preco_adicional,
        }
    }
}

impl ComponenteBebida for BebidaPersonalizada {
    fn descricao(&self) -> String {
        format!("{} com {}", self.interna.descricao(), self.personalizacao)
    }

    fn preco(&self) -> f64 {
        self.interna.preco() + self.preco_adicional
    }

    fn tipo(&self) -> TipoBebida {
        self.interna.tipo()
    }
}

/// Aplica uma lista de personalizações sobre uma bebida, camada a camada,
/// na ordem recebida.
pub fn aplicar_personalizacoes(
    mut bebida: Box<dyn ComponenteBebida>,
    personalizacoes: &[Personalizacao],
) -> Box<dyn ComponenteBebida> {
    for pers in personalizacoes {
        bebida = Box::new(BebidaPersonalizada::envolver(
            bebida,
            &pers.nome,
            pers.preco_adicional,
        ));
    }
    bebida
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cafe() -> Box<dyn ComponenteBebida> {
        Box::new(BebidaBase::new(
            "Café",
            3.50,
            TipoBebida::Cafe,
            Some("Café tradicional"),
        ))
    }

    fn pers(id: i64, nome: &str, preco_adicional: f64) -> Personalizacao {
        Personalizacao {
            id,
            nome: nome.to_string(),
            preco_adicional,
            categoria: Some("extra".to_string()),
            bebida_id: None,
            disponivel: true,
        }
    }

    #[test]
    fn preco_soma_acrescimos_sobre_a_base() {
        let lista = vec![pers(1, "Leite de Aveia", 1.00), pers(2, "Canela", 0.50)];
        let bebida = aplicar_personalizacoes(cafe(), &lista);
        assert!((bebida.preco() - 5.00).abs() < 1e-9);
        assert_eq!(
            bebida.descricao(),
            "Café tradicional com Leite de Aveia com Canela"
        );
        assert_eq!(bebida.tipo(), TipoBebida::Cafe);
    }

    #[test]
    fn preco_independe_da_ordem_de_aplicacao() {
        let direta = vec![pers(1, "Chantilly", 1.50), pers(2, "Chocolate Extra", 1.00)];
        let inversa = vec![pers(2, "Chocolate Extra", 1.00), pers(1, "Chantilly", 1.50)];
        let a = aplicar_personalizacoes(cafe(), &direta);
        let b = aplicar_personalizacoes(cafe(), &inversa);
        assert!((a.preco() - b.preco()).abs() < 1e-9);
        assert!((a.preco() - 6.00).abs() < 1e-9);
    }

    #[test]
    fn personalizacao_sem_custo_nao_altera_preco() {
        let lista = vec![pers(5, "Sem Açúcar", 0.0)];
        let bebida = aplicar_personalizacoes(cafe(), &lista);
        assert!((bebida.preco() - 3.50).abs() < 1e-9);
        assert_eq!(bebida.descricao(), "Café tradicional com Sem Açúcar");
    }

    #[test]
    fn bebida_sem_personalizacao_mantem_contrato() {
        let bebida = aplicar_personalizacoes(cafe(), &[]);
        assert!((bebida.preco() - 3.50).abs() < 1e-9);
        assert_eq!(bebida.descricao(), "Café tradicional");
    }
}
