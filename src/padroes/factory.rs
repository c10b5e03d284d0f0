// src/padroes/factory.rs
//
// Factory Method para bebidas base: cada tipo do cardápio sabe criar a
// sua bebida padrão (nome, preço e descrição tradicionais da casa).

use crate::bebidas::bebida_structs::{Bebida, TipoBebida};

use super::decorator::BebidaBase;

/// Cria a bebida padrão de um tipo, com os valores tradicionais da casa.
pub fn criar_bebida_padrao(tipo: TipoBebida) -> BebidaBase {
    match tipo {
        TipoBebida::Cafe => BebidaBase::new("Café", 3.50, tipo, Some("Café tradicional")),
        TipoBebida::Cha => BebidaBase::new("Chá", 3.00, tipo, Some("Chá tradicional")),
        TipoBebida::Chocolate => BebidaBase::new("Chocolate", 5.00, tipo, Some("Chocolate quente")),
        TipoBebida::Suco => BebidaBase::new("Suco", 4.50, tipo, Some("Suco natural")),
    }
}

/// Constrói o componente base do Decorator a partir de um registro do
/// cardápio (tabela `bebidas`).
pub fn bebida_do_cardapio(bebida: &Bebida) -> BebidaBase {
    BebidaBase::new(
        &bebida.nome,
        bebida.preco_base,
        bebida.tipo,
        bebida.descricao.as_deref(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::padroes::decorator::ComponenteBebida;

    #[test]
    fn bebidas_padrao_por_tipo() {
        let cafe = criar_bebida_padrao(TipoBebida::Cafe);
        assert_eq!(cafe.nome(), "Café");
        assert!((cafe.preco() - 3.50).abs() < 1e-9);

        let chocolate = criar_bebida_padrao(TipoBebida::Chocolate);
        assert!((chocolate.preco() - 5.00).abs() < 1e-9);
        assert_eq!(chocolate.tipo(), TipoBebida::Chocolate);
    }

    #[test]
    fn registro_do_cardapio_vira_componente() {
        let registro = Bebida {
            id: 7,
            nome: "Cappuccino".to_string(),
            preco_base: 5.50,
            tipo: TipoBebida::Cafe,
            descricao: Some("Cappuccino cremoso".to_string()),
            disponivel: true,
            created_at: None,
        };
        let base = bebida_do_cardapio(&registro);
        assert_eq!(base.descricao(), "Cappuccino cremoso");
        assert!((base.preco() - 5.50).abs() < 1e-9);
    }
}
