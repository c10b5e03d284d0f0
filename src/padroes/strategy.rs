// src/padroes/strategy.rs
//
// Padrão Strategy para descontos: o método de pagamento escolhido
// seleciona a política de desconto aplicada ao total do pedido.
// PIX dá 5%, fidelidade 10%, dinheiro e cartão não têm desconto.

use serde::{Deserialize, Serialize};

/// Métodos de pagamento aceitos, armazenados como TEXT no banco.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MetodoPagamento {
    Dinheiro,
    Cartao,
    Pix,
    Fidelidade,
}

impl MetodoPagamento {
    pub fn as_str(self) -> &'static str {
        match self {
            MetodoPagamento::Dinheiro => "dinheiro",
            MetodoPagamento::Cartao => "cartao",
            MetodoPagamento::Pix => "pix",
            MetodoPagamento::Fidelidade => "fidelidade",
        }
    }
}

/// Interface Strategy para cálculo de descontos.
pub trait EstrategiaDesconto {
    /// Valor do desconto sobre o total informado.
    fn calcular_desconto(&self, valor: f64) -> f64;

    /// Descrição exibida no comprovante.
    fn descricao(&self) -> &'static str;
}

/// 5% de desconto no PIX.
pub struct DescontoPix;

impl EstrategiaDesconto for DescontoPix {
    fn calcular_desconto(&self, valor: f64) -> f64 {
        valor * 0.05
    }

    fn descricao(&self) -> &'static str {
        "Desconto PIX (5%)"
    }
}

/// 10% de desconto para clientes do programa de fidelidade.
pub struct DescontoFidelidade;

impl EstrategiaDesconto for DescontoFidelidade {
    fn calcular_desconto(&self, valor: f64) -> f64 {
        valor * 0.10
    }

    fn descricao(&self) -> &'static str {
        "Desconto Fidelidade (10%)"
    }
}

/// Nenhum desconto (dinheiro e cartão).
pub struct SemDesconto;

impl EstrategiaDesconto for SemDesconto {
    fn calcular_desconto(&self, _valor: f64) -> f64 {
        0.0
    }

    fn descricao(&self) -> &'static str {
        "Sem desconto"
    }
}

/// Seleciona a strategy de desconto para o método de pagamento.
pub fn estrategia_para(metodo: MetodoPagamento) -> Box<dyn EstrategiaDesconto> {
    match metodo {
        MetodoPagamento::Pix => Box::new(DescontoPix),
        MetodoPagamento::Fidelidade => Box::new(DescontoFidelidade),
        MetodoPagamento::Dinheiro | MetodoPagamento::Cartao => Box::new(SemDesconto),
    }
}

/// Arredonda um valor monetário para centavos.
pub fn arredondar(valor: f64) -> f64 {
    (valor * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total_final(metodo: MetodoPagamento, total: f64) -> f64 {
        let estrategia = estrategia_para(metodo);
        let desconto = arredondar(estrategia.calcular_desconto(total));
        arredondar(total - desconto)
    }

    #[test]
    fn pix_da_cinco_por_cento() {
        assert_eq!(total_final(MetodoPagamento::Pix, 100.0), 95.0);
    }

    #[test]
    fn fidelidade_da_dez_por_cento() {
        assert_eq!(total_final(MetodoPagamento::Fidelidade, 100.0), 90.0);
    }

    #[test]
    fn dinheiro_e_cartao_sem_desconto() {
        assert_eq!(total_final(MetodoPagamento::Dinheiro, 100.0), 100.0);
        assert_eq!(total_final(MetodoPagamento::Cartao, 100.0), 100.0);
    }

    #[test]
    fn arredondamento_em_centavos() {
        assert_eq!(arredondar(12.345), 12.35);
        assert_eq!(arredondar(12.344), 12.34);
        let estrategia = estrategia_para(MetodoPagamento::Pix);
        assert_eq!(arredondar(estrategia.calcular_desconto(9.90)), 0.50);
    }

    #[test]
    fn descricoes_das_estrategias() {
        assert_eq!(estrategia_para(MetodoPagamento::Pix).descricao(), "Desconto PIX (5%)");
        assert_eq!(
            estrategia_para(MetodoPagamento::Fidelidade).descricao(),
            "Desconto Fidelidade (10%)"
        );
        assert_eq!(estrategia_para(MetodoPagamento::Cartao).descricao(), "Sem desconto");
    }
}
