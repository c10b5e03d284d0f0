// src/padroes/state.rs
//
// Padrão State para o ciclo de vida do pedido. A sequência feliz é
// linear (recebido -> em_preparo -> pronto -> entregue) e o
// cancelamento só é permitido nos dois primeiros estados. Entregue e
// cancelado são finais.

use serde::{Deserialize, Serialize};

use crate::shared::erros::ErroCafeteria;

/// Status possíveis de um pedido, armazenados como TEXT no banco.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StatusPedido {
    Recebido,
    EmPreparo,
    Pronto,
    Entregue,
    Cancelado,
}

impl StatusPedido {
    /// Próximo estado da sequência feliz; `None` em estados finais.
    pub fn proximo(self) -> Option<StatusPedido> {
        match self {
            StatusPedido::Recebido => Some(StatusPedido::EmPreparo),
            StatusPedido::EmPreparo => Some(StatusPedido::Pronto),
            StatusPedido::Pronto => Some(StatusPedido::Entregue),
            StatusPedido::Entregue | StatusPedido::Cancelado => None,
        }
    }

    /// Cancelamento só é permitido antes de o pedido ficar pronto.
    pub fn pode_cancelar(self) -> bool {
        matches!(self, StatusPedido::Recebido | StatusPedido::EmPreparo)
    }

    /// Verifica se a aresta `self -> destino` pertence ao grafo de
    /// transições permitidas.
    pub fn pode_transicionar(self, destino: StatusPedido) -> bool {
        if destino == StatusPedido::Cancelado {
            return self.pode_cancelar();
        }
        self.proximo() == Some(destino)
    }

    pub fn e_final(self) -> bool {
        matches!(self, StatusPedido::Entregue | StatusPedido::Cancelado)
    }

    /// Valor textual usado no banco e nas URLs.
    pub fn as_str(self) -> &'static str {
        match self {
            StatusPedido::Recebido => "recebido",
            StatusPedido::EmPreparo => "em_preparo",
            StatusPedido::Pronto => "pronto",
            StatusPedido::Entregue => "entregue",
            StatusPedido::Cancelado => "cancelado",
        }
    }

    pub fn parse(valor: &str) -> Option<StatusPedido> {
        match valor {
            "recebido" => Some(StatusPedido::Recebido),
            "em_preparo" => Some(StatusPedido::EmPreparo),
            "pronto" => Some(StatusPedido::Pronto),
            "entregue" => Some(StatusPedido::Entregue),
            "cancelado" => Some(StatusPedido::Cancelado),
            _ => None,
        }
    }

    /// Nome de exibição para notificações.
    pub fn exibicao(self) -> &'static str {
        match self {
            StatusPedido::Recebido => "Recebido",
            StatusPedido::EmPreparo => "Em preparo",
            StatusPedido::Pronto => "Pronto",
            StatusPedido::Entregue => "Entregue",
            StatusPedido::Cancelado => "Cancelado",
        }
    }
}

/// Máquina de estados de um pedido carregado do banco. As operações
/// devolvem o par (anterior, novo) para registro no histórico; em caso
/// de erro o estado interno permanece inalterado.
pub struct MaquinaEstadoPedido {
    pedido_id: i64,
    estado: StatusPedido,
}

impl MaquinaEstadoPedido {
    pub fn new(pedido_id: i64, estado: StatusPedido) -> Self {
        MaquinaEstadoPedido { pedido_id, estado }
    }

    pub fn estado(&self) -> StatusPedido {
        self.estado
    }

    /// Avança para o próximo estado da sequência feliz.
    pub fn avancar(&mut self) -> Result<(StatusPedido, StatusPedido), ErroCafeteria> {
        let anterior = self.estado;
        let novo = anterior.proximo().ok_or_else(|| self.transicao_invalida("proximo"))?;
        self.estado = novo;
        Ok((anterior, novo))
    }

    /// Cancela o pedido, se o estado atual permitir.
    pub fn cancelar(&mut self) -> Result<(StatusPedido, StatusPedido), ErroCafeteria> {
        self.transicionar_para(StatusPedido::Cancelado)
    }

    /// Transição explícita para um estado alvo, validando a aresta.
    pub fn transicionar_para(
        &mut self,
        destino: StatusPedido,
    ) -> Result<(StatusPedido, StatusPedido), ErroCafeteria> {
        if !self.estado.pode_transicionar(destino) {
            return Err(self.transicao_invalida(destino.as_str()));
        }
        let anterior = self.estado;
        self.estado = destino;
        Ok((anterior, destino))
    }

    fn transicao_invalida(&self, para: &str) -> ErroCafeteria {
        tracing::warn!(
            "transição inválida no pedido {}: '{}' -> '{}'",
            self.pedido_id,
            self.estado.as_str(),
            para
        );
        ErroCafeteria::TransicaoInvalida {
            de: self.estado.as_str().to_string(),
            para: para.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequencia_feliz_completa() {
        let mut maquina = MaquinaEstadoPedido::new(1, StatusPedido::Recebido);
        assert_eq!(
            maquina.avancar().unwrap(),
            (StatusPedido::Recebido, StatusPedido::EmPreparo)
        );
        assert_eq!(
            maquina.avancar().unwrap(),
            (StatusPedido::EmPreparo, StatusPedido::Pronto)
        );
        assert_eq!(
            maquina.avancar().unwrap(),
            (StatusPedido::Pronto, StatusPedido::Entregue)
        );
        assert!(maquina.estado().e_final());
    }

    #[test]
    fn estados_finais_nao_avancam() {
        let mut entregue = MaquinaEstadoPedido::new(1, StatusPedido::Entregue);
        assert!(entregue.avancar().is_err());
        assert_eq!(entregue.estado(), StatusPedido::Entregue);

        let mut cancelado = MaquinaEstadoPedido::new(2, StatusPedido::Cancelado);
        assert!(cancelado.avancar().is_err());
        assert_eq!(cancelado.estado(), StatusPedido::Cancelado);
    }

    #[test]
    fn cancelamento_permitido_apenas_no_inicio() {
        assert!(StatusPedido::Recebido.pode_cancelar());
        assert!(StatusPedido::EmPreparo.pode_cancelar());
        assert!(!StatusPedido::Pronto.pode_cancelar());
        assert!(!StatusPedido::Entregue.pode_cancelar());
        assert!(!StatusPedido::Cancelado.pode_cancelar());

        let mut maquina = MaquinaEstadoPedido::new(3, StatusPedido::Pronto);
        assert!(maquina.cancelar().is_err());
        // Transição rejeitada não altera o estado.
        assert_eq!(maquina.estado(), StatusPedido::Pronto);
    }

    #[test]
    fn grafo_rejeita_arestas_fora_do_conjunto() {
        use StatusPedido::*;
        let todos = [Recebido, EmPreparo, Pronto, Entregue, Cancelado];
        let permitidas = [
            (Recebido, EmPreparo),
            (EmPreparo, Pronto),
            (Pronto, Entregue),
            (Recebido, Cancelado),
            (EmPreparo, Cancelado),
        ];
        for de in todos {
            for para in todos {
                let esperado = permitidas.contains(&(de, para));
                assert_eq!(
                    de.pode_transicionar(para),
                    esperado,
                    "aresta {:?} -> {:?}",
                    de,
                    para
                );
            }
        }
    }

    #[test]
    fn parse_e_as_str_sao_inversos() {
        for status in [
            StatusPedido::Recebido,
            StatusPedido::EmPreparo,
            StatusPedido::Pronto,
            StatusPedido::Entregue,
            StatusPedido::Cancelado,
        ] {
            assert_eq!(StatusPedido::parse(status.as_str()), Some(status));
        }
        assert_eq!(StatusPedido::parse("pendente"), None);
    }
}
