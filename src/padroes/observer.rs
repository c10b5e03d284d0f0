// src/padroes/observer.rs
//
// Padrão Observer: a cada mudança de status do pedido, os observadores
// registrados são notificados de forma síncrona, na ordem de registro,
// antes de a operação retornar ao chamador.

use super::state::StatusPedido;

/// Contrato dos interessados em mudanças de status de pedidos.
pub trait ObservadorPedido {
    fn atualizar(&self, pedido_id: i64, estado: StatusPedido);
}

/// Painel da cozinha.
pub struct ObservadorCozinha;

impl ObservadorPedido for ObservadorCozinha {
    fn atualizar(&self, pedido_id: i64, estado: StatusPedido) {
        tracing::info!("[Cozinha] Pedido {} está agora '{}'.", pedido_id, estado.exibicao());
    }
}

/// Aviso ao cliente.
pub struct ObservadorCliente;

impl ObservadorPedido for ObservadorCliente {
    fn atualizar(&self, pedido_id: i64, estado: StatusPedido) {
        tracing::info!("[Cliente] Seu pedido {} está agora '{}'.", pedido_id, estado.exibicao());
    }
}

/// Subject: mantém a lista ordenada de observadores e dispara o fan-out.
#[derive(Default)]
pub struct NotificadorPedido {
    observadores: Vec<Box<dyn ObservadorPedido>>,
}

impl NotificadorPedido {
    pub fn new() -> Self {
        NotificadorPedido::default()
    }

    /// Notificador com os observadores padrão do sistema (cozinha e cliente).
    pub fn padrao() -> Self {
        let mut notificador = NotificadorPedido::new();
        notificador.registrar(Box::new(ObservadorCozinha));
        notificador.registrar(Box::new(ObservadorCliente));
        notificador
    }

    pub fn registrar(&mut self, observador: Box<dyn ObservadorPedido>) {
        self.observadores.push(observador);
    }

    /// Invoca cada observador na ordem em que foi registrado.
    pub fn notificar(&self, pedido_id: i64, estado: StatusPedido) {
        for observador in &self.observadores {
            observador.atualizar(pedido_id, estado);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct ObservadorGravador {
        etiqueta: &'static str,
        registro: Rc<RefCell<Vec<String>>>,
    }

    impl ObservadorPedido for ObservadorGravador {
        fn atualizar(&self, pedido_id: i64, estado: StatusPedido) {
            self.registro
                .borrow_mut()
                .push(format!("{}:{}:{}", self.etiqueta, pedido_id, estado.as_str()));
        }
    }

    #[test]
    fn notifica_todos_na_ordem_de_registro() {
        let registro = Rc::new(RefCell::new(Vec::new()));
        let mut notificador = NotificadorPedido::new();
        notificador.registrar(Box::new(ObservadorGravador {
            etiqueta: "cozinha",
            registro: Rc::clone(&registro),
        }));
        notificador.registrar(Box::new(ObservadorGravador {
            etiqueta: "cliente",
            registro: Rc::clone(&registro),
        }));

        notificador.notificar(42, StatusPedido::EmPreparo);

        assert_eq!(
            *registro.borrow(),
            vec!["cozinha:42:em_preparo", "cliente:42:em_preparo"]
        );
    }

    #[test]
    fn sem_observadores_nao_faz_nada() {
        let notificador = NotificadorPedido::new();
        notificador.notificar(1, StatusPedido::Recebido);
    }
}
