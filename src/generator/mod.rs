//! # Gerador de Queries por Template
//!
//! Substituto local para uma chamada de IA: aplica as [regras](rules) por
//! palavra-chave, mas **modela a latência** de uma chamada externa — o
//! resultado só fica disponível após um atraso configurável.
//!
//! ## Supressão de Resultados Obsoletos
//!
//! Cada pedido recebe um [`GenerationTicket`] monotonicamente crescente.
//! Só o resultado do ticket mais recente pode ser aplicado à sessão:
//!
//! ```text
//! t=0   issue() → #1   (prompt A, ainda aguardando)
//! t=1   issue() → #2   (prompt B)
//! t=2   #2 termina → settle(#2) = true   → aplicado
//! t=3   #1 termina → settle(#1) = false  → descartado
//! ```
//!
//! Não há aborto real da tarefa antiga — ela apenas perde o direito de
//! escrever no estado.

pub mod rules;

use std::time::Duration;

use serde::Serialize;

pub use rules::generate;

/// Identificador de um pedido de geração.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct GenerationTicket(pub u64);

/// Controle de tickets emitidos e do pedido pendente.
#[derive(Clone, Debug, Default)]
pub struct GenerationTracker {
    latest: u64,
    pending: Option<GenerationTicket>,
}

impl GenerationTracker {
    /// Emite um novo ticket, que passa a ser o único válido.
    pub fn issue(&mut self) -> GenerationTicket {
        self.latest += 1;
        let ticket = GenerationTicket(self.latest);
        self.pending = Some(ticket);
        ticket
    }

    /// `true` se nenhum ticket mais novo foi emitido depois deste.
    pub fn is_current(&self, ticket: GenerationTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Encerra o pedido. Retorna `true` apenas para o ticket mais recente.
    pub fn settle(&mut self, ticket: GenerationTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.pending = None;
        true
    }

    /// Desiste de um pedido sem aplicar resultado (ex: cliente desconectou).
    ///
    /// Só limpa o pendente se ele ainda for este ticket.
    pub fn abandon(&mut self, ticket: GenerationTicket) {
        if self.pending == Some(ticket) {
            self.pending = None;
        }
    }

    /// Ticket aguardando resultado, se houver.
    pub fn pending(&self) -> Option<GenerationTicket> {
        self.pending
    }
}

/// Gera a query após o atraso simulado, sem bloquear o runtime.
pub async fn generate_with_delay(prompt: String, delay: Duration) -> String {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    generate(&prompt)
}
