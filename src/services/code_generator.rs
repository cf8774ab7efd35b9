// src/services/code_generator.rs
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::{Arc, Mutex};

/// Alfabeto dos códigos de sala.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
pub const CODE_LEN: usize = 6;

/// Gera um código de sala: 6 caracteres sorteados de forma independente
/// e uniforme do alfabeto `A-Z0-9`.
pub fn generate_code<R: Rng>(rng: &mut R) -> String {
    (0..CODE_LEN)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Verdadeiro se `code` já está no formato canónico (6 caracteres `[A-Z0-9]`).
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LEN && code.bytes().all(|b| CODE_ALPHABET.contains(&b))
}

/// Normaliza o código digitado pelo aluno (maiúsculas, sem espaços à volta).
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

/// Fonte de códigos partilhada pelo AppState. A semente pode ser fixada
/// para testes reprodutíveis.
#[derive(Debug, Clone)]
pub struct CodeGenerator {
    rng: Arc<Mutex<StdRng>>,
}

impl CodeGenerator {
    pub fn from_entropy() -> Self {
        Self {
            rng: Arc::new(Mutex::new(StdRng::from_os_rng())),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Arc::new(Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }

    pub fn next_code(&self) -> String {
        // Um panic noutro pedido não invalida o estado do RNG
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        generate_code(&mut *rng)
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}
