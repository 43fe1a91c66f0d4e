//! Username sniping module - enumerate short usernames and check them in batches

mod generator;
mod runner;

pub use generator::UsernameGenerator;
pub use runner::{
    watch_interrupts, BatchRunner, Pacer, RunnerState, StopReason, StopSignal, TokioPacer,
};

/// Character set for username generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    /// Only lowercase letters (a-z)
    Letters,
    /// Letters then digits (a-z, 0-9)
    #[default]
    Alphanumeric,
}

impl Charset {
    pub fn chars(&self) -> &'static [char] {
        match self {
            Charset::Letters => &[
                'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm',
                'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
            ],
            Charset::Alphanumeric => &[
                'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm',
                'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
                '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
            ],
        }
    }

    /// `None` when the space does not fit in a `u64`
    pub fn total_combinations(&self, length: usize) -> Option<u64> {
        let exp = u32::try_from(length).ok()?;
        (self.chars().len() as u64).checked_pow(exp)
    }

    /// Parse a charset name as used in configuration
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "letters" => Some(Charset::Letters),
            "alphanumeric" => Some(Charset::Alphanumeric),
            _ => None,
        }
    }
}
