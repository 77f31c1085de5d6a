//! The quote catalog and its random selector.
//!
//! A `Catalog` is built once at startup from configuration and shared read-only
//! across all request handlers. It owns a single pseudo-random generator, seeded
//! once when the catalog is built and guarded by a mutex so concurrent handlers
//! draw from it without racing. The quote list itself is never mutated.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Quotes served when the configuration does not provide a catalog.
pub const BUILTIN_QUOTES: [&str; 5] = [
    "The only way to do great work is to love what you do. - Steve Jobs",
    "The future belongs to those who believe in the beauty of their dreams. - Eleanor Roosevelt",
    "It does not matter how slowly you go as long as you do not stop. - Confucius",
    "Success is not final, failure is not fatal: it is the courage to continue that counts. - Winston Churchill",
    "Believe you can and you're halfway there. - Theodore Roosevelt",
];

/// The built-in quotes as owned strings, the default `[quotes] catalog`.
pub fn builtin_quotes() -> Vec<String> {
    BUILTIN_QUOTES.iter().map(|q| q.to_string()).collect()
}

/// Catalog construction error. Always fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Quote catalog is empty: configure at least one quote")]
    Empty,

    #[error("Quote #{index} in the catalog is blank")]
    BlankQuote { index: usize },
}

/// How the selector's generator was seeded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seeding {
    /// Seeded from operating system entropy
    Entropy,
    /// Seeded from a configured value, draws are reproducible
    Fixed(u64),
}

/// Immutable, non-empty list of quotes with a uniform random selector.
#[derive(Debug)]
pub struct Catalog {
    quotes: Vec<String>,
    rng: Mutex<StdRng>,
    seeding: Seeding,
}

impl Catalog {
    /// Build a catalog, rejecting an empty list or blank entries.
    ///
    /// With `seed` set the generator is seeded deterministically, otherwise from
    /// OS entropy. Either way it is seeded exactly once, here.
    pub fn new<I, S>(quotes: I, seed: Option<u64>) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let quotes: Vec<String> = quotes.into_iter().map(Into::into).collect();

        if quotes.is_empty() {
            return Err(CatalogError::Empty);
        }
        if let Some(index) = quotes.iter().position(|q| q.trim().is_empty()) {
            return Err(CatalogError::BlankQuote { index });
        }

        let (rng, seeding) = match seed {
            Some(seed) => (StdRng::seed_from_u64(seed), Seeding::Fixed(seed)),
            None => (StdRng::from_os_rng(), Seeding::Entropy),
        };

        Ok(Self {
            quotes,
            rng: Mutex::new(rng),
            seeding,
        })
    }

    /// Pick one quote uniformly at random.
    pub fn choose(&self) -> &str {
        &self.quotes[self.choose_index()]
    }

    /// Draw a uniform index in `0..len`.
    pub fn choose_index(&self) -> usize {
        // A draw never leaves the generator half-updated; poisoning is harmless.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.random_range(0..self.quotes.len())
    }

    /// Number of quotes, at least one.
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Always false: construction rejects empty catalogs.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Whether `quote` is one of the catalog entries.
    pub fn contains(&self, quote: &str) -> bool {
        self.quotes.iter().any(|q| q == quote)
    }

    /// How the generator was seeded, for the startup log.
    pub fn seeding(&self) -> Seeding {
        self.seeding
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_empty_catalog_is_rejected() {
        let err = Catalog::new(Vec::<String>::new(), None).unwrap_err();
        assert_eq!(err, CatalogError::Empty);
    }

    #[test]
    fn test_blank_quote_is_rejected() {
        let err = Catalog::new(["fine", "   ", "also fine"], None).unwrap_err();
        assert_eq!(err, CatalogError::BlankQuote { index: 1 });
    }

    #[test]
    fn test_single_quote_always_selected() {
        let catalog = Catalog::new(["only"], None).unwrap();
        for _ in 0..100 {
            assert_eq!(catalog.choose(), "only");
        }
    }

    #[test]
    fn test_choice_is_member_of_catalog() {
        let catalog = Catalog::new(["Hello", "World"], None).unwrap();
        for _ in 0..100 {
            let quote = catalog.choose();
            assert!(quote == "Hello" || quote == "World", "unexpected {quote}");
        }
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::new(builtin_quotes(), None).unwrap();
        assert_eq!(catalog.len(), BUILTIN_QUOTES.len());
        assert!(!catalog.is_empty());
        assert_eq!(catalog.seeding(), Seeding::Entropy);
        assert!(BUILTIN_QUOTES.iter().all(|q| catalog.contains(q)));
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let a = Catalog::new(BUILTIN_QUOTES, Some(1234)).unwrap();
        let b = Catalog::new(BUILTIN_QUOTES, Some(1234)).unwrap();
        assert_eq!(a.seeding(), Seeding::Fixed(1234));

        let draws_a: Vec<usize> = (0..50).map(|_| a.choose_index()).collect();
        let draws_b: Vec<usize> = (0..50).map(|_| b.choose_index()).collect();
        assert_eq!(draws_a, draws_b);
    }

    #[test]
    fn test_generator_is_not_reseeded_per_draw() {
        // Reseeding with the same value per call would repeat the first draw forever
        let catalog = Catalog::new(BUILTIN_QUOTES, Some(99)).unwrap();
        let draws: Vec<usize> = (0..50).map(|_| catalog.choose_index()).collect();
        assert!(draws.iter().any(|&d| d != draws[0]));
    }

    #[test]
    fn test_selection_is_uniform() {
        const DRAWS: usize = 50_000;
        // Chi-squared critical value for 4 degrees of freedom at p = 0.0001
        const CRITICAL: f64 = 23.51;

        let catalog = Catalog::new(BUILTIN_QUOTES, Some(42)).unwrap();
        let mut counts = [0usize; BUILTIN_QUOTES.len()];
        for _ in 0..DRAWS {
            counts[catalog.choose_index()] += 1;
        }

        let expected = DRAWS as f64 / counts.len() as f64;
        let chi_squared: f64 = counts
            .iter()
            .map(|&observed| {
                let diff = observed as f64 - expected;
                diff * diff / expected
            })
            .sum();

        assert!(
            chi_squared < CRITICAL,
            "chi-squared {chi_squared} over {counts:?}"
        );
    }

    #[test]
    fn test_concurrent_draws_stay_in_range() {
        let catalog = Arc::new(Catalog::new(["a", "b", "c"], None).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let catalog = Arc::clone(&catalog);
                std::thread::spawn(move || {
                    (0..1_000)
                        .map(|_| catalog.choose().to_string())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for handle in handles {
            for quote in handle.join().unwrap() {
                assert!(catalog.contains(&quote));
            }
        }
    }
}
