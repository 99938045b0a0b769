//! Built-in fake-value generator with an Italian locale flavor.
//!
//! Produces plausible but fabricated values for the entity types the
//! pipeline replaces in FakeValues mode. Values are sampled fresh on every
//! call; run-level consistency comes from the substitution registry, not
//! from here.

use rand::seq::SliceRandom;
use rand::Rng;

use super::types::FakeValueGenerator;

const FIRST_NAMES: &[&str] = &[
    "Alessandro", "Giulia", "Francesca", "Lorenzo", "Martina", "Matteo",
    "Chiara", "Davide", "Elena", "Simone", "Sara", "Andrea",
];

const LAST_NAMES: &[&str] = &[
    "Ferrari", "Esposito", "Romano", "Colombo", "Ricci", "Marino",
    "Greco", "Bruno", "Gallo", "Conti", "DeLuca", "Costa",
];

const EMAIL_DOMAINS: &[&str] = &["example.it", "example.com", "posta.example", "mail.example"];

const CITIES: &[&str] = &[
    "Torino", "Bologna", "Firenze", "Bari", "Verona", "Padova", "Trieste", "Parma",
];

pub struct ItalianFaker;

impl ItalianFaker {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ItalianFaker {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeValueGenerator for ItalianFaker {
    fn generate(&self, entity_type: &str) -> String {
        let mut rng = rand::thread_rng();
        match entity_type {
            "PERSON" => {
                let first = FIRST_NAMES.choose(&mut rng).unwrap();
                let last = LAST_NAMES.choose(&mut rng).unwrap();
                format!("{first} {last}")
            }
            "EMAIL_ADDRESS" => {
                let first = FIRST_NAMES.choose(&mut rng).unwrap().to_lowercase();
                let last = LAST_NAMES.choose(&mut rng).unwrap().to_lowercase();
                let domain = EMAIL_DOMAINS.choose(&mut rng).unwrap();
                format!("{first}.{last}@{domain}")
            }
            "PHONE_NUMBER" => {
                let prefix = rng.gen_range(320..=399);
                let number: u32 = rng.gen_range(1_000_000..=9_999_999);
                format!("+39 {prefix} {number}")
            }
            "IBAN_CODE" => {
                let check = rng.gen_range(10..=99);
                let cin = (b'A' + rng.gen_range(0..26u8)) as char;
                let abi: u32 = rng.gen_range(10_000..=99_999);
                let cab: u32 = rng.gen_range(10_000..=99_999);
                let account: u64 = rng.gen_range(100_000_000_000..=999_999_999_999);
                format!("IT{check}{cin}{abi}{cab}{account}")
            }
            "LOCATION" => CITIES.choose(&mut rng).unwrap().to_string(),
            // Generic fallback embedding the entity type, as the original
            // pipeline did for types without a dedicated generator.
            other => format!("{}_FAKE", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_is_first_and_last_name() {
        let faker = ItalianFaker::new();
        let name = faker.generate("PERSON");
        let parts: Vec<&str> = name.split_whitespace().collect();
        assert_eq!(parts.len(), 2);
        assert!(FIRST_NAMES.contains(&parts[0]));
        assert!(LAST_NAMES.contains(&parts[1]));
    }

    #[test]
    fn email_has_local_part_and_known_domain() {
        let faker = ItalianFaker::new();
        let email = faker.generate("EMAIL_ADDRESS");
        let (local, domain) = email.split_once('@').unwrap();
        assert!(local.contains('.'));
        assert!(EMAIL_DOMAINS.contains(&domain));
    }

    #[test]
    fn phone_is_italian_mobile_shaped() {
        let faker = ItalianFaker::new();
        let phone = faker.generate("PHONE_NUMBER");
        assert!(phone.starts_with("+39 3"));
    }

    #[test]
    fn iban_starts_with_country_code() {
        let faker = ItalianFaker::new();
        let iban = faker.generate("IBAN_CODE");
        assert!(iban.starts_with("IT"));
        assert!(iban.len() > 20);
    }

    #[test]
    fn unknown_type_embeds_the_type_name() {
        let faker = ItalianFaker::new();
        assert_eq!(faker.generate("IT_FISCAL_CODE"), "IT_FISCAL_CODE_FAKE");
    }
}
