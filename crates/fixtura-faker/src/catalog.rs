use fake::Fake;
use fake::faker::address::raw::{CityName, CountryName, StreetName, ZipCode};
use fake::faker::company::raw::{CompanyName, Industry};
use fake::faker::internet::raw::{DomainSuffix, FreeEmail, SafeEmail, Username};
use fake::faker::lorem::raw::{Sentence, Word};
use fake::faker::name::raw::{FirstName, LastName, Name, Title};
use fake::faker::phone_number::raw::PhoneNumber;
use fake::locales::{EN, PT_BR};
use rand::RngCore;

use crate::locales::LocaleKey;

/// Text-valued faker ids, sorted.
pub const TEXT_IDS: &[&str] = &[
    "address.city",
    "address.country",
    "address.street",
    "address.zip",
    "company.industry",
    "company.name",
    "internet.domain_suffix",
    "internet.email",
    "internet.free_email",
    "internet.username",
    "lorem.sentence",
    "lorem.word",
    "name.first_name",
    "name.last_name",
    "name.name",
    "name.title",
    "phone_number.phone",
];

/// Ids producing non-text JSON values.
pub const VALUE_IDS: &[&str] = &["boolean", "date", "number", "uuid"];

pub struct AliasEntry {
    pub id: &'static str,
    pub target: &'static str,
}

pub const ALIAS_ENTRIES: &[AliasEntry] = &[
    AliasEntry { id: "city", target: "address.city" },
    AliasEntry { id: "company", target: "company.name" },
    AliasEntry { id: "country", target: "address.country" },
    AliasEntry { id: "email", target: "internet.email" },
    AliasEntry { id: "first_name", target: "name.first_name" },
    AliasEntry { id: "last_name", target: "name.last_name" },
    AliasEntry { id: "name", target: "name.name" },
    AliasEntry { id: "phone", target: "phone_number.phone" },
    AliasEntry { id: "sentence", target: "lorem.sentence" },
    AliasEntry { id: "username", target: "internet.username" },
    AliasEntry { id: "word", target: "lorem.word" },
];

pub fn alias_entry(id: &str) -> Option<&'static AliasEntry> {
    ALIAS_ENTRIES.iter().find(|entry| entry.id == id)
}

/// Resolve an id or alias to its canonical faker id.
pub fn resolve_id(id: &str) -> Option<&'static str> {
    if let Some(alias) = alias_entry(id) {
        return Some(alias.target);
    }
    TEXT_IDS
        .iter()
        .chain(VALUE_IDS)
        .find(|known| **known == id)
        .copied()
}

/// Every id and alias accepted by the faker provider, sorted.
pub fn all_ids() -> Vec<&'static str> {
    let mut ids: Vec<&'static str> = TEXT_IDS
        .iter()
        .chain(VALUE_IDS)
        .copied()
        .chain(ALIAS_ENTRIES.iter().map(|entry| entry.id))
        .collect();
    ids.sort_unstable();
    ids
}

// Some fakers carry per-locale bounds (`CityNameGenFn`), so the dispatch is
// expanded once per concrete locale.
macro_rules! text_for {
    ($id:expr, $locale:expr, $rng:expr) => {
        match $id {
            "address.city" => CityName($locale).fake_with_rng($rng),
            "address.country" => CountryName($locale).fake_with_rng($rng),
            "address.street" => StreetName($locale).fake_with_rng($rng),
            "address.zip" => ZipCode($locale).fake_with_rng($rng),
            "company.industry" => Industry($locale).fake_with_rng($rng),
            "company.name" => CompanyName($locale).fake_with_rng($rng),
            "internet.domain_suffix" => DomainSuffix($locale).fake_with_rng($rng),
            "internet.email" => SafeEmail($locale).fake_with_rng($rng),
            "internet.free_email" => FreeEmail($locale).fake_with_rng($rng),
            "internet.username" => Username($locale).fake_with_rng($rng),
            "lorem.sentence" => Sentence($locale, 3..8).fake_with_rng($rng),
            "lorem.word" => Word($locale).fake_with_rng($rng),
            "name.first_name" => FirstName($locale).fake_with_rng($rng),
            "name.last_name" => LastName($locale).fake_with_rng($rng),
            "name.name" => Name($locale).fake_with_rng($rng),
            "name.title" => Title($locale).fake_with_rng($rng),
            "phone_number.phone" => PhoneNumber($locale).fake_with_rng($rng),
            _ => return None,
        }
    };
}

pub fn generate_text(id: &str, locale: LocaleKey, rng: &mut dyn RngCore) -> Option<String> {
    let value: String = match locale {
        LocaleKey::EnUs => text_for!(id, EN, rng),
        LocaleKey::PtBr => text_for!(id, PT_BR, rng),
    };
    Some(value)
}
