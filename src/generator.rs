//! Synthetic profile generation.
//!
//! Produces a dataset of `unique` distinct identities followed by
//! `duplicates` copies of one further identity, the "stolen" profile that
//! detection should later find. Copies are independent values.
//!
//! Usernames embed a per-dataset counter, so distinct identities never
//! collide by chance and the only replicated fingerprint is the injected one.
//!
//! # Example
//!
//! ```
//! use profiledupe::generator::ProfileGenerator;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let dataset = ProfileGenerator::new("instagram")
//!     .with_unique(10)
//!     .with_duplicates(3)
//!     .generate(&mut rng);
//!
//! assert_eq!(dataset.len(), 13);
//! ```

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::profile::{
    ProfileDataset, ProfileRecord, BIO, EMAIL, LOCATION, NAME, PROFILE_URL, USERNAME,
};

/// Default number of distinct identities per platform.
pub const DEFAULT_UNIQUE_PROFILES: usize = 450;
/// Default number of copies of the injected identity.
pub const DEFAULT_DUPLICATE_PROFILES: usize = 50;
/// Platforms generated when none are configured.
pub const DEFAULT_PLATFORMS: [&str; 4] = ["instagram", "twitter", "threads", "facebook"];

const BIO_WORDS: usize = 10;

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "David",
    "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Charles", "Karen", "Daniel", "Nancy", "Matthew", "Lisa", "Anthony", "Betty", "Mark", "Sandra",
    "Steven", "Ashley", "Andrew", "Emily", "Joshua", "Michelle", "Kevin", "Amanda",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Clark",
    "Lewis", "Robinson", "Walker", "Young", "Allen", "King",
];

const CITIES: &[&str] = &[
    "Port Angela", "East Michael", "New Sarah", "Lake Jennifer", "North Robert", "South Linda",
    "West Thomas", "Jamesview", "Marychester", "Davidfort", "Karenburgh", "Lisaland",
    "Mark Haven", "Steventon", "Amandaport", "Kevinmouth",
];

const EMAIL_DOMAINS: &[&str] = &[
    "example.com", "example.org", "example.net", "mail.test", "inbox.test",
];

const WORDS: &[&str] = &[
    "the", "art", "travel", "coffee", "music", "life", "daily", "photos", "dreams", "city",
    "nature", "design", "food", "friends", "story", "sunset", "weekend", "books", "running",
    "code", "family", "adventure", "ideas", "light", "moments", "ocean", "garden", "film",
];

/// Generator for one platform's profile dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileGenerator {
    platform: String,
    unique: usize,
    duplicates: usize,
}

impl ProfileGenerator {
    /// Create a generator for `platform` with default counts.
    #[must_use]
    pub fn new(platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            unique: DEFAULT_UNIQUE_PROFILES,
            duplicates: DEFAULT_DUPLICATE_PROFILES,
        }
    }

    /// Set the number of distinct identities.
    #[must_use]
    pub fn with_unique(mut self, count: usize) -> Self {
        self.unique = count;
        self
    }

    /// Set how many copies of the injected identity to append.
    #[must_use]
    pub fn with_duplicates(mut self, count: usize) -> Self {
        self.duplicates = count;
        self
    }

    /// Platform name used in profile URLs.
    #[must_use]
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Generate the dataset.
    ///
    /// Records appear as all unique identities first, then the injected
    /// copies. The column layout is [`crate::profile::DEFAULT_COLUMNS`].
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> ProfileDataset {
        let mut dataset = ProfileDataset::with_default_columns();
        dataset.records.reserve(self.unique + self.duplicates);

        for seq in 0..self.unique {
            dataset.records.push(self.profile(rng, seq));
        }

        if self.duplicates > 0 {
            let injected = self.profile(rng, self.unique);
            dataset
                .records
                .extend(std::iter::repeat_n(injected, self.duplicates));
        }

        log::debug!(
            "Generated {} {} profile(s) ({} unique, {} injected copies)",
            dataset.len(),
            self.platform,
            self.unique,
            self.duplicates
        );
        dataset
    }

    fn profile<R: Rng + ?Sized>(&self, rng: &mut R, seq: usize) -> ProfileRecord {
        let first = pick(rng, FIRST_NAMES);
        let last = pick(rng, LAST_NAMES);
        let username = format!(
            "{}{}{}",
            first.to_lowercase(),
            last.to_lowercase(),
            seq + 1
        );
        let email = format!("{}@{}", username, pick(rng, EMAIL_DOMAINS));
        let handle = format!(
            "{}_{}{}",
            pick(rng, FIRST_NAMES).to_lowercase(),
            pick(rng, LAST_NAMES).to_lowercase(),
            rng.random_range(0..10_000)
        );

        ProfileRecord::new()
            .with(NAME, format!("{first} {last}"))
            .with(USERNAME, username)
            .with(EMAIL, email)
            .with(BIO, sentence(rng, BIO_WORDS))
            .with(LOCATION, pick(rng, CITIES))
            .with(
                PROFILE_URL,
                format!("https://{}.com/{}", self.platform, handle),
            )
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, words: &[&'static str]) -> &'static str {
    words.choose(rng).copied().unwrap_or_default()
}

fn sentence<R: Rng + ?Sized>(rng: &mut R, words: usize) -> String {
    let body: Vec<&str> = (0..words).map(|_| pick(rng, WORDS)).collect();
    let mut text = body.join(" ");
    if let Some(first) = text.get(..1).map(str::to_uppercase) {
        text.replace_range(..1, &first);
    }
    text.push('.');
    text
}
