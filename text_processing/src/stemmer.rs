//Copyright 2024 Sentimen Contributors
//
//Licensed under the Apache License, Version 2.0 (the "License");
//you may not use this file except in compliance with the License.
//You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
//Unless required by applicable law or agreed to in writing, software
//distributed under the License is distributed on an "AS IS" BASIS,
//WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//See the License for the specific language governing permissions and
//limitations under the License.

use std::borrow::Cow;
use std::collections::HashSet;

use compact_str::{CompactString, ToCompactString};

/// The root word dictionary shipped with the crate.
const DEFAULT_ROOTS: &str = include_str!("../data/kata_dasar.txt");

/// A dictionary guided affix stripper for Indonesian, in the manner of the
/// Nazief-Adriani algorithm.
///
/// A strip is only accepted when the candidate is a known root word, so the
/// output is always either a dictionary root or the unchanged input. That
/// makes stemming idempotent: a stemmed token stems to itself.
#[derive(Debug, Clone)]
pub struct IndonesianStemmer {
    roots: HashSet<CompactString>,
}

impl Default for IndonesianStemmer {
    fn default() -> Self {
        Self::with_roots(
            DEFAULT_ROOTS
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty()),
        )
    }
}

impl IndonesianStemmer {
    pub fn with_roots<I, S>(roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToCompactString,
    {
        Self {
            roots: roots
                .into_iter()
                .map(|value| value.to_compact_string())
                .collect(),
        }
    }

    #[inline]
    pub fn is_root(&self, word: &str) -> bool {
        self.roots.contains(word)
    }

    /// Stems a single lowercased token.
    pub fn stem<'a>(&self, word: &'a str) -> Cow<'a, str> {
        if self.is_root(word) || word.chars().count() < 4 {
            return Cow::Borrowed(word);
        }

        // Inflectional particle, then possessive pronoun. Both may be present
        // at the same time ("bukunyalah").
        let word_np = strip_one_suffix(word, &["lah", "kah", "tah", "pun"]);
        if self.is_root(word_np) {
            return Cow::Borrowed(word_np);
        }
        let word_np = strip_one_suffix(word_np, &["ku", "mu", "nya"]);
        if self.is_root(word_np) {
            return Cow::Borrowed(word_np);
        }

        // Derivational suffixes. The unsuffixed form stays in the candidate
        // list so that prefix-only words are still handled.
        let mut candidates: Vec<&str> = vec![word_np];
        for suffix in ["kan", "an", "i"] {
            if let Some(stripped) = word_np.strip_suffix(suffix) {
                if stripped.chars().count() >= 2 {
                    candidates.push(stripped);
                }
            }
        }
        for candidate in &candidates {
            if self.is_root(candidate) {
                return Cow::Owned((*candidate).to_string());
            }
        }

        // Derivational prefixes, at most three levels deep.
        for candidate in &candidates {
            if let Some(root) = self.strip_prefixes(candidate, 0) {
                return Cow::Owned(root);
            }
        }

        Cow::Borrowed(word)
    }

    fn strip_prefixes(&self, word: &str, depth: u8) -> Option<String> {
        if depth >= 3 {
            return None;
        }
        let candidates = prefix_candidates(word);
        for candidate in &candidates {
            if self.is_root(candidate) {
                return Some(candidate.clone());
            }
        }
        for candidate in &candidates {
            if let Some(root) = self.strip_prefixes(candidate, depth + 1) {
                return Some(root);
            }
        }
        None
    }
}

fn strip_one_suffix<'a>(word: &'a str, suffixes: &[&str]) -> &'a str {
    for suffix in suffixes {
        if let Some(stripped) = word.strip_suffix(suffix) {
            if stripped.chars().count() >= 2 {
                return stripped;
            }
        }
    }
    word
}

/// Produces the possible de-prefixed forms of [word], including the
/// morphophonemic recodings of the nasal prefixes (meny- elides an initial
/// "s", mem- may elide an initial "p", and so on).
fn prefix_candidates(word: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut push = |candidate: String| {
        if candidate.chars().count() >= 2 && !out.contains(&candidate) {
            out.push(candidate);
        }
    };

    for (prefix, recoded) in [
        ("meng", None),
        ("meng", Some("k")),
        ("meny", Some("s")),
        ("men", None),
        ("men", Some("t")),
        ("mem", None),
        ("mem", Some("p")),
        ("me", None),
        ("peng", None),
        ("peng", Some("k")),
        ("peny", Some("s")),
        ("pen", None),
        ("pen", Some("t")),
        ("pem", None),
        ("pem", Some("p")),
        ("per", None),
        ("pel", None),
        ("pe", None),
        ("ber", None),
        ("bel", None),
        ("be", None),
        ("ter", None),
        ("tel", None),
        ("te", None),
        ("di", None),
        ("ke", None),
        ("se", None),
    ] {
        if let Some(rest) = word.strip_prefix(prefix) {
            match recoded {
                None => push(rest.to_string()),
                Some(initial) => push(format!("{initial}{rest}")),
            }
        }
    }

    out
}

#[cfg(test)]
mod test {
    use super::IndonesianStemmer;

    #[test]
    fn roots_pass_through() {
        let stemmer = IndonesianStemmer::default();
        assert_eq!(stemmer.stem("bagus"), "bagus");
        assert_eq!(stemmer.stem("jelek"), "jelek");
        assert_eq!(stemmer.stem("biasa"), "biasa");
    }

    #[test]
    fn strips_particles_and_possessives() {
        let stemmer = IndonesianStemmer::default();
        assert_eq!(stemmer.stem("baguslah"), "bagus");
        assert_eq!(stemmer.stem("bajunya"), "bajunya"); // not in dictionary
        assert_eq!(stemmer.stem("produknya"), "produk");
    }

    #[test]
    fn strips_derivational_suffixes() {
        let stemmer = IndonesianStemmer::default();
        assert_eq!(stemmer.stem("makanan"), "makan");
        assert_eq!(stemmer.stem("kirimkan"), "kirim");
        assert_eq!(stemmer.stem("layani"), "layan");
    }

    #[test]
    fn strips_prefixes_with_recoding() {
        let stemmer = IndonesianStemmer::default();
        assert_eq!(stemmer.stem("membaca"), "baca");
        assert_eq!(stemmer.stem("memakai"), "pakai");
        assert_eq!(stemmer.stem("menyukai"), "suka");
        assert_eq!(stemmer.stem("belajar"), "ajar");
        assert_eq!(stemmer.stem("terlambat"), "lambat");
        assert_eq!(stemmer.stem("dikirim"), "kirim");
        assert_eq!(stemmer.stem("pelayanan"), "layan");
        assert_eq!(stemmer.stem("mengecewakan"), "kecewa");
    }

    #[test]
    fn stemming_is_idempotent() {
        let stemmer = IndonesianStemmer::default();
        for word in [
            "membaca",
            "memakai",
            "pelayanan",
            "makanan",
            "baguslah",
            "xyzzy",
            "mengantarkan",
        ] {
            let once = stemmer.stem(word).into_owned();
            let twice = stemmer.stem(&once).into_owned();
            assert_eq!(once, twice, "stem({word}) is not idempotent");
        }
    }

    #[test]
    fn unknown_words_are_unchanged() {
        let stemmer = IndonesianStemmer::default();
        assert_eq!(stemmer.stem("zzz"), "zzz");
        assert_eq!(stemmer.stem("wkwkwk"), "wkwkwk");
    }
}
