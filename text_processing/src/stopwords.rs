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

use std::borrow::Borrow;
use std::collections::HashSet;
use std::fs::File;
use std::hash::Hash;
use std::io;
use std::io::{BufRead, BufReader};

use camino::Utf8Path;
use compact_str::{CompactString, ToCompactString};
use unicode_normalization::UnicodeNormalization;

/// The stopword list shipped with the crate.
const DEFAULT_INDONESIAN: &str = include_str!("../data/stopwords_id.txt");

/// An immutable set of stopwords, holding the raw and the NFC-normalized
/// form of every word. Loaded once at startup and shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct StopWordList {
    raw: HashSet<CompactString>,
    normalized: HashSet<CompactString>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ContainsKind {
    Raw,
    Normalized,
}

impl StopWordList {
    pub fn new(mut raw: HashSet<CompactString>, mut normalized: HashSet<CompactString>) -> Self {
        raw.shrink_to_fit();
        normalized.shrink_to_fit();
        Self { raw, normalized }
    }

    pub fn from_raw(raw: HashSet<CompactString>) -> Self {
        let normalized = raw
            .iter()
            .map(|value| value.nfc().collect::<CompactString>())
            .collect::<HashSet<_>>();
        Self::new(raw, normalized)
    }

    /// The default Indonesian stopword list compiled into the binary.
    pub fn indonesian_default() -> Self {
        Self::from_raw(
            DEFAULT_INDONESIAN
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(CompactString::from)
                .collect(),
        )
    }

    /// Loads a newline delimited stopword file, optionally merged with the
    /// compiled-in default list.
    pub fn from_file(file: impl AsRef<Utf8Path>, with_default: bool) -> Result<Self, io::Error> {
        let mut raw = BufReader::new(File::open(file.as_ref())?)
            .lines()
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|line| line.trim().to_compact_string())
            .filter(|line| !line.is_empty())
            .collect::<HashSet<_>>();
        if with_default {
            raw.extend(
                DEFAULT_INDONESIAN
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(CompactString::from),
            );
        }
        Ok(Self::from_raw(raw))
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    #[inline]
    pub fn contains<Q: ?Sized>(&self, kind: ContainsKind, value: &Q) -> bool
    where
        CompactString: Borrow<Q>,
        Q: Hash + Eq,
    {
        match kind {
            ContainsKind::Raw => self.contains_raw(value),
            ContainsKind::Normalized => self.contains_normalized(value),
        }
    }

    #[inline]
    pub fn contains_raw<Q: ?Sized>(&self, value: &Q) -> bool
    where
        CompactString: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.raw.contains(value)
    }

    #[inline]
    pub fn contains_normalized<Q: ?Sized>(&self, value: &Q) -> bool
    where
        CompactString: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.normalized.contains(value)
    }
}

impl<Q> Extend<Q> for StopWordList
where
    Q: ToCompactString,
{
    fn extend<T: IntoIterator<Item = Q>>(&mut self, iter: T) {
        for value in iter.into_iter() {
            let word = value.to_compact_string();
            let normalized = word.nfc().to_compact_string();
            self.raw.insert(word);
            self.normalized.insert(normalized);
        }
        self.raw.shrink_to_fit();
        self.normalized.shrink_to_fit();
    }
}
