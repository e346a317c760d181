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

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
/// Sentiment analysis for Indonesian text
pub struct SentimenArgs {
    /// The serialized vectorizer/model artifact.
    #[arg(long, default_value = "sentimen.bin")]
    pub artifact: Utf8PathBuf,

    /// The history database.
    #[arg(long, default_value = "riwayat.db")]
    pub database: Utf8PathBuf,

    /// An additional newline delimited stopword file, merged with the
    /// built-in Indonesian list.
    #[arg(long)]
    pub stopwords: Option<Utf8PathBuf>,

    /// The log level of sentimen
    #[arg(long, default_value_t = log::LevelFilter::Info)]
    pub log_level: log::LevelFilter,

    /// Log to file
    #[arg(long)]
    pub log_to_file: bool,

    #[command(subcommand)]
    pub mode: RunMode,
}

#[derive(Subcommand, Debug)]
pub enum RunMode {
    /// Classify a single sentence and append it to the history.
    Classify {
        /// The sentence to classify.
        text: String,
    },
    /// Annotate a csv dataset with a 'Text' column; the predictions land
    /// in an appended 'Human' column.
    Batch {
        /// The input csv.
        input: Utf8PathBuf,
        /// Where to write the annotated csv.
        output: Utf8PathBuf,
    },
    /// Print the classification history in insertion order.
    History,
}
