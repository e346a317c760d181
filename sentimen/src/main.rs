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

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::info;
use text_processing::stemmer::IndonesianStemmer;
use text_processing::stopwords::StopWordList;
use text_processing::tokenizer::Tokenizer;

use sentimen::artifact::SentimentArtifact;
use sentimen::dataset;
use sentimen::history::HistoryStore;
use sentimen::service::{ClassifierContext, SentimentService};

use crate::args::{RunMode, SentimenArgs};
use crate::logging::configure_logging;

mod args;
mod logging;

fn main() -> ExitCode {
    let args = SentimenArgs::parse();
    configure_logging(args.log_level, args.log_to_file);
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("sentimen: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: SentimenArgs) -> Result<(), Box<dyn std::error::Error>> {
    let stop_words = match &args.stopwords {
        Some(file) => StopWordList::from_file(file, true)?,
        None => StopWordList::indonesian_default(),
    };
    let tokenizer = Tokenizer::new(
        true,
        Some(Arc::new(stop_words)),
        Some(Arc::new(IndonesianStemmer::default())),
    );

    // A process without a loadable artifact never claims readiness.
    let artifact = SentimentArtifact::load(&args.artifact)?;
    info!(
        "loaded the artifact from {} ({} features, classes: {:?})",
        args.artifact,
        artifact.vectorizer().dimensionality(),
        artifact.model().classes()
    );
    let context = Arc::new(ClassifierContext::new(tokenizer, artifact));
    let service = SentimentService::new(context, HistoryStore::open(&args.database)?);

    match args.mode {
        RunMode::Classify { text } => {
            let label = service.classify(&text)?;
            println!("{label}");
        }
        RunMode::Batch { input, output } => {
            let input = BufReader::new(File::open(&input)?);
            let output = BufWriter::new(File::create(&output)?);
            let summary = dataset::annotate(&service, input, output)?;
            info!(
                "annotated {} rows ({} failed)",
                summary.rows, summary.failed_rows
            );
            println!("{} rows annotated, {} failed", summary.rows, summary.failed_rows);
        }
        RunMode::History => {
            for record in service.history().fetch_all()? {
                println!(
                    "{}\t{}\t{}\t{}",
                    record.id, record.date, record.sentiment, record.text
                );
            }
        }
    }

    Ok(())
}
