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

use std::io;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use crate::error::DatasetError;
use crate::service::SentimentService;

/// The required input column of an uploaded dataset.
pub const TEXT_COLUMN: &str = "Text";
/// The predicted-label column appended to the output.
pub const LABEL_COLUMN: &str = "Human";
/// The slot content of a row whose classification failed.
pub const ROW_ERROR_MARKER: &str = "#ERROR";

/// What came out of one bulk annotation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotationSummary {
    pub rows: usize,
    pub failed_rows: usize,
}

/// Annotates a tabular dataset: reads a csv with a `Text` column, runs
/// the batch pipeline over it and writes the table back out with a
/// `Human` column appended, positionally aligned with the input rows.
///
/// The column check happens before anything is written; a dataset
/// without a `Text` column produces no partial output. Individual row
/// failures are marked and counted, never aborting the batch.
pub fn annotate(
    service: &SentimentService,
    input: impl io::Read,
    output: impl io::Write,
) -> Result<AnnotationSummary, DatasetError> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(input);
    let headers = reader.headers()?.clone();
    let text_index = headers
        .iter()
        .position(|name| name == TEXT_COLUMN)
        .ok_or(DatasetError::MissingColumn(TEXT_COLUMN))?;

    let records = reader
        .into_records()
        .collect::<Result<Vec<StringRecord>, _>>()?;
    let labels = service.classify_batch(
        records
            .iter()
            .map(|record| record.get(text_index).unwrap_or_default()),
    );

    let mut writer = WriterBuilder::new().from_writer(output);
    let mut out_headers = headers.clone();
    out_headers.push_field(LABEL_COLUMN);
    writer.write_record(&out_headers)?;

    let mut failed_rows = 0usize;
    for (record, label) in records.iter().zip(labels) {
        let mut row = record.clone();
        match label {
            Ok(label) => row.push_field(&label),
            Err(err) => {
                log::warn!("row {:?} was not classifiable: {err}", record.position());
                row.push_field(ROW_ERROR_MARKER);
                failed_rows += 1;
            }
        }
        writer.write_record(&row)?;
    }
    writer.flush()?;

    Ok(AnnotationSummary {
        rows: records.len(),
        failed_rows,
    })
}
