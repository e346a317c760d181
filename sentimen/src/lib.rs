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

//! Sentiment classification core for Indonesian text.
//!
//! A pre-fitted tf-idf vectorizer and a linear one-vs-rest model are
//! loaded once from a serialized artifact; every single-sentence
//! classification is appended to a durable history.

pub mod artifact;
pub mod classifier;
pub mod dataset;
pub mod error;
pub mod history;
pub mod service;
