#![allow(dead_code)]

use doccluster::{DocumentCollection, Encoder, TfIdfEncoder};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Renders `(id, content)` pairs as a single input line.
pub fn records_line(records: &[(i64, &str)]) -> String {
    let body: Vec<String> = records
        .iter()
        .map(|(id, content)| {
            format!(r#"{{"content": "{content}", "id": {id}, "title": "Document {id}"}}"#)
        })
        .collect();
    format!("[{}]", body.join(", "))
}

/// Builds and encodes a collection with ids starting at 1.
pub fn encoded(texts: &[&str]) -> DocumentCollection {
    let mut documents = DocumentCollection::from_pairs(
        texts
            .iter()
            .enumerate()
            .map(|(i, text)| (i as i64 + 1, *text)),
    )
    .expect("Failed to build collection");
    TfIdfEncoder::default().encode(&mut documents);
    documents
}

pub struct TestInput {
    pub dir: TempDir,
}

impl TestInput {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn add_file(&self, name: &str, content: &str) -> PathBuf {
        let file_path = self.dir.path().join(name);
        fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }
}

pub mod corpus {
    pub const DISJOINT: [(i64, &str); 4] =
        [(1, "alpha"), (2, "bravo"), (3, "charlie"), (4, "delta")];

    pub const NEWS: [(i64, &str); 6] = [
        (11, "rust compiler release adds borrow checker fixes"),
        (12, "the rust compiler team ships a faster borrow checker"),
        (13, "football club wins the league after late goal"),
        (14, "late goal gives the football club the league title"),
        (15, "central bank raises interest rates again"),
        (16, "interest rates climb as the central bank acts"),
    ];
}
