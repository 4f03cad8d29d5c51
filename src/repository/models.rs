//! Diesel ORM models for the books table.

use diesel::prelude::*;

use crate::models::BookRecord;
use crate::schema;

use super::StoreError;

/// Book row as stored in the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::books)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BookRow {
    pub id: i64,
    pub title: String,
    pub authors: String,
    pub languages: String,
    pub text: Option<String>,
    pub analysis: Option<String>,
}

/// New book for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::books)]
pub struct NewBook<'a> {
    pub id: i64,
    pub title: &'a str,
    pub authors: &'a str,
    pub languages: &'a str,
    pub text: Option<&'a str>,
    pub analysis: Option<String>,
}

impl<'a> NewBook<'a> {
    pub fn from_record(record: &'a BookRecord) -> Result<Self, StoreError> {
        let analysis = record
            .analysis
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        Ok(Self {
            id: record.id,
            title: &record.title,
            authors: &record.authors,
            languages: &record.languages,
            text: record.text.as_deref(),
            analysis,
        })
    }
}

impl TryFrom<BookRow> for BookRecord {
    type Error = StoreError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        let analysis = row
            .analysis
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?;
        Ok(BookRecord {
            id: row.id,
            title: row.title,
            authors: row.authors,
            languages: row.languages,
            text: row.text,
            analysis,
        })
    }
}
