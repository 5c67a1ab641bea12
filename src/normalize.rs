//! Convert catalog wire records into the dashboard's domain models. Pure
//! functions: missing optional data becomes `None` or an empty list, never a
//! zero or an empty string, so aggregation can tell "no data" from "zero".

use crate::catalog::raw::{RawDoc, RawWork};
use crate::models::{BookSummary, Excerpt, WorkDetail};

/// Map one search hit. Years and cover ids of zero are treated as missing.
pub fn normalize(doc: RawDoc) -> BookSummary {
    BookSummary {
        key: doc.key.unwrap_or_default(),
        title: doc.title,
        author_names: doc.author_name.unwrap_or_default(),
        year: doc
            .first_publish_year
            .filter(|year| *year != 0)
            .and_then(|year| i32::try_from(year).ok()),
        cover_ref: doc
            .cover_i
            .filter(|cover| *cover > 0)
            .and_then(|cover| u64::try_from(cover).ok()),
        subjects: doc.subject.unwrap_or_default(),
    }
}

pub fn normalize_all(docs: Vec<RawDoc>) -> Vec<BookSummary> {
    docs.into_iter().map(normalize).collect()
}

/// Map a works record, unwrapping object-shaped descriptions and excerpts.
pub fn normalize_work(work: RawWork) -> WorkDetail {
    let excerpts = work
        .excerpts
        .unwrap_or_default()
        .into_iter()
        .filter_map(|raw| {
            raw.excerpt
                .as_ref()
                .and_then(|excerpt| excerpt.text())
                .map(|text| Excerpt {
                    text: text.to_string(),
                })
        })
        .collect();

    WorkDetail {
        title: work.title,
        description: work
            .description
            .as_ref()
            .and_then(|description| description.text())
            .map(str::to_string),
        subjects: work.subjects.unwrap_or_default(),
        excerpts,
    }
}
