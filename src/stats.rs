//! Aggregations over the current result set. Everything here is a pure
//! function of the normalized books and the active author filter, recomputed on
//! every frame.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::models::{AuthorFilter, AuthorFrequency, BookSummary, DecadeBucket, Stats, YearSpan};

/// Entries kept by [`top_author_frequencies`].
pub const TOP_AUTHORS: usize = 5;

/// Unique author names across `books`, sorted for the selector. `All` is
/// always the first option.
pub fn author_options(books: &[BookSummary]) -> Vec<AuthorFilter> {
    let mut seen = HashSet::new();
    let mut names: Vec<&str> = books
        .iter()
        .flat_map(|book| book.author_names.iter())
        .map(String::as_str)
        .filter(|name| seen.insert(*name))
        .collect();
    names.sort_by(|a, b| collate(a, b));

    let mut options = Vec::with_capacity(names.len() + 1);
    options.push(AuthorFilter::All);
    options.extend(names.into_iter().map(|name| AuthorFilter::Author(name.to_string())));
    options
}

/// Books visible under `filter`. `All` keeps everything in order.
pub fn apply_filter<'a>(books: &'a [BookSummary], filter: &AuthorFilter) -> Vec<&'a BookSummary> {
    books.iter().filter(|book| filter.matches(book)).collect()
}

pub fn compute_stats(books: &[&BookSummary]) -> Stats {
    let years: Vec<i64> = books
        .iter()
        .filter_map(|book| book.year)
        .map(i64::from)
        .collect();

    let years = match (years.iter().min(), years.iter().max()) {
        (Some(&earliest), Some(&latest)) => {
            let sum: i64 = years.iter().sum();
            // Half-up rounding.
            let mean = sum as f64 / years.len() as f64;
            let average = (mean + 0.5).floor() as i64;
            Some(YearSpan {
                earliest: earliest as i32,
                latest: latest as i32,
                average: average.clamp(earliest, latest) as i32,
            })
        }
        _ => None,
    };

    let top_author = author_counts(books)
        .into_iter()
        .fold(None::<(String, usize)>, |best, (name, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((name, count)),
        })
        .map(|(name, _)| name);

    Stats {
        total: books.len(),
        years,
        top_author,
    }
}

/// Histogram of publication years by decade, ascending. Books without a year
/// are skipped.
pub fn bucket_by_decade(books: &[&BookSummary]) -> Vec<DecadeBucket> {
    let mut buckets: BTreeMap<i32, usize> = BTreeMap::new();
    for year in books.iter().filter_map(|book| book.year) {
        *buckets.entry(decade_of(year)).or_default() += 1;
    }
    buckets
        .into_iter()
        .map(|(decade, count)| DecadeBucket { decade, count })
        .collect()
}

/// Most frequent authors, highest count first, at most [`TOP_AUTHORS`]
/// entries. Equal counts keep the order in which the names first appeared.
pub fn top_author_frequencies(books: &[&BookSummary]) -> Vec<AuthorFrequency> {
    let mut counts = author_counts(books);
    // Stable sort preserves first-seen order for ties.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(TOP_AUTHORS)
        .map(|(name, count)| AuthorFrequency { name, count })
        .collect()
}

pub fn decade_of(year: i32) -> i32 {
    year.div_euclid(10) * 10
}

/// Per-author record counts in first-seen order. A name repeated inside one
/// record counts once for that record.
fn author_counts(books: &[&BookSummary]) -> Vec<(String, usize)> {
    let mut order: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for book in books.iter().copied() {
        let mut in_record = HashSet::new();
        for name in &book.author_names {
            if !in_record.insert(name.as_str()) {
                continue;
            }
            match index.get(name.as_str()) {
                Some(&slot) => order[slot].1 += 1,
                None => {
                    index.insert(name.as_str(), order.len());
                    order.push((name.clone(), 1));
                }
            }
        }
    }

    order
}

/// Case- and accent-insensitive ordering, falling back to the raw strings so
/// distinct names never compare equal.
fn collate(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

fn collation_key(value: &str) -> String {
    value
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(key: &str, authors: &[&str], year: Option<i32>) -> BookSummary {
        BookSummary {
            key: key.to_string(),
            title: Some(format!("Title {key}")),
            author_names: authors.iter().map(|a| a.to_string()).collect(),
            year,
            cover_ref: None,
            subjects: Vec::new(),
        }
    }

    fn sample() -> Vec<BookSummary> {
        vec![
            book("/works/OL1W", &["Ursula K. Le Guin"], Some(1968)),
            book("/works/OL2W", &["Terry Pratchett", "Neil Gaiman"], Some(1990)),
            book("/works/OL3W", &["Terry Pratchett"], Some(1983)),
            book("/works/OL4W", &["Émile Zola"], None),
            book("/works/OL5W", &[], Some(2021)),
            book("/works/OL6W", &["ann leckie"], Some(2013)),
        ]
    }

    #[test]
    fn options_start_with_all_and_sort_case_and_accent_insensitively() {
        let options = author_options(&sample());
        let labels: Vec<String> = options.iter().map(ToString::to_string).collect();
        assert_eq!(
            labels,
            vec![
                "All",
                "ann leckie",
                "Émile Zola",
                "Neil Gaiman",
                "Terry Pratchett",
                "Ursula K. Le Guin"
            ]
        );
    }

    #[test]
    fn all_filter_is_identity() {
        let books = sample();
        let filtered = apply_filter(&books, &AuthorFilter::All);
        assert_eq!(filtered.len(), books.len());
        assert_eq!(compute_stats(&filtered).total, books.len());
    }

    #[test]
    fn author_filter_keeps_only_matching_records() {
        let books = sample();
        let filter = AuthorFilter::Author("Terry Pratchett".into());
        let filtered = apply_filter(&books, &filter);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|b| b.has_author("Terry Pratchett")));
        assert!(filtered
            .iter()
            .all(|b| books.iter().any(|original| original.key == b.key)));
    }

    #[test]
    fn stats_cover_present_years_only() {
        let books = sample();
        let filtered = apply_filter(&books, &AuthorFilter::All);
        let stats = compute_stats(&filtered);

        let span = stats.years.unwrap();
        assert_eq!(span.earliest, 1968);
        assert_eq!(span.latest, 2021);
        // (1968 + 1990 + 1983 + 2021 + 2013) / 5 = 1995
        assert_eq!(span.average, 1995);
        assert!(span.earliest <= span.average && span.average <= span.latest);
        assert_eq!(stats.top_author.as_deref(), Some("Terry Pratchett"));
    }

    #[test]
    fn average_rounds_half_up() {
        let books = vec![
            book("/works/A", &[], Some(2000)),
            book("/works/B", &[], Some(2001)),
        ];
        let filtered = apply_filter(&books, &AuthorFilter::All);
        assert_eq!(compute_stats(&filtered).years.unwrap().average, 2001);
    }

    #[test]
    fn no_years_means_no_span() {
        let books = vec![book("/works/A", &["Anon"], None)];
        let filtered = apply_filter(&books, &AuthorFilter::All);
        let stats = compute_stats(&filtered);
        assert_eq!(stats.total, 1);
        assert!(stats.years.is_none());
    }

    #[test]
    fn empty_set_has_no_top_author() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.total, 0);
        assert!(stats.top_author.is_none());
        assert!(stats.years.is_none());
    }

    #[test]
    fn top_author_ties_go_to_first_seen() {
        let books = vec![
            book("/works/A", &["Second"], None),
            book("/works/B", &["First"], None),
            book("/works/C", &["First", "Second"], None),
        ];
        let filtered = apply_filter(&books, &AuthorFilter::All);
        assert_eq!(compute_stats(&filtered).top_author.as_deref(), Some("Second"));
    }

    #[test]
    fn decades_are_ascending_and_floor_years() {
        let books = sample();
        let filtered = apply_filter(&books, &AuthorFilter::All);
        let buckets = bucket_by_decade(&filtered);

        assert_eq!(
            buckets,
            vec![
                DecadeBucket { decade: 1960, count: 1 },
                DecadeBucket { decade: 1980, count: 1 },
                DecadeBucket { decade: 1990, count: 1 },
                DecadeBucket { decade: 2010, count: 1 },
                DecadeBucket { decade: 2020, count: 1 },
            ]
        );
        let with_year = filtered.iter().filter(|b| b.year.is_some()).count();
        assert_eq!(buckets.iter().map(|b| b.count).sum::<usize>(), with_year);
    }

    #[test]
    fn top_authors_truncate_sort_and_match_record_counts() {
        let mut books = Vec::new();
        for (idx, (name, times)) in [("A", 1), ("B", 3), ("C", 2), ("D", 3), ("E", 1), ("F", 4)]
            .into_iter()
            .enumerate()
        {
            for n in 0..times {
                books.push(book(&format!("/works/{idx}-{n}"), &[name], Some(2000)));
            }
        }
        // Duplicate name inside one record still counts once for that record.
        books.push(book("/works/dup", &["E", "E"], None));

        let filtered = apply_filter(&books, &AuthorFilter::All);
        let top = top_author_frequencies(&filtered);

        assert_eq!(top.len(), TOP_AUTHORS);
        let names: Vec<&str> = top.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["F", "B", "D", "C", "E"]);
        assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
        for entry in &top {
            let expected = filtered.iter().filter(|b| b.has_author(&entry.name)).count();
            assert_eq!(entry.count, expected);
        }
    }

    #[test]
    fn decade_of_handles_negative_years() {
        assert_eq!(decade_of(1987), 1980);
        assert_eq!(decade_of(2020), 2020);
        assert_eq!(decade_of(-5), -10);
    }
}
