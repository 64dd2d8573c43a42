//! End-to-end indexing and search scenarios.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use kopis::lexical::index::posting::Posting;
use kopis::prelude::*;

fn moving_tips_config() -> IndexConfig {
    IndexConfig::new()
        .stored_indexed_field("keyword")
        .stored_field("title")
        .indexed_field("article")
}

fn moving_tips() -> Vec<Document> {
    [
        ("Clothes", "Pack clothes in suitcases", "Suitcases have wheels."),
        ("Map out", "Map out your new home", "Draw the rooms before the truck arrives."),
        ("electronics", "Photograph your electronics", "Take pictures of the cables."),
        ("heavy item", "Use small boxes for heavy items", "Books are heavy, boxes are not."),
    ]
    .into_iter()
    .map(|(keyword, title, article)| {
        Document::builder()
            .add_text("keyword", keyword)
            .add_text("title", title)
            .add_text("article", article)
            .build()
    })
    .collect()
}

fn committed_index(config: IndexConfig) -> Result<Index> {
    let index = Index::new(config)?;
    let writer = index.writer()?;
    for doc in moving_tips() {
        writer.add_document(doc)?;
    }
    writer.commit()?;
    Ok(index)
}

#[test]
fn test_keyword_search() -> Result<()> {
    let index = committed_index(moving_tips_config())?;

    let results = index.search("heavy", "keyword", 10)?;

    assert_eq!(results.hits.len(), 1);
    assert_eq!(results.total_hits, 1);
    let hit = &results.hits[0];
    assert_eq!(hit.doc_id, 3);
    assert!(hit.score > 0.0);
    assert_eq!(hit.fields.get("keyword"), Some("heavy item"));
    assert_eq!(hit.fields.get("title"), Some("Use small boxes for heavy items"));
    assert_eq!(hit.fields.get("article"), None);
    assert_eq!(results.max_score, hit.score);
    Ok(())
}

#[test]
fn test_zero_k_is_invalid() -> Result<()> {
    let index = committed_index(moving_tips_config())?;

    let result = index.search("heavy", "keyword", 0);
    assert!(matches!(result, Err(KopisError::InvalidArgument(_))));
    Ok(())
}

#[test]
fn test_add_after_commit_is_rejected() -> Result<()> {
    let index = Index::new(moving_tips_config())?;
    let writer = index.writer()?;
    writer.add_documents(moving_tips())?;
    writer.commit()?;

    let late = Document::builder().add_text("keyword", "late").build();
    assert!(matches!(writer.add_document(late), Err(KopisError::InvalidState(_))));
    assert!(index.search("late", "keyword", 10)?.is_empty());
    assert_eq!(index.snapshot()?.total_documents(), 4);
    Ok(())
}

#[test]
fn test_or_and_all_required() -> Result<()> {
    let any = committed_index(moving_tips_config())?;
    let results = any.search("heavy clothes", "keyword", 10)?;
    let ids: HashSet<DocId> = results.hits.iter().map(|h| h.doc_id).collect();
    assert_eq!(ids, HashSet::from([0, 3]));

    let all = committed_index(moving_tips_config().with_all_required(true))?;
    assert!(all.search("heavy clothes", "keyword", 10)?.is_empty());
    let results = all.search("heavy item", "keyword", 10)?;
    assert_eq!(results.hits.len(), 1);
    assert_eq!(results.hits[0].doc_id, 3);
    Ok(())
}

#[test]
fn test_explicit_operators() -> Result<()> {
    let index = committed_index(moving_tips_config())?;

    let results = index.search("heavy AND clothes", "keyword", 10)?;
    assert!(results.is_empty());

    let results = index.search("map AND out OR electronics", "keyword", 10)?;
    let ids: HashSet<DocId> = results.hits.iter().map(|h| h.doc_id).collect();
    assert_eq!(ids, HashSet::from([1, 2]));

    assert!(matches!(
        index.search("heavy AND", "keyword", 10),
        Err(KopisError::InvalidArgument(_))
    ));
    Ok(())
}

#[test]
fn test_query_errors() -> Result<()> {
    let index = committed_index(moving_tips_config())?;

    assert!(matches!(index.search("   ", "keyword", 10), Err(KopisError::EmptyQuery)));
    // title is stored only, so it cannot be searched.
    assert!(matches!(
        index.search("boxes", "title", 10),
        Err(KopisError::InvalidArgument(_))
    ));
    Ok(())
}

#[test]
fn test_unknown_term_returns_nothing() -> Result<()> {
    let index = committed_index(moving_tips_config())?;

    let results = index.search("piano", "keyword", 10)?;
    assert!(results.is_empty());
    assert_eq!(results.total_hits, 0);
    assert_eq!(results.max_score, 0.0);
    Ok(())
}

#[test]
fn test_ranking_prefers_frequent_and_rare_terms() -> Result<()> {
    let index = Index::new(IndexConfig::new().stored_indexed_field("body"))?;
    let writer = index.writer()?;
    for body in ["box box box", "box tape", "tape", "box", "bubble wrap"] {
        writer.add_document(Document::builder().add_text("body", body).build())?;
    }
    writer.commit()?;

    let results = index.search("box", "body", 10)?;
    let ids: Vec<DocId> = results.hits.iter().map(|h| h.doc_id).collect();
    // Equal scores for docs 1 and 3 are ordered by id.
    assert_eq!(ids, vec![0, 1, 3]);
    assert_eq!(results.hits[1].score, results.hits[2].score);
    for pair in results.hits.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }

    // "wrap" occurs in one document, "box" in three.
    let rare = index.search("wrap", "body", 10)?;
    assert!(rare.hits[0].score > results.hits[1].score);

    let top = index.search("box tape", "body", 2)?;
    assert_eq!(top.total_hits, 4);
    assert_eq!(top.hits.len(), 2);
    // doc 0 has box three times, doc 1 has both terms once.
    assert_eq!(top.hits[0].doc_id, 0);
    assert_eq!(top.hits[1].doc_id, 1);
    Ok(())
}

#[test]
fn test_postings_and_frequencies() -> Result<()> {
    let index = committed_index(moving_tips_config())?;
    let snapshot = index.snapshot()?;
    let inverted = snapshot.inverted();

    assert_eq!(inverted.total_documents(), 4);
    assert_eq!(inverted.postings("article", "heavy"), &[Posting::new(3, 1)]);
    assert_eq!(inverted.postings("article", "boxes"), &[Posting::new(3, 1)]);
    assert_eq!(inverted.document_frequency("article", "the"), 2);
    assert_eq!(
        inverted.postings("article", "the"),
        &[Posting::new(1, 2), Posting::new(2, 1)]
    );
    assert!(inverted.postings("title", "boxes").is_empty());

    for field in inverted.field_names() {
        for term in inverted.terms(field) {
            let postings = inverted.postings(field, term);
            assert!(!postings.is_empty());
            assert!(postings.windows(2).all(|p| p[0].doc_id < p[1].doc_id));
            assert!(postings.iter().all(|p| p.frequency >= 1));
        }
    }
    Ok(())
}

#[test]
fn test_stopwords_apply_to_index_and_query() -> Result<()> {
    let index = committed_index(moving_tips_config().with_stopwords(["the", "of"]))?;
    let snapshot = index.snapshot()?;

    assert!(snapshot.inverted().postings("article", "the").is_empty());
    assert!(index.search("the", "article", 10)?.is_empty());
    assert_eq!(index.search("the cables", "article", 10)?.hits.len(), 1);
    Ok(())
}

#[test]
fn test_concurrent_adds_get_gapless_ids() -> Result<()> {
    let index = Index::new(IndexConfig::new().stored_indexed_field("body"))?;
    let writer = Arc::new(index.writer()?);

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let writer = Arc::clone(&writer);
            thread::spawn(move || -> Result<Vec<DocId>> {
                (0..25)
                    .map(|i| {
                        let doc = Document::builder()
                            .add_text("body", format!("thread{t} item{i}"))
                            .build();
                        writer.add_document(doc)
                    })
                    .collect()
            })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.extend(handle.join().expect("writer thread panicked")?);
    }
    ids.sort_unstable();
    assert_eq!(ids, (0..100).collect::<Vec<DocId>>());

    writer.commit()?;
    let snapshot = index.snapshot()?;
    assert_eq!(snapshot.total_documents(), 100);
    assert_eq!(snapshot.store().len(), 100);
    assert_eq!(index.search("thread2", "body", 100)?.total_hits, 25);
    Ok(())
}

#[test]
fn test_concurrent_searches() -> Result<()> {
    let index = committed_index(moving_tips_config())?;

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let index = index.clone();
            thread::spawn(move || index.search("heavy", "keyword", 10))
        })
        .collect();

    for handle in handles {
        let results = handle.join().expect("search thread panicked")?;
        assert_eq!(results.hits.len(), 1);
        assert_eq!(results.hits[0].doc_id, 3);
    }
    Ok(())
}

#[test]
fn test_multi_valued_field() -> Result<()> {
    let index = Index::new(IndexConfig::new().stored_indexed_field("tag"))?;
    let writer = index.writer()?;
    writer.add_document(
        Document::builder()
            .add_text("tag", "fragile")
            .add_text("tag", "kitchen fragile")
            .build(),
    )?;
    writer.commit()?;

    let snapshot = index.snapshot()?;
    assert_eq!(snapshot.inverted().postings("tag", "fragile"), &[Posting::new(0, 2)]);

    let hit = &index.search("kitchen", "tag", 1)?.hits[0];
    let tags: Vec<&str> = hit.fields.get_all("tag").collect();
    assert_eq!(tags, vec!["fragile", "kitchen fragile"]);
    Ok(())
}
