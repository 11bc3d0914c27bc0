//! Link Annotation Cleaner Implementation
//! Author: kartik4091
//! Removes /Link annotations from page /Annots arrays without
//! disturbing any other object in the document graph.

use std::{collections::BTreeSet, sync::Arc};

use async_trait::async_trait;
use lopdf::{Dictionary, Document, Object, ObjectId};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cleaner::Cleaner;
use crate::config::CleanerConfig;
use crate::error::{CleanerError, Result};
use crate::pdf_document::PdfDocument;

/// Counters for one cleaning run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanStats {
    pub pages_visited: u64,
    pub annotations_seen: u64,
    pub links_removed: u64,
    /// Pages whose /Annots key was deleted because nothing survived
    pub arrays_dropped: u64,
    /// Indirect objects deleted after losing their last reference
    pub objects_pruned: u64,
    /// /Annots entries with an unexpected shape, left untouched
    pub malformed_annots: u64,
}

impl CleanStats {
    pub fn merge(&mut self, other: &CleanStats) {
        self.pages_visited += other.pages_visited;
        self.annotations_seen += other.annotations_seen;
        self.links_removed += other.links_removed;
        self.arrays_dropped += other.arrays_dropped;
        self.objects_pruned += other.objects_pruned;
        self.malformed_annots += other.malformed_annots;
    }
}

/// Where a page's /Annots array came from
enum AnnotsSource {
    Direct(Vec<Object>),
    Referenced(ObjectId, Vec<Object>),
}

/// Removes Link annotations from a loaded document
#[derive(Debug)]
pub struct LinkCleaner {
    config: CleanerConfig,
    stats: Arc<RwLock<CleanStats>>,
}

impl LinkCleaner {
    pub fn new(config: CleanerConfig) -> Self {
        Self {
            config,
            stats: Arc::new(RwLock::new(CleanStats::default())),
        }
    }

    /// Strips Link annotations from every page of `doc`.
    ///
    /// Pages without a link annotation are not rewritten at all, so a
    /// document carrying no links round-trips structurally unchanged.
    pub fn clean_document(&self, doc: &mut Document) -> Result<CleanStats> {
        let mut run = CleanStats::default();
        let mut removed_ids: BTreeSet<ObjectId> = BTreeSet::new();

        for (page_no, page_id) in doc.get_pages() {
            run.pages_visited += 1;

            let source = match self.annots_source(doc, page_no, page_id, &mut run)? {
                Some(source) => source,
                None => continue,
            };
            let (array_id, entries) = match source {
                AnnotsSource::Direct(entries) => (None, entries),
                AnnotsSource::Referenced(id, entries) => (Some(id), entries),
            };

            let links_before = run.links_removed;
            let kept = filter_entries(doc, &entries, &mut run, &mut removed_ids);
            if run.links_removed == links_before {
                continue;
            }

            let page = doc
                .get_object_mut(page_id)
                .map_err(|_| CleanerError::MissingPageDictionary(page_no))?
                .as_dict_mut()
                .map_err(|_| CleanerError::MissingPageDictionary(page_no))?;

            if kept.is_empty() {
                page.remove(b"Annots");
                run.arrays_dropped += 1;
                debug!("Page {}: dropped empty /Annots array", page_no);
            } else {
                page.set("Annots", Object::Array(kept));
            }

            // The page no longer points at the old array object
            if let Some(id) = array_id {
                removed_ids.insert(id);
            }
        }

        if self.config.prune_orphans && !removed_ids.is_empty() {
            run.objects_pruned = prune_orphans(doc, &removed_ids, self.config.max_prune_passes);
        }

        Ok(run)
    }

    /// Resolves a page's /Annots entry, which may be absent, a direct
    /// array, or an indirect reference to an array.
    fn annots_source(
        &self,
        doc: &Document,
        page_no: u32,
        page_id: ObjectId,
        run: &mut CleanStats,
    ) -> Result<Option<AnnotsSource>> {
        let page = doc
            .get_dictionary(page_id)
            .map_err(|_| CleanerError::MissingPageDictionary(page_no))?;

        let source = match page.get(b"Annots") {
            Err(_) => None,
            Ok(Object::Array(entries)) => Some(AnnotsSource::Direct(entries.clone())),
            Ok(Object::Reference(id)) => match doc.get_object(*id) {
                Ok(Object::Array(entries)) => Some(AnnotsSource::Referenced(*id, entries.clone())),
                _ => {
                    warn!("Page {}: /Annots reference does not resolve to an array", page_no);
                    run.malformed_annots += 1;
                    None
                }
            },
            Ok(_) => {
                warn!("Page {}: /Annots is neither an array nor a reference", page_no);
                run.malformed_annots += 1;
                None
            }
        };

        Ok(source)
    }
}

impl Default for LinkCleaner {
    fn default() -> Self {
        Self::new(CleanerConfig::default())
    }
}

#[async_trait]
impl Cleaner for LinkCleaner {
    async fn clean(&self, document: &mut PdfDocument) -> Result<CleanStats> {
        let run = self.clean_document(&mut document.document)?;

        let mut stats = self.stats.write().await;
        stats.merge(&run);

        info!(
            "🔗 Removed {} link annotation(s) across {} page(s)",
            run.links_removed, run.pages_visited
        );
        Ok(run)
    }

    async fn stats(&self) -> CleanStats {
        self.stats.read().await.clone()
    }

    async fn reset(&self) -> Result<()> {
        let mut stats = self.stats.write().await;
        *stats = CleanStats::default();
        Ok(())
    }
}

/// Splits an /Annots array into kept entries and removed link ids.
///
/// Entries that are not resolvable link dictionaries pass through
/// unchanged: non-Link annotations, direct non-dictionary objects,
/// and dangling references are all preserved.
fn filter_entries(
    doc: &Document,
    entries: &[Object],
    run: &mut CleanStats,
    removed_ids: &mut BTreeSet<ObjectId>,
) -> Vec<Object> {
    let mut kept = Vec::with_capacity(entries.len());

    for entry in entries {
        run.annotations_seen += 1;
        match entry {
            Object::Reference(id) => match doc.get_object(*id) {
                Ok(Object::Dictionary(dict)) if is_link_annotation(dict) => {
                    run.links_removed += 1;
                    removed_ids.insert(*id);
                }
                _ => kept.push(entry.clone()),
            },
            Object::Dictionary(dict) if is_link_annotation(dict) => {
                run.links_removed += 1;
            }
            other => kept.push(other.clone()),
        }
    }

    kept
}

fn is_link_annotation(dict: &Dictionary) -> bool {
    matches!(dict.get(b"Subtype"), Ok(Object::Name(name)) if name == b"Link")
}

/// Deletes candidate objects that nothing in the document references.
///
/// Removing one candidate can orphan another (a shared /Annots array
/// kept alive by a second page), so passes repeat until a fixpoint or
/// `max_passes`. An object still referenced from anywhere, such as a
/// popup's /Parent, is never deleted.
fn prune_orphans(doc: &mut Document, candidates: &BTreeSet<ObjectId>, max_passes: usize) -> u64 {
    let mut pruned = 0u64;

    for _ in 0..max_passes {
        let mut progressed = false;

        for candidate in candidates {
            if !doc.objects.contains_key(candidate) {
                continue;
            }
            let referenced = dict_references(&doc.trailer, *candidate)
                || doc
                    .objects
                    .iter()
                    .filter(|&(id, _)| id != candidate)
                    .any(|(_, obj)| object_references(obj, *candidate));
            if !referenced {
                doc.objects.remove(candidate);
                pruned += 1;
                progressed = true;
            }
        }

        if !progressed {
            break;
        }
    }

    pruned
}

fn object_references(obj: &Object, target: ObjectId) -> bool {
    match obj {
        Object::Reference(id) => *id == target,
        Object::Array(items) => items.iter().any(|item| object_references(item, target)),
        Object::Dictionary(dict) => dict_references(dict, target),
        Object::Stream(stream) => dict_references(&stream.dict, target),
        _ => false,
    }
}

fn dict_references(dict: &Dictionary, target: ObjectId) -> bool {
    dict.iter().any(|(_, value)| object_references(value, target))
}
