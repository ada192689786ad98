//! Client-side cache of the document listing.
//!
//! The listing is fetched lazily when the dashboard is shown. Any change made
//! elsewhere (editor saves, deletions, logout) is reported as a
//! [`ListingMessage`], which patches the cached copy for immediate display
//! and marks it stale so the next visit refetches from the backend.

use common::model::document::{Document, DocumentId};

#[derive(Debug, Clone, PartialEq)]
pub enum ListingMessage {
    /// Refetch on next display.
    Invalidate,
    /// A document was created or updated.
    Upserted(Document),
    /// A document was deleted.
    Removed(DocumentId),
    /// Drop everything; the user changed.
    Cleared,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ListingCache {
    documents: Option<Vec<Document>>,
    stale: bool,
    fetching: bool,
    failed: bool,
    /// Bumped by `Cleared`; answers to fetches from an older epoch are dropped.
    epoch: u32,
}

impl ListingCache {
    pub fn apply(&mut self, message: ListingMessage) {
        match message {
            ListingMessage::Invalidate => {
                self.stale = true;
                self.failed = false;
            }
            ListingMessage::Upserted(document) => {
                if let (Some(documents), Some(id)) = (self.documents.as_mut(), document.id) {
                    match documents.iter_mut().find(|d| d.id == Some(id)) {
                        Some(existing) => *existing = document,
                        None => documents.insert(0, document),
                    }
                }
                self.stale = true;
            }
            ListingMessage::Removed(id) => {
                if let Some(documents) = self.documents.as_mut() {
                    documents.retain(|d| d.id != Some(id));
                }
                self.stale = true;
            }
            ListingMessage::Cleared => {
                *self = Self {
                    epoch: self.epoch.wrapping_add(1),
                    ..Self::default()
                }
            }
        }
    }

    /// Whether a fetch should start now.
    pub fn needs_fetch(&self) -> bool {
        !self.fetching && !self.failed && (self.documents.is_none() || self.stale)
    }

    /// Marks a fetch as running and returns the epoch to answer with.
    pub fn begin_fetch(&mut self) -> u32 {
        self.fetching = true;
        self.epoch
    }

    pub fn fetched(&mut self, epoch: u32, documents: Vec<Document>) {
        if epoch != self.epoch {
            return;
        }
        self.documents = Some(documents);
        self.stale = false;
        self.fetching = false;
        self.failed = false;
    }

    /// Stops automatic refetching until the next [`ListingMessage::Invalidate`].
    pub fn fetch_failed(&mut self, epoch: u32) {
        if epoch != self.epoch {
            return;
        }
        self.fetching = false;
        self.failed = true;
    }

    pub fn documents(&self) -> Option<&[Document]> {
        self.documents.as_deref()
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching
    }

    pub fn has_failed(&self) -> bool {
        self.failed
    }
}
