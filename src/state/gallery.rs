//! The artwork gallery: identifiers, fetched artworks and the view index
//!
//! This is the whole orchestration state of the app. It never performs I/O.
//! Operations that may need more artworks return a `BatchRequest`, which
//! the caller turns into a parallel fetch and reports back through
//! `complete_batch` or `fail_batch`.

use tracing::debug;

use super::data::ArtworkRecord;

/// Identifies one identifier list (one query session)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Generation(u64);

/// A batch of detail records to fetch for a given session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
    pub generation: Generation,
    pub ids: Vec<String>,
}

#[derive(Debug)]
pub struct Gallery {
    batch_size: usize,
    generation: u64,
    /// Result of the latest search, replaced wholesale
    identifiers: Vec<String>,
    /// Next identifier to request. Tracked apart from the artwork count
    /// because invalid records are dropped.
    cursor: usize,
    artworks: Vec<ArtworkRecord>,
    /// None until the eyes open for the first time
    index: Option<usize>,
    /// Number of identifiers in the batch currently being fetched
    in_flight: Option<usize>,
    eyes_closed: bool,
}

impl Gallery {
    /// Create an empty gallery.
    ///
    /// Starting with the eyes open counts as the first "open", so the index
    /// begins at 0 rather than unset.
    pub fn new(batch_size: usize, eyes_closed: bool) -> Self {
        Self {
            batch_size: batch_size.max(1),
            generation: 0,
            identifiers: Vec::new(),
            cursor: 0,
            artworks: Vec::new(),
            index: if eyes_closed { None } else { Some(0) },
            in_flight: None,
            eyes_closed,
        }
    }

    pub fn generation(&self) -> Generation {
        Generation(self.generation)
    }

    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    pub fn artworks(&self) -> &[ArtworkRecord] {
        &self.artworks
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn eyes_closed(&self) -> bool {
        self.eyes_closed
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// The artwork to display: `index mod len`, or nothing when the index
    /// is unset or no artwork has been fetched yet.
    pub fn current(&self) -> Option<&ArtworkRecord> {
        let index = self.index?;
        if self.artworks.is_empty() {
            return None;
        }
        self.artworks.get(index % self.artworks.len())
    }

    /// Start a new session with the result of a search.
    ///
    /// Artworks from the previous session are dropped and any batch still
    /// in flight becomes stale. A set index restarts at 0 so the next
    /// picture shown belongs to the new results.
    pub fn replace_identifiers(&mut self, identifiers: Vec<String>) -> Option<BatchRequest> {
        self.generation += 1;
        debug!(
            "🖼️ Session {}: {} identifiers",
            self.generation,
            identifiers.len()
        );

        self.identifiers = identifiers;
        self.cursor = 0;
        self.artworks.clear();
        self.in_flight = None;
        self.index = self.index.map(|_| 0);

        self.plan_prefetch()
    }

    /// Record a change of the external eyes flag.
    ///
    /// Only a closed-to-open transition advances the index; repeated
    /// reports of the same state are ignored.
    pub fn set_eyes_closed(&mut self, closed: bool) -> Option<BatchRequest> {
        let opened = self.eyes_closed && !closed;
        self.eyes_closed = closed;

        if !opened {
            return None;
        }

        let next = self.index.map_or(0, |i| i + 1);
        self.index = Some(next);
        debug!("👁️ Eyes opened, index now {}", next);

        self.plan_prefetch()
    }

    /// Take back a close that was not meant as one. The eyes count as open
    /// again and the index stays where it is.
    pub fn cancel_close(&mut self) {
        self.eyes_closed = false;
    }

    /// Append a fetched batch. Results for an older session are discarded.
    pub fn complete_batch(
        &mut self,
        generation: Generation,
        records: Vec<ArtworkRecord>,
    ) -> Option<BatchRequest> {
        if generation != self.generation() {
            debug!("Dropping stale batch from session {}", generation.0);
            return None;
        }

        let requested = self.in_flight.take().unwrap_or(0);
        self.cursor = (self.cursor + requested).min(self.identifiers.len());
        debug!(
            "📥 Batch done: {} of {} records usable",
            records.len(),
            requested
        );
        self.artworks.extend(records);

        self.plan_prefetch()
    }

    /// Forget a failed batch. The same identifiers are requested again the
    /// next time the index moves.
    pub fn fail_batch(&mut self, generation: Generation) {
        if generation == self.generation() {
            self.in_flight = None;
        }
    }

    /// Request the next batch when the buffered artworks ahead of the index
    /// drop below the prefetch margin.
    pub fn plan_prefetch(&mut self) -> Option<BatchRequest> {
        if self.in_flight.is_some() || self.cursor >= self.identifiers.len() {
            return None;
        }

        // An unset index counts as -1
        let position = self.index.map_or(-1, |i| i as i64);
        let remaining = self.artworks.len() as i64 - position;
        if remaining >= self.prefetch_margin() as i64 {
            return None;
        }

        let end = (self.cursor + self.batch_size).min(self.identifiers.len());
        let ids = self.identifiers[self.cursor..end].to_vec();
        self.in_flight = Some(ids.len());

        Some(BatchRequest {
            generation: self.generation(),
            ids,
        })
    }

    fn prefetch_margin(&self) -> usize {
        (self.batch_size - 1).max(1)
    }
}
