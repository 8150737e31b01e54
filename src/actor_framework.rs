use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Debug, Display};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, instrument};

// =============================================================================
// 1. THE ABSTRACTION (Documents, Drafts, and Filters)
// =============================================================================

/// Trait that any record must implement to be stored by a [`CollectionActor`].
pub trait Document: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Ordered so that finds come back sorted by ascending id.
    type Id: Ord + Clone + Send + Sync + Display + Debug;
    /// Everything needed to build the document once its id is known.
    type Draft: Send + Debug;
    /// Query predicate; the default value matches every record.
    type Filter: Send + Sync + Debug + Default;

    /// Collection name, also used for the snapshot file name.
    const COLLECTION: &'static str;

    fn id(&self) -> &Self::Id;

    fn from_draft(id: Self::Id, draft: Self::Draft) -> Self;

    fn matches(&self, filter: &Self::Filter) -> bool;
}

/// Failures raised by a collection or by talking to it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Duplicate id in {collection}: {id}")]
    DuplicateId { collection: &'static str, id: String },
    #[error("Snapshot I/O error: {0}")]
    Io(String),
    #[error("Collection actor closed")]
    Closed,
    #[error("Collection actor dropped the request")]
    Dropped,
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

#[derive(Debug)]
pub enum CollectionRequest<T: Document> {
    Find {
        filter: T::Filter,
        skip: usize,
        limit: usize,
        respond_to: Response<Vec<T>>,
    },
    FindById {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    FindMany {
        ids: Vec<T::Id>,
        respond_to: Response<Vec<T>>,
    },
    Insert {
        id: Option<T::Id>,
        draft: T::Draft,
        respond_to: Response<T>,
    },
    Replace {
        document: T,
        respond_to: Response<Option<T>>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<bool>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Sole owner of one collection's records. Requests are handled one at a
/// time, so writes to the same id never interleave.
pub struct CollectionActor<T: Document> {
    receiver: mpsc::Receiver<CollectionRequest<T>>,
    records: BTreeMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
    snapshot: Option<PathBuf>,
}

impl<T: Document> CollectionActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, CollectionClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            records: BTreeMap::new(),
            next_id_fn: Box::new(next_id_fn),
            snapshot: None,
        };
        (actor, CollectionClient::new(sender))
    }

    /// Backs the collection with `<dir>/<collection>.json`, loading whatever
    /// the file already holds.
    pub async fn with_data_dir(mut self, dir: &Path) -> Result<Self, StoreError> {
        tokio::fs::create_dir_all(dir).await.map_err(io_error)?;
        let path = dir.join(format!("{}.json", T::COLLECTION));

        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let documents: Vec<T> = serde_json::from_slice(&bytes)
                    .map_err(|e| StoreError::Io(format!("{}: {e}", path.display())))?;
                self.records = documents
                    .into_iter()
                    .map(|document| (document.id().clone(), document))
                    .collect();
                info!(
                    collection = T::COLLECTION,
                    records = self.records.len(),
                    path = %path.display(),
                    "Loaded snapshot"
                );
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No snapshot yet");
            }
            Err(e) => return Err(io_error(e)),
        }

        self.snapshot = Some(path);
        Ok(self)
    }

    #[instrument(name = "collection", skip(self), fields(collection = T::COLLECTION))]
    pub async fn run(mut self) {
        info!(records = self.records.len(), "Collection actor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CollectionRequest::Find { filter, skip, limit, respond_to } => {
                    let page = self
                        .records
                        .values()
                        .filter(|document| document.matches(&filter))
                        .skip(skip)
                        .take(limit)
                        .cloned()
                        .collect();
                    let _ = respond_to.send(Ok(page));
                }
                CollectionRequest::FindById { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.records.get(&id).cloned()));
                }
                CollectionRequest::FindMany { ids, respond_to } => {
                    let mut seen = BTreeSet::new();
                    let documents = ids
                        .iter()
                        .filter(|id| seen.insert(*id))
                        .filter_map(|id| self.records.get(id).cloned())
                        .collect();
                    let _ = respond_to.send(Ok(documents));
                }
                CollectionRequest::Insert { id, draft, respond_to } => {
                    let _ = respond_to.send(self.handle_insert(id, draft).await);
                }
                CollectionRequest::Replace { document, respond_to } => {
                    let _ = respond_to.send(self.handle_replace(document).await);
                }
                CollectionRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.handle_delete(id).await);
                }
            }
        }
        info!("Collection actor stopped");
    }

    async fn handle_insert(&mut self, id: Option<T::Id>, draft: T::Draft) -> Result<T, StoreError> {
        let id = id.unwrap_or_else(|| (self.next_id_fn)());
        if self.records.contains_key(&id) {
            return Err(StoreError::DuplicateId {
                collection: T::COLLECTION,
                id: id.to_string(),
            });
        }

        let document = T::from_draft(id.clone(), draft);
        self.records.insert(id.clone(), document.clone());
        if let Err(e) = self.persist().await {
            self.records.remove(&id);
            return Err(e);
        }
        debug!(%id, "Inserted");
        Ok(document)
    }

    async fn handle_replace(&mut self, document: T) -> Result<Option<T>, StoreError> {
        let id = document.id().clone();
        let Some(previous) = self.records.get_mut(&id) else {
            return Ok(None);
        };

        let previous = std::mem::replace(previous, document.clone());
        if let Err(e) = self.persist().await {
            self.records.insert(id, previous);
            return Err(e);
        }
        debug!(%id, "Replaced");
        Ok(Some(document))
    }

    async fn handle_delete(&mut self, id: T::Id) -> Result<bool, StoreError> {
        let Some(previous) = self.records.remove(&id) else {
            return Ok(false);
        };

        if let Err(e) = self.persist().await {
            self.records.insert(id, previous);
            return Err(e);
        }
        debug!(%id, "Deleted");
        Ok(true)
    }

    /// Rewrites the snapshot file, if any. Written to a sibling temp file
    /// first so a crash never leaves a half-written snapshot behind.
    async fn persist(&self) -> Result<(), StoreError> {
        let Some(path) = &self.snapshot else {
            return Ok(());
        };

        let documents: Vec<&T> = self.records.values().collect();
        let bytes = serde_json::to_vec_pretty(&documents).map_err(|e| StoreError::Io(e.to_string()))?;
        let tmp = path.with_extension("json.tmp");

        let written = async {
            tokio::fs::write(&tmp, bytes).await?;
            tokio::fs::rename(&tmp, path).await
        }
        .await;

        written.map_err(|e| {
            error!(error = %e, path = %path.display(), "Snapshot write failed");
            io_error(e)
        })
    }
}

fn io_error(e: std::io::Error) -> StoreError {
    StoreError::Io(e.to_string())
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// Send a request variant and wait for the actor's reply.
macro_rules! request {
    ($self:ident, $variant:ident { $($field:ident),* }) => {{
        let (respond_to, response) = oneshot::channel();
        $self
            .sender
            .send(CollectionRequest::$variant { $($field,)* respond_to })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }};
}

/// Handle to a running [`CollectionActor`]. Cheap to clone.
#[derive(Clone)]
pub struct CollectionClient<T: Document> {
    sender: mpsc::Sender<CollectionRequest<T>>,
}

impl<T: Document> CollectionClient<T> {
    pub(crate) fn new(sender: mpsc::Sender<CollectionRequest<T>>) -> Self {
        Self { sender }
    }

    /// Matching records in ascending id order, `skip` then `limit` applied.
    pub async fn find(&self, filter: T::Filter, skip: usize, limit: usize) -> Result<Vec<T>, StoreError> {
        request!(self, Find { filter, skip, limit })
    }

    pub async fn find_by_id(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        request!(self, FindById { id })
    }

    /// Batch lookup. Missing ids are skipped and repeated ids are returned once.
    pub async fn find_many(&self, ids: Vec<T::Id>) -> Result<Vec<T>, StoreError> {
        request!(self, FindMany { ids })
    }

    /// Stores a new document. A generated id is used when `id` is `None`.
    pub async fn insert(&self, id: Option<T::Id>, draft: T::Draft) -> Result<T, StoreError> {
        request!(self, Insert { id, draft })
    }

    /// Overwrites the stored record with the same id. `None` if there is none.
    pub async fn replace(&self, document: T) -> Result<Option<T>, StoreError> {
        request!(self, Replace { document })
    }

    /// Removes a record. `false` if nothing was there.
    pub async fn delete(&self, id: T::Id) -> Result<bool, StoreError> {
        request!(self, Delete { id })
    }
}

impl<T: Document> Debug for CollectionClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionClient")
            .field("collection", &T::COLLECTION)
            .finish()
    }
}
